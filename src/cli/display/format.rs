//! Output format selection and the JSON/YAML document shape.

use super::yaml::to_yaml;
use crate::domain::age::format_age;
use crate::domain::model::{Crd, CustomResource, Deployment, Namespace, Node, Pod, Release, Service};
use crate::shared::error::{Result, SimError};
use serde::Serialize;
use serde_json::{json, Value};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Wide,
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "table" => Ok(OutputFormat::Table),
            "wide" => Ok(OutputFormat::Wide),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(SimError::invalid(format!(
                "error: unable to match a printer suitable for the output format \"{}\", allowed formats are: json,yaml,wide",
                other
            ))),
        }
    }
}

impl OutputFormat {
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Yaml)
    }

    pub fn is_wide(&self) -> bool {
        matches!(self, OutputFormat::Wide)
    }
}

/// Records that can be emitted as a document with a derived `age` field.
pub trait Document: Serialize {
    fn created_at(&self) -> i64;
}

impl Document for Node {
    fn created_at(&self) -> i64 {
        self.creation_timestamp
    }
}

impl Document for Namespace {
    fn created_at(&self) -> i64 {
        self.creation_timestamp
    }
}

impl Document for Pod {
    fn created_at(&self) -> i64 {
        self.creation_timestamp
    }
}

impl Document for Deployment {
    fn created_at(&self) -> i64 {
        self.creation_timestamp
    }
}

impl Document for Service {
    fn created_at(&self) -> i64 {
        self.creation_timestamp
    }
}

impl Document for Crd {
    fn created_at(&self) -> i64 {
        self.creation_timestamp
    }
}

impl Document for CustomResource {
    fn created_at(&self) -> i64 {
        self.metadata.creation_timestamp
    }
}

impl Document for Release {
    fn created_at(&self) -> i64 {
        self.creation_timestamp
    }
}

pub fn to_value<T: Document>(item: &T, now_ms: i64) -> Result<Value> {
    let mut value = serde_json::to_value(item)?;
    if let Value::Object(map) = &mut value {
        map.insert(
            "age".to_string(),
            Value::String(format_age(item.created_at(), now_ms)),
        );
    }
    Ok(value)
}

/// `{apiVersion: v1, items: [...], kind: List}`
pub fn list_document(items: Vec<Value>) -> Value {
    json!({ "apiVersion": "v1", "items": items, "kind": "List" })
}

pub fn list_value<T: Document>(items: &[&T], now_ms: i64) -> Result<Value> {
    let items = items
        .iter()
        .map(|item| to_value(*item, now_ms))
        .collect::<Result<Vec<_>>>()?;
    Ok(list_document(items))
}

/// Encodes a document as JSON or YAML. Table formats never reach here.
pub fn encode(value: &Value, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(to_yaml(value)),
        _ => Ok(serde_json::to_string_pretty(value)?),
    }
}
