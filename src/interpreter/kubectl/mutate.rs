// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Verbs that change the store: create, delete, scale and apply.
//!
//! Every handler validates its arguments before touching the store, so a
//! rejected command leaves nothing behind.

use super::split_kind;
use crate::domain::model::ServiceType;
use crate::domain::store::ResourceStore;
use crate::infrastructure::constants::{DEFAULT_NAMESPACE, DEFAULT_SERVICE_PORT};
use crate::interpreter::flags::Flags;
use crate::shared::error::{Result, SimError};
use regex::Regex;

const DNS_LABEL: &str = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$";
const DNS_LABEL_MAX: usize = 63;

/// Object names must be lowercase RFC 1123 labels.
fn validate_name(kind: &str, name: &str) -> Result<()> {
    let label = Regex::new(DNS_LABEL).map_err(|e| SimError::invalid(e.to_string()))?;
    if name.len() <= DNS_LABEL_MAX && label.is_match(name) {
        return Ok(());
    }
    Err(SimError::invalid(format!(
        "The {kind} \"{name}\" is invalid: metadata.name: Invalid value: \"{name}\": a lowercase RFC 1123 label must consist of lower case alphanumeric characters or '-', and must start and end with an alphanumeric character",
    )))
}

fn unsupported_kind(kind: &str) -> SimError {
    SimError::invalid(format!(
        "Error: the server doesn't support resource type \"{}\"",
        kind
    ))
}

fn parse_replicas(flags: &Flags, default: Option<u32>) -> Result<u32> {
    match (flags.value(&["replicas"]), default) {
        (Some(raw), _) => raw
            .parse()
            .map_err(|_| SimError::invalid("Error: --replicas is required and must be a number")),
        (None, Some(default)) => Ok(default),
        (None, None) => Err(SimError::invalid(
            "Error: --replicas is required and must be a number",
        )),
    }
}

pub fn create(store: &mut ResourceStore, args: &[String]) -> Result<String> {
    let flags = Flags::parse(args);
    let Some(kind) = flags.positional(0) else {
        return Err(SimError::invalid("Error: must specify type of resource to create"));
    };
    let namespace = flags.namespace().unwrap_or(DEFAULT_NAMESPACE);

    match kind.to_ascii_lowercase().as_str() {
        "namespace" | "ns" => {
            let name = required_name(&flags, 1, "namespace")?;
            validate_name("Namespace", name)?;
            store.create_namespace(name)?;
            Ok(format!("namespace/{} created", name))
        }
        "deployment" | "deploy" => {
            let name = required_name(&flags, 1, "deployment")?;
            let image = flags.value(&["image"]).ok_or_else(|| {
                SimError::invalid("Error: --image is required for deployment creation")
            })?;
            let replicas = parse_replicas(&flags, Some(1))?;
            validate_name("Deployment", name)?;
            store.create_deployment(name, namespace, image, replicas)?;
            Ok(format!("deployment.apps/{} created", name))
        }
        "service" | "svc" => create_service(store, &flags, namespace),
        "pod" | "po" => {
            let name = required_name(&flags, 1, "pod")?;
            let image = flags
                .value(&["image"])
                .ok_or_else(|| SimError::invalid("Error: --image is required for pod creation"))?;
            validate_name("Pod", name)?;
            store.create_pod(name, namespace, image)?;
            Ok(format!("pod/{} created", name))
        }
        _ => Err(unsupported_kind(kind)),
    }
}

fn required_name<'a>(flags: &'a Flags, index: usize, kind: &str) -> Result<&'a str> {
    flags
        .positional(index)
        .ok_or_else(|| SimError::invalid(format!("Error: name is required for {} creation", kind)))
}

/// Accepts `create service <name> --type T --port P` as well as the
/// `create service <type> <name> --tcp=P:T` form.
fn create_service(store: &mut ResourceStore, flags: &Flags, namespace: &str) -> Result<String> {
    let (service_type, name) = match (flags.positional(1), flags.positional(2)) {
        (Some(first), Some(second)) => (first.parse::<ServiceType>()?, second),
        (Some(name), None) => {
            let service_type = match flags.value(&["type"]) {
                Some(raw) => raw.parse::<ServiceType>()?,
                None => ServiceType::ClusterIP,
            };
            (service_type, name)
        }
        _ => {
            return Err(SimError::invalid(
                "Error: name is required for service creation",
            ))
        }
    };

    let port = match flags
        .value(&["port"])
        .or_else(|| flags.value(&["tcp"]).map(|tcp| tcp.split(':').next().unwrap_or(tcp)))
    {
        Some(raw) => raw.parse::<u16>().map_err(|_| {
            SimError::invalid(format!("Error: invalid port \"{}\": must be a number", raw))
        })?,
        None => DEFAULT_SERVICE_PORT,
    };

    validate_name("Service", name)?;
    store.create_service(name, namespace, service_type, port)?;
    Ok(format!("service/{} created", name))
}

pub fn delete(store: &mut ResourceStore, args: &[String]) -> Result<String> {
    let flags = Flags::parse(args);
    let missing =
        || SimError::invalid("Error: You must specify the type of resource to delete and its name");
    let target = flags.positional(0).ok_or_else(missing)?;
    let (kind, inline_name) = split_kind(target);
    let name = inline_name
        .or_else(|| flags.positional(1))
        .ok_or_else(missing)?;
    let namespace = flags.namespace().unwrap_or(DEFAULT_NAMESPACE);

    match kind.to_ascii_lowercase().as_str() {
        "namespace" | "namespaces" | "ns" => {
            store.delete_namespace(name)?;
            Ok(format!("namespace \"{}\" deleted", name))
        }
        "pod" | "pods" | "po" => {
            store.delete_pod(name, namespace)?;
            Ok(format!("pod \"{}\" deleted", name))
        }
        "deployment" | "deployments" | "deploy" => {
            store.delete_deployment(name, namespace)?;
            Ok(format!("deployment.apps \"{}\" deleted", name))
        }
        "service" | "services" | "svc" => {
            store.delete_service(name, namespace)?;
            Ok(format!("service \"{}\" deleted", name))
        }
        _ => Err(unsupported_kind(kind)),
    }
}

/// `scale deployment/web`, `scale deployment web` or `scale web`.
pub fn scale(store: &mut ResourceStore, args: &[String]) -> Result<String> {
    let flags = Flags::parse(args);
    let (kind, name) = match (flags.positional(0), flags.positional(1)) {
        (Some(first), second) => match (split_kind(first), second) {
            ((kind, Some(name)), _) => (kind, name),
            ((kind, None), Some(name)) => (kind, name),
            ((name, None), None) => ("deployment", name),
        },
        (None, _) => {
            return Err(SimError::invalid(
                "Error: You must specify the type of resource to scale and its name",
            ))
        }
    };
    let replicas = parse_replicas(&flags, None)?;
    let namespace = flags.namespace().unwrap_or(DEFAULT_NAMESPACE);

    match kind.to_ascii_lowercase().as_str() {
        "deployment" | "deployments" | "deploy" | "deployment.apps" => {
            store.scale_deployment(name, namespace, replicas)?;
            Ok(format!("deployment.apps/{} scaled", name))
        }
        other => Err(SimError::invalid(format!(
            "Error: scaling for resource type \"{}\" is not supported",
            other
        ))),
    }
}

/// Manifests are not read; the note points at the imperative verbs.
pub fn apply(args: &[String]) -> Result<String> {
    let flags = Flags::parse(args);
    if flags.present(&["filename", "f"]) {
        Ok("Note: File-based apply is simulated. Use create commands for specific resources."
            .to_string())
    } else {
        Err(SimError::invalid("Error: must specify -f, --filename for apply"))
    }
}
