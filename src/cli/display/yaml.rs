//! Minimal YAML emitter over `serde_json::Value`.
//!
//! Maps become `key: value` lines, nested collections recurse two spaces
//! deeper and list items are prefixed with `- `. Scalars are printed bare;
//! there is no quoting or escaping beyond the empty string.

use serde_json::Value;

pub fn to_yaml(value: &Value) -> String {
    let mut out = String::new();
    emit(value, 0, &mut out);
    out.trim_end_matches('\n').to_string()
}

fn emit(value: &Value, indent: usize, out: &mut String) {
    let pad = " ".repeat(indent);
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if is_nested(child) {
                    out.push_str(&format!("{}{}:\n", pad, key));
                    emit(child, indent + 2, out);
                } else {
                    out.push_str(&format!("{}{}: {}\n", pad, key, scalar(child)));
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                let mut nested = String::new();
                emit(item, indent + 2, &mut nested);
                out.push_str(&format!("{}- {}", pad, nested.trim_start()));
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
        other => {
            out.push_str(&format!("{}{}\n", pad, scalar(other)));
        }
    }
}

fn is_nested(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) if s.is_empty() => "\"\"".to_string(),
        Value::String(s) => s.clone(),
        Value::Object(_) => "{}".to_string(),
        Value::Array(_) => "[]".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_map_indents_two_spaces() {
        let value = json!({
            "metadata": { "name": "web", "labels": { "app": "web" } },
            "replicas": 3
        });
        assert_eq!(
            to_yaml(&value),
            "metadata:\n  labels:\n    app: web\n  name: web\nreplicas: 3"
        );
    }

    #[test]
    fn test_list_of_maps() {
        let value = json!({
            "items": [
                { "name": "a", "ready": true },
                { "name": "b", "ready": false }
            ]
        });
        assert_eq!(
            to_yaml(&value),
            "items:\n  - name: a\n    ready: true\n  - name: b\n    ready: false"
        );
    }

    #[test]
    fn test_empty_containers_and_scalars() {
        let value = json!({ "a": [], "b": {}, "c": "", "d": null, "e": ["x", 1] });
        assert_eq!(
            to_yaml(&value),
            "a: []\nb: {}\nc: \"\"\nd: null\ne:\n  - x\n  - 1"
        );
    }
}
