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

//! Read-only verbs with canned or derived text: version, cluster-info,
//! config, logs and help.

use super::split_kind;
use crate::cli::display::table::{col, render_rows};
use crate::domain::age::log_time;
use crate::domain::store::ResourceStore;
use crate::infrastructure::constants::{
    CLUSTER_NAME, CLUSTER_USER, CURRENT_CONTEXT, KUBERNETES_VERSION, KUSTOMIZE_VERSION,
};
use crate::interpreter::flags::Flags;
use crate::shared::error::{Result, SimError};
use serde::Serialize;
use std::collections::BTreeMap;

const REDACTED: &str = "DATA+OMITTED";

/// Offset from pod creation in milliseconds, then the message.
const LOG_LINES: [(i64, &str); 6] = [
    (234, "INFO Starting application..."),
    (1_112, "INFO Connecting to database"),
    (2_445, "INFO Database connection established"),
    (2_567, "INFO Server listening on port 8080"),
    (77_891, "INFO Health check passed"),
    (153_123, "INFO Processing request GET /api/status"),
];

const HELP: &str = "kubectl controls the Kubernetes cluster manager.

Find more information at: https://kubernetes.io/docs/reference/kubectl/

Basic Commands (Beginner):
  create         Create a resource from a file or stdin
  get            Display one or many resources
  delete         Delete resources

Basic Commands (Intermediate):
  apply          Apply a configuration to a resource
  scale          Set a new size for a deployment

Troubleshooting and Debugging Commands:
  describe       Show details of a specific resource or group of resources
  logs           Print the logs for a container in a pod

Cluster Management Commands:
  cluster-info   Display cluster information
  version        Print the client and server version information
  config         Modify kubeconfig files

Usage:
  kubectl [flags] [options]

Use \"kubectl <command> --help\" for more information about a given command.";

pub fn help() -> String {
    HELP.to_string()
}

pub fn version(args: &[String]) -> String {
    let client = format!(
        "Client Version: {}\nKustomize Version: {}",
        KUBERNETES_VERSION, KUSTOMIZE_VERSION
    );
    if Flags::parse(args).present(&["client"]) {
        client
    } else {
        format!("{}\nServer Version: {}", client, KUBERNETES_VERSION)
    }
}

pub fn cluster_info(server: &str, args: &[String]) -> String {
    if args.first().map(String::as_str) == Some("dump") {
        return "Note: cluster-info dump is not simulated. Use get and describe to inspect resources."
            .to_string();
    }
    format!(
        "Kubernetes control plane is running at {server}\n\
         CoreDNS is running at {server}/api/v1/namespaces/kube-system/services/kube-dns:dns/proxy\n\
         \n\
         To further debug and diagnose cluster problems, use 'kubectl cluster-info dump'.",
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct Kubeconfig {
    #[serde(rename = "apiVersion")]
    api_version: &'static str,
    clusters: Vec<NamedCluster>,
    contexts: Vec<NamedContext>,
    current_context: &'static str,
    kind: &'static str,
    preferences: BTreeMap<String, String>,
    users: Vec<NamedUser>,
}

#[derive(Debug, Serialize)]
struct NamedCluster {
    cluster: ClusterEntry,
    name: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct ClusterEntry {
    certificate_authority_data: &'static str,
    server: String,
}

#[derive(Debug, Serialize)]
struct NamedContext {
    context: ContextEntry,
    name: &'static str,
}

#[derive(Debug, Serialize)]
struct ContextEntry {
    cluster: &'static str,
    user: &'static str,
}

#[derive(Debug, Serialize)]
struct NamedUser {
    name: &'static str,
    user: UserEntry,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct UserEntry {
    client_certificate_data: &'static str,
    client_key_data: &'static str,
}

impl Kubeconfig {
    fn redacted(server: &str) -> Self {
        Self {
            api_version: "v1",
            clusters: vec![NamedCluster {
                cluster: ClusterEntry {
                    certificate_authority_data: REDACTED,
                    server: server.to_string(),
                },
                name: CLUSTER_NAME,
            }],
            contexts: vec![NamedContext {
                context: ContextEntry {
                    cluster: CLUSTER_NAME,
                    user: CLUSTER_USER,
                },
                name: CURRENT_CONTEXT,
            }],
            current_context: CURRENT_CONTEXT,
            kind: "Config",
            preferences: BTreeMap::new(),
            users: vec![NamedUser {
                name: CLUSTER_USER,
                user: UserEntry {
                    client_certificate_data: REDACTED,
                    client_key_data: REDACTED,
                },
            }],
        }
    }
}

pub fn config(server: &str, args: &[String]) -> Result<String> {
    match args.first().map(String::as_str) {
        None | Some("view") => {
            let yaml = serde_yaml::to_string(&Kubeconfig::redacted(server))?;
            Ok(yaml.trim_end().to_string())
        }
        Some("current-context") => Ok(CURRENT_CONTEXT.to_string()),
        Some("get-contexts") => {
            let columns = [
                col("CURRENT", 9),
                col("NAME", 29),
                col("CLUSTER", 12),
                col("AUTHINFO", 18),
                col("NAMESPACE", 0),
            ];
            let row = vec![
                "*".to_string(),
                CURRENT_CONTEXT.to_string(),
                CLUSTER_NAME.to_string(),
                CLUSTER_USER.to_string(),
                String::new(),
            ];
            Ok(render_rows(&columns, &[row]))
        }
        Some(other) => Ok(format!(
            "Config subcommand \"{}\" is not fully implemented in this simulator",
            other
        )),
    }
}

/// `logs <pod>`, `logs pod/<pod>` or `logs deployment/<name>`, which picks
/// the first pod of the deployment.
pub fn logs(store: &ResourceStore, args: &[String]) -> Result<String> {
    let flags = Flags::parse(args);
    let Some(target) = flags.positional(0) else {
        return Err(SimError::invalid("Error: You must specify a pod name"));
    };
    let namespace = flags.namespace();

    let pod = match split_kind(target) {
        (kind, Some(name)) if matches!(kind, "deployment" | "deploy" | "deployments") => {
            let deployment = store
                .find_deployment(name, namespace)
                .ok_or_else(|| SimError::not_found("deployments.apps", name))?;
            store
                .owned_pods(&deployment.name, &deployment.namespace)
                .into_iter()
                .next()
                .ok_or_else(|| SimError::not_found("pods", name))?
        }
        (_, Some(name)) | (name, None) => store
            .find_pod(name, namespace)
            .ok_or_else(|| SimError::not_found("pods", name))?,
    };

    let lines: Vec<String> = LOG_LINES
        .iter()
        .map(|(offset, message)| format!("{} {}", log_time(pod.creation_timestamp + offset), message))
        .collect();

    let tail = match flags.value(&["tail"]) {
        Some(raw) => raw.parse::<i64>().map_err(|_| {
            SimError::invalid(format!("error: invalid argument \"{}\" for \"--tail\" flag", raw))
        })?,
        None => -1,
    };
    let skip = if tail < 0 {
        0
    } else {
        lines.len().saturating_sub(tail as usize)
    };
    Ok(lines[skip..].join("\n"))
}
