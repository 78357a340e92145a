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

//! `kubectl` verbs.

mod describe;
mod get;
mod info;
mod mutate;

use crate::domain::model::Crd;
use crate::domain::store::ResourceStore;
use crate::shared::error::{Result, SimError};

/// A resource kind as named on the command line.
#[derive(Debug, Clone)]
pub(crate) enum Kind {
    Node,
    Pod,
    Deployment,
    Service,
    Namespace,
    Crd,
    All,
    Custom(Crd),
}

impl Kind {
    /// Resolves singular, plural and short spellings, then installed CRDs.
    pub(crate) fn resolve(store: &ResourceStore, token: &str) -> Result<Kind> {
        let kind = match token.to_ascii_lowercase().as_str() {
            "node" | "nodes" | "no" => Kind::Node,
            "pod" | "pods" | "po" => Kind::Pod,
            "deployment" | "deployments" | "deploy" | "deployment.apps" | "deployments.apps" => {
                Kind::Deployment
            }
            "service" | "services" | "svc" => Kind::Service,
            "namespace" | "namespaces" | "ns" => Kind::Namespace,
            "customresourcedefinition"
            | "customresourcedefinitions"
            | "customresourcedefinitions.apiextensions.k8s.io"
            | "crd"
            | "crds" => Kind::Crd,
            "all" => Kind::All,
            _ => match store.find_crd(token) {
                Some(crd) => Kind::Custom(crd.clone()),
                None => return Err(SimError::UnknownResourceType(token.to_string())),
            },
        };
        Ok(kind)
    }
}

/// Splits `pod/web` into `("pod", Some("web"))`.
pub(crate) fn split_kind(token: &str) -> (&str, Option<&str>) {
    match token.split_once('/') {
        Some((kind, name)) if !name.is_empty() => (kind, Some(name)),
        _ => (token, None),
    }
}

/// Dispatches one `kubectl` invocation. `args` excludes the program name.
pub fn run(store: &mut ResourceStore, server: &str, args: &[String]) -> Result<String> {
    let Some((verb, rest)) = args.split_first() else {
        return Ok(info::help());
    };

    match verb.as_str() {
        "get" => get::get(store, rest),
        "describe" => describe::describe(store, rest),
        "create" => mutate::create(store, rest),
        "delete" => mutate::delete(store, rest),
        "apply" => mutate::apply(rest),
        "scale" => mutate::scale(store, rest),
        "logs" => info::logs(store, rest),
        "version" => Ok(info::version(rest)),
        "cluster-info" => Ok(info::cluster_info(server, rest)),
        "config" => info::config(server, rest),
        "exec" | "attach" | "port-forward" => Err(SimError::unsupported(
            "Error: Interactive commands are not supported in this simulator",
        )),
        "edit" | "patch" => Ok(format!(
            "Note: {} command simulation is limited. Use create/delete/apply for full control.",
            verb
        )),
        "help" | "--help" | "-h" => Ok(info::help()),
        other => Err(SimError::unknown_command(other, "kubectl")),
    }
}
