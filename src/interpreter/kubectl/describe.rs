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

use super::{split_kind, Kind};
use crate::cli::display::describe::{
    describe_crd, describe_custom_resource, describe_deployment, describe_namespace,
    describe_node, describe_pod, describe_service,
};
use crate::domain::model::{Scope, Service};
use crate::domain::store::ResourceStore;
use crate::interpreter::flags::Flags;
use crate::shared::error::{Result, SimError};

/// Without `-n` the first match across all namespaces is described.
pub fn describe(store: &ResourceStore, args: &[String]) -> Result<String> {
    let flags = Flags::parse(args);
    let Some(target) = flags.positional(0) else {
        return Err(SimError::invalid(
            "Error: You must specify the type of resource to describe",
        ));
    };
    let (kind, inline_name) = split_kind(target);
    let kind = Kind::resolve(store, kind)?;
    let Some(name) = inline_name.or_else(|| flags.positional(1)) else {
        return Err(SimError::invalid(
            "Error: You must specify the name of the resource to describe",
        ));
    };
    let namespace = flags.namespace();

    match kind {
        Kind::Node => {
            let node = store
                .find_node(name)
                .ok_or_else(|| SimError::not_found("nodes", name))?;
            Ok(describe_node(node, &store.pods_on_node(name), store.now()))
        }
        Kind::Pod => store
            .find_pod(name, namespace)
            .map(describe_pod)
            .ok_or_else(|| SimError::not_found("pods", name)),
        Kind::Deployment => store
            .find_deployment(name, namespace)
            .map(describe_deployment)
            .ok_or_else(|| SimError::not_found("deployments.apps", name)),
        Kind::Service => {
            let service = store
                .find_service(name, namespace)
                .ok_or_else(|| SimError::not_found("services", name))?;
            Ok(describe_service(service, &endpoints(store, service)))
        }
        Kind::Namespace => store
            .find_namespace(name)
            .map(describe_namespace)
            .ok_or_else(|| SimError::not_found("namespaces", name)),
        Kind::Crd => store
            .crds()
            .iter()
            .find(|c| c.name == name)
            .map(describe_crd)
            .ok_or_else(|| {
                SimError::not_found("customresourcedefinitions.apiextensions.k8s.io", name)
            }),
        Kind::Custom(crd) => {
            let filter = if crd.scope == Scope::Namespaced {
                namespace
            } else {
                None
            };
            store
                .custom_resources(&crd.kind, filter)
                .into_iter()
                .find(|r| r.name() == name)
                .map(describe_custom_resource)
                .ok_or_else(|| SimError::not_found(&crd.name, name))
        }
        Kind::All => Err(SimError::UnknownResourceType("all".to_string())),
    }
}

/// IPs of the pods an `app=<name>` selector matches.
fn endpoints<'a>(store: &'a ResourceStore, service: &Service) -> Vec<&'a str> {
    let Some(app) = service
        .selector
        .as_deref()
        .and_then(|s| s.strip_prefix("app="))
    else {
        return Vec::new();
    };
    store
        .pods(Some(&service.namespace))
        .into_iter()
        .filter(|p| p.app == app)
        .filter_map(|p| p.ip.as_deref())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entropy::{Entropy, ManualClock};

    fn store() -> ResourceStore {
        ResourceStore::new(
            Entropy::seeded(8),
            Box::new(ManualClock::new(1_731_234_195_000)),
            true,
        )
    }

    fn run(store: &ResourceStore, line: &str) -> Result<String> {
        let args: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        describe(store, &args)
    }

    #[test]
    fn test_describe_requires_kind_and_name() {
        let store = store();
        assert_eq!(
            run(&store, "").unwrap_err().to_string(),
            "Error: You must specify the type of resource to describe"
        );
        assert_eq!(
            run(&store, "pod").unwrap_err().to_string(),
            "Error: You must specify the name of the resource to describe"
        );
    }

    #[test]
    fn test_describe_finds_pod_in_any_namespace() {
        let out = run(&store(), "pod etcd-node-1").unwrap();
        assert!(out.contains("kube-system"));

        let err = run(&store(), "pod etcd-node-1 -n default").unwrap_err();
        assert!(matches!(err, SimError::NotFound { .. }));
    }

    #[test]
    fn test_describe_service_lists_endpoints() {
        let out = run(&store(), "svc/nginx-service").unwrap();
        assert!(out.contains("10.244.1.5:80"));
        assert!(out.contains("10.244.2.8:80"));
    }

    #[test]
    fn test_describe_custom_resource() {
        let mut store = store();
        store.install_crds();
        let out = run(&store, "project web-app -n default").unwrap();
        assert!(out.starts_with("Name:         web-app\n"));
        assert!(out.contains("Display Name:  Web Application"));

        let out = run(&store, "crd projects.choreo.dev").unwrap();
        assert!(out.contains("Kind:       Project"));
    }
}
