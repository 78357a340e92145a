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

//! Records held by the resource store.
//!
//! Every record carries `creation_timestamp` in epoch milliseconds; ages are
//! derived at render time and never stored.

use crate::infrastructure::constants::{
    NONE, SERVICE_CLUSTER_IP, SERVICE_LOAD_BALANCER, SERVICE_NODE_PORT,
};
use crate::shared::error::SimError;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub name: String,
    pub status: String,
    pub roles: String,
    pub version: String,
    pub internal_ip: String,
    pub os_image: String,
    pub kernel_version: String,
    pub container_runtime: String,
    pub creation_timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    pub name: String,
    pub status: String,
    pub creation_timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pod {
    pub name: String,
    pub namespace: String,
    pub ready: String,
    pub status: String,
    pub restarts: u32,
    pub ip: Option<String>,
    pub node: Option<String>,
    pub image: String,
    /// Value of the `app` label.
    pub app: String,
    /// Set for pods stamped out by a deployment.
    pub template_hash: Option<String>,
    pub creation_timestamp: i64,
}

impl Pod {
    pub fn ip_or_none(&self) -> &str {
        self.ip.as_deref().unwrap_or(NONE)
    }

    pub fn node_or_none(&self) -> &str {
        self.node.as_deref().unwrap_or(NONE)
    }

    pub fn container_name(&self) -> &str {
        container_name(&self.image)
    }
}

/// Container name derived from an image: no registry, no tag.
pub fn container_name(image: &str) -> &str {
    let base = image.rsplit('/').next().unwrap_or(image);
    base.split(':').next().unwrap_or(base)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub name: String,
    pub namespace: String,
    pub replicas: u32,
    pub ready_replicas: u32,
    pub up_to_date: u32,
    pub available: u32,
    pub image: String,
    pub template_hash: String,
    pub creation_timestamp: i64,
}

impl Deployment {
    /// READY column: `ready/desired`.
    pub fn ready(&self) -> String {
        format!("{}/{}", self.ready_replicas, self.replicas)
    }

    pub fn selector(&self) -> String {
        format!("app={}", self.name)
    }

    pub fn container_name(&self) -> &str {
        container_name(&self.image)
    }

    /// Settles every counter on `replicas`; the simulated rollout is instant.
    pub fn settle(&mut self, replicas: u32) {
        self.replicas = replicas;
        self.ready_replicas = replicas;
        self.up_to_date = replicas;
        self.available = replicas;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ServiceType {
    ClusterIP,
    NodePort,
    LoadBalancer,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::ClusterIP => SERVICE_CLUSTER_IP,
            ServiceType::NodePort => SERVICE_NODE_PORT,
            ServiceType::LoadBalancer => SERVICE_LOAD_BALANCER,
        }
    }

    pub fn exposes_node_port(&self) -> bool {
        !matches!(self, ServiceType::ClusterIP)
    }
}

impl std::str::FromStr for ServiceType {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clusterip" => Ok(ServiceType::ClusterIP),
            "nodeport" => Ok(ServiceType::NodePort),
            "loadbalancer" => Ok(ServiceType::LoadBalancer),
            _ => Err(SimError::invalid(format!(
                "error: invalid service type \"{}\": must be one of ClusterIP, NodePort, LoadBalancer",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub name: String,
    pub namespace: String,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub cluster_ip: String,
    pub external_ip: String,
    pub ports: String,
    pub selector: Option<String>,
    pub creation_timestamp: i64,
}

impl Service {
    pub fn selector_or_none(&self) -> &str {
        self.selector.as_deref().unwrap_or(NONE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Scope {
    Namespaced,
    Cluster,
}

/// An installed custom resource definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Crd {
    /// `<plural>.<group>`
    pub name: String,
    pub group: String,
    pub version: String,
    pub kind: String,
    pub plural: String,
    pub singular: String,
    pub scope: Scope,
    pub creation_timestamp: i64,
}

impl Crd {
    pub fn api_version(&self) -> String {
        format!("{}/{}", self.group, self.version)
    }

    /// True when `token` is the full name, plural, singular or lower-cased kind.
    pub fn matches(&self, token: &str) -> bool {
        let token = token.to_ascii_lowercase();
        token == self.name
            || token == self.plural
            || token == self.singular
            || token == self.kind.to_ascii_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub creation_timestamp: i64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// An instance of an installed custom kind. Read-only from the command surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomResource {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: serde_json::Value,
    pub status: serde_json::Value,
}

impl CustomResource {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata.namespace.as_deref()
    }
}

/// A package-manager release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub name: String,
    pub namespace: String,
    pub revision: u32,
    pub updated: String,
    pub status: String,
    pub chart: String,
    pub app_version: String,
    /// Deployments synthesised by this release, removed on uninstall.
    #[serde(skip)]
    pub components: Vec<String>,
    pub creation_timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_parse_case_insensitive() {
        assert_eq!(
            "loadbalancer".parse::<ServiceType>().unwrap(),
            ServiceType::LoadBalancer
        );
        assert_eq!(
            "NodePort".parse::<ServiceType>().unwrap(),
            ServiceType::NodePort
        );
        assert!("Headless".parse::<ServiceType>().is_err());
    }

    #[test]
    fn test_container_name_strips_registry_and_tag() {
        let pod = Pod {
            name: "web-abc".to_string(),
            namespace: "default".to_string(),
            ready: "1/1".to_string(),
            status: "Running".to_string(),
            restarts: 0,
            ip: None,
            node: None,
            image: "docker.io/library/nginx:1.25".to_string(),
            app: "web".to_string(),
            template_hash: None,
            creation_timestamp: 0,
        };
        assert_eq!(pod.container_name(), "nginx");
        assert_eq!(pod.ip_or_none(), "<none>");
    }

    #[test]
    fn test_deployment_settle() {
        let mut deployment = Deployment {
            name: "web".to_string(),
            namespace: "default".to_string(),
            replicas: 3,
            ready_replicas: 3,
            up_to_date: 3,
            available: 3,
            image: "nginx".to_string(),
            template_hash: "abc".to_string(),
            creation_timestamp: 0,
        };
        deployment.settle(1);
        assert_eq!(deployment.ready(), "1/1");
        assert_eq!(deployment.available, 1);
    }
}

/// A chart repository registered with `helm repo add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRepository {
    pub name: String,
    pub url: String,
}
