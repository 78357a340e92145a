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

//! The fabricated cluster every session starts from: one control-plane node,
//! two workers, a handful of workloads and the usual system pods.

use crate::domain::model::{Deployment, Namespace, Node, Pod, Service, ServiceType};
use crate::infrastructure::constants::{
    MILLIS_PER_DAY, NAMESPACE_STATUS_ACTIVE, NODE_NOT_READY, NODE_READY, NONE, POD_RUNNING,
    ROLE_CONTROL_PLANE, ROLE_WORKER,
};

const NODE_VERSION: &str = "v1.28.3";
const OS_IMAGE: &str = "Ubuntu 22.04.3 LTS";
const KERNEL_VERSION: &str = "5.15.0-88-generic";
const CONTAINER_RUNTIME: &str = "containerd://1.7.2";

#[derive(Debug, Clone, Default)]
pub struct Fixture {
    pub nodes: Vec<Node>,
    pub namespaces: Vec<Namespace>,
    pub pods: Vec<Pod>,
    pub deployments: Vec<Deployment>,
    pub services: Vec<Service>,
}

/// Builds the starting cluster relative to `now_ms`.
pub fn initial_cluster(now_ms: i64, nodes_ready: bool) -> Fixture {
    let ago = |days: i64| now_ms - days * MILLIS_PER_DAY;
    let node_status = if nodes_ready { NODE_READY } else { NODE_NOT_READY };

    let nodes = [
        ("node-1", ROLE_CONTROL_PLANE, "192.168.1.10"),
        ("node-2", ROLE_WORKER, "192.168.1.11"),
        ("node-3", ROLE_WORKER, "192.168.1.12"),
    ]
    .into_iter()
    .map(|(name, role, ip)| Node {
        name: name.to_string(),
        status: node_status.to_string(),
        roles: role.to_string(),
        version: NODE_VERSION.to_string(),
        internal_ip: ip.to_string(),
        os_image: OS_IMAGE.to_string(),
        kernel_version: KERNEL_VERSION.to_string(),
        container_runtime: CONTAINER_RUNTIME.to_string(),
        creation_timestamp: ago(45),
    })
    .collect();

    let namespaces = [
        ("default", 45),
        ("kube-system", 45),
        ("kube-public", 45),
        ("kube-node-lease", 45),
        ("production", 30),
        ("staging", 30),
    ]
    .into_iter()
    .map(|(name, days)| Namespace {
        name: name.to_string(),
        status: NAMESPACE_STATUS_ACTIVE.to_string(),
        creation_timestamp: ago(days),
    })
    .collect();

    // (name, namespace, ready, restarts, days, ip, node, image, app, template hash)
    let pod_rows: [(&str, &str, &str, u32, i64, &str, &str, &str, &str, Option<&str>); 14] = [
        ("nginx-deployment-7d4c8f6d9b-hx2lk", "default", "1/1", 0, 5, "10.244.1.5", "node-2", "nginx:1.25", "nginx-deployment", Some("7d4c8f6d9b")),
        ("nginx-deployment-7d4c8f6d9b-mt9pq", "default", "1/1", 0, 5, "10.244.2.8", "node-3", "nginx:1.25", "nginx-deployment", Some("7d4c8f6d9b")),
        ("redis-master-0", "default", "1/1", 1, 12, "10.244.1.12", "node-2", "redis:7.2", "redis-master", None),
        ("postgres-db-85f9c7b8d-xk4jl", "production", "1/1", 0, 18, "10.244.2.15", "node-3", "postgres:16", "postgres-db", Some("85f9c7b8d")),
        ("api-server-65b8d4f7c9-p2wvn", "production", "2/2", 0, 7, "10.244.1.20", "node-2", "acme/api-server:2.4.1", "api-server", Some("65b8d4f7c9")),
        ("coredns-5d78c9869d-7hqxm", "kube-system", "1/1", 3, 45, "10.244.0.2", "node-1", "registry.k8s.io/coredns/coredns:v1.10.1", "coredns", Some("5d78c9869d")),
        ("coredns-5d78c9869d-k9plz", "kube-system", "1/1", 2, 45, "10.244.0.3", "node-1", "registry.k8s.io/coredns/coredns:v1.10.1", "coredns", Some("5d78c9869d")),
        ("etcd-node-1", "kube-system", "1/1", 1, 45, "192.168.1.10", "node-1", "registry.k8s.io/etcd:3.5.9-0", "etcd", None),
        ("kube-apiserver-node-1", "kube-system", "1/1", 2, 45, "192.168.1.10", "node-1", "registry.k8s.io/kube-apiserver:v1.28.3", "kube-apiserver", None),
        ("kube-controller-manager-node-1", "kube-system", "1/1", 1, 45, "192.168.1.10", "node-1", "registry.k8s.io/kube-controller-manager:v1.28.3", "kube-controller-manager", None),
        ("kube-proxy-6lxrt", "kube-system", "1/1", 0, 45, "192.168.1.10", "node-1", "registry.k8s.io/kube-proxy:v1.28.3", "kube-proxy", None),
        ("kube-proxy-m8w4p", "kube-system", "1/1", 0, 45, "192.168.1.11", "node-2", "registry.k8s.io/kube-proxy:v1.28.3", "kube-proxy", None),
        ("kube-proxy-tn2vx", "kube-system", "1/1", 0, 45, "192.168.1.12", "node-3", "registry.k8s.io/kube-proxy:v1.28.3", "kube-proxy", None),
        ("kube-scheduler-node-1", "kube-system", "1/1", 1, 45, "192.168.1.10", "node-1", "registry.k8s.io/kube-scheduler:v1.28.3", "kube-scheduler", None),
    ];
    let pods = pod_rows
        .into_iter()
        .map(
            |(name, namespace, ready, restarts, days, ip, node, image, app, hash)| Pod {
                name: name.to_string(),
                namespace: namespace.to_string(),
                ready: ready.to_string(),
                status: POD_RUNNING.to_string(),
                restarts,
                ip: Some(ip.to_string()),
                node: Some(node.to_string()),
                image: image.to_string(),
                app: app.to_string(),
                template_hash: hash.map(str::to_string),
                creation_timestamp: ago(days),
            },
        )
        .collect();

    let deployments = [
        ("nginx-deployment", "default", 2, 5, "nginx:1.25", "7d4c8f6d9b"),
        ("redis-master", "default", 1, 12, "redis:7.2", "5f8b6c9d7f"),
        ("postgres-db", "production", 1, 18, "postgres:16", "85f9c7b8d"),
        ("api-server", "production", 1, 7, "acme/api-server:2.4.1", "65b8d4f7c9"),
        ("coredns", "kube-system", 2, 45, "registry.k8s.io/coredns/coredns:v1.10.1", "5d78c9869d"),
    ]
    .into_iter()
    .map(|(name, namespace, replicas, days, image, hash)| Deployment {
        name: name.to_string(),
        namespace: namespace.to_string(),
        replicas,
        ready_replicas: replicas,
        up_to_date: replicas,
        available: replicas,
        image: image.to_string(),
        template_hash: hash.to_string(),
        creation_timestamp: ago(days),
    })
    .collect();

    let services = [
        ("kubernetes", "default", ServiceType::ClusterIP, "10.96.0.1", NONE, "443/TCP", None, 45),
        ("nginx-service", "default", ServiceType::LoadBalancer, "10.96.15.20", "203.0.113.42", "80:30080/TCP", Some("app=nginx-deployment"), 5),
        ("redis-service", "default", ServiceType::ClusterIP, "10.96.22.15", NONE, "6379/TCP", Some("app=redis-master"), 12),
        ("postgres-service", "production", ServiceType::ClusterIP, "10.96.35.8", NONE, "5432/TCP", Some("app=postgres-db"), 18),
        ("api-service", "production", ServiceType::NodePort, "10.96.40.12", NONE, "8080:32000/TCP", Some("app=api-server"), 7),
        ("kube-dns", "kube-system", ServiceType::ClusterIP, "10.96.0.10", NONE, "53/UDP,53/TCP,9153/TCP", Some("k8s-app=kube-dns"), 45),
    ]
    .into_iter()
    .map(
        |(name, namespace, service_type, cluster_ip, external_ip, ports, selector, days)| Service {
            name: name.to_string(),
            namespace: namespace.to_string(),
            service_type,
            cluster_ip: cluster_ip.to_string(),
            external_ip: external_ip.to_string(),
            ports: ports.to_string(),
            selector: selector.map(str::to_string),
            creation_timestamp: ago(days),
        },
    )
    .collect();

    Fixture {
        nodes,
        namespaces,
        pods,
        deployments,
        services,
    }
}
