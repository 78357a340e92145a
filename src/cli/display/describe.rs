//! Long-form `describe` output.

use crate::domain::age::{describe_time, format_age, rfc3339};
use crate::domain::model::{Crd, CustomResource, Deployment, Namespace, Node, Pod, Scope, Service};
use crate::infrastructure::constants::{NODE_READY, NONE};
use serde_json::Value;
use std::fmt::Write;

pub fn describe_node(node: &Node, pods: &[&Pod], now_ms: i64) -> String {
    let now = describe_time(now_ms);
    let condition = |kind: &str, status: &str, reason: &str, message: &str| {
        format!(
            "  {:<17}{:<8}{:<34}{:<34}{:<29}{}",
            kind, status, now, now, reason, message
        )
    };
    let ready = if node.status == NODE_READY {
        condition("Ready", "True", "KubeletReady", "kubelet is posting ready status")
    } else {
        condition(
            "Ready",
            "False",
            "KubeletNotReady",
            "container runtime network not ready: NetworkReady=false reason:NetworkPluginNotReady",
        )
    };

    let mut out = String::new();
    let _ = writeln!(out, "Name:               {}", node.name);
    let _ = writeln!(out, "Roles:              {}", node.roles);
    let _ = writeln!(out, "Labels:             beta.kubernetes.io/arch=amd64");
    let _ = writeln!(out, "                    beta.kubernetes.io/os=linux");
    let _ = writeln!(out, "                    kubernetes.io/arch=amd64");
    let _ = writeln!(out, "                    kubernetes.io/hostname={}", node.name);
    let _ = writeln!(out, "                    kubernetes.io/os=linux");
    let _ = writeln!(out, "                    node-role.kubernetes.io/{}=", node.roles);
    let _ = writeln!(
        out,
        "Annotations:        kubeadm.alpha.kubernetes.io/cri-socket: unix:///var/run/containerd/containerd.sock"
    );
    let _ = writeln!(out, "                    node.alpha.kubernetes.io/ttl: 0");
    let _ = writeln!(out, "CreationTimestamp:  {}", describe_time(node.creation_timestamp));
    let _ = writeln!(out, "Taints:             <none>");
    let _ = writeln!(out, "Unschedulable:      false");
    let _ = writeln!(out, "Conditions:");
    let _ = writeln!(
        out,
        "  Type             Status  LastHeartbeatTime                 LastTransitionTime                Reason                       Message"
    );
    let _ = writeln!(
        out,
        "  ----             ------  -----------------                 ------------------                ------                       -------"
    );
    let _ = writeln!(
        out,
        "{}",
        condition("MemoryPressure", "False", "KubeletHasSufficientMemory", "kubelet has sufficient memory available")
    );
    let _ = writeln!(
        out,
        "{}",
        condition("DiskPressure", "False", "KubeletHasNoDiskPressure", "kubelet has no disk pressure")
    );
    let _ = writeln!(
        out,
        "{}",
        condition("PIDPressure", "False", "KubeletHasSufficientPID", "kubelet has sufficient PID available")
    );
    let _ = writeln!(out, "{}", ready);
    let _ = writeln!(out, "Addresses:");
    let _ = writeln!(out, "  InternalIP:  {}", node.internal_ip);
    let _ = writeln!(out, "  Hostname:    {}", node.name);
    let _ = writeln!(out, "Capacity:");
    let _ = writeln!(out, "  cpu:                4");
    let _ = writeln!(out, "  ephemeral-storage:  103079844Ki");
    let _ = writeln!(out, "  hugepages-1Gi:      0");
    let _ = writeln!(out, "  hugepages-2Mi:      0");
    let _ = writeln!(out, "  memory:             16384Mi");
    let _ = writeln!(out, "  pods:               110");
    let _ = writeln!(out, "Allocatable:");
    let _ = writeln!(out, "  cpu:                4");
    let _ = writeln!(out, "  ephemeral-storage:  94979940Ki");
    let _ = writeln!(out, "  hugepages-1Gi:      0");
    let _ = writeln!(out, "  hugepages-2Mi:      0");
    let _ = writeln!(out, "  memory:             15872Mi");
    let _ = writeln!(out, "  pods:               110");
    let _ = writeln!(out, "System Info:");
    let _ = writeln!(out, "  Machine ID:                 abc123def456");
    let _ = writeln!(out, "  System UUID:                12345678-1234-1234-1234-123456789012");
    let _ = writeln!(out, "  Boot ID:                    98765432-9876-9876-9876-987654321098");
    let _ = writeln!(out, "  Kernel Version:             {}", node.kernel_version);
    let _ = writeln!(out, "  OS Image:                   {}", node.os_image);
    let _ = writeln!(out, "  Operating System:           linux");
    let _ = writeln!(out, "  Architecture:               amd64");
    let _ = writeln!(out, "  Container Runtime Version:  {}", node.container_runtime);
    let _ = writeln!(out, "  Kubelet Version:            {}", node.version);
    let _ = writeln!(out, "  Kube-Proxy Version:         {}", node.version);
    let _ = writeln!(out, "Non-terminated Pods:          ({} in total)", pods.len());
    let _ = writeln!(
        out,
        "  Namespace                   Name                                CPU Requests  CPU Limits  Memory Requests  Memory Limits  Age"
    );
    let _ = writeln!(
        out,
        "  ---------                   ----                                ------------  ----------  ---------------  -------------  ---"
    );
    for pod in pods {
        let _ = writeln!(
            out,
            "  {:<27} {:<35} 0 (0%)        0 (0%)      0 (0%)           0 (0%)         {}",
            pod.namespace,
            pod.name,
            format_age(pod.creation_timestamp, now_ms)
        );
    }
    let _ = writeln!(out, "Allocated resources:");
    let _ = writeln!(out, "  (Total limits may be over 100 percent, i.e., overcommitted.)");
    let _ = writeln!(out, "  Resource           Requests  Limits");
    let _ = writeln!(out, "  --------           --------  ------");
    let _ = writeln!(out, "  cpu                0 (0%)    0 (0%)");
    let _ = writeln!(out, "  memory             0 (0%)    0 (0%)");
    let _ = writeln!(out, "  ephemeral-storage  0 (0%)    0 (0%)");
    out.push_str("Events:              <none>");
    out
}

pub fn describe_pod(pod: &Pod) -> String {
    let started = describe_time(pod.creation_timestamp);
    let ip = pod.ip_or_none();
    let container = pod.container_name();

    let mut out = String::new();
    let _ = writeln!(out, "Name:             {}", pod.name);
    let _ = writeln!(out, "Namespace:        {}", pod.namespace);
    let _ = writeln!(out, "Priority:         0");
    let _ = writeln!(out, "Service Account:  default");
    let _ = writeln!(out, "Node:             {}", pod.node_or_none());
    let _ = writeln!(out, "Start Time:       {}", started);
    let _ = writeln!(out, "Labels:           app={}", pod.app);
    if let Some(hash) = &pod.template_hash {
        let _ = writeln!(out, "                  pod-template-hash={}", hash);
    }
    let _ = writeln!(out, "Annotations:      <none>");
    let _ = writeln!(out, "Status:           {}", pod.status);
    let _ = writeln!(out, "IP:               {}", ip);
    let _ = writeln!(out, "IPs:");
    let _ = writeln!(out, "  IP:           {}", ip);
    if let Some(hash) = &pod.template_hash {
        let _ = writeln!(out, "Controlled By:  ReplicaSet/{}-{}", pod.app, hash);
    }
    let _ = writeln!(out, "Containers:");
    let _ = writeln!(out, "  {}:", container);
    let _ = writeln!(out, "    Container ID:   containerd://abc123def456789");
    let _ = writeln!(out, "    Image:          {}", pod.image);
    let _ = writeln!(out, "    Image ID:       docker.io/library/{}@sha256:abc123def456", container);
    let _ = writeln!(out, "    Port:           <none>");
    let _ = writeln!(out, "    Host Port:      <none>");
    let _ = writeln!(out, "    State:          {}", pod.status);
    let _ = writeln!(out, "      Started:      {}", started);
    let _ = writeln!(out, "    Ready:          True");
    let _ = writeln!(out, "    Restart Count:  {}", pod.restarts);
    let _ = writeln!(out, "    Environment:    <none>");
    let _ = writeln!(out, "    Mounts:");
    let _ = writeln!(out, "      /var/run/secrets/kubernetes.io/serviceaccount from kube-api-access (ro)");
    let _ = writeln!(out, "Conditions:");
    let _ = writeln!(out, "  Type              Status");
    let _ = writeln!(out, "  Initialized       True ");
    let _ = writeln!(out, "  Ready             True ");
    let _ = writeln!(out, "  ContainersReady   True ");
    let _ = writeln!(out, "  PodScheduled      True ");
    let _ = writeln!(out, "Volumes:");
    let _ = writeln!(out, "  kube-api-access:");
    let _ = writeln!(
        out,
        "    Type:                    Projected (a volume that contains injected data from multiple sources)"
    );
    let _ = writeln!(out, "QoS Class:                   BestEffort");
    let _ = writeln!(out, "Node-Selectors:              <none>");
    let _ = writeln!(
        out,
        "Tolerations:                 node.kubernetes.io/not-ready:NoExecute op=Exists for 300s"
    );
    let _ = writeln!(
        out,
        "                             node.kubernetes.io/unreachable:NoExecute op=Exists for 300s"
    );
    out.push_str("Events:                      <none>");
    out
}

pub fn describe_deployment(deployment: &Deployment) -> String {
    let replicas = deployment.replicas;
    let unavailable = replicas.saturating_sub(deployment.available);

    let mut out = String::new();
    let _ = writeln!(out, "Name:                   {}", deployment.name);
    let _ = writeln!(out, "Namespace:              {}", deployment.namespace);
    let _ = writeln!(
        out,
        "CreationTimestamp:      {}",
        describe_time(deployment.creation_timestamp)
    );
    let _ = writeln!(out, "Labels:                 {}", deployment.selector());
    let _ = writeln!(out, "Annotations:            deployment.kubernetes.io/revision: 1");
    let _ = writeln!(out, "Selector:               {}", deployment.selector());
    let _ = writeln!(
        out,
        "Replicas:               {} desired | {} updated | {} total | {} available | {} unavailable",
        replicas, deployment.up_to_date, replicas, deployment.available, unavailable
    );
    let _ = writeln!(out, "StrategyType:           RollingUpdate");
    let _ = writeln!(out, "MinReadySeconds:        0");
    let _ = writeln!(out, "RollingUpdateStrategy:  25% max unavailable, 25% max surge");
    let _ = writeln!(out, "Pod Template:");
    let _ = writeln!(out, "  Labels:  {}", deployment.selector());
    let _ = writeln!(out, "  Containers:");
    let _ = writeln!(out, "   {}:", deployment.container_name());
    let _ = writeln!(out, "    Image:        {}", deployment.image);
    let _ = writeln!(out, "    Port:         <none>");
    let _ = writeln!(out, "    Host Port:    <none>");
    let _ = writeln!(out, "    Environment:  <none>");
    let _ = writeln!(out, "    Mounts:       <none>");
    let _ = writeln!(out, "  Volumes:        <none>");
    let _ = writeln!(out, "Conditions:");
    let _ = writeln!(out, "  Type           Status  Reason");
    let _ = writeln!(out, "  ----           ------  ------");
    let _ = writeln!(out, "  Available      True    MinimumReplicasAvailable");
    let _ = writeln!(out, "  Progressing    True    NewReplicaSetAvailable");
    let _ = writeln!(out, "OldReplicaSets:  <none>");
    let _ = writeln!(
        out,
        "NewReplicaSet:   {}-{} ({}/{} replicas created)",
        deployment.name, deployment.template_hash, replicas, replicas
    );
    out.push_str("Events:          <none>");
    out
}

/// `port`, optional node port and protocol of the first entry in a PORT(S) cell.
fn first_port(ports: &str) -> (&str, Option<&str>, &str) {
    let first = ports.split(',').next().unwrap_or(ports);
    let (numbers, protocol) = first.split_once('/').unwrap_or((first, "TCP"));
    match numbers.split_once(':') {
        Some((port, node_port)) => (port, Some(node_port), protocol),
        None => (numbers, None, protocol),
    }
}

/// `endpoints` are the IPs of the pods the selector matches.
pub fn describe_service(service: &Service, endpoints: &[&str]) -> String {
    let (port, node_port, protocol) = first_port(&service.ports);
    let endpoints = if endpoints.is_empty() {
        NONE.to_string()
    } else {
        endpoints
            .iter()
            .map(|ip| format!("{}:{}", ip, port))
            .collect::<Vec<_>>()
            .join(",")
    };

    let mut out = String::new();
    let _ = writeln!(out, "Name:                     {}", service.name);
    let _ = writeln!(out, "Namespace:                {}", service.namespace);
    let _ = writeln!(out, "Labels:                   <none>");
    let _ = writeln!(out, "Annotations:              <none>");
    let _ = writeln!(out, "Selector:                 {}", service.selector_or_none());
    let _ = writeln!(out, "Type:                     {}", service.service_type.as_str());
    let _ = writeln!(out, "IP Family Policy:         SingleStack");
    let _ = writeln!(out, "IP Families:              IPv4");
    let _ = writeln!(out, "IP:                       {}", service.cluster_ip);
    let _ = writeln!(out, "IPs:                      {}", service.cluster_ip);
    if service.external_ip != NONE {
        let _ = writeln!(out, "LoadBalancer Ingress:     {}", service.external_ip);
    }
    let _ = writeln!(out, "Port:                     <unset>  {}/{}", port, protocol);
    let _ = writeln!(out, "TargetPort:               {}/{}", port, protocol);
    if let Some(node_port) = node_port {
        let _ = writeln!(out, "NodePort:                 <unset>  {}/{}", node_port, protocol);
    }
    let _ = writeln!(out, "Endpoints:                {}", endpoints);
    let _ = writeln!(out, "Session Affinity:         None");
    if node_port.is_some() {
        let _ = writeln!(out, "External Traffic Policy:  Cluster");
    }
    out.push_str("Events:                   <none>");
    out
}

pub fn describe_namespace(namespace: &Namespace) -> String {
    format!(
        "Name:         {name}\n\
         Labels:       kubernetes.io/metadata.name={name}\n\
         Annotations:  <none>\n\
         Status:       {status}\n\
         \n\
         No resource quota.\n\
         \n\
         No LimitRange resource.",
        name = namespace.name,
        status = namespace.status
    )
}

pub fn describe_custom_resource(resource: &CustomResource) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name:         {}", resource.name());
    if let Some(ns) = resource.namespace() {
        let _ = writeln!(out, "Namespace:    {}", ns);
    }
    let _ = writeln!(out, "Labels:       <none>");
    if resource.metadata.annotations.is_empty() {
        let _ = writeln!(out, "Annotations:  <none>");
    } else {
        for (i, (key, value)) in resource.metadata.annotations.iter().enumerate() {
            let label = if i == 0 { "Annotations:" } else { "" };
            let _ = writeln!(out, "{:<14}{}: {}", label, key, value);
        }
    }
    let _ = writeln!(out, "API Version:  {}", resource.api_version);
    let _ = writeln!(out, "Kind:         {}", resource.kind);
    let _ = writeln!(out, "Metadata:");
    let _ = writeln!(
        out,
        "  Creation Timestamp:  {}",
        rfc3339(resource.metadata.creation_timestamp)
    );
    let _ = writeln!(out, "Spec:");
    describe_value(&resource.spec, 2, &mut out);
    let _ = writeln!(out, "Status:");
    describe_value(&resource.status, 2, &mut out);
    out.push_str("Events:       <none>");
    out
}

pub fn describe_crd(crd: &Crd) -> String {
    let scope = match crd.scope {
        Scope::Namespaced => "Namespaced",
        Scope::Cluster => "Cluster",
    };
    let mut out = String::new();
    let _ = writeln!(out, "Name:         {}", crd.name);
    let _ = writeln!(out, "Labels:       <none>");
    let _ = writeln!(out, "Annotations:  <none>");
    let _ = writeln!(out, "API Version:  apiextensions.k8s.io/v1");
    let _ = writeln!(out, "Kind:         CustomResourceDefinition");
    let _ = writeln!(out, "Metadata:");
    let _ = writeln!(out, "  Creation Timestamp:  {}", rfc3339(crd.creation_timestamp));
    let _ = writeln!(out, "Spec:");
    let _ = writeln!(out, "  Group:  {}", crd.group);
    let _ = writeln!(out, "  Names:");
    let _ = writeln!(out, "    Kind:       {}", crd.kind);
    let _ = writeln!(out, "    Plural:     {}", crd.plural);
    let _ = writeln!(out, "    Singular:   {}", crd.singular);
    let _ = writeln!(out, "  Scope:        {}", scope);
    let _ = writeln!(out, "  Versions:");
    let _ = writeln!(out, "    Name:     {}", crd.version);
    let _ = writeln!(out, "    Served:   true");
    let _ = writeln!(out, "    Storage:  true");
    out.push_str("Events:         <none>");
    out
}

/// Field tree with `camelCase` keys shown as `Title Case`.
fn describe_value(value: &Value, indent: usize, out: &mut String) {
    let pad = " ".repeat(indent);
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                match child {
                    Value::Object(_) | Value::Array(_) => {
                        let _ = writeln!(out, "{}{}:", pad, title_case(key));
                        describe_value(child, indent + 2, out);
                    }
                    Value::String(s) => {
                        let _ = writeln!(out, "{}{}:  {}", pad, title_case(key), s);
                    }
                    other => {
                        let _ = writeln!(out, "{}{}:  {}", pad, title_case(key), other);
                    }
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                describe_value(item, indent, out);
            }
        }
        Value::String(s) => {
            let _ = writeln!(out, "{}{}", pad, s);
        }
        other => {
            let _ = writeln!(out, "{}{}", pad, other);
        }
    }
}

fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            out.push(' ');
            out.push(ch);
        } else {
            out.push(ch);
        }
    }
    out
}
