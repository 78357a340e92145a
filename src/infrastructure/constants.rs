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

/// Command prefixes
pub const KUBECTL: &str = "kubectl";
pub const KUBECTL_ALIAS: &str = "k";
pub const HELM: &str = "helm";
pub const CURL: &str = "curl";
pub const WGET: &str = "wget";

/// Namespaces
pub const DEFAULT_NAMESPACE: &str = "default";
pub const KUBE_SYSTEM: &str = "kube-system";
pub const PROTECTED_NAMESPACES: [&str; 4] =
    ["default", "kube-system", "kube-public", "kube-node-lease"];
pub const NAMESPACE_STATUS_ACTIVE: &str = "Active";

/// Node roles and statuses
pub const ROLE_CONTROL_PLANE: &str = "control-plane";
pub const ROLE_WORKER: &str = "worker";
pub const NODE_READY: &str = "Ready";
pub const NODE_NOT_READY: &str = "NotReady";

/// Pod defaults
pub const POD_RUNNING: &str = "Running";
pub const POD_READY_SINGLE: &str = "1/1";
pub const NONE: &str = "<none>";
/// Largest replica count a deployment may be created or scaled to.
pub const MAX_REPLICAS: u32 = 1000;

/// Service types
pub const SERVICE_CLUSTER_IP: &str = "ClusterIP";
pub const SERVICE_NODE_PORT: &str = "NodePort";
pub const SERVICE_LOAD_BALANCER: &str = "LoadBalancer";
pub const DEFAULT_SERVICE_PORT: u16 = 80;
pub const NODE_PORT_MIN: u16 = 30000;
pub const NODE_PORT_MAX: u16 = 32767;

/// Address pools
pub const POD_SUBNET_PREFIX: &str = "10.244";
pub const POD_SUBNET_THIRD_OCTETS: u8 = 3;
pub const SERVICE_SUBNET_PREFIX: &str = "10.96";
pub const EXTERNAL_SUBNET_PREFIX: &str = "203.0.113";

/// Generated name alphabet and lengths
pub const HASH_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
pub const TEMPLATE_HASH_LEN: usize = 10;
pub const POD_SUFFIX_LEN: usize = 5;

/// Versions shown by `version` style commands
pub const KUBERNETES_VERSION: &str = "v1.28.3";
pub const KUSTOMIZE_VERSION: &str = "v5.0.4-0.20230601165947-6ce0bf390ce3";
pub const HELM_VERSION: &str = "v3.14.0";
pub const HELM_GIT_COMMIT: &str = "3fc9f4b2638e76f26739cd77c7017139be81d0ea";
pub const HELM_GO_VERSION: &str = "go1.21.5";

/// Cluster endpoint and kubeconfig identity
pub const DEFAULT_API_SERVER: &str = "https://192.168.1.10:6443";
pub const CLUSTER_NAME: &str = "kubernetes";
pub const CLUSTER_USER: &str = "kubernetes-admin";
pub const CURRENT_CONTEXT: &str = "kubernetes-admin@kubernetes";

/// Helm release defaults
pub const RELEASE_STATUS_DEPLOYED: &str = "deployed";
pub const RELEASE_FIRST_REVISION: u32 = 1;
pub const DEFAULT_CHART_VERSION: &str = "0.1.0";
pub const DEFAULT_APP_VERSION: &str = "1.0.0";

/// Shell no-op surface
pub const HOME_DIR: &str = "/home/user";

/// Milliseconds per unit, used for fixture timestamps and age rendering
pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
