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

//! The single owner of every simulated resource.
//!
//! Each mutating method validates first and only then mutates, so a rejected
//! call leaves the store untouched. A successful call fires the change
//! notifier once; calls made inside [`ResourceStore::batch`] share a single
//! notification.

use crate::domain::age;
use crate::domain::crd;
use crate::domain::entropy::{Clock, Entropy};
use crate::domain::model::{
    ChartRepository, Crd, CustomResource, Deployment, Namespace, Node, Pod, Release, Scope,
    Service, ServiceType,
};
use crate::domain::notifier::ChangeNotifier;
use crate::domain::seed;
use crate::infrastructure::charts::ComponentSpec;
use crate::infrastructure::constants::{
    KUBE_SYSTEM, MAX_REPLICAS, NAMESPACE_STATUS_ACTIVE, NODE_READY, NONE, POD_READY_SINGLE, POD_RUNNING,
    POD_SUFFIX_LEN, PROTECTED_NAMESPACES, RELEASE_FIRST_REVISION, RELEASE_STATUS_DEPLOYED,
    ROLE_CONTROL_PLANE, TEMPLATE_HASH_LEN,
};
use crate::shared::error::{Result, SimError};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

const CNI_OPERATOR: &str = "cilium-operator";
const CNI_APP: &str = "cilium";
const CNI_IMAGE: &str = "quay.io/cilium/cilium:v1.14.5";
const CNI_OPERATOR_IMAGE: &str = "quay.io/cilium/operator-generic:v1.14.5";

/// Read-only copy of every collection, handed to dashboard-style readers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterState {
    pub nodes: Vec<Node>,
    pub pods: Vec<Pod>,
    pub deployments: Vec<Deployment>,
    pub services: Vec<Service>,
    pub namespaces: Vec<Namespace>,
    pub crds: Vec<Crd>,
    pub custom_resources: Vec<CustomResource>,
    pub releases: Vec<Release>,
}

/// Everything needed to record a package release.
#[derive(Debug, Clone)]
pub struct ReleaseRequest<'a> {
    pub name: &'a str,
    pub namespace: &'a str,
    /// `<chart>-<version>`
    pub chart: String,
    pub app_version: String,
    pub create_namespace: bool,
    pub components: &'a [ComponentSpec],
    pub installs_crds: bool,
}

pub struct ResourceStore {
    nodes: Vec<Node>,
    namespaces: Vec<Namespace>,
    pods: Vec<Pod>,
    deployments: Vec<Deployment>,
    services: Vec<Service>,
    crds: Vec<Crd>,
    custom_resources: Vec<CustomResource>,
    releases: Vec<Release>,
    repositories: Vec<ChartRepository>,
    entropy: Entropy,
    clock: Box<dyn Clock>,
    notifier: ChangeNotifier,
}

fn check_replicas(replicas: u32) -> Result<()> {
    if replicas > MAX_REPLICAS {
        return Err(SimError::invalid(format!(
            "error: replicas must be between 0 and {} in this simulator, got {}",
            MAX_REPLICAS, replicas
        )));
    }
    Ok(())
}

pub fn is_protected_namespace(name: &str) -> bool {
    PROTECTED_NAMESPACES.contains(&name)
}

fn is_system_namespace(name: &str) -> bool {
    name.starts_with("kube-")
}

fn in_namespace(namespace: &str, filter: Option<&str>) -> bool {
    filter.map_or(true, |ns| ns == namespace)
}

impl ResourceStore {
    pub fn new(entropy: Entropy, clock: Box<dyn Clock>, nodes_ready: bool) -> Self {
        let fixture = seed::initial_cluster(clock.now_millis(), nodes_ready);
        Self {
            nodes: fixture.nodes,
            namespaces: fixture.namespaces,
            pods: fixture.pods,
            deployments: fixture.deployments,
            services: fixture.services,
            crds: Vec::new(),
            custom_resources: Vec::new(),
            releases: Vec::new(),
            repositories: Vec::new(),
            entropy,
            clock,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) {
        self.notifier.subscribe(observer);
    }

    /// Runs `f` with notifications deferred; at most one fires at the end.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.notifier.begin_batch();
        let result = f(self);
        self.notifier.end_batch();
        result
    }

    pub fn snapshot(&self) -> ClusterState {
        ClusterState {
            nodes: self.nodes.clone(),
            pods: self.pods.clone(),
            deployments: self.deployments.clone(),
            services: self.services.clone(),
            namespaces: self.namespaces.clone(),
            crds: self.crds.clone(),
            custom_resources: self.custom_resources.clone(),
            releases: self.releases.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    pub fn crds(&self) -> &[Crd] {
        &self.crds
    }

    pub fn pods(&self, namespace: Option<&str>) -> Vec<&Pod> {
        self.pods
            .iter()
            .filter(|p| in_namespace(&p.namespace, namespace))
            .collect()
    }

    pub fn deployments(&self, namespace: Option<&str>) -> Vec<&Deployment> {
        self.deployments
            .iter()
            .filter(|d| in_namespace(&d.namespace, namespace))
            .collect()
    }

    pub fn services(&self, namespace: Option<&str>) -> Vec<&Service> {
        self.services
            .iter()
            .filter(|s| in_namespace(&s.namespace, namespace))
            .collect()
    }

    pub fn releases(&self, namespace: Option<&str>) -> Vec<&Release> {
        self.releases
            .iter()
            .filter(|r| in_namespace(&r.namespace, namespace))
            .collect()
    }

    /// Instances of `kind`. Cluster-scoped instances ignore the namespace filter.
    pub fn custom_resources(&self, kind: &str, namespace: Option<&str>) -> Vec<&CustomResource> {
        self.custom_resources
            .iter()
            .filter(|cr| cr.kind == kind)
            .filter(|cr| match cr.namespace() {
                Some(ns) => in_namespace(ns, namespace),
                None => true,
            })
            .collect()
    }

    pub fn namespace_exists(&self, name: &str) -> bool {
        self.namespaces.iter().any(|ns| ns.name == name)
    }

    pub fn find_node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn find_namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }

    /// With no namespace, the first pod of that name anywhere.
    pub fn find_pod(&self, name: &str, namespace: Option<&str>) -> Option<&Pod> {
        self.pods
            .iter()
            .find(|p| p.name == name && in_namespace(&p.namespace, namespace))
    }

    pub fn find_deployment(&self, name: &str, namespace: Option<&str>) -> Option<&Deployment> {
        self.deployments
            .iter()
            .find(|d| d.name == name && in_namespace(&d.namespace, namespace))
    }

    pub fn find_service(&self, name: &str, namespace: Option<&str>) -> Option<&Service> {
        self.services
            .iter()
            .find(|s| s.name == name && in_namespace(&s.namespace, namespace))
    }

    pub fn find_release(&self, name: &str, namespace: &str) -> Option<&Release> {
        self.releases
            .iter()
            .find(|r| r.name == name && r.namespace == namespace)
    }

    /// Installed definition matching a plural, singular or kind spelling.
    pub fn find_crd(&self, token: &str) -> Option<&Crd> {
        self.crds.iter().find(|c| c.matches(token))
    }

    /// Pods attributed to a deployment: same namespace, name starts with the
    /// deployment name. This is a prefix match, not an ownership reference.
    pub fn owned_pods(&self, deployment: &str, namespace: &str) -> Vec<&Pod> {
        self.pods
            .iter()
            .filter(|p| p.namespace == namespace && p.name.starts_with(deployment))
            .collect()
    }

    pub fn pods_on_node(&self, node: &str) -> Vec<&Pod> {
        self.pods
            .iter()
            .filter(|p| p.node.as_deref() == Some(node))
            .collect()
    }

    // ------------------------------------------------------------------
    // Namespaces
    // ------------------------------------------------------------------

    pub fn create_namespace(&mut self, name: &str) -> Result<()> {
        if self.namespace_exists(name) {
            return Err(SimError::already_exists("namespaces", name));
        }

        let now = self.now();
        self.namespaces.push(Namespace {
            name: name.to_string(),
            status: NAMESPACE_STATUS_ACTIVE.to_string(),
            creation_timestamp: now,
        });
        if !self.crds.is_empty() && !is_system_namespace(name) {
            self.replicate_namespaced_samples(name);
        }

        debug!(namespace = name, "namespace created");
        self.notifier.notify();
        Ok(())
    }

    /// Deletes a namespace and everything that lives in it.
    pub fn delete_namespace(&mut self, name: &str) -> Result<()> {
        if !self.namespace_exists(name) {
            return Err(SimError::not_found("namespaces", name));
        }
        if is_protected_namespace(name) {
            warn!(namespace = name, "refusing to delete protected namespace");
            return Err(SimError::forbidden(
                "namespaces",
                name,
                "this namespace may not be deleted",
            ));
        }

        self.namespaces.retain(|ns| ns.name != name);
        self.pods.retain(|p| p.namespace != name);
        self.deployments.retain(|d| d.namespace != name);
        self.services.retain(|s| s.namespace != name);
        self.releases.retain(|r| r.namespace != name);
        self.custom_resources
            .retain(|cr| cr.namespace() != Some(name));

        debug!(namespace = name, "namespace deleted with its contents");
        self.notifier.notify();
        Ok(())
    }

    fn require_namespace(&self, namespace: &str) -> Result<()> {
        if self.namespace_exists(namespace) {
            Ok(())
        } else {
            Err(SimError::NamespaceNotFound(namespace.to_string()))
        }
    }

    // ------------------------------------------------------------------
    // Workloads
    // ------------------------------------------------------------------

    pub fn create_deployment(
        &mut self,
        name: &str,
        namespace: &str,
        image: &str,
        replicas: u32,
    ) -> Result<()> {
        if self.find_deployment(name, Some(namespace)).is_some() {
            return Err(SimError::already_exists("deployments.apps", name));
        }
        self.require_namespace(namespace)?;
        check_replicas(replicas)?;

        let now = self.now();
        let template_hash = self.entropy.hash(TEMPLATE_HASH_LEN);
        let mut deployment = Deployment {
            name: name.to_string(),
            namespace: namespace.to_string(),
            replicas: 0,
            ready_replicas: 0,
            up_to_date: 0,
            available: 0,
            image: image.to_string(),
            template_hash,
            creation_timestamp: now,
        };
        deployment.settle(replicas);

        let pods = self.generate_pods(&deployment, replicas as usize);
        self.pods.extend(pods);
        self.deployments.push(deployment);

        debug!(deployment = name, namespace, replicas, "deployment created");
        self.notifier.notify();
        Ok(())
    }

    /// Deletes a deployment and every pod attributed to it.
    pub fn delete_deployment(&mut self, name: &str, namespace: &str) -> Result<()> {
        if self.find_deployment(name, Some(namespace)).is_none() {
            return Err(SimError::not_found("deployments.apps", name));
        }

        self.remove_deployment(name, namespace);

        debug!(deployment = name, namespace, "deployment deleted");
        self.notifier.notify();
        Ok(())
    }

    fn remove_deployment(&mut self, name: &str, namespace: &str) {
        self.deployments
            .retain(|d| !(d.name == name && d.namespace == namespace));
        self.pods
            .retain(|p| !(p.namespace == namespace && p.name.starts_with(name)));
    }

    /// Reconciles the attributed pod count to `replicas`.
    ///
    /// Growth appends fresh pods. Shrinking drops pods from the tail of the
    /// attributed list, so the oldest pods survive.
    pub fn scale_deployment(&mut self, name: &str, namespace: &str, replicas: u32) -> Result<()> {
        let index = self
            .deployments
            .iter()
            .position(|d| d.name == name && d.namespace == namespace)
            .ok_or_else(|| SimError::not_found("deployments.apps", name))?;
        check_replicas(replicas)?;

        self.deployments[index].settle(replicas);
        let deployment = self.deployments[index].clone();

        let existing: Vec<String> = self
            .owned_pods(name, namespace)
            .into_iter()
            .map(|p| p.name.clone())
            .collect();
        let desired = replicas as usize;

        if desired > existing.len() {
            let pods = self.generate_pods(&deployment, desired - existing.len());
            self.pods.extend(pods);
        } else if desired < existing.len() {
            let doomed = &existing[desired..];
            self.pods
                .retain(|p| !(p.namespace == namespace && doomed.contains(&p.name)));
        }

        debug!(
            deployment = name,
            namespace,
            from = existing.len(),
            to = replicas,
            "deployment scaled"
        );
        self.notifier.notify();
        Ok(())
    }

    pub fn create_pod(&mut self, name: &str, namespace: &str, image: &str) -> Result<()> {
        if self.find_pod(name, Some(namespace)).is_some() {
            return Err(SimError::already_exists("pods", name));
        }
        self.require_namespace(namespace)?;

        let now = self.now();
        let ip = self.entropy.pod_ip();
        let node = self.pick_worker();
        self.pods.push(Pod {
            name: name.to_string(),
            namespace: namespace.to_string(),
            ready: POD_READY_SINGLE.to_string(),
            status: POD_RUNNING.to_string(),
            restarts: 0,
            ip: Some(ip),
            node,
            image: image.to_string(),
            app: name.to_string(),
            template_hash: None,
            creation_timestamp: now,
        });

        debug!(pod = name, namespace, "pod created");
        self.notifier.notify();
        Ok(())
    }

    pub fn delete_pod(&mut self, name: &str, namespace: &str) -> Result<()> {
        if self.find_pod(name, Some(namespace)).is_none() {
            return Err(SimError::not_found("pods", name));
        }

        self.pods
            .retain(|p| !(p.name == name && p.namespace == namespace));

        debug!(pod = name, namespace, "pod deleted");
        self.notifier.notify();
        Ok(())
    }

    fn pick_worker(&mut self) -> Option<String> {
        let workers: Vec<String> = self
            .nodes
            .iter()
            .filter(|n| n.roles != ROLE_CONTROL_PLANE)
            .map(|n| n.name.clone())
            .collect();
        self.entropy.choose(&workers).cloned()
    }

    /// `count` fresh pods for `deployment`, each with a name unused in its
    /// namespace.
    fn generate_pods(&mut self, deployment: &Deployment, count: usize) -> Vec<Pod> {
        let mut taken: HashSet<String> = self
            .pods
            .iter()
            .filter(|p| p.namespace == deployment.namespace)
            .map(|p| p.name.clone())
            .collect();

        let mut pods = Vec::with_capacity(count);
        while pods.len() < count {
            let name = format!(
                "{}-{}-{}",
                deployment.name,
                deployment.template_hash,
                self.entropy.hash(POD_SUFFIX_LEN)
            );
            if !taken.insert(name.clone()) {
                continue;
            }
            pods.push(Pod {
                name,
                namespace: deployment.namespace.clone(),
                ready: POD_READY_SINGLE.to_string(),
                status: POD_RUNNING.to_string(),
                restarts: 0,
                ip: Some(self.entropy.pod_ip()),
                node: self.pick_worker(),
                image: deployment.image.clone(),
                app: deployment.name.clone(),
                template_hash: Some(deployment.template_hash.clone()),
                creation_timestamp: self.now(),
            });
        }
        pods
    }

    // ------------------------------------------------------------------
    // Services
    // ------------------------------------------------------------------

    pub fn create_service(
        &mut self,
        name: &str,
        namespace: &str,
        service_type: ServiceType,
        port: u16,
    ) -> Result<()> {
        if self.find_service(name, Some(namespace)).is_some() {
            return Err(SimError::already_exists("services", name));
        }
        self.require_namespace(namespace)?;

        let now = self.now();
        let cluster_ip = self.entropy.cluster_ip();
        let external_ip = match service_type {
            ServiceType::LoadBalancer => self.entropy.external_ip(),
            _ => NONE.to_string(),
        };
        let ports = if service_type.exposes_node_port() {
            format!("{}:{}/TCP", port, self.entropy.node_port())
        } else {
            format!("{}/TCP", port)
        };

        self.services.push(Service {
            name: name.to_string(),
            namespace: namespace.to_string(),
            service_type,
            cluster_ip,
            external_ip,
            ports,
            selector: Some(format!("app={}", name)),
            creation_timestamp: now,
        });

        debug!(service = name, namespace, kind = service_type.as_str(), "service created");
        self.notifier.notify();
        Ok(())
    }

    pub fn delete_service(&mut self, name: &str, namespace: &str) -> Result<()> {
        if self.find_service(name, Some(namespace)).is_none() {
            return Err(SimError::not_found("services", name));
        }

        self.services
            .retain(|s| !(s.name == name && s.namespace == namespace));

        debug!(service = name, namespace, "service deleted");
        self.notifier.notify();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Custom resources
    // ------------------------------------------------------------------

    /// Registers the whole descriptor registry. Returns false when it was
    /// already installed.
    pub fn install_crds(&mut self) -> bool {
        if !self.crds.is_empty() {
            return false;
        }

        let now = self.now();
        for entry in crd::registry() {
            self.crds.push(entry.to_crd(now));
            if entry.descriptor.scope == Scope::Cluster {
                self.custom_resources.extend((entry.samples)(None, now));
            }
        }

        let targets: Vec<String> = self
            .namespaces
            .iter()
            .filter(|ns| !is_system_namespace(&ns.name))
            .map(|ns| ns.name.clone())
            .collect();
        for namespace in targets {
            self.replicate_namespaced_samples(&namespace);
        }

        info!(definitions = self.crds.len(), "custom resource definitions installed");
        self.notifier.notify();
        true
    }

    fn replicate_namespaced_samples(&mut self, namespace: &str) {
        let now = self.now();
        for entry in crd::registry() {
            if entry.descriptor.scope == Scope::Namespaced {
                self.custom_resources.extend(entry.instances(namespace, now));
            }
        }
    }

    // ------------------------------------------------------------------
    // Package releases
    // ------------------------------------------------------------------

    /// Records a release and synthesises its component deployments.
    pub fn install_release(&mut self, request: &ReleaseRequest<'_>) -> Result<Release> {
        if self.find_release(request.name, request.namespace).is_some() {
            return Err(SimError::already_exists("releases", request.name));
        }
        if !request.create_namespace {
            self.require_namespace(request.namespace)?;
        }

        self.batch(|store| {
            if !store.namespace_exists(request.namespace) {
                store.create_namespace(request.namespace)?;
            }

            let mut components = Vec::with_capacity(request.components.len());
            for component in request.components {
                let deployment = format!("{}-{}", request.name, component.name);
                if store
                    .find_deployment(&deployment, Some(request.namespace))
                    .is_none()
                {
                    store.create_deployment(
                        &deployment,
                        request.namespace,
                        component.image,
                        component.replicas,
                    )?;
                }
                components.push(deployment);
            }

            if request.installs_crds {
                store.install_crds();
            }

            let now = store.now();
            let release = Release {
                name: request.name.to_string(),
                namespace: request.namespace.to_string(),
                revision: RELEASE_FIRST_REVISION,
                updated: age::release_time(now),
                status: RELEASE_STATUS_DEPLOYED.to_string(),
                chart: request.chart.clone(),
                app_version: request.app_version.clone(),
                components,
                creation_timestamp: now,
            };
            store.releases.push(release.clone());

            info!(
                release = request.name,
                namespace = request.namespace,
                chart = %request.chart,
                "release installed"
            );
            store.notifier.notify();
            Ok(release)
        })
    }

    /// Removes a release and the deployments it synthesised.
    pub fn uninstall_release(&mut self, name: &str, namespace: &str) -> Result<()> {
        let release = self
            .find_release(name, namespace)
            .cloned()
            .ok_or_else(|| SimError::not_found("releases", name))?;

        for deployment in &release.components {
            self.remove_deployment(deployment, namespace);
        }
        self.releases
            .retain(|r| !(r.name == name && r.namespace == namespace));

        info!(release = name, namespace, "release uninstalled");
        self.notifier.notify();
        Ok(())
    }

    pub fn repositories(&self) -> &[ChartRepository] {
        &self.repositories
    }

    /// Registers a chart repository. Returns false when the same name and URL
    /// are already registered.
    pub fn add_repository(&mut self, name: &str, url: &str) -> Result<bool> {
        if let Some(existing) = self.repositories.iter().find(|r| r.name == name) {
            if existing.url == url {
                return Ok(false);
            }
            return Err(SimError::invalid(format!(
                "Error: repository name ({}) already exists, please specify a different name",
                name
            )));
        }

        self.repositories.push(ChartRepository {
            name: name.to_string(),
            url: url.to_string(),
        });
        debug!(repository = name, url, "chart repository added");
        self.notifier.notify();
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Bootstrap steps
    // ------------------------------------------------------------------

    /// Installs the CNI: one agent pod per node plus an operator deployment.
    /// Returns false when the CNI is already present.
    pub fn install_cni(&mut self) -> Result<bool> {
        if self.pods.iter().any(|p| p.app == CNI_APP) {
            return Ok(false);
        }

        self.batch(|store| {
            let now = store.now();
            let nodes: Vec<(String, String)> = store
                .nodes
                .iter()
                .map(|n| (n.name.clone(), n.internal_ip.clone()))
                .collect();
            for (node, ip) in nodes {
                let name = format!("{}-{}", CNI_APP, store.entropy.hash(POD_SUFFIX_LEN));
                store.pods.push(Pod {
                    name,
                    namespace: KUBE_SYSTEM.to_string(),
                    ready: POD_READY_SINGLE.to_string(),
                    status: POD_RUNNING.to_string(),
                    restarts: 0,
                    ip: Some(ip),
                    node: Some(node),
                    image: CNI_IMAGE.to_string(),
                    app: CNI_APP.to_string(),
                    template_hash: None,
                    creation_timestamp: now,
                });
            }
            if store.find_deployment(CNI_OPERATOR, Some(KUBE_SYSTEM)).is_none() {
                store.create_deployment(CNI_OPERATOR, KUBE_SYSTEM, CNI_OPERATOR_IMAGE, 1)?;
            }

            info!("cni installed");
            store.notifier.notify();
            Ok(true)
        })
    }

    /// Flips every node to Ready. Returns how many changed.
    pub fn mark_nodes_ready(&mut self) -> usize {
        let mut changed = 0;
        for node in self.nodes.iter_mut().filter(|n| n.status != NODE_READY) {
            node.status = NODE_READY.to_string();
            changed += 1;
        }

        debug!(changed, "nodes marked ready");
        if changed > 0 {
            self.notifier.notify();
        }
        changed
    }
}

impl std::fmt::Debug for ResourceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceStore")
            .field("nodes", &self.nodes.len())
            .field("namespaces", &self.namespaces.len())
            .field("pods", &self.pods.len())
            .field("deployments", &self.deployments.len())
            .field("services", &self.services.len())
            .field("crds", &self.crds.len())
            .field("releases", &self.releases.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entropy::ManualClock;
    use crate::infrastructure::constants::NODE_NOT_READY;
    use std::cell::Cell;
    use std::rc::Rc;

    const NOW: i64 = 1_731_234_195_000;

    fn test_store() -> ResourceStore {
        ResourceStore::new(Entropy::seeded(42), Box::new(ManualClock::new(NOW)), true)
    }

    fn count_notifications(store: &mut ResourceStore) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let handle = count.clone();
        store.subscribe(move || handle.set(handle.get() + 1));
        count
    }

    #[test]
    fn test_create_namespace_and_duplicate() {
        let mut store = test_store();
        let notified = count_notifications(&mut store);

        store.create_namespace("demo").unwrap();
        let err = store.create_namespace("demo").unwrap_err();

        assert!(matches!(err, SimError::AlreadyExists { .. }));
        assert_eq!(
            store.namespaces().iter().filter(|n| n.name == "demo").count(),
            1
        );
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn test_protected_namespaces_survive_delete() {
        let mut store = test_store();
        let before = store.namespaces().len();

        for name in PROTECTED_NAMESPACES {
            let err = store.delete_namespace(name).unwrap_err();
            assert!(matches!(err, SimError::Forbidden { .. }));
        }

        assert_eq!(store.namespaces().len(), before);
    }

    #[test]
    fn test_delete_namespace_cascades() {
        let mut store = test_store();
        store.create_deployment("api", "staging", "acme/api:1", 2).unwrap();
        store
            .create_service("api", "staging", ServiceType::ClusterIP, 8080)
            .unwrap();

        store.delete_namespace("staging").unwrap();

        assert!(!store.namespace_exists("staging"));
        assert!(store.pods(Some("staging")).is_empty());
        assert!(store.deployments(Some("staging")).is_empty());
        assert!(store.services(Some("staging")).is_empty());
    }

    #[test]
    fn test_create_deployment_requires_namespace() {
        let mut store = test_store();
        let err = store
            .create_deployment("web", "missing", "nginx", 1)
            .unwrap_err();
        assert!(matches!(err, SimError::NamespaceNotFound(_)));
        assert!(store.find_deployment("web", None).is_none());
    }

    #[test]
    fn test_deployment_pods_share_template_hash() {
        let mut store = test_store();
        store.create_deployment("web", "default", "nginx", 3).unwrap();

        let deployment = store.find_deployment("web", Some("default")).unwrap();
        let prefix = format!("web-{}-", deployment.template_hash);
        let pods = store.owned_pods("web", "default");

        assert_eq!(pods.len(), 3);
        assert!(pods.iter().all(|p| p.name.starts_with(&prefix)));
        assert!(pods
            .iter()
            .all(|p| p.node.as_deref() != Some("node-1")));
    }

    #[test]
    fn test_scale_reaches_exact_count() {
        let mut store = test_store();
        store.create_deployment("web", "default", "nginx", 2).unwrap();

        for target in [5, 5, 1, 0, 3] {
            store.scale_deployment("web", "default", target).unwrap();
            assert_eq!(store.owned_pods("web", "default").len(), target as usize);
            let deployment = store.find_deployment("web", Some("default")).unwrap();
            assert_eq!(deployment.ready(), format!("{}/{}", target, target));
        }
    }

    #[test]
    fn test_scale_down_keeps_oldest_pods() {
        let mut store = test_store();
        store.create_deployment("web", "default", "nginx", 4).unwrap();
        let original: Vec<String> = store
            .owned_pods("web", "default")
            .iter()
            .map(|p| p.name.clone())
            .collect();

        store.scale_deployment("web", "default", 2).unwrap();

        let remaining: Vec<String> = store
            .owned_pods("web", "default")
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(remaining, original[..2].to_vec());
    }

    #[test]
    fn test_scale_missing_deployment_does_not_notify() {
        let mut store = test_store();
        let notified = count_notifications(&mut store);

        let err = store.scale_deployment("ghost", "default", 3).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Error from server (NotFound): deployments.apps \"ghost\" not found"
        );
        assert_eq!(notified.get(), 0);
    }

    #[test]
    fn test_replica_count_is_capped() {
        let mut store = test_store();
        let notified = count_notifications(&mut store);
        let pods = store.pods(None).len();

        let err = store
            .create_deployment("big", "default", "nginx", u32::MAX)
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument(_)));
        assert!(store.find_deployment("big", Some("default")).is_none());

        store
            .create_deployment("web", "default", "nginx", MAX_REPLICAS)
            .unwrap();
        assert_eq!(store.owned_pods("web", "default").len(), MAX_REPLICAS as usize);

        let err = store
            .scale_deployment("web", "default", MAX_REPLICAS + 1)
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument(_)));
        assert_eq!(store.pods(None).len(), pods + MAX_REPLICAS as usize);
        assert_eq!(
            store.find_deployment("web", Some("default")).unwrap().replicas,
            MAX_REPLICAS
        );
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn test_attribution_is_a_bare_name_prefix() {
        let mut store = test_store();
        store.create_deployment("web", "default", "nginx", 1).unwrap();
        store.create_deployment("webapp", "default", "nginx", 2).unwrap();
        assert_eq!(store.owned_pods("web", "default").len(), 3);

        store.scale_deployment("web", "default", 0).unwrap();
        assert!(store.owned_pods("webapp", "default").is_empty());
    }

    #[test]
    fn test_delete_deployment_uses_prefix_match() {
        let mut store = test_store();
        store.delete_deployment("redis-master", "default").unwrap();
        assert!(store.find_pod("redis-master-0", Some("default")).is_none());
    }

    #[test]
    fn test_load_balancer_gets_external_ip() {
        let mut store = test_store();
        store
            .create_service("lb", "default", ServiceType::LoadBalancer, 443)
            .unwrap();
        store
            .create_service("internal", "default", ServiceType::ClusterIP, 80)
            .unwrap();

        let lb = store.find_service("lb", Some("default")).unwrap();
        assert!(lb.external_ip.starts_with("203.0.113."));
        assert!(lb.ports.starts_with("443:3"));

        let internal = store.find_service("internal", Some("default")).unwrap();
        assert_eq!(internal.external_ip, "<none>");
        assert_eq!(internal.ports, "80/TCP");
    }

    #[test]
    fn test_install_crds_replicates_into_namespaces() {
        let mut store = test_store();
        assert!(store.install_crds());
        assert!(!store.install_crds());

        assert_eq!(store.crds().len(), crd::registry().len());
        assert_eq!(store.custom_resources("Project", Some("staging")).len(), 2);
        assert!(store.custom_resources("Project", Some("kube-system")).is_empty());
        assert_eq!(store.custom_resources("Organization", Some("staging")).len(), 2);

        store.create_namespace("team-a").unwrap();
        assert_eq!(store.custom_resources("Project", Some("team-a")).len(), 2);

        store.delete_namespace("team-a").unwrap();
        assert!(store.custom_resources("Project", Some("team-a")).is_empty());
    }

    #[test]
    fn test_install_release_notifies_once() {
        let mut store = test_store();
        let notified = count_notifications(&mut store);
        let components = [
            ComponentSpec {
                name: "controller",
                replicas: 1,
                image: "acme/controller:1",
            },
            ComponentSpec {
                name: "api",
                replicas: 2,
                image: "acme/api:1",
            },
        ];

        let release = store
            .install_release(&ReleaseRequest {
                name: "platform",
                namespace: "platform-system",
                chart: "platform-0.1.0".to_string(),
                app_version: "1.0.0".to_string(),
                create_namespace: true,
                components: &components,
                installs_crds: true,
            })
            .unwrap();

        assert_eq!(notified.get(), 1);
        assert_eq!(release.revision, 1);
        assert!(store.namespace_exists("platform-system"));
        assert_eq!(store.owned_pods("platform-api", "platform-system").len(), 2);
        assert!(!store.crds().is_empty());

        store.uninstall_release("platform", "platform-system").unwrap();
        assert!(store.find_deployment("platform-api", None).is_none());
        assert!(store.releases(None).is_empty());
    }

    #[test]
    fn test_install_release_without_namespace_fails_cleanly() {
        let mut store = test_store();
        let err = store
            .install_release(&ReleaseRequest {
                name: "x",
                namespace: "nowhere",
                chart: "x-0.1.0".to_string(),
                app_version: "1.0.0".to_string(),
                create_namespace: false,
                components: &[],
                installs_crds: false,
            })
            .unwrap_err();

        assert!(matches!(err, SimError::NamespaceNotFound(_)));
        assert!(store.releases(None).is_empty());
    }

    #[test]
    fn test_cni_and_node_readiness() {
        let mut store =
            ResourceStore::new(Entropy::seeded(9), Box::new(ManualClock::new(NOW)), false);
        assert!(store.nodes().iter().all(|n| n.status == NODE_NOT_READY));

        assert!(store.install_cni().unwrap());
        assert!(!store.install_cni().unwrap());
        assert_eq!(store.mark_nodes_ready(), 3);

        let agents = store
            .pods(Some("kube-system"))
            .into_iter()
            .filter(|p| p.app == "cilium")
            .count();
        assert_eq!(agents, store.nodes().len());
        assert!(store.nodes().iter().all(|n| n.status == NODE_READY));
    }

    #[test]
    fn test_ready_nodes_do_not_notify() {
        let mut store = test_store();
        let notified = count_notifications(&mut store);
        let before = store.snapshot();

        assert_eq!(store.mark_nodes_ready(), 0);
        assert_eq!(notified.get(), 0);
        assert_eq!(store.snapshot(), before);
    }
}
