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

//! Descriptor registry for the simulated custom kinds.

mod choreo;

use crate::domain::model::{Crd, CustomResource, Scope};
use crate::infrastructure::constants::MILLIS_PER_DAY;

/// Days before "now" at which every definition claims to have been installed.
const CRD_INSTALL_AGE_DAYS: i64 = 30;

/// Schema metadata of a custom kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrdDescriptor {
    pub group: &'static str,
    pub version: &'static str,
    pub kind: &'static str,
    pub plural: &'static str,
    pub singular: &'static str,
    pub scope: Scope,
    pub categories: &'static [&'static str],
}

/// Builds sample instances. Namespaced kinds receive the target namespace,
/// cluster-scoped kinds receive `None`.
pub type SampleFactory = fn(namespace: Option<&str>, now_ms: i64) -> Vec<CustomResource>;

#[derive(Clone, Copy)]
pub struct RegistryEntry {
    pub descriptor: CrdDescriptor,
    pub samples: SampleFactory,
}

impl RegistryEntry {
    pub fn to_crd(&self, now_ms: i64) -> Crd {
        let d = &self.descriptor;
        Crd {
            name: format!("{}.{}", d.plural, d.group),
            group: d.group.to_string(),
            version: d.version.to_string(),
            kind: d.kind.to_string(),
            plural: d.plural.to_string(),
            singular: d.singular.to_string(),
            scope: d.scope,
            creation_timestamp: now_ms - CRD_INSTALL_AGE_DAYS * MILLIS_PER_DAY,
        }
    }

    /// Sample instances for one namespace. Cluster-scoped kinds ignore it.
    pub fn instances(&self, namespace: &str, now_ms: i64) -> Vec<CustomResource> {
        match self.descriptor.scope {
            Scope::Cluster => (self.samples)(None, now_ms),
            Scope::Namespaced => (self.samples)(Some(namespace), now_ms),
        }
    }
}

/// The fixed catalog, in registration order.
pub fn registry() -> &'static [RegistryEntry] {
    choreo::REGISTRY
}

/// Looks a kind up by plural, singular or lower-cased kind name.
pub fn lookup(token: &str) -> Option<&'static RegistryEntry> {
    let token = token.to_ascii_lowercase();
    registry().iter().find(|entry| {
        let d = &entry.descriptor;
        token == d.plural || token == d.singular || token == d.kind.to_ascii_lowercase()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_731_234_195_000;

    #[test]
    fn test_lookup_by_every_spelling() {
        assert_eq!(lookup("projects").unwrap().descriptor.kind, "Project");
        assert_eq!(lookup("project").unwrap().descriptor.kind, "Project");
        assert_eq!(lookup("Project").unwrap().descriptor.kind, "Project");
        assert_eq!(lookup("idps").unwrap().descriptor.kind, "IdentityProvider");
        assert_eq!(
            lookup("identityprovider").unwrap().descriptor.kind,
            "IdentityProvider"
        );
        assert!(lookup("widgets").is_none());
    }

    #[test]
    fn test_crd_name_is_plural_dot_group() {
        let crd = lookup("component").unwrap().to_crd(NOW);
        assert_eq!(crd.name, "components.choreo.dev");
        assert_eq!(crd.api_version(), "choreo.dev/v1alpha1");
    }

    #[test]
    fn test_scope_controls_namespace_of_instances() {
        let org = lookup("organization").unwrap().instances("staging", NOW);
        assert!(org.iter().all(|cr| cr.namespace().is_none()));

        let projects = lookup("project").unwrap().instances("staging", NOW);
        assert!(!projects.is_empty());
        assert!(projects.iter().all(|cr| cr.namespace() == Some("staging")));
    }

    #[test]
    fn test_registry_samples_match_descriptor_kind() {
        for entry in registry() {
            for cr in entry.instances("default", NOW) {
                assert_eq!(cr.kind, entry.descriptor.kind);
                assert!(cr.metadata.creation_timestamp < NOW);
            }
        }
    }
}
