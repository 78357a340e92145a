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

//! Chart rule table for `helm install`.
//!
//! A chart reference is matched against each rule's pattern in order; the
//! first hit decides which component deployments get synthesised. Adding a
//! simulated chart means adding a row here.

use crate::infrastructure::constants::{DEFAULT_APP_VERSION, DEFAULT_CHART_VERSION};

/// One synthesised deployment, created as `<release>-<name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentSpec {
    pub name: &'static str,
    pub replicas: u32,
    pub image: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartRule {
    /// Substring of the chart reference.
    pub pattern: &'static str,
    pub chart_version: &'static str,
    pub app_version: &'static str,
    pub installs_crds: bool,
    pub components: &'static [ComponentSpec],
}

const fn component(name: &'static str, replicas: u32, image: &'static str) -> ComponentSpec {
    ComponentSpec {
        name,
        replicas,
        image,
    }
}

pub static CHART_RULES: &[ChartRule] = &[
    ChartRule {
        pattern: "control-plane",
        chart_version: "0.3.0",
        app_version: "0.3.0",
        installs_crds: true,
        components: &[
            component("controller-manager", 1, "ghcr.io/openchoreo/controller:v0.3.0"),
            component("api", 1, "ghcr.io/openchoreo/openchoreo-api:v0.3.0"),
            component("cert-manager", 1, "quay.io/jetstack/cert-manager-controller:v1.13.2"),
        ],
    },
    ChartRule {
        pattern: "data-plane",
        chart_version: "0.3.0",
        app_version: "0.3.0",
        installs_crds: false,
        components: &[
            component("gateway", 2, "docker.io/envoyproxy/gateway:v1.0.1"),
            component("vault", 1, "hashicorp/vault:1.15.2"),
            component("registry", 1, "registry:2.8.3"),
        ],
    },
    ChartRule {
        pattern: "build-plane",
        chart_version: "0.3.0",
        app_version: "0.3.0",
        installs_crds: false,
        components: &[
            component("workflow-controller", 1, "quay.io/argoproj/workflow-controller:v3.5.2"),
            component("argo-server", 1, "quay.io/argoproj/argocli:v3.5.2"),
        ],
    },
    ChartRule {
        pattern: "observability",
        chart_version: "0.3.0",
        app_version: "0.3.0",
        installs_crds: false,
        components: &[
            component("opensearch", 1, "opensearchproject/opensearch:2.11.1"),
            component("fluent-bit", 1, "cr.fluentbit.io/fluent/fluent-bit:2.2.0"),
        ],
    },
];

/// What `helm install` resolved a chart reference to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChart {
    /// `<chart>-<version>`, the CHART column of `helm list`.
    pub identifier: String,
    pub app_version: String,
    pub installs_crds: bool,
    pub components: &'static [ComponentSpec],
}

pub fn match_rule(chart: &str) -> Option<&'static ChartRule> {
    CHART_RULES.iter().find(|rule| chart.contains(rule.pattern))
}

/// Resolves a chart reference such as `oci://registry/charts/app` or
/// `repo/app`. An explicit `--version` wins over the rule's version.
pub fn resolve(chart: &str, version: Option<&str>) -> ResolvedChart {
    let base = chart.trim_end_matches('/').rsplit('/').next().unwrap_or(chart);
    let rule = match_rule(chart);

    let chart_version = version
        .map(|v| v.trim_start_matches('v'))
        .or(rule.map(|r| r.chart_version))
        .unwrap_or(DEFAULT_CHART_VERSION);

    ResolvedChart {
        identifier: format!("{}-{}", base, chart_version),
        app_version: rule
            .map(|r| r.app_version)
            .unwrap_or(DEFAULT_APP_VERSION)
            .to_string(),
        installs_crds: rule.map_or(false, |r| r.installs_crds),
        components: rule.map(|r| r.components).unwrap_or(&[]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_chart() {
        let chart = resolve(
            "oci://ghcr.io/openchoreo/helm-charts/openchoreo-control-plane",
            None,
        );
        assert_eq!(chart.identifier, "openchoreo-control-plane-0.3.0");
        assert!(chart.installs_crds);
        assert_eq!(chart.components.len(), 3);
    }

    #[test]
    fn test_explicit_version_wins() {
        let chart = resolve("openchoreo/openchoreo-data-plane", Some("v0.4.1"));
        assert_eq!(chart.identifier, "openchoreo-data-plane-0.4.1");
        assert!(!chart.installs_crds);
    }

    #[test]
    fn test_unknown_chart_has_no_components() {
        let chart = resolve("bitnami/nginx", None);
        assert_eq!(chart.identifier, "nginx-0.1.0");
        assert_eq!(chart.app_version, "1.0.0");
        assert!(chart.components.is_empty());
    }

    #[test]
    fn test_rule_patterns_are_distinct() {
        for (i, a) in CHART_RULES.iter().enumerate() {
            for b in &CHART_RULES[i + 1..] {
                assert!(!a.pattern.contains(b.pattern) && !b.pattern.contains(a.pattern));
            }
        }
    }
}
