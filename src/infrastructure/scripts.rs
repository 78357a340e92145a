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

//! Bootstrap scripts known to the fetch simulator.

/// A single scripted action. Steps run in order against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    InstallChart {
        release: &'static str,
        chart: &'static str,
        namespace: &'static str,
    },
    InstallCni,
    MarkNodesReady,
    Say(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapScript {
    /// Substring of the URL.
    pub pattern: &'static str,
    pub title: &'static str,
    pub steps: &'static [ScriptStep],
}

pub static SCRIPTS: &[BootstrapScript] = &[
    BootstrapScript {
        pattern: "cilium",
        title: "Cilium CNI installer",
        steps: &[
            ScriptStep::Say("Downloading cilium-cli v0.15.19 for linux/amd64"),
            ScriptStep::Say("Detected Kubernetes v1.28.3, installing Cilium v1.14.5"),
            ScriptStep::InstallCni,
            ScriptStep::Say("Waiting for Cilium to become ready"),
            ScriptStep::MarkNodesReady,
            ScriptStep::Say("Cilium was successfully installed, all nodes are Ready"),
        ],
    },
    BootstrapScript {
        pattern: "openchoreo",
        title: "OpenChoreo quick-start installer",
        steps: &[
            ScriptStep::Say("Installing OpenChoreo into the current cluster"),
            ScriptStep::InstallCni,
            ScriptStep::MarkNodesReady,
            ScriptStep::InstallChart {
                release: "openchoreo-control-plane",
                chart: "oci://ghcr.io/openchoreo/helm-charts/openchoreo-control-plane",
                namespace: "openchoreo-control-plane",
            },
            ScriptStep::InstallChart {
                release: "openchoreo-data-plane",
                chart: "oci://ghcr.io/openchoreo/helm-charts/openchoreo-data-plane",
                namespace: "openchoreo-data-plane",
            },
            ScriptStep::InstallChart {
                release: "openchoreo-build-plane",
                chart: "oci://ghcr.io/openchoreo/helm-charts/openchoreo-build-plane",
                namespace: "openchoreo-build-plane",
            },
            ScriptStep::Say("OpenChoreo is ready. Try: kubectl get organizations"),
        ],
    },
    BootstrapScript {
        pattern: "get-helm",
        title: "Helm installer",
        steps: &[
            ScriptStep::Say("Downloading https://get.helm.sh/helm-v3.14.0-linux-amd64.tar.gz"),
            ScriptStep::Say("Verifying checksum... Done."),
            ScriptStep::Say("helm installed into /usr/local/bin/helm"),
        ],
    },
];

/// First script whose pattern occurs in `url`.
pub fn lookup(url: &str) -> Option<&'static BootstrapScript> {
    SCRIPTS.iter().find(|script| url.contains(script.pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_url_substring() {
        let script = lookup("https://raw.githubusercontent.com/cilium/cilium-cli/main/install.sh").unwrap();
        assert_eq!(script.title, "Cilium CNI installer");
        assert!(script.steps.contains(&ScriptStep::MarkNodesReady));

        assert_eq!(
            lookup("https://raw.githubusercontent.com/helm/helm/main/scripts/get-helm-3")
                .unwrap()
                .pattern,
            "get-helm"
        );
        assert!(lookup("https://example.com/install.sh").is_none());
    }
}
