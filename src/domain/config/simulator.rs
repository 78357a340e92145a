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

//! Type definitions for simulator configuration

use crate::infrastructure::constants::DEFAULT_API_SERVER;
use crate::shared::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;

// ============================================================================
// Main simulator configuration
// ============================================================================

/// Main simulator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConf {
    /// Fixes every generated name, IP and node assignment when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub prompt: String,
    pub color: bool,
    pub cluster: ClusterSection,
}

impl Default for SimulatorConf {
    fn default() -> Self {
        Self {
            seed: None,
            prompt: "$ ".to_string(),
            color: true,
            cluster: ClusterSection::default(),
        }
    }
}

impl SimulatorConf {
    /// Load configuration from TOML file
    pub fn from<T: AsRef<str>>(path: T) -> Result<Self> {
        let content = read_to_string(path.as_ref()).map_err(|e| {
            SimError::config_error(format!(
                "Failed to read config file {}: {}",
                path.as_ref(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let conf: Self = toml::from_str(content)?;
        conf.validate()?;
        Ok(conf)
    }

    fn validate(&self) -> Result<()> {
        if !self.cluster.server.starts_with("https://") && !self.cluster.server.starts_with("http://")
        {
            return Err(SimError::config_error(format!(
                "cluster.server must be an http(s) URL, got {}",
                self.cluster.server
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Cluster section
// ============================================================================

/// The fabricated cluster's identity and starting condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterSection {
    pub server: String,
    /// When false, nodes start NotReady until a CNI bootstrap script runs.
    pub nodes_ready: bool,
}

impl Default for ClusterSection {
    fn default() -> Self {
        Self {
            server: DEFAULT_API_SERVER.to_string(),
            nodes_ready: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_when_empty() {
        let conf = SimulatorConf::from_toml("").unwrap();
        assert_eq!(conf, SimulatorConf::default());
        assert_eq!(conf.prompt, "$ ");
        assert!(conf.cluster.nodes_ready);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
seed = 7
color = false

[cluster]
server = "https://10.0.0.1:6443"
nodes_ready = false
"#
        )
        .unwrap();

        let conf = SimulatorConf::from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(conf.seed, Some(7));
        assert!(!conf.color);
        assert_eq!(conf.prompt, "$ ");
        assert_eq!(conf.cluster.server, "https://10.0.0.1:6443");
        assert!(!conf.cluster.nodes_ready);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = SimulatorConf::from("/nonexistent/kubesim.toml").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_server() {
        let err = SimulatorConf::from_toml("[cluster]\nserver = \"ftp://x\"\n").unwrap_err();
        assert!(err.to_string().contains("cluster.server"));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            SimulatorConf::from_toml("seed = ").unwrap_err(),
            SimError::TomlParse(_)
        ));
    }
}
