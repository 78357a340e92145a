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

//! Command interpreter: one line in, one [`CommandOutput`] out.

pub mod coreutils;
pub mod fetch;
pub mod flags;
pub mod helm;
pub mod kubectl;
pub mod tokenizer;

use crate::domain::config::SimulatorConf;
use crate::domain::entropy::{Clock, Entropy, SystemClock};
use crate::domain::store::{ClusterState, ResourceStore};
use crate::infrastructure::constants::{CURL, HELM, HOME_DIR, KUBECTL, KUBECTL_ALIAS, WGET};
use crate::shared::error::{Result, SimError};
use crate::shared::output::CommandOutput;
use tracing::debug;

/// Shell commands accepted as inert no-ops.
const INERT_COMMANDS: [&str; 5] = ["ls", "cd", "mv", "cp", "clear"];

/// The whole simulated session: a resource store plus the endpoint it
/// reports. Commands run one at a time against it.
pub struct Simulator {
    store: ResourceStore,
    server: String,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    pub fn new() -> Self {
        Self::from_conf(&SimulatorConf::default())
    }

    /// Deterministic names, IPs and node ports for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_parts(
            Entropy::seeded(seed),
            Box::new(SystemClock),
            &SimulatorConf::default(),
        )
    }

    pub fn from_conf(conf: &SimulatorConf) -> Self {
        let entropy = conf.seed.map_or_else(Entropy::from_entropy, Entropy::seeded);
        Self::with_parts(entropy, Box::new(SystemClock), conf)
    }

    pub fn with_parts(entropy: Entropy, clock: Box<dyn Clock>, conf: &SimulatorConf) -> Self {
        Self {
            store: ResourceStore::new(entropy, clock, conf.cluster.nodes_ready),
            server: conf.cluster.server.clone(),
        }
    }

    /// Runs one command line. Failures come back as output with
    /// `is_error` set; nothing here panics or propagates.
    pub fn execute_command(&mut self, line: &str) -> CommandOutput {
        let line = line.trim();
        if line.is_empty() {
            return CommandOutput::empty();
        }

        debug!(command = line, "executing command");
        let server = &self.server;
        let result = self.store.batch(|store| run_line(store, server, line));
        if let Err(err) = &result {
            debug!(command = line, error = %err, "command failed");
        }
        CommandOutput::from(result)
    }

    /// Registers an observer fired once after every command that changed
    /// state.
    pub fn on_state_change(&mut self, observer: impl FnMut() + 'static) {
        self.store.subscribe(observer);
    }

    pub fn get_state(&self) -> ClusterState {
        self.store.snapshot()
    }

    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    pub fn server(&self) -> &str {
        &self.server
    }
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("store", &self.store)
            .field("server", &self.server)
            .finish()
    }
}

/// Dispatches the first pipeline segment, then feeds its output through the
/// remaining segments. A fetch owns its whole pipeline.
fn run_line(store: &mut ResourceStore, server: &str, line: &str) -> Result<String> {
    let segments = tokenizer::split_pipeline(line);
    let Some((first, rest)) = segments.split_first() else {
        return Ok(String::new());
    };
    let tokens = tokenizer::tokenize(first);
    let Some((program, args)) = tokens.split_first() else {
        return Err(SimError::invalid(
            "bash: syntax error near unexpected token `|'",
        ));
    };

    let output = match program.as_str() {
        KUBECTL | KUBECTL_ALIAS => kubectl::run(store, server, args)?,
        HELM => helm::run(store, args)?,
        CURL | WGET => return fetch::run(store, &tokens, rest),
        "pwd" => HOME_DIR.to_string(),
        inert if INERT_COMMANDS.contains(&inert) => String::new(),
        other => {
            return Err(SimError::invalid(format!(
                "bash: {}: command not found",
                other
            )))
        }
    };

    rest.iter().try_fold(output, |acc, segment| {
        coreutils::apply_filter(&acc, &tokenizer::tokenize(segment))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entropy::ManualClock;
    use std::cell::Cell;
    use std::rc::Rc;

    fn simulator() -> Simulator {
        Simulator::with_parts(
            Entropy::seeded(55),
            Box::new(ManualClock::new(1_731_234_195_000)),
            &SimulatorConf::default(),
        )
    }

    #[test]
    fn test_empty_line_is_silent() {
        let mut sim = simulator();
        assert_eq!(sim.execute_command("   "), CommandOutput::empty());
    }

    #[test]
    fn test_shell_noops() {
        let mut sim = simulator();
        assert_eq!(sim.execute_command("pwd").output, HOME_DIR);
        let out = sim.execute_command("cd /tmp");
        assert!(!out.is_error);
        assert!(out.output.is_empty());
    }

    #[test]
    fn test_command_not_found() {
        let mut sim = simulator();
        let out = sim.execute_command("docker ps");
        assert!(out.is_error);
        assert_eq!(out.output, "bash: docker: command not found");
    }

    #[test]
    fn test_alias_and_pipeline() {
        let mut sim = simulator();
        let out = sim.execute_command("k get pods -A | grep coredns | wc -l");
        assert!(!out.is_error);
        assert_eq!(out.output, "2");

        let out = sim.execute_command("kubectl get nodes | head -n 1");
        assert_eq!(out.output, "NAME     STATUS   ROLES           AGE   VERSION");
    }

    #[test]
    fn test_bad_filter_is_an_error() {
        let mut sim = simulator();
        let out = sim.execute_command("kubectl get pods | sort");
        assert!(out.is_error);
        assert_eq!(out.output, "bash: sort: command not found");
    }

    #[test]
    fn test_one_notification_per_mutating_command() {
        let mut sim = simulator();
        let count = Rc::new(Cell::new(0));
        let handle = count.clone();
        sim.on_state_change(move || handle.set(handle.get() + 1));

        sim.execute_command("kubectl get pods");
        assert_eq!(count.get(), 0);
        sim.execute_command("kubectl create deployment web --image=nginx --replicas=3");
        assert_eq!(count.get(), 1);
        sim.execute_command("kubectl delete namespace kube-system");
        assert_eq!(count.get(), 1);
        sim.execute_command(
            "helm install cp oci://ghcr.io/openchoreo/helm-charts/openchoreo-control-plane --create-namespace -n choreo",
        );
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_get_state_reflects_commands() {
        let mut sim = simulator();
        sim.execute_command("kubectl create namespace demo");
        let state = sim.get_state();
        assert!(state.namespaces.iter().any(|ns| ns.name == "demo"));
    }
}
