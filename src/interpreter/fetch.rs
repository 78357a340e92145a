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

//! `curl` and `wget`. Nothing leaves the process: a known bootstrap URL
//! piped into a shell runs its scripted steps against the store, anything
//! else prints a canned body.

use crate::domain::store::ResourceStore;
use crate::infrastructure::constants::WGET;
use crate::infrastructure::scripts::{self, BootstrapScript, ScriptStep};
use crate::interpreter::helm;
use crate::interpreter::tokenizer::tokenize;
use crate::shared::error::{Result, SimError};
use tracing::info;

const SHELLS: [&str; 2] = ["bash", "sh"];

/// `tokens` is the fetch segment; `rest` holds the later pipeline segments.
pub fn run(store: &mut ResourceStore, tokens: &[String], rest: &[String]) -> Result<String> {
    let tool = tokens.first().map(String::as_str).unwrap_or_default();
    let Some(url) = find_url(tokens.get(1..).unwrap_or(&[])) else {
        return Err(SimError::invalid(if tool == WGET {
            "wget: missing URL".to_string()
        } else {
            format!("{}: (2) no URL specified", tool)
        }));
    };

    let script = scripts::lookup(url);
    match (script, piped_shell(rest)) {
        (Some(script), Some(_)) => run_script(store, script, url),
        (None, Some(shell)) => Ok(format!(
            "Fetched {} and piped it to {}: nothing to simulate for this script",
            url, shell
        )),
        (Some(script), None) => Ok(script_body(script, url)),
        (None, None) => Ok(format!(
            "<html><body><h1>200 OK</h1><p>{}</p></body></html>",
            url
        )),
    }
}

/// First token that looks like a URL. Flag values such as `-o out.sh` are
/// skipped along with their flag.
fn find_url(args: &[String]) -> Option<&str> {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        match arg.as_str() {
            "-o" | "--output" | "-O" | "-H" | "--header" | "-X" | "--request" => skip_next = true,
            flag if flag.starts_with('-') => {}
            candidate => return Some(candidate),
        }
    }
    None
}

/// Shell named by the first later segment, e.g. `bash`, `sudo bash -s --`.
fn piped_shell(rest: &[String]) -> Option<&'static str> {
    let segment = rest.first()?;
    tokenize(segment)
        .iter()
        .filter(|t| t.as_str() != "sudo")
        .find_map(|t| SHELLS.iter().copied().find(|shell| t.as_str() == *shell))
}

fn script_body(script: &BootstrapScript, url: &str) -> String {
    format!(
        "#!/usr/bin/env bash\n# {}\n# Usage: curl -fsSL {} | bash\nset -euo pipefail\n\nmain \"$@\"",
        script.title, url
    )
}

/// Runs every step inside one batch, so observers see a single change.
fn run_script(store: &mut ResourceStore, script: &BootstrapScript, url: &str) -> Result<String> {
    info!(url, title = script.title, "running bootstrap script");

    store.batch(|store| {
        let mut lines = vec![format!("==> {}", script.title)];
        for step in script.steps {
            match *step {
                ScriptStep::Say(text) => lines.push(text.to_string()),
                ScriptStep::InstallCni => {
                    if store.install_cni()? {
                        lines.push("\u{2714} CNI installed (cilium)".to_string());
                    } else {
                        lines.push("CNI already installed, skipping".to_string());
                    }
                }
                ScriptStep::MarkNodesReady => {
                    let changed = store.mark_nodes_ready();
                    lines.push(format!("{} node(s) became Ready", changed));
                }
                ScriptStep::InstallChart {
                    release,
                    chart,
                    namespace,
                } => {
                    if store.find_release(release, namespace).is_some() {
                        lines.push(format!("Release {} already installed, skipping", release));
                        continue;
                    }
                    let installed = helm::install_chart(store, release, chart, namespace, true, None)?;
                    lines.push(format!(
                        "\u{2714} Installed release {} ({}) into namespace {}",
                        installed.name, installed.chart, installed.namespace
                    ));
                }
            }
        }
        info!(url, "bootstrap script finished");
        Ok(lines.join("\n"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entropy::{Entropy, ManualClock};
    use crate::infrastructure::constants::NODE_READY;
    use std::cell::Cell;
    use std::rc::Rc;

    const CILIUM: &str = "https://raw.githubusercontent.com/cilium/cilium-cli/main/install.sh";

    fn store(nodes_ready: bool) -> ResourceStore {
        ResourceStore::new(
            Entropy::seeded(34),
            Box::new(ManualClock::new(1_731_234_195_000)),
            nodes_ready,
        )
    }

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_missing_url() {
        let mut store = store(true);
        let err = run(&mut store, &tokens("curl -fsSL"), &[]).unwrap_err();
        assert_eq!(err.to_string(), "curl: (2) no URL specified");
        let err = run(&mut store, &tokens("wget -qO-"), &[]).unwrap_err();
        assert_eq!(err.to_string(), "wget: missing URL");
    }

    #[test]
    fn test_fetch_without_shell_prints_body() {
        let mut store = store(false);
        let out = run(&mut store, &tokens(&format!("curl -fsSL {}", CILIUM)), &[]).unwrap();
        assert!(out.starts_with("#!/usr/bin/env bash"));
        assert!(store.nodes().iter().all(|n| n.status != NODE_READY));
    }

    #[test]
    fn test_cilium_script_readies_nodes_with_one_notification() {
        let mut store = store(false);
        let count = Rc::new(Cell::new(0));
        let handle = count.clone();
        store.subscribe(move || handle.set(handle.get() + 1));

        let out = run(
            &mut store,
            &tokens(&format!("curl -fsSL {}", CILIUM)),
            &["bash".to_string()],
        )
        .unwrap();

        assert!(out.starts_with("==> Cilium CNI installer"));
        assert!(out.contains("3 node(s) became Ready"));
        assert!(store.nodes().iter().all(|n| n.status == NODE_READY));
        assert_eq!(store.pods(Some("kube-system")).iter().filter(|p| p.app == "cilium").count(), 3);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_rerun_of_satisfied_script_does_not_notify() {
        let mut store = store(false);
        let count = Rc::new(Cell::new(0));
        let handle = count.clone();
        store.subscribe(move || handle.set(handle.get() + 1));
        let line = tokens(&format!("curl -fsSL {}", CILIUM));

        run(&mut store, &line, &["bash".to_string()]).unwrap();
        assert_eq!(count.get(), 1);
        let before = store.snapshot();

        let out = run(&mut store, &line, &["bash".to_string()]).unwrap();
        assert!(out.contains("0 node(s) became Ready"));
        assert_eq!(count.get(), 1);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_script_is_idempotent() {
        let mut store = store(false);
        let url = "https://openchoreo.dev/install.sh";
        run(&mut store, &tokens(&format!("curl {}", url)), &["sudo bash".to_string()]).unwrap();
        let pods = store.pods(None).len();

        let out = run(&mut store, &tokens(&format!("wget -qO- {}", url)), &["sh".to_string()]).unwrap();
        assert!(out.contains("CNI already installed, skipping"));
        assert!(out.contains("Release openchoreo-control-plane already installed, skipping"));
        assert_eq!(store.pods(None).len(), pods);
        assert_eq!(store.releases(None).len(), 3);
    }

    #[test]
    fn test_unknown_script_is_harmless() {
        let mut store = store(true);
        let out = run(
            &mut store,
            &tokens("curl -o out.sh https://example.com/install.sh"),
            &["bash".to_string()],
        )
        .unwrap();
        assert!(out.contains("nothing to simulate"));
    }
}
