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

//! `helm` verbs: install, list, uninstall, version and repo.

use crate::cli::display::render_table;
use crate::cli::display::table::{col, render_rows, TableOptions};
use crate::domain::age::deployed_time;
use crate::domain::model::Release;
use crate::domain::store::{ReleaseRequest, ResourceStore};
use crate::infrastructure::charts;
use crate::infrastructure::constants::{
    DEFAULT_NAMESPACE, HELM_GIT_COMMIT, HELM_GO_VERSION, HELM_VERSION,
};
use crate::interpreter::flags::Flags;
use crate::shared::error::{Result, SimError};
use std::fmt::Write;

/// Flags that never take a value, so `--create-namespace web chart` keeps
/// both positionals.
const SWITCHES: &[&str] = &[
    "create-namespace",
    "wait",
    "atomic",
    "dry-run",
    "all-namespaces",
    "A",
    "debug",
];

const HELP: &str = "The Kubernetes package manager

Usage:
  helm [command]

Available Commands:
  install     install a chart
  list        list releases
  repo        add, list, remove, update, and index chart repositories
  uninstall   uninstall a release
  version     print the client version information

Use \"helm [command] --help\" for more information about a command.";

pub fn run(store: &mut ResourceStore, args: &[String]) -> Result<String> {
    let Some((verb, rest)) = args.split_first() else {
        return Ok(HELP.to_string());
    };
    let flags = Flags::parse_with_switches(rest, SWITCHES);

    match verb.as_str() {
        "install" => install(store, &flags),
        "list" | "ls" => Ok(list(store, &flags)),
        "uninstall" | "delete" | "un" => uninstall(store, &flags),
        "version" => Ok(version()),
        "repo" => repo(store, &flags),
        "help" | "--help" | "-h" => Ok(HELP.to_string()),
        other => Err(SimError::invalid(format!(
            "Error: unknown command \"{}\" for \"helm\"",
            other
        ))),
    }
}

/// Installs `chart` as `release`, mapping store errors to helm's wording.
/// Shared with the bootstrap scripts.
pub(crate) fn install_chart(
    store: &mut ResourceStore,
    release: &str,
    chart: &str,
    namespace: &str,
    create_namespace: bool,
    version: Option<&str>,
) -> Result<Release> {
    let resolved = charts::resolve(chart, version);
    let request = ReleaseRequest {
        name: release,
        namespace,
        chart: resolved.identifier,
        app_version: resolved.app_version,
        create_namespace,
        components: resolved.components,
        installs_crds: resolved.installs_crds,
    };

    store.install_release(&request).map_err(|err| match err {
        SimError::AlreadyExists { .. } => SimError::invalid(
            "Error: INSTALLATION FAILED: cannot re-use a name that is still in use",
        ),
        SimError::NamespaceNotFound(ns) => SimError::invalid(format!(
            "Error: INSTALLATION FAILED: create: failed to create: namespaces \"{}\" not found",
            ns
        )),
        other => other,
    })
}

fn install(store: &mut ResourceStore, flags: &Flags) -> Result<String> {
    let Some(release) = flags.positional(0) else {
        return Err(SimError::invalid(
            "Error: \"helm install\" requires at least 1 argument\n\nUsage:  helm install [NAME] [CHART] [flags]",
        ));
    };
    let Some(chart) = flags.positional(1) else {
        return Err(SimError::invalid(
            "Error: INSTALLATION FAILED: must either provide a name or specify --generate-name",
        ));
    };
    let namespace = flags.namespace().unwrap_or(DEFAULT_NAMESPACE);

    let installed = install_chart(
        store,
        release,
        chart,
        namespace,
        flags.present(&["create-namespace"]),
        flags.value(&["version"]),
    )?;

    let mut out = String::new();
    let _ = writeln!(out, "NAME: {}", installed.name);
    let _ = writeln!(
        out,
        "LAST DEPLOYED: {}",
        deployed_time(installed.creation_timestamp)
    );
    let _ = writeln!(out, "NAMESPACE: {}", installed.namespace);
    let _ = writeln!(out, "STATUS: {}", installed.status);
    let _ = writeln!(out, "REVISION: {}", installed.revision);
    out.push_str("TEST SUITE: None");
    if !installed.components.is_empty() {
        let _ = write!(
            out,
            "\nNOTES:\n{} has been installed. Components:",
            installed.chart
        );
        for component in &installed.components {
            let _ = write!(out, "\n  - {}", component);
        }
    }
    Ok(out)
}

/// An empty listing still prints the header.
fn list(store: &ResourceStore, flags: &Flags) -> String {
    let filter = if flags.all_namespaces() {
        None
    } else {
        Some(flags.namespace().unwrap_or(DEFAULT_NAMESPACE))
    };
    render_table(
        &store.releases(filter),
        store.now(),
        &TableOptions::default(),
    )
}

fn uninstall(store: &mut ResourceStore, flags: &Flags) -> Result<String> {
    let Some(release) = flags.positional(0) else {
        return Err(SimError::invalid(
            "Error: \"helm uninstall\" requires at least 1 argument",
        ));
    };
    let namespace = flags.namespace().unwrap_or(DEFAULT_NAMESPACE);

    store
        .uninstall_release(release, namespace)
        .map_err(|err| match err {
            SimError::NotFound { .. } => SimError::invalid(format!(
                "Error: uninstall: Release not loaded: {}: release: not found",
                release
            )),
            other => other,
        })?;
    Ok(format!("release \"{}\" uninstalled", release))
}

fn version() -> String {
    format!(
        "version.BuildInfo{{Version:\"{}\", GitCommit:\"{}\", GitTreeState:\"clean\", GoVersion:\"{}\"}}",
        HELM_VERSION, HELM_GIT_COMMIT, HELM_GO_VERSION
    )
}

fn repo(store: &mut ResourceStore, flags: &Flags) -> Result<String> {
    match flags.positional(0) {
        Some("add") => {
            let (Some(name), Some(url)) = (flags.positional(1), flags.positional(2)) else {
                return Err(SimError::invalid(
                    "Error: \"helm repo add\" requires 2 arguments",
                ));
            };
            if store.add_repository(name, url)? {
                Ok(format!("\"{}\" has been added to your repositories", name))
            } else {
                Ok(format!(
                    "\"{}\" already exists with the same configuration, skipping",
                    name
                ))
            }
        }
        Some("update") | Some("up") => {
            let repositories = store.repositories();
            if repositories.is_empty() {
                return Err(SimError::invalid(
                    "Error: no repositories found. You must add one before updating",
                ));
            }
            let mut out =
                String::from("Hang tight while we grab the latest from your chart repositories...");
            for repository in repositories {
                let _ = write!(
                    out,
                    "\n...Successfully got an update from the \"{}\" chart repository",
                    repository.name
                );
            }
            out.push_str("\nUpdate Complete. \u{2388}Happy Helming!\u{2388}");
            Ok(out)
        }
        Some("list") | Some("ls") => {
            let repositories = store.repositories();
            if repositories.is_empty() {
                return Err(SimError::invalid("Error: no repositories to show"));
            }
            let width = repositories
                .iter()
                .map(|r| r.name.len())
                .max()
                .unwrap_or_default()
                .max(4);
            let rows: Vec<Vec<String>> = repositories
                .iter()
                .map(|r| vec![r.name.clone(), r.url.clone()])
                .collect();
            Ok(render_rows(&[col("NAME", width), col("URL", 0)], &rows))
        }
        Some(other) => Err(SimError::invalid(format!(
            "Error: unknown command \"{}\" for \"helm repo\"",
            other
        ))),
        None => Err(SimError::invalid(
            "Error: \"helm repo\" requires a subcommand: add, list or update",
        )),
    }
}
