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

use super::{split_kind, Kind};
use crate::cli::display::format::{encode, list_document, list_value, to_value};
use crate::cli::display::{render_table, Document, OutputFormat, TableOptions, Tabular};
use crate::domain::model::{
    Crd, CustomResource, Deployment, Namespace, Node, Pod, Scope, Service,
};
use crate::domain::store::ResourceStore;
use crate::infrastructure::constants::DEFAULT_NAMESPACE;
use crate::interpreter::flags::Flags;
use crate::shared::error::{Result, SimError};

const CRD_RESOURCE: &str = "customresourcedefinitions.apiextensions.k8s.io";

/// How a listing should be scoped and printed.
struct View<'a> {
    format: OutputFormat,
    all_namespaces: bool,
    namespace: &'a str,
    now_ms: i64,
}

impl<'a> View<'a> {
    fn filter(&self) -> Option<&'a str> {
        (!self.all_namespaces).then_some(self.namespace)
    }

    fn options(&self, namespaced: bool, name_prefix: &'static str) -> TableOptions<'static> {
        TableOptions {
            wide: self.format.is_wide(),
            with_namespace: namespaced && self.all_namespaces,
            name_prefix,
        }
    }

    fn no_resources(&self, namespaced: bool) -> String {
        if namespaced && !self.all_namespaces {
            format!("No resources found in {} namespace.", self.namespace)
        } else {
            "No resources found".to_string()
        }
    }
}

pub fn get(store: &ResourceStore, args: &[String]) -> Result<String> {
    let flags = Flags::parse(args);
    let Some(target) = flags.positional(0) else {
        return Err(SimError::invalid("Error: You must specify the type of resource to get"));
    };
    let (kind, inline_name) = split_kind(target);
    let name = inline_name.or_else(|| flags.positional(1));

    let view = View {
        format: flags.value(&["output", "o"]).unwrap_or_default().parse()?,
        all_namespaces: flags.all_namespaces(),
        namespace: flags.namespace().unwrap_or(DEFAULT_NAMESPACE),
        now_ms: store.now(),
    };

    match Kind::resolve(store, kind)? {
        Kind::Node => listing(
            store.nodes().iter().collect(),
            name,
            "nodes",
            false,
            &view,
            |n: &Node| n.name.as_str(),
        ),
        Kind::Pod => listing(
            store.pods(view.filter()),
            name,
            "pods",
            true,
            &view,
            |p: &Pod| p.name.as_str(),
        ),
        Kind::Deployment => listing(
            store.deployments(view.filter()),
            name,
            "deployments.apps",
            true,
            &view,
            |d: &Deployment| d.name.as_str(),
        ),
        Kind::Service => listing(
            store.services(view.filter()),
            name,
            "services",
            true,
            &view,
            |s: &Service| s.name.as_str(),
        ),
        Kind::Namespace => listing(
            store.namespaces().iter().collect(),
            name,
            "namespaces",
            false,
            &view,
            |ns: &Namespace| ns.name.as_str(),
        ),
        Kind::Crd => listing(
            store.crds().iter().collect(),
            name,
            CRD_RESOURCE,
            false,
            &view,
            |c: &Crd| c.name.as_str(),
        ),
        Kind::Custom(crd) => {
            let namespaced = crd.scope == Scope::Namespaced;
            let filter = if namespaced { view.filter() } else { None };
            listing(
                store.custom_resources(&crd.kind, filter),
                name,
                &crd.name,
                namespaced,
                &view,
                |r: &CustomResource| r.name(),
            )
        }
        Kind::All => all(store, &view),
    }
}

/// A single named item, or the whole list, in the requested format.
fn listing<T, F>(
    items: Vec<&T>,
    name: Option<&str>,
    resource: &str,
    namespaced: bool,
    view: &View<'_>,
    name_of: F,
) -> Result<String>
where
    T: Tabular + Document,
    F: Fn(&T) -> &str,
{
    if let Some(name) = name {
        let item = items
            .into_iter()
            .find(|item| name_of(*item) == name)
            .ok_or_else(|| SimError::not_found(resource, name))?;
        if view.format.is_structured() {
            return encode(&to_value(item, view.now_ms)?, view.format);
        }
        return Ok(render_table(&[item], view.now_ms, &view.options(namespaced, "")));
    }

    if view.format.is_structured() {
        return encode(&list_value(&items, view.now_ms)?, view.format);
    }
    if items.is_empty() {
        return Ok(view.no_resources(namespaced));
    }
    Ok(render_table(&items, view.now_ms, &view.options(namespaced, "")))
}

/// `get all`: pods, deployments and services, each with a kind prefix.
fn all(store: &ResourceStore, view: &View<'_>) -> Result<String> {
    let pods = store.pods(view.filter());
    let deployments = store.deployments(view.filter());
    let services = store.services(view.filter());

    if view.format.is_structured() {
        let mut items = Vec::with_capacity(pods.len() + deployments.len() + services.len());
        for pod in &pods {
            items.push(to_value(*pod, view.now_ms)?);
        }
        for deployment in &deployments {
            items.push(to_value(*deployment, view.now_ms)?);
        }
        for service in &services {
            items.push(to_value(*service, view.now_ms)?);
        }
        return encode(&list_document(items), view.format);
    }

    let mut sections = Vec::new();
    if !pods.is_empty() {
        sections.push(render_table(&pods, view.now_ms, &view.options(true, "pod/")));
    }
    if !deployments.is_empty() {
        sections.push(render_table(
            &deployments,
            view.now_ms,
            &view.options(true, "deployment.apps/"),
        ));
    }
    if !services.is_empty() {
        sections.push(render_table(
            &services,
            view.now_ms,
            &view.options(true, "service/"),
        ));
    }

    if sections.is_empty() {
        return Ok(view.no_resources(true));
    }
    Ok(sections.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entropy::{Entropy, ManualClock};

    fn store() -> ResourceStore {
        ResourceStore::new(
            Entropy::seeded(5),
            Box::new(ManualClock::new(1_731_234_195_000)),
            true,
        )
    }

    fn run(store: &ResourceStore, line: &str) -> Result<String> {
        let args: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        get(store, &args)
    }

    #[test]
    fn test_get_requires_kind() {
        let err = run(&store(), "").unwrap_err();
        assert_eq!(err.to_string(), "Error: You must specify the type of resource to get");
    }

    #[test]
    fn test_get_pods_default_namespace() {
        let out = run(&store(), "pods").unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("NAME"));
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().skip(1).all(|l| !l.contains("coredns")));
    }

    #[test]
    fn test_get_pods_all_namespaces() {
        let out = run(&store(), "pods -A").unwrap();
        assert!(out.lines().next().unwrap().starts_with("NAMESPACE     NAME"));
        assert_eq!(out.lines().count(), 15);
    }

    #[test]
    fn test_get_missing_namespace_is_empty() {
        let out = run(&store(), "pods -n ghost").unwrap();
        assert_eq!(out, "No resources found in ghost namespace.");
    }

    #[test]
    fn test_get_named_and_missing() {
        let store = store();
        let out = run(&store, "svc kubernetes").unwrap();
        assert_eq!(out.lines().count(), 2);

        let err = run(&store, "pod/ghost").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error from server (NotFound): pods \"ghost\" not found"
        );
    }

    #[test]
    fn test_get_json_list_and_single() {
        let store = store();
        let out = run(&store, "nodes -o json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["kind"], "List");
        assert_eq!(value["items"].as_array().unwrap().len(), 3);
        assert_eq!(value["items"][0]["age"], "45d");

        let out = run(&store, "node node-1 -o json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["name"], "node-1");
    }

    #[test]
    fn test_get_unknown_format() {
        let err = run(&store(), "pods -o xml").unwrap_err();
        assert!(err.to_string().contains("\"xml\""));
    }

    #[test]
    fn test_get_unknown_kind() {
        let err = run(&store(), "widgets").unwrap_err();
        assert_eq!(
            err.to_string(),
            "error: the server doesn't have a resource type \"widgets\""
        );
    }

    #[test]
    fn test_get_all_sections() {
        let out = run(&store(), "all").unwrap();
        let sections: Vec<&str> = out.split("\n\n").collect();
        assert_eq!(sections.len(), 3);
        assert!(sections[0].lines().nth(1).unwrap().starts_with("pod/"));
        assert!(sections[1]
            .lines()
            .nth(1)
            .unwrap()
            .starts_with("deployment.apps/"));
        assert!(sections[2].lines().nth(1).unwrap().starts_with("service/"));
    }

    #[test]
    fn test_get_custom_kind_after_crds_installed() {
        let mut store = store();
        assert!(run(&store, "crds").unwrap() == "No resources found");
        store.install_crds();

        let crds = run(&store, "crd").unwrap();
        assert!(crds.lines().next().unwrap().starts_with("NAME"));
        assert!(crds.contains("choreo.dev"));

        let out = run(&store, "organizations").unwrap();
        assert!(out.starts_with("NAME"));
        assert!(out.lines().count() >= 2);
    }
}
