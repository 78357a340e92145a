//! Cluster overview rendering, the dashboard read path

use super::{ColorTheme, StatusIcon};
use crate::domain::store::ClusterState;
use crate::infrastructure::constants::{NODE_READY, POD_RUNNING, RELEASE_STATUS_DEPLOYED};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

/// One row of the summary table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSummary {
    pub resource: &'static str,
    pub healthy: usize,
    pub total: usize,
}

impl ResourceSummary {
    fn new(resource: &'static str, healthy: usize, total: usize) -> Self {
        Self {
            resource,
            healthy,
            total,
        }
    }
}

/// Counts healthy versus total for every kind in a snapshot.
pub fn summarize(state: &ClusterState) -> Vec<ResourceSummary> {
    let ready_nodes = state.nodes.iter().filter(|n| n.status == NODE_READY).count();
    let running_pods = state.pods.iter().filter(|p| p.status == POD_RUNNING).count();
    let desired: u32 = state.deployments.iter().map(|d| d.replicas).sum();
    let available: u32 = state.deployments.iter().map(|d| d.available).sum();
    let deployed = state
        .releases
        .iter()
        .filter(|r| r.status == RELEASE_STATUS_DEPLOYED)
        .count();

    vec![
        ResourceSummary::new("Nodes", ready_nodes, state.nodes.len()),
        ResourceSummary::new("Pods", running_pods, state.pods.len()),
        ResourceSummary::new("Replicas", available as usize, desired as usize),
        ResourceSummary::new("Services", state.services.len(), state.services.len()),
        ResourceSummary::new("Namespaces", state.namespaces.len(), state.namespaces.len()),
        ResourceSummary::new("CRDs", state.crds.len(), state.crds.len()),
        ResourceSummary::new(
            "Custom resources",
            state.custom_resources.len(),
            state.custom_resources.len(),
        ),
        ResourceSummary::new("Releases", deployed, state.releases.len()),
    ]
}

/// Renders the overview with comfy-table
pub struct OverviewRenderer {
    theme: ColorTheme,
    color: bool,
}

impl Default for OverviewRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl OverviewRenderer {
    pub fn new(color: bool) -> Self {
        Self {
            theme: ColorTheme::default(),
            color,
        }
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if !self.color {
            table.force_no_tty();
        }
        table
    }

    pub fn render(&self, state: &ClusterState) -> String {
        let mut summary = self.table();
        summary.set_header(vec![
            Cell::new("RESOURCE").set_alignment(CellAlignment::Left),
            Cell::new("READY").set_alignment(CellAlignment::Center),
            Cell::new("STATUS").set_alignment(CellAlignment::Center),
        ]);
        for row in summarize(state) {
            let color = self.theme.get_ready_color(row.healthy, row.total);
            summary.add_row(vec![
                Cell::new(row.resource),
                Cell::new(format!("{}/{}", row.healthy, row.total)).fg(color),
                Cell::new(format!(
                    "{} {}",
                    StatusIcon::get_ready_icon(row.healthy, row.total),
                    StatusIcon::get_status_text(row.healthy, row.total)
                ))
                .fg(color),
            ]);
        }

        let mut nodes = self.table();
        nodes.set_header(vec!["NODE", "ROLE", "STATUS", "PODS", "INTERNAL-IP"]);
        for node in &state.nodes {
            let pods = state
                .pods
                .iter()
                .filter(|p| p.node.as_deref() == Some(node.name.as_str()))
                .count();
            nodes.add_row(vec![
                Cell::new(&node.name),
                Cell::new(&node.roles),
                Cell::new(&node.status).fg(self.theme.get_status_color(&node.status)),
                Cell::new(pods).set_alignment(CellAlignment::Right),
                Cell::new(&node.internal_ip).fg(self.theme.info),
            ]);
        }

        let mut output = String::new();
        output.push_str(&self.banner(state));
        output.push_str(&summary.to_string());
        output.push('\n');
        output.push_str(&nodes.to_string());
        output.push('\n');
        output.push_str(&self.legend());
        output
    }

    fn banner(&self, state: &ClusterState) -> String {
        let count = format!("[{} nodes, {} pods]", state.nodes.len(), state.pods.len());
        if self.color {
            format!("╭─ Cluster Overview {} ─╮\n", count.bright_black())
        } else {
            format!("╭─ Cluster Overview {} ─╮\n", count)
        }
    }

    fn legend(&self) -> String {
        if self.color {
            format!(
                "Legend: {} Healthy  {} Degraded  {} Down\n",
                StatusIcon::SUCCESS.green(),
                StatusIcon::WARNING.yellow(),
                StatusIcon::ERROR.red()
            )
        } else {
            format!(
                "Legend: {} Healthy  {} Degraded  {} Down\n",
                StatusIcon::SUCCESS,
                StatusIcon::WARNING,
                StatusIcon::ERROR
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entropy::{Entropy, ManualClock};
    use crate::domain::store::ResourceStore;

    fn snapshot(nodes_ready: bool) -> ClusterState {
        ResourceStore::new(
            Entropy::seeded(1),
            Box::new(ManualClock::new(1_731_234_195_000)),
            nodes_ready,
        )
        .snapshot()
    }

    #[test]
    fn test_summarize_counts() {
        let rows = summarize(&snapshot(true));
        let nodes = rows.iter().find(|r| r.resource == "Nodes").unwrap();
        assert_eq!((nodes.healthy, nodes.total), (3, 3));
        let pods = rows.iter().find(|r| r.resource == "Pods").unwrap();
        assert_eq!(pods.total, 14);
    }

    #[test]
    fn test_render_without_color() {
        let output = OverviewRenderer::new(false).render(&snapshot(false));
        assert!(output.contains("Cluster Overview [3 nodes, 14 pods]"));
        assert!(output.contains("NotReady"));
        assert!(output.contains("node-3"));
        assert!(!output.contains("\u{1b}["));
    }
}
