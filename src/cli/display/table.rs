//! Fixed-width table rendering for `get` style output.
//!
//! Every kind declares its columns as data. Each column but the last is
//! padded to its width and followed by one space; the last column is never
//! padded. Header and rows share the same spec, so column start offsets are
//! stable and scripts can slice them.

use crate::domain::age::{format_age, rfc3339};
use crate::domain::model::{Crd, CustomResource, Deployment, Namespace, Node, Pod, Release, Service};
use crate::infrastructure::constants::NONE;

const NAMESPACE_WIDTH: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub width: usize,
}

pub const fn col(header: &'static str, width: usize) -> Column {
    Column { header, width }
}

/// A record that knows its table layout.
pub trait Tabular {
    fn columns(wide: bool) -> Vec<Column>;

    fn cells(&self, now_ms: i64, wide: bool) -> Vec<String>;

    /// Namespace shown in the prepended NAMESPACE column.
    fn namespace(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TableOptions<'a> {
    pub wide: bool,
    /// Prepends a NAMESPACE column, as `--all-namespaces` does.
    pub with_namespace: bool,
    /// Prepended to every NAME cell, e.g. `pod/` in `get all`.
    pub name_prefix: &'a str,
}

/// Renders header plus rows. No trailing newline.
pub fn render_rows(columns: &[Column], rows: &[Vec<String>]) -> String {
    let header: Vec<String> = columns.iter().map(|c| c.header.to_string()).collect();
    std::iter::once(&header)
        .chain(rows.iter())
        .map(|cells| render_line(columns, cells))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_line(columns: &[Column], cells: &[String]) -> String {
    let last = cells.len().saturating_sub(1);
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i == last {
            line.push_str(cell);
        } else {
            let width = columns.get(i).map_or(0, |c| c.width);
            line.push_str(&format!("{:<width$} ", cell, width = width));
        }
    }
    line
}

pub fn render_table<T: Tabular>(items: &[&T], now_ms: i64, options: &TableOptions<'_>) -> String {
    let mut columns = T::columns(options.wide);
    if let Some(name) = columns.first_mut() {
        name.width += options.name_prefix.len();
    }
    if options.with_namespace {
        columns.insert(0, col("NAMESPACE", NAMESPACE_WIDTH));
    }

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            let mut cells = item.cells(now_ms, options.wide);
            if let Some(name) = cells.first_mut() {
                name.insert_str(0, options.name_prefix);
            }
            if options.with_namespace {
                cells.insert(0, item.namespace().unwrap_or_default().to_string());
            }
            cells
        })
        .collect();

    render_rows(&columns, &rows)
}

impl Tabular for Node {
    fn columns(wide: bool) -> Vec<Column> {
        let mut columns = vec![
            col("NAME", 8),
            col("STATUS", 8),
            col("ROLES", 15),
            col("AGE", 5),
            col("VERSION", 10),
        ];
        if wide {
            columns.extend([
                col("INTERNAL-IP", 15),
                col("EXTERNAL-IP", 13),
                col("OS-IMAGE", 20),
                col("KERNEL-VERSION", 19),
                col("CONTAINER-RUNTIME", 0),
            ]);
        }
        columns
    }

    fn cells(&self, now_ms: i64, wide: bool) -> Vec<String> {
        let mut cells = vec![
            self.name.clone(),
            self.status.clone(),
            self.roles.clone(),
            format_age(self.creation_timestamp, now_ms),
            self.version.clone(),
        ];
        if wide {
            cells.extend([
                self.internal_ip.clone(),
                NONE.to_string(),
                self.os_image.clone(),
                self.kernel_version.clone(),
                self.container_runtime.clone(),
            ]);
        }
        cells
    }
}

impl Tabular for Pod {
    fn columns(wide: bool) -> Vec<Column> {
        let mut columns = vec![
            col("NAME", 41),
            col("READY", 7),
            col("STATUS", 9),
            col("RESTARTS", 10),
            col("AGE", 5),
        ];
        if wide {
            columns.extend([
                col("IP", 14),
                col("NODE", 10),
                col("NOMINATED NODE", 16),
                col("READINESS GATES", 0),
            ]);
        }
        columns
    }

    fn cells(&self, now_ms: i64, wide: bool) -> Vec<String> {
        let mut cells = vec![
            self.name.clone(),
            self.ready.clone(),
            self.status.clone(),
            self.restarts.to_string(),
            format_age(self.creation_timestamp, now_ms),
        ];
        if wide {
            cells.extend([
                self.ip_or_none().to_string(),
                self.node_or_none().to_string(),
                NONE.to_string(),
                NONE.to_string(),
            ]);
        }
        cells
    }

    fn namespace(&self) -> Option<&str> {
        Some(&self.namespace)
    }
}

impl Tabular for Deployment {
    fn columns(wide: bool) -> Vec<Column> {
        let mut columns = vec![
            col("NAME", 19),
            col("READY", 7),
            col("UP-TO-DATE", 12),
            col("AVAILABLE", 11),
            col("AGE", 5),
        ];
        if wide {
            columns.extend([
                col("CONTAINERS", 20),
                col("IMAGES", 40),
                col("SELECTOR", 0),
            ]);
        }
        columns
    }

    fn cells(&self, now_ms: i64, wide: bool) -> Vec<String> {
        let mut cells = vec![
            self.name.clone(),
            self.ready(),
            self.up_to_date.to_string(),
            self.available.to_string(),
            format_age(self.creation_timestamp, now_ms),
        ];
        if wide {
            cells.extend([
                self.container_name().to_string(),
                self.image.clone(),
                self.selector(),
            ]);
        }
        cells
    }

    fn namespace(&self) -> Option<&str> {
        Some(&self.namespace)
    }
}

impl Tabular for Service {
    fn columns(wide: bool) -> Vec<Column> {
        let mut columns = vec![
            col("NAME", 17),
            col("TYPE", 14),
            col("CLUSTER-IP", 15),
            col("EXTERNAL-IP", 15),
            col("PORT(S)", 28),
            col("AGE", 5),
        ];
        if wide {
            columns.push(col("SELECTOR", 0));
        }
        columns
    }

    fn cells(&self, now_ms: i64, wide: bool) -> Vec<String> {
        let mut cells = vec![
            self.name.clone(),
            self.service_type.as_str().to_string(),
            self.cluster_ip.clone(),
            self.external_ip.clone(),
            self.ports.clone(),
            format_age(self.creation_timestamp, now_ms),
        ];
        if wide {
            cells.push(self.selector_or_none().to_string());
        }
        cells
    }

    fn namespace(&self) -> Option<&str> {
        Some(&self.namespace)
    }
}

impl Tabular for Namespace {
    fn columns(_wide: bool) -> Vec<Column> {
        vec![col("NAME", 18), col("STATUS", 8), col("AGE", 0)]
    }

    fn cells(&self, now_ms: i64, _wide: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            self.status.clone(),
            format_age(self.creation_timestamp, now_ms),
        ]
    }
}

impl Tabular for Crd {
    fn columns(_wide: bool) -> Vec<Column> {
        vec![col("NAME", 45), col("CREATED AT", 0)]
    }

    fn cells(&self, _now_ms: i64, _wide: bool) -> Vec<String> {
        vec![self.name.clone(), rfc3339(self.creation_timestamp)]
    }
}

impl Tabular for CustomResource {
    fn columns(_wide: bool) -> Vec<Column> {
        vec![col("NAME", 24), col("AGE", 0)]
    }

    fn cells(&self, now_ms: i64, _wide: bool) -> Vec<String> {
        vec![
            self.name().to_string(),
            format_age(self.metadata.creation_timestamp, now_ms),
        ]
    }

    fn namespace(&self) -> Option<&str> {
        CustomResource::namespace(self)
    }
}

/// `helm list` layout. NAMESPACE is a native column here.
impl Tabular for Release {
    fn columns(_wide: bool) -> Vec<Column> {
        vec![
            col("NAME", 20),
            col("NAMESPACE", 16),
            col("REVISION", 9),
            col("UPDATED", 40),
            col("STATUS", 9),
            col("CHART", 32),
            col("APP VERSION", 0),
        ]
    }

    fn cells(&self, _now_ms: i64, _wide: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            self.namespace.clone(),
            self.revision.to_string(),
            self.updated.clone(),
            self.status.clone(),
            self.chart.clone(),
            self.app_version.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed::initial_cluster;

    const NOW: i64 = 1_731_234_195_000;

    #[test]
    fn test_last_column_is_not_padded() {
        let columns = [col("A", 4), col("B", 10)];
        let out = render_rows(&columns, &[vec!["x".to_string(), "y".to_string()]]);
        assert_eq!(out, "A    B\nx    y");
    }

    #[test]
    fn test_overflowing_cell_is_not_truncated() {
        let columns = [col("A", 2), col("B", 0)];
        let out = render_rows(&columns, &[vec!["long".to_string(), "y".to_string()]]);
        assert_eq!(out.lines().nth(1), Some("long y"));
    }

    #[test]
    fn test_node_header_offsets() {
        let fixture = initial_cluster(NOW, true);
        let nodes: Vec<&Node> = fixture.nodes.iter().collect();
        let out = render_table(&nodes, NOW, &TableOptions::default());
        let header = out.lines().next().unwrap();

        assert_eq!(header, "NAME     STATUS   ROLES           AGE   VERSION");
        assert_eq!(out.lines().nth(1).unwrap(), "node-1   Ready    control-plane   45d   v1.28.3");
    }

    #[test]
    fn test_namespace_column_prepended() {
        let fixture = initial_cluster(NOW, true);
        let pods: Vec<&Pod> = fixture.pods.iter().collect();
        let out = render_table(
            &pods,
            NOW,
            &TableOptions {
                with_namespace: true,
                ..TableOptions::default()
            },
        );
        let header = out.lines().next().unwrap();

        assert!(header.starts_with("NAMESPACE     NAME"));
        assert_eq!(header.find("READY"), Some(14 + 42));
        assert!(out.lines().nth(1).unwrap().starts_with("default       nginx-deployment-"));
    }

    #[test]
    fn test_name_prefix_widens_name_column() {
        let fixture = initial_cluster(NOW, true);
        let deployments: Vec<&Deployment> = fixture.deployments.iter().take(1).collect();
        let out = render_table(
            &deployments,
            NOW,
            &TableOptions {
                name_prefix: "deployment.apps/",
                ..TableOptions::default()
            },
        );
        let mut lines = out.lines();
        let header = lines.next().unwrap();
        let row = lines.next().unwrap();

        assert_eq!(header.find("READY"), Some(36));
        assert_eq!(row.find("2/2"), Some(36));
        assert!(row.starts_with("deployment.apps/nginx-deployment"));
    }

    #[test]
    fn test_pod_wide_columns() {
        let fixture = initial_cluster(NOW, true);
        let pods: Vec<&Pod> = fixture.pods.iter().take(1).collect();
        let out = render_table(
            &pods,
            NOW,
            &TableOptions {
                wide: true,
                ..TableOptions::default()
            },
        );

        assert_eq!(
            out.lines().next().unwrap(),
            "NAME                                      READY   STATUS    RESTARTS   AGE   IP             NODE       NOMINATED NODE   READINESS GATES"
        );
        assert!(out.lines().nth(1).unwrap().ends_with("node-2     <none>           <none>"));
    }
}
