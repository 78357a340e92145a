//! Color theme for CLI output

use crate::infrastructure::constants::{NODE_READY, POD_RUNNING};
use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub error: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            error: TableColor::Red,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Get color based on ready/total counts
    pub fn get_ready_color(&self, ready: usize, total: usize) -> TableColor {
        if total == 0 {
            self.muted
        } else if ready == total {
            self.success
        } else if ready > 0 {
            self.warning
        } else {
            self.error
        }
    }

    /// Get color for a node or pod status word
    pub fn get_status_color(&self, status: &str) -> TableColor {
        match status {
            NODE_READY | POD_RUNNING => self.success,
            "Pending" | "ContainerCreating" => self.warning,
            _ => self.error,
        }
    }
}
