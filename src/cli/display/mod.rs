//! Display module for formatted CLI output

pub mod colors;
pub mod describe;
pub mod format;
pub mod icons;
pub mod overview;
pub mod table;
pub mod yaml;

pub use colors::ColorTheme;
pub use format::{Document, OutputFormat};
pub use icons::StatusIcon;
pub use overview::OverviewRenderer;
pub use table::{render_table, Column, TableOptions, Tabular};
