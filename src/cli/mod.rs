pub mod commands;
pub mod display;
pub mod session;

pub use commands::{CliArgs, Commands};
