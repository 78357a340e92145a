//! Developer tasks for kubesim
//!
//! Usage: cargo run -p xtask -- <task>
//!
//! - check: fmt, clippy and the whole test suite
//! - test: unit and integration tests, optionally one suite only
//! - demo: replay a session from demos/ through the simulator
//! - demos: replay every demo and fail on the first erroring script

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use xshell::{cmd, Shell};

const DEMO_DIR: &str = "demos";
const DEFAULT_SEED: u64 = 42;

#[derive(Parser)]
#[command(name = "xtask", about = "Developer tasks for kubesim")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Clone, Copy, ValueEnum)]
enum Suite {
    /// Unit tests inside src/
    Unit,
    /// Scenario tests under tests/
    Scenarios,
}

#[derive(Subcommand)]
enum Task {
    /// Formatting, lints and tests, in that order
    Check,
    /// Run the test suite
    Test {
        #[arg(long, value_enum)]
        suite: Option<Suite>,
    },
    /// Replay one demo script
    Demo {
        /// Script name under demos/, without the .sh extension
        #[arg(default_value = "bootstrap")]
        name: String,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// Replay every demo script
    Demos {
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let root = workspace_root();
    let sh = Shell::new()?;
    sh.change_dir(&root);

    match cli.task {
        Task::Check => check(&sh),
        Task::Test { suite } => test(&sh, suite),
        Task::Demo { name, seed } => replay(&sh, &demo_path(&root, &name)?, seed),
        Task::Demos { seed } => {
            for script in demo_scripts(&root)? {
                replay(&sh, &script, seed)?;
            }
            Ok(())
        }
    }
}

fn check(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo fmt --all -- --check")
        .run()
        .context("formatting differs, run `cargo fmt --all`")?;
    cmd!(sh, "cargo clippy --workspace --all-targets -- -D warnings").run()?;
    test(sh, None)
}

fn test(sh: &Shell, suite: Option<Suite>) -> Result<()> {
    match suite {
        None => cmd!(sh, "cargo test -p kubesim").run()?,
        Some(Suite::Unit) => cmd!(sh, "cargo test -p kubesim --lib --bins").run()?,
        Some(Suite::Scenarios) => cmd!(sh, "cargo test -p kubesim --test kubectl_test --test tools_test").run()?,
    }
    Ok(())
}

/// Runs a script through the `script` sub-command, which exits non-zero
/// when any line errors.
fn replay(sh: &Shell, script: &Path, seed: u64) -> Result<()> {
    println!("==> {}", script.display());
    let seed = seed.to_string();
    cmd!(sh, "cargo run --quiet -p kubesim -- --seed {seed} --no-color script {script}")
        .run()
        .with_context(|| format!("demo {} failed", script.display()))?;
    Ok(())
}

fn demo_path(root: &Path, name: &str) -> Result<PathBuf> {
    let path = root.join(DEMO_DIR).join(format!("{}.sh", name));
    if !path.is_file() {
        anyhow::bail!("no demo named {} in {}", name, root.join(DEMO_DIR).display());
    }
    Ok(path)
}

fn demo_scripts(root: &Path) -> Result<Vec<PathBuf>> {
    let dir = root.join(DEMO_DIR);
    let mut scripts: Vec<PathBuf> = std::fs::read_dir(&dir)
        .with_context(|| format!("reading {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "sh"))
        .collect();
    scripts.sort();
    Ok(scripts)
}

fn workspace_root() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest.parent().unwrap_or(manifest).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_lookup() {
        let root = workspace_root();
        let path = demo_path(&root, "bootstrap").unwrap();
        assert!(path.ends_with("demos/bootstrap.sh"));
        assert!(demo_path(&root, "missing").is_err());
        assert!(demo_scripts(&root).unwrap().contains(&path));
    }
}
