// CLI command definitions

use super::session::{OverviewCommand, ReplCommand, RunCommand, ScriptCommand};
use crate::domain::config::SimulatorConf;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "kubesim",
    version,
    about = "In-memory kubectl and helm simulator",
    long_about = "A sandboxed cluster for practising kubectl, helm and bootstrap scripts without a real Kubernetes API server"
)]
pub struct CliArgs {
    /// Path to a simulator configuration file (TOML)
    #[arg(long, global = true, env = "KUBESIM_CONFIG")]
    pub config: Option<String>,

    /// Seed for generated names, IPs and node placement (overrides the config file)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Interactive session reading command lines from stdin
    Repl(ReplCommand),

    /// Execute each argument as a command line
    Run(RunCommand),

    /// Execute a file of command lines
    Script(ScriptCommand),

    /// Print the cluster overview
    Overview(OverviewCommand),
}

impl CliArgs {
    /// Loads the config file, if any, then applies flag overrides.
    pub fn load_conf(&self) -> anyhow::Result<SimulatorConf> {
        let mut conf = match &self.config {
            Some(path) => SimulatorConf::from(path)
                .map_err(|e| anyhow::anyhow!("Failed to load configuration from {}: {}", path, e))?,
            None => SimulatorConf::default(),
        };

        if self.seed.is_some() {
            conf.seed = self.seed;
        }
        if self.no_color {
            conf.color = false;
        }
        Ok(conf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 7\ncolor = true").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let args = CliArgs::parse_from([
            "kubesim",
            "--config",
            path.as_str(),
            "--seed",
            "9",
            "--no-color",
            "run",
            "kubectl get nodes",
        ]);
        let conf = args.load_conf().unwrap();
        assert_eq!(conf.seed, Some(9));
        assert!(!conf.color);
    }

    #[test]
    fn test_missing_config_file() {
        let args = CliArgs::parse_from(["kubesim", "--config", "/nonexistent/kubesim.toml", "overview"]);
        let err = args.load_conf().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/kubesim.toml"));
    }
}
