//! Session executors behind the binary's sub-commands

use super::display::OverviewRenderer;
use crate::domain::config::SimulatorConf;
use crate::interpreter::Simulator;
use crate::shared::output::CommandOutput;
use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};

const EXIT_WORDS: [&str; 2] = ["exit", "quit"];
const OVERVIEW_WORD: &str = "overview";

fn print_output(output: &CommandOutput) {
    if output.output.is_empty() {
        return;
    }
    if output.is_error {
        println!("{}", output.output.red());
    } else {
        println!("{}", output.output);
    }
}

/// Lines worth executing: blank lines and `#` comments are dropped.
fn script_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

fn render_overview(simulator: &Simulator, conf: &SimulatorConf) -> String {
    OverviewRenderer::new(conf.color).render(&simulator.get_state())
}

#[derive(Parser, Debug, Clone)]
pub struct ReplCommand {}

impl ReplCommand {
    pub fn execute(&self, conf: &SimulatorConf) -> anyhow::Result<()> {
        let mut simulator = Simulator::from_conf(conf);
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        println!(
            "{}",
            "kubesim: type kubectl, helm or curl commands. 'overview' shows the cluster, 'exit' quits."
                .bright_black()
        );
        loop {
            print!("{}", conf.prompt);
            stdout.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                println!();
                break;
            }
            let line = line.trim();
            if EXIT_WORDS.contains(&line) {
                break;
            }
            if line == OVERVIEW_WORD {
                print!("{}", render_overview(&simulator, conf));
                continue;
            }
            print_output(&simulator.execute_command(line));
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct RunCommand {
    /// Command lines, e.g. "kubectl get pods -A"
    #[arg(required = true)]
    pub lines: Vec<String>,
}

impl RunCommand {
    pub fn execute(&self, conf: &SimulatorConf) -> anyhow::Result<()> {
        let mut simulator = Simulator::from_conf(conf);
        let mut failed = 0;
        for line in &self.lines {
            let output = simulator.execute_command(line);
            failed += usize::from(output.is_error);
            print_output(&output);
        }

        if failed > 0 {
            anyhow::bail!("{} of {} command(s) failed", failed, self.lines.len());
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ScriptCommand {
    /// File with one command line per line
    pub path: String,

    /// Stop at the first failing command
    #[arg(long)]
    pub fail_fast: bool,
}

impl ScriptCommand {
    pub fn execute(&self, conf: &SimulatorConf) -> anyhow::Result<()> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| anyhow::anyhow!("Failed to read script {}: {}", self.path, e))?;

        let mut simulator = Simulator::from_conf(conf);
        let mut failed = 0;
        for line in script_lines(&content) {
            println!("{}{}", conf.prompt.bright_black(), line);
            let output = simulator.execute_command(line);
            print_output(&output);
            if output.is_error {
                failed += 1;
                if self.fail_fast {
                    anyhow::bail!("Script stopped at failing command: {}", line);
                }
            }
        }

        if failed > 0 {
            anyhow::bail!("{} command(s) in {} failed", failed, self.path);
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct OverviewCommand {
    /// Run this script silently before rendering
    #[arg(long)]
    pub script: Option<String>,
}

impl OverviewCommand {
    pub fn execute(&self, conf: &SimulatorConf) -> anyhow::Result<()> {
        let mut simulator = Simulator::from_conf(conf);
        if let Some(path) = &self.script {
            let content = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read script {}: {}", path, e))?;
            for line in script_lines(&content) {
                simulator.execute_command(line);
            }
        }

        print!("{}", render_overview(&simulator, conf));
        Ok(())
    }
}
