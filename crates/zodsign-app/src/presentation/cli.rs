use clap::{Parser, Subcommand};
use std::path::PathBuf;

use zodsign_infrastructure::config::CONFIG_ENV_VAR;

/// Daily check-in for ZodGame forum accounts
#[derive(Debug, Parser)]
#[command(name = "zodsign", version, about)]
pub struct Cli {
    /// Configuration file
    #[arg(long, global = true, env = CONFIG_ENV_VAR, default_value = "config.json")]
    pub config: PathBuf,

    /// Log filter, e.g. `debug` or `zodsign_infrastructure=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Write daily-rotated JSON logs into this directory
    #[arg(long, global = true, env = "ZODSIGN_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Check in every enabled account (default)
    Run,
    /// Write a template configuration file if none exists
    Init,
    /// Send a test message through the configured notification channel
    TestNotify,
}

impl Cli {
    pub fn selected_command(&self) -> Command {
        self.command.unwrap_or(Command::Run)
    }
}
