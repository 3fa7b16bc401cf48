use clap::Parser;
use std::process::ExitCode;

use zodsign_app::presentation::cli::{Cli, Command};
use zodsign_app::presentation::commands;
use zodsign_infrastructure::logging::{init_logger, LoggerOptions};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logger(LoggerOptions {
        level: cli.log_level.clone(),
        log_dir: cli.log_dir.clone(),
    }) {
        eprintln!("⚠️  Failed to initialize logging: {:#}", e);
    }

    let result = match cli.selected_command() {
        Command::Run => commands::run_check_in(&cli.config).await.map(|_| ()),
        Command::Init => commands::init_config(&cli.config),
        Command::TestNotify => commands::test_notify(&cli.config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}
