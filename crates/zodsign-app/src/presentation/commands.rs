//! Subcommand handlers. Results go to stdout, diagnostics to the log.

use anyhow::{Context, Result};
use std::path::Path;

use zodsign_infrastructure::config::{load_or_create, AppConfig};

use crate::application::services::{
    BatchCheckInResult, CheckInExecutor, CheckInProgress, NotificationService,
};

/// Load the configuration, check in every enabled account and notify.
///
/// Per-account failures are reported, not returned; only configuration
/// problems make this fail.
pub async fn run_check_in(config_path: &Path) -> Result<BatchCheckInResult> {
    let loaded = load_or_create(config_path)?;
    if loaded.created {
        println!(
            "Created template configuration at {}; fill in the account cookies.",
            loaded.path.display()
        );
    }

    let config = loaded.config;
    config.validate()?;

    let executor = CheckInExecutor::new(&config.site)?;

    println!("\n======== starting check-in ========");
    let batch = executor
        .execute_batch_check_in_with_progress(&config.accounts, |progress| {
            if let Some(line) = progress_line(&progress) {
                println!("{}", line);
            }
        })
        .await;

    let lines = batch.lines();
    println!("\n======== check-in results ========");
    for line in &lines {
        println!("{}", line);
    }

    notify(&config, &lines).await;

    println!("\n======== check-in finished ========");
    Ok(batch)
}

/// Console line for a progress event; results are printed together afterwards
fn progress_line(progress: &CheckInProgress<'_>) -> Option<String> {
    match progress {
        CheckInProgress::Skipped { account_name } => Some(format!(
            "{}: ⚠️  account disabled, skipping check-in",
            account_name
        )),
        CheckInProgress::Started { account_name } => {
            Some(format!("{}: checking in...", account_name))
        }
        CheckInProgress::Finished { .. } => None,
    }
}

async fn notify(config: &AppConfig, lines: &[String]) {
    match NotificationService::from_config(&config.notification, &config.site.timeouts()) {
        Ok(service) => {
            service
                .notify_results(&config.notification.title, lines)
                .await
        }
        Err(e) => tracing::error!("Notification unavailable: {:#}", e),
    }
}

/// Write the template unless a configuration already exists
pub fn init_config(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!(
            "Configuration already exists at {}, leaving it untouched.",
            config_path.display()
        );
        return Ok(());
    }

    AppConfig::template()?
        .save_to(config_path)
        .context("Failed to write template configuration")?;
    println!("Created template configuration at {}", config_path.display());
    Ok(())
}

/// Send a test message through the configured channel
pub async fn test_notify(config_path: &Path) -> Result<()> {
    let config = AppConfig::load_from(config_path)?;

    if !config.notification.enabled {
        println!("Notification is disabled in {}", config_path.display());
        return Ok(());
    }

    let service = NotificationService::from_config(&config.notification, &config.site.timeouts())?;
    service
        .send_test()
        .await
        .context("Test notification failed")?;

    println!("Test notification sent");
    Ok(())
}
