use anyhow::Result;
use log::{error, info};
use std::sync::Arc;

use zodsign_domain::notification::{NotificationConfig, NotificationMessage, NotificationSender};
use zodsign_domain::DomainError;
use zodsign_infrastructure::config::TimeoutConfig;
use zodsign_infrastructure::notification::create_sender;

/// Notification application service
/// Forwards run summaries to the configured sink without ever failing the run
pub struct NotificationService {
    sender: Arc<dyn NotificationSender>,
}

impl NotificationService {
    pub fn new(sender: Arc<dyn NotificationSender>) -> Self {
        Self { sender }
    }

    pub fn from_config(config: &NotificationConfig, timeouts: &TimeoutConfig) -> Result<Self> {
        Ok(Self::new(create_sender(config, timeouts)?))
    }

    /// Send one line per attempted account; nothing is sent for an empty list
    pub async fn notify_results(&self, title: &str, lines: &[String]) {
        if lines.is_empty() {
            info!("No check-in results, skipping notification");
            return;
        }

        let message = NotificationMessage::from_lines(title, lines);
        match self.sender.send(&message).await {
            Ok(()) => info!("Sent check-in summary ({} line(s))", lines.len()),
            Err(e) => error!("Failed to send notification: {}", e),
        }
    }

    /// Send the channel's test message
    pub async fn send_test(&self) -> Result<(), DomainError> {
        self.sender.test().await
    }
}
