use reqwest::Client;
use std::sync::Arc;

use zodsign_domain::notification::{
    ChannelConfig, NoopSender, NotificationConfig, NotificationSender,
};
use zodsign_domain::DomainError;

use super::feishu::FeishuWebhookSender;
use super::webhook::WebhookSender;
use crate::config::TimeoutConfig;

/// Create a notification sender based on the notification block.
///
/// Disabled notification, or an enabled block without a channel, yields a
/// no-op sender so the run never depends on the notifier being present.
pub fn create_sender(
    config: &NotificationConfig,
    timeouts: &TimeoutConfig,
) -> Result<Arc<dyn NotificationSender>, DomainError> {
    if !config.enabled {
        return Ok(Arc::new(NoopSender));
    }

    let Some(channel) = &config.channel else {
        log::warn!("Notification enabled but no channel configured, notifications are skipped");
        return Ok(Arc::new(NoopSender));
    };

    channel.validate()?;

    let client = Client::builder()
        .timeout(timeouts.notification_request)
        .build()
        .map_err(|e| DomainError::Notification(format!("Failed to create HTTP client: {}", e)))?;

    match channel {
        ChannelConfig::Feishu { webhook_key } => Ok(Arc::new(FeishuWebhookSender::new(
            webhook_key.clone(),
            client,
        ))),
        ChannelConfig::Webhook { url } => Ok(Arc::new(WebhookSender::new(url.clone(), client))),
    }
}
