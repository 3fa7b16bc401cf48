use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use zodsign_domain::notification::{NotificationMessage, NotificationSender};
use zodsign_domain::DomainError;

use super::delivery::{post_json, test_message};

/// Posts `{"title": ..., "content": ...}` to an arbitrary URL
pub struct WebhookSender {
    url: String,
    client: Client,
}

impl WebhookSender {
    pub fn new(url: String, client: Client) -> Self {
        Self { url, client }
    }
}

#[async_trait]
impl NotificationSender for WebhookSender {
    async fn send(&self, message: &NotificationMessage) -> Result<(), DomainError> {
        let payload = json!({
            "title": message.title,
            "content": message.content,
        });

        post_json(&self.client, "Webhook", &self.url, &payload).await?;
        Ok(())
    }

    async fn test(&self) -> Result<(), DomainError> {
        self.send(&test_message()).await
    }
}
