use async_trait::async_trait;
use serde::Deserialize;

use zodsign_domain::notification::{NotificationMessage, NotificationSender};
use zodsign_domain::DomainError;

use super::super::delivery::{post_json, test_message};

/// Bot webhook reply; `code` 0 means delivered
#[derive(Debug, Deserialize)]
struct HookReply {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    msg: Option<String>,
}

#[async_trait]
impl NotificationSender for super::FeishuWebhookSender {
    async fn send(&self, message: &NotificationMessage) -> Result<(), DomainError> {
        let response = post_json(
            &self.client,
            "Feishu webhook",
            &self.build_webhook_url(),
            &self.build_payload(message),
        )
        .await?;

        let reply: HookReply = response.json().await.map_err(|e| {
            DomainError::Notification(format!("Unreadable Feishu reply: {}", e))
        })?;

        match reply.code {
            0 => Ok(()),
            code => Err(DomainError::Notification(format!(
                "Feishu webhook error code {}: {}",
                code,
                reply.msg.as_deref().unwrap_or("unknown error")
            ))),
        }
    }

    async fn test(&self) -> Result<(), DomainError> {
        self.send(&test_message()).await
    }
}
