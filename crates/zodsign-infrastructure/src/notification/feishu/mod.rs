mod message_builder;
mod sender;

use reqwest::Client;

const FEISHU_HOOK_BASE: &str = "https://open.feishu.cn/open-apis/bot/v2/hook";

/// Feishu webhook notification sender
pub struct FeishuWebhookSender {
    webhook_key: String,
    base_url: String,
    client: Client,
}

impl FeishuWebhookSender {
    pub fn new(webhook_key: String, client: Client) -> Self {
        Self {
            webhook_key,
            base_url: FEISHU_HOOK_BASE.to_string(),
            client,
        }
    }

    /// Point the sender at another hook host (self-hosted relay, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_webhook_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.webhook_key
        )
    }
}
