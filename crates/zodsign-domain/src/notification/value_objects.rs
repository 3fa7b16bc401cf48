use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::DomainError;

pub const DEFAULT_NOTIFICATION_TITLE: &str = "ZodGame check-in results";

/// Channel type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    /// Feishu (Lark) bot webhook
    Feishu,
    /// Plain JSON webhook
    Webhook,
}

impl ChannelType {
    pub fn as_str(&self) -> &str {
        match self {
            ChannelType::Feishu => "feishu",
            ChannelType::Webhook => "webhook",
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Channel configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelConfig {
    /// Feishu webhook configuration
    Feishu { webhook_key: String },
    /// Generic webhook receiving `{"title", "content"}`
    Webhook { url: String },
}

impl ChannelConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            ChannelConfig::Feishu { webhook_key } => {
                if webhook_key.trim().is_empty() {
                    return Err(DomainError::Configuration(
                        "Feishu webhook_key cannot be empty".to_string(),
                    ));
                }
            }
            ChannelConfig::Webhook { url } => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(DomainError::Configuration(format!(
                        "Webhook url must be http(s): {}",
                        url
                    )));
                }
            }
        }
        Ok(())
    }

    /// Get channel type from config
    pub fn channel_type(&self) -> ChannelType {
        match self {
            ChannelConfig::Feishu { .. } => ChannelType::Feishu,
            ChannelConfig::Webhook { .. } => ChannelType::Webhook,
        }
    }
}

/// The `notification` block of the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelConfig>,
}

fn default_title() -> String {
    DEFAULT_NOTIFICATION_TITLE.to_string()
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            title: default_title(),
            channel: None,
        }
    }
}
