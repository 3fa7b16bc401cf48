use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

/// Notification message to be sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Message title
    pub title: String,
    /// Message content/body
    pub content: String,
}

impl NotificationMessage {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// One line per result, each terminated by a newline
    pub fn from_lines<S: AsRef<str>>(title: impl Into<String>, lines: &[S]) -> Self {
        let content = lines.iter().fold(String::new(), |mut acc, line| {
            acc.push_str(line.as_ref());
            acc.push('\n');
            acc
        });
        Self::new(title, content)
    }
}

/// Notification sender trait (Strategy pattern)
/// Each notification channel type implements this trait
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Send a notification message
    async fn send(&self, message: &NotificationMessage) -> Result<(), DomainError>;

    /// Test the notification channel connectivity
    async fn test(&self) -> Result<(), DomainError>;
}

/// Sender used when notifications are disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSender;

#[async_trait]
impl NotificationSender for NoopSender {
    async fn send(&self, _message: &NotificationMessage) -> Result<(), DomainError> {
        Ok(())
    }

    async fn test(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
