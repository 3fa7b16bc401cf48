use std::time::Duration;

/// Timeouts applied to outbound requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Forum page and check-in requests (default: 10 seconds)
    pub http_request: Duration,

    /// Notification webhook requests (default: 10 seconds)
    pub notification_request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            http_request: Duration::from_secs(10),
            notification_request: Duration::from_secs(10),
        }
    }
}

impl TimeoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set forum request timeout
    pub fn with_http_request(mut self, duration: Duration) -> Self {
        self.http_request = duration;
        self
    }

    /// Builder pattern: set notification request timeout
    pub fn with_notification_request(mut self, duration: Duration) -> Self {
        self.notification_request = duration;
        self
    }
}
