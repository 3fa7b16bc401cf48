use serde::{Deserialize, Serialize};

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Session & Protocol (1xxx)
    TokenNotFound = 1001,
    InvalidResponse = 1002,

    // Configuration (2xxx)
    ConfigurationError = 2001,

    // Infrastructure (5xxx)
    TransportError = 5001,
    NotificationError = 5002,

    // Validation (6xxx)
    ValidationError = 6001,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Transient errors may go away on the next run; configuration errors never do
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::TransportError | ErrorCode::NotificationError | ErrorCode::InvalidResponse
        )
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("formhash not found on check-in page")]
    TokenNotFound,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Notification error: {0}")]
    Notification(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::TokenNotFound => ErrorCode::TokenNotFound,
            DomainError::Configuration(_) => ErrorCode::ConfigurationError,
            DomainError::Transport(_) => ErrorCode::TransportError,
            DomainError::InvalidResponse(_) => ErrorCode::InvalidResponse,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::Notification(_) => ErrorCode::NotificationError,
        }
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}
