// Domain layer - Check-in protocol logic
// No network or filesystem access; infrastructure performs the I/O

pub mod account;
pub mod check_in;
pub mod notification;
pub mod shared;

// Re-exports for convenience
pub use shared::{DomainError, ErrorCode};
