pub mod check_in_executor;
pub mod notification_service;

pub use check_in_executor::{
    AccountCheckInResult, AccountReport, BatchCheckInResult, CheckInExecutor, CheckInProgress,
};
pub use notification_service::NotificationService;
