use zodsign_domain::check_in::{CheckInOutcome, SessionStatus};
use zodsign_domain::DomainError;

/// How one account's attempt ended
#[derive(Debug, Clone, PartialEq)]
pub enum AccountReport {
    /// The reply was interpreted
    Outcome(CheckInOutcome),
    /// The credential did not open the check-in page
    InvalidSession(SessionStatus),
    /// A step failed before the reply could be interpreted
    Error(DomainError),
}

impl AccountReport {
    /// Success and duplicate both leave the account checked in for today
    pub fn is_checked_in(&self) -> bool {
        matches!(self, AccountReport::Outcome(outcome) if outcome.is_checked_in())
    }

    pub fn render(&self, account_name: &str) -> String {
        match self {
            AccountReport::Outcome(CheckInOutcome::Success { reward }) => format!(
                "{}: ✅ check-in succeeded, random reward {}",
                account_name, reward
            ),
            AccountReport::Outcome(CheckInOutcome::Duplicate { message }) => {
                format!("{}: ✅ {}", account_name, message)
            }
            AccountReport::Outcome(CheckInOutcome::Failed { message })
            | AccountReport::Outcome(CheckInOutcome::Unknown { message }) => {
                format!("{}: ❌ check-in failed: {}", account_name, message)
            }
            AccountReport::InvalidSession(status) => {
                format!("{}: ❌ cookie invalid ({})", account_name, status)
            }
            AccountReport::Error(error) => {
                format!("{}: ❌ check-in error: {}", account_name, error)
            }
        }
    }
}
