use serde::{Deserialize, Serialize};
use std::fmt;

/// Reward granted by a successful check-in, e.g. `酱油 4 瓶`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub item: String,
    pub count: u64,
    pub unit: String,
}

impl fmt::Display for Reward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.item, self.count, self.unit)
    }
}

/// Classified server reply to a check-in submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckInOutcome {
    Success { reward: Reward },
    Duplicate { message: String },
    Failed { message: String },
    Unknown { message: String },
}

impl CheckInOutcome {
    pub fn success(item: impl Into<String>, count: u64, unit: impl Into<String>) -> Self {
        CheckInOutcome::Success {
            reward: Reward {
                item: item.into(),
                count,
                unit: unit.into(),
            },
        }
    }

    /// Success and Duplicate both mean the account is checked in for today
    pub fn is_checked_in(&self) -> bool {
        matches!(
            self,
            CheckInOutcome::Success { .. } | CheckInOutcome::Duplicate { .. }
        )
    }

    pub fn reward(&self) -> Option<&Reward> {
        match self {
            CheckInOutcome::Success { reward } => Some(reward),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            CheckInOutcome::Success { .. } => None,
            CheckInOutcome::Duplicate { message }
            | CheckInOutcome::Failed { message }
            | CheckInOutcome::Unknown { message } => Some(message),
        }
    }
}
