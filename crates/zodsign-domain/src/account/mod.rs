use serde::{Deserialize, Serialize};

use crate::check_in::Credential;
use crate::shared::DomainError;

/// A forum account as configured by the user.
///
/// Read-only to the check-in pipeline; the raw cookie string is only turned
/// into a [`Credential`] at the start of each attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AccountRecord")]
pub struct Account {
    name: String,
    cookie: String,
    enabled: bool,
}

/// Shape of an account entry in the configuration file
#[derive(Deserialize)]
struct AccountRecord {
    name: String,
    cookie: String,
    #[serde(default = "default_enabled")]
    enabled: bool,
}

impl TryFrom<AccountRecord> for Account {
    type Error = DomainError;

    fn try_from(record: AccountRecord) -> Result<Self, Self::Error> {
        Ok(Account::new(record.name, record.cookie)?.with_enabled(record.enabled))
    }
}

fn default_enabled() -> bool {
    true
}

impl Account {
    pub fn new(name: impl Into<String>, cookie: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Account name cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            name: name.trim().to_string(),
            cookie: cookie.into(),
            enabled: true,
        })
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cookie(&self) -> &str {
        &self.cookie
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Parse the stored cookie string into a fresh credential
    pub fn credential(&self) -> Credential {
        Credential::parse(&self.cookie)
    }
}
