use super::report::AccountReport;

/// Check-in result for a single account
#[derive(Debug, Clone)]
pub struct AccountCheckInResult {
    pub account_name: String,
    pub report: AccountReport,
}

impl AccountCheckInResult {
    pub fn success(&self) -> bool {
        self.report.is_checked_in()
    }

    /// One-line summary prefixed with the account name
    pub fn render(&self) -> String {
        self.report.render(&self.account_name)
    }
}

/// Batch check-in result
#[derive(Debug, Clone, Default)]
pub struct BatchCheckInResult {
    pub total: usize,
    pub success_count: usize,
    pub failed_count: usize,
    pub skipped_count: usize,
    /// Names of disabled accounts, in configured order
    pub skipped_accounts: Vec<String>,
    pub results: Vec<AccountCheckInResult>,
}

impl BatchCheckInResult {
    /// Result lines of the accounts that were attempted
    pub fn lines(&self) -> Vec<String> {
        self.results.iter().map(AccountCheckInResult::render).collect()
    }
}

/// Per-account progress of a batch, in configured order
#[derive(Debug, Clone, Copy)]
pub enum CheckInProgress<'a> {
    /// The account is disabled and will not be attempted
    Skipped { account_name: &'a str },
    Started { account_name: &'a str },
    Finished { result: &'a AccountCheckInResult },
}
