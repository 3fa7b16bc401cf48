use log::{info, warn};
use tracing::instrument;

use zodsign_domain::account::Account;
use zodsign_domain::DomainError;

use super::report::AccountReport;
use super::types::AccountCheckInResult;
use super::CheckInExecutor;

impl CheckInExecutor {
    /// Execute check-in for a single account.
    ///
    /// Never fails: every error ends up in the returned report.
    #[instrument(skip(self, account), fields(account = %account.name()))]
    pub async fn execute_check_in(&self, account: &Account) -> AccountCheckInResult {
        let account_name = account.name().to_string();
        info!("[{}] Starting check-in", account_name);

        let report = match self.run_pipeline(account).await {
            Ok(report) => report,
            Err(e) => {
                warn!("[{}] Check-in aborted: {}", account_name, e.format_with_code());
                AccountReport::Error(e)
            }
        };

        AccountCheckInResult {
            account_name,
            report,
        }
    }

    /// Session check, token, mood, submission, interpretation
    async fn run_pipeline(&self, account: &Account) -> Result<AccountReport, DomainError> {
        let credential = account.credential();

        let status = self
            .http_client
            .validate_session(&self.sign_page_url, &credential, &self.markers)
            .await;
        if !status.is_valid() {
            return Ok(AccountReport::InvalidSession(status));
        }

        let formhash = self
            .http_client
            .fetch_formhash(&self.sign_page_url, &credential)
            .await?;

        let mood = self.moods.pick(&mut rand::thread_rng())?.to_string();
        info!("[{}] Submitting check-in with mood {}", account.name(), mood);

        let body = self
            .http_client
            .submit_check_in(&self.check_in_url, &credential, &formhash, &mood)
            .await?;

        let outcome = self.interpreter.interpret(&body);
        info!("[{}] Check-in outcome: {:?}", account.name(), outcome);

        Ok(AccountReport::Outcome(outcome))
    }
}
