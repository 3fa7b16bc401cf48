use log::{info, warn};
use tracing::instrument;

use zodsign_domain::account::Account;

use super::types::{AccountCheckInResult, BatchCheckInResult, CheckInProgress};
use super::CheckInExecutor;

impl CheckInExecutor {
    /// Check in every enabled account, one at a time, in configured order
    pub async fn execute_batch_check_in(&self, accounts: &[Account]) -> BatchCheckInResult {
        self.execute_batch_check_in_with_progress(accounts, |_| {})
            .await
    }

    /// Same as [`Self::execute_batch_check_in`], reporting each account as it is reached
    #[instrument(skip_all, fields(batch_size = accounts.len()))]
    pub async fn execute_batch_check_in_with_progress<F>(
        &self,
        accounts: &[Account],
        mut on_progress: F,
    ) -> BatchCheckInResult
    where
        F: FnMut(CheckInProgress<'_>),
    {
        let mut batch = BatchCheckInResult {
            total: accounts.len(),
            ..BatchCheckInResult::default()
        };

        for account in accounts {
            if !account.is_enabled() {
                info!("[{}] Account disabled, skipping check-in", account.name());
                on_progress(CheckInProgress::Skipped {
                    account_name: account.name(),
                });
                batch.skipped_count += 1;
                batch.skipped_accounts.push(account.name().to_string());
                continue;
            }

            on_progress(CheckInProgress::Started {
                account_name: account.name(),
            });
            let result = self.execute_check_in(account).await;
            on_progress(CheckInProgress::Finished { result: &result });

            record(&mut batch, result);
        }

        info!(
            "Batch check-in finished: {} succeeded, {} failed, {} skipped",
            batch.success_count, batch.failed_count, batch.skipped_count
        );

        batch
    }
}

fn record(batch: &mut BatchCheckInResult, result: AccountCheckInResult) {
    if result.success() {
        batch.success_count += 1;
    } else {
        warn!("[{}] Check-in did not succeed", result.account_name);
        batch.failed_count += 1;
    }
    batch.results.push(result);
}
