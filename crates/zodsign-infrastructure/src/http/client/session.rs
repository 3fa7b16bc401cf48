use zodsign_domain::check_in::{Credential, FormHash, PageMarkers, SessionStatus};
use zodsign_domain::DomainError;

impl super::HttpClient {
    /// Probe the check-in page and decide whether the credential is still signed in.
    ///
    /// Never fails: transport errors yield [`SessionStatus::Unreachable`].
    pub async fn validate_session(
        &self,
        url: &str,
        credential: &Credential,
        markers: &PageMarkers,
    ) -> SessionStatus {
        match self.fetch_page(url, credential).await {
            Ok(page) => {
                let status = SessionStatus::classify(page.status, &page.body, markers);
                if !status.is_valid() {
                    log::warn!("Cookie rejected by {}: {}", url, status);
                }
                status
            }
            Err(e) => {
                log::warn!("Session check against {} failed: {}", url, e);
                SessionStatus::Unreachable(e.to_string())
            }
        }
    }

    /// Fetch the check-in page and extract its anti-forgery token
    pub async fn fetch_formhash(
        &self,
        url: &str,
        credential: &Credential,
    ) -> Result<FormHash, DomainError> {
        let page = self.fetch_page(url, credential).await?;
        let formhash = FormHash::extract(&page.body)?;
        log::debug!("Extracted formhash from {}", url);
        Ok(formhash)
    }
}
