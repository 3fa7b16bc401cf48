use zodsign_domain::check_in::{Credential, FormHash};
use zodsign_domain::DomainError;

use super::types::{check_in_headers, transport_error, truncate};

impl super::HttpClient {
    /// Submit the check-in form and return the raw reply body.
    ///
    /// The body is not interpreted here; a non-2xx status is a transport error.
    pub async fn submit_check_in(
        &self,
        url: &str,
        credential: &Credential,
        formhash: &FormHash,
        mood: &str,
    ) -> Result<String, DomainError> {
        let form = [("formhash", formhash.as_str()), ("qdxq", mood)];

        let response = self
            .client
            .post(url)
            .headers(check_in_headers(url, credential)?)
            .form(&form)
            .send()
            .await
            .map_err(|e| transport_error("Failed to send check-in request", e))?;

        let status = response.status();
        log::info!("Check-in response status: {}", status);

        let text = response
            .text()
            .await
            .map_err(|e| transport_error("Failed to read check-in response", e))?;

        if !status.is_success() {
            log::error!(
                "Check-in request failed with status {}: {}",
                status,
                truncate(&text, 200)
            );
            return Err(DomainError::Transport(format!(
                "check-in request failed with status {}",
                status
            )));
        }

        log::debug!("Check-in response body: {}", text);
        Ok(text)
    }
}
