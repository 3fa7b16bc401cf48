mod check_in;
mod session;
mod types;

pub use types::PageResponse;

use anyhow::{Context, Result};
use reqwest::Client;

use zodsign_domain::check_in::Credential;
use zodsign_domain::DomainError;

use crate::config::TimeoutConfig;
use types::{page_headers, transport_error, USER_AGENT};

/// Forum HTTP client shared by every account of a run.
///
/// The client keeps no cookie jar: each request carries the account's
/// credential explicitly, so nothing one account receives leaks into the
/// next one's requests.
pub struct HttpClient {
    pub(super) client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        Self::with_timeouts(&TimeoutConfig::default())
    }

    pub fn with_timeouts(timeouts: &TimeoutConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .gzip(true)
            .timeout(timeouts.http_request)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// GET a forum page with the credential attached
    pub async fn fetch_page(
        &self,
        url: &str,
        credential: &Credential,
    ) -> Result<PageResponse, DomainError> {
        let response = self
            .client
            .get(url)
            .headers(page_headers(credential)?)
            .send()
            .await
            .map_err(|e| transport_error("Failed to fetch page", e))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error("Failed to read page body", e))?;

        log::debug!(
            "Fetched {} (final URL {}): status {}, {} bytes",
            url,
            final_url,
            status,
            body.len()
        );

        Ok(PageResponse { status, body })
    }
}
