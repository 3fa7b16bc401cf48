use anyhow::{Context, Result};

use zodsign_domain::check_in::{MoodCatalog, PageMarkers, ResponseInterpreter};
use zodsign_infrastructure::config::SiteConfig;
use zodsign_infrastructure::http::HttpClient;

mod batch;
mod execution;
mod report;
mod types;

pub use report::AccountReport;
pub use types::{AccountCheckInResult, BatchCheckInResult, CheckInProgress};

/// Check-in executor service
///
/// Owns the one HTTP client shared by every account of a run, plus the
/// site conventions each pipeline step needs.
pub struct CheckInExecutor {
    http_client: HttpClient,
    sign_page_url: String,
    check_in_url: String,
    markers: PageMarkers,
    moods: MoodCatalog,
    interpreter: ResponseInterpreter,
}

impl CheckInExecutor {
    pub fn new(site: &SiteConfig) -> Result<Self> {
        let http_client = HttpClient::with_timeouts(&site.timeouts())?;
        Self::with_http_client(http_client, site)
    }

    pub fn with_http_client(http_client: HttpClient, site: &SiteConfig) -> Result<Self> {
        let interpreter = ResponseInterpreter::new(site.phrases.clone())
            .context("Invalid check-in response phrases")?;

        Ok(Self {
            http_client,
            sign_page_url: site.sign_page_url.clone(),
            check_in_url: site.check_in_url.clone(),
            markers: site.markers(),
            moods: site.moods.clone(),
            interpreter,
        })
    }
}
