//! Configuration file support.
//!
//! The configuration is a JSON document holding the account list, the
//! notification block and optional site overrides. A template is written
//! when the file does not exist yet.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use zodsign_domain::account::Account;
use zodsign_domain::check_in::{
    MoodCatalog, PageMarkers, ResponsePhrases, DEFAULT_AUTHENTICATED_MARKER,
    DEFAULT_UNAUTHENTICATED_MARKER,
};
use zodsign_domain::notification::NotificationConfig;
use zodsign_domain::DomainError;

use super::TimeoutConfig;

/// Environment variable overriding the configuration file location
pub const CONFIG_ENV_VAR: &str = "ZODGAME_CONFIG_PATH";

pub const DEFAULT_SIGN_PAGE_URL: &str = "https://zodgame.xyz/plugin.php?id=dsu_paulsign:sign";
pub const DEFAULT_CHECK_IN_URL: &str =
    "https://zodgame.xyz/plugin.php?id=dsu_paulsign:sign&operation=qiandao&infloat=1&inajax=1";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub accounts: Vec<Account>,

    #[serde(default)]
    pub notification: NotificationConfig,

    #[serde(default, skip_serializing_if = "SiteConfig::is_default")]
    pub site: SiteConfig,
}

/// Forum endpoints and page conventions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub sign_page_url: String,
    pub check_in_url: String,
    pub authenticated_marker: String,
    pub unauthenticated_marker: String,
    pub moods: MoodCatalog,
    pub phrases: ResponsePhrases,
    pub request_timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            sign_page_url: DEFAULT_SIGN_PAGE_URL.to_string(),
            check_in_url: DEFAULT_CHECK_IN_URL.to_string(),
            authenticated_marker: DEFAULT_AUTHENTICATED_MARKER.to_string(),
            unauthenticated_marker: DEFAULT_UNAUTHENTICATED_MARKER.to_string(),
            moods: MoodCatalog::default(),
            phrases: ResponsePhrases::default(),
            request_timeout_secs: 10,
        }
    }
}

impl SiteConfig {
    fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn markers(&self) -> PageMarkers {
        PageMarkers {
            authenticated: self.authenticated_marker.clone(),
            unauthenticated: self.unauthenticated_marker.clone(),
        }
    }

    pub fn timeouts(&self) -> TimeoutConfig {
        TimeoutConfig::new().with_http_request(Duration::from_secs(self.request_timeout_secs))
    }
}

impl AppConfig {
    /// Template written when no configuration file exists
    pub fn template() -> Result<Self> {
        Ok(Self {
            accounts: vec![
                Account::new("account-1", "")?,
                Account::new("account-2", "")?.with_enabled(false),
            ],
            notification: NotificationConfig::default(),
            site: SiteConfig::default(),
        })
    }

    /// Reject configurations the run cannot proceed with
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.accounts.is_empty() {
            return Err(DomainError::Configuration(
                "no accounts found in configuration".to_string(),
            ));
        }
        if self.site.request_timeout_secs == 0 {
            return Err(DomainError::Configuration(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Config file {} is not valid JSON", path.display()))?;
        tracing::info!(path = %path.display(), accounts = config.accounts.len(), "Loaded config");
        Ok(config)
    }

    /// Save configuration to a specific path (2-space indented JSON)
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to create config file {}", path.display()))?;
        tracing::info!(path = %path.display(), "Saved config");
        Ok(())
    }
}

/// Outcome of [`load_or_create`]
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub path: PathBuf,
    /// The template was written because the file did not exist
    pub created: bool,
}

/// Load the configuration, writing the template first if the file is missing
pub fn load_or_create(path: &Path) -> Result<LoadedConfig> {
    if path.exists() {
        return Ok(LoadedConfig {
            config: AppConfig::load_from(path)?,
            path: path.to_path_buf(),
            created: false,
        });
    }

    let config = AppConfig::template()?;
    config.save_to(path)?;
    tracing::warn!(path = %path.display(), "Config file not found, created template");

    Ok(LoadedConfig {
        config,
        path: path.to_path_buf(),
        created: true,
    })
}
