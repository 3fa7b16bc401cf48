use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

/// Mood codes accepted by the dsu_paulsign check-in plugin
pub const DEFAULT_MOODS: &[&str] = &["kx", "ng", "ym", "wl", "nu", "ch", "fd", "yl", "shuai"];

/// Catalog of mood tags submitted alongside a check-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodCatalog(Vec<String>);

impl MoodCatalog {
    pub fn new(moods: Vec<String>) -> Self {
        Self(moods)
    }

    pub fn moods(&self) -> &[String] {
        &self.0
    }

    /// Pick one mood uniformly at random.
    ///
    /// An empty catalog is a configuration mistake, not a transient failure.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&str, DomainError> {
        self.0
            .choose(rng)
            .map(String::as_str)
            .ok_or_else(|| DomainError::Configuration("mood catalog cannot be empty".to_string()))
    }
}

impl Default for MoodCatalog {
    fn default() -> Self {
        Self(DEFAULT_MOODS.iter().map(|m| m.to_string()).collect())
    }
}
