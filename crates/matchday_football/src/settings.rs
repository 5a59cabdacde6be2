//! Cache configuration.
//!
//! Settings are loaded from TOML with the following precedence (later sources
//! override earlier ones, key by key):
//! 1. Bundled defaults (`matchday.toml` shipped with the library)
//! 2. `~/.config/matchday/matchday.toml`
//! 3. `./matchday.toml`

use config::{Config, File, FileFormat};
use matchday_cache::ExpiringStoreConfig;
use matchday_error::{ConfigError, MatchdayError, MatchdayResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../matchday.toml");

/// Validity and capacity of every football cache.
///
/// Missing sections fall back to [`CacheSettings::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Share one upstream call between concurrent misses for the same key
    pub coalesce_requests: bool,

    /// Interval of the background sweep; `None` evicts only on read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purge_interval_secs: Option<u64>,

    /// Competition catalogue
    pub competitions: ExpiringStoreConfig,

    /// Matches per competition
    pub matches: ExpiringStoreConfig,

    /// League table per competition
    pub tables: ExpiringStoreConfig,

    /// Match summaries per date
    pub match_summaries: ExpiringStoreConfig,

    /// Preferences per chat
    pub chat_preferences: ExpiringStoreConfig,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            coalesce_requests: true,
            purge_interval_secs: None,
            competitions: ExpiringStoreConfig::new(200 * 60),
            matches: ExpiringStoreConfig::new(60),
            tables: ExpiringStoreConfig::new(10 * 60),
            match_summaries: ExpiringStoreConfig::new(2 * 60),
            chat_preferences: ExpiringStoreConfig::new(30 * 60),
        }
    }
}

impl CacheSettings {
    /// Interval of the background sweep, if one is configured.
    pub fn purge_interval(&self) -> Option<Duration> {
        self.purge_interval_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Load settings from a specific file path over the bundled defaults.
    ///
    /// Keys the file leaves out, including keys missing from a section it does
    /// contain, keep their bundled values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> MatchdayResult<Self> {
        debug!("Loading cache settings from file");

        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                MatchdayError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                MatchdayError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load settings with precedence: current dir > home dir > bundled defaults.
    ///
    /// User files are optional and silently skipped when absent.
    #[instrument]
    pub fn load() -> MatchdayResult<Self> {
        debug!("Loading cache settings with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/matchday/matchday.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("matchday").required(false));

        builder
            .build()
            .map_err(|e| {
                MatchdayError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                MatchdayError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Bundled defaults only, ignoring user files.
    pub fn bundled() -> MatchdayResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| {
                MatchdayError::from(ConfigError::new(format!(
                    "Failed to parse bundled configuration: {}",
                    e
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_matches_defaults() {
        let bundled = CacheSettings::bundled().unwrap();
        assert_eq!(bundled, CacheSettings::default());
    }
}
