//! Per-store configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for one [`ExpiringStore`](crate::ExpiringStore).
///
/// ```toml
/// [matches]
/// validity_secs = 60
/// max_entries = 64
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct ExpiringStoreConfig {
    /// How long an entry stays valid after being written (seconds)
    #[serde(default = "default_validity_secs")]
    #[builder(default = "default_validity_secs()")]
    validity_secs: u64,

    /// Upper bound on stored entries; `None` leaves the store unbounded
    #[serde(default)]
    #[builder(default)]
    max_entries: Option<usize>,
}

fn default_validity_secs() -> u64 {
    300 // 5 minutes
}

impl ExpiringStoreConfig {
    /// Unbounded configuration with the given validity.
    pub fn new(validity_secs: u64) -> Self {
        Self {
            validity_secs,
            max_entries: None,
        }
    }

    /// Validity as a [`Duration`].
    pub fn validity(&self) -> Duration {
        Duration::from_secs(self.validity_secs)
    }
}

impl Default for ExpiringStoreConfig {
    fn default() -> Self {
        Self::new(default_validity_secs())
    }
}
