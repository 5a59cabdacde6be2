//! Matchday - cached football data for a chat bot.
//!
//! The bot answers questions about competitions, fixtures and league tables.
//! Upstream football APIs are slow and rate limited, so every answer goes
//! through a time-bounded cache first.
//!
//! # Architecture
//!
//! - `matchday_error` - Error types
//! - `matchday_cache` - Expiring store, request coalescing and cache-aside access
//! - `matchday_football` - Domain caches and the [`FootballData`] accessors
//!
//! This crate re-exports everything and adds [`observability`] setup.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use matchday::{CacheSettings, FootballData, init_observability};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_observability()?;
//!
//!     let settings = CacheSettings::load()?;
//!     let data = FootballData::new(Arc::new(MyApiClient::new()), Arc::new(MyRepository::new()), &settings);
//!     let _sweepers = data.spawn_purge_tasks();
//!
//!     match data.table(2021).await? {
//!         Some(table) => println!("{} teams", table.standings.len()),
//!         None => println!("No standings available"),
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod observability;

pub use matchday_cache::*;
pub use matchday_error::*;
pub use matchday_football::*;
pub use observability::{ObservabilityConfig, init_observability, init_observability_with_config};
