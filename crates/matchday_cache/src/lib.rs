//! Time-bounded caching with cache-aside access.
//!
//! This crate provides the in-memory caching primitives the bot uses to avoid
//! hammering slow or rate-limited upstream sources:
//!
//! - [`ExpiringStore`] - string-keyed store whose entries stay valid for a fixed
//!   duration after being written, evicted lazily on the next read
//! - [`Populated`] - the emptiness rule deciding what is worth caching
//! - [`InFlight`] - per-key registry that lets concurrent misses share one fetch
//! - [`cache_aside`] - the "read, fetch on miss, store if non-empty" orchestration
//!
//! Nothing in this crate can fail. Errors only ever come from the fetch futures
//! handed to [`cache_aside`], and they are returned to the caller untouched.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aside;
mod config;
mod in_flight;
mod populated;
mod store;

pub use aside::cache_aside;
pub use config::{ExpiringStoreConfig, ExpiringStoreConfigBuilder, ExpiringStoreConfigBuilderError};
pub use in_flight::InFlight;
pub use populated::Populated;
pub use store::ExpiringStore;
