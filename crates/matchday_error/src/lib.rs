//! Error types for the Matchday workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! The cache layer itself has no error type: reads and writes are total.
//! Everything here describes failures of the upstream sources the cache sits in
//! front of, or of loading cache configuration.
//!
//! # Examples
//!
//! ```
//! use matchday_error::{MatchdayResult, UpstreamError, UpstreamErrorKind};
//!
//! fn fetch_table() -> MatchdayResult<String> {
//!     Err(UpstreamError::new(UpstreamErrorKind::Unavailable(
//!         "football-data.org timed out".to_string(),
//!     )))?
//! }
//!
//! assert!(fetch_table().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod upstream;

pub use config::ConfigError;
pub use error::{MatchdayError, MatchdayErrorKind, MatchdayResult};
pub use upstream::{UpstreamError, UpstreamErrorKind};
