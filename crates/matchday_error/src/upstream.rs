//! Errors raised by upstream data sources.
//!
//! Upstream errors travel through the cache-aside accessors untouched. They are
//! `Clone` because a single in-flight fetch may hand its outcome to several
//! waiting callers.

/// Kinds of upstream failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum UpstreamErrorKind {
    /// The source could not be reached or answered with a server error
    #[display("Upstream unavailable: {}", _0)]
    Unavailable(String),
    /// The source refused the request because of its quota
    #[display("Rate limited by {}: retry after {} seconds", source_name, retry_after_secs)]
    RateLimited {
        /// Name of the throttling source
        source_name: String,
        /// Seconds the source asked us to wait
        retry_after_secs: u64,
    },
    /// The source answered with something we could not interpret
    #[display("Invalid upstream response: {}", _0)]
    InvalidResponse(String),
    /// The persistence layer failed to read or write
    #[display("Persistence failure: {}", _0)]
    Persistence(String),
}

/// Upstream error with location tracking.
///
/// # Examples
///
/// ```
/// use matchday_error::{UpstreamError, UpstreamErrorKind};
///
/// let err = UpstreamError::new(UpstreamErrorKind::RateLimited {
///     source_name: "football-data".to_string(),
///     retry_after_secs: 60,
/// });
/// assert!(format!("{}", err).contains("retry after 60 seconds"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Upstream Error: {} at line {} in {}", kind, line, file)]
pub struct UpstreamError {
    /// The kind of error that occurred
    pub kind: UpstreamErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl UpstreamError {
    /// Create a new upstream error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: UpstreamErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &UpstreamErrorKind {
        &self.kind
    }
}
