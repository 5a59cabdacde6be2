//! Top-level error wrapper types.

use crate::{ConfigError, UpstreamError};

/// Every error a Matchday operation can surface.
///
/// # Examples
///
/// ```
/// use matchday_error::{ConfigError, MatchdayError, MatchdayErrorKind};
///
/// let err: MatchdayError = ConfigError::new("missing [competitions] section").into();
/// assert!(matches!(err.kind(), MatchdayErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MatchdayErrorKind {
    /// Upstream data source error
    #[from(UpstreamError)]
    Upstream(UpstreamError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Matchday error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Matchday Error: {}", _0)]
pub struct MatchdayError(Box<MatchdayErrorKind>);

impl MatchdayError {
    /// Create a new error from a kind.
    pub fn new(kind: MatchdayErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MatchdayErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to MatchdayErrorKind
impl<T> From<T> for MatchdayError
where
    T: Into<MatchdayErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Matchday operations.
pub type MatchdayResult<T> = std::result::Result<T, MatchdayError>;
