//! Top-level error wrapper types.

#[cfg(feature = "database")]
use crate::DatabaseError;
use crate::{
    BackendError, ConfigError, HttpError, MovieError, SpeechError, SpeechErrorKind, StorageError,
};

/// Foundation error enum collecting every error family in the workspace.
///
/// # Examples
///
/// ```
/// use rcvis_error::{RcvisError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: RcvisError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum RcvisErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Generic backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Artifact storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Speech synthesis error
    #[from(SpeechError)]
    Speech(SpeechError),
    /// Movie rendering error
    #[from(MovieError)]
    Movie(MovieError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
}

/// RCVis error with kind discrimination.
///
/// # Examples
///
/// ```
/// use rcvis_error::{RcvisResult, ConfigError};
///
/// fn might_fail() -> RcvisResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("RCVis Error: {}", _0)]
pub struct RcvisError(Box<RcvisErrorKind>);

impl RcvisError {
    /// Create a new error from a kind.
    pub fn new(kind: RcvisErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RcvisErrorKind {
        &self.0
    }

    /// True when the input was rejected before any external call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind(),
            RcvisErrorKind::Speech(SpeechError {
                kind: SpeechErrorKind::Validation(_),
                ..
            })
        )
    }
}

// Generic From implementation for any type that converts to RcvisErrorKind
impl<T> From<T> for RcvisError
where
    T: Into<RcvisErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for RCVis operations.
pub type RcvisResult<T> = std::result::Result<T, RcvisError>;
