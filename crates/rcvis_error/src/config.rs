//! Invalid or unreadable `rcvis.toml` settings.

/// A configuration problem, naming the offending key when there is one.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message, prefixed with the key when known
    pub message: String,
    /// Dotted key such as `queue.workers`
    pub key: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// A problem not tied to one key, such as an unparsable file.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            key: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// A bad value under `key`.
    ///
    /// ```
    /// use rcvis_error::ConfigError;
    ///
    /// let err = ConfigError::for_key("queue.workers", "must be positive");
    /// assert_eq!(err.key.as_deref(), Some("queue.workers"));
    /// assert_eq!(err.message, "queue.workers must be positive");
    /// ```
    #[track_caller]
    pub fn for_key(key: impl Into<String>, problem: impl std::fmt::Display) -> Self {
        let key = key.into();
        let location = std::panic::Location::caller();
        Self {
            message: format!("{} {}", key, problem),
            key: Some(key),
            line: location.line(),
            file: location.file(),
        }
    }
}
