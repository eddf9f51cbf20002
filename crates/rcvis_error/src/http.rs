//! Failures talking to the speech service or the visualization host.

/// A remote request that failed in transit or was refused.
///
/// `status` holds the response code when the remote side answered, and is
/// `None` when no response arrived at all.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// What was being requested and what went wrong
    pub message: String,
    /// Response status, if the remote side answered
    pub status: Option<u16>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// A request that never got a usable response.
    ///
    /// ```
    /// use rcvis_error::HttpError;
    ///
    /// let err = HttpError::new("speech service unreachable: connection refused");
    /// assert_eq!(err.status, None);
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::at(message.into(), None, std::panic::Location::caller())
    }

    /// A request the remote side answered with a non-success `status`.
    ///
    /// ```
    /// use rcvis_error::HttpError;
    ///
    /// let err = HttpError::rejected(503, "audio download");
    /// assert_eq!(err.status, Some(503));
    /// assert!(err.message.starts_with("audio download returned 503"));
    /// ```
    #[track_caller]
    pub fn rejected(status: u16, request: impl std::fmt::Display) -> Self {
        Self::at(
            format!("{} returned {}", request, status),
            Some(status),
            std::panic::Location::caller(),
        )
    }

    fn at(
        message: String,
        status: Option<u16>,
        location: &'static std::panic::Location<'static>,
    ) -> Self {
        Self {
            message,
            status,
            line: location.line(),
            file: location.file(),
        }
    }
}
