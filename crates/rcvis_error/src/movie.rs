//! Movie rendering error types.

/// Specific error conditions for movie rendering and orchestration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum MovieErrorKind {
    /// Remote visual assets could not be reached or the URL is malformed
    #[display("Upstream unavailable: {}", _0)]
    UpstreamUnavailable(String),
    /// The video composer failed
    #[display("Render failed: {}", _0)]
    Render(String),
    /// Resolution outside the accepted range
    #[display("Invalid resolution {}x{}: both dimensions must be in [1, 1920]", width, height)]
    InvalidResolution {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
    /// The result record carries nothing to narrate
    #[display("No narration available for result record {}", _0)]
    MissingNarration(i64),
}

/// Movie error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Movie Error: {} at line {} in {}", kind, line, file)]
pub struct MovieError {
    /// The kind of error that occurred
    pub kind: MovieErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl MovieError {
    /// Create a new movie error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MovieErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
