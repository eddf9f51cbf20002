//! Speech synthesis error types.

/// Specific error conditions for speech synthesis and its cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SpeechErrorKind {
    /// Input rejected before any external call; never retried
    #[display("Invalid synthesis input: {}", _0)]
    Validation(String),
    /// The synthesis service reported the task as failed
    #[display("Synthesis task {} failed", _0)]
    SynthesisFailed(String),
    /// The task has not finished yet
    #[display("Synthesis task {} is still pending", _0)]
    NotReady(String),
    /// Hard synthesis timeout elapsed
    #[display("Synthesis did not complete within {}", _0)]
    Timeout(String),
    /// The service answered with a payload we could not interpret
    #[display("Malformed synthesis response: {}", _0)]
    MalformedResponse(String),
    /// Cache contents disagree with the store
    #[display("Speech cache inconsistency: {}", _0)]
    CacheInconsistency(String),
}

/// Speech error with location tracking.
///
/// # Examples
///
/// ```
/// use rcvis_error::{SpeechError, SpeechErrorKind};
///
/// let err = SpeechError::new(SpeechErrorKind::Timeout("300s".to_string()));
/// assert!(format!("{}", err).contains("within 300s"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Speech Error: {} at line {} in {}", kind, line, file)]
pub struct SpeechError {
    /// The kind of error that occurred
    pub kind: SpeechErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SpeechError {
    /// Create a new speech error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SpeechErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
