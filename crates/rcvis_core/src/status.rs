//! Movie generation status machine.

use serde::{Deserialize, Serialize};

/// Externally visible progress of a result record's movie.
///
/// Per attempt the status only moves forward:
/// `NotRequested -> NotStarted -> InProgress -> {Complete | Failed}`.
/// A fresh request from a terminal state starts a new attempt at `NotStarted`.
/// A queued job that can never be picked up moves straight to `Failed`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MovieGenerationStatus {
    /// Nobody has asked for a movie yet
    #[default]
    NotRequested,
    /// Requested and queued, not yet picked up by a worker
    NotStarted,
    /// A worker is rendering
    InProgress,
    /// Both variants rendered and attached
    Complete,
    /// The attempt failed; nothing was attached
    Failed,
}

impl MovieGenerationStatus {
    /// Whether the attempt has finished.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }

    /// Whether the record's movies are cleared on entering this state.
    pub fn clears_movies(self) -> bool {
        matches!(self, Self::NotStarted | Self::Failed)
    }

    /// Whether a new request may start an attempt from this state.
    ///
    /// While a job is queued or running, another request would only
    /// produce a duplicate job.
    pub fn accepts_request(self) -> bool {
        matches!(self, Self::NotRequested | Self::Complete | Self::Failed)
    }

    /// Whether moving from `self` to `next` follows the status machine.
    ///
    /// ```
    /// use rcvis_core::MovieGenerationStatus::*;
    ///
    /// assert!(NotRequested.can_transition_to(NotStarted));
    /// assert!(InProgress.can_transition_to(Failed));
    /// assert!(Failed.can_transition_to(NotStarted));
    /// assert!(NotStarted.can_transition_to(Failed));
    /// assert!(!NotRequested.can_transition_to(Complete));
    /// assert!(!Complete.can_transition_to(InProgress));
    /// ```
    pub fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (from, Self::NotStarted) => from.accepts_request(),
            (Self::NotStarted, Self::InProgress | Self::Failed) => true,
            (Self::InProgress, Self::Complete | Self::Failed) => true,
            _ => false,
        }
    }
}
