//! Speech synthesis seams.

use async_trait::async_trait;
use rcvis_core::CachedSpeechEntry;
use rcvis_error::RcvisResult;
use serde::{Deserialize, Serialize};

/// Persistent store mapping exact narration text to an audio artifact.
///
/// Writes are idempotent upserts, so two workers racing to synthesize the
/// same text simply overwrite each other with equivalent audio.
#[async_trait]
pub trait SpeechCache: Send + Sync {
    /// Finds the entry for `text`, refreshing its last-used time on a hit.
    async fn lookup(&self, text: &str) -> RcvisResult<Option<CachedSpeechEntry>>;

    /// Inserts or replaces the entry for `text`.
    ///
    /// # Errors
    ///
    /// Fails with a validation error when `text` exceeds 2048 characters.
    async fn store(&self, text: &str, audio_ref: &str) -> RcvisResult<CachedSpeechEntry>;

    /// Refreshes the last-used time of an existing entry.
    async fn touch(&self, entry: &CachedSpeechEntry) -> RcvisResult<()>;

    /// Number of cached entries.
    async fn len(&self) -> RcvisResult<usize>;

    /// Whether the cache is empty.
    async fn is_empty(&self) -> RcvisResult<bool> {
        Ok(self.len().await? == 0)
    }
}

/// Status of a synthesis task as reported by the service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum SynthesisState {
    /// Accepted or running
    Pending,
    /// Audio is ready at the output URI
    Completed,
    /// The service gave up
    Failed,
}

/// One poll result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisStatus {
    /// Task state
    pub state: SynthesisState,
    /// Location of the finished audio, once completed
    pub output_uri: Option<String>,
}

impl SynthesisStatus {
    /// A task that has not finished yet.
    pub fn pending() -> Self {
        Self {
            state: SynthesisState::Pending,
            output_uri: None,
        }
    }

    /// A finished task.
    pub fn completed(output_uri: impl Into<String>) -> Self {
        Self {
            state: SynthesisState::Completed,
            output_uri: Some(output_uri.into()),
        }
    }

    /// A failed task.
    pub fn failed() -> Self {
        Self {
            state: SynthesisState::Failed,
            output_uri: None,
        }
    }
}

/// External speech synthesis service with an asynchronous task API.
///
/// Latency is nondeterministic; callers own the poll loop and its backoff.
#[async_trait]
pub trait SynthesisClient: Send + Sync {
    /// Submits `text` and returns the service's task id.
    async fn spawn(&self, text: &str) -> RcvisResult<String>;

    /// Checks a task without blocking.
    async fn status(&self, task_id: &str) -> RcvisResult<SynthesisStatus>;

    /// Fetches finished audio.
    async fn fetch(&self, output_uri: &str) -> RcvisResult<Vec<u8>>;
}
