//! One narration's trip through the synthesis service.

use crate::{SynthesisConfig, speech_artifact_path};
use rcvis_core::{CachedSpeechEntry, MAX_SPEECH_TEXT_CHARS};
use rcvis_error::{
    RcvisError, RcvisResult, SpeechError, SpeechErrorKind, StorageError, StorageErrorKind,
};
use rcvis_interface::{ArtifactStore, SpeechCache, SynthesisClient, SynthesisState};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, info, instrument, warn};

/// Where a synthesis task stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    /// Nothing has been sent to the service yet
    Requested,
    /// The service accepted the text and is working on it
    Polling {
        /// Service task id
        task_id: String,
    },
    /// Audio is in the store under `audio_ref`
    Ready {
        /// Store key of the audio
        audio_ref: String,
    },
    /// Terminal failure; the task will not be retried
    Failed(SpeechErrorKind),
}

/// A pending conversion of one narration text into an audio file.
///
/// The task consults the [`SpeechCache`] before contacting the service and
/// spawns at most one remote synthesis over its lifetime. A task is used by
/// one caller at a time; the cache and store behind it may be shared.
pub struct SpeechSynthesisTask {
    text: String,
    client: Arc<dyn SynthesisClient>,
    cache: Arc<dyn SpeechCache>,
    store: Arc<dyn ArtifactStore>,
    config: SynthesisConfig,
    state: Mutex<TaskState>,
}

impl std::fmt::Debug for SpeechSynthesisTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechSynthesisTask")
            .field("text_chars", &self.text.chars().count())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SpeechSynthesisTask {
    pub(crate) fn new(
        text: String,
        client: Arc<dyn SynthesisClient>,
        cache: Arc<dyn SpeechCache>,
        store: Arc<dyn ArtifactStore>,
        config: SynthesisConfig,
    ) -> Self {
        Self {
            text,
            client,
            cache,
            store,
            config,
            state: Mutex::new(TaskState::Requested),
        }
    }

    /// The narration text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current task state.
    pub async fn state(&self) -> TaskState {
        self.state.lock().await.clone()
    }

    /// Makes one non-blocking attempt to produce the audio at `dest`.
    ///
    /// Returns `Ok(true)` once `dest` holds the audio. Returns `Ok(false)`
    /// while the service is still working, and also when the text is too
    /// long to synthesize; in that case nothing is sent and nothing is
    /// cached, and [`state`](Self::state) reports the validation failure.
    ///
    /// # Errors
    ///
    /// Fails when the service reports the task as failed, when a cached
    /// entry points at missing audio, or on transport and storage errors.
    #[instrument(skip(self), fields(text_chars = self.text.chars().count()))]
    pub async fn download_if_ready(&self, dest: &Path) -> RcvisResult<bool> {
        let mut state = self.state.lock().await;

        match state.clone() {
            TaskState::Ready { audio_ref } => {
                self.store.get(&audio_ref, dest).await?;
                Ok(true)
            }
            TaskState::Failed(SpeechErrorKind::Validation(_)) => Ok(false),
            TaskState::Failed(kind) => Err(SpeechError::new(kind).into()),
            TaskState::Requested => {
                if !CachedSpeechEntry::accepts_text(&self.text) {
                    let chars = self.text.chars().count();
                    warn!(
                        chars,
                        limit = MAX_SPEECH_TEXT_CHARS,
                        "Narration too long to synthesize, skipping"
                    );
                    *state = TaskState::Failed(SpeechErrorKind::Validation(format!(
                        "narration text is {} characters, limit is {}",
                        chars, MAX_SPEECH_TEXT_CHARS
                    )));
                    return Ok(false);
                }

                if let Some(entry) = self.cache.lookup(&self.text).await? {
                    debug!(audio_ref = %entry.audio_ref(), "Speech cache hit");
                    self.copy_cached(entry.audio_ref(), dest).await?;
                    *state = TaskState::Ready {
                        audio_ref: entry.audio_ref().clone(),
                    };
                    return Ok(true);
                }

                let task_id = self.client.spawn(&self.text).await?;
                info!(task_id = %task_id, "Spawned speech synthesis");
                *state = TaskState::Polling {
                    task_id: task_id.clone(),
                };
                self.poll(&mut state, &task_id, dest).await
            }
            TaskState::Polling { task_id } => self.poll(&mut state, &task_id, dest).await,
        }
    }

    /// Waits for the audio and writes it to `dest`.
    ///
    /// Polls [`download_if_ready`](Self::download_if_ready) with exponential
    /// backoff and jitter, bounded by the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns the validation error at once, without polling, when the text
    /// exceeds the length limit. Returns a timeout error when the service
    /// does not finish in time, and the service's failure when it gives up.
    #[instrument(skip(self), fields(text_chars = self.text.chars().count()))]
    pub async fn download_synchronously(&self, dest: &Path) -> RcvisResult<()> {
        let initial_ms = (self.config.initial_backoff().as_millis() as u64).max(2);
        // Delays grow as 2^n * factor, so the first wait is the initial backoff.
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(initial_ms / 2)
            .max_delay(*self.config.max_backoff())
            .map(jitter);

        let this = &*self;
        let attempt = Retry::spawn(strategy, move || async move {
            match this.download_if_ready(dest).await {
                Ok(true) => Ok(()),
                Ok(false) => match this.state().await {
                    TaskState::Failed(kind) => {
                        Err(RetryError::Permanent(RcvisError::from(SpeechError::new(kind))))
                    }
                    _ => Err(RetryError::Transient {
                        err: RcvisError::from(SpeechError::new(SpeechErrorKind::NotReady(
                            this.task_label().await,
                        ))),
                        retry_after: None,
                    }),
                },
                Err(e) => Err(RetryError::Permanent(e)),
            }
        });

        match tokio::time::timeout(*self.config.timeout(), attempt).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout = ?self.config.timeout(), "Speech synthesis timed out");
                Err(SpeechError::new(SpeechErrorKind::Timeout(format!(
                    "{:?}",
                    self.config.timeout()
                )))
                .into())
            }
        }
    }

    async fn poll(&self, state: &mut TaskState, task_id: &str, dest: &Path) -> RcvisResult<bool> {
        let status = self.client.status(task_id).await?;
        match status.state {
            SynthesisState::Pending => {
                debug!(task_id, "Speech synthesis still pending");
                Ok(false)
            }
            SynthesisState::Failed => {
                warn!(task_id, "Speech synthesis failed");
                let kind = SpeechErrorKind::SynthesisFailed(task_id.to_string());
                *state = TaskState::Failed(kind.clone());
                Err(SpeechError::new(kind).into())
            }
            SynthesisState::Completed => {
                let output_uri = status.output_uri.ok_or_else(|| {
                    SpeechError::new(SpeechErrorKind::MalformedResponse(format!(
                        "task {} completed without an output location",
                        task_id
                    )))
                })?;
                let audio_ref = self.download(&output_uri, dest).await?;
                *state = TaskState::Ready { audio_ref };
                Ok(true)
            }
        }
    }

    /// Fetches finished audio into `dest`, uploads it and records it in the cache.
    async fn download(&self, output_uri: &str, dest: &Path) -> RcvisResult<String> {
        let bytes = self.client.fetch(output_uri).await?;
        tokio::fs::write(dest, &bytes).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                dest.display(),
                e
            )))
        })?;

        let audio_ref = speech_artifact_path(
            self.config.speech_prefix(),
            &self.text,
            self.config.audio_extension(),
        );
        self.store.put(dest, &audio_ref).await?;
        self.cache.store(&self.text, &audio_ref).await?;
        info!(audio_ref = %audio_ref, bytes = bytes.len(), "Cached synthesized speech");
        Ok(audio_ref)
    }

    async fn copy_cached(&self, audio_ref: &str, dest: &Path) -> RcvisResult<()> {
        if !self.store.exists(audio_ref).await? {
            return Err(SpeechError::new(SpeechErrorKind::CacheInconsistency(format!(
                "cached audio {} is missing from the store",
                audio_ref
            )))
            .into());
        }
        self.store.get(audio_ref, dest).await
    }

    async fn task_label(&self) -> String {
        match &*self.state.lock().await {
            TaskState::Polling { task_id } => task_id.clone(),
            _ => "(unspawned)".to_string(),
        }
    }
}
