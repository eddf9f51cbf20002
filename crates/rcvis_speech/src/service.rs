//! Entry point for requesting narration audio.

use crate::{SpeechSynthesisTask, SynthesisConfig};
use rcvis_error::RcvisResult;
use rcvis_interface::{ArtifactStore, SpeechCache, SynthesisClient};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// One lock per text currently being synthesized.
type InFlight = Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>;

/// Hands out [`SpeechSynthesisTask`]s that share one client, cache and store.
///
/// Clones share the same in-flight table, so [`download_speech`] callers on
/// any clone never synthesize the same text twice at once.
///
/// [`download_speech`]: TextToSpeechService::download_speech
#[derive(Clone)]
pub struct TextToSpeechService {
    client: Arc<dyn SynthesisClient>,
    cache: Arc<dyn SpeechCache>,
    store: Arc<dyn ArtifactStore>,
    config: SynthesisConfig,
    in_flight: InFlight,
}

impl TextToSpeechService {
    /// Creates a service over the given collaborators.
    pub fn new(
        client: Arc<dyn SynthesisClient>,
        cache: Arc<dyn SpeechCache>,
        store: Arc<dyn ArtifactStore>,
        config: SynthesisConfig,
    ) -> Self {
        Self {
            client,
            cache,
            store,
            config,
            in_flight: InFlight::default(),
        }
    }

    /// Starts converting `text` to speech.
    ///
    /// Nothing is sent until the task is first polled.
    pub fn text_to_speech(&self, text: impl Into<String>) -> SpeechSynthesisTask {
        SpeechSynthesisTask::new(
            text.into(),
            Arc::clone(&self.client),
            Arc::clone(&self.cache),
            Arc::clone(&self.store),
            self.config.clone(),
        )
    }

    /// Synthesizes `text` into `dest` and waits for the audio.
    ///
    /// A caller asking for a text that is already being synthesized waits
    /// for that synthesis and is then served from the cache.
    ///
    /// # Errors
    ///
    /// Same as [`SpeechSynthesisTask::download_synchronously`].
    #[instrument(skip(self, text), fields(text_chars = text.chars().count()))]
    pub async fn download_speech(&self, text: &str, dest: &Path) -> RcvisResult<()> {
        let slot = {
            let mut in_flight = self.in_flight.lock().await;
            Arc::clone(in_flight.entry(text.to_string()).or_default())
        };

        let result = {
            let _turn = slot.lock().await;
            self.text_to_speech(text).download_synchronously(dest).await
        };

        let mut in_flight = self.in_flight.lock().await;
        // Nobody else holds the slot once only the table and this call do
        if Arc::strong_count(&slot) == 2 {
            in_flight.remove(text);
            debug!("Released synthesis slot");
        }
        result
    }

    /// Polling configuration shared by every task.
    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// The cache consulted before every synthesis.
    pub fn cache(&self) -> &Arc<dyn SpeechCache> {
        &self.cache
    }
}

impl std::fmt::Debug for TextToSpeechService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextToSpeechService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
