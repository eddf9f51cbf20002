//! In-memory speech cache implementation.

use crate::validate_entry;
use async_trait::async_trait;
use rcvis_core::CachedSpeechEntry;
use rcvis_error::{RcvisResult, SpeechError, SpeechErrorKind};
use rcvis_interface::SpeechCache;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Speech cache held in process memory.
///
/// Cloning shares the underlying table, so one instance can be injected into
/// every renderer of a worker. All data is lost when the last clone is dropped.
///
/// # Example
///
/// ```
/// use rcvis_cache::InMemorySpeechCache;
/// use rcvis_interface::SpeechCache;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let cache = InMemorySpeechCache::new();
/// cache.store("Why was Bob eliminated?", "speech-synth/abc.mp3").await?;
///
/// let hit = cache.lookup("Why was Bob eliminated?").await?.unwrap();
/// assert_eq!(hit.audio_ref(), "speech-synth/abc.mp3");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySpeechCache {
    entries: Arc<RwLock<HashMap<String, CachedSpeechEntry>>>,
}

impl InMemorySpeechCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every entry, for inspection.
    pub async fn entries(&self) -> Vec<CachedSpeechEntry> {
        self.entries.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl SpeechCache for InMemorySpeechCache {
    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    async fn lookup(&self, text: &str) -> RcvisResult<Option<CachedSpeechEntry>> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(text) {
            Some(entry) => {
                entry.touch();
                tracing::debug!(audio_ref = %entry.audio_ref(), "Speech cache hit");
                Ok(Some(entry.clone()))
            }
            None => {
                tracing::debug!("Speech cache miss");
                Ok(None)
            }
        }
    }

    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    async fn store(&self, text: &str, audio_ref: &str) -> RcvisResult<CachedSpeechEntry> {
        validate_entry(text, audio_ref)?;

        let entry = CachedSpeechEntry::new(text, audio_ref);
        let replaced = self
            .entries
            .write()
            .await
            .insert(text.to_string(), entry.clone())
            .is_some();

        tracing::debug!(replaced, "Stored speech cache entry");
        Ok(entry)
    }

    async fn touch(&self, entry: &CachedSpeechEntry) -> RcvisResult<()> {
        let mut entries = self.entries.write().await;
        let stored = entries.get_mut(entry.text()).ok_or_else(|| {
            SpeechError::new(SpeechErrorKind::CacheInconsistency(format!(
                "touched entry for {} is not cached",
                entry.audio_ref()
            )))
        })?;
        stored.touch();
        Ok(())
    }

    async fn len(&self) -> RcvisResult<usize> {
        Ok(self.entries.read().await.len())
    }
}
