//! Cached speech entries.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Longest narration text accepted as a cache key, in characters.
pub const MAX_SPEECH_TEXT_CHARS: usize = 2048;

/// Longest audio artifact reference that may be stored, in characters.
pub const MAX_AUDIO_REF_CHARS: usize = 512;

/// One synthesized narration, keyed by its exact text.
///
/// The text is the primary key, so identical narration across unrelated
/// results shares a single audio artifact. `last_used_at` is refreshed on
/// every read or write; entries are never evicted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CachedSpeechEntry {
    text: String,
    audio_ref: String,
    last_used_at: DateTime<Utc>,
}

impl CachedSpeechEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(text: impl Into<String>, audio_ref: impl Into<String>) -> Self {
        Self::with_last_used(text, audio_ref, Utc::now())
    }

    /// Creates an entry with an explicit last-used timestamp.
    pub fn with_last_used(
        text: impl Into<String>,
        audio_ref: impl Into<String>,
        last_used_at: DateTime<Utc>,
    ) -> Self {
        Self {
            text: text.into(),
            audio_ref: audio_ref.into(),
            last_used_at,
        }
    }

    /// Refreshes `last_used_at` to now.
    pub fn touch(&mut self) {
        self.last_used_at = Utc::now();
    }

    /// Whether `text` fits the cache key limit.
    ///
    /// ```
    /// use rcvis_core::CachedSpeechEntry;
    ///
    /// assert!(CachedSpeechEntry::accepts_text(&"x".repeat(2048)));
    /// assert!(!CachedSpeechEntry::accepts_text(&"x".repeat(2049)));
    /// ```
    pub fn accepts_text(text: &str) -> bool {
        text.chars().count() <= MAX_SPEECH_TEXT_CHARS
    }
}
