//! Key and reference limits shared by every cache backend.

use rcvis_core::{CachedSpeechEntry, MAX_AUDIO_REF_CHARS, MAX_SPEECH_TEXT_CHARS};
use rcvis_error::{SpeechError, SpeechErrorKind};

/// Checks that `text` and `audio_ref` fit the cache columns.
///
/// # Errors
///
/// Returns a validation error when the text exceeds 2048 characters or the
/// reference exceeds 512 characters.
#[track_caller]
pub fn validate_entry(text: &str, audio_ref: &str) -> Result<(), SpeechError> {
    if !CachedSpeechEntry::accepts_text(text) {
        return Err(SpeechError::new(SpeechErrorKind::Validation(format!(
            "narration text is {} characters, limit is {}",
            text.chars().count(),
            MAX_SPEECH_TEXT_CHARS
        ))));
    }
    let ref_len = audio_ref.chars().count();
    if ref_len > MAX_AUDIO_REF_CHARS {
        return Err(SpeechError::new(SpeechErrorKind::Validation(format!(
            "audio reference is {} characters, limit is {}",
            ref_len, MAX_AUDIO_REF_CHARS
        ))));
    }
    Ok(())
}
