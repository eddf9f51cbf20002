//! Store keys for synthesized audio.

use sha2::{Digest, Sha256};

/// Store key for the audio of `text`: `{prefix}/{sha256(text)}.{extension}`.
///
/// Identical text always maps to the same key, so concurrent duplicate
/// syntheses overwrite one object instead of littering the store.
///
/// ```
/// use rcvis_speech::speech_artifact_path;
///
/// let a = speech_artifact_path("speech-synth", "hello", "mp3");
/// assert!(a.starts_with("speech-synth/"));
/// assert!(a.ends_with(".mp3"));
/// assert_eq!(a, speech_artifact_path("speech-synth", "hello", "mp3"));
/// assert_ne!(a, speech_artifact_path("speech-synth", "hello!", "mp3"));
/// ```
pub fn speech_artifact_path(prefix: &str, text: &str, extension: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!(
        "{}/{:x}.{}",
        prefix.trim_end_matches('/'),
        hasher.finalize(),
        extension
    )
}
