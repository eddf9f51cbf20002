//! Synthesis polling configuration.

use derive_getters::Getters;
use std::time::Duration;

/// How synthesis tasks are polled and where their audio is stored.
///
/// # Example
///
/// ```
/// use rcvis_speech::SynthesisConfig;
/// use std::time::Duration;
///
/// let config = SynthesisConfig::builder()
///     .timeout(Duration::from_secs(60))
///     .build()
///     .unwrap();
/// assert_eq!(*config.timeout(), Duration::from_secs(60));
/// assert_eq!(config.speech_prefix(), "speech-synth");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(default)]
pub struct SynthesisConfig {
    /// Hard limit on one synchronous download; expiry is fatal
    timeout: Duration,
    /// First delay between polls
    initial_backoff: Duration,
    /// Longest delay between polls
    max_backoff: Duration,
    /// Store prefix for synthesized audio
    #[builder(setter(into))]
    speech_prefix: String,
    /// File extension of synthesized audio
    #[builder(setter(into))]
    audio_extension: String,
}

impl SynthesisConfig {
    /// Creates a new config builder.
    pub fn builder() -> SynthesisConfigBuilder {
        SynthesisConfigBuilder::default()
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(300),
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(10),
            speech_prefix: "speech-synth".to_string(),
            audio_extension: "mp3".to_string(),
        }
    }
}
