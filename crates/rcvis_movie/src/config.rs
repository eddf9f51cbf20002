//! Renderer configuration.

use derive_getters::Getters;
use rcvis_core::Resolution;
use std::time::Duration;

/// Target resolutions and timing for rendered movies.
#[derive(Debug, Clone, PartialEq, Getters, derive_builder::Builder)]
#[builder(default)]
pub struct RendererConfig {
    /// Landscape variant
    horizontal: Resolution,
    /// Portrait variant
    vertical: Resolution,
    /// How long a round without narration stays on screen
    seconds_without_audio: Duration,
    /// Store prefix for uploaded movies
    #[builder(setter(into))]
    movie_prefix: String,
    /// Extension of per-round narration files
    #[builder(setter(into))]
    audio_extension: String,
}

impl RendererConfig {
    /// Creates a new config builder.
    pub fn builder() -> RendererConfigBuilder {
        RendererConfigBuilder::default()
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            horizontal: Resolution::HORIZONTAL,
            vertical: Resolution::VERTICAL,
            seconds_without_audio: Duration::from_secs(2),
            movie_prefix: "movies".to_string(),
            audio_extension: "mp3".to_string(),
        }
    }
}
