//! Layered TOML configuration.
//!
//! Sources are merged in increasing precedence:
//! 1. Bundled defaults (include_str! from rcvis.toml)
//! 2. `~/.config/rcvis/rcvis.toml`
//! 3. `./rcvis.toml`
//! 4. Environment variables prefixed `RCVIS__`, e.g. `RCVIS__SPEECH__VOICE`

use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use config::builder::DefaultState;
use rcvis_core::Resolution;
use rcvis_error::{ConfigError, RcvisResult};
use rcvis_movie::RendererConfig;
use rcvis_speech::SynthesisConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../rcvis.toml");

/// Speech synthesis service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechSection {
    /// Base URL of the synthesis task API
    pub endpoint: String,
    /// Voice requested for every narration
    pub voice: String,
    /// Audio format, also used as the file extension
    pub output_format: String,
    /// Hard limit on waiting for one narration
    pub timeout_secs: u64,
    /// First delay between status polls
    pub initial_backoff_ms: u64,
    /// Longest delay between status polls
    pub max_backoff_ms: u64,
}

/// Artifact store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSection {
    /// Local directory holding every artifact
    pub root: PathBuf,
    /// URL prefix the root is served from
    pub public_base_url: String,
    /// Subdirectory for synthesized narration
    pub speech_prefix: String,
    /// Subdirectory for rendered movies
    pub movie_prefix: String,
}

/// Movie rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSection {
    /// Landscape variant
    pub horizontal: Resolution,
    /// Portrait variant
    pub vertical: Resolution,
    /// Where round frames are fetched from
    pub frame_url_template: String,
    /// How long a round without narration is shown
    pub seconds_without_audio: f64,
    /// ffmpeg executable
    pub ffmpeg_path: PathBuf,
}

/// Job queue settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSection {
    /// Queue name shown in logs
    pub name: String,
    /// Jobs started per second across all workers
    pub jobs_per_second: u32,
    /// Pending jobs held before enqueueing waits
    pub capacity: usize,
    /// Concurrent workers
    pub workers: usize,
}

/// Complete RCVis configuration.
///
/// # Example
///
/// ```
/// use rcvis::RcvisConfig;
///
/// let config = RcvisConfig::from_toml_str("[queue]\njobs_per_second = 3").unwrap();
/// assert_eq!(config.queue.jobs_per_second, 3);
/// assert_eq!(config.queue.name, "rcvis-queue");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RcvisConfig {
    /// Speech synthesis
    pub speech: SpeechSection,
    /// Artifact storage
    pub storage: StorageSection,
    /// Rendering
    pub movie: MovieSection,
    /// Job dispatch
    pub queue: QueueSection,
}

impl RcvisConfig {
    /// Load configuration from every layer.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file is malformed or the merged
    /// configuration fails validation.
    #[instrument]
    pub fn load() -> RcvisResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();
        if let Some(config_dir) = dirs::config_dir() {
            let home_config = config_dir.join("rcvis").join("rcvis.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }
        builder = builder
            .add_source(File::with_name("rcvis").required(false))
            .add_source(
                Environment::with_prefix("RCVIS")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::build(builder)
    }

    /// Load bundled defaults overridden by one file.
    #[instrument(skip(path), fields(file = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> RcvisResult<Self> {
        let builder = Self::defaults().add_source(File::from(path.as_ref()));
        Self::build(builder)
    }

    /// Load bundled defaults overridden by a TOML string.
    pub fn from_toml_str(toml: &str) -> RcvisResult<Self> {
        let builder = Self::defaults().add_source(File::from_str(toml, FileFormat::Toml));
        Self::build(builder)
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> RcvisResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Check values the types alone do not constrain.
    ///
    /// Resolutions are already range-checked when deserialized.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.speech.timeout_secs == 0 {
            return Err(ConfigError::for_key("speech.timeout_secs", "must be positive"));
        }
        if self.speech.initial_backoff_ms == 0 {
            return Err(ConfigError::for_key("speech.initial_backoff_ms", "must be positive"));
        }
        if self.speech.max_backoff_ms < self.speech.initial_backoff_ms {
            return Err(ConfigError::for_key(
                "speech.max_backoff_ms",
                "must not be below speech.initial_backoff_ms",
            ));
        }
        if !(self.movie.seconds_without_audio.is_finite() && self.movie.seconds_without_audio > 0.0)
        {
            return Err(ConfigError::for_key(
                "movie.seconds_without_audio",
                "must be a positive number",
            ));
        }
        if self.queue.jobs_per_second == 0 {
            return Err(ConfigError::for_key("queue.jobs_per_second", "must be positive"));
        }
        if self.queue.workers == 0 {
            return Err(ConfigError::for_key("queue.workers", "must be positive"));
        }
        Ok(())
    }

    /// Polling settings for the speech service.
    pub fn synthesis_config(&self) -> SynthesisConfig {
        SynthesisConfig::builder()
            .timeout(Duration::from_secs(self.speech.timeout_secs))
            .initial_backoff(Duration::from_millis(self.speech.initial_backoff_ms))
            .max_backoff(Duration::from_millis(self.speech.max_backoff_ms))
            .speech_prefix(self.storage.speech_prefix.clone())
            .audio_extension(self.speech.output_format.clone())
            .build()
            .unwrap_or_default()
    }

    /// Settings for the single-movie renderer.
    pub fn renderer_config(&self) -> RendererConfig {
        RendererConfig::builder()
            .horizontal(self.movie.horizontal)
            .vertical(self.movie.vertical)
            .seconds_without_audio(Duration::from_secs_f64(self.movie.seconds_without_audio))
            .movie_prefix(self.storage.movie_prefix.clone())
            .audio_extension(self.speech.output_format.clone())
            .build()
            .unwrap_or_default()
    }
}
