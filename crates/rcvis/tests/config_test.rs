//! Tests for layered configuration.

use rcvis::{RcvisConfig, RcvisErrorKind, Resolution};
use std::time::Duration;

#[test]
fn test_bundled_defaults() {
    let config = RcvisConfig::from_toml_str("").unwrap();

    assert_eq!(config.speech.output_format, "mp3");
    assert_eq!(config.speech.timeout_secs, 300);
    assert_eq!(config.storage.speech_prefix, "speech-synth");
    assert_eq!(config.storage.movie_prefix, "movies");
    assert_eq!(config.movie.horizontal, Resolution::HORIZONTAL);
    assert_eq!(config.movie.vertical, Resolution::VERTICAL);
    assert_eq!(config.queue.name, "rcvis-queue");
    assert_eq!(config.queue.jobs_per_second, 1);
}

#[test]
fn test_override_keeps_other_values() {
    let config = RcvisConfig::from_toml_str(
        r#"
        [speech]
        voice = "Matthew"

        [movie.vertical]
        width = 720
        height = 1280
        "#,
    )
    .unwrap();

    assert_eq!(config.speech.voice, "Matthew");
    assert_eq!(config.speech.endpoint, "http://localhost:4566");
    assert_eq!(config.movie.vertical, Resolution::new(720, 1280).unwrap());
    assert_eq!(config.movie.horizontal, Resolution::HORIZONTAL);
}

#[test]
fn test_resolution_outside_range_is_rejected() {
    let result = RcvisConfig::from_toml_str("[movie.horizontal]\nwidth = 3840\nheight = 2160");
    assert!(result.is_err());
}

#[test]
fn test_zero_rate_is_rejected() {
    assert!(RcvisConfig::from_toml_str("[queue]\njobs_per_second = 0").is_err());
    assert!(RcvisConfig::from_toml_str("[speech]\ntimeout_secs = 0").is_err());
    assert!(RcvisConfig::from_toml_str("[movie]\nseconds_without_audio = -1.0").is_err());
}

#[test]
fn test_invalid_value_names_its_key() {
    let err = RcvisConfig::from_toml_str("[queue]\nworkers = 0").unwrap_err();
    match err.kind() {
        RcvisErrorKind::Config(config) => {
            assert_eq!(config.key.as_deref(), Some("queue.workers"));
            assert!(config.message.contains("must be positive"));
        }
        other => panic!("expected a configuration error, got {}", other),
    }
}

#[test]
fn test_derived_component_configs() {
    let config = RcvisConfig::from_toml_str(
        r#"
        [speech]
        output_format = "ogg"
        timeout_secs = 60
        initial_backoff_ms = 250
        max_backoff_ms = 4000

        [movie]
        seconds_without_audio = 1.5
        "#,
    )
    .unwrap();

    let synthesis = config.synthesis_config();
    assert_eq!(*synthesis.timeout(), Duration::from_secs(60));
    assert_eq!(*synthesis.initial_backoff(), Duration::from_millis(250));
    assert_eq!(*synthesis.max_backoff(), Duration::from_secs(4));
    assert_eq!(synthesis.audio_extension(), "ogg");

    let renderer = config.renderer_config();
    assert_eq!(*renderer.seconds_without_audio(), Duration::from_millis(1500));
    assert_eq!(renderer.audio_extension(), "ogg");
    assert_eq!(renderer.movie_prefix(), "movies");
}

#[test]
fn test_config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rcvis.toml");
    std::fs::write(&path, "[queue]\nworkers = 4\ncapacity = 8\n").unwrap();

    let config = RcvisConfig::from_file(&path).unwrap();
    assert_eq!(config.queue.workers, 4);
    assert_eq!(config.queue.capacity, 8);
    assert_eq!(config.queue.jobs_per_second, 1);
}
