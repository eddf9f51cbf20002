//! Core data types for the RCVis movie pipeline.
//!
//! This crate provides the data model shared by the speech cache, the
//! renderers and the job dispatcher: cached speech entries, movie artifacts,
//! the movie generation status machine and the result record that owns them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod narration;
mod record;
mod resolution;
mod speech;
mod status;
mod summary;

pub use artifact::MovieArtifact;
pub use narration::{NarrationPair, RoundNarration};
pub use record::{ResultRecord, ResultRecordBuilder};
pub use resolution::{Orientation, Resolution, MAX_DIMENSION};
pub use speech::{CachedSpeechEntry, MAX_AUDIO_REF_CHARS, MAX_SPEECH_TEXT_CHARS};
pub use status::MovieGenerationStatus;
pub use summary::{ElectionSummary, Redistribution, RoundSummary};

/// Version string stamped on every generated movie.
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");
