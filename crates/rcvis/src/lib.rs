//! RCVis - narrated movies of ranked-choice election results
//!
//! Turns a round-by-round tabulation into two short videos, one landscape
//! and one portrait. Every round is shown as a still frame of the
//! visualization, held for as long as its spoken explanation lasts.
//! Narration audio is synthesized by an external service and cached by its
//! exact text, so repeated phrases are only ever synthesized once.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rcvis::{FaqNarrator, MovieCreationOrchestrator, RcvisConfig};
//!
//! let config = RcvisConfig::load()?;
//! let orchestrator = MovieCreationOrchestrator::new(repository, narrator, renderer);
//! let status = orchestrator.create_movie(record_id, "https://www.rcvis.com").await?;
//! ```
//!
//! # Cargo Features
//!
//! - `database` - PostgreSQL speech cache and result repository
//! - `observability` - OpenTelemetry span export
//!
//! # Architecture
//!
//! - `rcvis_error` - Error types
//! - `rcvis_core` - Data model and movie status machine
//! - `rcvis_interface` - Seam traits for every external collaborator
//! - `rcvis_cache` - In-memory speech cache
//! - `rcvis_storage` - Filesystem artifact store
//! - `rcvis_speech` - Synthesis tasks and the text-to-speech service
//! - `rcvis_narrative` - Per-round FAQ narration
//! - `rcvis_movie` - Rendering and movie creation
//! - `rcvis_dispatch` - Privileged dispatch, job queue and workers
//! - `rcvis_database` - PostgreSQL persistence
//!
//! This crate (`rcvis`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;

pub use config::{MovieSection, QueueSection, RcvisConfig, SpeechSection, StorageSection};
pub use observability::{ObservabilityConfig, init_observability, init_observability_with_config};

pub use rcvis_error::{
    BackendError, ConfigError, HttpError, MovieError, MovieErrorKind, RcvisError, RcvisErrorKind,
    RcvisResult, SpeechError, SpeechErrorKind, StorageError, StorageErrorKind,
};

pub use rcvis_core::{
    CachedSpeechEntry, ElectionSummary, GENERATOR_VERSION, MovieArtifact, MovieGenerationStatus,
    NarrationPair, Orientation, Redistribution, Resolution, ResultRecord, ResultRecordBuilder,
    RoundNarration, RoundSummary,
};

pub use rcvis_interface::{
    ArtifactStore, FrameSource, NarrationSource, ResultRepository, Segment, SpeechCache,
    SynthesisClient, SynthesisState, SynthesisStatus, VideoComposer,
};

pub use rcvis_cache::InMemorySpeechCache;
pub use rcvis_storage::FileSystemArtifactStore;

pub use rcvis_speech::{
    HttpSynthesisClient, SpeechSynthesisTask, SynthesisConfig, TaskState, TextToSpeechService,
};

pub use rcvis_narrative::{FaqNarrator, FaqRegistry, FaqRule};

pub use rcvis_movie::{
    FfmpegComposer, HttpFrameSource, InMemoryResultRepository, MovieCreationOrchestrator,
    RendererConfig, SingleMovieRenderer,
};

pub use rcvis_dispatch::{
    Actor, DispatchOutcome, Dispatcher, JobRateLimiter, MovieJob, MovieJobHandler, MovieQueue,
    MovieStatusView, MovieWorker, spawn_workers,
};

#[cfg(feature = "database")]
pub use rcvis_database::{
    DatabaseError, DatabaseErrorKind, PostgresResultRepository, PostgresSpeechCache,
    establish_connection, run_migrations,
};
