//! Narrated movie rendering for RCVis.
//!
//! A movie is a sequence of still frames, one per tabulation round, each
//! held on screen for as long as its narration lasts. Two variants are
//! rendered from one result record: a landscape movie and a portrait movie.
//!
//! - [`SingleMovieRenderer`] builds and uploads one variant
//! - [`MovieCreationOrchestrator`] drives both variants and owns the status
//! - [`InMemoryResultRepository`] keeps result records for tests and the CLI
//! - [`HttpFrameSource`] and [`FfmpegComposer`] are the production seams

#![warn(missing_docs)]

mod composer;
mod config;
mod frames;
mod orchestrator;
mod renderer;
mod repository;

pub use composer::FfmpegComposer;
pub use config::{RendererConfig, RendererConfigBuilder};
pub use frames::{HttpFrameSource, parse_base_url};
pub use orchestrator::MovieCreationOrchestrator;
pub use renderer::SingleMovieRenderer;
pub use repository::InMemoryResultRepository;
