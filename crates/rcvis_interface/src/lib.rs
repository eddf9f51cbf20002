//! Trait definitions for the RCVis movie pipeline.
//!
//! Every external collaborator of the pipeline sits behind one of these
//! traits so that renderers and orchestrators can be exercised with
//! injected implementations:
//!
//! - [`SpeechCache`] - persistent text-to-audio dedup store
//! - [`SynthesisClient`] - asynchronous speech synthesis service
//! - [`ArtifactStore`] - file store for cached audio and finished movies
//! - [`ResultRepository`] - result records and their movie status
//! - [`NarrationSource`] - per-round narration text
//! - [`FrameSource`] - per-round visual frames
//! - [`VideoComposer`] - assembles frames and audio into a movie file

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod media;
mod movie;
mod speech;

pub use media::{ArtifactStore, FrameSource, Segment, VideoComposer};
pub use movie::{NarrationSource, ResultRepository};
pub use speech::{SpeechCache, SynthesisClient, SynthesisState, SynthesisStatus};
