//! Cached asynchronous speech synthesis.
//!
//! Narration text is turned into audio by an external service with a
//! spawn/poll/fetch task API. Every finished synthesis is uploaded to the
//! artifact store and recorded in the [`SpeechCache`](rcvis_interface::SpeechCache),
//! keyed by the exact text, so repeated narration never reaches the service
//! twice.
//!
//! # Example
//!
//! ```rust,no_run
//! use rcvis_speech::{HttpSynthesisClient, SynthesisConfig, TextToSpeechService};
//! # use std::sync::Arc;
//! # async fn example(
//! #     cache: Arc<dyn rcvis_interface::SpeechCache>,
//! #     store: Arc<dyn rcvis_interface::ArtifactStore>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(HttpSynthesisClient::new("https://tts.example.com/v1", "Joanna", "mp3"));
//! let service = TextToSpeechService::new(client, cache, store, SynthesisConfig::default());
//!
//! let task = service.text_to_speech("Why was Bob eliminated?");
//! task.download_synchronously(std::path::Path::new("/tmp/round-1.mp3")).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod http;
mod naming;
mod service;
mod task;

pub use config::{SynthesisConfig, SynthesisConfigBuilder};
pub use http::HttpSynthesisClient;
pub use naming::speech_artifact_path;
pub use service::TextToSpeechService;
pub use task::{SpeechSynthesisTask, TaskState};
