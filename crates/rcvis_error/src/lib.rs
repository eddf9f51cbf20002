//! Error types for the RCVis movie pipeline.
//!
//! This crate provides the foundation error types used throughout the RCVis crates.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use rcvis_error::{RcvisResult, SpeechError, SpeechErrorKind};
//!
//! fn synthesize(text: &str) -> RcvisResult<()> {
//!     if text.chars().count() > 2048 {
//!         Err(SpeechError::new(SpeechErrorKind::Validation(
//!             "text too long".to_string(),
//!         )))?
//!     }
//!     Ok(())
//! }
//!
//! let err = synthesize(&"x".repeat(2049)).unwrap_err();
//! assert!(err.is_validation());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
#[cfg(feature = "database")]
mod database;
mod error;
mod http;
mod movie;
mod speech;
mod storage;

pub use backend::BackendError;
pub use config::ConfigError;
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{RcvisError, RcvisErrorKind, RcvisResult};
pub use http::HttpError;
pub use movie::{MovieError, MovieErrorKind};
pub use speech::{SpeechError, SpeechErrorKind};
pub use storage::{StorageError, StorageErrorKind};
