//! PostgreSQL persistence for the RCVis movie pipeline.
//!
//! Provides Diesel-backed implementations of the speech cache and the result
//! repository, plus connection and migration helpers.
//!
//! # Example
//!
//! ```rust,ignore
//! use rcvis_database::{establish_connection, run_migrations, PostgresSpeechCache};
//!
//! let mut conn = establish_connection()?;
//! run_migrations(&mut conn)?;
//! let cache = PostgresSpeechCache::new(conn);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod conversions;
mod models;
mod result_repository;
pub mod schema;
mod speech_cache;

pub use connection::{establish_connection, run_migrations};
pub use models::{
    AutoMovieRow, NewAutoMovieRow, NewResultRecordRow, ResultRecordRow, SpeechCacheRow,
};
pub use result_repository::PostgresResultRepository;
pub use speech_cache::PostgresSpeechCache;

pub use rcvis_error::{DatabaseError, DatabaseErrorKind};

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
