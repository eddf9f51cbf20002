//! Artifact storage for RCVis.
//!
//! Cached narration audio and finished movies are both written through the
//! [`ArtifactStore`](rcvis_interface::ArtifactStore) trait. This crate ships
//! the local filesystem backend; object stores implement the same trait.
//!
//! # Example
//!
//! ```rust,no_run
//! use rcvis_interface::ArtifactStore;
//! use rcvis_storage::FileSystemArtifactStore;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileSystemArtifactStore::new("/var/rcvis/media", "https://media.example.com")?;
//! let url = store.put(Path::new("/tmp/render.mp4"), "movies/portland-1a2b.mp4").await?;
//! assert_eq!(url, "https://media.example.com/movies/portland-1a2b.mp4");
//! # Ok(())
//! # }
//! ```

mod filesystem;

pub use filesystem::FileSystemArtifactStore;
