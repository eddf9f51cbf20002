//! Artifact storage, frame and composition seams.

use async_trait::async_trait;
use rcvis_core::{Resolution, ResultRecord};
use rcvis_error::RcvisResult;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Store for cached audio and finished movies.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Copies `local_file` to `path` and returns its resolvable URL.
    ///
    /// An existing object at `path` is replaced.
    async fn put(&self, local_file: &Path, path: &str) -> RcvisResult<String>;

    /// Copies the object at `path` to `dest`.
    async fn get(&self, path: &str, dest: &Path) -> RcvisResult<()>;

    /// Whether an object exists at `path`.
    async fn exists(&self, path: &str) -> RcvisResult<bool>;

    /// The URL `put` returned (or would return) for `path`.
    fn url(&self, path: &str) -> String;
}

/// Renders the visual frame shown during one round.
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Writes a still image of `round` for `record` at `resolution` into `dest`.
    ///
    /// `base_url` locates the remote visualization the frame is taken from.
    async fn render_frame(
        &self,
        base_url: &str,
        record: &ResultRecord,
        round: usize,
        resolution: Resolution,
        dest: &Path,
    ) -> RcvisResult<()>;
}

/// One still frame held on screen, optionally with narration.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Still image
    pub frame: PathBuf,
    /// Narrated audio; the segment lasts as long as the audio when present
    pub audio: Option<PathBuf>,
    /// Duration used when there is no audio
    pub fallback_duration: Duration,
}

/// Concatenates segments into one video file.
#[async_trait]
pub trait VideoComposer: Send + Sync {
    /// Writes a movie at `resolution` made of `segments`, in order, to `output`.
    async fn compose(
        &self,
        segments: &[Segment],
        resolution: Resolution,
        output: &Path,
    ) -> RcvisResult<()>;
}
