//! Rendered movie artifacts.

use crate::{Orientation, Resolution};
use serde::{Deserialize, Serialize};

/// A rendered movie file in the artifact store.
///
/// Created once when a render succeeds and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieArtifact {
    /// Version of the generator that produced the file
    pub generator_version: String,
    /// Store key of the uploaded file
    pub file_path: String,
    /// Resolvable URL of the uploaded file
    pub url: String,
    /// Rendered resolution
    pub resolution: Resolution,
}

impl MovieArtifact {
    /// Width in pixels.
    pub fn resolution_width(&self) -> u32 {
        self.resolution.width()
    }

    /// Height in pixels.
    pub fn resolution_height(&self) -> u32 {
        self.resolution.height()
    }

    /// Which variant this artifact is.
    pub fn orientation(&self) -> Orientation {
        self.resolution.orientation()
    }
}
