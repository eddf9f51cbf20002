//! What the presentation layer shows while a movie is produced.

use rcvis_core::{MovieGenerationStatus, ResultRecord};
use serde::{Deserialize, Serialize};

/// Movie status of one result record.
///
/// The URLs are only present once both variants are attached.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MovieStatusView {
    /// Current generation status
    pub status: MovieGenerationStatus,
    /// Landscape movie URL
    pub horizontal_url: Option<String>,
    /// Portrait movie URL
    pub vertical_url: Option<String>,
}

impl From<&ResultRecord> for MovieStatusView {
    fn from(record: &ResultRecord) -> Self {
        let status = record.movie_generation_status;
        let urls = match (status, record.movies()) {
            (MovieGenerationStatus::Complete, Some((h, v))) => Some((h.url.clone(), v.url.clone())),
            _ => None,
        };
        let (horizontal_url, vertical_url) = urls.unzip();
        Self {
            status,
            horizontal_url,
            vertical_url,
        }
    }
}
