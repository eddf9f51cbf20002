//! Conversions between domain types and rows.

use crate::{AutoMovieRow, DatabaseResult, NewAutoMovieRow, SpeechCacheRow};
use rcvis_core::{CachedSpeechEntry, MovieArtifact, MovieGenerationStatus, Resolution};
use rcvis_error::{DatabaseError, DatabaseErrorKind};
use std::str::FromStr;

pub(crate) fn entry_from_row(row: SpeechCacheRow) -> CachedSpeechEntry {
    CachedSpeechEntry::with_last_used(row.text, row.audio_ref, row.last_used_at)
}

pub(crate) fn artifact_to_new_row(artifact: &MovieArtifact) -> NewAutoMovieRow {
    NewAutoMovieRow {
        generator_version: artifact.generator_version.clone(),
        file_path: artifact.file_path.clone(),
        url: artifact.url.clone(),
        resolution_width: artifact.resolution_width() as i32,
        resolution_height: artifact.resolution_height() as i32,
    }
}

pub(crate) fn artifact_from_row(row: AutoMovieRow) -> DatabaseResult<MovieArtifact> {
    let dimension = |d: i32| u32::try_from(d).unwrap_or(0);
    let resolution = Resolution::new(
        dimension(row.resolution_width),
        dimension(row.resolution_height),
    )
    .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?;

    Ok(MovieArtifact {
        generator_version: row.generator_version,
        file_path: row.file_path,
        url: row.url,
        resolution,
    })
}

pub(crate) fn parse_status(s: &str) -> DatabaseResult<MovieGenerationStatus> {
    MovieGenerationStatus::from_str(s).map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Query(format!(
            "unknown movie generation status: {}",
            s
        )))
    })
}
