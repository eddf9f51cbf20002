//! The result record that owns a movie.

use crate::{ElectionSummary, MovieArtifact, MovieGenerationStatus};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// A published election result and its movie state.
///
/// Owns at most one horizontal and one vertical movie and exactly one
/// generation status. Both movies are attached together or not at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct ResultRecord {
    /// Primary key
    pub id: i64,
    /// URL slug, also the stem of uploaded movie names
    pub slug: String,
    /// Tabulation summary narrated by the movie
    pub summary: ElectionSummary,
    /// Landscape variant
    #[builder(default)]
    pub movie_horizontal: Option<MovieArtifact>,
    /// Portrait variant
    #[builder(default)]
    pub movie_vertical: Option<MovieArtifact>,
    /// Current generation status
    #[builder(default)]
    pub movie_generation_status: MovieGenerationStatus,
}

impl ResultRecord {
    /// Creates a builder.
    pub fn builder() -> ResultRecordBuilder {
        ResultRecordBuilder::default()
    }

    /// Both variants, when attached.
    pub fn movies(&self) -> Option<(&MovieArtifact, &MovieArtifact)> {
        self.movie_horizontal.as_ref().zip(self.movie_vertical.as_ref())
    }
}
