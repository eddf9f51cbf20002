//! Creating both movie variants for a result record.

use crate::{SingleMovieRenderer, parse_base_url};
use rcvis_core::{MovieArtifact, MovieGenerationStatus, ResultRecord};
use rcvis_error::RcvisResult;
use rcvis_interface::{NarrationSource, ResultRepository};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Drives a full movie creation and owns the record's status.
///
/// Every failure inside an attempt collapses into `Failed`, and the two
/// variants are attached together or not at all.
#[derive(Clone)]
pub struct MovieCreationOrchestrator {
    repository: Arc<dyn ResultRepository>,
    narration: Arc<dyn NarrationSource>,
    renderer: SingleMovieRenderer,
}

impl std::fmt::Debug for MovieCreationOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieCreationOrchestrator")
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}

impl MovieCreationOrchestrator {
    /// Creates an orchestrator.
    pub fn new(
        repository: Arc<dyn ResultRepository>,
        narration: Arc<dyn NarrationSource>,
        renderer: SingleMovieRenderer,
    ) -> Self {
        Self {
            repository,
            narration,
            renderer,
        }
    }

    /// The repository holding result records.
    pub fn repository(&self) -> &Arc<dyn ResultRepository> {
        &self.repository
    }

    /// Renders and attaches both variants for `record_id`.
    ///
    /// A record that was never requested, or whose last attempt finished,
    /// is requested implicitly. A record already being rendered is left
    /// alone. Returns the status the record ends in.
    ///
    /// # Errors
    ///
    /// Only repository failures are returned as errors; a failed render is
    /// reported as `Ok(Failed)`.
    #[instrument(skip(self))]
    pub async fn create_movie(
        &self,
        record_id: i64,
        base_url: &str,
    ) -> RcvisResult<MovieGenerationStatus> {
        let record = self.repository.load(record_id).await?;
        let status = record.movie_generation_status;

        if status == MovieGenerationStatus::InProgress {
            warn!(record_id, "Movie already in progress, skipping");
            return Ok(status);
        }
        if status.accepts_request() {
            self.repository
                .set_status(record_id, MovieGenerationStatus::NotStarted)
                .await?;
        }
        self.repository
            .set_status(record_id, MovieGenerationStatus::InProgress)
            .await?;
        info!(record_id, slug = %record.slug, "Movie creation started");

        let completed = match self.render_variants(&record, base_url).await {
            Ok((horizontal, vertical)) => {
                self.repository
                    .complete_with_movies(record_id, horizontal, vertical)
                    .await
            }
            Err(e) => Err(e),
        };

        match completed {
            Ok(()) => {
                info!(record_id, "Movie creation complete");
                Ok(MovieGenerationStatus::Complete)
            }
            Err(e) => {
                error!(record_id, error = %e, "Movie creation failed");
                self.repository
                    .set_status(record_id, MovieGenerationStatus::Failed)
                    .await?;
                Ok(MovieGenerationStatus::Failed)
            }
        }
    }

    async fn render_variants(
        &self,
        record: &ResultRecord,
        base_url: &str,
    ) -> RcvisResult<(MovieArtifact, MovieArtifact)> {
        parse_base_url(base_url)?;
        let narration = self.narration.describe_all_rounds(record)?;
        let config = self.renderer.config();

        tokio::try_join!(
            self.renderer
                .render(record, &narration, *config.horizontal(), base_url),
            self.renderer
                .render(record, &narration, *config.vertical(), base_url),
        )
    }
}
