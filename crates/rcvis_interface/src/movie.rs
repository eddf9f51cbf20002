//! Result persistence and narration seams.

use async_trait::async_trait;
use rcvis_core::{MovieArtifact, MovieGenerationStatus, ResultRecord, RoundNarration};
use rcvis_error::RcvisResult;

/// Persistence for result records and their movie status.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Loads a record by id.
    async fn load(&self, id: i64) -> RcvisResult<ResultRecord>;

    /// Loads a record by slug, if one exists.
    async fn find_by_slug(&self, slug: &str) -> RcvisResult<Option<ResultRecord>>;

    /// Moves the record to `status`.
    ///
    /// Entering `NotStarted` or `Failed` detaches any previous movies.
    ///
    /// # Errors
    ///
    /// Rejects transitions the status machine does not allow.
    async fn set_status(&self, id: i64, status: MovieGenerationStatus) -> RcvisResult<()>;

    /// Moves the record to `NotStarted` if it accepts a new request.
    ///
    /// Returns `false` without changing anything when a job is already
    /// queued or running. The check and the update happen in one step.
    async fn mark_requested(&self, id: i64) -> RcvisResult<bool>;

    /// Attaches both variants and marks the record complete in one step.
    ///
    /// Observers never see one movie without the other.
    async fn complete_with_movies(
        &self,
        id: i64,
        horizontal: MovieArtifact,
        vertical: MovieArtifact,
    ) -> RcvisResult<()>;
}

/// Supplies the narration script read over each round.
pub trait NarrationSource: Send + Sync {
    /// Narration for every round of `record`, in round order.
    fn describe_all_rounds(&self, record: &ResultRecord) -> RcvisResult<Vec<RoundNarration>>;
}
