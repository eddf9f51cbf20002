//! In-memory implementation of ResultRepository.
//!
//! Records live in a HashMap protected by an RwLock. All data is lost when
//! the repository is dropped.

use async_trait::async_trait;
use rcvis_core::{MovieArtifact, MovieGenerationStatus, ResultRecord};
use rcvis_error::{BackendError, RcvisError, RcvisResult};
use rcvis_interface::ResultRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// In-memory repository for result records.
///
/// # Example
///
/// ```
/// use rcvis_core::{ElectionSummary, MovieGenerationStatus, ResultRecord};
/// use rcvis_interface::ResultRepository;
/// use rcvis_movie::InMemoryResultRepository;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let repo = InMemoryResultRepository::new();
/// repo.insert(
///     ResultRecord::builder()
///         .id(1)
///         .slug("mayor")
///         .summary(ElectionSummary::default())
///         .build()?,
/// )
/// .await;
///
/// assert!(repo.mark_requested(1).await?);
/// assert!(!repo.mark_requested(1).await?);
/// assert!(repo.set_status(1, MovieGenerationStatus::Complete).await.is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryResultRepository {
    records: Arc<RwLock<HashMap<i64, ResultRecord>>>,
}

fn not_found(what: impl std::fmt::Display) -> RcvisError {
    BackendError::new(format!("Result record {} not found", what)).into()
}

fn illegal_transition(id: i64, from: MovieGenerationStatus, to: MovieGenerationStatus) -> RcvisError {
    BackendError::new(format!(
        "Result record {} cannot move from {} to {}",
        id, from, to
    ))
    .into()
}

impl InMemoryResultRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a record.
    pub async fn insert(&self, record: ResultRecord) {
        self.records.write().await.insert(record.id, record);
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl ResultRepository for InMemoryResultRepository {
    async fn load(&self, id: i64) -> RcvisResult<ResultRecord> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn find_by_slug(&self, slug: &str) -> RcvisResult<Option<ResultRecord>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|r| r.slug == slug)
            .cloned())
    }

    async fn set_status(&self, id: i64, status: MovieGenerationStatus) -> RcvisResult<()> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or_else(|| not_found(id))?;
        let from = record.movie_generation_status;
        if !from.can_transition_to(status) {
            return Err(illegal_transition(id, from, status));
        }
        record.movie_generation_status = status;
        if status.clears_movies() {
            record.movie_horizontal = None;
            record.movie_vertical = None;
        }
        info!(record_id = id, %from, to = %status, "Movie status changed");
        Ok(())
    }

    async fn mark_requested(&self, id: i64) -> RcvisResult<bool> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or_else(|| not_found(id))?;
        if !record.movie_generation_status.accepts_request() {
            return Ok(false);
        }
        let from = record.movie_generation_status;
        record.movie_generation_status = MovieGenerationStatus::NotStarted;
        record.movie_horizontal = None;
        record.movie_vertical = None;
        info!(record_id = id, %from, to = %MovieGenerationStatus::NotStarted, "Movie status changed");
        Ok(true)
    }

    async fn complete_with_movies(
        &self,
        id: i64,
        horizontal: MovieArtifact,
        vertical: MovieArtifact,
    ) -> RcvisResult<()> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or_else(|| not_found(id))?;
        let from = record.movie_generation_status;
        if !from.can_transition_to(MovieGenerationStatus::Complete) {
            return Err(illegal_transition(id, from, MovieGenerationStatus::Complete));
        }
        record.movie_horizontal = Some(horizontal);
        record.movie_vertical = Some(vertical);
        record.movie_generation_status = MovieGenerationStatus::Complete;
        info!(record_id = id, "Movie completed");
        Ok(())
    }
}
