//! PostgreSQL-backed result repository.

use crate::conversions::{artifact_from_row, artifact_to_new_row, parse_status};
use crate::schema::{auto_movies, result_records};
use crate::{AutoMovieRow, DatabaseResult, NewResultRecordRow, ResultRecordRow};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use rcvis_core::{ElectionSummary, MovieArtifact, MovieGenerationStatus, ResultRecord};
use rcvis_error::{DatabaseError, DatabaseErrorKind, RcvisResult};
use rcvis_interface::ResultRepository;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Result records stored in `result_records`, with movies in `auto_movies`.
///
/// Status changes lock the record row, so concurrent workers observe the
/// status machine in a single order.
#[derive(Clone)]
pub struct PostgresResultRepository {
    conn: Arc<Mutex<PgConnection>>,
}

impl std::fmt::Debug for PostgresResultRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresResultRepository")
            .finish_non_exhaustive()
    }
}

impl PostgresResultRepository {
    /// Create a repository over a dedicated connection.
    pub fn new(conn: PgConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Create a repository from a shared connection.
    pub fn from_arc(conn: Arc<Mutex<PgConnection>>) -> Self {
        Self { conn }
    }

    /// Inserts a new result with no movies.
    #[instrument(skip(self, summary))]
    pub async fn insert_record(
        &self,
        slug: &str,
        summary: &ElectionSummary,
    ) -> RcvisResult<ResultRecord> {
        let summary = serde_json::to_string(summary)
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?;
        let new_row = NewResultRecordRow {
            slug: slug.to_string(),
            summary,
            movie_generation_status: MovieGenerationStatus::NotRequested.to_string(),
        };

        let mut conn = self.conn.lock().await;
        let row: ResultRecordRow = diesel::insert_into(result_records::table)
            .values(&new_row)
            .returning(ResultRecordRow::as_returning())
            .get_result(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(record_from_row(&mut *conn, row)?)
    }
}

fn load_movie(conn: &mut PgConnection, id: Option<i64>) -> DatabaseResult<Option<MovieArtifact>> {
    let Some(id) = id else {
        return Ok(None);
    };
    let row: AutoMovieRow = auto_movies::table
        .find(id)
        .select(AutoMovieRow::as_select())
        .first(conn)?;
    artifact_from_row(row).map(Some)
}

fn record_from_row(conn: &mut PgConnection, row: ResultRecordRow) -> DatabaseResult<ResultRecord> {
    let summary: ElectionSummary = serde_json::from_str(&row.summary)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?;

    Ok(ResultRecord {
        id: row.id,
        slug: row.slug,
        summary,
        movie_horizontal: load_movie(conn, row.movie_horizontal_id)?,
        movie_vertical: load_movie(conn, row.movie_vertical_id)?,
        movie_generation_status: parse_status(&row.movie_generation_status)?,
    })
}

/// Reads the record's status while holding its row lock.
fn locked_status(conn: &mut PgConnection, id: i64) -> DatabaseResult<MovieGenerationStatus> {
    let status: String = result_records::table
        .find(id)
        .select(result_records::movie_generation_status)
        .for_update()
        .first(conn)?;
    parse_status(&status)
}

fn ensure_transition(
    id: i64,
    from: MovieGenerationStatus,
    to: MovieGenerationStatus,
) -> DatabaseResult<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(DatabaseError::new(DatabaseErrorKind::Conflict(format!(
            "record {} cannot move from {} to {}",
            id, from, to
        ))))
    }
}

#[async_trait]
impl ResultRepository for PostgresResultRepository {
    async fn load(&self, id: i64) -> RcvisResult<ResultRecord> {
        let mut conn = self.conn.lock().await;

        let row: ResultRecordRow = result_records::table
            .find(id)
            .select(ResultRecordRow::as_select())
            .first(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(record_from_row(&mut *conn, row)?)
    }

    async fn find_by_slug(&self, slug: &str) -> RcvisResult<Option<ResultRecord>> {
        let mut conn = self.conn.lock().await;

        let row: Option<ResultRecordRow> = result_records::table
            .filter(result_records::slug.eq(slug))
            .select(ResultRecordRow::as_select())
            .first(&mut *conn)
            .optional()
            .map_err(DatabaseError::from)?;

        match row {
            Some(row) => Ok(Some(record_from_row(&mut *conn, row)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn set_status(&self, id: i64, status: MovieGenerationStatus) -> RcvisResult<()> {
        let mut conn = self.conn.lock().await;

        conn.transaction::<_, DatabaseError, _>(|conn| {
            let current = locked_status(conn, id)?;
            ensure_transition(id, current, status)?;

            let target = result_records::table.find(id);
            if status.clears_movies() {
                diesel::update(target)
                    .set((
                        result_records::movie_generation_status.eq(status.to_string()),
                        result_records::movie_horizontal_id.eq(None::<i64>),
                        result_records::movie_vertical_id.eq(None::<i64>),
                    ))
                    .execute(conn)?;
            } else {
                diesel::update(target)
                    .set(result_records::movie_generation_status.eq(status.to_string()))
                    .execute(conn)?;
            }
            Ok(())
        })?;

        debug!("Status updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_requested(&self, id: i64) -> RcvisResult<bool> {
        let mut conn = self.conn.lock().await;

        let marked = conn.transaction::<_, DatabaseError, _>(|conn| {
            if !locked_status(conn, id)?.accepts_request() {
                return Ok(false);
            }
            diesel::update(result_records::table.find(id))
                .set((
                    result_records::movie_generation_status
                        .eq(MovieGenerationStatus::NotStarted.to_string()),
                    result_records::movie_horizontal_id.eq(None::<i64>),
                    result_records::movie_vertical_id.eq(None::<i64>),
                ))
                .execute(conn)?;
            Ok(true)
        })?;

        debug!(marked, "Request recorded");
        Ok(marked)
    }

    #[instrument(skip(self, horizontal, vertical))]
    async fn complete_with_movies(
        &self,
        id: i64,
        horizontal: MovieArtifact,
        vertical: MovieArtifact,
    ) -> RcvisResult<()> {
        let mut conn = self.conn.lock().await;

        conn.transaction::<_, DatabaseError, _>(|conn| {
            let current = locked_status(conn, id)?;
            ensure_transition(id, current, MovieGenerationStatus::Complete)?;

            let rows = vec![
                artifact_to_new_row(&horizontal),
                artifact_to_new_row(&vertical),
            ];
            let ids: Vec<i64> = diesel::insert_into(auto_movies::table)
                .values(&rows)
                .returning(auto_movies::id)
                .get_results(conn)?;
            let [horizontal_id, vertical_id] = ids[..] else {
                return Err(DatabaseError::new(DatabaseErrorKind::Query(format!(
                    "expected 2 inserted movies, got {}",
                    ids.len()
                ))));
            };

            diesel::update(result_records::table.find(id))
                .set((
                    result_records::movie_horizontal_id.eq(Some(horizontal_id)),
                    result_records::movie_vertical_id.eq(Some(vertical_id)),
                    result_records::movie_generation_status
                        .eq(MovieGenerationStatus::Complete.to_string()),
                ))
                .execute(conn)?;
            Ok(())
        })?;

        debug!("Movies attached");
        Ok(())
    }
}
