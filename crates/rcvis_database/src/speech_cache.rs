//! PostgreSQL-backed speech cache.

use crate::SpeechCacheRow;
use crate::conversions::entry_from_row;
use crate::schema::tts_cached_files;
use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use rcvis_cache::validate_entry;
use rcvis_core::CachedSpeechEntry;
use rcvis_error::{DatabaseError, RcvisResult, SpeechError, SpeechErrorKind};
use rcvis_interface::SpeechCache;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Speech cache stored in the `tts_cached_files` table.
///
/// Shared by every worker and process pointed at the same database, so a
/// narration synthesized once is reused everywhere.
#[derive(Clone)]
pub struct PostgresSpeechCache {
    conn: Arc<Mutex<PgConnection>>,
}

impl std::fmt::Debug for PostgresSpeechCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresSpeechCache").finish_non_exhaustive()
    }
}

impl PostgresSpeechCache {
    /// Create a cache over a dedicated connection.
    pub fn new(conn: PgConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Create a cache from a shared connection.
    pub fn from_arc(conn: Arc<Mutex<PgConnection>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl SpeechCache for PostgresSpeechCache {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn lookup(&self, text: &str) -> RcvisResult<Option<CachedSpeechEntry>> {
        let mut conn = self.conn.lock().await;

        let row: Option<SpeechCacheRow> =
            diesel::update(tts_cached_files::table.find(text))
                .set(tts_cached_files::last_used_at.eq(Utc::now()))
                .returning(SpeechCacheRow::as_returning())
                .get_result(&mut *conn)
                .optional()
                .map_err(DatabaseError::from)?;

        debug!(hit = row.is_some(), "Speech cache lookup");
        Ok(row.map(entry_from_row))
    }

    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn store(&self, text: &str, audio_ref: &str) -> RcvisResult<CachedSpeechEntry> {
        validate_entry(text, audio_ref)?;
        let mut conn = self.conn.lock().await;

        let row = SpeechCacheRow {
            text: text.to_string(),
            audio_ref: audio_ref.to_string(),
            last_used_at: Utc::now(),
        };
        let stored: SpeechCacheRow = diesel::insert_into(tts_cached_files::table)
            .values(&row)
            .on_conflict(tts_cached_files::text)
            .do_update()
            .set((
                tts_cached_files::audio_ref.eq(&row.audio_ref),
                tts_cached_files::last_used_at.eq(row.last_used_at),
            ))
            .returning(SpeechCacheRow::as_returning())
            .get_result(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(entry_from_row(stored))
    }

    async fn touch(&self, entry: &CachedSpeechEntry) -> RcvisResult<()> {
        let mut conn = self.conn.lock().await;

        let updated = diesel::update(tts_cached_files::table.find(entry.text()))
            .set(tts_cached_files::last_used_at.eq(Utc::now()))
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;

        if updated == 0 {
            Err(SpeechError::new(SpeechErrorKind::CacheInconsistency(
                "touched entry is not cached".to_string(),
            )))?
        }
        Ok(())
    }

    async fn len(&self) -> RcvisResult<usize> {
        let mut conn = self.conn.lock().await;

        let count: i64 = tts_cached_files::table
            .count()
            .get_result(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(count as usize)
    }
}
