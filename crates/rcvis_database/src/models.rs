//! Diesel models for the RCVis tables.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Database row for tts_cached_files table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::tts_cached_files)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SpeechCacheRow {
    pub text: String,
    pub audio_ref: String,
    pub last_used_at: DateTime<Utc>,
}

/// Database row for auto_movies table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::auto_movies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AutoMovieRow {
    pub id: i64,
    pub generator_version: String,
    pub file_path: String,
    pub url: String,
    pub resolution_width: i32,
    pub resolution_height: i32,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for auto_movies table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::auto_movies)]
pub struct NewAutoMovieRow {
    pub generator_version: String,
    pub file_path: String,
    pub url: String,
    pub resolution_width: i32,
    pub resolution_height: i32,
}

/// Database row for result_records table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::result_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ResultRecordRow {
    pub id: i64,
    pub slug: String,
    pub summary: String,
    pub movie_horizontal_id: Option<i64>,
    pub movie_vertical_id: Option<i64>,
    pub movie_generation_status: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for result_records table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::result_records)]
pub struct NewResultRecordRow {
    pub slug: String,
    pub summary: String,
    pub movie_generation_status: String,
}
