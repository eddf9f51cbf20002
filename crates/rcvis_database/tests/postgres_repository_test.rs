//! Tests for the PostgreSQL speech cache and result repository.
//!
//! These tests require a running PostgreSQL database named by
//! `DATABASE_URL`.

#![cfg(feature = "postgres-tests")]

use chrono::Utc;
use diesel::prelude::*;
use rcvis_core::{
    ElectionSummary, GENERATOR_VERSION, MovieArtifact, MovieGenerationStatus, Resolution,
};
use rcvis_database::{
    PostgresResultRepository, PostgresSpeechCache, establish_connection, run_migrations, schema,
};
use rcvis_interface::{ResultRepository, SpeechCache};

fn migrated_connection() -> PgConnection {
    let mut conn = establish_connection().expect("Failed to establish test database connection");
    run_migrations(&mut conn).expect("Failed to run migrations");
    conn
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

fn cleanup_slug(slug: &str) {
    let mut conn = migrated_connection();
    let _ = diesel::delete(schema::result_records::table.filter(schema::result_records::slug.eq(slug)))
        .execute(&mut conn);
}

fn cleanup_text(text: &str) {
    let mut conn = migrated_connection();
    let _ = diesel::delete(schema::tts_cached_files::table.find(text)).execute(&mut conn);
}

fn artifact(resolution: Resolution, name: &str) -> MovieArtifact {
    MovieArtifact {
        generator_version: GENERATOR_VERSION.to_string(),
        file_path: format!("movies/{}.mp4", name),
        url: format!("https://media.test/movies/{}.mp4", name),
        resolution,
    }
}

#[tokio::test]
async fn test_speech_cache_upsert_and_lookup() {
    let cache = PostgresSpeechCache::new(migrated_connection());
    let text = unique("Alice has been elected");

    assert!(cache.lookup(&text).await.unwrap().is_none());

    let first = cache.store(&text, "speech-synth/a.mp3").await.unwrap();
    let second = cache.store(&text, "speech-synth/b.mp3").await.unwrap();
    assert_eq!(second.audio_ref(), "speech-synth/b.mp3");
    assert!(second.last_used_at() >= first.last_used_at());

    let hit = cache.lookup(&text).await.unwrap().unwrap();
    assert_eq!(hit.audio_ref(), "speech-synth/b.mp3");
    assert!(hit.last_used_at() >= second.last_used_at());

    cleanup_text(&text);
}

#[tokio::test]
async fn test_speech_cache_rejects_oversized_text() {
    let cache = PostgresSpeechCache::new(migrated_connection());
    let before = cache.len().await.unwrap();

    let err = cache
        .store(&"x".repeat(2049), "speech-synth/x.mp3")
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(cache.len().await.unwrap(), before);
}

#[tokio::test]
async fn test_result_repository_status_machine() {
    let repo = PostgresResultRepository::new(migrated_connection());
    let slug = unique("oneround");
    let record = repo
        .insert_record(&slug, &ElectionSummary::default())
        .await
        .unwrap();
    assert_eq!(record.movie_generation_status, MovieGenerationStatus::NotRequested);

    assert!(
        repo.set_status(record.id, MovieGenerationStatus::InProgress)
            .await
            .is_err()
    );
    repo.set_status(record.id, MovieGenerationStatus::NotStarted)
        .await
        .unwrap();
    repo.set_status(record.id, MovieGenerationStatus::InProgress)
        .await
        .unwrap();

    let found = repo.find_by_slug(&slug).await.unwrap().unwrap();
    assert_eq!(found.movie_generation_status, MovieGenerationStatus::InProgress);
    assert!(found.movies().is_none());

    cleanup_slug(&slug);
}

#[tokio::test]
async fn test_complete_with_movies_attaches_both_variants() {
    let repo = PostgresResultRepository::new(migrated_connection());
    let slug = unique("multiwinner");
    let record = repo
        .insert_record(&slug, &ElectionSummary::default())
        .await
        .unwrap();

    // Not in progress yet, so nothing is attached
    assert!(
        repo.complete_with_movies(
            record.id,
            artifact(Resolution::HORIZONTAL, "h"),
            artifact(Resolution::VERTICAL, "v"),
        )
        .await
        .is_err()
    );
    assert!(repo.load(record.id).await.unwrap().movies().is_none());

    repo.set_status(record.id, MovieGenerationStatus::NotStarted)
        .await
        .unwrap();
    repo.set_status(record.id, MovieGenerationStatus::InProgress)
        .await
        .unwrap();
    repo.complete_with_movies(
        record.id,
        artifact(Resolution::HORIZONTAL, "h"),
        artifact(Resolution::VERTICAL, "v"),
    )
    .await
    .unwrap();

    let loaded = repo.load(record.id).await.unwrap();
    assert_eq!(loaded.movie_generation_status, MovieGenerationStatus::Complete);
    let (horizontal, vertical) = loaded.movies().unwrap();
    assert_eq!(horizontal.resolution, Resolution::HORIZONTAL);
    assert_eq!(vertical.resolution, Resolution::VERTICAL);

    cleanup_slug(&slug);
}

#[tokio::test]
async fn test_unknown_slug_is_none() {
    let repo = PostgresResultRepository::new(migrated_connection());
    assert!(repo.find_by_slug(&unique("missing")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_new_attempt_detaches_previous_movies() {
    let repo = PostgresResultRepository::new(migrated_connection());
    let slug = unique("rerun");
    let record = repo
        .insert_record(&slug, &ElectionSummary::default())
        .await
        .unwrap();

    assert!(repo.mark_requested(record.id).await.unwrap());
    repo.set_status(record.id, MovieGenerationStatus::InProgress)
        .await
        .unwrap();
    repo.complete_with_movies(
        record.id,
        artifact(Resolution::HORIZONTAL, "h"),
        artifact(Resolution::VERTICAL, "v"),
    )
    .await
    .unwrap();
    assert!(repo.load(record.id).await.unwrap().movies().is_some());

    assert!(repo.mark_requested(record.id).await.unwrap());
    assert!(!repo.mark_requested(record.id).await.unwrap());
    let pending = repo.load(record.id).await.unwrap();
    assert_eq!(pending.movie_generation_status, MovieGenerationStatus::NotStarted);
    assert!(pending.movie_horizontal.is_none());
    assert!(pending.movie_vertical.is_none());

    repo.set_status(record.id, MovieGenerationStatus::Failed)
        .await
        .unwrap();
    let failed = repo.load(record.id).await.unwrap();
    assert_eq!(failed.movie_generation_status, MovieGenerationStatus::Failed);
    assert!(failed.movies().is_none());

    cleanup_slug(&slug);
}
