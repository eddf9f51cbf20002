//! Tests for the in-memory speech cache.

use rcvis_cache::InMemorySpeechCache;
use rcvis_core::CachedSpeechEntry;
use rcvis_error::{RcvisErrorKind, SpeechErrorKind};
use rcvis_interface::SpeechCache;
use std::time::Duration;

#[tokio::test]
async fn test_lookup_miss_then_hit() {
    let cache = InMemorySpeechCache::new();
    assert!(cache.lookup("a").await.unwrap().is_none());

    cache.store("a", "speech-synth/a.mp3").await.unwrap();

    let entry = cache.lookup("a").await.unwrap().unwrap();
    assert_eq!(entry.text(), "a");
    assert_eq!(entry.audio_ref(), "speech-synth/a.mp3");
    assert_eq!(cache.len().await.unwrap(), 1);
}

#[tokio::test]
async fn test_store_is_idempotent_upsert() {
    let cache = InMemorySpeechCache::new();
    cache.store("same text", "speech-synth/1.mp3").await.unwrap();
    cache.store("same text", "speech-synth/2.mp3").await.unwrap();

    assert_eq!(cache.len().await.unwrap(), 1);
    let entry = cache.lookup("same text").await.unwrap().unwrap();
    assert_eq!(entry.audio_ref(), "speech-synth/2.mp3");
}

#[tokio::test]
async fn test_lookup_refreshes_last_used() {
    let cache = InMemorySpeechCache::new();
    let stored = cache.store("t", "r").await.unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;
    let hit = cache.lookup("t").await.unwrap().unwrap();

    assert!(hit.last_used_at() > stored.last_used_at());
}

#[tokio::test]
async fn test_oversized_text_is_rejected_without_a_row() {
    let cache = InMemorySpeechCache::new();

    let err = cache.store(&"x".repeat(2049), "r").await.unwrap_err();
    assert!(err.is_validation());
    assert!(cache.is_empty().await.unwrap());

    cache.store(&"x".repeat(2048), "r").await.unwrap();
    assert_eq!(cache.len().await.unwrap(), 1);
}

#[tokio::test]
async fn test_touch_of_unknown_entry_is_inconsistency() {
    let cache = InMemorySpeechCache::new();
    let stray = CachedSpeechEntry::new("never stored", "r");

    let err = cache.touch(&stray).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        RcvisErrorKind::Speech(e) if matches!(e.kind, SpeechErrorKind::CacheInconsistency(_))
    ));
}

#[tokio::test]
async fn test_clones_share_entries() {
    let cache = InMemorySpeechCache::new();
    let other = cache.clone();
    other.store("shared", "r").await.unwrap();
    assert!(cache.lookup("shared").await.unwrap().is_some());
}
