//! Tests for speech synthesis tasks against a scripted service.

use async_trait::async_trait;
use rcvis_cache::InMemorySpeechCache;
use rcvis_error::{RcvisErrorKind, RcvisResult, SpeechErrorKind};
use rcvis_interface::{ArtifactStore, SpeechCache, SynthesisClient, SynthesisStatus};
use rcvis_speech::{SynthesisConfig, TaskState, TextToSpeechService};
use rcvis_storage::FileSystemArtifactStore;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

/// Service that answers polls from a script, repeating the last answer.
struct ScriptedClient {
    statuses: Mutex<VecDeque<SynthesisStatus>>,
    spawns: AtomicUsize,
    polls: AtomicUsize,
}

impl ScriptedClient {
    fn new(statuses: Vec<SynthesisStatus>) -> Arc<Self> {
        Arc::new(Self {
            statuses: Mutex::new(statuses.into()),
            spawns: AtomicUsize::new(0),
            polls: AtomicUsize::new(0),
        })
    }

    fn completes_after(pending: usize) -> Arc<Self> {
        let mut script = vec![SynthesisStatus::pending(); pending];
        script.push(SynthesisStatus::completed("https://tts.test/out.mp3"));
        Self::new(script)
    }

    fn spawns(&self) -> usize {
        self.spawns.load(Ordering::SeqCst)
    }

    fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SynthesisClient for ScriptedClient {
    async fn spawn(&self, _text: &str) -> RcvisResult<String> {
        let n = self.spawns.fetch_add(1, Ordering::SeqCst);
        Ok(format!("task-{}", n))
    }

    async fn status(&self, _task_id: &str) -> RcvisResult<SynthesisStatus> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let mut statuses = self.statuses.lock().unwrap();
        if statuses.len() > 1 {
            Ok(statuses.pop_front().unwrap())
        } else {
            Ok(statuses.front().cloned().unwrap_or_else(SynthesisStatus::pending))
        }
    }

    async fn fetch(&self, _output_uri: &str) -> RcvisResult<Vec<u8>> {
        Ok(b"ID3 fake audio".to_vec())
    }
}

struct Fixture {
    _dir: TempDir,
    work: TempDir,
    cache: Arc<InMemorySpeechCache>,
    store: Arc<FileSystemArtifactStore>,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let store = FileSystemArtifactStore::new(dir.path(), "https://media.test").unwrap();
        Self {
            _dir: dir,
            work: TempDir::new().unwrap(),
            cache: Arc::new(InMemorySpeechCache::default()),
            store: Arc::new(store),
        }
    }

    fn service(&self, client: Arc<ScriptedClient>) -> TextToSpeechService {
        let config = SynthesisConfig::builder()
            .timeout(Duration::from_secs(5))
            .initial_backoff(Duration::from_millis(2))
            .max_backoff(Duration::from_millis(10))
            .build()
            .unwrap();
        TextToSpeechService::new(client, self.cache.clone(), self.store.clone(), config)
    }
}

#[tokio::test]
async fn test_pending_then_completed() {
    let fixture = Fixture::new();
    let client = ScriptedClient::completes_after(2);
    let service = fixture.service(client.clone());
    let dest = fixture.work.path().join("a.mp3");

    let task = service.text_to_speech("Who won?");
    assert!(!task.download_if_ready(&dest).await.unwrap());
    assert!(!task.download_if_ready(&dest).await.unwrap());
    assert!(task.download_if_ready(&dest).await.unwrap());

    assert_eq!(client.spawns(), 1, "one remote synthesis per task");
    assert_eq!(client.polls(), 3);
    assert_eq!(std::fs::read(&dest).unwrap(), b"ID3 fake audio");
    assert!(matches!(task.state().await, TaskState::Ready { .. }));

    let entries = fixture.cache.entries().await;
    let entry = entries.iter().find(|e| e.text() == "Who won?").unwrap();
    assert!(fixture.store.exists(entry.audio_ref()).await.unwrap());
}

#[tokio::test]
async fn test_cache_hit_skips_service() {
    let fixture = Fixture::new();
    let first = ScriptedClient::completes_after(0);
    let dest = fixture.work.path().join("first.mp3");
    fixture
        .service(first.clone())
        .text_to_speech("Same text")
        .download_synchronously(&dest)
        .await
        .unwrap();
    assert_eq!(first.spawns(), 1);

    let second = ScriptedClient::completes_after(0);
    let dest = fixture.work.path().join("second.mp3");
    let task = fixture.service(second.clone()).text_to_speech("Same text");
    assert!(task.download_if_ready(&dest).await.unwrap());

    assert_eq!(second.spawns(), 0);
    assert_eq!(second.polls(), 0);
    assert_eq!(fixture.cache.len().await.unwrap(), 1);
    assert_eq!(std::fs::read(&dest).unwrap(), b"ID3 fake audio");
}

#[tokio::test]
async fn test_text_at_limit_is_synthesized() {
    let fixture = Fixture::new();
    let client = ScriptedClient::completes_after(0);
    let task = fixture.service(client.clone()).text_to_speech("a".repeat(2048));
    let dest = fixture.work.path().join("limit.mp3");

    assert!(task.download_if_ready(&dest).await.unwrap());
    assert_eq!(fixture.cache.len().await.unwrap(), 1);
    assert_eq!(client.spawns(), 1);
}

#[tokio::test]
async fn test_text_over_limit_is_rejected_without_side_effects() {
    let fixture = Fixture::new();
    let client = ScriptedClient::completes_after(0);
    let task = fixture.service(client.clone()).text_to_speech("a".repeat(2049));
    let dest = fixture.work.path().join("over.mp3");

    assert!(!task.download_if_ready(&dest).await.unwrap());
    assert!(!task.download_if_ready(&dest).await.unwrap());
    assert!(matches!(
        task.state().await,
        TaskState::Failed(SpeechErrorKind::Validation(_))
    ));
    assert_eq!(client.spawns(), 0);
    assert!(fixture.cache.is_empty().await.unwrap());
    assert!(!dest.exists());

    let err = task.download_synchronously(&dest).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(client.polls(), 0);
}

#[tokio::test]
async fn test_multibyte_length_counts_characters() {
    let fixture = Fixture::new();
    let client = ScriptedClient::completes_after(0);
    // 2048 characters, 4096 bytes
    let task = fixture.service(client.clone()).text_to_speech("é".repeat(2048));
    let dest = fixture.work.path().join("accent.mp3");

    assert!(task.download_if_ready(&dest).await.unwrap());
}

#[tokio::test]
async fn test_download_synchronously_waits_for_completion() {
    let fixture = Fixture::new();
    let client = ScriptedClient::completes_after(4);
    let task = fixture.service(client.clone()).text_to_speech("Round one");
    let dest = fixture.work.path().join("sync.mp3");

    task.download_synchronously(&dest).await.unwrap();

    assert_eq!(client.spawns(), 1);
    assert_eq!(client.polls(), 5);
    assert_eq!(std::fs::read(&dest).unwrap(), b"ID3 fake audio");
}

#[tokio::test]
async fn test_concurrent_requests_for_one_text_synthesize_once() {
    let fixture = Fixture::new();
    let client = ScriptedClient::completes_after(3);
    let service = fixture.service(client.clone());
    let other = service.clone();
    let wide = fixture.work.path().join("wide.mp3");
    let tall = fixture.work.path().join("tall.mp3");

    let (first, second) = tokio::join!(
        service.download_speech("Round two", &wide),
        other.download_speech("Round two", &tall),
    );
    first.unwrap();
    second.unwrap();

    assert_eq!(client.spawns(), 1);
    assert_eq!(fixture.cache.len().await.unwrap(), 1);
    assert_eq!(std::fs::read(&wide).unwrap(), b"ID3 fake audio");
    assert_eq!(std::fs::read(&tall).unwrap(), b"ID3 fake audio");
}

#[tokio::test]
async fn test_different_texts_each_synthesize() {
    let fixture = Fixture::new();
    let client = ScriptedClient::completes_after(0);
    let service = fixture.service(client.clone());
    let a = fixture.work.path().join("a.mp3");
    let b = fixture.work.path().join("b.mp3");

    let (first, second) = tokio::join!(
        service.download_speech("Round one", &a),
        service.download_speech("Round two", &b),
    );
    first.unwrap();
    second.unwrap();

    assert_eq!(client.spawns(), 2);
    assert_eq!(fixture.cache.len().await.unwrap(), 2);
}

#[tokio::test]
async fn test_failed_synthesis_is_fatal() {
    let fixture = Fixture::new();
    let client = ScriptedClient::new(vec![
        SynthesisStatus::pending(),
        SynthesisStatus::failed(),
    ]);
    let task = fixture.service(client.clone()).text_to_speech("Doomed");
    let dest = fixture.work.path().join("failed.mp3");

    let err = task.download_synchronously(&dest).await.unwrap_err();
    match err.kind() {
        RcvisErrorKind::Speech(e) => {
            assert!(matches!(e.kind, SpeechErrorKind::SynthesisFailed(_)))
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(client.polls(), 2, "failure is not retried");
    assert!(fixture.cache.is_empty().await.unwrap());
}

#[tokio::test]
async fn test_timeout_is_fatal() {
    let fixture = Fixture::new();
    let client = ScriptedClient::new(vec![SynthesisStatus::pending()]);
    let config = SynthesisConfig::builder()
        .timeout(Duration::from_millis(50))
        .initial_backoff(Duration::from_millis(2))
        .max_backoff(Duration::from_millis(5))
        .build()
        .unwrap();
    let service = TextToSpeechService::new(
        client.clone(),
        fixture.cache.clone(),
        fixture.store.clone(),
        config,
    );
    let task = service.text_to_speech("Never finishes");
    let dest = fixture.work.path().join("timeout.mp3");

    let err = task.download_synchronously(&dest).await.unwrap_err();
    match err.kind() {
        RcvisErrorKind::Speech(e) => assert!(matches!(e.kind, SpeechErrorKind::Timeout(_))),
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(client.spawns(), 1);
    assert!(client.polls() > 1);
    assert!(fixture.cache.is_empty().await.unwrap());
}

#[tokio::test]
async fn test_cache_hit_with_missing_audio_is_inconsistent() {
    let fixture = Fixture::new();
    fixture
        .cache
        .store("Orphan", "speech-synth/gone.mp3")
        .await
        .unwrap();
    let client = ScriptedClient::completes_after(0);
    let task = fixture.service(client.clone()).text_to_speech("Orphan");
    let dest = fixture.work.path().join("orphan.mp3");

    let err = task.download_if_ready(&dest).await.unwrap_err();
    match err.kind() {
        RcvisErrorKind::Speech(e) => {
            assert!(matches!(e.kind, SpeechErrorKind::CacheInconsistency(_)))
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(client.spawns(), 0);
}
