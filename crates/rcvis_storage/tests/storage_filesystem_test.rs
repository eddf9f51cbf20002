//! Tests for the filesystem artifact store.

use rcvis_error::RcvisErrorKind;
use rcvis_interface::ArtifactStore;
use rcvis_storage::FileSystemArtifactStore;
use tempfile::TempDir;

fn store(dir: &TempDir) -> FileSystemArtifactStore {
    FileSystemArtifactStore::new(dir.path().join("media"), "https://media.example.com/").unwrap()
}

#[tokio::test]
async fn test_put_and_get() {
    let temp_dir = TempDir::new().unwrap();
    let store = store(&temp_dir);

    let local = temp_dir.path().join("render.mp4");
    tokio::fs::write(&local, b"movie bytes").await.unwrap();

    let url = store.put(&local, "movies/slug-1.mp4").await.unwrap();
    assert_eq!(url, "https://media.example.com/movies/slug-1.mp4");
    assert!(store.exists("movies/slug-1.mp4").await.unwrap());

    let back = temp_dir.path().join("back.mp4");
    store.get("movies/slug-1.mp4", &back).await.unwrap();
    assert_eq!(tokio::fs::read(&back).await.unwrap(), b"movie bytes");
}

#[tokio::test]
async fn test_put_replaces_existing_object() {
    let temp_dir = TempDir::new().unwrap();
    let store = store(&temp_dir);

    let first = temp_dir.path().join("a.mp3");
    let second = temp_dir.path().join("b.mp3");
    tokio::fs::write(&first, b"first").await.unwrap();
    tokio::fs::write(&second, b"second").await.unwrap();

    store.put(&first, "speech-synth/x.mp3").await.unwrap();
    store.put(&second, "speech-synth/x.mp3").await.unwrap();

    let back = temp_dir.path().join("out.mp3");
    store.get("speech-synth/x.mp3", &back).await.unwrap();
    assert_eq!(tokio::fs::read(&back).await.unwrap(), b"second");

    // No temp files left behind
    let mut names = Vec::new();
    let mut dir = tokio::fs::read_dir(store.root().join("speech-synth")).await.unwrap();
    while let Some(entry) = dir.next_entry().await.unwrap() {
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    assert_eq!(names, vec!["x.mp3".to_string()]);
}

#[tokio::test]
async fn test_rejects_paths_escaping_root() {
    let temp_dir = TempDir::new().unwrap();
    let store = store(&temp_dir);
    let local = temp_dir.path().join("f");
    tokio::fs::write(&local, b"x").await.unwrap();

    for bad in ["", "../evil.mp4", "/etc/passwd", "movies/../../x"] {
        let err = store.put(&local, bad).await.unwrap_err();
        assert!(matches!(err.kind(), RcvisErrorKind::Storage(_)), "{bad}");
    }
}

#[tokio::test]
async fn test_missing_objects() {
    let temp_dir = TempDir::new().unwrap();
    let store = store(&temp_dir);

    assert!(!store.exists("movies/none.mp4").await.unwrap());
    let err = store
        .get("movies/none.mp4", &temp_dir.path().join("o"))
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), RcvisErrorKind::Storage(_)));

    let err = store
        .put(&temp_dir.path().join("missing-local"), "movies/a.mp4")
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), RcvisErrorKind::Storage(_)));
}
