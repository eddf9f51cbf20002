//! Filesystem-based artifact storage implementation.

use async_trait::async_trait;
use rcvis_error::{RcvisResult, StorageError, StorageErrorKind};
use rcvis_interface::ArtifactStore;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// Filesystem storage backend.
///
/// Objects live at `{root}/{path}` and are served from
/// `{public_base_url}/{path}`:
///
/// ```text
/// /var/rcvis/media/
/// ├── speech-synth/
/// │   └── 3f9a...c1.mp3
/// └── movies/
///     ├── portland-mayor-5d0e....mp4
///     └── portland-mayor-a81b....mp4
/// ```
///
/// Writes go to a uniquely named temp file that is renamed into place, so
/// concurrent puts never expose a partially written object.
#[derive(Debug, Clone)]
pub struct FileSystemArtifactStore {
    root: PathBuf,
    public_base_url: String,
}

impl FileSystemArtifactStore {
    /// Create a new filesystem store.
    ///
    /// Creates the root directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(root, public_base_url))]
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> RcvisResult<Self> {
        let root = root.into();

        std::fs::create_dir_all(&root).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                root.display(),
                e
            )))
        })?;

        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        tracing::info!(root = %root.display(), %public_base_url, "Created filesystem artifact store");
        Ok(Self {
            root,
            public_base_url,
        })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a store key to a location under the root.
    ///
    /// Keys are relative, `/`-separated and may not escape the root.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let clean = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !clean {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(
                path.to_string(),
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ArtifactStore for FileSystemArtifactStore {
    #[tracing::instrument(skip(self, local_file), fields(file = %local_file.display()))]
    async fn put(&self, local_file: &Path, path: &str) -> RcvisResult<String> {
        let dest = self.resolve(path)?;

        // Create parent directories
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Copy to temp file first, then rename for atomicity
        let temp_path = dest.with_extension(format!("{}.tmp", Uuid::new_v4()));
        let size = tokio::fs::copy(local_file, &temp_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(
                    local_file.display().to_string(),
                ))
            } else {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "{}: {}",
                    temp_path.display(),
                    e
                )))
            }
        })?;

        if let Err(e) = tokio::fs::rename(&temp_path, &dest).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                dest.display(),
                e
            )))
            .into());
        }

        let url = self.url(path);
        tracing::info!(path, size, %url, "Stored artifact");
        Ok(url)
    }

    #[tracing::instrument(skip(self, dest), fields(file = %dest.display()))]
    async fn get(&self, path: &str, dest: &Path) -> RcvisResult<()> {
        let source = self.resolve(path)?;

        tokio::fs::copy(&source, dest).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(path.to_string()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    source.display(),
                    e
                )))
            }
        })?;

        tracing::debug!(path, "Retrieved artifact");
        Ok(())
    }

    async fn exists(&self, path: &str) -> RcvisResult<bool> {
        let source = self.resolve(path)?;
        Ok(tokio::fs::try_exists(source).await.unwrap_or(false))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url, path)
    }
}
