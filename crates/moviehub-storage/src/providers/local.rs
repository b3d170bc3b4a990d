//! Local filesystem storage provider.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use futures::stream::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::debug;

use moviehub_core::error::{AppError, ErrorKind};
use moviehub_core::result::AppResult;
use moviehub_core::traits::storage::{ByteStream, StorageProvider};

/// Local filesystem storage provider.
///
/// Every path handed to it is interpreted relative to `root`; paths that
/// contain `..`, a root or a drive prefix are refused.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a provider rooted at `root_path`, creating the directory if needed.
    pub async fn new(root_path: impl AsRef<Path>) -> AppResult<Self> {
        let root = root_path.as_ref().to_path_buf();
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to create storage root", e)
        })?;
        Ok(Self { root })
    }

    /// Resolve a relative path to a location inside the root.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let mut resolved = self.root.clone();
        for component in Path::new(path).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(AppError::validation(
                        "Storage path must be relative and stay inside the storage root",
                    ));
                }
            }
        }
        Ok(resolved)
    }

    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to create parent directory", e)
            })?;
        }
        Ok(())
    }
}

fn io_error(message: &'static str) -> impl FnOnce(std::io::Error) -> AppError {
    move |e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::with_source(ErrorKind::NotFound, "Stored object not found", e)
        } else {
            AppError::with_source(ErrorKind::Storage, message, e)
        }
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn read(&self, path: &str) -> AppResult<ByteStream<'static>> {
        let full_path = self.resolve(path)?;
        let file = fs::File::open(&full_path)
            .await
            .map_err(io_error("Failed to open file"))?;

        Ok(Box::pin(ReaderStream::new(file)))
    }

    async fn write_stream(&self, path: &str, mut stream: ByteStream<'_>) -> AppResult<u64> {
        let full_path = self.resolve(path)?;
        self.ensure_parent(&full_path).await?;

        let mut file = fs::File::create(&full_path)
            .await
            .map_err(io_error("Failed to create file"))?;

        let mut total_bytes = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk
                .map_err(|e| AppError::with_source(ErrorKind::Storage, "Stream read error", e))?;
            total_bytes += chunk.len() as u64;
            file.write_all(&chunk)
                .await
                .map_err(io_error("Failed to write chunk"))?;
        }

        file.flush().await.map_err(io_error("Failed to flush file"))?;
        file.sync_all().await.map_err(io_error("Failed to sync file"))?;

        debug!(path, bytes = total_bytes, "Wrote file from stream");
        Ok(total_bytes)
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        fs::remove_file(&full_path)
            .await
            .map_err(io_error("Failed to delete file"))?;
        debug!(path, "Deleted file");
        Ok(())
    }

    async fn rename(&self, from: &str, to: &str) -> AppResult<()> {
        let from_path = self.resolve(from)?;
        let to_path = self.resolve(to)?;
        self.ensure_parent(&to_path).await?;

        fs::rename(&from_path, &to_path)
            .await
            .map_err(io_error("Failed to rename file"))?;
        debug!(from, to, "Renamed file");
        Ok(())
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        let full_path = self.resolve(path)?;
        fs::try_exists(&full_path)
            .await
            .map_err(io_error("Failed to check file existence"))
    }

    async fn create_dir(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        fs::create_dir_all(&full_path)
            .await
            .map_err(io_error("Failed to create directory"))?;
        Ok(())
    }
}
