//! Content-addressed attachment store.
//!
//! Uploaded bytes land at `movie_<owner>/<first 12 hex of sha256><ext>`.
//! The name never echoes the caller-supplied file name; only a short,
//! lowercased, alphanumeric extension survives.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use moviehub_core::error::{AppError, ErrorKind};
use moviehub_core::result::AppResult;
use moviehub_core::traits::storage::{ByteStream, StorageProvider};

use crate::hashing::HashingStream;

/// Number of hex characters of the digest used in the file name.
const HASH_PREFIX_LEN: usize = 12;

/// Longest extension kept from the original file name.
const MAX_EXTENSION_LEN: usize = 16;

/// Where and what was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredContent {
    /// Path relative to the provider root.
    pub storage_path: String,
    /// Full lowercase hex SHA-256 of the content.
    pub content_hash: String,
    /// Number of bytes written.
    pub size_bytes: u64,
}

/// Stores attachments under hash-derived paths on a [`StorageProvider`].
#[derive(Debug, Clone)]
pub struct ContentAddressedStore {
    provider: Arc<dyn StorageProvider>,
}

impl ContentAddressedStore {
    /// Create a store on top of `provider`.
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    /// Stream `content` into the owner's directory and move it to its
    /// content-derived name.
    ///
    /// Identical bytes for the same owner always end up at the same path;
    /// the second copy is discarded. On failure the temporary file is removed.
    pub async fn save(
        &self,
        owner_id: i64,
        content: ByteStream<'_>,
        original_name: &str,
    ) -> AppResult<StoredContent> {
        let dir = owner_dir(owner_id);
        self.provider.create_dir(&dir).await?;

        let temp_path = format!("{dir}/.upload-{}.part", Uuid::new_v4());
        let (hashing, digest_rx) = HashingStream::new(content);

        if let Err(e) = self.provider.write_stream(&temp_path, Box::pin(hashing)).await {
            self.discard(&temp_path).await;
            return Err(e);
        }

        let Ok(digest) = digest_rx.await else {
            self.discard(&temp_path).await;
            return Err(AppError::storage("Upload ended before its content was hashed"));
        };

        let storage_path = format!(
            "{dir}/{}{}",
            &digest.hash[..HASH_PREFIX_LEN],
            sanitized_extension(original_name)
        );

        let placed = match self.provider.exists(&storage_path).await {
            Ok(true) => {
                debug!(owner_id, storage_path = %storage_path, "Identical content already stored");
                self.discard(&temp_path).await;
                Ok(())
            }
            Ok(false) => self.provider.rename(&temp_path, &storage_path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = placed {
            self.discard(&temp_path).await;
            return Err(e);
        }

        info!(
            owner_id,
            storage_path = %storage_path,
            size_bytes = digest.size,
            "Stored content"
        );

        Ok(StoredContent {
            storage_path,
            content_hash: digest.hash,
            size_bytes: digest.size,
        })
    }

    /// Open stored content for reading.
    pub async fn open(&self, storage_path: &str) -> AppResult<ByteStream<'static>> {
        self.provider.read(storage_path).await
    }

    /// Remove stored content. Fails with `NotFound` if it is absent.
    pub async fn delete(&self, storage_path: &str) -> AppResult<()> {
        self.provider.delete(storage_path).await?;
        info!(storage_path = %storage_path, "Deleted stored content");
        Ok(())
    }

    async fn discard(&self, temp_path: &str) {
        if let Err(e) = self.provider.delete(temp_path).await {
            if !e.is(ErrorKind::NotFound) {
                warn!(temp_path = %temp_path, error = %e, "Failed to remove temporary upload");
            }
        }
    }
}

/// Directory holding all attachments of one movie.
pub fn owner_dir(owner_id: i64) -> String {
    format!("movie_{owner_id}")
}

/// Lowercased `.ext` of the final path segment of `file_name`, or an empty
/// string when the extension is missing, too long or not ASCII alphanumeric.
pub fn sanitized_extension(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or_default();
    match base.rsplit_once('.') {
        Some((_, ext))
            if !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.bytes().all(|b| b.is_ascii_alphanumeric()) =>
        {
            format!(".{}", ext.to_ascii_lowercase())
        }
        _ => String::new(),
    }
}
