//! Storage provider trait for pluggable attachment backends.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream used for reading and writing object contents.
///
/// The lifetime lets callers hand over streams that borrow from the
/// request (a multipart field, for instance).
pub type ByteStream<'a> = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send + 'a>>;

/// Trait for attachment storage backends.
///
/// Paths are always relative to the provider's root. Implementations must
/// refuse paths that would escape it.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Read a file and return its byte stream.
    async fn read(&self, path: &str) -> AppResult<ByteStream<'static>>;

    /// Write a byte stream to a file at the given path, replacing any
    /// existing content. Returns the number of bytes written.
    async fn write_stream(&self, path: &str, stream: ByteStream<'_>) -> AppResult<u64>;

    /// Delete a file at the given path. Fails with `NotFound` if absent.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Move (rename) a file from one path to another within this provider.
    async fn rename(&self, from: &str, to: &str) -> AppResult<()>;

    /// Check whether a file or directory exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Create a directory (and any missing parents).
    async fn create_dir(&self, path: &str) -> AppResult<()>;
}
