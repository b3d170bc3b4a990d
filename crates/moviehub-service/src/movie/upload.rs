//! Attachment upload, download and deletion.
//!
//! Bytes and records are only ever created or removed together, and bytes
//! shared by several live records of a movie are kept until the last one
//! goes away.

use std::sync::Arc;

use tracing::{info, warn};

use moviehub_core::error::{AppError, ErrorKind};
use moviehub_core::result::AppResult;
use moviehub_core::traits::storage::ByteStream;
use moviehub_database::store::{MovieFileStore, MovieStore};
use moviehub_entity::movie_file::{CreateMovieFile, MovieFile};
use moviehub_storage::ContentAddressedStore;

use crate::context::RequestContext;

/// Longest display name kept for an attachment.
const MAX_FILE_NAME_LEN: usize = 255;

/// Longest declared content type kept for an attachment.
const MAX_CONTENT_TYPE_LEN: usize = 100;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Registers uploaded attachments against movies.
#[derive(Clone)]
pub struct UploadService {
    movies: Arc<dyn MovieStore>,
    files: Arc<dyn MovieFileStore>,
    content: ContentAddressedStore,
}

impl std::fmt::Debug for UploadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadService")
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        movies: Arc<dyn MovieStore>,
        files: Arc<dyn MovieFileStore>,
        content: ContentAddressedStore,
    ) -> Self {
        Self {
            movies,
            files,
            content,
        }
    }

    /// Stores `content` for a live movie and records it.
    ///
    /// If the record cannot be written the stored bytes are removed again,
    /// unless another live record already points at them.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        movie_id: i64,
        file_name: &str,
        content_type: Option<&str>,
        content: ByteStream<'_>,
    ) -> AppResult<MovieFile> {
        self.ensure_live_movie(movie_id).await?;

        let stored = self.content.save(movie_id, content, file_name).await?;

        let record = CreateMovieFile {
            movie_id,
            file_name: display_name(file_name),
            file_size: i64::try_from(stored.size_bytes)
                .map_err(|_| AppError::validation("File is too large"))?,
            content_type: declared_content_type(content_type),
            storage_path: stored.storage_path.clone(),
            content_hash: stored.content_hash.clone(),
            uploaded_by: ctx.user_id,
        };

        let file = match self.files.create(&record).await {
            Ok(file) => file,
            Err(e) => {
                warn!(movie_id, error = %e, "Failed to record upload, releasing stored content");
                self.release_if_unreferenced(&stored.storage_path).await;
                return Err(e);
            }
        };

        info!(
            file_id = file.id,
            movie_id,
            user_id = ctx.user_id,
            size_bytes = file.file_size,
            "Attachment uploaded"
        );
        Ok(file)
    }

    /// Looks up an attachment and opens its content.
    pub async fn open(
        &self,
        movie_id: i64,
        file_id: i64,
    ) -> AppResult<(MovieFile, ByteStream<'static>)> {
        let file = self.find(movie_id, file_id).await?;
        let stream = self.content.open(&file.storage_path).await?;
        Ok((file, stream))
    }

    /// Deletes an attachment record and, if nothing else uses them, its bytes.
    pub async fn delete(&self, ctx: &RequestContext, movie_id: i64, file_id: i64) -> AppResult<()> {
        let file = self.find(movie_id, file_id).await?;

        if !self.files.soft_delete(movie_id, file_id).await? {
            return Err(file_not_found(file_id));
        }
        self.release_if_unreferenced(&file.storage_path).await;

        info!(file_id, movie_id, user_id = ctx.user_id, "Attachment deleted");
        Ok(())
    }

    /// Attachments of a soft-deleted movie are as invisible as the movie.
    async fn find(&self, movie_id: i64, file_id: i64) -> AppResult<MovieFile> {
        self.ensure_live_movie(movie_id).await?;
        self.files
            .find_by_id(movie_id, file_id)
            .await?
            .ok_or_else(|| file_not_found(file_id))
    }

    async fn ensure_live_movie(&self, movie_id: i64) -> AppResult<()> {
        match self.movies.find_by_id(movie_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!("Movie {movie_id} not found"))),
        }
    }

    /// Remove stored bytes once no live record references them.
    ///
    /// Failures are logged only: the record side has already been settled.
    async fn release_if_unreferenced(&self, storage_path: &str) {
        match self.files.count_by_storage_path(storage_path).await {
            Ok(0) => {}
            Ok(remaining) => {
                info!(storage_path = %storage_path, remaining, "Stored content still referenced");
                return;
            }
            Err(e) => {
                warn!(storage_path = %storage_path, error = %e, "Could not count references, keeping content");
                return;
            }
        }

        match self.content.delete(storage_path).await {
            Ok(()) => {}
            Err(e) if e.is(ErrorKind::NotFound) => {
                warn!(storage_path = %storage_path, "Stored content was already missing");
            }
            Err(e) => {
                warn!(storage_path = %storage_path, error = %e, "Failed to remove stored content");
            }
        }
    }
}

fn file_not_found(file_id: i64) -> AppError {
    AppError::not_found(format!("File {file_id} not found"))
}

/// Final path segment of the client-supplied name, trimmed to the column size.
fn display_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() {
        return "unnamed".to_string();
    }
    base.chars().take(MAX_FILE_NAME_LEN).collect()
}

fn declared_content_type(content_type: Option<&str>) -> String {
    match content_type.map(str::trim) {
        Some(ct) if !ct.is_empty() && ct.len() <= MAX_CONTENT_TYPE_LEN => ct.to_string(),
        _ => DEFAULT_CONTENT_TYPE.to_string(),
    }
}
