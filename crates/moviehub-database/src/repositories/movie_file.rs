//! Attachment record repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use moviehub_core::error::{AppError, ErrorKind};
use moviehub_core::result::AppResult;
use moviehub_entity::movie_file::{CreateMovieFile, MovieFile};

use crate::store::MovieFileStore;

/// PostgreSQL-backed attachment record store.
#[derive(Debug, Clone)]
pub struct MovieFileRepository {
    pool: PgPool,
}

impl MovieFileRepository {
    /// Create a new attachment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieFileStore for MovieFileRepository {
    async fn create(&self, data: &CreateMovieFile) -> AppResult<MovieFile> {
        sqlx::query_as::<_, MovieFile>(
            "INSERT INTO movie_files \
                (movie_id, file_name, file_size, content_type, storage_path, content_hash, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(data.movie_id)
        .bind(&data.file_name)
        .bind(data.file_size)
        .bind(&data.content_type)
        .bind(&data.storage_path)
        .bind(&data.content_hash)
        .bind(data.uploaded_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create movie file", e))
    }

    async fn find_by_id(&self, movie_id: i64, file_id: i64) -> AppResult<Option<MovieFile>> {
        sqlx::query_as::<_, MovieFile>(
            "SELECT * FROM movie_files WHERE id = $1 AND movie_id = $2 AND deleted_at IS NULL",
        )
        .bind(file_id)
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find movie file", e))
    }

    async fn soft_delete(&self, movie_id: i64, file_id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE movie_files SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND movie_id = $2 AND deleted_at IS NULL",
        )
        .bind(file_id)
        .bind(movie_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete movie file", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_storage_path(&self, storage_path: &str) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM movie_files WHERE storage_path = $1 AND deleted_at IS NULL",
        )
        .bind(storage_path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count movie file references", e)
        })
    }
}
