//! Store traits implemented by the PostgreSQL repositories and [`MemoryStore`](crate::MemoryStore).
//!
//! Lookups return `Ok(None)` for a missing row. Uniqueness violations
//! surface as `Conflict` errors.

use async_trait::async_trait;

use moviehub_core::result::AppResult;
use moviehub_entity::movie::{CreateMovie, MediaType, Movie, MovieMedia, UpdateMovie};
use moviehub_entity::movie_file::{CreateMovieFile, MovieFile};
use moviehub_entity::user::{CreateUser, User};

/// Account persistence.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find an account by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find an account by its exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Create an account. Fails with `Conflict` if the username is taken.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;
}

/// Movie catalog persistence. Soft-deleted movies are invisible to every read.
#[async_trait]
pub trait MovieStore: Send + Sync + 'static {
    /// Create a movie together with its media links and metadata.
    async fn create(&self, data: &CreateMovie) -> AppResult<Movie>;

    /// Find a live movie, with media links and metadata attached.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>>;

    /// List all live movies, oldest first.
    async fn find_all(&self) -> AppResult<Vec<Movie>>;

    /// Apply a partial update. Returns `None` if the movie does not exist.
    async fn update(&self, id: i64, data: &UpdateMovie) -> AppResult<Option<Movie>>;

    /// Mark a movie deleted. Returns `false` if it was not live.
    async fn soft_delete(&self, id: i64) -> AppResult<bool>;

    /// List media links of a live movie, optionally filtered by type.
    async fn find_media(
        &self,
        movie_id: i64,
        media_type: Option<MediaType>,
    ) -> AppResult<Vec<MovieMedia>>;
}

/// Attachment record persistence.
#[async_trait]
pub trait MovieFileStore: Send + Sync + 'static {
    /// Create an attachment record.
    async fn create(&self, data: &CreateMovieFile) -> AppResult<MovieFile>;

    /// Find a live attachment belonging to the given movie.
    async fn find_by_id(&self, movie_id: i64, file_id: i64) -> AppResult<Option<MovieFile>>;

    /// Mark an attachment deleted. Returns `false` if it was not live.
    async fn soft_delete(&self, movie_id: i64, file_id: i64) -> AppResult<bool>;

    /// Count live attachments stored at `storage_path`.
    async fn count_by_storage_path(&self, storage_path: &str) -> AppResult<i64>;
}
