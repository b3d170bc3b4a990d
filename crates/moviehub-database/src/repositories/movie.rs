//! Movie repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use moviehub_core::error::{AppError, ErrorKind};
use moviehub_core::result::AppResult;
use moviehub_entity::movie::{
    CreateMovie, MediaType, Movie, MovieMedia, MovieMediaInput, MovieMetadata, MovieMetadataInput,
    UpdateMovie,
};

use crate::store::MovieStore;

/// PostgreSQL-backed movie catalog store.
///
/// Media links and metadata are written in the same transaction as the
/// movie row.
#[derive(Debug, Clone)]
pub struct MovieRepository {
    pool: PgPool,
}

fn db_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, message, e)
}

impl MovieRepository {
    /// Create a new movie repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load media links and metadata for the given movies.
    async fn attach_children(&self, movies: &mut [Movie]) -> AppResult<()> {
        if movies.is_empty() {
            return Ok(());
        }
        let ids: Vec<i64> = movies.iter().map(|m| m.id).collect();

        let media = sqlx::query_as::<_, MovieMedia>(
            "SELECT * FROM movie_media WHERE movie_id = ANY($1) ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load movie media"))?;

        let metadata = sqlx::query_as::<_, MovieMetadata>(
            "SELECT * FROM movie_metadata WHERE movie_id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load movie metadata"))?;

        let mut media_by_movie: HashMap<i64, Vec<MovieMedia>> = HashMap::new();
        for item in media {
            media_by_movie.entry(item.movie_id).or_default().push(item);
        }
        let mut metadata_by_movie: HashMap<i64, MovieMetadata> =
            metadata.into_iter().map(|m| (m.movie_id, m)).collect();

        for movie in movies.iter_mut() {
            movie.media_files = media_by_movie.remove(&movie.id).unwrap_or_default();
            movie.metadata = metadata_by_movie.remove(&movie.id);
        }
        Ok(())
    }
}

async fn insert_media(
    conn: &mut PgConnection,
    movie_id: i64,
    media: &[MovieMediaInput],
) -> AppResult<()> {
    for item in media {
        sqlx::query("INSERT INTO movie_media (movie_id, media_type, url, is_main) VALUES ($1, $2, $3, $4)")
            .bind(movie_id)
            .bind(item.media_type)
            .bind(&item.url)
            .bind(item.is_main)
            .execute(&mut *conn)
            .await
            .map_err(db_error("Failed to insert movie media"))?;
    }
    Ok(())
}

async fn upsert_metadata(
    conn: &mut PgConnection,
    movie_id: i64,
    metadata: &MovieMetadataInput,
) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO movie_metadata (movie_id, language, country, awards, cast_list) \
         VALUES ($1, $2, $3, $4, $5) \
         ON CONFLICT (movie_id) DO UPDATE SET \
            language = EXCLUDED.language, \
            country = EXCLUDED.country, \
            awards = EXCLUDED.awards, \
            cast_list = EXCLUDED.cast_list, \
            updated_at = NOW()",
    )
    .bind(movie_id)
    .bind(&metadata.language)
    .bind(&metadata.country)
    .bind(&metadata.awards)
    .bind(&metadata.cast_list)
    .execute(&mut *conn)
    .await
    .map_err(db_error("Failed to save movie metadata"))?;
    Ok(())
}

#[async_trait]
impl MovieStore for MovieRepository {
    async fn create(&self, data: &CreateMovie) -> AppResult<Movie> {
        let mut tx = self.pool.begin().await.map_err(db_error("Failed to begin transaction"))?;

        let mut movie = sqlx::query_as::<_, Movie>(
            "INSERT INTO movies (title, director, year, plot, genre, rating, duration_minutes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.director)
        .bind(data.year)
        .bind(&data.plot)
        .bind(&data.genre)
        .bind(data.rating)
        .bind(data.duration_minutes)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to create movie"))?;

        insert_media(&mut tx, movie.id, &data.media_files).await?;
        if let Some(metadata) = &data.metadata {
            upsert_metadata(&mut tx, movie.id, metadata).await?;
        }

        tx.commit().await.map_err(db_error("Failed to commit movie"))?;

        self.attach_children(std::slice::from_mut(&mut movie)).await?;
        Ok(movie)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(
            "SELECT * FROM movies WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find movie"))?;

        let Some(mut movie) = movie else {
            return Ok(None);
        };
        self.attach_children(std::slice::from_mut(&mut movie)).await?;
        Ok(Some(movie))
    }

    async fn find_all(&self) -> AppResult<Vec<Movie>> {
        let mut movies = sqlx::query_as::<_, Movie>(
            "SELECT * FROM movies WHERE deleted_at IS NULL ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list movies"))?;

        self.attach_children(&mut movies).await?;
        Ok(movies)
    }

    async fn update(&self, id: i64, data: &UpdateMovie) -> AppResult<Option<Movie>> {
        let mut tx = self.pool.begin().await.map_err(db_error("Failed to begin transaction"))?;

        let movie = sqlx::query_as::<_, Movie>(
            "UPDATE movies SET title = COALESCE($2, title), \
                               director = COALESCE($3, director), \
                               year = COALESCE($4, year), \
                               plot = COALESCE($5, plot), \
                               genre = COALESCE($6, genre), \
                               rating = COALESCE($7, rating), \
                               duration_minutes = COALESCE($8, duration_minutes), \
                               updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.director)
        .bind(data.year)
        .bind(&data.plot)
        .bind(&data.genre)
        .bind(data.rating)
        .bind(data.duration_minutes)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to update movie"))?;

        let Some(mut movie) = movie else {
            return Ok(None);
        };

        if let Some(media) = &data.media_files {
            sqlx::query("DELETE FROM movie_media WHERE movie_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(db_error("Failed to replace movie media"))?;
            insert_media(&mut tx, id, media).await?;
        }
        if let Some(metadata) = &data.metadata {
            upsert_metadata(&mut tx, id, metadata).await?;
        }

        tx.commit().await.map_err(db_error("Failed to commit movie update"))?;

        self.attach_children(std::slice::from_mut(&mut movie)).await?;
        Ok(Some(movie))
    }

    async fn soft_delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE movies SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to delete movie"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_media(
        &self,
        movie_id: i64,
        media_type: Option<MediaType>,
    ) -> AppResult<Vec<MovieMedia>> {
        sqlx::query_as::<_, MovieMedia>(
            "SELECT mm.* FROM movie_media mm \
             JOIN movies m ON m.id = mm.movie_id \
             WHERE mm.movie_id = $1 \
               AND m.deleted_at IS NULL \
               AND ($2::media_type IS NULL OR mm.media_type = $2) \
             ORDER BY mm.id",
        )
        .bind(movie_id)
        .bind(media_type)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list movie media"))
    }
}
