//! Movie catalog service.

use std::sync::Arc;

use tracing::info;
use validator::{Validate, ValidationErrors};

use moviehub_core::error::{AppError, ErrorKind};
use moviehub_core::result::AppResult;
use moviehub_database::store::MovieStore;
use moviehub_entity::movie::{CreateMovie, MediaType, Movie, MovieMedia, UpdateMovie};

use crate::context::RequestContext;

/// CRUD over the movie catalog.
#[derive(Clone)]
pub struct MovieService {
    movies: Arc<dyn MovieStore>,
}

impl std::fmt::Debug for MovieService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieService").finish()
    }
}

fn invalid_input(errors: ValidationErrors) -> AppError {
    AppError::with_source(ErrorKind::Validation, format!("Invalid input: {errors}"), errors)
}

impl MovieService {
    /// Creates a new movie service.
    pub fn new(movies: Arc<dyn MovieStore>) -> Self {
        Self { movies }
    }

    /// Creates a movie with its media links and metadata.
    pub async fn create(&self, ctx: &RequestContext, input: CreateMovie) -> AppResult<Movie> {
        input.validate().map_err(invalid_input)?;

        let movie = self.movies.create(&input).await?;
        info!(
            movie_id = movie.id,
            user_id = ctx.user_id,
            title = %movie.title,
            "Movie created"
        );
        Ok(movie)
    }

    /// Fetches a live movie.
    pub async fn get(&self, id: i64) -> AppResult<Movie> {
        self.movies
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Movie {id} not found")))
    }

    /// Lists every live movie.
    pub async fn list(&self) -> AppResult<Vec<Movie>> {
        self.movies.find_all().await
    }

    /// Applies a partial update. A supplied media list replaces the old one.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        input: UpdateMovie,
    ) -> AppResult<Movie> {
        input.validate().map_err(invalid_input)?;

        let movie = self
            .movies
            .update(id, &input)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Movie {id} not found")))?;
        info!(movie_id = id, user_id = ctx.user_id, "Movie updated");
        Ok(movie)
    }

    /// Soft-deletes a movie.
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        if !self.movies.soft_delete(id).await? {
            return Err(AppError::not_found(format!("Movie {id} not found")));
        }
        info!(movie_id = id, user_id = ctx.user_id, "Movie deleted");
        Ok(())
    }

    /// Lists a movie's media links, optionally only those of one type.
    pub async fn list_media(
        &self,
        id: i64,
        media_type: Option<MediaType>,
    ) -> AppResult<Vec<MovieMedia>> {
        // distinguishes "no media" from "no movie"
        self.get(id).await?;
        self.movies.find_media(id, media_type).await
    }
}
