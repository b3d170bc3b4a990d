//! Movie catalog handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use crate::error::ApiError;
use moviehub_entity::movie::{CreateMovie, Movie, MovieMedia, UpdateMovie};

use crate::dto::request::MediaQuery;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/v1/movies
pub async fn list_movies(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Movie>>>, ApiError> {
    let movies = state.movie_service.list().await?;
    Ok(Json(ApiResponse::ok(movies)))
}

/// GET /api/v1/movies/{id}
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Movie>>, ApiError> {
    let movie = state.movie_service.get(id).await?;
    Ok(Json(ApiResponse::ok(movie)))
}

/// GET /api/v1/movies/{id}/media?type=poster
pub async fn list_media(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<MediaQuery>,
) -> Result<Json<ApiResponse<Vec<MovieMedia>>>, ApiError> {
    let media = state.movie_service.list_media(id, query.media_type).await?;
    Ok(Json(ApiResponse::ok(media)))
}

/// POST /api/v1/movies
pub async fn create_movie(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateMovie>,
) -> Result<(StatusCode, Json<ApiResponse<Movie>>), ApiError> {
    let movie = state.movie_service.create(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(movie))))
}

/// PUT /api/v1/movies/{id}
pub async fn update_movie(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<UpdateMovie>,
) -> Result<Json<ApiResponse<Movie>>, ApiError> {
    let movie = state.movie_service.update(&auth, id, input).await?;
    Ok(Json(ApiResponse::ok(movie)))
}

/// DELETE /api/v1/movies/{id}
pub async fn delete_movie(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.movie_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Movie deleted"))))
}
