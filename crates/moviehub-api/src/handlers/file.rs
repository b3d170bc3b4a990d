//! Movie attachment upload, download and delete handlers.

use std::time::Duration;

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use futures::TryStreamExt;

use moviehub_core::error::AppError;
use moviehub_core::result::AppResult;
use moviehub_core::traits::ByteStream;
use moviehub_entity::movie_file::MovieFile;
use moviehub_service::context::RequestContext;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Multipart part that carries the file content.
const FILE_FIELD: &str = "file";

/// POST /api/v1/movies/{id}/file
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(movie_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<MovieFile>>), ApiError> {
    let limit = Duration::from_secs(state.config.storage.upload_timeout_seconds);

    let file = tokio::time::timeout(
        limit,
        receive_upload(&state, auth.context(), movie_id, &mut multipart),
    )
    .await
    .map_err(|_| {
        tracing::warn!(movie_id, user_id = auth.user_id, "Upload timed out");
        AppError::timeout("Upload did not complete in time")
    })??;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(file))))
}

/// Streams the first `file` part into the upload service.
async fn receive_upload(
    state: &AppState,
    ctx: &RequestContext,
    movie_id: i64,
    multipart: &mut Multipart,
) -> AppResult<MovieFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_owned();
        let content_type = field.content_type().map(str::to_owned);
        let content: ByteStream<'_> = Box::pin(field.map_err(std::io::Error::other));

        return state
            .upload_service
            .upload(ctx, movie_id, &file_name, content_type.as_deref(), content)
            .await;
    }

    Err(AppError::validation(format!(
        "Multipart field '{FILE_FIELD}' is required"
    )))
}

/// GET /api/v1/movies/{id}/files/{file_id}
pub async fn download_file(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((movie_id, file_id)): Path<(i64, i64)>,
) -> Result<Response, ApiError> {
    let (file, content) = state.upload_service.open(movie_id, file_id).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.content_type.as_str())
        .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", header_safe(&file.file_name)),
        )
        .header(header::CONTENT_LENGTH, file.file_size)
        .body(Body::from_stream(content))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// DELETE /api/v1/movies/{id}/files/{file_id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((movie_id, file_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .upload_service
        .delete(&auth, movie_id, file_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("File deleted"))))
}

/// Replaces characters that cannot appear inside a quoted header parameter.
fn header_safe(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
