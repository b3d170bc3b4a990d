//! Movie attachment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A binary attachment stored under a content-addressed path.
///
/// Immutable once created. Re-uploading creates a new record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MovieFile {
    /// Unique attachment identifier.
    pub id: i64,
    /// Owning movie.
    pub movie_id: i64,
    /// Original display name supplied by the uploader.
    pub file_name: String,
    /// Size in bytes.
    pub file_size: i64,
    /// Declared content type.
    pub content_type: String,
    /// Path relative to the upload root. Never exposed to clients.
    #[serde(skip_serializing)]
    pub storage_path: String,
    /// Hex-encoded SHA-256 of the content.
    #[serde(skip_serializing)]
    pub content_hash: String,
    /// The account that uploaded the attachment.
    pub uploaded_by: i64,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data required to create an attachment record.
#[derive(Debug, Clone)]
pub struct CreateMovieFile {
    /// Owning movie.
    pub movie_id: i64,
    /// Original display name.
    pub file_name: String,
    /// Size in bytes.
    pub file_size: i64,
    /// Declared content type.
    pub content_type: String,
    /// Path relative to the upload root.
    pub storage_path: String,
    /// Hex-encoded SHA-256 of the content.
    pub content_hash: String,
    /// Uploading account.
    pub uploaded_by: i64,
}
