//! Movie entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::media::MovieMedia;
use super::metadata::MovieMetadata;

/// A catalog entry.
///
/// `media_files` and `metadata` live in their own tables and are attached
/// by the store after the row is loaded.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Movie {
    /// Unique movie identifier.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Director.
    pub director: String,
    /// Release year.
    pub year: i32,
    /// Plot summary.
    pub plot: String,
    /// Genre.
    pub genre: String,
    /// Rating between 0 and 10.
    pub rating: f64,
    /// Running time in minutes.
    pub duration_minutes: i32,
    /// Linked artwork and trailers.
    #[sqlx(skip)]
    #[serde(default)]
    pub media_files: Vec<MovieMedia>,
    /// Extended metadata, if any was supplied.
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MovieMetadata>,
    /// When the movie was created.
    pub created_at: DateTime<Utc>,
    /// When the movie was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Movie {
    /// Whether the movie has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
