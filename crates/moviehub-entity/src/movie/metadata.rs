//! Extended movie metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Language, country, awards and cast for a movie.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MovieMetadata {
    /// Unique metadata identifier.
    pub id: i64,
    /// Owning movie.
    pub movie_id: i64,
    /// Original language code.
    pub language: String,
    /// Country of production.
    pub country: String,
    /// Awards won.
    pub awards: String,
    /// Cast list. `cast` is reserved in SQL, hence the column name.
    #[serde(rename = "cast")]
    pub cast_list: String,
    /// When the metadata was created.
    pub created_at: DateTime<Utc>,
    /// When the metadata was last updated.
    pub updated_at: DateTime<Utc>,
}
