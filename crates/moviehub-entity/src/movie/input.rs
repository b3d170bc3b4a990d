//! Validated inputs for creating and updating movies.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::media::MediaType;

/// Data required to create a movie.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMovie {
    /// Title.
    #[validate(length(min = 1, max = 100, message = "Title is required (max 100 characters)"))]
    pub title: String,
    /// Director.
    #[validate(length(min = 1, max = 100, message = "Director is required (max 100 characters)"))]
    pub director: String,
    /// Release year.
    #[validate(range(min = 1800, max = 2100, message = "Year must be between 1800 and 2100"))]
    pub year: i32,
    /// Plot summary.
    #[serde(default)]
    pub plot: String,
    /// Genre.
    #[serde(default)]
    #[validate(length(max = 50, message = "Genre must be at most 50 characters"))]
    pub genre: String,
    /// Rating between 0 and 10.
    #[serde(default)]
    #[validate(range(min = 0.0, max = 10.0, message = "Rating must be between 0 and 10"))]
    pub rating: f64,
    /// Running time in minutes.
    #[serde(default)]
    #[validate(range(min = 0, max = 1000, message = "Duration must be between 0 and 1000 minutes"))]
    pub duration_minutes: i32,
    /// Media links.
    #[serde(default)]
    #[validate(nested)]
    pub media_files: Vec<MovieMediaInput>,
    /// Extended metadata.
    #[serde(default)]
    #[validate(nested)]
    pub metadata: Option<MovieMetadataInput>,
}

/// Partial update of a movie. Absent fields are left untouched.
///
/// When `media_files` is present it replaces the whole media list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateMovie {
    /// New title.
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,
    /// New director.
    #[validate(length(min = 1, max = 100, message = "Director must be 1-100 characters"))]
    pub director: Option<String>,
    /// New release year.
    #[validate(range(min = 1800, max = 2100, message = "Year must be between 1800 and 2100"))]
    pub year: Option<i32>,
    /// New plot summary.
    pub plot: Option<String>,
    /// New genre.
    #[validate(length(max = 50, message = "Genre must be at most 50 characters"))]
    pub genre: Option<String>,
    /// New rating.
    #[validate(range(min = 0.0, max = 10.0, message = "Rating must be between 0 and 10"))]
    pub rating: Option<f64>,
    /// New running time.
    #[validate(range(min = 0, max = 1000, message = "Duration must be between 0 and 1000 minutes"))]
    pub duration_minutes: Option<i32>,
    /// Replacement media list.
    #[validate(nested)]
    pub media_files: Option<Vec<MovieMediaInput>>,
    /// Replacement metadata.
    #[validate(nested)]
    pub metadata: Option<MovieMetadataInput>,
}

/// A media link supplied by a client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MovieMediaInput {
    /// Media category.
    #[serde(rename = "type")]
    pub media_type: MediaType,
    /// Absolute URL of the media.
    #[validate(url(message = "Media URL must be a valid URL"))]
    pub url: String,
    /// Whether this is the primary item of its category.
    #[serde(default)]
    pub is_main: bool,
}

/// Extended metadata supplied by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MovieMetadataInput {
    /// Original language code.
    #[serde(default)]
    #[validate(length(max = 10))]
    pub language: String,
    /// Country of production.
    #[serde(default)]
    #[validate(length(max = 50))]
    pub country: String,
    /// Awards won.
    #[serde(default)]
    pub awards: String,
    /// Cast list.
    #[serde(default, rename = "cast")]
    pub cast_list: String,
}
