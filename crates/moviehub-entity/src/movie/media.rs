//! Media links attached to a movie.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// The three supported media categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "media_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Poster artwork.
    Poster,
    /// Backdrop artwork.
    Backdrop,
    /// Trailer video.
    Trailer,
}

impl MediaType {
    /// Return the media type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poster => "poster",
            Self::Backdrop => "backdrop",
            Self::Trailer => "trailer",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = moviehub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "poster" => Ok(Self::Poster),
            "backdrop" => Ok(Self::Backdrop),
            "trailer" => Ok(Self::Trailer),
            _ => Err(moviehub_core::AppError::validation(format!(
                "Invalid media type: '{s}'. Expected one of: poster, backdrop, trailer"
            ))),
        }
    }
}

/// A media link (poster, backdrop or trailer URL) belonging to a movie.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MovieMedia {
    /// Unique media identifier.
    pub id: i64,
    /// Owning movie.
    pub movie_id: i64,
    /// Media category.
    #[serde(rename = "type")]
    pub media_type: MediaType,
    /// Where the media lives.
    pub url: String,
    /// Whether this is the primary item of its category.
    pub is_main: bool,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
    /// When the link was last updated.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("poster".parse::<MediaType>().unwrap(), MediaType::Poster);
        assert_eq!("TRAILER".parse::<MediaType>().unwrap(), MediaType::Trailer);
        assert!("thumbnail".parse::<MediaType>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&MediaType::Backdrop).unwrap();
        assert_eq!(json, "\"backdrop\"");
        let parsed: MediaType = serde_json::from_str("\"poster\"").unwrap();
        assert_eq!(parsed, MediaType::Poster);
    }
}
