//! Request DTOs.
//!
//! Movie bodies deserialize straight into the entity input types, which
//! carry their own validation rules.

use serde::{Deserialize, Serialize};

use moviehub_entity::movie::MediaType;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Query string of `GET /movies/{id}/media`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaQuery {
    /// Only return media of this type.
    #[serde(rename = "type")]
    pub media_type: Option<MediaType>,
}
