//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Placeholder shipped for the access token secret. Must be overridden in production.
pub const PLACEHOLDER_ACCESS_SECRET: &str = "your-access-token-secret";

/// Placeholder shipped for the refresh token secret. Must be overridden in production.
pub const PLACEHOLDER_REFRESH_SECRET: &str = "your-refresh-token-secret";

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret for access tokens.
    #[serde(default = "default_access_secret")]
    pub access_token_secret: String,
    /// HMAC-SHA256 secret for refresh tokens. Must differ from the access secret.
    #[serde(default = "default_refresh_secret")]
    pub refresh_token_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Minimum password length accepted at registration.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Argon2 degree of parallelism.
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: default_access_secret(),
            refresh_token_secret: default_refresh_secret(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_days: default_refresh_ttl(),
            password_min_length: default_password_min(),
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl AuthConfig {
    /// Returns `true` if either secret is still the shipped placeholder.
    pub fn uses_placeholder_secrets(&self) -> bool {
        self.access_token_secret == PLACEHOLDER_ACCESS_SECRET
            || self.refresh_token_secret == PLACEHOLDER_REFRESH_SECRET
    }
}

fn default_access_secret() -> String {
    PLACEHOLDER_ACCESS_SECRET.to_string()
}

fn default_refresh_secret() -> String {
    PLACEHOLDER_REFRESH_SECRET.to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_password_min() -> usize {
    8
}

// argon2 crate defaults (OWASP baseline for Argon2id)
fn default_argon2_memory() -> u32 {
    19_456
}

fn default_argon2_iterations() -> u32 {
    2
}

fn default_argon2_parallelism() -> u32 {
    1
}
