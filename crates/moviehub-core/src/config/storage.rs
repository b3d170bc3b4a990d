//! Attachment storage configuration.

use serde::{Deserialize, Serialize};

/// Attachment storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory under which `movie_<id>` directories are created.
    #[serde(default = "default_upload_root")]
    pub upload_root: String,
    /// Maximum request body size for uploads in bytes (default 2 GB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Upper bound for a single upload request, in seconds.
    #[serde(default = "default_upload_timeout")]
    pub upload_timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_root: default_upload_root(),
            max_upload_size_bytes: default_max_upload(),
            upload_timeout_seconds: default_upload_timeout(),
        }
    }
}

fn default_upload_root() -> String {
    "./uploads".to_string()
}

fn default_max_upload() -> u64 {
    2_147_483_648 // 2 GB
}

fn default_upload_timeout() -> u64 {
    600
}
