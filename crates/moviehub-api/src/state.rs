//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use moviehub_auth::SessionManager;
use moviehub_core::config::AppConfig;
use moviehub_service::{MovieService, UploadService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Registration, login, refresh and bearer-token checks
    pub session_manager: Arc<SessionManager>,
    /// Movie catalog
    pub movie_service: Arc<MovieService>,
    /// Movie attachments
    pub upload_service: Arc<UploadService>,
}
