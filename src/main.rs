//! MovieHub Server: movie catalog with authenticated attachment uploads.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use moviehub_auth::{CredentialHasher, PasswordValidator, SessionManager, SystemClock, TokenService};
use moviehub_core::config::AppConfig;
use moviehub_core::error::AppError;
use moviehub_core::traits::StorageProvider;
use moviehub_database::DatabasePool;
use moviehub_database::repositories::{MovieFileRepository, MovieRepository, UserRepository};
use moviehub_service::{MovieService, UploadService};
use moviehub_storage::{ContentAddressedStore, LocalStorageProvider};

#[tokio::main]
async fn main() {
    let env = std::env::var("MOVIEHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting MovieHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    moviehub_database::migration::run_migrations(&db).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db.pool().clone()));
    let movie_repo = Arc::new(MovieRepository::new(db.pool().clone()));
    let file_repo = Arc::new(MovieFileRepository::new(db.pool().clone()));

    // ── Step 3: Attachment storage ───────────────────────────────
    let provider = LocalStorageProvider::new(&config.storage.upload_root).await?;
    if !provider.health_check().await? {
        return Err(AppError::storage("Upload root is not a directory"));
    }
    tracing::info!(upload_root = %config.storage.upload_root, "Attachment storage ready");
    let content = ContentAddressedStore::new(Arc::new(provider));

    // ── Step 4: Auth ─────────────────────────────────────────────
    let tokens = Arc::new(TokenService::new(&config.auth, Arc::new(SystemClock))?);
    let hasher = Arc::new(CredentialHasher::new(&config.auth)?);
    let session_manager = Arc::new(SessionManager::new(
        user_repo,
        hasher,
        PasswordValidator::new(&config.auth),
        tokens,
    )?);

    // ── Step 5: Services ─────────────────────────────────────────
    let movie_service = Arc::new(MovieService::new(movie_repo.clone()));
    let upload_service = Arc::new(UploadService::new(movie_repo, file_repo, content));

    // ── Step 6: HTTP server ──────────────────────────────────────
    let app_state = moviehub_api::AppState {
        config: Arc::new(config.clone()),
        session_manager,
        movie_service,
        upload_service,
    };

    let app = moviehub_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("MovieHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 7: Drain the pool ───────────────────────────────────
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    if tokio::time::timeout(grace, db.close()).await.is_err() {
        tracing::warn!("Database pool did not close within the shutdown grace period");
    }

    tracing::info!("MovieHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
