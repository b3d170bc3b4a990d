//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use moviehub_api::AppState;
use moviehub_auth::{CredentialHasher, ManualClock, PasswordValidator, SessionManager, TokenService};
use moviehub_core::config::AppConfig;
use moviehub_database::MemoryStore;
use moviehub_service::{MovieService, UploadService};
use moviehub_storage::{ContentAddressedStore, LocalStorageProvider};

const TEST_CONFIG: &str = r#"
[database]
url = "postgres://unused/moviehub"

[auth]
access_token_secret = "integration-access-secret"
refresh_token_secret = "integration-refresh-secret"
argon2_memory_kib = 1024
argon2_iterations = 1

[storage]
upload_timeout_seconds = 30
"#;

const BOUNDARY: &str = "moviehub-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store shared with the router
    pub store: MemoryStore,
    /// Clock used by the token service
    pub clock: Arc<ManualClock>,
    /// Upload root; removed when the app is dropped
    pub upload_dir: TempDir,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over an in-memory store
    pub async fn new() -> Self {
        let mut config = AppConfig::from_toml(TEST_CONFIG).expect("Failed to parse test config");
        let upload_dir = TempDir::new().expect("Failed to create upload dir");
        config.storage.upload_root = upload_dir.path().to_string_lossy().into_owned();

        let store = MemoryStore::new();
        let clock = Arc::new(ManualClock::default());

        let provider = LocalStorageProvider::new(upload_dir.path())
            .await
            .expect("Failed to init storage");
        let content = ContentAddressedStore::new(Arc::new(provider));

        let tokens = Arc::new(
            TokenService::new(&config.auth, clock.clone()).expect("Failed to init tokens"),
        );
        let hasher = Arc::new(CredentialHasher::new(&config.auth).expect("Failed to init hasher"));
        let session_manager = Arc::new(
            SessionManager::new(
                Arc::new(store.clone()),
                hasher,
                PasswordValidator::new(&config.auth),
                tokens,
            )
            .expect("Failed to init session manager"),
        );

        let app_state = AppState {
            config: Arc::new(config.clone()),
            session_manager,
            movie_service: Arc::new(MovieService::new(Arc::new(store.clone()))),
            upload_service: Arc::new(UploadService::new(
                Arc::new(store.clone()),
                Arc::new(store.clone()),
                content,
            )),
        };

        let router = moviehub_api::build_router(app_state);

        Self {
            router,
            store,
            clock,
            upload_dir,
            config,
        }
    }

    /// Register an account and return the login response data
    pub async fn register_and_login(&self, username: &str, password: &str) -> Value {
        let body = serde_json::json!({ "username": username, "password": password });

        let response = self
            .request("POST", "/api/v1/auth/register", Some(body.clone()), None)
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );

        let response = self
            .request("POST", "/api/v1/auth/login", Some(body), None)
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"].clone()
    }

    /// Register, login and return the access token
    pub async fn access_token(&self, username: &str) -> String {
        let data = self.register_and_login(username, "password123").await;
        data["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Create a movie and return its id
    pub async fn create_movie(&self, token: &str, title: &str) -> i64 {
        let body = serde_json::json!({
            "title": title,
            "director": "Test Director",
            "year": 1999,
            "genre": "Drama",
            "rating": 7.5,
            "duration_minutes": 120,
        });

        let response = self
            .request("POST", "/api/v1/movies", Some(body), Some(token))
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create movie failed: {:?}",
            response.body
        );

        response.body["data"]["id"]
            .as_i64()
            .expect("No id in movie response")
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let raw = self.send(req).await;
        let body: Value = serde_json::from_slice(&raw.body).unwrap_or(Value::Null);

        TestResponse {
            status: raw.status,
            body,
        }
    }

    /// Upload `content` as the `file` part of a multipart request
    pub async fn upload(
        &self,
        movie_id: i64,
        file_name: &str,
        content: &[u8],
        token: Option<&str>,
    ) -> TestResponse {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: text/plain\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let mut req = Request::builder()
            .method("POST")
            .uri(format!("/api/v1/movies/{movie_id}/file"))
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let raw = self.send(req).await;
        let body: Value = serde_json::from_slice(&raw.body).unwrap_or(Value::Null);

        TestResponse {
            status: raw.status,
            body,
        }
    }

    /// Send a GET and keep the raw response body
    pub async fn get_raw(&self, path: &str, token: Option<&str>) -> RawResponse {
        let mut req = Request::builder().method("GET").uri(path);
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        let req = req.body(Body::empty()).expect("Failed to build request");
        self.send(req).await
    }

    /// Number of files currently stored for a movie
    pub fn stored_file_count(&self, movie_id: i64) -> usize {
        let dir = self.upload_dir.path().join(format!("movie_{movie_id}"));
        match std::fs::read_dir(dir) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }

    async fn send(&self, req: Request<Body>) -> RawResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        RawResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a JSON test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// Response with the body left as bytes
#[derive(Debug)]
pub struct RawResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Body bytes
    pub body: Bytes,
}
