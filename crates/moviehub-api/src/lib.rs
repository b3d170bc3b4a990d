//! # moviehub-api
//!
//! HTTP API layer for MovieHub built on Axum.
//!
//! Provides the REST endpoints under `/api/v1`, the bearer-token extractor,
//! request logging and CORS middleware, DTOs, and the mapping from
//! [`AppError`](moviehub_core::AppError) to HTTP responses through [`ApiError`].

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
