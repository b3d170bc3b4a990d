//! # moviehub-service
//!
//! Business logic for MovieHub. Each service orchestrates the store
//! traits and the attachment store to implement application use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod movie;

pub use context::RequestContext;
pub use movie::{MovieService, UploadService};
