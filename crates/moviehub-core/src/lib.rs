//! # moviehub-core
//!
//! Core crate for MovieHub. Contains the storage provider trait,
//! configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other MovieHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
