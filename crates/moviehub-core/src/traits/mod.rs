//! Core traits defined in `moviehub-core` and implemented by other crates.

pub mod storage;

pub use storage::{ByteStream, StorageProvider};
