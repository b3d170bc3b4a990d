//! # moviehub-storage
//!
//! Attachment storage for MovieHub: a local filesystem provider and the
//! content-addressed store that derives file names from content hashes.

pub mod content;
pub mod hashing;
pub mod providers;

pub use content::{ContentAddressedStore, StoredContent};
pub use providers::LocalStorageProvider;
