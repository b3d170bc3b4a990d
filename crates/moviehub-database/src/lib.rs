//! # moviehub-database
//!
//! Persistence for MovieHub: the store traits consumed by the service
//! layer, their PostgreSQL implementations, and an in-memory
//! implementation for tests and local experiments.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{MovieFileStore, MovieStore, UserStore};
