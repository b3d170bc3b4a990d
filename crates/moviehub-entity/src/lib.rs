//! # moviehub-entity
//!
//! Domain entity models for MovieHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod movie;
pub mod movie_file;
pub mod user;
