//! Route handlers organized by domain.

pub mod auth;
pub mod file;
pub mod health;
pub mod movie;
