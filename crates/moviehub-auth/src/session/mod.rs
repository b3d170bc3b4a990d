//! Account session flows.

pub mod manager;

pub use manager::{LoginResult, SessionManager};
