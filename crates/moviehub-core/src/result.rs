//! Convenience result type alias for MovieHub.

use crate::error::AppError;

/// A specialized `Result` type for MovieHub operations.
pub type AppResult<T> = Result<T, AppError>;
