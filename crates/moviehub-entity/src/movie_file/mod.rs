//! Attachment entities.

pub mod model;

pub use model::{CreateMovieFile, MovieFile};
