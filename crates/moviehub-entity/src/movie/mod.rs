//! Movie catalog entities.

pub mod input;
pub mod media;
pub mod metadata;
pub mod model;

pub use input::{CreateMovie, MovieMediaInput, MovieMetadataInput, UpdateMovie};
pub use media::{MediaType, MovieMedia};
pub use metadata::MovieMetadata;
pub use model::Movie;
