//! PostgreSQL implementations of the store traits.

pub mod movie;
pub mod movie_file;
pub mod user;

pub use movie::MovieRepository;
pub use movie_file::MovieFileRepository;
pub use user::UserRepository;
