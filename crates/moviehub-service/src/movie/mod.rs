//! Movie catalog and attachment services.

pub mod service;
pub mod upload;

pub use service::MovieService;
pub use upload::UploadService;
