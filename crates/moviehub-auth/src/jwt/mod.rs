//! Token issuance and validation.

pub mod claims;
pub mod clock;
pub mod error;
pub mod service;

pub use claims::{Claims, TokenKind};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::TokenError;
pub use service::{TokenPair, TokenService};
