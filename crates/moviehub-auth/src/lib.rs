//! # moviehub-auth
//!
//! Authentication for MovieHub.
//!
//! ## Modules
//!
//! - `jwt`: typed access/refresh tokens signed with separate secrets
//! - `password`: Argon2id credential hashing and password policy
//! - `session`: register, login, refresh and request authentication flows

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{Claims, Clock, ManualClock, SystemClock, TokenError, TokenKind, TokenPair, TokenService};
pub use password::{CredentialHasher, PasswordValidator};
pub use session::{LoginResult, SessionManager};
