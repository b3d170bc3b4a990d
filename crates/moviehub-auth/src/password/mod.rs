//! Credential hashing and password policy.

pub mod hasher;
pub mod validator;

pub use hasher::CredentialHasher;
pub use validator::PasswordValidator;
