//! Argon2id credential hashing and constant-time verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, SaltString, rand_core::OsRng},
};
use subtle::ConstantTimeEq;

use moviehub_core::config::AuthConfig;
use moviehub_core::error::AppError;

/// Hashes and verifies user secrets with Argon2id.
///
/// The PHC output embeds algorithm, version, cost and salt, so digests
/// produced under older cost parameters keep verifying after the
/// configuration is raised.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    /// Creates a hasher with the cost parameters from configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.argon2_memory_kib,
            config.argon2_iterations,
            config.argon2_parallelism,
            None,
        )
        .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;
        Ok(Self { params })
    }

    /// Hashes a secret with a fresh random salt, returning a PHC string.
    pub fn hash(&self, secret: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        let hash = argon2
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Returns `true` iff `secret` hashes to `digest`.
    ///
    /// Never fails: a digest that cannot be parsed simply does not match.
    pub fn verify(&self, secret: &str, digest: &str) -> bool {
        let Ok(stored) = PasswordHash::new(digest) else {
            return false;
        };
        let (Some(expected), Some(salt)) = (stored.hash, stored.salt) else {
            return false;
        };
        let Ok(params) = Params::try_from(&stored) else {
            return false;
        };

        let recomputed = Argon2::default().hash_password_customized(
            secret.as_bytes(),
            Some(stored.algorithm),
            stored.version,
            params,
            salt,
        );

        match recomputed.ok().and_then(|h| h.hash) {
            Some(actual) => actual.as_bytes().ct_eq(expected.as_bytes()).into(),
            None => false,
        }
    }
}
