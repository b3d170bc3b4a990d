//! Registration policy for usernames and passwords.

use moviehub_core::config::AuthConfig;
use moviehub_core::error::AppError;

/// Longest username accepted at registration.
pub const MAX_USERNAME_LENGTH: usize = 50;

/// Validates new credentials against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password. Length is counted in characters.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        Ok(())
    }

    /// Validates a username: not blank, at most [`MAX_USERNAME_LENGTH`] characters.
    pub fn validate_username(&self, username: &str) -> Result<(), AppError> {
        if username.trim().is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        if username.chars().count() > MAX_USERNAME_LENGTH {
            return Err(AppError::validation(format!(
                "Username must be at most {MAX_USERNAME_LENGTH} characters long"
            )));
        }
        Ok(())
    }
}
