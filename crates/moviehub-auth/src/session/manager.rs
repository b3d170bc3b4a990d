//! Session flows: register, login, refresh and request authentication.

use std::sync::Arc;

use tracing::{info, warn};

use moviehub_core::error::AppError;
use moviehub_core::result::AppResult;
use moviehub_database::store::UserStore;
use moviehub_entity::user::{CreateUser, User};

use crate::jwt::{TokenKind, TokenPair, TokenService};
use crate::password::{CredentialHasher, PasswordValidator};

/// Message returned for every failed login, whatever the cause.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// Generated token pair.
    pub tokens: TokenPair,
    /// The authenticated user.
    pub user: User,
}

/// Turns credentials into token pairs and bearer tokens into identities.
#[derive(Clone)]
pub struct SessionManager {
    users: Arc<dyn UserStore>,
    hasher: Arc<CredentialHasher>,
    validator: PasswordValidator,
    tokens: Arc<TokenService>,
    /// Verified against on unknown usernames so both paths cost the same.
    dummy_digest: Arc<str>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("validator", &self.validator)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a session manager. Computes one throwaway digest up front.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<CredentialHasher>,
        validator: PasswordValidator,
        tokens: Arc<TokenService>,
    ) -> AppResult<Self> {
        let dummy_digest = hasher.hash("moviehub-timing-equalizer")?;
        Ok(Self {
            users,
            hasher,
            validator,
            tokens,
            dummy_digest: dummy_digest.into(),
        })
    }

    /// Creates an account, storing only the hash of `password`.
    pub async fn register(&self, username: &str, password: &str) -> AppResult<User> {
        self.validator.validate_username(username)?;
        self.validator.validate(password)?;

        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Username '{username}' already exists"
            )));
        }

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))??;

        let user = self
            .users
            .create(&CreateUser {
                username: username.to_owned(),
                password_hash,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Verifies credentials and issues a fresh token pair.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the caller.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResult> {
        let user = self.users.find_by_username(username).await?;
        let digest: Arc<str> = match &user {
            Some(u) => u.password_hash.as_str().into(),
            None => Arc::clone(&self.dummy_digest),
        };

        let matches = self.verify(password, digest).await?;
        let user = match user {
            Some(user) if matches => user,
            _ => {
                warn!(username = %username, "Failed login attempt");
                return Err(AppError::authentication(INVALID_CREDENTIALS));
            }
        };

        let tokens = self.tokens.issue_pair(user.id)?;
        info!(user_id = user.id, username = %user.username, "User logged in");
        Ok(LoginResult { tokens, user })
    }

    /// Exchanges a valid refresh token for a new pair.
    ///
    /// The presented token stays valid until it expires.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let user_id = self.tokens.validate(refresh_token, TokenKind::Refresh)?;

        if self.users.find_by_id(user_id).await?.is_none() {
            warn!(user_id, "Refresh token presented for a missing account");
            return Err(AppError::authentication("Invalid or expired token"));
        }

        let tokens = self.tokens.issue_pair(user_id)?;
        info!(user_id, "Token pair refreshed");
        Ok(tokens)
    }

    /// Resolves an access token to the account id it was issued for.
    pub fn authenticate_request(&self, bearer_token: &str) -> AppResult<i64> {
        Ok(self.tokens.validate(bearer_token, TokenKind::Access)?)
    }

    /// Loads the account behind an authenticated identity.
    pub async fn current_user(&self, user_id: i64) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid or expired token"))
    }

    async fn verify(&self, password: &str, digest: Arc<str>) -> AppResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))
    }
}
