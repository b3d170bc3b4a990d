//! Issues and validates typed tokens, each kind signed with its own secret.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::warn;

use moviehub_core::config::AuthConfig;
use moviehub_core::config::auth::{PLACEHOLDER_ACCESS_SECRET, PLACEHOLDER_REFRESH_SECRET};
use moviehub_core::error::AppError;
use moviehub_core::result::AppResult;

use super::claims::{Claims, TokenKind};
use super::clock::Clock;
use super::error::TokenError;

/// An access and a refresh token issued at the same instant.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

/// Signing and verification keys for one token kind.
struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Issues and validates HS256 tokens.
///
/// Holds only immutable state; share it behind an `Arc`.
pub struct TokenService {
    access: KeyPair,
    refresh: KeyPair,
    access_ttl: Duration,
    refresh_ttl: Duration,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Build a token service from configuration.
    ///
    /// Placeholder or identical secrets are accepted but logged.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> AppResult<Self> {
        if config.access_token_secret == PLACEHOLDER_ACCESS_SECRET
            || config.refresh_token_secret == PLACEHOLDER_REFRESH_SECRET
        {
            warn!("Token secrets are still set to their placeholder values; override them in production");
        }
        if config.access_token_secret == config.refresh_token_secret {
            warn!("Access and refresh token secrets are identical; only the kind claim separates them");
        }

        let access_ttl = i64::try_from(config.access_ttl_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .ok_or_else(|| AppError::configuration("auth.access_ttl_minutes is out of range"))?;
        let refresh_ttl = i64::try_from(config.refresh_ttl_days)
            .ok()
            .and_then(Duration::try_days)
            .ok_or_else(|| AppError::configuration("auth.refresh_ttl_days is out of range"))?;

        // expiry is checked by hand against the injected clock
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            access: KeyPair::from_secret(&config.access_token_secret),
            refresh: KeyPair::from_secret(&config.refresh_token_secret),
            access_ttl,
            refresh_ttl,
            validation,
            clock,
        })
    }

    fn keys(&self, kind: TokenKind) -> &KeyPair {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    fn sign(
        &self,
        identity: i64,
        kind: TokenKind,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> AppResult<(String, DateTime<Utc>)> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::internal("Token expiry overflows the calendar"))?;
        let claims = Claims {
            sub: identity,
            token_type: kind,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.keys(kind).encoding,
        )
        .map_err(|e| AppError::internal(format!("Failed to encode {kind} token: {e}")))?;

        Ok((token, expires_at))
    }

    /// Issue a single token of `kind` valid for `ttl` from now.
    pub fn issue(&self, identity: i64, kind: TokenKind, ttl: Duration) -> AppResult<String> {
        self.sign(identity, kind, self.clock.now(), ttl)
            .map(|(token, _)| token)
    }

    /// Issue an access and a refresh token sharing one `iat`.
    ///
    /// Either both tokens are returned or an error is.
    pub fn issue_pair(&self, identity: i64) -> AppResult<TokenPair> {
        let now = self.clock.now();
        let (access_token, access_expires_at) =
            self.sign(identity, TokenKind::Access, now, self.access_ttl)?;
        let (refresh_token, refresh_expires_at) =
            self.sign(identity, TokenKind::Refresh, now, self.refresh_ttl)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Check a token against the secret for `expected` and return its subject.
    pub fn validate(&self, token: &str, expected: TokenKind) -> Result<i64, TokenError> {
        let data = decode::<Claims>(token, &self.keys(expected).decoding, &self.validation)?;
        let claims = data.claims;

        if self.clock.now().timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }
        if claims.token_type != expected {
            return Err(TokenError::WrongKind);
        }
        Ok(claims.sub)
    }
}
