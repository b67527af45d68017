use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Serialize;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SessionClaims;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Tokens are stateless: nothing is recorded server-side, so a refresh token stays
/// valid until it expires even after it has been rotated.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

/// Access and refresh token issued together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    pub const DEFAULT_ACCESS_TOKEN_TTL_HOURS: i64 = 24;
    pub const DEFAULT_REFRESH_TOKEN_TTL_HOURS: i64 = 7 * 24;

    /// Create a new authenticator with default hashing cost and token lifetimes
    /// (24 hours access, 7 days refresh).
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing, shared by both token kinds
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            access_token_ttl: Duration::hours(Self::DEFAULT_ACCESS_TOKEN_TTL_HOURS),
            refresh_token_ttl: Duration::hours(Self::DEFAULT_REFRESH_TOKEN_TTL_HOURS),
        }
    }

    /// Override token lifetimes.
    pub fn with_token_lifetimes(mut self, access: Duration, refresh: Duration) -> Self {
        self.access_token_ttl = access;
        self.refresh_token_ttl = refresh;
        self
    }

    /// Override the password hasher (e.g. to change the cost).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        self.refresh_token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Mint an access/refresh token pair for one subject.
    ///
    /// Both tokens carry the same payload and signing key, and expire independently.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token_pair(
        &self,
        sub: impl ToString,
        email: impl ToString,
        platform_id: impl ToString,
        role: impl ToString,
    ) -> Result<TokenPair, JwtError> {
        let now = Utc::now();
        let access = SessionClaims::issued_at(
            sub,
            email,
            platform_id,
            role,
            now,
            self.access_token_ttl,
        );
        let refresh = SessionClaims {
            exp: (now + self.refresh_token_ttl).timestamp(),
            ..access.clone()
        };

        Ok(TokenPair {
            access_token: self.jwt_handler.encode(&access)?,
            refresh_token: self.jwt_handler.encode(&refresh)?,
            access_expires_at: now + self.access_token_ttl,
            refresh_expires_at: now + self.refresh_token_ttl,
        })
    }

    /// Validate signature and expiry, then decode session claims.
    ///
    /// # Errors
    /// * `TokenExpired`, `InvalidSignature`, `DecodingFailed`
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
