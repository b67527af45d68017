//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Password hashing (Argon2id, configurable cost)
//! - Signed session tokens (JWT, HS256)
//! - Access/refresh token pair issuance
//!
//! Services own their credential storage and error taxonomy and adapt these
//! implementations behind their own ports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! let tokens = auth
//!     .issue_token_pair("user123", "awa@example.com", "CI250615-AB12-CL", "CLIENT")
//!     .unwrap();
//!
//! let claims = auth.validate_token(&tokens.refresh_token).unwrap();
//! assert_eq!(claims.platform_id, "CI250615-AB12-CL");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
