use async_trait::async_trait;
use auth::TokenPair;

use crate::credential::errors::AuthError;
use crate::credential::errors::RepositoryError;
use crate::credential::models::AuthSession;
use crate::credential::models::Credential;
use crate::credential::models::CredentialId;
use crate::credential::models::CredentialProfile;
use crate::credential::models::EmailAddress;
use crate::credential::validation::LoginForm;
use crate::credential::validation::RegistrationForm;

/// Port for the authentication workflow.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new credential and open a session for it.
    ///
    /// # Arguments
    /// * `form` - Raw registration input
    ///
    /// # Returns
    /// Stored credential (hash stripped) and a fresh token pair
    ///
    /// # Errors
    /// * `Validation` - One or more field rules violated (all are listed)
    /// * `DuplicateAccount` - Email already registered
    /// * `Internal` - Hashing, token or storage failure
    async fn register(&self, form: RegistrationForm) -> Result<AuthSession, AuthError>;

    /// Authenticate with email and password.
    ///
    /// # Arguments
    /// * `form` - Raw login input
    ///
    /// # Returns
    /// Credential (hash stripped) and a fresh token pair
    ///
    /// # Errors
    /// * `Validation` - Email malformed or password empty
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `AccountSuspended` - Password correct but the account is suspended
    /// * `Internal` - Storage or token failure
    async fn login(&self, form: LoginForm) -> Result<AuthSession, AuthError>;

    /// Exchange a refresh token for a new token pair.
    ///
    /// # Arguments
    /// * `refresh_token` - Token presented by the caller, if any
    ///
    /// # Returns
    /// New access and refresh tokens
    ///
    /// # Errors
    /// * `RefreshTokenRequired` - No token supplied
    /// * `InvalidRefreshToken` - Bad signature, malformed or expired (indistinguishable)
    /// * `UserNotFound` - Token valid but the credential no longer exists
    /// * `Internal` - Storage or token failure
    async fn refresh(&self, refresh_token: Option<String>) -> Result<TokenPair, AuthError>;

    /// Load the credential behind an authenticated session.
    ///
    /// # Errors
    /// * `UserNotFound` - Credential no longer exists
    /// * `Internal` - Storage failure
    async fn current_credential(&self, id: &CredentialId)
        -> Result<CredentialProfile, AuthError>;
}

/// Persistence operations for the credential aggregate.
///
/// Implementations must enforce uniqueness of email and platform identifier
/// atomically with `create`.
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Persist a new credential.
    ///
    /// # Errors
    /// * `EmailTaken` - Email is already registered
    /// * `PlatformIdTaken` - Platform identifier is already assigned
    /// * `Database` - Storage operation failed
    async fn create(&self, credential: Credential) -> Result<Credential, RepositoryError>;

    /// Retrieve credential by normalized email.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, RepositoryError>;

    /// Retrieve credential by identifier.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn find_by_id(&self, id: &CredentialId) -> Result<Option<Credential>, RepositoryError>;

    /// Overwrite the mutable fields of an existing credential.
    ///
    /// # Errors
    /// * `NotFound` - Credential does not exist
    /// * `EmailTaken` - New email belongs to another credential
    /// * `Database` - Storage operation failed
    async fn update(&self, credential: Credential) -> Result<Credential, RepositoryError>;
}
