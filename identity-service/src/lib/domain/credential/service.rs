use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::TokenPair;
use chrono::Utc;
use tokio::sync::OnceCell;

use crate::credential::errors::AuthError;
use crate::credential::errors::RepositoryError;
use crate::credential::models::AuthSession;
use crate::credential::models::Credential;
use crate::credential::models::CredentialId;
use crate::credential::models::CredentialProfile;
use crate::credential::models::RegisterCommand;
use crate::credential::ports::AuthServicePort;
use crate::credential::ports::CredentialRepository;
use crate::credential::validation::LoginForm;
use crate::credential::validation::RegistrationForm;

/// Hashed once and verified against when a login names an unknown email.
const DECOY_PASSWORD: &str = "decoy-password-never-assigned";

/// Domain service implementation of the authentication workflow.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<CR>
where
    CR: CredentialRepository,
{
    repository: Arc<CR>,
    authenticator: Arc<Authenticator>,
    decoy_hash: OnceCell<String>,
}

impl<CR> AuthService<CR>
where
    CR: CredentialRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    ///
    /// # Returns
    /// Configured auth service instance
    pub fn new(repository: Arc<CR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
            decoy_hash: OnceCell::new(),
        }
    }

    /// Argon2 is CPU-bound, so it runs on the blocking pool.
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
    }

    async fn verify_password(&self, password: &str, stored_hash: &str) -> Result<(), AuthError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();
        let stored_hash = stored_hash.to_string();

        let verified = tokio::task::spawn_blocking(move || {
            authenticator.verify_password(&password, &stored_hash)
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))?;

        match verified {
            Ok(()) => Ok(()),
            Err(AuthenticationError::InvalidCredentials) => Err(AuthError::InvalidCredentials),
            Err(e) => Err(AuthError::Internal(e.to_string())),
        }
    }

    /// Pay the same verification cost as a wrong password before rejecting an
    /// unknown email.
    async fn reject_unknown_email(&self, password: &str) -> AuthError {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| self.hash_password(DECOY_PASSWORD))
            .await;

        match decoy {
            Ok(hash) => {
                let _ = self.verify_password(password, hash).await;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to prepare decoy hash"),
        }

        AuthError::InvalidCredentials
    }

    /// Mint a platform identifier and store the credential, regenerating the
    /// identifier once if the store reports it as already assigned.
    async fn store_new_credential(
        &self,
        command: &RegisterCommand,
        password_hash: String,
    ) -> Result<Credential, AuthError> {
        let mut regenerated = false;
        loop {
            let platform_id = platform_id::generate(command.country.as_str(), command.role)
                .map_err(|e| AuthError::Internal(format!("Platform id generation failed: {}", e)))?;
            let credential = Credential::register(command, platform_id, password_hash.clone());

            match self.repository.create(credential).await {
                Err(RepositoryError::PlatformIdTaken(platform_id)) if !regenerated => {
                    tracing::warn!(%platform_id, "Platform id collision, regenerating");
                    regenerated = true;
                }
                result => return result.map_err(AuthError::from),
            }
        }
    }

    fn issue_tokens(&self, credential: &Credential) -> Result<TokenPair, AuthError> {
        self.authenticator
            .issue_token_pair(
                credential.id,
                &credential.email,
                &credential.platform_id,
                credential.role,
            )
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))
    }
}

#[async_trait]
impl<CR> AuthServicePort for AuthService<CR>
where
    CR: CredentialRepository,
{
    async fn register(&self, form: RegistrationForm) -> Result<AuthSession, AuthError> {
        let command = form.validate()?;

        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            tracing::info!(role = %command.role, "Registration rejected, email already registered");
            return Err(AuthError::DuplicateAccount);
        }

        let password_hash = self.hash_password(command.password.expose()).await?;

        let credential = self.store_new_credential(&command, password_hash).await?;
        let tokens = self.issue_tokens(&credential)?;

        tracing::info!(
            credential_id = %credential.id,
            platform_id = %credential.platform_id,
            role = %credential.role,
            "Credential registered"
        );

        Ok(AuthSession {
            credential: (&credential).into(),
            tokens,
        })
    }

    async fn login(&self, form: LoginForm) -> Result<AuthSession, AuthError> {
        let command = form.validate()?;

        let Some(mut credential) = self.repository.find_by_email(&command.email).await? else {
            return Err(self.reject_unknown_email(&command.password).await);
        };

        self.verify_password(&command.password, &credential.password_hash)
            .await?;

        if credential.is_suspended() {
            tracing::info!(credential_id = %credential.id, "Login refused, account suspended");
            return Err(AuthError::AccountSuspended);
        }

        let tokens = self.issue_tokens(&credential)?;

        credential.last_login_at = Some(Utc::now());
        if let Err(e) = self.repository.update(credential.clone()).await {
            tracing::warn!(
                credential_id = %credential.id,
                error = %e,
                "Failed to record last login"
            );
        }

        tracing::info!(credential_id = %credential.id, "Login succeeded");

        Ok(AuthSession {
            credential: (&credential).into(),
            tokens,
        })
    }

    async fn refresh(&self, refresh_token: Option<String>) -> Result<TokenPair, AuthError> {
        let token = refresh_token
            .filter(|token| !token.trim().is_empty())
            .ok_or(AuthError::RefreshTokenRequired)?;

        let claims = self.authenticator.validate_token(&token).map_err(|e| {
            tracing::debug!(error = %e, "Refresh token rejected");
            AuthError::InvalidRefreshToken
        })?;

        let id =
            CredentialId::from_string(&claims.sub).map_err(|_| AuthError::InvalidRefreshToken)?;

        let credential = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.issue_tokens(&credential)
    }

    async fn current_credential(
        &self,
        id: &CredentialId,
    ) -> Result<CredentialProfile, AuthError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(|ref credential| credential.into())
            .ok_or(AuthError::UserNotFound)
    }
}
