use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::credential::errors::RepositoryError;
use crate::credential::models::Credential;
use crate::credential::models::CredentialId;
use crate::credential::models::EmailAddress;
use crate::credential::ports::CredentialRepository;

/// Process-local credential store.
///
/// Uniqueness of email and platform identifier is checked under the write lock,
/// so concurrent registrations behave like they would against the database.
/// Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryCredentialRepository {
    credentials: RwLock<HashMap<CredentialId, Credential>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.credentials.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn create(&self, credential: Credential) -> Result<Credential, RepositoryError> {
        let mut credentials = self.credentials.write().await;

        for existing in credentials.values() {
            if existing.email == credential.email {
                return Err(RepositoryError::EmailTaken(credential.email.to_string()));
            }
            if existing.platform_id == credential.platform_id {
                return Err(RepositoryError::PlatformIdTaken(
                    credential.platform_id.to_string(),
                ));
            }
        }

        credentials.insert(credential.id, credential.clone());
        Ok(credential)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, RepositoryError> {
        Ok(self
            .credentials
            .read()
            .await
            .values()
            .find(|credential| &credential.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &CredentialId) -> Result<Option<Credential>, RepositoryError> {
        Ok(self.credentials.read().await.get(id).cloned())
    }

    async fn update(&self, credential: Credential) -> Result<Credential, RepositoryError> {
        let mut credentials = self.credentials.write().await;

        if !credentials.contains_key(&credential.id) {
            return Err(RepositoryError::NotFound(credential.id.to_string()));
        }
        if credentials
            .values()
            .any(|other| other.id != credential.id && other.email == credential.email)
        {
            return Err(RepositoryError::EmailTaken(credential.email.to_string()));
        }

        credentials.insert(credential.id, credential.clone());
        Ok(credential)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use platform_id::PlatformId;

    use super::*;
    use crate::credential::models::CredentialStatus;
    use crate::credential::validation::RegistrationForm;

    fn credential(email: &str, platform_id: &str) -> Credential {
        let command = RegistrationForm {
            email: email.to_string(),
            password: "Str0ng!Pass".to_string(),
            first_name: "Moussa".to_string(),
            last_name: "Traore".to_string(),
            phone: "+22376543210".to_string(),
            profile_type: "COMMERCIAL".to_string(),
            country: "ML".to_string(),
        }
        .validate()
        .unwrap();
        let platform_id: PlatformId = platform_id.parse().unwrap();
        Credential::register(&command, platform_id, "$argon2id$stub".to_string())
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repository = InMemoryCredentialRepository::new();
        let created = repository
            .create(credential("moussa@example.com", "ML250615-0001-CM"))
            .await
            .unwrap();

        let email = EmailAddress::new("Moussa@Example.com").unwrap();
        let by_email = repository.find_by_email(&email).await.unwrap();
        let by_id = repository.find_by_id(&created.id).await.unwrap();

        assert_eq!(by_email.as_ref(), Some(&created));
        assert_eq!(by_id, Some(created));
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_is_none() {
        let repository = InMemoryCredentialRepository::new();
        let email = EmailAddress::new("nobody@example.com").unwrap();

        assert!(repository.find_by_email(&email).await.unwrap().is_none());
        assert!(repository
            .find_by_id(&CredentialId::new())
            .await
            .unwrap()
            .is_none());
        assert!(repository.is_empty().await);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repository = InMemoryCredentialRepository::new();
        repository
            .create(credential("moussa@example.com", "ML250615-0001-CM"))
            .await
            .unwrap();

        let result = repository
            .create(credential("moussa@example.com", "ML250615-0002-CM"))
            .await;

        assert!(matches!(result, Err(RepositoryError::EmailTaken(_))));
    }

    #[tokio::test]
    async fn test_duplicate_platform_id_rejected() {
        let repository = InMemoryCredentialRepository::new();
        repository
            .create(credential("moussa@example.com", "ML250615-0001-CM"))
            .await
            .unwrap();

        let result = repository
            .create(credential("awa@example.com", "ML250615-0001-CM"))
            .await;

        assert_eq!(
            result,
            Err(RepositoryError::PlatformIdTaken(
                "ML250615-0001-CM".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_concurrent_registrations_with_same_email() {
        let repository = Arc::new(InMemoryCredentialRepository::new());

        let handles: Vec<_> = (0..8u16)
            .map(|n| {
                let repository = Arc::clone(&repository);
                let platform_id = format!("ML250615-{:04X}-CM", n);
                tokio::spawn(async move {
                    repository
                        .create(credential("race@example.com", &platform_id))
                        .await
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_update() {
        let repository = InMemoryCredentialRepository::new();
        let mut stored = repository
            .create(credential("moussa@example.com", "ML250615-0001-CM"))
            .await
            .unwrap();

        stored.status = CredentialStatus::Suspended;
        repository.update(stored.clone()).await.unwrap();

        let reloaded = repository.find_by_id(&stored.id).await.unwrap().unwrap();
        assert_eq!(reloaded.status, CredentialStatus::Suspended);
    }

    #[tokio::test]
    async fn test_update_unknown() {
        let repository = InMemoryCredentialRepository::new();
        let result = repository
            .update(credential("moussa@example.com", "ML250615-0001-CM"))
            .await;

        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_cannot_steal_email() {
        let repository = InMemoryCredentialRepository::new();
        repository
            .create(credential("moussa@example.com", "ML250615-0001-CM"))
            .await
            .unwrap();
        let mut other = repository
            .create(credential("awa@example.com", "ML250615-0002-CM"))
            .await
            .unwrap();

        other.email = EmailAddress::new("moussa@example.com").unwrap();
        let result = repository.update(other).await;

        assert!(matches!(result, Err(RepositoryError::EmailTaken(_))));
    }
}
