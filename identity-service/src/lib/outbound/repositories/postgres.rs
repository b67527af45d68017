use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use platform_id::CountryCode;
use platform_id::PlatformId;
use platform_id::Role;
use sqlx::PgPool;
use uuid::Uuid;

use crate::credential::errors::RepositoryError;
use crate::credential::models::Credential;
use crate::credential::models::CredentialId;
use crate::credential::models::CredentialStatus;
use crate::credential::models::EmailAddress;
use crate::credential::models::PersonName;
use crate::credential::models::PhoneNumber;
use crate::credential::ports::CredentialRepository;

const SELECT_CREDENTIAL: &str = r#"
    SELECT id, platform_id, email, password_hash, first_name, last_name, phone,
           role, country, status, created_at, last_login_at
    FROM credentials
"#;

pub struct PostgresCredentialRepository {
    pool: PgPool,
}

impl PostgresCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translate a write failure, recognising the unique constraints by name.
fn write_error(e: sqlx::Error, credential: &Credential) -> RepositoryError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("credentials_email_key") {
                return RepositoryError::EmailTaken(credential.email.to_string());
            }
            if db_err.constraint() == Some("credentials_platform_id_key") {
                return RepositoryError::PlatformIdTaken(credential.platform_id.to_string());
            }
        }
    }
    RepositoryError::Database(e.to_string())
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn create(&self, credential: Credential) -> Result<Credential, RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO credentials (
                id, platform_id, email, password_hash, first_name, last_name, phone,
                role, country, status, created_at, last_login_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(credential.id.0)
        .bind(credential.platform_id.to_string())
        .bind(credential.email.as_str())
        .bind(credential.password_hash.as_str())
        .bind(credential.first_name.as_str())
        .bind(credential.last_name.as_str())
        .bind(credential.phone.as_str())
        .bind(credential.role.as_str())
        .bind(credential.country.as_str())
        .bind(credential.status.as_str())
        .bind(credential.created_at)
        .bind(credential.last_login_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &credential))?;

        Ok(credential)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialRow>(&format!(
            "{SELECT_CREDENTIAL} WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        row.map(Credential::try_from).transpose()
    }

    async fn find_by_id(&self, id: &CredentialId) -> Result<Option<Credential>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialRow>(&format!(
            "{SELECT_CREDENTIAL} WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        row.map(Credential::try_from).transpose()
    }

    async fn update(&self, credential: Credential) -> Result<Credential, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE credentials SET
                email = $2,
                password_hash = $3,
                first_name = $4,
                last_name = $5,
                phone = $6,
                status = $7,
                last_login_at = $8
            WHERE id = $1
            "#,
        )
        .bind(credential.id.0)
        .bind(credential.email.as_str())
        .bind(credential.password_hash.as_str())
        .bind(credential.first_name.as_str())
        .bind(credential.last_name.as_str())
        .bind(credential.phone.as_str())
        .bind(credential.status.as_str())
        .bind(credential.last_login_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &credential))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(credential.id.to_string()));
        }

        Ok(credential)
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    platform_id: String,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    phone: String,
    role: String,
    country: String,
    status: String,
    created_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
}

impl TryFrom<CredentialRow> for Credential {
    type Error = RepositoryError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = move |column: &str, detail: String| {
            RepositoryError::Database(format!(
                "Corrupt credential {} ({}): {}",
                id, column, detail
            ))
        };

        Ok(Credential {
            id: CredentialId(id),
            platform_id: row
                .platform_id
                .parse::<PlatformId>()
                .map_err(|e| corrupt("platform_id", e.to_string()))?,
            email: EmailAddress::new(&row.email).map_err(|e| corrupt("email", e.to_string()))?,
            first_name: PersonName::new(&row.first_name)
                .map_err(|e| corrupt("first_name", e.to_string()))?,
            last_name: PersonName::new(&row.last_name)
                .map_err(|e| corrupt("last_name", e.to_string()))?,
            phone: PhoneNumber::new(&row.phone).map_err(|e| corrupt("phone", e.to_string()))?,
            role: row
                .role
                .parse::<Role>()
                .map_err(|e| corrupt("role", e.to_string()))?,
            country: CountryCode::new(&row.country)
                .map_err(|e| corrupt("country", e.to_string()))?,
            status: row
                .status
                .parse::<CredentialStatus>()
                .map_err(|e| corrupt("status", e.to_string()))?,
            password_hash: row.password_hash,
            created_at: row.created_at,
            last_login_at: row.last_login_at,
        })
    }
}
