use std::fmt;

use thiserror::Error;

/// Error for CredentialId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for PersonName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for PhoneNumber validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneError {
    #[error("Phone number does not match any supported locale")]
    UnsupportedFormat,
}

/// A single password complexity rule that was not met
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("Password must contain at least one digit")]
    MissingDigit,

    #[error("Password must contain at least one special character (@$!%*?&)")]
    MissingSymbol,
}

/// Error for CredentialStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown credential status: {0}")]
pub struct CredentialStatusError(pub String);

/// Field rule identifiers reported back to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationRule {
    EmailFormat,
    PasswordLength,
    PasswordUppercase,
    PasswordLowercase,
    PasswordDigit,
    PasswordSymbol,
    PasswordRequired,
    NameLength,
    PhoneFormat,
    RoleNotAllowed,
    CountryFormat,
}

impl ValidationRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationRule::EmailFormat => "email_format",
            ValidationRule::PasswordLength => "password_length",
            ValidationRule::PasswordUppercase => "password_uppercase",
            ValidationRule::PasswordLowercase => "password_lowercase",
            ValidationRule::PasswordDigit => "password_digit",
            ValidationRule::PasswordSymbol => "password_symbol",
            ValidationRule::PasswordRequired => "password_required",
            ValidationRule::NameLength => "name_length",
            ValidationRule::PhoneFormat => "phone_format",
            ValidationRule::RoleNotAllowed => "role_not_allowed",
            ValidationRule::CountryFormat => "country_format",
        }
    }
}

impl From<PasswordPolicyError> for ValidationRule {
    fn from(err: PasswordPolicyError) -> Self {
        match err {
            PasswordPolicyError::TooShort { .. } => ValidationRule::PasswordLength,
            PasswordPolicyError::MissingUppercase => ValidationRule::PasswordUppercase,
            PasswordPolicyError::MissingLowercase => ValidationRule::PasswordLowercase,
            PasswordPolicyError::MissingDigit => ValidationRule::PasswordDigit,
            PasswordPolicyError::MissingSymbol => ValidationRule::PasswordSymbol,
        }
    }
}

/// One violated rule on one input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub rule: ValidationRule,
    pub message: String,
}

/// Every rule violated by a request, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, rule: ValidationRule, message: impl ToString) {
        self.0.push(FieldViolation {
            field,
            rule,
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// Whether `field` failed `rule`.
    pub fn contains(&self, field: &str, rule: ValidationRule) -> bool {
        self.0.iter().any(|v| v.field == field && v.rule == rule)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|v| v.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Error for credential store operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Platform identifier already assigned: {0}")]
    PlatformIdTaken(String),

    #[error("Credential not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Top-level error for all authentication workflow operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid request data: {0}")]
    Validation(ValidationErrors),

    #[error("An account with this email already exists")]
    DuplicateAccount,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account suspended, please contact support")]
    AccountSuspended,

    #[error("Refresh token required")]
    RefreshTokenRequired,

    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => "VALIDATION_ERROR",
            AuthError::DuplicateAccount => "USER_ALREADY_EXISTS",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::AccountSuspended => "ACCOUNT_SUSPENDED",
            AuthError::RefreshTokenRequired => "REFRESH_TOKEN_REQUIRED",
            AuthError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<ValidationErrors> for AuthError {
    fn from(errors: ValidationErrors) -> Self {
        AuthError::Validation(errors)
    }
}

impl From<RepositoryError> for AuthError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::EmailTaken(_) => AuthError::DuplicateAccount,
            RepositoryError::PlatformIdTaken(_)
            | RepositoryError::NotFound(_)
            | RepositoryError::Database(_) => AuthError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_collects_in_order() {
        let mut errors = ValidationErrors::new();
        errors.push("email", ValidationRule::EmailFormat, "Invalid email address");
        errors.push("password", ValidationRule::PasswordSymbol, "No symbol");

        assert!(!errors.is_empty());
        assert_eq!(errors.violations().len(), 2);
        assert!(errors.contains("password", ValidationRule::PasswordSymbol));
        assert!(!errors.contains("email", ValidationRule::PasswordSymbol));
        assert_eq!(errors.to_string(), "Invalid email address; No symbol");
    }

    #[test]
    fn test_email_taken_maps_to_duplicate_account() {
        let err: AuthError = RepositoryError::EmailTaken("a@b.com".to_string()).into();
        assert!(matches!(err, AuthError::DuplicateAccount));
        assert_eq!(err.code(), "USER_ALREADY_EXISTS");
    }

    #[test]
    fn test_storage_failures_map_to_internal() {
        let err: AuthError = RepositoryError::Database("connection reset".to_string()).into();
        assert!(matches!(err, AuthError::Internal(ref detail) if detail.contains("connection reset")));
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_password_policy_rules() {
        assert_eq!(
            ValidationRule::from(PasswordPolicyError::TooShort { min: 8 }),
            ValidationRule::PasswordLength
        );
        assert_eq!(
            ValidationRule::from(PasswordPolicyError::MissingSymbol).as_str(),
            "password_symbol"
        );
    }
}
