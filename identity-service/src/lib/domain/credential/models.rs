use std::fmt;
use std::str::FromStr;

use auth::TokenPair;
use chrono::DateTime;
use chrono::Utc;
use once_cell::sync::Lazy;
use platform_id::CountryCode;
use platform_id::PlatformId;
use platform_id::Role;
use regex::Regex;
use uuid::Uuid;

use crate::credential::errors::CredentialIdError;
use crate::credential::errors::CredentialStatusError;
use crate::credential::errors::EmailError;
use crate::credential::errors::NameError;
use crate::credential::errors::PasswordPolicyError;
use crate::credential::errors::PhoneError;

/// Credential aggregate entity.
///
/// The stored identity record backing authentication. The platform identifier is
/// assigned once at registration and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    pub id: CredentialId,
    pub platform_id: PlatformId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub phone: PhoneNumber,
    pub role: Role,
    pub country: CountryCode,
    pub status: CredentialStatus,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Assemble a freshly registered credential.
    ///
    /// # Arguments
    /// * `command` - Validated registration data
    /// * `platform_id` - Identifier minted for this registration
    /// * `password_hash` - PHC string produced by the password hasher
    ///
    /// # Returns
    /// Credential with a new id, `PENDING_VERIFICATION` status and no login recorded
    pub fn register(
        command: &RegisterCommand,
        platform_id: PlatformId,
        password_hash: String,
    ) -> Self {
        Self {
            id: CredentialId::new(),
            platform_id,
            email: command.email.clone(),
            password_hash,
            first_name: command.first_name.clone(),
            last_name: command.last_name.clone(),
            phone: command.phone.clone(),
            role: command.role,
            country: command.country.clone(),
            status: CredentialStatus::PendingVerification,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.status == CredentialStatus::Suspended
    }
}

/// Credential unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CredentialId(pub Uuid);

impl CredentialId {
    /// Generate a new random credential ID.
    ///
    /// # Returns
    /// CredentialId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a credential ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, CredentialIdError> {
        Uuid::parse_str(s)
            .map(CredentialId)
            .map_err(|e| CredentialIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for CredentialId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Trimmed and lowercased before validation, so lookups by email are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new normalized email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: &str) -> Result<Self, EmailError> {
        let normalized = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&normalized)
            .map(|_| EmailAddress(normalized))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name, 2-50 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    pub const MIN_LENGTH: usize = 2;
    pub const MAX_LENGTH: usize = 50;

    /// # Errors
    /// * `TooShort` - Fewer than 2 characters after trimming
    /// * `TooLong` - More than 50 characters after trimming
    pub fn new(name: &str) -> Result<Self, NameError> {
        let name = name.trim();
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(NameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Regions whose phone formats are accepted at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneLocale {
    CoteDIvoire,
    BurkinaFaso,
    Mali,
    Senegal,
}

static CI_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+225\d{10}$").unwrap());
static BF_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\+226|0)[67]\d{7}$").unwrap());
static ML_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\+?223)?\d{8}$").unwrap());
static SN_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\+221|00221)?[37]\d{8}$").unwrap());

impl PhoneLocale {
    pub const ALL: [PhoneLocale; 4] = [
        PhoneLocale::CoteDIvoire,
        PhoneLocale::BurkinaFaso,
        PhoneLocale::Mali,
        PhoneLocale::Senegal,
    ];

    fn pattern(&self) -> &'static Regex {
        match self {
            PhoneLocale::CoteDIvoire => &CI_PHONE,
            PhoneLocale::BurkinaFaso => &BF_PHONE,
            PhoneLocale::Mali => &ML_PHONE,
            PhoneLocale::Senegal => &SN_PHONE,
        }
    }

    /// First locale whose format accepts `compact` (no whitespace).
    pub fn detect(compact: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.pattern().is_match(compact))
    }
}

/// Phone number in one of the supported regional formats, stored without spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    number: String,
    locale: PhoneLocale,
}

impl PhoneNumber {
    /// # Errors
    /// * `UnsupportedFormat` - Matches none of the supported locales
    pub fn new(phone: &str) -> Result<Self, PhoneError> {
        let number: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
        PhoneLocale::detect(&number)
            .map(|locale| Self { number, locale })
            .ok_or(PhoneError::UnsupportedFormat)
    }

    pub fn as_str(&self) -> &str {
        &self.number
    }

    pub fn locale(&self) -> PhoneLocale {
        self.locale
    }
}

/// Plaintext password that satisfied the complexity policy.
///
/// Only ever handed to the hasher; `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const MIN_LENGTH: usize = 8;
    pub const SYMBOLS: &'static str = "@$!%*?&";

    /// Check the complexity policy, reporting every rule that failed.
    ///
    /// # Errors
    /// All failed rules, in a fixed order (length, uppercase, lowercase, digit, symbol)
    pub fn new(password: String) -> Result<Self, Vec<PasswordPolicyError>> {
        let mut failed = Vec::new();
        if password.chars().count() < Self::MIN_LENGTH {
            failed.push(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            failed.push(PasswordPolicyError::MissingUppercase);
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            failed.push(PasswordPolicyError::MissingLowercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            failed.push(PasswordPolicyError::MissingDigit);
        }
        if !password.chars().any(|c| Self::SYMBOLS.contains(c)) {
            failed.push(PasswordPolicyError::MissingSymbol);
        }

        if failed.is_empty() {
            Ok(Self(password))
        } else {
            Err(failed)
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

/// Stand-in printed wherever a plaintext password would appear in `Debug` output.
pub const REDACTED: &str = "***";

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Password({REDACTED})")
    }
}

/// Credential lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    PendingVerification,
    Active,
    Suspended,
}

impl CredentialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialStatus::PendingVerification => "PENDING_VERIFICATION",
            CredentialStatus::Active => "ACTIVE",
            CredentialStatus::Suspended => "SUSPENDED",
        }
    }
}

impl FromStr for CredentialStatus {
    type Err = CredentialStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING_VERIFICATION" => Ok(CredentialStatus::PendingVerification),
            "ACTIVE" => Ok(CredentialStatus::Active),
            "SUSPENDED" => Ok(CredentialStatus::Suspended),
            other => Err(CredentialStatusError(other.to_string())),
        }
    }
}

impl fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credential as returned to callers, without the password hash.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialProfile {
    pub id: CredentialId,
    pub platform_id: PlatformId,
    pub email: EmailAddress,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub phone: PhoneNumber,
    pub role: Role,
    pub country: CountryCode,
    pub status: CredentialStatus,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<&Credential> for CredentialProfile {
    fn from(credential: &Credential) -> Self {
        Self {
            id: credential.id,
            platform_id: credential.platform_id.clone(),
            email: credential.email.clone(),
            first_name: credential.first_name.clone(),
            last_name: credential.last_name.clone(),
            phone: credential.phone.clone(),
            role: credential.role,
            country: credential.country.clone(),
            status: credential.status,
            created_at: credential.created_at,
            last_login_at: credential.last_login_at,
        }
    }
}

/// Result of a successful registration or login.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub credential: CredentialProfile,
    pub tokens: TokenPair,
}

/// Command to register a new credential with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: Password,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub phone: PhoneNumber,
    pub role: Role,
    pub country: CountryCode,
}

/// Command to authenticate with email and password
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_command_debug_hides_password() {
        let command = LoginCommand {
            email: EmailAddress::new("awa@example.com").unwrap(),
            password: "Str0ng!Pass".to_string(),
        };

        let printed = format!("{:?}", command);
        assert!(printed.contains("awa@example.com"));
        assert!(!printed.contains("Str0ng!Pass"));
    }

    #[test]
    fn test_email_is_trimmed_and_lowercased() {
        let email = EmailAddress::new("  Awa.Kone@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "awa.kone@example.com");
    }

    #[test]
    fn test_email_rejects_malformed() {
        assert!(matches!(
            EmailAddress::new("not-an-email"),
            Err(EmailError::InvalidFormat(_))
        ));
        assert!(EmailAddress::new("").is_err());
    }

    #[test]
    fn test_person_name_bounds() {
        assert_eq!(PersonName::new("  Awa ").unwrap().as_str(), "Awa");
        assert_eq!(
            PersonName::new(" A "),
            Err(NameError::TooShort { min: 2, actual: 1 })
        );
        assert_eq!(
            PersonName::new(&"x".repeat(51)),
            Err(NameError::TooLong {
                max: 50,
                actual: 51
            })
        );
        // Counted in characters, not bytes.
        assert!(PersonName::new("Éé").is_ok());
    }

    #[test]
    fn test_phone_locales() {
        let cases = [
            ("+225 07 01 02 03 04", PhoneLocale::CoteDIvoire),
            ("+22670123456", PhoneLocale::BurkinaFaso),
            ("061234567", PhoneLocale::BurkinaFaso),
            ("+22376543210", PhoneLocale::Mali),
            ("76543210", PhoneLocale::Mali),
            ("+221771234567", PhoneLocale::Senegal),
            ("00221 33 123 45 67", PhoneLocale::Senegal),
            ("771234567", PhoneLocale::Senegal),
        ];

        for (raw, locale) in cases {
            let phone = PhoneNumber::new(raw).unwrap_or_else(|_| panic!("{raw} rejected"));
            assert_eq!(phone.locale(), locale, "{raw}");
            assert!(!phone.as_str().contains(' '));
        }
    }

    #[test]
    fn test_phone_rejects_unsupported() {
        for raw in ["", "+33612345678", "+2250701", "081234567", "12345"] {
            assert_eq!(PhoneNumber::new(raw), Err(PhoneError::UnsupportedFormat), "{raw}");
        }
    }

    #[test]
    fn test_password_accepts_complex() {
        let password = Password::new("Str0ng!Pass".to_string()).unwrap();
        assert_eq!(password.expose(), "Str0ng!Pass");
        assert_eq!(format!("{:?}", password), "Password(***)");
    }

    #[test]
    fn test_password_reports_length() {
        let failed = Password::new("short1!".to_string()).unwrap_err();
        assert!(failed.contains(&PasswordPolicyError::TooShort { min: 8 }));
    }

    #[test]
    fn test_password_reports_missing_symbol() {
        let failed = Password::new("Longenough1".to_string()).unwrap_err();
        assert_eq!(failed, vec![PasswordPolicyError::MissingSymbol]);
    }

    #[test]
    fn test_password_reports_every_rule() {
        let failed = Password::new("abc".to_string()).unwrap_err();
        assert_eq!(
            failed,
            vec![
                PasswordPolicyError::TooShort { min: 8 },
                PasswordPolicyError::MissingUppercase,
                PasswordPolicyError::MissingDigit,
                PasswordPolicyError::MissingSymbol,
            ]
        );
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            CredentialStatus::PendingVerification,
            CredentialStatus::Active,
            CredentialStatus::Suspended,
        ] {
            assert_eq!(status.as_str().parse::<CredentialStatus>(), Ok(status));
        }
        assert!("DELETED".parse::<CredentialStatus>().is_err());
    }

    #[test]
    fn test_credential_id_from_string() {
        let id = CredentialId::new();
        assert_eq!(CredentialId::from_string(&id.to_string()), Ok(id));
        assert!(CredentialId::from_string("nope").is_err());
    }
}
