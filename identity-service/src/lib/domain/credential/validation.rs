//! Structural validation of raw authentication input.
//!
//! Every field is checked and every violated rule is reported, so callers can
//! correct the whole request at once.

use std::fmt;

use platform_id::CountryCode;
use platform_id::Role;

use crate::credential::errors::ValidationErrors;
use crate::credential::errors::ValidationRule;
use crate::credential::models::EmailAddress;
use crate::credential::models::LoginCommand;
use crate::credential::models::Password;
use crate::credential::models::PersonName;
use crate::credential::models::PhoneNumber;
use crate::credential::models::RegisterCommand;
use crate::credential::models::REDACTED;

const INVALID_EMAIL: &str = "Invalid email address";

/// Unvalidated registration input, field names as exposed to API clients.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub profile_type: String,
    pub country: String,
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("phone", &self.phone)
            .field("profile_type", &self.profile_type)
            .field("country", &self.country)
            .finish()
    }
}

impl RegistrationForm {
    /// Convert into a command, or report every rule the input violates.
    pub fn validate(self) -> Result<RegisterCommand, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = EmailAddress::new(&self.email)
            .map_err(|_| errors.push("email", ValidationRule::EmailFormat, INVALID_EMAIL))
            .ok();

        let password = Password::new(self.password)
            .map_err(|failed| {
                for rule in failed {
                    errors.push("password", rule.into(), rule);
                }
            })
            .ok();

        let first_name = name_field(&mut errors, "firstName", "First name", &self.first_name);
        let last_name = name_field(&mut errors, "lastName", "Last name", &self.last_name);

        let phone = PhoneNumber::new(&self.phone)
            .map_err(|_| {
                errors.push("phone", ValidationRule::PhoneFormat, "Invalid phone number")
            })
            .ok();

        let role = self
            .profile_type
            .parse::<Role>()
            .ok()
            .filter(Role::is_self_assignable);
        if role.is_none() {
            errors.push(
                "profileType",
                ValidationRule::RoleNotAllowed,
                "Profile type must be one of CLIENT, PARTNER, COMMERCIAL",
            );
        }

        let country = CountryCode::new(&self.country)
            .map_err(|_| {
                errors.push(
                    "country",
                    ValidationRule::CountryFormat,
                    "Country code must be 2 letters (ISO 3166-1 alpha-2)",
                )
            })
            .ok();

        match (email, password, first_name, last_name, phone, role, country) {
            (
                Some(email),
                Some(password),
                Some(first_name),
                Some(last_name),
                Some(phone),
                Some(role),
                Some(country),
            ) => Ok(RegisterCommand {
                email,
                password,
                first_name,
                last_name,
                phone,
                role,
                country,
            }),
            _ => Err(errors),
        }
    }
}

fn name_field(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    raw: &str,
) -> Option<PersonName> {
    PersonName::new(raw)
        .map_err(|_| {
            errors.push(
                field,
                ValidationRule::NameLength,
                format!(
                    "{label} must be between {} and {} characters",
                    PersonName::MIN_LENGTH,
                    PersonName::MAX_LENGTH
                ),
            )
        })
        .ok()
}

/// Unvalidated login input.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

impl LoginForm {
    /// Email must be well-formed and the password non-empty; complexity rules are
    /// not applied so that accounts created under older rules can still sign in.
    pub fn validate(self) -> Result<LoginCommand, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = EmailAddress::new(&self.email)
            .map_err(|_| errors.push("email", ValidationRule::EmailFormat, INVALID_EMAIL))
            .ok();

        if self.password.is_empty() {
            errors.push(
                "password",
                ValidationRule::PasswordRequired,
                "Password is required",
            );
        }

        match email {
            Some(email) if errors.is_empty() => Ok(LoginCommand {
                email,
                password: self.password,
            }),
            _ => Err(errors),
        }
    }
}
