use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::PlatformIdError;

/// ISO 3166-1 alpha-2 country code, stored uppercase.
///
/// Only the shape is checked (two ASCII letters), not membership in the ISO list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Validate and normalize a country code.
    ///
    /// # Errors
    /// * `InvalidCountryCode` - Not exactly two ASCII letters
    pub fn new(code: &str) -> Result<Self, PlatformIdError> {
        if code.len() == 2 && code.bytes().all(|b| b.is_ascii_alphabetic()) {
            Ok(Self(code.to_ascii_uppercase()))
        } else {
            Err(PlatformIdError::InvalidCountryCode(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = PlatformIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}
