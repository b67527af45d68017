use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::PlatformIdError;

/// Role (profile type) encoded in the identifier suffix.
///
/// The mapping to suffixes is 1:1. `Admin` parses and generates like the others but is
/// never assignable through self-registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Client,
    Partner,
    Commercial,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Client, Role::Partner, Role::Commercial, Role::Admin];

    /// Two-letter suffix used in the canonical encoding.
    pub const fn suffix(&self) -> &'static str {
        match self {
            Role::Client => "CL",
            Role::Partner => "PT",
            Role::Commercial => "CM",
            Role::Admin => "AD",
        }
    }

    /// Reverse of [`Role::suffix`]. Case-sensitive.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "CL" => Some(Role::Client),
            "PT" => Some(Role::Partner),
            "CM" => Some(Role::Commercial),
            "AD" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Upper-case role name as exchanged over the API.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Partner => "PARTNER",
            Role::Commercial => "COMMERCIAL",
            Role::Admin => "ADMIN",
        }
    }

    /// Whether a user may pick this role when registering.
    pub const fn is_self_assignable(&self) -> bool {
        !matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PlatformIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| PlatformIdError::InvalidRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_mapping_is_bijective() {
        for role in Role::ALL {
            assert_eq!(Role::from_suffix(role.suffix()), Some(role));
        }
        assert_eq!(Role::from_suffix("XX"), None);
        assert_eq!(Role::from_suffix("cl"), None);
    }

    #[test]
    fn test_parse_role_name() {
        assert_eq!("PARTNER".parse::<Role>(), Ok(Role::Partner));
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(
            "client".parse::<Role>(),
            Err(PlatformIdError::InvalidRole("client".to_string()))
        );
        assert!("MANAGER".parse::<Role>().is_err());
    }

    #[test]
    fn test_admin_is_not_self_assignable() {
        assert!(Role::Client.is_self_assignable());
        assert!(Role::Partner.is_self_assignable());
        assert!(Role::Commercial.is_self_assignable());
        assert!(!Role::Admin.is_self_assignable());
    }
}
