use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Payload of an issued session token.
///
/// Access and refresh tokens carry the same payload and differ only in expiry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (credential identifier)
    pub sub: String,

    /// Account email at issuance time
    pub email: String,

    /// Platform identifier of the subject
    pub platform_id: String,

    /// Role / profile type
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims issued now and valid for `lifetime`.
    pub fn new(
        sub: impl ToString,
        email: impl ToString,
        platform_id: impl ToString,
        role: impl ToString,
        lifetime: Duration,
    ) -> Self {
        Self::issued_at(sub, email, platform_id, role, Utc::now(), lifetime)
    }

    /// Create claims with an explicit issuance instant.
    pub fn issued_at(
        sub: impl ToString,
        email: impl ToString,
        platform_id: impl ToString,
        role: impl ToString,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            sub: sub.to_string(),
            email: email.to_string(),
            platform_id: platform_id.to_string(),
            role: role.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
        }
    }

    /// Expiry as a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(lifetime: Duration) -> SessionClaims {
        SessionClaims::new(
            "4f7e5d1a-1111-4222-8333-944455556666",
            "awa@example.com",
            "CI250615-AB12-CL",
            "CLIENT",
            lifetime,
        )
    }

    #[test]
    fn test_lifetime_sets_exp() {
        let claims = sample(Duration::hours(24));

        assert_eq!(claims.sub, "4f7e5d1a-1111-4222-8333-944455556666");
        assert_eq!(claims.platform_id, "CI250615-AB12-CL");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_issued_at_in_the_past() {
        let issued = Utc::now() - Duration::days(8);
        let claims = SessionClaims::issued_at(
            "4f7e5d1a-1111-4222-8333-944455556666",
            "awa@example.com",
            "CI250615-AB12-CL",
            "CLIENT",
            issued,
            Duration::days(7),
        );

        assert_eq!(claims.iat, issued.timestamp());
        assert!(claims.expires_at().unwrap() < Utc::now());
    }

    #[test]
    fn test_serialized_field_names() {
        let claims = sample(Duration::hours(1));
        let json = serde_json::to_value(&claims).unwrap();

        for field in ["sub", "email", "platform_id", "role", "iat", "exp"] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
    }
}
