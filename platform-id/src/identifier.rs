use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::country::CountryCode;
use crate::errors::PlatformIdError;
use crate::role::Role;

/// Structured platform identifier.
///
/// Immutable once built. The canonical text (`CCYYMMDD-XXXX-RR`) is the only persisted
/// form; the fields are recovered by [`PlatformId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlatformId {
    country: CountryCode,
    created_on: NaiveDate,
    disambiguator: u16,
    role: Role,
}

impl PlatformId {
    /// Length of the canonical encoding, dashes included.
    pub const ENCODED_LEN: usize = 16;

    const FIRST_YEAR: i32 = 2000;
    const LAST_YEAR: i32 = 2099;

    /// Assemble an identifier from its parts.
    ///
    /// # Errors
    /// * `DateOutOfRange` - Year cannot round-trip through a two-digit encoding
    pub fn from_parts(
        country: CountryCode,
        created_on: NaiveDate,
        disambiguator: u16,
        role: Role,
    ) -> Result<Self, PlatformIdError> {
        if !(Self::FIRST_YEAR..=Self::LAST_YEAR).contains(&created_on.year()) {
            return Err(PlatformIdError::DateOutOfRange(created_on.to_string()));
        }

        Ok(Self {
            country,
            created_on,
            disambiguator,
            role,
        })
    }

    /// Parse canonical text.
    ///
    /// Returns `None` when [`validate`] fails, and also when the date digits do not name
    /// a real calendar day (e.g. month 13). Years are read as `2000 + YY`.
    pub fn parse(text: &str) -> Option<Self> {
        if !validate(text) {
            return None;
        }

        // validate() guarantees ASCII, so byte slicing is on char boundaries
        let country = CountryCode::new(text.get(0..2)?).ok()?;
        let year = Self::FIRST_YEAR + text.get(2..4)?.parse::<i32>().ok()?;
        let month = text.get(4..6)?.parse::<u32>().ok()?;
        let day = text.get(6..8)?.parse::<u32>().ok()?;
        let created_on = NaiveDate::from_ymd_opt(year, month, day)?;
        let disambiguator = u16::from_str_radix(text.get(9..13)?, 16).ok()?;
        let role = Role::from_suffix(text.get(14..16)?)?;

        Some(Self {
            country,
            created_on,
            disambiguator,
            role,
        })
    }

    pub fn country(&self) -> &CountryCode {
        &self.country
    }

    /// Calendar date encoded in the identifier.
    pub fn created_on(&self) -> NaiveDate {
        self.created_on
    }

    /// Random component, rendered as 4 uppercase hex characters.
    pub fn disambiguator(&self) -> String {
        format!("{:04X}", self.disambiguator)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_role(&self, role: Role) -> bool {
        self.role == role
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:02}{:02}{:02}-{:04X}-{}",
            self.country,
            self.created_on.year() % 100,
            self.created_on.month(),
            self.created_on.day(),
            self.disambiguator,
            self.role.suffix()
        )
    }
}

impl FromStr for PlatformId {
    type Err = PlatformIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| PlatformIdError::Malformed(s.to_string()))
    }
}

impl TryFrom<String> for PlatformId {
    type Error = PlatformIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlatformId> for String {
    fn from(id: PlatformId) -> Self {
        id.to_string()
    }
}

/// Check that `text` is exactly in canonical form.
///
/// Two uppercase letters, six digits, dash, four uppercase hex characters, dash, and one
/// of `CL`/`PT`/`CM`/`AD`. No trimming or case folding. Never panics.
pub fn validate(text: &str) -> bool {
    let [c0, c1, y0, y1, m0, m1, d0, d1, b'-', h0, h1, h2, h3, b'-', r0, r1] = text.as_bytes()
    else {
        return false;
    };

    let upper_hex = |b: &u8| b.is_ascii_digit() || (b'A'..=b'F').contains(b);

    [c0, c1].into_iter().all(u8::is_ascii_uppercase)
        && [y0, y1, m0, m1, d0, d1].into_iter().all(u8::is_ascii_digit)
        && [h0, h1, h2, h3].into_iter().all(upper_hex)
        && matches!([r0, r1], [b'C', b'L'] | [b'P', b'T'] | [b'C', b'M'] | [b'A', b'D'])
}

/// Free-function form of [`PlatformId::parse`].
pub fn parse(text: &str) -> Option<PlatformId> {
    PlatformId::parse(text)
}

/// Whether `text` parses and carries `role`. False on any parse failure.
pub fn is_role(text: &str, role: Role) -> bool {
    parse(text).is_some_and(|id| id.is_role(role))
}

/// Country of a parseable identifier.
pub fn country_of(text: &str) -> Option<CountryCode> {
    parse(text).map(|id| id.country)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_example() {
        let id = PlatformId::parse("CI250615-AB12-CL").expect("valid identifier");

        assert_eq!(id.country().as_str(), "CI");
        assert_eq!(id.created_on(), date(2025, 6, 15));
        assert_eq!(id.disambiguator(), "AB12");
        assert_eq!(id.role(), Role::Client);
    }

    #[test]
    fn test_display_is_canonical() {
        let id = PlatformId::from_parts(
            CountryCode::new("sn").unwrap(),
            date(2031, 1, 9),
            0x00af,
            Role::Commercial,
        )
        .unwrap();

        assert_eq!(id.to_string(), "SN310109-00AF-CM");
        assert_eq!(id.to_string().len(), PlatformId::ENCODED_LEN);
    }

    #[test]
    fn test_validate_accepts_canonical_forms() {
        for text in [
            "CI250615-AB12-CL",
            "BF000101-0000-PT",
            "ML991231-FFFF-CM",
            "SN240229-9A9A-AD",
        ] {
            assert!(validate(text), "{text} should validate");
        }
    }

    #[test]
    fn test_validate_rejects_malformed() {
        for text in [
            "ci250615-ab12-CL",
            "CI250615-ab12-CL",
            "CI250615-AB12-cl",
            "CI250615-AB12-XX",
            "CI250615-AG12-CL",
            "CI25061-AB12-CL",
            "CI2506155-AB12-CL",
            " CI250615-AB12-CL",
            "CI250615-AB12-CL ",
            "CI250615_AB12_CL",
            "C1250615-AB12-CL",
            "",
            "CI250615-ÀB1-CL",
        ] {
            assert!(!validate(text), "{text:?} should not validate");
        }
    }

    #[test]
    fn test_parse_consistent_with_validate() {
        for text in [
            "CI250615-AB12-CL",
            "ci250615-ab12-CL",
            "CI251315-AB12-CL",
            "CI250230-AB12-PT",
            "nonsense",
            "SN240229-0001-AD",
        ] {
            if !validate(text) {
                assert!(parse(text).is_none(), "{text} parsed but does not validate");
            }
            if parse(text).is_some() {
                assert!(validate(text), "{text} parsed but does not validate");
            }
        }
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert!(validate("CI251315-AB12-CL"));
        assert!(parse("CI251315-AB12-CL").is_none());
        assert!(parse("CI250230-AB12-CL").is_none());
        assert!(parse("SN240229-AB12-CL").is_some());
    }

    #[test]
    fn test_admin_suffix_parses() {
        let id = parse("CI250615-0001-AD").unwrap();
        assert_eq!(id.role(), Role::Admin);
    }

    #[test]
    fn test_is_role_and_country_of() {
        assert!(is_role("BF250615-AB12-PT", Role::Partner));
        assert!(!is_role("BF250615-AB12-PT", Role::Client));
        assert!(!is_role("garbage", Role::Client));

        assert_eq!(
            country_of("BF250615-AB12-PT").map(|c| c.to_string()),
            Some("BF".to_string())
        );
        assert_eq!(country_of("bf250615-AB12-PT"), None);
    }

    #[test]
    fn test_from_parts_rejects_dates_outside_two_digit_years() {
        let result = PlatformId::from_parts(
            CountryCode::new("CI").unwrap(),
            date(2100, 1, 1),
            1,
            Role::Client,
        );
        assert!(matches!(result, Err(PlatformIdError::DateOutOfRange(_))));

        let result = PlatformId::from_parts(
            CountryCode::new("CI").unwrap(),
            date(1999, 12, 31),
            1,
            Role::Client,
        );
        assert!(matches!(result, Err(PlatformIdError::DateOutOfRange(_))));
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let id = parse("ML240101-BEEF-PT").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ML240101-BEEF-PT\"");

        let back: PlatformId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<PlatformId>("\"ml240101-BEEF-PT\"").is_err());
    }

    #[test]
    fn test_from_str_reports_malformed() {
        let err = "bad".parse::<PlatformId>().unwrap_err();
        assert_eq!(err, PlatformIdError::Malformed("bad".to_string()));
    }
}
