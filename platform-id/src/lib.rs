//! Platform identifier library
//!
//! Every registered entity carries a structured, human-decodable identifier of the form
//! `CCYYMMDD-XXXX-RR`:
//! - `CC` country code (ISO 3166-1 alpha-2, uppercase)
//! - `YYMMDD` generation date
//! - `XXXX` random disambiguator (4 uppercase hex characters)
//! - `RR` role suffix (`CL`, `PT`, `CM`, `AD`)
//!
//! Uniqueness is probabilistic. The persistence layer's uniqueness constraint is the
//! authoritative collision guard.
//!
//! # Examples
//!
//! ## Generating
//! ```
//! use platform_id::Role;
//!
//! let id = platform_id::generate("ci", Role::Client).unwrap();
//! assert!(platform_id::validate(&id.to_string()));
//! assert_eq!(id.country().as_str(), "CI");
//! ```
//!
//! ## Parsing
//! ```
//! use chrono::NaiveDate;
//! use platform_id::PlatformId;
//! use platform_id::Role;
//!
//! let id = PlatformId::parse("CI250615-AB12-CL").unwrap();
//! assert_eq!(id.created_on(), NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
//! assert_eq!(id.disambiguator(), "AB12");
//! assert_eq!(id.role(), Role::Client);
//!
//! assert!(PlatformId::parse("ci250615-ab12-CL").is_none());
//! ```

pub mod country;
pub mod errors;
pub mod generator;
pub mod identifier;
pub mod role;

// Re-export commonly used items
pub use country::CountryCode;
pub use errors::PlatformIdError;
pub use generator::generate;
pub use generator::generate_batch;
pub use generator::generate_batch_on;
pub use generator::generate_on;
pub use generator::MAX_BATCH_SIZE;
pub use identifier::country_of;
pub use identifier::is_role;
pub use identifier::parse;
pub use identifier::validate;
pub use identifier::PlatformId;
pub use role::Role;
