use thiserror::Error;

/// Error type for platform identifier operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlatformIdError {
    #[error("Country code must be 2 letters (ISO 3166-1 alpha-2), got {0:?}")]
    InvalidCountryCode(String),

    #[error("Role must be one of CLIENT, PARTNER, COMMERCIAL, ADMIN, got {0:?}")]
    InvalidRole(String),

    #[error("Date {0} cannot be encoded with a two-digit year (2000-2099 only)")]
    DateOutOfRange(String),

    #[error("Malformed platform identifier: {0:?}")]
    Malformed(String),

    #[error("Batch of {requested} identifiers exceeds the maximum of {max}")]
    BatchTooLarge { requested: usize, max: usize },

    #[error("Only {generated} distinct identifiers after {attempts} attempts")]
    BatchExhausted { generated: usize, attempts: usize },
}
