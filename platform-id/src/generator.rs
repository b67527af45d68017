use std::collections::HashSet;

use chrono::NaiveDate;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::CryptoRng;
use rand::RngCore;

use crate::country::CountryCode;
use crate::errors::PlatformIdError;
use crate::identifier::PlatformId;
use crate::role::Role;

/// Largest batch [`generate_batch`] accepts. Well under the 65536 disambiguators a single
/// country/date/role combination can hold.
pub const MAX_BATCH_SIZE: usize = 4096;

/// Generate a fresh identifier dated today (UTC).
///
/// Draws the disambiguator from the operating system CSPRNG, which is safe to call from
/// concurrent requests.
///
/// # Errors
/// * `InvalidCountryCode` - `country` is not two ASCII letters
pub fn generate(country: &str, role: Role) -> Result<PlatformId, PlatformIdError> {
    generate_on(country, role, Utc::now().date_naive(), &mut OsRng)
}

/// Generate an identifier for an explicit date and random source.
///
/// # Errors
/// * `InvalidCountryCode` - `country` is not two ASCII letters
/// * `DateOutOfRange` - `date` is outside 2000-2099
pub fn generate_on<R>(
    country: &str,
    role: Role,
    date: NaiveDate,
    rng: &mut R,
) -> Result<PlatformId, PlatformIdError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let country = CountryCode::new(country)?;

    let mut bytes = [0u8; 2];
    rng.fill_bytes(&mut bytes);

    PlatformId::from_parts(country, date, u16::from_be_bytes(bytes), role)
}

/// Generate `count` distinct identifiers dated today (UTC).
///
/// # Errors
/// * `BatchTooLarge` - `count` exceeds [`MAX_BATCH_SIZE`]
/// * `BatchExhausted` - Attempt limit reached before `count` distinct values were drawn
/// * Any error from [`generate_on`]
pub fn generate_batch(
    count: usize,
    country: &str,
    role: Role,
) -> Result<HashSet<PlatformId>, PlatformIdError> {
    generate_batch_on(count, country, role, Utc::now().date_naive(), &mut OsRng)
}

/// Batch generation with an explicit date and random source.
///
/// Deduplicates in a set local to this call and gives up after `count * 4 + 16` draws.
pub fn generate_batch_on<R>(
    count: usize,
    country: &str,
    role: Role,
    date: NaiveDate,
    rng: &mut R,
) -> Result<HashSet<PlatformId>, PlatformIdError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if count > MAX_BATCH_SIZE {
        return Err(PlatformIdError::BatchTooLarge {
            requested: count,
            max: MAX_BATCH_SIZE,
        });
    }

    let max_attempts = count * 4 + 16;
    let mut ids = HashSet::with_capacity(count);
    let mut attempts = 0;

    while ids.len() < count {
        if attempts == max_attempts {
            return Err(PlatformIdError::BatchExhausted {
                generated: ids.len(),
                attempts,
            });
        }
        attempts += 1;
        ids.insert(generate_on(country, role, date, &mut *rng)?);
    }

    Ok(ids)
}
