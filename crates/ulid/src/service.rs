//! ULID generation streams.
//!
//! Every stream owns its own random source seeded from the nanosecond clock, so nothing is
//! shared between callers and no locking is needed.

use crate::{UlidError, UlidResult};
use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::fmt;
use ulid::{Generator, MonotonicError};

/// Re-exported for convenience.
pub use ::ulid::{Ulid, ULID_LEN};

fn clock_seed(now: DateTime<Utc>) -> u64 {
    // Nanosecond readings only overflow i64 after 2262; fall back to microseconds then.
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros()) as u64
}

/// A single ULID generation stream.
///
/// Ids returned by one stream are strictly increasing: when the clock has not advanced past
/// the previous id's millisecond (or has stepped backwards), the previous id is incremented
/// instead of drawing fresh randomness.
///
/// # Construction
/// - [`UlidGenerator::new`] seeds the random source from the current nanosecond clock.
/// - [`UlidGenerator::with_seed`] uses an explicit seed (reproducible streams in tests).
pub struct UlidGenerator {
    rng: StdRng,
    inner: Generator,
}

impl fmt::Debug for UlidGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UlidGenerator").finish_non_exhaustive()
    }
}

impl Default for UlidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl UlidGenerator {
    /// Creates a stream seeded from the current nanosecond clock reading.
    pub fn new() -> Self {
        Self::with_seed(clock_seed(Utc::now()))
    }

    /// Creates a stream with an explicit seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            inner: Generator::new(),
        }
    }

    /// Mints the next id for the current instant.
    ///
    /// # Errors
    ///
    /// Returns [`UlidError::MonotonicOverflow`] if the random component of the previous id in
    /// this millisecond is already at its maximum.
    pub fn generate(&mut self) -> UlidResult<Ulid> {
        self.generate_at(Utc::now())
    }

    /// Mints the next id for `at`.
    ///
    /// # Errors
    ///
    /// Returns [`UlidError::MonotonicOverflow`] if the stream cannot stay strictly increasing.
    pub fn generate_at(&mut self, at: DateTime<Utc>) -> UlidResult<Ulid> {
        next_in_stream(&mut self.inner, at, &mut self.rng)
    }
}

fn next_in_stream<R>(
    generator: &mut Generator,
    at: DateTime<Utc>,
    source: &mut R,
) -> UlidResult<Ulid>
where
    R: Rng + ?Sized,
{
    generator
        .generate_from_datetime_with_source(at.into(), source)
        .map_err(|e| match e {
            MonotonicError::Overflow => UlidError::MonotonicOverflow,
        })
}

/// Mints a one-off ULID for the current instant.
///
/// No stream state is kept, so this cannot overflow.
pub fn new_ulid() -> Ulid {
    let now = Utc::now();
    let mut rng = StdRng::seed_from_u64(clock_seed(now));
    Ulid::from_datetime_with_source(now.into(), &mut rng)
}

/// Returns a one-off ULID for the current instant in canonical form.
pub fn get_ulid() -> String {
    new_ulid().to_string()
}

/// Validates and parses a ULID string that must already be in canonical form.
///
/// Lowercase input is rejected even though Crockford decoding would accept it, so that ids
/// round-trip byte-for-byte through storage keys.
///
/// # Errors
///
/// Returns [`UlidError::InvalidInput`] if `input` is not a canonical ULID.
pub fn parse_ulid(input: &str) -> UlidResult<Ulid> {
    let canonical = input.len() == ULID_LEN
        && input
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase());
    if !canonical {
        return Err(UlidError::InvalidInput(format!(
            "ULID must be 26 uppercase Crockford base-32 characters, got: '{input}'"
        )));
    }

    Ulid::from_string(input)
        .map_err(|e| UlidError::InvalidInput(format!("Invalid ULID '{input}': {e}")))
}
