//! ULID minting and object-key uniqueness utilities.
//!
//! recordkit identifies uploaded objects and other records with ULIDs: 128-bit identifiers
//! made of a **48-bit millisecond timestamp** followed by **80 bits of randomness**, rendered
//! as 26 characters of Crockford base-32.
//!
//! ## Canonical ULID form
//! - Length: 26
//! - Characters: `0-9` and `A-Z` excluding `I`, `L`, `O`, `U`
//! - Example: `01HZX3V8Q6J7K9M2N4P5R6S7T8`
//!
//! Because the timestamp occupies the most significant bits and the alphabet is ordered, ids
//! minted in increasing time order also sort lexicographically in increasing order.
//!
//! This crate provides:
//! - [`get_ulid`] / [`new_ulid`] for one-off ids seeded from the nanosecond clock.
//! - [`UlidGenerator`], a single generation stream that stays strictly increasing even when
//!   several ids are minted in the same millisecond.
//! - [`unique_key`], which injects a ULID into an object key just before its extension
//!   (`photo.jpg` becomes `photo_<ulid>.jpg`).
//!
//! Independent streams are not coordinated: two streams seeded in the same nanosecond can
//! collide. That risk is accepted; use one [`UlidGenerator`] when ordering matters.

mod key;
mod service;

pub use key::{unique_key, unique_key_with};
pub use service::{get_ulid, new_ulid, parse_ulid, Ulid, UlidGenerator, ULID_LEN};

/// Error type for ULID operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UlidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The random component of a generation stream cannot be incremented any further within
    /// the current millisecond.
    #[error("ULID random component overflowed within the current millisecond")]
    MonotonicOverflow,
}

/// Result type for ULID operations.
pub type UlidResult<T> = Result<T, UlidError>;
