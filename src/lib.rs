//! # Lexicographically Sortable Identifiers
//!
//! This crate generates, validates, and losslessly converts ULIDs
//! (Universally Unique Lexicographically Sortable Identifiers): 128-bit
//! values composed of a 48-bit millisecond timestamp and 80 bits of
//! randomness, rendered as a 26-character Crockford Base32 string that sorts
//! lexicographically in creation order.
//!
//! The final character of every ULID produced by this crate is `0`: 26
//! Base32 characters encode 130 bits, two more than the 128 bits of
//! information, and the surplus lives in the last character. Pinning it to
//! zero makes the text form round-trip exactly through the 16-byte binary
//! form.
//!
//! ## Generating ULIDs
//!
//! ```
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let u1 = lexid::generate()?;
//! let u2 = lexid::generate()?;
//!
//! assert!(u1 < u2);
//! assert!(u2.as_str().ends_with('0'));
//! # Ok(()) }
//! ```
//!
//! Generated ULIDs are strictly monotonically increasing, even for calls
//! within the same millisecond and across backward clock jumps. Generation
//! is thread-safe; concurrent callers are serialized per generator.
//!
//! For isolated monotonic state or a deterministic randomness source,
//! construct [`UlidGenerator`] instances explicitly:
//!
//! ```
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! use lexid::UlidGenerator;
//!
//! let generator = UlidGenerator::new();
//! let u = generator.generate()?;
//! # Ok(()) }
//! ```
//!
//! ## Validating and decoding
//!
//! ```
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! // cspell:disable-next-line
//! assert!(lexid::is_valid("01BX5ZZKBKACTAV9WEVGEMMVRZ"));
//! // cspell:disable-next-line
//! assert!(lexid::is_valid("01bx5zzkbkactav9wevgemmvrz"));
//! assert!(!lexid::is_valid("not-a-ulid"));
//!
//! // cspell:disable-next-line
//! let millis = lexid::decode_timestamp("01ARYZ6S41TSV4RRFFQ69G5FAV")?;
//! assert_eq!(millis, 1_469_918_176_385);
//! # Ok(()) }
//! ```
//!
//! ## Binary conversion
//!
//! ```
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let u = lexid::generate()?;
//!
//! let bytes = lexid::to_binary(u.as_str())?;
//! let back = lexid::from_binary(&bytes)?;
//!
//! assert_eq!(back, u);
//! # Ok(()) }
//! ```
//!
//! ## Feature Flags
//!
//! - **`rand`**: Uses the `rand` crate as the default randomness source,
//!   enabled by default. Without it, generators require an explicit
//!   [`RandomSource`].
//! - **`serde`**: Serialization and deserialization of [`Ulid`] as its
//!   canonical string, optional.

mod base32;
mod binary;
mod error;
mod generator;
#[cfg(feature = "serde")]
mod serde;
mod ulid;

use std::borrow::Cow;

pub use error::Error;
#[cfg(feature = "rand")]
pub use generator::{generate, generate_at};
pub use generator::{RandomSource, UlidGenerator};
pub use ulid::Ulid;

const TIMESTAMP_BITS: u32 = 48;
const TIMESTAMP_MAX: u64 = (1 << TIMESTAMP_BITS) - 1;

const RANDOM_BITS: u32 = 80;
const RANDOM_MASK: u128 = (1 << RANDOM_BITS) - 1;

// The final text character is pinned to `0`, so the low five bits of the
// randomness field never appear in the output. Fresh draws clear them and
// same-millisecond increments advance by one unit of the lowest character
// that is actually encoded.
const TAIL_BITS: u32 = 5;
const RANDOM_STEP: u128 = 1 << TAIL_BITS;
const TAIL_MASK: u128 = RANDOM_STEP - 1;

const TEXT_LEN: usize = 26;
const TIMESTAMP_LEN: usize = 10;
const BINARY_LEN: usize = 16;

/// Checks a ULID string for validity.
///
/// A candidate is valid if it is exactly 26 characters long and every
/// character belongs to the Crockford alphabet, case-insensitively. The
/// letters I, L, O, and U are not part of the alphabet.
///
/// This never panics or errors; malformed input simply yields `false`.
///
/// # Example
///
/// ```
/// // cspell:disable-next-line
/// assert!(lexid::is_valid("01BX5ZZKBKACTAV9WEVGEMMVRZ"));
/// assert!(!lexid::is_valid("01BX5ZZKBKACTAV9WEVGEMMVRL"));
/// assert!(!lexid::is_valid("too short"));
/// ```
#[must_use]
pub fn is_valid(candidate: &str) -> bool {
    validate(candidate).is_ok()
}

/// Checks a ULID string for validity, reporting the failure as an error.
///
/// # Errors
///
/// Fails with [`Error::InvalidUlid`] if the candidate has the wrong length
/// or contains a character outside the Crockford alphabet.
pub fn validate(candidate: &str) -> Result<(), Error> {
    let text = base32::as_text(candidate.as_bytes())?;
    base32::symbols(text).map(|_| ())
}

/// Decodes the millisecond timestamp of a ULID string.
///
/// This is a pure function of the first 10 characters; no generator state
/// is involved.
///
/// # Errors
///
/// Fails with [`Error::InvalidUlid`] if the candidate is not a valid ULID.
///
/// # Example
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// // cspell:disable-next-line
/// let millis = lexid::decode_timestamp("01ARYZ6S41TSV4RRFFQ69G5FAV")?;
///
/// assert_eq!(millis, 1_469_918_176_385);
/// # Ok(()) }
/// ```
pub fn decode_timestamp(candidate: &str) -> Result<u64, Error> {
    let text = base32::as_text(candidate.as_bytes())?;
    base32::symbols(text)?;
    base32::decode_timestamp(text)
}

/// Converts a ULID string into its 16-byte binary form.
///
/// The bytes hold the first 128 bits of the 130-bit character stream in
/// network byte order: the leading 50 bits follow from the 10 timestamp
/// characters, the rest from the randomness characters. The trailing two
/// stream bits are discarded; in a conforming ULID (final character `0`)
/// they are zero.
///
/// # Errors
///
/// Fails with [`Error::InvalidUlid`] if the candidate is not a valid ULID.
pub fn to_binary(candidate: &str) -> Result<[u8; BINARY_LEN], Error> {
    let text = base32::as_text(candidate.as_bytes())?;
    let symbols = base32::symbols(text)?;
    Ok(binary::pack(&symbols))
}

/// Converts a 16-byte binary ULID into its canonical text form.
///
/// The final character of the result is always `0`. Input bytes whose
/// trailing three bits are non-zero cannot originate from a conforming
/// ULID; they are normalized, not preserved.
///
/// # Errors
///
/// Fails with [`Error::InvalidLength`] if `bytes` is not exactly 16 bytes
/// long.
///
/// # Example
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let u = lexid::from_binary(&[0; 16])?;
///
/// assert_eq!(u.as_str(), "00000000000000000000000000");
/// # Ok(()) }
/// ```
pub fn from_binary(bytes: &[u8]) -> Result<Ulid, Error> {
    let bytes: &[u8; BINARY_LEN] = bytes.try_into().or(Err(Error::InvalidLength))?;
    Ok(Ulid::from_bytes(*bytes))
}

/// Canonicalizes a ULID string to its uppercase form.
///
/// If the input is already canonical, a borrowed version of the input is
/// returned without allocating.
///
/// # Errors
///
/// Fails with [`Error::InvalidUlid`] if the candidate is not a valid ULID.
///
/// # Example
///
/// ```
/// // cspell:disable-next-line
/// let s = "01bx5zzkbkactav9wevgemmvrz";
///
/// // cspell:disable-next-line
/// assert_eq!(lexid::canonicalize(s), Ok("01BX5ZZKBKACTAV9WEVGEMMVRZ".into()));
/// ```
pub fn canonicalize(candidate: &str) -> Result<Cow<'_, str>, Error> {
    let ulid: Ulid = candidate.parse()?;

    if ulid.as_str() == candidate {
        Ok(candidate.into())
    } else {
        Ok(ulid.to_string().into())
    }
}
