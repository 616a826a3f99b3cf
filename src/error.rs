use std::fmt;

/// Errors that can occur when generating ULIDs or converting foreign data.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Error {
    /// The text input is not a well-formed ULID (wrong length or a character
    /// outside the Crockford alphabet).
    InvalidUlid,
    /// The binary input is not exactly 16 bytes long.
    InvalidLength,
    /// The timestamp does not fit into 48 bits, or the system clock is
    /// before the Unix epoch.
    TimestampOutOfRange,
    /// The randomness space of a single millisecond is exhausted.
    MonotonicOverflow,
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match *self {
            Self::InvalidUlid => "string is not a valid ULID",
            Self::InvalidLength => "binary ULID must be exactly 16 bytes",
            Self::TimestampOutOfRange => "timestamp does not fit into 48 bits",
            Self::MonotonicOverflow => "randomness overflowed within one millisecond",
        };
        write!(f, "{message}")
    }
}
