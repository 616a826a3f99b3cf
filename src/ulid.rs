use std::{fmt, str::FromStr};

use crate::{base32, binary, Error, BINARY_LEN, TEXT_LEN, TIMESTAMP_LEN};

/// A ULID in its canonical 26-character text form.
///
/// The derived ordering compares the uppercase text bytes, so `Ulid` values
/// sort lexicographically, which is creation order for generated ULIDs.
///
/// # Example
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use lexid::Ulid;
///
/// // cspell:disable-next-line
/// let u: Ulid = "01ARYZ6S41TSV4RRFFQ69G5FAV".parse()?;
///
/// assert_eq!(u.timestamp(), 1_469_918_176_385);
/// # Ok(()) }
/// ```
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ulid([u8; TEXT_LEN]);

impl Ulid {
    pub(crate) const fn from_text(text: [u8; TEXT_LEN]) -> Self {
        Self(text)
    }

    /// Returns the canonical 26-character string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Safety: the text is checked against the alphabet on construction
        unsafe { std::str::from_utf8_unchecked(&self.0) }
    }

    /// Returns the timestamp part in milliseconds since the Unix epoch.
    ///
    /// This is a pure function of the first 10 characters.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use lexid::Ulid;
    ///
    /// // cspell:disable-next-line
    /// let u: Ulid = "01ARYZ6S41TSV4RRFFQ69G5FAV".parse()?;
    ///
    /// assert_eq!(u.timestamp(), 1_469_918_176_385);
    /// # Ok(()) }
    /// ```
    #[must_use]
    pub fn timestamp(&self) -> u64 {
        base32::decode_timestamp(&self.0).expect("ulid text is checked on construction")
    }

    /// Returns the randomness field carried by the last 16 characters.
    #[must_use]
    pub fn randomness(&self) -> u128 {
        self.symbols()[TIMESTAMP_LEN..]
            .iter()
            .fold(0, |value, &symbol| (value << 5) | u128::from(symbol))
    }

    /// Converts this ULID into its 16-byte binary form.
    ///
    /// The bytes hold the first 128 bits of the 130-bit character stream in
    /// network byte order; the trailing two stream bits are the pinned-zero
    /// padding of the final character.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; BINARY_LEN] {
        binary::pack(&self.symbols())
    }

    /// Creates a ULID from its 16-byte binary form.
    ///
    /// The final character of the result is always `0`; input bytes whose
    /// trailing three bits are non-zero are normalized, not preserved.
    #[must_use]
    pub fn from_bytes(bytes: [u8; BINARY_LEN]) -> Self {
        Self(binary::unpack(&bytes))
    }

    fn symbols(&self) -> [u8; TEXT_LEN] {
        base32::symbols(&self.0).expect("ulid text is checked on construction")
    }
}

impl fmt::Display for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ulid")
            .field("string", &self.as_str())
            .field("timestamp", &self.timestamp())
            .finish()
    }
}

impl FromStr for Ulid {
    type Err = Error;

    /// Parses a ULID, accepting lowercase input and normalizing it to the
    /// canonical uppercase form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = base32::as_text(s.as_bytes())?;
        base32::symbols(text)?;

        let mut canonical = *text;
        canonical.make_ascii_uppercase();
        Ok(Self(canonical))
    }
}

impl From<Ulid> for [u8; BINARY_LEN] {
    fn from(ulid: Ulid) -> Self {
        ulid.to_bytes()
    }
}

impl From<[u8; BINARY_LEN]> for Ulid {
    fn from(bytes: [u8; BINARY_LEN]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for Ulid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: &[u8; BINARY_LEN] = bytes.try_into().or(Err(Error::InvalidLength))?;
        Ok(Self::from_bytes(*bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case() {
        // cspell:disable-next-line
        let lower: Ulid = "01bx5zzkbkactav9wevgemmvrz".parse().unwrap();
        // cspell:disable-next-line
        let upper: Ulid = "01BX5ZZKBKACTAV9WEVGEMMVRZ".parse().unwrap();

        assert_eq!(lower, upper);
        // cspell:disable-next-line
        assert_eq!(lower.to_string(), "01BX5ZZKBKACTAV9WEVGEMMVRZ");
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!("".parse::<Ulid>(), Err(Error::InvalidUlid));
        assert_eq!(
            "0123456789012345678901234".parse::<Ulid>(),
            Err(Error::InvalidUlid)
        );
        assert_eq!(
            "0000000000000000000000000$".parse::<Ulid>(),
            Err(Error::InvalidUlid)
        );
    }

    #[test]
    fn component_accessors() {
        // Randomness suffix "00000000000000G0" carries the symbol value of
        // `G` (16) in the second-to-last character: 16 << 5 = 512.
        // cspell:disable-next-line
        let u: Ulid = "01ARYZ6S4100000000000000G0".parse().unwrap();

        assert_eq!(u.timestamp(), 1_469_918_176_385);
        assert_eq!(u.randomness(), 512);
    }

    #[test]
    fn bytes_roundtrip() {
        // cspell:disable-next-line
        let u: Ulid = "01ARYZ6S41TSV4RRFFQ69G5FA0".parse().unwrap();

        let bytes = u.to_bytes();
        assert_eq!(Ulid::from_bytes(bytes), u);
    }

    #[test]
    fn try_from_slice_checks_length() {
        assert_eq!(Ulid::try_from(&[0u8; 15][..]), Err(Error::InvalidLength));
        assert_eq!(Ulid::try_from(&[0u8; 17][..]), Err(Error::InvalidLength));
        assert!(Ulid::try_from(&[0u8; 16][..]).is_ok());
    }

    #[test]
    fn debug_format() {
        // cspell:disable-next-line
        let u: Ulid = "01ARYZ6S4100000000000000G0".parse().unwrap();
        assert_eq!(
            format!("{u:?}"),
            // cspell:disable-next-line
            r#"Ulid { string: "01ARYZ6S4100000000000000G0", timestamp: 1469918176385 }"#
        );
    }
}
