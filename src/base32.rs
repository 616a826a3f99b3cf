use std::str::from_utf8_unchecked;

use crate::{Error, TEXT_LEN, TIMESTAMP_LEN};

// cspell:disable-next-line
pub const ALPHABET: [u8; 32] = *b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

// Strict Crockford lookup: digits and letters except I, L, O, U, in either
// case. No digit aliasing, rejected letters stay rejected.
#[rustfmt::skip]
const DECODE: [i8; 256] = [
    /* 0x00 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0x10 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0x20 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0x30 */   0,  1,  2,  3,  4,  5,  6,  7,  8,  9, -1, -1, -1, -1, -1, -1,
    /* 0x40 */  -1, 10, 11, 12, 13, 14, 15, 16, 17, -1, 18, 19, -1, 20, 21, -1,
    /* 0x50 */  22, 23, 24, 25, 26, -1, 27, 28, 29, 30, 31, -1, -1, -1, -1, -1,
    /* 0x60 */  -1, 10, 11, 12, 13, 14, 15, 16, 17, -1, 18, 19, -1, 20, 21, -1,
    /* 0x70 */  22, 23, 24, 25, 26, -1, 27, 28, 29, 30, 31, -1, -1, -1, -1, -1,
    /* 0x80 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0x90 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0xA0 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0xB0 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0xC0 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0xD0 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0xE0 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    /* 0xF0 */  -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
];

fn symbol(char: u8) -> Option<u8> {
    u8::try_from(DECODE[usize::from(char)]).ok()
}

/// Checks the length of a candidate ULID string.
pub fn as_text(bytes: &[u8]) -> Result<&[u8; TEXT_LEN], Error> {
    bytes.try_into().or(Err(Error::InvalidUlid))
}

/// Looks up the 5-bit symbol value of every character, case-insensitively.
pub fn symbols(text: &[u8; TEXT_LEN]) -> Result<[u8; TEXT_LEN], Error> {
    let mut values = [0; TEXT_LEN];

    for (value, &char) in values.iter_mut().zip(text) {
        *value = symbol(char).ok_or(Error::InvalidUlid)?;
    }

    Ok(values)
}

/// Renders a (timestamp, randomness) pair as 26 characters: 10 timestamp
/// characters followed by 16 randomness characters, most significant symbol
/// first. The final character is pinned to `0` because only 128 of the 130
/// encoded bits carry information.
pub fn encode(timestamp: u64, randomness: u128, buffer: &mut [u8; TEXT_LEN]) -> &str {
    let (head, tail) = buffer.split_at_mut(TIMESTAMP_LEN);
    encode_into(u128::from(timestamp), head);
    encode_into(randomness, tail);

    buffer[TEXT_LEN - 1] = b'0';

    // Safety: the encoding above emits only ASCII characters from the alphabet
    unsafe { from_utf8_unchecked(buffer) }
}

fn encode_into(mut value: u128, chars: &mut [u8]) {
    for char in chars.iter_mut().rev() {
        *char = ALPHABET[(value & 0x1F) as usize];
        value >>= 5;
    }
}

/// Decodes the millisecond timestamp carried by the first 10 characters.
pub fn decode_timestamp(text: &[u8; TEXT_LEN]) -> Result<u64, Error> {
    let mut millis = 0;

    for &char in &text[..TIMESTAMP_LEN] {
        millis = (millis << 5) | u64::from(symbol(char).ok_or(Error::InvalidUlid)?);
    }

    Ok(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_known_timestamp() {
        let mut buffer = [0; TEXT_LEN];
        let s = encode(1_469_918_176_385, 0, &mut buffer);
        // cspell:disable-next-line
        assert_eq!(s, "01ARYZ6S410000000000000000");
    }

    #[test]
    fn encode_pins_final_char() {
        let mut buffer = [0; TEXT_LEN];
        let s = encode(0, (1 << 80) - 1, &mut buffer);
        assert_eq!(s, "0000000000ZZZZZZZZZZZZZZZ0");
    }

    #[test]
    fn decode_timestamp_roundtrip() {
        let mut buffer = [0; TEXT_LEN];
        encode(1_469_918_176_385, 0x1234_5678, &mut buffer);
        assert_eq!(decode_timestamp(&buffer), Ok(1_469_918_176_385));

        encode((1 << 48) - 1, 0, &mut buffer);
        assert_eq!(decode_timestamp(&buffer), Ok((1 << 48) - 1));
    }

    #[test]
    fn symbols_accept_both_cases() {
        // cspell:disable-next-line
        let upper = as_text(b"01BX5ZZKBKACTAV9WEVGEMMVRZ").unwrap();
        // cspell:disable-next-line
        let lower = as_text(b"01bx5zzkbkactav9wevgemmvrz").unwrap();

        assert_eq!(symbols(upper), symbols(lower));
    }

    #[test]
    fn symbols_reject_excluded_letters() {
        for &char in b"IiLlOoUu" {
            let mut text = *b"00000000000000000000000000";
            text[13] = char;
            assert_eq!(symbols(&text), Err(Error::InvalidUlid));
        }
    }

    #[test]
    fn length_is_checked() {
        assert_eq!(as_text(b"").unwrap_err(), Error::InvalidUlid);
        assert_eq!(as_text(b"0123456789012345678901234").unwrap_err(), Error::InvalidUlid);
        assert_eq!(as_text(b"012345678901234567890123456").unwrap_err(), Error::InvalidUlid);
    }
}
