//! Word padding helpers for contract ABI encoding.
//!
//! Every encoded value is a sequence of 32-byte big-endian words. Numeric and
//! hash-like data is padded on the left, byte/text content on the right.

use alloy_primitives::hex::{self, FromHexError};
use alloy_primitives::{I256, U256};
use thiserror::Error;

/// Size in bytes of one ABI word.
pub const WORD_SIZE: usize = 32;

/// One 32-byte ABI word.
pub type Word = [u8; WORD_SIZE];

/// Errors from the padding helpers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PadError {
    #[error("{len} bytes do not fit in {target}")]
    TooLong { len: usize, target: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] FromHexError),
}

/// Round a length up to the next multiple of the word size.
#[inline]
pub fn ceil32(len: usize) -> usize {
    len.div_ceil(WORD_SIZE) * WORD_SIZE
}

/// Encode an unsigned integer as a big-endian word.
#[inline]
pub fn zpad_int(value: U256) -> Word {
    value.to_be_bytes::<WORD_SIZE>()
}

/// Encode a signed integer as its 256-bit two's-complement word.
#[inline]
pub fn zpad_signed(value: I256) -> Word {
    value.into_raw().to_be_bytes::<WORD_SIZE>()
}

/// Encode a length, count or offset as a word.
#[inline]
pub fn encode_length(len: usize) -> Word {
    zpad_int(U256::from(len))
}

/// Left-pad `data` with zero bytes to exactly `len` bytes.
pub fn zpad(data: &[u8], len: usize) -> Result<Vec<u8>, PadError> {
    let pad = len.checked_sub(data.len()).ok_or(PadError::TooLong {
        len: data.len(),
        target: len,
    })?;
    let mut out = vec![0u8; pad];
    out.extend_from_slice(data);
    Ok(out)
}

/// Right-pad `data` with `fill` to exactly `len` bytes.
pub fn rpad(data: &[u8], fill: u8, len: usize) -> Result<Vec<u8>, PadError> {
    if data.len() > len {
        return Err(PadError::TooLong {
            len: data.len(),
            target: len,
        });
    }
    let mut out = Vec::with_capacity(len);
    out.extend_from_slice(data);
    out.resize(len, fill);
    Ok(out)
}

/// Left-pad `data` into a single word.
pub fn left_word(data: &[u8]) -> Result<Word, PadError> {
    let padded = zpad(data, WORD_SIZE)?;
    Word::try_from(padded.as_slice()).map_err(|_| PadError::TooLong {
        len: data.len(),
        target: WORD_SIZE,
    })
}

/// Decode unprefixed hex text and left-pad the bytes into a word.
pub fn zpad_hex(text: &str) -> Result<Word, PadError> {
    if text.starts_with("0x") || text.starts_with("0X") {
        return Err(PadError::InvalidHex(FromHexError::InvalidHexCharacter {
            c: 'x',
            index: 1,
        }));
    }
    let bytes = hex::decode(text)?;
    left_word(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil32() {
        assert_eq!(ceil32(0), 0);
        assert_eq!(ceil32(1), 32);
        assert_eq!(ceil32(32), 32);
        assert_eq!(ceil32(33), 64);
    }

    #[test]
    fn test_zpad_int_is_big_endian() {
        let word = zpad_int(U256::from(0x0102u64));
        assert_eq!(&word[..30], &[0u8; 30]);
        assert_eq!(&word[30..], &[0x01, 0x02]);
    }

    #[test]
    fn test_zpad_signed_minus_one() {
        assert_eq!(zpad_signed(I256::MINUS_ONE), [0xff; 32]);
    }

    #[test]
    fn test_rpad_and_zpad() {
        assert_eq!(rpad(b"ab", 0, 4).unwrap(), b"ab\0\0".to_vec());
        assert_eq!(zpad(b"ab", 4).unwrap(), b"\0\0ab".to_vec());
        assert_eq!(
            rpad(b"abcde", 0, 4),
            Err(PadError::TooLong { len: 5, target: 4 })
        );
    }

    #[test]
    fn test_zpad_hex() {
        let word = zpad_hex("ff01").unwrap();
        assert_eq!(&word[30..], &[0xff, 0x01]);
        assert!(zpad_hex("0xff").is_err());
        assert!(zpad_hex("zz").is_err());
        assert!(matches!(
            zpad_hex(&"00".repeat(33)),
            Err(PadError::TooLong { len: 33, .. })
        ));
    }
}
