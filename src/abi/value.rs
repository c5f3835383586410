//! Runtime argument values.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Address, I256, U256, U512};
use thiserror::Error;

/// A value to be encoded against a declared [`TypeDescriptor`](super::TypeDescriptor).
///
/// The variant must match what the declared type accepts, otherwise encoding
/// fails with [`AbiError::InvalidArgumentShape`](super::AbiError::InvalidArgumentShape).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodableValue {
    UnsignedInteger(U256),
    SignedInteger(I256),
    Boolean(bool),
    ByteString(Vec<u8>),
    Utf8String(String),
    AddressLike(Address),
    /// Exact base-10 number, used for fixed-point types.
    Decimal(Decimal),
    Sequence(Vec<EncodableValue>),
}

impl EncodableValue {
    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::UnsignedInteger(_) => "unsigned integer",
            Self::SignedInteger(_) => "signed integer",
            Self::Boolean(_) => "boolean",
            Self::ByteString(_) => "byte string",
            Self::Utf8String(_) => "string",
            Self::AddressLike(_) => "address",
            Self::Decimal(_) => "decimal",
            Self::Sequence(_) => "sequence",
        }
    }

    pub fn as_sequence(&self) -> Option<&[EncodableValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Raw bytes of a byte string or the UTF-8 bytes of a text string.
    pub(crate) fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::ByteString(b) => Some(b),
            Self::Utf8String(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Sign and magnitude of an integer value.
    pub(crate) fn as_integer(&self) -> Option<(bool, U256)> {
        match self {
            Self::UnsignedInteger(v) => Some((false, *v)),
            Self::SignedInteger(v) => Some((v.is_negative(), v.unsigned_abs())),
            _ => None,
        }
    }
}

fn signed_from_i128(value: i128) -> I256 {
    let magnitude = U256::from(value.unsigned_abs());
    I256::from_raw(if value < 0 {
        magnitude.wrapping_neg()
    } else {
        magnitude
    })
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for EncodableValue {
            fn from(value: $t) -> Self {
                Self::UnsignedInteger(U256::from(value))
            }
        }
    )*};
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for EncodableValue {
            fn from(value: $t) -> Self {
                Self::SignedInteger(signed_from_i128(value as i128))
            }
        }
    )*};
}

from_unsigned!(u8, u16, u32, u64, u128, usize);
from_signed!(i8, i16, i32, i64, i128, isize);

impl From<U256> for EncodableValue {
    fn from(value: U256) -> Self {
        Self::UnsignedInteger(value)
    }
}

impl From<I256> for EncodableValue {
    fn from(value: I256) -> Self {
        Self::SignedInteger(value)
    }
}

impl From<bool> for EncodableValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for EncodableValue {
    fn from(value: &str) -> Self {
        Self::Utf8String(value.to_string())
    }
}

impl From<String> for EncodableValue {
    fn from(value: String) -> Self {
        Self::Utf8String(value)
    }
}

impl From<Vec<u8>> for EncodableValue {
    fn from(value: Vec<u8>) -> Self {
        Self::ByteString(value)
    }
}

impl From<&[u8]> for EncodableValue {
    fn from(value: &[u8]) -> Self {
        Self::ByteString(value.to_vec())
    }
}

impl From<Address> for EncodableValue {
    fn from(value: Address) -> Self {
        Self::AddressLike(value)
    }
}

impl From<Decimal> for EncodableValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<Vec<EncodableValue>> for EncodableValue {
    fn from(value: Vec<EncodableValue>) -> Self {
        Self::Sequence(value)
    }
}

/// Largest number of fractional digits a [`Decimal`] may carry (10^77 < 2^256).
pub const MAX_DECIMAL_SCALE: u32 = 77;

/// Exact base-10 number: `(-1)^negative * digits / 10^scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
    negative: bool,
    digits: U256,
    scale: u32,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDecimalError {
    #[error("empty decimal")]
    Empty,

    #[error("invalid decimal digit in '{0}'")]
    InvalidDigit(String),

    #[error("decimal '{0}' has too many digits")]
    Overflow(String),

    #[error("decimal has {0} fractional digits, at most 77 are supported")]
    TooManyDecimals(usize),
}

impl Decimal {
    /// Returns `None` when `scale` exceeds [`MAX_DECIMAL_SCALE`].
    pub fn new(negative: bool, digits: U256, scale: u32) -> Option<Self> {
        (scale <= MAX_DECIMAL_SCALE).then_some(Self {
            negative: negative && !digits.is_zero(),
            digits,
            scale,
        })
    }

    pub fn from_integer(negative: bool, magnitude: U256) -> Self {
        Self {
            negative: negative && !magnitude.is_zero(),
            digits: magnitude,
            scale: 0,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn digits(&self) -> U256 {
        self.digits
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// `|self| * 2^shift` truncated toward zero, and whether the division was exact.
    pub(crate) fn abs_shifted(&self, shift: usize) -> (U512, bool) {
        let scaled = U512::from(self.digits) << shift;
        let divisor = U512::from(10u64).pow(U512::from(self.scale));
        let (quotient, remainder) = scaled.div_rem(divisor);
        (quotient, remainder.is_zero())
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        // Scientific notation: `1.5e-7`, `2E3`.
        let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
            Some((mantissa, exponent)) => {
                let exponent = exponent
                    .parse::<i64>()
                    .map_err(|_| ParseDecimalError::InvalidDigit(s.to_string()))?;
                (mantissa, exponent)
            }
            None => (unsigned, 0),
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(ParseDecimalError::Empty);
        }
        let all_digits = int_part
            .bytes()
            .chain(frac_part.bytes())
            .all(|b| b.is_ascii_digit());
        if !all_digits {
            return Err(ParseDecimalError::InvalidDigit(s.to_string()));
        }

        let mut combined = format!("{}{}", int_part, frac_part);
        let is_zero = combined.bytes().all(|b| b == b'0');
        let frac_len = i64::try_from(frac_part.len()).unwrap_or(i64::MAX);
        let shift = if is_zero { 0 } else { frac_len.saturating_sub(exponent) };
        let scale = if shift < 0 {
            // 10^78 > 2^256, so more zeros can only overflow.
            let zeros = usize::try_from(shift.unsigned_abs())
                .ok()
                .filter(|zeros| *zeros <= 78)
                .ok_or_else(|| ParseDecimalError::Overflow(s.to_string()))?;
            combined.push_str(&"0".repeat(zeros));
            0
        } else {
            u32::try_from(shift)
                .ok()
                .filter(|scale| *scale <= MAX_DECIMAL_SCALE)
                .ok_or(ParseDecimalError::TooManyDecimals(
                    usize::try_from(shift).unwrap_or(usize::MAX),
                ))?
        };

        let digits = U256::from_str_radix(&combined, 10)
            .map_err(|_| ParseDecimalError::Overflow(s.to_string()))?;
        Ok(Self {
            negative: negative && !digits.is_zero(),
            digits,
            scale,
        })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.digits.to_string();
        let scale = self.scale as usize;
        let sign = if self.negative { "-" } else { "" };
        if scale == 0 {
            return write!(f, "{}{}", sign, digits);
        }
        let padded = format!("{:0>width$}", digits, width = scale + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{}{}.{}", sign, int_part, frac_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_conversion_sign_extends() {
        assert_eq!(EncodableValue::from(-1i8), EncodableValue::SignedInteger(I256::MINUS_ONE));
        let EncodableValue::SignedInteger(v) = EncodableValue::from(-128i64) else {
            panic!("expected signed integer");
        };
        assert!(v.is_negative());
        assert_eq!(v.unsigned_abs(), U256::from(128u64));
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(
            EncodableValue::from(-5i32).as_integer(),
            Some((true, U256::from(5u64)))
        );
        assert_eq!(EncodableValue::from(true).as_integer(), None);
    }

    #[test]
    fn test_parse_decimal() {
        let d: Decimal = "-12.375".parse().unwrap();
        assert!(d.is_negative());
        assert_eq!(d.digits(), U256::from(12375u64));
        assert_eq!(d.scale(), 3);
        assert_eq!(d.to_string(), "-12.375");

        let d: Decimal = ".5".parse().unwrap();
        assert_eq!(d.to_string(), "0.5");

        let d: Decimal = "-0.0".parse().unwrap();
        assert!(!d.is_negative());

        assert_eq!("".parse::<Decimal>(), Err(ParseDecimalError::Empty));
        assert!(matches!("1.2.3".parse::<Decimal>(), Err(ParseDecimalError::InvalidDigit(_))));
        assert!(matches!("1e".parse::<Decimal>(), Err(ParseDecimalError::InvalidDigit(_))));
        assert!(matches!("1x5".parse::<Decimal>(), Err(ParseDecimalError::InvalidDigit(_))));
    }

    #[test]
    fn test_parse_decimal_exponent() {
        let d: Decimal = "1e-7".parse().unwrap();
        assert_eq!(d.digits(), U256::from(1u64));
        assert_eq!(d.scale(), 7);
        assert_eq!(d.to_string(), "0.0000001");

        let d: Decimal = "-2.5E3".parse().unwrap();
        assert!(d.is_negative());
        assert_eq!(d.to_string(), "-2500");

        let d: Decimal = "1.25e+1".parse().unwrap();
        assert_eq!(d.to_string(), "12.5");

        assert_eq!("0e400".parse::<Decimal>().unwrap().to_string(), "0");
        assert!(matches!("1e90".parse::<Decimal>(), Err(ParseDecimalError::Overflow(_))));
        assert!(matches!(
            "1e-90".parse::<Decimal>(),
            Err(ParseDecimalError::TooManyDecimals(90))
        ));
    }

    #[test]
    fn test_abs_shifted_truncates() {
        let d: Decimal = "1.5".parse().unwrap();
        assert_eq!(d.abs_shifted(1), (U512::from(3u64), true));
        let d: Decimal = "0.3".parse().unwrap();
        // 0.3 * 4 = 1.2
        assert_eq!(d.abs_shifted(2), (U512::from(1u64), false));
    }
}
