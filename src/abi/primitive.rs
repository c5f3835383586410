//! Encoding rules for scalar and variable-length primitive types.

use alloy_primitives::{I256, Sign, U256, U512};

use super::buffer::{
    PadError, WORD_SIZE, Word, ceil32, encode_length, left_word, rpad, zpad_hex, zpad_int,
    zpad_signed,
};
use super::{AbiError, BaseType, Decimal, EncodableValue, TypeDescriptor};

/// Largest address value as an integer: 160 bits.
const ADDRESS_BITS: usize = 160;
const ADDRESS_BYTES: usize = 20;

/// Encode one primitive value.
///
/// Fixed-size types produce exactly one word. Variable-length `bytes` and
/// `string` produce a length word followed by the content right-padded to a
/// multiple of the word size.
pub fn encode_primitive_type(
    ty: &TypeDescriptor,
    arg: &EncodableValue,
) -> Result<Vec<u8>, AbiError> {
    if ty.is_array() {
        return Err(AbiError::UnhandledType { ty: ty.to_string() });
    }
    let word = match ty.base() {
        BaseType::Uint => encode_uint(ty, arg)?,
        BaseType::Int => encode_int(ty, arg)?,
        BaseType::Bool => match arg {
            EncodableValue::Boolean(b) => zpad_int(U256::from(u8::from(*b))),
            other => return Err(AbiError::shape(ty, "boolean", other.kind_name())),
        },
        BaseType::Ufixed => encode_ufixed(ty, arg)?,
        BaseType::Fixed => encode_fixed(ty, arg)?,
        BaseType::String => {
            let text = match arg {
                EncodableValue::Utf8String(s) => s.as_str(),
                EncodableValue::ByteString(b) => std::str::from_utf8(b)
                    .map_err(|_| AbiError::shape(ty, "UTF-8 text", "invalid UTF-8 byte string"))?,
                other => return Err(AbiError::shape(ty, "UTF-8 text", other.kind_name())),
            };
            return encode_content(ty, text.as_bytes());
        }
        BaseType::Bytes => {
            let data = arg
                .as_bytes()
                .ok_or_else(|| AbiError::shape(ty, "byte sequence", arg.kind_name()))?;
            return encode_content(ty, data);
        }
        BaseType::Hash => encode_hash(ty, arg)?,
        BaseType::Address => encode_address(ty, arg)?,
        BaseType::Function => return Err(AbiError::UnhandledType { ty: ty.to_string() }),
    };
    Ok(word.to_vec())
}

fn format_int(negative: bool, magnitude: U256) -> String {
    if negative {
        format!("-{}", magnitude)
    } else {
        magnitude.to_string()
    }
}

fn integer_bits(ty: &TypeDescriptor) -> Result<usize, AbiError> {
    ty.sub_number()
        .filter(|bits| (8..=256).contains(bits) && bits % 8 == 0)
        .ok_or_else(|| AbiError::InvalidTypeSignature {
            signature: ty.to_string(),
            reason: "invalid integer size".to_string(),
        })
}

fn integer_arg(ty: &TypeDescriptor, arg: &EncodableValue) -> Result<(bool, U256), AbiError> {
    arg.as_integer()
        .ok_or_else(|| AbiError::shape(ty, "integer", arg.kind_name()))
}

fn encode_uint(ty: &TypeDescriptor, arg: &EncodableValue) -> Result<Word, AbiError> {
    let bits = integer_bits(ty)?;
    let (negative, magnitude) = integer_arg(ty, arg)?;
    if negative || magnitude.bit_len() > bits {
        return Err(AbiError::out_of_bounds(
            ty,
            format!("{} is outside [0, 2^{})", format_int(negative, magnitude), bits),
        ));
    }
    Ok(zpad_int(magnitude))
}

fn encode_int(ty: &TypeDescriptor, arg: &EncodableValue) -> Result<Word, AbiError> {
    let bits = integer_bits(ty)?;
    let (negative, magnitude) = integer_arg(ty, arg)?;
    let limit = U256::from(1u8) << (bits - 1);
    let in_range = if negative {
        magnitude <= limit
    } else {
        magnitude < limit
    };
    if !in_range {
        return Err(AbiError::out_of_bounds(
            ty,
            format!(
                "{} is outside [-2^{}, 2^{})",
                format_int(negative, magnitude),
                bits - 1,
                bits - 1
            ),
        ));
    }
    // Two's complement over the full word, sign-extended past the declared width.
    let sign = if negative { Sign::Negative } else { Sign::Positive };
    I256::checked_from_sign_and_abs(sign, magnitude)
        .map(zpad_signed)
        .ok_or_else(|| AbiError::out_of_bounds(ty, "value exceeds 256 bits"))
}

fn fixed_arg(ty: &TypeDescriptor, arg: &EncodableValue) -> Result<Decimal, AbiError> {
    match arg {
        EncodableValue::Decimal(d) => Ok(*d),
        other => other
            .as_integer()
            .map(|(negative, magnitude)| Decimal::from_integer(negative, magnitude))
            .ok_or_else(|| AbiError::shape(ty, "number", other.kind_name())),
    }
}

fn fixed_bits(ty: &TypeDescriptor) -> Result<(usize, usize), AbiError> {
    ty.fixed_parts()
        .filter(|(high, low)| *high >= 8 && high + low <= 256)
        .ok_or_else(|| AbiError::InvalidTypeSignature {
            signature: ty.to_string(),
            reason: "invalid fixed-point size".to_string(),
        })
}

fn narrow(ty: &TypeDescriptor, value: U512) -> Result<U256, AbiError> {
    U256::try_from_be_slice(&value.to_be_bytes::<64>())
        .ok_or_else(|| AbiError::out_of_bounds(ty, "scaled value exceeds 256 bits"))
}

fn encode_ufixed(ty: &TypeDescriptor, arg: &EncodableValue) -> Result<Word, AbiError> {
    let (high, low) = fixed_bits(ty)?;
    let value = fixed_arg(ty, arg)?;
    let (scaled, _) = value.abs_shifted(low);
    // value < 2^high  <=>  floor(value * 2^low) < 2^(high + low)
    if value.is_negative() || scaled >= U512::from(1u8) << (high + low) {
        return Err(AbiError::out_of_bounds(
            ty,
            format!("{} is outside [0, 2^{})", value, high),
        ));
    }
    Ok(zpad_int(narrow(ty, scaled)?))
}

fn encode_fixed(ty: &TypeDescriptor, arg: &EncodableValue) -> Result<Word, AbiError> {
    let (high, low) = fixed_bits(ty)?;
    let total = high + low;
    let value = fixed_arg(ty, arg)?;
    let (scaled, exact) = value.abs_shifted(low);
    let limit = U512::from(1u8) << (total - 1);
    let in_range = if value.is_negative() {
        scaled < limit || (scaled == limit && exact)
    } else {
        scaled < limit
    };
    if !in_range {
        return Err(AbiError::out_of_bounds(
            ty,
            format!("{} is outside [-2^{}, 2^{})", value, high - 1, high - 1),
        ));
    }
    // (value * 2^low) mod 2^(high + low), truncated toward zero.
    let modulus = U512::from(1u8) << total;
    let reduced = if value.is_negative() {
        (modulus - scaled) % modulus
    } else {
        scaled
    };
    Ok(zpad_int(narrow(ty, reduced)?))
}

fn pad_error(ty: &TypeDescriptor, err: PadError) -> AbiError {
    match err {
        PadError::TooLong { .. } => AbiError::out_of_bounds(ty, err.to_string()),
        PadError::InvalidHex(_) => AbiError::malformed(ty, err.to_string()),
    }
}

fn encode_content(ty: &TypeDescriptor, data: &[u8]) -> Result<Vec<u8>, AbiError> {
    if ty.sub().is_empty() {
        let mut out = encode_length(data.len()).to_vec();
        out.extend(rpad(data, 0, ceil32(data.len())).map_err(|e| pad_error(ty, e))?);
        return Ok(out);
    }

    let size = ty
        .sub_number()
        .ok_or_else(|| AbiError::out_of_bounds(ty, format!("invalid length '{}'", ty.sub())))?;
    if data.len() > size {
        return Err(AbiError::out_of_bounds(
            ty,
            format!("{} bytes exceed declared length {}", data.len(), size),
        ));
    }
    if size > WORD_SIZE {
        return Err(AbiError::out_of_bounds(
            ty,
            format!("invalid length {}", size),
        ));
    }
    rpad(data, 0, WORD_SIZE).map_err(|e| pad_error(ty, e))
}

/// Hex-decode `data` (ASCII hex text) into a left-padded word.
fn hex_word(ty: &TypeDescriptor, data: &[u8]) -> Result<Word, AbiError> {
    let text = std::str::from_utf8(data)
        .map_err(|_| AbiError::malformed(ty, "hex text is not valid UTF-8"))?;
    zpad_hex(text).map_err(|e| pad_error(ty, e))
}

fn encode_hash(ty: &TypeDescriptor, arg: &EncodableValue) -> Result<Word, AbiError> {
    let size = ty
        .sub_number()
        .filter(|size| (1..=WORD_SIZE).contains(size))
        .ok_or_else(|| {
            AbiError::out_of_bounds(ty, format!("hash length '{}' is not in 1..=32", ty.sub()))
        })?;

    if let Some((negative, magnitude)) = arg.as_integer() {
        if negative || magnitude.bit_len() > size * 8 {
            return Err(AbiError::out_of_bounds(
                ty,
                format!("{} does not fit in {} bytes", format_int(negative, magnitude), size),
            ));
        }
        return Ok(zpad_int(magnitude));
    }

    let data = arg
        .as_bytes()
        .ok_or_else(|| AbiError::shape(ty, "integer, raw bytes or hex text", arg.kind_name()))?;
    if data.len() == size {
        left_word(data).map_err(|e| pad_error(ty, e))
    } else if data.len() == size * 2 {
        hex_word(ty, data)
    } else {
        Err(AbiError::malformed(
            ty,
            format!(
                "expected {} raw bytes or {} hex characters, got {}",
                size,
                size * 2,
                data.len()
            ),
        ))
    }
}

fn encode_address(ty: &TypeDescriptor, arg: &EncodableValue) -> Result<Word, AbiError> {
    if let EncodableValue::AddressLike(address) = arg {
        return left_word(address.as_slice()).map_err(|e| pad_error(ty, e));
    }

    if let Some((negative, magnitude)) = arg.as_integer() {
        if negative || magnitude.bit_len() > ADDRESS_BITS {
            return Err(AbiError::out_of_bounds(
                ty,
                format!("{} does not fit in 20 bytes", format_int(negative, magnitude)),
            ));
        }
        return Ok(zpad_int(magnitude));
    }

    let data = arg
        .as_bytes()
        .ok_or_else(|| {
            AbiError::shape(ty, "address, integer, raw bytes or hex text", arg.kind_name())
        })?;
    match data.len() {
        ADDRESS_BYTES => left_word(data).map_err(|e| pad_error(ty, e)),
        40 => hex_word(ty, data),
        42 => match data.strip_prefix(b"0x") {
            Some(hex) => hex_word(ty, hex),
            None => Err(AbiError::malformed(ty, "42-character address must start with 0x")),
        },
        len => Err(AbiError::malformed(
            ty,
            format!(
                "expected 20 raw bytes, 40 hex characters or 0x-prefixed hex, got {} bytes",
                len
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::ErrorKind;
    use alloy_primitives::{Address, I256};

    fn ty(sig: &str) -> TypeDescriptor {
        TypeDescriptor::parse(sig).unwrap()
    }

    fn word_of(value: u64) -> Vec<u8> {
        zpad_int(U256::from(value)).to_vec()
    }

    fn kind(sig: &str, arg: impl Into<EncodableValue>) -> ErrorKind {
        encode_primitive_type(&ty(sig), &arg.into()).unwrap_err().kind()
    }

    #[test]
    fn test_uint_bounds() {
        assert_eq!(encode_primitive_type(&ty("uint8"), &0u8.into()).unwrap(), word_of(0));
        assert_eq!(encode_primitive_type(&ty("uint8"), &255u64.into()).unwrap(), word_of(255));
        assert_eq!(kind("uint8", 256u64), ErrorKind::ValueOutOfBounds);
        assert_eq!(kind("uint8", -1i64), ErrorKind::ValueOutOfBounds);
        assert!(encode_primitive_type(&ty("uint256"), &U256::MAX.into()).is_ok());
        assert_eq!(kind("uint256", true), ErrorKind::InvalidArgumentShape);
    }

    #[test]
    fn test_int_bounds_and_sign_extension() {
        let min = encode_primitive_type(&ty("int8"), &(-128i64).into()).unwrap();
        let mut expected = vec![0xff; 31];
        expected.push(0x80);
        assert_eq!(min, expected);
        assert_eq!(encode_primitive_type(&ty("int8"), &127i64.into()).unwrap(), word_of(127));
        assert_eq!(kind("int8", 128i64), ErrorKind::ValueOutOfBounds);
        assert_eq!(kind("int8", -129i64), ErrorKind::ValueOutOfBounds);
        assert_eq!(
            encode_primitive_type(&ty("int256"), &I256::MIN.into()).unwrap(),
            I256::MIN.into_raw().to_be_bytes::<32>().to_vec()
        );
    }

    #[test]
    fn test_bool() {
        assert_eq!(encode_primitive_type(&ty("bool"), &true.into()).unwrap(), word_of(1));
        assert_eq!(encode_primitive_type(&ty("bool"), &false.into()).unwrap(), word_of(0));
        assert_eq!(kind("bool", 1u8), ErrorKind::InvalidArgumentShape);
    }

    #[test]
    fn test_ufixed() {
        let half: Decimal = "1.5".parse().unwrap();
        // 1.5 * 2^8 = 384
        assert_eq!(encode_primitive_type(&ty("ufixed8x8"), &half.into()).unwrap(), word_of(384));
        assert_eq!(encode_primitive_type(&ty("ufixed8x8"), &2u8.into()).unwrap(), word_of(512));
        assert_eq!(kind("ufixed8x8", 256u64), ErrorKind::ValueOutOfBounds);
        assert_eq!(kind("ufixed8x8", -1i64), ErrorKind::ValueOutOfBounds);
        assert_eq!(kind("ufixed8x8", "1.5"), ErrorKind::InvalidArgumentShape);
    }

    #[test]
    fn test_fixed_wraps_modulo_total_bits() {
        let neg: Decimal = "-1.5".parse().unwrap();
        // -384 mod 2^16 = 65152
        assert_eq!(encode_primitive_type(&ty("fixed8x8"), &neg.into()).unwrap(), word_of(65152));
        assert!(encode_primitive_type(&ty("fixed8x8"), &(-128i64).into()).is_ok());
        assert_eq!(kind("fixed8x8", 128i64), ErrorKind::ValueOutOfBounds);
        let below: Decimal = "-128.001".parse().unwrap();
        assert_eq!(kind("fixed8x8", below), ErrorKind::ValueOutOfBounds);
    }

    #[test]
    fn test_variable_bytes_and_string() {
        let out = encode_primitive_type(&ty("bytes"), &b"abc".as_slice().into()).unwrap();
        assert_eq!(out.len(), 64);
        assert_eq!(&out[..32], word_of(3).as_slice());
        assert_eq!(&out[32..35], b"abc");
        assert!(out[35..].iter().all(|b| *b == 0));

        let empty = encode_primitive_type(&ty("string"), &"".into()).unwrap();
        assert_eq!(empty, word_of(0));

        let invalid = EncodableValue::ByteString(vec![0xff, 0xfe]);
        assert_eq!(
            encode_primitive_type(&ty("string"), &invalid).unwrap_err().kind(),
            ErrorKind::InvalidArgumentShape
        );
    }

    #[test]
    fn test_fixed_length_bytes() {
        let out = encode_primitive_type(&ty("bytes4"), &vec![1u8, 2, 3].into()).unwrap();
        assert_eq!(&out[..3], &[1, 2, 3]);
        assert!(out[3..].iter().all(|b| *b == 0));
        assert_eq!(kind("bytes2", vec![1u8, 2, 3]), ErrorKind::ValueOutOfBounds);
        assert_eq!(kind("bytes33", vec![1u8]), ErrorKind::ValueOutOfBounds);
        assert_eq!(kind("string2", "abc"), ErrorKind::ValueOutOfBounds);
    }

    #[test]
    fn test_hash_forms() {
        let raw = vec![0xabu8; 4];
        let from_raw = encode_primitive_type(&ty("hash4"), &raw.clone().into()).unwrap();
        let from_hex = encode_primitive_type(&ty("hash4"), &"abababab".into()).unwrap();
        let from_int = encode_primitive_type(&ty("hash4"), &0xababababu64.into()).unwrap();
        assert_eq!(from_raw, from_hex);
        assert_eq!(from_raw, from_int);
        assert_eq!(&from_raw[28..], raw.as_slice());

        assert_eq!(kind("hash4", "abc"), ErrorKind::MalformedFixedLengthData);
        assert_eq!(kind("hash4", "zzzzzzzz"), ErrorKind::MalformedFixedLengthData);
        assert_eq!(kind("hash33", vec![0u8; 33]), ErrorKind::ValueOutOfBounds);
        assert_eq!(kind("hash0", vec![0u8]), ErrorKind::ValueOutOfBounds);
        assert_eq!(kind("hash1", 256u64), ErrorKind::ValueOutOfBounds);
    }

    #[test]
    fn test_address_forms() {
        let address = Address::repeat_byte(0x11);
        let expected = encode_primitive_type(&ty("address"), &address.into()).unwrap();
        assert_eq!(&expected[..12], &[0u8; 12]);
        assert_eq!(&expected[12..], address.as_slice());

        let hex40 = "11".repeat(20);
        let hex42 = format!("0x{}", hex40);
        for arg in [
            EncodableValue::from(address.as_slice()),
            EncodableValue::from(hex40.as_str()),
            EncodableValue::from(hex42.as_str()),
            EncodableValue::from(U256::from_be_slice(address.as_slice())),
        ] {
            assert_eq!(encode_primitive_type(&ty("address"), &arg).unwrap(), expected);
        }

        assert_eq!(kind("address", "0x1234"), ErrorKind::MalformedFixedLengthData);
        assert_eq!(kind("address", format!("1x{}", hex40)), ErrorKind::MalformedFixedLengthData);
        assert_eq!(kind("address", U256::MAX), ErrorKind::ValueOutOfBounds);
        assert_eq!(kind("address", true), ErrorKind::InvalidArgumentShape);
    }

    #[test]
    fn test_size_type_matches_length_words() {
        let size_type = TypeDescriptor::size_type();
        assert_eq!(size_type.to_string(), "uint256");
        let word = encode_primitive_type(&size_type, &EncodableValue::from(96usize)).unwrap();
        assert_eq!(word, encode_length(96).to_vec());
    }

    #[test]
    fn test_function_is_unhandled() {
        assert_eq!(kind("function", vec![0u8; 24]), ErrorKind::UnhandledType);
    }
}
