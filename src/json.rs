//! Type-directed conversion of JSON arguments into [`EncodableValue`]s.
//!
//! JSON has no 256-bit integers or byte strings, so the declared type decides
//! how each JSON value is read:
//!
//! - integers: JSON numbers, or strings in decimal or `0x` hex (`"-5"`, `"0xff"`)
//! - fixed-point: numbers or decimal strings (`"1.25"`)
//! - `bool`: `true`/`false`
//! - `string`: strings
//! - `bytes`/`hash`: `0x` hex strings, otherwise the raw text
//! - `address`: hex strings (with or without `0x`) or integers
//! - arrays: JSON arrays, converted element by element

use alloy_primitives::hex;
use alloy_primitives::{I256, U256};
use serde_json::Value;

use crate::abi::{AbiError, BaseType, Decimal, EncodableValue, TypeDescriptor};

/// Convert one JSON value to an [`EncodableValue`] for the declared type.
pub fn value_from_json(ty: &TypeDescriptor, json: &Value) -> Result<EncodableValue, AbiError> {
    if ty.is_array() {
        let items = json
            .as_array()
            .ok_or_else(|| AbiError::shape(ty, "JSON array", json_kind(json)))?;
        let sub = ty.subtype();
        return items
            .iter()
            .map(|item| value_from_json(&sub, item))
            .collect::<Result<Vec<_>, _>>()
            .map(EncodableValue::Sequence);
    }

    match ty.base() {
        BaseType::Uint | BaseType::Int => integer_from_json(ty, json),
        BaseType::Ufixed | BaseType::Fixed => decimal_from_json(ty, json),
        BaseType::Bool => json
            .as_bool()
            .map(EncodableValue::Boolean)
            .ok_or_else(|| AbiError::shape(ty, "JSON boolean", json_kind(json))),
        BaseType::String => json
            .as_str()
            .map(EncodableValue::from)
            .ok_or_else(|| AbiError::shape(ty, "JSON string", json_kind(json))),
        BaseType::Bytes | BaseType::Hash | BaseType::Function => match json {
            Value::String(text) => bytes_from_text(ty, text),
            Value::Number(_) if ty.base() == BaseType::Hash => integer_from_json(ty, json),
            other => Err(AbiError::shape(ty, "hex or text string", json_kind(other))),
        },
        BaseType::Address => match json {
            Value::String(text) => Ok(EncodableValue::from(text.as_str())),
            Value::Number(_) => integer_from_json(ty, json),
            other => Err(AbiError::shape(ty, "hex address string", json_kind(other))),
        },
    }
}

/// Convert a JSON array holding one value per declared type.
pub fn args_from_json(
    types: &[TypeDescriptor],
    json: &Value,
) -> Result<Vec<EncodableValue>, AbiError> {
    let items = json.as_array().ok_or_else(|| AbiError::InvalidArgumentShape {
        ty: "argument list".to_string(),
        expected: "JSON array".to_string(),
        got: json_kind(json).to_string(),
    })?;
    if items.len() != types.len() {
        return Err(AbiError::ArgumentCountMismatch {
            types: types.len(),
            args: items.len(),
        });
    }
    types
        .iter()
        .zip(items)
        .enumerate()
        .map(|(index, (ty, item))| {
            value_from_json(ty, item).map_err(|e| e.at_argument(index, ty.to_string()))
        })
        .collect()
}

fn json_kind(json: &Value) -> &'static str {
    match json {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn integer_value(
    ty: &TypeDescriptor,
    negative: bool,
    magnitude: U256,
) -> Result<EncodableValue, AbiError> {
    if !negative {
        return Ok(EncodableValue::UnsignedInteger(magnitude));
    }
    if magnitude > I256::MIN.unsigned_abs() {
        return Err(AbiError::out_of_bounds(ty, format!("-{} is below -2^255", magnitude)));
    }
    Ok(EncodableValue::SignedInteger(I256::from_raw(magnitude.wrapping_neg())))
}

/// Parse `[-](decimal | 0x hex)` into sign and magnitude.
fn parse_integer_text(ty: &TypeDescriptor, text: &str) -> Result<(bool, U256), AbiError> {
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let (digits, radix) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex_digits) => (hex_digits, 16),
        None => (unsigned, 10),
    };
    let valid = !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix as u32));
    if !valid {
        return Err(AbiError::shape(ty, "decimal or 0x-hex integer", "non-numeric string"));
    }
    let magnitude = U256::from_str_radix(digits, radix)
        .map_err(|_| AbiError::out_of_bounds(ty, format!("{} exceeds 256 bits", text)))?;
    Ok((negative, magnitude))
}

fn integer_from_json(ty: &TypeDescriptor, json: &Value) -> Result<EncodableValue, AbiError> {
    match json {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Ok(EncodableValue::from(v))
            } else if let Some(v) = n.as_i64() {
                Ok(EncodableValue::from(v))
            } else if n.as_f64().is_some_and(|f| f.fract() == 0.0) {
                // Beyond 64 bits JSON numbers lose precision.
                Err(AbiError::shape(
                    ty,
                    "a decimal or 0x string for integers beyond 64 bits",
                    "number too large for a JSON integer",
                ))
            } else {
                Err(AbiError::shape(ty, "integer", "fractional number"))
            }
        }
        Value::String(text) => {
            let (negative, magnitude) = parse_integer_text(ty, text)?;
            integer_value(ty, negative, magnitude)
        }
        other => Err(AbiError::shape(ty, "integer", json_kind(other))),
    }
}

fn decimal_from_json(ty: &TypeDescriptor, json: &Value) -> Result<EncodableValue, AbiError> {
    let text = match json {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => return Err(AbiError::shape(ty, "decimal number", json_kind(other))),
    };
    text.parse::<Decimal>()
        .map(EncodableValue::Decimal)
        .map_err(|e| AbiError::shape(ty, "decimal number", &e.to_string()))
}

fn bytes_from_text(ty: &TypeDescriptor, text: &str) -> Result<EncodableValue, AbiError> {
    match text.strip_prefix("0x") {
        Some(digits) => hex::decode(digits)
            .map(EncodableValue::ByteString)
            .map_err(|e| AbiError::malformed(ty, format!("invalid hex '{}': {}", text, e))),
        None => Ok(EncodableValue::from(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{AbiEncoder, ErrorKind};
    use serde_json::json;

    fn ty(sig: &str) -> TypeDescriptor {
        TypeDescriptor::parse(sig).unwrap()
    }

    #[test]
    fn test_integers() {
        assert_eq!(
            value_from_json(&ty("uint256"), &json!(7)).unwrap(),
            EncodableValue::from(7u64)
        );
        assert_eq!(
            value_from_json(&ty("int8"), &json!(-3)).unwrap(),
            EncodableValue::from(-3i64)
        );
        assert_eq!(
            value_from_json(&ty("uint256"), &json!("0xff")).unwrap(),
            EncodableValue::from(255u64)
        );
        assert_eq!(
            value_from_json(&ty("int256"), &json!("-12")).unwrap(),
            EncodableValue::from(-12i64)
        );
        let max = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        assert_eq!(
            value_from_json(&ty("uint256"), &json!(max)).unwrap(),
            EncodableValue::UnsignedInteger(U256::MAX)
        );
        let err = value_from_json(&ty("uint8"), &json!(1.5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgumentShape);
        let err = value_from_json(&ty("uint8"), &json!("12a")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgumentShape);
    }

    #[test]
    fn test_bytes_and_strings() {
        assert_eq!(
            value_from_json(&ty("bytes"), &json!("0x0102")).unwrap(),
            EncodableValue::ByteString(vec![1, 2])
        );
        assert_eq!(
            value_from_json(&ty("bytes"), &json!("abc")).unwrap(),
            EncodableValue::from("abc")
        );
        assert_eq!(
            value_from_json(&ty("bytes"), &json!("0xzz")).unwrap_err().kind(),
            ErrorKind::MalformedFixedLengthData
        );
        assert_eq!(
            value_from_json(&ty("string"), &json!(1)).unwrap_err().kind(),
            ErrorKind::InvalidArgumentShape
        );
    }

    #[test]
    fn test_nested_arrays() {
        let value = value_from_json(&ty("uint8[][]"), &json!([[1, 2], []])).unwrap();
        assert_eq!(
            value,
            EncodableValue::Sequence(vec![
                EncodableValue::Sequence(vec![1u64.into(), 2u64.into()]),
                EncodableValue::Sequence(vec![]),
            ])
        );
    }

    #[test]
    fn test_decimal() {
        let value = value_from_json(&ty("ufixed8x8"), &json!("1.5")).unwrap();
        assert_eq!(value, EncodableValue::Decimal("1.5".parse().unwrap()));
        let value = value_from_json(&ty("ufixed8x8"), &json!(0.25)).unwrap();
        assert_eq!(value, EncodableValue::Decimal("0.25".parse().unwrap()));
    }

    #[test]
    fn test_exponent_number_as_decimal() {
        let value = value_from_json(&ty("ufixed128x128"), &json!(1e-7)).unwrap();
        assert_eq!(value, EncodableValue::Decimal("0.0000001".parse().unwrap()));
        let value = value_from_json(&ty("fixed"), &json!("-2.5e2")).unwrap();
        assert_eq!(value, EncodableValue::Decimal("-250".parse().unwrap()));
    }

    #[test]
    fn test_large_integer_literal_asks_for_string() {
        let big: Value = serde_json::from_str("100000000000000000000").unwrap();
        let err = value_from_json(&ty("uint256"), &big).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgumentShape);
        assert!(err.to_string().contains("decimal or 0x string"));

        let as_string = value_from_json(&ty("uint256"), &json!("100000000000000000000")).unwrap();
        assert_eq!(
            as_string,
            EncodableValue::UnsignedInteger(U256::from(100_000_000_000_000_000_000u128))
        );
    }

    #[test]
    fn test_args_from_json_encodes() {
        let types = vec![ty("address"), ty("bool"), ty("string")];
        let args = args_from_json(
            &types,
            &json!(["0x1111111111111111111111111111111111111111", true, "hi"]),
        )
        .unwrap();
        let bytes = AbiEncoder::default().encode_descriptors(&types, &args).unwrap();
        assert_eq!(bytes.len(), 5 * 32);

        let err = args_from_json(&types, &json!([true])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentCountMismatch);
        let err = args_from_json(&types, &json!(["0x11", 1, "hi"])).unwrap_err();
        assert_eq!(err.argument_index(), Some(1));
    }
}
