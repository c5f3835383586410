//! Head/tail encoding of values and argument lists.

use super::buffer::{WORD_SIZE, encode_length};
use super::{AbiEncoder, AbiError, EncodableValue, TypeDescriptor, encode_primitive_type};
use crate::logging::{debug, trace};

impl AbiEncoder {
    /// Encode an ordered argument list from type signatures.
    ///
    /// Each signature is parsed first; the first parse failure aborts with
    /// [`AbiError::InvalidTypeSignature`] tagged with the argument index.
    pub fn encode<S: AsRef<str>>(
        &self,
        types: &[S],
        args: &[EncodableValue],
    ) -> Result<Vec<u8>, AbiError> {
        let parsed = types
            .iter()
            .enumerate()
            .map(|(index, sig)| {
                TypeDescriptor::parse(sig.as_ref()).map_err(|e| e.at_argument(index, sig.as_ref()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.encode_descriptors(&parsed, args)
    }

    /// Encode an ordered argument list using the head/tail layout.
    ///
    /// Static arguments are placed inline in the head. Each dynamic argument
    /// contributes one offset word to the head, pointing at its encoding in
    /// the tail; offsets are measured from the start of the returned buffer.
    pub fn encode_descriptors(
        &self,
        types: &[TypeDescriptor],
        args: &[EncodableValue],
    ) -> Result<Vec<u8>, AbiError> {
        if types.len() != args.len() {
            return Err(AbiError::ArgumentCountMismatch {
                types: types.len(),
                args: args.len(),
            });
        }
        for (index, ty) in types.iter().enumerate() {
            self.check_depth(ty)
                .map_err(|e| e.at_argument(index, ty.to_string()))?;
        }

        let head_size = types
            .iter()
            .try_fold(0usize, |acc, ty| acc.checked_add(ty.head_size()))
            .ok_or_else(|| AbiError::out_of_bounds("argument list", "head size overflows"))?;
        debug!(arguments = types.len(), head_size, "encoding argument list");

        // Sized by the values only; a declared static size may exceed memory.
        let mut head = Vec::new();
        let mut tail = Vec::new();
        for (index, (ty, arg)) in types.iter().zip(args).enumerate() {
            let encoded = encode_value(ty, arg).map_err(|e| e.at_argument(index, ty.to_string()))?;
            if ty.is_dynamic() {
                let offset = head_size.checked_add(tail.len()).ok_or_else(|| {
                    AbiError::out_of_bounds(ty, "tail offset overflows")
                        .at_argument(index, ty.to_string())
                })?;
                trace!(index, ty = %ty, offset, "dynamic argument");
                head.extend_from_slice(&encode_length(offset));
                tail.extend(encoded);
            } else {
                trace!(index, ty = %ty, "static argument");
                head.extend(encoded);
            }
        }

        head.extend(tail);
        debug!(bytes = head.len(), "encoded argument list");
        Ok(head)
    }

    /// Encode a single value of the given type.
    ///
    /// Dynamic arrays carry their own local head/tail: element offsets are
    /// relative to the first element slot, after the count word if present.
    pub fn encode_type(
        &self,
        ty: &TypeDescriptor,
        arg: &EncodableValue,
    ) -> Result<Vec<u8>, AbiError> {
        self.check_depth(ty)?;
        encode_value(ty, arg)
    }

    fn check_depth(&self, ty: &TypeDescriptor) -> Result<(), AbiError> {
        let depth = ty.dims().len();
        if depth > self.max_depth {
            return Err(AbiError::NestingTooDeep {
                ty: ty.to_string(),
                depth,
                limit: self.max_depth,
            });
        }
        Ok(())
    }
}

fn encode_value(ty: &TypeDescriptor, arg: &EncodableValue) -> Result<Vec<u8>, AbiError> {
    if ty.is_variable_primitive() {
        encode_primitive_type(ty, arg)
    } else if ty.is_dynamic() {
        encode_dynamic_array(ty, arg)
    } else if !ty.is_array() {
        encode_primitive_type(ty, arg)
    } else {
        encode_static_array(ty, arg)
    }
}

fn sequence<'a>(
    ty: &TypeDescriptor,
    arg: &'a EncodableValue,
) -> Result<&'a [EncodableValue], AbiError> {
    arg.as_sequence()
        .ok_or_else(|| AbiError::shape(ty, "sequence", arg.kind_name()))
}

fn check_len(ty: &TypeDescriptor, expected: usize, found: usize) -> Result<(), AbiError> {
    if expected != found {
        return Err(AbiError::ArraySizeMismatch {
            ty: ty.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

fn encode_dynamic_array(ty: &TypeDescriptor, arg: &EncodableValue) -> Result<Vec<u8>, AbiError> {
    let items = sequence(ty, arg)?;
    let mut head = Vec::new();
    match ty.outer_dim() {
        Some(0) | None => head.extend_from_slice(&encode_length(items.len())),
        // Fixed outer dimension over dynamic elements: no count word.
        Some(expected) => check_len(ty, expected, items.len())?,
    }

    let sub = ty.subtype();
    if sub.is_dynamic() {
        let slots = items.len() * WORD_SIZE;
        let mut tail = Vec::new();
        for item in items {
            head.extend_from_slice(&encode_length(slots + tail.len()));
            tail.extend(encode_value(&sub, item)?);
        }
        head.extend(tail);
    } else {
        for item in items {
            head.extend(encode_value(&sub, item)?);
        }
    }
    Ok(head)
}

fn encode_static_array(ty: &TypeDescriptor, arg: &EncodableValue) -> Result<Vec<u8>, AbiError> {
    let items = sequence(ty, arg)?;
    check_len(ty, ty.outer_dim().unwrap_or_default(), items.len())?;

    let sub = ty.subtype();
    let mut out = Vec::new();
    for item in items {
        out.extend(encode_value(&sub, item)?);
    }
    Ok(out)
}
