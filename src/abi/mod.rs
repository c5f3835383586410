//! Contract ABI encoding.
//!
//! This module implements the head/tail call-data layout: every value is a
//! sequence of 32-byte big-endian words, and dynamic values are referenced
//! from a fixed-size head region by byte offsets into a trailing tail.
//!
//! # Module Organization
//!
//! - `error`: Error types for parsing and encoding
//! - `types`: Type descriptors and the signature parser
//! - `value`: Runtime argument values
//! - `buffer`: Word padding helpers
//! - `primitive`: Scalar and variable-length primitive encoding
//! - `encode`: Value and argument-list head/tail encoding

mod buffer;
mod encode;
mod error;
mod primitive;
mod types;
mod value;

pub use buffer::{WORD_SIZE, Word};
pub use error::{AbiError, ErrorKind};
pub use primitive::encode_primitive_type;
pub use types::{BaseType, TypeDescriptor};
pub use value::{Decimal, EncodableValue, MAX_DECIMAL_SCALE, ParseDecimalError};

/// Default limit on array dimensions per type.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Contract ABI encoder.
///
/// The encoder holds no state besides its limits, so one value can be shared
/// freely and every call only touches its own inputs.
///
/// # Example
///
/// ```
/// use contract_abi::{AbiEncoder, EncodableValue};
///
/// let encoder = AbiEncoder::default();
/// let bytes = encoder.encode(&["uint256", "string"], &[42u64.into(), "hi".into()])?;
/// assert_eq!(bytes.len(), 128);
/// # Ok::<(), contract_abi::AbiError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbiEncoder {
    max_depth: usize,
}

impl Default for AbiEncoder {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl AbiEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of array dimensions a type may declare.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// Encode an argument list with the default encoder.
pub fn encode<S: AsRef<str>>(types: &[S], args: &[EncodableValue]) -> Result<Vec<u8>, AbiError> {
    AbiEncoder::default().encode(types, args)
}
