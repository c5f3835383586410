//! Convenient re-exports for common usage patterns.
//!
//! # Example
//!
//! ```
//! use contract_abi::prelude::*;
//!
//! let encoder = AbiEncoder::default();
//! let bytes = encoder.encode(&["bool"], &[EncodableValue::Boolean(true)])?;
//! assert_eq!(bytes.len(), WORD_SIZE);
//! # Ok::<(), AbiError>(())
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Encoder types
pub use crate::abi::{
    AbiEncoder, AbiError, BaseType, Decimal, EncodableValue, ErrorKind, TypeDescriptor, WORD_SIZE,
    encode, encode_primitive_type,
};

// Configuration (requires "config" feature)
#[cfg(feature = "config")]
pub use crate::config::{Config, ConfigError, EncoderConfig, OutputFormat};

// JSON arguments (requires "json" feature)
#[cfg(feature = "json")]
pub use crate::json::{args_from_json, value_from_json};

// Dependency re-exports
pub use alloy_primitives::{Address, I256, U256};
