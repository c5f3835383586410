//! Contract ABI call-data encoding.
//!
//! This library encodes a typed, ordered argument list into the head/tail
//! call-data layout used by contract virtual machines: 32-byte big-endian
//! words, with dynamic values referenced from the head by byte offsets into
//! a trailing tail region.
//!
//! # Quick Start
//!
//! ```
//! use contract_abi::{EncodableValue, encode};
//!
//! let data = encode(
//!     &["uint256[]", "bool"],
//!     &[
//!         EncodableValue::Sequence(vec![1u64.into(), 2u64.into()]),
//!         true.into(),
//!     ],
//! )?;
//! // offset, flag, count, 1, 2
//! assert_eq!(data.len(), 5 * 32);
//! # Ok::<(), contract_abi::AbiError>(())
//! ```
//!
//! # Modules
//!
//! - [`abi`] - Type parsing and head/tail encoding (always available)
//! - [`config`] - TOML configuration (requires `config` feature)
//! - [`json`] - Type-directed JSON argument conversion (requires `json` feature)
//!
//! # Feature Flags
//!
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `config` - Enable TOML configuration loading
//! - `json` - Enable JSON argument conversion
//! - `cli` - Enable the command-line encoder binary
//! - `full` - Enable all features

pub mod abi;
#[cfg(feature = "config")]
pub mod config;
#[cfg(feature = "json")]
pub mod json;
mod logging;
pub mod prelude;

mod error;

// Re-export the unified error type
pub use error::{Error, Result};

// Re-export encoder types at crate root for convenience
pub use abi::{
    AbiEncoder, AbiError, BaseType, Decimal, EncodableValue, ErrorKind, TypeDescriptor, WORD_SIZE,
    Word, encode, encode_primitive_type,
};

#[cfg(feature = "config")]
pub use config::{Config, ConfigError};

// Re-export commonly used types from dependencies for convenience
pub use alloy_primitives::{Address, I256, U256};
