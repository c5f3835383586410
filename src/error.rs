//! Unified error type for the contract-abi library.
//!
//! This module provides a single [`Error`] type that encompasses all errors
//! that can occur in the library, making it easier to handle errors in
//! application code.

use thiserror::Error;

use crate::abi::AbiError;
#[cfg(feature = "config")]
use crate::config::ConfigError;

/// Unified error type for all contract-abi operations.
///
/// # Example
///
/// ```
/// use contract_abi::{Result, encode};
///
/// fn transfer_call_data() -> Result<Vec<u8>> {
///     let to = "0x1111111111111111111111111111111111111111";
///     Ok(encode(&["address", "uint256"], &[to.into(), 1000u64.into()])?)
/// }
/// # transfer_call_data().unwrap();
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Error from type parsing or value encoding.
    #[error(transparent)]
    Abi(#[from] AbiError),

    /// Error loading configuration.
    #[cfg(feature = "config")]
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Malformed JSON argument text.
    #[cfg(feature = "json")]
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if this is an encoding error.
    pub fn is_abi(&self) -> bool {
        matches!(self, Self::Abi(_))
    }

    /// Returns `true` if this is a configuration error.
    #[cfg(feature = "config")]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns `true` if this is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// The encoding error, if this is one.
    pub fn as_abi(&self) -> Option<&AbiError> {
        match self {
            Self::Abi(e) => Some(e),
            _ => None,
        }
    }
}
