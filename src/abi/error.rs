//! Error types for contract ABI encoding.

use thiserror::Error;

/// Errors that can occur while parsing type signatures or encoding values.
///
/// Every failure aborts the whole encoding call. Errors raised while encoding
/// a top-level argument are wrapped in [`AbiError::Argument`] so callers can
/// see which argument failed and its declared type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error("Invalid type signature '{signature}': {reason}")]
    InvalidTypeSignature { signature: String, reason: String },

    #[error("Unhandled type: {ty}")]
    UnhandledType { ty: String },

    #[error("Invalid argument for {ty}: expected {expected}, got {got}")]
    InvalidArgumentShape {
        ty: String,
        expected: String,
        got: String,
    },

    #[error("Wrong array size for {ty}: found {found}, expecting {expected}")]
    ArraySizeMismatch {
        ty: String,
        expected: usize,
        found: usize,
    },

    #[error("Value out of bounds for {ty}: {reason}")]
    ValueOutOfBounds { ty: String, reason: String },

    #[error("Could not parse {ty}: {reason}")]
    MalformedFixedLengthData { ty: String, reason: String },

    #[error("Argument count mismatch: {types} types but {args} values")]
    ArgumentCountMismatch { types: usize, args: usize },

    #[error("Type {ty} nests {depth} array dimensions, limit is {limit}")]
    NestingTooDeep {
        ty: String,
        depth: usize,
        limit: usize,
    },

    #[error("Argument {index} ({ty}): {source}")]
    Argument {
        index: usize,
        ty: String,
        #[source]
        source: Box<AbiError>,
    },
}

/// Flat classification of an [`AbiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidTypeSignature,
    UnhandledType,
    InvalidArgumentShape,
    ArraySizeMismatch,
    ValueOutOfBounds,
    MalformedFixedLengthData,
    ArgumentCountMismatch,
    NestingTooDeep,
}

impl AbiError {
    /// The kind of the underlying failure, looking through argument context.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidTypeSignature { .. } => ErrorKind::InvalidTypeSignature,
            Self::UnhandledType { .. } => ErrorKind::UnhandledType,
            Self::InvalidArgumentShape { .. } => ErrorKind::InvalidArgumentShape,
            Self::ArraySizeMismatch { .. } => ErrorKind::ArraySizeMismatch,
            Self::ValueOutOfBounds { .. } => ErrorKind::ValueOutOfBounds,
            Self::MalformedFixedLengthData { .. } => ErrorKind::MalformedFixedLengthData,
            Self::ArgumentCountMismatch { .. } => ErrorKind::ArgumentCountMismatch,
            Self::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
            Self::Argument { source, .. } => source.kind(),
        }
    }

    /// Index of the top-level argument that failed, if known.
    pub fn argument_index(&self) -> Option<usize> {
        match self {
            Self::Argument { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Attach top-level argument context. Already-wrapped errors are kept as is.
    pub(crate) fn at_argument(self, index: usize, ty: impl Into<String>) -> Self {
        match self {
            Self::Argument { .. } => self,
            other => Self::Argument {
                index,
                ty: ty.into(),
                source: Box::new(other),
            },
        }
    }

    pub(crate) fn out_of_bounds(ty: impl ToString, reason: impl Into<String>) -> Self {
        Self::ValueOutOfBounds {
            ty: ty.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn shape(ty: impl ToString, expected: impl Into<String>, got: &str) -> Self {
        Self::InvalidArgumentShape {
            ty: ty.to_string(),
            expected: expected.into(),
            got: got.to_string(),
        }
    }

    pub(crate) fn malformed(ty: impl ToString, reason: impl Into<String>) -> Self {
        Self::MalformedFixedLengthData {
            ty: ty.to_string(),
            reason: reason.into(),
        }
    }
}
