//! Type descriptors and the canonical type-signature parser.
//!
//! A signature such as `uint256`, `bytes32[]` or `string[2][]` is parsed into
//! a [`TypeDescriptor`]: a base type, a size modifier and a list of array
//! dimensions ordered outermost first. `0` marks a dynamic (`[]`) dimension.

use std::fmt;
use std::str::FromStr;

use super::buffer::WORD_SIZE;
use super::AbiError;

/// Base category of an ABI type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Uint,
    Int,
    Bool,
    Address,
    Hash,
    Bytes,
    String,
    Ufixed,
    Fixed,
    /// Recognised by the parser; has no encoding rule.
    Function,
}

impl BaseType {
    /// The lowercase name used in type signatures.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uint => "uint",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Address => "address",
            Self::Hash => "hash",
            Self::Bytes => "bytes",
            Self::String => "string",
            Self::Ufixed => "ufixed",
            Self::Fixed => "fixed",
            Self::Function => "function",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "uint" => Self::Uint,
            "int" => Self::Int,
            "bool" => Self::Bool,
            "address" => Self::Address,
            "hash" => Self::Hash,
            "bytes" => Self::Bytes,
            "string" => Self::String,
            "ufixed" => Self::Ufixed,
            "fixed" => Self::Fixed,
            "function" => Self::Function,
            _ => return None,
        })
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed ABI type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    base: BaseType,
    sub: String,
    dims: Vec<usize>,
}

/// Static size arithmetic overflowed `usize`.
struct SizeOverflow;

impl TypeDescriptor {
    /// Build a descriptor from its parts, applying the same validation as
    /// [`TypeDescriptor::parse`]. `dims` is ordered outermost first.
    pub fn new(base: BaseType, sub: impl Into<String>, dims: Vec<usize>) -> Result<Self, AbiError> {
        let sub = sub.into();
        let mut ty = Self {
            base,
            sub: String::new(),
            dims,
        };
        let signature = format!("{}{}{}", base, sub, ty.dims_suffix());
        ty.sub = normalize_sub(base, &sub).map_err(|reason| invalid(&signature, reason))?;
        if ty.static_size().is_err() {
            return Err(invalid(&signature, "static size overflows"));
        }
        Ok(ty)
    }

    /// Parse a canonical type signature.
    pub fn parse(signature: &str) -> Result<Self, AbiError> {
        let sig = signature.trim();
        if sig.is_empty() {
            return Err(invalid(signature, "empty type signature"));
        }
        if sig.starts_with('(') {
            return Err(invalid(signature, "tuple types are not supported"));
        }

        let base_end = sig
            .find(|c: char| !c.is_ascii_lowercase())
            .unwrap_or(sig.len());
        let (base_name, rest) = sig.split_at(base_end);
        let base = BaseType::from_name(base_name).ok_or_else(|| {
            invalid(signature, format!("unrecognized base type '{}'", base_name))
        })?;

        let dims_start = rest.find('[').unwrap_or(rest.len());
        let (sub, dims_text) = rest.split_at(dims_start);
        let sub = normalize_sub(base, sub).map_err(|reason| invalid(signature, reason))?;
        let dims = parse_dims(dims_text).map_err(|reason| invalid(signature, reason))?;

        let ty = Self { base, sub, dims };
        if ty.static_size().is_err() {
            return Err(invalid(signature, "static size overflows"));
        }
        Ok(ty)
    }

    /// The type used for offset, length and count words (`uint256`).
    pub fn size_type() -> Self {
        Self {
            base: BaseType::Uint,
            sub: "256".to_string(),
            dims: Vec::new(),
        }
    }

    pub fn base(&self) -> BaseType {
        self.base
    }

    /// Size modifier: bit width, `HxL`, byte length, or empty.
    pub fn sub(&self) -> &str {
        &self.sub
    }

    /// Array dimensions, outermost first. `0` is a dynamic dimension.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn is_array(&self) -> bool {
        !self.dims.is_empty()
    }

    /// Outermost array dimension, if this is an array.
    pub fn outer_dim(&self) -> Option<usize> {
        self.dims.first().copied()
    }

    /// `bytes` or `string` without a length modifier and not an array.
    pub fn is_variable_primitive(&self) -> bool {
        matches!(self.base, BaseType::Bytes | BaseType::String)
            && self.sub.is_empty()
            && self.dims.is_empty()
    }

    /// Static encoded width in bytes, or `None` when the type is dynamic.
    pub fn size(&self) -> Option<usize> {
        self.static_size().ok().flatten()
    }

    /// A type is dynamic when its encoded width depends on the value.
    pub fn is_dynamic(&self) -> bool {
        self.size().is_none()
    }

    /// Bytes this type occupies in an enclosing head region.
    pub fn head_size(&self) -> usize {
        self.size().unwrap_or(WORD_SIZE)
    }

    /// The element type: this descriptor with the outermost dimension removed.
    /// A scalar is its own subtype.
    pub fn subtype(&self) -> Self {
        Self {
            base: self.base,
            sub: self.sub.clone(),
            dims: self.dims.get(1..).unwrap_or_default().to_vec(),
        }
    }

    /// Numeric modifier (`uint`/`int` bits, `bytes`/`string`/`hash` length).
    pub(crate) fn sub_number(&self) -> Option<usize> {
        parse_decimal(&self.sub)
    }

    /// `(high, low)` bit split of a fixed-point modifier.
    pub(crate) fn fixed_parts(&self) -> Option<(usize, usize)> {
        let (high, low) = self.sub.split_once('x')?;
        Some((parse_decimal(high)?, parse_decimal(low)?))
    }

    fn static_size(&self) -> Result<Option<usize>, SizeOverflow> {
        if matches!(self.base, BaseType::Bytes | BaseType::String) && self.sub.is_empty() {
            return Ok(None);
        }
        let mut size = WORD_SIZE;
        // Innermost dimension first.
        for &dim in self.dims.iter().rev() {
            if dim == 0 {
                return Ok(None);
            }
            size = size.checked_mul(dim).ok_or(SizeOverflow)?;
        }
        Ok(Some(size))
    }

    fn dims_suffix(&self) -> String {
        self.dims
            .iter()
            .rev()
            .map(|d| match d {
                0 => "[]".to_string(),
                n => format!("[{}]", n),
            })
            .collect()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.base, self.sub, self.dims_suffix())
    }
}

impl FromStr for TypeDescriptor {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn invalid(signature: &str, reason: impl Into<String>) -> AbiError {
    AbiError::InvalidTypeSignature {
        signature: signature.to_string(),
        reason: reason.into(),
    }
}

fn parse_decimal(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Validate a size modifier for `base`, filling in the canonical default.
fn normalize_sub(base: BaseType, sub: &str) -> Result<String, String> {
    match base {
        BaseType::Uint | BaseType::Int => {
            if sub.is_empty() {
                return Ok("256".to_string());
            }
            let bits = parse_decimal(sub)
                .ok_or_else(|| format!("integer type must have a numeric suffix, got '{}'", sub))?;
            if !(8..=256).contains(&bits) || bits % 8 != 0 {
                return Err(format!(
                    "integer size must be a multiple of 8 between 8 and 256, got {}",
                    bits
                ));
            }
            Ok(sub.to_string())
        }
        BaseType::Ufixed | BaseType::Fixed => {
            if sub.is_empty() {
                return Ok("128x18".to_string());
            }
            let (high, low) = sub
                .split_once('x')
                .and_then(|(h, l)| Some((parse_decimal(h)?, parse_decimal(l)?)))
                .ok_or_else(|| {
                    format!(
                        "fixed-point type must have a suffix of the form <high>x<low>, got '{}'",
                        sub
                    )
                })?;
            if high % 8 != 0 || low % 8 != 0 {
                return Err("fixed-point high/low sizes must be multiples of 8".to_string());
            }
            let total = high + low;
            if high < 8 || !(8..=256).contains(&total) {
                return Err(format!("fixed-point size {}x{} out of bounds", high, low));
            }
            Ok(sub.to_string())
        }
        BaseType::Bytes | BaseType::String | BaseType::Hash => {
            if sub.is_empty() && base != BaseType::Hash {
                return Ok(String::new());
            }
            parse_decimal(sub)
                .map(|_| sub.to_string())
                .ok_or_else(|| {
                    format!("{} type must have a numeric length suffix, got '{}'", base, sub)
                })
        }
        BaseType::Address | BaseType::Bool | BaseType::Function => {
            if sub.is_empty() {
                Ok(String::new())
            } else {
                Err(format!("{} cannot have a suffix", base))
            }
        }
    }
}

/// Parse `[N]`/`[]` suffixes, returning dimensions outermost first.
fn parse_dims(mut text: &str) -> Result<Vec<usize>, String> {
    let mut dims = Vec::new();
    while !text.is_empty() {
        let inner = text
            .strip_prefix('[')
            .ok_or_else(|| format!("unexpected characters '{}'", text))?;
        let (size, after) = inner
            .split_once(']')
            .ok_or_else(|| "unterminated array dimension".to_string())?;
        if size.is_empty() {
            dims.push(0);
        } else {
            match parse_decimal(size) {
                Some(0) => return Err("fixed array dimension must be positive".to_string()),
                Some(n) => dims.push(n),
                None => return Err(format!("invalid array dimension '{}'", size)),
            }
        }
        text = after;
    }
    dims.reverse();
    Ok(dims)
}
