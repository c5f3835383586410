//! Encoder configuration parsing.
//!
//! Every section and field is optional:
//!
//! ```toml
//! [encoder]
//! max_depth = 32
//!
//! [output]
//! format = "hex"   # hex | words | binary
//! prefix = true
//!
//! [logging]
//! level = "warn"
//! format = "text"  # text | json
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::abi::{AbiEncoder, DEFAULT_MAX_DEPTH};

/// Configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Encoder limits.
    pub encoder: EncoderConfig,
    /// How encoded bytes are written.
    pub output: OutputConfig,
    /// Log filter and format.
    pub logging: LoggingConfig,
}

/// Encoder limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderConfig {
    /// Maximum array dimensions per type.
    pub max_depth: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Output rendering of encoded call data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One hex string.
    #[default]
    Hex,
    /// One hex line per 32-byte word.
    Words,
    /// Raw bytes.
    Binary,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Prefix hex output with `0x`.
    pub prefix: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Hex,
            prefix: true,
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `warn` or `contract_abi=debug`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Build an encoder with the configured limits.
    pub fn encoder(&self) -> AbiEncoder {
        AbiEncoder::from(&self.encoder)
    }
}

impl From<&EncoderConfig> for AbiEncoder {
    fn from(config: &EncoderConfig) -> Self {
        AbiEncoder::new().with_max_depth(config.max_depth)
    }
}

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    Io(String, #[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
