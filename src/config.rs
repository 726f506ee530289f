// src/config.rs

//! Manages tool configuration: loading, resolving size values, and validation.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// The file looked up when no `--config` flag is given.
pub const DEFAULT_CONFIG_PATH: &str = "spineljson.toml";

/// Controls how documents are written back out.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct OutputConfig {
    /// If true, documents and values are printed with indentation.
    #[serde(default)]
    pub pretty: bool,
}

/// Holds safety-related limits applied before a document is touched.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SafetyConfig {
    /// Rejects paths with more segments than this. `0` disables the check.
    #[serde(default)]
    pub max_path_segments: usize,
    /// Refuses to load documents larger than this many bytes. `0` disables the check.
    #[serde(default)]
    pub max_document_bytes: usize,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum SizeConfig {
    Bytes(usize),
    String(String),
}

/// A raw representation of the config file before validation and resolution.
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default)]
    output: OutputConfig,
    #[serde(default)]
    safety: RawSafetyConfig,
}

#[derive(Deserialize, Default)]
struct RawSafetyConfig {
    #[serde(default)]
    max_path_segments: usize,
    #[serde(default)]
    max_document_bytes: Option<SizeConfig>,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Represents the final, validated, and resolved configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub log_level: String,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub safety: SafetyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output: OutputConfig::default(),
            safety: SafetyConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new `Config` instance by reading and parsing a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to load configuration from '{path}'"))
    }

    /// Loads `path` if given; otherwise loads [`DEFAULT_CONFIG_PATH`] when it exists and
    /// falls back to defaults when it does not.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let raw_config: RawConfig =
            toml::from_str(contents).context("Failed to parse TOML configuration")?;

        let max_document_bytes = match raw_config.safety.max_document_bytes {
            Some(size) => resolve_size(size)?,
            None => 0,
        };

        let config = Config {
            log_level: raw_config.log_level,
            output: raw_config.output,
            safety: SafetyConfig {
                max_path_segments: raw_config.safety.max_path_segments,
                max_document_bytes,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the resolved configuration to ensure logical consistency.
    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            return Err(anyhow!("log_level cannot be empty"));
        }
        EnvFilter::try_new(&self.log_level)
            .with_context(|| format!("Invalid log_level '{}'", self.log_level))?;

        if self.safety.max_path_segments == 1 {
            warn!("max_path_segments is 1: only top-level fields can be addressed.");
        }
        if self.safety.max_document_bytes > 0 && self.safety.max_document_bytes < 1024 {
            warn!(
                "low max_document_bytes setting: {} bytes. Most documents will be rejected.",
                self.safety.max_document_bytes
            );
        }
        Ok(())
    }
}

/// Resolves a size given either as a plain byte count or as a string with a unit
/// (`kb`, `mb`, `gb`, or their single-letter forms).
fn resolve_size(cfg: SizeConfig) -> Result<usize> {
    match cfg {
        SizeConfig::Bytes(b) => Ok(b),
        SizeConfig::String(s) => {
            let s_lower = s.trim().to_lowercase();
            if let Some(val_str) = s_lower.strip_suffix("gb") {
                parse_size_string(&s, val_str, 1024 * 1024 * 1024)
            } else if let Some(val_str) = s_lower.strip_suffix('g') {
                parse_size_string(&s, val_str, 1024 * 1024 * 1024)
            } else if let Some(val_str) = s_lower.strip_suffix("mb") {
                parse_size_string(&s, val_str, 1024 * 1024)
            } else if let Some(val_str) = s_lower.strip_suffix('m') {
                parse_size_string(&s, val_str, 1024 * 1024)
            } else if let Some(val_str) = s_lower.strip_suffix("kb") {
                parse_size_string(&s, val_str, 1024)
            } else if let Some(val_str) = s_lower.strip_suffix('k') {
                parse_size_string(&s, val_str, 1024)
            } else {
                s_lower.parse().with_context(|| {
                    format!(
                        "Invalid max_document_bytes value '{s}'. Must be a number (bytes) or have a unit (e.g., '16mb')."
                    )
                })
            }
        }
    }
}

/// Parses a string number with a unit (kb, mb, gb) and applies a multiplier.
fn parse_size_string(original_str: &str, value_str: &str, multiplier: u64) -> Result<usize> {
    let value: u64 = value_str
        .trim()
        .parse()
        .with_context(|| format!("Invalid number in size config: '{original_str}'"))?;
    let result_u64 = value.saturating_mul(multiplier);
    usize::try_from(result_u64)
        .map_err(|_| anyhow!("Size '{original_str}' is too large for this platform"))
}
