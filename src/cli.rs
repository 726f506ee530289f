// src/cli.rs

//! Command-line operations over JSON documents stored in files.
//!
//! Each file is treated like a JSON column: it is loaded through the driver binding, so
//! a file holding a bare array loads as a top-level array document and a file holding
//! `null` loads as the null document.

use crate::config::Config;
use crate::core::codec;
use crate::core::{ColumnValue, DriverValue, JsonContainer, Path, Value};
use anyhow::{Context, Result, anyhow, bail};
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Get { file: String, path: String },
    Type { file: String, path: String },
    Set { file: String, path: String, value: String },
    SetCreate { file: String, path: String, value: String },
    Del { file: String, path: String },
}

impl CliCommand {
    /// Parses positional arguments (without the program name or global flags).
    pub fn parse(args: &[String]) -> Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            bail!("missing command");
        };
        let arity = |expected: usize| -> Result<()> {
            if rest.len() != expected {
                return Err(anyhow!(
                    "wrong number of arguments for '{name}': expected {expected}, got {}",
                    rest.len()
                ));
            }
            Ok(())
        };

        match name.to_ascii_lowercase().as_str() {
            "get" => {
                arity(2)?;
                Ok(CliCommand::Get {
                    file: rest[0].clone(),
                    path: rest[1].clone(),
                })
            }
            "type" => {
                arity(2)?;
                Ok(CliCommand::Type {
                    file: rest[0].clone(),
                    path: rest[1].clone(),
                })
            }
            "set" => {
                arity(3)?;
                Ok(CliCommand::Set {
                    file: rest[0].clone(),
                    path: rest[1].clone(),
                    value: rest[2].clone(),
                })
            }
            "set-create" => {
                arity(3)?;
                Ok(CliCommand::SetCreate {
                    file: rest[0].clone(),
                    path: rest[1].clone(),
                    value: rest[2].clone(),
                })
            }
            "del" => {
                arity(2)?;
                Ok(CliCommand::Del {
                    file: rest[0].clone(),
                    path: rest[1].clone(),
                })
            }
            other => Err(anyhow!("unknown command '{other}'")),
        }
    }

    pub fn file(&self) -> &str {
        match self {
            CliCommand::Get { file, .. }
            | CliCommand::Type { file, .. }
            | CliCommand::Set { file, .. }
            | CliCommand::SetCreate { file, .. }
            | CliCommand::Del { file, .. } => file,
        }
    }
}

/// Runs `cmd` and returns the text to print on success.
pub fn execute(cmd: &CliCommand, config: &Config) -> Result<String> {
    let mut doc = load_document(cmd.file(), config)?;

    match cmd {
        CliCommand::Get { path, .. } => {
            let path = parse_path(path, config)?;
            let (value, _) = doc.get_path(&path)?;
            render(value, config)
        }
        CliCommand::Type { path, .. } => {
            let path = parse_path(path, config)?;
            let (_, tag) = doc.get_path(&path)?;
            Ok(tag.to_string())
        }
        CliCommand::Set { file, path, value } => {
            let path = parse_path(path, config)?;
            doc.set_path(&path, parse_value(value)?)?;
            store_document(file, &doc)?;
            info!("Updated '{}' at '{}'", file, path);
            Ok("OK".to_string())
        }
        CliCommand::SetCreate { file, path, value } => {
            let path = parse_path(path, config)?;
            doc.set_creating_path(&path, parse_value(value)?)?;
            store_document(file, &doc)?;
            info!("Updated '{}' at '{}' (creating missing levels)", file, path);
            Ok("OK".to_string())
        }
        CliCommand::Del { file, path } => {
            let path = parse_path(path, config)?;
            let removed = doc.remove_path(&path)?;
            store_document(file, &doc)?;
            info!("Removed '{}' from '{}'", path, file);
            render(&removed, config)
        }
    }
}

fn parse_path(path: &str, config: &Config) -> Result<Path> {
    Ok(Path::parse_with_limit(path, config.safety.max_path_segments)?)
}

fn parse_value(text: &str) -> Result<Value> {
    codec::decode(text.as_bytes()).with_context(|| format!("Invalid JSON value '{text}'"))
}

fn render(value: &Value, config: &Config) -> Result<String> {
    let text = if config.output.pretty {
        codec::encode_pretty(value)?
    } else {
        codec::encode(value)?
    };
    Ok(text)
}

/// Reads `file` through the driver binding, enforcing the configured size limit.
pub fn load_document(file: &str, config: &Config) -> Result<JsonContainer> {
    let bytes = fs::read(file).with_context(|| format!("Failed to read '{file}'"))?;
    let limit = config.safety.max_document_bytes;
    if limit > 0 && bytes.len() > limit {
        bail!(
            "document '{file}' is {} bytes, exceeding max_document_bytes ({limit})",
            bytes.len()
        );
    }
    debug!("Loaded {} bytes from '{}'", bytes.len(), file);
    JsonContainer::from_driver_value(DriverValue::from(bytes))
        .with_context(|| format!("Failed to decode '{file}'"))
}

/// Writes `doc` to `file` by writing a uniquely named sibling temp file and renaming it
/// into place. The temp file is removed if any step fails.
pub fn store_document(file: &str, doc: &JsonContainer) -> Result<()> {
    let bytes = match doc.to_driver_value()? {
        DriverValue::Null => b"null".to_vec(),
        DriverValue::Text(s) => s.into_bytes(),
        DriverValue::Bytes(b) => b.to_vec(),
    };
    let target = std::path::Path::new(file);
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => std::path::Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file next to '{file}'"))?;
    tmp.write_all(&bytes)
        .with_context(|| format!("Failed to write temp file for '{file}'"))?;
    tmp.persist(target)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace '{file}'"))?;
    debug!("Stored {} bytes to '{}'", bytes.len(), file);
    Ok(())
}
