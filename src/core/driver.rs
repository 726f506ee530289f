// src/core/driver.rs

//! Binding between [`JsonContainer`] and the raw values a database driver exchanges for
//! JSON/JSONB columns.

use super::codec;
use super::container::JsonContainer;
use super::errors::{Result, SpinelJsonError};
use bytes::Bytes;
use tracing::debug;

/// Bytes written for a valid document with no content.
pub const EMPTY_OBJECT_BYTES: &[u8] = b"{}";

/// A raw column value as handed over by, or to, a database driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverValue {
    /// SQL `NULL`.
    Null,
    Text(String),
    Bytes(Bytes),
}

impl DriverValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DriverValue::Null)
    }

    /// The raw payload, or `None` for SQL `NULL`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            DriverValue::Null => None,
            DriverValue::Text(s) => Some(s.as_bytes()),
            DriverValue::Bytes(b) => Some(b),
        }
    }
}

impl From<Option<Vec<u8>>> for DriverValue {
    fn from(raw: Option<Vec<u8>>) -> Self {
        raw.map_or(DriverValue::Null, |b| DriverValue::Bytes(Bytes::from(b)))
    }
}

impl From<Vec<u8>> for DriverValue {
    fn from(raw: Vec<u8>) -> Self {
        DriverValue::Bytes(Bytes::from(raw))
    }
}

impl From<Bytes> for DriverValue {
    fn from(raw: Bytes) -> Self {
        DriverValue::Bytes(raw)
    }
}

impl From<String> for DriverValue {
    fn from(raw: String) -> Self {
        DriverValue::Text(raw)
    }
}

impl From<&str> for DriverValue {
    fn from(raw: &str) -> Self {
        DriverValue::Text(raw.to_owned())
    }
}

/// A type that can be stored in and loaded from a JSON column.
pub trait ColumnValue: Sized {
    /// Converts `self` into the value handed to the driver on write.
    fn to_driver_value(&self) -> Result<DriverValue>;

    /// Builds a value from what the driver returned on read.
    fn from_driver_value(raw: DriverValue) -> Result<Self>;
}

impl ColumnValue for JsonContainer {
    /// The null document is written as SQL `NULL` and an empty object as `{}`. Array
    /// documents are written as a bare JSON array.
    fn to_driver_value(&self) -> Result<DriverValue> {
        let Some(root) = self.root() else {
            return Ok(DriverValue::Null);
        };
        if root.is_object() && root.is_empty() {
            return Ok(DriverValue::Bytes(Bytes::from_static(EMPTY_OBJECT_BYTES)));
        }
        Ok(DriverValue::Bytes(Bytes::from(codec::encode_to_vec(root)?)))
    }

    /// Accepts SQL `NULL`, text or bytes. A `null` payload is the null document; anything
    /// else is decoded as an object first and as an array second. If neither shape fits,
    /// the error carries both reasons.
    fn from_driver_value(raw: DriverValue) -> Result<Self> {
        let Some(bytes) = raw.as_bytes() else {
            return Ok(JsonContainer::null());
        };
        if bytes.trim_ascii() == b"null" {
            return Ok(JsonContainer::null());
        }

        let object_err = match codec::decode_object(bytes) {
            Ok(map) => return Ok(JsonContainer::from_map(map)),
            Err(e) => e,
        };
        match codec::decode_array(bytes) {
            Ok(items) => {
                debug!("Column value is not an object, loaded as a top-level array");
                Ok(JsonContainer::from_array(items))
            }
            Err(array_err) => Err(SpinelJsonError::DecodeFailure(format!(
                "value is neither a JSON object ({}) nor a JSON array ({})",
                inner_message(&object_err),
                inner_message(&array_err)
            ))),
        }
    }
}

fn inner_message(e: &SpinelJsonError) -> String {
    match e {
        SpinelJsonError::DecodeFailure(msg) => msg.clone(),
        other => other.to_string(),
    }
}
