// src/core/container.rs

//! The top-level JSON document container.

use super::codec;
use super::errors::{Result, SpinelJsonError};
use super::navigator;
use super::path::{Path, Segment};
use super::type_tag::TypeTag;
use super::value::{Map, Value};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use tracing::{Level, trace};

/// Owns one JSON document: either the null document, or a root object or array.
///
/// The root is stored as the variant it actually is, so a document whose top level is
/// an array needs no reserved wrapper key. Every constructor allocates its own storage
/// and `Clone` is a deep copy; two containers never share a tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonContainer {
    /// `None` is the null document. `Some` always holds an `Object` or an `Array`.
    root: Option<Value>,
}

impl JsonContainer {
    /// Creates the null document (`valid == false`).
    pub fn null() -> Self {
        Self { root: None }
    }

    /// Creates a valid, empty object document with freshly allocated storage.
    pub fn empty_object() -> Self {
        Self {
            root: Some(Value::object()),
        }
    }

    /// Creates a valid, empty array document with freshly allocated storage.
    pub fn empty_array() -> Self {
        Self {
            root: Some(Value::array()),
        }
    }

    /// Wraps a decoded value. `Null` becomes the null document; scalars are rejected
    /// because a document root must be an object or an array.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::null()),
            Value::Object(_) | Value::Array(_) => Ok(Self { root: Some(value) }),
            scalar => Err(SpinelJsonError::DecodeFailure(format!(
                "document root must be an object or an array, found {}",
                scalar.kind()
            ))),
        }
    }

    /// Wraps an object map.
    pub fn from_map(map: Map) -> Self {
        Self {
            root: Some(Value::Object(map)),
        }
    }

    /// Wraps an array as a top-level array document.
    pub fn from_array(items: Vec<Value>) -> Self {
        Self {
            root: Some(Value::Array(items)),
        }
    }

    /// False only for the null document.
    pub fn is_valid(&self) -> bool {
        self.root.is_some()
    }

    /// True when the document's top level is a JSON array.
    pub fn is_top_level_array(&self) -> bool {
        matches!(self.root, Some(Value::Array(_)))
    }

    /// True for the null document and for an empty root object or array.
    pub fn is_empty(&self) -> bool {
        self.root.as_ref().is_none_or(Value::is_empty)
    }

    /// Number of top-level fields or elements; `0` for the null document.
    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, Value::len)
    }

    /// The root value, or `None` for the null document.
    pub fn root(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    /// Consumes the container and returns its root, `Value::Null` for the null document.
    pub fn into_value(self) -> Value {
        self.root.unwrap_or_default()
    }

    /// Resolves `path` and returns the value together with its type tag.
    pub fn get(&self, path: &str) -> Result<(&Value, TypeTag)> {
        self.get_path(&Path::parse(path)?)
    }

    pub fn get_path(&self, path: &Path) -> Result<(&Value, TypeTag)> {
        let root = self.root.as_ref().ok_or(SpinelJsonError::NullDocument)?;
        navigator::read(root, path)
    }

    /// Returns the type tag of the value at `path`.
    pub fn type_of(&self, path: &str) -> Result<TypeTag> {
        self.get(path).map(|(_, tag)| tag)
    }

    /// True when `path` parses and resolves to an existing value.
    pub fn contains(&self, path: &str) -> bool {
        match (Path::parse(path), self.root.as_ref()) {
            (Ok(path), Some(root)) => navigator::exists(root, &path),
            _ => false,
        }
    }

    /// Overwrites or creates the value at `path`. The parent must already exist.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        self.set_path(&Path::parse(path)?, value.into())
    }

    pub fn set_path(&mut self, path: &Path, value: Value) -> Result<()> {
        let root = self.root.as_mut().ok_or(SpinelJsonError::NullDocument)?;
        let before = size_for_trace(root);
        navigator::overwrite_set(root, path, value)?;
        trace_write("set", path, before, root);
        Ok(())
    }

    /// Sets the value at `path`, creating missing intermediate objects along the way.
    ///
    /// On the null document, a path that starts with a key first turns the document into
    /// an empty object. If the write then fails, the document is left null.
    pub fn set_creating(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        self.set_creating_path(&Path::parse(path)?, value.into())
    }

    pub fn set_creating_path(&mut self, path: &Path, value: Value) -> Result<()> {
        let promoted = self.root.is_none();
        if promoted {
            if !matches!(path.segments().first(), Some(Segment::Key(_))) {
                return Err(SpinelJsonError::NullDocument);
            }
            self.root = Some(Value::object());
        }

        let Some(root) = self.root.as_mut() else {
            return Err(SpinelJsonError::NullDocument);
        };
        let before = size_for_trace(root);
        match navigator::create_set(root, path, value) {
            Ok(()) => {
                trace_write("set_creating", path, before, root);
                Ok(())
            }
            Err(e) => {
                if promoted {
                    self.root = None;
                }
                Err(e)
            }
        }
    }

    /// Consuming form of [`JsonContainer::set`].
    pub fn with(mut self, path: &str, value: impl Into<Value>) -> Result<Self> {
        self.set(path, value)?;
        Ok(self)
    }

    /// Consuming form of [`JsonContainer::set_creating`].
    pub fn with_creating(mut self, path: &str, value: impl Into<Value>) -> Result<Self> {
        self.set_creating(path, value)?;
        Ok(self)
    }

    /// Removes and returns the value at `path`.
    pub fn remove(&mut self, path: &str) -> Result<Value> {
        self.remove_path(&Path::parse(path)?)
    }

    pub fn remove_path(&mut self, path: &Path) -> Result<Value> {
        let root = self.root.as_mut().ok_or(SpinelJsonError::NullDocument)?;
        navigator::remove(root, path)
    }

    /// Encodes the document as compact JSON text. The null document encodes as `null`.
    pub fn to_text(&self) -> Result<String> {
        match &self.root {
            Some(root) => codec::encode(root),
            None => Ok("null".to_string()),
        }
    }

    /// Encodes the document as indented JSON text.
    pub fn to_text_pretty(&self) -> Result<String> {
        match &self.root {
            Some(root) => codec::encode_pretty(root),
            None => Ok("null".to_string()),
        }
    }

    /// Decodes JSON text. `null` yields the null document.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::from_slice(text.as_bytes())
    }

    /// Decodes JSON bytes. `null` yields the null document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_value(codec::decode(bytes)?)
    }

    /// Estimated heap footprint of the document.
    pub fn estimated_memory(&self) -> usize {
        self.root.as_ref().map_or(0, Value::estimate_memory)
    }
}

/// Document size before a write, measured only when trace logging is on.
fn size_for_trace(root: &Value) -> Option<usize> {
    tracing::enabled!(Level::TRACE).then(|| root.estimate_memory())
}

fn trace_write(op: &str, path: &Path, before: Option<usize>, root: &Value) {
    if let Some(before) = before {
        trace!(
            "{} '{}' changed document size from {} to {} bytes",
            op,
            path,
            before,
            root.estimate_memory()
        );
    }
}

impl TryFrom<Value> for JsonContainer {
    type Error = SpinelJsonError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl std::str::FromStr for JsonContainer {
    type Err = SpinelJsonError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_text(s)
    }
}

impl Serialize for JsonContainer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.root {
            Some(root) => root.serialize(serializer),
            None => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for JsonContainer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}
