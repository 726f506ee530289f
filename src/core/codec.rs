// src/core/codec.rs

//! JSON text encoding and decoding for [`Value`], built on `serde_json`.
//!
//! Integral numbers are written without a fractional part so that a document that went
//! in as `{"n":2}` comes back out as `{"n":2}` rather than `{"n":2.0}`.

use super::errors::{Result, SpinelJsonError};
use super::value::{Map, Value};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => match self.as_i64() {
                Some(i) => serializer.serialize_i64(i),
                None if n.is_finite() => serializer.serialize_f64(*n),
                None => serializer.serialize_unit(),
            },
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for item in arr {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any valid JSON value")
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v as f64))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v as f64))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = Map::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((k, v)) = access.next_entry::<String, Value>()? {
            // Duplicate keys: the last occurrence wins, as with most JSON decoders.
            map.insert(k, v);
        }
        Ok(Value::Object(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Encodes a value as compact JSON text.
pub fn encode(value: &Value) -> Result<String> {
    serde_json::to_string(value).map_err(|e| SpinelJsonError::EncodeFailure(e.to_string()))
}

/// Encodes a value as indented JSON text.
pub fn encode_pretty(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| SpinelJsonError::EncodeFailure(e.to_string()))
}

/// Encodes a value as compact JSON bytes.
pub fn encode_to_vec(value: &Value) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| SpinelJsonError::EncodeFailure(e.to_string()))
}

/// Decodes any JSON value from bytes.
pub fn decode(bytes: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decodes bytes that must hold a JSON object.
pub fn decode_object(bytes: &[u8]) -> Result<Map> {
    Ok(serde_json::from_slice::<Map>(bytes)?)
}

/// Decodes bytes that must hold a JSON array.
pub fn decode_array(bytes: &[u8]) -> Result<Vec<Value>> {
    Ok(serde_json::from_slice::<Vec<Value>>(bytes)?)
}
