// src/core/type_tag.rs

//! Semantic type labels for resolved values.

use super::value::Value;
use strum_macros::{AsRefStr, Display, EnumString, IntoStaticStr};

/// A label describing the shape of a value, refined for arrays by the homogeneity of
/// their elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, IntoStaticStr)]
pub enum TypeTag {
    #[strum(serialize = "nil")]
    Nil,
    #[strum(serialize = "bool")]
    Bool,
    #[strum(serialize = "int")]
    Int,
    #[strum(serialize = "float64")]
    Float64,
    #[strum(serialize = "string")]
    String,
    #[strum(serialize = "object")]
    Object,
    #[strum(serialize = "array/string")]
    ArrayString,
    #[strum(serialize = "array/bool")]
    ArrayBool,
    #[strum(serialize = "array/object")]
    ArrayObject,
    #[strum(serialize = "array/int")]
    ArrayInt,
    #[strum(serialize = "array/float64")]
    ArrayFloat64,
    #[strum(serialize = "array/any")]
    ArrayAny,
}

impl TypeTag {
    /// Derives the tag of `value`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => TypeTag::Nil,
            Value::Bool(_) => TypeTag::Bool,
            Value::Number(_) if value.is_integral() => TypeTag::Int,
            Value::Number(_) => TypeTag::Float64,
            Value::String(_) => TypeTag::String,
            Value::Object(_) => TypeTag::Object,
            Value::Array(items) => Self::of_array(items),
        }
    }

    fn of_array(items: &[Value]) -> Self {
        let Some((first, rest)) = items.split_first() else {
            return TypeTag::ArrayAny;
        };

        let mut tag = match TypeTag::of(first) {
            TypeTag::String => TypeTag::ArrayString,
            TypeTag::Bool => TypeTag::ArrayBool,
            TypeTag::Object => TypeTag::ArrayObject,
            TypeTag::Int => TypeTag::ArrayInt,
            TypeTag::Float64 => TypeTag::ArrayFloat64,
            _ => return TypeTag::ArrayAny,
        };

        for item in rest {
            tag = match (tag, TypeTag::of(item)) {
                (TypeTag::ArrayString, TypeTag::String)
                | (TypeTag::ArrayBool, TypeTag::Bool)
                | (TypeTag::ArrayObject, TypeTag::Object)
                | (TypeTag::ArrayInt, TypeTag::Int) => tag,
                // Any fractional number widens an all-number array to float64.
                (TypeTag::ArrayInt | TypeTag::ArrayFloat64, TypeTag::Int | TypeTag::Float64) => {
                    TypeTag::ArrayFloat64
                }
                _ => return TypeTag::ArrayAny,
            };
        }
        tag
    }

    /// The label as a static string, e.g. `"array/int"`.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            TypeTag::ArrayString
                | TypeTag::ArrayBool
                | TypeTag::ArrayObject
                | TypeTag::ArrayInt
                | TypeTag::ArrayFloat64
                | TypeTag::ArrayAny
        )
    }

    pub fn is_number(&self) -> bool {
        matches!(self, TypeTag::Int | TypeTag::Float64)
    }
}
