//! Helpers for picking fields out of `serde_json::Value` documents.
//!
//! The JSON the daemons speak is loose (optional keys, `null` meaning
//! "empty", numbers sometimes quoted), so the parsers work on `Value`s
//! directly instead of deriving `Deserialize`.

use serde_json::{Map, Value};

use super::error::TypeError;

/// Borrow `value` as an object, or fail naming `field`.
pub(crate) fn as_object<'a>(value: &'a Value, field: &str) -> Result<&'a Map<String, Value>, TypeError> {
    value.as_object().ok_or_else(|| TypeError::InvalidJson {
        field: field.to_string(),
        expected: "an object",
    })
}

/// A required field. `null` counts as missing.
pub(crate) fn field<'a>(obj: &'a Value, key: &str) -> Result<&'a Value, TypeError> {
    match obj.get(key) {
        None | Some(Value::Null) => Err(TypeError::MissingField(key.to_string())),
        Some(v) => Ok(v),
    }
}

/// An optional field. `null` counts as absent.
pub(crate) fn opt_field<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(v) => Some(v),
    }
}

pub(crate) fn str_field<'a>(obj: &'a Value, key: &str) -> Result<&'a str, TypeError> {
    as_str(field(obj, key)?, key)
}

/// An optional string field. Absent, `null` and `""` all give `None`.
pub(crate) fn opt_str_field<'a>(obj: &'a Value, key: &str) -> Result<Option<&'a str>, TypeError> {
    match opt_field(obj, key) {
        None => Ok(None),
        Some(v) => as_str(v, key).map(|s| if s.is_empty() { None } else { Some(s) }),
    }
}

pub(crate) fn as_str<'a>(value: &'a Value, field: &str) -> Result<&'a str, TypeError> {
    value.as_str().ok_or_else(|| TypeError::InvalidJson {
        field: field.to_string(),
        expected: "a string",
    })
}

/// An unsigned integer, accepted either as a JSON number or a quoted one.
pub(crate) fn as_u64(value: &Value, field: &str) -> Result<u64, TypeError> {
    let invalid = || TypeError::InvalidJson {
        field: field.to_string(),
        expected: "an unsigned integer",
    };
    match value {
        Value::Number(n) => n.as_u64().ok_or_else(invalid),
        Value::String(s) => s.parse().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

pub(crate) fn u64_field(obj: &Value, key: &str) -> Result<u64, TypeError> {
    as_u64(field(obj, key)?, key)
}

/// An optional integer field, defaulting to 0.
pub(crate) fn u64_field_or_zero(obj: &Value, key: &str) -> Result<u64, TypeError> {
    opt_field(obj, key).map_or(Ok(0), |v| as_u64(v, key))
}

/// An optional array field. Absent and `null` give an empty slice.
pub(crate) fn array_field<'a>(obj: &'a Value, key: &str) -> Result<&'a [Value], TypeError> {
    match opt_field(obj, key) {
        None => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(TypeError::InvalidJson {
            field: key.to_string(),
            expected: "an array",
        }),
    }
}

/// Parse every element of an optional array field with `parse`.
pub(crate) fn parse_array<T, F>(obj: &Value, key: &str, parse: F) -> Result<Vec<T>, TypeError>
where
    F: Fn(&Value) -> Result<T, TypeError>,
{
    array_field(obj, key)?.iter().map(parse).collect()
}

/// Implements `Serialize` / `Deserialize` through a type's `Display` and
/// `FromStr` impls, for the value types whose JSON form is a plain string.
macro_rules! impl_string_serde {
    ($($ty:ty),* $(,)?) => {
        $(
            impl serde::Serialize for $ty {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }

            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                    s.parse().map_err(serde::de::Error::custom)
                }
            }
        )*
    };
}

pub(crate) use impl_string_serde;
