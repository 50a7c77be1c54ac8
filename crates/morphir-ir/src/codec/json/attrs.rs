//! Attribute codecs.
//!
//! Attributes are opaque to the IR codec: every entry point takes one
//! encoder (or decoder) per attribute parameter. Plain closures work:
//!
//! ```ignore
//! let encode = |a: &SourceLocation| serde_json::to_value(a).map_err(CodecError::attributes);
//! ```

use crate::error::CodecError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Turns attributes into their JSON form.
pub trait AttrEncoder<A> {
    fn encode_attrs(&self, attrs: &A) -> Result<Value, CodecError>;
}

impl<A, F> AttrEncoder<A> for F
where
    F: Fn(&A) -> Result<Value, CodecError>,
{
    fn encode_attrs(&self, attrs: &A) -> Result<Value, CodecError> {
        self(attrs)
    }
}

/// Reads attributes back from their JSON form.
pub trait AttrDecoder<A> {
    fn decode_attrs(&self, value: &Value) -> Result<A, CodecError>;
}

impl<A, F> AttrDecoder<A> for F
where
    F: Fn(&Value) -> Result<A, CodecError>,
{
    fn decode_attrs(&self, value: &Value) -> Result<A, CodecError> {
        self(value)
    }
}

/// Unit attributes are written as `{}`.
pub fn encode_unit(_: &()) -> Result<Value, CodecError> {
    Ok(Value::Object(Map::new()))
}

/// Accepts `{}`, `[]` and `null`; anything carrying data is rejected.
pub fn decode_unit(value: &Value) -> Result<(), CodecError> {
    match value {
        Value::Null => Ok(()),
        Value::Object(map) if map.is_empty() => Ok(()),
        Value::Array(items) if items.is_empty() => Ok(()),
        other => Err(CodecError::attributes(format!(
            "expected empty unit attributes, got {other}"
        ))),
    }
}

/// Pass-through codec for attributes kept as raw JSON.
pub fn encode_json(value: &Value) -> Result<Value, CodecError> {
    Ok(value.clone())
}

pub fn decode_json(value: &Value) -> Result<Value, CodecError> {
    Ok(value.clone())
}

/// Codec for any attribute type with serde support.
pub fn encode_serde<A: Serialize>(attrs: &A) -> Result<Value, CodecError> {
    serde_json::to_value(attrs).map_err(CodecError::attributes)
}

pub fn decode_serde<A: DeserializeOwned>(value: &Value) -> Result<A, CodecError> {
    A::deserialize(value).map_err(CodecError::attributes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unit_attributes() {
        assert_eq!(encode_unit(&()).unwrap(), json!({}));
        assert!(decode_unit(&json!({})).is_ok());
        assert!(decode_unit(&json!([])).is_ok());
        assert!(decode_unit(&Value::Null).is_ok());

        let err = decode_unit(&json!({"line": 3})).unwrap_err();
        assert!(matches!(err, CodecError::Attributes(_)));
    }

    #[test]
    fn test_closures_are_codecs() {
        let encode = |n: &u32| Ok::<_, CodecError>(json!(n));
        let decode = |v: &Value| {
            v.as_u64()
                .map(|n| n as u32)
                .ok_or_else(|| CodecError::attributes("expected a number"))
        };
        let encoded = encode.encode_attrs(&7).unwrap();
        assert_eq!(decode.decode_attrs(&encoded).unwrap(), 7);
        assert!(decode.decode_attrs(&json!("7")).is_err());
    }

    #[test]
    fn test_serde_attributes() {
        let encoded = encode_serde(&vec![1, 2]).unwrap();
        assert_eq!(encoded, json!([1, 2]));
        let decoded: Vec<i32> = decode_serde(&encoded).unwrap();
        assert_eq!(decoded, vec![1, 2]);
        assert!(decode_serde::<Vec<i32>>(&json!({})).is_err());
    }
}
