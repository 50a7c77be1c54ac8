//! Shape checks shared by the entity codecs.

use crate::error::{CodecError, ResultExt};
use serde_json::{Map, Value};

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn parse(bytes: &[u8]) -> Result<Value, CodecError> {
    Ok(serde_json::from_slice(bytes)?)
}

pub(crate) fn render(value: &Value) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(value)?)
}

pub(crate) fn array<'v>(
    value: &'v Value,
    expected: &'static str,
) -> Result<&'v [Value], CodecError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Null => Err(CodecError::UnexpectedNull { expected }),
        other => Err(CodecError::ExpectedArray {
            expected,
            found: kind_of(other),
        }),
    }
}

/// An array of exactly `expected` elements.
pub(crate) fn tuple<'v>(
    value: &'v Value,
    node: &'static str,
    expected: usize,
) -> Result<&'v [Value], CodecError> {
    let items = array(value, node)?;
    arity(node, items, expected)?;
    Ok(items)
}

pub(crate) fn arity(
    node: &'static str,
    items: &[Value],
    expected: usize,
) -> Result<(), CodecError> {
    if items.len() == expected {
        Ok(())
    } else {
        Err(CodecError::Arity {
            node,
            expected,
            found: items.len(),
        })
    }
}

pub(crate) fn object<'v>(
    value: &'v Value,
    expected: &'static str,
) -> Result<&'v Map<String, Value>, CodecError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(CodecError::UnexpectedNull { expected }),
        other => Err(CodecError::ExpectedObject {
            expected,
            found: kind_of(other),
        }),
    }
}

pub(crate) fn string<'v>(value: &'v Value, expected: &'static str) -> Result<&'v str, CodecError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Null => Err(CodecError::UnexpectedNull { expected }),
        other => Err(CodecError::ExpectedString {
            expected,
            found: kind_of(other),
        }),
    }
}

pub(crate) fn field<'v>(
    map: &'v Map<String, Value>,
    entity: &'static str,
    name: &'static str,
) -> Result<&'v Value, CodecError> {
    map.get(name).ok_or(CodecError::MissingField {
        entity,
        field: name,
    })
}

/// Splits a recursive node `[tag, attrs, ...]` into its tag and elements.
pub(crate) fn node<'v>(
    value: &'v Value,
    entity: &'static str,
) -> Result<(&'v str, &'v [Value]), CodecError> {
    let items = array(value, entity)?;
    if items.len() < 2 {
        return Err(CodecError::Header {
            node: entity,
            found: items.len(),
        });
    }
    let tag = string(&items[0], entity)?;
    Ok((tag, items))
}

/// Decodes every element of a JSON array, tagging failures with their index.
pub(crate) fn list<T, F>(
    value: &Value,
    expected: &'static str,
    mut decode: F,
) -> Result<Vec<T>, CodecError>
where
    F: FnMut(&Value) -> Result<T, CodecError>,
{
    array(value, expected)?
        .iter()
        .enumerate()
        .map(|(i, item)| decode(item).context(|| format!("{expected} element {i}")))
        .collect()
}

/// Encodes every element into a JSON array.
pub(crate) fn encode_list<T, F>(items: &[T], mut encode: F) -> Result<Value, CodecError>
where
    F: FnMut(&T) -> Result<Value, CodecError>,
{
    Ok(Value::Array(
        items.iter().map(&mut encode).collect::<Result<_, _>>()?,
    ))
}

/// `null` or a string.
pub(crate) fn optional_string(
    value: Option<&Value>,
    expected: &'static str,
) -> Result<Option<String>, CodecError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(other) => string(other, expected).map(|s| Some(s.to_string())),
    }
}
