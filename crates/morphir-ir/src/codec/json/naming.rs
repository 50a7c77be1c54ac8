//! Identifiers on the wire.
//!
//! These shapes are the same in every format version:
//! a `Name` is `["word", ...]`, a `Path` is `[name, ...]`, an `FQName` is
//! `[packagePath, modulePath, localName]` and a `QName` is
//! `[modulePath, localName]`.

use super::{Options, wire};
use crate::error::{CodecError, ResultExt};
use crate::naming::{FQName, Name, Path, QName};
use serde_json::Value;

pub fn name_to_json(name: &Name) -> Value {
    Value::Array(name.words().iter().cloned().map(Value::String).collect())
}

pub fn name_from_json(value: &Value) -> Result<Name, CodecError> {
    let words = wire::list(value, "Name", |w| wire::string(w, "Name word").map(str::to_string))?;
    Ok(Name::new(words))
}

pub fn path_to_json(path: &Path) -> Value {
    Value::Array(path.segments().iter().map(name_to_json).collect())
}

pub fn path_from_json(value: &Value) -> Result<Path, CodecError> {
    Ok(Path::new(wire::list(value, "Path", name_from_json)?))
}

pub fn fqname_to_json(fqname: &FQName) -> Value {
    Value::Array(vec![
        path_to_json(fqname.package_path()),
        path_to_json(fqname.module_path()),
        name_to_json(fqname.local_name()),
    ])
}

pub fn fqname_from_json(value: &Value) -> Result<FQName, CodecError> {
    let items = wire::tuple(value, "FQName", 3)?;
    let package_path = path_from_json(&items[0]).context(|| "FQName package path".into())?;
    let module_path = path_from_json(&items[1]).context(|| "FQName module path".into())?;
    let local_name = name_from_json(&items[2]).context(|| "FQName local name".into())?;
    Ok(FQName::new(package_path, module_path, local_name))
}

pub fn qname_to_json(qname: &QName) -> Value {
    Value::Array(vec![
        path_to_json(qname.module_path()),
        name_to_json(qname.local_name()),
    ])
}

pub fn qname_from_json(value: &Value) -> Result<QName, CodecError> {
    let items = wire::tuple(value, "QName", 2)?;
    let module_path = path_from_json(&items[0]).context(|| "QName module path".into())?;
    let local_name = name_from_json(&items[1]).context(|| "QName local name".into())?;
    Ok(QName::new(module_path, local_name))
}

pub(crate) fn names_to_json(names: &[Name]) -> Value {
    Value::Array(names.iter().map(name_to_json).collect())
}

pub(crate) fn names_from_json(value: &Value) -> Result<Vec<Name>, CodecError> {
    wire::list(value, "names", name_from_json)
}

// The byte-level entry points take options for symmetry with every other
// entity even though identifier shapes never vary.

pub fn encode_name(_options: &Options, name: &Name) -> Result<Vec<u8>, CodecError> {
    wire::render(&name_to_json(name))
}

pub fn decode_name(_options: &Options, bytes: &[u8]) -> Result<Name, CodecError> {
    name_from_json(&wire::parse(bytes)?)
}

pub fn encode_path(_options: &Options, path: &Path) -> Result<Vec<u8>, CodecError> {
    wire::render(&path_to_json(path))
}

pub fn decode_path(_options: &Options, bytes: &[u8]) -> Result<Path, CodecError> {
    path_from_json(&wire::parse(bytes)?)
}

pub fn encode_fqname(_options: &Options, fqname: &FQName) -> Result<Vec<u8>, CodecError> {
    wire::render(&fqname_to_json(fqname))
}

pub fn decode_fqname(_options: &Options, bytes: &[u8]) -> Result<FQName, CodecError> {
    fqname_from_json(&wire::parse(bytes)?)
}

pub fn encode_qname(_options: &Options, qname: &QName) -> Result<Vec<u8>, CodecError> {
    wire::render(&qname_to_json(qname))
}

pub fn decode_qname(_options: &Options, bytes: &[u8]) -> Result<QName, CodecError> {
    qname_from_json(&wire::parse(bytes)?)
}
