//! `AccessControlled` and `Documented` wrappers.
//!
//! Both take a codec for their payload, so the same functions serve module
//! entries, constructor tables and whole modules.

use super::tags::{AccessTag, WireTag};
use super::{FormatVersion, Options, wire};
use crate::error::{CodecError, ResultExt};
use crate::ir::access::{Access, AccessControlled};
use crate::ir::documented::Documented;
use serde_json::{Value as Json, json};

/// V1: `["public" | "private", value]`.
/// V2/V3: `{"access": "Public" | "Private", "value": value}`.
pub fn access_controlled_to_json<T, F>(
    options: &Options,
    encode_value: F,
    access_controlled: &AccessControlled<T>,
) -> Result<Json, CodecError>
where
    F: FnOnce(&T) -> Result<Json, CodecError>,
{
    let tag = match access_controlled.access() {
        Access::Public => AccessTag::Public,
        Access::Private => AccessTag::Private,
    }
    .tag(options.format_version);
    let value = encode_value(access_controlled.value())?;

    Ok(match options.format_version {
        FormatVersion::V1 => json!([tag, value]),
        FormatVersion::V2 | FormatVersion::V3 => json!({ "access": tag, "value": value }),
    })
}

pub fn access_controlled_from_json<T, F>(
    options: &Options,
    decode_value: F,
    json: &Json,
) -> Result<AccessControlled<T>, CodecError>
where
    F: FnOnce(&Json) -> Result<T, CodecError>,
{
    const ENTITY: &str = "AccessControlled";
    let (tag, value) = match options.format_version {
        FormatVersion::V1 => {
            let pair = wire::tuple(json, ENTITY, 2)?;
            (wire::string(&pair[0], "access tag")?, &pair[1])
        }
        FormatVersion::V2 | FormatVersion::V3 => {
            let map = wire::object(json, ENTITY)?;
            (
                wire::string(wire::field(map, ENTITY, "access")?, "access tag")?,
                wire::field(map, ENTITY, "value")?,
            )
        }
    };
    let access = match AccessTag::parse(options.format_version, tag)? {
        AccessTag::Public => Access::Public,
        AccessTag::Private => Access::Private,
    };
    let value = decode_value(value).context(|| format!("decode {access} value"))?;
    Ok(AccessControlled::new(access, value))
}

/// `{"doc": string, "value": value}` in every version.
pub fn documented_to_json<T, F>(
    encode_value: F,
    documented: &Documented<T>,
) -> Result<Json, CodecError>
where
    F: FnOnce(&T) -> Result<Json, CodecError>,
{
    Ok(json!({
        "doc": documented.doc,
        "value": encode_value(&documented.value)?,
    }))
}

pub fn documented_from_json<T, F>(decode_value: F, json: &Json) -> Result<Documented<T>, CodecError>
where
    F: FnOnce(&Json) -> Result<T, CodecError>,
{
    const ENTITY: &str = "Documented";
    let map = wire::object(json, ENTITY)?;
    let doc = wire::string(wire::field(map, ENTITY, "doc")?, "doc")?;
    let value = decode_value(wire::field(map, ENTITY, "value")?)?;
    Ok(Documented::new(doc, value))
}

pub fn encode_access_controlled<T, F>(
    options: &Options,
    encode_value: F,
    access_controlled: &AccessControlled<T>,
) -> Result<Vec<u8>, CodecError>
where
    F: FnOnce(&T) -> Result<Json, CodecError>,
{
    wire::render(&access_controlled_to_json(options, encode_value, access_controlled)?)
}

pub fn decode_access_controlled<T, F>(
    options: &Options,
    decode_value: F,
    bytes: &[u8],
) -> Result<AccessControlled<T>, CodecError>
where
    F: FnOnce(&Json) -> Result<T, CodecError>,
{
    access_controlled_from_json(options, decode_value, &wire::parse(bytes)?)
}

pub fn encode_documented<T, F>(
    _options: &Options,
    encode_value: F,
    documented: &Documented<T>,
) -> Result<Vec<u8>, CodecError>
where
    F: FnOnce(&T) -> Result<Json, CodecError>,
{
    wire::render(&documented_to_json(encode_value, documented)?)
}

pub fn decode_documented<T, F>(
    _options: &Options,
    decode_value: F,
    bytes: &[u8],
) -> Result<Documented<T>, CodecError>
where
    F: FnOnce(&Json) -> Result<T, CodecError>,
{
    documented_from_json(decode_value, &wire::parse(bytes)?)
}
