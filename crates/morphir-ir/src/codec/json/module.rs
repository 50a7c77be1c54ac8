//! Module specifications and definitions.
//!
//! Both are objects with `"types"` and `"values"` lists of `[name, entry]`
//! pairs and a `"doc"` that is a string or `null`.
//! Specification entries are `Documented` payloads; definition entries are
//! `AccessControlled<Documented<..>>`.

use super::attrs::{AttrDecoder, AttrEncoder};
use super::naming::{name_from_json, name_to_json};
use super::type_def::{
    type_definition_from_json, type_definition_to_json, type_specification_from_json,
    type_specification_to_json,
};
use super::value::{
    value_definition_from_json, value_definition_to_json, value_specification_from_json,
    value_specification_to_json,
};
use super::wrappers::{
    access_controlled_from_json, access_controlled_to_json, documented_from_json,
    documented_to_json,
};
use super::{Options, wire};
use crate::error::{CodecError, ResultExt};
use crate::ir::module::{ModuleDefinition, ModuleSpecification};
use crate::naming::Name;
use serde_json::{Map, Value as Json, json};
use tracing::{debug, trace};

fn entries_to_json<T, F>(entries: &[(Name, T)], mut encode: F) -> Result<Json, CodecError>
where
    F: FnMut(&T) -> Result<Json, CodecError>,
{
    wire::encode_list(entries, |(name, entry)| {
        let encoded = encode(entry).context(|| format!("encode {name}"))?;
        Ok(json!([name_to_json(name), encoded]))
    })
}

fn entries_from_json<T, F>(
    json: &Json,
    expected: &'static str,
    mut decode: F,
) -> Result<Vec<(Name, T)>, CodecError>
where
    F: FnMut(&Json) -> Result<T, CodecError>,
{
    wire::list(json, expected, |item| {
        let pair = wire::tuple(item, expected, 2)?;
        let name = name_from_json(&pair[0])?;
        trace!(entry = %name, expected, "decode module entry");
        let entry = decode(&pair[1]).context(|| format!("decode {name}"))?;
        Ok((name, entry))
    })
}

fn doc_to_json(doc: &Option<String>) -> Json {
    doc.as_ref().map_or(Json::Null, |d| Json::String(d.clone()))
}

fn module_fields<'v>(
    json: &'v Json,
    entity: &'static str,
) -> Result<(&'v Json, &'v Json, Option<String>), CodecError> {
    let map: &Map<String, Json> = wire::object(json, entity)?;
    let types = wire::field(map, entity, "types")?;
    let values = wire::field(map, entity, "values")?;
    let doc = wire::optional_string(map.get("doc"), "module doc")?;
    Ok((types, values, doc))
}

pub fn module_specification_to_json<TA, ET>(
    options: &Options,
    encode_ta: &ET,
    specification: &ModuleSpecification<TA>,
) -> Result<Json, CodecError>
where
    ET: AttrEncoder<TA> + ?Sized,
{
    let types = entries_to_json(&specification.types, |documented| {
        documented_to_json(|spec| type_specification_to_json(options, encode_ta, spec), documented)
    })?;
    let values = entries_to_json(&specification.values, |documented| {
        documented_to_json(|spec| value_specification_to_json(options, encode_ta, spec), documented)
    })?;
    Ok(json!({
        "types": types,
        "values": values,
        "doc": doc_to_json(&specification.doc),
    }))
}

pub fn module_specification_from_json<TA, DT>(
    options: &Options,
    decode_ta: &DT,
    json: &Json,
) -> Result<ModuleSpecification<TA>, CodecError>
where
    DT: AttrDecoder<TA> + ?Sized,
{
    let (types, values, doc) = module_fields(json, "ModuleSpecification")?;
    let types = entries_from_json(types, "type specifications", |entry| {
        documented_from_json(|j| type_specification_from_json(options, decode_ta, j), entry)
    })?;
    let values = entries_from_json(values, "value specifications", |entry| {
        documented_from_json(|j| value_specification_from_json(options, decode_ta, j), entry)
    })?;
    Ok(ModuleSpecification::new(types, values, doc))
}

pub fn module_definition_to_json<TA, VA, ET, EV>(
    options: &Options,
    encode_ta: &ET,
    encode_va: &EV,
    definition: &ModuleDefinition<TA, VA>,
) -> Result<Json, CodecError>
where
    ET: AttrEncoder<TA> + ?Sized,
    EV: AttrEncoder<VA> + ?Sized,
{
    let types = entries_to_json(&definition.types, |entry| {
        access_controlled_to_json(
            options,
            |documented| {
                documented_to_json(
                    |def| type_definition_to_json(options, encode_ta, def),
                    documented,
                )
            },
            entry,
        )
    })?;
    let values = entries_to_json(&definition.values, |entry| {
        access_controlled_to_json(
            options,
            |documented| {
                documented_to_json(
                    |def| value_definition_to_json(options, encode_ta, encode_va, def),
                    documented,
                )
            },
            entry,
        )
    })?;
    Ok(json!({
        "types": types,
        "values": values,
        "doc": doc_to_json(&definition.doc),
    }))
}

pub fn module_definition_from_json<TA, VA, DT, DV>(
    options: &Options,
    decode_ta: &DT,
    decode_va: &DV,
    json: &Json,
) -> Result<ModuleDefinition<TA, VA>, CodecError>
where
    DT: AttrDecoder<TA> + ?Sized,
    DV: AttrDecoder<VA> + ?Sized,
{
    let (types, values, doc) = module_fields(json, "ModuleDefinition")?;
    let types = entries_from_json(types, "type definitions", |entry| {
        access_controlled_from_json(
            options,
            |j| documented_from_json(|j| type_definition_from_json(options, decode_ta, j), j),
            entry,
        )
    })?;
    let values = entries_from_json(values, "value definitions", |entry| {
        access_controlled_from_json(
            options,
            |j| {
                documented_from_json(
                    |j| value_definition_from_json(options, decode_ta, decode_va, j),
                    j,
                )
            },
            entry,
        )
    })?;
    Ok(ModuleDefinition::new(types, values, doc))
}

pub fn encode_module_specification<TA, ET>(
    options: &Options,
    encode_ta: &ET,
    specification: &ModuleSpecification<TA>,
) -> Result<Vec<u8>, CodecError>
where
    ET: AttrEncoder<TA> + ?Sized,
{
    debug!(
        version = %options.format_version,
        types = specification.types.len(),
        values = specification.values.len(),
        "encode ModuleSpecification"
    );
    wire::render(&module_specification_to_json(options, encode_ta, specification)?)
}

pub fn decode_module_specification<TA, DT>(
    options: &Options,
    decode_ta: &DT,
    bytes: &[u8],
) -> Result<ModuleSpecification<TA>, CodecError>
where
    DT: AttrDecoder<TA> + ?Sized,
{
    debug!(version = %options.format_version, len = bytes.len(), "decode ModuleSpecification");
    module_specification_from_json(options, decode_ta, &wire::parse(bytes)?)
}

pub fn encode_module_definition<TA, VA, ET, EV>(
    options: &Options,
    encode_ta: &ET,
    encode_va: &EV,
    definition: &ModuleDefinition<TA, VA>,
) -> Result<Vec<u8>, CodecError>
where
    ET: AttrEncoder<TA> + ?Sized,
    EV: AttrEncoder<VA> + ?Sized,
{
    debug!(
        version = %options.format_version,
        types = definition.types.len(),
        values = definition.values.len(),
        "encode ModuleDefinition"
    );
    wire::render(&module_definition_to_json(options, encode_ta, encode_va, definition)?)
}

pub fn decode_module_definition<TA, VA, DT, DV>(
    options: &Options,
    decode_ta: &DT,
    decode_va: &DV,
    bytes: &[u8],
) -> Result<ModuleDefinition<TA, VA>, CodecError>
where
    DT: AttrDecoder<TA> + ?Sized,
    DV: AttrDecoder<VA> + ?Sized,
{
    debug!(version = %options.format_version, len = bytes.len(), "decode ModuleDefinition");
    module_definition_from_json(options, decode_ta, decode_va, &wire::parse(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::json::attrs::{decode_unit, encode_unit};
    use crate::ir::access::AccessControlled;
    use crate::ir::documented::Documented;
    use crate::ir::type_def::TypeSpecification;
    use crate::ir::types::Type;
    use crate::ir::value::{Value, ValueDefinition};

    #[test]
    fn test_empty_specification_shape() {
        let spec: ModuleSpecification<()> = ModuleSpecification::default();
        let encoded = module_specification_to_json(&Options::v3(), &encode_unit, &spec).unwrap();
        assert_eq!(encoded, json!({"types": [], "values": [], "doc": null}));
    }

    #[test]
    fn test_specification_doc_optional() {
        let decoded: ModuleSpecification<()> = module_specification_from_json(
            &Options::v3(),
            &decode_unit,
            &json!({"types": [], "values": []}),
        )
        .unwrap();
        assert_eq!(decoded.doc, None);

        let err = module_specification_from_json::<(), _>(
            &Options::v3(),
            &decode_unit,
            &json!({"types": []}),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CodecError::MissingField { entity: "ModuleSpecification", field: "values" }
        ));
    }

    #[test]
    fn test_specification_round_trip() {
        let spec = ModuleSpecification::new(
            vec![(
                Name::from("id"),
                Documented::new(
                    "Identifier",
                    TypeSpecification::type_alias(vec![], Type::Unit(())),
                ),
            )],
            vec![],
            Some("Ids".to_string()),
        );
        let options = Options::v1();
        let bytes = encode_module_specification(&options, &encode_unit, &spec).unwrap();
        assert_eq!(decode_module_specification(&options, &decode_unit, &bytes).unwrap(), spec);
    }

    #[test]
    fn test_definition_entry_shape() {
        let definition: ModuleDefinition<(), ()> = ModuleDefinition::new(
            vec![],
            vec![(
                Name::from("unit"),
                AccessControlled::public(Documented::undocumented(ValueDefinition::new(
                    vec![],
                    Type::Unit(()),
                    Value::Unit(()),
                ))),
            )],
            None,
        );
        let encoded =
            module_definition_to_json(&Options::v2(), &encode_unit, &encode_unit, &definition)
                .unwrap();
        let entry = &encoded["values"][0];
        assert_eq!(entry[0], json!(["unit"]));
        assert_eq!(entry[1]["access"], json!("Public"));
        assert_eq!(entry[1]["value"]["doc"], json!(""));
        assert_eq!(entry[1]["value"]["value"]["body"], json!(["Unit", {}]));

        let decoded =
            module_definition_from_json(&Options::v2(), &decode_unit, &decode_unit, &encoded)
                .unwrap();
        assert_eq!(decoded, definition);
    }

    #[test]
    fn test_entry_error_names_entry() {
        let value = json!({
            "types": [[["bad"], {"doc": "", "value": ["Bogus", []]}]],
            "values": []
        });
        let err = module_specification_from_json::<(), _>(&Options::v3(), &decode_unit, &value)
            .unwrap_err();
        assert!(err.to_string().starts_with("type specifications element 0: decode bad: "));
    }
}
