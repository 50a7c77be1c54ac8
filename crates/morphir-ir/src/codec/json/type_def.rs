//! Type specifications, type definitions and constructor tables.
//!
//! Constructors are `[[ctorName, [[argName, argType], ...]], ...]` in every
//! version. Specifications and definitions are `[tag, typeParams, ...]`:
//!
//! - TypeAliasSpecification / TypeAliasDefinition: `[tag, params, type]`
//! - OpaqueTypeSpecification: `[tag, params]`
//! - CustomTypeSpecification: `[tag, params, constructors]`
//! - DerivedTypeSpecification: `[tag, params, {"baseType", "fromBaseType", "toBaseType"}]`
//! - CustomTypeDefinition: `[tag, params, accessControlled(constructors)]`

use super::attrs::{AttrDecoder, AttrEncoder};
use super::naming::{
    fqname_from_json, fqname_to_json, name_from_json, name_to_json, names_from_json, names_to_json,
};
use super::tags::{TypeDefinitionTag, TypeSpecificationTag, WireTag};
use super::types::{type_from_json, type_to_json};
use super::wrappers::{access_controlled_from_json, access_controlled_to_json};
use super::{Options, wire};
use crate::error::{CodecError, ResultExt};
use crate::ir::type_def::{
    Constructor, DerivedTypeSpecificationDetails, TypeConstructors, TypeDefinition,
    TypeSpecification,
};
use serde_json::{Value as Json, json};
use tracing::debug;

pub fn type_constructors_to_json<A, E>(
    options: &Options,
    encode_attrs: &E,
    constructors: &[Constructor<A>],
) -> Result<Json, CodecError>
where
    E: AttrEncoder<A> + ?Sized,
{
    wire::encode_list(constructors, |ctor| {
        let args = wire::encode_list(&ctor.args, |(name, tpe)| {
            Ok(json!([name_to_json(name), type_to_json(options, encode_attrs, tpe)?]))
        })?;
        Ok(json!([name_to_json(&ctor.name), args]))
    })
}

pub fn type_constructors_from_json<A, D>(
    options: &Options,
    decode_attrs: &D,
    json: &Json,
) -> Result<TypeConstructors<A>, CodecError>
where
    D: AttrDecoder<A> + ?Sized,
{
    wire::list(json, "constructors", |entry| {
        let pair = wire::tuple(entry, "constructor", 2)?;
        let name = name_from_json(&pair[0])?;
        let args = wire::list(&pair[1], "constructor arguments", |arg| {
            let arg = wire::tuple(arg, "constructor argument", 2)?;
            Ok((name_from_json(&arg[0])?, type_from_json(options, decode_attrs, &arg[1])?))
        })
        .context(|| format!("decode constructor {name}"))?;
        Ok(Constructor { name, args })
    })
}

pub fn type_specification_to_json<A, E>(
    options: &Options,
    encode_attrs: &E,
    specification: &TypeSpecification<A>,
) -> Result<Json, CodecError>
where
    E: AttrEncoder<A> + ?Sized,
{
    let (tag, payload) = match specification {
        TypeSpecification::TypeAliasSpecification { type_expr, .. } => (
            TypeSpecificationTag::TypeAlias,
            Some(type_to_json(options, encode_attrs, type_expr)?),
        ),
        TypeSpecification::OpaqueTypeSpecification { .. } => (TypeSpecificationTag::Opaque, None),
        TypeSpecification::CustomTypeSpecification { constructors, .. } => (
            TypeSpecificationTag::Custom,
            Some(type_constructors_to_json(options, encode_attrs, constructors)?),
        ),
        TypeSpecification::DerivedTypeSpecification { details, .. } => (
            TypeSpecificationTag::Derived,
            Some(json!({
                "baseType": type_to_json(options, encode_attrs, &details.base_type)?,
                "fromBaseType": fqname_to_json(&details.from_base_type),
                "toBaseType": fqname_to_json(&details.to_base_type),
            })),
        ),
    };

    let mut items = vec![
        Json::String(tag.tag(options.format_version).to_string()),
        names_to_json(specification.type_params()),
    ];
    items.extend(payload);
    Ok(Json::Array(items))
}

pub fn type_specification_from_json<A, D>(
    options: &Options,
    decode_attrs: &D,
    json: &Json,
) -> Result<TypeSpecification<A>, CodecError>
where
    D: AttrDecoder<A> + ?Sized,
{
    let items = wire::array(json, "TypeSpecification")?;
    let tag = match items.first() {
        Some(tag) => wire::string(tag, "TypeSpecification tag")?,
        None => {
            return Err(CodecError::Header {
                node: "TypeSpecification",
                found: 0,
            });
        }
    };
    let tag = TypeSpecificationTag::parse(options.format_version, tag)?;
    let expected = match tag {
        TypeSpecificationTag::Opaque => 2,
        _ => 3,
    };
    wire::arity(tag.pascal(), items, expected)?;

    let decode = || -> Result<TypeSpecification<A>, CodecError> {
        let type_params = names_from_json(&items[1])?;
        Ok(match tag {
            TypeSpecificationTag::TypeAlias => TypeSpecification::TypeAliasSpecification {
                type_params,
                type_expr: type_from_json(options, decode_attrs, &items[2])?,
            },
            TypeSpecificationTag::Opaque => {
                TypeSpecification::OpaqueTypeSpecification { type_params }
            }
            TypeSpecificationTag::Custom => TypeSpecification::CustomTypeSpecification {
                type_params,
                constructors: type_constructors_from_json(options, decode_attrs, &items[2])?,
            },
            TypeSpecificationTag::Derived => TypeSpecification::DerivedTypeSpecification {
                type_params,
                details: derived_details_from_json(options, decode_attrs, &items[2])?,
            },
        })
    };
    decode().context(|| format!("decode {}", tag.pascal()))
}

fn derived_details_from_json<A, D>(
    options: &Options,
    decode_attrs: &D,
    json: &Json,
) -> Result<DerivedTypeSpecificationDetails<A>, CodecError>
where
    D: AttrDecoder<A> + ?Sized,
{
    const ENTITY: &str = "DerivedTypeSpecificationDetails";
    let map = wire::object(json, ENTITY)?;
    Ok(DerivedTypeSpecificationDetails {
        base_type: type_from_json(options, decode_attrs, wire::field(map, ENTITY, "baseType")?)?,
        from_base_type: fqname_from_json(wire::field(map, ENTITY, "fromBaseType")?)?,
        to_base_type: fqname_from_json(wire::field(map, ENTITY, "toBaseType")?)?,
    })
}

pub fn type_definition_to_json<A, E>(
    options: &Options,
    encode_attrs: &E,
    definition: &TypeDefinition<A>,
) -> Result<Json, CodecError>
where
    E: AttrEncoder<A> + ?Sized,
{
    let (tag, payload) = match definition {
        TypeDefinition::TypeAliasDefinition { type_expr, .. } => (
            TypeDefinitionTag::TypeAlias,
            type_to_json(options, encode_attrs, type_expr)?,
        ),
        TypeDefinition::CustomTypeDefinition { constructors, .. } => (
            TypeDefinitionTag::Custom,
            access_controlled_to_json(
                options,
                |ctors: &TypeConstructors<A>| {
                    type_constructors_to_json(options, encode_attrs, ctors)
                },
                constructors,
            )?,
        ),
    };
    Ok(json!([
        tag.tag(options.format_version),
        names_to_json(definition.type_params()),
        payload
    ]))
}

pub fn type_definition_from_json<A, D>(
    options: &Options,
    decode_attrs: &D,
    json: &Json,
) -> Result<TypeDefinition<A>, CodecError>
where
    D: AttrDecoder<A> + ?Sized,
{
    let items = wire::array(json, "TypeDefinition")?;
    let tag = match items.first() {
        Some(tag) => wire::string(tag, "TypeDefinition tag")?,
        None => {
            return Err(CodecError::Header {
                node: "TypeDefinition",
                found: 0,
            });
        }
    };
    let tag = TypeDefinitionTag::parse(options.format_version, tag)?;
    wire::arity(tag.pascal(), items, 3)?;

    let decode = || -> Result<TypeDefinition<A>, CodecError> {
        let type_params = names_from_json(&items[1])?;
        Ok(match tag {
            TypeDefinitionTag::TypeAlias => TypeDefinition::TypeAliasDefinition {
                type_params,
                type_expr: type_from_json(options, decode_attrs, &items[2])?,
            },
            TypeDefinitionTag::Custom => TypeDefinition::CustomTypeDefinition {
                type_params,
                constructors: access_controlled_from_json(
                    options,
                    |j: &Json| type_constructors_from_json(options, decode_attrs, j),
                    &items[2],
                )?,
            },
        })
    };
    decode().context(|| format!("decode {}", tag.pascal()))
}

pub fn encode_type_constructors<A, E>(
    options: &Options,
    encode_attrs: &E,
    constructors: &[Constructor<A>],
) -> Result<Vec<u8>, CodecError>
where
    E: AttrEncoder<A> + ?Sized,
{
    wire::render(&type_constructors_to_json(options, encode_attrs, constructors)?)
}

pub fn decode_type_constructors<A, D>(
    options: &Options,
    decode_attrs: &D,
    bytes: &[u8],
) -> Result<TypeConstructors<A>, CodecError>
where
    D: AttrDecoder<A> + ?Sized,
{
    type_constructors_from_json(options, decode_attrs, &wire::parse(bytes)?)
}

pub fn encode_type_specification<A, E>(
    options: &Options,
    encode_attrs: &E,
    specification: &TypeSpecification<A>,
) -> Result<Vec<u8>, CodecError>
where
    E: AttrEncoder<A> + ?Sized,
{
    debug!(
        version = %options.format_version,
        kind = specification.kind(),
        "encode TypeSpecification"
    );
    wire::render(&type_specification_to_json(options, encode_attrs, specification)?)
}

pub fn decode_type_specification<A, D>(
    options: &Options,
    decode_attrs: &D,
    bytes: &[u8],
) -> Result<TypeSpecification<A>, CodecError>
where
    D: AttrDecoder<A> + ?Sized,
{
    debug!(version = %options.format_version, len = bytes.len(), "decode TypeSpecification");
    type_specification_from_json(options, decode_attrs, &wire::parse(bytes)?)
}

pub fn encode_type_definition<A, E>(
    options: &Options,
    encode_attrs: &E,
    definition: &TypeDefinition<A>,
) -> Result<Vec<u8>, CodecError>
where
    E: AttrEncoder<A> + ?Sized,
{
    debug!(version = %options.format_version, kind = definition.kind(), "encode TypeDefinition");
    wire::render(&type_definition_to_json(options, encode_attrs, definition)?)
}

pub fn decode_type_definition<A, D>(
    options: &Options,
    decode_attrs: &D,
    bytes: &[u8],
) -> Result<TypeDefinition<A>, CodecError>
where
    D: AttrDecoder<A> + ?Sized,
{
    debug!(version = %options.format_version, len = bytes.len(), "decode TypeDefinition");
    type_definition_from_json(options, decode_attrs, &wire::parse(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::json::attrs::{decode_unit, encode_unit};
    use crate::ir::access::AccessControlled;
    use crate::ir::types::Type;
    use crate::naming::{FQName, Name};

    fn maybe_constructors() -> TypeConstructors<()> {
        vec![
            Constructor::new("Just", vec![(Name::from("value"), Type::variable((), "a"))]),
            Constructor::constant("Nothing"),
        ]
    }

    #[test]
    fn test_constructors_shape() {
        let encoded =
            type_constructors_to_json(&Options::v3(), &encode_unit, &maybe_constructors())
                .unwrap();
        assert_eq!(
            encoded,
            json!([
                [["just"], [[["value"], ["Variable", {}, ["a"]]]]],
                [["nothing"], []]
            ])
        );
    }

    #[test]
    fn test_opaque_specification_v1() {
        let spec: TypeSpecification<()> = TypeSpecification::opaque(vec![Name::from("a")]);
        let encoded = type_specification_to_json(&Options::v1(), &encode_unit, &spec).unwrap();
        assert_eq!(encoded, json!(["opaque_type_specification", [["a"]]]));
        assert_eq!(
            type_specification_from_json(&Options::v1(), &decode_unit, &encoded).unwrap(),
            spec
        );
    }

    #[test]
    fn test_derived_specification_round_trip() {
        let spec: TypeSpecification<()> = TypeSpecification::DerivedTypeSpecification {
            type_params: vec![],
            details: DerivedTypeSpecificationDetails {
                base_type: Type::reference(
                    (),
                    FQName::fqn("Morphir.SDK", "String", "String"),
                    vec![],
                ),
                from_base_type: FQName::fqn("My.Pkg", "Email", "fromString"),
                to_base_type: FQName::fqn("My.Pkg", "Email", "toString"),
            },
        };
        let options = Options::v2();
        let bytes = encode_type_specification(&options, &encode_unit, &spec).unwrap();
        assert_eq!(decode_type_specification(&options, &decode_unit, &bytes).unwrap(), spec);

        let encoded = type_specification_to_json(&Options::v1(), &encode_unit, &spec).unwrap();
        assert_eq!(encoded[0], json!("derived_type_specification"));
        assert!(encoded[2].get("fromBaseType").is_some());
    }

    #[test]
    fn test_derived_specification_v1_rejects_pascal_tag() {
        let spec: TypeSpecification<()> = TypeSpecification::DerivedTypeSpecification {
            type_params: vec![],
            details: DerivedTypeSpecificationDetails {
                base_type: Type::Unit(()),
                from_base_type: FQName::fqn("My.Pkg", "Email", "fromString"),
                to_base_type: FQName::fqn("My.Pkg", "Email", "toString"),
            },
        };
        let mut encoded = type_specification_to_json(&Options::v1(), &encode_unit, &spec).unwrap();
        encoded[0] = json!("DerivedTypeSpecification");

        let err = type_specification_from_json::<(), _>(&Options::v1(), &decode_unit, &encoded)
            .unwrap_err();
        assert!(
            matches!(
                &err,
                CodecError::UnknownTag { tag, .. } if tag == "DerivedTypeSpecification"
            ),
            "{err}"
        );
    }

    #[test]
    fn test_custom_definition_v1_shape() {
        let def = TypeDefinition::custom_type(
            vec![Name::from("a")],
            AccessControlled::private(maybe_constructors()),
        );
        let encoded = type_definition_to_json(&Options::v1(), &encode_unit, &def).unwrap();
        assert_eq!(encoded[0], json!("custom_type_definition"));
        assert_eq!(encoded[2][0], json!("private"));
        assert_eq!(
            type_definition_from_json(&Options::v1(), &decode_unit, &encoded).unwrap(),
            def
        );
    }

    #[test]
    fn test_type_definition_arity() {
        let value = json!(["TypeAliasDefinition", []]);
        let err = type_definition_from_json::<(), _>(&Options::v3(), &decode_unit, &value)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "codec/json: TypeAliasDefinition expects 3 elements, got 2"
        );
    }
}
