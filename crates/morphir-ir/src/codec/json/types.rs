//! Type expressions on the wire.
//!
//! | variant          | shape                                   |
//! |------------------|-----------------------------------------|
//! | Variable         | `[tag, attrs, name]`                    |
//! | Reference        | `[tag, attrs, fqName, [type, ...]]`     |
//! | Tuple            | `[tag, attrs, [type, ...]]`             |
//! | Record           | `[tag, attrs, [field, ...]]`            |
//! | ExtensibleRecord | `[tag, attrs, name, [field, ...]]`      |
//! | Function         | `[tag, attrs, argument, result]`        |
//! | Unit             | `[tag, attrs]`                          |
//!
//! A field is `[name, tpe]` in V1 and `{"name": .., "tpe": ..}` in V2/V3.

use super::attrs::{AttrDecoder, AttrEncoder};
use super::naming::{fqname_from_json, fqname_to_json, name_from_json, name_to_json};
use super::tags::{TypeTag, WireTag};
use super::{FormatVersion, Options, wire};
use crate::error::{CodecError, ResultExt};
use crate::ir::types::{Field, Type};
use serde_json::{Map, Value, json};
use tracing::debug;

fn tag_of<A>(tpe: &Type<A>) -> TypeTag {
    match tpe {
        Type::Variable(..) => TypeTag::Variable,
        Type::Reference(..) => TypeTag::Reference,
        Type::Tuple(..) => TypeTag::Tuple,
        Type::Record(..) => TypeTag::Record,
        Type::ExtensibleRecord(..) => TypeTag::ExtensibleRecord,
        Type::Function(..) => TypeTag::Function,
        Type::Unit(..) => TypeTag::Unit,
    }
}

fn arity(tag: TypeTag) -> usize {
    match tag {
        TypeTag::Unit => 2,
        TypeTag::Variable | TypeTag::Tuple | TypeTag::Record => 3,
        TypeTag::Reference | TypeTag::ExtensibleRecord | TypeTag::Function => 4,
    }
}

pub fn type_to_json<A, E>(
    options: &Options,
    encode_attrs: &E,
    tpe: &Type<A>,
) -> Result<Value, CodecError>
where
    E: AttrEncoder<A> + ?Sized,
{
    let recurse = |t: &Type<A>| type_to_json(options, encode_attrs, t);
    let tag = tag_of(tpe);
    let mut items = vec![
        Value::String(tag.tag(options.format_version).to_string()),
        encode_attrs.encode_attrs(tpe.attributes())?,
    ];

    match tpe {
        Type::Variable(_, name) => items.push(name_to_json(name)),
        Type::Reference(_, fqname, params) => {
            items.push(fqname_to_json(fqname));
            items.push(wire::encode_list(params, recurse)?);
        }
        Type::Tuple(_, elements) => items.push(wire::encode_list(elements, recurse)?),
        Type::Record(_, fields) => items.push(fields_to_json(options, encode_attrs, fields)?),
        Type::ExtensibleRecord(_, variable, fields) => {
            items.push(name_to_json(variable));
            items.push(fields_to_json(options, encode_attrs, fields)?);
        }
        Type::Function(_, argument, result) => {
            items.push(recurse(argument)?);
            items.push(recurse(result)?);
        }
        Type::Unit(_) => {}
    }
    Ok(Value::Array(items))
}

pub fn type_from_json<A, D>(
    options: &Options,
    decode_attrs: &D,
    value: &Value,
) -> Result<Type<A>, CodecError>
where
    D: AttrDecoder<A> + ?Sized,
{
    let (tag, items) = wire::node(value, "Type")?;
    let tag = TypeTag::parse(options.format_version, tag)?;
    wire::arity(tag.pascal(), items, arity(tag))?;

    decode_node(options, decode_attrs, tag, items).context(|| format!("decode {}", tag.pascal()))
}

fn decode_node<A, D>(
    options: &Options,
    decode_attrs: &D,
    tag: TypeTag,
    items: &[Value],
) -> Result<Type<A>, CodecError>
where
    D: AttrDecoder<A> + ?Sized,
{
    let recurse = |v: &Value| type_from_json(options, decode_attrs, v);
    let attrs = decode_attrs.decode_attrs(&items[1])?;

    Ok(match tag {
        TypeTag::Variable => Type::Variable(attrs, name_from_json(&items[2])?),
        TypeTag::Reference => Type::Reference(
            attrs,
            fqname_from_json(&items[2])?,
            wire::list(&items[3], "type parameters", recurse)?,
        ),
        TypeTag::Tuple => Type::Tuple(attrs, wire::list(&items[2], "tuple elements", recurse)?),
        TypeTag::Record => Type::Record(attrs, fields_from_json(options, decode_attrs, &items[2])?),
        TypeTag::ExtensibleRecord => Type::ExtensibleRecord(
            attrs,
            name_from_json(&items[2])?,
            fields_from_json(options, decode_attrs, &items[3])?,
        ),
        TypeTag::Function => Type::Function(
            attrs,
            Box::new(recurse(&items[2])?),
            Box::new(recurse(&items[3])?),
        ),
        TypeTag::Unit => Type::Unit(attrs),
    })
}

fn fields_to_json<A, E>(
    options: &Options,
    encode_attrs: &E,
    fields: &[Field<A>],
) -> Result<Value, CodecError>
where
    E: AttrEncoder<A> + ?Sized,
{
    wire::encode_list(fields, |field| {
        let name = name_to_json(&field.name);
        let tpe = type_to_json(options, encode_attrs, &field.tpe)?;
        Ok(match options.format_version {
            FormatVersion::V1 => json!([name, tpe]),
            FormatVersion::V2 | FormatVersion::V3 => json!({ "name": name, "tpe": tpe }),
        })
    })
}

fn fields_from_json<A, D>(
    options: &Options,
    decode_attrs: &D,
    value: &Value,
) -> Result<Vec<Field<A>>, CodecError>
where
    D: AttrDecoder<A> + ?Sized,
{
    wire::list(value, "record fields", |item| {
        let (name, tpe) = match options.format_version {
            FormatVersion::V1 => {
                let pair = wire::tuple(item, "Field", 2)?;
                (&pair[0], &pair[1])
            }
            FormatVersion::V2 | FormatVersion::V3 => {
                let map: &Map<String, Value> = wire::object(item, "Field")?;
                (wire::field(map, "Field", "name")?, wire::field(map, "Field", "tpe")?)
            }
        };
        Ok(Field {
            name: name_from_json(name)?,
            tpe: type_from_json(options, decode_attrs, tpe)?,
        })
    })
}

pub fn encode_type<A, E>(
    options: &Options,
    encode_attrs: &E,
    tpe: &Type<A>,
) -> Result<Vec<u8>, CodecError>
where
    E: AttrEncoder<A> + ?Sized,
{
    debug!(version = %options.format_version, kind = tpe.kind(), "encode Type");
    wire::render(&type_to_json(options, encode_attrs, tpe)?)
}

pub fn decode_type<A, D>(
    options: &Options,
    decode_attrs: &D,
    bytes: &[u8],
) -> Result<Type<A>, CodecError>
where
    D: AttrDecoder<A> + ?Sized,
{
    debug!(version = %options.format_version, len = bytes.len(), "decode Type");
    let tpe = type_from_json(options, decode_attrs, &wire::parse(bytes)?)?;
    debug!(kind = tpe.kind(), "decoded Type");
    Ok(tpe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::json::attrs::{decode_unit, encode_unit};
    use crate::naming::{FQName, Name};

    fn int_type() -> Type<()> {
        Type::reference((), FQName::fqn("Morphir.SDK", "Basics", "Int"), vec![])
    }

    #[test]
    fn test_record_v1_shape() {
        let record = Type::Record((), vec![Field::new("age", int_type())]);
        let encoded = type_to_json(&Options::v1(), &encode_unit, &record).unwrap();
        assert_eq!(encoded[0], json!("record"));
        assert_eq!(encoded[2][0][0], json!(["age"]));
        assert!(encoded[2][0].is_array());
    }

    #[test]
    fn test_record_v3_shape() {
        let record = Type::Record((), vec![Field::new("age", int_type())]);
        let encoded = type_to_json(&Options::v3(), &encode_unit, &record).unwrap();
        assert_eq!(encoded[0], json!("Record"));
        assert_eq!(encoded[2][0]["name"], json!(["age"]));
        assert_eq!(encoded[2][0]["tpe"][0], json!("Reference"));
    }

    #[test]
    fn test_field_missing_tpe() {
        let value = json!(["Record", {}, [{"name": ["age"]}]]);
        let err = type_from_json(&Options::v2(), &decode_unit, &value).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            CodecError::MissingField { entity: "Field", field: "tpe" }
        ));
    }

    #[test]
    fn test_function_arity() {
        let value = json!(["Function", {}, ["Unit", {}]]);
        let err = type_from_json(&Options::v3(), &decode_unit, &value).unwrap_err();
        assert_eq!(err.to_string(), "codec/json: Function expects 4 elements, got 3");
    }

    #[test]
    fn test_nested_error_has_context() {
        let value = json!(["Tuple", {}, [["Unit", {}], ["Bogus", {}]]]);
        let err = type_from_json(&Options::v3(), &decode_unit, &value).unwrap_err();
        assert_eq!(
            err.to_string(),
            "decode Tuple: tuple elements element 1: codec/json: unknown v3 Type tag \"Bogus\""
        );
    }

    #[test]
    fn test_extensible_record_round_trip() {
        let tpe = Type::ExtensibleRecord(
            (),
            Name::from("r"),
            vec![Field::new("id", Type::variable((), "a"))],
        );
        let options = Options::v1();
        let bytes = encode_type(&options, &encode_unit, &tpe).unwrap();
        assert_eq!(decode_type(&options, &decode_unit, &bytes).unwrap(), tpe);
    }
}
