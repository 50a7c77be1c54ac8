//! Value expressions, value definitions and value specifications.
//!
//! Values are `[tag, attrs, ...]` nodes. Named entries (record fields,
//! recursive let bindings) are `[name, x]` pairs and pattern match cases are
//! `[pattern, body]` pairs. Patterns inside values carry the value
//! attributes.
//!
//! A definition is `{"inputTypes": [[name, attrs, type], ...], "outputType": type, "body": value}`
//! and a specification is `{"inputs": [[name, type], ...], "output": type}`.

use super::attrs::{AttrDecoder, AttrEncoder};
use super::literal::{literal_from_json, literal_to_json};
use super::naming::{fqname_from_json, fqname_to_json, name_from_json, name_to_json};
use super::pattern::{pattern_from_json, pattern_to_json};
use super::tags::{ValueTag, WireTag};
use super::types::{type_from_json, type_to_json};
use super::{Options, wire};
use crate::error::{CodecError, ResultExt};
use crate::ir::pattern::Pattern;
use crate::ir::value::{Value, ValueDefinition, ValueSpecification};
use crate::naming::Name;
use serde_json::{Value as Json, json};
use tracing::debug;

fn tag_of<TA, VA>(value: &Value<TA, VA>) -> ValueTag {
    match value {
        Value::Literal(..) => ValueTag::Literal,
        Value::Constructor(..) => ValueTag::Constructor,
        Value::Tuple(..) => ValueTag::Tuple,
        Value::List(..) => ValueTag::List,
        Value::Record(..) => ValueTag::Record,
        Value::Variable(..) => ValueTag::Variable,
        Value::Reference(..) => ValueTag::Reference,
        Value::Field(..) => ValueTag::Field,
        Value::FieldFunction(..) => ValueTag::FieldFunction,
        Value::Apply(..) => ValueTag::Apply,
        Value::Lambda(..) => ValueTag::Lambda,
        Value::LetDefinition(..) => ValueTag::LetDefinition,
        Value::LetRecursion(..) => ValueTag::LetRecursion,
        Value::Destructure(..) => ValueTag::Destructure,
        Value::IfThenElse(..) => ValueTag::IfThenElse,
        Value::PatternMatch(..) => ValueTag::PatternMatch,
        Value::UpdateRecord(..) => ValueTag::UpdateRecord,
        Value::Unit(_) => ValueTag::Unit,
    }
}

fn arity(tag: ValueTag) -> usize {
    match tag {
        ValueTag::Unit => 2,
        ValueTag::Literal
        | ValueTag::Constructor
        | ValueTag::Tuple
        | ValueTag::List
        | ValueTag::Record
        | ValueTag::Variable
        | ValueTag::Reference
        | ValueTag::FieldFunction => 3,
        ValueTag::Field
        | ValueTag::Apply
        | ValueTag::Lambda
        | ValueTag::LetRecursion
        | ValueTag::PatternMatch
        | ValueTag::UpdateRecord => 4,
        ValueTag::LetDefinition | ValueTag::Destructure | ValueTag::IfThenElse => 5,
    }
}

pub fn value_to_json<TA, VA, ET, EV>(
    options: &Options,
    encode_ta: &ET,
    encode_va: &EV,
    value: &Value<TA, VA>,
) -> Result<Json, CodecError>
where
    ET: AttrEncoder<TA> + ?Sized,
    EV: AttrEncoder<VA> + ?Sized,
{
    let recurse = |v: &Value<TA, VA>| value_to_json(options, encode_ta, encode_va, v);
    let named = |entries: &[(Name, Value<TA, VA>)]| {
        wire::encode_list(entries, |(name, v)| Ok(json!([name_to_json(name), recurse(v)?])))
    };
    let pattern = |p: &Pattern<VA>| pattern_to_json(options, encode_va, p);

    let mut items = vec![
        Json::String(tag_of(value).tag(options.format_version).to_string()),
        encode_va.encode_attrs(value.attributes())?,
    ];

    match value {
        Value::Literal(_, literal) => items.push(literal_to_json(options, literal)?),
        Value::Constructor(_, fqname) | Value::Reference(_, fqname) => {
            items.push(fqname_to_json(fqname))
        }
        Value::Tuple(_, elements) | Value::List(_, elements) => {
            items.push(wire::encode_list(elements, recurse)?)
        }
        Value::Record(_, fields) => items.push(named(fields.as_slice())?),
        Value::Variable(_, name) | Value::FieldFunction(_, name) => items.push(name_to_json(name)),
        Value::Field(_, subject, name) => {
            items.push(recurse(subject)?);
            items.push(name_to_json(name));
        }
        Value::Apply(_, function, argument) => {
            items.push(recurse(function)?);
            items.push(recurse(argument)?);
        }
        Value::Lambda(_, arg, body) => {
            items.push(pattern(arg)?);
            items.push(recurse(body)?);
        }
        Value::LetDefinition(_, name, definition, body) => {
            items.push(name_to_json(name));
            items.push(value_definition_to_json(options, encode_ta, encode_va, definition)?);
            items.push(recurse(body)?);
        }
        Value::LetRecursion(_, definitions, body) => {
            items.push(wire::encode_list(definitions, |(name, definition)| {
                Ok(json!([
                    name_to_json(name),
                    value_definition_to_json(options, encode_ta, encode_va, definition)?
                ]))
            })?);
            items.push(recurse(body)?);
        }
        Value::Destructure(_, bind, bound, body) => {
            items.push(pattern(bind)?);
            items.push(recurse(bound)?);
            items.push(recurse(body)?);
        }
        Value::IfThenElse(_, condition, then_branch, else_branch) => {
            items.push(recurse(condition)?);
            items.push(recurse(then_branch)?);
            items.push(recurse(else_branch)?);
        }
        Value::PatternMatch(_, subject, cases) => {
            items.push(recurse(subject)?);
            items.push(wire::encode_list(cases, |(case, body)| {
                Ok(json!([pattern(case)?, recurse(body)?]))
            })?);
        }
        Value::UpdateRecord(_, subject, updates) => {
            items.push(recurse(subject)?);
            items.push(named(updates.as_slice())?);
        }
        Value::Unit(_) => {}
    }
    Ok(Json::Array(items))
}

pub fn value_from_json<TA, VA, DT, DV>(
    options: &Options,
    decode_ta: &DT,
    decode_va: &DV,
    json: &Json,
) -> Result<Value<TA, VA>, CodecError>
where
    DT: AttrDecoder<TA> + ?Sized,
    DV: AttrDecoder<VA> + ?Sized,
{
    let (tag, items) = wire::node(json, "Value")?;
    let tag = ValueTag::parse(options.format_version, tag)?;
    wire::arity(tag.pascal(), items, arity(tag))?;

    decode_node(options, decode_ta, decode_va, tag, items)
        .context(|| format!("decode {}", tag.pascal()))
}

fn decode_node<TA, VA, DT, DV>(
    options: &Options,
    decode_ta: &DT,
    decode_va: &DV,
    tag: ValueTag,
    items: &[Json],
) -> Result<Value<TA, VA>, CodecError>
where
    DT: AttrDecoder<TA> + ?Sized,
    DV: AttrDecoder<VA> + ?Sized,
{
    let recurse = |j: &Json| value_from_json(options, decode_ta, decode_va, j);
    let boxed = |j: &Json| recurse(j).map(Box::new);
    let named = |j: &Json, expected: &'static str| {
        wire::list(j, expected, |entry| {
            let pair = wire::tuple(entry, expected, 2)?;
            Ok((name_from_json(&pair[0])?, recurse(&pair[1])?))
        })
    };
    let pattern = |j: &Json| pattern_from_json(options, decode_va, j);
    let attrs = decode_va.decode_attrs(&items[1])?;

    Ok(match tag {
        ValueTag::Literal => Value::Literal(attrs, literal_from_json(options, &items[2])?),
        ValueTag::Constructor => Value::Constructor(attrs, fqname_from_json(&items[2])?),
        ValueTag::Tuple => Value::Tuple(attrs, wire::list(&items[2], "tuple elements", recurse)?),
        ValueTag::List => Value::List(attrs, wire::list(&items[2], "list items", recurse)?),
        ValueTag::Record => Value::Record(attrs, named(&items[2], "record fields")?),
        ValueTag::Variable => Value::Variable(attrs, name_from_json(&items[2])?),
        ValueTag::Reference => Value::Reference(attrs, fqname_from_json(&items[2])?),
        ValueTag::Field => Value::Field(attrs, boxed(&items[2])?, name_from_json(&items[3])?),
        ValueTag::FieldFunction => Value::FieldFunction(attrs, name_from_json(&items[2])?),
        ValueTag::Apply => Value::Apply(attrs, boxed(&items[2])?, boxed(&items[3])?),
        ValueTag::Lambda => Value::Lambda(attrs, pattern(&items[2])?, boxed(&items[3])?),
        ValueTag::LetDefinition => Value::LetDefinition(
            attrs,
            name_from_json(&items[2])?,
            Box::new(value_definition_from_json(options, decode_ta, decode_va, &items[3])?),
            boxed(&items[4])?,
        ),
        ValueTag::LetRecursion => Value::LetRecursion(
            attrs,
            wire::list(&items[2], "let bindings", |entry| {
                let pair = wire::tuple(entry, "let bindings", 2)?;
                Ok((
                    name_from_json(&pair[0])?,
                    value_definition_from_json(options, decode_ta, decode_va, &pair[1])?,
                ))
            })?,
            boxed(&items[3])?,
        ),
        ValueTag::Destructure => Value::Destructure(
            attrs,
            pattern(&items[2])?,
            boxed(&items[3])?,
            boxed(&items[4])?,
        ),
        ValueTag::IfThenElse => Value::IfThenElse(
            attrs,
            boxed(&items[2])?,
            boxed(&items[3])?,
            boxed(&items[4])?,
        ),
        ValueTag::PatternMatch => Value::PatternMatch(
            attrs,
            boxed(&items[2])?,
            wire::list(&items[3], "cases", |entry| {
                let pair = wire::tuple(entry, "cases", 2)?;
                Ok((pattern(&pair[0])?, recurse(&pair[1])?))
            })?,
        ),
        ValueTag::UpdateRecord => Value::UpdateRecord(
            attrs,
            boxed(&items[2])?,
            named(&items[3], "field updates")?,
        ),
        ValueTag::Unit => Value::Unit(attrs),
    })
}

pub fn value_definition_to_json<TA, VA, ET, EV>(
    options: &Options,
    encode_ta: &ET,
    encode_va: &EV,
    definition: &ValueDefinition<TA, VA>,
) -> Result<Json, CodecError>
where
    ET: AttrEncoder<TA> + ?Sized,
    EV: AttrEncoder<VA> + ?Sized,
{
    let input_types = wire::encode_list(&definition.input_types, |(name, attrs, tpe)| {
        Ok(json!([
            name_to_json(name),
            encode_va.encode_attrs(attrs)?,
            type_to_json(options, encode_ta, tpe)?
        ]))
    })?;
    Ok(json!({
        "inputTypes": input_types,
        "outputType": type_to_json(options, encode_ta, &definition.output_type)?,
        "body": value_to_json(options, encode_ta, encode_va, &definition.body)?,
    }))
}

pub fn value_definition_from_json<TA, VA, DT, DV>(
    options: &Options,
    decode_ta: &DT,
    decode_va: &DV,
    json: &Json,
) -> Result<ValueDefinition<TA, VA>, CodecError>
where
    DT: AttrDecoder<TA> + ?Sized,
    DV: AttrDecoder<VA> + ?Sized,
{
    const ENTITY: &str = "ValueDefinition";
    let map = wire::object(json, ENTITY)?;

    let input_types = wire::list(wire::field(map, ENTITY, "inputTypes")?, "inputTypes", |entry| {
        let triple = wire::tuple(entry, "input type", 3)?;
        Ok((
            name_from_json(&triple[0])?,
            decode_va.decode_attrs(&triple[1])?,
            type_from_json(options, decode_ta, &triple[2])?,
        ))
    })?;
    let output_type = type_from_json(options, decode_ta, wire::field(map, ENTITY, "outputType")?)
        .context(|| "decode outputType".into())?;
    let body = value_from_json(options, decode_ta, decode_va, wire::field(map, ENTITY, "body")?)
        .context(|| "decode body".into())?;

    Ok(ValueDefinition::new(input_types, output_type, body))
}

pub fn value_specification_to_json<TA, ET>(
    options: &Options,
    encode_ta: &ET,
    specification: &ValueSpecification<TA>,
) -> Result<Json, CodecError>
where
    ET: AttrEncoder<TA> + ?Sized,
{
    let inputs = wire::encode_list(&specification.inputs, |(name, tpe)| {
        Ok(json!([name_to_json(name), type_to_json(options, encode_ta, tpe)?]))
    })?;
    Ok(json!({
        "inputs": inputs,
        "output": type_to_json(options, encode_ta, &specification.output)?,
    }))
}

pub fn value_specification_from_json<TA, DT>(
    options: &Options,
    decode_ta: &DT,
    json: &Json,
) -> Result<ValueSpecification<TA>, CodecError>
where
    DT: AttrDecoder<TA> + ?Sized,
{
    const ENTITY: &str = "ValueSpecification";
    let map = wire::object(json, ENTITY)?;

    let inputs = wire::list(wire::field(map, ENTITY, "inputs")?, "inputs", |entry| {
        let pair = wire::tuple(entry, "input", 2)?;
        Ok((name_from_json(&pair[0])?, type_from_json(options, decode_ta, &pair[1])?))
    })?;
    let output = type_from_json(options, decode_ta, wire::field(map, ENTITY, "output")?)
        .context(|| "decode output".into())?;

    Ok(ValueSpecification::new(inputs, output))
}

pub fn encode_value<TA, VA, ET, EV>(
    options: &Options,
    encode_ta: &ET,
    encode_va: &EV,
    value: &Value<TA, VA>,
) -> Result<Vec<u8>, CodecError>
where
    ET: AttrEncoder<TA> + ?Sized,
    EV: AttrEncoder<VA> + ?Sized,
{
    debug!(version = %options.format_version, kind = value.kind(), "encode Value");
    wire::render(&value_to_json(options, encode_ta, encode_va, value)?)
}

pub fn decode_value<TA, VA, DT, DV>(
    options: &Options,
    decode_ta: &DT,
    decode_va: &DV,
    bytes: &[u8],
) -> Result<Value<TA, VA>, CodecError>
where
    DT: AttrDecoder<TA> + ?Sized,
    DV: AttrDecoder<VA> + ?Sized,
{
    debug!(version = %options.format_version, len = bytes.len(), "decode Value");
    let value = value_from_json(options, decode_ta, decode_va, &wire::parse(bytes)?)?;
    debug!(kind = value.kind(), "decoded Value");
    Ok(value)
}

pub fn encode_value_definition<TA, VA, ET, EV>(
    options: &Options,
    encode_ta: &ET,
    encode_va: &EV,
    definition: &ValueDefinition<TA, VA>,
) -> Result<Vec<u8>, CodecError>
where
    ET: AttrEncoder<TA> + ?Sized,
    EV: AttrEncoder<VA> + ?Sized,
{
    wire::render(&value_definition_to_json(options, encode_ta, encode_va, definition)?)
}

pub fn decode_value_definition<TA, VA, DT, DV>(
    options: &Options,
    decode_ta: &DT,
    decode_va: &DV,
    bytes: &[u8],
) -> Result<ValueDefinition<TA, VA>, CodecError>
where
    DT: AttrDecoder<TA> + ?Sized,
    DV: AttrDecoder<VA> + ?Sized,
{
    debug!(version = %options.format_version, len = bytes.len(), "decode ValueDefinition");
    value_definition_from_json(options, decode_ta, decode_va, &wire::parse(bytes)?)
}

pub fn encode_value_specification<TA, ET>(
    options: &Options,
    encode_ta: &ET,
    specification: &ValueSpecification<TA>,
) -> Result<Vec<u8>, CodecError>
where
    ET: AttrEncoder<TA> + ?Sized,
{
    wire::render(&value_specification_to_json(options, encode_ta, specification)?)
}

pub fn decode_value_specification<TA, DT>(
    options: &Options,
    decode_ta: &DT,
    bytes: &[u8],
) -> Result<ValueSpecification<TA>, CodecError>
where
    DT: AttrDecoder<TA> + ?Sized,
{
    debug!(version = %options.format_version, len = bytes.len(), "decode ValueSpecification");
    value_specification_from_json(options, decode_ta, &wire::parse(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::json::attrs::{decode_unit, encode_unit};
    use crate::ir::literal::Literal;
    use crate::ir::types::Type;
    use crate::naming::FQName;

    type V = Value<(), ()>;

    fn int_type() -> Type<()> {
        Type::reference((), FQName::fqn("Morphir.SDK", "Basics", "Int"), vec![])
    }

    fn sample() -> V {
        // let inc x = x + 1 in case inc 1 of 2 -> True; _ -> False
        let plus = Value::Reference((), FQName::fqn("Morphir.SDK", "Basics", "add"));
        let definition = ValueDefinition::new(
            vec![(Name::from("x"), (), int_type())],
            int_type(),
            Value::apply(
                (),
                Value::apply((), plus, Value::variable((), "x")),
                Value::literal((), 1i64),
            ),
        );
        Value::LetDefinition(
            (),
            Name::from("inc"),
            Box::new(definition),
            Box::new(Value::PatternMatch(
                (),
                Box::new(Value::apply((), Value::variable((), "inc"), Value::literal((), 1i64))),
                vec![
                    (Pattern::LiteralPattern((), Literal::int(2)), Value::literal((), true)),
                    (Pattern::WildcardPattern(()), Value::literal((), false)),
                ],
            )),
        )
    }

    #[test]
    fn test_let_definition_shape() {
        let encoded = value_to_json(&Options::v1(), &encode_unit, &encode_unit, &sample()).unwrap();
        assert_eq!(encoded[0], json!("let_definition"));
        assert_eq!(encoded[2], json!(["inc"]));
        assert_eq!(encoded[3]["inputTypes"][0][0], json!(["x"]));
        assert_eq!(encoded[3]["outputType"][0], json!("reference"));
        assert_eq!(encoded[4][0], json!("pattern_match"));
        assert_eq!(encoded[4][3][1][0], json!(["wildcard_pattern", {}]));
    }

    #[test]
    fn test_value_round_trip_v3() {
        let options = Options::v3();
        let bytes = encode_value(&options, &encode_unit, &encode_unit, &sample()).unwrap();
        let decoded: V = decode_value(&options, &decode_unit, &decode_unit, &bytes).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_record_entries_are_pairs() {
        let record: V = Value::Record((), vec![(Name::from("name"), Value::literal((), "Alice"))]);
        let encoded = value_to_json(&Options::v2(), &encode_unit, &encode_unit, &record).unwrap();
        assert_eq!(
            encoded,
            json!(["Record", {}, [[["name"], ["Literal", {}, ["StringLiteral", "Alice"]]]]])
        );

        let broken = json!(["Record", {}, [[["name"]]]]);
        let err =
            value_from_json::<(), (), _, _>(&Options::v2(), &decode_unit, &decode_unit, &broken)
                .unwrap_err();
        assert!(matches!(
            err.root_cause(),
            CodecError::Arity { node: "record fields", expected: 2, found: 1 }
        ));
    }

    #[test]
    fn test_if_then_else_arity() {
        let value = json!(["IfThenElse", {}, ["Unit", {}], ["Unit", {}]]);
        let err =
            value_from_json::<(), (), _, _>(&Options::v3(), &decode_unit, &decode_unit, &value)
                .unwrap_err();
        assert_eq!(err.to_string(), "codec/json: IfThenElse expects 5 elements, got 4");
    }

    #[test]
    fn test_value_specification_shape() {
        let spec = ValueSpecification::new(vec![(Name::from("x"), int_type())], Type::Unit(()));
        let encoded = value_specification_to_json(&Options::v1(), &encode_unit, &spec).unwrap();
        assert_eq!(encoded["inputs"][0][0], json!(["x"]));
        assert_eq!(encoded["output"], json!(["unit", {}]));
        let decoded =
            value_specification_from_json(&Options::v1(), &decode_unit, &encoded).unwrap();
        assert_eq!(decoded, spec);
    }

    #[test]
    fn test_value_definition_missing_body() {
        let value = json!({"inputTypes": [], "outputType": ["Unit", {}]});
        let err = value_definition_from_json::<(), (), _, _>(
            &Options::v3(),
            &decode_unit,
            &decode_unit,
            &value,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CodecError::MissingField { entity: "ValueDefinition", field: "body" }
        ));
    }
}
