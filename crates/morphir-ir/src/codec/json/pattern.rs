//! Patterns on the wire: `[tag, attrs, ...]`.
//!
//! `AsPattern` is `[tag, attrs, subject, name]`, `ConstructorPattern` is
//! `[tag, attrs, fqName, [arg, ...]]` and `HeadTailPattern` is
//! `[tag, attrs, head, tail]`.

use super::attrs::{AttrDecoder, AttrEncoder};
use super::literal::{literal_from_json, literal_to_json};
use super::naming::{fqname_from_json, fqname_to_json, name_from_json, name_to_json};
use super::tags::{PatternTag, WireTag};
use super::{Options, wire};
use crate::error::{CodecError, ResultExt};
use crate::ir::pattern::Pattern;
use serde_json::Value;
use tracing::debug;

fn tag_of<A>(pattern: &Pattern<A>) -> PatternTag {
    match pattern {
        Pattern::WildcardPattern(_) => PatternTag::Wildcard,
        Pattern::AsPattern(..) => PatternTag::As,
        Pattern::TuplePattern(..) => PatternTag::Tuple,
        Pattern::ConstructorPattern(..) => PatternTag::Constructor,
        Pattern::EmptyListPattern(_) => PatternTag::EmptyList,
        Pattern::HeadTailPattern(..) => PatternTag::HeadTail,
        Pattern::LiteralPattern(..) => PatternTag::Literal,
        Pattern::UnitPattern(_) => PatternTag::Unit,
    }
}

fn arity(tag: PatternTag) -> usize {
    match tag {
        PatternTag::Wildcard | PatternTag::EmptyList | PatternTag::Unit => 2,
        PatternTag::Tuple | PatternTag::Literal => 3,
        PatternTag::As | PatternTag::Constructor | PatternTag::HeadTail => 4,
    }
}

pub fn pattern_to_json<A, E>(
    options: &Options,
    encode_attrs: &E,
    pattern: &Pattern<A>,
) -> Result<Value, CodecError>
where
    E: AttrEncoder<A> + ?Sized,
{
    let recurse = |p: &Pattern<A>| pattern_to_json(options, encode_attrs, p);
    let mut items = vec![
        Value::String(tag_of(pattern).tag(options.format_version).to_string()),
        encode_attrs.encode_attrs(pattern.attributes())?,
    ];

    match pattern {
        Pattern::AsPattern(_, subject, name) => {
            items.push(recurse(subject)?);
            items.push(name_to_json(name));
        }
        Pattern::TuplePattern(_, elements) => items.push(wire::encode_list(elements, recurse)?),
        Pattern::ConstructorPattern(_, fqname, args) => {
            items.push(fqname_to_json(fqname));
            items.push(wire::encode_list(args, recurse)?);
        }
        Pattern::HeadTailPattern(_, head, tail) => {
            items.push(recurse(head)?);
            items.push(recurse(tail)?);
        }
        Pattern::LiteralPattern(_, literal) => items.push(literal_to_json(options, literal)?),
        Pattern::WildcardPattern(_) | Pattern::EmptyListPattern(_) | Pattern::UnitPattern(_) => {}
    }
    Ok(Value::Array(items))
}

pub fn pattern_from_json<A, D>(
    options: &Options,
    decode_attrs: &D,
    value: &Value,
) -> Result<Pattern<A>, CodecError>
where
    D: AttrDecoder<A> + ?Sized,
{
    let (tag, items) = wire::node(value, "Pattern")?;
    let tag = PatternTag::parse(options.format_version, tag)?;
    wire::arity(tag.pascal(), items, arity(tag))?;

    decode_node(options, decode_attrs, tag, items).context(|| format!("decode {}", tag.pascal()))
}

fn decode_node<A, D>(
    options: &Options,
    decode_attrs: &D,
    tag: PatternTag,
    items: &[Value],
) -> Result<Pattern<A>, CodecError>
where
    D: AttrDecoder<A> + ?Sized,
{
    let recurse = |v: &Value| pattern_from_json(options, decode_attrs, v);
    let attrs = decode_attrs.decode_attrs(&items[1])?;

    Ok(match tag {
        PatternTag::Wildcard => Pattern::WildcardPattern(attrs),
        PatternTag::As => Pattern::AsPattern(
            attrs,
            Box::new(recurse(&items[2])?),
            name_from_json(&items[3])?,
        ),
        PatternTag::Tuple => {
            Pattern::TuplePattern(attrs, wire::list(&items[2], "tuple elements", recurse)?)
        }
        PatternTag::Constructor => Pattern::ConstructorPattern(
            attrs,
            fqname_from_json(&items[2])?,
            wire::list(&items[3], "constructor arguments", recurse)?,
        ),
        PatternTag::EmptyList => Pattern::EmptyListPattern(attrs),
        PatternTag::HeadTail => Pattern::HeadTailPattern(
            attrs,
            Box::new(recurse(&items[2])?),
            Box::new(recurse(&items[3])?),
        ),
        PatternTag::Literal => {
            Pattern::LiteralPattern(attrs, literal_from_json(options, &items[2])?)
        }
        PatternTag::Unit => Pattern::UnitPattern(attrs),
    })
}

pub fn encode_pattern<A, E>(
    options: &Options,
    encode_attrs: &E,
    pattern: &Pattern<A>,
) -> Result<Vec<u8>, CodecError>
where
    E: AttrEncoder<A> + ?Sized,
{
    debug!(version = %options.format_version, kind = pattern.kind(), "encode Pattern");
    wire::render(&pattern_to_json(options, encode_attrs, pattern)?)
}

pub fn decode_pattern<A, D>(
    options: &Options,
    decode_attrs: &D,
    bytes: &[u8],
) -> Result<Pattern<A>, CodecError>
where
    D: AttrDecoder<A> + ?Sized,
{
    debug!(version = %options.format_version, len = bytes.len(), "decode Pattern");
    pattern_from_json(options, decode_attrs, &wire::parse(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::json::attrs::{decode_unit, encode_unit};
    use crate::ir::literal::Literal;
    use crate::naming::FQName;
    use serde_json::json;

    #[test]
    fn test_as_pattern_shape() {
        let pattern = Pattern::as_pattern((), Pattern::WildcardPattern(()), "x");
        let encoded = pattern_to_json(&Options::v1(), &encode_unit, &pattern).unwrap();
        assert_eq!(encoded, json!(["as_pattern", {}, ["wildcard_pattern", {}], ["x"]]));
    }

    #[test]
    fn test_as_pattern_arity() {
        let value = json!(["AsPattern", {}, ["WildcardPattern", {}]]);
        let err = pattern_from_json(&Options::v3(), &decode_unit, &value).unwrap_err();
        assert_eq!(err.to_string(), "codec/json: AsPattern expects 4 elements, got 3");
    }

    #[test]
    fn test_constructor_pattern_round_trip() {
        let pattern = Pattern::ConstructorPattern(
            7u32,
            FQName::fqn("Morphir.SDK", "Maybe", "Just"),
            vec![Pattern::LiteralPattern(8, Literal::string("hi"))],
        );
        let options = Options::v2();
        let encode = |a: &u32| Ok::<_, CodecError>(json!(a));
        let decode = |v: &Value| {
            v.as_u64()
                .map(|n| n as u32)
                .ok_or_else(|| CodecError::attributes("expected a number"))
        };
        let bytes = encode_pattern(&options, &encode, &pattern).unwrap();
        assert_eq!(decode_pattern(&options, &decode, &bytes).unwrap(), pattern);
    }
}
