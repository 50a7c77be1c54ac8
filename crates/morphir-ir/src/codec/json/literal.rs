//! Literals: `[tag, value]`.

use super::tags::{LiteralTag, WireTag};
use super::{Options, wire};
use crate::error::CodecError;
use crate::ir::literal::{Decimal, Literal};
use serde_json::{Number, Value};

fn tag_of(literal: &Literal) -> LiteralTag {
    match literal {
        Literal::Bool(_) => LiteralTag::Bool,
        Literal::Char(_) => LiteralTag::Char,
        Literal::String(_) => LiteralTag::String,
        Literal::WholeNumber(_) => LiteralTag::WholeNumber,
        Literal::Float(_) => LiteralTag::Float,
        Literal::Decimal(_) => LiteralTag::Decimal,
    }
}

pub fn literal_to_json(options: &Options, literal: &Literal) -> Result<Value, CodecError> {
    let payload = match literal {
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Char(c) => Value::String(c.to_string()),
        Literal::String(s) => Value::String(s.clone()),
        Literal::WholeNumber(n) => Value::Number((*n).into()),
        Literal::Float(f) => Value::Number(Number::from_f64(*f).ok_or_else(|| {
            CodecError::InvalidValue {
                entity: "FloatLiteral",
                message: format!("{f} has no JSON representation"),
            }
        })?),
        Literal::Decimal(d) => Value::String(d.as_str().to_string()),
    };
    let tag = tag_of(literal).tag(options.format_version);
    Ok(Value::Array(vec![Value::String(tag.to_string()), payload]))
}

pub fn literal_from_json(options: &Options, value: &Value) -> Result<Literal, CodecError> {
    let items = wire::tuple(value, "Literal", 2)?;
    let tag = LiteralTag::parse(options.format_version, wire::string(&items[0], "Literal tag")?)?;
    let payload = &items[1];
    let invalid = |entity: &'static str| CodecError::InvalidValue {
        entity,
        message: format!("unexpected payload {payload}"),
    };

    match tag {
        LiteralTag::Bool => payload
            .as_bool()
            .map(Literal::Bool)
            .ok_or_else(|| invalid("BoolLiteral")),
        LiteralTag::Char => {
            let s = wire::string(payload, "CharLiteral")?;
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Literal::Char(c)),
                _ => Err(CodecError::InvalidValue {
                    entity: "CharLiteral",
                    message: format!("expected exactly one character, got {s:?}"),
                }),
            }
        }
        LiteralTag::String => Ok(Literal::String(
            wire::string(payload, "StringLiteral")?.to_string(),
        )),
        LiteralTag::WholeNumber => payload
            .as_i64()
            .map(Literal::WholeNumber)
            .ok_or_else(|| invalid("WholeNumberLiteral")),
        LiteralTag::Float => payload
            .as_f64()
            .map(Literal::Float)
            .ok_or_else(|| invalid("FloatLiteral")),
        LiteralTag::Decimal => {
            let text = wire::string(payload, "DecimalLiteral")?;
            Decimal::parse(text)
                .map(Literal::Decimal)
                .map_err(|err| CodecError::InvalidValue {
                    entity: "DecimalLiteral",
                    message: err.to_string(),
                })
        }
    }
}

pub fn encode_literal(options: &Options, literal: &Literal) -> Result<Vec<u8>, CodecError> {
    wire::render(&literal_to_json(options, literal)?)
}

pub fn decode_literal(options: &Options, bytes: &[u8]) -> Result<Literal, CodecError> {
    literal_from_json(options, &wire::parse(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Options::v1(), json!(["int_literal", 42]))]
    #[case(Options::v2(), json!(["WholeNumberLiteral", 42]))]
    #[case(Options::v3(), json!(["WholeNumberLiteral", 42]))]
    fn test_whole_number_tag(#[case] options: Options, #[case] expected: Value) {
        let encoded = literal_to_json(&options, &Literal::int(42)).unwrap();
        assert_eq!(encoded, expected);
        assert_eq!(literal_from_json(&options, &encoded).unwrap(), Literal::int(42));
    }

    #[test]
    fn test_char_must_be_single() {
        let options = Options::v3();
        assert_eq!(
            literal_from_json(&options, &json!(["CharLiteral", "x"])).unwrap(),
            Literal::char('x')
        );
        assert!(literal_from_json(&options, &json!(["CharLiteral", "xy"])).is_err());
        assert!(literal_from_json(&options, &json!(["CharLiteral", ""])).is_err());
    }

    #[test]
    fn test_decimal_is_validated() {
        let options = Options::v2();
        let decoded = literal_from_json(&options, &json!(["DecimalLiteral", "12.50"])).unwrap();
        assert_eq!(decoded, Literal::Decimal(Decimal::parse("12.50").unwrap()));
        assert!(literal_from_json(&options, &json!(["DecimalLiteral", "12,5"])).is_err());
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let err = literal_to_json(&Options::v3(), &Literal::float(f64::NAN)).unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue { entity: "FloatLiteral", .. }));
    }

    #[test]
    fn test_literal_arity() {
        let err = literal_from_json(&Options::v3(), &json!(["BoolLiteral"])).unwrap_err();
        assert_eq!(err.to_string(), "codec/json: Literal expects 2 elements, got 1");
    }
}
