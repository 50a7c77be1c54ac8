//! Fold and map over [`Value`] trees.
//!
//! Value expressions embed patterns (lambda arguments, destructuring, match
//! cases) and type expressions (let-bound definitions). Attribute mapping
//! walks all three; the structural fold and map only visit value nodes.

use super::pattern::map_pattern_attributes;
use super::types::map_type_attributes;
use crate::ir::value::{Value, ValueDefinition};
use crate::naming::FQName;
use std::convert::Infallible;

/// Post-order reduction over value nodes, children in wire order.
pub fn fold_value<TA, VA, R, F>(value: &Value<TA, VA>, f: &F) -> R
where
    F: Fn(&Value<TA, VA>, Vec<R>) -> R,
{
    let children = value
        .children()
        .into_iter()
        .map(|child| fold_value(child, f))
        .collect();
    f(value, children)
}

/// Bottom-up rewrite of value nodes. Bodies of let-bound definitions are
/// rewritten too.
pub fn try_map_value<TA, VA, E, F>(value: Value<TA, VA>, rewrite: &F) -> Result<Value<TA, VA>, E>
where
    F: Fn(Value<TA, VA>) -> Result<Value<TA, VA>, E>,
{
    let map = |v: Value<TA, VA>| try_map_value(v, rewrite);
    let map_boxed = |v: Box<Value<TA, VA>>| -> Result<Box<Value<TA, VA>>, E> {
        Ok(Box::new(try_map_value(*v, rewrite)?))
    };
    let map_all = |items: Vec<Value<TA, VA>>| -> Result<Vec<Value<TA, VA>>, E> {
        items.into_iter().map(|v| try_map_value(v, rewrite)).collect()
    };
    let map_def = |def: ValueDefinition<TA, VA>| -> Result<ValueDefinition<TA, VA>, E> {
        Ok(ValueDefinition {
            input_types: def.input_types,
            output_type: def.output_type,
            body: try_map_value(def.body, rewrite)?,
        })
    };

    let rebuilt = match value {
        Value::Tuple(a, items) => Value::Tuple(a, map_all(items)?),
        Value::List(a, items) => Value::List(a, map_all(items)?),
        Value::Record(a, fields) => Value::Record(
            a,
            fields
                .into_iter()
                .map(|(name, v)| Ok((name, map(v)?)))
                .collect::<Result<_, E>>()?,
        ),
        Value::Field(a, subject, name) => Value::Field(a, map_boxed(subject)?, name),
        Value::Apply(a, function, argument) => {
            Value::Apply(a, map_boxed(function)?, map_boxed(argument)?)
        }
        Value::Lambda(a, pattern, body) => Value::Lambda(a, pattern, map_boxed(body)?),
        Value::LetDefinition(a, name, def, body) => {
            Value::LetDefinition(a, name, Box::new(map_def(*def)?), map_boxed(body)?)
        }
        Value::LetRecursion(a, defs, body) => Value::LetRecursion(
            a,
            defs.into_iter()
                .map(|(name, def)| Ok((name, map_def(def)?)))
                .collect::<Result<_, E>>()?,
            map_boxed(body)?,
        ),
        Value::Destructure(a, pattern, bound, body) => {
            Value::Destructure(a, pattern, map_boxed(bound)?, map_boxed(body)?)
        }
        Value::IfThenElse(a, condition, then_branch, else_branch) => Value::IfThenElse(
            a,
            map_boxed(condition)?,
            map_boxed(then_branch)?,
            map_boxed(else_branch)?,
        ),
        Value::PatternMatch(a, subject, cases) => Value::PatternMatch(
            a,
            map_boxed(subject)?,
            cases
                .into_iter()
                .map(|(pattern, body)| Ok((pattern, map(body)?)))
                .collect::<Result<_, E>>()?,
        ),
        Value::UpdateRecord(a, subject, fields) => Value::UpdateRecord(
            a,
            map_boxed(subject)?,
            fields
                .into_iter()
                .map(|(name, v)| Ok((name, map(v)?)))
                .collect::<Result<_, E>>()?,
        ),
        leaf @ (Value::Literal(..)
        | Value::Constructor(..)
        | Value::Variable(..)
        | Value::Reference(..)
        | Value::FieldFunction(..)
        | Value::Unit(..)) => leaf,
    };
    rewrite(rebuilt)
}

pub fn map_value<TA, VA, F>(value: Value<TA, VA>, rewrite: F) -> Value<TA, VA>
where
    F: Fn(Value<TA, VA>) -> Value<TA, VA>,
{
    let rewrite = |node: Value<TA, VA>| Ok::<_, Infallible>(rewrite(node));
    match try_map_value(value, &rewrite) {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Re-parameterize a value over new type and value attributes. `map_ta` is
/// applied to embedded type expressions, `map_va` to value and pattern nodes.
pub fn map_value_attributes<TA, VA, TB, VB, FT, FV>(
    value: &Value<TA, VA>,
    map_ta: &FT,
    map_va: &FV,
) -> Value<TB, VB>
where
    FT: Fn(&TA) -> TB,
    FV: Fn(&VA) -> VB,
{
    let map = |v: &Value<TA, VA>| map_value_attributes(v, map_ta, map_va);
    let map_boxed = |v: &Value<TA, VA>| Box::new(map(v));
    let map_all =
        |items: &[Value<TA, VA>]| -> Vec<Value<TB, VB>> { items.iter().map(map).collect() };

    match value {
        Value::Literal(a, literal) => Value::Literal(map_va(a), literal.clone()),
        Value::Constructor(a, fq) => Value::Constructor(map_va(a), fq.clone()),
        Value::Tuple(a, items) => Value::Tuple(map_va(a), map_all(items)),
        Value::List(a, items) => Value::List(map_va(a), map_all(items)),
        Value::Record(a, fields) => Value::Record(
            map_va(a),
            fields.iter().map(|(n, v)| (n.clone(), map(v))).collect(),
        ),
        Value::Variable(a, name) => Value::Variable(map_va(a), name.clone()),
        Value::Reference(a, fq) => Value::Reference(map_va(a), fq.clone()),
        Value::Field(a, subject, name) => Value::Field(map_va(a), map_boxed(subject), name.clone()),
        Value::FieldFunction(a, name) => Value::FieldFunction(map_va(a), name.clone()),
        Value::Apply(a, function, argument) => {
            Value::Apply(map_va(a), map_boxed(function), map_boxed(argument))
        }
        Value::Lambda(a, pattern, body) => Value::Lambda(
            map_va(a),
            map_pattern_attributes(pattern, map_va),
            map_boxed(body),
        ),
        Value::LetDefinition(a, name, def, body) => Value::LetDefinition(
            map_va(a),
            name.clone(),
            Box::new(map_value_definition_attributes(def, map_ta, map_va)),
            map_boxed(body),
        ),
        Value::LetRecursion(a, defs, body) => Value::LetRecursion(
            map_va(a),
            defs.iter()
                .map(|(n, d)| (n.clone(), map_value_definition_attributes(d, map_ta, map_va)))
                .collect(),
            map_boxed(body),
        ),
        Value::Destructure(a, pattern, bound, body) => Value::Destructure(
            map_va(a),
            map_pattern_attributes(pattern, map_va),
            map_boxed(bound),
            map_boxed(body),
        ),
        Value::IfThenElse(a, condition, then_branch, else_branch) => Value::IfThenElse(
            map_va(a),
            map_boxed(condition),
            map_boxed(then_branch),
            map_boxed(else_branch),
        ),
        Value::PatternMatch(a, subject, cases) => Value::PatternMatch(
            map_va(a),
            map_boxed(subject),
            cases
                .iter()
                .map(|(p, v)| (map_pattern_attributes(p, map_va), map(v)))
                .collect(),
        ),
        Value::UpdateRecord(a, subject, fields) => Value::UpdateRecord(
            map_va(a),
            map_boxed(subject),
            fields.iter().map(|(n, v)| (n.clone(), map(v))).collect(),
        ),
        Value::Unit(a) => Value::Unit(map_va(a)),
    }
}

pub fn map_value_definition_attributes<TA, VA, TB, VB, FT, FV>(
    def: &ValueDefinition<TA, VA>,
    map_ta: &FT,
    map_va: &FV,
) -> ValueDefinition<TB, VB>
where
    FT: Fn(&TA) -> TB,
    FV: Fn(&VA) -> VB,
{
    ValueDefinition {
        input_types: def
            .input_types
            .iter()
            .map(|(name, va, tpe)| (name.clone(), map_va(va), map_type_attributes(tpe, map_ta)))
            .collect(),
        output_type: map_type_attributes(&def.output_type, map_ta),
        body: map_value_attributes(&def.body, map_ta, map_va),
    }
}

impl<TA, VA> Value<TA, VA> {
    /// Number of value nodes, including let-bound definition bodies.
    pub fn count_nodes(&self) -> usize {
        fold_value(self, &|_, children: Vec<usize>| 1 + children.iter().sum::<usize>())
    }

    /// Fully-qualified names of referenced values and constructors, in the
    /// order they are first seen.
    pub fn collect_references(&self) -> Vec<FQName> {
        let all = fold_value(self, &|node: &Value<TA, VA>, children: Vec<Vec<FQName>>| {
            let mut refs = Vec::new();
            if let Value::Reference(_, fq) | Value::Constructor(_, fq) = node {
                refs.push(fq.clone());
            }
            refs.extend(children.into_iter().flatten());
            refs
        });

        let mut seen = Vec::with_capacity(all.len());
        for fq in all {
            if !seen.contains(&fq) {
                seen.push(fq);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::literal::Literal;
    use crate::ir::pattern::Pattern;
    use crate::ir::types::Type;
    use crate::naming::Name;

    fn add() -> FQName {
        FQName::fqn("Morphir.SDK", "Basics", "add")
    }

    /// `\x -> let y = add x 1 in if y then y else 0`
    fn sample() -> Value<u32, u32> {
        let body = Value::apply(
            3,
            Value::apply(4, Value::Reference(5, add()), Value::variable(6, "x")),
            Value::literal(7, 1i64),
        );
        let def = ValueDefinition::new(vec![], Type::Unit(100), body);
        Value::lambda(
            1,
            Pattern::as_pattern(2, Pattern::WildcardPattern(2), "x"),
            Value::LetDefinition(
                8,
                Name::from("y"),
                Box::new(def),
                Box::new(Value::if_then_else(
                    9,
                    Value::variable(10, "y"),
                    Value::variable(11, "y"),
                    Value::literal(12, 0i64),
                )),
            ),
        )
    }

    #[test]
    fn test_count_nodes_includes_definition_bodies() {
        // lambda, let, apply, apply, reference, variable, literal, if, 3 branches
        assert_eq!(sample().count_nodes(), 11);
    }

    #[test]
    fn test_collect_references() {
        assert_eq!(sample().collect_references(), vec![add()]);
    }

    #[test]
    fn test_map_value_rewrites_literals_inside_definitions() {
        let mapped = map_value(sample(), |v| match v {
            Value::Literal(a, Literal::WholeNumber(n)) => {
                Value::Literal(a, Literal::WholeNumber(n + 1))
            }
            other => other,
        });
        let total = fold_value(&mapped, &|node, children: Vec<i64>| {
            let own = match node {
                Value::Literal(_, Literal::WholeNumber(n)) => *n,
                _ => 0,
            };
            own + children.iter().sum::<i64>()
        });
        assert_eq!(total, 3);
    }

    #[test]
    fn test_try_map_value_stops_on_error() {
        let result = try_map_value(sample(), &|v: Value<u32, u32>| match v {
            Value::Reference(..) => Err("references are not allowed"),
            other => Ok(other),
        });
        assert_eq!(result.unwrap_err(), "references are not allowed");
    }

    #[test]
    fn test_map_value_attributes_reaches_types_and_patterns() {
        let mapped: Value<String, i64> = map_value_attributes(
            &sample(),
            &|ta: &u32| format!("t{ta}"),
            &|va: &u32| -i64::from(*va),
        );

        match &mapped {
            Value::Lambda(a, pattern, body) => {
                assert_eq!(*a, -1);
                assert_eq!(*pattern.attributes(), -2);
                match body.as_ref() {
                    Value::LetDefinition(_, _, def, _) => {
                        assert_eq!(def.output_type, Type::Unit("t100".to_string()));
                    }
                    other => panic!("unexpected {}", other.kind()),
                }
            }
            other => panic!("unexpected {}", other.kind()),
        }
        assert!(mapped.equal_by(
            &map_value_attributes(&sample(), &|_| String::new(), &|_| 0i64),
            &|_, _| true,
            &|_, _| true,
        ));
    }
}
