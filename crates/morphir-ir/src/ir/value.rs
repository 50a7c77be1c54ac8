//! Value expressions of the Morphir IR.
//!
//! `Value<TA, VA>` carries two attribute parameters: `TA` annotates the type
//! expressions embedded in a value (lambda signatures of let bindings) and
//! `VA` annotates every value and pattern node.

use super::literal::Literal;
use super::pattern::Pattern;
use super::types::Type;
use crate::naming::{FQName, Name};

/// Value expression with generic type and value attributes
#[derive(Debug, Clone, PartialEq)]
pub enum Value<TA, VA> {
    /// Literal constant: `42`, `"hello"`, `True`
    Literal(VA, Literal),

    /// Data constructor reference, `Just` in `Just 42`
    Constructor(VA, FQName),

    Tuple(VA, Vec<Value<TA, VA>>),

    List(VA, Vec<Value<TA, VA>>),

    /// Record construction: `{ name = "Alice", age = 30 }`
    Record(VA, Vec<(Name, Value<TA, VA>)>),

    /// Local variable
    Variable(VA, Name),

    /// Reference to a top-level value in some module
    Reference(VA, FQName),

    /// Field access: `person.name`
    Field(VA, Box<Value<TA, VA>>, Name),

    /// Field accessor used as a function: `.name`
    FieldFunction(VA, Name),

    /// Function application `f x`
    Apply(VA, Box<Value<TA, VA>>, Box<Value<TA, VA>>),

    /// `\pattern -> body`
    Lambda(VA, Pattern<VA>, Box<Value<TA, VA>>),

    /// `let name = definition in body`
    LetDefinition(VA, Name, Box<ValueDefinition<TA, VA>>, Box<Value<TA, VA>>),

    /// Mutually recursive let bindings
    LetRecursion(VA, Vec<(Name, ValueDefinition<TA, VA>)>, Box<Value<TA, VA>>),

    /// `let pattern = value in body`
    Destructure(VA, Pattern<VA>, Box<Value<TA, VA>>, Box<Value<TA, VA>>),

    /// `if condition then a else b`
    IfThenElse(VA, Box<Value<TA, VA>>, Box<Value<TA, VA>>, Box<Value<TA, VA>>),

    /// `case subject of pattern -> body; ...`
    PatternMatch(VA, Box<Value<TA, VA>>, Vec<(Pattern<VA>, Value<TA, VA>)>),

    /// `{ record | field = value }`
    UpdateRecord(VA, Box<Value<TA, VA>>, Vec<(Name, Value<TA, VA>)>),

    Unit(VA),
}

impl<TA, VA> Value<TA, VA> {
    pub fn literal(attrs: VA, literal: impl Into<Literal>) -> Self {
        Value::Literal(attrs, literal.into())
    }

    pub fn variable(attrs: VA, name: impl Into<Name>) -> Self {
        Value::Variable(attrs, name.into())
    }

    pub fn apply(attrs: VA, function: Value<TA, VA>, argument: Value<TA, VA>) -> Self {
        Value::Apply(attrs, Box::new(function), Box::new(argument))
    }

    pub fn lambda(attrs: VA, pattern: Pattern<VA>, body: Value<TA, VA>) -> Self {
        Value::Lambda(attrs, pattern, Box::new(body))
    }

    pub fn field(attrs: VA, subject: Value<TA, VA>, name: impl Into<Name>) -> Self {
        Value::Field(attrs, Box::new(subject), name.into())
    }

    pub fn if_then_else(
        attrs: VA,
        condition: Value<TA, VA>,
        then_branch: Value<TA, VA>,
        else_branch: Value<TA, VA>,
    ) -> Self {
        Value::IfThenElse(
            attrs,
            Box::new(condition),
            Box::new(then_branch),
            Box::new(else_branch),
        )
    }

    pub fn attributes(&self) -> &VA {
        match self {
            Value::Literal(a, _)
            | Value::Constructor(a, _)
            | Value::Tuple(a, _)
            | Value::List(a, _)
            | Value::Record(a, _)
            | Value::Variable(a, _)
            | Value::Reference(a, _)
            | Value::Field(a, _, _)
            | Value::FieldFunction(a, _)
            | Value::Apply(a, _, _)
            | Value::Lambda(a, _, _)
            | Value::LetDefinition(a, _, _, _)
            | Value::LetRecursion(a, _, _)
            | Value::Destructure(a, _, _, _)
            | Value::IfThenElse(a, _, _, _)
            | Value::PatternMatch(a, _, _)
            | Value::UpdateRecord(a, _, _)
            | Value::Unit(a) => a,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Literal(..) => "Literal",
            Value::Constructor(..) => "Constructor",
            Value::Tuple(..) => "Tuple",
            Value::List(..) => "List",
            Value::Record(..) => "Record",
            Value::Variable(..) => "Variable",
            Value::Reference(..) => "Reference",
            Value::Field(..) => "Field",
            Value::FieldFunction(..) => "FieldFunction",
            Value::Apply(..) => "Apply",
            Value::Lambda(..) => "Lambda",
            Value::LetDefinition(..) => "LetDefinition",
            Value::LetRecursion(..) => "LetRecursion",
            Value::Destructure(..) => "Destructure",
            Value::IfThenElse(..) => "IfThenElse",
            Value::PatternMatch(..) => "PatternMatch",
            Value::UpdateRecord(..) => "UpdateRecord",
            Value::Unit(..) => "Unit",
        }
    }

    /// Direct sub-expressions in wire order. Bodies of let-bound definitions
    /// are included; patterns and types are not.
    pub fn children(&self) -> Vec<&Value<TA, VA>> {
        match self {
            Value::Literal(..)
            | Value::Constructor(..)
            | Value::Variable(..)
            | Value::Reference(..)
            | Value::FieldFunction(..)
            | Value::Unit(..) => Vec::new(),
            Value::Tuple(_, items) | Value::List(_, items) => items.iter().collect(),
            Value::Record(_, fields) => fields.iter().map(|(_, v)| v).collect(),
            Value::Field(_, subject, _) => vec![subject.as_ref()],
            Value::Apply(_, function, argument) => vec![function.as_ref(), argument.as_ref()],
            Value::Lambda(_, _, body) => vec![body.as_ref()],
            Value::LetDefinition(_, _, def, body) => vec![&def.body, body.as_ref()],
            Value::LetRecursion(_, defs, body) => defs
                .iter()
                .map(|(_, d)| &d.body)
                .chain(std::iter::once(body.as_ref()))
                .collect(),
            Value::Destructure(_, _, value, body) => vec![value.as_ref(), body.as_ref()],
            Value::IfThenElse(_, c, t, e) => vec![c.as_ref(), t.as_ref(), e.as_ref()],
            Value::PatternMatch(_, subject, cases) => std::iter::once(subject.as_ref())
                .chain(cases.iter().map(|(_, v)| v))
                .collect(),
            Value::UpdateRecord(_, subject, fields) => std::iter::once(subject.as_ref())
                .chain(fields.iter().map(|(_, v)| v))
                .collect(),
        }
    }

    /// Deep structural equality. `eq_ta` compares attributes of embedded type
    /// expressions, `eq_va` those of value and pattern nodes.
    pub fn equal_by<FT, FV>(&self, other: &Value<TA, VA>, eq_ta: &FT, eq_va: &FV) -> bool
    where
        FT: Fn(&TA, &TA) -> bool,
        FV: Fn(&VA, &VA) -> bool,
    {
        let eq = |l: &Value<TA, VA>, r: &Value<TA, VA>| l.equal_by(r, eq_ta, eq_va);
        let eq_all = |l: &[Value<TA, VA>], r: &[Value<TA, VA>]| {
            l.len() == r.len() && l.iter().zip(r).all(|(x, y)| eq(x, y))
        };
        let eq_named = |l: &[(Name, Value<TA, VA>)], r: &[(Name, Value<TA, VA>)]| {
            l.len() == r.len()
                && l.iter()
                    .zip(r)
                    .all(|((n1, v1), (n2, v2))| n1 == n2 && eq(v1, v2))
        };

        match (self, other) {
            (Value::Literal(a1, l1), Value::Literal(a2, l2)) => eq_va(a1, a2) && l1 == l2,
            (Value::Constructor(a1, fq1), Value::Constructor(a2, fq2))
            | (Value::Reference(a1, fq1), Value::Reference(a2, fq2)) => {
                eq_va(a1, a2) && fq1 == fq2
            }
            (Value::Tuple(a1, e1), Value::Tuple(a2, e2))
            | (Value::List(a1, e1), Value::List(a2, e2)) => eq_va(a1, a2) && eq_all(e1, e2),
            (Value::Record(a1, f1), Value::Record(a2, f2)) => {
                eq_va(a1, a2) && eq_named(f1, f2)
            }
            (Value::Variable(a1, n1), Value::Variable(a2, n2))
            | (Value::FieldFunction(a1, n1), Value::FieldFunction(a2, n2)) => {
                eq_va(a1, a2) && n1 == n2
            }
            (Value::Field(a1, s1, n1), Value::Field(a2, s2, n2)) => {
                eq_va(a1, a2) && eq(s1, s2) && n1 == n2
            }
            (Value::Apply(a1, f1, x1), Value::Apply(a2, f2, x2)) => {
                eq_va(a1, a2) && eq(f1, f2) && eq(x1, x2)
            }
            (Value::Lambda(a1, p1, b1), Value::Lambda(a2, p2, b2)) => {
                eq_va(a1, a2) && p1.equal_by(p2, eq_va) && eq(b1, b2)
            }
            (Value::LetDefinition(a1, n1, d1, b1), Value::LetDefinition(a2, n2, d2, b2)) => {
                eq_va(a1, a2) && n1 == n2 && d1.equal_by(d2, eq_ta, eq_va) && eq(b1, b2)
            }
            (Value::LetRecursion(a1, d1, b1), Value::LetRecursion(a2, d2, b2)) => {
                eq_va(a1, a2)
                    && d1.len() == d2.len()
                    && d1
                        .iter()
                        .zip(d2)
                        .all(|((n1, x1), (n2, x2))| n1 == n2 && x1.equal_by(x2, eq_ta, eq_va))
                    && eq(b1, b2)
            }
            (Value::Destructure(a1, p1, v1, b1), Value::Destructure(a2, p2, v2, b2)) => {
                eq_va(a1, a2) && p1.equal_by(p2, eq_va) && eq(v1, v2) && eq(b1, b2)
            }
            (Value::IfThenElse(a1, c1, t1, e1), Value::IfThenElse(a2, c2, t2, e2)) => {
                eq_va(a1, a2) && eq(c1, c2) && eq(t1, t2) && eq(e1, e2)
            }
            (Value::PatternMatch(a1, s1, c1), Value::PatternMatch(a2, s2, c2)) => {
                eq_va(a1, a2)
                    && eq(s1, s2)
                    && c1.len() == c2.len()
                    && c1
                        .iter()
                        .zip(c2)
                        .all(|((p1, v1), (p2, v2))| p1.equal_by(p2, eq_va) && eq(v1, v2))
            }
            (Value::UpdateRecord(a1, s1, f1), Value::UpdateRecord(a2, s2, f2)) => {
                eq_va(a1, a2) && eq(s1, s2) && eq_named(f1, f2)
            }
            (Value::Unit(a1), Value::Unit(a2)) => eq_va(a1, a2),
            _ => false,
        }
    }
}

// ----------------------------------------------------------------------------
// Value definitions and specifications
// ----------------------------------------------------------------------------

/// Full definition of a value: typed, attributed inputs, output type and body.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueDefinition<TA, VA> {
    pub input_types: Vec<(Name, VA, Type<TA>)>,
    pub output_type: Type<TA>,
    pub body: Value<TA, VA>,
}

impl<TA, VA> ValueDefinition<TA, VA> {
    pub fn new(
        input_types: Vec<(Name, VA, Type<TA>)>,
        output_type: Type<TA>,
        body: Value<TA, VA>,
    ) -> Self {
        Self {
            input_types,
            output_type,
            body,
        }
    }

    /// The signature of this definition, dropping input attributes and body.
    pub fn to_specification(&self) -> ValueSpecification<TA>
    where
        TA: Clone,
    {
        ValueSpecification {
            inputs: self
                .input_types
                .iter()
                .map(|(name, _, tpe)| (name.clone(), tpe.clone()))
                .collect(),
            output: self.output_type.clone(),
        }
    }

    pub fn equal_by<FT, FV>(&self, other: &ValueDefinition<TA, VA>, eq_ta: &FT, eq_va: &FV) -> bool
    where
        FT: Fn(&TA, &TA) -> bool,
        FV: Fn(&VA, &VA) -> bool,
    {
        self.input_types.len() == other.input_types.len()
            && self
                .input_types
                .iter()
                .zip(&other.input_types)
                .all(|((n1, a1, t1), (n2, a2, t2))| {
                    n1 == n2 && eq_va(a1, a2) && t1.equal_by(t2, eq_ta)
                })
            && self.output_type.equal_by(&other.output_type, eq_ta)
            && self.body.equal_by(&other.body, eq_ta, eq_va)
    }
}

/// Exposed signature of a value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpecification<TA> {
    pub inputs: Vec<(Name, Type<TA>)>,
    pub output: Type<TA>,
}

impl<TA> ValueSpecification<TA> {
    pub fn new(inputs: Vec<(Name, Type<TA>)>, output: Type<TA>) -> Self {
        Self { inputs, output }
    }

    pub fn equal_by<F>(&self, other: &ValueSpecification<TA>, eq_ta: &F) -> bool
    where
        F: Fn(&TA, &TA) -> bool,
    {
        self.inputs.len() == other.inputs.len()
            && self
                .inputs
                .iter()
                .zip(&other.inputs)
                .all(|((n1, t1), (n2, t2))| n1 == n2 && t1.equal_by(t2, eq_ta))
            && self.output.equal_by(&other.output, eq_ta)
    }

    /// Input types in order, without their names.
    pub fn input_types(&self) -> Vec<&Type<TA>> {
        self.inputs.iter().map(|(_, t)| t).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_type() -> Type<()> {
        Type::reference((), FQName::fqn("Morphir.SDK", "Basics", "Int"), vec![])
    }

    fn increment() -> ValueDefinition<(), u32> {
        ValueDefinition::new(
            vec![(Name::from("x"), 0, int_type())],
            int_type(),
            Value::apply(
                1,
                Value::Reference(2, FQName::fqn("Morphir.SDK", "Basics", "add")),
                Value::variable(3, "x"),
            ),
        )
    }

    #[test]
    fn test_children_of_let_definition() {
        let v = Value::LetDefinition(
            0,
            Name::from("inc"),
            Box::new(increment()),
            Box::new(Value::Unit(9)),
        );
        let kinds: Vec<_> = v.children().iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, ["Apply", "Unit"]);
    }

    #[test]
    fn test_children_of_pattern_match() {
        let v: Value<(), ()> = Value::PatternMatch(
            (),
            Box::new(Value::variable((), "x")),
            vec![
                (Pattern::WildcardPattern(()), Value::literal((), 1i64)),
                (Pattern::UnitPattern(()), Value::Unit(())),
            ],
        );
        assert_eq!(v.children().len(), 3);
    }

    #[test]
    fn test_equal_by_uses_both_comparators() {
        let def = increment();
        let mut other = def.clone();
        other.input_types[0].1 = 42;

        let always = |_: &(), _: &()| true;
        assert!(def.equal_by(&other, &always, &|_, _| true));
        assert!(!def.equal_by(&other, &always, &|a: &u32, b: &u32| a == b));
    }

    #[test]
    fn test_equal_by_short_circuits_on_variant() {
        let a: Value<(), ()> = Value::Unit(());
        let b: Value<(), ()> = Value::Tuple((), vec![]);
        assert!(!a.equal_by(&b, &|_, _| true, &|_, _| true));
    }

    #[test]
    fn test_to_specification() {
        let spec = increment().to_specification();
        assert_eq!(spec.inputs.len(), 1);
        assert_eq!(spec.inputs[0].0, Name::from("x"));
        assert!(spec.output.equal_by(&int_type(), &|_, _| true));
        assert_eq!(spec.input_types().len(), 1);
    }
}
