//! Type expressions of the Morphir IR.
//!
//! `Type<A>` is generic over the attribute payload attached to every node.
//! Traversal (match, fold, map) lives in [`crate::traversal::types`]; the
//! versioned wire form lives in [`crate::codec::json::types`].

use crate::naming::{FQName, Name};

// ----------------------------------------------------------------------------
// Type Enum
// ----------------------------------------------------------------------------

/// Type with generic attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type<A> {
    /// Type variable such as `a` in `List a`
    Variable(A, Name),
    /// Reference to a named type with its type arguments
    Reference(A, FQName, Vec<Type<A>>),
    Tuple(A, Vec<Type<A>>),
    Record(A, Vec<Field<A>>),
    /// Record type extending the record bound to a type variable: `{ a | f : T }`
    ExtensibleRecord(A, Name, Vec<Field<A>>),
    /// Function type `argument -> result`
    Function(A, Box<Type<A>>, Box<Type<A>>),
    Unit(A),
}

impl<A> Type<A> {
    pub fn variable(attrs: A, name: impl Into<Name>) -> Self {
        Type::Variable(attrs, name.into())
    }

    pub fn reference(attrs: A, fqname: FQName, params: Vec<Type<A>>) -> Self {
        Type::Reference(attrs, fqname, params)
    }

    pub fn function(attrs: A, argument: Type<A>, result: Type<A>) -> Self {
        Type::Function(attrs, Box::new(argument), Box::new(result))
    }

    /// Attributes of this node (not of its children).
    pub fn attributes(&self) -> &A {
        match self {
            Type::Variable(a, _)
            | Type::Reference(a, _, _)
            | Type::Tuple(a, _)
            | Type::Record(a, _)
            | Type::ExtensibleRecord(a, _, _)
            | Type::Function(a, _, _)
            | Type::Unit(a) => a,
        }
    }

    /// Variant name, used in error messages and by the codec.
    pub fn kind(&self) -> &'static str {
        match self {
            Type::Variable(..) => "Variable",
            Type::Reference(..) => "Reference",
            Type::Tuple(..) => "Tuple",
            Type::Record(..) => "Record",
            Type::ExtensibleRecord(..) => "ExtensibleRecord",
            Type::Function(..) => "Function",
            Type::Unit(..) => "Unit",
        }
    }

    /// Deep structural equality with a caller-supplied attribute comparison.
    pub fn equal_by<F>(&self, other: &Type<A>, eq_attrs: &F) -> bool
    where
        F: Fn(&A, &A) -> bool,
    {
        match (self, other) {
            (Type::Variable(a1, n1), Type::Variable(a2, n2)) => eq_attrs(a1, a2) && n1 == n2,
            (Type::Reference(a1, fq1, p1), Type::Reference(a2, fq2, p2)) => {
                eq_attrs(a1, a2) && fq1 == fq2 && types_equal_by(p1, p2, eq_attrs)
            }
            (Type::Tuple(a1, e1), Type::Tuple(a2, e2)) => {
                eq_attrs(a1, a2) && types_equal_by(e1, e2, eq_attrs)
            }
            (Type::Record(a1, f1), Type::Record(a2, f2)) => {
                eq_attrs(a1, a2) && fields_equal_by(f1, f2, eq_attrs)
            }
            (Type::ExtensibleRecord(a1, n1, f1), Type::ExtensibleRecord(a2, n2, f2)) => {
                eq_attrs(a1, a2) && n1 == n2 && fields_equal_by(f1, f2, eq_attrs)
            }
            (Type::Function(a1, arg1, res1), Type::Function(a2, arg2, res2)) => {
                eq_attrs(a1, a2)
                    && arg1.equal_by(arg2, eq_attrs)
                    && res1.equal_by(res2, eq_attrs)
            }
            (Type::Unit(a1), Type::Unit(a2)) => eq_attrs(a1, a2),
            _ => false,
        }
    }
}

pub(crate) fn types_equal_by<A, F>(left: &[Type<A>], right: &[Type<A>], eq_attrs: &F) -> bool
where
    F: Fn(&A, &A) -> bool,
{
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(l, r)| l.equal_by(r, eq_attrs))
}

fn fields_equal_by<A, F>(left: &[Field<A>], right: &[Field<A>], eq_attrs: &F) -> bool
where
    F: Fn(&A, &A) -> bool,
{
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(l, r)| l.name == r.name && l.tpe.equal_by(&r.tpe, eq_attrs))
}

// ----------------------------------------------------------------------------
// Field
// ----------------------------------------------------------------------------

/// Record field: `[name, tpe]` in V1, `{"name": .., "tpe": ..}` in V2/V3
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<A> {
    pub name: Name,
    pub tpe: Type<A>,
}

impl<A> Field<A> {
    pub fn new(name: impl Into<Name>, tpe: Type<A>) -> Self {
        Self {
            name: name.into(),
            tpe,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_type() -> Type<()> {
        Type::reference((), FQName::fqn("Morphir.SDK", "Basics", "Int"), vec![])
    }

    #[test]
    fn test_attributes_and_kind() {
        let t = Type::function(1u32, Type::Unit(2), Type::Unit(3));
        assert_eq!(*t.attributes(), 1);
        assert_eq!(t.kind(), "Function");
    }

    #[test]
    fn test_equal_by_ignores_attributes_when_asked() {
        let left = Type::Record(1, vec![Field::new("age", Type::Unit(7))]);
        let right = Type::Record(2, vec![Field::new("age", Type::Unit(8))]);

        assert!(left.equal_by(&right, &|_, _| true));
        assert!(!left.equal_by(&right, &|a, b| a == b));
    }

    #[test]
    fn test_equal_by_variant_mismatch() {
        let tuple = Type::Tuple((), vec![int_type()]);
        let record = Type::Record((), vec![]);
        assert!(!tuple.equal_by(&record, &|_, _| true));
    }

    #[test]
    fn test_equal_by_checks_children_in_order() {
        let a = Type::Tuple((), vec![int_type(), Type::Unit(())]);
        let b = Type::Tuple((), vec![Type::Unit(()), int_type()]);
        assert!(!a.equal_by(&b, &|_, _| true));
        assert!(a.equal_by(&a.clone(), &|_, _| true));
    }
}
