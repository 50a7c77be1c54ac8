//! Type specifications and definitions.
//!
//! A [`TypeSpecification`] is what a module exposes about a type; a
//! [`TypeDefinition`] is the full implementation. Custom type constructors
//! are kept in declaration order.

use super::access::AccessControlled;
use super::types::Type;
use crate::naming::{FQName, Name};

/// A constructor of a custom type: `Just a` in `type Maybe a = Just a | Nothing`
#[derive(Debug, Clone, PartialEq)]
pub struct Constructor<A> {
    pub name: Name,
    pub args: Vec<(Name, Type<A>)>,
}

/// Constructor table of a custom type.
pub type TypeConstructors<A> = Vec<Constructor<A>>;

impl<A> Constructor<A> {
    pub fn new(name: impl Into<Name>, args: Vec<(Name, Type<A>)>) -> Self {
        Constructor {
            name: name.into(),
            args,
        }
    }

    /// Constructor without arguments
    pub fn constant(name: impl Into<Name>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn equal_by<F>(&self, other: &Constructor<A>, eq_attrs: &F) -> bool
    where
        F: Fn(&A, &A) -> bool,
    {
        self.name == other.name
            && self.args.len() == other.args.len()
            && self
                .args
                .iter()
                .zip(&other.args)
                .all(|((n1, t1), (n2, t2))| n1 == n2 && t1.equal_by(t2, eq_attrs))
    }
}

pub(crate) fn constructors_equal_by<A, F>(
    left: &[Constructor<A>],
    right: &[Constructor<A>],
    eq_attrs: &F,
) -> bool
where
    F: Fn(&A, &A) -> bool,
{
    left.len() == right.len() && left.iter().zip(right).all(|(l, r)| l.equal_by(r, eq_attrs))
}

// ----------------------------------------------------------------------------
// Specification
// ----------------------------------------------------------------------------

/// Conversion functions of a derived type.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedTypeSpecificationDetails<A> {
    pub base_type: Type<A>,
    pub from_base_type: FQName,
    pub to_base_type: FQName,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpecification<A> {
    /// `type alias Age = Int`
    TypeAliasSpecification {
        type_params: Vec<Name>,
        type_expr: Type<A>,
    },

    /// Type whose structure is hidden
    OpaqueTypeSpecification { type_params: Vec<Name> },

    CustomTypeSpecification {
        type_params: Vec<Name>,
        constructors: TypeConstructors<A>,
    },

    /// Opaque type backed by a base type and a pair of conversion functions
    DerivedTypeSpecification {
        type_params: Vec<Name>,
        details: DerivedTypeSpecificationDetails<A>,
    },
}

impl<A> TypeSpecification<A> {
    pub fn type_alias(type_params: Vec<Name>, type_expr: Type<A>) -> Self {
        TypeSpecification::TypeAliasSpecification {
            type_params,
            type_expr,
        }
    }

    pub fn opaque(type_params: Vec<Name>) -> Self {
        TypeSpecification::OpaqueTypeSpecification { type_params }
    }

    pub fn custom(type_params: Vec<Name>, constructors: TypeConstructors<A>) -> Self {
        TypeSpecification::CustomTypeSpecification {
            type_params,
            constructors,
        }
    }

    pub fn type_params(&self) -> &[Name] {
        match self {
            TypeSpecification::TypeAliasSpecification { type_params, .. }
            | TypeSpecification::OpaqueTypeSpecification { type_params }
            | TypeSpecification::CustomTypeSpecification { type_params, .. }
            | TypeSpecification::DerivedTypeSpecification { type_params, .. } => type_params,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TypeSpecification::TypeAliasSpecification { .. } => "TypeAliasSpecification",
            TypeSpecification::OpaqueTypeSpecification { .. } => "OpaqueTypeSpecification",
            TypeSpecification::CustomTypeSpecification { .. } => "CustomTypeSpecification",
            TypeSpecification::DerivedTypeSpecification { .. } => "DerivedTypeSpecification",
        }
    }

    pub fn equal_by<F>(&self, other: &TypeSpecification<A>, eq_attrs: &F) -> bool
    where
        F: Fn(&A, &A) -> bool,
    {
        use TypeSpecification::*;
        match (self, other) {
            (
                TypeAliasSpecification {
                    type_params: p1,
                    type_expr: t1,
                },
                TypeAliasSpecification {
                    type_params: p2,
                    type_expr: t2,
                },
            ) => p1 == p2 && t1.equal_by(t2, eq_attrs),
            (
                OpaqueTypeSpecification { type_params: p1 },
                OpaqueTypeSpecification { type_params: p2 },
            ) => p1 == p2,
            (
                CustomTypeSpecification {
                    type_params: p1,
                    constructors: c1,
                },
                CustomTypeSpecification {
                    type_params: p2,
                    constructors: c2,
                },
            ) => p1 == p2 && constructors_equal_by(c1, c2, eq_attrs),
            (
                DerivedTypeSpecification {
                    type_params: p1,
                    details: d1,
                },
                DerivedTypeSpecification {
                    type_params: p2,
                    details: d2,
                },
            ) => {
                p1 == p2
                    && d1.base_type.equal_by(&d2.base_type, eq_attrs)
                    && d1.from_base_type == d2.from_base_type
                    && d1.to_base_type == d2.to_base_type
            }
            _ => false,
        }
    }
}

// ----------------------------------------------------------------------------
// Definition
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinition<A> {
    /// `type alias Person = { name : String, age : Int }`
    TypeAliasDefinition {
        type_params: Vec<Name>,
        type_expr: Type<A>,
    },

    /// `type Maybe a = Just a | Nothing`
    ///
    /// Private constructors make the type opaque outside its module.
    CustomTypeDefinition {
        type_params: Vec<Name>,
        constructors: AccessControlled<TypeConstructors<A>>,
    },
}

impl<A> TypeDefinition<A> {
    pub fn type_alias(type_params: Vec<Name>, type_expr: Type<A>) -> Self {
        TypeDefinition::TypeAliasDefinition {
            type_params,
            type_expr,
        }
    }

    pub fn custom_type(
        type_params: Vec<Name>,
        constructors: AccessControlled<TypeConstructors<A>>,
    ) -> Self {
        TypeDefinition::CustomTypeDefinition {
            type_params,
            constructors,
        }
    }

    pub fn type_params(&self) -> &[Name] {
        match self {
            TypeDefinition::TypeAliasDefinition { type_params, .. }
            | TypeDefinition::CustomTypeDefinition { type_params, .. } => type_params,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TypeDefinition::TypeAliasDefinition { .. } => "TypeAliasDefinition",
            TypeDefinition::CustomTypeDefinition { .. } => "CustomTypeDefinition",
        }
    }

    /// What this definition exposes: aliases stay aliases, custom types with
    /// private constructors become opaque.
    pub fn to_specification(&self) -> TypeSpecification<A>
    where
        A: Clone,
    {
        match self {
            TypeDefinition::TypeAliasDefinition {
                type_params,
                type_expr,
            } => TypeSpecification::type_alias(type_params.clone(), type_expr.clone()),
            TypeDefinition::CustomTypeDefinition {
                type_params,
                constructors,
            } => match constructors.with_public_access() {
                Some(ctors) => TypeSpecification::custom(type_params.clone(), ctors.clone()),
                None => TypeSpecification::opaque(type_params.clone()),
            },
        }
    }

    pub fn equal_by<F>(&self, other: &TypeDefinition<A>, eq_attrs: &F) -> bool
    where
        F: Fn(&A, &A) -> bool,
    {
        use TypeDefinition::*;
        match (self, other) {
            (
                TypeAliasDefinition {
                    type_params: p1,
                    type_expr: t1,
                },
                TypeAliasDefinition {
                    type_params: p2,
                    type_expr: t2,
                },
            ) => p1 == p2 && t1.equal_by(t2, eq_attrs),
            (
                CustomTypeDefinition {
                    type_params: p1,
                    constructors: c1,
                },
                CustomTypeDefinition {
                    type_params: p2,
                    constructors: c2,
                },
            ) => p1 == p2 && c1.equal_by(c2, |l, r| constructors_equal_by(l, r, eq_attrs)),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maybe_ctors() -> TypeConstructors<()> {
        vec![
            Constructor::new("Just", vec![(Name::from("value"), Type::variable((), "a"))]),
            Constructor::constant("Nothing"),
        ]
    }

    #[test]
    fn test_custom_type_definition() {
        let def = TypeDefinition::custom_type(
            vec![Name::from("a")],
            AccessControlled::public(maybe_ctors()),
        );
        assert_eq!(def.type_params().len(), 1);
        assert_eq!(def.kind(), "CustomTypeDefinition");

        match def.to_specification() {
            TypeSpecification::CustomTypeSpecification { constructors, .. } => {
                assert_eq!(constructors.len(), 2);
                assert_eq!(constructors[1].name, Name::from("Nothing"));
            }
            other => panic!("expected custom specification, got {}", other.kind()),
        }
    }

    #[test]
    fn test_private_constructors_become_opaque() {
        let def = TypeDefinition::custom_type(vec![], AccessControlled::private(maybe_ctors()));
        assert_eq!(def.to_specification(), TypeSpecification::opaque(vec![]));
    }

    #[test]
    fn test_alias_to_specification() {
        let def = TypeDefinition::type_alias(vec![], Type::Unit(()));
        assert_eq!(
            def.to_specification(),
            TypeSpecification::type_alias(vec![], Type::Unit(()))
        );
    }

    #[test]
    fn test_equal_by_compares_access() {
        let public = TypeDefinition::custom_type(vec![], AccessControlled::public(maybe_ctors()));
        let private = TypeDefinition::custom_type(vec![], AccessControlled::private(maybe_ctors()));
        assert!(!public.equal_by(&private, &|_, _| true));
        assert!(public.equal_by(&public.clone(), &|_, _| true));
    }

    #[test]
    fn test_derived_specification_equality() {
        let details = |to: &str| DerivedTypeSpecificationDetails {
            base_type: Type::Unit(()),
            from_base_type: FQName::fqn("my", "dates", "fromString"),
            to_base_type: FQName::fqn("my", "dates", to),
        };
        let a: TypeSpecification<()> = TypeSpecification::DerivedTypeSpecification {
            type_params: vec![],
            details: details("toString"),
        };
        let b = TypeSpecification::DerivedTypeSpecification {
            type_params: vec![],
            details: details("render"),
        };
        assert!(a.equal_by(&a.clone(), &|_, _| true));
        assert!(!a.equal_by(&b, &|_, _| true));
    }
}
