//! Match, fold and map over [`Type`] trees.
//!
//! Handlers are registered per variant on [`TypeCases`] (single-level
//! dispatch) or [`TypeFold`] (post-order reduction). A handler that was not
//! registered is reported as a [`TraversalError`] naming the variant; the
//! `must_*` functions turn that error into a panic for call sites that
//! already register every handler.
//!
//! # Example
//!
//! ```ignore
//! // Replace every unit type with a type variable `u`
//! let rewritten = map_type(tpe, |node| match node {
//!     Type::Unit(a) => Type::variable(a, "u"),
//!     other => other,
//! });
//! ```

use crate::error::TraversalError;
use crate::ir::types::{Field, Type};
use crate::naming::{FQName, Name};
use std::convert::Infallible;

fn variant_name<A>(tpe: &Type<A>) -> &'static str {
    match tpe {
        Type::Variable(..) => "TypeVariable",
        Type::Reference(..) => "TypeReference",
        Type::Tuple(..) => "TypeTuple",
        Type::Record(..) => "TypeRecord",
        Type::ExtensibleRecord(..) => "TypeExtensibleRecord",
        Type::Function(..) => "TypeFunction",
        Type::Unit(..) => "TypeUnit",
    }
}

// =============================================================================
// Match
// =============================================================================

/// Per-variant handlers for [`match_type`]. Each handler receives the
/// variant's parts.
pub struct TypeCases<'a, A, R> {
    variable: Option<Box<dyn Fn(&A, &Name) -> R + 'a>>,
    reference: Option<Box<dyn Fn(&A, &FQName, &[Type<A>]) -> R + 'a>>,
    tuple: Option<Box<dyn Fn(&A, &[Type<A>]) -> R + 'a>>,
    record: Option<Box<dyn Fn(&A, &[Field<A>]) -> R + 'a>>,
    extensible_record: Option<Box<dyn Fn(&A, &Name, &[Field<A>]) -> R + 'a>>,
    function: Option<Box<dyn Fn(&A, &Type<A>, &Type<A>) -> R + 'a>>,
    unit: Option<Box<dyn Fn(&A) -> R + 'a>>,
}

impl<'a, A, R> Default for TypeCases<'a, A, R> {
    fn default() -> Self {
        Self {
            variable: None,
            reference: None,
            tuple: None,
            record: None,
            extensible_record: None,
            function: None,
            unit: None,
        }
    }
}

impl<'a, A, R> TypeCases<'a, A, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variable(mut self, f: impl Fn(&A, &Name) -> R + 'a) -> Self {
        self.variable = Some(Box::new(f));
        self
    }

    pub fn reference(mut self, f: impl Fn(&A, &FQName, &[Type<A>]) -> R + 'a) -> Self {
        self.reference = Some(Box::new(f));
        self
    }

    pub fn tuple(mut self, f: impl Fn(&A, &[Type<A>]) -> R + 'a) -> Self {
        self.tuple = Some(Box::new(f));
        self
    }

    pub fn record(mut self, f: impl Fn(&A, &[Field<A>]) -> R + 'a) -> Self {
        self.record = Some(Box::new(f));
        self
    }

    pub fn extensible_record(mut self, f: impl Fn(&A, &Name, &[Field<A>]) -> R + 'a) -> Self {
        self.extensible_record = Some(Box::new(f));
        self
    }

    pub fn function(mut self, f: impl Fn(&A, &Type<A>, &Type<A>) -> R + 'a) -> Self {
        self.function = Some(Box::new(f));
        self
    }

    pub fn unit(mut self, f: impl Fn(&A) -> R + 'a) -> Self {
        self.unit = Some(Box::new(f));
        self
    }
}

/// Dispatch on the variant of `tpe`.
pub fn match_type<A, R>(tpe: &Type<A>, cases: &TypeCases<'_, A, R>) -> Result<R, TraversalError> {
    let result = match tpe {
        Type::Variable(a, name) => cases.variable.as_ref().map(|h| h(a, name)),
        Type::Reference(a, fq, params) => {
            cases.reference.as_ref().map(|h| h(a, fq, params.as_slice()))
        }
        Type::Tuple(a, elements) => cases.tuple.as_ref().map(|h| h(a, elements.as_slice())),
        Type::Record(a, fields) => cases.record.as_ref().map(|h| h(a, fields.as_slice())),
        Type::ExtensibleRecord(a, name, fields) => {
            cases.extensible_record.as_ref().map(|h| h(a, name, fields.as_slice()))
        }
        Type::Function(a, arg, res) => {
            cases.function.as_ref().map(|h| h(a, arg.as_ref(), res.as_ref()))
        }
        Type::Unit(a) => cases.unit.as_ref().map(|h| h(a)),
    };
    result.ok_or(TraversalError::MissingHandler {
        variant: variant_name(tpe),
    })
}

/// Like [`match_type`] but panics when the handler is missing.
pub fn must_match_type<A, R>(tpe: &Type<A>, cases: &TypeCases<'_, A, R>) -> R {
    match_type(tpe, cases).unwrap_or_else(|err| panic!("{err}"))
}

// =============================================================================
// Fold
// =============================================================================

/// A record field whose type has already been folded.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldedField<R> {
    pub name: Name,
    pub tpe: R,
}

/// Post-order algebra for [`fold_type`]: every handler receives the folded
/// results of its children.
pub struct TypeFold<'a, A, R> {
    variable: Option<Box<dyn Fn(&A, &Name) -> R + 'a>>,
    reference: Option<Box<dyn Fn(&A, &FQName, Vec<R>) -> R + 'a>>,
    tuple: Option<Box<dyn Fn(&A, Vec<R>) -> R + 'a>>,
    record: Option<Box<dyn Fn(&A, Vec<FoldedField<R>>) -> R + 'a>>,
    extensible_record: Option<Box<dyn Fn(&A, &Name, Vec<FoldedField<R>>) -> R + 'a>>,
    function: Option<Box<dyn Fn(&A, R, R) -> R + 'a>>,
    unit: Option<Box<dyn Fn(&A) -> R + 'a>>,
}

impl<'a, A, R> Default for TypeFold<'a, A, R> {
    fn default() -> Self {
        Self {
            variable: None,
            reference: None,
            tuple: None,
            record: None,
            extensible_record: None,
            function: None,
            unit: None,
        }
    }
}

impl<'a, A, R> TypeFold<'a, A, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variable(mut self, f: impl Fn(&A, &Name) -> R + 'a) -> Self {
        self.variable = Some(Box::new(f));
        self
    }

    pub fn reference(mut self, f: impl Fn(&A, &FQName, Vec<R>) -> R + 'a) -> Self {
        self.reference = Some(Box::new(f));
        self
    }

    pub fn tuple(mut self, f: impl Fn(&A, Vec<R>) -> R + 'a) -> Self {
        self.tuple = Some(Box::new(f));
        self
    }

    pub fn record(mut self, f: impl Fn(&A, Vec<FoldedField<R>>) -> R + 'a) -> Self {
        self.record = Some(Box::new(f));
        self
    }

    pub fn extensible_record(
        mut self,
        f: impl Fn(&A, &Name, Vec<FoldedField<R>>) -> R + 'a,
    ) -> Self {
        self.extensible_record = Some(Box::new(f));
        self
    }

    pub fn function(mut self, f: impl Fn(&A, R, R) -> R + 'a) -> Self {
        self.function = Some(Box::new(f));
        self
    }

    pub fn unit(mut self, f: impl Fn(&A) -> R + 'a) -> Self {
        self.unit = Some(Box::new(f));
        self
    }
}

/// Reduce a type tree with `fold`. Children are folded before their parent.
pub fn fold_type<A, R>(tpe: &Type<A>, fold: &TypeFold<'_, A, R>) -> Result<R, TraversalError> {
    let missing = || TraversalError::MissingFoldHandler {
        variant: variant_name(tpe),
    };

    match tpe {
        Type::Variable(a, name) => {
            let handler = fold.variable.as_ref().ok_or_else(missing)?;
            Ok(handler(a, name))
        }
        Type::Reference(a, fq, params) => {
            let handler = fold.reference.as_ref().ok_or_else(missing)?;
            let params = fold_types(params, fold)?;
            Ok(handler(a, fq, params))
        }
        Type::Tuple(a, elements) => {
            let handler = fold.tuple.as_ref().ok_or_else(missing)?;
            let elements = fold_types(elements, fold)?;
            Ok(handler(a, elements))
        }
        Type::Record(a, fields) => {
            let handler = fold.record.as_ref().ok_or_else(missing)?;
            let fields = fold_fields(fields, fold)?;
            Ok(handler(a, fields))
        }
        Type::ExtensibleRecord(a, name, fields) => {
            let handler = fold.extensible_record.as_ref().ok_or_else(missing)?;
            let fields = fold_fields(fields, fold)?;
            Ok(handler(a, name, fields))
        }
        Type::Function(a, arg, res) => {
            let handler = fold.function.as_ref().ok_or_else(missing)?;
            let arg = fold_type(arg, fold)?;
            let res = fold_type(res, fold)?;
            Ok(handler(a, arg, res))
        }
        Type::Unit(a) => {
            let handler = fold.unit.as_ref().ok_or_else(missing)?;
            Ok(handler(a))
        }
    }
}

/// Like [`fold_type`] but panics when a handler is missing.
pub fn must_fold_type<A, R>(tpe: &Type<A>, fold: &TypeFold<'_, A, R>) -> R {
    fold_type(tpe, fold).unwrap_or_else(|err| panic!("{err}"))
}

fn fold_types<A, R>(
    items: &[Type<A>],
    fold: &TypeFold<'_, A, R>,
) -> Result<Vec<R>, TraversalError> {
    items.iter().map(|item| fold_type(item, fold)).collect()
}

fn fold_fields<A, R>(
    fields: &[Field<A>],
    fold: &TypeFold<'_, A, R>,
) -> Result<Vec<FoldedField<R>>, TraversalError> {
    fields
        .iter()
        .map(|field| {
            Ok(FoldedField {
                name: field.name.clone(),
                tpe: fold_type(&field.tpe, fold)?,
            })
        })
        .collect()
}

// =============================================================================
// Map
// =============================================================================

/// Bottom-up rewrite. Children are rewritten first, the node is rebuilt with
/// them and `rewrite` is then applied to the rebuilt node. Pass `Ok` to
/// rebuild the tree unchanged.
pub fn try_map_type<A, E, F>(tpe: Type<A>, rewrite: &F) -> Result<Type<A>, E>
where
    F: Fn(Type<A>) -> Result<Type<A>, E>,
{
    let rebuilt = match tpe {
        Type::Variable(a, name) => Type::Variable(a, name),
        Type::Reference(a, fq, params) => Type::Reference(a, fq, try_map_types(params, rewrite)?),
        Type::Tuple(a, elements) => Type::Tuple(a, try_map_types(elements, rewrite)?),
        Type::Record(a, fields) => Type::Record(a, try_map_fields(fields, rewrite)?),
        Type::ExtensibleRecord(a, name, fields) => {
            Type::ExtensibleRecord(a, name, try_map_fields(fields, rewrite)?)
        }
        Type::Function(a, arg, res) => Type::Function(
            a,
            Box::new(try_map_type(*arg, rewrite)?),
            Box::new(try_map_type(*res, rewrite)?),
        ),
        Type::Unit(a) => Type::Unit(a),
    };
    rewrite(rebuilt)
}

/// Infallible [`try_map_type`].
pub fn map_type<A, F>(tpe: Type<A>, rewrite: F) -> Type<A>
where
    F: Fn(Type<A>) -> Type<A>,
{
    let rewrite = |node: Type<A>| Ok::<_, Infallible>(rewrite(node));
    match try_map_type(tpe, &rewrite) {
        Ok(tpe) => tpe,
        Err(never) => match never {},
    }
}

fn try_map_types<A, E, F>(items: Vec<Type<A>>, rewrite: &F) -> Result<Vec<Type<A>>, E>
where
    F: Fn(Type<A>) -> Result<Type<A>, E>,
{
    items.into_iter().map(|item| try_map_type(item, rewrite)).collect()
}

fn try_map_fields<A, E, F>(fields: Vec<Field<A>>, rewrite: &F) -> Result<Vec<Field<A>>, E>
where
    F: Fn(Type<A>) -> Result<Type<A>, E>,
{
    fields
        .into_iter()
        .map(|field| {
            Ok(Field {
                name: field.name,
                tpe: try_map_type(field.tpe, rewrite)?,
            })
        })
        .collect()
}

/// Re-parameterize a type tree over new attributes, keeping its shape.
pub fn map_type_attributes<A, B, F>(tpe: &Type<A>, f: &F) -> Type<B>
where
    F: Fn(&A) -> B,
{
    let map_all = |items: &[Type<A>]| -> Vec<Type<B>> {
        items.iter().map(|t| map_type_attributes(t, f)).collect()
    };
    let map_fields = |fields: &[Field<A>]| -> Vec<Field<B>> {
        fields
            .iter()
            .map(|field| Field {
                name: field.name.clone(),
                tpe: map_type_attributes(&field.tpe, f),
            })
            .collect()
    };

    match tpe {
        Type::Variable(a, name) => Type::Variable(f(a), name.clone()),
        Type::Reference(a, fq, params) => Type::Reference(f(a), fq.clone(), map_all(params)),
        Type::Tuple(a, elements) => Type::Tuple(f(a), map_all(elements)),
        Type::Record(a, fields) => Type::Record(f(a), map_fields(fields)),
        Type::ExtensibleRecord(a, name, fields) => {
            Type::ExtensibleRecord(f(a), name.clone(), map_fields(fields))
        }
        Type::Function(a, arg, res) => Type::Function(
            f(a),
            Box::new(map_type_attributes(arg, f)),
            Box::new(map_type_attributes(res, f)),
        ),
        Type::Unit(a) => Type::Unit(f(a)),
    }
}

// =============================================================================
// Derived queries
// =============================================================================

impl<A> Type<A> {
    /// Number of type nodes in this tree, including `self`.
    pub fn count_nodes(&self) -> usize {
        must_fold_type(self, &counting_fold(&|_| 1))
    }

    /// Names of type variables in the order they are first seen. Extensible
    /// record variables are included.
    pub fn collect_type_variables(&self) -> Vec<Name> {
        let fold = TypeFold::new()
            .variable(|_, name: &Name| vec![name.clone()])
            .reference(|_, _, params: Vec<Vec<Name>>| params.concat())
            .tuple(|_, elements: Vec<Vec<Name>>| elements.concat())
            .record(|_, fields: Vec<FoldedField<Vec<Name>>>| {
                fields.into_iter().flat_map(|f| f.tpe).collect()
            })
            .extensible_record(|_, name: &Name, fields: Vec<FoldedField<Vec<Name>>>| {
                std::iter::once(name.clone())
                    .chain(fields.into_iter().flat_map(|f| f.tpe))
                    .collect()
            })
            .function(|_, arg: Vec<Name>, res: Vec<Name>| [arg, res].concat())
            .unit(|_| Vec::new());

        let mut seen: Vec<Name> = Vec::new();
        for name in must_fold_type(self, &fold) {
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        seen
    }
}

/// Number of nodes of the given variant (`"TypeVariable"`, `"TypeUnit"`, ...).
pub fn count_variant<A>(tpe: &Type<A>, variant: &str) -> usize {
    must_fold_type(tpe, &counting_fold(&|name| usize::from(name == variant)))
}

/// Fold that sums `weight(variant)` over every node of the tree.
fn counting_fold<'a, A>(weight: &'a dyn Fn(&'static str) -> usize) -> TypeFold<'a, A, usize> {
    TypeFold::new()
        .variable(move |_, _| weight("TypeVariable"))
        .reference(move |_, _, params| weight("TypeReference") + params.iter().sum::<usize>())
        .tuple(move |_, elements| weight("TypeTuple") + elements.iter().sum::<usize>())
        .record(move |_, fields| weight("TypeRecord") + fields.iter().map(|f| f.tpe).sum::<usize>())
        .extensible_record(move |_, _, fields| {
            weight("TypeExtensibleRecord") + fields.iter().map(|f| f.tpe).sum::<usize>()
        })
        .function(move |_, arg, res| weight("TypeFunction") + arg + res)
        .unit(move |_| weight("TypeUnit"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Type<u32> {
        Type::variable(0, name)
    }

    fn unit_tree() -> Type<()> {
        Type::function(
            (),
            Type::Unit(()),
            Type::Tuple((), vec![Type::Unit(()), Type::Unit(())]),
        )
    }

    #[test]
    fn test_match_type_selects_handler() {
        let tpe = Type::variable(123u32, "a");
        let cases = TypeCases::new()
            .variable(|attrs: &u32, name: &Name| format!("{attrs}:{name}"))
            .unit(|_| "unit".to_string());

        assert_eq!(match_type(&tpe, &cases).unwrap(), "123:a");
        assert_eq!(must_match_type(&Type::Unit(1), &cases), "unit");
    }

    #[test]
    fn test_match_type_missing_handler() {
        let cases: TypeCases<'_, (), ()> = TypeCases::new();
        let err = match_type(&Type::Unit(()), &cases).unwrap_err();
        assert_eq!(err, TraversalError::MissingHandler { variant: "TypeUnit" });
    }

    #[test]
    #[should_panic(expected = "ir: missing handler for TypeRecord")]
    fn test_must_match_type_panics() {
        let cases: TypeCases<'_, (), ()> = TypeCases::new();
        must_match_type(&Type::Record((), vec![]), &cases);
    }

    #[test]
    fn test_fold_is_post_order() {
        let tpe = Type::function(0u32, var("a"), Type::Tuple(0, vec![var("b"), var("c")]));
        let fold = TypeFold::new()
            .variable(|_, name: &Name| name.to_string())
            .tuple(|_, elements: Vec<String>| format!("({})", elements.join(",")))
            .function(|_, arg: String, res: String| format!("{arg}->{res}"));

        assert_eq!(fold_type(&tpe, &fold).unwrap(), "a->(b,c)");
    }

    #[test]
    fn test_fold_reports_missing_handler() {
        let fold: TypeFold<'_, (), usize> = TypeFold::new().unit(|_| 1);
        let err = fold_type(&unit_tree(), &fold).unwrap_err();
        assert_eq!(
            err,
            TraversalError::MissingFoldHandler {
                variant: "TypeFunction"
            }
        );
    }

    #[test]
    fn test_map_type_replaces_units_with_variables() {
        let mapped = map_type(unit_tree(), |node| match node {
            Type::Unit(a) => Type::variable(a, "u"),
            other => other,
        });

        assert_eq!(count_variant(&mapped, "TypeVariable"), 3);
        assert_eq!(count_variant(&mapped, "TypeUnit"), 0);
        assert_eq!(mapped.count_nodes(), unit_tree().count_nodes());
    }

    #[test]
    fn test_map_type_rewrites_rebuilt_parent() {
        // The rewrite sees the parent after its children were rewritten
        let mapped = map_type(unit_tree(), |node| match node {
            Type::Tuple(a, elements)
                if elements.iter().all(|e| matches!(e, Type::Variable(..))) =>
            {
                Type::Unit(a)
            }
            Type::Unit(a) => Type::variable(a, "u"),
            other => other,
        });
        match mapped {
            Type::Function(_, _, res) => assert!(matches!(*res, Type::Unit(()))),
            other => panic!("unexpected {}", other.kind()),
        }
    }

    #[test]
    fn test_try_map_type_propagates_errors() {
        let result = try_map_type(unit_tree(), &|node: Type<()>| match node {
            Type::Tuple(..) => Err("tuples not allowed"),
            other => Ok(other),
        });
        assert_eq!(result.unwrap_err(), "tuples not allowed");
    }

    #[test]
    fn test_map_type_attributes_keeps_shape() {
        let tpe = Type::Record(
            1u32,
            vec![
                Field::new("name", var("a")),
                Field::new("age", Type::Unit(2)),
            ],
        );
        let mapped = map_type_attributes(&tpe, &|a: &u32| a.to_string());

        assert_eq!(mapped.attributes(), "1");
        assert!(tpe.equal_by(&map_type_attributes(&mapped, &|_| 0u32), &|_, _| true));
    }

    #[test]
    fn test_collect_type_variables() {
        let tpe = Type::function(
            0u32,
            Type::ExtensibleRecord(0, Name::from("r"), vec![Field::new("x", var("a"))]),
            Type::Tuple(0, vec![var("b"), var("a")]),
        );
        assert_eq!(
            tpe.collect_type_variables(),
            vec![Name::from("r"), Name::from("a"), Name::from("b")]
        );
        assert_eq!(tpe.count_nodes(), 6);
    }
}
