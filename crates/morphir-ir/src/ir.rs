//! Morphir IR data model.
//!
//! Every node type is generic over its attributes: `Type<A>`, `Pattern<A>`
//! and `Value<TA, VA>`. Use `()` when no annotation is needed.
//!
//! Trees own their children exclusively. "Updating" a tree means building a
//! new one, usually through [`crate::traversal`].

pub mod access;
pub mod distribution;
pub mod documented;
pub mod literal;
pub mod module;
pub mod package;
pub mod pattern;
pub mod type_def;
pub mod types;
pub mod value;

pub use access::{Access, AccessControlled};
pub use distribution::{Distribution, DistributionPackageDefinition, Library, LibraryDependency};
pub use documented::Documented;
pub use literal::{Decimal, Literal};
pub use module::{
    ModuleDefinition, ModuleDefinitionType, ModuleDefinitionValue, ModuleSpecification,
    ModuleSpecificationType, ModuleSpecificationValue,
};
pub use package::{PackageDefinition, PackageSpecification};
pub use pattern::Pattern;
pub use type_def::{
    Constructor, DerivedTypeSpecificationDetails, TypeConstructors, TypeDefinition,
    TypeSpecification,
};
pub use types::{Field, Type};
pub use value::{Value, ValueDefinition, ValueSpecification};
