//! Naming primitives for the Morphir IR.
//!
//! [`Name`], [`Path`], [`FQName`] and [`QName`] are the leaves of the model.
//! Their JSON form is the same in every format version, so they carry plain
//! serde implementations that the versioned codec reuses.

pub mod fqname;
pub mod module_name;
pub mod name;
pub mod path;
pub mod qname;

pub use fqname::FQName;
pub use module_name::{ModuleName, PackageName, QualifiedModuleName};
pub use name::Name;
pub use path::Path;
pub use qname::QName;
