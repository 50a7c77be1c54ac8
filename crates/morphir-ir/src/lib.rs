//! Morphir IR: data model, traversal algebra and versioned JSON codec.
//!
//! ```ignore
//! use morphir_ir::codec::json::{self, Options};
//!
//! let bytes = std::fs::read("morphir-ir.json")?;
//! let (version, distribution) = json::decode_versioned_distribution(&bytes)?;
//! let v1 = json::encode_distribution(&Options::v1(), &distribution)?;
//! ```

pub mod codec;
pub mod error;
pub mod ir;
pub mod naming;
pub mod traversal;

pub use codec::json::{FormatVersion, Options};
pub use error::{CodecError, Error, ParseError, Result, TraversalError};
pub use naming::{FQName, ModuleName, Name, PackageName, Path, QName, QualifiedModuleName};
