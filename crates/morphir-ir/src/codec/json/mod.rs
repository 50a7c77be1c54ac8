//! Versioned Morphir JSON codec.
//!
//! Every entity has a byte-level `encode_*` / `decode_*` pair taking
//! [`Options`] plus one attribute codec per attribute parameter, and a
//! `*_to_json` / `*_from_json` pair working on [`serde_json::Value`] that the
//! aggregate codecs compose.
//!
//! Format versions differ in two ways:
//! - tag casing: V1 uses snake_case (`"wildcard_pattern"`), V2 and V3 use
//!   PascalCase (`"WildcardPattern"`)
//! - field shapes: record type fields are `[name, tpe]` in V1 and
//!   `{"name": .., "tpe": ..}` afterwards; access control is
//!   `["public", v]` in V1 and `{"access": "Public", "value": v}` afterwards
//!
//! Decoding with the wrong version fails instead of guessing.
//!
//! # Example
//!
//! ```ignore
//! use morphir_ir::codec::json::{self, attrs, Options};
//!
//! let bytes = json::encode_type(&Options::v1(), &attrs::encode_unit, &tpe)?;
//! let back = json::decode_type(&Options::v1(), &attrs::decode_unit, &bytes)?;
//! ```

pub mod attrs;
pub mod distribution;
pub mod literal;
pub mod module;
pub mod naming;
pub mod package;
pub mod pattern;
pub mod type_def;
pub mod types;
pub mod value;
pub mod wrappers;

mod tags;
mod wire;

pub use attrs::{AttrDecoder, AttrEncoder};
pub use distribution::{
    decode_distribution, decode_versioned_distribution, distribution_from_json,
    distribution_to_json, encode_distribution, encode_versioned_distribution,
};
pub use literal::{decode_literal, encode_literal, literal_from_json, literal_to_json};
pub use module::{
    decode_module_definition, decode_module_specification, encode_module_definition,
    encode_module_specification, module_definition_from_json, module_definition_to_json,
    module_specification_from_json, module_specification_to_json,
};
pub use naming::{
    decode_fqname, decode_name, decode_path, decode_qname, encode_fqname, encode_name,
    encode_path, encode_qname,
};
pub use package::{
    decode_package_definition, decode_package_specification, encode_package_definition,
    encode_package_specification, package_definition_from_json, package_definition_to_json,
    package_specification_from_json, package_specification_to_json,
};
pub use pattern::{decode_pattern, encode_pattern, pattern_from_json, pattern_to_json};
pub use type_def::{
    decode_type_constructors, decode_type_definition, decode_type_specification,
    encode_type_constructors, encode_type_definition, encode_type_specification,
    type_constructors_from_json, type_constructors_to_json, type_definition_from_json,
    type_definition_to_json, type_specification_from_json, type_specification_to_json,
};
pub use types::{decode_type, encode_type, type_from_json, type_to_json};
pub use value::{
    decode_value, decode_value_definition, decode_value_specification, encode_value,
    encode_value_definition, encode_value_specification, value_definition_from_json,
    value_definition_to_json, value_from_json, value_specification_from_json,
    value_specification_to_json, value_to_json,
};
pub use wrappers::{
    access_controlled_from_json, access_controlled_to_json, decode_access_controlled,
    decode_documented, documented_from_json, documented_to_json, encode_access_controlled,
    encode_documented,
};

use crate::error::CodecError;
use std::fmt;
use std::str::FromStr;

/// Wire schema epoch of the Morphir JSON format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum FormatVersion {
    V1,
    V2,
    #[default]
    V3,
}

impl FormatVersion {
    pub const ALL: [FormatVersion; 3] = [FormatVersion::V1, FormatVersion::V2, FormatVersion::V3];

    /// Number carried in the `formatVersion` field of distribution files.
    pub fn number(self) -> u64 {
        match self {
            FormatVersion::V1 => 1,
            FormatVersion::V2 => 2,
            FormatVersion::V3 => 3,
        }
    }

    pub fn from_number(number: u64) -> Result<Self, CodecError> {
        match number {
            1 => Ok(FormatVersion::V1),
            2 => Ok(FormatVersion::V2),
            3 => Ok(FormatVersion::V3),
            other => Err(CodecError::UnsupportedFormatVersion(other)),
        }
    }

    pub fn is_v1(self) -> bool {
        self == FormatVersion::V1
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number())
    }
}

/// Accepts `"1"`, `"v1"` and `"V1"` (and likewise for 2 and 3).
impl FromStr for FormatVersion {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches(['v', 'V']);
        let number: u64 = digits.parse().map_err(|_| CodecError::InvalidValue {
            entity: "FormatVersion",
            message: format!("expected 1, 2 or 3, got {s:?}"),
        })?;
        FormatVersion::from_number(number)
    }
}

/// Codec options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub format_version: FormatVersion,
}

impl Options {
    pub fn new(format_version: FormatVersion) -> Self {
        Self { format_version }
    }

    pub fn v1() -> Self {
        Self::new(FormatVersion::V1)
    }

    pub fn v2() -> Self {
        Self::new(FormatVersion::V2)
    }

    pub fn v3() -> Self {
        Self::new(FormatVersion::V3)
    }
}
