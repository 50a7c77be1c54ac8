//! Traversal algebra over the IR.
//!
//! [`types`] offers per-variant match and fold tables for [`crate::ir::Type`].
//! Patterns and values share the same contract through child-reduction folds
//! and bottom-up maps.

pub mod pattern;
pub mod types;
pub mod value;

pub use pattern::{fold_pattern, map_pattern, map_pattern_attributes, try_map_pattern};
pub use types::{
    count_variant, fold_type, map_type, map_type_attributes, match_type, must_fold_type,
    must_match_type, try_map_type, FoldedField, TypeCases, TypeFold,
};
pub use value::{
    fold_value, map_value, map_value_attributes, map_value_definition_attributes, try_map_value,
};
