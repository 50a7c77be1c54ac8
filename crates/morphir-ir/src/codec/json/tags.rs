//! Tag tables: one fixed bijection per entity kind and format version.

use super::FormatVersion;
use crate::error::CodecError;
use tracing::trace;

pub(crate) trait WireTag: Sized + Copy + 'static {
    const ENTITY: &'static str;
    const ALL: &'static [Self];

    fn v1(self) -> &'static str;
    fn pascal(self) -> &'static str;

    fn tag(self, version: FormatVersion) -> &'static str {
        match version {
            FormatVersion::V1 => self.v1(),
            FormatVersion::V2 | FormatVersion::V3 => self.pascal(),
        }
    }

    /// Resolve a wire tag. Tags of another format version are rejected.
    fn parse(version: FormatVersion, tag: &str) -> Result<Self, CodecError> {
        let found = Self::ALL.iter().copied().find(|t| t.tag(version) == tag);
        trace!(entity = Self::ENTITY, %version, tag, resolved = found.is_some(), "resolve tag");
        found.ok_or_else(|| CodecError::UnknownTag {
            entity: Self::ENTITY,
            version,
            tag: tag.to_string(),
        })
    }
}

macro_rules! wire_tags {
    (
        $name:ident, $entity:literal {
            $($variant:ident => ($v1:literal, $pascal:literal)),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub(crate) enum $name {
            $($variant),+
        }

        impl WireTag for $name {
            const ENTITY: &'static str = $entity;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn v1(self) -> &'static str {
                match self {
                    $($name::$variant => $v1),+
                }
            }

            fn pascal(self) -> &'static str {
                match self {
                    $($name::$variant => $pascal),+
                }
            }
        }
    };
}

wire_tags!(TypeTag, "Type" {
    Variable => ("variable", "Variable"),
    Reference => ("reference", "Reference"),
    Tuple => ("tuple", "Tuple"),
    Record => ("record", "Record"),
    ExtensibleRecord => ("extensible_record", "ExtensibleRecord"),
    Function => ("function", "Function"),
    Unit => ("unit", "Unit"),
});

wire_tags!(PatternTag, "Pattern" {
    Wildcard => ("wildcard_pattern", "WildcardPattern"),
    As => ("as_pattern", "AsPattern"),
    Tuple => ("tuple_pattern", "TuplePattern"),
    Constructor => ("constructor_pattern", "ConstructorPattern"),
    EmptyList => ("empty_list_pattern", "EmptyListPattern"),
    HeadTail => ("head_tail_pattern", "HeadTailPattern"),
    Literal => ("literal_pattern", "LiteralPattern"),
    Unit => ("unit_pattern", "UnitPattern"),
});

wire_tags!(ValueTag, "Value" {
    Literal => ("literal", "Literal"),
    Constructor => ("constructor", "Constructor"),
    Tuple => ("tuple", "Tuple"),
    List => ("list", "List"),
    Record => ("record", "Record"),
    Variable => ("variable", "Variable"),
    Reference => ("reference", "Reference"),
    Field => ("field", "Field"),
    FieldFunction => ("field_function", "FieldFunction"),
    Apply => ("apply", "Apply"),
    Lambda => ("lambda", "Lambda"),
    LetDefinition => ("let_definition", "LetDefinition"),
    LetRecursion => ("let_recursion", "LetRecursion"),
    Destructure => ("destructure", "Destructure"),
    IfThenElse => ("if_then_else", "IfThenElse"),
    PatternMatch => ("pattern_match", "PatternMatch"),
    UpdateRecord => ("update_record", "UpdateRecord"),
    Unit => ("unit", "Unit"),
});

wire_tags!(LiteralTag, "Literal" {
    Bool => ("bool_literal", "BoolLiteral"),
    Char => ("char_literal", "CharLiteral"),
    String => ("string_literal", "StringLiteral"),
    WholeNumber => ("int_literal", "WholeNumberLiteral"),
    Float => ("float_literal", "FloatLiteral"),
    Decimal => ("decimal_literal", "DecimalLiteral"),
});

wire_tags!(TypeSpecificationTag, "TypeSpecification" {
    TypeAlias => ("type_alias_specification", "TypeAliasSpecification"),
    Opaque => ("opaque_type_specification", "OpaqueTypeSpecification"),
    Custom => ("custom_type_specification", "CustomTypeSpecification"),
    Derived => ("derived_type_specification", "DerivedTypeSpecification"),
});

wire_tags!(TypeDefinitionTag, "TypeDefinition" {
    TypeAlias => ("type_alias_definition", "TypeAliasDefinition"),
    Custom => ("custom_type_definition", "CustomTypeDefinition"),
});

wire_tags!(AccessTag, "AccessControlled" {
    Public => ("public", "Public"),
    Private => ("private", "Private"),
});

wire_tags!(DistributionTag, "Distribution" {
    Library => ("library", "Library"),
});

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_bijection<T: WireTag + PartialEq + std::fmt::Debug>() {
        for version in FormatVersion::ALL {
            for tag in T::ALL {
                assert_eq!(T::parse(version, tag.tag(version)).unwrap(), *tag);
            }
        }
    }

    #[test]
    fn test_tag_tables_are_bijections() {
        assert_bijection::<TypeTag>();
        assert_bijection::<PatternTag>();
        assert_bijection::<ValueTag>();
        assert_bijection::<LiteralTag>();
        assert_bijection::<TypeSpecificationTag>();
        assert_bijection::<TypeDefinitionTag>();
        assert_bijection::<AccessTag>();
        assert_bijection::<DistributionTag>();
    }

    #[test]
    fn test_cross_version_tag_rejected() {
        let err = PatternTag::parse(FormatVersion::V3, "wildcard_pattern").unwrap_err();
        assert_eq!(
            err.to_string(),
            "codec/json: unknown v3 Pattern tag \"wildcard_pattern\""
        );
        assert!(TypeTag::parse(FormatVersion::V1, "ExtensibleRecord").is_err());
        assert_eq!(
            LiteralTag::parse(FormatVersion::V2, "WholeNumberLiteral").unwrap(),
            LiteralTag::WholeNumber
        );
    }
}
