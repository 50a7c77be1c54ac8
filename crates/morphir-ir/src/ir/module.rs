//! Module specifications and definitions.
//!
//! Entries keep declaration order, which is also their wire order.

use super::access::AccessControlled;
use super::documented::Documented;
use super::type_def::{TypeDefinition, TypeSpecification};
use super::value::{ValueDefinition, ValueSpecification};
use crate::naming::Name;

pub type ModuleSpecificationType<TA> = (Name, Documented<TypeSpecification<TA>>);
pub type ModuleSpecificationValue<TA> = (Name, Documented<ValueSpecification<TA>>);
pub type ModuleDefinitionType<TA> = (Name, AccessControlled<Documented<TypeDefinition<TA>>>);
pub type ModuleDefinitionValue<TA, VA> =
    (Name, AccessControlled<Documented<ValueDefinition<TA, VA>>>);

/// Exposed surface of a module.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSpecification<TA> {
    pub types: Vec<ModuleSpecificationType<TA>>,
    pub values: Vec<ModuleSpecificationValue<TA>>,
    pub doc: Option<String>,
}

impl<TA> Default for ModuleSpecification<TA> {
    fn default() -> Self {
        Self {
            types: Vec::new(),
            values: Vec::new(),
            doc: None,
        }
    }
}

impl<TA> ModuleSpecification<TA> {
    pub fn new(
        types: Vec<ModuleSpecificationType<TA>>,
        values: Vec<ModuleSpecificationValue<TA>>,
        doc: Option<String>,
    ) -> Self {
        Self { types, values, doc }
    }

    pub fn lookup_type_specification(&self, name: &Name) -> Option<&TypeSpecification<TA>> {
        self.types
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, documented)| &documented.value)
    }

    pub fn lookup_value_specification(&self, name: &Name) -> Option<&ValueSpecification<TA>> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, documented)| &documented.value)
    }

    pub fn equal_by<F>(&self, other: &ModuleSpecification<TA>, eq_ta: &F) -> bool
    where
        F: Fn(&TA, &TA) -> bool,
    {
        self.doc == other.doc
            && self.types.len() == other.types.len()
            && self.values.len() == other.values.len()
            && self.types.iter().zip(&other.types).all(|((n1, d1), (n2, d2))| {
                n1 == n2 && d1.equal_by(d2, |l, r| l.equal_by(r, eq_ta))
            })
            && self.values.iter().zip(&other.values).all(|((n1, d1), (n2, d2))| {
                n1 == n2 && d1.equal_by(d2, |l, r| l.equal_by(r, eq_ta))
            })
    }
}

/// Full implementation of a module.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDefinition<TA, VA> {
    pub types: Vec<ModuleDefinitionType<TA>>,
    pub values: Vec<ModuleDefinitionValue<TA, VA>>,
    pub doc: Option<String>,
}

impl<TA, VA> Default for ModuleDefinition<TA, VA> {
    fn default() -> Self {
        Self {
            types: Vec::new(),
            values: Vec::new(),
            doc: None,
        }
    }
}

impl<TA, VA> ModuleDefinition<TA, VA> {
    pub fn new(
        types: Vec<ModuleDefinitionType<TA>>,
        values: Vec<ModuleDefinitionValue<TA, VA>>,
        doc: Option<String>,
    ) -> Self {
        Self { types, values, doc }
    }

    pub fn lookup_type_definition(&self, name: &Name) -> Option<&TypeDefinition<TA>> {
        self.types
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, ac)| &ac.value().value)
    }

    pub fn lookup_value_definition(&self, name: &Name) -> Option<&ValueDefinition<TA, VA>> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, ac)| &ac.value().value)
    }

    /// The public surface of this module. Private entries are dropped, value
    /// definitions are reduced to their signatures and custom types with
    /// private constructors become opaque.
    pub fn to_specification(&self) -> ModuleSpecification<TA>
    where
        TA: Clone,
    {
        let types = self
            .types
            .iter()
            .filter_map(|(name, ac)| {
                ac.with_public_access().map(|documented| {
                    let spec = documented.value.to_specification();
                    (name.clone(), Documented::new(documented.doc.clone(), spec))
                })
            })
            .collect();

        let values = self
            .values
            .iter()
            .filter_map(|(name, ac)| {
                ac.with_public_access().map(|documented| {
                    let spec = documented.value.to_specification();
                    (name.clone(), Documented::new(documented.doc.clone(), spec))
                })
            })
            .collect();

        ModuleSpecification::new(types, values, self.doc.clone())
    }

    pub fn equal_by<FT, FV>(&self, other: &ModuleDefinition<TA, VA>, eq_ta: &FT, eq_va: &FV) -> bool
    where
        FT: Fn(&TA, &TA) -> bool,
        FV: Fn(&VA, &VA) -> bool,
    {
        self.doc == other.doc
            && self.types.len() == other.types.len()
            && self.values.len() == other.values.len()
            && self.types.iter().zip(&other.types).all(|((n1, a1), (n2, a2))| {
                n1 == n2
                    && a1.equal_by(a2, |d1, d2| d1.equal_by(d2, |l, r| l.equal_by(r, eq_ta)))
            })
            && self.values.iter().zip(&other.values).all(|((n1, a1), (n2, a2))| {
                n1 == n2
                    && a1.equal_by(a2, |d1, d2| {
                        d1.equal_by(d2, |l, r| l.equal_by(r, eq_ta, eq_va))
                    })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::type_def::Constructor;
    use crate::ir::types::Type;
    use crate::ir::value::Value;

    fn sample_module() -> ModuleDefinition<(), ()> {
        let public_type = TypeDefinition::custom_type(
            vec![],
            AccessControlled::public(vec![Constructor::constant("Red")]),
        );
        let hidden_ctors = TypeDefinition::custom_type(
            vec![],
            AccessControlled::private(vec![Constructor::constant("Secret")]),
        );
        let answer = ValueDefinition::new(vec![], Type::Unit(()), Value::Unit(()));
        let helper = ValueDefinition::new(vec![], Type::Unit(()), Value::Unit(()));

        ModuleDefinition::new(
            vec![
                (
                    Name::from("color"),
                    AccessControlled::public(Documented::new("Colors", public_type)),
                ),
                (
                    Name::from("token"),
                    AccessControlled::public(Documented::undocumented(hidden_ctors)),
                ),
            ],
            vec![
                (
                    Name::from("answer"),
                    AccessControlled::public(Documented::new("The answer", answer)),
                ),
                (
                    Name::from("helper"),
                    AccessControlled::private(Documented::undocumented(helper)),
                ),
            ],
            Some("Sample".to_string()),
        )
    }

    #[test]
    fn test_lookups() {
        let module = sample_module();
        assert!(module.lookup_value_definition(&Name::from("helper")).is_some());
        assert!(module.lookup_value_definition(&Name::from("missing")).is_none());
        assert_eq!(
            module.lookup_type_definition(&Name::from("color")).map(|d| d.kind()),
            Some("CustomTypeDefinition")
        );
    }

    #[test]
    fn test_to_specification_keeps_public_surface() {
        let spec = sample_module().to_specification();

        assert_eq!(spec.doc.as_deref(), Some("Sample"));
        assert_eq!(spec.types.len(), 2);
        assert_eq!(spec.values.len(), 1);
        assert_eq!(spec.values[0].1.doc, "The answer");
        assert!(spec.lookup_value_specification(&Name::from("helper")).is_none());
        assert_eq!(
            spec.lookup_type_specification(&Name::from("token")),
            Some(&TypeSpecification::opaque(vec![]))
        );
    }

    #[test]
    fn test_equal_by() {
        let a = sample_module();
        let mut b = sample_module();
        assert!(a.equal_by(&b, &|_, _| true, &|_, _| true));
        b.doc = None;
        assert!(!a.equal_by(&b, &|_, _| true, &|_, _| true));
    }
}
