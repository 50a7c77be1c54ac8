//! Package specifications and definitions.

use super::access::AccessControlled;
use super::module::{ModuleDefinition, ModuleSpecification};
use crate::naming::ModuleName;

/// Public surface of a package: one specification per exposed module.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageSpecification<TA> {
    pub modules: Vec<(ModuleName, ModuleSpecification<TA>)>,
}

impl<TA> Default for PackageSpecification<TA> {
    fn default() -> Self {
        Self {
            modules: Vec::new(),
        }
    }
}

impl<TA> PackageSpecification<TA> {
    pub fn new(modules: Vec<(ModuleName, ModuleSpecification<TA>)>) -> Self {
        Self { modules }
    }

    pub fn lookup_module_specification(
        &self,
        module_name: &ModuleName,
    ) -> Option<&ModuleSpecification<TA>> {
        self.modules
            .iter()
            .find(|(name, _)| name == module_name)
            .map(|(_, spec)| spec)
    }

    pub fn equal_by<F>(&self, other: &PackageSpecification<TA>, eq_ta: &F) -> bool
    where
        F: Fn(&TA, &TA) -> bool,
    {
        self.modules.len() == other.modules.len()
            && self
                .modules
                .iter()
                .zip(&other.modules)
                .all(|((n1, s1), (n2, s2))| n1 == n2 && s1.equal_by(s2, eq_ta))
    }
}

/// Full implementation of a package.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDefinition<TA, VA> {
    pub modules: Vec<(ModuleName, AccessControlled<ModuleDefinition<TA, VA>>)>,
}

impl<TA, VA> Default for PackageDefinition<TA, VA> {
    fn default() -> Self {
        Self {
            modules: Vec::new(),
        }
    }
}

impl<TA, VA> PackageDefinition<TA, VA> {
    pub fn new(modules: Vec<(ModuleName, AccessControlled<ModuleDefinition<TA, VA>>)>) -> Self {
        Self { modules }
    }

    /// Looks up a module regardless of its access level.
    pub fn lookup_module_definition(
        &self,
        module_name: &ModuleName,
    ) -> Option<&ModuleDefinition<TA, VA>> {
        self.modules
            .iter()
            .find(|(name, _)| name == module_name)
            .map(|(_, ac)| ac.value())
    }

    /// Specification of every public module.
    pub fn to_specification(&self) -> PackageSpecification<TA>
    where
        TA: Clone,
    {
        PackageSpecification::new(
            self.modules
                .iter()
                .filter_map(|(name, ac)| {
                    ac.with_public_access()
                        .map(|def| (name.clone(), def.to_specification()))
                })
                .collect(),
        )
    }

    pub fn equal_by<FT, FV>(
        &self,
        other: &PackageDefinition<TA, VA>,
        eq_ta: &FT,
        eq_va: &FV,
    ) -> bool
    where
        FT: Fn(&TA, &TA) -> bool,
        FV: Fn(&VA, &VA) -> bool,
    {
        self.modules.len() == other.modules.len()
            && self.modules.iter().zip(&other.modules).all(|((n1, a1), (n2, a2))| {
                n1 == n2 && a1.equal_by(a2, |l, r| l.equal_by(r, eq_ta, eq_va))
            })
    }
}
