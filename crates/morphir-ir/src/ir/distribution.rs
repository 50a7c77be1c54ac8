//! Distributions: shippable bundles of a package and its dependencies.

use super::module::ModuleDefinition;
use super::package::{PackageDefinition, PackageSpecification};
use super::types::Type;
use crate::naming::{ModuleName, PackageName};

/// Value attributes of a distributed package: the inferred type of every node.
pub type DistributionPackageDefinition = PackageDefinition<(), Type<()>>;

/// A resolved dependency of a library.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryDependency {
    pub name: PackageName,
    pub spec: PackageSpecification<()>,
}

impl LibraryDependency {
    pub fn new(name: PackageName, spec: PackageSpecification<()>) -> Self {
        Self { name, spec }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Library {
    pub package_name: PackageName,
    pub dependencies: Vec<LibraryDependency>,
    pub definition: DistributionPackageDefinition,
}

impl Library {
    pub fn new(
        package_name: PackageName,
        dependencies: Vec<LibraryDependency>,
        definition: DistributionPackageDefinition,
    ) -> Self {
        Self {
            package_name,
            dependencies,
            definition,
        }
    }

    pub fn lookup_dependency(&self, name: &PackageName) -> Option<&PackageSpecification<()>> {
        self.dependencies
            .iter()
            .find(|dep| &dep.name == name)
            .map(|dep| &dep.spec)
    }

    pub fn lookup_module_definition(
        &self,
        module_name: &ModuleName,
    ) -> Option<&ModuleDefinition<(), Type<()>>> {
        self.definition.lookup_module_definition(module_name)
    }
}

/// Distribution of a package. Only libraries exist today.
#[derive(Debug, Clone, PartialEq)]
pub enum Distribution {
    Library(Library),
}

impl Distribution {
    pub fn package_name(&self) -> &PackageName {
        match self {
            Distribution::Library(lib) => &lib.package_name,
        }
    }

    pub fn as_library(&self) -> &Library {
        match self {
            Distribution::Library(lib) => lib,
        }
    }

    pub fn equal_by(&self, other: &Distribution) -> bool {
        let unit = |_: &(), _: &()| true;
        let types = |l: &Type<()>, r: &Type<()>| l.equal_by(r, &unit);
        match (self, other) {
            (Distribution::Library(l1), Distribution::Library(l2)) => {
                l1.package_name == l2.package_name
                    && l1.dependencies.len() == l2.dependencies.len()
                    && l1
                        .dependencies
                        .iter()
                        .zip(&l2.dependencies)
                        .all(|(d1, d2)| d1.name == d2.name && d1.spec.equal_by(&d2.spec, &unit))
                    && l1.definition.equal_by(&l2.definition, &unit, &types)
            }
        }
    }
}

impl From<Library> for Distribution {
    fn from(lib: Library) -> Self {
        Distribution::Library(lib)
    }
}
