use super::Path;
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifies a module within a package.
pub type ModuleName = Path;

/// Globally unique identifier of a package.
pub type PackageName = Path;

/// Globally unique identifier of a module: package path plus module path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedModuleName {
    package_path: PackageName,
    module_path: ModuleName,
}

impl QualifiedModuleName {
    pub fn new(package_path: PackageName, module_path: ModuleName) -> Self {
        Self {
            package_path,
            module_path,
        }
    }

    pub fn package_path(&self) -> &PackageName {
        &self.package_path
    }

    pub fn module_path(&self) -> &ModuleName {
        &self.module_path
    }
}

impl fmt::Display for QualifiedModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.package_path, self.module_path)
    }
}

impl Serialize for QualifiedModuleName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.package_path)?;
        tuple.serialize_element(&self.module_path)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for QualifiedModuleName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct QualifiedModuleNameVisitor;

        impl<'de> Visitor<'de> for QualifiedModuleNameVisitor {
            type Value = QualifiedModuleName;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a qualified module name array [packagePath, modulePath]")
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<Self::Value, V::Error>
            where
                V: SeqAccess<'de>,
            {
                let package_path = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let module_path = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;

                if seq.next_element::<IgnoredAny>()?.is_some() {
                    return Err(de::Error::custom(
                        "Expected end of QualifiedModuleName array",
                    ));
                }

                Ok(QualifiedModuleName::new(package_path, module_path))
            }
        }

        deserializer.deserialize_seq(QualifiedModuleNameVisitor)
    }
}
