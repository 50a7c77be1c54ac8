use crate::error::ParseError;
use crate::naming::{name::Name, path::Path};
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// FQName represents a Fully Qualified Name (PackagePath + ModulePath + LocalName).
///
/// Serialized as the 3-element array `[packagePath, modulePath, localName]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FQName {
    package_path: Path,
    module_path: Path,
    local_name: Name,
}

impl FQName {
    pub fn new(package_path: Path, module_path: Path, local_name: Name) -> Self {
        Self {
            package_path,
            module_path,
            local_name,
        }
    }

    /// Shorthand for building an FQName from three free-text parts.
    pub fn fqn(package_path: &str, module_path: &str, local_name: &str) -> Self {
        Self::new(
            Path::from_str(package_path),
            Path::from_str(module_path),
            Name::from_str(local_name),
        )
    }

    pub fn package_path(&self) -> &Path {
        &self.package_path
    }

    pub fn module_path(&self) -> &Path {
        &self.module_path
    }

    pub fn local_name(&self) -> &Name {
        &self.local_name
    }

    pub fn into_parts(self) -> (Path, Path, Name) {
        (self.package_path, self.module_path, self.local_name)
    }

    /// Parse the canonical `PackagePath:ModulePath:localName` form.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [package, module, local] => Ok(Self::new(
                Path::from_str(package),
                Path::from_str(module),
                Name::from_str(local),
            )),
            _ => Err(ParseError::InvalidFQName {
                input: s.to_string(),
                segments: parts.len(),
            }),
        }
    }
}

impl fmt::Display for FQName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.package_path,
            self.module_path,
            self.local_name.to_camel_case()
        )
    }
}

impl std::str::FromStr for FQName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FQName::parse(s)
    }
}

impl Serialize for FQName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.package_path)?;
        tuple.serialize_element(&self.module_path)?;
        tuple.serialize_element(&self.local_name)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for FQName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FQNameVisitor;

        impl<'de> Visitor<'de> for FQNameVisitor {
            type Value = FQName;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an FQName array [packagePath, modulePath, localName]")
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
                let local_name = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;

                if seq.next_element::<IgnoredAny>()?.is_some() {
                    return Err(de::Error::custom("Expected end of FQName array"));
                }

                Ok(FQName::new(package_path, module_path, local_name))
            }
        }

        deserializer.deserialize_seq(FQNameVisitor)
    }
}
