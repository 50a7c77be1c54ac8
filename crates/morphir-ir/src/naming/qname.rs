use crate::error::ParseError;
use crate::naming::{name::Name, path::Path};
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// QName represents a module-qualified name (ModulePath + LocalName).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    module_path: Path,
    local_name: Name,
}

impl QName {
    pub fn new(module_path: Path, local_name: Name) -> Self {
        Self {
            module_path,
            local_name,
        }
    }

    pub fn module_path(&self) -> &Path {
        &self.module_path
    }

    pub fn local_name(&self) -> &Name {
        &self.local_name
    }

    /// Parse the canonical `ModulePath:localName` form.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [module, local] => Ok(Self::new(Path::from_str(module), Name::from_str(local))),
            _ => Err(ParseError::InvalidQName {
                input: s.to_string(),
                segments: parts.len(),
            }),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module_path, self.local_name.to_camel_case())
    }
}

impl std::str::FromStr for QName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QName::parse(s)
    }
}

impl Serialize for QName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.module_path)?;
        tuple.serialize_element(&self.local_name)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for QName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct QNameVisitor;

        impl<'de> Visitor<'de> for QNameVisitor {
            type Value = QName;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a QName array [modulePath, localName]")
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<Self::Value, V::Error>
            where
                V: SeqAccess<'de>,
            {
                let module_path = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let local_name = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;

                if seq.next_element::<IgnoredAny>()?.is_some() {
                    return Err(de::Error::custom("Expected end of QName array"));
                }

                Ok(QName::new(module_path, local_name))
            }
        }

        deserializer.deserialize_seq(QNameVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qname_roundtrip() {
        let q = QName::new(Path::from_str("Morphir.SDK.List"), Name::from_str("foldLeft"));
        let s = q.to_string();
        assert_eq!(s, "Morphir.SDK.List:foldLeft");
        assert_eq!(QName::parse(&s).unwrap(), q);
    }

    #[test]
    fn test_qname_parse_rejects_wrong_segment_count() {
        assert!(QName::parse("a:b:c").is_err());
        assert!(QName::parse("ab").is_err());
    }

    #[test]
    fn test_qname_serialization() {
        let q = QName::new(Path::from_str("list"), Name::from_str("map"));
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(json, r#"[[["list"]],["map"]]"#);
        assert_eq!(serde_json::from_str::<QName>(&json).unwrap(), q);
        assert!(serde_json::from_str::<QName>(r#"[[["list"]]]"#).is_err());
    }
}
