use crate::naming::name::Name;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A Path is a list of Names, representing a module or package hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    segments: Vec<Name>,
}

impl Path {
    pub fn new(segments: Vec<Name>) -> Self {
        Self { segments }
    }

    /// Split free text into names along any run of characters that is
    /// neither a word character nor whitespace, e.g. `"Morphir.SDK"`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        let is_separator = |c: char| !(c.is_alphanumeric() || c == '_' || c.is_whitespace());

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut in_separator_run = false;
        for c in s.chars() {
            if is_separator(c) {
                // a run of separators splits only once
                if !in_separator_run {
                    segments.push(Name::from_str(&current));
                    current.clear();
                }
                in_separator_run = true;
            } else {
                current.push(c);
                in_separator_run = false;
            }
        }
        segments.push(Name::from_str(&current));

        Self { segments }
    }

    pub fn segments(&self) -> &[Name] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Name> {
        self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Render each segment with `name_to_string` and join with `sep`.
    pub fn to_string_with<F>(&self, name_to_string: F, sep: &str) -> String
    where
        F: Fn(&Name) -> String,
    {
        self.segments
            .iter()
            .map(name_to_string)
            .collect::<Vec<_>>()
            .join(sep)
    }

    /// True when `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Path) -> bool {
        other.segments.starts_with(&self.segments)
    }

    /// Returns a new path with `name` appended.
    pub fn child(&self, name: Name) -> Path {
        let mut segments = self.segments.clone();
        segments.push(name);
        Path { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(Name::to_title_case, "."))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::from_str(s)
    }
}

impl From<Vec<Name>> for Path {
    fn from(segments: Vec<Name>) -> Self {
        Path::new(segments)
    }
}

impl Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.segments)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PathVisitor;

        impl<'de> Visitor<'de> for PathVisitor {
            type Value = Path;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an array of names [[\"word\"], ...]")
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<Self::Value, V::Error>
            where
                V: SeqAccess<'de>,
            {
                let mut segments = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(name) = seq.next_element::<Name>()? {
                    segments.push(name);
                }
                Ok(Path { segments })
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Err(E::custom("ir.Path: expected array of names, got null"))
            }
        }

        deserializer.deserialize_seq(PathVisitor)
    }
}
