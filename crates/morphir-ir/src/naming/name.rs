use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A Name is an ordered list of lower-case word fragments.
///
/// Serialized as `["word1", "word2"]` in every format version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name {
    words: Vec<String>,
}

impl std::str::FromStr for Name {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Matches the word regex "([a-zA-Z][a-z]*|[0-9]+)"
        let mut words = Vec::new();
        let chars: Vec<char> = s.chars().collect();
        let mut i = 0;
        let len = chars.len();

        while i < len {
            let c = chars[i];

            if c.is_ascii_alphabetic() {
                let start = i;
                i += 1;
                while i < len && chars[i].is_ascii_lowercase() {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                words.push(word.to_lowercase());
            } else if c.is_ascii_digit() {
                let start = i;
                i += 1;
                while i < len && chars[i].is_ascii_digit() {
                    i += 1;
                }
                words.push(chars[start..i].iter().collect());
            } else {
                // separator
                i += 1;
            }
        }

        Ok(Name { words })
    }
}

impl Name {
    /// Create a Name from already-split word fragments, taken as given.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a Name from free text (camelCase, snake_case, space separated, ...).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match <Self as std::str::FromStr>::from_str(s) {
            Ok(name) => name,
            Err(never) => match never {},
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn into_words(self) -> Vec<String> {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// `["value","in","u","s","d"]` becomes `"ValueInUSD"`.
    pub fn to_title_case(&self) -> String {
        self.words.iter().map(|w| capitalize(w)).collect()
    }

    /// `["value","in","u","s","d"]` becomes `"valueInUSD"`.
    pub fn to_camel_case(&self) -> String {
        let mut words = self.words.iter();
        let mut result = match words.next() {
            Some(first) => first.clone(),
            None => return String::new(),
        };
        for word in words {
            result.push_str(&capitalize(word));
        }
        result
    }

    /// Words for human consumption. Runs of single-letter words collapse into
    /// one upper-case abbreviation: `["value","in","u","s","d"]` becomes
    /// `["value","in","USD"]`. A single-word name is returned unchanged.
    pub fn to_human_words(&self) -> Vec<String> {
        if self.words.len() <= 1 {
            return self.words.clone();
        }

        let mut out = Vec::with_capacity(self.words.len());
        let mut abbrev = String::new();
        for word in &self.words {
            if word.chars().count() == 1 {
                abbrev.push_str(word);
                continue;
            }
            if !abbrev.is_empty() {
                out.push(abbrev.to_uppercase());
                abbrev.clear();
            }
            out.push(word.clone());
        }
        if !abbrev.is_empty() {
            out.push(abbrev.to_uppercase());
        }
        out
    }

    /// Same as [`Name::to_human_words`] with the first word capitalized.
    pub fn to_human_words_title(&self) -> Vec<String> {
        let mut words = self.to_human_words();
        if let Some(first) = words.first_mut() {
            *first = capitalize(first);
        }
        words
    }

    /// `["value","in","u","s","d"]` becomes `"value_in_USD"`.
    pub fn to_snake_case(&self) -> String {
        self.to_human_words().join("_")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_camel_case())
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Name::from_str(s)
    }
}

impl Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.words)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NameVisitor;

        impl<'de> Visitor<'de> for NameVisitor {
            type Value = Name;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an array of strings [\"word1\", \"word2\"]")
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<Self::Value, V::Error>
            where
                V: SeqAccess<'de>,
            {
                let mut words = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(word) = seq.next_element::<String>()? {
                    words.push(word);
                }
                Ok(Name { words })
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Err(E::custom("ir.Name: expected array of strings, got null"))
            }
        }

        deserializer.deserialize_seq(NameVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_mixed_separators() {
        let name = Name::from_str("fooBar_baz 123");
        assert_eq!(name.words(), ["foo", "bar", "baz", "123"]);
        assert_eq!(name.to_title_case(), "FooBarBaz123");
        assert_eq!(name.to_camel_case(), "fooBarBaz123");
    }

    #[test]
    fn test_abbreviation_collapse() {
        let name = Name::from_str("valueInUSD");
        assert_eq!(name.words(), ["value", "in", "u", "s", "d"]);
        assert_eq!(name.to_human_words(), ["value", "in", "USD"]);
        assert_eq!(name.to_human_words_title(), ["Value", "in", "USD"]);
        assert_eq!(name.to_snake_case(), "value_in_USD");
        assert_eq!(name.to_title_case(), "ValueInUSD");
        assert_eq!(name.to_camel_case(), "valueInUSD");
    }

    #[test]
    fn test_single_letter_name_is_kept() {
        let name = Name::new(["a"]);
        assert_eq!(name.to_human_words(), ["a"]);
        assert_eq!(name.to_snake_case(), "a");
    }

    #[test]
    fn test_empty_name() {
        let name = Name::from_str("__ --");
        assert!(name.is_empty());
        assert_eq!(name.to_title_case(), "");
        assert_eq!(name.to_camel_case(), "");
        assert!(name.to_human_words().is_empty());
    }

    #[test]
    fn test_serialization() {
        let name = Name::from_str("camel_case");
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, r#"["camel","case"]"#);

        let back: Name = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }

    #[test]
    fn test_deserialization_rejects_bad_shapes() {
        assert!(serde_json::from_str::<Name>("null").is_err());
        assert!(serde_json::from_str::<Name>(r#"["a", 1]"#).is_err());
        assert!(serde_json::from_str::<Name>(r#""ab""#).is_err());
    }
}
