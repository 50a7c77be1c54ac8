/// A value paired with its documentation string.
///
/// Wire form is `{"doc": string, "value": ..}` in every format version.
#[derive(Debug, Clone, PartialEq)]
pub struct Documented<T> {
    pub doc: String,
    pub value: T,
}

impl<T> Documented<T> {
    pub fn new(doc: impl Into<String>, value: T) -> Self {
        Self {
            doc: doc.into(),
            value,
        }
    }

    /// Wrap a value with an empty doc string.
    pub fn undocumented(value: T) -> Self {
        Self::new(String::new(), value)
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Documented<U> {
        Documented {
            doc: self.doc,
            value: f(self.value),
        }
    }

    pub fn equal_by<F>(&self, other: &Documented<T>, eq_value: F) -> bool
    where
        F: FnOnce(&T, &T) -> bool,
    {
        self.doc == other.doc && eq_value(&self.value, &other.value)
    }
}
