//! Public/private tagging for module entries, modules and constructor tables.

use std::fmt;

/// Access level of an [`AccessControlled`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Public,
    Private,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Public => f.write_str("Public"),
            Access::Private => f.write_str("Private"),
        }
    }
}

/// A value tagged with its access level.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessControlled<T> {
    /// Publicly accessible
    Public(T),
    /// Only accessible within the module
    Private(T),
}

impl<T> AccessControlled<T> {
    pub fn public(value: T) -> Self {
        AccessControlled::Public(value)
    }

    pub fn private(value: T) -> Self {
        AccessControlled::Private(value)
    }

    pub fn new(access: Access, value: T) -> Self {
        match access {
            Access::Public => AccessControlled::Public(value),
            Access::Private => AccessControlled::Private(value),
        }
    }

    pub fn access(&self) -> Access {
        match self {
            AccessControlled::Public(_) => Access::Public,
            AccessControlled::Private(_) => Access::Private,
        }
    }

    /// The inner value regardless of access level
    pub fn value(&self) -> &T {
        match self {
            AccessControlled::Public(v) | AccessControlled::Private(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            AccessControlled::Public(v) | AccessControlled::Private(v) => v,
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, AccessControlled::Public(_))
    }

    pub fn is_private(&self) -> bool {
        matches!(self, AccessControlled::Private(_))
    }

    /// The inner value only when it is public.
    pub fn with_public_access(&self) -> Option<&T> {
        match self {
            AccessControlled::Public(v) => Some(v),
            AccessControlled::Private(_) => None,
        }
    }

    /// Map a function over the inner value, keeping the access level
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> AccessControlled<U> {
        match self {
            AccessControlled::Public(v) => AccessControlled::Public(f(v)),
            AccessControlled::Private(v) => AccessControlled::Private(f(v)),
        }
    }

    /// Fallible [`AccessControlled::map`].
    pub fn try_map<U, E, F>(self, f: F) -> Result<AccessControlled<U>, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        let access = self.access();
        Ok(AccessControlled::new(access, f(self.into_value())?))
    }

    pub fn equal_by<F>(&self, other: &AccessControlled<T>, eq_value: F) -> bool
    where
        F: FnOnce(&T, &T) -> bool,
    {
        self.access() == other.access() && eq_value(self.value(), other.value())
    }
}
