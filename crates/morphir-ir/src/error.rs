//! Error types for the Morphir IR model
//!
//! Each concern gets its own error enum so callers can match precisely:
//! [`ParseError`] for canonical string parsing, [`TraversalError`] for the
//! match/fold dispatchers and [`CodecError`] for the versioned JSON codec.
//! [`Error`] aggregates all of them for callers that do not care.

use thiserror::Error;

use crate::codec::json::FormatVersion;

/// Result type alias for Morphir IR operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Morphir IR operations
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Traversal(#[from] TraversalError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while parsing canonical identifier strings and literal text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "ir.FQName: expected 'PackagePath:ModulePath:localName', got {input:?} ({segments} segments)"
    )]
    InvalidFQName { input: String, segments: usize },

    #[error("ir.QName: expected 'ModulePath:localName', got {input:?} ({segments} segments)")]
    InvalidQName { input: String, segments: usize },

    #[error("invalid decimal: {0:?}")]
    InvalidDecimal(String),
}

/// Failures reported by the match/fold dispatchers.
///
/// These indicate a programming error at the call site (a handler table
/// that does not cover a variant it is asked to handle).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraversalError {
    #[error("ir: missing handler for {variant}")]
    MissingHandler { variant: &'static str },

    #[error("ir: missing fold handler for {variant}")]
    MissingFoldHandler { variant: &'static str },
}

/// Failures of the versioned JSON codec.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("codec/json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("codec/json: expected {expected} value, got null")]
    UnexpectedNull { expected: &'static str },

    #[error("codec/json: expected {expected} array, got {found}")]
    ExpectedArray {
        expected: &'static str,
        found: &'static str,
    },

    #[error("codec/json: expected {expected} object, got {found}")]
    ExpectedObject {
        expected: &'static str,
        found: &'static str,
    },

    #[error("codec/json: expected {expected} string, got {found}")]
    ExpectedString {
        expected: &'static str,
        found: &'static str,
    },

    #[error("codec/json: {node} expects {expected} elements, got {found}")]
    Arity {
        node: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("codec/json: {node} header expects at least 2 elements, got {found}")]
    Header { node: &'static str, found: usize },

    #[error("codec/json: unknown {version} {entity} tag {tag:?}")]
    UnknownTag {
        entity: &'static str,
        version: FormatVersion,
        tag: String,
    },

    #[error("codec/json: decode {entity}: missing field '{field}'")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("codec/json: invalid {entity}: {message}")]
    InvalidValue {
        entity: &'static str,
        message: String,
    },

    #[error("codec/json: unsupported formatVersion: {0}")]
    UnsupportedFormatVersion(u64),

    #[error("codec/json: attributes: {0}")]
    Attributes(String),

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<CodecError>,
    },
}

impl CodecError {
    /// Wrap this error with a description of where it happened.
    pub fn context(self, context: impl Into<String>) -> Self {
        CodecError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any context layers.
    pub fn root_cause(&self) -> &CodecError {
        match self {
            CodecError::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Build an attribute codec failure from any displayable error.
    pub fn attributes(err: impl std::fmt::Display) -> Self {
        CodecError::Attributes(err.to_string())
    }
}

/// Attach context to a codec result.
pub(crate) trait ResultExt<T> {
    fn context(self, context: impl FnOnce() -> String) -> std::result::Result<T, CodecError>;
}

impl<T> ResultExt<T> for std::result::Result<T, CodecError> {
    fn context(self, context: impl FnOnce() -> String) -> std::result::Result<T, CodecError> {
        self.map_err(|e| e.context(context()))
    }
}
