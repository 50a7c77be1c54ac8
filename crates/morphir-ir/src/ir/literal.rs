//! Literal values shared by patterns and value expressions.

use crate::error::ParseError;
use std::fmt;

/// Arbitrary precision decimal, carried as its validated textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal(String);

impl Decimal {
    /// Accepts an optional sign, digits with an optional fraction, and an
    /// optional exponent: `-12`, `3.50`, `.5`, `1e-3`.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidDecimal(s.to_string());

        let body = s.strip_prefix(['+', '-']).unwrap_or(s);
        let (mantissa, exponent) = match body.find(['e', 'E']) {
            Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
            None => (body, None),
        };

        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((i, f)) => (i, f),
            None => (mantissa, ""),
        };
        let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(invalid());
        }

        if let Some(exp) = exponent {
            let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            if digits.is_empty() || !all_digits(digits) {
                return Err(invalid());
            }
        }

        Ok(Decimal(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Decimal {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::parse(s)
    }
}

/// Literal constant.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Char(char),
    String(String),
    WholeNumber(i64),
    Float(f64),
    Decimal(Decimal),
}

impl Literal {
    pub fn bool(value: bool) -> Self {
        Literal::Bool(value)
    }

    pub fn char(value: char) -> Self {
        Literal::Char(value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Literal::String(value.into())
    }

    pub fn int(value: i64) -> Self {
        Literal::WholeNumber(value)
    }

    pub fn float(value: f64) -> Self {
        Literal::Float(value)
    }

    /// Name of the variant, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Bool(_) => "BoolLiteral",
            Literal::Char(_) => "CharLiteral",
            Literal::String(_) => "StringLiteral",
            Literal::WholeNumber(_) => "WholeNumberLiteral",
            Literal::Float(_) => "FloatLiteral",
            Literal::Decimal(_) => "DecimalLiteral",
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::WholeNumber(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}
