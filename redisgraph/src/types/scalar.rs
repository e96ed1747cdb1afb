// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Outbound scalar values and Cypher literal rendering
//!
//! Scalars are what callers put into node/edge properties, query parameters
//! and procedure arguments. Their `Display` impl is the literal form embedded
//! into query text.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A property, parameter or argument value sent to the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Scalar {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    /// Must be finite; NaN and infinities have no literal form and are
    /// rejected before a statement is sent
    Float(f64),
    String(String),
    List(Vec<Scalar>),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Whether this value, including list items, renders as a valid literal
    pub fn is_representable(&self) -> bool {
        match self {
            Scalar::Float(x) => x.is_finite(),
            Scalar::List(items) => items.iter().all(Scalar::is_representable),
            _ => true,
        }
    }

    /// `PreconditionViolation` naming `context` when the value has no literal form
    pub fn ensure_representable(&self, context: &str) -> Result<()> {
        if self.is_representable() {
            Ok(())
        } else {
            Err(Error::PreconditionViolation(format!(
                "{} holds {:?}, which has no Cypher literal form",
                context, self
            )))
        }
    }

    /// Parse a bare command-line style literal.
    ///
    /// `null`, `true`/`false`, integers and floats map to their typed
    /// variants; a value wrapped in double quotes is taken as a string with
    /// the quotes removed; anything else is a plain string.
    pub fn parse_literal(text: &str) -> Scalar {
        let trimmed = text.trim();
        match trimmed {
            "null" | "NULL" => return Scalar::Null,
            "true" => return Scalar::Boolean(true),
            "false" => return Scalar::Boolean(false),
            _ => {}
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Scalar::Integer(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_finite() {
                return Scalar::Float(f);
            }
        }
        if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
            return Scalar::String(trimmed[1..trimmed.len() - 1].to_string());
        }
        Scalar::String(trimmed.to_string())
    }
}

/// Wrap a string in double quotes, escaping backslashes and embedded quotes
pub fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Boolean(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            // Debug keeps the decimal point so 1.0 is not read back as an integer
            Scalar::Float(x) => write!(f, "{:?}", x),
            Scalar::String(s) => f.write_str(&quote_string(s)),
            Scalar::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Boolean(b)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Integer(i)
    }
}

impl From<i32> for Scalar {
    fn from(i: i32) -> Self {
        Scalar::Integer(i as i64)
    }
}

impl From<u32> for Scalar {
    fn from(i: u32) -> Self {
        Scalar::Integer(i as i64)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Scalar::Null)
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for Scalar {
    fn from(items: Vec<T>) -> Self {
        Scalar::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_string_escapes_quotes_and_backslashes() {
        assert_eq!(quote_string("Alice"), "\"Alice\"");
        assert_eq!(quote_string(""), "\"\"");
        assert_eq!(quote_string("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote_string("C:\\tmp"), "\"C:\\\\tmp\"");
    }

    #[test]
    fn test_scalar_literals() {
        assert_eq!(Scalar::Null.to_string(), "null");
        assert_eq!(Scalar::from(true).to_string(), "true");
        assert_eq!(Scalar::from(42).to_string(), "42");
        assert_eq!(Scalar::from(1.0).to_string(), "1.0");
        assert_eq!(Scalar::from(2.5).to_string(), "2.5");
        assert_eq!(Scalar::from("x").to_string(), "\"x\"");
        assert_eq!(Scalar::from(None::<&str>).to_string(), "null");
        assert_eq!(Scalar::from(vec![1, 2, 3]).to_string(), "[1,2,3]");
        assert_eq!(
            Scalar::List(vec![Scalar::from("a"), Scalar::Null]).to_string(),
            "[\"a\",null]"
        );
    }

    #[test]
    fn test_non_finite_floats_are_not_representable() {
        assert!(Scalar::from(1.5).is_representable());
        assert!(!Scalar::from(f64::NAN).is_representable());
        assert!(!Scalar::List(vec![Scalar::from(1), Scalar::from(f64::INFINITY)]).is_representable());

        let err = Scalar::from(f64::NEG_INFINITY)
            .ensure_representable("parameter 'x'")
            .unwrap_err();
        assert!(matches!(err, Error::PreconditionViolation(msg) if msg.contains("parameter 'x'")));
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(Scalar::parse_literal("null"), Scalar::Null);
        assert_eq!(Scalar::parse_literal("true"), Scalar::Boolean(true));
        assert_eq!(Scalar::parse_literal("17"), Scalar::Integer(17));
        assert_eq!(Scalar::parse_literal("-0.5"), Scalar::Float(-0.5));
        assert_eq!(Scalar::parse_literal("\"42\""), Scalar::String("42".into()));
        assert_eq!(Scalar::parse_literal("Alice"), Scalar::String("Alice".into()));
    }
}
