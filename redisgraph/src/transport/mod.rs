// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Transport seam between the graph handle and the key-value connection
//!
//! The client never speaks the wire protocol itself. It hands a command name
//! and its arguments to a [`Transport`] and receives a [`Reply`] shaped like
//! a RESP value.

#[cfg(feature = "redis-transport")]
pub mod redis;

#[cfg(feature = "redis-transport")]
pub use self::redis::RedisTransport;

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

/// Command running a query against a graph
pub const QUERY_COMMAND: &str = "GRAPH.QUERY";
/// Command returning the execution plan of a query
pub const EXPLAIN_COMMAND: &str = "GRAPH.EXPLAIN";
/// Command deleting a graph
pub const DELETE_COMMAND: &str = "GRAPH.DELETE";
/// Flag asking the server for the compact result encoding
pub const COMPACT_FLAG: &str = "--compact";

/// Raw reply returned by the transport
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Nil,
    Integer(i64),
    Bulk(Vec<u8>),
    Status(String),
    Array(Vec<Reply>),
}

impl Reply {
    /// Bulk string reply
    pub fn bulk(text: impl Into<String>) -> Self {
        Reply::Bulk(text.into().into_bytes())
    }

    /// Array reply
    pub fn array(items: impl IntoIterator<Item = Reply>) -> Self {
        Reply::Array(items.into_iter().collect())
    }

    /// Textual content of a bulk or status reply
    pub fn as_text(&self) -> Option<String> {
        match self {
            Reply::Bulk(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            Reply::Status(s) => Some(s.clone()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Reply::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Reply]> {
        match self {
            Reply::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Short kind name for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Nil => "nil",
            Reply::Integer(_) => "integer",
            Reply::Bulk(_) => "bulk string",
            Reply::Status(_) => "status",
            Reply::Array(_) => "array",
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Nil => write!(f, "(nil)"),
            Reply::Integer(i) => write!(f, "(integer) {}", i),
            Reply::Bulk(bytes) => write!(f, "\"{}\"", String::from_utf8_lossy(bytes)),
            Reply::Status(s) => f.write_str(s),
            Reply::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// An existing client connection able to run arbitrary commands.
///
/// Errors raised by implementations must be reported as
/// [`Error::Transport`](crate::Error::Transport); this layer adds no retries.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, command: &str, args: &[String]) -> Result<Reply>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_accessors() {
        assert_eq!(Reply::bulk("abc").as_text().as_deref(), Some("abc"));
        assert_eq!(Reply::Status("OK".into()).as_text().as_deref(), Some("OK"));
        assert_eq!(Reply::Integer(5).as_text(), None);
        assert_eq!(Reply::Integer(5).as_integer(), Some(5));
        assert_eq!(Reply::array(vec![Reply::Nil]).as_array().map(|a| a.len()), Some(1));
    }

    #[test]
    fn test_reply_display() {
        let reply = Reply::array(vec![Reply::Integer(1), Reply::bulk("x"), Reply::Nil]);
        assert_eq!(reply.to_string(), "[(integer) 1, \"x\", (nil)]");
    }
}
