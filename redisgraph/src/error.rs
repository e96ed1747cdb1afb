// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for the RedisGraph client

use crate::schema::SchemaKind;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for RedisGraph client operations
#[derive(Error, Debug)]
pub enum Error {
    /// An edge referenced an endpoint alias that is not in the pending batch
    #[error("Precondition violation: {0}")]
    PreconditionViolation(String),

    /// A schema id stayed unknown after a full refresh of its category
    #[error("Schema resolution error: {kind} id {id} is unknown to the server")]
    SchemaResolution { kind: SchemaKind, id: usize },

    /// Malformed or unrecognized compact reply
    #[error("Decode error: {0}")]
    Decode(String),

    /// Anything raised by the transport, passed through unmodified
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file parsing errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for building a decode error from anything printable
    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Error::Decode(message.into())
    }

    /// Wrap an arbitrary transport failure
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Transport(err.into())
    }

    /// True when the error came from the transport rather than from this layer
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

#[cfg(feature = "redis-transport")]
impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Transport(Box::new(err))
    }
}
