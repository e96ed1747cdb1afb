// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! redisgraph-async - asynchronous RedisGraph client
//!
//! Builds Cypher query text, sends it over an existing Redis connection and
//! decodes the compact, type-tagged reply into typed rows.
//!
//! # Quick Start
//!
//! ```no_run
//! use redisgraph_async::{ClientConfig, Edge, Node, Error};
//!
//! # async fn run() -> Result<(), Error> {
//! let mut graph = ClientConfig::from_env()?.connect().await?;
//!
//! let alice = graph.add_node(Node::new().with_label("Person").with_property("name", "Alice"));
//! let bob = graph.add_node(Node::new().with_label("Person").with_property("name", "Bob"));
//! graph.add_edge(Edge::new(alice, "KNOWS", bob))?;
//! graph.flush().await?;
//!
//! let result = graph.query("MATCH (p:Person)-[:KNOWS]->(f) RETURN p, f.name").await?;
//! for row in &result.rows {
//!     println!("{:?}", row);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`graph`] - Graph handle, pending batch, alias generation, statement builders
//! - [`result`] - Compact reply decoder, typed rows and statistics
//! - [`schema`] - Lazily refreshed label / relationship type / property key cache
//! - [`transport`] - Transport trait and the Redis implementation
//! - [`types`] - Scalars, builder nodes/edges and decoded records
//! - [`config`] - Client configuration
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod graph;
pub mod result;
pub mod schema;
pub mod transport;
pub mod types;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use graph::{AliasGenerator, Graph, PendingBatch, RandomAliases, SequentialAliases};
pub use result::{ColumnHeader, ColumnKind, QueryResult, QueryStatistics, ResultDecoder, Row};
pub use schema::{SchemaCache, SchemaKind, SchemaResolver};
pub use transport::{Reply, Transport};
pub use types::{Edge, EdgeRecord, Node, NodeRecord, PathRecord, Scalar, Value};

#[cfg(feature = "redis-transport")]
pub use transport::RedisTransport;
