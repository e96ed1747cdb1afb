// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph handle: batch builder and query gateway
//!
//! A [`Graph`] accumulates nodes and edges, turns them into one `CREATE`
//! statement on [`Graph::commit`], and runs arbitrary queries through its
//! [`Transport`]. It also owns the schema cache that the result decoder
//! consults when a reply references labels, relationship types or property
//! keys by id.

pub mod alias;
pub mod batch;
pub mod statement;

pub use alias::{AliasGenerator, RandomAliases, SequentialAliases};
pub use batch::PendingBatch;

use crate::error::{Error, Result};
use crate::result::{QueryResult, ResultDecoder, Row};
use crate::schema::{SchemaCache, SchemaKind, SchemaResolver};
use crate::transport::{
    Reply, Transport, COMPACT_FLAG, DELETE_COMMAND, EXPLAIN_COMMAND, QUERY_COMMAND,
};
use crate::types::{Edge, Node, Scalar, Value};
use async_trait::async_trait;
use std::fmt::{self, Display};
use std::sync::Arc;

/// Handle on one named graph
pub struct Graph {
    name: String,
    transport: Arc<dyn Transport>,
    batch: PendingBatch,
    schema: SchemaCache,
    aliases: Box<dyn AliasGenerator>,
}

impl Graph {
    /// Handle on graph `name`, generating random aliases for unnamed nodes
    pub fn new(name: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            name: name.into(),
            transport,
            batch: PendingBatch::new(),
            schema: SchemaCache::new(),
            aliases: Box::new(RandomAliases::new()),
        }
    }

    /// Replace the alias generator used by [`Graph::add_node`]
    pub fn with_alias_generator(mut self, aliases: impl AliasGenerator + 'static) -> Self {
        self.aliases = Box::new(aliases);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn batch(&self) -> &PendingBatch {
        &self.batch
    }

    pub fn schema(&self) -> &SchemaCache {
        &self.schema
    }

    /// Add a node to the pending batch and return its alias.
    ///
    /// A node without an alias gets one from the alias generator. A node
    /// whose alias is already pending replaces the earlier one.
    pub fn add_node(&mut self, mut node: Node) -> String {
        let alias = match &node.alias {
            Some(alias) => alias.clone(),
            None => {
                let alias = self.aliases.next_alias();
                node.alias = Some(alias.clone());
                alias
            }
        };
        self.batch.insert_node(alias.clone(), node);
        alias
    }

    /// Add an edge whose endpoints were both added with [`Graph::add_node`]
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        self.batch.push_edge(edge)
    }

    /// Create every pending node and edge with a single `CREATE` statement.
    ///
    /// An empty batch returns an empty result without contacting the server.
    /// The batch is left untouched; see [`Graph::flush`].
    pub async fn commit(&self) -> Result<QueryResult> {
        self.batch.ensure_representable()?;
        match self.batch.create_statement() {
            Some(statement) => {
                log::debug!(
                    "Committing {} nodes and {} edges to graph '{}'",
                    self.batch.node_count(),
                    self.batch.edge_count(),
                    self.name
                );
                self.query(&statement).await
            }
            None => Ok(QueryResult::empty()),
        }
    }

    /// Commit, then clear the batch whether or not the commit succeeded
    pub async fn flush(&mut self) -> Result<QueryResult> {
        let outcome = self.commit().await;
        self.batch.clear();
        outcome
    }

    /// Run a query and decode its compact reply
    pub async fn query(&self, query: &str) -> Result<QueryResult> {
        let reply = self
            .execute(
                QUERY_COMMAND,
                vec![self.name.clone(), query.to_string(), COMPACT_FLAG.to_string()],
            )
            .await?;
        ResultDecoder::new(self).decode(&reply).await
    }

    /// Run a query preceded by a `CYPHER k=v ...` parameter preamble
    pub async fn query_with_params<I, K, V>(&self, query: &str, params: I) -> Result<QueryResult>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Scalar>,
    {
        let params = params
            .into_iter()
            .map(|(key, value)| -> Result<(K, Scalar)> {
                let value: Scalar = value.into();
                value.ensure_representable(&format!("parameter '{}'", key.as_ref()))?;
                Ok((key, value))
            })
            .collect::<Result<Vec<_>>>()?;
        let text = format!("{}{}", statement::params_header(params), query);
        self.query(&text).await
    }

    /// Execution plan of `query`, one operation per line
    pub async fn execution_plan(&self, query: &str) -> Result<String> {
        let reply = self
            .execute(EXPLAIN_COMMAND, vec![self.name.clone(), query.to_string()])
            .await?;
        let lines = reply
            .as_array()
            .ok_or_else(|| Error::Decode(format!("expected plan array, got {}", reply.kind())))?
            .iter()
            .map(|line| {
                line.as_text().ok_or_else(|| {
                    Error::Decode(format!("expected plan line string, got {}", line.kind()))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(lines.join("\n"))
    }

    /// Delete the graph on the server and forget its cached schema names
    pub async fn delete(&self) -> Result<Reply> {
        let reply = self
            .execute(DELETE_COMMAND, vec![self.name.clone()])
            .await?;
        self.schema.clear();
        Ok(reply)
    }

    /// `MERGE <pattern>` for any node or edge literal
    pub async fn merge(&self, pattern: &impl Display) -> Result<QueryResult> {
        self.query(&statement::merge_statement(pattern)).await
    }

    /// `CALL procedure(args...) [YIELD columns...]`
    pub async fn call_procedure(
        &self,
        procedure: &str,
        args: &[Scalar],
        yield_columns: Option<&[&str]>,
    ) -> Result<QueryResult> {
        for (position, arg) in args.iter().enumerate() {
            arg.ensure_representable(&format!("argument {} of {}", position, procedure))?;
        }
        self.query(&statement::procedure_call(procedure, args, yield_columns))
            .await
    }

    /// Rows of `CALL db.labels()`
    pub async fn labels(&self) -> Result<Vec<Row>> {
        self.schema_rows(SchemaKind::Label).await
    }

    /// Rows of `CALL db.relationshipTypes()`
    pub async fn relationship_types(&self) -> Result<Vec<Row>> {
        self.schema_rows(SchemaKind::RelationshipType).await
    }

    /// Rows of `CALL db.propertyKeys()`
    pub async fn property_keys(&self) -> Result<Vec<Row>> {
        self.schema_rows(SchemaKind::PropertyKey).await
    }

    async fn schema_rows(&self, kind: SchemaKind) -> Result<Vec<Row>> {
        Ok(self.call_procedure(kind.procedure(), &[], None).await?.rows)
    }

    /// Full name list of one schema category, indexed by id
    async fn fetch_names(&self, kind: SchemaKind) -> Result<Vec<String>> {
        self.schema_rows(kind)
            .await?
            .into_iter()
            .map(|row| match row.get(0) {
                Some(Value::String(name)) => Ok(name.clone()),
                other => Err(Error::Decode(format!(
                    "{} row should hold a name, got {:?}",
                    kind, other
                ))),
            })
            .collect()
    }

    async fn execute(&self, command: &str, args: Vec<String>) -> Result<Reply> {
        log::debug!("{} {}", command, args.join(" "));
        self.transport.execute(command, &args).await
    }
}

#[async_trait]
impl SchemaResolver for Graph {
    async fn get_label(&self, id: usize) -> Result<String> {
        self.schema
            .resolve(SchemaKind::Label, id, || self.fetch_names(SchemaKind::Label))
            .await
    }

    async fn get_relation(&self, id: usize) -> Result<String> {
        self.schema
            .resolve(SchemaKind::RelationshipType, id, || {
                self.fetch_names(SchemaKind::RelationshipType)
            })
            .await
    }

    async fn get_property(&self, id: usize) -> Result<String> {
        self.schema
            .resolve(SchemaKind::PropertyKey, id, || {
                self.fetch_names(SchemaKind::PropertyKey)
            })
            .await
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("name", &self.name)
            .field("pending_nodes", &self.batch.node_count())
            .field("pending_edges", &self.batch.edge_count())
            .field("schema", &self.schema)
            .finish()
    }
}
