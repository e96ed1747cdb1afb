// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Pending batch of nodes and edges waiting for `commit`

use crate::error::{Error, Result};
use crate::types::{Edge, Node};
use indexmap::IndexMap;

/// Nodes keyed by alias plus edges in insertion order
#[derive(Debug, Clone, Default)]
pub struct PendingBatch {
    nodes: IndexMap<String, Node>,
    edges: Vec<Edge>,
}

impl PendingBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node that already has an alias; a node with the same alias
    /// is replaced in place.
    pub(crate) fn insert_node(&mut self, alias: String, node: Node) {
        if self.nodes.insert(alias, node).is_some() {
            log::debug!("Replaced pending node with a colliding alias");
        }
    }

    /// Append an edge whose endpoints are both pending
    pub fn push_edge(&mut self, edge: Edge) -> Result<()> {
        for alias in [&edge.src_alias, &edge.dest_alias] {
            if !self.nodes.contains_key(alias) {
                return Err(Error::PreconditionViolation(format!(
                    "edge {} references node alias '{}' which is not in the graph",
                    edge, alias
                )));
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    pub fn node(&self, alias: &str) -> Option<&Node> {
        self.nodes.get(alias)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Fail on the first property value that cannot be rendered as a literal
    pub fn ensure_representable(&self) -> Result<()> {
        for (alias, node) in &self.nodes {
            for (key, value) in &node.properties {
                value.ensure_representable(&format!("property '{}' of node '{}'", key, alias))?;
            }
        }
        for edge in &self.edges {
            for (key, value) in &edge.properties {
                value.ensure_representable(&format!("property '{}' of edge {}", key, edge.relation))?;
            }
        }
        Ok(())
    }

    /// `CREATE <node>,...,<edge>,...`, or `None` for an empty batch
    pub fn create_statement(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let literals: Vec<String> = self
            .nodes
            .values()
            .map(|node| node.to_string())
            .chain(self.edges.iter().map(|edge| edge.to_string()))
            .collect();
        Some(format!("CREATE {}", literals.join(",")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(alias: &str, name: &str) -> Node {
        Node::new()
            .with_alias(alias)
            .with_label("Person")
            .with_property("name", name)
    }

    #[test]
    fn test_empty_batch_has_no_statement() {
        assert_eq!(PendingBatch::new().create_statement(), None);
    }

    #[test]
    fn test_create_statement_joins_literals() {
        let mut batch = PendingBatch::new();
        batch.insert_node("a".into(), person("a", "Alice"));
        batch.insert_node("b".into(), person("b", "Bob"));
        batch.push_edge(Edge::new("a", "KNOWS", "b")).unwrap();

        assert_eq!(
            batch.create_statement().unwrap(),
            "CREATE (a:Person{name:\"Alice\"}),(b:Person{name:\"Bob\"}),(a)-[:KNOWS]->(b)"
        );
    }

    #[test]
    fn test_nodes_only_has_no_trailing_comma() {
        let mut batch = PendingBatch::new();
        batch.insert_node("a".into(), person("a", "Alice"));
        let statement = batch.create_statement().unwrap();
        assert_eq!(statement, "CREATE (a:Person{name:\"Alice\"})");
        assert!(!statement.ends_with(','));
    }

    #[test]
    fn test_edge_with_unknown_endpoint_is_rejected() {
        let mut batch = PendingBatch::new();
        batch.insert_node("a".into(), person("a", "Alice"));

        let err = batch.push_edge(Edge::new("a", "KNOWS", "ghost")).unwrap_err();
        assert!(matches!(err, Error::PreconditionViolation(ref m) if m.contains("ghost")));
        assert_eq!(batch.edge_count(), 0);

        let err = batch.push_edge(Edge::new("ghost", "KNOWS", "a")).unwrap_err();
        assert!(matches!(err, Error::PreconditionViolation(_)));
        assert_eq!(batch.edge_count(), 0);
    }

    #[test]
    fn test_alias_collision_last_write_wins() {
        let mut batch = PendingBatch::new();
        batch.insert_node("a".into(), person("a", "Alice"));
        batch.insert_node("a".into(), person("a", "Alicia"));
        assert_eq!(batch.node_count(), 1);
        assert_eq!(
            batch.node("a").unwrap().properties["name"],
            crate::types::Scalar::from("Alicia")
        );
    }
}
