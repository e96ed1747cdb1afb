// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Edges accumulated by the graph builder

use super::node::write_properties;
use super::scalar::Scalar;
use indexmap::IndexMap;
use std::fmt;

/// A directed edge between two nodes of the pending batch.
///
/// Endpoints are referenced by alias only; the graph builder checks that
/// both aliases exist when the edge is added.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub src_alias: String,
    pub relation: String,
    pub dest_alias: String,
    pub properties: IndexMap<String, Scalar>,
}

impl Edge {
    pub fn new(
        src_alias: impl Into<String>,
        relation: impl Into<String>,
        dest_alias: impl Into<String>,
    ) -> Self {
        Self {
            src_alias: src_alias.into(),
            relation: relation.into(),
            dest_alias: dest_alias.into(),
            properties: IndexMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})-[", self.src_alias)?;
        if !self.relation.is_empty() {
            write!(f, ":{}", self.relation)?;
        }
        write_properties(f, &self.properties)?;
        write!(f, "]->({})", self.dest_alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_literal() {
        let edge = Edge::new("n1", "KNOWS", "n2");
        assert_eq!(edge.to_string(), "(n1)-[:KNOWS]->(n2)");

        let edge = Edge::new("a", "VISITED", "b")
            .with_property("year", 2019)
            .with_property("purpose", "pleasure");
        assert_eq!(
            edge.to_string(),
            "(a)-[:VISITED{year:2019,purpose:\"pleasure\"}]->(b)"
        );
    }
}
