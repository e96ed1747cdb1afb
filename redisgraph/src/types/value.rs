// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Typed values decoded from compact query replies

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// A decoded result cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Node(NodeRecord),
    Edge(EdgeRecord),
    Path(PathRecord),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&NodeRecord> {
        match self {
            Value::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_edge(&self) -> Option<&EdgeRecord> {
        match self {
            Value::Edge(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&PathRecord> {
        match self {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Short type name used in error messages and CLI output
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Node(_) => "node",
            Value::Edge(_) => "edge",
            Value::Path(_) => "path",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }
}

/// A node as returned by the server, with schema ids already resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRecord {
    pub id: i64,
    pub labels: Vec<String>,
    pub properties: IndexMap<String, Value>,
}

/// A relationship as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRecord {
    pub id: i64,
    pub relation: String,
    pub src_id: i64,
    pub dest_id: i64,
    pub properties: IndexMap<String, Value>,
}

/// One element of a path, in traversal order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement<'a> {
    Node(&'a NodeRecord),
    Edge(&'a EdgeRecord),
}

/// A path: `nodes[0] edges[0] nodes[1] ... edges[n-1] nodes[n]`
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct PathRecord {
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
}

impl PathRecord {
    /// Build a path, rejecting node/edge counts that cannot alternate
    pub fn new(nodes: Vec<NodeRecord>, edges: Vec<EdgeRecord>) -> Option<Self> {
        let alternates = if nodes.is_empty() {
            edges.is_empty()
        } else {
            nodes.len() == edges.len() + 1
        };
        alternates.then_some(Self { nodes, edges })
    }

    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    pub fn first_node(&self) -> Option<&NodeRecord> {
        self.nodes.first()
    }

    pub fn last_node(&self) -> Option<&NodeRecord> {
        self.nodes.last()
    }

    /// Number of edges in the path
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Interleave nodes and edges in traversal order
    pub fn elements(&self) -> Vec<PathElement<'_>> {
        let mut out = Vec::with_capacity(self.nodes.len() + self.edges.len());
        for (i, node) in self.nodes.iter().enumerate() {
            out.push(PathElement::Node(node));
            if let Some(edge) = self.edges.get(i) {
                out.push(PathElement::Edge(edge));
            }
        }
        out
    }
}

fn write_record_properties(
    f: &mut fmt::Formatter<'_>,
    properties: &IndexMap<String, Value>,
) -> fmt::Result {
    if properties.is_empty() {
        return Ok(());
    }
    f.write_str("{")?;
    for (i, (key, value)) in properties.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}:{}", key, value)?;
    }
    f.write_str("}")
}

impl fmt::Display for NodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for label in &self.labels {
            write!(f, ":{}", label)?;
        }
        write_record_properties(f, &self.properties)?;
        f.write_str(")")
    }
}

impl fmt::Display for EdgeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[:{}", self.relation)?;
        write_record_properties(f, &self.properties)?;
        f.write_str("]")
    }
}

impl fmt::Display for PathRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in self.elements() {
            match element {
                PathElement::Node(node) => write!(f, "{}", node)?,
                PathElement::Edge(edge) => write!(f, "-{}->", edge)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::String(s) => f.write_str(s),
            Value::Node(n) => write!(f, "{}", n),
            Value::Edge(e) => write!(f, "{}", e),
            Value::Path(p) => write!(f, "{}", p),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}
