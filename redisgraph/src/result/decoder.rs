// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Compact reply decoder
//!
//! A compact reply is either `[statistics]` or `[header, rows, statistics]`:
//!
//! ```text
//! header     := [[column_kind, name], ...]
//! rows       := [[cell, ...], ...]
//! cell       := [tag, payload]                      (scalar columns)
//! node       := [id, [label_id, ...], [property, ...]]
//! edge       := [id, relation_type_id, src_id, dest_id, [property, ...]]
//! property   := [property_key_id, tag, payload]
//! path       := [array cell of nodes, array cell of edges]
//! map        := [key, cell, key, cell, ...]
//! statistics := ["Nodes created: 2", ...]
//! ```
//!
//! Schema ids are resolved one at a time through a [`SchemaResolver`] while
//! the cell that references them is decoded.

use super::{ColumnHeader, ColumnKind, QueryResult, QueryStatistics, Row};
use crate::error::{Error, Result};
use crate::schema::SchemaResolver;
use crate::transport::Reply;
use crate::types::{EdgeRecord, NodeRecord, PathRecord, Value};
use indexmap::IndexMap;
use std::future::Future;
use std::pin::Pin;

type DecodeFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Type tag of a scalar cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueTag {
    Null,
    String,
    Integer,
    Boolean,
    Double,
    Array,
    Edge,
    Node,
    Path,
    Map,
    /// Any code this client does not understand
    Unknown(i64),
}

impl ValueTag {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => ValueTag::Null,
            2 => ValueTag::String,
            3 => ValueTag::Integer,
            4 => ValueTag::Boolean,
            5 => ValueTag::Double,
            6 => ValueTag::Array,
            7 => ValueTag::Edge,
            8 => ValueTag::Node,
            9 => ValueTag::Path,
            10 => ValueTag::Map,
            other => ValueTag::Unknown(other),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            ValueTag::Null => 1,
            ValueTag::String => 2,
            ValueTag::Integer => 3,
            ValueTag::Boolean => 4,
            ValueTag::Double => 5,
            ValueTag::Array => 6,
            ValueTag::Edge => 7,
            ValueTag::Node => 8,
            ValueTag::Path => 9,
            ValueTag::Map => 10,
            ValueTag::Unknown(code) => code,
        }
    }
}

fn expect_array<'a>(reply: &'a Reply, what: &str) -> Result<&'a [Reply]> {
    reply
        .as_array()
        .ok_or_else(|| Error::decode(format!("expected {} array, got {}", what, reply.kind())))
}

fn expect_arity<'a>(reply: &'a Reply, arity: usize, what: &str) -> Result<&'a [Reply]> {
    let items = expect_array(reply, what)?;
    if items.len() != arity {
        return Err(Error::decode(format!(
            "{} should have {} elements, got {}",
            what,
            arity,
            items.len()
        )));
    }
    Ok(items)
}

fn expect_integer(reply: &Reply, what: &str) -> Result<i64> {
    reply
        .as_integer()
        .ok_or_else(|| Error::decode(format!("expected integer {}, got {}", what, reply.kind())))
}

fn expect_text(reply: &Reply, what: &str) -> Result<String> {
    reply
        .as_text()
        .ok_or_else(|| Error::decode(format!("expected string {}, got {}", what, reply.kind())))
}

fn schema_id(reply: &Reply, what: &str) -> Result<usize> {
    let raw = expect_integer(reply, what)?;
    usize::try_from(raw).map_err(|_| Error::decode(format!("negative {}: {}", what, raw)))
}

/// Decodes compact replies, resolving schema ids through `resolver`
pub struct ResultDecoder<'r> {
    resolver: &'r dyn SchemaResolver,
}

impl<'r> ResultDecoder<'r> {
    pub fn new(resolver: &'r dyn SchemaResolver) -> Self {
        Self { resolver }
    }

    /// Decode a full query reply
    pub async fn decode(&self, reply: &Reply) -> Result<QueryResult> {
        let parts = expect_array(reply, "query reply")?;
        match parts {
            [stats] => Ok(QueryResult {
                header: Vec::new(),
                rows: Vec::new(),
                statistics: self.decode_statistics(stats)?,
            }),
            [header, rows, stats] => {
                let header = self.decode_header(header)?;
                let raw_rows = expect_array(rows, "result rows")?;
                let mut rows = Vec::with_capacity(raw_rows.len());
                for raw_row in raw_rows {
                    rows.push(self.decode_row(&header, raw_row).await?);
                }
                log::debug!("Decoded {} rows x {} columns", rows.len(), header.len());
                Ok(QueryResult {
                    header,
                    rows,
                    statistics: self.decode_statistics(stats)?,
                })
            }
            other => Err(Error::decode(format!(
                "query reply should have 1 or 3 sections, got {}",
                other.len()
            ))),
        }
    }

    fn decode_statistics(&self, stats: &Reply) -> Result<QueryStatistics> {
        let lines = expect_array(stats, "statistics")?
            .iter()
            .map(|line| expect_text(line, "statistics line"))
            .collect::<Result<Vec<_>>>()?;
        Ok(QueryStatistics::parse(lines))
    }

    fn decode_header(&self, header: &Reply) -> Result<Vec<ColumnHeader>> {
        expect_array(header, "header")?
            .iter()
            .map(|column| {
                let pair = expect_arity(column, 2, "header column")?;
                let code = expect_integer(&pair[0], "column kind")?;
                let kind = ColumnKind::from_code(code)
                    .ok_or_else(|| Error::decode(format!("unknown column kind {}", code)))?;
                let name = expect_text(&pair[1], "column name")?;
                Ok(ColumnHeader { kind, name })
            })
            .collect()
    }

    async fn decode_row(&self, header: &[ColumnHeader], raw_row: &Reply) -> Result<Row> {
        let cells = expect_arity(raw_row, header.len(), "row")?;
        let mut values = Vec::with_capacity(cells.len());
        for (column, cell) in header.iter().zip(cells) {
            let value = match column.kind {
                ColumnKind::Scalar => self.decode_cell(cell).await?,
                ColumnKind::Node => Value::Node(self.decode_node(cell).await?),
                ColumnKind::Relation => Value::Edge(self.decode_edge(cell).await?),
            };
            values.push(value);
        }
        Ok(Row::new(values))
    }

    /// Decode a `[tag, payload]` cell
    pub fn decode_cell<'a>(&'a self, cell: &'a Reply) -> DecodeFuture<'a, Value> {
        Box::pin(async move {
            let pair = expect_arity(cell, 2, "cell")?;
            let tag = ValueTag::from_code(expect_integer(&pair[0], "value tag")?);
            self.decode_scalar(tag, &pair[1]).await
        })
    }

    fn decode_scalar<'a>(&'a self, tag: ValueTag, payload: &'a Reply) -> DecodeFuture<'a, Value> {
        Box::pin(async move {
            log::trace!("Decoding {:?} cell", tag);
            let value = match tag {
                ValueTag::Null => Value::Null,
                ValueTag::String => Value::String(expect_text(payload, "string value")?),
                ValueTag::Integer => Value::Integer(expect_integer(payload, "integer value")?),
                ValueTag::Boolean => {
                    let text = expect_text(payload, "boolean value")?;
                    match text.as_str() {
                        "true" => Value::Boolean(true),
                        "false" => Value::Boolean(false),
                        other => {
                            return Err(Error::decode(format!("invalid boolean {:?}", other)))
                        }
                    }
                }
                ValueTag::Double => match payload {
                    Reply::Integer(i) => Value::Float(*i as f64),
                    _ => {
                        let text = expect_text(payload, "double value")?;
                        let parsed = text
                            .parse::<f64>()
                            .map_err(|_| Error::decode(format!("invalid double {:?}", text)))?;
                        Value::Float(parsed)
                    }
                },
                ValueTag::Array => Value::List(self.decode_list(payload).await?),
                ValueTag::Edge => Value::Edge(self.decode_edge(payload).await?),
                ValueTag::Node => Value::Node(self.decode_node(payload).await?),
                ValueTag::Path => Value::Path(self.decode_path(payload).await?),
                ValueTag::Map => Value::Map(self.decode_map(payload).await?),
                ValueTag::Unknown(code) => {
                    return Err(Error::decode(format!("unknown value tag {}", code)))
                }
            };
            Ok(value)
        })
    }

    fn decode_list<'a>(&'a self, payload: &'a Reply) -> DecodeFuture<'a, Vec<Value>> {
        Box::pin(async move {
            let cells = expect_array(payload, "list")?;
            let mut items = Vec::with_capacity(cells.len());
            for cell in cells {
                items.push(self.decode_cell(cell).await?);
            }
            Ok(items)
        })
    }

    fn decode_map<'a>(&'a self, payload: &'a Reply) -> DecodeFuture<'a, IndexMap<String, Value>> {
        Box::pin(async move {
            let flat = expect_array(payload, "map")?;
            if flat.len() % 2 != 0 {
                return Err(Error::decode(format!(
                    "map should alternate keys and values, got {} elements",
                    flat.len()
                )));
            }
            let mut entries = IndexMap::with_capacity(flat.len() / 2);
            for pair in flat.chunks(2) {
                let key = expect_text(&pair[0], "map key")?;
                let value = self.decode_cell(&pair[1]).await?;
                entries.insert(key, value);
            }
            Ok(entries)
        })
    }

    fn decode_properties<'a>(
        &'a self,
        payload: &'a Reply,
    ) -> DecodeFuture<'a, IndexMap<String, Value>> {
        Box::pin(async move {
            let raw = expect_array(payload, "properties")?;
            let mut properties = IndexMap::with_capacity(raw.len());
            for property in raw {
                let triple = expect_arity(property, 3, "property")?;
                let key = self
                    .resolver
                    .get_property(schema_id(&triple[0], "property key id")?)
                    .await?;
                let tag = ValueTag::from_code(expect_integer(&triple[1], "value tag")?);
                let value = self.decode_scalar(tag, &triple[2]).await?;
                properties.insert(key, value);
            }
            Ok(properties)
        })
    }

    fn decode_node<'a>(&'a self, payload: &'a Reply) -> DecodeFuture<'a, NodeRecord> {
        Box::pin(async move {
            let parts = expect_arity(payload, 3, "node")?;
            let id = expect_integer(&parts[0], "node id")?;
            let label_ids = expect_array(&parts[1], "node labels")?;
            let mut labels = Vec::with_capacity(label_ids.len());
            for label_id in label_ids {
                let label = self
                    .resolver
                    .get_label(schema_id(label_id, "label id")?)
                    .await?;
                labels.push(label);
            }
            let properties = self.decode_properties(&parts[2]).await?;
            Ok(NodeRecord {
                id,
                labels,
                properties,
            })
        })
    }

    fn decode_edge<'a>(&'a self, payload: &'a Reply) -> DecodeFuture<'a, EdgeRecord> {
        Box::pin(async move {
            let parts = expect_arity(payload, 5, "edge")?;
            let id = expect_integer(&parts[0], "edge id")?;
            let relation = self
                .resolver
                .get_relation(schema_id(&parts[1], "relationship type id")?)
                .await?;
            let src_id = expect_integer(&parts[2], "source node id")?;
            let dest_id = expect_integer(&parts[3], "destination node id")?;
            let properties = self.decode_properties(&parts[4]).await?;
            Ok(EdgeRecord {
                id,
                relation,
                src_id,
                dest_id,
                properties,
            })
        })
    }

    fn decode_path<'a>(&'a self, payload: &'a Reply) -> DecodeFuture<'a, PathRecord> {
        Box::pin(async move {
            let parts = expect_arity(payload, 2, "path")?;

            let mut nodes = Vec::new();
            for value in self.expect_list_cell(&parts[0], "path nodes").await? {
                match value {
                    Value::Node(node) => nodes.push(node),
                    other => {
                        return Err(Error::decode(format!(
                            "path nodes must be nodes, got {}",
                            other.type_name()
                        )))
                    }
                }
            }

            let mut edges = Vec::new();
            for value in self.expect_list_cell(&parts[1], "path edges").await? {
                match value {
                    Value::Edge(edge) => edges.push(edge),
                    other => {
                        return Err(Error::decode(format!(
                            "path edges must be edges, got {}",
                            other.type_name()
                        )))
                    }
                }
            }

            let (node_count, edge_count) = (nodes.len(), edges.len());
            PathRecord::new(nodes, edges).ok_or_else(|| {
                Error::decode(format!(
                    "path with {} nodes cannot have {} edges",
                    node_count, edge_count
                ))
            })
        })
    }

    async fn expect_list_cell(&self, cell: &Reply, what: &str) -> Result<Vec<Value>> {
        match self.decode_cell(cell).await? {
            Value::List(items) => Ok(items),
            other => Err(Error::decode(format!(
                "{} should be a list, got {}",
                what,
                other.type_name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaKind;
    use async_trait::async_trait;

    /// Resolver over fixed name tables
    struct StaticSchema {
        labels: Vec<&'static str>,
        relations: Vec<&'static str>,
        properties: Vec<&'static str>,
    }

    impl StaticSchema {
        fn new() -> Self {
            Self {
                labels: vec!["Person", "Employee"],
                relations: vec!["KNOWS", "WORKS_AT"],
                properties: vec!["name", "age", "since", "active"],
            }
        }

        fn lookup(table: &[&str], kind: SchemaKind, id: usize) -> Result<String> {
            table
                .get(id)
                .map(|s| s.to_string())
                .ok_or(Error::SchemaResolution { kind, id })
        }
    }

    #[async_trait]
    impl SchemaResolver for StaticSchema {
        async fn get_label(&self, id: usize) -> Result<String> {
            Self::lookup(&self.labels, SchemaKind::Label, id)
        }

        async fn get_relation(&self, id: usize) -> Result<String> {
            Self::lookup(&self.relations, SchemaKind::RelationshipType, id)
        }

        async fn get_property(&self, id: usize) -> Result<String> {
            Self::lookup(&self.properties, SchemaKind::PropertyKey, id)
        }
    }

    fn int(i: i64) -> Reply {
        Reply::Integer(i)
    }

    fn text(s: &str) -> Reply {
        Reply::bulk(s)
    }

    fn arr(items: Vec<Reply>) -> Reply {
        Reply::Array(items)
    }

    fn cell(tag: ValueTag, payload: Reply) -> Reply {
        arr(vec![int(tag.code()), payload])
    }

    fn scalar_reply(cells: Vec<Reply>) -> Reply {
        let header = (0..cells.len())
            .map(|i| arr(vec![int(1), text(&format!("c{}", i))]))
            .collect();
        arr(vec![
            arr(header),
            arr(vec![arr(cells)]),
            arr(vec![text("Cached execution: 0")]),
        ])
    }

    fn node_payload() -> Reply {
        arr(vec![
            int(12),
            arr(vec![int(0), int(1)]),
            arr(vec![
                arr(vec![int(0), int(2), text("Alice")]),
                arr(vec![int(1), int(3), int(33)]),
                arr(vec![int(3), int(4), text("true")]),
            ]),
        ])
    }

    fn edge_payload() -> Reply {
        arr(vec![
            int(4),
            int(0),
            int(12),
            int(13),
            arr(vec![arr(vec![int(2), int(3), int(2010)])]),
        ])
    }

    #[tokio::test]
    async fn test_decode_scalars() {
        let schema = StaticSchema::new();
        let decoder = ResultDecoder::new(&schema);
        let reply = scalar_reply(vec![
            cell(ValueTag::Null, Reply::Nil),
            cell(ValueTag::String, text("hello")),
            cell(ValueTag::Integer, int(-7)),
            cell(ValueTag::Boolean, text("false")),
            cell(ValueTag::Double, text("3.25")),
        ]);

        let result = decoder.decode(&reply).await.unwrap();
        assert_eq!(result.columns(), vec!["c0", "c1", "c2", "c3", "c4"]);
        assert_eq!(
            result.rows[0].values(),
            &[
                Value::Null,
                Value::String("hello".into()),
                Value::Integer(-7),
                Value::Boolean(false),
                Value::Float(3.25),
            ]
        );
        assert!(!result.statistics.cached_execution());
    }

    #[tokio::test]
    async fn test_decode_node_resolves_labels_and_properties_in_order() {
        let schema = StaticSchema::new();
        let decoder = ResultDecoder::new(&schema);
        let reply = scalar_reply(vec![cell(ValueTag::Node, node_payload())]);

        let result = decoder.decode(&reply).await.unwrap();
        let node = result.rows[0][0].as_node().unwrap();
        assert_eq!(node.id, 12);
        assert_eq!(node.labels, vec!["Person", "Employee"]);
        let keys: Vec<&str> = node.properties.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["name", "age", "active"]);
        assert_eq!(node.properties["age"], Value::Integer(33));
        assert_eq!(node.properties["active"], Value::Boolean(true));
    }

    #[tokio::test]
    async fn test_decode_node_and_relation_columns() {
        let schema = StaticSchema::new();
        let decoder = ResultDecoder::new(&schema);
        let reply = arr(vec![
            arr(vec![
                arr(vec![int(2), text("a")]),
                arr(vec![int(3), text("r")]),
            ]),
            arr(vec![arr(vec![node_payload(), edge_payload()])]),
            arr(vec![]),
        ]);

        let result = decoder.decode(&reply).await.unwrap();
        assert_eq!(result.header[0].kind, ColumnKind::Node);
        let edge = result.rows[0][1].as_edge().unwrap();
        assert_eq!(edge.relation, "KNOWS");
        assert_eq!((edge.src_id, edge.dest_id), (12, 13));
        assert_eq!(edge.properties["since"], Value::Integer(2010));
    }

    #[tokio::test]
    async fn test_decode_path() {
        let schema = StaticSchema::new();
        let decoder = ResultDecoder::new(&schema);
        let second_node = arr(vec![int(13), arr(vec![int(0)]), arr(vec![])]);
        let path = arr(vec![
            cell(
                ValueTag::Array,
                arr(vec![
                    cell(ValueTag::Node, node_payload()),
                    cell(ValueTag::Node, second_node),
                ]),
            ),
            cell(ValueTag::Array, arr(vec![cell(ValueTag::Edge, edge_payload())])),
        ]);
        let reply = scalar_reply(vec![cell(ValueTag::Path, path)]);

        let result = decoder.decode(&reply).await.unwrap();
        let path = result.rows[0][0].as_path().unwrap();
        assert_eq!(path.nodes().len(), 2);
        assert_eq!(path.edges().len(), 1);
        assert_eq!(path.last_node().unwrap().id, 13);
    }

    #[tokio::test]
    async fn test_decode_nested_list_and_map_preserve_order() {
        let schema = StaticSchema::new();
        let decoder = ResultDecoder::new(&schema);
        let map = arr(vec![
            text("z"),
            cell(ValueTag::Integer, int(1)),
            text("a"),
            cell(
                ValueTag::Array,
                arr(vec![
                    cell(ValueTag::String, text("x")),
                    cell(ValueTag::Double, text("0.5")),
                ]),
            ),
        ]);
        let reply = scalar_reply(vec![cell(ValueTag::Map, map)]);

        let result = decoder.decode(&reply).await.unwrap();
        let map = result.rows[0][0].as_map().unwrap();
        let keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(
            map["a"],
            Value::List(vec![Value::String("x".into()), Value::Float(0.5)])
        );
    }

    #[tokio::test]
    async fn test_statistics_only_reply() {
        let schema = StaticSchema::new();
        let decoder = ResultDecoder::new(&schema);
        let reply = arr(vec![arr(vec![
            text("Nodes created: 2"),
            text("Relationships created: 1"),
        ])]);

        let result = decoder.decode(&reply).await.unwrap();
        assert!(result.header.is_empty());
        assert!(result.rows.is_empty());
        assert_eq!(result.statistics.nodes_created(), 2);
        assert_eq!(result.statistics.relationships_created(), 1);
    }

    #[tokio::test]
    async fn test_unknown_tag_is_a_decode_error() {
        let schema = StaticSchema::new();
        let decoder = ResultDecoder::new(&schema);
        let reply = scalar_reply(vec![cell(ValueTag::Unknown(42), text("?"))]);

        let err = decoder.decode(&reply).await.unwrap_err();
        assert!(matches!(err, Error::Decode(ref m) if m.contains("42")));
    }

    #[tokio::test]
    async fn test_arity_mismatches_are_decode_errors() {
        let schema = StaticSchema::new();
        let decoder = ResultDecoder::new(&schema);

        // Node payload missing its property list
        let short_node = arr(vec![int(1), arr(vec![])]);
        let reply = scalar_reply(vec![cell(ValueTag::Node, short_node)]);
        assert!(matches!(decoder.decode(&reply).await, Err(Error::Decode(_))));

        // Odd-length map
        let odd_map = arr(vec![text("k")]);
        let reply = scalar_reply(vec![cell(ValueTag::Map, odd_map)]);
        assert!(matches!(decoder.decode(&reply).await, Err(Error::Decode(_))));

        // Row shorter than the header
        let reply = arr(vec![
            arr(vec![
                arr(vec![int(1), text("a")]),
                arr(vec![int(1), text("b")]),
            ]),
            arr(vec![arr(vec![cell(ValueTag::Integer, int(1))])]),
            arr(vec![]),
        ]);
        assert!(matches!(decoder.decode(&reply).await, Err(Error::Decode(_))));

        // Two sections only
        let reply = arr(vec![arr(vec![]), arr(vec![])]);
        assert!(matches!(decoder.decode(&reply).await, Err(Error::Decode(_))));
    }

    #[tokio::test]
    async fn test_path_with_mismatched_counts_is_rejected() {
        let schema = StaticSchema::new();
        let decoder = ResultDecoder::new(&schema);
        let path = arr(vec![
            cell(ValueTag::Array, arr(vec![cell(ValueTag::Node, node_payload())])),
            cell(ValueTag::Array, arr(vec![cell(ValueTag::Edge, edge_payload())])),
        ]);
        let reply = scalar_reply(vec![cell(ValueTag::Path, path)]);
        assert!(matches!(decoder.decode(&reply).await, Err(Error::Decode(_))));
    }

    #[tokio::test]
    async fn test_unresolvable_schema_id_propagates() {
        let schema = StaticSchema::new();
        let decoder = ResultDecoder::new(&schema);
        let node = arr(vec![int(1), arr(vec![int(9)]), arr(vec![])]);
        let reply = scalar_reply(vec![cell(ValueTag::Node, node)]);

        let err = decoder.decode(&reply).await.unwrap_err();
        assert!(matches!(
            err,
            Error::SchemaResolution {
                kind: SchemaKind::Label,
                id: 9
            }
        ));
    }
}
