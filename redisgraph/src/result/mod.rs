// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query results
//!
//! This module provides:
//! - [`QueryResult`], the decoded outcome of one query
//! - [`ResultDecoder`], which turns a compact reply into a `QueryResult`
//! - [`QueryStatistics`], parsed from the trailing statistics lines

pub mod decoder;
pub mod stats;

pub use decoder::{ResultDecoder, ValueTag};
pub use stats::{QueryStatistics, StatValue};

use crate::types::Value;
use serde::Serialize;
use std::fmt;

/// Column kind announced in the reply header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    /// Cells carry their own type tag
    Scalar,
    /// Cells are bare node payloads
    Node,
    /// Cells are bare relationship payloads
    Relation,
}

impl ColumnKind {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(ColumnKind::Scalar),
            2 => Some(ColumnKind::Node),
            3 => Some(ColumnKind::Relation),
            _ => None,
        }
    }
}

/// One column of the result header
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnHeader {
    pub kind: ColumnKind,
    pub name: String,
}

/// One result row; its length always equals the column count
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::ops::Index<usize> for Row {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.values[index]
    }
}

impl IntoIterator for Row {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// Decoded outcome of a query: header, rows in server order, statistics
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QueryResult {
    pub header: Vec<ColumnHeader>,
    pub rows: Vec<Row>,
    pub statistics: QueryStatistics,
}

impl QueryResult {
    /// Result of a statement that was never sent
    pub fn empty() -> Self {
        Self::default()
    }

    /// Column names in header order
    pub fn columns(&self) -> Vec<&str> {
        self.header.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|c| c.name == name)
    }

    /// Value of column `name` in row `row`
    pub fn value(&self, row: usize, name: &str) -> Option<&Value> {
        let column = self.column_index(name)?;
        self.rows.get(row)?.get(column)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.header.is_empty() {
            writeln!(f, "{}", self.columns().join(" | "))?;
            for row in &self.rows {
                let cells: Vec<String> = row.values().iter().map(|v| v.to_string()).collect();
                writeln!(f, "{}", cells.join(" | "))?;
            }
        }
        for (name, value) in self.statistics.iter() {
            writeln!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_lookup() {
        let result = QueryResult {
            header: vec![
                ColumnHeader {
                    kind: ColumnKind::Scalar,
                    name: "a.name".to_string(),
                },
                ColumnHeader {
                    kind: ColumnKind::Scalar,
                    name: "a.age".to_string(),
                },
            ],
            rows: vec![Row::new(vec![
                Value::String("Alice".to_string()),
                Value::Integer(33),
            ])],
            statistics: QueryStatistics::default(),
        };
        assert_eq!(result.columns(), vec!["a.name", "a.age"]);
        assert_eq!(result.value(0, "a.age"), Some(&Value::Integer(33)));
        assert_eq!(result.value(0, "missing"), None);
        assert_eq!(result.value(1, "a.age"), None);
        assert_eq!(result.rows[0][0].as_str(), Some("Alice"));
    }

    #[test]
    fn test_column_kind_codes() {
        assert_eq!(ColumnKind::from_code(1), Some(ColumnKind::Scalar));
        assert_eq!(ColumnKind::from_code(3), Some(ColumnKind::Relation));
        assert_eq!(ColumnKind::from_code(0), None);
        assert_eq!(ColumnKind::from_code(9), None);
    }
}
