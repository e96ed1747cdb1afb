// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query statistics parsed from the trailing lines of a reply

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

pub const LABELS_ADDED: &str = "Labels added";
pub const NODES_CREATED: &str = "Nodes created";
pub const NODES_DELETED: &str = "Nodes deleted";
pub const PROPERTIES_SET: &str = "Properties set";
pub const RELATIONSHIPS_CREATED: &str = "Relationships created";
pub const RELATIONSHIPS_DELETED: &str = "Relationships deleted";
pub const INDICES_CREATED: &str = "Indices created";
pub const INDICES_DELETED: &str = "Indices deleted";
pub const CACHED_EXECUTION: &str = "Cached execution";
pub const INTERNAL_EXECUTION_TIME: &str = "Query internal execution time";

/// `<name>: <value> [unit]`
static STAT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<name>[^:]+?)\s*:\s*(?P<value>\S+)(?:\s+(?P<unit>.+?))?\s*$")
        .expect("statistics pattern is valid")
});

/// Value of one statistic
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

impl StatValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StatValue::Number(n) => Some(*n),
            StatValue::Text(_) => None,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Number(n) => write!(f, "{}", n),
            StatValue::Text(t) => f.write_str(t),
        }
    }
}

/// Statistics reported by the server for one query, in reply order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct QueryStatistics {
    entries: IndexMap<String, StatValue>,
}

impl QueryStatistics {
    /// Parse the statistics lines of a reply.
    ///
    /// The leading token after the colon becomes the value: a number when it
    /// parses, text otherwise. A trailing unit such as `milliseconds` is
    /// dropped. Lines without a colon are skipped.
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = IndexMap::new();
        for line in lines {
            let line = line.as_ref();
            let Some(caps) = STAT_LINE.captures(line) else {
                log::warn!("Skipping unrecognized statistics line: {:?}", line);
                continue;
            };
            let name = caps["name"].to_string();
            let raw = &caps["value"];
            let value = match raw.parse::<f64>() {
                Ok(n) => StatValue::Number(n),
                Err(_) => StatValue::Text(raw.to_string()),
            };
            entries.insert(name, value);
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&StatValue> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn count(&self, name: &str) -> u64 {
        self.get(name)
            .and_then(StatValue::as_f64)
            .map(|n| n as u64)
            .unwrap_or(0)
    }

    pub fn labels_added(&self) -> u64 {
        self.count(LABELS_ADDED)
    }

    pub fn nodes_created(&self) -> u64 {
        self.count(NODES_CREATED)
    }

    pub fn nodes_deleted(&self) -> u64 {
        self.count(NODES_DELETED)
    }

    pub fn properties_set(&self) -> u64 {
        self.count(PROPERTIES_SET)
    }

    pub fn relationships_created(&self) -> u64 {
        self.count(RELATIONSHIPS_CREATED)
    }

    pub fn relationships_deleted(&self) -> u64 {
        self.count(RELATIONSHIPS_DELETED)
    }

    pub fn indices_created(&self) -> u64 {
        self.count(INDICES_CREATED)
    }

    pub fn indices_deleted(&self) -> u64 {
        self.count(INDICES_DELETED)
    }

    /// Whether the server reused a cached execution plan
    pub fn cached_execution(&self) -> bool {
        self.count(CACHED_EXECUTION) == 1
    }

    /// Server-side execution time in milliseconds
    pub fn run_time_ms(&self) -> Option<f64> {
        self.get(INTERNAL_EXECUTION_TIME).and_then(StatValue::as_f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_write_statistics() {
        let stats = QueryStatistics::parse([
            "Labels added: 1",
            "Nodes created: 2",
            "Properties set: 2",
            "Relationships created: 1",
            "Cached execution: 0",
            "Query internal execution time: 0.417000 milliseconds",
        ]);
        assert_eq!(stats.len(), 6);
        assert_eq!(stats.labels_added(), 1);
        assert_eq!(stats.nodes_created(), 2);
        assert_eq!(stats.properties_set(), 2);
        assert_eq!(stats.relationships_created(), 1);
        assert_eq!(stats.nodes_deleted(), 0);
        assert!(!stats.cached_execution());
        assert_eq!(stats.run_time_ms(), Some(0.417));

        let names: Vec<&str> = stats.iter().map(|(name, _)| name).collect();
        assert_eq!(names[0], LABELS_ADDED);
        assert_eq!(names[5], INTERNAL_EXECUTION_TIME);
    }

    #[test]
    fn test_non_numeric_values_are_kept_as_text() {
        let stats = QueryStatistics::parse(["Mode: read-only", "garbage without colon"]);
        assert_eq!(stats.len(), 1);
        assert_eq!(
            stats.get("Mode"),
            Some(&StatValue::Text("read-only".to_string()))
        );
    }
}
