// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Nodes accumulated by the graph builder

use super::scalar::Scalar;
use indexmap::IndexMap;
use std::fmt;

/// A node waiting to be created on the server.
///
/// Renders as `(alias:Label{key:value,...})`; each part is omitted when empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub alias: Option<String>,
    pub label: Option<String>,
    pub properties: IndexMap<String, Scalar>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Add or replace a property, keeping the position of an existing key
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

/// Render `{k:v,k2:v2}` for a non-empty property map
pub(crate) fn write_properties(
    f: &mut fmt::Formatter<'_>,
    properties: &IndexMap<String, Scalar>,
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

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        if let Some(alias) = &self.alias {
            f.write_str(alias)?;
        }
        if let Some(label) = &self.label {
            write!(f, ":{}", label)?;
        }
        write_properties(f, &self.properties)?;
        f.write_str(")")
    }
}
