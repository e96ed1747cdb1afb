// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema id resolution
//!
//! Compact replies reference labels, relationship types and property keys by
//! server-assigned integer ids. This module provides:
//! - [`SchemaKind`] naming the three id spaces
//! - [`SchemaResolver`], the callback the decoder uses to turn ids into names
//! - [`SchemaCache`], the lazily refreshed id→name cache behind the graph handle

pub mod cache;

pub use cache::SchemaCache;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three independent schema id spaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaKind {
    Label,
    RelationshipType,
    PropertyKey,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 3] = [
        SchemaKind::Label,
        SchemaKind::RelationshipType,
        SchemaKind::PropertyKey,
    ];

    /// Built-in procedure listing every name of this kind, ordered by id
    pub fn procedure(self) -> &'static str {
        match self {
            SchemaKind::Label => "db.labels",
            SchemaKind::RelationshipType => "db.relationshipTypes",
            SchemaKind::PropertyKey => "db.propertyKeys",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchemaKind::Label => "label",
            SchemaKind::RelationshipType => "relationship type",
            SchemaKind::PropertyKey => "property key",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for SchemaKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "label" | "labels" => Ok(SchemaKind::Label),
            "relation" | "relationship-type" | "relationship-types" | "relationshiptypes" => {
                Ok(SchemaKind::RelationshipType)
            }
            "property" | "property-key" | "property-keys" | "propertykeys" => {
                Ok(SchemaKind::PropertyKey)
            }
            _ => Err(format!(
                "Unknown schema kind: {}. Valid options: labels, relationship-types, property-keys",
                s
            )),
        }
    }
}

/// Resolves schema ids to names while a reply is being decoded
#[async_trait]
pub trait SchemaResolver: Send + Sync {
    async fn get_label(&self, id: usize) -> Result<String>;

    async fn get_relation(&self, id: usize) -> Result<String>;

    async fn get_property(&self, id: usize) -> Result<String>;

    /// Dispatch on `kind`
    async fn resolve(&self, kind: SchemaKind, id: usize) -> Result<String> {
        match kind {
            SchemaKind::Label => self.get_label(id).await,
            SchemaKind::RelationshipType => self.get_relation(id).await,
            SchemaKind::PropertyKey => self.get_property(id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_kind_from_str() {
        assert_eq!("labels".parse::<SchemaKind>().unwrap(), SchemaKind::Label);
        assert_eq!(
            "relationship-types".parse::<SchemaKind>().unwrap(),
            SchemaKind::RelationshipType
        );
        assert_eq!(
            "Property-Keys".parse::<SchemaKind>().unwrap(),
            SchemaKind::PropertyKey
        );
        assert!("indexes".parse::<SchemaKind>().is_err());
    }

    #[test]
    fn test_procedure_names() {
        let procedures: Vec<&str> = SchemaKind::ALL.iter().map(|k| k.procedure()).collect();
        assert_eq!(
            procedures,
            vec!["db.labels", "db.relationshipTypes", "db.propertyKeys"]
        );
    }
}
