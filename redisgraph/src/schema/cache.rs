// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Lazily refreshed id→name cache for labels, relationship types and property keys

use super::SchemaKind;
use crate::error::{Error, Result};
use parking_lot::RwLock;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

/// One id space: names indexed by server-assigned id
#[derive(Default)]
struct Category {
    names: RwLock<Vec<String>>,
    /// Held while a refresh is in flight so concurrent misses share it
    refresh_gate: tokio::sync::Mutex<()>,
    refreshes: AtomicU64,
}

impl Category {
    fn get(&self, id: usize) -> Option<String> {
        self.names.read().get(id).cloned()
    }
}

/// Cache of schema names, one growable vector per [`SchemaKind`].
///
/// A miss rebuilds the whole category from the server exactly once. Ids are
/// append-only on the server, so a populated index never changes.
#[derive(Default)]
pub struct SchemaCache {
    labels: Category,
    relationship_types: Category,
    property_keys: Category,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn category(&self, kind: SchemaKind) -> &Category {
        match kind {
            SchemaKind::Label => &self.labels,
            SchemaKind::RelationshipType => &self.relationship_types,
            SchemaKind::PropertyKey => &self.property_keys,
        }
    }

    /// Cached name for `id`, without contacting the server
    pub fn lookup(&self, kind: SchemaKind, id: usize) -> Option<String> {
        self.category(kind).get(id)
    }

    /// Resolve `id`, calling `fetch` for the full name list on a miss.
    ///
    /// Concurrent misses on the same category wait for the refresh already
    /// in flight and re-check before fetching again. Fails with
    /// [`Error::SchemaResolution`] when the refreshed list still does not
    /// cover `id`.
    pub async fn resolve<F, Fut>(&self, kind: SchemaKind, id: usize, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<String>>>,
    {
        let category = self.category(kind);
        if let Some(name) = category.get(id) {
            return Ok(name);
        }

        let _gate = category.refresh_gate.lock().await;
        if let Some(name) = category.get(id) {
            return Ok(name);
        }

        log::debug!("Schema cache miss for {} id {}, refreshing", kind, id);
        let names = fetch().await?;
        log::debug!("Refreshed {} cache with {} entries", kind, names.len());
        category.refreshes.fetch_add(1, Ordering::Relaxed);
        *category.names.write() = names;

        category
            .get(id)
            .ok_or(Error::SchemaResolution { kind, id })
    }

    /// Replace a whole category with a freshly fetched list
    pub fn replace(&self, kind: SchemaKind, names: Vec<String>) {
        *self.category(kind).names.write() = names;
    }

    /// Number of cached names in a category
    pub fn len(&self, kind: SchemaKind) -> usize {
        self.category(kind).names.read().len()
    }

    pub fn is_empty(&self) -> bool {
        SchemaKind::ALL.iter().all(|kind| self.len(*kind) == 0)
    }

    /// Number of refreshes performed for a category since creation
    pub fn refresh_count(&self, kind: SchemaKind) -> u64 {
        self.category(kind).refreshes.load(Ordering::Relaxed)
    }

    /// Drop every cached name, e.g. after the graph was deleted
    pub fn clear(&self) {
        for kind in SchemaKind::ALL {
            self.category(kind).names.write().clear();
        }
    }
}

impl std::fmt::Debug for SchemaCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaCache")
            .field("labels", &*self.labels.names.read())
            .field("relationship_types", &*self.relationship_types.names.read())
            .field("property_keys", &*self.property_keys.names.read())
            .finish()
    }
}
