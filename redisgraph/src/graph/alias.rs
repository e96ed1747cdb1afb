// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Alias generation for nodes added without one

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of fresh node aliases
pub trait AliasGenerator: Send + Sync {
    fn next_alias(&self) -> String;
}

/// Random lowercase aliases, ten letters long
#[derive(Debug)]
pub struct RandomAliases {
    rng: parking_lot::Mutex<fastrand::Rng>,
    length: usize,
}

impl RandomAliases {
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    /// Seeded generator, reproducible across runs
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            rng: parking_lot::Mutex::new(rng),
            length: 10,
        }
    }
}

impl Default for RandomAliases {
    fn default() -> Self {
        Self::new()
    }
}

impl AliasGenerator for RandomAliases {
    fn next_alias(&self) -> String {
        let mut rng = self.rng.lock();
        (0..self.length).map(|_| rng.lowercase()).collect()
    }
}

/// Deterministic `prefix0`, `prefix1`, ... aliases
#[derive(Debug)]
pub struct SequentialAliases {
    prefix: String,
    next: AtomicU64,
}

impl SequentialAliases {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(0),
        }
    }
}

impl Default for SequentialAliases {
    fn default() -> Self {
        Self::new("n")
    }
}

impl AliasGenerator for SequentialAliases {
    fn next_alias(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_aliases_are_lowercase_letters() {
        let aliases = RandomAliases::new();
        let alias = aliases.next_alias();
        assert_eq!(alias.len(), 10);
        assert!(alias.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_seeded_aliases_repeat() {
        let a = RandomAliases::seeded(7);
        let b = RandomAliases::seeded(7);
        assert_eq!(a.next_alias(), b.next_alias());
        assert_eq!(a.next_alias(), b.next_alias());
    }

    #[test]
    fn test_sequential_aliases() {
        let aliases = SequentialAliases::new("node");
        assert_eq!(aliases.next_alias(), "node0");
        assert_eq!(aliases.next_alias(), "node1");
        assert_eq!(aliases.next_alias(), "node2");
    }
}
