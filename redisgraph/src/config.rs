// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Client configuration
//!
//! Settings come from defaults, a JSON file, or environment variables, in
//! that order of increasing precedence when combined by the caller.

use crate::error::{Error, Result};
use crate::graph::{Graph, SequentialAliases};
use crate::transport::Transport;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

pub const DEFAULT_URL: &str = "redis://127.0.0.1:6379/";
pub const DEFAULT_GRAPH: &str = "social";

/// Environment variable holding the server URL
pub const URL_ENV: &str = "REDISGRAPH_URL";
/// Environment variable holding the graph name
pub const GRAPH_ENV: &str = "REDISGRAPH_GRAPH";

/// Connection and graph settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server URL, e.g. `redis://127.0.0.1:6379/`
    pub url: String,
    /// Name of the graph to operate on
    pub graph: String,
    /// Use `<prefix>0`, `<prefix>1`, ... instead of random node aliases
    pub alias_prefix: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            graph: DEFAULT_GRAPH.to_string(),
            alias_prefix: None,
        }
    }
}

impl ClientConfig {
    /// Load settings from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: ClientConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay `REDISGRAPH_URL` / `REDISGRAPH_GRAPH` when they are set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(URL_ENV) {
            self.url = url;
        }
        if let Ok(graph) = std::env::var(GRAPH_ENV) {
            self.graph = graph;
        }
        self
    }

    /// Defaults overlaid with the environment
    pub fn from_env() -> Result<Self> {
        let config = Self::default().with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.graph.trim().is_empty() {
            return Err(Error::Config("graph name must not be empty".to_string()));
        }
        if !self.url.starts_with("redis://")
            && !self.url.starts_with("rediss://")
            && !self.url.starts_with("redis+unix://")
            && !self.url.starts_with("unix://")
        {
            return Err(Error::Config(format!(
                "unsupported server URL '{}': expected redis://, rediss:// or unix://",
                self.url
            )));
        }
        Ok(())
    }

    /// Graph handle over an existing transport
    pub fn graph(&self, transport: Arc<dyn Transport>) -> Graph {
        let graph = Graph::new(self.graph.clone(), transport);
        match &self.alias_prefix {
            Some(prefix) => graph.with_alias_generator(SequentialAliases::new(prefix.clone())),
            None => graph,
        }
    }

    /// Connect to the configured server and return a graph handle
    #[cfg(feature = "redis-transport")]
    pub async fn connect(&self) -> Result<Graph> {
        self.validate()?;
        let transport = crate::transport::RedisTransport::connect(&self.url).await?;
        Ok(self.graph(Arc::new(transport)))
    }
}
