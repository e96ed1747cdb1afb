// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command definitions for RedisGraph

use clap::{Parser, Subcommand, ValueEnum};
use redisgraph_async::SchemaKind;
use std::path::PathBuf;

/// Log level options
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only errors
    Error,
    /// Warnings and errors
    Warn,
    /// Info, warnings, and errors
    Info,
    /// Debug messages and above (verbose)
    Debug,
    /// All messages including trace (very verbose)
    Trace,
    /// Disable all logging
    Off,
}

impl LogLevel {
    /// Convert to log::LevelFilter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

/// RedisGraph CLI - Cypher queries against a RedisGraph server
#[derive(Parser)]
#[command(name = "redisgraph")]
#[command(about = "RedisGraph - run Cypher queries and inspect graphs")]
#[command(version)]
pub struct Cli {
    /// Server URL (overrides config file and REDISGRAPH_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Graph name (overrides config file and REDISGRAPH_GRAPH)
    #[arg(short = 'g', long = "graph", global = true)]
    pub graph: Option<String>,

    /// JSON configuration file
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Set log level (error, warn, info, debug, trace, off)
    #[arg(short = 'l', long = "log-level", global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Verbose mode (equivalent to --log-level debug)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show detailed version information
    Version,

    /// Execute a Cypher query
    Query {
        /// The Cypher query to execute
        query: String,

        /// Query parameter as name=value (repeatable)
        #[arg(short = 'P', long = "param")]
        params: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,

        /// Show execution plan instead of running the query
        #[arg(short, long)]
        explain: bool,
    },

    /// Show the execution plan of a Cypher query
    Explain {
        /// The Cypher query to explain
        query: String,
    },

    /// Delete the graph and all of its data
    Delete {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List labels, relationship types or property keys
    Schema {
        /// labels, relationship-types or property-keys
        #[arg(default_value = "labels")]
        kind: SchemaKind,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Interactive Cypher console (REPL)
    Console,
}

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Split a `name=value` parameter into its name and parsed value
pub fn parse_param(raw: &str) -> Result<(String, redisgraph_async::Scalar), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("Invalid parameter '{}': expected name=value", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Invalid parameter '{}': empty name", raw));
    }
    Ok((name.to_string(), redisgraph_async::Scalar::parse_literal(value)))
}
