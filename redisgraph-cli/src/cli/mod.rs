// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for RedisGraph
//!
//! Provides one-off query, explain, delete and schema commands plus an
//! interactive Cypher console (REPL).

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_console, handle_delete, handle_explain, handle_query, handle_schema, ConnectionArgs,
};
