// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Transport over a multiplexed async Redis connection

use super::{Reply, Transport};
use crate::error::Result;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;

/// [`Transport`] backed by the `redis` crate.
///
/// The multiplexed connection is cloned per command, so one transport can be
/// shared by several graph handles.
#[derive(Clone)]
pub struct RedisTransport {
    connection: MultiplexedConnection,
}

impl RedisTransport {
    /// Open a connection to `url` (e.g. `redis://127.0.0.1:6379/`)
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let connection = client.get_multiplexed_async_connection().await?;
        log::debug!("Connected to {}", url);
        Ok(Self { connection })
    }

    /// Wrap an already established connection
    pub fn from_connection(connection: MultiplexedConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl Transport for RedisTransport {
    async fn execute(&self, command: &str, args: &[String]) -> Result<Reply> {
        let mut cmd = redis::cmd(command);
        for arg in args {
            cmd.arg(arg.as_str());
        }
        let mut connection = self.connection.clone();
        let value: redis::Value = cmd.query_async(&mut connection).await?;
        Ok(value.into())
    }
}

impl From<redis::Value> for Reply {
    fn from(value: redis::Value) -> Self {
        match value {
            redis::Value::Nil => Reply::Nil,
            redis::Value::Int(i) => Reply::Integer(i),
            redis::Value::Data(data) => Reply::Bulk(data),
            redis::Value::Bulk(items) => Reply::Array(items.into_iter().map(Reply::from).collect()),
            redis::Value::Status(s) => Reply::Status(s),
            redis::Value::Okay => Reply::Status("OK".to_string()),
        }
    }
}
