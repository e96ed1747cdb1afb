//! Shared fixtures for graph integration tests
//!
//! Provides a scripted in-memory transport that records every command and
//! answers through a caller-supplied handler, plus builders for compact
//! replies.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use redisgraph_async::{Error, Reply, Result, Transport};
use std::sync::Arc;

/// One command as seen by the transport
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCommand {
    pub command: String,
    pub args: Vec<String>,
}

impl RecordedCommand {
    /// Query text of a GRAPH.QUERY / GRAPH.EXPLAIN command
    pub fn query_text(&self) -> &str {
        self.args.get(1).map(String::as_str).unwrap_or("")
    }
}

type Handler = Box<dyn Fn(&str, &[String]) -> Result<Reply> + Send + Sync>;

/// Transport answering from a handler closure
pub struct ScriptedTransport {
    handler: Handler,
    log: Mutex<Vec<RecordedCommand>>,
}

impl ScriptedTransport {
    pub fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&str, &[String]) -> Result<Reply> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            log: Mutex::new(Vec::new()),
        })
    }

    /// Answers every command with an empty statistics-only reply
    pub fn accepting() -> Arc<Self> {
        Self::new(|_, _| Ok(stats_reply(&[])))
    }

    /// Fails every command with a transport error
    pub fn failing(message: &'static str) -> Arc<Self> {
        Self::new(move |_, _| Err(Error::transport(message)))
    }

    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.log.lock().clone()
    }

    /// Query texts of every GRAPH.QUERY command, in order
    pub fn queries(&self) -> Vec<String> {
        self.log
            .lock()
            .iter()
            .filter(|c| c.command == "GRAPH.QUERY")
            .map(|c| c.query_text().to_string())
            .collect()
    }

    /// Number of GRAPH.QUERY commands whose text equals `text`
    pub fn count_query(&self, text: &str) -> usize {
        self.queries().iter().filter(|q| q.as_str() == text).count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, command: &str, args: &[String]) -> Result<Reply> {
        self.log.lock().push(RecordedCommand {
            command: command.to_string(),
            args: args.to_vec(),
        });
        (self.handler)(command, args)
    }
}

pub fn int(i: i64) -> Reply {
    Reply::Integer(i)
}

pub fn text(s: &str) -> Reply {
    Reply::bulk(s)
}

pub fn arr(items: Vec<Reply>) -> Reply {
    Reply::Array(items)
}

/// `[tag, payload]` scalar cell
pub fn cell(tag: i64, payload: Reply) -> Reply {
    arr(vec![int(tag), payload])
}

/// Reply carrying only statistics lines
pub fn stats_reply(lines: &[&str]) -> Reply {
    arr(vec![arr(lines.iter().map(|l| text(l)).collect())])
}

/// Reply with scalar columns `names` and the given rows of cells
pub fn table_reply(names: &[&str], rows: Vec<Vec<Reply>>) -> Reply {
    let header = names
        .iter()
        .map(|name| arr(vec![int(1), text(name)]))
        .collect();
    arr(vec![
        arr(header),
        arr(rows.into_iter().map(arr).collect()),
        arr(vec![text("Query internal execution time: 0.100000 milliseconds")]),
    ])
}

/// Single-column `db.labels()`-style reply listing `names`
pub fn names_reply(column: &str, names: &[&str]) -> Reply {
    table_reply(
        &[column],
        names.iter().map(|n| vec![cell(2, text(n))]).collect(),
    )
}
