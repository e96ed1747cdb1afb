// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query text builders: parameter preamble, procedure calls, MERGE

use crate::types::Scalar;
use std::fmt::Display;

/// `CYPHER k=v k2=v2 ` with a trailing space, keys in iteration order
pub fn params_header<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<Scalar>,
{
    let mut header = String::from("CYPHER ");
    for (key, value) in params {
        header.push_str(key.as_ref());
        header.push('=');
        header.push_str(&value.into().to_string());
        header.push(' ');
    }
    header
}

/// `CALL name(arg1,arg2) [YIELD col1,col2]`
pub fn procedure_call(procedure: &str, args: &[Scalar], yield_columns: Option<&[&str]>) -> String {
    let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
    let mut query = format!("CALL {}({})", procedure, args.join(","));
    if let Some(columns) = yield_columns {
        if !columns.is_empty() {
            query.push_str(" YIELD ");
            query.push_str(&columns.join(","));
        }
    }
    query
}

/// `MERGE <pattern>`
pub fn merge_statement(pattern: &impl Display) -> String {
    format!("MERGE {}", pattern)
}
