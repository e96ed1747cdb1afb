// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Output formatting for query results

use colored::Colorize;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, CellAlignment, Color,
    ContentArrangement, Table,
};
use redisgraph_async::{QueryResult, Value};
use serde_json::json;

use super::commands::OutputFormat;

/// Renders a decoded [`QueryResult`] for the terminal
pub struct ResultFormatter;

impl ResultFormatter {
    pub fn format(result: &QueryResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => Self::format_table(result),
            OutputFormat::Json => Self::format_json(result),
            OutputFormat::Csv => Self::format_csv(result),
        }
    }

    fn format_table(result: &QueryResult) -> String {
        let mut output = String::new();

        if !result.header.is_empty() {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_content_arrangement(ContentArrangement::Dynamic);

            table.set_header(result.columns().into_iter().map(|name| {
                Cell::new(name)
                    .fg(Color::Cyan)
                    .set_alignment(CellAlignment::Center)
            }));
            for row in &result.rows {
                table.add_row(row.values().iter().map(value_cell));
            }

            output.push_str(&table.to_string());
            output.push('\n');
            let summary = match result.len() {
                1 => "1 row".to_string(),
                n => format!("{} rows", n),
            };
            output.push_str(&format!("{}\n", summary.dimmed()));
        }

        for (name, value) in result.statistics.iter() {
            output.push_str(&format!("{}: {}\n", name.dimmed(), value));
        }
        output.trim_end().to_string()
    }

    fn format_json(result: &QueryResult) -> String {
        let columns = result.columns();
        let rows: Vec<serde_json::Value> = result
            .rows
            .iter()
            .map(|row| {
                let object: serde_json::Map<String, serde_json::Value> = columns
                    .iter()
                    .zip(row.values())
                    .map(|(name, value)| (name.to_string(), json!(value)))
                    .collect();
                serde_json::Value::Object(object)
            })
            .collect();

        let document = json!({
            "columns": columns,
            "rows": rows,
            "statistics": result.statistics,
        });
        serde_json::to_string_pretty(&document).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    fn format_csv(result: &QueryResult) -> String {
        let mut lines = Vec::with_capacity(result.len() + 1);
        lines.push(
            result
                .columns()
                .iter()
                .map(|name| csv_field(name))
                .collect::<Vec<_>>()
                .join(","),
        );
        for row in &result.rows {
            lines.push(
                row.values()
                    .iter()
                    .map(|value| match value {
                        Value::Null => String::new(),
                        other => csv_field(&other.to_string()),
                    })
                    .collect::<Vec<_>>()
                    .join(","),
            );
        }
        lines.join("\n")
    }
}

fn value_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::new("null")
            .fg(Color::Grey)
            .set_alignment(CellAlignment::Center),
        Value::Boolean(_) => Cell::new(value.to_string())
            .fg(Color::Yellow)
            .set_alignment(CellAlignment::Center),
        Value::Integer(_) | Value::Float(_) => Cell::new(value.to_string())
            .fg(Color::Green)
            .set_alignment(CellAlignment::Right),
        Value::Node(_) | Value::Edge(_) | Value::Path(_) => {
            Cell::new(value.to_string()).fg(Color::Magenta)
        }
        _ => Cell::new(value.to_string()),
    }
}

fn csv_field(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}
