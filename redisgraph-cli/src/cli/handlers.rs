// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for RedisGraph

use colored::Colorize;
use redisgraph_async::{ClientConfig, Graph, QueryResult, SchemaKind};
use rustyline::{error::ReadlineError, CompletionType, Config, EditMode, Editor};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::commands::{parse_param, OutputFormat};
use super::output::ResultFormatter;

type HandlerResult = Result<(), Box<dyn std::error::Error>>;

/// Connection settings given on the command line
#[derive(Debug, Default, Clone)]
pub struct ConnectionArgs {
    pub url: Option<String>,
    pub graph: Option<String>,
    pub config: Option<PathBuf>,
}

/// Config file (or defaults), then environment, then command-line flags
pub fn resolve_config(args: &ConnectionArgs) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::from_json_file(path)?,
        None => ClientConfig::default(),
    }
    .with_env_overrides();

    if let Some(url) = &args.url {
        config.url = url.clone();
    }
    if let Some(graph) = &args.graph {
        config.graph = graph.clone();
    }
    config.validate()?;
    Ok(config)
}

async fn connect(args: &ConnectionArgs) -> Result<Graph, Box<dyn std::error::Error>> {
    let config = resolve_config(args)?;
    log::info!("Connecting to {} (graph '{}')", config.url, config.graph);
    Ok(config.connect().await?)
}

/// Handle the query command (one-off query execution)
pub async fn handle_query(
    args: &ConnectionArgs,
    query: String,
    params: Vec<String>,
    format: OutputFormat,
    explain: bool,
) -> HandlerResult {
    let params = params
        .iter()
        .map(|raw| parse_param(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let graph = connect(args).await?;

    if explain {
        println!("{}", graph.execution_plan(&query).await?);
        return Ok(());
    }

    let result = if params.is_empty() {
        graph.query(&query).await?
    } else {
        graph.query_with_params(&query, params).await?
    };
    println!("{}", ResultFormatter::format(&result, format));
    Ok(())
}

/// Handle the explain command
pub async fn handle_explain(args: &ConnectionArgs, query: String) -> HandlerResult {
    let graph = connect(args).await?;
    println!("{}", graph.execution_plan(&query).await?);
    Ok(())
}

/// Handle the delete command
pub async fn handle_delete(args: &ConnectionArgs, yes: bool) -> HandlerResult {
    let graph = connect(args).await?;

    if !yes {
        print!(
            "{}",
            format!("Delete graph '{}' and all of its data? [y/N] ", graph.name()).yellow()
        );
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("Aborted");
            return Ok(());
        }
    }

    let reply = graph.delete().await?;
    println!("{}", format!("Graph '{}' deleted: {}", graph.name(), reply).green());
    Ok(())
}

/// Handle the schema command
pub async fn handle_schema(
    args: &ConnectionArgs,
    kind: SchemaKind,
    format: OutputFormat,
) -> HandlerResult {
    let graph = connect(args).await?;
    let result = graph.call_procedure(kind.procedure(), &[], None).await?;
    println!("{}", ResultFormatter::format(&result, format));
    Ok(())
}

/// Handle the console (REPL) command
pub async fn handle_console(args: &ConnectionArgs) -> HandlerResult {
    let graph = connect(args).await?;
    let prompt_name = graph.name().to_string();

    println!("{}", "RedisGraph".bold().green());
    println!("Type 'help' for commands, 'exit' or 'quit' to exit");
    println!("Multi-line queries supported - use ';' to terminate");
    println!("{}", format!("Connected to graph: {}", prompt_name).cyan());

    let config = Config::builder()
        .edit_mode(EditMode::Emacs)
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .auto_add_history(false)
        .build();

    let mut rl = Editor::<(), _>::with_config(config)?;

    let history_path = ".redisgraph/history.txt";
    if let Some(parent) = Path::new(history_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let _ = rl.load_history(history_path);

    let mut query_buffer = String::new();

    loop {
        let prompt = if query_buffer.is_empty() {
            format!("{}> ", prompt_name.cyan())
        } else {
            format!("{}... ", " ".repeat(prompt_name.len().saturating_sub(2)))
        };

        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                if !query_buffer.is_empty() {
                    query_buffer.clear();
                    println!("{}", "\nQuery buffer cleared".yellow());
                }
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        let trimmed = line.trim();

        if query_buffer.is_empty() {
            match trimmed.to_lowercase().as_str() {
                "exit" | "quit" => {
                    println!("{}", "Goodbye!".green());
                    break;
                }
                "help" => {
                    print_help();
                    continue;
                }
                "clear" => {
                    print!("\x1B[2J\x1B[1;1H");
                    std::io::stdout().flush()?;
                    continue;
                }
                "" => continue,
                _ => {}
            }

            if let Some(rest) = trimmed.strip_prefix(':') {
                rl.add_history_entry(trimmed)?;
                run_console_command(&graph, rest.trim()).await;
                continue;
            }
        }

        query_buffer.push_str(&line);
        query_buffer.push('\n');

        if trimmed.ends_with(';') {
            let query = query_buffer.trim().to_string();
            rl.add_history_entry(&query)?;

            let statement = query.trim_end_matches(';').trim();
            print_outcome(graph.query(statement).await);

            query_buffer.clear();
        }
    }

    let _ = rl.save_history(history_path);

    Ok(())
}

/// `:explain`, `:schema` and `:delete` inside the console
async fn run_console_command(graph: &Graph, command: &str) {
    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map(|(n, r)| (n, r.trim()))
        .unwrap_or((command, ""));

    match name.to_lowercase().as_str() {
        "explain" if !rest.is_empty() => {
            match graph.execution_plan(rest.trim_end_matches(';')).await {
                Ok(plan) => println!("{}", plan),
                Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
            }
        }
        "schema" => {
            let kind = if rest.is_empty() { "labels" } else { rest };
            match kind.parse::<SchemaKind>() {
                Ok(kind) => print_outcome(graph.call_procedure(kind.procedure(), &[], None).await),
                Err(e) => eprintln!("{}", e.red()),
            }
        }
        "delete" => match graph.delete().await {
            Ok(reply) => println!("{}", format!("Graph deleted: {}", reply).green()),
            Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
        },
        _ => println!(
            "{}",
            format!("Unknown console command ':{}'. Type 'help' for commands.", name).yellow()
        ),
    }
}

fn print_outcome(outcome: redisgraph_async::Result<QueryResult>) {
    match outcome {
        Ok(result) => println!("{}", ResultFormatter::format(&result, OutputFormat::Table)),
        Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
    }
}

fn print_help() {
    println!("{}", "Available commands:".bold().green());
    println!("  {}  - Show this help message", "help".cyan());
    println!("  {}  - Exit the console", "exit/quit".cyan());
    println!("  {}  - Clear the screen", "clear".cyan());
    println!("  {}  - Show the execution plan of a query", ":explain <query>".cyan());
    println!(
        "  {}  - List labels, relationship-types or property-keys",
        ":schema [kind]".cyan()
    );
    println!("  {}  - Delete the current graph", ":delete".cyan());
    println!("\n{}", "Query syntax:".bold().green());
    println!("  Multi-line queries are supported");
    println!("  Terminate queries with semicolon (;)");
    println!("\n{}", "Cypher examples:".bold().green());
    println!("  {}", "MATCH (n:Person) RETURN n;".yellow());
    println!("  {}", "CREATE (:Person {name: 'Alice'})-[:KNOWS]->(:Person {name: 'Bob'});".yellow());
    println!("  {}", "CALL db.labels();".yellow());
}
