// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! RedisGraph command-line entry point

mod cli;

use clap::Parser;
use colored::Colorize;

use cli::commands::LogLevel;
use cli::{Cli, Commands, ConnectionArgs};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = match (cli.log_level, cli.verbose) {
        (Some(level), _) => level,
        (None, true) => LogLevel::Debug,
        (None, false) => LogLevel::Warn,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level.to_level_filter())
        .init();

    let connection = ConnectionArgs {
        url: cli.url,
        graph: cli.graph,
        config: cli.config,
    };

    let outcome = match cli.command {
        Commands::Version => {
            print_version();
            Ok(())
        }
        Commands::Query {
            query,
            params,
            format,
            explain,
        } => cli::handle_query(&connection, query, params, format, explain).await,
        Commands::Explain { query } => cli::handle_explain(&connection, query).await,
        Commands::Delete { yes } => cli::handle_delete(&connection, yes).await,
        Commands::Schema { kind, format } => cli::handle_schema(&connection, kind, format).await,
        Commands::Console => cli::handle_console(&connection).await,
    };

    if let Err(e) = outcome {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn print_version() {
    println!("{} {}", "redisgraph".bold().green(), env!("CARGO_PKG_VERSION"));
    println!("  client library: redisgraph-async");
    println!(
        "  default server: {}",
        redisgraph_async::config::DEFAULT_URL
    );
}
