//! notepad-mcp - persistent notepads over MCP
//!
//! Serves a small SQLite-backed note store to MCP clients over stdio.

use notepad_core::Config;
use notepad_server::runner::{RunnerConfig, ServerRunner};
use std::env;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the store location
const DB_ENV: &str = "NOTEPAD_DB";

fn print_help() {
    eprintln!(
        r#"notepad-mcp v{VERSION} - Persistent notepads over MCP

USAGE:
    notepad-mcp [OPTIONS] [COMMAND]

COMMANDS:
    serve           Start the MCP server (default)
    setup           Generate MCP configuration for a client
    version         Print version information

OPTIONS:
    -h, --help          Print this help message
    -v, --version       Print version
    --db <PATH>         Path of the notepad store
    --config <PATH>     Load configuration from this TOML file

ENVIRONMENT:
    NOTEPAD_DB      Path of the notepad store (default: notepads.db next to the binary)
    RUST_LOG        Log level (default: from config, else info)

EXAMPLES:
    # Start server with the default store
    notepad-mcp

    # Start server with a specific store
    notepad-mcp --db ~/notes/notepads.db

    # Generate client configuration
    notepad-mcp setup --db ~/notes/notepads.db
"#
    );
}

fn print_version() {
    println!("notepad-mcp {}", VERSION);
}

fn generate_setup(db_path: &Path) {
    let binary_path = env::current_exe()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "notepad-mcp".to_string());

    println!(
        r#"
notepad-mcp Setup
=================

Add the following to your MCP client settings:

{{
  "mcpServers": {{
    "notepad": {{
      "command": "{binary_path}",
      "env": {{
        "NOTEPAD_DB": "{db}"
      }}
    }}
  }}
}}

Available Tools:
----------------
- addNotepad      Add a new notepad
- delNotepad      Delete a notepad
- updateNotepad   Update a notepad
- listNotepads    List all notepads
- useNotepad      Use a specific notepad

"#,
        binary_path = binary_path,
        db = db_path.display()
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut db: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut command = "serve";
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            "-v" | "--version" | "version" => {
                print_version();
                return Ok(());
            }
            flag @ ("--db" | "--config") => {
                i += 1;
                let Some(value) = args.get(i) else {
                    eprintln!("Error: {} requires a path argument", flag);
                    std::process::exit(1);
                };
                if flag == "--db" {
                    db = Some(PathBuf::from(value));
                } else {
                    config_path = Some(PathBuf::from(value));
                }
            }
            "setup" => command = "setup",
            "serve" => command = "serve",
            arg if arg.starts_with('-') => {
                eprintln!("Unknown option: {}", arg);
                eprintln!("Run 'notepad-mcp --help' for usage");
                std::process::exit(1);
            }
            _ => {}
        }
        i += 1;
    }

    let mut config = match &config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Store location: --db, then NOTEPAD_DB, then config, then next to the binary
    if let Some(path) = db.or_else(|| env::var(DB_ENV).ok().map(PathBuf::from)) {
        config.storage.path = Some(path);
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
    let db_path = config.database_path()?;

    match command {
        "setup" => {
            generate_setup(&db_path);
            Ok(())
        }
        _ => {
            // Initialize logging (to stderr so it doesn't interfere with MCP stdio)
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
                )
                .with_writer(std::io::stderr)
                .init();

            tracing::info!("Starting notepad-mcp server v{}", VERSION);
            tracing::info!("Store: {}", db_path.display());

            let runner_config = RunnerConfig::new(db_path).storage(config.storage.clone());

            // Bootstrap failures are fatal rather than serving a broken store
            let runner = ServerRunner::new(runner_config).map_err(|e| {
                tracing::error!("Failed to open notepad store: {}", e);
                anyhow::anyhow!("Failed to create server: {}", e)
            })?;

            tracing::info!("Available tools:");
            for tool in runner.server().list_tools() {
                tracing::info!("  - {}: {}", tool.name, tool.description.unwrap_or_default());
            }

            // Run the server (blocks until shutdown)
            runner.run().await
        }
    }
}
