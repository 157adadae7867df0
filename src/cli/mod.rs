//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod inspect;
mod serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::compile::{Compiler, DEFAULT_LAUNCHER};
use crate::store::{Workspace, CONFIG_FILE_NAME};

/// Process exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Bernova MCP - design token and component style management for Bernova projects
#[derive(Parser)]
#[command(name = "bernova-mcp")]
#[command(about = "Bernova MCP - manage design tokens and component styles over the Model Context Protocol")]
#[command(version)]
pub struct Cli {
    /// Project root holding bernova.config.json (default: current directory)
    #[arg(long, global = true, env = "BERNOVA_ROOT")]
    pub root: Option<PathBuf>,

    /// Config file name or path, relative to the root
    #[arg(long, global = true, default_value = CONFIG_FILE_NAME)]
    pub config_file: PathBuf,

    /// Launcher used to run the Bernova binaries
    #[arg(long, global = true, default_value = DEFAULT_LAUNCHER, env = "BERNOVA_NPX")]
    pub npx: String,

    /// Log level (error, warn, info, debug, trace). Overrides RUST_LOG
    #[arg(long, global = true)]
    pub log_level: Option<log::LevelFilter>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve MCP tools over stdin/stdout (default)
    Serve,
    /// Validate a component style object (JSON file, or - for stdin)
    Validate {
        /// JSON file containing the style object
        input: PathBuf,

        /// Also check a component name
        #[arg(long)]
        name: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the components of a theme
    Components {
        /// Theme name (default: first configured theme)
        #[arg(short, long)]
        theme: Option<String>,
    },
    /// List configured themes
    Themes,
}

/// Logs go to stderr; stdout carries the MCP protocol.
fn init_logging(level: Option<log::LevelFilter>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.target(env_logger::Target::Stderr);
    // A logger may already be installed when embedded; keep it.
    let _ = builder.try_init();
}

/// Resolve the workspace root once; relative roots are made absolute.
fn workspace(cli: &Cli) -> Result<Workspace, std::io::Error> {
    let cwd = std::env::current_dir()?;
    let root = match &cli.root {
        Some(root) if root.is_absolute() => root.clone(),
        Some(root) => cwd.join(root),
        None => cwd,
    };
    Ok(Workspace::new(root).with_config_file(&cli.config_file))
}

/// Build a tokio runtime for a command, reporting failure as an exit code.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, ExitCode> {
    tokio::runtime::Runtime::new().map_err(|e| {
        eprintln!("Error: Failed to create async runtime: {}", e);
        ExitCode::from(EXIT_ERROR)
    })
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let workspace = match workspace(&cli) {
        Ok(workspace) => workspace,
        Err(e) => {
            eprintln!("Error: cannot determine working directory: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(workspace, Compiler::new(cli.npx)),
        Commands::Validate { input, name, json } => {
            inspect::run_validate(&input, name.as_deref(), json)
        }
        Commands::Components { theme } => inspect::run_components(&workspace, theme.as_deref()),
        Commands::Themes => inspect::run_themes(&workspace),
    }
}
