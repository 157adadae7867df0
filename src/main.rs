//! bernova-mcp - MCP server for Bernova design tokens and component styles

use std::process::ExitCode;

use bernova_mcp::cli;

fn main() -> ExitCode {
    cli::run()
}
