//! MCP server command

use std::process::ExitCode;

use crate::compile::Compiler;
use crate::store::Workspace;

use super::{runtime, EXIT_ERROR, EXIT_SUCCESS};

/// Serve the workspace over stdio until the client disconnects
pub fn run_serve(workspace: Workspace, compiler: Compiler) -> ExitCode {
    let rt = match runtime() {
        Ok(rt) => rt,
        Err(code) => return code,
    };

    match rt.block_on(crate::mcp::run_server(workspace, compiler)) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            log::error!("MCP server error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
