//! MCP (Model Context Protocol) server implementation for Bernova
//!
//! Exposes configuration, component style, design token and compiler
//! operations of a Bernova workspace as MCP tools.
//!
//! Start the server with `bernova-mcp serve` (the default command).

mod server;
pub mod tools;

pub use server::{run_server, BernovaMcpServer};
