//! Bernova MCP - design token and component style management
//!
//! This library provides functionality to:
//! - Read, create and merge `bernova.config.json` and resolve themes
//! - Edit generated theme, foundations and media-query modules in place
//! - Validate component styles and names before they are written
//! - Run the Bernova compiler and builder
//! - Serve all of the above as MCP tools over stdio

pub mod cli;
pub mod compile;
pub mod config;
pub mod mcp;
pub mod module;
pub mod store;
pub mod validate;
