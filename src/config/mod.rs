//! Configuration module for Bernova projects
//!
//! Provides types, loading and theme resolution for `bernova.config.json`.

pub mod loader;
pub mod resolver;
pub mod schema;

pub use loader::{create_config, load_config, update_config, ConfigError};
pub use resolver::{resolve_module, resolve_theme, ModuleKind, ResolveError, ResolvedModule};
pub use schema::*;
