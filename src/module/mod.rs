//! Generated module engine
//!
//! Theme, foundations and media-query modules are TypeScript files made of
//! top-level `export const NAME = { ... };` declarations plus one aggregate
//! export. This module finds, inserts, replaces and removes declarations in
//! that text while keeping the aggregate consistent.

pub mod aggregate;
pub mod document;
pub mod foundations;
pub mod literal;
pub mod media;
pub mod scanner;

use thiserror::Error;

pub use aggregate::normalize_separators;
pub use document::{DeclarationEntry, GeneratedModule};
pub use foundations::{css_variable_name, Foundations};
pub use literal::{parse_literal, render_literal};
pub use media::MediaQuery;
pub use scanner::{declaration_names, locate, scan, BodyKind, Declaration, ScanError};

/// Module editing error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModuleError {
    /// The module text could not be scanned
    #[error("cannot read module structure: {0}")]
    Scan(#[from] ScanError),
    /// No declaration (or entry) with this name
    #[error("\"{name}\" not found")]
    NotFound { name: String },
    /// A declaration (or entry) with this name already exists
    #[error("\"{name}\" already exists")]
    AlreadyExists { name: String },
    /// The name cannot be written as an `export const` binding
    #[error("\"{name}\" is not a valid identifier for an exported declaration")]
    InvalidName { name: String },
    /// The name is the module's own aggregate export
    #[error("\"{name}\" is the module's aggregate export and cannot be edited as a declaration")]
    ReservedName { name: String },
    /// The aggregate (or a part of it) has the wrong container type
    #[error("\"{name}\" must be {expected}")]
    AggregateShape { name: String, expected: &'static str },
    /// A declaration body is not a plain literal the engine can rewrite
    #[error("\"{name}\" is not a plain literal: {source}")]
    Literal {
        name: String,
        #[source]
        source: json5::Error,
    },
    /// A value could not be encoded as a literal
    #[error("cannot encode value: {0}")]
    Encode(String),
}
