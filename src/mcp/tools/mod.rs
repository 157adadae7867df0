//! MCP tool implementations for Bernova
//!
//! Each `run_*` function performs one tool call against a [`Workspace`] and
//! returns a [`ToolResponse`] or a [`ToolError`]. The server renders both as
//! the same JSON envelope, so callers always receive
//! `{ success, data?, message?, error? }`.

pub mod compile;
pub mod components;
pub mod config;
pub mod validate;
pub mod variables;

use crate::compile::CompileError;
use crate::config::{
    load_config, resolve_module, ConfigError, ModuleKind, ResolveError, ResolvedModule,
};
use crate::module::ModuleError;
use crate::store::{StoreError, Workspace};
use crate::validate::ValidationResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Coarse failure category reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    ValidationFailed,
    IoFailure,
    ExternalToolFailure,
}

/// Tool call failure
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ToolError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Editing a generated module failed
    #[error("{source} in {}", .path.display())]
    Module {
        path: PathBuf,
        #[source]
        source: ModuleError,
    },
    #[error(transparent)]
    Compile(#[from] CompileError),
    /// The payload was rejected before anything was touched
    #[error("{message}: {}", .errors.join(", "))]
    Validation { message: String, errors: Vec<String>, warnings: Vec<String> },
}

impl ToolError {
    pub(crate) fn module(path: &Path, source: ModuleError) -> Self {
        Self::Module { path: path.to_path_buf(), source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(ConfigError::NotFound { .. }) => ErrorKind::NotFound,
            Self::Config(ConfigError::AlreadyExists { .. }) => ErrorKind::AlreadyExists,
            Self::Config(ConfigError::Store(e)) | Self::Store(e) => store_kind(e),
            Self::Config(_) => ErrorKind::ValidationFailed,
            Self::Resolve(_) => ErrorKind::NotFound,
            Self::Module { source, .. } => match source {
                ModuleError::NotFound { .. } => ErrorKind::NotFound,
                ModuleError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
                _ => ErrorKind::ValidationFailed,
            },
            Self::Compile(CompileError::ConfigMissing { .. }) => ErrorKind::NotFound,
            Self::Compile(_) => ErrorKind::ExternalToolFailure,
            Self::Validation { .. } => ErrorKind::ValidationFailed,
        }
    }

    /// Structured details for the failure envelope
    pub fn data(&self) -> Value {
        let mut data = json!({ "kind": self.kind() });
        match self {
            Self::Compile(CompileError::Failed { command, status, stdout, stderr }) => {
                data["command"] = json!(command);
                data["status"] = json!(status);
                data["stdout"] = json!(stdout);
                data["stderr"] = json!(stderr);
            }
            Self::Validation { errors, warnings, .. } => {
                data["errors"] = json!(errors);
                if !warnings.is_empty() {
                    data["warnings"] = json!(warnings);
                }
            }
            Self::Config(ConfigError::Validation(errors)) => {
                data["errors"] = json!(errors);
            }
            Self::Resolve(ResolveError::ThemeNotFound { available, .. }) => {
                data["availableThemes"] = json!(available);
            }
            _ => {}
        }
        data
    }
}

fn store_kind(error: &StoreError) -> ErrorKind {
    match error {
        StoreError::Json { .. } => ErrorKind::ValidationFailed,
        _ => ErrorKind::IoFailure,
    }
}

/// Envelope returned by every tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResponse {
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self { success: true, data: Some(data), message: Some(message.into()), error: None }
    }

    pub fn failure(error: &ToolError) -> Self {
        Self { success: false, data: Some(error.data()), message: None, error: Some(error.to_string()) }
    }
}

/// Input for tools that only select a theme
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThemeInput {
    /// Theme to operate on. Defaults to the first configured theme.
    #[serde(default)]
    pub theme_name: Option<String>,
}

/// Reject a payload whose validation found errors.
pub(crate) fn reject_invalid(result: &ValidationResult, message: &str) -> Result<(), ToolError> {
    if result.valid {
        return Ok(());
    }
    Err(ToolError::Validation {
        message: message.to_string(),
        errors: result.errors.clone(),
        warnings: result.warnings.clone(),
    })
}

/// Attach non-blocking warnings to a success payload.
pub(crate) fn with_warnings(mut data: Value, warnings: Vec<String>) -> Value {
    if !warnings.is_empty() {
        data["warnings"] = json!(warnings);
    }
    data
}

/// Load the config, resolve a theme module and read its text.
///
/// The text is `None` if the module file does not exist yet.
pub(crate) async fn open_module(
    workspace: &Workspace,
    theme_name: Option<&str>,
    kind: ModuleKind,
) -> Result<(ResolvedModule, Option<String>), ToolError> {
    let config = load_config(workspace).await?;
    let module = resolve_module(workspace, &config, theme_name, kind)?;
    let text = workspace.read_text_opt(&module.path).await?;
    Ok((module, text))
}
