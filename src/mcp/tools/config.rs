//! Configuration tools: get_config, create_config, update_config,
//! list_themes and get_theme.

use super::{ToolError, ToolResponse};
use crate::config::{create_config, load_config, resolve_theme, update_config};
use crate::store::Workspace;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};

fn default_theme_name() -> String {
    "default".to_string()
}

fn default_merge() -> bool {
    true
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateConfigInput {
    /// Name of the initial theme (default: "default").
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfigInput {
    /// Full or partial configuration object.
    #[schemars(description = "Configuration object (full, or partial when merging)")]
    pub config: Value,

    /// Merge top-level keys into the existing configuration (default: true).
    /// When false the given object replaces the whole configuration.
    #[serde(default = "default_merge")]
    pub merge: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetThemeInput {
    /// Exact theme name.
    pub theme_name: String,
}

fn to_data(value: impl serde::Serialize) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(|e| ToolError::Config(e.into()))
}

pub async fn run_get_config(workspace: &Workspace) -> Result<ToolResponse, ToolError> {
    let config = load_config(workspace).await?;
    Ok(ToolResponse::success("Configuration loaded successfully", to_data(&config)?))
}

pub async fn run_create_config(
    workspace: &Workspace,
    input: CreateConfigInput,
) -> Result<ToolResponse, ToolError> {
    let config = create_config(workspace, &input.theme_name).await?;
    Ok(ToolResponse::success(
        format!("Configuration created successfully with theme \"{}\"", input.theme_name),
        to_data(&config)?,
    ))
}

pub async fn run_update_config(
    workspace: &Workspace,
    input: UpdateConfigInput,
) -> Result<ToolResponse, ToolError> {
    let config = update_config(workspace, input.config, input.merge).await?;
    Ok(ToolResponse::success("Configuration updated successfully", to_data(&config)?))
}

pub async fn run_list_themes(workspace: &Workspace) -> Result<ToolResponse, ToolError> {
    let names = load_config(workspace).await?.theme_names();
    Ok(ToolResponse::success(format!("Found {} theme(s)", names.len()), json!(names)))
}

pub async fn run_get_theme(
    workspace: &Workspace,
    input: GetThemeInput,
) -> Result<ToolResponse, ToolError> {
    let config = load_config(workspace).await?;
    let theme = resolve_theme(&config, Some(&input.theme_name))?;
    Ok(ToolResponse::success(format!("Theme \"{}\" found", theme.name), to_data(theme)?))
}
