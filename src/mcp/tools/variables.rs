//! Design token tools: CSS variables in the foundations module and
//! breakpoints in the media-queries module.

use super::{open_module, reject_invalid, with_warnings, ThemeInput, ToolError, ToolResponse};
use crate::config::ModuleKind;
use crate::module::foundations::{add_variable, read_variables, update_variable};
use crate::module::media::{add_media_query, media_query_names};
use crate::module::{css_variable_name, MediaQuery};
use crate::store::Workspace;
use crate::validate::{validate_css_variable, validate_media_query};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Input for add_css_variable and update_css_variable
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CssVariableInput {
    /// Variable category (e.g. colors, spacing, typography).
    pub category: String,

    /// Variable name within the category (e.g. primary).
    pub name: String,

    /// Variable value, a string or a number.
    #[schemars(description = "Variable value (string or number)")]
    pub value: Value,

    /// Theme to operate on. Defaults to the first configured theme.
    #[serde(default)]
    pub theme_name: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaQueryInput {
    /// Breakpoint name (e.g. tablet).
    pub name: String,

    /// Media type (e.g. screen, print).
    #[serde(rename = "type")]
    pub media_type: String,

    /// Media features, e.g. {"min-width": "768px"}. Written in the order given.
    pub values: Map<String, Value>,

    /// Theme to operate on. Defaults to the first configured theme.
    #[serde(default)]
    pub theme_name: Option<String>,
}

pub async fn run_add_css_variable(
    workspace: &Workspace,
    input: CssVariableInput,
) -> Result<ToolResponse, ToolError> {
    let check = validate_css_variable(&input.category, &input.name, &input.value);
    reject_invalid(&check, "Invalid CSS variable")?;

    let (module, text) =
        open_module(workspace, input.theme_name.as_deref(), ModuleKind::Foundations).await?;
    let text = add_variable(
        &text.unwrap_or_default(),
        &module.aggregate,
        &input.category,
        &input.name,
        &input.value,
    )
    .map_err(|e| ToolError::module(&module.path, e))?;
    workspace.write_text(&module.path, &text).await?;

    log::info!("added variable {}.{} to theme {}", input.category, input.name, module.theme);
    Ok(ToolResponse::success(
        format!(
            "CSS variable \"{}.{}\" added successfully to theme \"{}\"",
            input.category, input.name, module.theme
        ),
        with_warnings(variable_data(&input, &module.theme, &module.path), check.warnings),
    ))
}

pub async fn run_update_css_variable(
    workspace: &Workspace,
    input: CssVariableInput,
) -> Result<ToolResponse, ToolError> {
    let check = validate_css_variable(&input.category, &input.name, &input.value);
    reject_invalid(&check, "Invalid CSS variable")?;

    let (module, text) =
        open_module(workspace, input.theme_name.as_deref(), ModuleKind::Foundations).await?;
    let text = update_variable(
        &text.unwrap_or_default(),
        &module.aggregate,
        &input.category,
        &input.name,
        &input.value,
    )
    .map_err(|e| ToolError::module(&module.path, e))?;
    workspace.write_text(&module.path, &text).await?;

    log::info!("updated variable {}.{} in theme {}", input.category, input.name, module.theme);
    Ok(ToolResponse::success(
        format!(
            "CSS variable \"{}.{}\" updated successfully in theme \"{}\"",
            input.category, input.name, module.theme
        ),
        with_warnings(variable_data(&input, &module.theme, &module.path), check.warnings),
    ))
}

fn variable_data(input: &CssVariableInput, theme: &str, path: &std::path::Path) -> Value {
    json!({
        "category": input.category,
        "name": input.name,
        "value": input.value,
        "themeName": theme,
        "path": path,
        "cssVariable": css_variable_name(&input.category, &input.name),
    })
}

pub async fn run_get_css_variables(
    workspace: &Workspace,
    input: ThemeInput,
) -> Result<ToolResponse, ToolError> {
    let (module, text) =
        open_module(workspace, input.theme_name.as_deref(), ModuleKind::Foundations).await?;
    let Some(text) = text else {
        return Ok(ToolResponse::success(
            "Foundations file not found. No variables defined yet.",
            json!({}),
        ));
    };

    let Some(foundations) =
        read_variables(&text, &module.aggregate).map_err(|e| ToolError::module(&module.path, e))?
    else {
        return Ok(ToolResponse::success("No variables found", json!({})));
    };

    Ok(ToolResponse::success(
        format!("Foundations loaded from theme \"{}\"", module.theme),
        json!({
            "themeName": module.theme,
            "path": module.path,
            "content": foundations.source,
            "variables": foundations.categories,
        }),
    ))
}

pub async fn run_add_media_query(
    workspace: &Workspace,
    input: MediaQueryInput,
) -> Result<ToolResponse, ToolError> {
    let check = validate_media_query(&input.name, &input.media_type, &input.values);
    reject_invalid(&check, "Invalid media query")?;

    let (module, text) =
        open_module(workspace, input.theme_name.as_deref(), ModuleKind::MediaQueries).await?;
    let query = MediaQuery { name: input.name, media_type: input.media_type, values: input.values };
    let text = add_media_query(&text.unwrap_or_default(), &module.aggregate, &query)
        .map_err(|e| ToolError::module(&module.path, e))?;
    workspace.write_text(&module.path, &text).await?;

    log::info!("added media query {} to theme {}", query.name, module.theme);
    let data = json!({
        "name": query.name,
        "type": query.media_type,
        "values": query.values,
        "themeName": module.theme,
        "path": module.path,
    });
    Ok(ToolResponse::success(
        format!("Media query \"{}\" added successfully to theme \"{}\"", query.name, module.theme),
        with_warnings(data, check.warnings),
    ))
}

pub async fn run_list_media_queries(
    workspace: &Workspace,
    input: ThemeInput,
) -> Result<ToolResponse, ToolError> {
    let (module, text) =
        open_module(workspace, input.theme_name.as_deref(), ModuleKind::MediaQueries).await?;
    let Some(text) = text else {
        return Ok(ToolResponse::success(
            "Media queries file not found. No media queries defined yet.",
            json!([]),
        ));
    };

    let names = media_query_names(&text, &module.aggregate)
        .map_err(|e| ToolError::module(&module.path, e))?;
    Ok(ToolResponse::success(
        format!("Found {} media query(ies) in theme \"{}\"", names.len(), module.theme),
        json!(names),
    ))
}
