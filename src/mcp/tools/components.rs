//! Component style tools: create, get, update, delete and list.
//!
//! Components live as `export const NAME = {...};` declarations in the
//! theme module and are registered in its aggregate export.

use super::{open_module, reject_invalid, with_warnings, ThemeInput, ToolError, ToolResponse};
use crate::config::ModuleKind;
use crate::module::GeneratedModule;
use crate::store::Workspace;
use crate::validate::{validate_component_name, validate_component_styles};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};

/// Input for get_component and delete_component
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInput {
    /// Component name in UPPER_CASE (e.g. BUTTON, CARD_HEADER).
    pub component_name: String,

    /// Theme to operate on. Defaults to the first configured theme.
    #[serde(default)]
    pub theme_name: Option<String>,
}

/// Input for create_component and update_component
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStylesInput {
    /// Component name in UPPER_CASE (e.g. BUTTON, CARD_HEADER).
    pub component_name: String,

    /// Style object. Keys are CSS properties with underscores
    /// (background_color), `_name` nested elements, UPPER_CASE component
    /// references, or `$` special features such as `$pseudoClasses`.
    #[schemars(description = "Style object for the component (CSS properties with underscores, \
        nested `_elements`, and `$` special features)")]
    pub styles: Value,

    /// Theme to operate on. Defaults to the first configured theme.
    #[serde(default)]
    pub theme_name: Option<String>,
}

/// Add a new component to a theme.
pub async fn run_create_component(
    workspace: &Workspace,
    input: ComponentStylesInput,
) -> Result<ToolResponse, ToolError> {
    let name_check = validate_component_name(&input.component_name);
    reject_invalid(&name_check, "Invalid component name")?;
    let styles_check = validate_component_styles(&input.styles);
    reject_invalid(&styles_check, "Invalid component styles")?;

    let (module, text) =
        open_module(workspace, input.theme_name.as_deref(), ModuleKind::Theme).await?;
    let mut doc = GeneratedModule::new(text.unwrap_or_default(), &module.aggregate);
    doc.insert(&input.component_name, &input.styles)
        .map_err(|e| ToolError::module(&module.path, e))?;
    workspace.write_text(&module.path, doc.text()).await?;

    log::info!("created component {} in theme {}", input.component_name, module.theme);
    let data = json!({
        "componentName": input.component_name,
        "themeName": module.theme,
        "path": module.path,
        "styles": input.styles,
    });
    Ok(ToolResponse::success(
        format!(
            "Component \"{}\" created successfully in theme \"{}\"",
            input.component_name, module.theme
        ),
        with_warnings(data, [name_check.warnings, styles_check.warnings].concat()),
    ))
}

/// Fetch a component's declaration source and parsed styles.
pub async fn run_get_component(
    workspace: &Workspace,
    input: ComponentInput,
) -> Result<ToolResponse, ToolError> {
    reject_invalid(&validate_component_name(&input.component_name), "Invalid component name")?;

    let (module, text) =
        open_module(workspace, input.theme_name.as_deref(), ModuleKind::Theme).await?;
    let doc = GeneratedModule::new(text.unwrap_or_default(), &module.aggregate);
    let entry = doc.get(&input.component_name).map_err(|e| ToolError::module(&module.path, e))?;

    log::debug!("read component {} from {}", entry.name, module.path.display());
    Ok(ToolResponse::success(
        format!("Component \"{}\" found in theme \"{}\"", entry.name, module.theme),
        json!({
            "componentName": entry.name,
            "themeName": module.theme,
            "path": module.path,
            "content": entry.source,
            "styles": entry.value,
        }),
    ))
}

/// Replace the styles of an existing component.
pub async fn run_update_component(
    workspace: &Workspace,
    input: ComponentStylesInput,
) -> Result<ToolResponse, ToolError> {
    let name_check = validate_component_name(&input.component_name);
    reject_invalid(&name_check, "Invalid component name")?;
    let styles_check = validate_component_styles(&input.styles);
    reject_invalid(&styles_check, "Invalid component styles")?;

    let (module, text) =
        open_module(workspace, input.theme_name.as_deref(), ModuleKind::Theme).await?;
    let mut doc = GeneratedModule::new(text.unwrap_or_default(), &module.aggregate);
    doc.replace(&input.component_name, &input.styles)
        .map_err(|e| ToolError::module(&module.path, e))?;
    workspace.write_text(&module.path, doc.text()).await?;

    log::info!("updated component {} in theme {}", input.component_name, module.theme);
    let data = json!({
        "componentName": input.component_name,
        "themeName": module.theme,
        "path": module.path,
        "styles": input.styles,
    });
    Ok(ToolResponse::success(
        format!(
            "Component \"{}\" updated successfully in theme \"{}\"",
            input.component_name, module.theme
        ),
        with_warnings(data, [name_check.warnings, styles_check.warnings].concat()),
    ))
}

/// Remove a component and its aggregate entry.
pub async fn run_delete_component(
    workspace: &Workspace,
    input: ComponentInput,
) -> Result<ToolResponse, ToolError> {
    reject_invalid(&validate_component_name(&input.component_name), "Invalid component name")?;

    let (module, text) =
        open_module(workspace, input.theme_name.as_deref(), ModuleKind::Theme).await?;
    let mut doc = GeneratedModule::new(text.unwrap_or_default(), &module.aggregate);
    doc.delete(&input.component_name).map_err(|e| ToolError::module(&module.path, e))?;
    workspace.write_text(&module.path, doc.text()).await?;

    log::info!("deleted component {} from theme {}", input.component_name, module.theme);
    Ok(ToolResponse::success(
        format!(
            "Component \"{}\" deleted successfully from theme \"{}\"",
            input.component_name, module.theme
        ),
        json!({
            "componentName": input.component_name,
            "themeName": module.theme,
            "path": module.path,
        }),
    ))
}

/// Names of all components in a theme, in document order.
pub async fn run_list_components(
    workspace: &Workspace,
    input: ThemeInput,
) -> Result<ToolResponse, ToolError> {
    let (module, text) =
        open_module(workspace, input.theme_name.as_deref(), ModuleKind::Theme).await?;
    let Some(text) = text else {
        return Ok(ToolResponse::success(
            "Theme file not found. No components defined yet.",
            json!([]),
        ));
    };

    let names = GeneratedModule::new(text, &module.aggregate)
        .names()
        .map_err(|e| ToolError::module(&module.path, e))?;
    Ok(ToolResponse::success(
        format!("Found {} component(s) in theme \"{}\"", names.len(), module.theme),
        json!(names),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::create_config;
    use crate::mcp::tools::ErrorKind;
    use tempfile::TempDir;

    async fn workspace() -> (TempDir, Workspace) {
        let temp = TempDir::new().expect("should create temp dir");
        let ws = Workspace::new(temp.path());
        create_config(&ws, "default").await.unwrap();
        (temp, ws)
    }

    fn styles_input(name: &str, styles: Value) -> ComponentStylesInput {
        ComponentStylesInput { component_name: name.to_string(), styles, theme_name: None }
    }

    fn name_input(name: &str) -> ComponentInput {
        ComponentInput { component_name: name.to_string(), theme_name: None }
    }

    #[tokio::test]
    async fn test_create_writes_theme_module() {
        let (_temp, ws) = workspace().await;
        let response =
            run_create_component(&ws, styles_input("BUTTON", json!({"color": "red"}))).await.unwrap();
        assert!(response.success);
        assert!(response.data.as_ref().unwrap().get("warnings").is_none());

        let text = std::fs::read_to_string(ws.resolve("./src/design/default/theme.ts")).unwrap();
        assert_eq!(
            text,
            "export const BUTTON = {\n  color: \"red\"\n};\n\nexport const BERNOVA_STYLES = {\n  BUTTON\n};\n"
        );
    }

    #[tokio::test]
    async fn test_create_reports_warnings() {
        let (_temp, ws) = workspace().await;
        let response = run_create_component(
            &ws,
            styles_input("button", json!({"background-color": "red"})),
        )
        .await
        .unwrap();
        let warnings = response.data.unwrap()["warnings"].as_array().unwrap().len();
        assert_eq!(warnings, 2);
    }

    #[tokio::test]
    async fn test_create_invalid_styles_touches_nothing() {
        let (_temp, ws) = workspace().await;
        let err = run_create_component(&ws, styles_input("BUTTON", json!({"$dynamicValues": ["x"]})))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert!(!ws.resolve("./src/design/default/theme.ts").exists());
    }

    #[tokio::test]
    async fn test_create_duplicate() {
        let (_temp, ws) = workspace().await;
        run_create_component(&ws, styles_input("BUTTON", json!({}))).await.unwrap();
        let err = run_create_component(&ws, styles_input("BUTTON", json!({}))).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[tokio::test]
    async fn test_get_returns_source_and_styles() {
        let (_temp, ws) = workspace().await;
        run_create_component(&ws, styles_input("CARD", json!({"padding": "8px"}))).await.unwrap();
        let response = run_get_component(&ws, name_input("CARD")).await.unwrap();
        let data = response.data.unwrap();
        assert_eq!(data["styles"], json!({"padding": "8px"}));
        assert_eq!(data["content"], json!("export const CARD = {\n  padding: \"8px\"\n};"));
        assert_eq!(data["themeName"], json!("default"));
    }

    #[tokio::test]
    async fn test_get_missing_module_is_not_found() {
        let (_temp, ws) = workspace().await;
        let err = run_get_component(&ws, name_input("CARD")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_get_rejects_reserved_name() {
        let (_temp, ws) = workspace().await;
        let err = run_get_component(&ws, name_input("_hidden")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (_temp, ws) = workspace().await;
        run_create_component(&ws, styles_input("BUTTON", json!({"color": "red"}))).await.unwrap();
        run_update_component(&ws, styles_input("BUTTON", json!({"color": "blue"}))).await.unwrap();

        let data = run_get_component(&ws, name_input("BUTTON")).await.unwrap().data.unwrap();
        assert_eq!(data["styles"], json!({"color": "blue"}));

        run_delete_component(&ws, name_input("BUTTON")).await.unwrap();
        let err = run_delete_component(&ws, name_input("BUTTON")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let text = std::fs::read_to_string(ws.resolve("./src/design/default/theme.ts")).unwrap();
        assert_eq!(text, "export const BERNOVA_STYLES = {};\n");
    }

    #[tokio::test]
    async fn test_non_identifier_name_rejected() {
        let (_temp, ws) = workspace().await;
        let path = ws.resolve("./src/design/default/theme.ts");

        let err = run_create_component(&ws, styles_input("MY-BUTTON", json!({"color": "red"})))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert!(!path.exists());

        run_create_component(&ws, styles_input("BUTTON", json!({}))).await.unwrap();
        let before = std::fs::read_to_string(&path).unwrap();
        let err = run_create_component(&ws, styles_input("MY-BUTTON", json!({}))).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn test_aggregate_is_not_a_component() {
        let (_temp, ws) = workspace().await;
        run_create_component(&ws, styles_input("BUTTON", json!({"color": "red"}))).await.unwrap();
        let path = ws.resolve("./src/design/default/theme.ts");
        let before = std::fs::read_to_string(&path).unwrap();

        let err = run_update_component(&ws, styles_input("BERNOVA_STYLES", json!({"color": "blue"})))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        let err = run_get_component(&ws, name_input("BERNOVA_STYLES")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
        let response = run_list_components(&ws, ThemeInput::default()).await.unwrap();
        assert_eq!(response.data, Some(json!(["BUTTON"])));
    }

    #[tokio::test]
    async fn test_update_missing() {
        let (_temp, ws) = workspace().await;
        let err = run_update_component(&ws, styles_input("GHOST", json!({}))).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_list_components() {
        let (_temp, ws) = workspace().await;
        let response = run_list_components(&ws, ThemeInput::default()).await.unwrap();
        assert_eq!(response.data, Some(json!([])));

        for name in ["BUTTON", "CARD", "MODAL"] {
            run_create_component(&ws, styles_input(name, json!({}))).await.unwrap();
        }
        let response = run_list_components(&ws, ThemeInput::default()).await.unwrap();
        assert_eq!(response.data, Some(json!(["BUTTON", "CARD", "MODAL"])));
    }

    #[tokio::test]
    async fn test_unknown_theme() {
        let (_temp, ws) = workspace().await;
        let input = ComponentStylesInput {
            component_name: "BUTTON".to_string(),
            styles: json!({}),
            theme_name: Some("dark".to_string()),
        };
        let err = run_create_component(&ws, input).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("Theme \"dark\" not found"));
    }
}
