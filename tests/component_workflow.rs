//! End-to-end tool workflows against a temporary workspace.

use bernova_mcp::mcp::tools::components::{
    run_create_component, run_delete_component, run_get_component, run_list_components,
    run_update_component, ComponentInput, ComponentStylesInput,
};
use bernova_mcp::mcp::tools::config::{run_create_config, run_update_config, CreateConfigInput, UpdateConfigInput};
use bernova_mcp::mcp::tools::variables::{
    run_add_css_variable, run_add_media_query, run_list_media_queries, CssVariableInput,
    MediaQueryInput,
};
use bernova_mcp::mcp::tools::{ErrorKind, ThemeInput};
use bernova_mcp::store::Workspace;
use serde_json::{json, Value};
use tempfile::TempDir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

async fn new_workspace(theme: &str) -> (TempDir, Workspace) {
    init_logging();
    let temp = TempDir::new().expect("should create temp dir");
    let ws = Workspace::new(temp.path());
    run_create_config(&ws, CreateConfigInput { theme_name: theme.to_string() })
        .await
        .expect("config should be created");
    (temp, ws)
}

fn styles(name: &str, theme: Option<&str>, styles: Value) -> ComponentStylesInput {
    ComponentStylesInput {
        component_name: name.to_string(),
        styles,
        theme_name: theme.map(str::to_string),
    }
}

fn component(name: &str) -> ComponentInput {
    ComponentInput { component_name: name.to_string(), theme_name: None }
}

#[tokio::test]
async fn test_component_round_trip() {
    let (_temp, ws) = new_workspace("default").await;

    let button = json!({
        "background_color": "blue",
        "padding": 8,
        "$pseudoClasses": {"hover": {"background_color": "navy"}},
        "_icon": {"margin-right": "4px"}
    });
    run_create_component(&ws, styles("BUTTON", None, button.clone())).await.unwrap();

    let data = run_get_component(&ws, component("BUTTON")).await.unwrap().data.unwrap();
    assert_eq!(data["styles"], button);

    let updated = json!({"background_color": "red"});
    run_update_component(&ws, styles("BUTTON", None, updated.clone())).await.unwrap();
    let data = run_get_component(&ws, component("BUTTON")).await.unwrap().data.unwrap();
    assert_eq!(data["styles"], updated);

    run_delete_component(&ws, component("BUTTON")).await.unwrap();
    let response = run_list_components(&ws, ThemeInput::default()).await.unwrap();
    assert_eq!(response.data, Some(json!([])));
}

#[tokio::test]
async fn test_many_components_keep_aggregate_consistent() {
    let (_temp, ws) = new_workspace("default").await;

    for name in ["A", "B", "C", "D", "E"] {
        run_create_component(&ws, styles(name, None, json!({"color": name}))).await.unwrap();
    }
    for name in ["B", "D"] {
        run_delete_component(&ws, component(name)).await.unwrap();
    }

    let response = run_list_components(&ws, ThemeInput::default()).await.unwrap();
    assert_eq!(response.data, Some(json!(["A", "C", "E"])));

    let text = std::fs::read_to_string(ws.resolve("./src/design/default/theme.ts")).unwrap();
    assert!(text.ends_with("export const BERNOVA_STYLES = {\n  A,\n  C,\n  E\n};\n"), "{}", text);
    assert!(!text.contains(",,"));
}

#[tokio::test]
async fn test_hand_written_module_preserved() {
    let (_temp, ws) = new_workspace("default").await;
    let path = ws.resolve("./src/design/default/theme.ts");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        "import { tokens } from './tokens';\n\n\
         // Primary action\n\
         export const BUTTON = { color: tokens.primary };\n\n\
         export const BERNOVA_STYLES = { BUTTON };\n",
    )
    .unwrap();

    run_create_component(&ws, styles("CARD", None, json!({"padding": "8px"}))).await.unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with(
        "import { tokens } from './tokens';\n\n// Primary action\nexport const BUTTON = { color: tokens.primary };\n"
    ));
    assert!(text.contains("export const BERNOVA_STYLES = { BUTTON, CARD };"));

    // Not a plain literal, but still readable as source.
    let data = run_get_component(&ws, component("BUTTON")).await.unwrap().data.unwrap();
    assert_eq!(data["styles"], Value::Null);
    assert_eq!(data["content"], json!("export const BUTTON = { color: tokens.primary };"));
}

#[tokio::test]
async fn test_themes_are_isolated() {
    let (_temp, ws) = new_workspace("light").await;
    run_update_config(
        &ws,
        UpdateConfigInput {
            config: json!({"themes": [
                {"name": "light", "theme": {"name": "LIGHT", "path": "./light.ts"}},
                {"name": "dark", "theme": {"name": "DARK", "path": "./dark.ts"}}
            ]}),
            merge: true,
        },
    )
    .await
    .unwrap();

    run_create_component(&ws, styles("BUTTON", Some("dark"), json!({}))).await.unwrap();

    let dark = ThemeInput { theme_name: Some("dark".to_string()) };
    assert_eq!(run_list_components(&ws, dark).await.unwrap().data, Some(json!(["BUTTON"])));
    assert_eq!(
        run_list_components(&ws, ThemeInput::default()).await.unwrap().data,
        Some(json!([]))
    );

    let err = run_create_component(&ws, styles("BUTTON", Some("sepia"), json!({})))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_tokens_workflow() {
    let (_temp, ws) = new_workspace("default").await;

    for (category, name, value) in
        [("colors", "primary", json!("#0055ff")), ("colors", "accent", json!("#ff5500")), ("spacing", "md", json!(16))]
    {
        let input = CssVariableInput {
            category: category.to_string(),
            name: name.to_string(),
            value,
            theme_name: None,
        };
        run_add_css_variable(&ws, input).await.unwrap();
    }

    let text = std::fs::read_to_string(ws.resolve("./src/design/default/foundations.ts")).unwrap();
    assert_eq!(
        text,
        "export const FOUNDATIONS = {\n  colors: {\n    primary: \"#0055ff\",\n    accent: \"#ff5500\"\n  },\n  spacing: {\n    md: 16\n  }\n};\n"
    );

    for (name, width) in [("tablet", "768px"), ("desktop", "1024px")] {
        let input = MediaQueryInput {
            name: name.to_string(),
            media_type: "screen".to_string(),
            values: json!({"min-width": width}).as_object().cloned().unwrap(),
            theme_name: None,
        };
        run_add_media_query(&ws, input).await.unwrap();
    }
    let response = run_list_media_queries(&ws, ThemeInput::default()).await.unwrap();
    assert_eq!(response.data, Some(json!(["tablet", "desktop"])));
}
