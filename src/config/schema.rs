//! Configuration schema types for `bernova.config.json`
//!
//! Defines the structure and validation rules for a Bernova project
//! configuration. Keys the server does not model are kept in `extra` maps so
//! a read-modify-write cycle never drops them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Pointer to a generated module: the aggregate export name and its file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleRef {
    /// Aggregate export name, e.g. `BERNOVA_STYLES`
    #[serde(default)]
    pub name: String,
    /// Module path, relative to the workspace root
    #[serde(default)]
    pub path: String,
}

impl ModuleRef {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self { name: name.into(), path: path.into() }
    }

    fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.path.is_empty()
    }
}

/// Styled provider component generated by the compiler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration_help: Option<bool>,
}

/// Output options for the `bv-build` builder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_out_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minify_css: Option<bool>,
    #[serde(default, rename = "minifyJS", skip_serializing_if = "Option::is_none")]
    pub minify_js: Option<bool>,
    #[serde(default, rename = "preventMoveJS", skip_serializing_if = "Option::is_none")]
    pub prevent_move_js: Option<bool>,
    #[serde(default, rename = "preventMoveDTS", skip_serializing_if = "Option::is_none")]
    pub prevent_move_dts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_css: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Web fonts bundled with a theme
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontsConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub google: Vec<GoogleFont>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub local: Vec<LocalFont>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleFont {
    pub name: String,
    #[serde(default)]
    pub weights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalFont {
    pub name: String,
    pub path: String,
}

/// Generated helper tooling (`bvTools`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BvToolsConfig {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration_help: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_variables: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_class_names: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_media_queries: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_global_styles: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_components: Option<bool>,
}

/// Generated type declaration files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypesToolsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles_types: Option<ModuleRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components_types: Option<ModuleRef>,
}

/// Where a foreign stylesheet is injected relative to the theme's own CSS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForeignPosition {
    Before,
    After,
}

/// External stylesheet merged into a theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignTheme {
    pub position: ForeignPosition,
    pub name: String,
    pub path: String,
}

/// One theme entry of the configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeRecord {
    /// Theme name, unique within the configuration
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_css: Option<bool>,
    /// Component styles module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ModuleRef>,
    /// CSS variables module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foundations: Option<ModuleRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_styles: Option<ModuleRef>,
    /// Breakpoints module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_queries: Option<ModuleRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fonts: Option<FontsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bv_tools: Option<BvToolsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types_tools: Option<TypesToolsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_themes: Option<Vec<ForeignTheme>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Root of `bernova.config.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BernovaConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderConfig>,
    #[serde(default)]
    pub themes: Vec<ThemeRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsconfig_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler_options: Option<CompilerOptions>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Validation error for config values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "themes[0].foundations")
    pub field: String,
    /// Error message
    pub message: String,
}

impl ConfigValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' {}", self.field, self.message)
    }
}

impl BernovaConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.themes.is_empty() {
            errors.push(ConfigValidationError::new("themes", "must define at least one theme"));
        }

        let mut seen = HashSet::new();
        for (i, theme) in self.themes.iter().enumerate() {
            let field = format!("themes[{}]", i);

            if theme.name.trim().is_empty() {
                errors.push(ConfigValidationError::new(
                    format!("{}.name", field),
                    "must be a non-empty string",
                ));
            } else if !seen.insert(theme.name.as_str()) {
                errors.push(ConfigValidationError::new(
                    format!("{}.name", field),
                    format!("duplicates theme \"{}\"", theme.name),
                ));
            }

            let refs = [
                ("theme", &theme.theme),
                ("foundations", &theme.foundations),
                ("globalStyles", &theme.global_styles),
                ("mediaQueries", &theme.media_queries),
            ];
            for (key, module) in refs {
                if module.as_ref().is_some_and(|m| !m.is_complete()) {
                    errors.push(ConfigValidationError::new(
                        format!("{}.{}", field, key),
                        "must have \"name\" and \"path\"",
                    ));
                }
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Names of all themes, in configuration order
    pub fn theme_names(&self) -> Vec<String> {
        self.themes.iter().map(|t| t.name.clone()).collect()
    }
}

/// Configuration written by `create_config` for a fresh project.
pub fn default_config(theme_name: &str) -> BernovaConfig {
    let design = format!("./src/design/{}", theme_name);
    let styles = format!("./src/styles/{}", theme_name);
    let tools = format!("{}/tools", styles);

    BernovaConfig {
        provider: Some(ProviderConfig {
            name: "BernovaStyledProvider".to_string(),
            path: "./src/styles/provider".to_string(),
            declaration_help: Some(true),
        }),
        themes: vec![ThemeRecord {
            name: theme_name.to_string(),
            minified: Some(false),
            reset_css: Some(true),
            styles_path: Some(styles),
            theme: Some(ModuleRef::new("BERNOVA_STYLES", format!("{}/theme.ts", design))),
            foundations: Some(ModuleRef::new(
                "FOUNDATIONS",
                format!("{}/foundations.ts", design),
            )),
            global_styles: Some(ModuleRef::new(
                "GLOBAL_STYLES",
                format!("{}/globalStyles.ts", design),
            )),
            media_queries: Some(ModuleRef::new(
                "MEDIA_QUERIES",
                format!("{}/mediaQueries.ts", design),
            )),
            bv_tools: Some(BvToolsConfig {
                path: tools.clone(),
                declaration_help: Some(true),
                css_variables: Some(true),
                css_class_names: Some(true),
                css_media_queries: Some(true),
                css_global_styles: Some(true),
                available_components: Some(true),
            }),
            types_tools: Some(TypesToolsConfig {
                styles_types: Some(ModuleRef::new("stylesTypes", "./src/styles/types")),
                components_types: Some(ModuleRef::new("componentsTypes", tools)),
            }),
            fonts: Some(FontsConfig {
                google: vec![GoogleFont {
                    name: "Roboto".to_string(),
                    weights: vec!["400".to_string(), "700".to_string()],
                }],
                local: Vec::new(),
            }),
            ..ThemeRecord::default()
        }],
        ..BernovaConfig::default()
    }
}
