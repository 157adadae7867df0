//! Validation of component styles, names, CSS variables and media queries
//!
//! Validators never fail: they return a [`ValidationResult`] separating hard
//! errors (which block a mutation) from warnings (naming guidance that is
//! reported but does not block).

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;

static COMPONENT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").expect("component name pattern is valid"));

/// Media features the compiler knows about without a warning
pub const STANDARD_MEDIA_FEATURES: &[&str] =
    &["min-width", "max-width", "min-height", "max-height", "orientation"];

/// Result of a validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// An empty, valid result
    pub fn new() -> Self {
        Self { valid: true, errors: Vec::new(), warnings: Vec::new() }
    }

    /// Record a blocking error
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.valid = false;
    }

    /// Record a non-blocking warning
    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Errors joined for a one-line message
    pub fn error_message(&self) -> String {
        self.errors.join(", ")
    }
}

/// Container shape a special feature value must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureShape {
    Object,
    Array,
}

/// Reserved `$`-prefixed style keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialFeature {
    PseudoClasses,
    PseudoElements,
    Attributes,
    MediaQueries,
    Foreign,
    AdvancedSelector,
    DynamicValues,
}

impl SpecialFeature {
    /// Map a style key to its feature, if it is a known one
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "$pseudoClasses" => Self::PseudoClasses,
            "$pseudoElements" => Self::PseudoElements,
            "$attributes" => Self::Attributes,
            "$mediaQueries" => Self::MediaQueries,
            "$foreign" => Self::Foreign,
            "$advancedSelector" => Self::AdvancedSelector,
            "$dynamicValues" => Self::DynamicValues,
            _ => return None,
        })
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::PseudoClasses => "$pseudoClasses",
            Self::PseudoElements => "$pseudoElements",
            Self::Attributes => "$attributes",
            Self::MediaQueries => "$mediaQueries",
            Self::Foreign => "$foreign",
            Self::AdvancedSelector => "$advancedSelector",
            Self::DynamicValues => "$dynamicValues",
        }
    }

    pub fn shape(self) -> FeatureShape {
        match self {
            Self::AdvancedSelector | Self::DynamicValues => FeatureShape::Array,
            _ => FeatureShape::Object,
        }
    }
}

/// Validate a component name.
pub fn validate_component_name(name: &str) -> ValidationResult {
    let mut result = ValidationResult::new();

    if name.trim().is_empty() {
        result.error("Component name cannot be empty");
    }
    if !COMPONENT_NAME.is_match(name) {
        result.warning("Component name should be in UPPER_CASE format (e.g., BUTTON, CARD_HEADER)");
    }
    if name.starts_with('_') {
        result.error("Component name cannot start with underscore (reserved for nested elements)");
    }
    if name.starts_with('$') {
        result.error("Component name cannot start with $ (reserved for special features)");
    }

    result
}

/// Validate a component style object.
pub fn validate_component_styles(styles: &Value) -> ValidationResult {
    let mut result = ValidationResult::new();

    let Some(map) = styles.as_object() else {
        result.error("Component styles must be an object");
        return result;
    };

    for (key, value) in map {
        if let Some(feature) = SpecialFeature::from_key(key) {
            check_feature(&mut result, feature, value);
            continue;
        }
        if is_exempt_key(key) {
            continue;
        }
        if key.contains('-') {
            result.warning(format!(
                "Property \"{}\" should use underscores instead of hyphens (e.g., \"{}\")",
                key,
                key.replace('-', "_")
            ));
        }
    }

    result
}

/// `$` features, `_` nested elements and UPPER_CASE component references
/// follow their own naming.
fn is_exempt_key(key: &str) -> bool {
    key.starts_with('$') || key.starts_with('_') || key == key.to_uppercase()
}

fn check_feature(result: &mut ValidationResult, feature: SpecialFeature, value: &Value) {
    match feature.shape() {
        FeatureShape::Object if !value.is_object() => {
            result.error(format!("{} must be an object", feature.key()));
        }
        FeatureShape::Array => match value.as_array() {
            None => result.error(format!("{} must be an array", feature.key())),
            Some(items) if feature == SpecialFeature::DynamicValues => {
                for item in items {
                    if !item.as_str().is_some_and(|s| s.starts_with('$')) {
                        let shown = item.as_str().map_or_else(|| item.to_string(), str::to_string);
                        result.error(format!(
                            "Dynamic value \"{}\" must be a string starting with $",
                            shown
                        ));
                    }
                }
            }
            Some(_) => {}
        },
        FeatureShape::Object => {}
    }
}

/// Validate a foundations variable. Values must be non-empty strings or numbers.
pub fn validate_css_variable(category: &str, name: &str, value: &Value) -> ValidationResult {
    let mut result = ValidationResult::new();

    if category.trim().is_empty() {
        result.error("Variable category cannot be empty");
    }
    if name.trim().is_empty() {
        result.error("Variable name cannot be empty");
    }
    if name.contains('-') {
        result.warning("Variable name should use underscores instead of hyphens");
    }
    match value {
        Value::String(s) if s.trim().is_empty() => result.error("Variable value cannot be empty"),
        Value::String(_) | Value::Number(_) => {}
        Value::Null => result.error("Variable value cannot be empty"),
        _ => result.error("Variable value must be a string or a number"),
    }

    result
}

/// Validate a media query definition.
pub fn validate_media_query(
    name: &str,
    media_type: &str,
    values: &Map<String, Value>,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    if name.trim().is_empty() {
        result.error("Media query name cannot be empty");
    }
    if media_type.trim().is_empty() {
        result.error("Media query type cannot be empty (e.g., \"screen\", \"print\")");
    }
    if values.is_empty() {
        result.error("Media query values must be a non-empty object");
    }
    for (key, value) in values {
        if !value.is_string() {
            result.error(format!("Media query value for \"{}\" must be a string", key));
        }
        if !STANDARD_MEDIA_FEATURES.contains(&key.as_str()) {
            result.warning(format!(
                "Media query property \"{}\" may not be standard. Common properties: {}",
                key,
                STANDARD_MEDIA_FEATURES.join(", ")
            ));
        }
    }

    result
}
