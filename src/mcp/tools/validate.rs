//! Input schema and handler for the validate_component_styles tool.

use super::{ToolError, ToolResponse};
use crate::validate::validate_component_styles;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ValidateStylesInput {
    /// Style object to check without writing anything.
    #[schemars(description = "Component style object to validate")]
    pub styles: Value,
}

/// Validation never fails the call: an invalid style object is a
/// successful response whose data says `valid: false`.
pub fn run_validate_component_styles(input: ValidateStylesInput) -> Result<ToolResponse, ToolError> {
    let result = validate_component_styles(&input.styles);
    let message = if result.valid { "Styles are valid" } else { "Styles have errors" };
    let data = serde_json::to_value(&result)
        .map_err(|e| ToolError::Config(crate::config::ConfigError::Invalid(e)))?;
    Ok(ToolResponse::success(message, data))
}
