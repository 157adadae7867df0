//! Offline commands: validate, components, themes

use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use serde_json::Value;

use crate::config::load_config;
use crate::mcp::tools::components::run_list_components;
use crate::mcp::tools::ThemeInput;
use crate::store::Workspace;
use crate::validate::{validate_component_name, validate_component_styles, ValidationResult};

use super::{runtime, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the validate command
pub fn run_validate(input: &Path, name: Option<&str>, json: bool) -> ExitCode {
    let content = if input.as_os_str() == "-" {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            eprintln!("Error reading stdin: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
        buf
    } else {
        match std::fs::read_to_string(input) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error: cannot read {}: {}", input.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    };

    let styles: Value = match serde_json::from_str(&content) {
        Ok(styles) => styles,
        Err(e) => {
            eprintln!("Error: {} is not valid JSON: {}", input.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let mut result = validate_component_styles(&styles);
    if let Some(name) = name {
        merge(&mut result, validate_component_name(name));
    }

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        for error in &result.errors {
            println!("error: {}", error);
        }
        for warning in &result.warnings {
            println!("warning: {}", warning);
        }
        if result.valid {
            println!("Styles are valid ({} warning(s))", result.warnings.len());
        } else {
            println!("Styles are invalid ({} error(s))", result.errors.len());
        }
    }

    if result.valid {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

fn merge(into: &mut ValidationResult, other: ValidationResult) {
    into.valid &= other.valid;
    into.errors.extend(other.errors);
    into.warnings.extend(other.warnings);
}

/// Execute the components command
pub fn run_components(workspace: &Workspace, theme: Option<&str>) -> ExitCode {
    let rt = match runtime() {
        Ok(rt) => rt,
        Err(code) => return code,
    };

    let input = ThemeInput { theme_name: theme.map(str::to_string) };
    match rt.block_on(run_list_components(workspace, input)) {
        Ok(response) => {
            let names = response.data.as_ref().and_then(Value::as_array).cloned().unwrap_or_default();
            for name in names.iter().filter_map(Value::as_str) {
                println!("{}", name);
            }
            if let Some(message) = response.message {
                eprintln!("{}", message);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the themes command
pub fn run_themes(workspace: &Workspace) -> ExitCode {
    let rt = match runtime() {
        Ok(rt) => rt,
        Err(code) => return code,
    };

    match rt.block_on(load_config(workspace)) {
        Ok(config) => {
            for name in config.theme_names() {
                println!("{}", name);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
