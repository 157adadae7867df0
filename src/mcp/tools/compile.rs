//! Compiler tools: compile_styles, build_styles and check_installation.

use super::{ToolError, ToolResponse};
use crate::compile::{BuildOptions, CompileMode, Compiler};
use crate::store::Workspace;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompileInput {
    /// What to compile: full (default), foundationOnly or componentOnly.
    #[serde(default)]
    pub mode: CompileMode,
}

pub async fn run_compile_styles(
    compiler: &Compiler,
    workspace: &Workspace,
    input: CompileInput,
) -> Result<ToolResponse, ToolError> {
    let output = compiler.compile(workspace, input.mode).await?;
    Ok(ToolResponse::success(
        format!("Styles compiled successfully in \"{}\" mode", input.mode.as_str()),
        json!({
            "mode": input.mode,
            "command": output.command,
            "output": output.stdout,
            "stderr": output.stderr,
        }),
    ))
}

pub async fn run_build_styles(
    compiler: &Compiler,
    workspace: &Workspace,
    options: BuildOptions,
) -> Result<ToolResponse, ToolError> {
    let output = compiler.build(workspace, &options).await?;
    Ok(ToolResponse::success(
        "Build completed successfully",
        json!({
            "options": options,
            "command": output.command,
            "output": output.stdout,
            "stderr": output.stderr,
        }),
    ))
}

pub async fn run_check_installation(
    compiler: &Compiler,
    workspace: &Workspace,
) -> Result<ToolResponse, ToolError> {
    let version = compiler.version(workspace).await?;
    Ok(ToolResponse::success("Bernova is installed", json!({ "version": version })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::tools::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_compile_input_defaults_to_full() {
        let input: CompileInput = serde_json::from_value(json!({})).unwrap();
        assert_eq!(input.mode, CompileMode::Full);
    }

    #[tokio::test]
    async fn test_compile_without_config() {
        let temp = TempDir::new().expect("should create temp dir");
        let ws = Workspace::new(temp.path());
        let err = run_compile_styles(&Compiler::default(), &ws, CompileInput::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_build_reports_output() {
        let temp = TempDir::new().expect("should create temp dir");
        let ws = Workspace::new(temp.path());
        std::fs::write(ws.config_path(), "{}").unwrap();

        let options: BuildOptions =
            serde_json::from_value(json!({"minifyJs": true, "types": ["esm"]})).unwrap();
        let data = run_build_styles(&Compiler::new("echo"), &ws, options)
            .await
            .unwrap()
            .data
            .unwrap();
        assert_eq!(data["output"].as_str().unwrap().trim(), "bv-build --minify-js --types esm");
        assert_eq!(data["options"]["minifyJs"], json!(true));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_compile_carries_output() {
        let temp = TempDir::new().expect("should create temp dir");
        let ws = Workspace::new(temp.path());
        std::fs::write(ws.config_path(), "{}").unwrap();

        let err = run_compile_styles(&Compiler::new("false"), &ws, CompileInput::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExternalToolFailure);
        assert_eq!(err.data()["status"], json!(1));
    }
}
