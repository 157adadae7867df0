//! Invocation of the Bernova compiler and builder
//!
//! Both run through `npx` (configurable) with the workspace root as the
//! working directory. Arguments are passed as separate argv entries, never
//! through a shell.

use crate::store::Workspace;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tokio::process::Command;

/// Default launcher for the Bernova binaries
pub const DEFAULT_LAUNCHER: &str = "npx";

/// Compiler invocation error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Compiling needs a config document
    #[error("{} not found. Please create a configuration file first", .path.display())]
    ConfigMissing { path: PathBuf },
    /// The launcher could not be started
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    /// The process exited unsuccessfully
    #[error("`{command}` failed ({})", .status.map_or_else(|| "terminated by signal".to_string(), |c| format!("exit code {}", c)))]
    Failed { command: String, status: Option<i32>, stdout: String, stderr: String },
}

/// Which part of the design system to compile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum CompileMode {
    /// Foundations and components
    #[default]
    Full,
    /// CSS variables and base styles only
    FoundationOnly,
    /// Component styles only
    ComponentOnly,
}

impl CompileMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::FoundationOnly => "foundationOnly",
            Self::ComponentOnly => "componentOnly",
        }
    }

    fn flag(self) -> Option<&'static str> {
        match self {
            Self::Full => None,
            Self::FoundationOnly => Some("--foundationOnly"),
            Self::ComponentOnly => Some("--componentOnly"),
        }
    }
}

/// JavaScript module format emitted by the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    Cjs,
    Esm,
}

impl ModuleFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cjs => "cjs",
            Self::Esm => "esm",
        }
    }
}

/// Options for `bv-build`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    /// Base output directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_out_dir: Option<String>,
    /// Minify generated JavaScript
    #[serde(default)]
    pub minify_js: bool,
    /// Embed CSS into the JavaScript output
    #[serde(default)]
    pub embed_css: bool,
    /// Module formats to emit
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<ModuleFormat>,
}

/// Captured output of a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    pub command: String,
    pub stdout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
}

/// Arguments after the launcher for a compile run.
pub fn compile_args(mode: CompileMode) -> Vec<String> {
    let mut args = vec!["bernova".to_string()];
    args.extend(mode.flag().map(str::to_string));
    args
}

/// Arguments after the launcher for a build run.
pub fn build_args(options: &BuildOptions) -> Vec<String> {
    let mut args = vec!["bv-build".to_string()];
    if let Some(dir) = options.base_out_dir.as_deref().filter(|d| !d.is_empty()) {
        args.push("--base-out-dir".to_string());
        args.push(dir.to_string());
    }
    if options.minify_js {
        args.push("--minify-js".to_string());
    }
    if options.embed_css {
        args.push("--embed-css".to_string());
    }
    if !options.types.is_empty() {
        let types: Vec<_> = options.types.iter().map(|t| t.as_str()).collect();
        args.push("--types".to_string());
        args.push(types.join(","));
    }
    args
}

/// True if stderr holds something worth surfacing. Deprecation notices from
/// npm are routine noise.
pub fn is_significant_stderr(stderr: &str) -> bool {
    !stderr.trim().is_empty() && !stderr.contains("deprecated")
}

/// Runs the Bernova binaries for a workspace
#[derive(Debug, Clone)]
pub struct Compiler {
    launcher: String,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(DEFAULT_LAUNCHER)
    }
}

impl Compiler {
    pub fn new(launcher: impl Into<String>) -> Self {
        Self { launcher: launcher.into() }
    }

    pub fn launcher(&self) -> &str {
        &self.launcher
    }

    /// Run `bernova` in the given mode.
    pub async fn compile(
        &self,
        workspace: &Workspace,
        mode: CompileMode,
    ) -> Result<CommandOutput, CompileError> {
        require_config(workspace).await?;
        self.run(workspace, compile_args(mode)).await
    }

    /// Run `bv-build` with the given options.
    pub async fn build(
        &self,
        workspace: &Workspace,
        options: &BuildOptions,
    ) -> Result<CommandOutput, CompileError> {
        require_config(workspace).await?;
        self.run(workspace, build_args(options)).await
    }

    /// Installed compiler version (`bernova --version`).
    pub async fn version(&self, workspace: &Workspace) -> Result<String, CompileError> {
        let output = self.run(workspace, vec!["bernova".to_string(), "--version".to_string()]).await?;
        Ok(output.stdout.trim().to_string())
    }

    async fn run(
        &self,
        workspace: &Workspace,
        args: Vec<String>,
    ) -> Result<CommandOutput, CompileError> {
        let command = format!("{} {}", self.launcher, args.join(" "));
        log::info!("running `{}` in {}", command, workspace.root().display());

        let output = Command::new(&self.launcher)
            .args(&args)
            .current_dir(workspace.root())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| CompileError::Spawn { command: command.clone(), source })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(CompileError::Failed {
                command,
                status: output.status.code(),
                stdout,
                stderr,
            });
        }

        if is_significant_stderr(&stderr) {
            log::warn!("`{}` wrote to stderr: {}", command, stderr.trim());
        } else if !stderr.is_empty() {
            log::debug!("`{}` stderr: {}", command, stderr.trim());
        }

        Ok(CommandOutput { command, stdout, stderr })
    }
}

async fn require_config(workspace: &Workspace) -> Result<(), CompileError> {
    let path = workspace.config_path();
    if workspace.exists(&path).await {
        Ok(())
    } else {
        Err(CompileError::ConfigMissing { path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_compile_args() {
        assert_eq!(compile_args(CompileMode::Full), vec!["bernova"]);
        assert_eq!(compile_args(CompileMode::FoundationOnly), vec!["bernova", "--foundationOnly"]);
        assert_eq!(compile_args(CompileMode::ComponentOnly), vec!["bernova", "--componentOnly"]);
    }

    #[test]
    fn test_build_args_default() {
        assert_eq!(build_args(&BuildOptions::default()), vec!["bv-build"]);
    }

    #[test]
    fn test_build_args_all_options() {
        let options = BuildOptions {
            base_out_dir: Some("dist/styles".to_string()),
            minify_js: true,
            embed_css: true,
            types: vec![ModuleFormat::Cjs, ModuleFormat::Esm],
        };
        assert_eq!(
            build_args(&options),
            vec![
                "bv-build",
                "--base-out-dir",
                "dist/styles",
                "--minify-js",
                "--embed-css",
                "--types",
                "cjs,esm"
            ]
        );
    }

    #[test]
    fn test_compile_mode_serde() {
        let mode: CompileMode = serde_json::from_str("\"foundationOnly\"").unwrap();
        assert_eq!(mode, CompileMode::FoundationOnly);
        assert_eq!(serde_json::to_string(&CompileMode::ComponentOnly).unwrap(), "\"componentOnly\"");
        assert!(serde_json::from_str::<CompileMode>("\"partial\"").is_err());
    }

    #[test]
    fn test_stderr_classification() {
        assert!(!is_significant_stderr(""));
        assert!(!is_significant_stderr("  \n"));
        assert!(!is_significant_stderr("npm WARN deprecated glob@7.2.3"));
        assert!(is_significant_stderr("warning: unused variable"));
    }

    #[tokio::test]
    async fn test_compile_requires_config() {
        let temp = TempDir::new().expect("should create temp dir");
        let ws = Workspace::new(temp.path());
        let err = Compiler::default().compile(&ws, CompileMode::Full).await.unwrap_err();
        assert!(matches!(err, CompileError::ConfigMissing { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_captures_stdout() {
        let temp = TempDir::new().expect("should create temp dir");
        let ws = Workspace::new(temp.path());
        std::fs::write(ws.config_path(), "{}").unwrap();

        let output =
            Compiler::new("echo").compile(&ws, CompileMode::FoundationOnly).await.unwrap();
        assert_eq!(output.command, "echo bernova --foundationOnly");
        assert_eq!(output.stdout.trim(), "bernova --foundationOnly");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_failure_status() {
        let temp = TempDir::new().expect("should create temp dir");
        let ws = Workspace::new(temp.path());
        std::fs::write(ws.config_path(), "{}").unwrap();

        let err = Compiler::new("false").compile(&ws, CompileMode::Full).await.unwrap_err();
        assert!(matches!(err, CompileError::Failed { status: Some(1), .. }));
    }

    #[tokio::test]
    async fn test_spawn_failure() {
        let temp = TempDir::new().expect("should create temp dir");
        let ws = Workspace::new(temp.path());
        let err = Compiler::new("bernova-launcher-that-does-not-exist")
            .version(&ws)
            .await
            .unwrap_err();
        assert!(matches!(err, CompileError::Spawn { .. }));
    }
}
