//! Core MCP server implementation.

use super::tools::compile::{
    run_build_styles, run_check_installation, run_compile_styles, CompileInput,
};
use super::tools::components::{
    run_create_component, run_delete_component, run_get_component, run_list_components,
    run_update_component, ComponentInput, ComponentStylesInput,
};
use super::tools::config::{
    run_create_config, run_get_config, run_get_theme, run_list_themes, run_update_config,
    CreateConfigInput, GetThemeInput, UpdateConfigInput,
};
use super::tools::validate::{run_validate_component_styles, ValidateStylesInput};
use super::tools::variables::{
    run_add_css_variable, run_add_media_query, run_get_css_variables, run_list_media_queries,
    run_update_css_variable, CssVariableInput, MediaQueryInput,
};
use super::tools::{ThemeInput, ToolError, ToolResponse};
use crate::compile::{BuildOptions, Compiler};
use crate::store::Workspace;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};
use std::sync::Arc;
use tokio::sync::Mutex;

/// The Bernova MCP Server
///
/// Exposes configuration, component, token and compiler operations of one
/// Bernova workspace as MCP tools. Mutating tools are serialized through a
/// single lock so read-modify-write cycles on a module never interleave.
#[derive(Debug, Clone)]
pub struct BernovaMcpServer {
    workspace: Workspace,
    compiler: Compiler,
    write_lock: Arc<Mutex<()>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl BernovaMcpServer {
    pub fn new(workspace: Workspace, compiler: Compiler) -> Self {
        Self {
            workspace,
            compiler,
            write_lock: Arc::new(Mutex::new(())),
            tool_router: Self::tool_router(),
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    #[tool(description = "Read bernova.config.json from the workspace root")]
    async fn get_config(&self) -> Result<CallToolResult, McpError> {
        respond(run_get_config(&self.workspace).await)
    }

    #[tool(description = "Create an initial bernova.config.json with one theme. \
        Fails if the file already exists")]
    async fn create_config(
        &self,
        Parameters(input): Parameters<CreateConfigInput>,
    ) -> Result<CallToolResult, McpError> {
        let _guard = self.write_lock.lock().await;
        respond(run_create_config(&self.workspace, input).await)
    }

    #[tool(description = "Update bernova.config.json. Merges top-level keys by default; \
        set merge to false to replace the whole configuration")]
    async fn update_config(
        &self,
        Parameters(input): Parameters<UpdateConfigInput>,
    ) -> Result<CallToolResult, McpError> {
        let _guard = self.write_lock.lock().await;
        respond(run_update_config(&self.workspace, input).await)
    }

    #[tool(description = "List the names of all configured themes")]
    async fn list_themes(&self) -> Result<CallToolResult, McpError> {
        respond(run_list_themes(&self.workspace).await)
    }

    #[tool(description = "Get the configuration record of one theme by exact name")]
    async fn get_theme(
        &self,
        Parameters(input): Parameters<GetThemeInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(run_get_theme(&self.workspace, input).await)
    }

    #[tool(description = "Compile styles with the Bernova compiler (npx bernova). \
        Mode is full, foundationOnly or componentOnly")]
    async fn compile_styles(
        &self,
        Parameters(input): Parameters<CompileInput>,
    ) -> Result<CallToolResult, McpError> {
        let _guard = self.write_lock.lock().await;
        respond(run_compile_styles(&self.compiler, &self.workspace, input).await)
    }

    #[tool(description = "Run the Bernova builder (npx bv-build) with output options")]
    async fn build_styles(
        &self,
        Parameters(options): Parameters<BuildOptions>,
    ) -> Result<CallToolResult, McpError> {
        let _guard = self.write_lock.lock().await;
        respond(run_build_styles(&self.compiler, &self.workspace, options).await)
    }

    #[tool(description = "Check that the Bernova compiler is installed and report its version")]
    async fn check_installation(&self) -> Result<CallToolResult, McpError> {
        respond(run_check_installation(&self.compiler, &self.workspace).await)
    }

    #[tool(description = "Create a component style in a theme module and register it \
        in the theme's aggregate export")]
    async fn create_component(
        &self,
        Parameters(input): Parameters<ComponentStylesInput>,
    ) -> Result<CallToolResult, McpError> {
        let _guard = self.write_lock.lock().await;
        respond(run_create_component(&self.workspace, input).await)
    }

    #[tool(description = "Get the source and parsed styles of a component")]
    async fn get_component(
        &self,
        Parameters(input): Parameters<ComponentInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(run_get_component(&self.workspace, input).await)
    }

    #[tool(description = "Replace the styles of an existing component")]
    async fn update_component(
        &self,
        Parameters(input): Parameters<ComponentStylesInput>,
    ) -> Result<CallToolResult, McpError> {
        let _guard = self.write_lock.lock().await;
        respond(run_update_component(&self.workspace, input).await)
    }

    #[tool(description = "Delete a component and remove it from the aggregate export")]
    async fn delete_component(
        &self,
        Parameters(input): Parameters<ComponentInput>,
    ) -> Result<CallToolResult, McpError> {
        let _guard = self.write_lock.lock().await;
        respond(run_delete_component(&self.workspace, input).await)
    }

    #[tool(description = "List the components declared in a theme")]
    async fn list_components(
        &self,
        Parameters(input): Parameters<ThemeInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(run_list_components(&self.workspace, input).await)
    }

    #[tool(description = "Add a CSS variable (category.name) to the foundations module. \
        It is exposed to CSS as --category-name")]
    async fn add_css_variable(
        &self,
        Parameters(input): Parameters<CssVariableInput>,
    ) -> Result<CallToolResult, McpError> {
        let _guard = self.write_lock.lock().await;
        respond(run_add_css_variable(&self.workspace, input).await)
    }

    #[tool(description = "Change the value of an existing CSS variable")]
    async fn update_css_variable(
        &self,
        Parameters(input): Parameters<CssVariableInput>,
    ) -> Result<CallToolResult, McpError> {
        let _guard = self.write_lock.lock().await;
        respond(run_update_css_variable(&self.workspace, input).await)
    }

    #[tool(description = "Get the foundations module of a theme with all CSS variables")]
    async fn get_css_variables(
        &self,
        Parameters(input): Parameters<ThemeInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(run_get_css_variables(&self.workspace, input).await)
    }

    #[tool(description = "Add a named media query (breakpoint) to the media-queries module")]
    async fn add_media_query(
        &self,
        Parameters(input): Parameters<MediaQueryInput>,
    ) -> Result<CallToolResult, McpError> {
        let _guard = self.write_lock.lock().await;
        respond(run_add_media_query(&self.workspace, input).await)
    }

    #[tool(description = "List the media query names of a theme")]
    async fn list_media_queries(
        &self,
        Parameters(input): Parameters<ThemeInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(run_list_media_queries(&self.workspace, input).await)
    }

    #[tool(description = "Validate a component style object without writing anything")]
    async fn validate_component_styles(
        &self,
        Parameters(input): Parameters<ValidateStylesInput>,
    ) -> Result<CallToolResult, McpError> {
        respond(run_validate_component_styles(input))
    }
}

/// Render a tool outcome as the JSON envelope. Tool failures are reported
/// in-band with `isError` set, never as protocol errors.
fn respond(result: Result<ToolResponse, ToolError>) -> Result<CallToolResult, McpError> {
    let (response, failed) = match result {
        Ok(response) => (response, false),
        Err(e) => {
            log::warn!("tool call failed: {}", e);
            (ToolResponse::failure(&e), true)
        }
    };

    let text = serde_json::to_string_pretty(&response)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    let content = vec![Content::text(text)];
    Ok(if failed { CallToolResult::error(content) } else { CallToolResult::success(content) })
}

#[tool_handler]
impl ServerHandler for BernovaMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bernova-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Bernova MCP server: manage design tokens and component styles of a \
                 Bernova project. Start with get_config (or create_config), edit \
                 components with create_component/update_component, tokens with \
                 add_css_variable and add_media_query, then run compile_styles."
                    .into(),
            ),
        }
    }
}

/// Run the MCP server on stdin/stdout
pub async fn run_server(
    workspace: Workspace,
    compiler: Compiler,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("serving Bernova workspace {}", workspace.root().display());
    let server = BernovaMcpServer::new(workspace, compiler);
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;
    Ok(())
}
