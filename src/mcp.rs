use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};

use mdtoc::toc::render::render_panel;
use mdtoc::{source, TableOfContents, TocError, TocOptions};

// Request structs for tools

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct OutlineParams {
    #[schemars(description = "Shallowest heading level to include (default: 1)")]
    pub min_depth: Option<u8>,
    #[schemars(description = "Deepest heading level to include (default: 6)")]
    pub max_depth: Option<u8>,
    #[schemars(description = "Only outline the section after the heading matching this pattern")]
    pub heading: Option<String>,
    #[schemars(description = "Leave out headings matching this pattern")]
    pub skip: Option<String>,
}

impl OutlineParams {
    fn to_options(&self) -> Result<TocOptions, TocError> {
        let mut options = TocOptions::default()
            .with_depths(self.min_depth.unwrap_or(1), self.max_depth.unwrap_or(6));
        if let Some(heading) = &self.heading {
            options = options.with_heading(heading)?;
        }
        if let Some(skip) = &self.skip {
            options = options.with_skip(skip)?;
        }
        Ok(options)
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the markdown file")]
    pub path: String,
    #[serde(flatten)]
    pub outline: OutlineParams,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TextRequest {
    #[schemars(description = "Markdown source")]
    pub markdown: String,
    #[serde(flatten)]
    pub outline: OutlineParams,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RenderRequest {
    #[schemars(description = "Path to the markdown file")]
    pub path: String,
    #[schemars(description = "Heading id to highlight as active")]
    pub active: Option<String>,
    #[serde(flatten)]
    pub outline: OutlineParams,
}

#[derive(Debug, Clone)]
pub struct TocServer {
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl TocServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for TocServer {
    fn default() -> Self {
        Self::new()
    }
}

async fn toc_from_path(path: &str, outline: &OutlineParams) -> Result<TableOfContents, TocError> {
    let markdown = source::read_markdown(path)?;
    mdtoc::get_table_of_contents_with(&markdown, &outline.to_options()?).await
}

#[tool_router]
impl TocServer {
    #[tool(description = "Get the table of contents of a markdown file as nested {title, url, items} entries")]
    async fn markdown_toc(&self, Parameters(req): Parameters<PathRequest>) -> String {
        match toc_from_path(&req.path, &req.outline).await {
            Ok(toc) => serde_json::to_string_pretty(&toc).unwrap_or_else(|e| format!("Error: {}", e)),
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Get the table of contents of markdown source passed inline")]
    async fn markdown_toc_from_text(&self, Parameters(req): Parameters<TextRequest>) -> String {
        let options = match req.outline.to_options() {
            Ok(o) => o,
            Err(e) => return format!("Error: {}", e),
        };
        match mdtoc::get_table_of_contents_with(&req.markdown, &options).await {
            Ok(toc) => serde_json::to_string_pretty(&toc).unwrap_or_else(|e| format!("Error: {}", e)),
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "List the heading anchor ids a reader's position is tracked against (first two levels)")]
    async fn markdown_toc_ids(&self, Parameters(req): Parameters<PathRequest>) -> String {
        match toc_from_path(&req.path, &req.outline).await {
            Ok(toc) => {
                let result = TocIdsResult {
                    path: req.path,
                    ids: toc.item_ids(),
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Render the 'On This Page' navigation panel of a markdown file as HTML")]
    async fn markdown_toc_render(&self, Parameters(req): Parameters<RenderRequest>) -> String {
        match toc_from_path(&req.path, &req.outline).await {
            Ok(toc) => render_panel(&toc, req.active.as_deref()),
            Err(e) => format!("Error: {}", e),
        }
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TocIdsResult {
    pub path: String,
    pub ids: Vec<String>,
}

impl ServerHandler for TocServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Markdown table of contents tools. Use markdown_toc for a file's outline, \
                 markdown_toc_from_text for inline markdown, markdown_toc_ids for the anchor \
                 ids of the first two levels, and markdown_toc_render for the HTML panel."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = TocServer::new();
    tracing::info!("serving MCP over stdio");

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
