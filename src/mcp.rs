use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::commands::select::{SelectOptions, select};
use crate::pdf::PdfDocument;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSelectPagesRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Page ranges (e.g., '1-3,5,6-9,11')")]
    pub pages: String,
    #[schemars(description = "Output file path (default: <name>_trimmed.pdf next to the source)")]
    #[serde(default)]
    pub output: Option<String>,
    #[schemars(description = "Replace the output file if it exists (default: false)")]
    #[serde(default)]
    pub overwrite: bool,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PageCountResult {
    pub path: String,
    pub page_count: u32,
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    tool_router: ToolRouter<Self>,
}

impl PdfServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Get the number of pages in a PDF")]
    fn pdf_page_count(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        page_count(&path)
    }

    #[tool(description = "Copy selected pages of a PDF into a new PDF. Pages use range syntax like '1-3,5,6-9,11'; pages that do not exist in the source are skipped and reported.")]
    fn pdf_select_pages(&self, Parameters(req): Parameters<PdfSelectPagesRequest>) -> String {
        select_pages(req)
    }
}

fn page_count(path: &str) -> String {
    match PdfDocument::open(path) {
        Ok(doc) => {
            let result = PageCountResult {
                path: path.to_string(),
                page_count: doc.page_count(),
            };
            serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
        }
        Err(e) => format!("Error: {}", e),
    }
}

fn select_pages(req: PdfSelectPagesRequest) -> String {
    let options = SelectOptions {
        output: req.output.map(PathBuf::from),
        force: req.overwrite,
        json: true,
    };

    match select(Path::new(&req.path), &req.pages, &options) {
        Ok(result) => {
            serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
        }
        Err(e) => format!("Error: {}", e),
    }
}

#[tool_handler]
impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF page selection tools. Use pdf_page_count to see how many pages a PDF has \
                 and pdf_select_pages to write a chosen set of pages to a new PDF."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = PdfServer::new();
    log::info!("serving MCP over stdio");

    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
