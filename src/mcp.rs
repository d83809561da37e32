use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::convert::ConverterOptions;
use crate::export::{ExportMode, ExportOptions, ExportResult};
use crate::session::Session;

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF, DOC or DOCX file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSelectRequest {
    #[schemars(description = "Path to the PDF, DOC or DOCX file")]
    pub path: String,
    #[schemars(description = "Page ranges (e.g., '1,3-5,7')")]
    pub pages: String,
}

#[derive(Debug, Clone, Copy, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    /// All pages stacked into merged_pages.png
    Merged,
    /// One page_<N>.png per page
    Separate,
    /// A new PDF with copies of the pages
    Pdf,
}

impl From<ExportKind> for ExportMode {
    fn from(kind: ExportKind) -> Self {
        match kind {
            ExportKind::Merged => ExportMode::MergedImage,
            ExportKind::Separate => ExportMode::SeparateImages,
            ExportKind::Pdf => ExportMode::NewPdf,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfExportRequest {
    #[schemars(description = "Path to the source PDF, DOC or DOCX file")]
    pub path: String,
    #[schemars(description = "Page ranges (e.g., '1,3-5,7')")]
    pub pages: String,
    #[schemars(description = "Export as 'merged' image, 'separate' images, or 'pdf'")]
    pub mode: ExportKind,
    #[schemars(
        description = "Output directory for images (default: ./extracted_images) or output file for pdf"
    )]
    #[serde(default)]
    pub output: Option<String>,
    #[schemars(description = "Render scale for images, greater than 0 (default: 1.0)")]
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
    converter: ConverterOptions,
}

impl PdfServer {
    pub fn new(converter: ConverterOptions) -> Self {
        Self {
            tool_router: Self::tool_router(),
            converter,
        }
    }

    fn open(&self, path: &str) -> crate::error::Result<Session> {
        let mut session = Session::new(self.converter.clone());
        session.load(Path::new(path))?;
        Ok(session)
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Get page count and metadata of a PDF (DOC/DOCX files are converted first)")]
    fn pdf_info(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        let session = match self.open(&path) {
            Ok(s) => s,
            Err(e) => return format!("Error: {}", e),
        };
        let Some(doc) = session.document() else {
            return "Error: No document loaded".to_string();
        };

        let info = doc.pdf.get_info();
        let result = PdfInfoResult {
            path: doc.path().display().to_string(),
            page_count: info.page_count,
            title: info.title,
            author: info.author,
            creator: info.creator,
            producer: info.producer,
        };
        serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
    }

    #[tool(description = "Resolve a page range expression like '1,3-5,7' against a document. Invalid or out-of-range parts are ignored.")]
    fn pdf_select(&self, Parameters(req): Parameters<PdfSelectRequest>) -> String {
        let mut session = match self.open(&req.path) {
            Ok(s) => s,
            Err(e) => return format!("Error: {}", e),
        };

        match session.select_range(&req.pages) {
            Ok(pages) => {
                let result = SelectResult {
                    page_count: session.document().map_or(0, |d| d.page_count()),
                    pages,
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Export selected pages as one merged PNG, separate PNGs (page_<N>.png), or a new PDF")]
    fn pdf_export(&self, Parameters(req): Parameters<PdfExportRequest>) -> String {
        let mut session = match self.open(&req.path) {
            Ok(s) => s,
            Err(e) => return format!("Error: {}", e),
        };
        if let Err(e) = session.select_range(&req.pages) {
            return format!("Error: {}", e);
        }

        let output = req.output.map(PathBuf::from);
        let options = ExportOptions { scale: req.scale };
        match session.export(req.mode.into(), output.as_deref(), &options) {
            Ok(result) => serde_json::to_string_pretty(&ExportResultJson::from(result))
                .unwrap_or_else(|e| format!("Error: {}", e)),
            Err(e) => format!("Error: {}", e),
        }
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PdfInfoResult {
    pub path: String,
    pub page_count: u32,
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SelectResult {
    pub page_count: u32,
    pub pages: Vec<u32>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ExportResultJson {
    pub output_path: String,
    pub pages_written: usize,
    pub pages_skipped: usize,
}

impl From<ExportResult> for ExportResultJson {
    fn from(result: ExportResult) -> Self {
        let (path, written, skipped) = match result {
            ExportResult::MergedImage {
                path,
                pages,
                skipped,
            } => (path, pages, skipped),
            ExportResult::SeparateImages {
                dir,
                written,
                skipped,
            } => (dir, written, skipped),
            ExportResult::NewPdf { path, pages } => (path, pages, 0),
        };
        ExportResultJson {
            output_path: path.display().to_string(),
            pages_written: written,
            pages_skipped: skipped,
        }
    }
}

impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Page picking tools for PDF, DOC and DOCX files. Use pdf_info for the page count, \
                 pdf_select to check which pages a range like '1,3-5,7' resolves to, and \
                 pdf_export to write those pages as a merged PNG, separate PNGs, or a new PDF."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server(converter: ConverterOptions) -> Result<()> {
    let server = PdfServer::new(converter);

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
