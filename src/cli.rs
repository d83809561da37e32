use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::export::is_valid_scale;

#[derive(Parser)]
#[command(name = "pagepick")]
#[command(about = "Pick pages from a PDF (or DOC/DOCX) and export them as images or a new PDF")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// LibreOffice executable used to convert DOC/DOCX files
    #[arg(long, global = true, default_value = "soffice")]
    pub soffice: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Display page count and metadata
    Info {
        /// PDF, DOC or DOCX file to inspect
        path: PathBuf,
    },

    /// Show which pages a range expression selects
    Select {
        /// PDF, DOC or DOCX file
        path: PathBuf,

        /// Page ranges (e.g., "1,3-5,7")
        pages: String,
    },

    /// Export selected pages as PNG images
    Images {
        /// PDF, DOC or DOCX file
        path: PathBuf,

        /// Page ranges (e.g., "1,3-5,7")
        pages: String,

        /// Output directory (default: ./extracted_images)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Write one page_<N>.png per page instead of a single merged_pages.png
        #[arg(short, long)]
        separate: bool,

        /// Render scale (1.0 = 72 dpi)
        #[arg(long, default_value = "1.0", value_parser = parse_scale)]
        scale: f32,
    },

    /// Save selected pages to a new PDF
    #[command(alias = "extract")]
    Pdf {
        /// PDF, DOC or DOCX file
        path: PathBuf,

        /// Page ranges (e.g., "1,3-5,7")
        pages: String,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Render page thumbnails
    Thumbnails {
        /// PDF, DOC or DOCX file
        path: PathBuf,

        /// Output directory (default: ./extracted_images)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Also write the 2x zoom previews
        #[arg(short, long)]
        zoom: bool,
    },

    /// Convert a DOC/DOCX file to PDF next to the original
    Convert {
        /// DOC or DOCX file
        path: PathBuf,
    },
}

fn parse_scale(s: &str) -> Result<f32, String> {
    let scale: f32 = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if !is_valid_scale(scale) {
        return Err(format!("scale must be greater than 0, got {}", s));
    }
    Ok(scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scale() {
        assert_eq!(parse_scale("2.5"), Ok(2.5));
        assert!(parse_scale("-3").is_err());
        assert!(parse_scale("0").is_err());
        assert!(parse_scale("NaN").is_err());
        assert!(parse_scale("inf").is_err());
        assert!(parse_scale("big").is_err());
    }

    #[test]
    fn test_images_rejects_negative_scale() {
        let parsed = Cli::try_parse_from(["pagepick", "images", "a.pdf", "1", "--scale", "-3"]);
        assert!(parsed.is_err());

        let cli = Cli::try_parse_from(["pagepick", "images", "a.pdf", "1", "--scale", "2"]).unwrap();
        match cli.command {
            Commands::Images { scale, .. } => assert_eq!(scale, 2.0),
            _ => panic!("expected images"),
        }
    }
}
