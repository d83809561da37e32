//! Writing selected pages out as PNG images or a new PDF.
//!
//! All modes walk the selection in ascending page order. Image modes treat a
//! page that fails to rasterize as a skip; only an export where every page
//! failed is an error.

use image::{ImageFormat, RgbImage};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::pdf::{LoadedDocument, PdfDocument, Rasterize};

pub const MERGED_FILE_NAME: &str = "merged_pages.png";
pub const DEFAULT_OUTPUT_DIR: &str = "extracted_images";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// All pages stacked top to bottom in one PNG.
    MergedImage,
    /// One `page_<N>.png` per page.
    SeparateImages,
    /// A new PDF holding copies of the pages.
    NewPdf,
}

#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// 0-based page offsets.
    pub offsets: Vec<u32>,
    pub mode: ExportMode,
    /// Output directory for image modes, output file for `NewPdf`.
    pub destination: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Render scale for image modes; 1.0 is the document's native size.
    pub scale: f32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions { scale: 1.0 }
    }
}

/// A usable render scale is finite and greater than zero.
pub fn is_valid_scale(scale: f32) -> bool {
    scale.is_finite() && scale > 0.0
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportResult {
    MergedImage {
        path: PathBuf,
        pages: usize,
        skipped: usize,
    },
    SeparateImages {
        dir: PathBuf,
        written: usize,
        skipped: usize,
    },
    NewPdf {
        path: PathBuf,
        pages: usize,
    },
}

impl ExportResult {
    pub fn summary(&self) -> String {
        match self {
            ExportResult::MergedImage { path, pages, .. } => {
                format!("Saved {} page(s) as combined image to {}", pages, path.display())
            }
            ExportResult::SeparateImages { dir, written, .. } => {
                format!("Extracted {} page(s) to {}", written, dir.display())
            }
            ExportResult::NewPdf { path, pages } => {
                format!("Saved {} page(s) as PDF to {}", pages, path.display())
            }
        }
    }
}

/// Run one export request against the loaded document, if any.
pub fn export(
    document: Option<&LoadedDocument>,
    request: &ExportRequest,
    options: &ExportOptions,
) -> Result<ExportResult> {
    let document = document.ok_or(Error::NoDocument)?;

    let mut offsets = request.offsets.clone();
    offsets.sort_unstable();
    offsets.dedup();
    if offsets.is_empty() {
        return Err(Error::NoSelection);
    }

    if request.mode != ExportMode::NewPdf && !is_valid_scale(options.scale) {
        return Err(Error::InvalidScale(options.scale));
    }

    match request.mode {
        ExportMode::MergedImage => {
            let dir = resolve_output_dir(request.destination.as_deref())?;
            export_merged(document.rasterizer(), &offsets, &dir, options.scale)
        }
        ExportMode::SeparateImages => {
            let dir = resolve_output_dir(request.destination.as_deref())?;
            export_separate(document.rasterizer(), &offsets, &dir, options.scale)
        }
        ExportMode::NewPdf => {
            let path = resolve_output_file(request.destination.as_deref())?;
            export_pdf(&document.pdf, &offsets, &path)
        }
    }
}

/// Stack pages vertically on a canvas as wide as the widest page.
pub fn compose_vertical(pages: &[RgbImage]) -> RgbImage {
    let width = pages.iter().map(|p| p.width()).max().unwrap_or(0);
    let height = pages.iter().map(|p| p.height()).sum();

    let mut canvas = RgbImage::new(width, height);
    let mut y = 0i64;
    for page in pages {
        image::imageops::replace(&mut canvas, page, 0, y);
        y += i64::from(page.height());
    }
    canvas
}

fn export_merged(
    rasterizer: &dyn Rasterize,
    offsets: &[u32],
    dir: &Path,
    scale: f32,
) -> Result<ExportResult> {
    let mut pages = Vec::with_capacity(offsets.len());
    for &offset in offsets {
        if let Some(img) = rasterize_page(rasterizer, offset, scale) {
            pages.push(img);
        }
    }

    if pages.is_empty() {
        return Err(Error::NothingExtracted);
    }

    let path = dir.join(MERGED_FILE_NAME);
    compose_vertical(&pages)
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|e| Error::ImageSaveFailed(format!("{}: {}", path.display(), e)))?;

    info!("Saved {} page(s) to {}", pages.len(), path.display());
    Ok(ExportResult::MergedImage {
        path,
        pages: pages.len(),
        skipped: offsets.len() - pages.len(),
    })
}

fn export_separate(
    rasterizer: &dyn Rasterize,
    offsets: &[u32],
    dir: &Path,
    scale: f32,
) -> Result<ExportResult> {
    let mut written = 0;
    for &offset in offsets {
        let Some(img) = rasterize_page(rasterizer, offset, scale) else {
            continue;
        };

        let path = dir.join(page_file_name(offset));
        match img.save_with_format(&path, ImageFormat::Png) {
            Ok(()) => written += 1,
            Err(e) => warn!("Error extracting page {}: {}", offset + 1, e),
        }
    }

    if written == 0 {
        return Err(Error::NothingExtracted);
    }

    info!("Extracted {} page(s) to {}", written, dir.display());
    Ok(ExportResult::SeparateImages {
        dir: dir.to_path_buf(),
        written,
        skipped: offsets.len() - written,
    })
}

fn export_pdf(pdf: &PdfDocument, offsets: &[u32], path: &Path) -> Result<ExportResult> {
    let mut new_doc = pdf
        .extract_offsets(offsets)
        .map_err(|e| Error::SaveFailed(format!("{:#}", e)))?;
    PdfDocument::save(&mut new_doc, path).map_err(|e| Error::SaveFailed(format!("{:#}", e)))?;

    info!("Saved {} page(s) to {}", offsets.len(), path.display());
    Ok(ExportResult::NewPdf {
        path: path.to_path_buf(),
        pages: offsets.len(),
    })
}

fn rasterize_page(rasterizer: &dyn Rasterize, offset: u32, scale: f32) -> Option<RgbImage> {
    let result = rasterizer
        .rasterize(offset, scale)
        .and_then(|raster| raster.to_rgb_image());
    match result {
        Ok(img) => Some(img),
        Err(e) => {
            warn!("Error processing page {}: {:#}", offset + 1, e);
            None
        }
    }
}

/// `page_<N>.png` with N the 1-based page number.
pub fn page_file_name(offset: u32) -> String {
    format!("page_{}.png", offset + 1)
}

/// The directory image exports go to, created if missing. Falls back to
/// `extracted_images` under the working directory.
pub fn resolve_output_dir(destination: Option<&Path>) -> Result<PathBuf> {
    match destination {
        Some(dir) if !dir.as_os_str().is_empty() => ensure_dir(dir.to_path_buf()),
        _ => {
            let cwd = std::env::current_dir().map_err(|e| Error::BadDestination {
                path: PathBuf::from(DEFAULT_OUTPUT_DIR),
                reason: e.to_string(),
            })?;
            resolve_output_dir_in(destination, &cwd)
        }
    }
}

/// Like [`resolve_output_dir`], with `base` standing in for the working
/// directory.
pub fn resolve_output_dir_in(destination: Option<&Path>, base: &Path) -> Result<PathBuf> {
    let dir = match destination {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => base.join(DEFAULT_OUTPUT_DIR),
    };
    ensure_dir(dir)
}

fn ensure_dir(dir: PathBuf) -> Result<PathBuf> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::BadDestination {
            path: dir,
            reason: "not a directory".to_string(),
        });
    }

    fs::create_dir_all(&dir).map_err(|e| Error::BadDestination {
        path: dir.clone(),
        reason: e.to_string(),
    })?;
    Ok(dir)
}

fn resolve_output_file(destination: Option<&Path>) -> Result<PathBuf> {
    let path = match destination {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => {
            return Err(Error::BadDestination {
                path: PathBuf::new(),
                reason: "no output file given".to_string(),
            })
        }
    };

    if path.is_dir() {
        return Err(Error::BadDestination {
            path: path.to_path_buf(),
            reason: "is a directory".to_string(),
        });
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(Error::BadDestination {
                path: path.to_path_buf(),
                reason: format!("directory {} does not exist", parent.display()),
            });
        }
    }

    Ok(path.to_path_buf())
}
