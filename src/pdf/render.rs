//! Page rasterization through MuPDF.

use anyhow::{anyhow, Result};
use mupdf::{Colorspace, Document, Matrix};
use std::path::Path;

use super::raster::{RasterImage, Rasterize};

pub struct MupdfRasterizer {
    doc: Document,
}

impl MupdfRasterizer {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let doc = Document::open(path.to_string_lossy().as_ref())
            .map_err(|e| anyhow!("Failed to open {} for rendering: {}", path.display(), e))?;
        Ok(MupdfRasterizer { doc })
    }
}

impl Rasterize for MupdfRasterizer {
    fn rasterize(&self, offset: u32, scale: f32) -> Result<RasterImage> {
        let page = self
            .doc
            .load_page(offset as i32)
            .map_err(|e| anyhow!("Failed to load page {}: {}", offset + 1, e))?;

        let rgb = Colorspace::device_rgb();
        let pixmap = page
            .to_pixmap(&Matrix::new_scale(scale, scale), &rgb, false, false)
            .map_err(|e| anyhow!("Failed to render page {}: {}", offset + 1, e))?;

        RasterImage::from_samples(
            pixmap.width() as u32,
            pixmap.height() as u32,
            pixmap.stride() as usize,
            pixmap.n() as usize,
            pixmap.samples(),
        )
    }
}
