use anyhow::Result;
use image::imageops::{self, FilterType};
use image::RgbImage;
use log::warn;
use std::collections::BTreeMap;

use crate::pdf::{RasterImage, Rasterize};

pub const THUMBNAIL_SCALE: f32 = 0.25;
pub const ZOOM_FACTOR: u32 = 2;

/// Small renders of every page, keyed by page offset. Views refer to entries
/// by offset instead of holding pixels themselves.
#[derive(Debug, Default)]
pub struct ThumbnailCache {
    thumbnails: BTreeMap<u32, RasterImage>,
}

impl ThumbnailCache {
    /// Render every page at [`THUMBNAIL_SCALE`]. Pages that fail to render
    /// are logged and left out.
    pub fn build(rasterizer: &dyn Rasterize, page_count: u32) -> Self {
        let mut thumbnails = BTreeMap::new();
        for offset in 0..page_count {
            match rasterizer.rasterize(offset, THUMBNAIL_SCALE) {
                Ok(raster) => {
                    thumbnails.insert(offset, raster);
                }
                Err(e) => warn!("Error loading page {}: {:#}", offset + 1, e),
            }
        }
        ThumbnailCache { thumbnails }
    }

    pub fn get(&self, offset: u32) -> Option<&RasterImage> {
        self.thumbnails.get(&offset)
    }

    pub fn offsets(&self) -> impl Iterator<Item = u32> + '_ {
        self.thumbnails.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.thumbnails.len()
    }

    /// The hover preview: the thumbnail enlarged [`ZOOM_FACTOR`] times with a
    /// smoothing filter. `None` if the page has no thumbnail.
    pub fn zoom_preview(&self, offset: u32) -> Option<Result<RgbImage>> {
        let thumbnail = self.get(offset)?;
        Some(thumbnail.to_rgb_image().map(|img| {
            imageops::resize(
                &img,
                img.width() * ZOOM_FACTOR,
                img.height() * ZOOM_FACTOR,
                FilterType::Lanczos3,
            )
        }))
    }
}
