use anyhow::{bail, Result};
use image::RgbImage;

/// Decoded RGB pixels (8 bits per channel) for one page at some render scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// Bytes per row in `pixels`; at least `width * 3`.
    pub stride: usize,
    pub pixels: Vec<u8>,
}

/// Turns a page of an open document into pixels.
pub trait Rasterize {
    fn rasterize(&self, offset: u32, scale: f32) -> Result<RasterImage>;
}

impl RasterImage {
    /// Repack renderer samples with `n` components per pixel into tightly
    /// packed RGB, dropping any alpha or extra channels.
    pub fn from_samples(
        width: u32,
        height: u32,
        stride: usize,
        n: usize,
        samples: &[u8],
    ) -> Result<Self> {
        if n < 3 {
            bail!("Unsupported pixel format: {} channels", n);
        }

        let row_bytes = width as usize * n;
        if row_bytes > stride || samples.len() < stride.saturating_mul(height as usize) {
            bail!("Pixel buffer size mismatch");
        }

        let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height as usize {
            let row = &samples[y * stride..y * stride + row_bytes];
            if n == 3 {
                pixels.extend_from_slice(row);
            } else {
                for px in row.chunks_exact(n) {
                    pixels.extend_from_slice(&px[..3]);
                }
            }
        }

        Ok(RasterImage {
            width,
            height,
            stride: width as usize * 3,
            pixels,
        })
    }

    /// Copy into an `image` buffer, honoring `stride`.
    pub fn to_rgb_image(&self) -> Result<RgbImage> {
        let row_bytes = self.width as usize * 3;
        if row_bytes > self.stride || self.pixels.len() < self.stride * self.height as usize {
            bail!("Pixel buffer size mismatch");
        }

        let mut packed = Vec::with_capacity(row_bytes * self.height as usize);
        for y in 0..self.height as usize {
            let start = y * self.stride;
            packed.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }

        match RgbImage::from_raw(self.width, self.height, packed) {
            Some(img) => Ok(img),
            None => bail!("Pixel buffer size mismatch"),
        }
    }
}
