pub mod document;
pub mod raster;
#[cfg(feature = "render")]
pub mod render;

pub use document::PdfDocument;
pub use raster::{RasterImage, Rasterize};

use anyhow::Result;
use std::path::Path;

/// An opened PDF: the page tree used for copying pages, plus a rasterizer
/// over the same file.
pub struct LoadedDocument {
    pub pdf: PdfDocument,
    rasterizer: Box<dyn Rasterize>,
}

impl LoadedDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let pdf = PdfDocument::open(&path)?;
        let rasterizer = open_rasterizer(path.as_ref())?;
        Ok(LoadedDocument::new(pdf, rasterizer))
    }

    pub fn new(pdf: PdfDocument, rasterizer: Box<dyn Rasterize>) -> Self {
        LoadedDocument { pdf, rasterizer }
    }

    pub fn path(&self) -> &Path {
        &self.pdf.path
    }

    pub fn page_count(&self) -> u32 {
        self.pdf.page_count()
    }

    pub fn rasterizer(&self) -> &dyn Rasterize {
        self.rasterizer.as_ref()
    }
}

#[cfg(feature = "render")]
fn open_rasterizer(path: &Path) -> Result<Box<dyn Rasterize>> {
    Ok(Box::new(render::MupdfRasterizer::open(path)?))
}

#[cfg(not(feature = "render"))]
fn open_rasterizer(_path: &Path) -> Result<Box<dyn Rasterize>> {
    Ok(Box::new(NoRenderer))
}

#[cfg(not(feature = "render"))]
struct NoRenderer;

#[cfg(not(feature = "render"))]
impl Rasterize for NoRenderer {
    fn rasterize(&self, offset: u32, _scale: f32) -> Result<RasterImage> {
        anyhow::bail!(
            "Cannot render page {}: built without the `render` feature",
            offset + 1
        )
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use anyhow::bail;
    use lopdf::{dictionary, Document, Object};
    use std::path::PathBuf;

    /// A document whose pages differ only in MediaBox width, so page order
    /// can be checked after copying.
    pub fn sample_pdf(widths: &[i64]) -> PdfDocument {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let kids: Vec<Object> = widths
            .iter()
            .map(|&width| {
                let page_id = doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => Object::Reference(pages_id),
                    "MediaBox" => vec![0.into(), 0.into(), width.into(), 792.into()],
                });
                Object::Reference(page_id)
            })
            .collect();

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => widths.len() as i64,
                "Kids" => kids,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        PdfDocument {
            doc,
            path: PathBuf::from("sample.pdf"),
        }
    }

    pub fn write_sample_pdf(path: &Path, widths: &[i64]) {
        let mut pdf = sample_pdf(widths);
        pdf.doc.save(path).unwrap();
    }

    pub fn page_widths(doc: &Document) -> Vec<i64> {
        doc.get_pages()
            .values()
            .map(|&id| {
                let media_box = doc
                    .get_dictionary(id)
                    .unwrap()
                    .get(b"MediaBox")
                    .unwrap()
                    .as_array()
                    .unwrap();
                media_box[2].as_i64().unwrap()
            })
            .collect()
    }

    /// Produces solid `width x height` rasters filled with `offset + 1`, and
    /// fails for the offsets listed in `failing`.
    pub struct FakeRasterizer {
        pub sizes: Vec<(u32, u32)>,
        pub failing: Vec<u32>,
    }

    impl Rasterize for FakeRasterizer {
        fn rasterize(&self, offset: u32, scale: f32) -> Result<RasterImage> {
            if self.failing.contains(&offset) {
                bail!("page {} is broken", offset + 1);
            }
            let Some(&(width, height)) = self.sizes.get(offset as usize) else {
                bail!("page {} does not exist", offset + 1);
            };
            let width = ((width as f32) * scale).round().max(1.0) as u32;
            let height = ((height as f32) * scale).round().max(1.0) as u32;
            Ok(RasterImage {
                width,
                height,
                stride: width as usize * 3,
                pixels: vec![offset as u8 + 1; width as usize * height as usize * 3],
            })
        }
    }

    /// A loaded document with one page per entry of `sizes`; page widths in
    /// the PDF match the raster widths.
    pub fn fake_document(sizes: &[(u32, u32)], failing: &[u32]) -> LoadedDocument {
        let widths: Vec<i64> = sizes.iter().map(|&(w, _)| w as i64).collect();
        LoadedDocument::new(
            sample_pdf(&widths),
            Box::new(FakeRasterizer {
                sizes: sizes.to_vec(),
                failing: failing.to_vec(),
            }),
        )
    }
}
