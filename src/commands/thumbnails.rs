use crate::convert::ConverterOptions;
use crate::export::resolve_output_dir;
use anyhow::{Context, Result};
use image::ImageFormat;
use std::path::Path;

pub fn run<P: AsRef<Path>>(
    path: P,
    output_dir: Option<&Path>,
    zoom: bool,
    converter: &ConverterOptions,
) -> Result<()> {
    let mut session = super::load_session(path.as_ref(), converter)?;
    let output_dir = resolve_output_dir(output_dir)?;
    let total_pages = session.document().map_or(0, |doc| doc.page_count());
    let cache = session.thumbnails()?;

    for offset in cache.offsets() {
        let page = offset + 1;
        let thumbnail = cache
            .get(offset)
            .context("Thumbnail disappeared from cache")?
            .to_rgb_image()?;
        let thumb_path = output_dir.join(format!("thumb_{}.png", page));
        thumbnail
            .save_with_format(&thumb_path, ImageFormat::Png)
            .with_context(|| format!("Failed to write {}", thumb_path.display()))?;

        if zoom {
            if let Some(preview) = cache.zoom_preview(offset) {
                let zoom_path = output_dir.join(format!("zoom_{}.png", page));
                preview?
                    .save_with_format(&zoom_path, ImageFormat::Png)
                    .with_context(|| format!("Failed to write {}", zoom_path.display()))?;
            }
        }
    }

    println!(
        "Rendered {} of {} thumbnail(s) into {}",
        cache.len(),
        total_pages,
        output_dir.display()
    );

    Ok(())
}
