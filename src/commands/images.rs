use crate::convert::ConverterOptions;
use crate::export::{ExportMode, ExportOptions, ExportResult};
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(
    path: P,
    pages: &str,
    output_dir: Option<&Path>,
    separate: bool,
    options: &ExportOptions,
    converter: &ConverterOptions,
) -> Result<()> {
    let mut session = super::load_session(path.as_ref(), converter)?;
    session.select_range(pages)?;

    let mode = if separate {
        ExportMode::SeparateImages
    } else {
        ExportMode::MergedImage
    };
    let result = session.export(mode, output_dir, options)?;

    println!("{}", result.summary());
    match result {
        ExportResult::MergedImage { skipped, .. } | ExportResult::SeparateImages { skipped, .. }
            if skipped > 0 =>
        {
            println!("{} page(s) could not be rendered and were skipped.", skipped);
        }
        _ => {}
    }

    Ok(())
}
