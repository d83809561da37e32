use crate::convert::ConverterOptions;
use crate::export::{ExportMode, ExportOptions};
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    pages: &str,
    output: Q,
    converter: &ConverterOptions,
) -> Result<()> {
    let mut session = super::load_session(input.as_ref(), converter)?;
    session.select_range(pages)?;

    let result = session.export(
        ExportMode::NewPdf,
        Some(output.as_ref()),
        &ExportOptions::default(),
    )?;
    println!("{}", result.summary());

    Ok(())
}
