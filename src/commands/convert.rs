use crate::convert::{convert_to_pdf, ConverterOptions, DocumentKind};
use crate::error::Error;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P, converter: &ConverterOptions) -> Result<()> {
    let path = path.as_ref();
    if DocumentKind::from_path(path) != Some(DocumentKind::Word) {
        return Err(Error::UnsupportedFile(path.to_path_buf()).into());
    }

    let output = convert_to_pdf(path, converter)?;
    println!("Converted to PDF: {}", output.display());

    Ok(())
}
