use crate::convert::ConverterOptions;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P, converter: &ConverterOptions) -> Result<()> {
    let session = super::load_session(path.as_ref(), converter)?;
    let doc = session.document().context("No document loaded")?;
    let info = doc.pdf.get_info();

    println!("File: {}", doc.path().display());
    println!("Pages: {}", info.page_count);

    if let Some(title) = &info.title {
        println!("Title: {}", title);
    }
    if let Some(author) = &info.author {
        println!("Author: {}", author);
    }
    if let Some(creator) = &info.creator {
        println!("Creator: {}", creator);
    }
    if let Some(producer) = &info.producer {
        println!("Producer: {}", producer);
    }

    Ok(())
}
