use crate::convert::ConverterOptions;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P, pages: &str, converter: &ConverterOptions) -> Result<()> {
    let mut session = super::load_session(path.as_ref(), converter)?;
    let selected = session.select_range(pages)?;

    let list: Vec<String> = selected.iter().map(u32::to_string).collect();
    println!("Selected {} page(s): {}", selected.len(), list.join(", "));

    Ok(())
}
