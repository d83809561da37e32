pub mod convert;
pub mod extract;
pub mod images;
pub mod info;
pub mod select;
pub mod thumbnails;

use anyhow::Result;
use std::path::Path;

use crate::convert::ConverterOptions;
use crate::session::Session;

/// Open a session on `path`, converting DOC/DOCX first if needed.
fn load_session(path: &Path, converter: &ConverterOptions) -> Result<Session> {
    let mut session = Session::new(converter.clone());
    session.load(path)?;
    Ok(session)
}
