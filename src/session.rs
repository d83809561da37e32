use log::info;
use std::path::Path;

use crate::convert::{self, ConverterOptions, DocumentKind};
use crate::error::{Error, Result};
use crate::export::{self, ExportMode, ExportOptions, ExportRequest, ExportResult};
use crate::page_range::parse_range;
use crate::pdf::LoadedDocument;
use crate::selection::Selection;
use crate::thumbnails::ThumbnailCache;

/// The currently loaded document together with its page selection and
/// thumbnail cache. Everything runs synchronously on the caller's thread.
#[derive(Default)]
pub struct Session {
    document: Option<LoadedDocument>,
    selection: Selection,
    thumbnails: Option<ThumbnailCache>,
    converter: ConverterOptions,
}

impl Session {
    pub fn new(converter: ConverterOptions) -> Self {
        Session {
            converter,
            ..Default::default()
        }
    }

    /// Load a PDF, or convert a DOC/DOCX next to itself and load the result.
    ///
    /// A PDF that fails to open leaves the session empty. A failed
    /// conversion leaves the previous document in place.
    pub fn load(&mut self, path: &Path) -> Result<&LoadedDocument> {
        if !convert::is_supported(path) {
            return Err(Error::UnsupportedFile(path.to_path_buf()));
        }

        let pdf_path = match DocumentKind::from_path(path) {
            Some(DocumentKind::Word) => convert::convert_to_pdf(path, &self.converter)?,
            _ => path.to_path_buf(),
        };

        match LoadedDocument::open(&pdf_path) {
            Ok(document) => {
                info!(
                    "Loaded {} ({} pages)",
                    pdf_path.display(),
                    document.page_count()
                );
                Ok(self.replace_document(document))
            }
            Err(e) => {
                self.unload();
                Err(Error::Open {
                    path: pdf_path,
                    reason: format!("{:#}", e),
                })
            }
        }
    }

    /// Swap in a new document. Selection and thumbnails belong to the old
    /// one and are reset in the same step.
    pub fn replace_document(&mut self, document: LoadedDocument) -> &LoadedDocument {
        self.selection = Selection::new(document.page_count());
        self.thumbnails = None;
        self.document.insert(document)
    }

    pub fn unload(&mut self) {
        self.document = None;
        self.selection = Selection::default();
        self.thumbnails = None;
    }

    pub fn document(&self) -> Option<&LoadedDocument> {
        self.document.as_ref()
    }

    /// Parse `text` against the loaded document and select the result.
    /// Returns the selected 1-based page numbers.
    pub fn select_range(&mut self, text: &str) -> Result<Vec<u32>> {
        let document = self.document.as_ref().ok_or(Error::NoDocument)?;

        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyRange);
        }

        let pages = parse_range(text, document.page_count());
        if pages.is_empty() {
            return Err(Error::NoValidPages);
        }

        self.select(&pages)?;
        info!("Selected {} pages", pages.len());
        Ok(pages)
    }

    /// Select 1-based page numbers directly, ignoring any out of range.
    pub fn select(&mut self, pages: &[u32]) -> Result<()> {
        if self.document.is_none() {
            return Err(Error::NoDocument);
        }
        self.selection.select(pages);
        Ok(())
    }

    pub fn selected_offsets(&self) -> Vec<u32> {
        self.selection.selected_offsets()
    }

    /// Thumbnails for the loaded document, rendered on first use.
    pub fn thumbnails(&mut self) -> Result<&ThumbnailCache> {
        let document = self.document.as_ref().ok_or(Error::NoDocument)?;
        Ok(self
            .thumbnails
            .get_or_insert_with(|| ThumbnailCache::build(document.rasterizer(), document.page_count())))
    }

    /// Export the current selection.
    pub fn export(
        &self,
        mode: ExportMode,
        destination: Option<&Path>,
        options: &ExportOptions,
    ) -> Result<ExportResult> {
        let request = ExportRequest {
            offsets: self.selection.selected_offsets(),
            mode,
            destination: destination.map(Path::to_path_buf),
        };
        export::export(self.document.as_ref(), &request, options)
    }
}
