use anyhow::{Context, Result};
use lopdf::{Document, Object};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct PdfDocument {
    pub doc: Document,
    pub path: PathBuf,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let doc =
            Document::load(path).with_context(|| format!("Failed to open PDF: {}", path.display()))?;
        Ok(PdfDocument {
            doc,
            path: path.to_path_buf(),
        })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get metadata from the document info dictionary
    pub fn get_info(&self) -> PdfInfo {
        let mut info = PdfInfo {
            page_count: self.page_count(),
            ..Default::default()
        };

        let dict = match self.doc.trailer.get(b"Info") {
            Ok(Object::Reference(info_ref)) => self.doc.get_dictionary(*info_ref).ok(),
            Ok(Object::Dictionary(dict)) => Some(dict),
            _ => None,
        };

        if let Some(dict) = dict {
            info.title = get_string_from_dict(dict, b"Title");
            info.author = get_string_from_dict(dict, b"Author");
            info.creator = get_string_from_dict(dict, b"Creator");
            info.producer = get_string_from_dict(dict, b"Producer");
        }

        info
    }

    /// Build a new document holding only the given pages (0-based offsets).
    ///
    /// Page objects and their content streams are carried over untouched,
    /// including their original encoding. Pages keep their source order, which is ascending.
    pub fn extract_offsets(&self, offsets: &[u32]) -> Result<Document> {
        let total = self.page_count();

        for &offset in offsets {
            if offset >= total {
                anyhow::bail!("Page {} is out of range (1-{})", offset + 1, total);
            }
        }

        let pages_to_delete: Vec<u32> = (1..=total)
            .filter(|page| !offsets.contains(&(page - 1)))
            .collect();

        let mut new_doc = self.doc.clone();
        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
        }
        new_doc.prune_objects();

        Ok(new_doc)
    }

    /// Save to a file. The document is written to a temporary file next to
    /// `path` and renamed into place, so a failed save leaves nothing behind.
    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        doc.save_to(&mut tmp)
            .with_context(|| format!("Failed to save PDF: {}", path.display()))?;
        tmp.persist(path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to save PDF: {}", path.display()))?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct PdfInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub page_count: u32,
}

fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => decode_pdf_string(bytes),
        _ => None,
    }
}

fn decode_pdf_string(bytes: &[u8]) -> Option<String> {
    match bytes {
        // UTF-16BE with BOM
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16(&units).ok()
        }
        // PDFDocEncoding, approximated as Latin-1
        _ => Some(bytes.iter().map(|&b| b as char).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::{page_widths, sample_pdf};
    use lopdf::{Dictionary, Stream};

    #[test]
    fn test_page_count() {
        let pdf = sample_pdf(&[100, 200, 300]);
        assert_eq!(pdf.page_count(), 3);
        assert_eq!(pdf.get_info().page_count, 3);
    }

    #[test]
    fn test_extract_offsets_keeps_ascending_order() {
        let pdf = sample_pdf(&[100, 200, 300, 400, 500]);
        let extracted = pdf.extract_offsets(&[3, 0, 2]).unwrap();
        assert_eq!(page_widths(&extracted), vec![100, 300, 400]);
    }

    #[test]
    fn test_extract_offsets_rejects_out_of_range() {
        let pdf = sample_pdf(&[100, 200]);
        assert!(pdf.extract_offsets(&[2]).is_err());
    }

    #[test]
    fn test_extract_offsets_keeps_content_streams() {
        let mut pdf = sample_pdf(&[100, 200]);
        let content = b"0 0 m 10 10 l S".to_vec();
        let content_id = pdf
            .doc
            .add_object(Stream::new(Dictionary::new(), content.clone()));
        let first_page = pdf.doc.get_pages()[&1];
        pdf.doc
            .get_dictionary_mut(first_page)
            .unwrap()
            .set("Contents", Object::Reference(content_id));

        let extracted = pdf.extract_offsets(&[0]).unwrap();
        let page_id = extracted.get_pages()[&1];
        let contents = extracted
            .get_dictionary(page_id)
            .unwrap()
            .get(b"Contents")
            .unwrap()
            .as_reference()
            .unwrap();
        let stream = extracted.get_object(contents).unwrap().as_stream().unwrap();
        assert_eq!(stream.content, content);
        assert!(stream.dict.get(b"Filter").is_err());
    }

    #[test]
    fn test_save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.pdf");
        let mut extracted = sample_pdf(&[100, 200, 300]).extract_offsets(&[1]).unwrap();
        PdfDocument::save(&mut extracted, &out).unwrap();

        let saved = Document::load(&out).unwrap();
        assert_eq!(page_widths(&saved), vec![200]);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_save_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let taken = dir.path().join("taken.pdf");
        std::fs::create_dir(&taken).unwrap();
        let mut extracted = sample_pdf(&[100]).extract_offsets(&[0]).unwrap();

        assert!(PdfDocument::save(&mut extracted, &taken).is_err());
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries, vec![taken.clone()]);
        assert!(taken.is_dir());
    }

    #[test]
    fn test_decode_utf16_title() {
        let bytes = [0xFE, 0xFF, 0x00, b'H', 0x00, b'i'];
        assert_eq!(decode_pdf_string(&bytes).as_deref(), Some("Hi"));
        assert_eq!(decode_pdf_string(b"Plain").as_deref(), Some("Plain"));
    }
}
