//! DOC/DOCX to PDF through an external office suite.

use log::{info, warn};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct ConverterOptions {
    /// LibreOffice executable, looked up on PATH unless absolute.
    pub program: String,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        ConverterOptions {
            program: "soffice".to_string(),
        }
    }
}

/// File kinds accepted for loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
}

impl DocumentKind {
    /// Classify by extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "doc" | "docx" => Some(DocumentKind::Word),
            _ => None,
        }
    }
}

pub fn is_supported(path: &Path) -> bool {
    DocumentKind::from_path(path).is_some()
}

/// Where the converter is expected to leave the PDF: same directory and stem
/// as the input.
pub fn expected_output(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}

/// Convert `input` with `<program> --headless --convert-to pdf` into the
/// input's own directory.
///
/// The converter reports nothing useful, so success means the expected PDF
/// exists afterwards.
pub fn convert_to_pdf(input: &Path, options: &ConverterOptions) -> Result<PathBuf> {
    let outdir = match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let status = Command::new(&options.program)
        .args(["--headless", "--convert-to", "pdf", "--outdir"])
        .arg(&outdir)
        .arg(input)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if !status.success() => {
            warn!("{} exited with {}", options.program, status)
        }
        Ok(_) => {}
        Err(e) => {
            warn!("Failed to run {}: {}", options.program, e);
            return Err(Error::ConversionFailed(input.to_path_buf()));
        }
    }

    let output = expected_output(input);
    if output.exists() {
        info!("Converted {} to {}", input.display(), output.display());
        Ok(output)
    } else {
        Err(Error::ConversionFailed(input.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported(Path::new("a.pdf")));
        assert!(is_supported(Path::new("/x/Report.DOCX")));
        assert!(is_supported(Path::new("notes.Doc")));
        assert!(!is_supported(Path::new("image.png")));
        assert!(!is_supported(Path::new("pdf")));
        assert_eq!(
            DocumentKind::from_path(Path::new("b.PDF")),
            Some(DocumentKind::Pdf)
        );
    }

    #[test]
    fn test_expected_output() {
        assert_eq!(
            expected_output(Path::new("/docs/letter.docx")),
            PathBuf::from("/docs/letter.pdf")
        );
    }

    #[test]
    fn test_missing_converter() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("letter.docx");
        std::fs::write(&input, b"not really a docx").unwrap();

        let options = ConverterOptions {
            program: "pagepick-no-such-converter".to_string(),
        };
        let err = convert_to_pdf(&input, &options).unwrap_err();
        assert!(matches!(err, Error::ConversionFailed(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_no_output_means_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("letter.doc");
        std::fs::write(&input, b"").unwrap();

        let options = ConverterOptions {
            program: "true".to_string(),
        };
        let err = convert_to_pdf(&input, &options).unwrap_err();
        assert!(matches!(err, Error::ConversionFailed(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_output_presence_means_success() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("letter.doc");
        std::fs::write(&input, b"").unwrap();
        std::fs::write(dir.path().join("letter.pdf"), b"%PDF-1.7").unwrap();

        let options = ConverterOptions {
            program: "false".to_string(),
        };
        let output = convert_to_pdf(&input, &options).unwrap();
        assert_eq!(output, dir.path().join("letter.pdf"));
    }
}
