//! Text extraction from uploaded documents (PDF and plain text).

use bytes::Bytes;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("File is not valid UTF-8 text: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Supported upload formats, decided by the declared file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    PlainText,
}

impl DocumentFormat {
    pub const SUPPORTED_EXTENSIONS: [&'static str; 2] = [".pdf", ".txt"];

    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(DocumentFormat::Pdf)
        } else if lower.ends_with(".txt") {
            Some(DocumentFormat::PlainText)
        } else {
            None
        }
    }
}

/// An uploaded file. Lives only until its text has been extracted.
#[derive(Debug, Clone)]
pub struct Document {
    pub filename: String,
    pub bytes: Bytes,
}

impl Document {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn format(&self) -> Option<DocumentFormat> {
        DocumentFormat::from_filename(&self.filename)
    }
}

/// Pulls raw text out of a document.
pub fn extract(document: &Document) -> Result<String, ExtractionError> {
    let format = document
        .format()
        .ok_or_else(|| ExtractionError::UnsupportedFormat(document.filename.to_lowercase()))?;

    let result = match format {
        DocumentFormat::Pdf => extract_pdf(&document.bytes),
        DocumentFormat::PlainText => {
            String::from_utf8(document.bytes.to_vec()).map_err(ExtractionError::from)
        }
    };

    match &result {
        Ok(text) => info!(
            "Extracted {} characters from {}",
            text.chars().count(),
            document.filename
        ),
        Err(e) => error!("Text extraction failed for {}: {e}", document.filename),
    }
    result
}

// pdf-extract panics on some malformed font tables instead of returning an error.
fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| ExtractionError::Pdf("parser panicked on malformed input".to_string()))?
        .map_err(|e| ExtractionError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension_is_case_insensitive() {
        assert_eq!(
            DocumentFormat::from_filename("CV.PDF"),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_filename("resume.txt"),
            Some(DocumentFormat::PlainText)
        );
        assert_eq!(DocumentFormat::from_filename("resume.docx"), None);
        assert_eq!(DocumentFormat::from_filename("pdf"), None);
    }

    #[test]
    fn test_extract_plain_text() {
        let doc = Document::new("resume.txt", "Work Experience\nRust engineer".as_bytes().to_vec());
        assert_eq!(extract(&doc).unwrap(), "Work Experience\nRust engineer");
    }

    #[test]
    fn test_extract_rejects_unsupported_format() {
        let doc = Document::new("Resume.DOCX", b"whatever".to_vec());
        match extract(&doc) {
            Err(ExtractionError::UnsupportedFormat(name)) => assert_eq!(name, "resume.docx"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_extract_rejects_invalid_utf8() {
        let doc = Document::new("resume.txt", vec![0xff, 0xfe, 0xfd]);
        assert!(matches!(extract(&doc), Err(ExtractionError::Encoding(_))));
    }

    #[test]
    fn test_extract_rejects_garbage_pdf() {
        let doc = Document::new("resume.pdf", b"not really a pdf".to_vec());
        assert!(matches!(extract(&doc), Err(ExtractionError::Pdf(_))));
    }
}
