//! Text extraction — turns a resume file into one raw text blob.
//!
//! Supported formats are chosen by file extension:
//! - `.pdf` via pdf-extract (page text concatenated)
//! - `.docx` via docx-lite (body paragraphs joined with newlines, empty ones kept)
//! - `.txt` read as UTF-8
//!
//! Anything else is rejected with `ExtractionError::UnsupportedFormat` before
//! the file is opened.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to extract text from PDF {path}: {message}")]
    Pdf { path: String, message: String },

    #[error("Failed to extract text from DOCX {path}: {message}")]
    Docx { path: String, message: String },

    #[error("{0} is not valid UTF-8 text")]
    InvalidUtf8(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ExtractionError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" => Ok(Self::PlainText),
            _ => Err(ExtractionError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::PlainText => "txt",
        }
    }
}

/// Extracts the full text of a document on disk.
pub fn extract_text(path: &Path) -> Result<String, ExtractionError> {
    let format = DocumentFormat::from_path(path)?;
    let text = match format {
        DocumentFormat::Pdf => extract_pdf_text(path)?,
        DocumentFormat::Docx => extract_docx_text(path)?,
        DocumentFormat::PlainText => extract_plain_text(path)?,
    };

    debug!(
        "Extracted {} chars from {} ({})",
        text.chars().count(),
        path.display(),
        format.extension()
    );
    Ok(text)
}

/// Extracts text from uploaded bytes. `file_name` selects the format; the
/// bytes go through a temporary file so every format shares one code path.
pub fn extract_text_from_bytes(file_name: &str, data: &[u8]) -> Result<String, ExtractionError> {
    let format = DocumentFormat::from_path(Path::new(file_name))?;

    let mut file = tempfile::Builder::new()
        .prefix("cv-upload-")
        .suffix(&format!(".{}", format.extension()))
        .tempfile()?;
    file.write_all(data)?;
    file.flush()?;

    extract_text(file.path())
}

fn extract_pdf_text(path: &Path) -> Result<String, ExtractionError> {
    pdf_extract::extract_text(path).map_err(|e| ExtractionError::Pdf {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Body paragraphs only, one per line. Empty paragraphs stay as blank lines
/// because segmentation depends on line adjacency; tables are not included.
fn extract_docx_text(path: &Path) -> Result<String, ExtractionError> {
    let reader = BufReader::new(File::open(path)?);
    let document = docx_lite::parse_document(reader).map_err(|e| ExtractionError::Docx {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    Ok(document
        .paragraphs
        .iter()
        .map(|p| p.to_text())
        .collect::<Vec<_>>()
        .join("\n"))
}

fn extract_plain_text(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes).map_err(|_| ExtractionError::InvalidUtf8(path.display().to_string()))
}
