//! PDF text extraction for pdfchat.
//!
//! Converts an uploaded PDF into plain text, one segment per physical page.
//! Extraction runs fully in memory via `pdf-extract`: no temp files, no
//! network. A page without an embedded text layer (e.g. a scanned image)
//! yields an empty segment rather than failing the whole document.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("file is not a PDF")]
    NotAPdf,
    #[error("failed to extract text: {0}")]
    Extraction(String),
}

/// Per-page text extracted from one PDF, in physical page order.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pages: Vec<String>,
}

impl ExtractedDocument {
    /// One entry per page, page 1 first. Pages with no extractable text
    /// are empty strings.
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The full document text: page segments joined by a single newline.
    pub fn text(&self) -> String {
        self.pages.join("\n")
    }

    /// True when no page carried any extractable text. Distinguishes a
    /// legitimately empty document from an extraction failure.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|p| p.trim().is_empty())
    }
}

/// Extract the text of a PDF held in memory.
///
/// Fails with [`PdfError::NotAPdf`] when the bytes are not a PDF at all,
/// and [`PdfError::Extraction`] when the file cannot be parsed. It never
/// reports fabricated or partial text as success for a broken file.
pub fn extract_document(data: &[u8]) -> Result<ExtractedDocument, PdfError> {
    if !data.starts_with(b"%PDF-") {
        return Err(PdfError::NotAPdf);
    }

    let raw_pages = pdf_extract::extract_text_from_mem_by_pages(data)
        .map_err(|e| PdfError::Extraction(e.to_string()))?;

    let pages: Vec<String> = raw_pages
        .into_iter()
        .map(|p| p.trim_end().to_string())
        .collect();

    tracing::debug!(pages = pages.len(), "extracted PDF text");
    Ok(ExtractedDocument { pages })
}
