// src/document/reader.rs
use crate::utils::error::DocumentError;
use lopdf::Document;
use std::path::Path;

/// One page's extracted text. Page numbers are 1-based and follow the
/// document's page tree order.
#[derive(Debug, Clone)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

/// Reads a PDF from disk and extracts per-page text.
pub fn read_pages<P: AsRef<Path>>(path: P) -> Result<Vec<PageText>, DocumentError> {
    let doc = Document::load(path)?;
    pages_from_doc(&doc)
}

/// Reads a PDF already held in memory (e.g., a downloaded document).
pub fn read_pages_mem(bytes: &[u8]) -> Result<Vec<PageText>, DocumentError> {
    let doc = Document::load_mem(bytes)?;
    pages_from_doc(&doc)
}

fn pages_from_doc(doc: &Document) -> Result<Vec<PageText>, DocumentError> {
    if doc.is_encrypted() {
        return Err(DocumentError::Encrypted);
    }

    let mut pages = Vec::new();
    for &number in doc.get_pages().keys() {
        match doc.extract_text(&[number]) {
            Ok(text) => pages.push(PageText { number, text }),
            Err(err) => {
                // A single unreadable page should not sink the document.
                tracing::warn!("Failed to extract text from page {}: {}", number, err);
                pages.push(PageText {
                    number,
                    text: String::new(),
                });
            }
        }
    }

    tracing::info!("Extracted text from {} pages", pages.len());
    Ok(pages)
}
