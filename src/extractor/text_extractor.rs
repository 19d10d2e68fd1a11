//! Document-to-text conversion.
//!
//! The PDF backend is `pdf-extract`; everything downstream only sees a single
//! string with pages separated by [`PAGE_BREAK`].

use crate::error::{ExtractorError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task;

/// Form feed, placed between consecutive pages.
pub const PAGE_BREAK: char = '\u{000C}';

pub trait TextExtractor: Send + Sync {
    /// Return the full text of the document at `path`.
    fn extract_text(&self, path: &Path) -> Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract_from_bytes(&self, bytes: &[u8], source: &Path) -> Result<String> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| {
            ExtractorError::PdfExtraction {
                path: source.display().to_string(),
                message: e.to_string(),
            }
        })?;

        log::debug!("Extracted {} pages from {}", pages.len(), source.display());
        Ok(join_pages(&pages))
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        log::debug!("Read {} bytes from {}", bytes.len(), path.display());

        let text = self.extract_from_bytes(&bytes, path)?;
        log::debug!("Extracted {} characters from {}", text.chars().count(), path.display());
        Ok(text)
    }
}

/// Run `extractor` on the blocking pool and wait for it.
///
/// A panic inside the extractor is reported as [`ExtractorError::Task`].
pub async fn extract_text_blocking(
    extractor: Arc<dyn TextExtractor>,
    path: PathBuf,
) -> Result<String> {
    task::spawn_blocking(move || extractor.extract_text(&path))
        .await
        .map_err(|e| ExtractorError::Task {
            message: e.to_string(),
        })?
}

pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut text = String::new();
    for (index, page) in pages.iter().enumerate() {
        if index > 0 {
            text.push(PAGE_BREAK);
        }
        text.push_str(page.as_ref());
    }
    text
}

/// Split extracted text back into pages. Always yields at least one page.
pub fn split_pages(text: &str) -> Vec<&str> {
    text.split(PAGE_BREAK).collect()
}
