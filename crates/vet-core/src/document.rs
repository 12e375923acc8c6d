//! Page and document OCR results.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::language::LanguageCode;

/// Separator placed between recognized pages in the written text.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Text recognized on a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// 1-based page number.
    pub number: u32,
    pub text: String,
}

/// A page that rasterized but could not be recognized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFailure {
    pub number: u32,
    pub reason: String,
}

/// OCR result for one PDF.
///
/// `pages` and `failures` are each sorted by page number and never share a
/// number. Together they cover every rasterized page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrDocument {
    pub source: PathBuf,
    pub language: LanguageCode,
    pub page_count: u32,
    pub pages: Vec<PageText>,
    pub failures: Vec<PageFailure>,
}

impl OcrDocument {
    /// Recognized text of every successful page, in page order, joined by
    /// [`PAGE_SEPARATOR`]. Failed pages are left out entirely.
    #[must_use]
    pub fn text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.text.as_str())
            .collect::<Vec<_>>()
            .join(PAGE_SEPARATOR)
    }

    /// True when no page failed recognition.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    #[must_use]
    pub fn failed_page_numbers(&self) -> Vec<u32> {
        self.failures.iter().map(|failure| failure.number).collect()
    }

    #[must_use]
    pub fn pages_recognized(&self) -> u32 {
        u32::try_from(self.pages.len()).unwrap_or(u32::MAX)
    }
}
