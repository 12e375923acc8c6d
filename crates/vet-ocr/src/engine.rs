//! Per-document OCR.
//!
//! The engine renders a PDF into a private temporary directory, recognizes the
//! pages with at most `jobs` recognitions in flight, and assembles an
//! [`OcrDocument`]. A page that fails recognition is recorded and skipped;
//! only a rasterization failure fails the whole document.

use std::path::Path;

use futures::stream::{self, StreamExt};
use vet_core::{LanguageCode, OcrDocument, PageFailure, PageText};

use crate::error::OcrError;
use crate::raster::Rasterizer;
use crate::recognize::Recognizer;

pub struct OcrEngine<R, T> {
    rasterizer: R,
    recognizer: T,
    jobs: usize,
}

impl<R: Rasterizer, T: Recognizer> OcrEngine<R, T> {
    /// Engine that recognizes one page at a time.
    #[must_use]
    pub const fn new(rasterizer: R, recognizer: T) -> Self {
        Self {
            rasterizer,
            recognizer,
            jobs: 1,
        }
    }

    /// Allow up to `jobs` pages to be recognized concurrently (minimum 1).
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    #[must_use]
    pub const fn jobs(&self) -> usize {
        self.jobs
    }

    /// Extract the text of every page of `pdf`.
    ///
    /// # Errors
    ///
    /// Returns an error when the work directory cannot be created or the PDF
    /// cannot be rasterized. Per-page recognition failures are reported in
    /// [`OcrDocument::failures`] instead.
    pub async fn extract_text_from_pdf(
        &self,
        pdf: &Path,
        language: &LanguageCode,
    ) -> Result<OcrDocument, OcrError> {
        tracing::info!(path = %pdf.display(), %language, "starting OCR");

        let workdir = tempfile::Builder::new()
            .prefix("vetrec-")
            .tempdir()
            .map_err(|e| OcrError::io(std::env::temp_dir(), e))?;

        let images = match self.rasterizer.rasterize(pdf, workdir.path()).await {
            Ok(images) => images,
            Err(error) => {
                tracing::error!(path = %pdf.display(), %error, "failed to convert PDF to images");
                return Err(error);
            }
        };

        if images.is_empty() {
            tracing::warn!(path = %pdf.display(), "PDF rendered no pages");
        }

        let results = stream::iter(&images)
            .map(|image| async move {
                let result = self.recognizer.recognize(&image.path, language).await;
                (image.number, result)
            })
            .buffered(self.jobs)
            .collect::<Vec<_>>()
            .await;

        let mut pages = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (number, result) in results {
            match result {
                Ok(text) => {
                    tracing::debug!(page = number, path = %pdf.display(), "extracted text from page");
                    pages.push(PageText { number, text });
                }
                Err(error) => {
                    tracing::error!(page = number, path = %pdf.display(), %error, "OCR failed on page");
                    failures.push(PageFailure {
                        number,
                        reason: error.to_string(),
                    });
                }
            }
        }

        if let Err(error) = workdir.close() {
            tracing::warn!(%error, "failed to remove OCR work directory");
        }

        let page_count = u32::try_from(images.len()).unwrap_or(u32::MAX);
        tracing::info!(path = %pdf.display(), pages = page_count, "completed OCR");

        Ok(OcrDocument {
            source: pdf.to_path_buf(),
            language: language.clone(),
            page_count,
            pages,
            failures,
        })
    }
}
