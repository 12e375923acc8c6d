//! Batch processing: run every job of a plan and write the text files.

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use vet_core::{DocumentOutcome, DocumentStatus, LanguageCode, OcrDocument, OcrReport};

use crate::engine::OcrEngine;
use crate::error::OcrError;
use crate::plan::{OcrJob, OcrPlan};
use crate::raster::Rasterizer;
use crate::recognize::Recognizer;

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// Record a failed document and continue instead of aborting the run.
    pub keep_going: bool,
}

/// Process every job of `plan` in order.
///
/// `on_document` is called after each outcome is known, before the next job
/// starts.
///
/// # Errors
///
/// Returns the first document-level error unless `options.keep_going` is set,
/// and any error creating the plan's output directory.
pub async fn process_plan<R, T, F>(
    engine: &OcrEngine<R, T>,
    plan: &OcrPlan,
    language: &LanguageCode,
    options: ProcessOptions,
    mut on_document: F,
) -> Result<OcrReport, OcrError>
where
    R: Rasterizer,
    T: Recognizer,
    F: FnMut(&DocumentOutcome),
{
    let mut report = OcrReport::new(language.clone(), Utc::now());

    if let Some(dir) = &plan.output_dir {
        create_dir(dir).await?;
    }

    for job in &plan.jobs {
        let started = Instant::now();
        let result = process_job(engine, job, language).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let outcome = match result {
            Ok(document) => completed_outcome(job, &document, elapsed_ms),
            Err(error) if options.keep_going => {
                tracing::error!(input = %job.input.display(), %error, "processing failed; continuing");
                DocumentOutcome {
                    input: job.input.clone(),
                    output: job.output.clone(),
                    status: DocumentStatus::Failed,
                    page_count: 0,
                    pages_recognized: 0,
                    failed_pages: Vec::new(),
                    error: Some(error.to_string()),
                    elapsed_ms,
                }
            }
            Err(error) => return Err(error),
        };

        on_document(&outcome);
        report.record(outcome);
    }

    report.finish(Utc::now());
    Ok(report)
}

async fn process_job<R: Rasterizer, T: Recognizer>(
    engine: &OcrEngine<R, T>,
    job: &OcrJob,
    language: &LanguageCode,
) -> Result<OcrDocument, OcrError> {
    let document = engine.extract_text_from_pdf(&job.input, language).await?;

    if let Some(parent) = job.output.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir(parent).await?;
    }

    tokio::fs::write(&job.output, document.text())
        .await
        .map_err(|e| OcrError::io(&job.output, e))?;
    tracing::info!(output = %job.output.display(), "wrote OCR output");

    Ok(document)
}

fn completed_outcome(job: &OcrJob, document: &OcrDocument, elapsed_ms: u64) -> DocumentOutcome {
    DocumentOutcome {
        input: job.input.clone(),
        output: job.output.clone(),
        status: if document.is_complete() {
            DocumentStatus::Ok
        } else {
            DocumentStatus::Partial
        },
        page_count: document.page_count,
        pages_recognized: document.pages_recognized(),
        failed_pages: document.failed_page_numbers(),
        error: None,
        elapsed_ms,
    }
}

async fn create_dir(dir: &Path) -> Result<(), OcrError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| OcrError::io(dir, e))
}
