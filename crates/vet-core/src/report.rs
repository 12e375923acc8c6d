//! Run report types returned as output by `vetrec ocr`.
//!
//! All enums use `snake_case` serialization.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::language::LanguageCode;

/// Outcome of processing a single PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Every page was recognized and the text was written.
    Ok,
    /// At least one page failed; the text of the remaining pages was written.
    Partial,
    /// The document could not be processed; nothing was written.
    Failed,
}

impl DocumentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Partial => "partial",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub status: DocumentStatus,
    pub page_count: u32,
    pub pages_recognized: u32,
    pub failed_pages: Vec<u32>,
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

/// Report for one `vetrec ocr` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OcrReport {
    #[schemars(with = "String")]
    pub language: LanguageCode,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub documents: Vec<DocumentOutcome>,
    pub succeeded: u32,
    pub partial: u32,
    pub failed: u32,
}

impl OcrReport {
    #[must_use]
    pub fn new(language: LanguageCode, started_at: DateTime<Utc>) -> Self {
        Self {
            language,
            started_at,
            finished_at: started_at,
            documents: Vec::new(),
            succeeded: 0,
            partial: 0,
            failed: 0,
        }
    }

    /// Append an outcome and bump the matching counter.
    pub fn record(&mut self, outcome: DocumentOutcome) {
        match outcome.status {
            DocumentStatus::Ok => self.succeeded += 1,
            DocumentStatus::Partial => self.partial += 1,
            DocumentStatus::Failed => self.failed += 1,
        }
        self.documents.push(outcome);
    }

    pub fn finish(&mut self, finished_at: DateTime<Utc>) {
        self.finished_at = finished_at;
    }

    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn outcome(status: DocumentStatus) -> DocumentOutcome {
        DocumentOutcome {
            input: PathBuf::from("a.pdf"),
            output: PathBuf::from("a.txt"),
            status,
            page_count: 3,
            pages_recognized: 3,
            failed_pages: Vec::new(),
            error: None,
            elapsed_ms: 12,
        }
    }

    #[test]
    fn record_counts_by_status() {
        let mut report = OcrReport::new(LanguageCode::default(), Utc::now());
        report.record(outcome(DocumentStatus::Ok));
        report.record(outcome(DocumentStatus::Ok));
        report.record(outcome(DocumentStatus::Partial));
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.partial, 1);
        assert!(!report.has_failures());

        report.record(outcome(DocumentStatus::Failed));
        assert!(report.has_failures());
        assert_eq!(report.documents.len(), 4);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&DocumentStatus::Partial).unwrap();
        assert_eq!(json, "\"partial\"");
        assert_eq!(DocumentStatus::Failed.to_string(), "failed");
    }
}
