//! OCR error types for vet-ocr.

use std::path::PathBuf;

use vet_core::CoreError;

/// Errors from rasterization, recognition, planning, and output writing.
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    /// The input path does not exist.
    #[error("input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Filesystem error tied to a specific path.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An external program could not be started because it is not installed.
    #[error("{tool} not found; install it or set its path in the [tools] config section")]
    ToolNotFound { tool: String },

    /// An external program exited unsuccessfully.
    #[error("{tool} failed ({status}): {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    /// An external program exceeded its time budget.
    #[error("{tool} timed out after {secs}s")]
    Timeout { tool: String, secs: u64 },

    /// The PDF could not be rendered to page images.
    #[error("failed to rasterize {}: {reason}", .path.display())]
    Rasterize { path: PathBuf, reason: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl OcrError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
