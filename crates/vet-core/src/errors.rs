//! Cross-cutting error types for vetrec.
//!
//! Domain-specific errors (`ConfigError`, `OcrError`) live in their own
//! crates. The binary converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any vetrec crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
