//! # vet-core
//!
//! Core types and error types for vetrec.
//!
//! This crate provides the foundational types shared across all vetrec crates:
//! - Tesseract language selectors
//! - Page and document OCR results
//! - Run report types returned by the CLI
//! - Cross-cutting error types

pub mod document;
pub mod errors;
pub mod language;
pub mod report;

pub use document::{OcrDocument, PAGE_SEPARATOR, PageFailure, PageText};
pub use errors::CoreError;
pub use language::LanguageCode;
pub use report::{DocumentOutcome, DocumentStatus, OcrReport};
