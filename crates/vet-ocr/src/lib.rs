//! # vet-ocr
//!
//! Text extraction from scanned PDF records.
//!
//! Each PDF is rendered page by page with poppler's `pdftoppm`, every page
//! image is recognized with the `tesseract` CLI, and the page texts are joined
//! into a single UTF-8 document.
//!
//! - [`tools`]: bounded invocation of external programs
//! - [`raster`]: the [`Rasterizer`] seam and its `pdftoppm` implementation
//! - [`recognize`]: the [`Recognizer`] seam and its `tesseract` implementation
//! - [`engine`]: per-document OCR with bounded page concurrency
//! - [`plan`]: input discovery and output path resolution
//! - [`pipeline`]: batch processing that writes text files and builds the report

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod plan;
pub mod raster;
pub mod recognize;
pub mod tools;

pub use engine::OcrEngine;
pub use error::OcrError;
pub use pipeline::{ProcessOptions, process_plan};
pub use plan::{OcrJob, OcrPlan, PlanMode, discover_pdfs, plan};
pub use raster::{PageImage, Pdftoppm, Rasterizer};
pub use recognize::{Recognizer, Tesseract};
pub use tools::ExternalTool;
