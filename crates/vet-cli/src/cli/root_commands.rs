use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Extract text from scanned PDFs with Tesseract.
    Ocr(OcrArgs),
    /// Check that pdftoppm and tesseract are installed and usable.
    Doctor,
    /// Print the effective configuration.
    Config(ConfigArgs),
    /// Print the JSON Schema of a report type.
    Schema(SchemaArgs),
}

/// Arguments for `vetrec ocr`.
#[derive(Clone, Debug, Args)]
pub struct OcrArgs {
    /// Input PDF file or directory of PDFs
    #[arg(short, long)]
    pub input: PathBuf,
    /// Output text file or directory (defaults to the input path with .txt extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// OCR language code (e.g., eng, spa, eng+spa)
    #[arg(short, long)]
    pub language: Option<String>,
    /// Rasterization resolution
    #[arg(long)]
    pub dpi: Option<u32>,
    /// Pages recognized concurrently per document
    #[arg(short, long)]
    pub jobs: Option<usize>,
    /// Descend into sub-directories of a directory input
    #[arg(short, long)]
    pub recursive: bool,
    /// Record failed documents and continue with the rest
    #[arg(long)]
    pub keep_going: bool,
}

/// Arguments for `vetrec config`.
#[derive(Clone, Debug, Args)]
pub struct ConfigArgs {
    /// Print as TOML, ready to paste into .vetrec/config.toml
    #[arg(long)]
    pub toml: bool,
}

/// Arguments for `vetrec schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum)]
    pub type_name: SchemaType,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    /// Output of `vetrec ocr`.
    Report,
}
