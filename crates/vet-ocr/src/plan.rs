//! Input discovery and output path resolution.
//!
//! ## Directory input
//!
//! Every regular file with a `.pdf` extension (any case) is processed; with
//! `recursive` the walk descends into sub-directories. With an output path,
//! that path is a directory and `<stem>.txt` files go inside it, mirroring
//! sub-directories in recursive mode. Without one, each `<stem>.txt` is written
//! beside its PDF.
//!
//! ## File input
//!
//! An output ending in `.txt` is the exact destination. Any other output is a
//! directory that receives `<stem>.txt`. Without an output, `<stem>.txt` is
//! written beside the input.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::OcrError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMode {
    File,
    Directory,
}

/// One PDF and the text file it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrPlan {
    pub mode: PlanMode,
    /// Directory to create before any job runs, even when there are no jobs.
    pub output_dir: Option<PathBuf>,
    pub jobs: Vec<OcrJob>,
}

/// Resolve `input` (a PDF or a directory of PDFs) into jobs.
///
/// # Errors
///
/// Returns [`OcrError::InputNotFound`] when `input` does not exist.
pub fn plan(input: &Path, output: Option<&Path>, recursive: bool) -> Result<OcrPlan, OcrError> {
    if !input.exists() {
        return Err(OcrError::InputNotFound(input.to_path_buf()));
    }

    if input.is_dir() {
        let pdfs = discover_pdfs(input, recursive);
        tracing::info!(count = pdfs.len(), dir = %input.display(), "found PDF files in directory");

        let jobs = pdfs
            .into_iter()
            .map(|pdf| {
                let file_name = text_file_name(&pdf);
                let output = match output {
                    Some(out_dir) => {
                        let relative_parent = pdf
                            .parent()
                            .and_then(|parent| parent.strip_prefix(input).ok())
                            .map(Path::to_path_buf)
                            .unwrap_or_default();
                        out_dir.join(relative_parent).join(file_name)
                    }
                    None => sibling(&pdf, file_name),
                };
                OcrJob { input: pdf, output }
            })
            .collect();

        return Ok(OcrPlan {
            mode: PlanMode::Directory,
            output_dir: output.map(Path::to_path_buf),
            jobs,
        });
    }

    let file_name = text_file_name(input);
    let (output_dir, destination) = match output {
        Some(out) if has_txt_extension(out) => (None, out.to_path_buf()),
        Some(out_dir) => (Some(out_dir.to_path_buf()), out_dir.join(file_name)),
        None => (None, sibling(input, file_name)),
    };

    Ok(OcrPlan {
        mode: PlanMode::File,
        output_dir,
        jobs: vec![OcrJob {
            input: input.to_path_buf(),
            output: destination,
        }],
    })
}

/// PDF files under `dir`, sorted by path.
///
/// Hidden files are included and ignore files are not consulted. Symlinks to
/// PDFs are included; symlinked directories are not descended into. Entries
/// that cannot be read are logged and skipped.
#[must_use]
pub fn discover_pdfs(dir: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(dir);
    builder.standard_filters(false);
    builder.hidden(false);
    if !recursive {
        builder.max_depth(Some(1));
    }

    let mut pdfs = builder
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::warn!(%error, "skipping unreadable entry");
                None
            }
        })
        .map(ignore::DirEntry::into_path)
        // `is_file` follows symlinks, so linked PDFs count as files.
        .filter(|path| is_pdf(path) && path.is_file())
        .collect::<Vec<_>>();

    pdfs.sort();
    pdfs
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

fn has_txt_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}

/// `<stem>.txt` for a PDF path.
fn text_file_name(pdf: &Path) -> OsString {
    let mut name = pdf.file_stem().map(OsString::from).unwrap_or_default();
    name.push(".txt");
    name
}

fn sibling(path: &Path, file_name: OsString) -> PathBuf {
    path.parent()
        .map_or_else(|| PathBuf::from(&file_name), |parent| parent.join(&file_name))
}
