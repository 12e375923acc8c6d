//! PDF rasterization.
//!
//! [`Rasterizer`] is the seam between the engine and whatever renders PDF
//! pages to images. [`Pdftoppm`] drives poppler's `pdftoppm`, which writes one
//! PNG per page named `<prefix>-<n>.png` (`n` zero-padded to the width of the
//! page count).

use std::ffi::OsStr;
use std::future::Future;
use std::path::{Path, PathBuf};

use crate::error::OcrError;
use crate::tools::ExternalTool;

/// File name prefix for rendered pages inside the work directory.
const PAGE_PREFIX: &str = "page";

/// One rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    /// 1-based page number.
    pub number: u32,
    pub path: PathBuf,
}

/// Renders every page of a PDF into `workdir`.
///
/// Implementations return the pages sorted by page number. `workdir` is
/// owned by the caller and removed after recognition.
pub trait Rasterizer: Send + Sync {
    fn rasterize(
        &self,
        pdf: &Path,
        workdir: &Path,
    ) -> impl Future<Output = Result<Vec<PageImage>, OcrError>> + Send;
}

/// [`Rasterizer`] backed by poppler's `pdftoppm`.
#[derive(Debug, Clone)]
pub struct Pdftoppm {
    tool: ExternalTool,
    dpi: u32,
}

impl Pdftoppm {
    #[must_use]
    pub const fn new(tool: ExternalTool, dpi: u32) -> Self {
        Self { tool, dpi }
    }

    #[must_use]
    pub const fn tool(&self) -> &ExternalTool {
        &self.tool
    }
}

impl Rasterizer for Pdftoppm {
    async fn rasterize(&self, pdf: &Path, workdir: &Path) -> Result<Vec<PageImage>, OcrError> {
        let prefix = workdir.join(PAGE_PREFIX);
        let dpi = self.dpi.to_string();
        let args: [&OsStr; 5] = [
            OsStr::new("-r"),
            OsStr::new(&dpi),
            OsStr::new("-png"),
            pdf.as_os_str(),
            prefix.as_os_str(),
        ];

        self.tool.run(args).await.map_err(|error| match error {
            OcrError::ToolFailed { status, stderr, .. } => OcrError::Rasterize {
                path: pdf.to_path_buf(),
                reason: if stderr.is_empty() {
                    status
                } else {
                    format!("{status}: {stderr}")
                },
            },
            other => other,
        })?;

        collect_pages(workdir).await
    }
}

/// List the rendered pages in `workdir`, sorted by page number.
///
/// Files that do not follow the `page-<n>.png` pattern are ignored.
///
/// # Errors
///
/// Returns [`OcrError::Io`] if the directory cannot be read.
pub async fn collect_pages(workdir: &Path) -> Result<Vec<PageImage>, OcrError> {
    let mut entries = tokio::fs::read_dir(workdir)
        .await
        .map_err(|e| OcrError::io(workdir, e))?;

    let mut pages = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| OcrError::io(workdir, e))?
    {
        let name = entry.file_name();
        if let Some(number) = name.to_str().and_then(parse_page_number) {
            pages.push(PageImage {
                number,
                path: entry.path(),
            });
        }
    }

    pages.sort_by_key(|page| page.number);
    Ok(pages)
}

/// Page number encoded in a `page-<n>.png` file name.
fn parse_page_number(file_name: &str) -> Option<u32> {
    let digits = file_name
        .strip_prefix(PAGE_PREFIX)?
        .strip_prefix('-')?
        .strip_suffix(".png")?;
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|number| *number > 0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("page-1.png", Some(1))]
    #[case("page-01.png", Some(1))]
    #[case("page-012.png", Some(12))]
    #[case("page-250.png", Some(250))]
    #[case("page-0.png", None)]
    #[case("page-.png", None)]
    #[case("page-1.ppm", None)]
    #[case("page-1a.png", None)]
    #[case("other-1.png", None)]
    #[case("page1.png", None)]
    fn parses_pdftoppm_file_names(#[case] name: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_page_number(name), expected);
    }

    #[tokio::test]
    async fn collect_pages_sorts_numerically_and_ignores_strays() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["page-10.png", "page-02.png", "page-01.png", "notes.txt"] {
            std::fs::write(tmp.path().join(name), b"png").unwrap();
        }

        let pages = collect_pages(tmp.path()).await.unwrap();
        let numbers: Vec<u32> = pages.iter().map(|page| page.number).collect();
        assert_eq!(numbers, vec![1, 2, 10]);
        assert_eq!(pages[2].path, tmp.path().join("page-10.png"));
    }

    #[tokio::test]
    async fn collect_pages_on_empty_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(collect_pages(tmp.path()).await.unwrap().is_empty());
    }
}
