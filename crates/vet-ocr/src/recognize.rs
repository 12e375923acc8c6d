//! Page recognition.
//!
//! [`Tesseract`] runs `tesseract <image> stdout -l <language>` and returns
//! whatever it prints, decoded as UTF-8 (lossily) and otherwise untouched.

use std::ffi::OsStr;
use std::future::Future;
use std::path::Path;

use vet_core::LanguageCode;

use crate::error::OcrError;
use crate::tools::ExternalTool;

/// Turns a page image into text.
pub trait Recognizer: Send + Sync {
    fn recognize(
        &self,
        image: &Path,
        language: &LanguageCode,
    ) -> impl Future<Output = Result<String, OcrError>> + Send;
}

/// [`Recognizer`] backed by the `tesseract` CLI.
#[derive(Debug, Clone)]
pub struct Tesseract {
    tool: ExternalTool,
}

impl Tesseract {
    #[must_use]
    pub const fn new(tool: ExternalTool) -> Self {
        Self { tool }
    }

    #[must_use]
    pub const fn tool(&self) -> &ExternalTool {
        &self.tool
    }

    /// Installed traineddata names reported by `tesseract --list-langs`.
    ///
    /// # Errors
    ///
    /// Fails when tesseract cannot be run.
    pub async fn list_languages(&self) -> Result<Vec<String>, OcrError> {
        let output = self.tool.run(["--list-langs"]).await?;
        // Older releases print the list on stderr.
        let mut languages = parse_language_list(&String::from_utf8_lossy(&output.stdout));
        if languages.is_empty() {
            languages = parse_language_list(&String::from_utf8_lossy(&output.stderr));
        }
        Ok(languages)
    }
}

impl Recognizer for Tesseract {
    async fn recognize(&self, image: &Path, language: &LanguageCode) -> Result<String, OcrError> {
        let args: [&OsStr; 4] = [
            image.as_os_str(),
            OsStr::new("stdout"),
            OsStr::new("-l"),
            OsStr::new(language.as_str()),
        ];
        let output = self.tool.run(args).await?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn parse_language_list(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("List of available languages"))
        .map(ToString::to_string)
        .collect()
}
