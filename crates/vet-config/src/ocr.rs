//! OCR tuning: language, rasterization resolution, page concurrency.

use serde::{Deserialize, Serialize};
use vet_core::LanguageCode;
use vet_core::language::DEFAULT_LANGUAGE;

use crate::ConfigError;

/// Largest accepted rasterization resolution.
pub const MAX_DPI: u32 = 1200;

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Default rasterization resolution, matching poppler-based converters.
const fn default_dpi() -> u32 {
    200
}

const fn default_jobs() -> usize {
    2
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OcrConfig {
    /// Tesseract language selector (e.g., "eng", "eng+spa").
    #[serde(default = "default_language")]
    pub language: String,

    /// Resolution pages are rendered at before recognition.
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Pages recognized concurrently within one document.
    #[serde(default = "default_jobs")]
    pub jobs: usize,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            dpi: default_dpi(),
            jobs: default_jobs(),
        }
    }
}

impl OcrConfig {
    /// Parsed language selector.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a malformed selector.
    pub fn language_code(&self) -> Result<LanguageCode, ConfigError> {
        LanguageCode::parse(&self.language).map_err(|error| ConfigError::InvalidValue {
            field: "ocr.language".to_string(),
            reason: error.to_string(),
        })
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.language_code()?;

        if self.dpi == 0 || self.dpi > MAX_DPI {
            return Err(ConfigError::InvalidValue {
                field: "ocr.dpi".to_string(),
                reason: format!("must be between 1 and {MAX_DPI}, got {}", self.dpi),
            });
        }

        if self.jobs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ocr.jobs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
