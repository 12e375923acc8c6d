//! External program locations and limits.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_pdftoppm() -> String {
    "pdftoppm".to_string()
}

fn default_tesseract() -> String {
    "tesseract".to_string()
}

/// Default per-invocation timeout in seconds.
const fn default_timeout_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// poppler's PDF rasterizer; a bare name is resolved via `PATH`.
    #[serde(default = "default_pdftoppm")]
    pub pdftoppm: String,

    #[serde(default = "default_tesseract")]
    pub tesseract: String,

    /// Upper bound for a single external invocation.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            pdftoppm: default_pdftoppm(),
            tesseract: default_tesseract(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ToolsConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("tools.pdftoppm", &self.pdftoppm),
            ("tools.tesseract", &self.tesseract),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tools.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
