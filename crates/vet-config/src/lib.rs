//! # vet-config
//!
//! Layered configuration loading for vetrec using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`VETREC_*` prefix, `__` as separator)
//! 2. Project-level `.vetrec/config.toml`
//! 3. User-level `~/.config/vetrec/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `VETREC_OCR__LANGUAGE` -> `ocr.language`,
//! `VETREC_TOOLS__TESSERACT` -> `tools.tesseract`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use vet_config::VetConfig;
//!
//! let config = VetConfig::load_with_dotenv().expect("config");
//! println!("OCR language: {}", config.ocr.language);
//! ```

mod error;
mod general;
mod ocr;
mod tools;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use ocr::{MAX_DPI, OcrConfig};
pub use tools::ToolsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix shared by every configuration environment variable.
pub const ENV_PREFIX: &str = "VETREC_";

/// Dotenv file read by [`VetConfig::load_with_dotenv`], relative to the current directory.
pub const DOTENV_FILE: &str = ".env";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VetConfig {
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl VetConfig {
    /// Load and validate configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// A missing `.env` is fine. Variables already set in the process
    /// environment are not overridden.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Dotenv`] when `.env` exists but cannot be read or
    /// parsed, otherwise see [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        match dotenvy::from_path(DOTENV_FILE) {
            Ok(()) => {}
            Err(error) if error.not_found() => {}
            Err(error) => return Err(ConfigError::Dotenv(error)),
        }
        Self::load()
    }

    /// Extract and validate from an already-built figment.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".vetrec/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check every section for out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ocr.validate()?;
        self.tools.validate()?;
        Ok(())
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vetrec").join("config.toml"))
    }
}
