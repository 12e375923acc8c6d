//! Tesseract language selectors.
//!
//! Tesseract accepts one or more traineddata names joined by `+`
//! (`eng`, `eng+spa`, `chi_sim`). The selector is passed straight to
//! `tesseract -l`, so it is validated before it ever reaches a command line.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Language used when neither the CLI nor the config names one.
pub const DEFAULT_LANGUAGE: &str = "eng";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parse and validate a language selector.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the selector is empty or a
    /// component contains anything other than ASCII alphanumerics and `_`.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation(
                "language code must not be empty".to_string(),
            ));
        }

        for component in trimmed.split('+') {
            if component.is_empty() {
                return Err(CoreError::Validation(format!(
                    "language code '{trimmed}' has an empty component"
                )));
            }
            if !component
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
            {
                return Err(CoreError::Validation(format!(
                    "language code '{trimmed}' contains invalid characters in '{component}'"
                )));
            }
        }

        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Individual traineddata names, in order.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('+')
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageCode> for String {
    fn from(value: LanguageCode) -> Self {
        value.0
    }
}
