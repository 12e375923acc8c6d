use std::time::Duration;

use anyhow::bail;
use serde::Serialize;
use vet_config::VetConfig;
use vet_ocr::{ExternalTool, OcrError, Tesseract};

use crate::cli::GlobalFlags;
use crate::output::output;
use crate::progress::Progress;

/// Version probes never need the full OCR timeout.
const PROBE_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Serialize)]
struct ToolStatus {
    tool: &'static str,
    program: String,
    status: &'static str,
    version: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct DoctorResponse {
    pdftoppm: ToolStatus,
    tesseract: ToolStatus,
    languages: Vec<String>,
    language: String,
    language_status: &'static str,
}

impl DoctorResponse {
    /// Both tools run and the configured language is not known to be missing.
    ///
    /// An empty `--list-langs` answer leaves the language `unknown`, which
    /// does not fail the check.
    fn healthy(&self) -> bool {
        self.pdftoppm.status == "ok" && self.tesseract.status == "ok" && self.language_status != "missing"
    }
}

async fn probe(tool: &'static str, program: &str, flag: &str) -> ToolStatus {
    let external = ExternalTool::new(program, PROBE_TIMEOUT);
    match external.version(flag).await {
        Ok(version) => ToolStatus {
            tool,
            program: program.to_string(),
            status: "ok",
            version: Some(version),
            error: None,
        },
        Err(error) => ToolStatus {
            tool,
            program: program.to_string(),
            status: if matches!(error, OcrError::ToolNotFound { .. }) {
                "missing"
            } else {
                "error"
            },
            version: None,
            error: Some(error.to_string()),
        },
    }
}

/// `available` when every component of the selector is installed.
fn language_status(language: &str, installed: &[String]) -> &'static str {
    if installed.is_empty() {
        return "unknown";
    }
    let all_installed = language
        .split('+')
        .all(|component| installed.iter().any(|name| name == component));
    if all_installed { "available" } else { "missing" }
}

/// Handle `vetrec doctor`.
pub async fn handle(config: &VetConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let spinner = Progress::spinner("checking OCR tools");

    let pdftoppm = probe("pdftoppm", &config.tools.pdftoppm, "-v").await;
    let tesseract = probe("tesseract", &config.tools.tesseract, "--version").await;

    let languages = if tesseract.status == "ok" {
        let tesseract = Tesseract::new(ExternalTool::new(&config.tools.tesseract, PROBE_TIMEOUT));
        match tesseract.list_languages().await {
            Ok(languages) => languages,
            Err(error) => {
                tracing::warn!(%error, "failed to list tesseract languages");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    spinner.finish_clear();

    let response = DoctorResponse {
        language_status: language_status(&config.ocr.language, &languages),
        language: config.ocr.language.clone(),
        pdftoppm,
        tesseract,
        languages,
    };
    output(&response, flags.format)?;

    if !response.healthy() {
        bail!("OCR prerequisites are not satisfied; see the report above");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn installed() -> Vec<String> {
        vec!["eng".to_string(), "osd".to_string(), "spa".to_string()]
    }

    #[test]
    fn single_language_is_available() {
        assert_eq!(language_status("eng", &installed()), "available");
    }

    #[test]
    fn combined_language_needs_every_component() {
        assert_eq!(language_status("eng+spa", &installed()), "available");
        assert_eq!(language_status("eng+fra", &installed()), "missing");
    }

    #[test]
    fn no_listing_is_unknown() {
        assert_eq!(language_status("eng", &[]), "unknown");
    }

    fn tool(tool: &'static str, status: &'static str) -> ToolStatus {
        ToolStatus {
            tool,
            program: tool.to_string(),
            status,
            version: (status == "ok").then(|| "5.3.0".to_string()),
            error: None,
        }
    }

    fn response(pdftoppm: &'static str, tesseract: &'static str, language_status: &'static str) -> DoctorResponse {
        DoctorResponse {
            pdftoppm: tool("pdftoppm", pdftoppm),
            tesseract: tool("tesseract", tesseract),
            languages: Vec::new(),
            language: "eng".to_string(),
            language_status,
        }
    }

    #[test]
    fn health_requires_both_tools() {
        assert!(response("ok", "ok", "available").healthy());
        assert!(!response("missing", "ok", "available").healthy());
        assert!(!response("ok", "error", "available").healthy());
    }

    #[test]
    fn unlisted_languages_do_not_fail_health() {
        assert!(response("ok", "ok", "unknown").healthy());
        assert!(!response("ok", "ok", "missing").healthy());
    }

    #[tokio::test]
    async fn missing_program_is_reported_not_raised() {
        let status = probe("tesseract", "vetrec-no-such-tesseract", "--version").await;
        assert_eq!(status.status, "missing");
        assert!(status.version.is_none());
        assert!(status.error.is_some());
    }
}
