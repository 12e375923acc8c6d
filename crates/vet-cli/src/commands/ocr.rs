use std::time::Duration;

use anyhow::{Context, bail};
use serde_json::Value;
use vet_config::{MAX_DPI, VetConfig};
use vet_core::{LanguageCode, OcrReport};
use vet_ocr::{ExternalTool, OcrEngine, Pdftoppm, ProcessOptions, Tesseract};

use crate::cli::root_commands::OcrArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::{output, render_rows};
use crate::progress::Progress;

/// Column order for the per-document table.
const TABLE_COLUMNS: &[&str] = &[
    "input",
    "output",
    "status",
    "page_count",
    "pages_recognized",
    "failed_pages",
    "elapsed_ms",
    "error",
];

/// Effective settings for one run: CLI flags layered over the config.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OcrSettings {
    language: LanguageCode,
    dpi: u32,
    jobs: usize,
    recursive: bool,
    keep_going: bool,
}

fn resolve_settings(args: &OcrArgs, config: &VetConfig) -> anyhow::Result<OcrSettings> {
    let language = match &args.language {
        Some(language) => LanguageCode::parse(language).context("invalid --language")?,
        None => config.ocr.language_code()?,
    };

    let dpi = args.dpi.unwrap_or(config.ocr.dpi);
    if dpi == 0 || dpi > MAX_DPI {
        bail!("--dpi must be between 1 and {MAX_DPI}, got {dpi}");
    }

    let jobs = args.jobs.unwrap_or(config.ocr.jobs);
    if jobs == 0 {
        bail!("--jobs must be at least 1");
    }

    Ok(OcrSettings {
        language,
        dpi,
        jobs,
        recursive: args.recursive || config.general.recursive,
        keep_going: args.keep_going || config.general.keep_going,
    })
}

/// Handle `vetrec ocr`.
pub async fn handle(args: &OcrArgs, config: &VetConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let settings = resolve_settings(args, config)?;
    let timeout = Duration::from_secs(config.tools.timeout_secs);

    let engine = OcrEngine::new(
        Pdftoppm::new(ExternalTool::new(&config.tools.pdftoppm, timeout), settings.dpi),
        Tesseract::new(ExternalTool::new(&config.tools.tesseract, timeout)),
    )
    .with_jobs(settings.jobs);

    let plan = vet_ocr::plan(&args.input, args.output.as_deref(), settings.recursive)?;
    tracing::debug!(?plan, "resolved OCR plan");

    let progress = Progress::bar(plan.jobs.len() as u64, "OCR");
    let result = vet_ocr::process_plan(
        &engine,
        &plan,
        &settings.language,
        ProcessOptions {
            keep_going: settings.keep_going,
        },
        |outcome| {
            progress.inc(1);
            if let Some(name) = outcome.input.file_name() {
                progress.set_message(&name.to_string_lossy());
            }
        },
    )
    .await;

    let report = match result {
        Ok(report) => {
            progress.finish_clear();
            report
        }
        Err(error) => {
            progress.finish_err("failed");
            return Err(error).context("processing failed");
        }
    };

    print_report(&report, flags.format)?;
    tracing::info!(
        succeeded = report.succeeded,
        partial = report.partial,
        failed = report.failed,
        "processing completed"
    );

    check_report(&report)
}

/// Turn a finished run into the command's exit status.
///
/// The report is printed before this runs, so `--keep-going` batches still
/// show every outcome when some documents failed.
fn check_report(report: &OcrReport) -> anyhow::Result<()> {
    if report.has_failures() {
        bail!(
            "{} of {} documents failed",
            report.failed,
            report.documents.len()
        );
    }
    Ok(())
}

fn print_report(report: &OcrReport, format: OutputFormat) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return output(report, format);
    }

    let items = report
        .documents
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<Value>, _>>()?;
    println!("{}", render_rows(&items, Some(TABLE_COLUMNS)));
    println!(
        "\nlanguage {}: {} ok, {} partial, {} failed",
        report.language, report.succeeded, report.partial, report.failed
    );
    Ok(())
}
