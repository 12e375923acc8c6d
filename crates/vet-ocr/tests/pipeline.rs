//! End-to-end batch processing with fixture-driven fake tools.
//!
//! Fixture "PDFs" are text files: each line is one page, and a file whose
//! first line is `!corrupt` fails to rasterize. A page line containing
//! `smudged` fails recognition.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use vet_core::{DocumentStatus, LanguageCode};
use vet_ocr::{OcrEngine, OcrError, PageImage, ProcessOptions, Rasterizer, Recognizer, plan, process_plan};

struct LineRasterizer;

impl Rasterizer for LineRasterizer {
    async fn rasterize(&self, pdf: &Path, workdir: &Path) -> Result<Vec<PageImage>, OcrError> {
        let content = tokio::fs::read_to_string(pdf).await.map_err(|e| OcrError::Io {
            path: pdf.to_path_buf(),
            source: e,
        })?;
        if content.starts_with("!corrupt") {
            return Err(OcrError::Rasterize {
                path: pdf.to_path_buf(),
                reason: "May not be a PDF file".to_string(),
            });
        }

        let mut pages = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let number = u32::try_from(index + 1).unwrap();
            let path = workdir.join(format!("page-{number}.png"));
            tokio::fs::write(&path, line).await.unwrap();
            pages.push(PageImage { number, path });
        }
        Ok(pages)
    }
}

struct EchoRecognizer;

impl Recognizer for EchoRecognizer {
    async fn recognize(&self, image: &Path, _language: &LanguageCode) -> Result<String, OcrError> {
        let text = tokio::fs::read_to_string(image).await.unwrap();
        if text.contains("smudged") {
            return Err(OcrError::ToolFailed {
                tool: "tesseract".to_string(),
                status: "exit status 1".to_string(),
                stderr: "Empty page!!".to_string(),
            });
        }
        Ok(text)
    }
}

fn engine() -> OcrEngine<LineRasterizer, EchoRecognizer> {
    OcrEngine::new(LineRasterizer, EchoRecognizer).with_jobs(2)
}

fn write_pdf(dir: &Path, name: &str, pages: &[&str]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, pages.join("\n")).unwrap();
    path
}

#[tokio::test]
async fn directory_batch_writes_one_text_file_per_pdf() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("cd");
    fs::create_dir(&input).unwrap();
    write_pdf(&input, "dd214.pdf", &["DD FORM 214", "Character of service: Honorable"]);
    write_pdf(&input, "C-File.PDF", &["Rating decision"]);
    write_pdf(&input, "index.html", &["not a pdf"]);
    let out = tmp.path().join("text");

    let plan = plan(&input, Some(&out), false).unwrap();
    let mut seen = Vec::new();
    let report = process_plan(&engine(), &plan, &LanguageCode::default(), ProcessOptions::default(), |outcome| {
        seen.push(outcome.input.clone());
    })
    .await
    .unwrap();

    assert_eq!(report.succeeded, 2);
    assert_eq!(report.documents.len(), 2);
    assert_eq!(seen.len(), 2);
    assert_eq!(
        fs::read_to_string(out.join("dd214.txt")).unwrap(),
        "DD FORM 214\n\nCharacter of service: Honorable"
    );
    assert_eq!(fs::read_to_string(out.join("C-File.txt")).unwrap(), "Rating decision");
    assert!(!out.join("index.txt").exists());
    assert!(report.finished_at >= report.started_at);
}

#[tokio::test]
async fn partial_document_is_written_and_flagged() {
    let tmp = tempfile::tempdir().unwrap();
    let pdf = write_pdf(tmp.path(), "notes.pdf", &["page one", "smudged", "page three"]);

    let plan = plan(&pdf, None, false).unwrap();
    let report = process_plan(&engine(), &plan, &LanguageCode::default(), ProcessOptions::default(), |_| {})
        .await
        .unwrap();

    let outcome = &report.documents[0];
    assert_eq!(outcome.status, DocumentStatus::Partial);
    assert_eq!(outcome.page_count, 3);
    assert_eq!(outcome.pages_recognized, 2);
    assert_eq!(outcome.failed_pages, vec![2]);
    assert_eq!(report.partial, 1);
    assert!(!report.has_failures());
    assert_eq!(
        fs::read_to_string(tmp.path().join("notes.txt")).unwrap(),
        "page one\n\npage three"
    );
}

#[tokio::test]
async fn corrupt_pdf_aborts_the_run_by_default() {
    let tmp = tempfile::tempdir().unwrap();
    write_pdf(tmp.path(), "a_broken.pdf", &["!corrupt"]);
    write_pdf(tmp.path(), "b_good.pdf", &["fine"]);

    let plan = plan(tmp.path(), None, false).unwrap();
    let error = process_plan(&engine(), &plan, &LanguageCode::default(), ProcessOptions::default(), |_| {})
        .await
        .unwrap_err();

    assert!(matches!(error, OcrError::Rasterize { .. }));
    assert!(!tmp.path().join("a_broken.txt").exists());
    assert!(!tmp.path().join("b_good.txt").exists());
}

#[tokio::test]
async fn keep_going_records_failure_and_continues() {
    let tmp = tempfile::tempdir().unwrap();
    write_pdf(tmp.path(), "a_broken.pdf", &["!corrupt"]);
    write_pdf(tmp.path(), "b_good.pdf", &["fine"]);

    let plan = plan(tmp.path(), None, false).unwrap();
    let report = process_plan(
        &engine(),
        &plan,
        &LanguageCode::default(),
        ProcessOptions { keep_going: true },
        |_| {},
    )
    .await
    .unwrap();

    assert_eq!(report.failed, 1);
    assert_eq!(report.succeeded, 1);
    assert!(report.has_failures());
    let failed = &report.documents[0];
    assert_eq!(failed.status, DocumentStatus::Failed);
    assert!(failed.error.as_deref().unwrap().contains("May not be a PDF file"));
    assert_eq!(fs::read_to_string(tmp.path().join("b_good.txt")).unwrap(), "fine");
}

#[tokio::test]
async fn output_directory_is_created_even_without_pdfs() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("empty");
    fs::create_dir(&input).unwrap();
    let out = tmp.path().join("nested/out");

    let plan = plan(&input, Some(&out), false).unwrap();
    let report = process_plan(&engine(), &plan, &LanguageCode::default(), ProcessOptions::default(), |_| {})
        .await
        .unwrap();

    assert!(report.documents.is_empty());
    assert!(out.is_dir());
}

#[tokio::test]
async fn explicit_txt_destination_gets_missing_parents() {
    let tmp = tempfile::tempdir().unwrap();
    let pdf = write_pdf(tmp.path(), "exam.pdf", &["C&P exam"]);
    let destination = tmp.path().join("reports/2024/exam-ocr.txt");

    let plan = plan(&pdf, Some(&destination), false).unwrap();
    process_plan(&engine(), &plan, &LanguageCode::default(), ProcessOptions::default(), |_| {})
        .await
        .unwrap();

    assert_eq!(fs::read_to_string(&destination).unwrap(), "C&P exam");
}

#[tokio::test]
async fn recursive_batch_mirrors_tree_into_output() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("cd");
    fs::create_dir_all(input.join("disc2/imaging")).unwrap();
    write_pdf(&input, "top.pdf", &["top"]);
    write_pdf(&input.join("disc2/imaging"), "xray.pdf", &["chest film"]);
    let out = tmp.path().join("out");

    let plan = plan(&input, Some(&out), true).unwrap();
    let report = process_plan(&engine(), &plan, &LanguageCode::default(), ProcessOptions::default(), |_| {})
        .await
        .unwrap();

    assert_eq!(report.succeeded, 2);
    assert_eq!(
        fs::read_to_string(out.join("disc2/imaging/xray.txt")).unwrap(),
        "chest film"
    );
}
