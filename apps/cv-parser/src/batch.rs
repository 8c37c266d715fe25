//! Batch mode — parse every file in a folder and write one combined JSON file.
//!
//! Documents are independent, so they are parsed on a rayon pool. A failing
//! document is logged and skipped; it never aborts the rest of the batch.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::extraction::{extract_text, ExtractionError};
use crate::models::resume::{ResumeCollection, ResumeRecord};
use crate::parsing::ResumeParser;

#[derive(Debug)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub error: ExtractionError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub collection: ResumeCollection,
    pub failures: Vec<BatchFailure>,
}

/// Regular files directly inside `dir` (no recursion), sorted by path.
pub fn collect_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Parses every path, keeping records in input order.
pub fn parse_documents(parser: &ResumeParser, paths: &[PathBuf]) -> BatchReport {
    let outcomes: Vec<(PathBuf, Result<ResumeRecord, ExtractionError>)> = paths
        .par_iter()
        .map(|path| {
            info!("Processing file: {}", display_name(path));
            let outcome = extract_text(path).map(|text| parser.parse(&text));
            (path.clone(), outcome)
        })
        .collect();

    let mut report = BatchReport::default();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(record) => report.collection.resumes.push(record),
            Err(error) => {
                warn!("Skipping {}: {}", path.display(), error);
                report.failures.push(BatchFailure { path, error });
            }
        }
    }
    report
}

/// Writes `value` as 4-space indented JSON. Non-ASCII text is written as-is.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize resumes")?;

    writer.flush()?;
    Ok(())
}

/// Full batch run: collect, parse (optionally on a sized pool), write.
pub fn run_batch(
    parser: &ResumeParser,
    input: &Path,
    output: &Path,
    workers: Option<usize>,
) -> Result<BatchReport> {
    let paths = collect_documents(input)?;
    info!("Found {} files in {}", paths.len(), input.display());

    let report = match workers {
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .context("Failed to build batch worker pool")?
            .install(|| parse_documents(parser, &paths)),
        None => parse_documents(parser, &paths),
    };

    write_json(output, &report.collection)?;
    info!(
        "All resumes saved to {} ({} parsed, {} failed)",
        output.display(),
        report.collection.resumes.len(),
        report.failures.len()
    );

    Ok(report)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::parsing::name::NameBlocklist;
    use crate::parsing::recognizer::LexiconRecognizer;

    fn parser() -> ResumeParser {
        ResumeParser::new(
            Arc::new(LexiconRecognizer::with_default_lexicon()),
            NameBlocklist::default(),
        )
    }

    #[test]
    fn test_collect_documents_skips_directories_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let paths = collect_documents(dir.path()).unwrap();
        let names: Vec<_> = paths.iter().map(|p| display_name(p)).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_collect_documents_missing_dir_is_error() {
        assert!(collect_documents(Path::new("/nonexistent/cv")).is_err());
    }

    #[test]
    fn test_failure_does_not_abort_batch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "Ім'я: Олена Коваль").unwrap();
        std::fs::write(dir.path().join("b.rtf"), "{\\rtf1}").unwrap();
        std::fs::write(dir.path().join("c.txt"), "ПІБ: Тарас Мельник").unwrap();

        let paths = collect_documents(dir.path()).unwrap();
        let report = parse_documents(&parser(), &paths);

        let names: Vec<_> = report
            .collection
            .resumes
            .iter()
            .map(|r| r.name.as_deref())
            .collect();
        assert_eq!(names, vec![Some("Олена Коваль"), Some("Тарас Мельник")]);
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].error,
            ExtractionError::UnsupportedFormat(_)
        ));
    }

    #[test]
    fn test_run_batch_writes_unescaped_indented_json() {
        let input = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("cv.txt"), "Олена Коваль\nolena@example.com").unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("all_resumes.json");

        let report = run_batch(&parser(), input.path(), &output, Some(2)).unwrap();
        assert_eq!(report.collection.resumes.len(), 1);

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("Олена Коваль"));
        assert!(written.starts_with("{\n    \"resumes\": ["));

        let parsed: ResumeCollection = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.resumes[0].contact_info.email.as_deref(), Some("olena@example.com"));
    }

    #[test]
    fn test_empty_folder_writes_empty_collection() {
        let input = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("out.json");

        run_batch(&parser(), input.path(), &output, None).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({ "resumes": [] }));
    }
}
