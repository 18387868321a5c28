//! Batch processing of PDF directories.
//!
//! Every `*.pdf` file in an input directory is processed in parallel and its
//! [`StructureResult`] written next to the others as `<stem>.json`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::model::StructureResult;
use crate::parser::ExtractOptions;
use crate::render::{write_json, JsonFormat};

/// Default input directory for batch runs.
pub const DEFAULT_INPUT_DIR: &str = "/app/input";

/// Default output directory for batch runs.
pub const DEFAULT_OUTPUT_DIR: &str = "/app/output";

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Structure extracted and written
    Extracted {
        /// Number of outline entries
        headings: usize,
    },
    /// Extraction failed; the error result was written
    Failed(String),
    /// The output file could not be written
    WriteFailed(String),
}

/// Result for a single input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: BatchOutcome,
}

impl BatchEntry {
    /// Whether the structure was extracted and written.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, BatchOutcome::Extracted { .. })
    }
}

/// Outcome of a batch run, in input file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    /// Number of files processed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no files were found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of files whose structure was extracted and written.
    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.is_success()).count()
    }

    /// Number of files that failed extraction or writing.
    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }
}

/// List the PDF files in a directory, sorted by name.
///
/// Matches the `.pdf` extension case-insensitively. Subdirectories are not
/// searched.
pub fn find_pdfs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Output path for an input file: `<output_dir>/<stem>.json`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{}.json", stem))
}

/// Processes directories of PDFs.
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    options: ExtractOptions,
}

impl BatchProcessor {
    /// Create a processor with the given extraction options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Process every PDF in `input_dir`, writing results to `output_dir`.
    pub fn run<P, Q>(&self, input_dir: P, output_dir: Q) -> Result<BatchReport>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        self.run_with_progress(input_dir, output_dir, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_done` as each file finishes.
    ///
    /// `on_done` is called from worker threads, in completion order.
    pub fn run_with_progress<P, Q, F>(
        &self,
        input_dir: P,
        output_dir: Q,
        on_done: F,
    ) -> Result<BatchReport>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        F: Fn(&BatchEntry) + Sync + Send,
    {
        let input_dir = input_dir.as_ref();
        let output_dir = output_dir.as_ref();

        let files = find_pdfs(input_dir)?;
        fs::create_dir_all(output_dir)?;
        log::info!(
            "Found {} PDF file(s) in {}",
            files.len(),
            input_dir.display()
        );

        let entries = files
            .par_iter()
            .map(|input| {
                let entry = self.process_file(input, output_dir);
                on_done(&entry);
                entry
            })
            .collect();

        Ok(BatchReport { entries })
    }

    /// Extract one file and write its result.
    pub fn process_file(&self, input: &Path, output_dir: &Path) -> BatchEntry {
        let output = output_path_for(input, output_dir);
        log::info!("Processing {}", input.display());

        let result = crate::structure_result(input, &self.options);
        let outcome = match write_result(&output, &result) {
            Err(e) => {
                log::warn!("Error saving JSON for {}: {}", input.display(), e);
                BatchOutcome::WriteFailed(e.to_string())
            }
            Ok(()) => match &result {
                StructureResult::Structure(s) => BatchOutcome::Extracted {
                    headings: s.outline.len(),
                },
                StructureResult::Failure { error } => BatchOutcome::Failed(error.clone()),
            },
        };

        BatchEntry {
            input: input.to_path_buf(),
            output,
            outcome,
        }
    }
}

fn write_result(path: &Path, result: &StructureResult) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(&mut writer, result, JsonFormat::Pretty)?;
    writer.flush()?;
    Ok(())
}
