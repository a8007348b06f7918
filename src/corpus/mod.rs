//! Corpus traversal and batch-oriented processing.
//!
//! A corpus is a folder of subfolders, one per temporally ordered batch
//! (typically a publication year or volume), each holding plain UTF-8 text
//! files. Files and folders are processed in lexical order. Documents
//! within a batch are independent, so they are corrected in parallel and
//! the per-worker statistics merged afterwards.

pub mod report;

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use rayon::prelude::*;

use crate::analysis::tokenizer::{PeriodicalTokenizer, Tokenizer};
use crate::config::CorrectorConfig;
use crate::document::{CorrectionStats, DocumentCorrector, DocumentReport};
use crate::error::{LexgateError, Result};
use crate::frequency::table::FrequencyTable;
use crate::frequency::window::combine_window;
use crate::util::strip_bom;

/// The outcome of correcting one corpus file.
#[derive(Debug)]
pub struct FileOutcome {
    /// Name of the batch folder the file came from.
    pub batch: String,
    /// File name within the batch.
    pub file_name: String,
    /// The document report.
    pub report: DocumentReport,
}

/// Everything a corpus run produces, ready for reporting.
#[derive(Debug)]
pub struct RunSummary {
    /// Per-file outcomes, in corpus order.
    pub outcomes: Vec<FileOutcome>,
    /// Run-wide accumulators.
    pub stats: CorrectionStats,
}

/// The ordered batch folders of a corpus. A missing corpus folder or one
/// without subfolders is a fatal configuration problem.
pub fn discover_batches(corpus_dir: &Path) -> Result<Vec<PathBuf>> {
    if !corpus_dir.exists() {
        return Err(LexgateError::corpus(format!(
            "corpus folder {} does not exist",
            corpus_dir.display()
        )));
    }

    let mut batches: Vec<PathBuf> = fs::read_dir(corpus_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    batches.sort();

    if batches.is_empty() {
        return Err(LexgateError::corpus(format!(
            "no batch subfolders found in {}",
            corpus_dir.display()
        )));
    }
    Ok(batches)
}

/// The ordered `*.txt` files of a batch folder.
pub fn batch_files(batch_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(batch_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == "txt")
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Read a corpus file as UTF-8, tolerating a byte-order marker.
pub fn read_text_file(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)?;
    Ok(strip_bom(&content).to_string())
}

/// Count every token of every file in a batch folder. These raw tables are
/// built from the unprocessed text, before any correction.
pub fn build_frequency_table(
    batch_dir: &Path,
    tokenizer: &dyn Tokenizer,
) -> Result<FrequencyTable> {
    let mut table = FrequencyTable::new();
    for file in batch_files(batch_dir)? {
        let content = read_text_file(&file)?.replace('\r', "\n");
        for line in content.split('\n') {
            for token in tokenizer.tokenize(line) {
                table.add(&token);
            }
        }
    }
    Ok(table)
}

/// Drives a correction run over an entire corpus.
pub struct CorpusRunner {
    corrector: DocumentCorrector,
    window_radius: usize,
}

impl CorpusRunner {
    /// Create a runner.
    pub fn new(corrector: DocumentCorrector, config: &CorrectorConfig) -> Self {
        CorpusRunner {
            corrector,
            window_radius: config.window_radius,
        }
    }

    /// Process every batch of the corpus. When `text_output_dir` is given,
    /// corrected documents are written into a mirrored folder tree.
    pub fn run(&self, corpus_dir: &Path, text_output_dir: Option<&Path>) -> Result<RunSummary> {
        let batches = discover_batches(corpus_dir)?;
        info!("{} batches found in {}", batches.len(), corpus_dir.display());

        // one pass over the raw text to gather per-batch frequencies
        let tokenizer = PeriodicalTokenizer::new();
        let tables: Vec<FrequencyTable> = batches
            .par_iter()
            .map(|batch| build_frequency_table(batch, &tokenizer))
            .collect::<Result<Vec<_>>>()?;

        let mut outcomes = Vec::new();
        let mut stats = CorrectionStats::new();

        for (index, batch_dir) in batches.iter().enumerate() {
            let batch_name = batch_dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            info!("processing batch {batch_name}");

            let window = combine_window(&tables, index, self.window_radius);

            let out_dir = match text_output_dir {
                Some(root) => {
                    let dir = root.join(&batch_name);
                    fs::create_dir_all(&dir)?;
                    Some(dir)
                }
                None => None,
            };

            let files = batch_files(batch_dir)?;
            let results: Vec<(String, DocumentReport, CorrectionStats)> = files
                .par_iter()
                .map(|file| -> Result<(String, DocumentReport, CorrectionStats)> {
                    let content = read_text_file(file)?;
                    let mut local = CorrectionStats::new();
                    let report = self.corrector.correct_document(&content, &window, &mut local);
                    let file_name = file
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default();
                    if let Some(dir) = &out_dir {
                        fs::write(dir.join(&file_name), &report.corrected_text)?;
                    }
                    Ok((file_name, report, local))
                })
                .collect::<Result<Vec<_>>>()?;

            for (file_name, report, local) in results {
                stats.merge(local);
                outcomes.push(FileOutcome {
                    batch: batch_name.clone(),
                    file_name,
                    report,
                });
            }
        }

        Ok(RunSummary { outcomes, stats })
    }
}
