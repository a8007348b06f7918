//! Command implementations for the Lexgate CLI.

use std::fs;
use std::sync::Arc;

use crate::cli::args::*;
use crate::config::CorrectorConfig;
use crate::corpus::report::write_run_reports;
use crate::corpus::CorpusRunner;
use crate::document::DocumentCorrector;
use crate::error::Result;
use crate::lexicon::oracle::LexicalOracle;
use crate::lexicon::word_set::KnownWordSet;

/// Execute a CLI command.
pub fn execute_command(args: LexgateArgs) -> Result<()> {
    match &args.command {
        Command::Run(run_args) => run_corpus(run_args.clone(), &args),
        Command::Check(check_args) => check_words(check_args.clone(), &args),
    }
}

/// Assemble the effective configuration from an optional JSON file and the
/// command line flags (flags win).
fn effective_config(args: &RunArgs) -> Result<CorrectorConfig> {
    let mut config = match &args.config {
        Some(path) => CorrectorConfig::load_from_file(path)?,
        None => CorrectorConfig::default(),
    };
    if let Some(compound) = args.compound {
        config.compound = compound;
    }
    if let Some(distance) = args.edit_distance {
        config.edit_distance = distance;
    }
    if let Some(radius) = args.window_radius {
        config.window_radius = radius;
    }
    if let Some(min_frequency) = args.min_frequency {
        config.min_replacement_frequency = min_frequency;
    }
    if let Some(threshold) = args.error_threshold {
        config.okay_error_proportion = threshold;
    }
    Ok(config)
}

/// Correct a corpus and write the report files.
fn run_corpus(args: RunArgs, cli_args: &LexgateArgs) -> Result<()> {
    let config = effective_config(&args)?;

    let words = KnownWordSet::load(&args.manifest, &config.exclude_from_lexicon)?;
    if cli_args.verbosity() > 0 {
        println!("Loaded {} word forms", words.len());
    }

    let corrector = DocumentCorrector::new(&config, words)?;
    let runner = CorpusRunner::new(corrector, &config);
    let summary = runner.run(&args.corpus_dir, args.text_output_dir.as_deref())?;

    fs::create_dir_all(&args.report_dir)?;
    write_run_reports(
        &args.report_dir,
        &args.report_name,
        &summary,
        config.okay_error_proportion,
    )?;

    if cli_args.verbosity() > 0 {
        let files = summary.outcomes.len();
        let corrections: u64 = summary.stats.corrections.values().sum();
        let unknown: u64 = summary.stats.not_found.values().sum();
        let still_unknown: u64 = summary.stats.not_found_after.values().sum();
        println!("Processed {files} files");
        println!("Unknown tokens: {unknown} before, {still_unknown} after correction");
        println!("Corrections made: {corrections}");
        println!("Reports written to: {}", args.report_dir.display());
    }

    Ok(())
}

/// Check individual words against the loaded word lists.
fn check_words(args: CheckArgs, cli_args: &LexgateArgs) -> Result<()> {
    let config = CorrectorConfig::default();
    let words = KnownWordSet::load(&args.manifest, &config.exclude_from_lexicon)?;
    if cli_args.verbosity() > 1 {
        println!("Loaded {} word forms", words.len());
    }

    let compound = args.compound.unwrap_or(config.compound);
    let oracle = LexicalOracle::new(
        Arc::new(words),
        compound.strategy(),
        config.single_letter_words.clone(),
    );

    for word in &args.words {
        let verdict = if oracle.is_known(word, "") {
            "known"
        } else {
            "unknown"
        };
        println!("{word}\t{verdict}");
    }

    Ok(())
}
