//! Command line argument parsing for the Lexgate CLI using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CompoundKind;

/// Lexgate - lexical validation and OCR post-correction for periodical
/// corpora
#[derive(Parser, Debug, Clone)]
#[command(name = "lexgate")]
#[command(about = "Validate and correct OCR-scanned periodical text against curated word lists")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LexgateArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LexgateArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Correct a corpus and write reports
    Run(RunArgs),

    /// Check words against the loaded word lists
    Check(CheckArgs),
}

/// Arguments for a corpus run
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Corpus folder containing one subfolder per batch
    #[arg(value_name = "CORPUS_DIR")]
    pub corpus_dir: PathBuf,

    /// Manifest file naming one word-list file per line
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Folder for the statistics reports
    #[arg(short, long, value_name = "DIR", default_value = "reports")]
    pub report_dir: PathBuf,

    /// Base name of the report files
    #[arg(long, value_name = "NAME", default_value = "report.txt")]
    pub report_name: String,

    /// Folder for the corrected text output (omit to skip writing text)
    #[arg(short, long, value_name = "DIR")]
    pub text_output_dir: Option<PathBuf>,

    /// Compounding morphology
    #[arg(short = 's', long, value_enum)]
    pub compound: Option<CompoundKind>,

    /// Maximum edit distance for approximate candidates (0 disables)
    #[arg(short = 'd', long)]
    pub edit_distance: Option<usize>,

    /// Batch window radius for frequency aggregation
    #[arg(short = 'w', long)]
    pub window_radius: Option<usize>,

    /// Minimum corpus frequency an alphabetic replacement must reach
    #[arg(long)]
    pub min_frequency: Option<u64>,

    /// Error proportion above which a file is flagged in the reports
    #[arg(long)]
    pub error_threshold: Option<f64>,

    /// JSON configuration file (overridden by the flags above)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for checking individual words
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Manifest file naming one word-list file per line
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Words to check
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,

    /// Compounding morphology
    #[arg(short = 's', long, value_enum)]
    pub compound: Option<CompoundKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_command() {
        let args = LexgateArgs::parse_from([
            "lexgate", "run", "corpus", "manifest.txt", "-s", "swedish", "-w", "3",
        ]);
        match args.command {
            Command::Run(run) => {
                assert_eq!(run.corpus_dir, PathBuf::from("corpus"));
                assert_eq!(run.manifest, PathBuf::from("manifest.txt"));
                assert_eq!(run.compound, Some(CompoundKind::Swedish));
                assert_eq!(run.window_radius, Some(3));
                assert_eq!(run.edit_distance, None);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_parse_check_command() {
        let args = LexgateArgs::parse_from(["lexgate", "-v", "check", "manifest.txt", "ordet"]);
        assert_eq!(args.verbosity(), 1);
        match args.command {
            Command::Check(check) => {
                assert_eq!(check.words, vec!["ordet".to_string()]);
            }
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        let args =
            LexgateArgs::parse_from(["lexgate", "-q", "-v", "check", "manifest.txt", "ordet"]);
        assert_eq!(args.verbosity(), 0);
    }
}
