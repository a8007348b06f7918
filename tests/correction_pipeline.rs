//! Integration tests for the full correction pipeline: word-list loading,
//! corpus traversal, windowed frequencies, correction, and reporting.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tempfile::TempDir;

use lexgate::config::{CompoundKind, CorrectorConfig};
use lexgate::corpus::report::write_run_reports;
use lexgate::corpus::CorpusRunner;
use lexgate::document::{CorrectionStats, DocumentCorrector};
use lexgate::frequency::FrequencyTable;
use lexgate::lexicon::KnownWordSet;

fn write_file(path: &Path, content: &str) {
    let mut file = File::create(path).unwrap();
    write!(file, "{content}").unwrap();
}

fn corpus_fixture() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();

    let list_path = dir.path().join("words.txt");
    write_file(&list_path, "the\ncat\nsat\nthere\nkatten\nsover\n");
    let manifest = dir.path().join("manifest.txt");
    write_file(&manifest, &format!("{}\n", list_path.display()));

    let corpus = dir.path().join("corpus");
    fs::create_dir(&corpus).unwrap();
    for (batch, content) in [
        ("1903", "There katten sover\nThcrc cat\n"),
        ("1904", "There katten\nthe cat sat\n"),
        ("1905", "There sover\nt h e cat sat\n"),
    ] {
        let batch_dir = corpus.join(batch);
        fs::create_dir(&batch_dir).unwrap();
        write_file(&batch_dir.join("vol1.txt"), content);
    }

    (dir, corpus)
}

#[test]
fn test_end_to_end_corpus_run() {
    let (dir, corpus) = corpus_fixture();
    let text_out = dir.path().join("corrected");
    let report_dir = dir.path().join("reports");
    fs::create_dir(&report_dir).unwrap();

    let config = CorrectorConfig::default();
    let words = KnownWordSet::load(dir.path().join("manifest.txt"), &[]).unwrap();
    let corrector = DocumentCorrector::new(&config, words).unwrap();
    let runner = CorpusRunner::new(corrector, &config);

    let summary = runner.run(&corpus, Some(&text_out)).unwrap();
    assert_eq!(summary.outcomes.len(), 3);

    // the glyph error in 1903 is fixed against the windowed frequencies
    let corrected = fs::read_to_string(text_out.join("1903/vol1.txt")).unwrap();
    assert!(corrected.contains("There cat"));
    assert!(!corrected.contains("Thcrc"));

    // the spaced word in 1905 is reassembled
    let corrected = fs::read_to_string(text_out.join("1905/vol1.txt")).unwrap();
    assert!(corrected.contains("the cat sat"));

    // reports land on disk
    write_run_reports(&report_dir, "report.txt", &summary, 0.05).unwrap();
    assert!(report_dir.join("report.txt").exists());
    assert!(report_dir.join("corrected_report.txt").exists());
    assert!(report_dir.join("replacements_made_report.txt").exists());
    assert!(report_dir.join("space_replaced_report.txt").exists());
    assert!(report_dir.join("not_found_report.txt").exists());

    let replacements =
        fs::read_to_string(report_dir.join("replacements_made_report.txt")).unwrap();
    assert!(replacements.contains("Thcrc\tThere"));
}

#[test]
fn test_error_proportions_per_document() {
    let config = CorrectorConfig::default();
    let words = KnownWordSet::from_words(["there", "cat"]);
    let corrector = DocumentCorrector::new(&config, words).unwrap();

    let freq = FrequencyTable::from_counts([("There", 3), ("cat", 7)]);
    let mut stats = CorrectionStats::new();
    let report = corrector.correct_document("Thcrc cat", &freq, &mut stats);

    assert_eq!(report.corrected_text, "There cat");
    assert_eq!(report.word_count, 2);
    assert_eq!(report.error_proportion_before, 0.5);
    assert_eq!(report.error_proportion_after, 0.0);
}

#[test]
fn test_missing_word_list_aborts_run() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("manifest.txt");
    write_file(&manifest, "/no/such/list.txt\n");
    assert!(KnownWordSet::load(&manifest, &[]).is_err());
}

#[test]
fn test_compound_strategy_selection_is_observable() {
    let words = ["kyrka", "gården", "tornet"];

    let mut config = CorrectorConfig::default();
    config.compound = CompoundKind::Generic;
    let generic =
        DocumentCorrector::new(&config, KnownWordSet::from_words(words)).unwrap();

    config.compound = CompoundKind::Swedish;
    let swedish =
        DocumentCorrector::new(&config, KnownWordSet::from_words(words)).unwrap();

    let freq = FrequencyTable::new();
    let mut stats = CorrectionStats::new();

    let report = generic.correct_document("kyrkogården", &freq, &mut stats);
    assert_eq!(report.error_proportion_before, 1.0);

    let report = swedish.correct_document("kyrkogården", &freq, &mut stats);
    assert_eq!(report.error_proportion_before, 0.0);
}

#[test]
fn test_corrections_never_fire_below_frequency_floor() {
    let mut config = CorrectorConfig::default();
    config.min_replacement_frequency = 10;
    let words = KnownWordSet::from_words(["there"]);
    let corrector = DocumentCorrector::new(&config, words).unwrap();

    // attested, beats the token, but under the floor of 10
    let freq = FrequencyTable::from_counts([("There", 5)]);
    let mut stats = CorrectionStats::new();
    let report = corrector.correct_document("Thcrc", &freq, &mut stats);

    assert!(report.corrected_text.contains("Thcrc"));
    assert_eq!(report.error_proportion_after, 1.0);
}
