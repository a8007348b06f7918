//! Plain-text report files summarizing a corpus run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ahash::AHashMap;

use crate::corpus::RunSummary;
use crate::error::Result;

/// Write the full report set for a run into `report_dir`:
///
/// - `<base>` — per-file error proportions before correction, with the
///   run-wide not-found listing and the files over the error threshold;
/// - `corrected_<base>` — the same, after correction;
/// - `replacements_made_<base>` — correction pairs by frequency;
/// - `space_replaced_<base>` — space-merge pairs by frequency;
/// - `not_found_<base>` — tokens still unknown after correction.
pub fn write_run_reports(
    report_dir: &Path,
    base_name: &str,
    summary: &RunSummary,
    error_threshold: f64,
) -> Result<()> {
    let mut before = BufWriter::new(File::create(report_dir.join(base_name))?);
    let mut after = BufWriter::new(File::create(
        report_dir.join(format!("corrected_{base_name}")),
    )?);

    for outcome in &summary.outcomes {
        writeln!(before, "\n------{}------", outcome.file_name)?;
        writeln!(after, "\n------{}------", outcome.file_name)?;
        if outcome.report.is_empty() {
            writeln!(before, "EMPTY")?;
            writeln!(after, "EMPTY")?;
            continue;
        }

        writeln!(
            before,
            "Error proportion:\t{}",
            outcome.report.error_proportion_before
        )?;
        writeln!(before, "Nr of words:\t{}", outcome.report.word_count)?;
        for (count, token) in sorted_by_count(&outcome.report.not_found_before) {
            writeln!(before, "{token}\t{count}")?;
        }

        writeln!(
            after,
            "Error proportion:\t{}",
            outcome.report.error_proportion_after
        )?;
        writeln!(after, "Nr of words:\t{}", outcome.report.word_count)?;
        for (count, token) in sorted_by_count(&outcome.report.not_found_after) {
            writeln!(after, "{token}\t{count}")?;
        }
    }

    write_not_found_listing(&mut before, &summary.stats.not_found)?;
    write_over_threshold(&mut before, summary, error_threshold, false)?;
    write_over_threshold(&mut after, summary, error_threshold, true)?;

    let mut replacements = BufWriter::new(File::create(
        report_dir.join(format!("replacements_made_{base_name}")),
    )?);
    write_pair_listing(&mut replacements, "Replacements made", &summary.stats.corrections)?;

    let mut merges = BufWriter::new(File::create(
        report_dir.join(format!("space_replaced_{base_name}")),
    )?);
    write_pair_listing(&mut merges, "Space replaced", &summary.stats.space_merges)?;

    let mut still_unknown = BufWriter::new(File::create(
        report_dir.join(format!("not_found_{base_name}")),
    )?);
    write_not_found_listing(&mut still_unknown, &summary.stats.not_found_after)?;

    Ok(())
}

/// Tokens seen more than once, grouped under descending count headers.
fn write_not_found_listing<W: Write>(out: &mut W, counts: &AHashMap<String, u64>) -> Result<()> {
    writeln!(out, "\nNr of unique not found: \t{}\t", counts.len())?;
    writeln!(out, "Not found freq > 1")?;
    writeln!(out, "==================================")?;

    let mut previous = u64::MAX;
    for (count, token) in sorted_by_count(counts).into_iter().filter(|(c, _)| *c > 1) {
        if count < previous {
            writeln!(out, "\n{count}")?;
            previous = count;
        }
        writeln!(out, "{token}")?;
    }
    Ok(())
}

/// Files whose error proportion exceeds the threshold, worst first.
fn write_over_threshold<W: Write>(
    out: &mut W,
    summary: &RunSummary,
    threshold: f64,
    after: bool,
) -> Result<()> {
    writeln!(out, "\n Error proportion over threshold")?;
    writeln!(out, "==================================")?;
    writeln!(out, "Proportion\tFile name\tNr of words")?;

    let mut rows: Vec<(f64, &str, usize)> = summary
        .outcomes
        .iter()
        .map(|o| {
            let proportion = if after {
                o.report.error_proportion_after
            } else {
                o.report.error_proportion_before
            };
            (proportion, o.file_name.as_str(), o.report.word_count)
        })
        .collect();
    rows.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    for (proportion, file_name, word_count) in rows {
        if word_count == 0 {
            writeln!(out, "EMPTY\t{file_name}")?;
        } else if proportion > threshold {
            writeln!(
                out,
                "{:.2}\t{file_name}\t{word_count}",
                proportion
            )?;
        }
    }
    Ok(())
}

/// Pair counts, grouped under descending count headers.
fn write_pair_listing<W: Write>(
    out: &mut W,
    title: &str,
    pairs: &AHashMap<(String, String), u64>,
) -> Result<()> {
    writeln!(out, "\n{title}")?;
    writeln!(out, "==================================")?;

    let mut rows: Vec<(u64, &(String, String))> =
        pairs.iter().map(|(pair, count)| (*count, pair)).collect();
    rows.sort_by(|a, b| b.cmp(a));

    let mut previous = u64::MAX;
    for (count, (original, replacement)) in rows {
        if count < previous {
            writeln!(out, "\n{count}")?;
            writeln!(out, "-----")?;
            previous = count;
        }
        writeln!(out, "{original}\t{replacement}")?;
    }
    Ok(())
}

/// `(count, token)` pairs, highest count first, ties broken by token in
/// reverse lexical order so equal runs print deterministically.
fn sorted_by_count(counts: &AHashMap<String, u64>) -> Vec<(u64, &str)> {
    let mut rows: Vec<(u64, &str)> = counts
        .iter()
        .map(|(token, count)| (*count, token.as_str()))
        .collect();
    rows.sort_by(|a, b| b.cmp(a));
    rows
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::corpus::FileOutcome;
    use crate::document::{CorrectionStats, DocumentReport};

    fn summary() -> RunSummary {
        let mut stats = CorrectionStats::new();
        stats.record_not_found("qqq");
        stats.record_not_found("qqq");
        stats.record_not_found("zzz");
        stats.record_not_found_after("zzz");
        stats.record_correction("qqq", "qq");
        stats.record_space_merge(("t h e".to_string(), " t_h_e ".to_string()));

        let mut report = DocumentReport::empty();
        report.word_count = 10;
        report.error_proportion_before = 0.3;
        report.error_proportion_after = 0.1;
        report.not_found_before.insert("qqq".to_string(), 2);
        report.not_found_after.insert("zzz".to_string(), 1);

        RunSummary {
            outcomes: vec![
                FileOutcome {
                    batch: "1903".to_string(),
                    file_name: "vol1.txt".to_string(),
                    report,
                },
                FileOutcome {
                    batch: "1903".to_string(),
                    file_name: "vol2.txt".to_string(),
                    report: DocumentReport::empty(),
                },
            ],
            stats,
        }
    }

    #[test]
    fn test_report_files_written() {
        let dir = TempDir::new().unwrap();
        write_run_reports(dir.path(), "report.txt", &summary(), 0.05).unwrap();

        for name in [
            "report.txt",
            "corrected_report.txt",
            "replacements_made_report.txt",
            "space_replaced_report.txt",
            "not_found_report.txt",
        ] {
            assert!(dir.path().join(name).exists(), "{name} missing");
        }

        let before = fs::read_to_string(dir.path().join("report.txt")).unwrap();
        assert!(before.contains("------vol1.txt------"));
        assert!(before.contains("Error proportion:\t0.3"));
        assert!(before.contains("qqq\t2"));
        assert!(before.contains("EMPTY"));
        // 0.3 exceeds the 0.05 threshold
        assert!(before.contains("0.30\tvol1.txt\t10"));

        let replacements =
            fs::read_to_string(dir.path().join("replacements_made_report.txt")).unwrap();
        assert!(replacements.contains("qqq\tqq"));
    }

    #[test]
    fn test_not_found_listing_groups_by_count() {
        let mut counts = AHashMap::new();
        counts.insert("aaa".to_string(), 3);
        counts.insert("bbb".to_string(), 3);
        counts.insert("once".to_string(), 1);

        let mut out = Vec::new();
        write_not_found_listing(&mut out, &counts).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Nr of unique not found: \t3"));
        assert!(text.contains("\n3\n"));
        assert!(text.contains("aaa"));
        assert!(text.contains("bbb"));
        // singletons are left out of the listing
        assert!(!text.contains("once"));
    }
}
