//! Spaced-word detection and reassembly.
//!
//! OCR renders some words with spurious spaces between their characters
//! ("T h e", "g a m l a"). Before tokenization, the reassembler finds
//! maximal runs of one- and two-character fragments, splits runs that hide
//! several run-on words, and joins each run into a single token with `_` as
//! the joining marker. The marker is distinct from a plain space so later
//! stages can still strip it; a joiner-marked token that the oracle accepts
//! is emitted without the markers, and one it rejects flows through the
//! correction engine, whose normalization step removes them.
//!
//! A second, lighter pass globs an isolated single letter onto an adjacent
//! long neighbor when the merged form is known but the neighbor alone is
//! not — the usual shape of a single OCR-dropped letter.

use regex::Regex;

use crate::config::{RUN_STRIP_CHARS, RUN_STRIP_PHRASES};
use crate::error::{LexgateError, Result};
use crate::lexicon::oracle::LexicalOracle;
use crate::util::{char_count, is_alphabetic};

/// Marker substituted for the internal spaces of a reassembled word.
pub const JOINER: char = '_';

/// Fragments that are real short words or abbreviations, not letters of a
/// spaced-out word.
const KNOWN_SHORT_FRAGMENTS: &[&str] = &["dr", "in", "KG"];

/// A `(spaced, joined)` rewrite performed on a line.
pub type MergeRecord = (String, String);

/// Finds and joins spaced-out words in raw text.
pub struct SpacedWordReassembler {
    /// Run patterns for every fragment count, longest first.
    run_patterns: Vec<Regex>,
}

impl SpacedWordReassembler {
    /// Create a reassembler detecting runs of up to `max_run_fragments`
    /// interior fragments.
    pub fn new(max_run_fragments: usize) -> Result<Self> {
        let mut run_patterns = Vec::with_capacity(max_run_fragments);
        for n in (1..=max_run_fragments).rev() {
            // a run: one character, n fragments of one or two characters,
            // one character — bounded by space, hyphen, or line boundary
            let pattern =
                format!(r"(?: |^|-|\r|\n)([^ ](?: [^ ][^ ]?){{{n}}} [^ ])(?: |$|-|\r|\n)");
            let regex = Regex::new(&pattern).map_err(|e| {
                LexgateError::analysis(format!("run pattern for {n} fragments: {e}"))
            })?;
            run_patterns.push(regex);
        }
        Ok(SpacedWordReassembler { run_patterns })
    }

    /// Join every detected spaced-word run in `line`. Returns the rewritten
    /// line and the performed merges.
    pub fn reassemble(&self, line: &str) -> (String, Vec<MergeRecord>) {
        let mut found_runs: Vec<String> = Vec::new();
        for pattern in &self.run_patterns {
            for captures in pattern.captures_iter(line) {
                let run = captures[1].trim();
                if run.is_empty() || !Self::is_plausible_run(run) {
                    continue;
                }
                // substring of an already-kept longer run
                if found_runs.iter().any(|prev| prev.contains(run)) {
                    continue;
                }
                found_runs.push(run.to_string());
            }
        }

        let mut pieces: Vec<String> = Vec::new();
        for run in &found_runs {
            pieces.extend(resplit_on_case_transition(run));
        }

        // longest first, so shorter pieces never clobber parts of longer
        // ones
        pieces.sort_by(|a, b| char_count(b).cmp(&char_count(a)));

        let mut text = line.to_string();
        let mut merges = Vec::new();
        for piece in &pieces {
            let joined = format!(" {} ", piece.replace(' ', JOINER.to_string().as_str()));
            text = text.replace(piece.as_str(), &joined);
            merges.push((piece.clone(), joined));
        }
        (text, merges)
    }

    /// Merge an isolated single lowercase letter, `'s`, or joiner-marked
    /// fragment with an adjacent long alphabetic neighbor when the merged
    /// form is known and the neighbor alone is not.
    pub fn glob_stray_fragments(
        &self,
        line: &str,
        oracle: &LexicalOracle,
    ) -> (String, Vec<MergeRecord>) {
        let tokens: Vec<&str> = line.split(' ').collect();
        let mut to_replace: Vec<Vec<String>> = Vec::new();

        for (nr, token) in tokens.iter().enumerate() {
            if !is_stray_fragment(token) {
                continue;
            }

            if nr > 0 {
                let prev = tokens[nr - 1];
                let prev_stripped = prev.replace(JOINER, "");
                if (is_alphabetic(&prev_stripped) && char_count(prev) > 3)
                    || prev.contains(JOINER)
                {
                    let merged = format!("{prev_stripped}{token}");
                    if oracle.is_known(&merged, "") && !oracle.is_known(prev, "") {
                        to_replace.push(vec![prev_stripped.clone(), token.to_string()]);
                    }
                }
            }
            if nr + 1 < tokens.len() {
                let next = tokens[nr + 1];
                let next_stripped = next.replace(JOINER, "");
                if (is_alphabetic(&next_stripped) && char_count(next) > 3)
                    || next.contains(JOINER)
                {
                    let merged = format!("{token}{next_stripped}");
                    if oracle.is_known(&merged, "") && !oracle.is_known(next, "") {
                        to_replace.push(vec![token.to_string(), next_stripped]);
                    }
                }
            }
            // glob in both directions around the fragment
            if nr > 0 && nr + 1 < tokens.len() {
                let next = tokens[nr + 1];
                let next_stripped = next.replace(JOINER, "");
                if is_alphabetic(&next_stripped) || next.contains(JOINER) {
                    let prev_stripped = tokens[nr - 1].replace(JOINER, "");
                    let merged = format!("{prev_stripped}{token}{next_stripped}");
                    if oracle.is_known(&merged, "") && !oracle.is_known(next, "") {
                        to_replace.push(vec![prev_stripped, token.to_string(), next_stripped]);
                    }
                }
            }
        }

        let mut text = line.to_string();
        let mut merges = Vec::new();
        for parts in to_replace {
            let original = parts.join(" ");
            let joined = parts.join(JOINER.to_string().as_str());
            text = text.replace(&original, &joined);
            merges.push((original, joined));
        }
        (text, merges)
    }

    /// A kept run must read as word material: alphabetic after punctuation
    /// cleaning (tolerating hyphens and the 1/l confusion), at most one
    /// internal hyphen, no list markers, and no fragment that is a real
    /// short word.
    fn is_plausible_run(run: &str) -> bool {
        let mut cleaned = run.to_string();
        for phrase in RUN_STRIP_PHRASES {
            cleaned = cleaned.replace(phrase, "");
        }
        let cleaned: String = cleaned
            .chars()
            .filter(|c| !RUN_STRIP_CHARS.contains(c) && *c != '-' && *c != '1')
            .collect();
        if !is_alphabetic(&cleaned) {
            return false;
        }
        if run.contains('=') || run.contains('•') {
            return false;
        }
        if run.matches('-').count() > 1 {
            return false;
        }
        if run
            .split_whitespace()
            .any(|fragment| KNOWN_SHORT_FRAGMENTS.contains(&fragment))
        {
            return false;
        }
        true
    }
}

/// True for the fragment shapes the globbing pass attaches: a bare
/// lowercase letter, a split genitive, or a joiner-marked piece.
fn is_stray_fragment(token: &str) -> bool {
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next())
        && c.is_alphabetic()
        && c.is_lowercase()
    {
        return true;
    }
    token == "'s" || token.contains(JOINER)
}

/// An uppercase letter (excluding the OCR-confusable `I`) following a
/// lowercase one marks the start of a second run-on word, once enough
/// characters have accumulated. A short trailing piece is merged back into
/// the previous one rather than left standalone.
fn resplit_on_case_transition(run: &str) -> Vec<String> {
    let mut pieces: Vec<String> = Vec::new();
    let mut acc = String::new();
    let mut last_lower = false;

    for c in run.chars() {
        if c == ' ' {
            acc.push(c);
        } else if c.is_uppercase() && last_lower && c != 'I' && char_count(&acc) > 5 {
            pieces.push(acc.trim().to_string());
            acc = String::new();
            acc.push(c);
            last_lower = c.is_lowercase();
        } else {
            acc.push(c);
            last_lower = c.is_lowercase();
        }
    }

    if pieces.is_empty() || char_count(&acc) > 5 {
        pieces.push(acc);
    } else if let Some(last) = pieces.last_mut() {
        last.push_str(&acc);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::lexicon::compound::GenericCompound;
    use crate::lexicon::oracle::LexicalOracle;
    use crate::lexicon::word_set::KnownWordSet;

    fn reassembler() -> SpacedWordReassembler {
        SpacedWordReassembler::new(200).unwrap()
    }

    fn oracle(words: &[&str]) -> LexicalOracle {
        LexicalOracle::new(
            Arc::new(KnownWordSet::from_words(words.iter().copied())),
            Box::new(GenericCompound),
            vec![],
        )
    }

    #[test]
    fn test_simple_run_joined() {
        let (text, merges) = reassembler().reassemble("T h e katten");
        assert!(text.contains("T_h_e"));
        assert_eq!(merges.len(), 1);
        assert_eq!(merges[0].0, "T h e");
    }

    #[test]
    fn test_two_character_fragments() {
        let (text, _) = reassembler().reassemble("s ta de n kallades");
        assert!(text.contains("s_ta_de_n"));
    }

    #[test]
    fn test_substring_runs_deduplicated() {
        let (_, merges) = reassembler().reassemble("g a m m a l");
        assert_eq!(merges.len(), 1);
        assert_eq!(merges[0].0, "g a m m a l");
    }

    #[test]
    fn test_case_transition_resplits_run() {
        let (text, merges) = reassembler().reassemble("g a m l a S t a d e n");
        assert!(text.contains("g_a_m_l_a"));
        assert!(text.contains("S_t_a_d_e_n"));
        assert_eq!(merges.len(), 2);
    }

    #[test]
    fn test_short_word_fragments_block_run() {
        // "in" is a real short word, so no run swallowing it survives
        let (text, _) = reassembler().reassemble("s t o r in s j ö");
        assert!(text.contains("s_t_o_r"));
        assert!(!text.contains("in_"));
        assert!(!text.contains("_in"));
    }

    #[test]
    fn test_non_word_runs_ignored() {
        let (text, merges) = reassembler().reassemble("3 4 5 6 7");
        assert_eq!(text, "3 4 5 6 7");
        assert!(merges.is_empty());

        let (text, _) = reassembler().reassemble("a = b = c");
        assert_eq!(text, "a = b = c");
    }

    #[test]
    fn test_double_hyphen_run_rejected() {
        let (text, merges) = reassembler().reassemble("a-b c-d e");
        assert_eq!(text, "a-b c-d e");
        assert!(merges.is_empty());
    }

    #[test]
    fn test_resplit_keeps_short_tail_attached() {
        // the trailing "O r" is too short to stand alone
        let pieces = resplit_on_case_transition("v i n t e r O r");
        assert_eq!(pieces.len(), 1);

        let pieces = resplit_on_case_transition("v i n t e r V å r e n");
        assert_eq!(pieces, vec!["v i n t e r", "V å r e n"]);
    }

    #[test]
    fn test_resplit_ignores_uppercase_i() {
        let pieces = resplit_on_case_transition("v i n t e r I s e n");
        assert_eq!(pieces.len(), 1);
    }

    #[test]
    fn test_glob_previous_neighbor() {
        let oracle = oracle(&["katten"]);
        let (text, merges) = reassembler().glob_stray_fragments("katte n sover", &oracle);
        assert_eq!(text, "katte_n sover");
        assert_eq!(merges.len(), 1);
        assert_eq!(merges[0], ("katte n".to_string(), "katte_n".to_string()));
    }

    #[test]
    fn test_glob_next_neighbor() {
        let oracle = oracle(&["skatten"]);
        let (text, _) = reassembler().glob_stray_fragments("s katten", &oracle);
        assert_eq!(text, "s_katten");
    }

    #[test]
    fn test_glob_leaves_known_neighbors_alone() {
        let oracle = oracle(&["katten", "kattens"]);
        // "katten" is already known, so no glob happens
        let (text, merges) = reassembler().glob_stray_fragments("katten s over", &oracle);
        assert_eq!(text, "katten s over");
        assert!(merges.is_empty());
    }
}
