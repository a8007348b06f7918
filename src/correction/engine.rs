//! The candidate-correction search.
//!
//! Given a token the oracle rejected, [`CorrectionEngine::suggest_replacement`]
//! runs an ordered cascade of repair strategies, pooling every candidate
//! that is both lexically valid and frequent enough in the corpus window.
//! A correction is returned only when exactly one candidate survives —
//! ambiguity means "do not guess", which keeps precision ahead of recall.
//!
//! A risky (alphabetic) candidate must beat the broken token's own corpus
//! frequency strictly and reach a configured absolute floor. A token never
//! seen in the corpus has frequency zero, so any attested candidate clears
//! the first bar — OCR garbage is rare in-corpus, attested spellings are
//! not. Purely mechanical repairs (re-spaced punctuation, restored
//! abbreviation periods) are exempt from the floor.

use log::debug;

use crate::config::{DIVIDERS, ReplacerRule};
use crate::correction::levenshtein::edit_distance_within;
use crate::correction::suggest::Suggester;
use crate::frequency::table::FrequencyTable;
use crate::lexicon::oracle::LexicalOracle;
use crate::util::{char_count, is_all_lower, is_all_upper, is_numeric};

/// Repairs recurse into sub-token repairs (across hyphens, leading
/// numerals, glyph normalization). The size floors on every recursion
/// already force termination; the depth cap is a backstop.
const MAX_RECURSION_DEPTH: usize = 8;

/// Searches for replacements for unrecognized tokens.
pub struct CorrectionEngine {
    replacers: Vec<ReplacerRule>,
    alphabet: Vec<char>,
    suggester: Box<dyn Suggester>,
    edit_distance: usize,
    min_replacement_frequency: u64,
}

impl CorrectionEngine {
    /// Create an engine.
    pub fn new(
        replacers: Vec<ReplacerRule>,
        alphabet: Vec<char>,
        suggester: Box<dyn Suggester>,
        edit_distance: usize,
        min_replacement_frequency: u64,
    ) -> Self {
        CorrectionEngine {
            replacers,
            alphabet,
            suggester,
            edit_distance,
            min_replacement_frequency,
        }
    }

    /// Search for a replacement for `token`. Returns `None` when no
    /// strategy produces a candidate that survives reduction and the
    /// frequency gate, or when more than one does.
    pub fn suggest_replacement(
        &self,
        token: &str,
        next_token: &str,
        oracle: &LexicalOracle,
        freq: &FrequencyTable,
    ) -> Option<String> {
        self.suggest_at_depth(token, next_token, oracle, freq, 0)
    }

    fn suggest_at_depth(
        &self,
        token: &str,
        next_token: &str,
        oracle: &LexicalOracle,
        freq: &FrequencyTable,
        depth: usize,
    ) -> Option<String> {
        if depth >= MAX_RECURSION_DEPTH {
            return None;
        }

        // Double names and similar constructs with two hyphens: if one end
        // segment is already valid, repair the rest on its own.
        let chars: Vec<char> = token.chars().collect();
        if chars.len() > 10 {
            let interior: String = chars[4..chars.len() - 1].iter().collect();
            if interior.matches('-').count() == 2 && !is_all_lower(&interior) {
                let parts: Vec<&str> = token.split('-').collect();
                if parts.len() >= 3 {
                    if oracle.is_known(parts[0], next_token) {
                        let rest = format!("{}-{}", parts[1], parts[2]);
                        if let Some(fixed) =
                            self.suggest_at_depth(&rest, next_token, oracle, freq, depth + 1)
                        {
                            return Some(format!("{}-{fixed}", parts[0]));
                        }
                    }
                    if oracle.is_known(parts[2], next_token) {
                        let rest = format!("{}-{}", parts[0], parts[1]);
                        if let Some(fixed) =
                            self.suggest_at_depth(&rest, next_token, oracle, freq, depth + 1)
                        {
                            return Some(format!("{fixed}-{}", parts[2]));
                        }
                    }
                }
            }
        }

        // Stray underscores and hyphens are dropped without ceremony; if
        // that alone yields a known word there is no risky guess to gate.
        let normalized = token.replace(['_', '-'], "");
        if oracle.is_known(&normalized, next_token) {
            return Some(normalized);
        }

        let word = token;

        // Not worth guessing: short all-caps tokens (often mangled
        // headings), very short tokens, and short hyphenated forms like
        // "u-land" that are usually legitimate.
        if is_all_upper(word) && char_count(&word.replace('.', "")) < 7 {
            return None;
        }
        if char_count(word) < 4 {
            return None;
        }
        if word.chars().nth(1) == Some('-') {
            return None;
        }

        let raw_freq = if freq.contains(word) {
            freq.count(word)
        } else {
            freq.count(&word.replace('_', ""))
        };

        let mut candidates: Vec<String> = Vec::new();

        // A divider glued onto a word: strip it for the lookup, re-space it
        // in the replacement.
        for divider in DIVIDERS {
            let core = word.trim_matches(|c: char| divider.contains(c));
            if oracle.is_known(core, next_token) && self.frequent_enough(raw_freq, freq, core) {
                candidates.push(word.replace(divider, &format!(" {divider} ")));
            }
        }

        // Page or section numbering glued in front: "327.word".
        let dot_parts: Vec<&str> = word.split('.').collect();
        if dot_parts.len() == 2 && is_numeric(dot_parts[0]) {
            if let Some(rest) = self.suggest_at_depth(dot_parts[1], "", oracle, freq, depth + 1)
                && self.frequent_enough(raw_freq, freq, &rest)
            {
                candidates.push(format!("{} . {rest}", dot_parts[0]));
            }
        }

        // One glyph-substitution rule at a time.
        for rule in &self.replacers {
            let suggestion = word.replace(&rule.pattern, &rule.replacement);
            if oracle.is_known(&suggestion, next_token)
                && self.frequent_enough(raw_freq, freq, &suggestion)
            {
                candidates.push(suggestion);
            }
        }

        // A single letter dropped at either end.
        if char_count(word) > 3 && !word.contains('-') {
            for &letter in &self.alphabet {
                for suggestion in [format!("{word}{letter}"), format!("{letter}{word}")] {
                    if oracle.is_known(&suggestion, "")
                        && self.frequent_enough(raw_freq, freq, &suggestion)
                    {
                        candidates.push(suggestion);
                    }
                }
            }
        }

        // The approximate-candidate source. Skipped for punctuated, long,
        // or digit-bearing tokens, where edit expansion is slow and wrong.
        if self.edit_distance > 0
            && !word.contains(['-', '_', '.'])
            && char_count(word) < 15
            && !word.chars().any(|c| c.is_ascii_digit())
        {
            let capital_required = word.chars().next().is_some_and(char::is_uppercase);
            for candidate in self.suggester.candidates(word) {
                if oracle.is_known(&candidate, next_token)
                    && edit_distance_within(&candidate, word, self.edit_distance).is_some()
                    && (!capital_required
                        || candidate.chars().next().is_some_and(char::is_uppercase))
                    && self.frequent_enough(raw_freq, freq, &candidate)
                {
                    candidates.push(candidate);
                }
            }
        }

        // Broken compounds: normalize the k-k digraph and drop
        // hyphens/periods, then repair the compact form.
        if (word.contains("k-k") || word.contains('-') || word.contains('.'))
            && !word.ends_with('-')
            && !word.ends_with('.')
        {
            let compact = word.replace("k-k", "ck").replace(['-', '.'], "");
            if let Some(fixed) = self.suggest_at_depth(&compact, "-", oracle, freq, depth + 1) {
                candidates.push(fixed);
            }
        }

        // Only when nothing was found: drop one hyphen at a time.
        if candidates.is_empty() && crate::util::drop_last_char(word).contains('-') {
            for (idx, c) in word.char_indices() {
                if c == '-' {
                    let removed = format!("{}{}", &word[..idx], &word[idx + 1..]);
                    if oracle.is_known(&removed, "-")
                        && self.frequent_enough(raw_freq, freq, &removed)
                    {
                        candidates.push(removed);
                    }
                }
            }
        }

        // Still nothing: repair the hyphen segments one by one.
        if candidates.is_empty() && word.contains('-') {
            let mut rebuilt: Vec<String> = Vec::new();
            let mut all_found = true;
            for part in word.split('-') {
                if char_count(part) < 5 {
                    all_found = false;
                } else if oracle.is_known(part, "") {
                    rebuilt.push(part.to_string());
                } else if let Some(fixed) =
                    self.suggest_at_depth(part, "-", oracle, freq, depth + 1)
                {
                    rebuilt.push(fixed);
                } else {
                    all_found = false;
                }
            }
            if all_found {
                let joined = rebuilt.join("-");
                if joined != word {
                    candidates.push(joined);
                }
            }
        }

        // Still nothing: an abbreviation whose period was tokenized away.
        if candidates.is_empty()
            && !word.contains('-')
            && !word.contains('/')
            && next_token != "-"
        {
            let dotted = format!("{word}.");
            if oracle.is_known(&dotted, next_token)
                && self.frequent_enough(raw_freq, freq, &dotted)
            {
                candidates.push(dotted);
            }
        }

        let mut final_candidates = reduce_candidates(&candidates);

        // exactly one surviving candidate, or no correction at all
        if let Some(winner) = final_candidates.pop()
            && final_candidates.is_empty()
        {
            let alphabetic = !winner.is_empty() && winner.chars().all(char::is_alphabetic);
            if !alphabetic {
                debug!("correcting {word:?} -> {winner:?} (mechanical repair)");
                return Some(winner);
            }
            if self.frequent_enough(raw_freq, freq, &winner)
                && freq.count(&winner) >= self.min_replacement_frequency
            {
                debug!(
                    "correcting {word:?} -> {winner:?} (frequency {} > {raw_freq})",
                    freq.count(&winner)
                );
                return Some(winner);
            }
        }

        None
    }

    /// The suggestion must be attested in the window more often than the
    /// broken token itself. Strict comparison: a never-seen token is beaten
    /// by any attested suggestion.
    fn frequent_enough(&self, raw_freq: u64, freq: &FrequencyTable, suggestion: &str) -> bool {
        freq.count(suggestion) > raw_freq
    }
}

/// Deduplicate the pool, then drop every candidate whose divider-stripped
/// twin is also present — when both "f.d." and "fd" were proposed, only the
/// clean form stays in play.
fn reduce_candidates(candidates: &[String]) -> Vec<String> {
    let mut seen: Vec<&str> = Vec::new();
    let mut reduced: Vec<String> = Vec::new();

    for candidate in candidates {
        if seen.contains(&candidate.as_str()) {
            continue;
        }
        let mut clean_twin_exists = false;
        for divider in DIVIDERS.iter().copied().chain(std::iter::once("-")) {
            if candidate.contains(divider) {
                let without = candidate.replace(divider, "").replace(' ', "");
                if candidates.iter().any(|c| *c == without) {
                    clean_twin_exists = true;
                }
            }
        }
        if !clean_twin_exists {
            reduced.push(candidate.clone());
            seen.push(candidate.as_str());
        }
    }

    reduced
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::{ALPHABET, default_replacers};
    use crate::correction::suggest::EditSuggester;
    use crate::lexicon::compound::GenericCompound;
    use crate::lexicon::word_set::KnownWordSet;

    fn fixtures(words: &[&str], distance: usize) -> (LexicalOracle, CorrectionEngine) {
        let set = Arc::new(KnownWordSet::from_words(words.iter().copied()));
        let oracle = LexicalOracle::new(
            set.clone(),
            Box::new(GenericCompound),
            vec!["m".to_string(), "g".to_string(), "a".to_string()],
        );
        let suggester = Box::new(EditSuggester::new(set, ALPHABET.clone(), distance));
        let engine = CorrectionEngine::new(default_replacers(), ALPHABET.clone(), suggester, distance, 2);
        (oracle, engine)
    }

    #[test]
    fn test_glyph_substitution() {
        let (oracle, engine) = fixtures(&["there", "cat"], 1);
        let freq = FrequencyTable::from_counts([("There", 3)]);
        assert_eq!(
            engine.suggest_replacement("Thcrc", "", &oracle, &freq),
            Some("There".to_string())
        );
    }

    #[test]
    fn test_frequency_gate_is_strict() {
        let (oracle, engine) = fixtures(&["there"], 0);

        // unattested suggestion: rejected
        let freq = FrequencyTable::new();
        assert_eq!(engine.suggest_replacement("Thcrc", "", &oracle, &freq), None);

        // suggestion no more frequent than the token itself: rejected
        let freq = FrequencyTable::from_counts([("There", 3), ("Thcrc", 5)]);
        assert_eq!(engine.suggest_replacement("Thcrc", "", &oracle, &freq), None);

        // attested but below the absolute floor: rejected
        let freq = FrequencyTable::from_counts([("There", 1)]);
        assert_eq!(engine.suggest_replacement("Thcrc", "", &oracle, &freq), None);
    }

    #[test]
    fn test_ambiguity_means_no_correction() {
        let (oracle, engine) = fixtures(&["hatt", "katt"], 1);
        let freq = FrequencyTable::from_counts([("hatt", 5), ("katt", 5)]);
        assert_eq!(engine.suggest_replacement("zatt", "", &oracle, &freq), None);
    }

    #[test]
    fn test_normalization_short_circuit_skips_gate() {
        let (oracle, engine) = fixtures(&["snöboll"], 1);
        let freq = FrequencyTable::new();
        assert_eq!(
            engine.suggest_replacement("snö-boll", "", &oracle, &freq),
            Some("snöboll".to_string())
        );
        assert_eq!(
            engine.suggest_replacement("s_nöboll", "", &oracle, &freq),
            Some("snöboll".to_string())
        );
    }

    #[test]
    fn test_early_rejects() {
        let (oracle, engine) = fixtures(&["there"], 1);
        let freq = FrequencyTable::from_counts([("There", 5)]);
        // short all-caps
        assert_eq!(engine.suggest_replacement("THC.", "", &oracle, &freq), None);
        // too short
        assert_eq!(engine.suggest_replacement("thc", "", &oracle, &freq), None);
        // hyphen as second character
        let (oracle, engine) = fixtures(&["uland"], 1);
        let freq = FrequencyTable::from_counts([("uland", 5)]);
        assert_eq!(engine.suggest_replacement("u-lnd", "", &oracle, &freq), None);
    }

    #[test]
    fn test_divider_reinsertion() {
        let (oracle, engine) = fixtures(&["katt"], 0);
        let freq = FrequencyTable::from_counts([("katt", 5)]);
        assert_eq!(
            engine.suggest_replacement("katt,", "", &oracle, &freq),
            Some("katt , ".to_string())
        );
    }

    #[test]
    fn test_leading_numeral_repair() {
        let (oracle, engine) = fixtures(&["vinter"], 0);
        let freq = FrequencyTable::from_counts([("vinter", 5)]);
        assert_eq!(
            engine.suggest_replacement("12.vintcr", "", &oracle, &freq),
            Some("12 . vinter".to_string())
        );
    }

    #[test]
    fn test_single_letter_expansion_deduplicates_with_suggester() {
        let (oracle, engine) = fixtures(&["skatt"], 1);
        let freq = FrequencyTable::from_counts([("skatt", 5)]);
        // both the expansion strategy and the approximate source propose
        // "skatt"; after deduplication exactly one candidate remains
        assert_eq!(
            engine.suggest_replacement("skat", "", &oracle, &freq),
            Some("skatt".to_string())
        );
    }

    #[test]
    fn test_case_compatibility_of_approximate_candidates() {
        let (oracle, engine) = fixtures(&["ecro"], 1);
        let freq = FrequencyTable::from_counts([("ecro", 5)]);
        // lower-case token: case unconstrained
        assert_eq!(
            engine.suggest_replacement("xcro", "", &oracle, &freq),
            Some("ecro".to_string())
        );
        // capitalized token must not be replaced by a lower-case candidate
        assert_eq!(engine.suggest_replacement("Xcro", "", &oracle, &freq), None);
    }

    #[test]
    fn test_digit_tokens_skip_approximate_source() {
        let (oracle, engine) = fixtures(&["krig"], 1);
        let freq = FrequencyTable::from_counts([("krig", 9)]);
        // "kr1g" carries a digit, so the approximate source stays silent;
        // the glyph rule (1 -> l) yields "krlg", not "krig", so nothing is
        // proposed
        assert_eq!(engine.suggest_replacement("kr1g", "", &oracle, &freq), None);
    }

    #[test]
    fn test_double_hyphen_disambiguation() {
        let (oracle, engine) = fixtures(&["Karl", "Gustav", "Svensson"], 0);
        let freq = FrequencyTable::from_counts([("Gustav-Svensson", 3)]);
        assert_eq!(
            engine.suggest_replacement("Karl-Gusfav-Svensson", "", &oracle, &freq),
            Some("Karl-Gustav-Svensson".to_string())
        );
    }

    #[test]
    fn test_segment_wise_hyphen_repair() {
        let (oracle, engine) = fixtures(&["vinter", "kriget"], 0);
        let freq = FrequencyTable::from_counts([("vinter", 5)]);
        assert_eq!(
            engine.suggest_replacement("vintcr-kriget", "", &oracle, &freq),
            Some("vinter-kriget".to_string())
        );
    }

    #[test]
    fn test_trailing_period_restoration() {
        let (oracle, engine) = fixtures(&["t.ex."], 0);
        let freq = FrequencyTable::from_counts([("t.ex.", 4)]);
        assert_eq!(
            engine.suggest_replacement("t.ex", "", &oracle, &freq),
            Some("t.ex.".to_string())
        );
        // not in front of a hyphen
        assert_eq!(engine.suggest_replacement("t.ex", "-", &oracle, &freq), None);
    }

    #[test]
    fn test_reduction_prefers_clean_twin() {
        let pool = vec![
            "fd".to_string(),
            "f.d.".to_string(),
            "fd".to_string(),
        ];
        let reduced = reduce_candidates(&pool);
        assert_eq!(reduced, vec!["fd".to_string()]);
    }

    #[test]
    fn test_never_returns_low_frequency_alphabetic_candidate() {
        let (oracle, engine) = fixtures(&["hatt"], 1);
        for token_freq in 0..4u64 {
            let freq = FrequencyTable::from_counts([
                ("hatt".to_string(), token_freq),
                ("zatt".to_string(), token_freq),
            ]);
            if let Some(replacement) = engine.suggest_replacement("zatt", "", &oracle, &freq) {
                assert!(freq.count(&replacement) > token_freq);
                assert!(freq.count(&replacement) >= 2);
            }
        }
    }
}
