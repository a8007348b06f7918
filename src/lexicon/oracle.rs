//! The word-validity oracle.
//!
//! [`LexicalOracle::is_known`] decides whether a token counts as a genuine
//! word, given the curated vocabulary, a compounding strategy, and the
//! following token as context. The decision is a fixed cascade — first
//! matching rule wins — and is a pure function of its inputs: the oracle
//! carries no mutable state.

use std::sync::Arc;

use crate::config::DIVIDERS;
use crate::lexicon::compound::CompoundStrategy;
use crate::lexicon::word_set::KnownWordSet;
use crate::util::{char_count, is_all_lower, is_all_upper, is_numeric};

/// Punctuation removed when testing whether a token is separator noise.
const SEPARATOR_CHARS: &[char] = &['-', '=', '_', '•', '—', '.'];

/// Punctuation removed when testing whether a token is numeric. OCR glues
/// degree signs, issue-number abbreviations, and unit letters onto figures.
const NUMERIC_ADJACENT: &[char] = &['-', '—', '.', ',', '°', ':', 'g', '/', '\''];

/// Decides whether tokens are accepted words.
pub struct LexicalOracle {
    words: Arc<KnownWordSet>,
    compound: Box<dyn CompoundStrategy>,
    single_letter_words: Vec<String>,
}

impl LexicalOracle {
    /// Create an oracle over the given vocabulary and compounding strategy.
    pub fn new(
        words: Arc<KnownWordSet>,
        compound: Box<dyn CompoundStrategy>,
        single_letter_words: Vec<String>,
    ) -> Self {
        LexicalOracle {
            words,
            compound,
            single_letter_words,
        }
    }

    /// The vocabulary this oracle consults.
    pub fn words(&self) -> &KnownWordSet {
        &self.words
    }

    /// Decide whether `token` is an accepted word. `next_token` is the
    /// following token in the sentence (empty at sentence end); it matters
    /// only for the abbreviation-letter rule.
    ///
    /// The cascade, first match wins:
    ///
    /// 1. a bare single letter is rejected unless configured as a word or
    ///    followed by a period (a probable abbreviation);
    /// 2. a divider repeated one to four times is accepted;
    /// 3. digits glued to a long known word are accepted;
    /// 4. separator-only noise is accepted;
    /// 5. exact or trailing-period-stripped vocabulary match, verbatim or
    ///    lower-cased;
    /// 6. numbers, tolerating numeric-adjacent punctuation;
    /// 7. slash-joined tokens whose every part is accepted;
    /// 8. the compounding strategy;
    /// 9. hyphenated constructs: proper-noun/number shapes, or all long
    ///    segments independently accepted.
    pub fn is_known(&self, token: &str, next_token: &str) -> bool {
        // 1. A stray single letter is an OCR fragment, not a word, unless
        // it is a configured exception or reads as an abbreviation.
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && c.is_alphabetic()
            && !self.single_letter_words.iter().any(|w| w == token)
            && next_token.trim() != "."
        {
            return false;
        }

        // 2. Repeated dividers ("..", "??") are legitimate typography.
        for n in 1..=4usize {
            if DIVIDERS.iter().any(|d| token == d.repeat(n)) {
                return true;
            }
        }

        // 3. Volume/issue numbering glued to a word: stripping at least two
        // digits must leave a long word the oracle accepts.
        let without_digits: String = token.chars().filter(|c| !c.is_ascii_digit()).collect();
        if without_digits != token
            && !without_digits.is_empty()
            && without_digits.chars().all(char::is_alphabetic)
            && char_count(token) - char_count(&without_digits) > 1
            && char_count(&without_digits) > 6
            && self.is_known(&without_digits, next_token)
        {
            return true;
        }

        // 4. Degenerate separator runs.
        let separators_stripped: String = token
            .chars()
            .filter(|c| !SEPARATOR_CHARS.contains(c))
            .collect();
        if separators_stripped.trim().is_empty() {
            return true;
        }

        let trimmed = token.trim();
        let lower = trimmed.to_lowercase();

        // 5. Vocabulary lookup, tolerating a trailing period from
        // abbreviation tokenization.
        if self.words.contains(&lower) || self.words.contains(trimmed) {
            return true;
        }
        if self.words.contains(lower.trim_end_matches('.'))
            || self.words.contains(trimmed.trim_end_matches('.'))
        {
            return true;
        }

        // 6. Numbers with their usual OCR decoration.
        let numeric_core: String = lower
            .replace("nr.", "")
            .chars()
            .filter(|c| !NUMERIC_ADJACENT.contains(c))
            .collect();
        if is_numeric(&numeric_core) {
            return true;
        }

        // 7. Alternatives joined by a slash.
        if lower.contains('/') && lower.split('/').all(|part| self.is_known(part, next_token)) {
            return true;
        }

        // 8. Compounds.
        if self.compound.is_compound(&lower, next_token, &self.words) {
            return true;
        }

        // 9. Hyphenated constructs.
        if trimmed.contains('-') {
            if hyphen_shape_suggests_name(trimmed) {
                return true;
            }
            if lower
                .split('-')
                .all(|segment| char_count(segment) >= 6 && self.is_known(segment, next_token))
            {
                return true;
            }
        }

        false
    }
}

/// Shape test for hyphenated proper nouns and number constructs:
/// double names (Eva-Lena), segment numerals (1914-1918), and
/// name-plus-lowercase constructs (Stockholms-tidningen).
fn hyphen_shape_suggests_name(word: &str) -> bool {
    let segments: Vec<&str> = word.split('-').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return false;
    }

    // split on a contained hyphen always yields at least two segments
    let initials: String = segments
        .iter()
        .filter_map(|s| s.chars().next())
        .collect();
    if is_all_upper(&initials) && !is_all_upper(segments[1]) {
        return true;
    }

    if segments.iter().any(|s| is_numeric(s)) {
        return true;
    }

    is_all_upper(segments[0]) && is_all_lower(segments[1])
}
