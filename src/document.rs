//! Document-level orchestration: reassembly, tokenization, oracle checks,
//! correction, and statistics.

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use log::debug;

use crate::analysis::tokenizer::{PeriodicalTokenizer, Tokenizer};
use crate::config::{CorrectorConfig, is_divider, ALPHABET};
use crate::correction::engine::CorrectionEngine;
use crate::correction::suggest::EditSuggester;
use crate::error::Result;
use crate::frequency::table::FrequencyTable;
use crate::lexicon::oracle::LexicalOracle;
use crate::lexicon::word_set::KnownWordSet;
use crate::reassembly::{JOINER, SpacedWordReassembler};

/// Run-wide accumulators, kept separate from per-document statistics.
///
/// Merging is associative, so parallel workers can fill private instances
/// and combine them afterwards.
#[derive(Debug, Clone, Default)]
pub struct CorrectionStats {
    /// Tokens the oracle rejected, before any correction attempt.
    pub not_found: AHashMap<String, u64>,
    /// Tokens still unknown after the correction attempt failed.
    pub not_found_after: AHashMap<String, u64>,
    /// `(original, replacement)` pairs the engine produced.
    pub corrections: AHashMap<(String, String), u64>,
    /// `(spaced, joined)` pairs the reassembler produced.
    pub space_merges: AHashMap<(String, String), u64>,
}

impl CorrectionStats {
    /// Create empty accumulators.
    pub fn new() -> Self {
        CorrectionStats::default()
    }

    /// Count a token the oracle rejected.
    pub fn record_not_found(&mut self, token: &str) {
        *self.not_found.entry(token.to_string()).or_insert(0) += 1;
    }

    /// Count a token that stayed unknown after correction failed.
    pub fn record_not_found_after(&mut self, token: &str) {
        *self.not_found_after.entry(token.to_string()).or_insert(0) += 1;
    }

    /// Count a correction.
    pub fn record_correction(&mut self, original: &str, replacement: &str) {
        *self
            .corrections
            .entry((original.to_string(), replacement.to_string()))
            .or_insert(0) += 1;
    }

    /// Count a space merge.
    pub fn record_space_merge(&mut self, pair: (String, String)) {
        *self.space_merges.entry(pair).or_insert(0) += 1;
    }

    /// Fold another accumulator into this one. Order-independent.
    pub fn merge(&mut self, other: CorrectionStats) {
        for (token, count) in other.not_found {
            *self.not_found.entry(token).or_insert(0) += count;
        }
        for (token, count) in other.not_found_after {
            *self.not_found_after.entry(token).or_insert(0) += count;
        }
        for (pair, count) in other.corrections {
            *self.corrections.entry(pair).or_insert(0) += count;
        }
        for (pair, count) in other.space_merges {
            *self.space_merges.entry(pair).or_insert(0) += count;
        }
    }
}

/// The outcome of correcting one document.
#[derive(Debug, Clone)]
pub struct DocumentReport {
    /// Unknown tokens and their counts, before correction.
    pub not_found_before: AHashMap<String, u64>,
    /// Unknown tokens and their counts, after correction.
    pub not_found_after: AHashMap<String, u64>,
    /// Unknown tokens over non-divider tokens, before correction.
    pub error_proportion_before: f64,
    /// Unknown tokens over non-divider tokens, after correction.
    pub error_proportion_after: f64,
    /// Non-divider token count.
    pub word_count: usize,
    /// The corrected document text.
    pub corrected_text: String,
}

impl DocumentReport {
    /// The sentinel for a document without a single countable word: error
    /// proportions of one, and no text.
    pub fn empty() -> Self {
        DocumentReport {
            not_found_before: AHashMap::new(),
            not_found_after: AHashMap::new(),
            error_proportion_before: 1.0,
            error_proportion_after: 1.0,
            word_count: 0,
            corrected_text: String::new(),
        }
    }

    /// True for the empty-document sentinel.
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }
}

/// Applies the full correction pipeline to documents.
pub struct DocumentCorrector {
    oracle: LexicalOracle,
    engine: CorrectionEngine,
    reassembler: SpacedWordReassembler,
    tokenizer: Box<dyn Tokenizer>,
    do_not_correct: AHashSet<String>,
}

impl DocumentCorrector {
    /// Build the pipeline from a configuration and a loaded word set.
    pub fn new(config: &CorrectorConfig, words: KnownWordSet) -> Result<Self> {
        let words = Arc::new(words);
        let oracle = LexicalOracle::new(
            words.clone(),
            config.compound.strategy(),
            config.single_letter_words.clone(),
        );
        let suggester = Box::new(EditSuggester::new(
            words,
            ALPHABET.clone(),
            config.edit_distance,
        ));
        let engine = CorrectionEngine::new(
            config.replacers.clone(),
            ALPHABET.clone(),
            suggester,
            config.edit_distance,
            config.min_replacement_frequency,
        );
        let reassembler = SpacedWordReassembler::new(config.max_run_fragments)?;

        Ok(DocumentCorrector {
            oracle,
            engine,
            reassembler,
            tokenizer: Box::new(PeriodicalTokenizer::new()),
            do_not_correct: config.do_not_correct.iter().cloned().collect(),
        })
    }

    /// The oracle this corrector consults.
    pub fn oracle(&self) -> &LexicalOracle {
        &self.oracle
    }

    /// Correct one document against the windowed frequency table,
    /// accumulating run-wide statistics into `stats`.
    pub fn correct_document(
        &self,
        text: &str,
        freq: &FrequencyTable,
        stats: &mut CorrectionStats,
    ) -> DocumentReport {
        let text = text.replace('\r', "\n").replace("  ", " ");

        let mut not_found_before: AHashMap<String, u64> = AHashMap::new();
        let mut not_found_after: AHashMap<String, u64> = AHashMap::new();
        let mut word_count = 0usize;
        let mut out_lines: Vec<String> = Vec::new();

        for line in text.split('\n') {
            let (line, merges) = self.reassembler.reassemble(line);
            for pair in merges {
                stats.record_space_merge(pair);
            }
            let line = line.trim().replace("  ", " ");
            let (line, merges) = self.reassembler.glob_stray_fragments(&line, &self.oracle);
            for pair in merges {
                stats.record_space_merge(pair);
            }

            let tokens = self.tokenizer.tokenize(&line);
            let mut updated: Vec<String> = Vec::with_capacity(tokens.len());
            let mut changed = false;

            for (i, token) in tokens.iter().enumerate() {
                let next_token = tokens.get(i + 1).map(String::as_str).unwrap_or("");
                if !is_divider(token) {
                    word_count += 1;
                }

                if self.oracle.is_known(token, next_token) || self.do_not_correct.contains(token)
                {
                    // the joiner did its job; known words are emitted clean
                    updated.push(token.replace(JOINER, ""));
                    continue;
                }

                *not_found_before.entry(token.clone()).or_insert(0) += 1;
                stats.record_not_found(token);

                match self
                    .engine
                    .suggest_replacement(token, next_token, &self.oracle, freq)
                {
                    Some(replacement) => {
                        debug!("replaced {token:?} with {replacement:?}");
                        stats.record_correction(token, &replacement);
                        updated.push(replacement);
                        changed = true;
                    }
                    None => {
                        updated.push(token.clone());
                        *not_found_after.entry(token.clone()).or_insert(0) += 1;
                        stats.record_not_found_after(token);
                    }
                }
            }

            if changed {
                out_lines.push(self.tokenizer.detokenize(&updated));
            } else {
                // nothing corrected: keep the line as-is, avoiding
                // detokenizer side effects on untouched text
                out_lines.push(line);
            }
        }

        if word_count == 0 {
            return DocumentReport::empty();
        }

        let unknown_before: u64 = not_found_before.values().sum();
        let unknown_after: u64 = not_found_after.values().sum();
        DocumentReport {
            error_proportion_before: unknown_before as f64 / word_count as f64,
            error_proportion_after: unknown_after as f64 / word_count as f64,
            not_found_before,
            not_found_after,
            word_count,
            corrected_text: out_lines.join("\n"),
        }
    }
}
