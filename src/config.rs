//! Run configuration and the heuristic tables consulted by the oracle and
//! the correction engine.
//!
//! The divider set, the letter set, and the default glyph-substitution rules
//! are configuration data, loaded once and treated as immutable inputs — the
//! decision logic never embeds its own copies. The substitution rules encode
//! glyph confusions that blackletter and early-antiqua scans produce
//! (`ll`/`H`, `c`/`e`, `1`/`l` and friends); their order is significant and
//! every rule is tried independently.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use clap::ValueEnum;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::{LexgateError, Result};
use crate::lexicon::compound::{
    CompoundStrategy, GenericCompound, GermanCompound, SwedishCompound,
};

/// Divider/punctuation tokens. A token equal to one of these is punctuation,
/// not a word, and is excluded from word counts.
pub const DIVIDERS: &[&str] = &[
    ".", ",", "!", "?", ":", "(", ")", ";", "„", "\"", "'", "‘", "»", "«", "}", "{", "*", "”",
    "[", "]", "•", "=", "—•", "^", "/", "“",
];

/// True when the token is a divider.
pub fn is_divider(token: &str) -> bool {
    DIVIDERS.contains(&token)
}

/// Phrases removed before judging whether a detected character run is
/// word-like. These abbreviation patterns show up inside otherwise
/// alphabetic runs.
pub const RUN_STRIP_PHRASES: &[&str] = &["z. B.", "u. a."];

/// Characters removed before judging whether a detected character run is
/// word-like.
pub const RUN_STRIP_CHARS: &[char] = &[
    '.', ',', '!', '?', ':', '(', ')', ';', '„', '"', '\'', '“', '‘', '»', '«', '}', '{', '*',
    '”', '[', ']', '•', '’', '=', ' ',
];

lazy_static! {
    /// The letter set used for single-letter expansion and for generating
    /// approximate candidates: ASCII letters plus the Swedish/German
    /// vowels and the acute e.
    pub static ref ALPHABET: Vec<char> = {
        let mut letters: Vec<char> = ('a'..='z').collect();
        letters.extend('A'..='Z');
        letters.extend(['ü', 'Ü', 'å', 'Å', 'ä', 'Ä', 'ö', 'Ö', 'é', 'É']);
        letters
    };
}

/// An ordered substitution rule for a known OCR glyph confusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacerRule {
    /// Substring as OCR produced it.
    pub pattern: String,
    /// Substring as it should read.
    pub replacement: String,
}

impl ReplacerRule {
    /// Create a new rule.
    pub fn new<P: Into<String>, R: Into<String>>(pattern: P, replacement: R) -> Self {
        ReplacerRule {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// The default glyph-substitution table. Ordered; rules may repeat a pattern
/// with different replacements and each is tried on its own.
pub fn default_replacers() -> Vec<ReplacerRule> {
    [
        ("II", "ll"),
        ("c", "e"),
        ("I", "i"),
        ("11", "ll"),
        ("11", "ti"),
        ("I", "l"),
        ("i", "l"),
        ("/J", "H"),
        ("Hl", "H"),
        ("il", "it"),
        ("HI", "H"),
        ("ll", "H"),
        ("Tc", "He"),
        ("1l", "H"),
        ("Il", "H"),
        ("ci", "ch"),
        ("U", "Ü"),
        ("Tl", "H"),
        ("pll", "pfl"),
        ("o", "a"),
        ("ll", "fl"),
        ("Sl", "St"),
        ("Ä", "A"),
        ("rl", "rt"),
        ("ll", "li"),
        ("J", "I"),
        ("li", "ti"),
        ("f", "t"),
        ("il", "H"),
        ("Ie", "He"),
        ("ä", "a"),
        ("a", "ä"),
        ("EJ", "e"),
        ("l", "t"),
        ("in", "m"),
        ("Ilc", "He"),
        ("IH", "H"),
        ("II", "H"),
        ("Ll", "H"),
        ("d", "ch"),
        ("1", "l"),
        ("l", "1"),
        ("1", "t"),
        ("di", "ch"),
        ("ci-", "ch"),
        ("HI", "H"),
        ("i", "f"),
        ("-L", "K"),
    ]
    .iter()
    .map(|(p, r)| ReplacerRule::new(*p, *r))
    .collect()
}

/// Which compounding morphology the oracle applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompoundKind {
    /// Plain concatenation of two known words.
    Generic,
    /// Swedish linking morphology (elided `-a`, linking `s`/`e`, `ium`→`ie`).
    Swedish,
    /// German linking morphology (linking `s`/`e`).
    German,
}

impl CompoundKind {
    /// Instantiate the strategy for this kind.
    pub fn strategy(&self) -> Box<dyn CompoundStrategy> {
        match self {
            CompoundKind::Generic => Box::new(GenericCompound),
            CompoundKind::Swedish => Box::new(SwedishCompound),
            CompoundKind::German => Box::new(GermanCompound),
        }
    }
}

/// Configuration for a correction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// Compounding morphology to apply.
    pub compound: CompoundKind,
    /// Maximum edit distance for approximate candidates (0 disables the
    /// approximate-candidate source entirely).
    pub edit_distance: usize,
    /// Radius of the batch window used for frequency aggregation.
    pub window_radius: usize,
    /// Minimum corpus frequency an alphabetic replacement must reach.
    pub min_replacement_frequency: u64,
    /// Error proportion below which a document is considered acceptable.
    pub okay_error_proportion: f64,
    /// Single letters accepted as words in their own right.
    pub single_letter_words: Vec<String>,
    /// Tokens never handed to the correction engine.
    pub do_not_correct: Vec<String>,
    /// Word-list entries to drop while loading the lexicon.
    pub exclude_from_lexicon: Vec<String>,
    /// Glyph-substitution rules, in application order.
    pub replacers: Vec<ReplacerRule>,
    /// Upper bound on the number of fragments in a detected spaced-word run.
    pub max_run_fragments: usize,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig {
            compound: CompoundKind::Generic,
            edit_distance: 1,
            window_radius: 5,
            min_replacement_frequency: 2,
            okay_error_proportion: 0.05,
            single_letter_words: vec!["m".to_string(), "g".to_string(), "a".to_string()],
            do_not_correct: Vec::new(),
            exclude_from_lexicon: Vec::new(),
            replacers: default_replacers(),
            max_run_fragments: 200,
        }
    }
}

impl CorrectorConfig {
    /// Load a configuration from a JSON file. Missing fields fall back to
    /// their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            LexgateError::config(format!("cannot open config {}: {e}", path.display()))
        })?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }
}
