//! The curated vocabulary loaded from word-list files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use ahash::AHashSet;
use log::info;

use crate::error::{LexgateError, Result};

/// An immutable set of accepted word forms.
///
/// Every entry is stored both verbatim and lower-cased, so membership tests
/// are plain set lookups — callers decide which form to probe. The set is
/// built once per run and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct KnownWordSet {
    words: AHashSet<String>,
}

impl KnownWordSet {
    /// Create an empty word set.
    pub fn new() -> Self {
        KnownWordSet {
            words: AHashSet::new(),
        }
    }

    /// Build a word set from an iterator of words. Used by tests and for
    /// seeding the approximate-candidate source.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = KnownWordSet::new();
        for word in words {
            set.insert(word.into());
        }
        set
    }

    /// Load the word set from a manifest file that names one word-list file
    /// per line. A manifest or listed file that does not exist is a fatal
    /// configuration error.
    pub fn load<P: AsRef<Path>>(manifest: P, exclude: &[String]) -> Result<Self> {
        let manifest = manifest.as_ref();
        if !manifest.exists() {
            return Err(LexgateError::config(format!(
                "word-list manifest {} does not exist",
                manifest.display()
            )));
        }

        let reader = BufReader::new(File::open(manifest)?);
        let mut list_paths = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let path = line.trim();
            if !path.is_empty() {
                list_paths.push(PathBuf::from(path));
            }
        }
        info!("{} word lists named in {}", list_paths.len(), manifest.display());

        let mut set = KnownWordSet::new();
        for path in &list_paths {
            if !path.exists() {
                return Err(LexgateError::config(format!(
                    "word list {} (named in {}) does not exist",
                    path.display(),
                    manifest.display()
                )));
            }
            set.load_word_list(path, exclude)?;
        }
        info!("{} word forms loaded", set.len());
        Ok(set)
    }

    fn load_word_list(&mut self, path: &Path, exclude: &[String]) -> Result<()> {
        let reader = BufReader::new(File::open(path)?);
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() || exclude.iter().any(|e| e == word) {
                continue;
            }
            self.insert(word.to_string());
        }
        Ok(())
    }

    /// Insert a word together with its lower-cased form.
    pub fn insert(&mut self, word: String) {
        let lower = word.to_lowercase();
        if lower != word {
            self.words.insert(lower);
        }
        self.words.insert(word);
    }

    /// Exact membership test. Lower-cased variants of every inserted word
    /// are members too.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stored word forms (case variants counted separately).
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when no words are loaded.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over all stored word forms.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
