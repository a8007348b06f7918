//! The approximate-candidate source consulted by the correction engine.
//!
//! Candidates are generated purely from the curated vocabulary — there is
//! no built-in language data, so the source works for any language the word
//! lists cover.

use std::sync::Arc;

use ahash::AHashSet;

use crate::lexicon::word_set::KnownWordSet;

/// A source of dictionary-adjacent spelling candidates.
pub trait Suggester: Send + Sync {
    /// Candidates for `word` within the configured edit distance, in a
    /// deterministic order.
    fn candidates(&self, word: &str) -> Vec<String>;

    /// Get the name of this suggester (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Edit-expansion suggester: enumerates every string within one edit of the
/// word over the configured alphabet, keeps those that are vocabulary
/// members, and expands a second time when the configured distance allows.
/// Nearer candidates shadow farther ones — a second expansion happens only
/// when the first finds nothing.
pub struct EditSuggester {
    words: Arc<KnownWordSet>,
    alphabet: Vec<char>,
    max_distance: usize,
}

impl EditSuggester {
    /// Create a suggester seeded with the curated vocabulary.
    pub fn new(words: Arc<KnownWordSet>, alphabet: Vec<char>, max_distance: usize) -> Self {
        EditSuggester {
            words,
            alphabet,
            max_distance,
        }
    }

    /// Every string one edit away from `word`: deletions, transpositions,
    /// substitutions, and insertions over the alphabet.
    fn single_edits(&self, word: &str) -> AHashSet<String> {
        let chars: Vec<char> = word.chars().collect();
        let mut edits = AHashSet::new();

        for i in 0..=chars.len() {
            let (left, right) = chars.split_at(i);

            // deletion
            if !right.is_empty() {
                edits.insert(collect(left, &right[1..], None));
            }
            // transposition
            if right.len() > 1 {
                let swapped = [right[1], right[0]];
                let mut s: String = left.iter().collect();
                s.extend(swapped);
                s.extend(&right[2..]);
                edits.insert(s);
            }
            for &c in &self.alphabet {
                // substitution
                if !right.is_empty() {
                    edits.insert(collect(left, &right[1..], Some(c)));
                }
                // insertion
                edits.insert(collect(left, right, Some(c)));
            }
        }
        edits
    }

    fn known<'a>(&self, candidates: impl IntoIterator<Item = &'a String>) -> Vec<String> {
        candidates
            .into_iter()
            .filter(|c| self.words.contains(c))
            .cloned()
            .collect()
    }
}

/// `left`, then optionally `mid`, then `right`, as one string.
fn collect(left: &[char], right: &[char], mid: Option<char>) -> String {
    let mut s: String = left.iter().collect();
    if let Some(c) = mid {
        s.push(c);
    }
    s.extend(right);
    s
}

impl Suggester for EditSuggester {
    fn candidates(&self, word: &str) -> Vec<String> {
        if self.max_distance == 0 {
            return Vec::new();
        }
        if self.words.contains(word) {
            return vec![word.to_string()];
        }

        let single = self.single_edits(word);
        let mut found = self.known(&single);
        if found.is_empty() && self.max_distance >= 2 {
            let mut double = AHashSet::new();
            for edit in &single {
                double.extend(self.single_edits(edit));
            }
            found = self.known(&double);
        }

        found.sort();
        found.dedup();
        found
    }

    fn name(&self) -> &'static str {
        "edit-expansion"
    }
}
