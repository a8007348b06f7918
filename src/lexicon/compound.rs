//! Compounding strategies.
//!
//! Historical periodical text is rich in closed compounds that no word list
//! enumerates exhaustively, so the oracle consults a compounding strategy
//! before giving up on a token. A strategy scans candidate split points and
//! tests whether both resulting parts are known, with language-specific
//! relaxations for linking morphology. Tokens shorter than seven characters
//! are never split — short splits produce far too many false positives.
//!
//! The strategy is selected once at configuration time and passed down
//! explicitly; see [`crate::config::CompoundKind`].

use crate::lexicon::word_set::KnownWordSet;
use crate::util::drop_last_char;

/// Minimum token length before a compound split is attempted.
pub const MIN_COMPOUND_LEN: usize = 7;

/// Trait for compound recognition over a known-word set.
///
/// Implementations must be pure: the decision may depend only on the token,
/// the following token, and the word set.
pub trait CompoundStrategy: Send + Sync {
    /// Decide whether `word` reads as a compound of known parts.
    fn is_compound(&self, word: &str, next_token: &str, words: &KnownWordSet) -> bool;

    /// Get the name of this strategy (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Byte offsets of every character boundary in `word`.
fn char_offsets(word: &str) -> Vec<usize> {
    word.char_indices().map(|(b, _)| b).collect()
}

/// Plain two-part compounding: both parts must be literal members of the
/// word set. The split range keeps both parts at least four characters
/// long.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericCompound;

impl CompoundStrategy for GenericCompound {
    fn is_compound(&self, word: &str, _next_token: &str, words: &KnownWordSet) -> bool {
        let offsets = char_offsets(word);
        let n = offsets.len();
        if n < MIN_COMPOUND_LEN {
            return false;
        }
        for i in 4..n - 3 {
            let (first, second) = word.split_at(offsets[i]);
            if words.contains(first) && words.contains(second) {
                return true;
            }
        }
        false
    }

    fn name(&self) -> &'static str {
        "generic"
    }
}

/// German compounding: plain concatenation, or a linking `s`, `e`, or
/// hyphen between two known parts (Fugenelement).
#[derive(Debug, Clone, Copy, Default)]
pub struct GermanCompound;

impl CompoundStrategy for GermanCompound {
    fn is_compound(&self, word: &str, _next_token: &str, words: &KnownWordSet) -> bool {
        let offsets = char_offsets(word);
        let n = offsets.len();
        if n < MIN_COMPOUND_LEN {
            return false;
        }
        for i in 4..n - 3 {
            let (first, second) = word.split_at(offsets[i]);
            if words.contains(first) && words.contains(second) {
                return true;
            }
            if (second.starts_with('s') || second.starts_with('-') || second.starts_with('e'))
                && words.contains(first)
                && words.contains(&second[1..])
            {
                return true;
            }
        }
        false
    }

    fn name(&self) -> &'static str {
        "german"
    }
}

/// Swedish compounding: on top of plain concatenation this accepts the
/// common inflectional alternations at the part boundary — an elided final
/// `a`/`e` on the first part (kyrko-), the `ium`→`ie` normalization
/// (sanatorium), doubled-final-letter linking (nattåg), and a linking `s`,
/// `e`, or hyphen.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwedishCompound;

impl CompoundStrategy for SwedishCompound {
    fn is_compound(&self, word: &str, _next_token: &str, words: &KnownWordSet) -> bool {
        let offsets = char_offsets(word);
        let n = offsets.len();
        if n < MIN_COMPOUND_LEN {
            return false;
        }
        for i in 5..n.saturating_sub(4) {
            let (first, second) = word.split_at(offsets[i]);

            if words.contains(second) {
                if words.contains(first)
                    || words.contains(&format!("{first}a"))
                    || words.contains(&format!("{first}e"))
                {
                    return true;
                }
                // kyrko-, kyrke- for kyrka
                if (first.ends_with('o') || first.ends_with('e'))
                    && words.contains(&format!("{}a", drop_last_char(first)))
                {
                    return true;
                }
                // sanatorium -> sanatorie
                if words.contains(&first.replace("ium", "ie")) {
                    return true;
                }
            }

            // nattåg: the doubled final letter of the first part also opens
            // the second
            if words.contains(first) {
                let mut rev = first.chars().rev();
                if let (Some(last), Some(prev)) = (rev.next(), rev.next())
                    && last == prev
                    && words.contains(&format!("{prev}{second}"))
                {
                    return true;
                }
            }

            if (second.starts_with('s') || second.starts_with('-') || second.starts_with('e'))
                && words.contains(first)
                && words.contains(&second[1..])
            {
                return true;
            }
        }
        false
    }

    fn name(&self) -> &'static str {
        "swedish"
    }
}
