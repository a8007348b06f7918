//! Word tokenization for periodical text.
//!
//! The corrector needs a tokenizer that keeps punctuation as separate
//! tokens — the oracle inspects the following token, and dividers must not
//! count as words — and a matching detokenizer that restores natural
//! spacing, so that sentences where nothing was corrected survive
//! unchanged.

use unicode_segmentation::UnicodeSegmentation;

/// Characters peeled off token edges as standalone punctuation tokens.
const EDGE_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ':', '(', ')', ';', '„', '"', '\'', '‘', '»', '«', '}', '{', '*', '”',
    '[', ']', '•', '=', '^', '/', '“', '’',
];

/// Punctuation that attaches to the preceding token when detokenizing.
const ATTACH_LEFT: &[&str] = &[
    ".", ",", "!", "?", ":", ";", ")", "]", "}", "»", "”", "’", "'", "\"", "…",
];

/// Punctuation that attaches to the following token when detokenizing.
const ATTACH_RIGHT: &[&str] = &["(", "[", "{", "«", "„", "“"];

/// Trait for tokenizers that split text into word and punctuation tokens.
///
/// Implementations must be reversible: `detokenize` applied to an
/// unmodified token sequence reconstructs natural spacing.
pub trait Tokenizer: Send + Sync {
    /// Split a line of text into tokens.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Reassemble tokens into a line with natural spacing.
    fn detokenize(&self, tokens: &[String]) -> String;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Tokenizer tuned for OCR-scanned periodical text.
///
/// Splits on whitespace and peels punctuation off token edges. A single
/// trailing period stays attached when the token reads as an abbreviation
/// (at most two letters, or containing a further period): "t.ex." and
/// "Nr." stay whole while a sentence-final "ordet." splits into "ordet"
/// and ".". Hyphenated words and joiner-marked fragments are never split.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodicalTokenizer;

impl PeriodicalTokenizer {
    /// Create a new tokenizer.
    pub fn new() -> Self {
        PeriodicalTokenizer
    }

    fn split_chunk(&self, chunk: &str, tokens: &mut Vec<String>) {
        let graphemes: Vec<&str> = chunk.graphemes(true).collect();

        let mut start = 0;
        while start < graphemes.len() && is_edge_punctuation(graphemes[start]) {
            start += 1;
        }
        let mut end = graphemes.len();
        let mut trailing: Vec<&str> = Vec::new();
        while end > start {
            let g = graphemes[end - 1];
            if !is_edge_punctuation(g) {
                break;
            }
            if g == "." && keeps_trailing_period(&graphemes[start..end - 1]) {
                break;
            }
            trailing.push(g);
            end -= 1;
        }

        for g in &graphemes[..start] {
            tokens.push((*g).to_string());
        }
        if end > start {
            tokens.push(graphemes[start..end].concat());
        }
        for g in trailing.iter().rev() {
            tokens.push((*g).to_string());
        }
    }
}

/// An abbreviation keeps its trailing period: a core of at most two
/// characters ("z.", "Nr.") or one that already contains a period
/// ("t.ex.").
fn keeps_trailing_period(core: &[&str]) -> bool {
    !core.is_empty() && (core.len() <= 2 || core.contains(&"."))
}

fn is_edge_punctuation(grapheme: &str) -> bool {
    let mut chars = grapheme.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => EDGE_PUNCTUATION.contains(&c),
        _ => false,
    }
}

impl Tokenizer for PeriodicalTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for chunk in text.split_whitespace() {
            self.split_chunk(chunk, &mut tokens);
        }
        tokens
    }

    fn detokenize(&self, tokens: &[String]) -> String {
        let mut out = String::new();
        let mut suppress_space = true;
        for token in tokens {
            let attach_left = ATTACH_LEFT.contains(&token.as_str());
            if !suppress_space && !attach_left {
                out.push(' ');
            }
            out.push_str(token);
            suppress_space = ATTACH_RIGHT.contains(&token.as_str());
        }
        out
    }

    fn name(&self) -> &'static str {
        "periodical"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(text: &str) -> Vec<String> {
        PeriodicalTokenizer::new().tokenize(text)
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(tokenize("en liten katt"), vec!["en", "liten", "katt"]);
    }

    #[test]
    fn test_punctuation_split_off() {
        assert_eq!(tokenize("katten sover."), vec!["katten", "sover", "."]);
        assert_eq!(tokenize("(se sidan 4)"), vec!["(", "se", "sidan", "4", ")"]);
        assert_eq!(tokenize("ja, nej"), vec!["ja", ",", "nej"]);
    }

    #[test]
    fn test_abbreviations_keep_period() {
        assert_eq!(tokenize("Nr. 14"), vec!["Nr.", "14"]);
        assert_eq!(tokenize("t.ex. detta"), vec!["t.ex.", "detta"]);
        assert_eq!(tokenize("z. B. hier"), vec!["z.", "B.", "hier"]);
    }

    #[test]
    fn test_hyphens_and_joiners_kept() {
        assert_eq!(tokenize("Eva-Lena"), vec!["Eva-Lena"]);
        assert_eq!(tokenize("t_h_e katt"), vec!["t_h_e", "katt"]);
    }

    #[test]
    fn test_quoted_text() {
        assert_eq!(
            tokenize("„Guten Tag“, sagte er"),
            vec!["„", "Guten", "Tag", "“", ",", "sagte", "er"]
        );
    }

    #[test]
    fn test_detokenize_spacing() {
        let tokenizer = PeriodicalTokenizer::new();
        let tokens: Vec<String> = ["katten", "sover", ".", "ja", ",", "nej"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(tokenizer.detokenize(&tokens), "katten sover. ja, nej");

        let tokens: Vec<String> = ["(", "se", "sidan", "4", ")"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(tokenizer.detokenize(&tokens), "(se sidan 4)");
    }

    #[test]
    fn test_round_trip_when_unmodified() {
        let tokenizer = PeriodicalTokenizer::new();
        let text = "katten sover, hunden vakar.";
        let tokens = tokenizer.tokenize(text);
        assert_eq!(tokenizer.detokenize(&tokens), text);
    }

    #[test]
    fn test_empty_line() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }
}
