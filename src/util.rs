//! Small text utilities shared across the library.

/// Number of characters (not bytes) in a string.
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// True when the string contains at least one cased character and every
/// cased character is uppercase.
pub fn is_all_upper(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

/// True when the string contains at least one cased character and every
/// cased character is lowercase.
pub fn is_all_lower(s: &str) -> bool {
    s.chars().any(char::is_lowercase) && !s.chars().any(char::is_uppercase)
}

/// True when the string is non-empty and entirely alphabetic.
pub fn is_alphabetic(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphabetic)
}

/// True when the string is non-empty and entirely ASCII digits.
pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Strip a leading UTF-8 byte-order marker, if present.
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix('\u{feff}').unwrap_or(s)
}

/// The string without its final character, or an empty string.
pub fn drop_last_char(s: &str) -> &str {
    match s.char_indices().next_back() {
        Some((idx, _)) => &s[..idx],
        None => "",
    }
}
