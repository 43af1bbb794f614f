use unicode_normalization::UnicodeNormalization;

/// How punctuation is removed from customer text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PunctuationMode {
    /// Drop the character, so "yes,please" becomes "yesplease"
    #[default]
    Delete,
    /// Replace the character with a space before whitespace is collapsed
    Space,
}

/// Contraction repairs, applied in order as plain substring replacements.
///
/// These are not word-boundary aware: "time" becomes "ti'me". Lexicon
/// matching relies on the exact repaired spelling, so keep them literal.
const SPELLING_REPAIRS: &[(&str, &str)] = &[("dont", "don't"), ("im", "i'm"), ("whats", "what's")];

/// Normalize raw customer text for keyword matching
///
/// 1. NFKD-decompose and drop every non-ASCII char (strips accents)
/// 2. Lowercase
/// 3. Remove everything but `a-z`, `0-9`, whitespace and `'`
/// 4. Apply the contraction repairs
/// 5. Collapse whitespace runs and trim
pub fn normalize(raw: &str) -> String {
    normalize_with(raw, PunctuationMode::default())
}

/// [`normalize`] with an explicit punctuation policy
pub fn normalize_with(raw: &str, punctuation: PunctuationMode) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut text: String = raw
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| c.to_ascii_lowercase())
        .filter_map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || c == '\'' {
                Some(c)
            } else {
                match punctuation {
                    PunctuationMode::Delete => None,
                    PunctuationMode::Space => Some(' '),
                }
            }
        })
        .collect();

    for &(from, to) in SPELLING_REPAIRS {
        if text.contains(from) {
            text = text.replace(from, to);
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
