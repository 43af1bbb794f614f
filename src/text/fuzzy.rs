use std::collections::HashMap;

/// Similarity used when a phrase is not an exact substring of the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FuzzyStrategy {
    /// [`word_window_ratio`]: every phrase word must be close to its
    /// aligned text word
    #[default]
    WordWindow,
    /// [`partial_ratio`]: character windows, so phrases sharing a long
    /// suffix ("i'm interested" / "not interested") score high
    CharWindow,
}

impl FuzzyStrategy {
    /// Similarity of `phrase` somewhere inside `text`, in `0.0..=100.0`
    pub fn similarity(&self, phrase: &str, text: &str) -> f64 {
        match self {
            FuzzyStrategy::WordWindow => word_window_ratio(phrase, text),
            FuzzyStrategy::CharWindow => partial_ratio(phrase, text),
        }
    }
}

/// Normalized InDel similarity of two strings in `0.0..=100.0`
///
/// `100 * 2 * lcs / (len_a + len_b)`. Two empty strings are identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best alignment of the shorter string against windows of the longer one
///
/// Every full-length window is scored, plus the shorter prefix and suffix
/// windows where the needle only partially overlaps the haystack. Returns
/// 0 when either side is empty.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    if a.len() == b.len() {
        return best_window_ratio(&a, &b).max(best_window_ratio(&b, &a));
    }

    if a.len() < b.len() {
        best_window_ratio(&a, &b)
    } else {
        best_window_ratio(&b, &a)
    }
}

/// Best alignment of a phrase's words against a run of text words
///
/// Each phrase word is compared with the text word at the same offset using
/// [`ratio`]; an alignment scores as its weakest word, so every word has to
/// be close for the phrase to match. Returns 0 when either side has no
/// words or the text has fewer words than the phrase.
pub fn word_window_ratio(phrase: &str, text: &str) -> f64 {
    let phrase_words: Vec<Vec<char>> = phrase
        .split_whitespace()
        .map(|w| w.chars().collect())
        .collect();
    let text_words: Vec<Vec<char>> = text
        .split_whitespace()
        .map(|w| w.chars().collect())
        .collect();

    if phrase_words.is_empty() || text_words.len() < phrase_words.len() {
        return 0.0;
    }

    let mut best: f64 = 0.0;
    for window in text_words.windows(phrase_words.len()) {
        let weakest = phrase_words
            .iter()
            .zip(window)
            .map(|(p, t)| ratio_chars(p, t))
            .fold(f64::INFINITY, f64::min);
        if weakest > best {
            best = weakest;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    let lcs = lcs_len(a, b);
    200.0 * lcs as f64 / total as f64
}

fn best_window_ratio(needle: &[char], haystack: &[char]) -> f64 {
    let len1 = needle.len();
    let len2 = haystack.len();
    let matcher = LcsMatcher::new(needle);

    // Leading partial windows, full windows, then trailing partial windows
    let leading = (1..len1).map(|end| &haystack[..end]);
    let full = (0..=len2 - len1).map(|start| &haystack[start..start + len1]);
    let trailing = (len2 - len1 + 1..len2).map(|start| &haystack[start..]);

    let mut best: f64 = 0.0;
    for window in leading.chain(full).chain(trailing) {
        let lcs = matcher.lcs(window);
        let score = 200.0 * lcs as f64 / (len1 + window.len()) as f64;
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.len() <= b.len() {
        LcsMatcher::new(a).lcs(b)
    } else {
        LcsMatcher::new(b).lcs(a)
    }
}

/// Longest-common-subsequence length against a fixed pattern
///
/// Patterns up to 64 chars use the bit-parallel recurrence
/// `V' = (V + (V & M)) | (V - (V & M))`, where the LCS length is the number
/// of cleared bits. Longer patterns fall back to a single-row DP.
enum LcsMatcher<'a> {
    BitParallel {
        masks: HashMap<char, u64>,
        len: usize,
    },
    Dynamic(&'a [char]),
}

impl<'a> LcsMatcher<'a> {
    fn new(pattern: &'a [char]) -> Self {
        if pattern.len() > 64 {
            return Self::Dynamic(pattern);
        }

        let mut masks: HashMap<char, u64> = HashMap::new();
        for (i, c) in pattern.iter().enumerate() {
            *masks.entry(*c).or_insert(0) |= 1u64 << i;
        }

        Self::BitParallel {
            masks,
            len: pattern.len(),
        }
    }

    fn lcs(&self, text: &[char]) -> usize {
        match self {
            Self::BitParallel { masks, len } => {
                if *len == 0 {
                    return 0;
                }
                let active = if *len == 64 { u64::MAX } else { (1u64 << len) - 1 };
                let mut v = u64::MAX;
                for c in text {
                    if let Some(&m) = masks.get(c) {
                        let u = v & m;
                        v = v.wrapping_add(u) | v.wrapping_sub(u);
                    }
                }
                (!v & active).count_ones() as usize
            }
            Self::Dynamic(pattern) => {
                let mut row = vec![0usize; pattern.len() + 1];
                for c in text {
                    let mut diag = 0;
                    for (j, p) in pattern.iter().enumerate() {
                        let above = row[j + 1];
                        row[j + 1] = if c == p {
                            diag + 1
                        } else {
                            above.max(row[j])
                        };
                        diag = above;
                    }
                }
                row[pattern.len()]
            }
        }
    }
}
