use crate::text::FuzzyStrategy;

/// Default similarity a phrase needs before it is located for tie-breaking
pub const DEFAULT_TIE_BREAK_THRESHOLD: u8 = 80;

/// Earliest byte offset at which any of `phrases` appears in `text`
///
/// Only phrases whose fuzzy similarity reaches `threshold` are located. A
/// qualifying phrase is found by its exact position, falling back to the
/// position of its first word. `None` means nothing was located and sorts
/// after every real position (see [`position_key`]).
pub fn first_occurrence<'a, I>(text: &str, phrases: I, threshold: u8) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    first_occurrence_with(text, phrases, threshold, FuzzyStrategy::default())
}

/// [`first_occurrence`] with an explicit fuzzy strategy
pub fn first_occurrence_with<'a, I>(
    text: &str,
    phrases: I,
    threshold: u8,
    strategy: FuzzyStrategy,
) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    phrases
        .into_iter()
        .filter(|phrase| strategy.similarity(phrase, text) >= f64::from(threshold))
        .filter_map(|phrase| {
            text.find(phrase).or_else(|| {
                phrase
                    .split_whitespace()
                    .next()
                    .and_then(|first_word| text.find(first_word))
            })
        })
        .min()
}

/// Ordering key for an occurrence, with "not found" after every position
pub fn position_key(position: Option<usize>) -> usize {
    position.unwrap_or(usize::MAX)
}
