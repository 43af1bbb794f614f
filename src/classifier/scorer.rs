use crate::lexicon::Lexicon;
use crate::text::FuzzyStrategy;

/// Default similarity a phrase needs to count as present
pub const DEFAULT_SCORE_THRESHOLD: u8 = 70;

/// Sum the weights of every lexicon phrase found in `text`
///
/// An exact substring match always counts. Otherwise the phrase counts when
/// its fuzzy similarity reaches `threshold`. Each phrase contributes its
/// weight at most once, however often it occurs. The sum saturates at
/// `u32::MAX`.
pub fn weighted_score(text: &str, lexicon: &Lexicon, threshold: u8) -> u32 {
    weighted_score_with(text, lexicon, threshold, FuzzyStrategy::default())
}

/// [`weighted_score`] with an explicit fuzzy strategy
pub fn weighted_score_with(
    text: &str,
    lexicon: &Lexicon,
    threshold: u8,
    strategy: FuzzyStrategy,
) -> u32 {
    if text.is_empty() {
        return 0;
    }

    lexicon
        .entries()
        .iter()
        .filter(|entry| {
            text.contains(entry.phrase.as_str())
                || strategy.similarity(&entry.phrase, text) >= f64::from(threshold)
        })
        .map(|entry| entry.weight)
        .fold(0u32, u32::saturating_add)
}
