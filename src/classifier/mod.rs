pub mod occurrence;
pub mod scorer;

pub use occurrence::*;
pub use scorer::*;

use std::sync::LazyLock;

use tracing::debug;

use crate::lexicon::{Lexicon, LexiconSet};
use crate::models::{Classification, CustomerInterest, ScoreSet, Utterance, customer_text};
use crate::text::{FuzzyStrategy, PunctuationMode, normalize_with};

static DEFAULT_CLASSIFIER: LazyLock<InterestClassifier> =
    LazyLock::new(InterestClassifier::default);

/// Configuration for the interest classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Similarity a phrase needs to add its weight
    pub score_threshold: u8,
    /// Similarity a phrase needs to be located when breaking a tie
    pub tie_break_threshold: u8,
    /// Fuzzy similarity used for both thresholds
    pub fuzzy: FuzzyStrategy,
    /// How punctuation is removed during normalization
    pub punctuation: PunctuationMode,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            tie_break_threshold: DEFAULT_TIE_BREAK_THRESHOLD,
            fuzzy: FuzzyStrategy::default(),
            punctuation: PunctuationMode::default(),
        }
    }
}

/// Rule-based customer-interest classifier
///
/// Holds read-only lexicons and configuration, so one instance can be
/// shared across threads and reused for any number of transcripts.
#[derive(Debug, Clone, Default)]
pub struct InterestClassifier {
    lexicons: LexiconSet,
    config: ClassifierConfig,
}

impl InterestClassifier {
    pub fn new(lexicons: LexiconSet, config: ClassifierConfig) -> Self {
        Self { lexicons, config }
    }

    pub fn lexicons(&self) -> &LexiconSet {
        &self.lexicons
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Label a transcript from the customer's turns only
    pub fn classify(&self, utterances: &[Utterance]) -> CustomerInterest {
        self.classify_detailed(utterances).label
    }

    /// Label a transcript and keep the scores behind the decision
    pub fn classify_detailed(&self, utterances: &[Utterance]) -> Classification {
        self.classify_text(&customer_text(utterances))
    }

    /// Label raw customer text (already stripped of agent turns)
    pub fn classify_text(&self, raw: &str) -> Classification {
        let text = normalize_with(raw, self.config.punctuation);
        let scores = self.score(&text);

        debug!("Cleaned text: {:?}", text);
        debug!(
            "Scores: not_interested={} interested={} maybe={}",
            scores.not_interested, scores.interested, scores.maybe
        );

        let (label, tie_broken) = decide(scores, || self.interested_first(&text));

        Classification {
            label,
            scores,
            normalized_text: text,
            tie_broken,
        }
    }

    /// Weighted scores of normalized text against all three lexicons
    pub fn score(&self, text: &str) -> ScoreSet {
        let score = |lexicon: &Lexicon| {
            weighted_score_with(text, lexicon, self.config.score_threshold, self.config.fuzzy)
        };
        ScoreSet {
            not_interested: score(&self.lexicons.not_interested),
            interested: score(&self.lexicons.interested),
            maybe: score(&self.lexicons.maybe),
        }
    }

    /// Whether an interested phrase is located strictly before any
    /// not-interested phrase
    fn interested_first(&self, text: &str) -> bool {
        let locate = |lexicon: &Lexicon| {
            first_occurrence_with(
                text,
                lexicon.phrases(),
                self.config.tie_break_threshold,
                self.config.fuzzy,
            )
        };
        let interested = locate(&self.lexicons.interested);
        let not_interested = locate(&self.lexicons.not_interested);

        debug!(
            "Tie-break positions: interested={:?} not_interested={:?}",
            interested, not_interested
        );

        position_key(interested) < position_key(not_interested)
    }
}

/// Turn a score triple into a label
///
/// Evaluated in order:
/// 1. all zero: undetermined
/// 2. not-interested beats interested and is at least maybe: not interested
/// 3. not-interested ties interested: whichever appears first, with equal
///    positions going to not interested
/// 4. interested is at least maybe: interested
/// 5. otherwise follow up
///
/// `interested_first` is only called for a tie. The returned flag reports
/// whether it was.
pub fn decide<F>(scores: ScoreSet, interested_first: F) -> (CustomerInterest, bool)
where
    F: FnOnce() -> bool,
{
    let ScoreSet {
        not_interested,
        interested,
        maybe,
    } = scores;

    if scores.is_empty() {
        return (CustomerInterest::Undetermined, false);
    }

    if not_interested > interested && not_interested >= maybe {
        (CustomerInterest::NotInterested, false)
    } else if not_interested == interested && not_interested > 0 {
        if interested_first() {
            (CustomerInterest::Interested, true)
        } else {
            (CustomerInterest::NotInterested, true)
        }
    } else if interested >= maybe {
        (CustomerInterest::Interested, false)
    } else {
        (CustomerInterest::FollowUp, false)
    }
}

/// Label a transcript with the built-in lexicons and default configuration
pub fn classify(utterances: &[Utterance]) -> CustomerInterest {
    DEFAULT_CLASSIFIER.classify(utterances)
}

/// [`classify`], keeping the scores behind the decision
pub fn classify_detailed(utterances: &[Utterance]) -> Classification {
    DEFAULT_CLASSIFIER.classify_detailed(utterances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Category;
    use crate::models::Speaker;

    fn customer(text: &str) -> Vec<Utterance> {
        vec![Utterance::agent("Hi, is now a good time?"), Utterance::user(text)]
    }

    #[test]
    fn test_spoken_rejection() {
        let result = classify_detailed(&customer("Not interested."));
        assert_eq!(result.label, CustomerInterest::NotInterested);
        assert_eq!(result.scores, ScoreSet::new(5, 0, 0));
    }

    #[test]
    fn test_think_about_it_is_follow_up() {
        let result = classify_detailed(&customer("I'll think about it"));
        assert_eq!(result.label, CustomerInterest::FollowUp);
        assert_eq!(result.scores, ScoreSet::new(0, 0, 3));
    }

    #[test]
    fn test_multiple_rejections_sum() {
        let result = classify_detailed(&customer("Stop calling, not interested"));
        assert_eq!(result.label, CustomerInterest::NotInterested);
        assert_eq!(result.scores, ScoreSet::new(10, 0, 0));
    }

    #[test]
    fn test_buying_intent() {
        let result = classify_detailed(&customer("I'm interested in buying now"));
        assert_eq!(result.label, CustomerInterest::Interested);
        assert_eq!(result.scores, ScoreSet::new(0, 10, 0));
        assert!(!result.tie_broken);
    }

    #[test]
    fn test_tie_goes_to_earlier_interest() {
        let result = classify_detailed(&customer("Interested in buying, but no thanks"));
        assert_eq!(result.scores, ScoreSet::new(5, 5, 0));
        assert!(result.tie_broken);
        assert_eq!(result.label, CustomerInterest::Interested);
    }

    #[test]
    fn test_tie_goes_to_earlier_rejection() {
        let result = classify_detailed(&customer("No thanks, I'm interested in something else"));
        assert_eq!(result.scores, ScoreSet::new(5, 5, 0));
        assert!(result.tie_broken);
        assert_eq!(result.label, CustomerInterest::NotInterested);
    }

    #[test]
    fn test_tie_at_equal_position_goes_to_not_interested() {
        // Both lexicons locate a phrase at offset 0
        let lexicons = LexiconSet {
            not_interested: Lexicon::from_pairs(Category::NotInterested, &[("maybe not", 2)]),
            interested: Lexicon::from_pairs(Category::Interested, &[("maybe", 2)]),
            maybe: Lexicon::from_pairs(Category::Maybe, &[("later", 1)]),
        };
        let classifier = InterestClassifier::new(lexicons, ClassifierConfig::default());
        let result = classifier.classify_detailed(&customer("maybe not"));
        assert_eq!(result.scores, ScoreSet::new(2, 2, 0));
        assert!(result.tie_broken);
        assert_eq!(result.label, CustomerInterest::NotInterested);
    }

    #[test]
    fn test_rejection_needs_to_beat_maybe() {
        // "call me later" sits in both the not-interested and maybe tables
        let result = classify_detailed(&customer("call me later"));
        assert_eq!(result.scores, ScoreSet::new(2, 0, 2));
        assert_eq!(result.label, CustomerInterest::NotInterested);
    }

    #[test]
    fn test_maybe_beats_weaker_interest() {
        let result = classify_detailed(&customer("Possibly, I'll let you know. Send me the brochure"));
        assert_eq!(result.scores, ScoreSet::new(0, 1, 5));
        assert_eq!(result.label, CustomerInterest::FollowUp);
    }

    #[test]
    fn test_interest_wins_ties_with_maybe() {
        let result = classify_detailed(&customer("Possibly. Is there a mortgage option?"));
        assert_eq!(result.scores, ScoreSet::new(0, 3, 2));
        assert_eq!(result.label, CustomerInterest::Interested);
    }

    #[test]
    fn test_no_signal_is_undetermined() {
        let result = classify_detailed(&customer("Hello, who is this?"));
        assert_eq!(result.scores, ScoreSet::default());
        assert_eq!(result.label, CustomerInterest::Undetermined);
        assert_eq!(result.label.as_str(), "");
    }

    #[test]
    fn test_agent_turns_are_ignored() {
        let turns = vec![
            Utterance::agent("Are you interested in buying? Not interested is fine too."),
            Utterance::new(Speaker::Other, "stop calling"),
            Utterance::user("ok"),
        ];
        assert_eq!(classify(&turns), CustomerInterest::Undetermined);
        assert_eq!(classify(&[]), CustomerInterest::Undetermined);
        assert_eq!(
            classify(&[Utterance::agent("I'm interested, said nobody")]),
            CustomerInterest::Undetermined
        );
    }

    #[test]
    fn test_user_turns_are_joined() {
        let turns = vec![
            Utterance::user("I have"),
            Utterance::agent("Yes?"),
            Utterance::user("an agent already"),
        ];
        let result = classify_detailed(&turns);
        assert_eq!(result.normalized_text, "i have an agent already");
        assert_eq!(result.label, CustomerInterest::NotInterested);
    }

    #[test]
    fn test_label_is_always_legal() {
        let inputs = [
            "",
            "???",
            "yes",
            "Can you share the brochure? Not now though, maybe later",
            "ROI? mortgage? price range? payment plan?",
            "leave me alone, remove me from your list",
            "i might, i need time, we'll see",
            "ça va très bien, merci",
        ];
        for input in inputs {
            let label = classify(&customer(input));
            assert!(
                ["Interested", "Not Interested", "Follow Up", ""].contains(&label.as_str()),
                "input {input:?} gave {label:?}"
            );
        }
    }

    #[test]
    fn test_huge_override_weights_do_not_overflow() {
        let lexicons = LexiconSet {
            not_interested: Lexicon::from_pairs(
                Category::NotInterested,
                &[("alpha", u32::MAX), ("beta", 1)],
            ),
            ..LexiconSet::builtin()
        };
        let classifier = InterestClassifier::new(lexicons, ClassifierConfig::default());
        let result = classifier.classify_detailed(&[Utterance::user("alpha beta")]);
        assert_eq!(result.scores, ScoreSet::new(u32::MAX, 0, 0));
        assert_eq!(result.label, CustomerInterest::NotInterested);
    }

    #[test]
    fn test_hyphen_joined_words_need_space_mode() {
        // Deleting the hyphen merges the words, and no phrase survives that
        let merged = classify_detailed(&customer("No-thanks, stop-calling"));
        assert_eq!(merged.normalized_text, "nothanks stopcalling");
        assert_eq!(merged.label, CustomerInterest::Undetermined);
        assert_eq!(classify(&customer("Not-interested!")), CustomerInterest::Undetermined);

        let config = ClassifierConfig {
            punctuation: PunctuationMode::Space,
            ..ClassifierConfig::default()
        };
        let classifier = InterestClassifier::new(LexiconSet::builtin(), config);
        assert_eq!(classifier.config().punctuation, PunctuationMode::Space);

        let split = classifier.classify_detailed(&customer("No-thanks, stop-calling"));
        assert_eq!(split.normalized_text, "no thanks stop calling");
        assert_eq!(split.scores, ScoreSet::new(10, 0, 0));
        assert_eq!(split.label, CustomerInterest::NotInterested);
        assert_eq!(
            classifier.classify(&customer("Not-interested!")),
            CustomerInterest::NotInterested
        );
    }

    #[test]
    fn test_decide_only_breaks_real_ties() {
        let never = || -> bool { panic!("tie-break should not run") };
        assert_eq!(
            decide(ScoreSet::new(0, 0, 0), never),
            (CustomerInterest::Undetermined, false)
        );
        assert_eq!(
            decide(ScoreSet::new(5, 3, 5), never),
            (CustomerInterest::NotInterested, false)
        );
        assert_eq!(
            decide(ScoreSet::new(5, 3, 6), never),
            (CustomerInterest::FollowUp, false)
        );
        assert_eq!(
            decide(ScoreSet::new(0, 4, 4), never),
            (CustomerInterest::Interested, false)
        );
        assert_eq!(decide(ScoreSet::new(3, 3, 9), || true), (CustomerInterest::Interested, true));
        assert_eq!(decide(ScoreSet::new(3, 3, 0), || false), (CustomerInterest::NotInterested, true));
    }
}
