pub mod batch;
pub mod classifier;
pub mod error;
pub mod io;
pub mod lexicon;
pub mod models;
pub mod text;

pub use batch::{
    BatchConfig, InterestSummary, LeadOutcome, classify_batch, classify_campaign,
    classify_sequential, select_latest_transcripts,
};
pub use classifier::{ClassifierConfig, InterestClassifier, classify, classify_detailed};
pub use error::{CallsiftError, Result};
pub use io::{
    BatchReport, HumanSummary, parse_campaign_file, parse_campaign_json, parse_transcript_file,
    parse_transcript_json,
};
pub use lexicon::{Category, Lexicon, LexiconSet};
pub use models::{
    Campaign, Classification, Conversation, CustomerInterest, Lead, ScoreSet, Speaker, Utterance,
};
pub use text::{FuzzyStrategy, PunctuationMode, normalize};
