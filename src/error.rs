use std::path::PathBuf;

use thiserror::Error;

/// Errors raised outside the classification core
///
/// Classifying a transcript never fails; these cover loading lexicon
/// overrides from disk and running the concurrent batch driver.
#[derive(Error, Debug)]
pub enum CallsiftError {
    /// A lexicon file could not be read
    #[error("failed to read lexicon file {path:?}: {source}")]
    LexiconIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A lexicon line is not `phrase<TAB>weight`
    #[error("{path:?} line {line}: {message}")]
    LexiconFormat {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A batch worker panicked or was cancelled
    #[error("batch worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, CallsiftError>;
