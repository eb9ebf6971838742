use std::fmt;

use kusari_core::KusariError;
use thiserror::Error;

/// Errors surfaced by corpus loading and training.
#[derive(Debug, Error)]
pub enum TrainerError {
    /// The corpus or config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The corpus is malformed at the given 1-based line.
    #[error("{kind} (line {line})")]
    Corpus {
        /// Line of the offending input.
        line: usize,
        /// What is wrong with it.
        kind: CorpusErrorKind,
    },

    /// A trainer setting is out of range.
    #[error("invalid trainer config: {0}")]
    InvalidConfig(String),

    /// A weight update was NaN or infinite.
    #[error("feature {feature} got a non-finite weight in round {round}")]
    NonFiniteWeight {
        /// Index of the feature in its feature set.
        feature: usize,
        /// Update round that produced it.
        round: usize,
    },

    /// A JSON config file could not be parsed.
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The core engine rejected an input.
    #[error(transparent)]
    Core(#[from] KusariError),
}

/// Ways a training corpus can be malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusErrorKind {
    /// The first line lists no labels.
    EmptyHeader,
    /// The first line lists a label twice.
    DuplicateLabel(String),
    /// A label line does not have one label per token.
    LabelCount {
        /// Number of tokens in the sentence.
        expected: usize,
        /// Number of labels on the line.
        found: usize,
    },
    /// A label line uses a label missing from the header.
    UnknownLabel(String),
    /// The corpus ends after a sentence with no label line.
    MissingLabels,
}

impl fmt::Display for CorpusErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyHeader => write!(f, "no labels on the header line"),
            Self::DuplicateLabel(label) => write!(f, "duplicate label {label:?}"),
            Self::LabelCount { expected, found } if found < expected => {
                write!(f, "not enough labels: expected {expected}, found {found}")
            }
            Self::LabelCount { expected, found } => {
                write!(f, "too many labels: expected {expected}, found {found}")
            }
            Self::UnknownLabel(label) => write!(f, "invalid label {label:?}"),
            Self::MissingLabels => write!(f, "sentence has no label line"),
        }
    }
}

/// Result type alias for trainer operations.
pub type Result<T> = std::result::Result<T, TrainerError>;
