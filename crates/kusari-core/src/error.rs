use thiserror::Error;

/// Errors that can occur during Kusari core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KusariError {
    /// The label alphabet has no labels.
    #[error("label alphabet is empty")]
    EmptyAlphabet,

    /// The same label appears twice in an alphabet.
    #[error("duplicate label in alphabet: {label:?}")]
    DuplicateLabel {
        /// The repeated label.
        label: String,
    },

    /// A labeling does not have one label per token.
    #[error("labeling has {labels} labels for {tokens} tokens")]
    LengthMismatch {
        /// Number of tokens in the sentence.
        tokens: usize,
        /// Number of labels in the labeling.
        labels: usize,
    },

    /// The number of candidate labelings does not fit in memory addressing.
    #[error("{alphabet}^{tokens} labelings cannot be enumerated")]
    TooManyLabelings {
        /// Alphabet size.
        alphabet: usize,
        /// Sentence length.
        tokens: usize,
    },
}

/// Result type alias for Kusari operations.
pub type Result<T> = std::result::Result<T, KusariError>;
