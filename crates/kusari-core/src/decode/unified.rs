//! # Unified Tagger Interface
//!
//! Picks a decoding strategy from configuration and labels sentences with
//! it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crf::FeatureSet;
use crate::decode::{ExactDecoder, GreedyDecoder, Tokenizer, ViterbiDecoder};
use crate::error::Result;
use crate::types::{Alphabet, Labeling};

/// Decoding strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Enumerate every labeling (exponential, reference behavior).
    Exact,
    /// Dynamic programming with results identical to `Exact`.
    #[default]
    Viterbi,
    /// Left-to-right local choice, approximate.
    Greedy,
}

impl fmt::Display for DecodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Viterbi => write!(f, "viterbi"),
            Self::Greedy => write!(f, "greedy"),
        }
    }
}

/// Configuration for the tagger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    /// Which decoder to use
    pub mode: DecodeMode,
}

impl TaggerConfig {
    /// Create a new tagger configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the decode mode.
    pub fn with_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Labels sentences with the configured decoder.
#[derive(Debug, Clone, Default)]
pub struct Tagger {
    config: TaggerConfig,
    tokenizer: Tokenizer,
}

impl Tagger {
    /// Create a new tagger with the given configuration.
    pub fn new(config: TaggerConfig) -> Self {
        Self {
            config,
            tokenizer: Tokenizer::new(),
        }
    }

    /// Label a token sequence.
    ///
    /// # Errors
    ///
    /// Only [`DecodeMode::Exact`] can fail, when the label space is too large
    /// to enumerate.
    pub fn tag(
        &self,
        tokens: &[String],
        features: &FeatureSet,
        alphabet: &Alphabet,
    ) -> Result<Labeling> {
        match self.config.mode {
            DecodeMode::Exact => Ok(ExactDecoder::new()
                .decode(tokens, features, alphabet)?
                .labeling),
            DecodeMode::Viterbi => Ok(ViterbiDecoder::new()
                .decode(tokens, features, alphabet)
                .labeling),
            DecodeMode::Greedy => Ok(GreedyDecoder::new().decode(tokens, features, alphabet)),
        }
    }

    /// Tokenize a raw sentence and label it.
    ///
    /// # Errors
    ///
    /// See [`Tagger::tag`].
    ///
    /// # Examples
    /// ```
    /// use kusari_core::crf::FeatureSet;
    /// use kusari_core::decode::{DecodeMode, Tagger, TaggerConfig};
    /// use kusari_core::types::{Alphabet, Label};
    ///
    /// let features = FeatureSet::new().with_feature(
    ///     |_: &[String], _: usize, curr: &Label, prev: Option<&Label>| {
    ///         if prev.is_some_and(|p| p != curr) { 1.0 } else { 0.0 }
    ///     },
    ///     1.0,
    /// );
    /// let alphabet = Alphabet::new(["A", "B"]).unwrap();
    /// let tagger = Tagger::new(TaggerConfig::new().with_mode(DecodeMode::Exact));
    ///
    /// let (tokens, labeling) = tagger.tag_sentence("the fat cat", &features, &alphabet).unwrap();
    /// assert_eq!(tokens.len(), 3);
    /// assert_eq!(labeling.names(), vec!["A", "B", "A"]);
    /// ```
    pub fn tag_sentence(
        &self,
        sentence: &str,
        features: &FeatureSet,
        alphabet: &Alphabet,
    ) -> Result<(Vec<String>, Labeling)> {
        let tokens = self.tokenizer.tokenize(sentence);
        let labeling = self.tag(&tokens, features, alphabet)?;
        Ok((tokens, labeling))
    }

    /// Get the tagger configuration.
    pub fn config(&self) -> &TaggerConfig {
        &self.config
    }
}

/// Fraction of tokens whose predicted label matches the gold label.
///
/// Returns `None` when there are no tokens to compare.
///
/// # Panics
///
/// `gold` and `predicted` must have the same length.
pub fn token_accuracy(gold: &Labeling, predicted: &Labeling) -> Option<f64> {
    assert_eq!(gold.len(), predicted.len(), "labelings differ in length");
    if gold.is_empty() {
        return None;
    }
    let correct = gold.iter().zip(predicted.iter()).filter(|(g, p)| g == p).count();
    Some(correct as f64 / gold.len() as f64)
}
