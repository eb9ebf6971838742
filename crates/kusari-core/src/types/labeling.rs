use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::label::Label;
use crate::error::{KusariError, Result};

/// One label per token of a sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labeling(Vec<Label>);

impl Labeling {
    /// Creates a labeling from labels in sentence order.
    #[must_use]
    pub fn new(labels: Vec<Label>) -> Self {
        Self(labels)
    }

    /// Labels in sentence order.
    pub fn labels(&self) -> &[Label] {
        &self.0
    }

    /// Label names in sentence order.
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(Label::as_str).collect()
    }

    /// Consumes the labeling, returning its labels.
    pub fn into_inner(self) -> Vec<Label> {
        self.0
    }
}

impl Deref for Labeling {
    type Target = [Label];

    fn deref(&self) -> &[Label] {
        &self.0
    }
}

impl<L: Into<Label>> FromIterator<L> for Labeling {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<Label>> for Labeling {
    fn from(labels: Vec<Label>) -> Self {
        Self(labels)
    }
}

/// A labeling together with its score and probability under the weights
/// in effect when it was computed.
///
/// Never cache one of these across a weight update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLabeling {
    /// The candidate labeling.
    pub labeling: Labeling,
    /// Unnormalized score, `exp` of the weighted activation sum.
    pub score: f64,
    /// Normalized probability in `[0.0, 1.0]`.
    pub probability: f64,
}

/// A tokenized sentence paired with its gold labeling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    tokens: Vec<String>,
    labeling: Labeling,
}

impl TrainingExample {
    /// Pairs tokens with their gold labels.
    ///
    /// # Errors
    ///
    /// Returns [`KusariError::LengthMismatch`] unless there is exactly one
    /// label per token.
    pub fn new(tokens: Vec<String>, labeling: Labeling) -> Result<Self> {
        if tokens.len() != labeling.len() {
            return Err(KusariError::LengthMismatch {
                tokens: tokens.len(),
                labels: labeling.len(),
            });
        }
        Ok(Self { tokens, labeling })
    }

    /// The sentence tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The gold labeling.
    pub fn labeling(&self) -> &Labeling {
        &self.labeling
    }
}
