//! # Exhaustive Decoding
//!
//! Scores every labeling of the sentence and keeps the most probable one.
//! Exponential in sentence length; this is the reference the faster
//! decoders are checked against.

use tracing::debug;

use crate::crf::FeatureSet;
use crate::crf::enumerate::{IndexPaths, labeling_count};
use crate::error::Result;
use crate::scoring::{SequenceScorer, logsumexp};
use crate::types::{Alphabet, Labeling, ScoredLabeling};

/// Exact decoder by enumeration of all `L^n` labelings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactDecoder;

impl ExactDecoder {
    /// Create a new exact decoder.
    pub fn new() -> Self {
        Self
    }

    /// Find the most probable labeling of `tokens`.
    ///
    /// Candidates are visited in enumeration order and one replaces the
    /// current best only with a strictly higher score, so the first labeling
    /// reaching the maximum wins a tie. `Z` is shared by every candidate of
    /// the sentence, so comparing log scores selects the same labeling as
    /// comparing probabilities.
    ///
    /// # Errors
    ///
    /// Returns [`crate::KusariError::TooManyLabelings`] when the label space
    /// cannot be enumerated.
    pub fn decode(
        &self,
        tokens: &[String],
        features: &FeatureSet,
        alphabet: &Alphabet,
    ) -> Result<ScoredLabeling> {
        let candidates = labeling_count(alphabet.len(), tokens.len())?;
        debug!(tokens = tokens.len(), candidates, "exact decode");

        let scorer = SequenceScorer::new(features, alphabet);
        let mut paths = IndexPaths::new(alphabet.len(), tokens.len());
        let mut best: Option<(Vec<usize>, f64)> = None;
        let mut log_z = f64::NEG_INFINITY;

        while let Some(path) = paths.next_path() {
            let log_score = scorer.log_score_path(tokens, path);
            log_z = logsumexp(log_z, log_score);
            if best
                .as_ref()
                .is_none_or(|(_, best_score)| log_score > *best_score)
            {
                best = Some((path.to_vec(), log_score));
            }
        }

        // The counter always yields at least one path for a nonempty alphabet.
        let (best_path, best_score) = best.unwrap_or_default();
        let labeling: Labeling = best_path.iter().map(|&idx| alphabet[idx].clone()).collect();

        Ok(ScoredLabeling {
            labeling,
            score: best_score.exp(),
            probability: (best_score - log_z).exp(),
        })
    }
}
