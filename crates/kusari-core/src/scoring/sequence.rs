//! # Sequence Scoring
//!
//! Unnormalized scores, the partition function and normalized probabilities
//! of labelings under the current feature weights.
//!
//! Everything is computed in log space first: `score` is `exp(log_score)`
//! and probabilities are `exp(log_score - log Z)`, which stays finite where
//! the raw exponentials would overflow.

use tracing::trace;

use super::assert_aligned;
use super::math::logsumexp;
use crate::crf::FeatureSet;
use crate::crf::enumerate::{IndexPaths, labeling_count};
use crate::error::Result;
use crate::types::{Alphabet, Label, Labeling, ScoredLabeling};

/// Scores labelings of sentences against a feature set and label alphabet.
///
/// Holds shared borrows only, so weights cannot change while a scorer is
/// alive.
#[derive(Debug, Clone, Copy)]
pub struct SequenceScorer<'a> {
    features: &'a FeatureSet,
    alphabet: &'a Alphabet,
}

impl<'a> SequenceScorer<'a> {
    /// Create a scorer over the given features and alphabet.
    pub fn new(features: &'a FeatureSet, alphabet: &'a Alphabet) -> Self {
        Self { features, alphabet }
    }

    /// The feature set being scored against.
    pub fn features(&self) -> &'a FeatureSet {
        self.features
    }

    /// The label alphabet candidate labelings are drawn from.
    pub fn alphabet(&self) -> &'a Alphabet {
        self.alphabet
    }

    /// Weighted activation sum of a labeling, the log of its score.
    ///
    /// # Panics
    ///
    /// `labels` must have exactly one label per token.
    pub fn log_score(&self, tokens: &[String], labels: &[Label]) -> f64 {
        assert_aligned(tokens, labels);
        labels
            .iter()
            .enumerate()
            .map(|(position, current)| {
                let previous = position.checked_sub(1).map(|p| &labels[p]);
                self.features
                    .local_score(tokens, position, current, previous)
            })
            .sum()
    }

    /// Unnormalized score `exp(Σ_i Σ_f w_f · f(tokens, i, y_i, y_{i-1}))`.
    ///
    /// Positive in exact arithmetic; an empty labeling of an empty sentence
    /// scores 1. Below a log score of about -745 the result underflows to
    /// `0.0`, so use [`SequenceScorer::log_score`] when weights are extreme.
    ///
    /// # Panics
    ///
    /// `labels` must have exactly one label per token.
    ///
    /// # Examples
    /// ```
    /// use kusari_core::crf::FeatureSet;
    /// use kusari_core::scoring::SequenceScorer;
    /// use kusari_core::types::{Alphabet, Label, Labeling};
    ///
    /// let features = FeatureSet::new().with_feature(
    ///     |_: &[String], _: usize, current: &Label, _: Option<&Label>| {
    ///         if current == "B" { 1.0 } else { 0.0 }
    ///     },
    ///     0.5,
    /// );
    /// let alphabet = Alphabet::new(["A", "B"]).unwrap();
    /// let scorer = SequenceScorer::new(&features, &alphabet);
    ///
    /// let tokens = vec!["x".to_string(), "y".to_string()];
    /// let labeling: Labeling = ["B", "B"].into_iter().collect();
    /// assert!((scorer.score(&tokens, &labeling) - 1f64.exp()).abs() < 1e-12);
    /// ```
    pub fn score(&self, tokens: &[String], labels: &[Label]) -> f64 {
        self.log_score(tokens, labels).exp()
    }

    /// Weighted activation sum at one position, by alphabet index.
    #[inline]
    pub(crate) fn local_score_at(
        &self,
        tokens: &[String],
        position: usize,
        current: usize,
        previous: Option<usize>,
    ) -> f64 {
        self.features.local_score(
            tokens,
            position,
            &self.alphabet[current],
            previous.map(|p| &self.alphabet[p]),
        )
    }

    /// Log score of a labeling given as alphabet indices.
    ///
    /// Sums strictly left to right; the Viterbi decoder relies on this
    /// order to round ties the same way.
    pub(crate) fn log_score_path(&self, tokens: &[String], path: &[usize]) -> f64 {
        path.iter()
            .enumerate()
            .fold(0.0, |total, (position, &current)| {
                let previous = position.checked_sub(1).map(|p| path[p]);
                total + self.local_score_at(tokens, position, current, previous)
            })
    }

    /// `ln Z` by summing over every labeling of the sentence.
    ///
    /// # Errors
    ///
    /// Returns [`crate::KusariError::TooManyLabelings`] when the label space
    /// cannot be enumerated.
    pub fn log_partition_function(&self, tokens: &[String]) -> Result<f64> {
        labeling_count(self.alphabet.len(), tokens.len())?;
        let mut paths = IndexPaths::new(self.alphabet.len(), tokens.len());
        let mut log_z = f64::NEG_INFINITY;
        while let Some(path) = paths.next_path() {
            log_z = logsumexp(log_z, self.log_score_path(tokens, path));
        }
        trace!(tokens = tokens.len(), log_z, "exhaustive partition function");
        Ok(log_z)
    }

    /// Partition function `Z = Σ_L Score(tokens, L)` over every labeling.
    ///
    /// # Errors
    ///
    /// Returns [`crate::KusariError::TooManyLabelings`] when the label space
    /// cannot be enumerated.
    pub fn partition_function(&self, tokens: &[String]) -> Result<f64> {
        Ok(self.log_partition_function(tokens)?.exp())
    }

    /// `ln Z` by the forward recursion in `O(n · L²)`.
    ///
    /// Sums the same terms as [`SequenceScorer::log_partition_function`],
    /// grouped by the label at each position.
    pub fn log_partition_forward(&self, tokens: &[String]) -> f64 {
        if tokens.is_empty() {
            return 0.0;
        }
        let num_labels = self.alphabet.len();

        let mut alphas: Vec<f64> = (0..num_labels)
            .map(|label| self.local_score_at(tokens, 0, label, None))
            .collect();

        for position in 1..tokens.len() {
            let next: Vec<f64> = (0..num_labels)
                .map(|label| {
                    alphas
                        .iter()
                        .enumerate()
                        .fold(f64::NEG_INFINITY, |acc, (prev, &alpha)| {
                            let local = self.local_score_at(tokens, position, label, Some(prev));
                            logsumexp(acc, alpha + local)
                        })
                })
                .collect();
            alphas = next;
        }

        alphas.into_iter().fold(f64::NEG_INFINITY, logsumexp)
    }

    /// `Score(tokens, labels) / Z`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::KusariError::TooManyLabelings`] when the label space
    /// cannot be enumerated.
    ///
    /// # Panics
    ///
    /// `labels` must have exactly one label per token.
    pub fn probability(&self, tokens: &[String], labels: &[Label]) -> Result<f64> {
        let log_score = self.log_score(tokens, labels);
        let log_z = self.log_partition_function(tokens)?;
        Ok((log_score - log_z).exp())
    }

    /// Every labeling of the sentence with its score and probability, in
    /// enumeration order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::KusariError::TooManyLabelings`] when the label space
    /// cannot be enumerated.
    pub fn score_all(&self, tokens: &[String]) -> Result<Vec<ScoredLabeling>> {
        let count = labeling_count(self.alphabet.len(), tokens.len())?;
        let mut paths = IndexPaths::new(self.alphabet.len(), tokens.len());
        let mut candidates = Vec::with_capacity(count);
        let mut log_z = f64::NEG_INFINITY;
        while let Some(path) = paths.next_path() {
            let log_score = self.log_score_path(tokens, path);
            log_z = logsumexp(log_z, log_score);
            let labeling: Labeling = path.iter().map(|&idx| self.alphabet[idx].clone()).collect();
            candidates.push((labeling, log_score));
        }

        Ok(candidates
            .into_iter()
            .map(|(labeling, log_score)| ScoredLabeling {
                labeling,
                score: log_score.exp(),
                probability: (log_score - log_z).exp(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(sentence: &str) -> Vec<String> {
        sentence.split_whitespace().map(str::to_string).collect()
    }

    fn labeling(names: &[&str]) -> Labeling {
        names.iter().copied().collect()
    }

    fn even_position(_: &[String], i: usize, _: &Label, _: Option<&Label>) -> f64 {
        if i % 2 == 0 { 1.0 } else { 0.0 }
    }

    fn starts_with_t(s: &[String], i: usize, _: &Label, _: Option<&Label>) -> f64 {
        if s[i].to_lowercase().starts_with('t') {
            1.0
        } else {
            0.0
        }
    }

    fn label_changes(_: &[String], _: usize, curr: &Label, prev: Option<&Label>) -> f64 {
        match prev {
            Some(prev) if prev != curr => 1.0,
            _ => 0.0,
        }
    }

    #[test]
    fn test_score_labeling() {
        let features = FeatureSet::new()
            .with_feature(even_position, 0.25)
            .with_feature(starts_with_t, 0.75);
        let alphabet = Alphabet::new(["A", "B"]).unwrap();
        let scorer = SequenceScorer::new(&features, &alphabet);

        let score = scorer.score(
            &tokens("This is a test sentence"),
            &labeling(&["A", "B", "A", "B", "A"]),
        );
        assert!((score - 2.25f64.exp()).abs() < 1e-9);
    }

    #[test]
    fn empty_sentence_scores_one() {
        let features = FeatureSet::new().with_feature(even_position, 3.0);
        let alphabet = Alphabet::new(["A", "B"]).unwrap();
        let scorer = SequenceScorer::new(&features, &alphabet);

        assert_eq!(scorer.score(&[], &[]), 1.0);
        assert_eq!(scorer.partition_function(&[]).unwrap(), 1.0);
        assert_eq!(scorer.log_partition_forward(&[]), 0.0);
        assert_eq!(scorer.probability(&[], &[]).unwrap(), 1.0);
    }

    #[test]
    #[should_panic(expected = "labels for")]
    fn mismatched_labeling_panics() {
        let features = FeatureSet::new().with_feature(even_position, 1.0);
        let alphabet = Alphabet::new(["A", "B"]).unwrap();
        let scorer = SequenceScorer::new(&features, &alphabet);
        scorer.score(&tokens("one two three"), &labeling(&["A", "B"]));
    }

    #[test]
    fn scores_are_positive_even_with_negative_weights() {
        let features = FeatureSet::new()
            .with_feature(even_position, -40.0)
            .with_feature(label_changes, -25.0);
        let alphabet = Alphabet::new(["A", "B"]).unwrap();
        let scorer = SequenceScorer::new(&features, &alphabet);
        let words = tokens("a b c d");

        for candidate in scorer.score_all(&words).unwrap() {
            assert!(candidate.score > 0.0);
        }
    }

    #[test]
    fn probabilities_sum_to_one() {
        let features = FeatureSet::new()
            .with_feature(even_position, 0.25)
            .with_feature(starts_with_t, 0.75)
            .with_feature(label_changes, 1.5);
        let alphabet = Alphabet::new(["A", "B", "C"]).unwrap();
        let scorer = SequenceScorer::new(&features, &alphabet);
        let words = tokens("This is a test");

        let all = scorer.score_all(&words).unwrap();
        assert_eq!(all.len(), 81);
        let total: f64 = all.iter().map(|c| c.probability).sum();
        assert!((total - 1.0).abs() < 1e-9);

        let z = scorer.partition_function(&words).unwrap();
        let summed: f64 = all.iter().map(|c| c.score).sum();
        assert!((z - summed).abs() / z < 1e-12);
    }

    #[test]
    fn probability_matches_score_over_z() {
        let features = FeatureSet::new()
            .with_feature(starts_with_t, 0.75)
            .with_feature(label_changes, 0.5);
        let alphabet = Alphabet::new(["A", "B"]).unwrap();
        let scorer = SequenceScorer::new(&features, &alphabet);
        let words = tokens("the fat cat");
        let gold = labeling(&["A", "B", "B"]);

        let expected = scorer.score(&words, &gold) / scorer.partition_function(&words).unwrap();
        let probability = scorer.probability(&words, &gold).unwrap();
        assert!((probability - expected).abs() < 1e-12);
    }

    #[test]
    fn forward_partition_matches_exhaustive() {
        let features = FeatureSet::new()
            .with_feature(even_position, 0.3)
            .with_feature(starts_with_t, -1.1)
            .with_feature(label_changes, 0.7);
        let alphabet = Alphabet::new(["A", "B", "C"]).unwrap();
        let scorer = SequenceScorer::new(&features, &alphabet);

        for sentence in ["the", "the fat", "This is a test sentence"] {
            let words = tokens(sentence);
            let exhaustive = scorer.log_partition_function(&words).unwrap();
            let forward = scorer.log_partition_forward(&words);
            assert!((exhaustive - forward).abs() < 1e-9, "{sentence}");
        }
    }

    #[test]
    fn large_weights_stay_finite() {
        let features = FeatureSet::new().with_feature(label_changes, 500.0);
        let alphabet = Alphabet::new(["A", "B"]).unwrap();
        let scorer = SequenceScorer::new(&features, &alphabet);
        let words = tokens("a b c d");

        let probability = scorer
            .probability(&words, &labeling(&["A", "B", "A", "B"]))
            .unwrap();
        assert!((probability - 0.5).abs() < 1e-9);
    }

    #[test]
    fn tiny_scores_stay_available_in_log_space() {
        let features = FeatureSet::new().with_feature(label_changes, -400.0);
        let alphabet = Alphabet::new(["A", "B"]).unwrap();
        let scorer = SequenceScorer::new(&features, &alphabet);
        let words = tokens("a b c d");
        let alternating = labeling(&["A", "B", "A", "B"]);

        // -1200 is past the smallest f64 exponent
        assert_eq!(scorer.score(&words, &alternating), 0.0);
        assert_eq!(scorer.log_score(&words, &alternating), -1200.0);

        let probability = scorer.probability(&words, &alternating).unwrap();
        assert!(probability.is_finite() && probability >= 0.0);
    }
}
