//! # Viterbi Decoding for CRF
//!
//! Finds the same labeling as [`super::ExactDecoder`] without enumerating
//! the label space.
//!
//! Path scores are accumulated left to right, the order the exhaustive
//! decoder sums them in, so rounding ranks labelings identically in both.
//! A max-sum pass from a fixed prefix gives the best score any completion
//! of it can reach; adding `+` is monotone under rounding, so that pass is
//! exact. The path is read left to right, taking at each position the
//! lowest-indexed label whose best completion reaches the optimum, which is
//! the first optimal labeling in enumeration order. Each completion pass
//! costs `O(n · L²)`, for `O(n² · L³)` per sentence.

use tracing::debug;

use crate::crf::FeatureSet;
use crate::scoring::SequenceScorer;
use crate::types::{Alphabet, Labeling, ScoredLabeling};

/// Viterbi decoder for linear-chain label sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViterbiDecoder;

/// Best candidate seen so far at one step of the path reconstruction.
#[derive(Debug, Clone, Copy)]
struct PathState {
    score: f64,
    label: usize,
}

impl ViterbiDecoder {
    /// Create a new Viterbi decoder.
    pub fn new() -> Self {
        Self
    }

    /// Decode the optimal labeling using the Viterbi algorithm.
    ///
    /// The probability of the result is normalized with the forward
    /// partition function.
    pub fn decode(
        &self,
        tokens: &[String],
        features: &FeatureSet,
        alphabet: &Alphabet,
    ) -> ScoredLabeling {
        let scorer = SequenceScorer::new(features, alphabet);
        let seq_len = tokens.len();
        debug!(tokens = seq_len, labels = alphabet.len(), "viterbi decode");

        if seq_len == 0 {
            return ScoredLabeling {
                labeling: Labeling::default(),
                score: 1.0,
                probability: 1.0,
            };
        }

        let mut path = Vec::with_capacity(seq_len);
        let mut prefix = 0.0;
        let mut prev = None;
        for pos in 0..seq_len {
            let best = Self::best_step(alphabet.len(), |label| {
                let value = prefix + scorer.local_score_at(tokens, pos, label, prev);
                Self::best_completion(tokens, &scorer, pos, label, value)
            });
            prefix += scorer.local_score_at(tokens, pos, best.label, prev);
            path.push(best.label);
            prev = Some(best.label);
        }

        let log_z = scorer.log_partition_forward(tokens);
        let labeling: Labeling = path.iter().map(|&idx| alphabet[idx].clone()).collect();

        ScoredLabeling {
            labeling,
            score: prefix.exp(),
            probability: (prefix - log_z).exp(),
        }
    }

    /// Best final score reachable from `label` at `position` when the path
    /// up to and including it sums to `value`.
    fn best_completion(
        tokens: &[String],
        scorer: &SequenceScorer<'_>,
        position: usize,
        label: usize,
        value: f64,
    ) -> f64 {
        let num_labels = scorer.alphabet().len();
        let mut states = vec![(label, value)];

        for pos in position + 1..tokens.len() {
            states = (0..num_labels)
                .map(|next| {
                    let best = states
                        .iter()
                        .map(|&(prev, total)| {
                            total + scorer.local_score_at(tokens, pos, next, Some(prev))
                        })
                        .fold(f64::NEG_INFINITY, f64::max);
                    (next, best)
                })
                .collect();
        }

        states
            .into_iter()
            .map(|(_, total)| total)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Arg-max over labels; a later label must be strictly better to win.
    fn best_step(num_labels: usize, mut score_of: impl FnMut(usize) -> f64) -> PathState {
        let mut best = PathState {
            score: score_of(0),
            label: 0,
        };
        for label in 1..num_labels {
            let score = score_of(label);
            if score > best.score {
                best = PathState { score, label };
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ExactDecoder;
    use crate::types::Label;

    fn tokens(sentence: &str) -> Vec<String> {
        sentence.split_whitespace().map(str::to_string).collect()
    }

    fn label_changes(_: &[String], _: usize, curr: &Label, prev: Option<&Label>) -> f64 {
        match prev {
            Some(prev) if prev != curr => 1.0,
            _ => 0.0,
        }
    }

    fn a_then_b(_: &[String], _: usize, curr: &Label, prev: Option<&Label>) -> f64 {
        if curr == "B" && prev.is_some_and(|p| p == "A") {
            1.0
        } else {
            0.0
        }
    }

    #[test]
    fn test_viterbi_simple() {
        let features = FeatureSet::new()
            .with_feature(label_changes, 0.75)
            .with_feature(a_then_b, 0.25);
        let alphabet = Alphabet::new(["A", "B"]).unwrap();

        let best = ViterbiDecoder::new().decode(
            &tokens("This is a test sentence"),
            &features,
            &alphabet,
        );
        assert_eq!(best.labeling.names(), vec!["A", "B", "A", "B", "A"]);
        assert!((best.score - 3.5f64.exp()).abs() < 1e-9);
    }

    #[test]
    fn test_viterbi_empty() {
        let features = FeatureSet::new().with_feature(label_changes, 1.0);
        let alphabet = Alphabet::new(["A", "B"]).unwrap();

        let best = ViterbiDecoder::new().decode(&[], &features, &alphabet);
        assert!(best.labeling.is_empty());
        assert_eq!(best.probability, 1.0);
    }

    #[test]
    fn ties_match_exact_decoder() {
        let features = FeatureSet::new().with_feature(label_changes, 0.0);
        let alphabet = Alphabet::new(["B", "A", "C"]).unwrap();
        let words = tokens("x y z w");

        let viterbi = ViterbiDecoder::new().decode(&words, &features, &alphabet);
        let exact = ExactDecoder::new().decode(&words, &features, &alphabet).unwrap();
        assert_eq!(viterbi.labeling, exact.labeling);
        assert_eq!(viterbi.labeling.names(), vec!["B", "B", "B", "B"]);
    }

    #[test]
    fn rounding_ties_resolve_like_exact_decoder() {
        // AAA sums 0.1 + 0.2 + 0.3 and BBB sums 0.3 + 0.2 + 0.1; left to
        // right the first rounds up, so AAA is strictly best.
        fn position_weight(_: &[String], i: usize, curr: &Label, _: Option<&Label>) -> f64 {
            let ramp = [0.1, 0.2, 0.3];
            if curr == "A" { ramp[i] } else { ramp[2 - i] }
        }
        let features = FeatureSet::new()
            .with_feature(position_weight, 1.0)
            .with_feature(label_changes, -10.0);
        let alphabet = Alphabet::new(["A", "B"]).unwrap();
        let words = tokens("x y z");

        let viterbi = ViterbiDecoder::new().decode(&words, &features, &alphabet);
        let exact = ExactDecoder::new().decode(&words, &features, &alphabet).unwrap();
        assert_eq!(exact.labeling.names(), vec!["A", "A", "A"]);
        assert_eq!(viterbi.labeling, exact.labeling);
        assert_eq!(viterbi.score, exact.score);
    }

    #[test]
    fn probability_matches_exact_decoder() {
        let features = FeatureSet::new()
            .with_feature(label_changes, 0.4)
            .with_feature(a_then_b, -0.9);
        let alphabet = Alphabet::new(["A", "B", "C"]).unwrap();
        let words = tokens("one two three four");

        let viterbi = ViterbiDecoder::new().decode(&words, &features, &alphabet);
        let exact = ExactDecoder::new().decode(&words, &features, &alphabet).unwrap();
        assert!((viterbi.probability - exact.probability).abs() < 1e-9);
        assert!((viterbi.score - exact.score).abs() / exact.score < 1e-12);
    }
}
