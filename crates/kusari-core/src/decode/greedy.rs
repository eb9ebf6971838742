//! # Greedy Decoding
//!
//! Commits one label per token, left to right, looking only at the label
//! already chosen for the previous token. Cheap, but with no guarantee of
//! matching the exact decoder.

use tracing::debug;

use crate::crf::FeatureSet;
use crate::types::{Alphabet, Label, Labeling};

/// Left-to-right local decoder, `O(n · L)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyDecoder;

impl GreedyDecoder {
    /// Create a new greedy decoder.
    pub fn new() -> Self {
        Self
    }

    /// Label each token with the alphabet label whose weighted activation
    /// sum is strictly greatest given the previous committed label.
    ///
    /// Ties keep the earliest label in alphabet order. No probability is
    /// computed.
    pub fn decode(&self, tokens: &[String], features: &FeatureSet, alphabet: &Alphabet) -> Labeling {
        debug!(tokens = tokens.len(), labels = alphabet.len(), "greedy decode");

        let mut labels: Vec<Label> = Vec::with_capacity(tokens.len());
        for pos in 0..tokens.len() {
            let prev = labels.last();
            let mut best: Option<(&Label, f64)> = None;
            for label in alphabet {
                let score = features.local_score(tokens, pos, label, prev);
                if best.is_none_or(|(_, best_score)| score > best_score) {
                    best = Some((label, score));
                }
            }
            // A nonempty alphabet always yields a candidate.
            if let Some((label, _)) = best {
                labels.push(label.clone());
            }
        }

        Labeling::new(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ExactDecoder;

    fn tokens(sentence: &str) -> Vec<String> {
        sentence.split_whitespace().map(str::to_string).collect()
    }

    fn label_changes(_: &[String], _: usize, curr: &Label, prev: Option<&Label>) -> f64 {
        match prev {
            Some(prev) if prev != curr => 1.0,
            _ => 0.0,
        }
    }

    #[test]
    fn alternates_when_changes_are_rewarded() {
        let features = FeatureSet::new().with_feature(label_changes, 1.0);
        let alphabet = Alphabet::new(["A", "B"]).unwrap();

        let labeling = GreedyDecoder::new().decode(&tokens("a b c d"), &features, &alphabet);
        assert_eq!(labeling.names(), vec!["A", "B", "A", "B"]);
    }

    #[test]
    fn first_label_wins_when_all_scores_are_negative() {
        let features = FeatureSet::new().with_feature(
            |_: &[String], _: usize, _: &Label, _: Option<&Label>| -5.0,
            1.0,
        );
        let alphabet = Alphabet::new(["X", "Y"]).unwrap();

        let labeling = GreedyDecoder::new().decode(&tokens("a b"), &features, &alphabet);
        assert_eq!(labeling.names(), vec!["X", "X"]);
    }

    #[test]
    fn can_disagree_with_exact_decoder() {
        // A small bonus for B up front blocks a large A -> A bonus later.
        let features = FeatureSet::new()
            .with_feature(
                |_: &[String], i: usize, curr: &Label, _: Option<&Label>| {
                    if i == 0 && curr == "B" { 1.0 } else { 0.0 }
                },
                1.0,
            )
            .with_feature(
                |_: &[String], _: usize, curr: &Label, prev: Option<&Label>| {
                    if curr == "A" && prev.is_some_and(|p| p == "A") { 1.0 } else { 0.0 }
                },
                5.0,
            );
        let alphabet = Alphabet::new(["A", "B"]).unwrap();
        let words = tokens("x y");

        let greedy = GreedyDecoder::new().decode(&words, &features, &alphabet);
        let exact = ExactDecoder::new().decode(&words, &features, &alphabet).unwrap();
        assert_eq!(greedy.names(), vec!["B", "A"]);
        assert_eq!(exact.labeling.names(), vec!["A", "A"]);
    }

    #[test]
    fn empty_sentence_yields_empty_labeling() {
        let features = FeatureSet::new().with_feature(label_changes, 1.0);
        let alphabet = Alphabet::new(["A"]).unwrap();
        assert!(GreedyDecoder::new().decode(&[], &features, &alphabet).is_empty());
    }
}
