//! Stock indicator features for the `train` binary.
//!
//! Each builder returns a plain closure, so these go through exactly the
//! same [`FeatureFunction`] interface as caller-written features.

use std::collections::BTreeSet;

use kusari_core::{Alphabet, FeatureFunction, FeatureSet, Label, TrainingExample};

/// Fires when the token is labeled `label`.
pub fn label_bias(label: Label) -> impl FeatureFunction {
    move |_: &[String], _: usize, current: &Label, _: Option<&Label>| {
        if *current == label { 1.0 } else { 0.0 }
    }
}

/// Fires on the label pair `previous -> current`; a `None` previous label
/// matches the first token of the sentence.
pub fn transition(previous: Option<Label>, current: Label) -> impl FeatureFunction {
    move |_: &[String], _: usize, curr: &Label, prev: Option<&Label>| {
        if *curr == current && prev == previous.as_ref() {
            1.0
        } else {
            0.0
        }
    }
}

/// Fires when the lowercased token equals `token` and is labeled `label`.
pub fn token_label(token: String, label: Label) -> impl FeatureFunction {
    move |tokens: &[String], i: usize, current: &Label, _: Option<&Label>| {
        if *current == label && tokens[i].to_lowercase() == token {
            1.0
        } else {
            0.0
        }
    }
}

/// Label biases plus every transition, including from the sentence start,
/// all with zero weight.
pub fn indicator_features(alphabet: &Alphabet) -> FeatureSet {
    let mut features = FeatureSet::new();
    for current in alphabet {
        features.add(label_bias(current.clone()), 0.0);
        features.add(transition(None, current.clone()), 0.0);
        for previous in alphabet {
            features.add(transition(Some(previous.clone()), current.clone()), 0.0);
        }
    }
    features
}

/// [`indicator_features`] plus one token/label feature for every pair seen
/// in the gold data.
pub fn corpus_features(alphabet: &Alphabet, examples: &[TrainingExample]) -> FeatureSet {
    let mut features = indicator_features(alphabet);
    let observed: BTreeSet<(String, Label)> = examples
        .iter()
        .flat_map(|example| {
            example
                .tokens()
                .iter()
                .zip(example.labeling().iter())
                .map(|(token, label)| (token.to_lowercase(), label.clone()))
        })
        .collect();
    for (token, label) in observed {
        features.add(token_label(token, label), 0.0);
    }
    features
}
