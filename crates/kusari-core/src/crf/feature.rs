//! # Feature Functions
//!
//! A feature looks at the sentence, a position and a candidate label pair
//! and returns a real-valued activation. The model score of a labeling is
//! the weighted sum of every feature's activation over every position.

use std::fmt;

use crate::types::Label;

/// The single capability every feature provides.
///
/// `previous` is `None` at position 0. Any `Fn` with the matching signature
/// is a feature, so plain functions and closures can be used directly.
pub trait FeatureFunction {
    /// Activation of this feature at `position` when the token there is
    /// labeled `current` and the token before it is labeled `previous`.
    fn activation(
        &self,
        tokens: &[String],
        position: usize,
        current: &Label,
        previous: Option<&Label>,
    ) -> f64;
}

impl<F> FeatureFunction for F
where
    F: Fn(&[String], usize, &Label, Option<&Label>) -> f64,
{
    #[inline]
    fn activation(
        &self,
        tokens: &[String],
        position: usize,
        current: &Label,
        previous: Option<&Label>,
    ) -> f64 {
        self(tokens, position, current, previous)
    }
}

/// Ordered features with a weight for each, paired by index.
///
/// The feature list is fixed once built; only the weights change, and only
/// through `&mut` access, so a decode can never observe a half-applied
/// training round.
#[derive(Default)]
pub struct FeatureSet {
    features: Vec<Box<dyn FeatureFunction>>,
    weights: Vec<f64>,
}

impl FeatureSet {
    /// Creates an empty feature set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`FeatureSet::add`].
    #[must_use]
    pub fn with_feature<F>(mut self, feature: F, weight: f64) -> Self
    where
        F: FeatureFunction + 'static,
    {
        self.add(feature, weight);
        self
    }

    /// Appends a feature and returns its index.
    pub fn add<F>(&mut self, feature: F, weight: f64) -> usize
    where
        F: FeatureFunction + 'static,
    {
        self.features.push(Box::new(feature));
        self.weights.push(weight);
        self.features.len() - 1
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns `true` if there are no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Weight vector, parallel to the feature list.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Mutable weight vector, parallel to the feature list.
    pub fn weights_mut(&mut self) -> &mut [f64] {
        &mut self.weights
    }

    /// Replaces every weight.
    ///
    /// # Panics
    ///
    /// `weights` must have one entry per feature.
    pub fn set_weights(&mut self, weights: &[f64]) {
        assert_eq!(
            weights.len(),
            self.weights.len(),
            "weight vector length must match the number of features"
        );
        self.weights.copy_from_slice(weights);
    }

    /// Raw activation of feature `index` at one position.
    ///
    /// # Panics
    ///
    /// `index` must be less than [`FeatureSet::len`].
    #[inline]
    pub fn activation(
        &self,
        index: usize,
        tokens: &[String],
        position: usize,
        current: &Label,
        previous: Option<&Label>,
    ) -> f64 {
        self.features[index].activation(tokens, position, current, previous)
    }

    /// Weighted sum of all feature activations at one position.
    #[inline]
    pub fn local_score(
        &self,
        tokens: &[String],
        position: usize,
        current: &Label,
        previous: Option<&Label>,
    ) -> f64 {
        self.features
            .iter()
            .zip(&self.weights)
            .map(|(feature, weight)| weight * feature.activation(tokens, position, current, previous))
            .sum()
    }

    /// Total activation of every feature across all positions of a labeling.
    ///
    /// # Panics
    ///
    /// `labels` must have exactly one label per token.
    pub fn activations(&self, tokens: &[String], labels: &[Label]) -> Vec<f64> {
        crate::scoring::assert_aligned(tokens, labels);
        let mut totals = vec![0.0; self.features.len()];
        for (position, current) in labels.iter().enumerate() {
            let previous = position.checked_sub(1).map(|p| &labels[p]);
            for (total, feature) in totals.iter_mut().zip(&self.features) {
                *total += feature.activation(tokens, position, current, previous);
            }
        }
        totals
    }
}

impl fmt::Debug for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureSet")
            .field("len", &self.features.len())
            .field("weights", &self.weights)
            .finish()
    }
}
