//! Gradient-ascent training of feature weights.
//!
//! Weights start from a seeded random draw normalized to sum to 1. Each
//! training example then gets its own loop of update rounds: every round
//! computes the gradient of the example's conditional log-likelihood for
//! all features from the distribution at the start of the round, applies
//! `learning_rate * gradient`, and stops once every update in the round is
//! smaller than the threshold.

use std::time::{SystemTime, UNIX_EPOCH};

use kusari_core::scoring::logsumexp;
use kusari_core::{Alphabet, FeatureSet, TrainingExample, all_labelings};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::config::TrainerConfig;
use crate::error::{Result, TrainerError};

/// Outcome of the update loop for one training example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleReport {
    /// Update rounds run, including the converging one
    pub rounds: usize,
    /// False when the loop stopped at `max_rounds`
    pub converged: bool,
    /// Largest update magnitude of the last round
    pub final_update: f64,
}

/// Summary of a full training pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Per-example results in corpus order
    pub examples: Vec<ExampleReport>,
    /// Weights drawn before the first update
    pub initial_weights: Vec<f64>,
    /// Weights after the last update
    pub weights: Vec<f64>,
}

impl TrainingReport {
    /// Whether every example converged before the round cap.
    pub fn converged(&self) -> bool {
        self.examples.iter().all(|example| example.converged)
    }

    /// Total update rounds across all examples.
    pub fn total_rounds(&self) -> usize {
        self.examples.iter().map(|example| example.rounds).sum()
    }
}

/// Adjusts [`FeatureSet`] weights toward gold labelings.
pub struct Trainer {
    config: TrainerConfig,
    rng: oorandom::Rand64,
}

impl Trainer {
    /// Create a trainer seeded from `config.seed`, or from the clock when
    /// no seed is set.
    ///
    /// # Errors
    ///
    /// Fails when the configuration does not validate.
    pub fn new(config: TrainerConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(clock_seed);
        debug!(seed, "seeding weight initializer");
        Ok(Self::with_rng(config, oorandom::Rand64::new(u128::from(seed))))
    }

    /// Create a trainer drawing initial weights from `rng`.
    ///
    /// The configuration is used as given; call
    /// [`TrainerConfig::validate`] first if it comes from user input.
    pub fn with_rng(config: TrainerConfig, rng: oorandom::Rand64) -> Self {
        Self { config, rng }
    }

    /// Get the trainer configuration.
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Draw `count` nonnegative weights that sum to 1.
    pub fn initial_weights(&mut self, count: usize) -> Vec<f64> {
        if count == 0 {
            return Vec::new();
        }
        let mut weights: Vec<f64> = (0..count).map(|_| self.rng.rand_float()).collect();
        let total: f64 = weights.iter().sum();
        if total > 0.0 {
            weights.iter_mut().for_each(|w| *w /= total);
        } else {
            weights.fill(1.0 / count as f64);
        }
        weights
    }

    /// Reinitialize the weights of `features`, then fit each example in
    /// order.
    ///
    /// # Errors
    ///
    /// Fails when an example is too long to enumerate its labelings or an
    /// update turns a weight non-finite.
    pub fn train(
        &mut self,
        features: &mut FeatureSet,
        alphabet: &Alphabet,
        examples: &[TrainingExample],
    ) -> Result<TrainingReport> {
        let initial_weights = self.initial_weights(features.len());
        features.set_weights(&initial_weights);

        let mut reports = Vec::with_capacity(examples.len());
        for (index, example) in examples.iter().enumerate() {
            let report = self.fit_example(features, alphabet, example)?;
            info!(
                example = index,
                rounds = report.rounds,
                converged = report.converged,
                "fitted example"
            );
            reports.push(report);
        }

        Ok(TrainingReport {
            examples: reports,
            initial_weights,
            weights: features.weights().to_vec(),
        })
    }

    /// Run update rounds for one example starting from the current weights.
    ///
    /// # Errors
    ///
    /// Fails when the example is too long to enumerate its labelings, or
    /// with [`TrainerError::NonFiniteWeight`] when an update would make a
    /// weight NaN or infinite; the weights then keep their previous values.
    pub fn fit_example(
        &self,
        features: &mut FeatureSet,
        alphabet: &Alphabet,
        example: &TrainingExample,
    ) -> Result<ExampleReport> {
        let tokens = example.tokens();

        // Activations do not depend on the weights, so they are computed once.
        let table: Vec<Vec<f64>> = all_labelings(tokens.len(), alphabet)?
            .map(|labeling| features.activations(tokens, &labeling))
            .collect();
        let gold = features.activations(tokens, example.labeling());

        let mut rounds = 0;
        let mut final_update = f64::INFINITY;
        while rounds < self.config.max_rounds {
            rounds += 1;
            let updates: Vec<f64> = gradient(features.weights(), &gold, &table)
                .into_iter()
                .map(|g| self.config.learning_rate * g)
                .collect();

            // Leave the weights at their last finite values.
            if let Some(feature) = features
                .weights()
                .iter()
                .zip(&updates)
                .position(|(weight, update)| !(weight + update).is_finite())
            {
                warn!(round = rounds, feature, "non-finite weight update");
                return Err(TrainerError::NonFiniteWeight {
                    feature,
                    round: rounds,
                });
            }

            final_update = 0.0;
            for (weight, update) in features.weights_mut().iter_mut().zip(&updates) {
                *weight += update;
                final_update = f64::max(final_update, update.abs());
            }
            trace!(round = rounds, max_update = final_update, "update round");

            if final_update < self.config.threshold {
                return Ok(ExampleReport {
                    rounds,
                    converged: true,
                    final_update,
                });
            }
        }

        warn!(
            rounds,
            max_update = final_update,
            "example did not converge before max_rounds"
        );
        Ok(ExampleReport {
            rounds,
            converged: false,
            final_update,
        })
    }
}

/// Gold activations minus the activations expected under the model.
///
/// `table` holds the activation row of every candidate labeling.
pub(crate) fn gradient(weights: &[f64], gold: &[f64], table: &[Vec<f64>]) -> Vec<f64> {
    let log_scores: Vec<f64> = table
        .iter()
        .map(|row| row.iter().zip(weights).map(|(a, w)| a * w).sum())
        .collect();
    let log_z = log_scores
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, logsumexp);

    let mut expected = vec![0.0; weights.len()];
    for (row, log_score) in table.iter().zip(&log_scores) {
        let probability = (log_score - log_z).exp();
        for (e, a) in expected.iter_mut().zip(row) {
            *e += probability * a;
        }
    }

    gold.iter().zip(&expected).map(|(g, e)| g - e).collect()
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
