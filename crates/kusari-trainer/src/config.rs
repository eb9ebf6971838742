//! Trainer settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrainerError};

/// Configuration for the gradient-ascent trainer.
///
/// Every field has a default, so a JSON file only needs the settings it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Step size applied to each gradient component
    pub learning_rate: f64,
    /// A round converges once every weight update is smaller than this
    pub threshold: f64,
    /// Upper bound on update rounds per training example
    pub max_rounds: usize,
    /// Seed for the initial weight draw; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1.0,
            threshold: 0.01,
            max_rounds: 10_000,
            seed: None,
        }
    }
}

impl TrainerConfig {
    /// Create a new trainer configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, or when a value is out
    /// of range.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the learning rate.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the convergence threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the per-example round cap.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Set the weight initialization seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`TrainerError::InvalidConfig`] naming the first bad setting.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(TrainerError::InvalidConfig(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(TrainerError::InvalidConfig(format!(
                "threshold must be positive, got {}",
                self.threshold
            )));
        }
        if self.max_rounds == 0 {
            return Err(TrainerError::InvalidConfig(
                "max_rounds must not be 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trainer_config() {
        let config = TrainerConfig::new()
            .with_learning_rate(0.5)
            .with_threshold(0.001)
            .with_max_rounds(50)
            .with_seed(42);

        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.threshold, 0.001);
        assert_eq!(config.max_rounds, 50);
        assert_eq!(config.seed, Some(42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn defaults() {
        let config = TrainerConfig::default();
        assert_eq!(config.learning_rate, 1.0);
        assert_eq!(config.threshold, 0.01);
        assert!(config.seed.is_none());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(TrainerConfig::new().with_learning_rate(0.0).validate().is_err());
        assert!(TrainerConfig::new().with_learning_rate(f64::NAN).validate().is_err());
        assert!(TrainerConfig::new().with_threshold(-1.0).validate().is_err());
        assert!(TrainerConfig::new().with_max_rounds(0).validate().is_err());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: TrainerConfig = serde_json::from_str(r#"{"seed": 7, "threshold": 0.05}"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.threshold, 0.05);
        assert_eq!(config.learning_rate, 1.0);
        assert_eq!(config.max_rounds, 10_000);
    }

    #[test]
    fn reads_json_file() {
        let path = std::env::temp_dir().join(format!("kusari-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"learning_rate": 0.25, "max_rounds": 12}"#).unwrap();

        let config = TrainerConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.learning_rate, 0.25);
        assert_eq!(config.max_rounds, 12);
    }
}
