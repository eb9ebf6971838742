//! # Kusari Core
//!
//! The scoring and decoding engine of Kusari, a linear-chain conditional
//! random field for sequence labeling. Provides pluggable feature
//! functions, labeling scores and probabilities, and exact, Viterbi and
//! greedy decoders.
//!
//! ## Quick Start
//!
//! ```rust
//! use kusari_core::{Alphabet, ExactDecoder, FeatureSet, Label};
//!
//! fn label_changes(_: &[String], _: usize, curr: &Label, prev: Option<&Label>) -> f64 {
//!     match prev {
//!         Some(prev) if prev != curr => 1.0,
//!         _ => 0.0,
//!     }
//! }
//!
//! let features = FeatureSet::new().with_feature(label_changes, 0.75);
//! let alphabet = Alphabet::new(["A", "B"]).unwrap();
//! let tokens: Vec<String> = ["the", "fat", "cat"].iter().map(|s| s.to_string()).collect();
//!
//! let best = ExactDecoder::new().decode(&tokens, &features, &alphabet).unwrap();
//! assert_eq!(best.labeling.names(), vec!["A", "B", "A"]);
//! ```
pub mod crf;
pub mod decode;
pub mod error;
pub mod scoring;
pub mod types;

// Re-export primary API
pub use crf::{FeatureFunction, FeatureSet, Labelings, all_labelings, labeling_count};
pub use decode::{
    DecodeMode, ExactDecoder, GreedyDecoder, Tagger, TaggerConfig, Tokenizer, ViterbiDecoder,
    token_accuracy,
};
pub use error::{KusariError, Result};
pub use scoring::SequenceScorer;
pub use types::{Alphabet, Label, Labeling, ScoredLabeling, TrainingExample};
