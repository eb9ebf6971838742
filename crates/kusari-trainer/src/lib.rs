//! # Kusari Trainer
//!
//! Fits the weights of a Kusari [`FeatureSet`](kusari_core::FeatureSet) to
//! labeled sentences by gradient ascent on the conditional log-likelihood.
//! Includes the text corpus loader, stock indicator features and the
//! `train` command-line tool.
//!
//! ## Quick Start
//!
//! ```rust
//! use kusari_trainer::{Trainer, TrainerConfig, parse_corpus, templates};
//!
//! let corpus = parse_corpus("A B\nthe fat cat\nA B A\n".as_bytes()).unwrap();
//! let mut features = templates::indicator_features(&corpus.alphabet);
//!
//! let mut trainer = Trainer::new(TrainerConfig::new().with_seed(7)).unwrap();
//! let report = trainer
//!     .train(&mut features, &corpus.alphabet, &corpus.examples)
//!     .unwrap();
//! assert_eq!(report.examples.len(), 1);
//! ```
pub mod config;
pub mod data;
pub mod error;
pub mod templates;
pub mod trainer;

pub use config::TrainerConfig;
pub use data::{Corpus, load_corpus, parse_corpus};
pub use error::{CorpusErrorKind, Result, TrainerError};
pub use trainer::{ExampleReport, Trainer, TrainingReport};
