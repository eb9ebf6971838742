//! # Kusari
//!
//! Sequence labeling with linear-chain conditional random fields.
//!
//! This crate bundles the scoring and decoding engine from `kusari-core`
//! with the training loop and corpus loader from `kusari-trainer`.
//!
//! ```rust
//! use kusari::{Tagger, TaggerConfig, Trainer, TrainerConfig, parse_corpus, templates};
//!
//! let corpus = parse_corpus("A B\nthe fat cat\nA B A\n".as_bytes()).unwrap();
//! let mut features = templates::corpus_features(&corpus.alphabet, &corpus.examples);
//! Trainer::new(TrainerConfig::new().with_seed(1))
//!     .unwrap()
//!     .train(&mut features, &corpus.alphabet, &corpus.examples)
//!     .unwrap();
//!
//! let tagger = Tagger::new(TaggerConfig::new());
//! let (tokens, labeling) = tagger
//!     .tag_sentence("the fat cat", &features, &corpus.alphabet)
//!     .unwrap();
//! assert_eq!(tokens.len(), labeling.len());
//! ```
pub use kusari_core::*;
pub use kusari_trainer::{
    Corpus, CorpusErrorKind, ExampleReport, Trainer, TrainerConfig, TrainerError, TrainingReport,
    load_corpus, parse_corpus, templates,
};
