pub mod exact;
pub mod greedy;
pub mod tokenizer;
pub mod unified;
pub mod viterbi;

pub use exact::ExactDecoder;
pub use greedy::GreedyDecoder;
pub use tokenizer::Tokenizer;
pub use unified::{DecodeMode, Tagger, TaggerConfig, token_accuracy};
pub use viterbi::ViterbiDecoder;
