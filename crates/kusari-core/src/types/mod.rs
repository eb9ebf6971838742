pub mod label;
pub mod labeling;

pub use label::{Alphabet, Label};
pub use labeling::{Labeling, ScoredLabeling, TrainingExample};
