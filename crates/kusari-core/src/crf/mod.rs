pub mod enumerate;
pub mod feature;

pub use enumerate::{Labelings, all_labelings, labeling_count};
pub use feature::{FeatureFunction, FeatureSet};
