pub mod math;
pub mod sequence;

pub use math::logsumexp;
pub use sequence::SequenceScorer;

use crate::types::Label;

/// Enforces one label per token; a mismatch is a caller bug.
#[inline]
#[track_caller]
pub(crate) fn assert_aligned(tokens: &[String], labels: &[Label]) {
    assert!(
        tokens.len() == labels.len(),
        "misaligned labeling: {} labels for {} tokens",
        labels.len(),
        tokens.len()
    );
}
