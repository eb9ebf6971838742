//! # Labeling Enumeration
//!
//! Walks every labeling of a sentence as a mixed-radix counter: the alphabet
//! supplies the digits in its given order and the rightmost position varies
//! fastest. The walk is iterative so long sentences never grow the call
//! stack.

use crate::error::{KusariError, Result};
use crate::types::{Alphabet, Labeling};

/// Number of labelings of `tokens` positions over `alphabet_len` labels.
///
/// # Errors
///
/// Returns [`KusariError::TooManyLabelings`] when the count overflows `usize`.
pub fn labeling_count(alphabet_len: usize, tokens: usize) -> Result<usize> {
    let too_many = KusariError::TooManyLabelings {
        alphabet: alphabet_len,
        tokens,
    };
    let exponent = u32::try_from(tokens).map_err(|_| too_many.clone())?;
    alphabet_len.checked_pow(exponent).ok_or(too_many)
}

/// Mixed-radix counter over alphabet indices.
///
/// Yields borrowed digit slices, so callers can score each candidate without
/// allocating a labeling for it.
#[derive(Debug, Clone)]
pub(crate) struct IndexPaths {
    radix: usize,
    digits: Vec<usize>,
    started: bool,
    done: bool,
}

impl IndexPaths {
    pub(crate) fn new(radix: usize, len: usize) -> Self {
        Self {
            radix,
            digits: vec![0; len],
            started: false,
            done: radix == 0 && len > 0,
        }
    }

    /// Advances to the next path, or returns `None` once every path was seen.
    pub(crate) fn next_path(&mut self) -> Option<&[usize]> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.digits);
        }
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < self.radix {
                return Some(&self.digits);
            }
            *digit = 0;
        }
        self.done = true;
        None
    }
}

/// Iterator over every labeling of a sentence, in enumeration order.
#[derive(Debug, Clone)]
pub struct Labelings<'a> {
    alphabet: &'a Alphabet,
    paths: IndexPaths,
    remaining: usize,
}

impl Iterator for Labelings<'_> {
    type Item = Labeling;

    fn next(&mut self) -> Option<Labeling> {
        let alphabet = self.alphabet;
        let path = self.paths.next_path()?;
        self.remaining -= 1;
        Some(path.iter().map(|&idx| alphabet[idx].clone()).collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Labelings<'_> {}

/// Enumerates all `|alphabet|^tokens` labelings of a sentence.
///
/// A sentence with no tokens has exactly one labeling, the empty one.
///
/// # Errors
///
/// Returns [`KusariError::TooManyLabelings`] when the count overflows `usize`.
///
/// # Examples
/// ```
/// use kusari_core::crf::all_labelings;
/// use kusari_core::types::Alphabet;
///
/// let alphabet = Alphabet::new(["a", "b"]).unwrap();
/// let labelings: Vec<_> = all_labelings(2, &alphabet).unwrap().collect();
/// assert_eq!(labelings.len(), 4);
/// assert_eq!(labelings[1].names(), vec!["a", "b"]);
/// ```
pub fn all_labelings(tokens: usize, alphabet: &Alphabet) -> Result<Labelings<'_>> {
    let remaining = labeling_count(alphabet.len(), tokens)?;
    Ok(Labelings {
        alphabet,
        paths: IndexPaths::new(alphabet.len(), tokens),
        remaining,
    })
}
