//! # Sentence Tokenizer
//!
//! Splits a raw sentence into the token sequence the scorer and decoders
//! work on.

/// Whitespace tokenizer.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Split a sentence on whitespace, dropping empty pieces.
    ///
    /// # Examples
    /// ```
    /// use kusari_core::decode::Tokenizer;
    ///
    /// let tokens = Tokenizer::new().tokenize("1/4  cup milk ");
    /// assert_eq!(tokens, vec!["1/4", "cup", "milk"]);
    /// ```
    pub fn tokenize(&self, sentence: &str) -> Vec<String> {
        sentence.split_whitespace().map(str::to_string).collect()
    }
}
