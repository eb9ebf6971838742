use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{KusariError, Result};

/// An opaque label assigned to a single token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Creates a new label from its name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the label name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Label {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for Label {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The ordered, finite set of labels a sentence can be tagged with.
///
/// Order matters: it fixes the enumeration order of candidate labelings and
/// therefore which labeling wins a tie during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Label>", into = "Vec<Label>")]
pub struct Alphabet {
    labels: Vec<Label>,
}

impl Alphabet {
    /// Creates an alphabet from labels in their significant order.
    ///
    /// # Errors
    ///
    /// Returns [`KusariError::EmptyAlphabet`] when no labels are given and
    /// [`KusariError::DuplicateLabel`] when a label is repeated.
    ///
    /// # Examples
    /// ```
    /// use kusari_core::types::Alphabet;
    ///
    /// let alphabet = Alphabet::new(["A", "B"]).unwrap();
    /// assert_eq!(alphabet.len(), 2);
    /// assert_eq!(alphabet.index_of(&"B".into()), Some(1));
    /// ```
    pub fn new<I, L>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        let mut collected: Vec<Label> = Vec::new();
        for label in labels {
            let label = label.into();
            if collected.contains(&label) {
                return Err(KusariError::DuplicateLabel {
                    label: label.0,
                });
            }
            collected.push(label);
        }
        if collected.is_empty() {
            return Err(KusariError::EmptyAlphabet);
        }
        Ok(Self { labels: collected })
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label at the given position in alphabet order.
    pub fn get(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    /// Position of a label in alphabet order.
    pub fn index_of(&self, label: &Label) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Whether the label belongs to this alphabet.
    pub fn contains(&self, label: &Label) -> bool {
        self.index_of(label).is_some()
    }

    /// Labels in alphabet order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Iterates labels in alphabet order.
    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.labels.iter()
    }
}

impl std::ops::Index<usize> for Alphabet {
    type Output = Label;

    fn index(&self, index: usize) -> &Label {
        &self.labels[index]
    }
}

impl<'a> IntoIterator for &'a Alphabet {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

impl TryFrom<Vec<Label>> for Alphabet {
    type Error = KusariError;

    fn try_from(labels: Vec<Label>) -> Result<Self> {
        Self::new(labels)
    }
}

impl From<Alphabet> for Vec<Label> {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_compares_with_str() {
        let label = Label::new("B");
        assert!(label == "B");
        assert_eq!(label.as_str(), "B");
        assert_eq!(label.to_string(), "B");
    }

    #[test]
    fn alphabet_keeps_order() {
        let alphabet = Alphabet::new(["quantity", "unit", "name"]).unwrap();
        let names: Vec<_> = alphabet.iter().map(Label::as_str).collect();
        assert_eq!(names, vec!["quantity", "unit", "name"]);
        assert_eq!(alphabet[2], Label::new("name"));
    }

    #[test]
    fn alphabet_rejects_empty() {
        let result = Alphabet::new(Vec::<Label>::new());
        assert_eq!(result, Err(KusariError::EmptyAlphabet));
    }

    #[test]
    fn alphabet_rejects_duplicates() {
        let result = Alphabet::new(["A", "B", "A"]);
        assert_eq!(
            result,
            Err(KusariError::DuplicateLabel { label: "A".into() })
        );
    }

    #[test]
    fn alphabet_lookup() {
        let alphabet = Alphabet::new(["a", "b"]).unwrap();
        assert!(alphabet.contains(&Label::new("a")));
        assert!(!alphabet.contains(&Label::new("c")));
        assert_eq!(alphabet.index_of(&Label::new("b")), Some(1));
        assert!(alphabet.get(2).is_none());
    }

    #[test]
    fn alphabet_serde_validates() {
        let json = serde_json::to_string(&Alphabet::new(["A", "B"]).unwrap()).unwrap();
        assert_eq!(json, r#"["A","B"]"#);

        let back: Alphabet = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 2);

        let bad: std::result::Result<Alphabet, _> = serde_json::from_str(r#"["A","A"]"#);
        assert!(bad.is_err());
    }
}
