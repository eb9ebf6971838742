//! Data loading for labeled training corpora.
//!
//! The first line lists every label, separated by spaces. After it, lines
//! alternate between a sentence and the labels of its tokens. Blank lines
//! are ignored anywhere after the header:
//!
//! ```text
//! quantity unit name comment
//!
//! 1/4 cup milk
//! quantity unit name
//!
//! 3 large eggs
//! quantity name name
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use kusari_core::{Alphabet, KusariError, Label, Labeling, Tokenizer, TrainingExample};
use tracing::debug;

use crate::error::{CorpusErrorKind, Result, TrainerError};

/// A label alphabet and the gold-labeled sentences that use it.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    /// Labels in header order.
    pub alphabet: Alphabet,
    /// Training sentences in file order.
    pub examples: Vec<TrainingExample>,
}

/// Load a corpus from a file.
///
/// # Errors
///
/// Fails when the file cannot be read or is malformed; corpus errors carry
/// the 1-based line number of the offending line.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Corpus> {
    let file = File::open(path)?;
    parse_corpus(BufReader::new(file))
}

/// Parse a corpus from any buffered reader.
///
/// # Errors
///
/// See [`load_corpus`].
pub fn parse_corpus<R: BufRead>(reader: R) -> Result<Corpus> {
    let tokenizer = Tokenizer::new();
    let mut lines = reader.lines().enumerate();

    let header = match lines.next() {
        Some((_, line)) => line?,
        None => String::new(),
    };
    let alphabet = Alphabet::new(header.split_whitespace()).map_err(|err| {
        let kind = match err {
            KusariError::DuplicateLabel { label } => CorpusErrorKind::DuplicateLabel(label),
            _ => CorpusErrorKind::EmptyHeader,
        };
        TrainerError::Corpus { line: 1, kind }
    })?;

    let mut examples = Vec::new();
    let mut pending: Option<(usize, Vec<String>)> = None;

    for (idx, line) in lines {
        let line = line?;
        let line_num = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        match pending.take() {
            None => pending = Some((line_num, tokenizer.tokenize(&line))),
            Some((_, tokens)) => {
                let labeling = parse_labels(&line, line_num, tokens.len(), &alphabet)?;
                examples.push(TrainingExample::new(tokens, labeling)?);
            }
        }
    }

    if let Some((line, _)) = pending {
        return Err(TrainerError::Corpus {
            line,
            kind: CorpusErrorKind::MissingLabels,
        });
    }

    debug!(labels = alphabet.len(), examples = examples.len(), "loaded corpus");
    Ok(Corpus { alphabet, examples })
}

fn parse_labels(line: &str, line_num: usize, expected: usize, alphabet: &Alphabet) -> Result<Labeling> {
    let names: Vec<&str> = line.split_whitespace().collect();
    if names.len() != expected {
        return Err(TrainerError::Corpus {
            line: line_num,
            kind: CorpusErrorKind::LabelCount {
                expected,
                found: names.len(),
            },
        });
    }

    names
        .into_iter()
        .map(|name| {
            let label = Label::new(name);
            if alphabet.contains(&label) {
                Ok(label)
            } else {
                Err(TrainerError::Corpus {
                    line: line_num,
                    kind: CorpusErrorKind::UnknownLabel(name.to_string()),
                })
            }
        })
        .collect::<Result<Vec<_>>>()
        .map(Labeling::new)
}
