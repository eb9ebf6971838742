//! Train a Kusari model on a labeled corpus and tag sentences with it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use kusari_core::{DecodeMode, Tagger, TaggerConfig, token_accuracy};
use kusari_trainer::{Trainer, TrainerConfig, TrainingReport, load_corpus, templates};
use serde::Serialize;
use tracing::{Level, info};

/// CLI arguments
#[derive(Parser)]
#[command(name = "train")]
#[command(about = "Train a linear-chain CRF on a labeled corpus")]
#[command(version)]
struct Cli {
    /// Corpus file: a header line of labels, then sentence/label line pairs
    corpus: PathBuf,

    /// JSON trainer config; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the initial weights
    #[arg(short, long)]
    seed: Option<u64>,

    /// Gradient step size
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Convergence threshold on the largest weight update
    #[arg(long)]
    threshold: Option<f64>,

    /// Update rounds allowed per sentence
    #[arg(long)]
    max_rounds: Option<usize>,

    /// Decoder used for evaluation and tagging
    #[arg(short, long, value_enum, default_value_t = Mode::Viterbi)]
    mode: Mode,

    /// Sentence to tag after training (repeatable)
    #[arg(short, long)]
    tag: Vec<String>,

    /// Print the training report and tagged sentences as JSON
    #[arg(long)]
    json: bool,

    /// Log per-decode details
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Exact,
    Viterbi,
    Greedy,
}

impl From<Mode> for DecodeMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Exact => DecodeMode::Exact,
            Mode::Viterbi => DecodeMode::Viterbi,
            Mode::Greedy => DecodeMode::Greedy,
        }
    }
}

#[derive(Serialize)]
struct TaggedSentence {
    tokens: Vec<String>,
    labels: Vec<String>,
}

#[derive(Serialize)]
struct Output<'a> {
    report: &'a TrainingReport,
    accuracy: Option<f64>,
    tagged: Vec<TaggedSentence>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let config = trainer_config(&cli)?;
    let corpus = load_corpus(&cli.corpus)
        .with_context(|| format!("Failed to load corpus {}", cli.corpus.display()))?;
    info!(
        labels = corpus.alphabet.len(),
        sentences = corpus.examples.len(),
        "loaded corpus"
    );

    let mut features = templates::corpus_features(&corpus.alphabet, &corpus.examples);
    let mut trainer = Trainer::new(config).context("Invalid trainer config")?;
    let report = trainer
        .train(&mut features, &corpus.alphabet, &corpus.examples)
        .context("Training failed")?;

    let tagger = Tagger::new(TaggerConfig::new().with_mode(cli.mode.into()));

    let mut correct = 0.0;
    let mut total = 0usize;
    for example in &corpus.examples {
        let predicted = tagger.tag(example.tokens(), &features, &corpus.alphabet)?;
        if let Some(accuracy) = token_accuracy(example.labeling(), &predicted) {
            correct += accuracy * example.tokens().len() as f64;
            total += example.tokens().len();
        }
    }
    let accuracy = (total > 0).then(|| correct / total as f64);

    let mut tagged = Vec::with_capacity(cli.tag.len());
    for sentence in &cli.tag {
        let (tokens, labeling) = tagger
            .tag_sentence(sentence, &features, &corpus.alphabet)
            .with_context(|| format!("Failed to tag {sentence:?}"))?;
        tagged.push(TaggedSentence {
            tokens,
            labels: labeling.names().into_iter().map(String::from).collect(),
        });
    }

    if cli.json {
        let output = Output {
            report: &report,
            accuracy,
            tagged,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "Trained {} features on {} sentences in {} rounds ({})",
        features.len(),
        report.examples.len(),
        report.total_rounds(),
        if report.converged() {
            "converged"
        } else {
            "hit max rounds"
        }
    );
    if let Some(accuracy) = accuracy {
        println!("Training accuracy ({}): {:.2}%", tagger.config().mode, accuracy * 100.0);
    }
    for sentence in &tagged {
        let pairs: Vec<String> = sentence
            .tokens
            .iter()
            .zip(&sentence.labels)
            .map(|(token, label)| format!("{token}/{label}"))
            .collect();
        println!("{}", pairs.join(" "));
    }

    Ok(())
}

fn trainer_config(cli: &Cli) -> Result<TrainerConfig> {
    let mut config = match &cli.config {
        Some(path) => TrainerConfig::from_json_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => TrainerConfig::new(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(learning_rate) = cli.learning_rate {
        config = config.with_learning_rate(learning_rate);
    }
    if let Some(threshold) = cli.threshold {
        config = config.with_threshold(threshold);
    }
    if let Some(max_rounds) = cli.max_rounds {
        config = config.with_max_rounds(max_rounds);
    }
    Ok(config)
}
