// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Fits the classifier from the questions stored in the `faq`
// table and writes a model artifact:
//
//   Step 1: Read (category, question) pairs    (Layer 6 - infra)
//   Step 2: Build the sorted label set
//   Step 3: Clean question text                (Layer 4 - data)
//   Step 4: Build and save the tokenizer       (Layer 6 - infra)
//   Step 5: Fit TF-IDF and vectorise questions (Layer 4 - data)
//   Step 6: Train / validation split           (Layer 4 - data)
//   Step 7: Run the training loop              (Layer 5 - ml)
//   Step 8: Save weights + manifest            (Layer 6 - infra)

use std::{collections::BTreeSet, path::PathBuf};

use anyhow::{bail, Context, Result};

use crate::data::{
    dataset::{FaqDataset, LabeledSample},
    preprocessor::Preprocessor,
    splitter::split_train_val,
    vectorizer::TfIdfVectorizer,
};
use crate::infra::{
    checkpoint::{CheckpointManager, ModelManifest, MANIFEST_FORMAT_VERSION},
    config::DatabaseConfig,
    metrics::MetricsLogger,
    sqlite_repository::SqliteFaqRepository,
    tokenizer_store::{encode_ids, TokenizerStore},
};
use crate::ml::{model::FaqClassifierConfig, trainer::run_training};

// ─── Training Configuration ──────────────────────────────────────────────────
// Hyperparameters for one run. Built from CLI flags over the
// resolved BotConfig; the artifact itself records only what
// inference needs (see ModelManifest).
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Database whose `faq` table supplies the training questions
    pub database:       DatabaseConfig,
    /// Where tokenizer, weights, manifest and metrics.csv are written
    pub model_dir:      PathBuf,
    pub epochs:         usize,
    pub batch_size:     usize,
    /// Adam learning rate
    pub lr:             f64,
    pub dropout:        f64,
    /// Seeds both the train/validation split and per-epoch shuffling
    pub seed:           u64,
    /// Share of questions used for training, clamped to [0, 1]
    pub train_fraction: f64,
    /// Upper bound on vocabulary words, excluding [PAD] and [UNK]
    pub max_vocab:      usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            database:       DatabaseConfig::default(),
            model_dir:      PathBuf::from("model"),
            epochs:         60,
            batch_size:     16,
            lr:             0.05,
            dropout:        0.1,
            seed:           42,
            train_fraction: 0.8,
            max_vocab:      20_000,
        }
    }
}

/// What a finished run produced, for the CLI to print.
#[derive(Debug, Clone)]
pub struct TrainSummary {
    /// Categories the model can return, sorted
    pub labels:       Vec<String>,
    /// Questions that survived cleaning and were vectorised
    pub samples:      usize,
    /// Vocabulary ids including [PAD] and [UNK]
    pub vocab_size:   usize,
    /// Last epoch's validation accuracy; None when nothing was held out
    pub val_accuracy: Option<f64>,
}

/// Runs the whole pipeline above for one `TrainConfig`.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Read the stored questions and train on them.
    pub fn execute(&self) -> Result<TrainSummary> {
        let repo = SqliteFaqRepository::new(self.config.database.clone());
        let pairs = repo
            .training_pairs()
            .with_context(|| format!(
                "Cannot read training questions from '{}'",
                self.config.database.path.display()
            ))?;
        self.train_on(pairs)
    }

    /// Train from `(category, question)` pairs already in memory.
    pub fn train_on(&self, pairs: Vec<(String, String)>) -> Result<TrainSummary> {
        let cfg = &self.config;
        tracing::info!("Training from {} questions", pairs.len());

        // ── Step 2: closed label set, sorted so index order is lexicographic ──
        // Categories are kept byte-for-byte as stored: a label is only
        // useful if the answer lookup can find it again.
        let labels: Vec<String> = pairs
            .iter()
            .map(|(category, _)| category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if labels.len() < 2 {
            bail!(
                "Need questions for at least 2 categories to train, found {}",
                labels.len()
            );
        }

        // ── Step 3: clean text, drop questions that clean to nothing ─────────
        let preprocessor = Preprocessor::new();
        let cleaned: Vec<(usize, String)> = pairs
            .iter()
            .filter_map(|(category, question)| {
                let text = preprocessor.clean(question);
                if text.is_empty() {
                    tracing::warn!("Skipping blank question in category '{category}'");
                    return None;
                }
                let label = labels.binary_search(category).ok()?;
                Some((label, text))
            })
            .collect();

        // ── Step 4: tokenizer ────────────────────────────────────────────────
        let texts: Vec<String> = cleaned.iter().map(|(_, t)| t.clone()).collect();
        let tokenizer = TokenizerStore::new(&cfg.model_dir)
            .build_and_save(&texts, cfg.max_vocab)
            .context("Cannot build tokenizer")?;
        let vocab_size = tokenizer.get_vocab_size(false);

        // ── Step 5: TF-IDF features ──────────────────────────────────────────
        let token_ids = texts
            .iter()
            .map(|t| encode_ids(&tokenizer, t))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let vectorizer = TfIdfVectorizer::fit(&token_ids, vocab_size);

        let samples: Vec<LabeledSample> = cleaned
            .iter()
            .zip(&token_ids)
            .map(|((label, _), ids)| LabeledSample::new(vectorizer.transform(ids), *label))
            .collect();
        let sample_count = samples.len();

        // ── Step 6: split; tiny corpora train on everything ──────────────────
        let (train, val) = split_train_val(samples.clone(), cfg.train_fraction, cfg.seed);
        let (train, val) = if train.is_empty() {
            tracing::warn!("Split left no training samples, training on all {sample_count}");
            (samples, Vec::new())
        } else {
            (train, val)
        };

        // ── Step 7: train ────────────────────────────────────────────────────
        let model_cfg = FaqClassifierConfig::new(vocab_size, labels.len())
            .with_dropout(cfg.dropout);
        let metrics = MetricsLogger::new(&cfg.model_dir)?;
        let trained = run_training(
            cfg,
            &model_cfg,
            FaqDataset::new(train),
            FaqDataset::new(val),
            &metrics,
        )?;

        // ── Step 8: artifact ─────────────────────────────────────────────────
        let manifest = ModelManifest {
            format_version:  MANIFEST_FORMAT_VERSION,
            labels:          labels.clone(),
            vocab_size,
            idf:             vectorizer.idf().to_vec(),
            dropout:         cfg.dropout,
            trained_samples: sample_count,
        };
        CheckpointManager::new(&cfg.model_dir)
            .save(&trained.model, &manifest)
            .context("Cannot save model artifact")?;

        tracing::info!(
            "Model saved to '{}', epoch metrics in '{}'",
            cfg.model_dir.display(),
            metrics.csv_path().display()
        );

        Ok(TrainSummary {
            labels,
            samples: sample_count,
            vocab_size,
            val_accuracy: trained
                .history
                .last()
                .map(|m| m.val_accuracy)
                .filter(|a| !a.is_nan()),
        })
    }
}
