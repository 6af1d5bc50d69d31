// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores the trained classifier artifact.
//
// A model directory holds:
//   model.mpk.gz    ← classifier weights (burn CompactRecorder)
//   manifest.json   ← labels, IDF weights, architecture, version
//   tokenizer.json  ← written by TokenizerStore
//   metrics.csv     ← written by MetricsLogger during training
//
// The manifest is read first so the model can be rebuilt with
// the right shape before its weights are loaded into it.

use std::{fs, path::PathBuf};

use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use serde::{Deserialize, Serialize};

use crate::domain::error::{BotError, Result};
use crate::ml::model::{FaqClassifier, FaqClassifierConfig};

/// Bumped whenever the artifact layout changes.
pub const MANIFEST_FORMAT_VERSION: u32 = 1;

const MODEL_FILE:    &str = "model";
const MANIFEST_FILE: &str = "manifest.json";

/// Everything besides the weights needed to answer with a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelManifest {
    /// Must equal MANIFEST_FORMAT_VERSION to load
    pub format_version:  u32,
    /// Sorted, unique. Index i is the model's output i.
    pub labels:          Vec<String>,
    /// Tokenizer vocabulary size; also the model's input width
    pub vocab_size:      usize,
    /// One weight per vocabulary id
    pub idf:             Vec<f32>,
    pub dropout:         f64,
    pub trained_samples: usize,
}

impl ModelManifest {
    pub fn model_config(&self) -> FaqClassifierConfig {
        FaqClassifierConfig::new(self.vocab_size, self.labels.len())
            .with_dropout(self.dropout)
    }

    /// Reject manifests the inferencer cannot use.
    pub fn check(&self) -> Result<()> {
        if self.format_version != MANIFEST_FORMAT_VERSION {
            return Err(BotError::ModelLoad(format!(
                "unsupported model format version {} (expected {})",
                self.format_version, MANIFEST_FORMAT_VERSION
            )));
        }
        if self.labels.is_empty() {
            return Err(BotError::ModelLoad("model has no labels".into()));
        }
        if self.labels.windows(2).any(|w| w[0] >= w[1]) {
            return Err(BotError::ModelLoad("labels are not sorted and unique".into()));
        }
        if self.idf.len() != self.vocab_size {
            return Err(BotError::ModelLoad(format!(
                "idf has {} weights for a vocabulary of {}",
                self.idf.len(), self.vocab_size
            )));
        }
        Ok(())
    }
}

/// Reads and writes the artifact files in one model directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write weights and manifest. Creates the directory if needed.
    pub fn save<B: Backend>(
        &self,
        model:    &FaqClassifier<B>,
        manifest: &ModelManifest,
    ) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(MODEL_FILE);
        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .map_err(|e| {
                BotError::Training(format!("cannot save model to '{}': {e}", path.display()))
            })?;

        let manifest_path = self.dir.join(MANIFEST_FILE);
        fs::write(&manifest_path, serde_json::to_string_pretty(manifest)?)?;

        tracing::debug!("Saved model artifact to '{}'", self.dir.display());
        Ok(())
    }

    pub fn load_manifest(&self) -> Result<ModelManifest> {
        let path = self.dir.join(MANIFEST_FILE);
        let json = fs::read_to_string(&path).map_err(|e| {
            BotError::ModelLoad(format!(
                "cannot read '{}': {e}. Have you run 'train' first?",
                path.display()
            ))
        })?;
        let manifest: ModelManifest = serde_json::from_str(&json)
            .map_err(|e| BotError::ModelLoad(format!("corrupt manifest: {e}")))?;
        manifest.check()?;
        Ok(manifest)
    }

    /// Rebuild the classifier described by `manifest` and load its weights.
    pub fn load_model<B: Backend>(
        &self,
        manifest: &ModelManifest,
        device:   &B::Device,
    ) -> Result<FaqClassifier<B>> {
        let path  = self.dir.join(MODEL_FILE);
        let model = manifest.model_config().init::<B>(device);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .map_err(|e| {
                BotError::ModelLoad(format!("cannot load weights '{}': {e}", path.display()))
            })?;

        Ok(model.load_record(record))
    }
}
