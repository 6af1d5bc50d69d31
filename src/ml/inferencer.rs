// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Loads a trained artifact once and classifies questions:
//
//   clean → tokenize → TF-IDF → linear model → softmax → label
//
// The label set is closed: the returned category is always one
// of the manifest's labels. Ties go to the highest score first,
// then to the lexicographically smallest label (labels are
// stored sorted, so that is simply the lowest index).

use std::path::Path;

use burn::{backend::NdArray, prelude::*};
use tokenizers::Tokenizer;

use crate::data::{
    batcher::ClassifierBatcher,
    preprocessor::Preprocessor,
    vectorizer::TfIdfVectorizer,
};
use crate::domain::error::{BotError, Result};
use crate::domain::faq_record::Prediction;
use crate::domain::traits::Classifier;
use crate::infra::{
    checkpoint::CheckpointManager,
    tokenizer_store::{encode_ids, TokenizerStore},
};
use crate::ml::model::FaqClassifier;

type InferBackend = NdArray;

/// A loaded model artifact, ready to classify.
///
/// Holds no mutable state, so one instance can answer any number
/// of questions and always gives the same answer for the same text.
pub struct Inferencer {
    model:        FaqClassifier<InferBackend>,
    batcher:      ClassifierBatcher<InferBackend>,
    tokenizer:    Tokenizer,
    /// IDF weights from training; never refitted here
    vectorizer:   TfIdfVectorizer,
    preprocessor: Preprocessor,
    /// Sorted; output i of the model scores labels[i]
    labels:       Vec<String>,
}

impl Inferencer {
    /// Load manifest, tokenizer and weights from a model directory.
    /// Any failure is a ModelLoad error.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir      = dir.as_ref();
        let ckpt     = CheckpointManager::new(dir);
        let manifest = ckpt.load_manifest()?;

        let tokenizer = TokenizerStore::new(dir).load()?;
        let vocab     = tokenizer.get_vocab_size(false);
        if vocab != manifest.vocab_size {
            return Err(BotError::ModelLoad(format!(
                "tokenizer has {vocab} ids but the model expects {}",
                manifest.vocab_size
            )));
        }

        let device = Default::default();
        let model  = ckpt.load_model::<InferBackend>(&manifest, &device)?;

        tracing::info!(
            "Classifier loaded from '{}' ({} labels)",
            dir.display(),
            manifest.labels.len()
        );

        Ok(Self {
            model,
            batcher:      ClassifierBatcher::new(device),
            tokenizer,
            vectorizer:   TfIdfVectorizer::from_idf(manifest.idf),
            preprocessor: Preprocessor::new(),
            labels:       manifest.labels,
        })
    }

    /// Softmax probability for every label, in label order.
    pub fn scores(&self, text: &str) -> Result<Vec<f32>> {
        let cleaned = self.preprocessor.clean(text);
        if cleaned.is_empty() {
            return Err(BotError::Classification("question is empty".into()));
        }

        let ids      = encode_ids(&self.tokenizer, &cleaned)?;
        let features = self.vectorizer.transform(&ids);
        let logits   = self.model.forward(self.batcher.features(&features));

        burn::tensor::activation::softmax(logits, 1)
            .into_data()
            .convert::<f32>()
            .to_vec::<f32>()
            .map_err(|e| BotError::Classification(format!("cannot read model output: {e:?}")))
    }
}

impl Classifier for Inferencer {
    fn classify(&self, text: &str) -> Result<Prediction> {
        let scores = self.scores(text)?;
        let index  = pick_label(&scores)
            .filter(|&i| i < self.labels.len())
            .ok_or_else(|| BotError::Classification("model produced no usable score".into()))?;

        let prediction = Prediction::new(self.labels[index].clone(), scores[index]);
        tracing::debug!(
            category   = %prediction.category,
            confidence = prediction.confidence,
            "Classified question"
        );
        Ok(prediction)
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Index of the highest score; the first one wins a tie. NaN never wins.
pub fn pick_label(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &s) in scores.iter().enumerate() {
        if s.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if s <= b => {}
            _ => best = Some((i, s)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_label_highest_wins() {
        assert_eq!(pick_label(&[0.1, 0.7, 0.2]), Some(1));
    }

    #[test]
    fn test_pick_label_tie_goes_to_first() {
        assert_eq!(pick_label(&[0.4, 0.4, 0.2]), Some(0));
        assert_eq!(pick_label(&[0.2, 0.4, 0.4]), Some(1));
    }

    #[test]
    fn test_pick_label_skips_nan() {
        assert_eq!(pick_label(&[f32::NAN, 0.1]), Some(1));
        assert_eq!(pick_label(&[f32::NAN]), None);
        assert_eq!(pick_label(&[]), None);
    }

    #[test]
    fn test_missing_artifact_is_model_load_error() {
        let dir = tempfile::tempdir().unwrap();
        match Inferencer::from_dir(dir.path()) {
            Err(e) => assert_eq!(e.kind(), crate::domain::error::ErrorKind::ModelLoad),
            Ok(_)  => panic!("loaded a model from an empty directory"),
        }
    }
}
