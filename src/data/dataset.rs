// ============================================================
// Layer 4 — Training Dataset
// ============================================================
// In-memory list of vectorised questions. The trainer reshuffles
// it every epoch and walks it in fixed-size batches; the last
// batch of an epoch may be shorter.

use serde::{Deserialize, Serialize};

/// One vectorised training question and the index of its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSample {
    /// TF-IDF vector, one slot per vocabulary id
    pub features: Vec<f32>,
    /// Index into the sorted label list
    pub label:    usize,
}

impl LabeledSample {
    pub fn new(features: Vec<f32>, label: usize) -> Self {
        Self { features, label }
    }
}

/// Owns the samples of one side of the split (training or validation).
pub struct FaqDataset {
    samples: Vec<LabeledSample>,
}

impl FaqDataset {
    pub fn new(samples: Vec<LabeledSample>) -> Self { Self { samples } }

    pub fn len(&self) -> usize { self.samples.len() }

    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    /// Fixed-size windows over the samples in the given order.
    pub fn batches(&self, batch_size: usize) -> std::slice::Chunks<'_, LabeledSample> {
        self.samples.chunks(batch_size.max(1))
    }

    /// Reorder samples in place; called once per epoch by the trainer.
    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.samples.shuffle(rng);
    }
}
