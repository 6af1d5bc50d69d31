// ============================================================
// Layer 4 — Classifier Batcher
// ============================================================
// Stacks a slice of LabeledSamples into the two tensors one
// training step needs:
//
//   features: [batch_size, num_features]  (float)
//   targets:  [batch_size]                 (int label index)
//
// All feature vectors share the vocabulary length, so the rows
// are flattened into one Vec and reshaped.

use burn::{prelude::*, tensor::TensorData};

use crate::data::dataset::LabeledSample;

/// Tensors for one optimiser step or one evaluation pass.
#[derive(Debug, Clone)]
pub struct ClassifierBatch<B: Backend> {
    /// [batch_size, num_features]
    pub features: Tensor<B, 2>,
    /// [batch_size], label index per row
    pub targets:  Tensor<B, 1, Int>,
}

/// Holds the target device so tensors land on the right backend.
#[derive(Clone, Debug)]
pub struct ClassifierBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> ClassifierBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// `items` must be non-empty and all feature vectors the same length.
    pub fn batch(&self, items: &[LabeledSample]) -> ClassifierBatch<B> {
        let batch_size   = items.len();
        let num_features = items.first().map(|s| s.features.len()).unwrap_or(0);

        let flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();
        let labels: Vec<i64> = items.iter().map(|s| s.label as i64).collect();

        let features = Tensor::<B, 2>::from_data(
            TensorData::new(flat, [batch_size, num_features]),
            &self.device,
        );
        let targets = Tensor::<B, 1, Int>::from_data(
            TensorData::new(labels, [batch_size]),
            &self.device,
        );

        ClassifierBatch { features, targets }
    }

    /// Features only, for inference on a single question.
    pub fn features(&self, features: &[f32]) -> Tensor<B, 2> {
        Tensor::<B, 2>::from_data(
            TensorData::new(features.to_vec(), [1, features.len()]),
            &self.device,
        )
    }
}
