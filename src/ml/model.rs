// ============================================================
// Layer 5 — Classifier Model
// ============================================================
// A single linear layer over TF-IDF features:
//
//   features [batch, vocab] → dropout → Linear → logits [batch, labels]
//
// Softmax is applied by the inferencer, not here, so that
// training can hand raw logits to the cross-entropy loss.
//
// There is no hidden layer. FAQ categories are separated by
// which words a question uses, and one weight per (word, label)
// pair keeps the artifact small enough to retrain in seconds.

use burn::{
    nn::{Dropout, DropoutConfig, Linear, LinearConfig},
    prelude::*,
};

/// Shape of the classifier: TF-IDF features in, one logit per label out.
///
/// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct FaqClassifierConfig {
    /// Vocabulary size, including the two reserved ids
    pub num_features: usize,
    pub num_labels:   usize,
    /// Probability of zeroing an input feature during training
    #[config(default = 0.1)]
    pub dropout:      f64,
}

impl FaqClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> FaqClassifier<B> {
        FaqClassifier {
            linear:  LinearConfig::new(self.num_features, self.num_labels).init(device),
            dropout: DropoutConfig::new(self.dropout).init(),
        }
    }
}

/// Multiclass logistic regression: dropout on the input, then one linear layer.
#[derive(Module, Debug)]
pub struct FaqClassifier<B: Backend> {
    pub linear:  Linear<B>,
    pub dropout: Dropout,
}

impl<B: Backend> FaqClassifier<B> {
    /// features: [batch, num_features] → logits: [batch, num_labels]
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        self.linear.forward(self.dropout.forward(features))
    }

    /// Mean cross-entropy of the batch, plus the logits it was computed from.
    pub fn forward_loss(
        &self,
        features: Tensor<B, 2>,
        targets:  Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let logits = self.forward(features);
        let loss   = burn::nn::loss::CrossEntropyLossConfig::new()
            .init(&logits.device())
            .forward(logits.clone(), targets);
        (loss, logits)
    }
}
