// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model code lives here:
//
//   model.rs      — FaqClassifier: dropout + one Linear layer
//                   over TF-IDF features
//   trainer.rs    — Adam training loop with per-epoch
//                   validation and metrics
//   inferencer.rs — loads an artifact and implements the
//                   domain Classifier trait

/// Linear multiclass classifier
pub mod model;

/// Training loop with validation
pub mod trainer;

/// Inference engine, loads a checkpoint and classifies questions
pub mod inferencer;
