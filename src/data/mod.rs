// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between raw question text and tensors:
//
//   import file ──▶ FaqFileLoader          (records for the table)
//
//   question text
//       │
//       ▼
//   Preprocessor      → cleans whitespace / control chars
//       │
//       ▼
//   Tokenizer         → word ids (infra::tokenizer_store)
//       │
//       ▼
//   TfIdfVectorizer   → fixed-length feature vector
//       │
//       ▼
//   FaqDataset        → labelled samples, split by splitter
//       │
//       ▼
//   ClassifierBatcher → [batch, features] + [batch] tensors

/// Reads FAQ records from a JSON import file
pub mod loader;

/// Cleans question text
pub mod preprocessor;

/// TF-IDF bag-of-words features
pub mod vectorizer;

/// Labelled question samples
pub mod dataset;

/// Turns sample slices into tensors
pub mod batcher;

/// Seeded train/validation split
pub mod splitter;
