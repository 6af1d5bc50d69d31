// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain structs, enums and traits describing what the bot
// works with: FAQ records, predictions, replies, and the two
// seams (Classifier, AnswerRepository) the pipeline is built on.
//
// Rules for this layer:
//   - NO Burn or tokenizers types
//   - NO SQL or file I/O
//   - Only data and the traits other layers implement

/// FAQ records, predictions and replies
pub mod faq_record;

/// The error type shared by the core layers
pub mod error;

/// Classifier and AnswerRepository abstractions
pub mod traits;
