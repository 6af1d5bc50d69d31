// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The answering pipeline only ever talks to these two traits.
//
// Implementations:
//   Classifier       → ml::inferencer::Inferencer (burn model)
//   AnswerRepository → infra::sqlite_repository::SqliteFaqRepository
//                      infra::memory_repository::InMemoryFaqRepository
//
// Tests swap in small fakes for either side.

use crate::domain::error::Result;
use crate::domain::faq_record::Prediction;

// ─── Classifier ───────────────────────────────────────────────────────────────
/// Maps free text to exactly one label of a closed set.
///
/// Implementations must be pure given their loaded state: the same text
/// always yields the same prediction.
pub trait Classifier {
    fn classify(&self, text: &str) -> Result<Prediction>;

    /// Every label this classifier can return, sorted.
    fn labels(&self) -> &[String];
}

// ─── AnswerRepository ─────────────────────────────────────────────────────────
/// Looks up stored answer text for a category.
///
/// `Ok(None)` means no record has this category. That is a normal
/// result, distinct from `Err`, which means storage itself failed.
pub trait AnswerRepository {
    fn find_answer(&self, category: &str) -> Result<Option<String>>;
}
