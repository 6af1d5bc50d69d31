// ============================================================
// Layer 2 — Ask Use Case
// ============================================================
// The answering pipeline:
//
//   question ──▶ Classifier ──▶ category ──▶ AnswerRepository ──▶ answer
//
// A category with no stored record yields the configured
// fallback text and `matched: false`. Classifier and storage
// failures are returned as errors, never folded into the
// fallback, so callers can tell "no FAQ" from "broken".

use crate::domain::error::Result;
use crate::domain::faq_record::Reply;
use crate::domain::traits::{AnswerRepository, Classifier};
use crate::infra::{config::BotConfig, sqlite_repository::SqliteFaqRepository};
use crate::ml::inferencer::Inferencer;

/// Classifier and answer storage joined into one question → reply step.
///
/// Generic over both sides so tests can pair a fake classifier with
/// the real SQLite table, or the real model with an in-memory table.
pub struct FaqBot<C, R> {
    classifier: C,
    repository: R,
    /// Answer text used when the predicted category has no stored record
    fallback:   String,
}

impl<C: Classifier, R: AnswerRepository> FaqBot<C, R> {
    pub fn new(classifier: C, repository: R, fallback: impl Into<String>) -> Self {
        Self { classifier, repository, fallback: fallback.into() }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Classify `question`, then look up the answer for its category.
    pub fn reply(&self, question: &str) -> Result<Reply> {
        let prediction = self.classifier.classify(question)?;
        let found      = self.repository.find_answer(&prediction.category)?;

        if found.is_none() {
            tracing::info!(
                category = %prediction.category,
                "No stored answer for category, using fallback"
            );
        }

        let matched = found.is_some();
        Ok(Reply {
            question:   question.to_string(),
            category:   prediction.category,
            confidence: prediction.confidence,
            answer:     found.unwrap_or_else(|| self.fallback.clone()),
            matched,
        })
    }
}

/// The production wiring: a trained model from disk and the SQLite table.
pub type AskUseCase = FaqBot<Inferencer, SqliteFaqRepository>;

impl AskUseCase {
    /// Loads the classifier up front; a bot with no model never starts.
    pub fn from_config(config: &BotConfig) -> Result<Self> {
        let classifier = Inferencer::from_dir(&config.model_dir)?;
        let repository = SqliteFaqRepository::new(config.database.clone());
        Ok(FaqBot::new(classifier, repository, config.fallback_answer.clone()))
    }
}
