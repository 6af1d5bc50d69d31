// ============================================================
// Layer 3 — FAQ Domain Types
// ============================================================
// A stored FAQ row, the import-time shape of a row, and the
// two values produced while answering: a Prediction from the
// classifier and the final Reply shown to the user.

use serde::{Deserialize, Serialize};

/// Answer text used when no stored record matches a category.
pub const DEFAULT_FALLBACK_ANSWER: &str = "No suitable answer found.";

/// One row of the `faq` table.
///
/// `question` is only used for training; lookups go by `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqRecord {
    pub id:       i64,
    pub category: String,
    pub question: String,
    pub answer:   String,
}

/// A record as written in an import file, before SQLite assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFaqRecord {
    pub category: String,
    #[serde(default)]
    pub question: String,
    pub answer:   String,
}

impl NewFaqRecord {
    pub fn new(
        category: impl Into<String>,
        question: impl Into<String>,
        answer:   impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            question: question.into(),
            answer:   answer.into(),
        }
    }

    /// Reject records that could never be served.
    /// An empty question is fine: the row simply adds nothing to training.
    pub fn validate(&self) -> Result<(), String> {
        if self.category.trim().is_empty() {
            return Err("category is empty".to_string());
        }
        if self.answer.trim().is_empty() {
            return Err("answer is empty".to_string());
        }
        Ok(())
    }
}

/// A single label chosen by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub category:   String,
    /// Softmax probability of `category`, in [0, 1]
    pub confidence: f32,
}

impl Prediction {
    pub fn new(category: impl Into<String>, confidence: f32) -> Self {
        Self { category: category.into(), confidence }
    }
}

/// What the bot hands back for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// The question exactly as asked
    pub question:   String,
    /// Predicted category; always one of the classifier's labels
    pub category:   String,
    pub confidence: f32,
    /// Stored answer for `category`, or the fallback text
    pub answer:     String,
    /// false exactly when `answer` is the fallback text
    pub matched:    bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_complete_record() {
        let r = NewFaqRecord::new("ThirdPartyInsurance", "What is covered?", "Damages.");
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_validate_allows_empty_question() {
        let r = NewFaqRecord::new("CarBodyInsurance", "", "Covers your own car.");
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        assert!(NewFaqRecord::new("  ", "q", "a").validate().is_err());
        assert!(NewFaqRecord::new("c", "q", "\n").validate().is_err());
    }

    #[test]
    fn test_question_defaults_when_missing_in_json() {
        let r: NewFaqRecord =
            serde_json::from_str(r#"{"category":"A","answer":"B"}"#).unwrap();
        assert_eq!(r.question, "");
    }
}
