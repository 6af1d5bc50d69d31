// ============================================================
// Layer 6 — In-Memory FAQ Repository
// ============================================================
// Holds records in id order and answers lookups with the same
// rule as the SQLite repository: first record (lowest id) whose
// category matches. Useful wherever a database would be
// overkill, tests first among them.

use crate::domain::error::Result;
use crate::domain::faq_record::{FaqRecord, NewFaqRecord};
use crate::domain::traits::AnswerRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryFaqRepository {
    records: Vec<FaqRecord>,
}

impl InMemoryFaqRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign ids 1, 2, 3, ... in the order given.
    pub fn from_records(records: impl IntoIterator<Item = NewFaqRecord>) -> Self {
        let mut repo = Self::new();
        for r in records {
            repo.insert(r);
        }
        repo
    }

    pub fn insert(&mut self, record: NewFaqRecord) -> i64 {
        let id = self.records.last().map(|r| r.id + 1).unwrap_or(1);
        self.records.push(FaqRecord {
            id,
            category: record.category,
            question: record.question,
            answer:   record.answer,
        });
        id
    }

}

impl AnswerRepository for InMemoryFaqRepository {
    fn find_answer(&self, category: &str) -> Result<Option<String>> {
        Ok(self
            .records
            .iter()
            .find(|r| r.category == category)
            .map(|r| r.answer.clone()))
    }
}
