// ============================================================
// Layer 2 — ImportUseCase
// ============================================================
// Loads FAQ records from a JSON file into the `faq` table.
// The file is fully validated before the database is touched,
// and all rows go in under one transaction.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::data::loader::FaqFileLoader;
use crate::infra::{config::DatabaseConfig, sqlite_repository::SqliteFaqWriter};

pub struct ImportUseCase {
    database: DatabaseConfig,
    file:     PathBuf,
}

impl ImportUseCase {
    pub fn new(database: DatabaseConfig, file: impl Into<PathBuf>) -> Self {
        Self { database, file: file.into() }
    }

    /// Returns the ids assigned to the new rows.
    pub fn execute(&self) -> Result<Vec<i64>> {
        let loader  = FaqFileLoader::new(&self.file);
        let records = loader
            .load_all()
            .with_context(|| format!("Cannot import '{}'", self.file.display()))?;

        let mut writer = SqliteFaqWriter::open(&self.database).with_context(|| {
            format!("Cannot open database '{}'", self.database.path.display())
        })?;
        let ids = writer.insert_all(&records)?;

        tracing::info!(
            "Imported {} records into '{}'",
            ids.len(),
            self.database.path.display()
        );
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::AnswerRepository;
    use crate::infra::sqlite_repository::SqliteFaqRepository;

    #[test]
    fn test_import_then_lookup() {
        let dir  = tempfile::tempdir().unwrap();
        let file = dir.path().join("faq.json");
        std::fs::write(
            &file,
            r#"[
                {"category": "A", "question": "q1", "answer": "first A"},
                {"category": "A", "question": "q2", "answer": "second A"},
                {"category": "B", "question": "q3", "answer": "only B"}
            ]"#,
        )
        .unwrap();
        let db = DatabaseConfig::new(dir.path().join("data").join("faq.db"));

        let ids = ImportUseCase::new(db.clone(), &file).execute().unwrap();
        assert_eq!(ids, vec![1, 2, 3]);

        let repo = SqliteFaqRepository::new(db);
        assert_eq!(repo.find_answer("A").unwrap().as_deref(), Some("first A"));
        assert_eq!(repo.find_answer("B").unwrap().as_deref(), Some("only B"));
    }

    #[test]
    fn test_invalid_file_writes_nothing() {
        let dir  = tempfile::tempdir().unwrap();
        let file = dir.path().join("faq.json");
        std::fs::write(
            &file,
            r#"[
                {"category": "A", "question": "q1", "answer": "fine"},
                {"category": "B", "question": "q2", "answer": ""}
            ]"#,
        )
        .unwrap();
        let db = DatabaseConfig::new(dir.path().join("faq.db"));

        assert!(ImportUseCase::new(db.clone(), &file).execute().is_err());
        assert!(!db.path.exists());
    }
}
