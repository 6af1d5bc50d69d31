// ============================================================
// Layer 4 — FAQ File Loader
// ============================================================
// Reads the records for an `import` run from a JSON file:
//
//   [
//     { "category": "ThirdPartyInsurance",
//       "question": "What does third-party insurance cover?",
//       "answer":   "Covers third-party financial and bodily damages." },
//     ...
//   ]
//
// Every record is validated before any of them is returned,
// so a bad file never results in a half-finished import.

use std::{fs, path::PathBuf};

use crate::domain::error::{BotError, Result};
use crate::domain::faq_record::NewFaqRecord;

/// Import source: one JSON file of FAQ records.
pub struct FaqFileLoader {
    path: PathBuf,
}

impl FaqFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load and validate every record in the file.
    pub fn load_all(&self) -> Result<Vec<NewFaqRecord>> {
        let json    = fs::read_to_string(&self.path)?;
        let records = parse_records(&json)?;
        tracing::info!(
            "Loaded {} FAQ records from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

/// Parse a JSON array of records and validate each one.
pub fn parse_records(json: &str) -> Result<Vec<NewFaqRecord>> {
    let records: Vec<NewFaqRecord> = serde_json::from_str(json)?;
    for (index, record) in records.iter().enumerate() {
        record
            .validate()
            .map_err(|reason| BotError::InvalidRecord { index, reason })?;
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorKind;

    #[test]
    fn test_parses_valid_records() {
        let json = r#"[
            {"category": "A", "question": "q1", "answer": "a1"},
            {"category": "B", "answer": "a2"}
        ]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].question, "");
    }

    #[test]
    fn test_invalid_record_is_reported_by_index() {
        let json = r#"[
            {"category": "A", "question": "q1", "answer": "a1"},
            {"category": "",  "question": "q2", "answer": "a2"}
        ]"#;
        match parse_records(json) {
            Err(BotError::InvalidRecord { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_is_a_json_error() {
        let err = parse_records("{not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Json);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir    = tempfile::tempdir().unwrap();
        let loader = FaqFileLoader::new(dir.path().join("missing.json"));
        assert_eq!(loader.load_all().unwrap_err().kind(), ErrorKind::Io);
    }

    #[test]
    fn test_reads_file_from_disk() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("faq.json");
        std::fs::write(&path, r#"[{"category":"A","question":"q","answer":"a"}]"#).unwrap();
        let records = FaqFileLoader::new(&path).load_all().unwrap();
        assert_eq!(records, vec![NewFaqRecord::new("A", "q", "a")]);
    }
}
