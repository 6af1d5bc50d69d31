// ============================================================
// Layer 6 — SQLite FAQ Storage
// ============================================================
// Two handles on the same `faq` table:
//
//   SqliteFaqRepository → read side used while answering.
//                         Opens a read-only connection per call;
//                         the connection is dropped when the call
//                         returns, on success or failure.
//   SqliteFaqWriter     → write side used by `import`. Creates the
//                         table if needed and inserts records in a
//                         single transaction.
//
// Every query takes its values as bound parameters.

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use crate::domain::error::Result;
use crate::domain::faq_record::{FaqRecord, NewFaqRecord};
use crate::domain::traits::AnswerRepository;
use crate::infra::config::DatabaseConfig;

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS faq (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL,
    question TEXT NOT NULL,
    answer   TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_faq_category ON faq(category);
"#;

const FIND_ANSWER_SQL: &str =
    "SELECT answer FROM faq WHERE category = ?1 ORDER BY id LIMIT 1";

// ─── Read side ────────────────────────────────────────────────────────────────
/// Holds only the configuration; each call opens its own connection.
pub struct SqliteFaqRepository {
    config: DatabaseConfig,
}

impl SqliteFaqRepository {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    /// A missing file is an error here, never an empty database.
    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.config.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(self.config.busy_timeout())?;
        Ok(conn)
    }

    /// All records in id order.
    pub fn all_records(&self) -> Result<Vec<FaqRecord>> {
        let conn     = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, category, question, answer FROM faq ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(FaqRecord {
                id:       row.get(0)?,
                category: row.get(1)?,
                question: row.get(2)?,
                answer:   row.get(3)?,
            })
        })?;

        let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// `(category, question)` pairs for training, skipping blank questions.
    pub fn training_pairs(&self) -> Result<Vec<(String, String)>> {
        let pairs = self
            .all_records()?
            .into_iter()
            .filter(|r| !r.question.trim().is_empty())
            .map(|r| (r.category, r.question))
            .collect();
        Ok(pairs)
    }
}

impl AnswerRepository for SqliteFaqRepository {
    fn find_answer(&self, category: &str) -> Result<Option<String>> {
        let conn   = self.connect()?;
        let answer = conn
            .query_row(FIND_ANSWER_SQL, params![category], |row| row.get(0))
            .optional()?;

        tracing::debug!(category, found = answer.is_some(), "FAQ lookup");
        Ok(answer)
    }
}

// ─── Write side ───────────────────────────────────────────────────────────────
/// A read-write connection kept open for the length of one import.
pub struct SqliteFaqWriter {
    conn: Connection,
}

impl SqliteFaqWriter {
    /// Open (creating if needed) the database and make sure the table exists.
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&config.path)?;
        conn.busy_timeout(config.busy_timeout())?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Insert all records atomically and return their new ids in order.
    pub fn insert_all(&mut self, records: &[NewFaqRecord]) -> Result<Vec<i64>> {
        let tx      = self.conn.transaction()?;
        let mut ids = Vec::with_capacity(records.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO faq (category, question, answer) VALUES (?1, ?2, ?3)",
            )?;
            for r in records {
                stmt.execute(params![r.category.trim(), r.question, r.answer])?;
                ids.push(tx.last_insert_rowid());
            }
        }
        tx.commit()?;
        Ok(ids)
    }
}
