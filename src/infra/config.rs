// ============================================================
// Layer 6 — Bot Configuration
// ============================================================
// Where the database and the model live, plus the fallback text.
//
// Resolution order (later wins):
//   1. built-in defaults
//   2. an optional JSON config file (--config / FAQ_BOT_CONFIG)
//   3. explicit CLI flags or their env vars (--db, --model-dir)
//
// The resolved value is passed into the repository and the bot
// explicitly; nothing reads configuration from globals.
//
// Example file:
//   {
//     "database": { "path": "faq.db", "busy_timeout_ms": 2000 },
//     "model_dir": "model",
//     "fallback_answer": "Sorry, I don't know that one yet."
//   }

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::domain::error::Result;
use crate::domain::faq_record::DEFAULT_FALLBACK_ANSWER;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file holding the `faq` table
    pub path:            PathBuf,
    /// How long a call waits on a locked database before failing
    pub busy_timeout_ms: u64,
}

impl DatabaseConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), ..Self::default() }
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path:            PathBuf::from("faq.db"),
            busy_timeout_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub database:        DatabaseConfig,
    /// Directory with tokenizer.json, manifest.json and the weights
    pub model_dir:       PathBuf,
    /// Answer text for a category with no stored record
    pub fallback_answer: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            database:        DatabaseConfig::default(),
            model_dir:       PathBuf::from("model"),
            fallback_answer: DEFAULT_FALLBACK_ANSWER.to_string(),
        }
    }
}

impl BotConfig {
    /// Defaults, overlaid with `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let json   = fs::read_to_string(path)?;
                let config = serde_json::from_str(&json)?;
                tracing::debug!("Loaded config from '{}'", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply CLI-level overrides on top of the loaded values.
    pub fn with_overrides(mut self, db: Option<PathBuf>, model_dir: Option<PathBuf>) -> Self {
        if let Some(db) = db {
            self.database.path = db;
        }
        if let Some(dir) = model_dir {
            self.model_dir = dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = BotConfig::load(None).unwrap();
        assert_eq!(cfg.database.path, PathBuf::from("faq.db"));
        assert_eq!(cfg.fallback_answer, "No suitable answer found.");
        assert_eq!(cfg.database.busy_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.json");
        fs::write(&path, r#"{"database": {"path": "other.db"}}"#).unwrap();

        let cfg = BotConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.database.path, PathBuf::from("other.db"));
        assert_eq!(cfg.database.busy_timeout_ms, 5_000);
        assert_eq!(cfg.model_dir, PathBuf::from("model"));
    }

    #[test]
    fn test_flags_override_file() {
        let cfg = BotConfig::default()
            .with_overrides(Some("cli.db".into()), None);
        assert_eq!(cfg.database.path, PathBuf::from("cli.db"));
        assert_eq!(cfg.model_dir, PathBuf::from("model"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(BotConfig::load(Some(Path::new("/nonexistent/bot.json"))).is_err());
    }
}
