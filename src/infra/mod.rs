// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Concerns shared by the use cases but owned by none of them:
//
//   config.rs            — BotConfig / DatabaseConfig (file + CLI)
//   sqlite_repository.rs — the `faq` table: lookups and imports
//   memory_repository.rs — the same lookup rule over a Vec
//   checkpoint.rs        — model weights + manifest on disk
//   tokenizer_store.rs   — word-level tokenizer build/load
//   metrics.rs           — per-epoch training metrics CSV

/// Bot and database configuration
pub mod config;

/// SQLite-backed FAQ storage
pub mod sqlite_repository;

/// In-memory FAQ storage
pub mod memory_repository;

/// Model artifact saving and loading
pub mod checkpoint;

/// Tokenizer training, saving, and loading
pub mod tokenizer_store;

/// Training metrics CSV logger
pub mod metrics;
