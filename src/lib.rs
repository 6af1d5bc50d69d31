//! FAQ bot: classify a question into a category with a trained
//! text classifier, then answer it from the `faq` table.
//!
//! Layers, outermost first:
//!   cli         — clap commands, console chat loop
//!   application — import / train / ask use cases
//!   domain      — records, predictions, errors, core traits
//!   data        — cleaning, TF-IDF, datasets, batching
//!   ml          — burn model, training loop, inference
//!   infra       — config, SQLite, checkpoints, tokenizer, metrics

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;
pub mod ml;
