// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// The four subcommands and their flags:
//
//   import  — load FAQ records from a JSON file into the table
//   train   — fit the classifier from the stored questions
//   ask     — answer one question and exit
//   chat    — answer questions read line by line from stdin

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;
use crate::infra::config::BotConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import FAQ records from a JSON file
    Import(ImportArgs),

    /// Train the classifier on the questions stored in the database
    Train(TrainArgs),

    /// Answer a single question
    Ask(AskArgs),

    /// Answer questions interactively until `exit`, `quit` or EOF
    Chat(ChatArgs),
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON array of {category, question, answer} objects
    #[arg(long)]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Number of full passes over the training questions
    #[arg(long, default_value_t = 60)]
    pub epochs: usize,

    /// Questions per optimiser step
    #[arg(long, default_value_t = 16)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 0.05)]
    pub lr: f64,

    /// Dropout applied to the input features while training
    #[arg(long, default_value_t = 0.1)]
    pub dropout: f64,

    /// Seed for the train/validation split and epoch shuffles
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Share of questions used for training; the rest validate
    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,

    /// Largest vocabulary kept, most frequent words first
    #[arg(long, default_value_t = 20_000)]
    pub max_vocab: usize,
}

impl TrainArgs {
    /// Combine training flags with the resolved storage and model locations.
    pub fn into_config(self, bot: &BotConfig) -> TrainConfig {
        TrainConfig {
            database:       bot.database.clone(),
            model_dir:      bot.model_dir.clone(),
            epochs:         self.epochs,
            batch_size:     self.batch_size,
            lr:             self.lr,
            dropout:        self.dropout,
            seed:           self.seed,
            train_fraction: self.train_fraction,
            max_vocab:      self.max_vocab,
        }
    }
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to answer
    #[arg(long)]
    pub question: String,

    /// Print the full reply (category, confidence, answer) as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Print each reply as a JSON line
    #[arg(long)]
    pub json: bool,
}
