// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, resolves the configuration and
// hands off to the use cases in Layer 2. Answers go to stdout;
// logs and errors go to stderr.

pub mod chat;
pub mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{AskArgs, ChatArgs, Commands, ImportArgs, TrainArgs};

use crate::application::{
    ask_use_case::AskUseCase,
    import_use_case::ImportUseCase,
    train_use_case::TrainUseCase,
};
use crate::domain::traits::Classifier;
use crate::infra::config::BotConfig;

#[derive(Parser, Debug)]
#[command(
    name = "faq-bot",
    version,
    about = "Classify questions into FAQ categories and answer them from an SQLite table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON config file (database, model_dir, fallback_answer)
    #[arg(long, global = true, env = "FAQ_BOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database holding the `faq` table
    #[arg(long, global = true, env = "FAQ_BOT_DB")]
    pub db: Option<PathBuf>,

    /// Directory of the trained model artifact
    #[arg(long, global = true, env = "FAQ_BOT_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = BotConfig::load(self.config.as_deref())
            .context("Cannot load config file")?
            .with_overrides(self.db, self.model_dir);

        match self.command {
            Commands::Import(args) => run_import(&config, args),
            Commands::Train(args)  => run_train(&config, args),
            Commands::Ask(args)    => run_ask(&config, args),
            Commands::Chat(args)   => run_chat(&config, args),
        }
    }
}

fn run_import(config: &BotConfig, args: ImportArgs) -> Result<()> {
    let ids = ImportUseCase::new(config.database.clone(), &args.file).execute()?;
    println!("Imported {} records.", ids.len());
    Ok(())
}

fn run_train(config: &BotConfig, args: TrainArgs) -> Result<()> {
    let summary = TrainUseCase::new(args.into_config(config)).execute()?;

    println!(
        "Trained on {} questions across {} categories.",
        summary.samples,
        summary.labels.len()
    );
    if let Some(acc) = summary.val_accuracy {
        println!("Validation accuracy: {:.1}%", acc * 100.0);
    }
    Ok(())
}

fn run_ask(config: &BotConfig, args: AskArgs) -> Result<()> {
    let bot   = AskUseCase::from_config(config).context("Cannot start the bot")?;
    let reply = bot.reply(&args.question)?;

    let stdout = std::io::stdout();
    chat::write_reply(&mut stdout.lock(), &reply, args.json)
}

fn run_chat(config: &BotConfig, args: ChatArgs) -> Result<()> {
    let bot = AskUseCase::from_config(config).context("Cannot start the bot")?;
    tracing::info!(
        "Ready: {} categories. One question per line, `exit` to quit.",
        bot.classifier().labels().len()
    );

    let stdin    = std::io::stdin();
    let answered = chat::run_chat(
        &bot,
        stdin.lock(),
        std::io::stdout(),
        std::io::stderr(),
        args.json,
    )?;

    tracing::info!("Chat ended after {} answers", answered);
    Ok(())
}
