use anyhow::Result;
use clap::Parser;
use faq_bot::cli::Cli;

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries nothing but answers.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("faq_bot=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    cli.run()
}
