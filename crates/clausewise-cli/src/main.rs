//! Clausewise CLI - Plain-language risk review for contracts and leases.

use clap::Parser;
use clausewise_analyzer::{Analyzer, ClauseAssistant, DocumentPipeline};
use clausewise_cli::commands;
use clausewise_cli::{Cli, Command, Config, Formatter};
use clausewise_domain::traits::LlmProvider;
use clausewise_pdf::PdfTextExtractor;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> clausewise_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // An explicit config file must exist; the default one is created on first run
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load_or_init(&Config::path()?)?,
    };
    config.validate()?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let provider = config.provider(cli.api_key.clone(), cli.model.clone())?;
    if !provider.is_configured() {
        error!("No API key configured. Set GOOGLE_API_KEY, pass --api-key, or add model.api_key to the config file.");
    }

    let analyzer = Analyzer::new(provider.clone(), config.analysis.clone());
    let pipeline = DocumentPipeline::new(PdfTextExtractor::new(), analyzer);

    match cli.command {
        Command::Analyze(args) => {
            commands::execute_analyze(args, &pipeline, &formatter).await?;
        }
        Command::Review(args) => {
            let assistant = ClauseAssistant::new(provider, config.analysis.clone());
            commands::execute_review(args, &pipeline, &assistant, &config, &formatter).await?;
        }
        Command::Extract(args) => {
            commands::execute_extract(args, &pipeline, &formatter)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
