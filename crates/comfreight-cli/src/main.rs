//! ComFreight CLI - Command-line interface for shipment tracking.

use clap::Parser;
use comfreight_cli::commands;
use comfreight_cli::repl;
use comfreight_cli::{Cli, Command, Config, Formatter};
use comfreight_store::InMemoryStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log to stderr so table/JSON output on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> comfreight_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config, writing defaults on first run
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => {
            let path = Config::path()?;
            if !path.exists() {
                Config::default().save_to(&path).ok();
            }
            Config::load_from(&path)?
        }
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // One-shot commands work on a fresh seeded store
    let mut store = InMemoryStore::seeded();

    match cli.command.unwrap_or(Command::Repl) {
        Command::Repl => {
            repl::run_repl(&config, &formatter).await?;
        }
        Command::List => {
            commands::execute_list(&store, &formatter)?;
        }
        Command::Search(args) => {
            commands::execute_search(args, &store, &formatter)?;
        }
        Command::Show(args) => {
            commands::execute_show(args, &store, &formatter)?;
        }
        Command::Create(args) => {
            commands::execute_create(args, &mut store, &formatter)?;
        }
        Command::LogException(args) => {
            let analyzer = if args.analyze {
                Some(config.build_analyzer()?)
            } else {
                None
            };
            commands::execute_log_exception(args, &mut store, analyzer.as_ref(), &formatter)
                .await?;
        }
        Command::Analyze(args) => {
            let analyzer = config.build_analyzer()?;
            commands::execute_analyze(args, &analyzer, &formatter).await?;
        }
    }

    Ok(())
}
