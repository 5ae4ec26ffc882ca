use clap::Parser;
use tracing::{info, warn};

mod cli;
mod commands;

use cli::Cli;
use quill_core::Settings;
use quill_index::Notebook;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    quill_core::load_dotenv();
    let cli = Cli::parse();

    let loaded = Settings::load();
    let level = loaded
        .as_ref()
        .map(|settings| settings.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = loaded.unwrap_or_else(|err| {
        warn!("Could not load settings, using defaults: {}", err);
        Settings::default()
    });

    let notebook = Notebook::load_json(&cli.notes, settings.index_settings())?;
    info!("Loaded {} notes from {}", notebook.notes().len(), cli.notes.display());

    let output = commands::run(&notebook, cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
