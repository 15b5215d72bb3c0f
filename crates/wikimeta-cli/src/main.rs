//! Wikimeta CLI - Import knowledge graph properties into document metadata.

use anyhow::Context;
use clap::Parser;
use wikimeta_cli::commands;
use wikimeta_cli::{logging, Cli, Command, Config, Formatter};
use wikimeta_client::WikidataClient;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Load config, falling back to defaults when the file is absent
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    // Override languages if specified
    if let Some(language) = cli.language {
        config.query.language = language;
        config.query.validate().map_err(wikimeta_cli::CliError::InvalidInput)?;
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Handle commands
    match cli.command {
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
        cmd => {
            // Commands that require the knowledge graph
            let client = WikidataClient::new(config.client.clone())?;

            let result = match cmd {
                Command::Search(args) => {
                    commands::execute_search(args, client, &config.query, &formatter).await
                }
                Command::Properties(args) => {
                    commands::execute_properties(args, client, &config.query, &formatter).await
                }
                Command::Import(args) => {
                    commands::execute_import(args, client, &config, &formatter).await
                }
                Command::Config(_) => unreachable!(),
            };

            if let Err(e) = result {
                eprintln!("{}", formatter.error(&e.to_string()));
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
