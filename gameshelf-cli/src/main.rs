//! gameshelf CLI
//!
//! Command-line interface for browsing a catalog of scraped web games.

mod cli_types;
mod commands;
mod error;
mod logger;

use clap::Parser;

use gameshelf_lib::settings::load_settings;

use cli_types::{Cli, Commands, ConfigAction};
use commands::CatalogTarget;
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to initialise logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        root,
        sources,
        command,
        ..
    } = cli;
    let settings = load_settings();

    if let Commands::Config { action } = &command {
        return match action {
            ConfigAction::Show => {
                commands::config::run_config_show(root.as_deref(), &settings);
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::SetRoot { dir } => commands::config::run_config_set_root(dir),
        };
    }

    let target = CatalogTarget::new(root, sources, settings);
    log::debug!("Catalog root: {}", target.root.display());

    let rt = tokio::runtime::Runtime::new().map_err(|e| CliError::runtime(e.to_string()))?;
    rt.block_on(async {
        match &command {
            Commands::List { category, json } => {
                if category.as_deref().is_some_and(|c| c.trim().is_empty()) {
                    return Err(CliError::usage("--category cannot be empty"));
                }
                commands::list::run_list(&target, category.as_deref(), *json).await
            }
            Commands::Categories => commands::categories::run_categories(&target).await,
            Commands::Show { source, id, json } => {
                commands::show::run_show(&target, source, id, *json).await
            }
            Commands::Sources => commands::sources::run_sources(&target).await,
            Commands::Config { .. } => Ok(()),
        }
    })
}
