use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::CatalogTarget;
use crate::error::CliError;

pub(crate) async fn run_sources(target: &CatalogTarget) -> Result<(), CliError> {
    let sources = target.sources().await?;

    log::info!(
        "Sources under {}:",
        target.root.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("");
    if sources.is_empty() {
        log::info!("  (none)");
    }
    for source in &sources {
        log::info!(
            "  {:<24} {}",
            source.source_id().if_supports_color(Stdout, |t| t.bold()),
            source.kind.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}
