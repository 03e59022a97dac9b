use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gameshelf_catalog::{CATEGORY_ALL, catalog_categories, category_description};

use super::CatalogTarget;
use crate::error::CliError;

pub(crate) async fn run_categories(target: &CatalogTarget) -> Result<(), CliError> {
    let catalog = target.load().await?;
    let counts = catalog_categories(&catalog.games);

    log::info!(
        "{} ({} games)",
        CATEGORY_ALL.if_supports_color(Stdout, |t| t.bold()),
        catalog.games.len(),
    );
    log::info!("  {}", category_description(CATEGORY_ALL));

    for (category, count) in &counts {
        log::info!("");
        log::info!(
            "{} ({})",
            category.if_supports_color(Stdout, |t| t.bold()),
            count,
        );
        log::info!(
            "  {}",
            category_description(category).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}
