use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gameshelf_catalog::{CATEGORY_ALL, GameRecord, filter_by_category, normalize_category};

use super::CatalogTarget;
use crate::error::CliError;

pub(crate) async fn run_list(
    target: &CatalogTarget,
    category: Option<&str>,
    json: bool,
) -> Result<(), CliError> {
    let catalog = target.load().await?;
    let requested = category.unwrap_or(CATEGORY_ALL);
    let games = filter_by_category(&catalog.games, requested);

    if json {
        println!("{}", serde_json::to_string_pretty(&games)?);
        return Ok(());
    }

    let heading = if requested == CATEGORY_ALL {
        CATEGORY_ALL.to_string()
    } else {
        normalize_category(requested).to_string()
    };
    log::info!(
        "{} ({} games)",
        heading.if_supports_color(Stdout, |t| t.bold()),
        games.len(),
    );
    log::info!("");

    for game in &games {
        print_row(game);
    }
    if !catalog.errors.is_empty() {
        log::info!("");
        log::info!(
            "{}",
            format!("{} entries skipped", catalog.errors.len())
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

fn print_row(game: &GameRecord) {
    let categories = if game.categories.is_empty() {
        String::new()
    } else {
        format!(" [{}]", game.categories.join(", "))
    };
    log::info!(
        "  {}  {}{}",
        game.display_title().if_supports_color(Stdout, |t| t.bold()),
        game.key().if_supports_color(Stdout, |t| t.cyan()),
        categories.if_supports_color(Stdout, |t| t.dimmed()),
    );
}
