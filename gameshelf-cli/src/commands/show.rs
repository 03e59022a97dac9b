use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gameshelf_catalog::find_game;
use gameshelf_content::{ContentSection, SectionLevel, sectionize};

use super::CatalogTarget;
use crate::error::CliError;

pub(crate) async fn run_show(
    target: &CatalogTarget,
    source: &str,
    id: &str,
    json: bool,
) -> Result<(), CliError> {
    let catalog = target.load().await?;
    let game = find_game(&catalog.games, source, id)
        .ok_or_else(|| CliError::not_found(format!("{source}/{id}")))?;
    if !game.is_valid() {
        log::warn!("{} is missing its title", game.key());
    }

    let sections = sectionize(game.html_content.as_deref(), game.description.as_deref());

    if json {
        let value = serde_json::json!({
            "game": game,
            "sections": sections,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    log::info!(
        "{}",
        game.display_title().if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!(
        "  {}",
        game.key().if_supports_color(Stdout, |t| t.cyan()),
    );
    if !game.categories.is_empty() {
        log::info!("  Categories: {}", game.categories.join(", "));
    }
    match &game.iframe_url {
        Some(url) => log::info!("  Play: {}", url),
        None => log::info!(
            "  Play: {}",
            "not available".if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }
    log::info!("  Preview: {}", game.preview_image_or_placeholder());
    if let Some(url) = &game.url {
        log::info!("  Page: {}", url);
    }

    for section in &sections {
        log::info!("");
        print_section(section);
    }
    Ok(())
}

fn print_section(section: &ContentSection) {
    let indent = match section.level {
        SectionLevel::Top => {
            log::info!("{}", section.title.if_supports_color(Stdout, |t| t.bold()));
            ""
        }
        SectionLevel::Sub => {
            log::info!(
                "  {}",
                section.title.if_supports_color(Stdout, |t| t.underline()),
            );
            "  "
        }
    };
    for line in section.plain_text().lines() {
        log::info!("{}  {}", indent, line);
    }
}
