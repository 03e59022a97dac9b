use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gameshelf_lib::settings::{
    CatalogSettings, load_settings_string, save_catalog_root, settings_path,
};

use crate::error::CliError;

/// Show the settings file, the resolved catalog root and where it came from.
pub(crate) fn run_config_show(root_override: Option<&Path>, settings: &CatalogSettings) {
    let path = settings_path();

    log::info!(
        "{}",
        "Gameshelf Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let origin = if root_override.is_some() {
        "(--root)"
    } else if settings.root.is_some() {
        "(settings)"
    } else {
        "(default)"
    };
    let root = settings.resolve_root(root_override.map(Path::to_path_buf));
    log::info!(
        "  Catalog root:  {} {}",
        root.display(),
        origin.if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!(
        "  Partitioned:   {}",
        settings.partitioned_sources().join(", "),
    );

    if let Some(contents) = load_settings_string() {
        log::info!("");
        for line in contents.lines() {
            log::info!("  {}", line.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

/// Save the catalog root used when `--root` is not given.
pub(crate) fn run_config_set_root(dir: &Path) -> Result<(), CliError> {
    if !dir.is_dir() {
        log::warn!("{} is not a directory (saving anyway)", dir.display());
    }
    let dir = std::path::absolute(dir)?;
    save_catalog_root(Some(dir.as_path()))?;
    log::info!(
        "{} Catalog root set to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        dir.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::debug!("Settings written to {}", settings_path().display());
    Ok(())
}
