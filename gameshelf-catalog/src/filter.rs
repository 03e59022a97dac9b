//! Listing filters over a loaded catalog.

use std::collections::HashMap;

use crate::category::{CATEGORY_ALL, normalize_category};
use crate::types::GameRecord;

/// Records belonging to `requested`, in catalog order.
///
/// The request and each record's categories are compared after
/// normalization, so `"Girls"` and `"Girl"` select the same records.
/// Invalid records (see [`GameRecord::is_valid`]) are dropped and logged.
/// [`CATEGORY_ALL`] returns the catalog untouched.
pub fn filter_by_category(catalog: &[GameRecord], requested: &str) -> Vec<GameRecord> {
    if requested == CATEGORY_ALL {
        return catalog.to_vec();
    }

    let wanted = normalize_category(requested);
    catalog
        .iter()
        .filter(|game| {
            game.categories
                .iter()
                .any(|c| normalize_category(c) == wanted)
        })
        .filter(|game| {
            let valid = game.is_valid();
            if !valid {
                log::warn!(
                    "Dropping invalid game record '{}' from '{}' listing",
                    game.key(),
                    wanted
                );
            }
            valid
        })
        .cloned()
        .collect()
}

/// Distinct categories present in the catalog, with the number of valid
/// records in each.
///
/// Ordered with digit-leading names first, then case-insensitively.
pub fn catalog_categories(catalog: &[GameRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for game in catalog.iter().filter(|g| g.is_valid()) {
        let mut seen: Vec<&str> = Vec::with_capacity(game.categories.len());
        for category in &game.categories {
            let canonical = normalize_category(category);
            if canonical.is_empty() || seen.contains(&canonical) {
                continue;
            }
            seen.push(canonical);
            *counts.entry(canonical).or_insert(0) += 1;
        }
    }

    let mut categories: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    categories.sort_by_cached_key(|(name, _)| {
        let digit_first = name.chars().next().is_some_and(|c| c.is_ascii_digit());
        (!digit_first, name.to_lowercase(), name.clone())
    });
    categories
}

/// Look up a single record by its detail-view key.
pub fn find_game<'a>(catalog: &'a [GameRecord], source: &str, id: &str) -> Option<&'a GameRecord> {
    catalog.iter().find(|g| g.source == source && g.id == id)
}
