//! Canonical category taxonomy.
//!
//! Upstream sources spell the same category several ways ("Girls", "Sport",
//! "Spor"), and the category-partitioned source stores its records under
//! lower-cased directory tokens ("jump_run", "2_player"). Everything here is
//! pure and total: unknown labels pass through unchanged.

use std::sync::LazyLock;

use regex::Regex;

/// Listing sentinel that bypasses category filtering. Never appears in data.
pub const CATEGORY_ALL: &str = "All games";

/// Separator used in directory tokens.
const TOKEN_SEPARATOR: char = '_';

/// Raw label → canonical label. Canonical labels map to themselves.
const CATEGORY_ALIASES: &[(&str, &str)] = &[
    ("Girls", "Girl"),
    ("Girl", "Girl"),
    ("Sports", "Sports"),
    ("Sport", "Sports"),
    ("Spor", "Sports"),
];

/// Navigation order of the canonical categories.
pub const SIDEBAR_CATEGORIES: &[&str] = &[
    "2 Player",
    "2D",
    "Action",
    "Adventure",
    "Arcade",
    "Car",
    "Cards",
    "Clicker",
    "Crazy",
    "Drift",
    "Driving",
    "Girl",
    "Jump & Run",
    "Kids",
    "Mobile",
    "Multiplayer",
    "Pixel",
    "Puzzle",
    "Racing",
    "Shooting",
    "Simulator",
    "Sniper",
    "Sports",
    "Strategy",
];

const CATEGORY_DESCRIPTIONS: &[(&str, &str)] = &[
    (CATEGORY_ALL, "Browse our complete collection of free online games."),
    (
        "2 Player",
        "Challenge your friends in our collection of two-player games. Perfect for friendly competition and multiplayer fun.",
    ),
    ("2D", "Classic 2D games with timeless gameplay and retro charm."),
    ("Action", "Fast-paced action games that test your reflexes and skills."),
    (
        "Adventure",
        "Embark on epic journeys and explore fascinating worlds in our adventure games.",
    ),
    (
        "Arcade",
        "Classic arcade-style games that bring back the golden age of gaming.",
    ),
    ("Car", "Get behind the wheel in our exciting collection of car games."),
    (
        "Cards",
        "Classic card games and innovative card-based challenges for all skill levels.",
    ),
    ("Clicker", "Addictive clicking games that are easy to play but hard to master."),
    ("Crazy", "Wild and wacky games that defy expectations."),
    ("Drift", "Master the art of drifting in these thrilling racing games."),
    (
        "Driving",
        "Experience the thrill of driving various vehicles in realistic environments.",
    ),
    (
        "Girl",
        "Games designed with girl gamers in mind, featuring fashion, creativity, and more.",
    ),
    (
        "Jump & Run",
        "Classic platformer games where timing and precision are key to success.",
    ),
    ("Kids", "Fun and educational games perfect for young players."),
    ("Mobile", "Games optimized for mobile play, perfect for gaming on the go."),
    ("Multiplayer", "Connect and compete with players from around the world."),
    ("Pixel", "Retro-styled pixel art games with classic charm."),
    (
        "Puzzle",
        "Challenge your mind with our collection of brain-teasing puzzle games.",
    ),
    (
        "Racing",
        "Speed through tracks and compete for first place in our racing games.",
    ),
    (
        "Shooting",
        "Test your aim and reflexes in our action-packed shooting games.",
    ),
    (
        "Simulator",
        "Experience realistic simulations of various activities and professions.",
    ),
    ("Sniper", "Precision shooting games that test your accuracy and patience."),
    (
        "Sports",
        "Compete in various sports games from football to basketball and more.",
    ),
    (
        "Strategy",
        "Plan your moves and outsmart opponents in our strategy games.",
    ),
];

static AMPERSAND_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*&\s*").expect("static pattern"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Map a raw category label to its canonical spelling.
///
/// Labels missing from the alias table are already canonical and are
/// returned unchanged.
pub fn normalize_category(raw: &str) -> &str {
    CATEGORY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == raw)
        .map_or(raw, |&(_, canonical)| canonical)
}

/// On-disk directory token for a category: `"Jump & Run"` → `"jump_run"`.
pub fn category_to_directory_token(category: &str) -> String {
    let lower = category.to_lowercase();
    let sep = TOKEN_SEPARATOR.to_string();
    let collapsed = AMPERSAND_RUN.replace_all(&lower, sep.as_str());
    WHITESPACE_RUN.replace_all(&collapsed, sep.as_str()).into_owned()
}

/// Best-effort inverse of [`category_to_directory_token`]: `"jump_run"` → `"Jump Run"`.
///
/// Only capitalization is restored; an `&` dropped by the forward mapping is
/// not recovered.
pub fn directory_token_to_category(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut at_word_start = true;
    for c in token.chars() {
        let c = if c == TOKEN_SEPARATOR { ' ' } else { c };
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Listing-page blurb for a category, with a generic fallback for unknown ones.
pub fn category_description(category: &str) -> String {
    let canonical = normalize_category(category);
    CATEGORY_DESCRIPTIONS
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, text)| text.to_string())
        .unwrap_or_else(|| {
            format!(
                "Browse our collection of {} games.",
                canonical.to_lowercase()
            )
        })
}
