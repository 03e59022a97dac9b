use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};
use serde::Serialize;

use crate::scope::locate_scope;

/// Title of the implicit first section and of the fallback section.
pub const DEFAULT_SECTION_TITLE: &str = "About This Game";

/// Fallback body text when a game has neither markup nor description.
pub const NO_DESCRIPTION: &str = "No description available.";

/// Title used for a heading element with no text.
const UNTITLED_HEADING: &str = "Game Information";

/// Heading tag that opens a top-level section; every other heading opens a subsection.
const MAJOR_HEADING: &str = "h2";

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

static ENTRY_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".post__entry").expect("static selector"));

static EMPHASIS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("strong, b").expect("static selector"));

/// Nesting of a section on the detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum SectionLevel {
    Top,
    Sub,
}

impl SectionLevel {
    /// 1 for top-level sections, 2 for subsections.
    pub fn depth(self) -> u8 {
        match self {
            Self::Top => 1,
            Self::Sub => 2,
        }
    }
}

impl From<SectionLevel> for u8 {
    fn from(level: SectionLevel) -> Self {
        level.depth()
    }
}

/// One titled chunk of a game's description, in rendering order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentSection {
    pub title: String,
    /// Markup fragment, inline formatting preserved.
    pub body: String,
    pub level: SectionLevel,
}

impl ContentSection {
    fn new(title: impl Into<String>, level: SectionLevel) -> Self {
        Self {
            title: title.into(),
            body: String::new(),
            level,
        }
    }

    fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }

    /// The body as terminal text: one line per top-level block, whitespace
    /// collapsed, markup dropped.
    pub fn plain_text(&self) -> String {
        let fragment = Html::parse_fragment(&self.body);
        let mut lines = Vec::new();
        for child in fragment.root_element().children() {
            let text = match child.value() {
                Node::Text(text) => collapse_whitespace(text),
                Node::Element(_) => ElementRef::wrap(child)
                    .map(|el| collapse_whitespace(&el.text().collect::<String>()))
                    .unwrap_or_default(),
                _ => continue,
            };
            if !text.is_empty() {
                lines.push(text);
            }
        }
        lines.join("\n")
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The single-section form used whenever markup is absent or unusable.
pub fn fallback_section(description: Option<&str>) -> ContentSection {
    let text = description.filter(|d| !d.is_empty()).unwrap_or(NO_DESCRIPTION);
    ContentSection {
        title: DEFAULT_SECTION_TITLE.to_string(),
        body: format!("<p>{text}</p>"),
        level: SectionLevel::Top,
    }
}

/// Split a game's embedded markup into display sections.
///
/// Never returns an empty sequence: markup that is missing, lacks the
/// expected container shape, or yields no body text produces the
/// [`fallback_section`] built from `description`.
pub fn sectionize(markup: Option<&str>, description: Option<&str>) -> Vec<ContentSection> {
    let Some(markup) = markup.filter(|m| !m.trim().is_empty()) else {
        return vec![fallback_section(description)];
    };

    match locate_scope(markup).and_then(|scope| parse_scope(&scope)) {
        Some(sections) => sections,
        None => {
            log::debug!("Markup did not match the entry layout; using plain description");
            vec![fallback_section(description)]
        }
    }
}

/// Walk the entry container of an already-scoped fragment.
///
/// Returns `None` if the container is missing or no section accumulated
/// any body.
pub fn parse_scope(scope: &str) -> Option<Vec<ContentSection>> {
    let fragment = Html::parse_fragment(scope);
    let container = fragment.select(&ENTRY_CONTAINER).next()?;

    let mut sections = Vec::new();
    let mut current = ContentSection::new(DEFAULT_SECTION_TITLE, SectionLevel::Top);

    for child in container.children() {
        match child.value() {
            Node::Element(_) => {
                let Some(element) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = element.value().name();
                let implicit_title = if name == "p" && !current.has_body() {
                    emphasized_title(element)
                } else {
                    None
                };

                if HEADINGS.contains(&name) {
                    let mut title = trimmed_text(element);
                    if title.is_empty() {
                        title = UNTITLED_HEADING.to_string();
                    }
                    let level = if name == MAJOR_HEADING {
                        SectionLevel::Top
                    } else {
                        SectionLevel::Sub
                    };
                    let next = ContentSection::new(title, level);
                    push_if_filled(&mut sections, std::mem::replace(&mut current, next));
                } else if let Some(title) = implicit_title {
                    let next = ContentSection::new(title, SectionLevel::Sub);
                    push_if_filled(&mut sections, std::mem::replace(&mut current, next));
                } else {
                    current.body.push_str(&element.html());
                }
            }
            Node::Text(text) => {
                if !text.trim().is_empty() {
                    current.body.push_str(&escape_text(text));
                }
            }
            _ => {}
        }
    }
    push_if_filled(&mut sections, current);

    if sections.is_empty() { None } else { Some(sections) }
}

fn push_if_filled(sections: &mut Vec<ContentSection>, section: ContentSection) {
    if section.has_body() {
        sections.push(section);
    }
}

fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// The paragraph's text if all of it sits inside its first bold child.
fn emphasized_title(paragraph: ElementRef<'_>) -> Option<String> {
    let emphasis = paragraph.select(&EMPHASIS).next()?;
    let title = trimmed_text(emphasis);
    if title.is_empty() || title != trimmed_text(paragraph) {
        return None;
    }
    Some(title)
}

/// Re-escape decoded text so it can be emitted as markup again.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/section_tests.rs"]
mod tests;
