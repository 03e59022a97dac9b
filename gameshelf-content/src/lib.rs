//! Splits a game's scraped detail-page markup into titled display sections.
//!
//! Upstream detail pages wrap their prose in a `post__entry` container and
//! append a featured image (and assorted boilerplate) after it. [`sectionize`]
//! cuts the prose out, walks it, and starts a new section at each heading or
//! bold-only paragraph. Anything that does not look like that shape falls
//! back to a single "About This Game" section built from the plain
//! description.

mod scope;
mod section;

pub use scope::{ENTRY_BODY_MARKER, FEATURED_IMAGE_MARKER, locate_scope};
pub use section::{
    ContentSection, DEFAULT_SECTION_TITLE, NO_DESCRIPTION, SectionLevel, fallback_section,
    parse_scope, sectionize,
};
