use scraper::Html;

/// Opening tag of the container that wraps a detail page's prose.
pub const ENTRY_BODY_MARKER: &str = r#"<div class="post__entry">"#;

/// Opening tag of the image block upstream pages append after the prose.
pub const FEATURED_IMAGE_MARKER: &str = r#"<figure class="post__featured-image is-loaded">"#;

/// Cut the descriptive region out of a detail page's markup.
///
/// The markup is parsed and re-serialized first so that marker matching sees
/// normalized tags. Returns the markup from the entry-body marker up to (not
/// including) the featured-image marker, or `None` when either marker is
/// missing or they appear out of order.
pub fn locate_scope(markup: &str) -> Option<String> {
    let serialized = Html::parse_fragment(markup).root_element().inner_html();

    let start = serialized.find(ENTRY_BODY_MARKER)?;
    let end = serialized.find(FEATURED_IMAGE_MARKER)?;
    if start >= end {
        log::debug!("Entry body marker does not precede featured image marker");
        return None;
    }

    Some(serialized[start..end].to_string())
}
