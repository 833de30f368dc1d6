use scraper::{ElementRef, Node};

/// Trimmed, non-empty text pieces under `el` in document order. Images
/// contribute their `alt` text in place.
pub(crate) fn text_pieces(el: ElementRef<'_>) -> Vec<&str> {
    el.descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some(&**text),
            Node::Element(e) if e.name() == "img" => Some(e.attr("alt").unwrap_or_default()),
            _ => None,
        })
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

pub(crate) fn joined_text(el: ElementRef<'_>, separator: &str) -> String {
    text_pieces(el).join(separator)
}

/// Like [`joined_text`] but text nodes only; images contribute nothing.
pub(crate) fn joined_text_only(el: ElementRef<'_>, separator: &str) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

pub(crate) fn has_class(el: &ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}
