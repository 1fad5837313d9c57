//! DOM helpers
//!
//! Thin wrappers over `dom_query` for the handful of operations the
//! collector and converter need. Every helper tolerates empty selections and
//! returns an empty/default value instead of failing.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

/// Lowercase tag name of an element node.
#[must_use]
pub fn node_tag(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// All text content of the selection and its descendants.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Trimmed text content as an owned string.
#[must_use]
pub fn trimmed_text(sel: &Selection) -> String {
    sel.text().trim().to_string()
}

/// First descendant matching `selector`.
#[inline]
#[must_use]
pub fn query_selector<'a>(sel: &Selection<'a>, selector: &str) -> Selection<'a> {
    sel.select_single(selector)
}

/// Direct element children of `node` with the given (lowercase) tag.
///
/// Equivalent to `:scope > tag`.
#[must_use]
pub fn child_elements_named<'a>(node: &NodeRef<'a>, tag: &str) -> Vec<NodeRef<'a>> {
    node.children()
        .into_iter()
        .filter(|child| node_tag(child).is_some_and(|t| t == tag))
        .collect()
}
