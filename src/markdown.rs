//! HTML to Markdown conversion for chat message bodies.
//!
//! This is not a general-purpose converter. It covers the tag subset that
//! chat UIs render for assistant replies: paragraphs, headings, emphasis,
//! inline and fenced code, lists, links, quotes and separators. Any other
//! element is transparent and contributes its children in document order.
//!
//! # Example
//!
//! ```
//! use chat_export::markdown::{html_fragment_to_markdown, HeadingMap};
//!
//! let md = html_fragment_to_markdown("<p>Hello <strong>world</strong></p>", &HeadingMap::STANDARD);
//! assert_eq!(md, "Hello **world**");
//! ```

use dom_query::{Document, NodeRef, Selection};

use crate::dom;
use crate::patterns::EXCESS_NEWLINES;

/// Default nesting limit for the converter.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Number of `#` markers emitted for each heading level `h1`..`h6`.
///
/// `None` means the heading tag is not recognized and its children pass
/// through unwrapped. Chat sites disagree on the lower levels, so this is
/// part of each site profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingMap([Option<u8>; 6]);

impl HeadingMap {
    /// `h1`..`h6` map to one through six markers.
    pub const STANDARD: Self = Self([Some(1), Some(2), Some(3), Some(4), Some(5), Some(6)]);

    /// `h5` and `h6` both map to five markers.
    pub const CAPPED_AT_FIVE: Self = Self([Some(1), Some(2), Some(3), Some(4), Some(5), Some(5)]);

    /// Only `h1`..`h4` are headings; `h5` and `h6` pass through.
    pub const UP_TO_FOUR: Self = Self([Some(1), Some(2), Some(3), Some(4), None, None]);

    #[must_use]
    pub const fn new(levels: [Option<u8>; 6]) -> Self {
        Self(levels)
    }

    /// Marker count for heading `level` (1-based), if that level is mapped.
    #[must_use]
    pub fn markers(&self, level: usize) -> Option<u8> {
        level
            .checked_sub(1)
            .and_then(|i| self.0.get(i).copied().flatten())
    }
}

impl Default for HeadingMap {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Converts an element subtree to Markdown.
///
/// The converter holds no state between calls; converting the same subtree
/// twice yields the same string.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownConverter<'a> {
    headings: &'a HeadingMap,
    max_depth: usize,
}

impl<'a> MarkdownConverter<'a> {
    #[must_use]
    pub fn new(headings: &'a HeadingMap) -> Self {
        Self {
            headings,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the nesting limit. Elements at or below the limit are emitted
    /// as their plain text content.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Converts the first node of `root`. An empty selection yields `""`.
    #[must_use]
    pub fn convert(&self, root: &Selection) -> String {
        let Some(node) = root.nodes().first() else {
            return String::new();
        };
        let mut out = String::new();
        self.push_node(node, 0, &mut out);
        normalize(&out)
    }

    fn push_node(&self, node: &NodeRef, depth: usize, out: &mut String) {
        if node.is_text() {
            out.push_str(&node.text());
            return;
        }
        let Some(tag) = dom::node_tag(node) else {
            // Comments, doctypes, processing instructions
            return;
        };
        if depth >= self.max_depth {
            out.push_str(&node.text());
            return;
        }

        match tag.as_str() {
            "p" => {
                self.push_children(node, depth, out);
                out.push_str("\n\n");
            }
            "br" => out.push('\n'),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = usize::from(tag.as_bytes()[1] - b'0');
                match self.headings.markers(level) {
                    Some(markers) => {
                        for _ in 0..markers {
                            out.push('#');
                        }
                        out.push(' ');
                        out.push_str(self.children_text(node, depth).trim());
                        out.push_str("\n\n");
                    }
                    None => self.push_children(node, depth, out),
                }
            }
            "strong" | "b" => {
                out.push_str("**");
                self.push_children(node, depth, out);
                out.push_str("**");
            }
            "em" | "i" => {
                out.push('*');
                self.push_children(node, depth, out);
                out.push('*');
            }
            "code" => {
                out.push('`');
                out.push_str(&node.text());
                out.push('`');
            }
            "pre" => {
                let code = Selection::from(node.clone()).select("code").first().text();
                let code = if code.is_empty() { node.text() } else { code };
                out.push_str("\n```\n");
                out.push_str(&code);
                out.push_str("\n```\n\n");
            }
            "ul" => {
                for item in dom::child_elements_named(node, "li") {
                    out.push_str("- ");
                    out.push_str(self.children_text(&item, depth + 1).trim());
                    out.push('\n');
                }
                out.push('\n');
            }
            "ol" => {
                for (i, item) in dom::child_elements_named(node, "li").iter().enumerate() {
                    out.push_str(&format!("{}. ", i + 1));
                    out.push_str(self.children_text(item, depth + 1).trim());
                    out.push('\n');
                }
                out.push('\n');
            }
            "a" => {
                let href = node.attr("href").unwrap_or_default();
                let text = self.children_text(node, depth);
                if href.is_empty() {
                    out.push_str(&text);
                } else {
                    out.push('[');
                    out.push_str(&text);
                    out.push_str("](");
                    out.push_str(&href);
                    out.push(')');
                }
            }
            "blockquote" => {
                out.push_str("> ");
                out.push_str(self.children_text(node, depth).trim());
                out.push_str("\n\n");
            }
            "hr" | "separator" => out.push_str("---\n\n"),
            // li, div, span, section, article, main and anything unknown
            _ => self.push_children(node, depth, out),
        }
    }

    fn push_children(&self, node: &NodeRef, depth: usize, out: &mut String) {
        for child in node.children() {
            self.push_node(&child, depth + 1, out);
        }
    }

    fn children_text(&self, node: &NodeRef, depth: usize) -> String {
        let mut buf = String::new();
        self.push_children(node, depth, &mut buf);
        buf
    }
}

/// Converts `root` with the default nesting limit.
#[must_use]
pub fn html_to_markdown(root: &Selection, headings: &HeadingMap) -> String {
    MarkdownConverter::new(headings).convert(root)
}

/// Parses an HTML fragment and converts its body.
#[must_use]
pub fn html_fragment_to_markdown(html: &str, headings: &HeadingMap) -> String {
    let doc = Document::from(html);
    html_to_markdown(&doc.select("body"), headings)
}

/// Collapses runs of three or more newlines to one blank line and trims.
#[must_use]
pub fn normalize(markdown: &str) -> String {
    EXCESS_NEWLINES
        .replace_all(markdown, "\n\n")
        .trim()
        .to_string()
}
