//! Turn pairing over a loaded conversation DOM.
//!
//! Messages are visited in document order. For flat layouts a user message
//! fills a pending slot and the next assistant message consumes it:
//!
//! ```text
//! user A            -> pending = A
//! user B            -> pending = B   (A had no reply and is dropped)
//! assistant 1       -> turn { user: B, ai: 1 }, pending cleared
//! assistant 2       -> turn { user: "", ai: 2 }
//! user C            -> pending = C   (never answered, dropped at the end)
//! ```

use dom_query::{Document, Selection};

use crate::dom;
use crate::markdown::MarkdownConverter;
use crate::options::Options;
use crate::result::TranscriptTurn;
use crate::site::{Layout, RoleRule, SiteProfile};

/// Pending-user-slot pairing state.
#[derive(Debug, Default)]
struct TurnPairer {
    pending_user: Option<String>,
    turns: Vec<TranscriptTurn>,
}

impl TurnPairer {
    fn user(&mut self, text: String) {
        self.pending_user = Some(text);
    }

    fn assistant(&mut self, markdown: String) {
        let user = self.pending_user.take().unwrap_or_default();
        self.push(TranscriptTurn { user, ai: markdown });
    }

    fn push(&mut self, turn: TranscriptTurn) {
        if !turn.is_empty() {
            self.turns.push(turn);
        }
    }

    fn finish(self) -> Vec<TranscriptTurn> {
        self.turns
    }
}

/// Builds the transcript turns for `profile` from a fully loaded DOM.
///
/// Missing elements are skipped rather than reported; a page with no
/// matching message nodes yields an empty list.
#[must_use]
pub fn collect_turns(
    doc: &Document,
    profile: &SiteProfile,
    options: &Options,
) -> Vec<TranscriptTurn> {
    let converter =
        MarkdownConverter::new(&profile.headings).with_max_depth(options.max_tree_depth);
    let mut pairer = TurnPairer::default();

    match profile.layout {
        Layout::Alternating { message, role } => {
            for node in doc.select(message).iter() {
                collect_alternating(&node, role, &converter, &mut pairer);
            }
        }
        Layout::Grouped { container, user, ai } => {
            for group in doc.select(container).iter() {
                let user_text = dom::trimmed_text(&dom::query_selector(&group, user));
                let ai_el = dom::query_selector(&group, ai);
                let ai_text = if ai_el.exists() {
                    converter.convert(&ai_el)
                } else {
                    String::new()
                };
                pairer.push(TranscriptTurn {
                    user: user_text,
                    ai: ai_text,
                });
            }
        }
    }

    pairer.finish()
}

fn collect_alternating(
    node: &Selection,
    role: RoleRule,
    converter: &MarkdownConverter,
    pairer: &mut TurnPairer,
) {
    match role {
        RoleRule::HeadingKeyword {
            heading,
            user_keywords,
            content,
        } => {
            let heading_el = dom::query_selector(node, heading);
            if !heading_el.exists() {
                return;
            }
            let heading_text = dom::text_content(&heading_el);
            let is_user = user_keywords.iter().any(|k| heading_text.contains(k));

            let content_el = dom::query_selector(node, content);
            if !content_el.exists() {
                return;
            }

            if is_user {
                pairer.user(dom::trimmed_text(&content_el));
            } else {
                pairer.assistant(converter.convert(&content_el));
            }
        }
        RoleRule::ClassMarker { ai_marker } => {
            let ai_el = dom::query_selector(node, ai_marker);
            if ai_el.exists() {
                pairer.assistant(converter.convert(&ai_el));
            } else {
                let text = dom::trimmed_text(node);
                if !text.is_empty() {
                    pairer.user(text);
                }
            }
        }
    }
}
