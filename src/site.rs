//! Per-platform configuration.
//!
//! The extraction engine is generic; everything that differs between chat
//! sites (URL shape, selectors, how roles are told apart, heading levels,
//! scroll tuning) lives in a [`SiteProfile`] value. Three profiles are built
//! in and selected by URL.

use std::time::Duration;

use dom_query::Document;
use url::Url;

use crate::markdown::HeadingMap;
use crate::scroll::{ScrollConfig, ScrollFallback, ScrollPlan, ScrollStrategy};

/// Title used when the page provides none.
pub const UNTITLED: &str = "Untitled";

/// How to read the conversation title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleRule {
    /// `document.title` as is.
    DocumentTitle,
    /// `document.title` with a trailing site suffix removed.
    DocumentTitleStripSuffix(&'static str),
    /// Text of the first `<button>` that is not a known UI label.
    FirstButton {
        exclude: &'static [&'static str],
        max_len: usize,
    },
}

impl TitleRule {
    /// Resolves the title, falling back to [`UNTITLED`].
    #[must_use]
    pub fn resolve(&self, document_title: &str, doc: &Document) -> String {
        let title = match self {
            Self::DocumentTitle => document_title.to_string(),
            Self::DocumentTitleStripSuffix(suffix) => document_title
                .strip_suffix(suffix)
                .unwrap_or(document_title)
                .trim()
                .to_string(),
            Self::FirstButton { exclude, max_len } => doc
                .select("button")
                .iter()
                .map(|button| button.text().trim().to_string())
                .find(|text| {
                    !text.is_empty()
                        && !exclude.iter().any(|label| *label == text.as_str())
                        && text.chars().count() < *max_len
                })
                .unwrap_or_default(),
        };

        if title.is_empty() {
            UNTITLED.to_string()
        } else {
            title
        }
    }
}

/// How to tell user messages from assistant messages in a flat stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRule {
    /// Each message carries a heading naming the speaker. A heading that
    /// contains any of `user_keywords` marks a user message. The message
    /// body is the first `content` descendant; messages without a heading
    /// or body are skipped.
    HeadingKeyword {
        heading: &'static str,
        user_keywords: &'static [&'static str],
        content: &'static str,
    },
    /// Assistant messages contain an `ai_marker` element holding the reply;
    /// anything else is a user message whose text is the node's own text.
    ClassMarker { ai_marker: &'static str },
}

/// Shape of the conversation DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One node per message, user and assistant interleaved.
    Alternating {
        message: &'static str,
        role: RoleRule,
    },
    /// One container per exchange holding both sides.
    Grouped {
        container: &'static str,
        user: &'static str,
        ai: &'static str,
    },
}

/// Immutable description of one supported chat platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteProfile {
    /// Display name stamped on transcripts.
    pub name: &'static str,
    /// Exact hostname.
    pub host: &'static str,
    /// Conversation pages start with this path.
    pub path_prefix: &'static str,
    pub title: TitleRule,
    pub scroll: ScrollPlan,
    pub layout: Layout,
    pub headings: HeadingMap,
}

impl SiteProfile {
    /// Whether `url` is a conversation page of this platform.
    #[must_use]
    pub fn matches_url(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        parsed.host_str() == Some(self.host) && parsed.path().starts_with(self.path_prefix)
    }

    /// The built-in profile whose URL pattern matches `url`.
    #[must_use]
    pub fn for_url(url: &str) -> Option<&'static Self> {
        BUILTIN.iter().find(|profile| profile.matches_url(url))
    }

    /// All built-in profiles.
    #[must_use]
    pub fn builtin() -> &'static [Self] {
        &BUILTIN
    }
}

const SETTLE: Duration = Duration::from_millis(500);
const BOUNCE: Duration = Duration::from_millis(200);

pub const CHATGPT: SiteProfile = SiteProfile {
    name: "ChatGPT",
    host: "chatgpt.com",
    path_prefix: "/c/",
    title: TitleRule::DocumentTitle,
    scroll: ScrollPlan {
        container: "main",
        probe: "article",
        config: ScrollConfig {
            max_iterations: 10,
            settle_delay: SETTLE,
            bounce_delay: BOUNCE,
            stability_threshold: 2,
            strategy: ScrollStrategy::TopFirst,
        },
        fallback: ScrollFallback::Skip,
    },
    layout: Layout::Alternating {
        message: "article",
        role: RoleRule::HeadingKeyword {
            heading: "h5, h6",
            user_keywords: &["你说", "You said"],
            content: ".text-base",
        },
    },
    headings: HeadingMap::CAPPED_AT_FIVE,
};

pub const GEMINI: SiteProfile = SiteProfile {
    name: "Gemini",
    host: "gemini.google.com",
    path_prefix: "/app/",
    title: TitleRule::FirstButton {
        exclude: &["New chat", "Temporary chat", "Main menu"],
        max_len: 100,
    },
    scroll: ScrollPlan {
        container: "infinite-scroller.chat-history",
        probe: ".conversation-container",
        config: ScrollConfig {
            max_iterations: 30,
            settle_delay: SETTLE,
            bounce_delay: BOUNCE,
            stability_threshold: 3,
            strategy: ScrollStrategy::TopFirst,
        },
        fallback: ScrollFallback::Window(ScrollConfig {
            max_iterations: 50,
            settle_delay: Duration::from_millis(300),
            bounce_delay: BOUNCE,
            stability_threshold: 3,
            strategy: ScrollStrategy::BottomFirst,
        }),
    },
    layout: Layout::Grouped {
        container: ".conversation-container",
        user: ".query-text",
        ai: ".markdown-main-panel",
    },
    headings: HeadingMap::UP_TO_FOUR,
};

pub const DEEPSEEK: SiteProfile = SiteProfile {
    name: "DeepSeek",
    host: "chat.deepseek.com",
    path_prefix: "/a/chat/s/",
    title: TitleRule::DocumentTitleStripSuffix(" - DeepSeek"),
    scroll: ScrollPlan {
        container: ".ds-scroll-area",
        probe: ".ds-message",
        config: ScrollConfig {
            max_iterations: 50,
            settle_delay: SETTLE,
            bounce_delay: BOUNCE,
            stability_threshold: 3,
            strategy: ScrollStrategy::TopFirst,
        },
        fallback: ScrollFallback::Skip,
    },
    layout: Layout::Alternating {
        message: ".ds-message",
        role: RoleRule::ClassMarker {
            ai_marker: ".ds-markdown",
        },
    },
    headings: HeadingMap::STANDARD,
};

static BUILTIN: [SiteProfile; 3] = [CHATGPT, GEMINI, DEEPSEEK];
