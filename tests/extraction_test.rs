//! End-to-end extraction against simulated virtual-scroll chat pages.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chat_export::{
    extract, CancellationFlag, Clock, Error, Options, Page, ScrollEdge, ScrollTarget,
};
use chrono::{DateTime, TimeZone, Utc};

/// A chat page that only renders the newest messages and reveals older ones
/// in batches as it is scrolled, like the real sites do.
struct VirtualChatPage {
    url: String,
    open: String,
    close: String,
    messages: Vec<String>,
    start: Mutex<usize>,
    batch: usize,
    scrolls: Mutex<usize>,
}

impl VirtualChatPage {
    fn new(
        url: &str,
        open: &str,
        close: &str,
        messages: Vec<String>,
        initially_rendered: usize,
        batch: usize,
    ) -> Self {
        let start = messages.len().saturating_sub(initially_rendered);
        Self {
            url: url.to_string(),
            open: open.to_string(),
            close: close.to_string(),
            messages,
            start: Mutex::new(start),
            batch,
            scrolls: Mutex::new(0),
        }
    }

    fn scrolls(&self) -> usize {
        *self.scrolls.lock().unwrap()
    }
}

impl Page for VirtualChatPage {
    fn url(&self) -> String {
        self.url.clone()
    }

    fn html(&self) -> String {
        let start = *self.start.lock().unwrap();
        format!("{}{}{}", self.open, self.messages[start..].concat(), self.close)
    }

    fn scroll_to(&self, target: ScrollTarget<'_>, edge: ScrollEdge) -> bool {
        let loads_more = match target {
            ScrollTarget::Element(selector) => {
                if !self.exists(selector) {
                    return false;
                }
                edge == ScrollEdge::Top
            }
            // Window scrolling pages load history when the bottom is reached
            ScrollTarget::Window => edge == ScrollEdge::Bottom,
        };
        *self.scrolls.lock().unwrap() += 1;
        if loads_more {
            let mut start = self.start.lock().unwrap();
            *start = start.saturating_sub(self.batch);
        }
        true
    }
}

#[derive(Default)]
struct InstantClock {
    slept: Mutex<Duration>,
}

#[async_trait]
impl Clock for InstantClock {
    async fn sleep(&self, duration: Duration) {
        *self.slept.lock().unwrap() += duration;
    }

    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }
}

fn chatgpt_messages(exchanges: usize) -> Vec<String> {
    (1..=exchanges)
        .flat_map(|i| {
            [
                format!(
                    r#"<article><h5>你说：</h5><div class="text-base">Question {i}</div></article>"#
                ),
                format!(
                    r#"<article><h6>ChatGPT 说：</h6><div class="text-base"><p>Answer <strong>{i}</strong></p></div></article>"#
                ),
            ]
        })
        .collect()
}

fn chatgpt_page(exchanges: usize, initially: usize, batch: usize) -> VirtualChatPage {
    VirtualChatPage::new(
        "https://chatgpt.com/c/6700aa",
        "<html><head><title>Borrow checker help</title></head><body><main>",
        "</main></body></html>",
        chatgpt_messages(exchanges),
        initially,
        batch,
    )
}

fn deepseek_messages(exchanges: usize) -> Vec<String> {
    (1..=exchanges)
        .flat_map(|i| {
            [
                format!(r#"<div class="ds-message"><div class="_9663006">Prompt {i}</div></div>"#),
                format!(
                    r#"<div class="ds-message"><div class="ds-markdown"><ul><li>item {i}</li></ul></div></div>"#
                ),
            ]
        })
        .collect()
}

fn gemini_containers(exchanges: usize) -> Vec<String> {
    (1..=exchanges)
        .map(|i| {
            format!(
                r#"<div class="conversation-container"><user-query><p class="query-text">Ask {i}</p></user-query><model-response><div class="markdown-main-panel"><p>Reply {i}</p></div></model-response></div>"#
            )
        })
        .collect()
}

const GEMINI_NAV: &str = "<button>Main menu</button><button>New chat</button><button>Weekend ideas</button>";

#[tokio::test]
async fn chatgpt_loads_full_history_before_collecting() {
    let page = chatgpt_page(6, 2, 2);
    let clock = InstantClock::default();

    let doc = extract(&page, &clock, &Options::default()).await.unwrap();

    assert_eq!(doc.platform, "ChatGPT");
    assert_eq!(doc.title, "Borrow checker help");
    assert_eq!(doc.turn_count(), 6);
    for (i, turn) in doc.turns.iter().enumerate() {
        assert_eq!(turn.user, format!("Question {}", i + 1));
        assert_eq!(turn.ai, format!("Answer **{}**", i + 1));
    }
    assert_eq!(doc.source_url, "https://chatgpt.com/c/6700aa");
    assert_eq!(doc.extracted_at, clock.now());
    assert!(*clock.slept.lock().unwrap() > Duration::ZERO);
}

#[tokio::test]
async fn deepseek_loads_full_history() {
    let page = VirtualChatPage::new(
        "https://chat.deepseek.com/a/chat/s/0f9e",
        r#"<html><head><title>Lists - DeepSeek</title></head><body><div class="ds-scroll-area">"#,
        "</div></body></html>",
        deepseek_messages(20),
        4,
        4,
    );

    let doc = extract(&page, &InstantClock::default(), &Options::default()).await.unwrap();

    assert_eq!(doc.title, "Lists");
    assert_eq!(doc.turn_count(), 20);
    assert_eq!(doc.turns[0].user, "Prompt 1");
    assert_eq!(doc.turns[19].ai, "- item 20");
}

#[tokio::test]
async fn gemini_uses_infinite_scroller() {
    let page = VirtualChatPage::new(
        "https://gemini.google.com/app/5c1d",
        &format!(r#"<html><body>{GEMINI_NAV}<infinite-scroller class="chat-history">"#),
        "</infinite-scroller></body></html>",
        gemini_containers(10),
        3,
        3,
    );

    let doc = extract(&page, &InstantClock::default(), &Options::default()).await.unwrap();

    assert_eq!(doc.platform, "Gemini");
    assert_eq!(doc.title, "Weekend ideas");
    assert_eq!(doc.turn_count(), 10);
    assert_eq!(doc.turns[0].user, "Ask 1");
    assert_eq!(doc.turns[9].ai, "Reply 10");
}

#[tokio::test]
async fn gemini_falls_back_to_window_scroll_without_scroller() {
    let page = VirtualChatPage::new(
        "https://gemini.google.com/app/5c1d",
        &format!("<html><body>{GEMINI_NAV}<div class=\"history\">"),
        "</div></body></html>",
        gemini_containers(10),
        2,
        2,
    );

    let doc = extract(&page, &InstantClock::default(), &Options::default()).await.unwrap();

    assert_eq!(doc.turn_count(), 10);
    assert_eq!(doc.turns[0].user, "Ask 1");
}

#[tokio::test]
async fn deepseek_without_scroll_area_extracts_what_is_rendered() {
    let page = VirtualChatPage::new(
        "https://chat.deepseek.com/a/chat/s/0f9e",
        "<html><body><div class=\"other\">",
        "</div></body></html>",
        deepseek_messages(10),
        4,
        4,
    );

    let doc = extract(&page, &InstantClock::default(), &Options::default()).await.unwrap();

    assert_eq!(doc.turn_count(), 2);
    assert_eq!(doc.turns[0].user, "Prompt 9");
    assert_eq!(doc.title, "Untitled");
    assert_eq!(page.scrolls(), 0);
}

#[tokio::test]
async fn iteration_cap_returns_partial_transcript() {
    // 100 exchanges revealed one message per scroll; ChatGPT caps at 10 iterations
    let page = chatgpt_page(100, 2, 1);

    let doc = extract(&page, &InstantClock::default(), &Options::default()).await.unwrap();

    assert!(doc.turn_count() < 100);
    assert!(doc.turn_count() > 1);
    assert_eq!(doc.turns.last().unwrap().user, "Question 100");
}

#[tokio::test]
async fn cancelled_extraction_still_returns_document() {
    let page = chatgpt_page(50, 2, 2);
    let cancel = CancellationFlag::new();
    cancel.cancel();
    let options = Options {
        cancel: Some(cancel),
        ..Options::default()
    };

    let doc = extract(&page, &InstantClock::default(), &options).await.unwrap();

    assert!(doc.turn_count() < 50);
}

#[tokio::test]
async fn page_with_no_messages_yields_empty_transcript() {
    let page = chatgpt_page(0, 0, 1);

    let doc = extract(&page, &InstantClock::default(), &Options::default()).await.unwrap();

    assert!(doc.is_empty());
    assert_eq!(doc.title, "Borrow checker help");
}

#[tokio::test]
async fn unsupported_page_is_not_applicable() {
    let page = VirtualChatPage::new("https://claude.ai/chat/1", "", "", Vec::new(), 0, 1);

    let err = extract(&page, &InstantClock::default(), &Options::default()).await.unwrap_err();

    assert!(matches!(
        err,
        Error::NotApplicablePage { ref url } if url == "https://claude.ai/chat/1"
    ));
    assert_eq!(page.scrolls(), 0);
}

#[tokio::test]
async fn each_extraction_starts_fresh() {
    let page = chatgpt_page(3, 6, 2);
    let clock = InstantClock::default();

    let first = extract(&page, &clock, &Options::default()).await.unwrap();
    let second = extract(&page, &clock, &Options::default()).await.unwrap();

    assert_eq!(first.turns, second.turns);
}
