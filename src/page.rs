//! Capabilities the extractor consumes from its host.
//!
//! A [`Page`] gives read access to the current DOM and control over scroll
//! positions. A [`Clock`] provides the only suspension point the extractor
//! uses (timer sleeps) and the timestamp stamped on transcripts.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dom_query::Document;

/// What to scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget<'a> {
    /// The first element matching a CSS selector.
    Element(&'a str),
    /// The whole document viewport.
    Window,
}

/// Where to scroll to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEdge {
    Top,
    Bottom,
}

/// Read-only DOM access plus scroll control over one browser page.
///
/// `html` must reflect the DOM as it is *now*; virtual-scroll pages change
/// their markup as they are scrolled.
pub trait Page: Send + Sync {
    /// Full URL of the page.
    fn url(&self) -> String;

    /// Current serialized DOM.
    fn html(&self) -> String;

    /// Scrolls `target` to `edge`. Returns `false` when the target element
    /// does not exist; the call is then a no-op.
    fn scroll_to(&self, target: ScrollTarget<'_>, edge: ScrollEdge) -> bool;

    /// `document.title` of the page.
    ///
    /// Only the head `<title>` counts; inline SVG icons carry their own
    /// `<title>` elements in the body.
    fn document_title(&self) -> String {
        let doc = Document::from(self.html());
        let mut title = doc.select_single("head > title");
        if !title.exists() {
            title = doc.select_single("title");
        }
        title.text().trim().to_string()
    }

    /// Number of elements currently matching `selector`.
    fn count(&self, selector: &str) -> usize {
        Document::from(self.html()).select(selector).length()
    }

    /// Whether any element matches `selector`.
    fn exists(&self, selector: &str) -> bool {
        self.count(selector) > 0
    }
}

/// Timer and wall-clock capability.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Suspends for `duration`.
    async fn sleep(&self, duration: Duration);

    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}

/// [`Clock`] backed by the tokio timer and the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A [`Page`] over a fixed HTML snapshot, e.g. a page saved from the browser.
///
/// Scrolling never changes the markup, so the scroll loop converges
/// immediately on a snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotPage {
    url: String,
    html: String,
}

impl SnapshotPage {
    /// Creates a snapshot page for `url` with the given markup.
    #[must_use]
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

impl Page for SnapshotPage {
    fn url(&self) -> String {
        self.url.clone()
    }

    fn html(&self) -> String {
        self.html.clone()
    }

    fn scroll_to(&self, target: ScrollTarget<'_>, _edge: ScrollEdge) -> bool {
        match target {
            ScrollTarget::Element(selector) => self.exists(selector),
            ScrollTarget::Window => true,
        }
    }
}
