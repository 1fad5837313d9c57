//! # chat-export
//!
//! Extracts AI chat transcripts from the DOM of chat web applications
//! (ChatGPT, Gemini, DeepSeek) and converts them into Markdown documents.
//!
//! The crate does not talk to a browser directly. It works against a
//! [`Page`] (URL, document title, DOM snapshot, scroll control) and a
//! [`Clock`] (async sleep, wall-clock time), so the same engine can be
//! driven by a live browser bridge or by a saved HTML snapshot.
//!
//! ## Quick Start
//!
//! ```rust
//! use chat_export::{extract, Options, SnapshotPage, TokioClock};
//!
//! let html = r#"<html><head><title>Rust question - DeepSeek</title></head><body>
//! <div class="ds-message"><div>What is a lifetime?</div></div>
//! <div class="ds-message"><div class="ds-markdown"><p>A <strong>scope</strong> for borrows.</p></div></div>
//! </body></html>"#;
//!
//! let page = SnapshotPage::new("https://chat.deepseek.com/a/chat/s/abc", html);
//! let options = Options { scroll: false, ..Options::default() };
//!
//! let runtime = tokio::runtime::Runtime::new()?;
//! let transcript = runtime.block_on(extract(&page, &TokioClock, &options))?;
//!
//! assert_eq!(transcript.title, "Rust question");
//! assert_eq!(transcript.turns[0].ai, "A **scope** for borrows.");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. Match the page URL against the built-in [`SiteProfile`]s.
//! 2. Drive the scroll container until the message count stops growing
//!    ([`scroll`]).
//! 3. Walk the loaded DOM and pair user turns with assistant turns
//!    ([`collector`]), converting assistant HTML with [`markdown`].
//! 4. Assemble a [`TranscriptDocument`], which [`export`] renders to a
//!    Markdown file.

mod error;
mod options;
mod patterns;
mod result;

/// Small DOM helpers over `dom_query`.
pub mod dom;

/// Page and clock capabilities consumed by the extractor.
pub mod page;

/// HTML to Markdown conversion for chat message bodies.
pub mod markdown;

/// Virtual-scroll exhaustion loop.
pub mod scroll;

/// Per-platform configuration.
pub mod site;

/// Turn pairing over a loaded conversation DOM.
pub mod collector;

/// Extraction session orchestration.
pub mod session;

/// Markdown file rendering and export filenames.
pub mod export;

/// Async request/response bridge between a UI task and the extractor.
pub mod bridge;

/// Character encoding detection for saved HTML snapshots.
pub mod encoding;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::{ExportOptions, Locale, Options};
pub use page::{Clock, Page, ScrollEdge, ScrollTarget, SnapshotPage, TokioClock};
pub use result::{TranscriptDocument, TranscriptTurn};
pub use scroll::{CancellationFlag, ScrollConfig, ScrollOutcome, ScrollStrategy};
pub use session::ExtractionSession;
pub use site::SiteProfile;

/// Extracts the transcript from `page` using whichever built-in profile
/// matches its URL.
///
/// # Errors
///
/// Returns [`Error::NotApplicablePage`] when no supported platform matches
/// the page URL. A matching page with no messages is not an error; it yields
/// a document with an empty turn list.
pub async fn extract<P, C>(page: &P, clock: &C, options: &Options) -> Result<TranscriptDocument>
where
    P: Page + ?Sized,
    C: Clock + ?Sized,
{
    let url = page.url();
    let session = ExtractionSession::for_url(&url, options.clone())?;
    session.extract(page, clock).await
}
