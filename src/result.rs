//! Transcript types produced by extraction.
//!
//! The serialized field names (`messages`, `url`, `timestamp`) are the ones
//! the browser-side UI expects, so a document can be handed across the
//! bridge as JSON without a mapping layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One user/assistant exchange.
///
/// At least one side is non-empty. `ai` is Markdown with no leading or
/// trailing whitespace and never more than one blank line in a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptTurn {
    /// Plain text of the user message.
    pub user: String,

    /// Assistant reply converted to Markdown.
    pub ai: String,
}

impl TranscriptTurn {
    /// Whether both sides are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.user.is_empty() && self.ai.is_empty()
    }
}

/// A complete extracted conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptDocument {
    /// Platform display name, e.g. "ChatGPT".
    pub platform: String,

    /// Conversation title, "Untitled" when the page has none.
    pub title: String,

    /// Exchanges in document order.
    #[serde(rename = "messages")]
    pub turns: Vec<TranscriptTurn>,

    /// URL of the page the transcript was read from.
    #[serde(rename = "url")]
    pub source_url: String,

    /// When extraction finished.
    #[serde(rename = "timestamp")]
    pub extracted_at: DateTime<Utc>,
}

impl TranscriptDocument {
    /// Number of exchanges.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Whether the conversation yielded no exchanges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
