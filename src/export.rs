//! Markdown file rendering and export filenames.
//!
//! The exported file starts with a metadata header followed by one block per
//! turn, each closed by a `---` separator:
//!
//! ```text
//! # {title}
//!
//! **Platform:** ChatGPT
//! **Export Time:** 2026-10-18 16:30:00
//! **Message Count:** 2
//!
//! ---
//!
//! 👤 User: ...
//!
//! 🤖 AI: ...
//!
//! ---
//! ```

use std::fmt::Write as _;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::options::{ExportOptions, Locale};
use crate::patterns::{FILENAME_ILLEGAL, WHITESPACE_RUN};
use crate::result::TranscriptDocument;

/// Maximum number of title characters kept in a filename.
pub const MAX_FILENAME_TITLE_CHARS: usize = 50;

/// Localized strings used in exports and the message count label.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub platform: &'static str,
    pub export_time: &'static str,
    pub message_count: &'static str,
    /// Contains a `{count}` placeholder.
    pub messages: &'static str,
}

const EN: Labels = Labels {
    platform: "Platform",
    export_time: "Export Time",
    message_count: "Message Count",
    messages: "{count} messages",
};

const ZH: Labels = Labels {
    platform: "平台",
    export_time: "导出时间",
    message_count: "消息数量",
    messages: "{count} 条消息",
};

impl Locale {
    #[must_use]
    pub fn labels(self) -> &'static Labels {
        match self {
            Self::En => &EN,
            Self::Zh => &ZH,
        }
    }
}

/// "12 messages" / "12 条消息".
#[must_use]
pub fn message_count_label(count: usize, locale: Locale) -> String {
    locale.labels().messages.replace("{count}", &count.to_string())
}

/// Renders `doc` as the contents of an exported Markdown file.
///
/// The export time line shows `doc.extracted_at` in the configured offset
/// (local time by default).
#[must_use]
pub fn render_markdown(doc: &TranscriptDocument, options: &ExportOptions) -> String {
    let labels = options.locale.labels();
    let exported_at = format_in_offset(doc.extracted_at, options, "%Y-%m-%d %H:%M:%S");

    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "# {}\n", doc.title);
    let _ = writeln!(out, "**{}:** {}", labels.platform, doc.platform);
    let _ = writeln!(out, "**{}:** {}", labels.export_time, exported_at);
    let _ = writeln!(out, "**{}:** {}\n", labels.message_count, doc.turn_count());
    out.push_str("---\n\n");

    for turn in &doc.turns {
        if !turn.user.is_empty() {
            let _ = writeln!(out, "👤 User: {}\n", turn.user);
        }
        if !turn.ai.is_empty() {
            let _ = writeln!(out, "🤖 AI: {}\n", turn.ai);
        }
        out.push_str("---\n\n");
    }

    out
}

/// Filesystem-safe filename: `{title}_{YYYYMMDD}_{HHMM}.md`.
///
/// Reserved characters become `-`, whitespace runs become `_`, and the title
/// part is cut to [`MAX_FILENAME_TITLE_CHARS`] characters.
#[must_use]
pub fn export_filename<Tz: TimeZone>(title: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let safe = FILENAME_ILLEGAL.replace_all(title, "-");
    let safe = WHITESPACE_RUN.replace_all(&safe, "_");
    let safe: String = safe.chars().take(MAX_FILENAME_TITLE_CHARS).collect();
    format!("{safe}_{}.md", at.format("%Y%m%d_%H%M"))
}

/// [`export_filename`] using the document title and extraction time.
#[must_use]
pub fn document_filename(doc: &TranscriptDocument, options: &ExportOptions) -> String {
    match options.utc_offset {
        Some(offset) => export_filename(&doc.title, &doc.extracted_at.with_timezone(&offset)),
        None => export_filename(&doc.title, &doc.extracted_at.with_timezone(&Local)),
    }
}

fn format_in_offset(at: DateTime<Utc>, options: &ExportOptions, fmt: &str) -> String {
    match options.utc_offset {
        Some(offset) => at.with_timezone(&offset).format(fmt).to_string(),
        None => at.with_timezone(&Local).format(fmt).to_string(),
    }
}
