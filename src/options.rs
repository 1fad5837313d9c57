//! Configuration options for extraction and export.
//!
//! `Options` controls a single extraction run; `ExportOptions` controls how
//! a finished transcript is rendered to a Markdown file.

use chrono::FixedOffset;

use crate::scroll::{CancellationFlag, ScrollConfig};

/// Configuration options for an extraction run.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use chat_export::Options;
///
/// // Saved snapshots never grow, so skip the scroll loop entirely
/// let options = Options {
///     scroll: false,
///     ..Options::default()
/// };
/// assert_eq!(options.max_tree_depth, 256);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Drive the scroll container until all messages are rendered.
    ///
    /// Default: `true`
    pub scroll: bool,

    /// Replaces the profile's primary scroll configuration.
    ///
    /// The profile's window fallback keeps its own configuration.
    ///
    /// Default: `None`
    pub scroll_override: Option<ScrollConfig>,

    /// Checked at the top of every scroll iteration; when set the loop stops
    /// early and extraction continues with whatever is loaded.
    ///
    /// Default: `None`
    pub cancel: Option<CancellationFlag>,

    /// Maximum element nesting the Markdown converter descends into.
    ///
    /// Deeper subtrees are emitted as plain text.
    ///
    /// Default: `256`
    pub max_tree_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            scroll: true,
            scroll_override: None,
            cancel: None,
            max_tree_depth: 256,
        }
    }
}

/// Language of the labels written into exported files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    /// Maps a BCP 47 language tag (`navigator.language` style) to a locale.
    ///
    /// Every Chinese variant (`zh`, `zh-CN`, `zh-TW`, ...) maps to [`Locale::Zh`];
    /// everything else falls back to English.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("zh") {
            Self::Zh
        } else {
            Self::En
        }
    }
}

/// Options for rendering a transcript into a Markdown file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Label language.
    ///
    /// Default: `Locale::En`
    pub locale: Locale,

    /// Offset used for the export time line and the filename timestamp.
    ///
    /// `None` uses the system's local time zone.
    ///
    /// Default: `None`
    pub utc_offset: Option<FixedOffset>,
}
