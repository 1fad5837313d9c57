//! Error types for chat-export.
//!
//! Only page applicability is an operation-level failure. Missing DOM
//! elements are handled locally and degrade to empty output instead.

/// Error type for extraction and export operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page URL does not belong to any supported chat platform.
    #[error("Not a supported chat page: {url}")]
    NotApplicablePage {
        /// URL of the page that was rejected.
        url: String,
    },

    /// The extractor side of a request bridge has shut down.
    #[error("Extraction bridge closed before a response was received")]
    BridgeClosed,

    /// Reading a snapshot or writing an export failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a transcript failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
