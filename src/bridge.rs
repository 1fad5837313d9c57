//! Async request/response bridge between a UI task and the extractor.
//!
//! The extractor runs as its own task next to the page. A UI holds an
//! [`ExtractClient`] and asks for a transcript; the answer comes back on a
//! oneshot channel as either the document or `{ "error": reason }`. A client
//! has at most one request in flight, and no timeout is imposed here.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{Error, Result};
use crate::options::Options;
use crate::page::{Clock, Page};
use crate::result::TranscriptDocument;

/// A message sent to the extractor task.
#[derive(Debug)]
pub enum ExtractRequest {
    Extract {
        reply: oneshot::Sender<ExtractResponse>,
    },
}

/// What the extractor sends back.
///
/// Serializes untagged: a success is the bare document, a failure is
/// `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractResponse {
    Document(TranscriptDocument),
    Error { error: String },
}

impl ExtractResponse {
    /// Converts to a `Result` with the error reason as the error value.
    ///
    /// # Errors
    ///
    /// Returns the reason string for an error response.
    pub fn into_result(self) -> std::result::Result<TranscriptDocument, String> {
        match self {
            Self::Document(doc) => Ok(doc),
            Self::Error { error } => Err(error),
        }
    }
}

impl From<Result<TranscriptDocument>> for ExtractResponse {
    fn from(result: Result<TranscriptDocument>) -> Self {
        match result {
            Ok(doc) => Self::Document(doc),
            Err(err) => Self::Error {
                error: err.to_string(),
            },
        }
    }
}

/// UI-side handle to an extractor task.
#[derive(Debug)]
pub struct ExtractClient {
    tx: mpsc::Sender<ExtractRequest>,
}

impl ExtractClient {
    /// Requests one extraction and waits for the answer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BridgeClosed`] if the extractor task has stopped.
    /// Extraction failures arrive as [`ExtractResponse::Error`], not as `Err`.
    pub async fn extract(&mut self) -> Result<ExtractResponse> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(ExtractRequest::Extract { reply })
            .await
            .map_err(|_| Error::BridgeClosed)?;
        rx.await.map_err(|_| Error::BridgeClosed)
    }
}

/// Spawns the extractor task for `page`.
///
/// The task exits once every [`ExtractClient`] has been dropped. Each request
/// runs a fresh extraction with `options`.
pub fn spawn_extractor<P, C>(
    page: Arc<P>,
    clock: Arc<C>,
    options: Options,
) -> (ExtractClient, JoinHandle<()>)
where
    P: Page + 'static,
    C: Clock + 'static,
{
    let (tx, mut rx) = mpsc::channel(1);

    let handle = tokio::spawn(async move {
        while let Some(ExtractRequest::Extract { reply }) = rx.recv().await {
            let result = crate::extract(page.as_ref(), clock.as_ref(), &options).await;
            if reply.send(ExtractResponse::from(result)).is_err() {
                debug!("requester went away before the response was sent");
            }
        }
        debug!("extractor bridge closed");
    });

    (ExtractClient { tx }, handle)
}
