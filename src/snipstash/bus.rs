//! Request/response bus between the capture front-end and the store worker.
//!
//! The capture side never touches the vault directly. A bounded mpsc queue
//! carries typed requests to a worker that owns its own [`SnippetStore`],
//! and every request travels with a oneshot sender for the reply. The
//! worker serializes all capture-path writes by handling one request at a
//! time.
//!
//! A request kind the worker does not serve gets no reply at all: the
//! dropped oneshot shows up on the client as a bus error, distinct from a
//! store failure. Clients bound the wait with an application-level timeout.

use crate::error::{Result, StashError};
use crate::model::Snippet;
use crate::store::{SnippetStore, VaultBackend};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

/// Ceiling on waiting for a worker reply.
pub const REPLY_TIMEOUT_MS: u64 = 10_000;

/// Source metadata travelling beside a capture payload.
#[derive(Debug, Clone, Default)]
pub struct SenderMeta {
    pub url: String,
    pub page_title: String,
}

#[derive(Debug)]
pub enum Request {
    Capture {
        text: String,
        context: String,
        meta: SenderMeta,
    },
    Delete {
        id: Uuid,
    },
    /// Addressed to a viewer surface, not the store worker. It rides the
    /// same queue and the worker leaves it unanswered.
    OpenViewer,
}

#[derive(Debug)]
pub enum Reply {
    Saved { id: Uuid },
    Deleted,
    /// The store refused the operation; carries its message verbatim.
    Failed { error: String },
}

struct Envelope {
    request: Request,
    reply_tx: oneshot::Sender<Reply>,
}

/// Client handle onto the store worker. Cheap to clone; every clone feeds
/// the same queue.
#[derive(Clone)]
pub struct StoreBus {
    tx: mpsc::Sender<Envelope>,
}

impl StoreBus {
    /// Send a request and wait for the worker's reply.
    pub async fn request(&self, request: Request) -> Result<Reply> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Envelope { request, reply_tx })
            .await
            .map_err(|_| StashError::Bus("store worker is gone".to_string()))?;

        match tokio::time::timeout(Duration::from_millis(REPLY_TIMEOUT_MS), reply_rx).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(_)) => Err(StashError::Bus(
                "request was not addressed to the store worker".to_string(),
            )),
            Err(_) => Err(StashError::Timeout(REPLY_TIMEOUT_MS)),
        }
    }
}

/// Spawn the store worker and hand back the bus it listens on.
///
/// The worker owns `store` outright; nothing else writes through it. It
/// runs until every [`StoreBus`] clone is dropped.
pub fn spawn_store_worker<B>(store: SnippetStore<B>) -> StoreBus
where
    B: VaultBackend + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<Envelope>(32);

    tokio::spawn(async move {
        log::debug!("store worker started");
        while let Some(envelope) = rx.recv().await {
            match envelope.request {
                Request::Capture {
                    text,
                    context,
                    meta,
                } => {
                    let snippet = Snippet::new(text, meta.url, meta.page_title, context);
                    let id = snippet.id;
                    let reply = match store.save(&snippet) {
                        Ok(()) => {
                            log::debug!("captured snippet {}", id);
                            Reply::Saved { id }
                        }
                        Err(e) => {
                            log::warn!("capture failed: {}", e);
                            Reply::Failed {
                                error: e.to_string(),
                            }
                        }
                    };
                    let _ = envelope.reply_tx.send(reply);
                }
                Request::Delete { id } => {
                    let reply = match store.remove(id) {
                        Ok(()) => {
                            log::debug!("deleted snippet {}", id);
                            Reply::Deleted
                        }
                        Err(e) => {
                            log::warn!("delete failed: {}", e);
                            Reply::Failed {
                                error: e.to_string(),
                            }
                        }
                    };
                    let _ = envelope.reply_tx.send(reply);
                }
                // Not for this worker; the dropped reply channel is the signal
                Request::OpenViewer => {}
            }
        }
        log::debug!("store worker stopped: all bus handles dropped");
    });

    StoreBus { tx }
}
