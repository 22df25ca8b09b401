//! # Change Notification
//!
//! Broadcasts "resource changed" events after successful writes.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Gateway write (affected rows > 0)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ChangeNotifier::publish(ResourceChange { path, operation })            │
//! │       │  broadcast::Sender::send  (no subscribers is fine)             │
//! │       ▼                                                                 │
//! │  ┌────────────────────┐   ┌──────────────────────────────────────────┐  │
//! │  │ subscribe()        │   │ watch(/products/7)                       │  │
//! │  │ every change       │   │ only changes where path.affects(/7)      │  │
//! │  └────────────────────┘   └──────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Delivery is best-effort. A slow watcher that falls behind the channel
//! capacity skips the missed events and logs a warning.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use serde::Serialize;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tracing::{trace, warn};

use stockroom_core::ResourcePath;

/// Default capacity of the broadcast channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// The kind of write that produced a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOperation {
    Insert,
    Update,
    Delete,
}

impl fmt::Display for ChangeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeOperation::Insert => "insert",
            ChangeOperation::Update => "update",
            ChangeOperation::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// One change event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceChange {
    /// Path the write was addressed to.
    pub path: ResourcePath,
    pub operation: ChangeOperation,
}

impl ResourceChange {
    pub fn new(path: ResourcePath, operation: ChangeOperation) -> Self {
        ResourceChange { path, operation }
    }
}

/// Publishes change events to any number of subscribers.
#[derive(Debug)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<ResourceChange>,
}

impl ChangeNotifier {
    /// Creates a notifier with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        ChangeNotifier { sender }
    }

    /// Publishes a change to every current subscriber.
    pub fn publish(&self, change: ResourceChange) {
        match self.sender.send(change.clone()) {
            Ok(receivers) => trace!(
                path = %change.path,
                operation = %change.operation,
                receivers,
                "Published change"
            ),
            // No subscribers right now
            Err(_) => trace!(path = %change.path, "Change published with no subscribers"),
        }
    }

    /// Receives every change published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ResourceChange> {
        self.sender.subscribe()
    }

    /// Streams the changes that invalidate data read from `path`.
    pub fn watch(&self, path: ResourcePath) -> ResourceChangeStream {
        ResourceChangeStream::new(self.sender.subscribe(), path)
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        ChangeNotifier::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

/// Stream of changes relevant to one watched path.
pub struct ResourceChangeStream {
    inner: BroadcastStream<ResourceChange>,
    watched: ResourcePath,
}

impl ResourceChangeStream {
    fn new(rx: broadcast::Receiver<ResourceChange>, watched: ResourcePath) -> Self {
        ResourceChangeStream {
            inner: BroadcastStream::new(rx),
            watched,
        }
    }

    /// The path this stream is watching.
    pub fn watched(&self) -> ResourcePath {
        self.watched
    }
}

impl Stream for ResourceChangeStream {
    type Item = ResourceChange;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            let watched = self.watched;
            match Pin::new(&mut self.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(change))) => {
                    if change.path.affects(&watched) {
                        return Poll::Ready(Some(change));
                    }
                }
                Poll::Ready(Some(Err(err))) => {
                    warn!(path = %watched, error = %err, "Watcher lagged, change events skipped");
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
