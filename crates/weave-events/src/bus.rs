//! A broadcast bus distributing [`EngineEvent`]s to every subscriber.

use std::sync::Arc;

use crate::event::EngineEvent;

/// Ring buffer capacity for the underlying broadcast channel. Sized for a
/// single execution's event volume; a slow subscriber that falls behind by
/// more than this many events will observe a [`RecvError::Lagged`] and miss
/// the skipped events rather than block the publisher.
const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Error returned by [`EventReceiver::recv`].
#[derive(Debug, thiserror::Error)]
pub enum RecvError {
    /// The subscriber fell behind and skipped `count` events.
    #[error("lagged, skipped {0} events")]
    Lagged(u64),
    /// The publishing side has been dropped; no more events will arrive.
    #[error("event bus closed")]
    Closed,
}

/// A cheaply-cloneable handle that publishes [`EngineEvent`]s to every
/// current and future subscriber.
#[derive(Clone)]
pub struct EventBus {
    sender: tokio::sync::broadcast::Sender<Arc<EngineEvent>>,
}

impl EventBus {
    /// A new bus with the default channel capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// A new bus with an explicit channel capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = tokio::sync::broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event. Returns without error even if there are currently
    /// no subscribers — an execution that nobody is watching still runs to
    /// completion.
    pub fn publish(&self, event: EngineEvent) {
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to future events. The receiver only sees events published
    /// after this call.
    #[must_use]
    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver { inner: self.sender.subscribe() }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A single subscriber's view of an [`EventBus`].
pub struct EventReceiver {
    inner: tokio::sync::broadcast::Receiver<Arc<EngineEvent>>,
}

impl EventReceiver {
    /// Wait for the next event.
    pub async fn recv(&mut self) -> Result<Arc<EngineEvent>, RecvError> {
        use tokio::sync::broadcast::error::RecvError as TokioRecvError;
        match self.inner.recv().await {
            Ok(event) => Ok(event),
            Err(TokioRecvError::Lagged(skipped)) => Err(RecvError::Lagged(skipped)),
            Err(TokioRecvError::Closed) => Err(RecvError::Closed),
        }
    }

    /// Poll for an event without waiting.
    pub fn try_recv(&mut self) -> Result<Arc<EngineEvent>, RecvError> {
        use tokio::sync::broadcast::error::TryRecvError;
        match self.inner.try_recv() {
            Ok(event) => Ok(event),
            Err(TryRecvError::Lagged(skipped)) => Err(RecvError::Lagged(skipped)),
            Err(TryRecvError::Closed) => Err(RecvError::Closed),
            Err(TryRecvError::Empty) => Err(RecvError::Closed),
        }
    }
}
