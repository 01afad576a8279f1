use std::sync::Arc;

use tokio::sync::{broadcast, oneshot};

struct Inner {
    // Dropping this sender is how the last context clone reports itself
    // gone to the handler side.
    _alive: oneshot::Sender<()>,
    cancelled: broadcast::Receiver<()>,
}

/// A cancellation context handed to long running tasks.
///
/// Tasks await [`Context::done`] to learn that they should wind down. The
/// side that created the context keeps the [`Handler`] and uses it to
/// cancel the context and wait for every clone to be dropped.
#[derive(Clone)]
pub struct Context(Arc<Inner>);

impl Context {
    pub fn new() -> (Self, Handler) {
        let (alive, done) = oneshot::channel();
        let (cancel, cancelled) = broadcast::channel(1);

        (
            Self(Arc::new(Inner {
                _alive: alive,
                cancelled,
            })),
            Handler { done, cancel },
        )
    }

    /// Resolves once the context has been cancelled.
    pub async fn done(&self) {
        let mut cancelled = self.0.cancelled.resubscribe();

        // The only way to receive here is an error, which means the sender
        // was dropped, ie. the handler cancelled us.
        let _ = cancelled.recv().await;
    }
}

pub struct Handler {
    done: oneshot::Receiver<()>,
    cancel: broadcast::Sender<()>,
}

impl Handler {
    /// Waits for every clone of the context to be dropped, without
    /// cancelling anything.
    pub async fn done(&mut self) {
        let _ = (&mut self.done).await;
    }

    /// Cancels the context and waits for every clone to be dropped.
    pub async fn cancel(self) {
        drop(self.cancel);

        let _ = self.done.await;
    }
}
