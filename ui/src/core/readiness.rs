//! One-shot readiness signal for the chart rendering engine.
//!
//! The loader holds a [`ReadySignal`] and resolves it once; any number of
//! [`EngineReady`] clones can await that moment. Dropping the signal without
//! resolving means the engine never became available, and waiters observe
//! `false`.

use futures::channel::oneshot;
use futures::future::{FutureExt, Shared};

/// Resolving half, owned by whoever loads the engine.
#[derive(Debug)]
pub struct ReadySignal {
    sender: oneshot::Sender<()>,
}

impl ReadySignal {
    pub fn resolve(self) {
        // Receivers may all be gone already; nothing to notify then.
        let _ = self.sender.send(());
    }
}

/// Awaitable half; cheap to clone.
#[derive(Clone)]
pub struct EngineReady {
    inner: Shared<oneshot::Receiver<()>>,
}

impl EngineReady {
    /// Creates a linked signal/waiter pair.
    pub fn pair() -> (ReadySignal, EngineReady) {
        let (sender, receiver) = oneshot::channel();
        (
            ReadySignal { sender },
            EngineReady {
                inner: receiver.shared(),
            },
        )
    }

    /// A waiter that is already resolved.
    pub fn resolved() -> Self {
        let (signal, ready) = Self::pair();
        signal.resolve();
        ready
    }

    /// Completes once the engine is ready (`true`) or will never be (`false`).
    pub async fn wait(&self) -> bool {
        self.inner.clone().await.is_ok()
    }

    /// Whether a completed wait has already been observed as ready.
    pub fn is_ready(&self) -> bool {
        matches!(self.inner.peek(), Some(Ok(())))
    }
}

impl std::fmt::Debug for EngineReady {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineReady")
            .field("ready", &self.is_ready())
            .finish()
    }
}

impl PartialEq for EngineReady {
    fn eq(&self, other: &Self) -> bool {
        self.inner.ptr_eq(&other.inner)
    }
}
