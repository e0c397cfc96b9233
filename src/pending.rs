//! Module with the pending callback queue.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use log::trace;

use crate::id::Id;

/// Handler invoked for a due deadline.
///
/// A handler is supplied per [`poll`] call, not per scheduled deadline; the
/// `Arc` lets a single call's handler back every id it discovers. `E` is
/// the caller's error type, a returned error stops the remaining
/// invocations of that poll call.
///
/// [`poll`]: crate::Engine::poll
pub(crate) type Handler<E> = Arc<dyn Fn(Id) -> Result<(), E> + Send + Sync>;

/// A due deadline waiting to be invoked.
pub(crate) struct Callback<E> {
    handler: Handler<E>,
    id: Id,
}

impl<E> Callback<E> {
    /// Returns the id of the deadline this callback fires for.
    pub(crate) fn id(&self) -> Id {
        self.id
    }

    /// Invoke the handler with the deadline's id, consuming the callback.
    pub(crate) fn invoke(self) -> Result<(), E> {
        (self.handler)(self.id)
    }
}

impl<E> fmt::Debug for Callback<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Callback").field("id", &self.id).finish()
    }
}

/// FIFO queue of callbacks for due but not yet invoked deadlines.
///
/// Entries survive across poll calls: a poll call enqueues every currently
/// due id but only invokes up to its budget, whatever is left is picked up,
/// in arrival order, by the next call.
pub(crate) struct PendingQueue<E> {
    callbacks: VecDeque<Callback<E>>,
}

impl<E> fmt::Debug for PendingQueue<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PendingQueue")
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

impl<E> PendingQueue<E> {
    /// Create a new, empty pending queue.
    pub(crate) fn new() -> PendingQueue<E> {
        PendingQueue {
            callbacks: VecDeque::new(),
        }
    }

    /// Append a callback for `id` to the tail of the queue.
    pub(crate) fn enqueue(&mut self, handler: Handler<E>, id: Id) {
        trace!("enqueueing pending callback: id={}", id);
        self.callbacks.push_back(Callback { handler, id });
    }

    /// Remove and return up to `n` callbacks from the head of the queue, in
    /// order. Returns fewer if the queue is exhausted first.
    pub(crate) fn dequeue_up_to(&mut self, n: usize) -> Vec<Callback<E>> {
        let n = n.min(self.callbacks.len());
        self.callbacks.drain(..n).collect()
    }
}
