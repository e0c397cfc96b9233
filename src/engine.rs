//! Module with the deadline engine.

use std::fmt;
use std::sync::Arc;

use log::trace;
use parking_lot::Mutex;

use crate::id::{Id, IdAllocator};
use crate::pending::{Handler, PendingQueue};
use crate::store::DeadlineStore;

/// A deadline-scheduling engine.
///
/// The engine holds deadlines scheduled via [`schedule`], identified by the
/// returned [`Id`], until they are cancelled via [`cancel`]. It never reads
/// a clock and runs no background thread, the caller drives all progress by
/// calling [`poll`] with its own notion of "now". Timestamps are opaque
/// signed integers in a caller-defined unit, milliseconds by convention; any
/// value is accepted, including negative or past ones.
///
/// All methods take `&self`, an engine can be shared between threads, e.g.
/// behind an [`Arc`]. `E` is the error type of the poll handlers, see
/// [`poll`].
///
/// [`schedule`]: Engine::schedule
/// [`cancel`]: Engine::cancel
/// [`poll`]: Engine::poll
///
/// # Examples
///
/// ```
/// use std::io;
///
/// use horae::Engine;
///
/// let engine = Engine::<io::Error>::new();
///
/// // Schedule a deadline at timestamp 10, already due at "now" 20 below.
/// let id = engine.schedule(10);
/// assert_eq!(engine.size(), 1);
///
/// let invoked = engine.poll(20, |fired| {
///     println!("deadline fired: id={}", fired);
///     Ok(())
/// }, 16)?;
/// assert_eq!(invoked, 1);
///
/// // Fired deadlines stay in the engine until cancelled.
/// assert!(engine.cancel(id));
/// assert_eq!(engine.size(), 0);
/// # Ok::<(), io::Error>(())
/// ```
pub struct Engine<E> {
    allocator: IdAllocator,
    /// Guards the deadline store; `deadlines` and `pending` have separate
    /// lock scopes and are never locked at the same time.
    deadlines: Mutex<DeadlineStore>,
    pending: Mutex<PendingQueue<E>>,
}

impl<E> Engine<E> {
    /// Create a new deadline engine.
    pub fn new() -> Engine<E> {
        Engine {
            allocator: IdAllocator::new(),
            deadlines: Mutex::new(DeadlineStore::new()),
            pending: Mutex::new(PendingQueue::new()),
        }
    }

    /// Schedule a deadline at `timestamp`.
    ///
    /// Returns the unique id of the new deadline, to be matched against the
    /// ids passed to poll handlers and to [`cancel`] it. The timestamp is
    /// not validated, scheduling in the past simply makes the deadline due
    /// on the next [`poll`].
    ///
    /// [`cancel`]: Engine::cancel
    /// [`poll`]: Engine::poll
    pub fn schedule(&self, timestamp: i64) -> Id {
        let id = self.allocator.next_id();
        trace!("scheduling deadline: id={}, timestamp={}", id, timestamp);
        self.deadlines.lock().insert(timestamp, id);
        id
    }

    /// Cancel a previously scheduled deadline.
    ///
    /// Returns true if the deadline was found and removed, false if `id` is
    /// unknown or already cancelled. Cancelling is the only way a deadline
    /// leaves the engine, see [`poll`].
    ///
    /// # Notes
    ///
    /// Cancelling does not reach into a poll call that already picked the
    /// deadline up: a callback enqueued before the cancel will still be
    /// invoked.
    ///
    /// [`poll`]: Engine::poll
    pub fn cancel(&self, id: Id) -> bool {
        trace!("cancelling deadline: id={}", id);
        self.deadlines.lock().remove(id)
    }

    /// Poll for due deadlines, invoking `handler` for at most `max_poll` of
    /// them.
    ///
    /// Every deadline with a timestamp at or before `now` is appended to an
    /// internal FIFO queue, in ascending timestamp then scheduling order,
    /// regardless of `max_poll`. Then up to `max_poll` queued callbacks are
    /// dequeued, oldest first, and their handlers invoked synchronously on
    /// the calling thread. Callbacks left over from an earlier,
    /// budget-limited call are invoked before anything newly due. Returns
    /// the number of handlers invoked, never more than `max_poll`; a
    /// `max_poll` of zero invokes nothing but still enqueues.
    ///
    /// If an invocation returns an error the remaining invocations of this
    /// call are abandoned and the error is returned; the effects of
    /// already-invoked handlers stand.
    ///
    /// # Notes
    ///
    /// Firing does *not* remove a deadline from the engine: a due deadline
    /// is rediscovered, re-enqueued and re-invoked by every subsequent poll
    /// whose `now` is still at or past its timestamp, until it is
    /// [`cancel`]led. Callers wanting one-shot semantics must cancel from
    /// the handler's site. This also means the pending queue can grow
    /// without bound while an overdue backlog outpaces the poll budget.
    ///
    /// [`cancel`]: Engine::cancel
    pub fn poll<H>(&self, now: i64, handler: H, max_poll: usize) -> Result<usize, E>
        where H: Fn(Id) -> Result<(), E> + Send + Sync + 'static,
    {
        trace!("polling deadlines: now={}, max_poll={}", now, max_poll);

        // Snapshot the due ids under the store lock, so enumeration can't
        // race with concurrent schedule or cancel calls. The store itself
        // is left untouched.
        let due: Vec<Id> = {
            let deadlines = self.deadlines.lock();
            deadlines
                .due(now)
                .flat_map(|(_, bucket)| bucket.iter().copied())
                .collect()
        };

        let mut pending = self.pending.lock();
        if !due.is_empty() {
            let handler: Handler<E> = Arc::new(handler);
            for id in due {
                pending.enqueue(handler.clone(), id);
            }
        }

        let callbacks = pending.dequeue_up_to(max_poll);
        let mut invoked = 0;
        for callback in callbacks {
            trace!("invoking pending callback: id={}", callback.id());
            callback.invoke()?;
            invoked += 1;
        }
        Ok(invoked)
    }

    /// Returns the number of deadlines currently scheduled.
    ///
    /// Pending callbacks awaiting invocation are not counted, only ids in
    /// the store.
    pub fn size(&self) -> usize {
        self.deadlines.lock().len()
    }
}

impl<E> Default for Engine<E> {
    fn default() -> Engine<E> {
        Engine::new()
    }
}

impl<E> fmt::Debug for Engine<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Engine")
            .field("allocator", &self.allocator)
            .field("deadlines", &self.deadlines)
            .field("pending", &self.pending)
            .finish()
    }
}
