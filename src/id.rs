//! Module with deadline identifiers.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Identifies a scheduled deadline.
///
/// An `Id` is issued by [`Engine::schedule`] and is unique for the lifetime
/// of the engine instance that issued it: it is assigned once, never reused
/// and never mutated. It is the only handle the engine keeps for a deadline;
/// mapping an id back to application state is entirely up to the caller.
///
/// [`Engine::schedule`]: crate::Engine::schedule
///
/// # Examples
///
/// ```
/// use horae::Id;
///
/// let id = Id(123);
/// assert_eq!(id.0, 123);
/// assert_eq!(id.to_string(), "123");
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Id(pub i64);

impl From<i64> for Id {
    fn from(val: i64) -> Id {
        Id(val)
    }
}

impl From<Id> for i64 {
    fn from(val: Id) -> i64 {
        val.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Issues unique, monotonically increasing `Id`s.
///
/// The counter starts at zero and is incremented before each assignment, so
/// the first issued id is 1. Increments are serialized, concurrent callers
/// never see duplicate or skipped values. Wraparound of the 64 bit counter
/// is not handled.
#[derive(Debug)]
pub(crate) struct IdAllocator {
    counter: AtomicI64,
}

impl IdAllocator {
    /// Create a new id allocator.
    pub(crate) const fn new() -> IdAllocator {
        IdAllocator {
            counter: AtomicI64::new(0),
        }
    }

    /// Returns the next id.
    pub(crate) fn next_id(&self) -> Id {
        Id(self.counter.fetch_add(1, Ordering::Relaxed) + 1)
    }
}
