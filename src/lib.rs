//! A low-level library to schedule deadlines. The core of the library is
//! [`Engine`], which stores points in time and, when [polled], invokes a
//! caller-supplied handler for every deadline whose time has arrived. It is
//! meant to be embedded inside a larger system, e.g. a timeout manager, a
//! retry scheduler or an event loop, rather than run standalone.
//!
//! [polled]: Engine::poll
//!
//! The engine is built from three pieces:
//!
//!  * an ordered store of scheduled deadlines, ascending by timestamp,
//!  * a FIFO queue of due-but-not-yet-invoked callbacks, surviving across
//!    poll calls, and
//!  * an allocator of unique [`Id`]s, one per scheduled deadline.
//!
//! # Usage
//!
//! Using the library starts by creating an [`Engine`]. Deadlines are
//! registered with [`schedule`], which returns the [`Id`] identifying the
//! deadline from then on, and unregistered with [`cancel`].
//!
//! The engine never reads a clock and runs no thread of its own: the
//! application calls [`poll`] periodically, passing its own notion of "now"
//! (an opaque signed integer, by convention milliseconds), a handler and a
//! budget. All currently due deadlines are queued, up to the budget of them
//! are handed to the handler, and whatever didn't fit is invoked first by
//! the next call.
//!
//! Note that firing does not unregister a deadline: until cancelled, a due
//! deadline is delivered again on every subsequent poll. See [`poll`] for
//! the details.
//!
//! [`schedule`]: Engine::schedule
//! [`cancel`]: Engine::cancel
//! [`poll`]: Engine::poll
//!
//! # Examples
//!
//! The example below shows a simple timeout manager around the engine.
//!
//! ```
//! # fn main() -> Result<(), std::io::Error> {
//! use std::io;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use horae::Engine;
//!
//! let engine = Engine::<io::Error>::new();
//!
//! // Schedule two requests to time out, in a caller-defined unit
//! // (milliseconds here): one already overdue, one far in the future.
//! let overdue = engine.schedule(1_000);
//! let upcoming = engine.schedule(60_000);
//! assert_eq!(engine.size(), 2);
//!
//! // Count the timeouts that fired.
//! let fired = Arc::new(AtomicUsize::new(0));
//! let handler_fired = Arc::clone(&fired);
//!
//! // Poll at "now" 2000: only the overdue deadline is due.
//! let invoked = engine.poll(2_000, move |id| {
//!     println!("request timed out: id={}", id);
//!     let _ = handler_fired.fetch_add(1, Ordering::Relaxed);
//!     Ok(())
//! }, 16)?;
//!
//! assert_eq!(invoked, 1);
//! assert_eq!(fired.load(Ordering::Relaxed), 1);
//!
//! // The fired deadline must be cancelled, or the next poll delivers it
//! // again. The upcoming one is cancelled here because its request
//! // "completed in time".
//! assert!(engine.cancel(overdue));
//! assert!(engine.cancel(upcoming));
//! assert_eq!(engine.size(), 0);
//! # Ok(())
//! # }
//! ```

#![warn(anonymous_parameters,
        bare_trait_objects,
        missing_debug_implementations,
        missing_docs,
        trivial_casts,
        trivial_numeric_casts,
        unused_extern_crates,
        unused_import_braces,
        unused_qualifications,
        unused_results,
        variant_size_differences,
)]

// Disallow warnings when running tests.
#![cfg_attr(test, deny(warnings))]

// Disallow warnings in examples, we want to set a good example after all.
#![doc(test(attr(deny(warnings))))]

mod engine;
mod id;
mod pending;
mod store;

pub use crate::engine::Engine;
pub use crate::id::Id;
