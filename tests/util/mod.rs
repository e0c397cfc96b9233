//! Collection of testing utilities.

// Not all functions are used in all tests, causing warnings of unused
// functions while other tests are actually using them.
#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use horae::Id;

/// A stand-in for the current time, in milliseconds. The engine never reads
/// a clock, so tests can use a fixed "now".
pub const NOW: i64 = 1_000_000;

/// Initialise the test setup, things like logging etc.
pub fn init() {
    let env = env_logger::Env::new().filter("LOG_LEVEL");
    // Logger could already be set, so we ignore the result.
    drop(env_logger::try_init_from_env(env));
}

/// Returns a counter and a handler that increments it on every invocation.
///
/// The handler is cloneable so it can be passed to multiple poll calls, all
/// feeding the same counter.
pub fn counting_handler() -> (
    Arc<AtomicUsize>,
    impl Fn(Id) -> io::Result<()> + Clone + Send + Sync + 'static,
) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let handler = move |_id: Id| {
        let _ = counter.fetch_add(1, Ordering::Relaxed);
        Ok(())
    };
    (count, handler)
}
