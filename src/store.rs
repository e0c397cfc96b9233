//! Module with the ordered deadline store.

use std::collections::{BTreeMap, HashMap};

use log::trace;

use crate::id::Id;

/// Ordered store of scheduled deadlines.
///
/// Deadlines are kept in a mapping from timestamp to the bucket of ids
/// scheduled at that exact timestamp, ascending by timestamp. Within a
/// bucket insertion order is preserved, two deadlines with equal timestamps
/// collide into the same bucket as distinct entries. The store never
/// contains an empty bucket, [`remove`] deletes the bucket key when its last
/// id goes.
///
/// An auxiliary index from id to bucket key keeps removal `O(log n)`, the
/// alternative is a linear scan over all buckets.
///
/// [`remove`]: DeadlineStore::remove
#[derive(Debug, Default)]
pub(crate) struct DeadlineStore {
    buckets: BTreeMap<i64, Vec<Id>>,
    /// Maps each id to the timestamp of the bucket holding it.
    index: HashMap<Id, i64>,
}

impl DeadlineStore {
    /// Create a new, empty deadline store.
    pub(crate) fn new() -> DeadlineStore {
        DeadlineStore {
            buckets: BTreeMap::new(),
            index: HashMap::new(),
        }
    }

    /// Add `id` to the bucket for `timestamp`, creating the bucket if it
    /// doesn't exist yet. Arrival order within the bucket is preserved.
    pub(crate) fn insert(&mut self, timestamp: i64, id: Id) {
        trace!("inserting deadline: id={}, timestamp={}", id, timestamp);
        self.buckets.entry(timestamp).or_default().push(id);
        let old = self.index.insert(id, timestamp);
        debug_assert!(old.is_none(), "insert: id={} was already present", id);
    }

    /// Remove a previously inserted deadline.
    ///
    /// Returns true if `id` was present. If removing `id` empties its
    /// bucket, the bucket key is deleted as well.
    pub(crate) fn remove(&mut self, id: Id) -> bool {
        trace!("removing deadline: id={}", id);

        let timestamp = match self.index.remove(&id) {
            Some(timestamp) => timestamp,
            None => return false,
        };

        // The index and the buckets always agree, so the bucket must exist
        // and must contain the id.
        let bucket = self.buckets.get_mut(&timestamp).unwrap();
        let position = bucket.iter().position(|&entry| entry == id).unwrap();
        let _ = bucket.remove(position);

        if bucket.is_empty() {
            drop(self.buckets.remove(&timestamp));
        }
        true
    }

    /// All buckets with a timestamp at or before `threshold`, ascending.
    ///
    /// This is a read-only view, nothing is removed or mutated. In
    /// particular a due deadline stays in the store until it is explicitly
    /// removed.
    pub(crate) fn due(&self, threshold: i64) -> impl Iterator<Item = (&i64, &Vec<Id>)> {
        self.buckets.range(..=threshold)
    }

    /// Total number of ids in the store, summed over all buckets.
    pub(crate) fn len(&self) -> usize {
        // The index holds exactly one entry per stored id.
        self.index.len()
    }
}
