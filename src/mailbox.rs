// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A single-slot mailbox.  Publishing overwrites whatever is in the
//! slot, taking empties it, and neither side ever waits for the
//! other.  The renderer only ever wants the latest view, so there
//! is no queue.

use crossbeam::atomic::AtomicCell;
use std::sync::Arc;

/// Holds at most one pending value of `T`.
pub struct Mailbox<T> {
    slot: AtomicCell<Option<Arc<T>>>,
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Mailbox {
            slot: AtomicCell::new(None),
        }
    }
}

impl<T> Mailbox<T> {
    /// An empty mailbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `value` in the slot, replacing anything not yet taken.
    /// Returns true if an unconsumed value was dropped.
    pub fn publish(&self, value: T) -> bool {
        self.slot.swap(Some(Arc::new(value))).is_some()
    }

    /// Empty the slot, returning what was in it.
    pub fn take(&self) -> Option<Arc<T>> {
        self.slot.take()
    }
}
