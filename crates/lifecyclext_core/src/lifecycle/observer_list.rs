//! Ordered, deduplicated observer list that tolerates mutation during traversal.
//!
//! # Traversal model
//!
//! Every insertion is stamped with a fresh serial number. `for_each` snapshots the
//! `(serial, handle)` pairs present when it starts and, right before each visit,
//! checks that the serial is still live:
//!
//! - entries removed before their turn are skipped;
//! - entries added during the traversal are not in the snapshot, so they wait for
//!   the next traversal;
//! - an entry removed and re-added gets a new serial, which also counts as a new
//!   addition;
//! - nested traversals take their own snapshot and share nothing with the outer one.
//!
//! No `RefCell` borrow is held while the callback runs, so the callback may call
//! any method on the list.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::error::Result;

struct Entry<T: ?Sized> {
    serial: u64,
    handle: Rc<T>,
}

/// Registration-ordered set of `Rc` handles compared by identity.
pub struct ObserverList<T: ?Sized> {
    entries: RefCell<Vec<Entry<T>>>,
    next_serial: Cell<u64>,
}

#[inline]
fn same_handle<T: ?Sized>(a: &Rc<T>, b: &Rc<T>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

impl<T: ?Sized> ObserverList<T> {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            next_serial: Cell::new(0),
        }
    }

    /// Append `handle` unless it is already registered. A duplicate keeps its
    /// original position.
    pub fn add(&self, handle: Rc<T>) {
        let mut entries = self.entries.borrow_mut();
        if entries.iter().any(|e| same_handle(&e.handle, &handle)) {
            tracing::debug!("observer already registered; add ignored");
            return;
        }

        let serial = self.next_serial.get();
        self.next_serial.set(serial + 1);
        entries.push(Entry { serial, handle });
        tracing::debug!(serial, observers = entries.len(), "observer added");
    }

    /// Remove `handle` if registered; otherwise a no-op.
    pub fn remove(&self, handle: &Rc<T>) {
        let mut entries = self.entries.borrow_mut();
        match entries.iter().position(|e| same_handle(&e.handle, handle)) {
            Some(index) => {
                let entry = entries.remove(index);
                tracing::debug!(
                    serial = entry.serial,
                    observers = entries.len(),
                    "observer removed"
                );
            }
            None => tracing::debug!("observer not registered; remove ignored"),
        }
    }

    pub fn contains(&self, handle: &Rc<T>) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|e| same_handle(&e.handle, handle))
    }

    /// Number of registered handles. Reflects mutations made by a running traversal.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Remove every handle. A running traversal visits nothing further.
    ///
    /// Handles are dropped after the borrow is released, so a handle whose `Drop`
    /// unregisters something from this list does not trip the `RefCell`.
    pub fn clear(&self) {
        let removed = std::mem::take(&mut *self.entries.borrow_mut());
        tracing::debug!(observers = removed.len(), "observer list cleared");
        drop(removed);
    }

    /// Invoke `f` for each handle registered when the traversal starts and still
    /// registered when its turn comes, in registration order.
    ///
    /// Stops at the first error and returns it; the remaining handles are not visited.
    pub fn for_each<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(&Rc<T>) -> Result<()>,
    {
        let snapshot: Vec<(u64, Rc<T>)> = self
            .entries
            .borrow()
            .iter()
            .map(|e| (e.serial, Rc::clone(&e.handle)))
            .collect();

        for (serial, handle) in &snapshot {
            if !self.is_live(*serial) {
                tracing::trace!(serial, "observer removed before its turn; skipped");
                continue;
            }
            f(handle)?;
        }

        Ok(())
    }

    fn is_live(&self, serial: u64) -> bool {
        self.entries.borrow().iter().any(|e| e.serial == serial)
    }
}

impl<T: ?Sized> Default for ObserverList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for ObserverList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
