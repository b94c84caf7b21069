use std::cell::Cell;
use std::fmt;

use crate::error::Result;
use crate::logging::log_core_error;

use super::{Lifecycle, LifecycleObserver, ObserverHandle, ObserverList, StateId};

/// Holds a host's current lifecycle state and notifies observers when it changes.
///
/// All methods take `&self`: observers are expected to reach back into the registry
/// (through the owner, or a `Weak` they hold) while being notified.
///
/// Responsibilities:
/// - Deduplicate identical state sets
/// - Record previous/current state before any observer runs
/// - Run exactly one observer traversal per accepted transition
pub struct LifecycleRegistry<O> {
    owner: O,
    current: Cell<StateId>,
    previous: Cell<Option<StateId>>,
    observers: ObserverList<dyn LifecycleObserver<O>>,
}

impl<O> LifecycleRegistry<O> {
    /// Create a registry for `owner`, starting in `initial_state` with no observers.
    pub fn new(owner: O, initial_state: StateId) -> Self {
        Self {
            owner,
            current: Cell::new(initial_state),
            previous: Cell::new(None),
            observers: ObserverList::new(),
        }
    }

    /// Move to `state` and notify every registered observer with the state being left.
    ///
    /// Setting the current state again is a no-op. Otherwise the new state is
    /// visible through `current_state()` before the first observer runs.
    ///
    /// If an observer fails, the error is logged and returned and the observers after
    /// it are not notified for this transition. The state change itself stands.
    pub fn set_current_state(&self, state: StateId) -> Result<()> {
        let previous = self.current.get();
        if previous == state {
            tracing::debug!(state, "lifecycle state unchanged; nothing to dispatch");
            return Ok(());
        }

        self.previous.set(Some(previous));
        self.current.set(state);
        tracing::trace!(
            from = previous,
            to = state,
            observers = self.observers.len(),
            "dispatching lifecycle transition"
        );

        // `previous` is captured per dispatch: a nested transition started by an
        // observer must not change what the rest of this traversal receives.
        self.observers
            .for_each(|observer| observer.on_state_changed(&self.owner, previous))
            .map_err(|err| {
                let err = err.with_transition(previous, state);
                log_core_error(&err);
                err
            })
    }

    pub fn add_observer(&self, observer: ObserverHandle<O>) {
        self.observers.add(observer);
    }

    pub fn remove_observer(&self, observer: &ObserverHandle<O>) {
        self.observers.remove(observer);
    }

    /// Number of registered observers.
    pub fn size(&self) -> usize {
        self.observers.len()
    }

    pub fn current_state(&self) -> StateId {
        self.current.get()
    }

    /// State left by the last accepted transition; `None` before the first one.
    pub fn previous_state(&self) -> Option<StateId> {
        self.previous.get()
    }

    pub fn owner(&self) -> &O {
        &self.owner
    }
}

impl<O> Lifecycle<O> for LifecycleRegistry<O> {
    fn add_observer(&self, observer: ObserverHandle<O>) {
        LifecycleRegistry::add_observer(self, observer);
    }

    fn remove_observer(&self, observer: &ObserverHandle<O>) {
        LifecycleRegistry::remove_observer(self, observer);
    }

    fn current_state(&self) -> StateId {
        LifecycleRegistry::current_state(self)
    }
}

impl<O: fmt::Debug> fmt::Debug for LifecycleRegistry<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleRegistry")
            .field("owner", &self.owner)
            .field("current", &self.current.get())
            .field("previous", &self.previous.get())
            .field("observers", &self.observers.len())
            .finish()
    }
}

//
// Tests
//
