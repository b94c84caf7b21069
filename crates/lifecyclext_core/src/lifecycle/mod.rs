//! lifecyclext_core::lifecycle
//!
//! A host owns a `LifecycleRegistry`, sets its state, and the registry tells every
//! registered `LifecycleObserver` which state was left.
//!
//! Key ideas:
//! - States are opaque integers (`StateId`); `State` offers common constants
//! - Identical state sets are dropped; any other value is accepted without validation
//! - Observers may register/unregister observers or start a nested transition from
//!   inside a callback (`ObserverList` keeps traversals consistent)
//! - Single-threaded: handles are `Rc`, state lives in `Cell`s

mod observer;
mod observer_list;
mod registry;
mod state;

pub use observer::{
    observer_fn, FnObserver, Lifecycle, LifecycleObserver, LifecycleProvider, ObserverHandle,
};
pub use observer_list::ObserverList;
pub use registry::LifecycleRegistry;
pub use state::{State, StateId, ALL_STATES};
