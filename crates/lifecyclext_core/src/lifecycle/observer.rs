use std::rc::Rc;

use crate::error::Result;

use super::StateId;

/// Callback invoked by a `LifecycleRegistry` after its state changed.
///
/// `owner` is the registry's host, passed through untouched. `previous` is the state
/// the registry left; the new state is available via the registry itself.
///
/// Implementors are shared through `Rc`, so any bookkeeping they keep needs
/// interior mutability. Returning an error stops the running dispatch.
pub trait LifecycleObserver<O> {
    fn on_state_changed(&self, owner: &O, previous: StateId) -> Result<()>;
}

/// A registered observer. Two handles are the same observer iff they point at the
/// same allocation.
pub type ObserverHandle<O> = Rc<dyn LifecycleObserver<O>>;

/// Closure adapter for `LifecycleObserver`.
pub struct FnObserver<F>(F);

impl<F> FnObserver<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<O, F> LifecycleObserver<O> for FnObserver<F>
where
    F: Fn(&O, StateId) -> Result<()>,
{
    fn on_state_changed(&self, owner: &O, previous: StateId) -> Result<()> {
        (self.0)(owner, previous)
    }
}

/// Wrap a closure into a fresh observer handle.
///
/// Keep the returned handle around if the observer should be removed later:
/// identity is per allocation, so wrapping the same closure twice yields two observers.
pub fn observer_fn<O, F>(f: F) -> ObserverHandle<O>
where
    F: Fn(&O, StateId) -> Result<()> + 'static,
{
    Rc::new(FnObserver::new(f))
}

/// Host-facing view of something that has a lifecycle.
pub trait Lifecycle<O> {
    fn add_observer(&self, observer: ObserverHandle<O>);
    fn remove_observer(&self, observer: &ObserverHandle<O>);
    fn current_state(&self) -> StateId;
}

/// Implemented by hosts that own a lifecycle.
pub trait LifecycleProvider {
    /// What the lifecycle hands its observers as `owner`.
    type Owner;

    fn lifecycle(&self) -> &dyn Lifecycle<Self::Owner>;
}
