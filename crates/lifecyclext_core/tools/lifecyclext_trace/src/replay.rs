use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use lifecyclext_core::error::Result;
use lifecyclext_core::lifecycle::{
    LifecycleObserver, LifecycleRegistry, ObserverHandle, State, StateId,
};
use tracing::{debug, info};

use crate::config::ReplayPlan;

/// One observer notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub observer: usize,
    pub previous: StateId,
    pub current: StateId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub deliveries: Vec<Delivery>,
    pub final_state: StateId,
    pub remaining_observers: usize,
}

type Registry = LifecycleRegistry<String>;

/// Observer that records every delivery and optionally unregisters itself.
struct TraceObserver {
    index: usize,
    registry: Weak<Registry>,
    me: Weak<TraceObserver>,
    detach_after: Option<usize>,
    received: Cell<usize>,
    deliveries: Rc<RefCell<Vec<Delivery>>>,
}

impl LifecycleObserver<String> for TraceObserver {
    fn on_state_changed(&self, owner: &String, previous: StateId) -> Result<()> {
        let Some(registry) = self.registry.upgrade() else {
            return Ok(());
        };
        let current = registry.current_state();
        info!(
            owner = owner.as_str(),
            observer = self.index,
            from = %label(previous),
            to = %label(current),
            "lifecycle transition delivered"
        );
        self.deliveries.borrow_mut().push(Delivery {
            observer: self.index,
            previous,
            current,
        });

        let received = self.received.get() + 1;
        self.received.set(received);
        if self.detach_after == Some(received) {
            if let Some(me) = self.me.upgrade() {
                debug!(observer = self.index, received, "observer detaching itself");
                let handle: ObserverHandle<String> = me;
                registry.remove_observer(&handle);
            }
        }
        Ok(())
    }
}

/// Drive a fresh registry through `plan.states` and collect what observers saw.
pub fn replay(plan: &ReplayPlan) -> Result<ReplayReport> {
    let registry = Rc::new(Registry::new(plan.owner_name.clone(), plan.initial_state));
    let deliveries = Rc::new(RefCell::new(Vec::new()));

    for index in 0..plan.observers {
        let observer = Rc::new_cyclic(|me| TraceObserver {
            index,
            registry: Rc::downgrade(&registry),
            me: me.clone(),
            detach_after: plan.detach_after,
            received: Cell::new(0),
            deliveries: Rc::clone(&deliveries),
        });
        registry.add_observer(observer);
    }

    for &state in &plan.states {
        registry.set_current_state(state)?;
    }

    let report = ReplayReport {
        deliveries: deliveries.take(),
        final_state: registry.current_state(),
        remaining_observers: registry.size(),
    };
    Ok(report)
}

/// `State` label when the id is one of ours, the raw number otherwise.
pub fn label(state: StateId) -> String {
    State::from_id(state)
        .map(|s| s.label().to_string())
        .unwrap_or_else(|| state.to_string())
}
