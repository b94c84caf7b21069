use lifecyclext_core::lifecycle::State;
use lifecyclext_trace::config::ReplayPlan;
use lifecyclext_trace::replay::{label, replay, Delivery};

fn plan(observers: usize, detach_after: Option<usize>, states: &[State]) -> ReplayPlan {
    ReplayPlan {
        owner_name: "screen".to_string(),
        initial_state: State::Initialized.id(),
        observers,
        detach_after,
        states: states.iter().map(|s| s.id()).collect(),
    }
}

#[test]
fn every_observer_sees_every_transition_in_order() {
    let report = replay(&plan(2, None, &[State::Created, State::Started])).unwrap();

    let created = State::Created.id();
    let started = State::Started.id();
    let initialized = State::Initialized.id();
    assert_eq!(
        report.deliveries,
        [
            Delivery {
                observer: 0,
                previous: initialized,
                current: created,
            },
            Delivery {
                observer: 1,
                previous: initialized,
                current: created,
            },
            Delivery {
                observer: 0,
                previous: created,
                current: started,
            },
            Delivery {
                observer: 1,
                previous: created,
                current: started,
            },
        ]
    );
    assert_eq!(report.final_state, started);
    assert_eq!(report.remaining_observers, 2);
}

#[test]
fn repeated_state_is_not_delivered() {
    let report = replay(&plan(1, None, &[State::Created, State::Created])).unwrap();
    assert_eq!(report.deliveries.len(), 1);
}

#[test]
fn self_detaching_observers_stop_after_limit() {
    let states = [State::Created, State::Started, State::Resumed];
    let report = replay(&plan(3, Some(2), &states)).unwrap();

    // Each observer gets two deliveries, then removes itself mid-traversal
    // without disturbing the observers after it.
    assert_eq!(report.deliveries.len(), 6);
    for index in 0..3 {
        let count = report
            .deliveries
            .iter()
            .filter(|d| d.observer == index)
            .count();
        assert_eq!(count, 2);
    }
    assert_eq!(report.final_state, State::Resumed.id());
    assert_eq!(report.remaining_observers, 0);
}

#[test]
fn label_falls_back_to_number() {
    assert_eq!(label(State::Resumed.id()), "resumed");
    assert_eq!(label(42), "42");
}
