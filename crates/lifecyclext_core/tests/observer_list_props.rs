use std::cell::Cell;
use std::rc::Rc;

use lifecyclext_core::lifecycle::ObserverList;
use proptest::collection::vec;
use proptest::prelude::*;

const POOL: usize = 6;

#[derive(Debug, Clone, Copy)]
enum Edit {
    Add(usize),
    Remove(usize),
}

fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0..POOL).prop_map(Edit::Add),
        (0..POOL).prop_map(Edit::Remove),
    ]
}

/// Reference model: registration order plus a serial per registration.
#[derive(Default)]
struct Model {
    live: Vec<(u64, usize)>,
    next: u64,
}

impl Model {
    fn apply(&mut self, edit: Edit) {
        match edit {
            Edit::Add(idx) => {
                if !self.live.iter().any(|&(_, i)| i == idx) {
                    self.live.push((self.next, idx));
                    self.next += 1;
                }
            }
            Edit::Remove(idx) => self.live.retain(|&(_, i)| i != idx),
        }
    }

    fn order(&self) -> Vec<usize> {
        self.live.iter().map(|&(_, i)| i).collect()
    }
}

fn pool() -> Vec<Rc<usize>> {
    (0..POOL).map(Rc::new).collect()
}

fn apply(list: &ObserverList<usize>, pool: &[Rc<usize>], edit: Edit) {
    match edit {
        Edit::Add(idx) => list.add(Rc::clone(&pool[idx])),
        Edit::Remove(idx) => list.remove(&pool[idx]),
    }
}

fn order(list: &ObserverList<usize>) -> Vec<usize> {
    let mut seen = Vec::new();
    list.for_each(|h| {
        seen.push(**h);
        Ok(())
    })
    .unwrap();
    seen
}

proptest! {
    /// Property: after any add/remove sequence, size and order match the distinct live handles.
    #[test]
    fn size_matches_distinct_live_handles(edits in vec(arb_edit(), 0..40)) {
        let pool = pool();
        let list = ObserverList::new();
        let mut model = Model::default();

        for edit in edits {
            apply(&list, &pool, edit);
            model.apply(edit);
            prop_assert_eq!(list.len(), model.live.len());
        }
        prop_assert_eq!(order(&list), model.order());
    }

    /// Property: edits made from inside the callback never cause a skip of a live
    /// snapshot entry, a double visit, or a visit of a newly registered entry.
    #[test]
    fn traversal_visits_snapshot_entries_still_live(
        initial in vec(0..POOL, 0..POOL),
        during in vec(arb_edit(), 0..8),
    ) {
        let pool = pool();
        let list = ObserverList::new();
        let mut model = Model::default();
        for idx in initial {
            apply(&list, &pool, Edit::Add(idx));
            model.apply(Edit::Add(idx));
        }

        let snapshot = model.live.clone();
        let mut expected = Vec::new();
        let mut step = 0;
        for (serial, idx) in snapshot {
            if model.live.iter().any(|&(s, _)| s == serial) {
                expected.push(idx);
                if let Some(&edit) = during.get(step) {
                    model.apply(edit);
                }
                step += 1;
            }
        }

        let mut visited = Vec::new();
        let calls = Cell::new(0usize);
        list.for_each(|h| {
            visited.push(**h);
            if let Some(&edit) = during.get(calls.get()) {
                apply(&list, &pool, edit);
            }
            calls.set(calls.get() + 1);
            Ok(())
        })
        .unwrap();

        prop_assert_eq!(visited, expected);
        prop_assert_eq!(order(&list), model.order());
    }
}
