//! Property-based tests for the canonical list and its derived view.
//!
//! Uses proptest to verify:
//! 1. Whitespace-only text never changes the list.
//! 2. Ids stay pairwise distinct under any operation sequence, even with a
//!    clock that never advances.
//! 3. The visible projection depends only on the final criteria, not on
//!    the order they were set in.
//! 4. Completing a task always removes it from the selection.
//! 5. Bulk actions always leave the selection empty.
//! 6. The projection is always a subset of the canonical list and agrees
//!    with the statistics.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use proptest::prelude::*;
use taskdeck::store::InMemoryStore;
use taskdeck::tasks::{IdSource, TaskList, TaskListController, TaskStats, ViewCriteria, derive};
use taskdeck_proto::task::{Priority, PriorityFilter, SortDirection, TaskId};

fn frozen() -> u64 {
    42
}

fn arb_priority() -> impl Strategy<Value = Priority> {
    prop::sample::select(Priority::ALL.to_vec())
}

fn arb_filter() -> impl Strategy<Value = PriorityFilter> {
    prop::sample::select(PriorityFilter::ALL.to_vec())
}

fn arb_sort() -> impl Strategy<Value = SortDirection> {
    prop_oneof![
        Just(SortDirection::Ascending),
        Just(SortDirection::Descending)
    ]
}

/// One user-level list operation. Index operands pick an existing task
/// modulo the list length.
#[derive(Debug, Clone)]
enum Op {
    Add(String, Priority),
    Delete(usize),
    ToggleComplete(usize),
    ToggleSelect(usize),
    BulkComplete,
    BulkDelete,
    Edit(usize, String),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => ("[a-z ]{0,12}", arb_priority()).prop_map(|(t, p)| Op::Add(t, p)),
        1 => any::<usize>().prop_map(Op::Delete),
        2 => any::<usize>().prop_map(Op::ToggleComplete),
        2 => any::<usize>().prop_map(Op::ToggleSelect),
        1 => Just(Op::BulkComplete),
        1 => Just(Op::BulkDelete),
        1 => (any::<usize>(), "[a-z ]{0,12}").prop_map(|(i, t)| Op::Edit(i, t)),
    ]
}

fn pick(list: &TaskList, index: usize) -> Option<TaskId> {
    if list.is_empty() {
        None
    } else {
        Some(list.tasks()[index % list.len()].id)
    }
}

fn apply(list: &mut TaskList, op: &Op) {
    match op {
        Op::Add(text, priority) => {
            list.add(text, *priority);
        }
        Op::Delete(i) => {
            if let Some(id) = pick(list, *i) {
                list.delete(id);
            }
        }
        Op::ToggleComplete(i) => {
            if let Some(id) = pick(list, *i) {
                list.toggle_complete(id);
            }
        }
        Op::ToggleSelect(i) => {
            if let Some(id) = pick(list, *i) {
                list.toggle_select(id);
            }
        }
        Op::BulkComplete => {
            list.bulk_complete();
        }
        Op::BulkDelete => {
            list.bulk_delete();
        }
        Op::Edit(i, text) => {
            if let Some(id) = pick(list, *i) {
                list.commit_edit(id, text);
            }
        }
    }
}

fn build(ops: &[Op]) -> TaskList {
    let mut list = TaskList::with_id_source(IdSource::with_clock(frozen));
    for op in ops {
        apply(&mut list, op);
    }
    list
}

proptest! {
    #[test]
    fn blank_text_is_rejected(
        ops in prop::collection::vec(arb_op(), 0..20),
        blank in "[ \t\n\r]{0,8}",
        priority in arb_priority(),
    ) {
        let mut list = build(&ops);
        let before = list.tasks().to_vec();
        prop_assert_eq!(list.add(&blank, priority), None);
        prop_assert_eq!(list.tasks(), before.as_slice());
    }

    #[test]
    fn ids_are_unique(ops in prop::collection::vec(arb_op(), 0..60)) {
        let list = build(&ops);
        let ids: HashSet<TaskId> = list.tasks().iter().map(|t| t.id).collect();
        prop_assert_eq!(ids.len(), list.len());
    }

    #[test]
    fn stored_text_is_trimmed_and_non_empty(ops in prop::collection::vec(arb_op(), 0..40)) {
        let list = build(&ops);
        for task in list.tasks() {
            prop_assert!(!task.text.is_empty());
            prop_assert_eq!(task.text.trim(), task.text.as_str());
        }
    }

    #[test]
    fn toggle_complete_deselects(
        ops in prop::collection::vec(arb_op(), 1..30),
        index in any::<usize>(),
        preselect in any::<bool>(),
    ) {
        let mut list = build(&ops);
        if let Some(id) = pick(&list, index) {
            if preselect != list.is_selected(id) {
                list.toggle_select(id);
            }
            list.toggle_complete(id);
            prop_assert!(!list.is_selected(id));
        }
    }

    #[test]
    fn bulk_actions_clear_selection(
        ops in prop::collection::vec(arb_op(), 0..40),
        delete in any::<bool>(),
    ) {
        let mut list = build(&ops);
        let selected: Vec<TaskId> = list.selection().iter().copied().collect();
        let before = list.len();
        if delete {
            let removed = list.bulk_delete();
            prop_assert_eq!(list.len(), before - removed);
            for id in &selected {
                prop_assert!(list.get(*id).is_none());
            }
        } else {
            list.bulk_complete();
            for id in &selected {
                prop_assert!(list.get(*id).unwrap().completed);
            }
        }
        prop_assert!(list.selection().is_empty());
    }

    #[test]
    fn criteria_order_does_not_matter(
        ops in prop::collection::vec(arb_op(), 0..30),
        filter in arb_filter(),
        search in "[a-z]{0,2}",
        sort in arb_sort(),
    ) {
        let list = build(&ops);
        let tasks = list.tasks().to_vec();
        let load = || {
            let store = InMemoryStore::new();
            let mut ctrl = TaskListController::load_with_ids(store, IdSource::with_clock(frozen));
            // Replay the built list through the controller in canonical order.
            for task in tasks.iter().rev() {
                let id = ctrl.add(&task.text, task.priority).unwrap();
                if task.completed {
                    ctrl.toggle_complete(id);
                }
            }
            ctrl
        };

        let mut a = load();
        a.set_filter(filter);
        a.set_search(&search);
        a.set_sort_direction(sort);

        let mut b = load();
        b.set_sort_direction(sort);
        b.set_search(&search);
        b.set_filter(filter);

        let mut c = load();
        c.set_search(&search);
        c.set_filter(filter);
        c.set_sort_direction(sort.toggled());
        c.toggle_sort_direction();

        let texts = |v: Vec<&taskdeck_proto::task::Task>| {
            v.into_iter().map(|t| (t.id, t.text.clone())).collect::<Vec<_>>()
        };
        let va = texts(a.visible());
        prop_assert_eq!(&va, &texts(b.visible()));
        prop_assert_eq!(&va, &texts(c.visible()));
    }

    #[test]
    fn projection_is_consistent_with_canonical_list(
        ops in prop::collection::vec(arb_op(), 0..40),
        filter in arb_filter(),
        sort in arb_sort(),
    ) {
        let list = build(&ops);
        let criteria = ViewCriteria {
            filter,
            search: String::new(),
            sort,
        };
        let visible = derive(list.tasks(), &criteria);
        let stats = TaskStats::from_tasks(list.tasks());

        prop_assert_eq!(visible.len(), stats.count(filter));
        for task in &visible {
            prop_assert!(list.get(task.id).is_some());
            prop_assert!(filter.matches(task.priority));
        }
        // Sorted by rank in the requested direction.
        let ranks: Vec<u8> = visible.iter().map(|t| t.priority.rank()).collect();
        let ok = match sort {
            SortDirection::Ascending => ranks.windows(2).all(|w| w[0] <= w[1]),
            SortDirection::Descending => ranks.windows(2).all(|w| w[0] >= w[1]),
        };
        prop_assert!(ok);
        prop_assert!(stats.progress() <= 100);
    }
}
