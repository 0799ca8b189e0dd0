//! Property-Based Tests for toolbar layout, confirmation and selection.
//!
//! Properties:
//! - `Never` items always overflow, `Always` items are always inline
//! - Relative order is preserved inside each partition
//! - Widening the toolbar never pushes an item into the overflow
//! - A confirmed request fires exactly once, a cancelled one never
//! - Toggling twice restores selection membership

use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use vigil_core::{
    compute_layout, ActionItem, Callback, ConfirmGate, Measure, ResourceId, SelectionSet,
    ToolbarMetrics, VisibilityPolicy,
};
use vigil_test_utils::generators::{arb_actions, arb_resource_id, arb_width};

const METRICS: ToolbarMetrics = ToolbarMetrics::new(3, 3);

fn is_strictly_increasing(indices: &[usize]) -> bool {
    indices.windows(2).all(|pair| pair[0] < pair[1])
}

proptest! {
    // ========================================================================
    // Placement invariants
    // ========================================================================

    #[test]
    fn policies_are_honoured(items in arb_actions(10), width in arb_width()) {
        let layout = compute_layout(&items, width, &METRICS);
        for (idx, item) in items.iter().enumerate() {
            match item.policy() {
                VisibilityPolicy::Always => prop_assert!(layout.inline.contains(&idx)),
                VisibilityPolicy::Never => prop_assert!(layout.overflow.contains(&idx)),
                VisibilityPolicy::IfRoom => {}
            }
        }
    }

    #[test]
    fn partitions_cover_every_item_once(items in arb_actions(10), width in arb_width()) {
        let layout = compute_layout(&items, width, &METRICS);
        let mut all: Vec<usize> = layout.inline.iter().chain(layout.overflow.iter()).copied().collect();
        all.sort_unstable();
        prop_assert_eq!(all, (0..items.len()).collect::<Vec<_>>());
    }

    #[test]
    fn order_is_preserved(items in arb_actions(10), width in arb_width()) {
        let layout = compute_layout(&items, width, &METRICS);
        prop_assert!(is_strictly_increasing(&layout.inline));
        prop_assert!(is_strictly_increasing(&layout.overflow));
    }

    #[test]
    fn widening_never_collapses(items in arb_actions(10), narrow in arb_width(), extra in 0u16..200) {
        let wide = narrow.saturating_add(extra);
        let before = compute_layout(&items, narrow, &METRICS);
        let after = compute_layout(&items, wide, &METRICS);
        for idx in &before.inline {
            prop_assert!(after.inline.contains(idx), "item {} collapsed when widening", idx);
        }
    }

    #[test]
    fn only_always_items_may_exceed_width(items in arb_actions(10), width in arb_width()) {
        let layout = compute_layout(&items, width, &METRICS);
        if layout.used_width > width {
            for idx in &layout.inline {
                prop_assert_eq!(items[*idx].policy(), VisibilityPolicy::Always);
            }
        }
    }

    #[test]
    fn affordance_width_only_with_overflow(items in arb_actions(10), width in arb_width()) {
        let layout = compute_layout(&items, width, &METRICS);
        let inline_width: u16 = layout
            .inline
            .iter()
            .map(|&idx| METRICS.action_width(items[idx].label()))
            .sum();
        let expected = if layout.has_overflow() {
            inline_width + METRICS.overflow_width()
        } else {
            inline_width
        };
        prop_assert_eq!(layout.used_width, expected);
    }

    // ========================================================================
    // Confirmation gate
    // ========================================================================

    #[test]
    fn gate_fires_once_per_confirmed_request(ops in prop::collection::vec(0u8..3, 0..40)) {
        let hits = Rc::new(Cell::new(0u32));
        let counter = hits.clone();
        let action = ActionItem::<()>::new("delete", "Delete…")
            .destructive()
            .on_activate(Callback::new(move |_: &()| counter.set(counter.get() + 1)));

        let mut gate = ConfirmGate::new();
        let mut open = false;
        let mut expected = 0u32;
        for op in ops {
            match op {
                0 => {
                    let accepted = gate.request(action.clone(), ());
                    prop_assert_eq!(accepted, !open);
                    open = true;
                }
                1 => {
                    if open {
                        expected += 1;
                    }
                    prop_assert_eq!(gate.confirm(), open);
                    open = false;
                }
                _ => {
                    prop_assert_eq!(gate.cancel(), open);
                    open = false;
                }
            }
            prop_assert_eq!(gate.is_open(), open);
        }
        prop_assert_eq!(hits.get(), expected);
    }

    // ========================================================================
    // Selection
    // ========================================================================

    #[test]
    fn toggle_is_an_involution(
        seeded in prop::collection::btree_set(arb_resource_id(), 0..10),
        id in arb_resource_id(),
    ) {
        let mut set = SelectionSet::new();
        for existing in &seeded {
            set.set_selected(existing, true);
        }
        let before = set.clone();
        set.toggle(&id);
        set.toggle(&id);
        prop_assert_eq!(set, before);
    }

    #[test]
    fn intersection_never_contains_absent_ids(
        selected in prop::collection::btree_set(arb_resource_id(), 0..10),
        current in prop::collection::vec(arb_resource_id(), 0..10),
    ) {
        let mut set = SelectionSet::new();
        for id in &selected {
            set.toggle(id);
        }
        let live = set.intersect(current.iter());
        for id in &live {
            prop_assert!(current.contains(id));
            prop_assert!(selected.contains(id));
        }
    }
}

// ============================================================================
// Scenarios
// ============================================================================

fn scenario_items() -> Vec<ActionItem<()>> {
    vec![
        ActionItem::new("a", "a").visibility(VisibilityPolicy::Always),
        ActionItem::new("b", "b").visibility(VisibilityPolicy::IfRoom),
        ActionItem::new("c", "c").visibility(VisibilityPolicy::Never),
    ]
}

fn ids(indices: &[usize], items: &[ActionItem<()>]) -> Vec<String> {
    indices.iter().map(|&idx| items[idx].id().to_string()).collect()
}

#[test]
fn scenario_ample_width() {
    let items = scenario_items();
    let layout = compute_layout(&items, 200, &METRICS);
    assert_eq!(ids(&layout.inline, &items), ["a", "b"]);
    assert_eq!(ids(&layout.overflow, &items), ["c"]);
}

#[test]
fn scenario_width_too_small_for_b() {
    let items = scenario_items();
    let layout = compute_layout(&items, 8, &METRICS);
    assert_eq!(ids(&layout.inline, &items), ["a"]);
    assert_eq!(ids(&layout.overflow, &items), ["b", "c"]);
}

#[test]
fn scenario_nothing_overflows() {
    let items = vec![
        ActionItem::<()>::new("a", "a").visibility(VisibilityPolicy::Always),
        ActionItem::<()>::new("b", "b").visibility(VisibilityPolicy::Always),
    ];
    let layout = compute_layout(&items, 8, &METRICS);
    assert!(!layout.has_overflow());
    assert_eq!(layout.used_width, 8);
}

#[test]
fn scenario_selected_row_deleted() {
    let mut set = SelectionSet::new();
    let r1 = ResourceId::from("r1");
    let r2 = ResourceId::from("r2");
    set.toggle(&r1);
    set.toggle(&r2);
    let remaining = [r2.clone()];
    let live = set.intersect(remaining.iter());
    assert!(!live.contains(&r1));
    assert!(live.contains(&r2));
}
