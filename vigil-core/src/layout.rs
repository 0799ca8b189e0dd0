//! Inline/overflow placement for adaptive toolbars.
//!
//! `compute_layout` is a pure function of the item list and the available
//! width, so it can be exercised without a terminal.

use crate::action::{ActionItem, VisibilityPolicy};
use serde::{Deserialize, Serialize};

/// Width measurement supplied by the host.
pub trait Measure {
    /// Width an inline action with this label occupies, including spacing.
    fn action_width(&self, label: &str) -> u16;

    /// Width of the "open overflow menu" affordance.
    fn overflow_width(&self) -> u16;
}

/// Cell-based measurement: label length plus fixed padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarMetrics {
    pub item_padding: u16,
    pub overflow_width: u16,
}

impl ToolbarMetrics {
    pub const fn new(item_padding: u16, overflow_width: u16) -> Self {
        Self {
            item_padding,
            overflow_width,
        }
    }
}

impl Default for ToolbarMetrics {
    fn default() -> Self {
        // " label " plus a one-cell gap, and a "[…]" affordance.
        Self::new(3, 3)
    }
}

impl Measure for ToolbarMetrics {
    fn action_width(&self, label: &str) -> u16 {
        let len = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
        len.saturating_add(self.item_padding)
    }

    fn overflow_width(&self) -> u16 {
        self.overflow_width
    }
}

/// Placement decision, as indices into the item list it was computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolbarLayout {
    /// Inline items in original order.
    pub inline: Vec<usize>,
    /// Overflow items in original order.
    pub overflow: Vec<usize>,
    /// Cells consumed inline, including the affordance when it is shown.
    pub used_width: u16,
}

impl ToolbarLayout {
    /// The overflow affordance renders only when something was deferred.
    pub fn has_overflow(&self) -> bool {
        !self.overflow.is_empty()
    }

    pub fn is_inline(&self, index: usize) -> bool {
        self.inline.contains(&index)
    }

    pub fn inline_items<'a, P>(
        &'a self,
        items: &'a [ActionItem<P>],
    ) -> impl Iterator<Item = &'a ActionItem<P>> + 'a {
        self.inline.iter().filter_map(move |&idx| items.get(idx))
    }

    pub fn overflow_items<'a, P>(
        &'a self,
        items: &'a [ActionItem<P>],
    ) -> impl Iterator<Item = &'a ActionItem<P>> + 'a {
        self.overflow.iter().filter_map(move |&idx| items.get(idx))
    }
}

/// Decide which items render inline and which collapse into the overflow menu.
///
/// `Always` items are reserved first and never dropped, even past the
/// available width. `IfRoom` items are then admitted in order until the next
/// one would not fit; the affordance width is reserved only when at least one
/// item ends up in the overflow. `Never` items always overflow.
pub fn compute_layout<P, M>(items: &[ActionItem<P>], available_width: u16, measure: &M) -> ToolbarLayout
where
    M: Measure + ?Sized,
{
    let widths: Vec<u32> = items
        .iter()
        .map(|item| u32::from(measure.action_width(item.label())))
        .collect();
    let available = u32::from(available_width);

    let mut inline = vec![false; items.len()];
    let mut used: u32 = 0;
    let mut flexible = Vec::new();
    let mut has_never = false;

    for (idx, item) in items.iter().enumerate() {
        match item.policy() {
            VisibilityPolicy::Always => {
                inline[idx] = true;
                used += widths[idx];
            }
            VisibilityPolicy::Never => has_never = true,
            VisibilityPolicy::IfRoom => flexible.push(idx),
        }
    }

    let flexible_total: u32 = flexible.iter().map(|&idx| widths[idx]).sum();
    if !has_never && used + flexible_total <= available {
        for &idx in &flexible {
            inline[idx] = true;
        }
        used += flexible_total;
    } else {
        let budget = available.saturating_sub(u32::from(measure.overflow_width()));
        for &idx in &flexible {
            if used + widths[idx] > budget {
                break;
            }
            inline[idx] = true;
            used += widths[idx];
        }
    }

    let (inline_idx, overflow_idx): (Vec<usize>, Vec<usize>) =
        (0..items.len()).partition(|&idx| inline[idx]);

    if !overflow_idx.is_empty() {
        used += u32::from(measure.overflow_width());
    }

    ToolbarLayout {
        inline: inline_idx,
        overflow: overflow_idx,
        used_width: u16::try_from(used).unwrap_or(u16::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, policy: VisibilityPolicy) -> ActionItem<()> {
        ActionItem::new(id, id).visibility(policy)
    }

    fn ids(layout_idx: &[usize], items: &[ActionItem<()>]) -> Vec<String> {
        layout_idx.iter().map(|&i| items[i].id().to_string()).collect()
    }

    // Every label is one char, so each item is 4 cells and the affordance 3.
    const METRICS: ToolbarMetrics = ToolbarMetrics::new(3, 3);

    #[test]
    fn ample_width_keeps_if_room_inline() {
        let items = vec![
            item("a", VisibilityPolicy::Always),
            item("b", VisibilityPolicy::IfRoom),
            item("c", VisibilityPolicy::Never),
        ];
        let layout = compute_layout(&items, 80, &METRICS);
        assert_eq!(ids(&layout.inline, &items), ["a", "b"]);
        assert_eq!(ids(&layout.overflow, &items), ["c"]);
        assert_eq!(layout.used_width, 4 + 4 + 3);
    }

    #[test]
    fn narrow_width_collapses_if_room_first() {
        let items = vec![
            item("a", VisibilityPolicy::Always),
            item("b", VisibilityPolicy::IfRoom),
            item("c", VisibilityPolicy::Never),
        ];
        // a (4) + b (4) + affordance (3) = 11 does not fit in 10.
        let layout = compute_layout(&items, 10, &METRICS);
        assert_eq!(ids(&layout.inline, &items), ["a"]);
        assert_eq!(ids(&layout.overflow, &items), ["b", "c"]);
    }

    #[test]
    fn empty_overflow_reserves_no_affordance() {
        let items = vec![
            item("a", VisibilityPolicy::Always),
            item("b", VisibilityPolicy::IfRoom),
        ];
        // Exactly 8 cells: fits only because no affordance is reserved.
        let layout = compute_layout(&items, 8, &METRICS);
        assert!(!layout.has_overflow());
        assert_eq!(ids(&layout.inline, &items), ["a", "b"]);
        assert_eq!(layout.used_width, 8);
    }

    #[test]
    fn always_items_survive_zero_width() {
        let items = vec![
            item("a", VisibilityPolicy::Always),
            item("b", VisibilityPolicy::IfRoom),
            item("c", VisibilityPolicy::Always),
        ];
        let layout = compute_layout(&items, 0, &METRICS);
        assert_eq!(ids(&layout.inline, &items), ["a", "c"]);
        assert_eq!(ids(&layout.overflow, &items), ["b"]);
    }

    #[test]
    fn inline_follows_original_order_across_policies() {
        let items = vec![
            item("x", VisibilityPolicy::IfRoom),
            item("a", VisibilityPolicy::Always),
            item("y", VisibilityPolicy::IfRoom),
        ];
        let layout = compute_layout(&items, 80, &METRICS);
        assert_eq!(ids(&layout.inline, &items), ["x", "a", "y"]);
    }

    #[test]
    fn greedy_stops_at_first_item_that_does_not_fit() {
        let items = vec![
            ActionItem::<()>::new("long", "a very long label"),
            ActionItem::<()>::new("s", "s"),
        ];
        let layout = compute_layout(&items, 10, &METRICS);
        assert!(layout.inline.is_empty());
        assert_eq!(layout.overflow, vec![0, 1]);
    }
}
