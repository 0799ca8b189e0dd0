//! Live-refresh poller interface.
//!
//! The core owns no timer; it only renders the poller's state and forwards
//! start/stop requests.

use crate::action::{ActionItem, VisibilityPolicy};
use crate::callback::Callback;

pub const TOGGLE_POLLER: &str = "toggle-poller";

pub trait Poller {
    fn running(&self) -> bool;
    fn start(&mut self);
    fn stop(&mut self);

    fn toggle(&mut self) {
        if self.running() {
            self.stop();
        } else {
            self.start();
        }
    }
}

/// Toolbar action reflecting the poller state; always inline.
pub fn poller_action<P>(running: bool, on_toggle: Callback<P>) -> ActionItem<P> {
    let label = if running { "Pause updates" } else { "Live updates" };
    ActionItem::new(TOGGLE_POLLER, label)
        .visibility(VisibilityPolicy::Always)
        .shortcut('p')
        .on_activate(on_toggle)
}
