//! VIGIL Core - Adaptive Action Toolbar & Batch Selection
//!
//! Terminal-independent state for the dashboard lists: which rows are
//! selected, which contextual actions fit inline, and which destructive
//! actions are waiting for confirmation. Nothing in this crate paints cells
//! or talks to the network.

pub mod action;
pub mod callback;
pub mod gate;
pub mod layout;
pub mod list;
pub mod list_toolbar;
pub mod menu;
pub mod poller;
pub mod resource;
pub mod row;
pub mod selection;
pub mod toolbar;

pub use action::{ActionItem, VisibilityPolicy};
pub use callback::Callback;
pub use gate::{ConfirmGate, ConfirmPrompt, GateState, PendingAction};
pub use layout::{compute_layout, Measure, ToolbarLayout, ToolbarMetrics};
pub use list::{bulk_actions, BulkCallbacks, ListView};
pub use list_toolbar::ListToolbar;
pub use menu::{MenuHandle, OverflowMenu};
pub use poller::{poller_action, Poller};
pub use resource::{
    CheckStatus, Entity, EntityRef, EntitySystem, Event, EventCheck, Resource, ResourceId,
    Silence, Timestamp,
};
pub use row::{row_actions, RowCallbacks, SelectableRow, SelectionChange};
pub use selection::{HeaderState, SelectedIds, SelectionSet, SelectionView};
pub use toolbar::{Activation, AdaptiveToolbar};
