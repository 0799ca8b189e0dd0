//! Reusable widget components.

pub mod confirm;
pub mod detail;
pub mod filter;
pub mod menu;
pub mod status;
pub mod toolbar;

pub use confirm::ConfirmDialog;
pub use detail::DetailPanel;
pub use filter::FilterBar;
pub use menu::OverflowPanel;
pub use status::{checkbox, status_span};
pub use toolbar::{ToolbarStrip, OVERFLOW_AFFORDANCE};
