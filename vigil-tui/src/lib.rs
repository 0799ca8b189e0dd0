//! Vigil TUI library exports.

pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod geometry;
pub mod keys;
pub mod logging;
pub mod nav;
pub mod notifications;
pub mod pane;
pub mod persistence;
pub mod poller;
pub mod source;
pub mod state;
pub mod theme;
pub mod views;
pub mod widgets;
