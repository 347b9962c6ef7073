//! Input mapping: printable keys to high-level demo actions.
//!
//! # Invariants
//! - Consumers see actions, never raw key events.
//! - Waypoint stepping wraps modulo the waypoint count in both directions.

pub mod action;

pub use action::{Action, Keymap, step_waypoint};

pub fn crate_info() -> &'static str {
    "skyway-input v0.1.0"
}
