//! Scene graph for Skyway: named nodes with parent-relative transforms.
//!
//! # Invariants
//!
//! - A node's parent is always inserted before the node itself, so the node
//!   list is acyclic by construction and a single forward pass resolves
//!   every world transform.
//! - Node indices are stable: nodes are never removed or reordered.

mod graph;

pub use graph::{Node, SceneError, SceneGraph};

pub fn crate_info() -> &'static str {
    "skyway-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("skyway-scene"));
    }
}
