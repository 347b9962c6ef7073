//! Shared types: the spatial transform every skyway crate speaks.
//!
//! # Invariants
//! - `Transform::default()` is the identity pose.
//! - Matrix round-trips recover position, rotation and scale for any
//!   shear-free pose.

pub mod types;

pub use types::Transform;
