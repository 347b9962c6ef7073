//! Rendering adapter: renderer-agnostic frame interface.
//!
//! # Invariants
//! - Renderers never mutate the scene; a frame derives from scene and view.
//! - The view carries a finished view matrix; renderers do not re-derive
//!   camera state.
//!
//! # Workaround
//! Provides a trait-based renderer interface with a text frame renderer as a
//! workaround for a GPU backend. The trait is stable; swap in a GPU
//! implementation without changing consumers.

mod renderer;

pub use renderer::{RenderView, Renderer, TextFrameRenderer};

pub fn crate_info() -> &'static str {
    "skyway-render v0.1.0"
}
