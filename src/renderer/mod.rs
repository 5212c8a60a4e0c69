//! Rendering module
//!
//! Draws the simulation onto a 2D canvas. Reads [`crate::sim::GameCore`]
//! through its accessors only.

pub mod palette;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
