//! Renderer-agnostic interface.
//!
//! # Invariants
//! - A renderer draws a (scene, camera) pair; it never owns scene state.
//! - `size()` reports whatever the last `resize` established.
//!
//! The debug text renderer keeps the mount lifecycle drivable without a GPU;
//! the wgpu backend implements the same trait without changing consumers.

mod renderer;

pub use renderer::{DebugTextRenderer, SceneRenderer};

pub fn crate_info() -> &'static str {
    "spincube-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
