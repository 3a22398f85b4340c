//! Scene state for the spincube viewport.
//!
//! # Invariants
//! - Scene state never touches a window system, GPU, or clock.
//! - `Cube::spin` is the only rotation mutation; angles accumulate
//!   monotonically and never wrap.
//! - The camera is mutated only through `set_aspect`.

mod camera;
mod color;
mod cube;

pub use camera::PerspectiveCamera;
pub use color::Color;
pub use cube::{Cube, SPIN_STEP};

/// A container of renderables plus a background color.
///
/// Created once per mount; owns the cube for the mounted lifetime.
#[derive(Debug, Clone)]
pub struct Scene {
    pub background: Color,
    pub cube: Cube,
}

impl Scene {
    /// Black background, green cube.
    pub fn new() -> Self {
        Self {
            background: Color::BLACK,
            cube: Cube::new(),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

pub fn crate_info() -> &'static str {
    "spincube-scene v0.1.0"
}
