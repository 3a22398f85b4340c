//! wgpu render backend for the spincube viewport.
//!
//! Draws the scene's single cube with a flat, unlit material into a surface
//! the renderer owns for the mounted lifetime.
//!
//! # Invariants
//! - The renderer never mutates scene state.
//! - Dropping the renderer releases every GPU resource it holds.
//! - Surface loss is handled by reconfiguring and skipping the frame, never
//!   by propagating an error out of the frame loop.

mod gpu;
mod shaders;

pub use gpu::WgpuSceneRenderer;
