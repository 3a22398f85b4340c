//! Mount lifecycle: bind a rendering surface to a host container for as long
//! as that container exists.
//!
//! # Invariants
//! - At most one surface exists per mount; created on attach, fully released
//!   on detach.
//! - No frame callback survives detach: the frame gate is cancelled before
//!   anything else is torn down, and `frame()` checks it first.
//! - The resize event source is passed in explicitly; nothing here reaches
//!   into global state.
//! - Single control thread. Dispatch and frame callbacks run to completion;
//!   nothing overlaps.

mod events;
mod host;
mod mount;

pub use events::{ListenerId, ResizeBus};
pub use host::{HeadlessHost, SurfaceHost};
pub use mount::{FrameGate, SceneMount};

pub fn crate_info() -> &'static str {
    "spincube-mount v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("mount"));
    }
}
