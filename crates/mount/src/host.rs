/// Host container that a mount attaches its rendering surface to.
///
/// A host holds at most one surface. `is_connected` reports whether the mount
/// point still exists; attaching to a disconnected host is silently skipped.
pub trait SurfaceHost {
    /// Whether the mount point still exists.
    fn is_connected(&self) -> bool;

    /// Append the rendering surface as a child of the container.
    fn attach_surface(&mut self);

    /// Remove the rendering surface from the container.
    fn detach_surface(&mut self);

    /// Whether the container currently holds the surface.
    fn has_surface(&self) -> bool;
}

/// In-memory host for headless runs and lifecycle tests.
#[derive(Debug)]
pub struct HeadlessHost {
    connected: bool,
    surface_attached: bool,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self {
            connected: true,
            surface_attached: false,
        }
    }

    /// Simulate the mount point disappearing (or reappearing).
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Number of children the container holds: 0 or 1.
    pub fn child_count(&self) -> usize {
        usize::from(self.surface_attached)
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceHost for HeadlessHost {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn attach_surface(&mut self) {
        self.surface_attached = true;
    }

    fn detach_surface(&mut self) {
        self.surface_attached = false;
    }

    fn has_surface(&self) -> bool {
        self.surface_attached
    }
}
