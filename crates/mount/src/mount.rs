use crate::events::{ListenerId, ResizeBus};
use crate::host::SurfaceHost;
use spincube_render::SceneRenderer;
use spincube_scene::{PerspectiveCamera, Scene};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Explicit cancellation token for the frame loop.
///
/// Cancelled by detach, checked at the top of every frame callback. Once
/// cancelled it stays cancelled; a detached mount never renders again.
#[derive(Debug, Clone, Default)]
pub struct FrameGate(Rc<Cell<bool>>);

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Everything that lives exactly as long as the mount: the scene, the camera,
/// and the renderer. Shared with the resize listener registered on the bus.
struct ViewState<R> {
    scene: Scene,
    camera: PerspectiveCamera,
    renderer: R,
}

impl<R: SceneRenderer> ViewState<R> {
    fn apply_resize(&mut self, width: u32, height: u32) {
        // Degenerate dimensions clamp to 1 so the projection stays finite.
        let (w, h) = (width.max(1), height.max(1));
        self.renderer.resize(w, h);
        self.camera.set_aspect(w as f32 / h as f32);
        tracing::debug!(width = w, height = h, "viewport resized");
    }
}

/// Mount lifecycle controller.
///
/// Owns a scene, a camera, and a renderer for exactly as long as the mount
/// lives. Attach appends the rendering surface to the host and subscribes a
/// resize listener on the bus; detach reverses both, releases the scene and
/// renderer, and cancels the frame loop.
pub struct SceneMount<R: SceneRenderer> {
    state: Rc<RefCell<Option<ViewState<R>>>>,
    gate: FrameGate,
    listener: Option<ListenerId>,
    surface_attached: bool,
}

impl<R: SceneRenderer + 'static> SceneMount<R> {
    /// Mount a viewport: build the scene and camera, append the renderer's
    /// surface to the host, and subscribe to resize events.
    ///
    /// The renderer is expected to already be sized to `width` x `height`.
    /// If the host is no longer connected the surface is not appended, but
    /// the scene and frame loop still run.
    pub fn attach(
        host: &mut dyn SurfaceHost,
        bus: &mut ResizeBus,
        renderer: R,
        width: u32,
        height: u32,
    ) -> Self {
        let scene = Scene::new();
        let camera = PerspectiveCamera::with_viewport(width, height);

        let surface_attached = if host.is_connected() {
            host.attach_surface();
            true
        } else {
            tracing::warn!("mount point disconnected; surface not attached");
            false
        };

        let state = Rc::new(RefCell::new(Some(ViewState {
            scene,
            camera,
            renderer,
        })));

        let listener = {
            let state = Rc::clone(&state);
            bus.subscribe(Box::new(move |w, h| {
                if let Some(view) = state.borrow_mut().as_mut() {
                    view.apply_resize(w, h);
                }
            }))
        };

        tracing::info!(width, height, "viewport mounted");

        Self {
            state,
            gate: FrameGate::new(),
            listener: Some(listener),
            surface_attached,
        }
    }
}

impl<R: SceneRenderer> SceneMount<R> {
    /// One animation-loop step: spin the cube, render the scene through the
    /// camera.
    ///
    /// Returns true if the caller should reschedule for the next display
    /// frame, false once the mount has been cancelled or detached.
    pub fn frame(&mut self) -> bool {
        if self.gate.is_cancelled() {
            return false;
        }
        let mut guard = self.state.borrow_mut();
        let Some(view) = guard.as_mut() else {
            return false;
        };
        view.scene.cube.spin();
        let ViewState {
            scene,
            camera,
            renderer,
        } = view;
        renderer.render(scene, camera);
        true
    }

    /// Tear the mount down, in reverse order of acquisition. Idempotent.
    pub fn detach(&mut self, host: &mut dyn SurfaceHost, bus: &mut ResizeBus) {
        self.gate.cancel();

        if self.surface_attached {
            if host.is_connected() && host.has_surface() {
                host.detach_surface();
            }
            self.surface_attached = false;
        }

        // Dropping the view state releases the cube geometry and material
        // along with whatever GPU resources the renderer holds.
        if self.state.borrow_mut().take().is_some() {
            tracing::info!("viewport unmounted");
        }

        if let Some(id) = self.listener.take() {
            bus.unsubscribe(id);
        }
    }

    /// Whether the frame loop should keep being scheduled.
    pub fn is_running(&self) -> bool {
        !self.gate.is_cancelled() && self.state.borrow().is_some()
    }

    /// Handle to the cancellation token shared with the frame loop driver.
    pub fn gate(&self) -> FrameGate {
        self.gate.clone()
    }

    /// Whether the rendering surface is currently attached to the host.
    pub fn surface_attached(&self) -> bool {
        self.surface_attached
    }

    /// Current cube rotation angles, while mounted.
    pub fn rotation(&self) -> Option<(f32, f32)> {
        self.state
            .borrow()
            .as_ref()
            .map(|v| (v.scene.cube.rotation_x, v.scene.cube.rotation_y))
    }

    /// Current camera aspect ratio, while mounted.
    pub fn camera_aspect(&self) -> Option<f32> {
        self.state.borrow().as_ref().map(|v| v.camera.aspect)
    }

    /// The renderer's reported output size, while mounted.
    pub fn surface_size(&self) -> Option<(u32, u32)> {
        self.state.borrow().as_ref().map(|v| v.renderer.size())
    }

    /// Run a closure against the renderer, while mounted.
    pub fn with_renderer<T>(&self, f: impl FnOnce(&R) -> T) -> Option<T> {
        self.state.borrow().as_ref().map(|v| f(&v.renderer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessHost;
    use spincube_render::DebugTextRenderer;
    use spincube_scene::SPIN_STEP;

    fn mounted(
        width: u32,
        height: u32,
    ) -> (HeadlessHost, ResizeBus, SceneMount<DebugTextRenderer>) {
        let mut host = HeadlessHost::new();
        let mut bus = ResizeBus::new();
        let renderer = DebugTextRenderer::new(width, height);
        let mount = SceneMount::attach(&mut host, &mut bus, renderer, width, height);
        (host, bus, mount)
    }

    #[test]
    fn attach_appends_exactly_one_surface() {
        let (host, _bus, mount) = mounted(640, 480);
        assert_eq!(host.child_count(), 1);
        assert!(mount.surface_attached());
        assert!(mount.is_running());
    }

    #[test]
    fn attach_skips_disconnected_host() {
        let mut host = HeadlessHost::new();
        host.set_connected(false);
        let mut bus = ResizeBus::new();
        let renderer = DebugTextRenderer::new(640, 480);
        let mut mount = SceneMount::attach(&mut host, &mut bus, renderer, 640, 480);

        assert_eq!(host.child_count(), 0);
        assert!(!mount.surface_attached());
        // The frame loop still runs against the unattached surface.
        assert!(mount.frame());
    }

    #[test]
    fn resize_updates_renderer_and_camera() {
        let (_host, mut bus, mount) = mounted(640, 480);

        bus.dispatch(800, 600);

        assert_eq!(mount.surface_size(), Some((800, 600)));
        let aspect = mount.camera_aspect().unwrap();
        assert!((aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_resize_clamps_instead_of_panicking() {
        let (_host, mut bus, mount) = mounted(640, 480);

        bus.dispatch(0, 600);
        assert_eq!(mount.surface_size(), Some((1, 600)));

        bus.dispatch(800, 0);
        assert_eq!(mount.surface_size(), Some((800, 1)));

        bus.dispatch(0, 0);
        assert_eq!(mount.surface_size(), Some((1, 1)));
        assert_eq!(mount.camera_aspect(), Some(1.0));
    }

    #[test]
    fn ten_frames_accumulate_ten_steps() {
        let (_host, _bus, mut mount) = mounted(640, 480);

        for _ in 0..10 {
            assert!(mount.frame());
        }

        let (rx, ry) = mount.rotation().unwrap();
        assert!((rx - 10.0 * SPIN_STEP).abs() < 1e-5);
        assert!((ry - 10.0 * SPIN_STEP).abs() < 1e-5);
    }

    #[test]
    fn rotation_is_monotonic_across_frames() {
        let (_host, _bus, mut mount) = mounted(640, 480);

        let mut prev = mount.rotation().unwrap();
        for _ in 0..25 {
            mount.frame();
            let cur = mount.rotation().unwrap();
            assert!(cur.0 >= prev.0);
            assert!(cur.1 >= prev.1);
            prev = cur;
        }
    }

    #[test]
    fn detach_removes_surface_and_stops_frames() {
        let (mut host, mut bus, mut mount) = mounted(640, 480);

        mount.detach(&mut host, &mut bus);

        assert_eq!(host.child_count(), 0);
        assert!(!mount.is_running());
        assert!(!mount.frame());
        assert_eq!(mount.rotation(), None);
        assert_eq!(mount.surface_size(), None);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn detach_is_idempotent() {
        let (mut host, mut bus, mut mount) = mounted(640, 480);

        mount.detach(&mut host, &mut bus);
        mount.detach(&mut host, &mut bus);

        assert_eq!(host.child_count(), 0);
        assert!(!mount.is_running());
    }

    #[test]
    fn resize_after_detach_changes_nothing() {
        let (mut host, mut bus, mut mount) = mounted(640, 480);

        mount.detach(&mut host, &mut bus);
        bus.dispatch(1024, 768);

        assert_eq!(mount.surface_size(), None);
        assert_eq!(mount.camera_aspect(), None);
    }

    #[test]
    fn cancelled_gate_stops_frames_before_detach() {
        let (_host, _bus, mut mount) = mounted(640, 480);

        mount.gate().cancel();

        assert!(!mount.frame());
        assert!(!mount.is_running());
        // State is still held until detach runs; only the loop is stopped.
        assert!(mount.rotation().is_some());
    }

    #[test]
    fn frame_gate_stays_cancelled() {
        let gate = FrameGate::new();
        assert!(!gate.is_cancelled());
        gate.cancel();
        gate.cancel();
        assert!(gate.is_cancelled());

        let clone = gate.clone();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn detach_with_vanished_host_still_releases_state() {
        let (mut host, mut bus, mut mount) = mounted(640, 480);

        host.set_connected(false);
        mount.detach(&mut host, &mut bus);

        // The surface could not be removed from a vanished container, but
        // everything owned by the mount is still released.
        assert!(!mount.is_running());
        assert_eq!(mount.rotation(), None);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn frames_render_through_the_renderer() {
        let (_host, _bus, mut mount) = mounted(320, 240);

        mount.frame();
        mount.frame();
        mount.frame();

        let frames = mount.with_renderer(|r| r.frames()).unwrap();
        assert_eq!(frames, 3);
        let out = mount.with_renderer(|r| r.last_frame().to_string()).unwrap();
        assert!(out.contains("frame=3"));
    }
}
