use spincube_scene::{PerspectiveCamera, Scene};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads scene state and a camera, then draws into whatever
/// output surface it owns. It never mutates the scene.
pub trait SceneRenderer {
    /// Draw one frame of the given scene through the given camera.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera);

    /// Update the output surface size.
    fn resize(&mut self, width: u32, height: u32);

    /// Currently reported output size.
    fn size(&self) -> (u32, u32);
}

/// Debug text renderer: headless stand-in for the wgpu GPU backend.
///
/// Formats each frame as a human-readable string. Useful for CLI output,
/// logging, and driving the mount lifecycle in tests.
#[derive(Debug)]
pub struct DebugTextRenderer {
    width: u32,
    height: u32,
    frames: u64,
    last_frame: String,
}

impl DebugTextRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frames: 0,
            last_frame: String::new(),
        }
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The formatted output of the most recent frame.
    pub fn last_frame(&self) -> &str {
        &self.last_frame
    }
}

impl SceneRenderer for DebugTextRenderer {
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) {
        self.frames += 1;
        self.last_frame = format!(
            "frame={} size={}x{} aspect={:.3} rot=({:.3}, {:.3}) bg=({:.2}, {:.2}, {:.2})",
            self.frames,
            self.width,
            self.height,
            camera.aspect,
            scene.cube.rotation_x,
            scene.cube.rotation_y,
            scene.background.r,
            scene.background.g,
            scene.background.b,
        );
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_renderer_counts_frames() {
        let mut renderer = DebugTextRenderer::new(640, 480);
        let scene = Scene::new();
        let camera = PerspectiveCamera::with_viewport(640, 480);

        renderer.render(&scene, &camera);
        renderer.render(&scene, &camera);

        assert_eq!(renderer.frames(), 2);
        assert!(renderer.last_frame().contains("frame=2"));
        assert!(renderer.last_frame().contains("640x480"));
    }

    #[test]
    fn debug_renderer_reports_resize() {
        let mut renderer = DebugTextRenderer::new(640, 480);
        renderer.resize(800, 600);
        assert_eq!(renderer.size(), (800, 600));
    }

    #[test]
    fn debug_renderer_formats_rotation() {
        let mut renderer = DebugTextRenderer::new(100, 100);
        let mut scene = Scene::new();
        let camera = PerspectiveCamera::with_viewport(100, 100);
        scene.cube.spin();
        renderer.render(&scene, &camera);
        assert!(renderer.last_frame().contains("rot=(0.010, 0.010)"));
    }
}
