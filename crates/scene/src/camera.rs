use glam::{Mat4, Vec3};

/// Perspective camera: position, look target, and projection parameters.
///
/// The aspect ratio is the only field mutated after construction; the resize
/// path owns that mutation. View and projection matrices are derived on
/// demand, so updating the aspect is the whole of a projection recompute.
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl PerspectiveCamera {
    /// Default camera with aspect ratio computed from viewport dimensions.
    /// Degenerate dimensions clamp to 1 so the projection stays finite.
    pub fn with_viewport(width: u32, height: u32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            ..Self::default()
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_looks_at_origin() {
        let cam = PerspectiveCamera::default();
        assert_eq!(cam.target, Vec3::ZERO);
        assert!(cam.eye.z > 0.0);
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn viewport_aspect() {
        let cam = PerspectiveCamera::with_viewport(800, 600);
        assert!((cam.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_viewport_clamps() {
        let cam = PerspectiveCamera::with_viewport(0, 600);
        assert!((cam.aspect - 1.0 / 600.0).abs() < 1e-6);
        assert!(!cam.view_projection().col(0).x.is_nan());
    }

    #[test]
    fn set_aspect_updates_projection() {
        let mut cam = PerspectiveCamera::default();
        let before = cam.projection_matrix();
        cam.set_aspect(2.0);
        let after = cam.projection_matrix();
        assert_ne!(before.col(0).x, after.col(0).x);
    }
}
