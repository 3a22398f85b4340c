use crate::Color;
use glam::{EulerRot, Mat4, Quat};

/// Fixed angular increment applied to each rotation axis per frame, in radians.
pub const SPIN_STEP: f32 = 0.01;

/// The one mesh in the scene: a unit box with a flat-colored material,
/// spinning on two axes.
///
/// Rotation angles accumulate monotonically; they are never wrapped, since
/// rotation is angular and the model matrix is periodic in them anyway.
#[derive(Debug, Clone, Copy)]
pub struct Cube {
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub color: Color,
    step: f32,
}

impl Cube {
    /// Green cube at rest.
    pub fn new() -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            color: Color::from_hex(0x00ff00),
            step: SPIN_STEP,
        }
    }

    /// Advance both rotation angles by the fixed per-frame step.
    pub fn spin(&mut self) {
        self.rotation_x += self.step;
        self.rotation_y += self.step;
    }

    /// Model matrix for the current rotation (XYZ Euler order).
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_quat(Quat::from_euler(
            EulerRot::XYZ,
            self.rotation_x,
            self.rotation_y,
            0.0,
        ))
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_advances_both_axes_by_fixed_step() {
        let mut cube = Cube::new();
        cube.spin();
        assert!((cube.rotation_x - SPIN_STEP).abs() < 1e-7);
        assert!((cube.rotation_y - SPIN_STEP).abs() < 1e-7);
    }

    #[test]
    fn rotation_is_monotonic() {
        let mut cube = Cube::new();
        let mut prev = (cube.rotation_x, cube.rotation_y);
        for _ in 0..100 {
            cube.spin();
            assert!(cube.rotation_x >= prev.0);
            assert!(cube.rotation_y >= prev.1);
            prev = (cube.rotation_x, cube.rotation_y);
        }
    }

    #[test]
    fn model_matrix_identity_at_rest() {
        let cube = Cube::new();
        let m = cube.model_matrix();
        assert!((m.col(0).x - 1.0).abs() < 1e-6);
        assert!((m.col(3).w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn model_matrix_changes_after_spin() {
        let mut cube = Cube::new();
        let before = cube.model_matrix();
        for _ in 0..10 {
            cube.spin();
        }
        let after = cube.model_matrix();
        assert_ne!(before.col(0), after.col(0));
    }
}
