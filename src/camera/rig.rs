//! Orbital camera rig: the single mutable camera state.
//!
//! The rig collapses the viewer's transform chain (orbit holder → pan
//! holder → roll-correction holder → camera translations) into plain
//! scalar fields, and maps that state to a camera-to-world matrix as a
//! pure function. Input handling lives in
//! [`InputProcessor`](crate::input::InputProcessor); the rig only stores
//! and clamps.

use glam::{Mat4, Vec3};

/// Initial orbit yaw in degrees.
pub const INITIAL_YAW: f32 = 320.0;
/// Initial orbit pitch in degrees.
pub const INITIAL_PITCH: f32 = 70.0;
/// Initial dolly offset along the camera's local forward axis.
pub const INITIAL_DOLLY: f32 = -450.0;
/// Closest the lens translation may get (most negative Z).
pub const LENS_MIN: f32 = -1000.0;
/// Farthest the lens translation may get.
pub const LENS_MAX: f32 = 0.0;

/// Clamped orbital camera state.
///
/// Apparent camera distance is split across two stacked translations
/// driven by different input channels: `dolly_z` (unclamped, moved by
/// secondary-button drags) and `lens_z` (clamped to
/// [`LENS_MIN`]..=[`LENS_MAX`], moved by scroll and pinch). The clamp is
/// enforced inside every `lens_z` write path, so the invariant holds
/// after any sequence of mutations.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    yaw: f32,
    pitch: f32,
    pan_x: f32,
    pan_y: f32,
    dolly_z: f32,
    lens_z: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraRig {
    /// Create a rig at the initial viewing angles and dolly offset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            yaw: INITIAL_YAW,
            pitch: INITIAL_PITCH,
            pan_x: 0.0,
            pan_y: 0.0,
            dolly_z: INITIAL_DOLLY,
            lens_z: 0.0,
        }
    }

    /// Current orbit yaw in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current orbit pitch in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current pan offset of the orbit pivot.
    #[must_use]
    pub fn pan(&self) -> (f32, f32) {
        (self.pan_x, self.pan_y)
    }

    /// Current unclamped dolly translation.
    #[must_use]
    pub fn dolly_z(&self) -> f32 {
        self.dolly_z
    }

    /// Current clamped lens translation.
    #[must_use]
    pub fn lens_z(&self) -> f32 {
        self.lens_z
    }

    /// Revolve the camera around the pivot. Angles are unclamped; full
    /// revolutions are allowed.
    pub fn orbit_by(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch += delta_pitch;
    }

    /// Shift the orbit pivot laterally and vertically.
    pub fn pan_by(&mut self, delta_x: f32, delta_y: f32) {
        self.pan_x += delta_x;
        self.pan_y += delta_y;
    }

    /// Move the camera along its local forward axis (unclamped).
    pub fn dolly_by(&mut self, delta_z: f32) {
        self.dolly_z += delta_z;
    }

    /// Set the lens translation, clamping into [`LENS_MIN`]..=[`LENS_MAX`].
    pub fn set_lens_z(&mut self, z: f32) {
        self.lens_z = z.clamp(LENS_MIN, LENS_MAX);
    }

    /// Offset the lens translation, clamping the result.
    pub fn lens_by(&mut self, delta_z: f32) {
        self.set_lens_z(self.lens_z + delta_z);
    }

    /// Restore pan to the origin and yaw/pitch to the initial angles.
    ///
    /// Dolly and lens translations are deliberately left untouched, so a
    /// reset re-aims the camera without changing its distance.
    pub fn reset(&mut self) {
        self.pan_x = 0.0;
        self.pan_y = 0.0;
        self.yaw = INITIAL_YAW;
        self.pitch = INITIAL_PITCH;
    }

    /// The observable clamped camera translation `(0, 0, lens_z)`.
    ///
    /// Status overlays read this; only Z is ever driven by input.
    #[must_use]
    pub fn lens_translation(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.lens_z)
    }

    /// Build the camera-to-world matrix from the current state.
    ///
    /// The product mirrors the rig chain: yaw/pitch orbit holder, pan
    /// holder, a fixed 180° roll correction, then the stacked dolly and
    /// lens translations.
    #[must_use]
    pub fn camera_to_world(&self) -> Mat4 {
        Mat4::from_rotation_y(self.yaw.to_radians())
            * Mat4::from_rotation_x(self.pitch.to_radians())
            * Mat4::from_translation(Vec3::new(self.pan_x, self.pan_y, 0.0))
            * Mat4::from_rotation_z(180f32.to_radians())
            * Mat4::from_translation(Vec3::new(
                0.0,
                0.0,
                self.dolly_z + self.lens_z,
            ))
    }

    /// World-to-camera (view) matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.camera_to_world().inverse()
    }

    /// Camera position in world space.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.camera_to_world().transform_point3(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_initial_angles() {
        let rig = CameraRig::new();
        assert_eq!(rig.yaw(), 320.0);
        assert_eq!(rig.pitch(), 70.0);
        assert_eq!(rig.dolly_z(), -450.0);
        assert_eq!(rig.lens_z(), 0.0);
        assert_eq!(rig.pan(), (0.0, 0.0));
    }

    #[test]
    fn lens_clamps_on_every_write() {
        let mut rig = CameraRig::new();
        rig.set_lens_z(-5000.0);
        assert_eq!(rig.lens_z(), -1000.0);
        rig.set_lens_z(250.0);
        assert_eq!(rig.lens_z(), 0.0);
        rig.lens_by(-999.0);
        rig.lens_by(-999.0);
        assert_eq!(rig.lens_z(), -1000.0);
        rig.lens_by(2500.0);
        assert_eq!(rig.lens_z(), 0.0);
    }

    #[test]
    fn reset_restores_aim_but_not_distance() {
        let mut rig = CameraRig::new();
        rig.orbit_by(45.0, -30.0);
        rig.pan_by(12.0, -7.5);
        rig.dolly_by(100.0);
        rig.set_lens_z(-200.0);

        rig.reset();

        assert_eq!(rig.yaw(), INITIAL_YAW);
        assert_eq!(rig.pitch(), INITIAL_PITCH);
        assert_eq!(rig.pan(), (0.0, 0.0));
        assert_eq!(rig.dolly_z(), -350.0);
        assert_eq!(rig.lens_z(), -200.0);
    }

    #[test]
    fn dolly_is_unclamped() {
        let mut rig = CameraRig::new();
        rig.dolly_by(-10_000.0);
        assert_eq!(rig.dolly_z(), -10_450.0);
    }

    #[test]
    fn eye_distance_tracks_stacked_translations() {
        let mut rig = CameraRig::new();
        rig.reset();
        // With no pan, the eye sits |dolly + lens| from the origin.
        rig.set_lens_z(-50.0);
        let eye = rig.eye();
        assert!((eye.length() - 500.0).abs() < 1e-3);
    }

    #[test]
    fn view_matrix_inverts_camera_to_world() {
        let mut rig = CameraRig::new();
        rig.orbit_by(13.0, -7.0);
        rig.pan_by(3.0, 4.0);
        let product = rig.camera_to_world() * rig.view_matrix();
        let identity = Mat4::IDENTITY;
        for (a, b) in product
            .to_cols_array()
            .iter()
            .zip(identity.to_cols_array().iter())
        {
            assert!((a - b).abs() < 1e-4);
        }
    }
}
