use glam::Mat4;

use crate::options::CameraOptions;

/// Perspective projection parameters for the viewport camera.
///
/// The camera's placement comes entirely from the
/// [`CameraRig`](crate::camera::rig::CameraRig); this struct only owns the
/// projection.
pub struct Camera {
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Create a camera for the given viewport size and options.
    #[must_use]
    pub fn new(width: u32, height: u32, options: &CameraOptions) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Update the aspect ratio for a resized viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Projection matrix (wgpu/Vulkan `[0, 1]` depth range).
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Combined view-projection matrix for the given view transform.
    #[must_use]
    pub fn build_matrix(&self, view: Mat4) -> Mat4 {
        self.build_projection() * view
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform holding the view-projection matrix and eye position.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a uniform with an identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            _pad: 0.0,
        }
    }

    /// Refresh from the camera projection and rig placement.
    pub fn update(
        &mut self,
        camera: &Camera,
        rig: &crate::camera::rig::CameraRig,
    ) {
        self.view_proj =
            camera.build_matrix(rig.view_matrix()).to_cols_array_2d();
        self.position = rig.eye().to_array();
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, Vec4};

    use super::*;
    use crate::camera::rig::CameraRig;

    #[test]
    fn resize_ignores_zero_dimensions() {
        let mut camera = Camera::new(600, 600, &CameraOptions::default());
        camera.resize(0, 0);
        assert_eq!(camera.aspect, 1.0);
        camera.resize(800, 400);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn projection_maps_view_space_origin_behind_near_plane() {
        let camera = Camera::new(600, 600, &CameraOptions::default());
        let proj = camera.build_projection();
        // A point just inside the near plane projects to w > 0.
        let p = proj * Vec4::new(0.0, 0.0, -1.0, 1.0);
        assert!(p.w > 0.0);
    }

    #[test]
    fn uniform_tracks_rig_eye() {
        let camera = Camera::new(600, 600, &CameraOptions::default());
        let rig = CameraRig::new();
        let mut uniform = CameraUniform::new();
        uniform.update(&camera, &rig);
        assert_eq!(Vec3::from_array(uniform.position), rig.eye());
    }
}
