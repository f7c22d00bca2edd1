//! Camera and output-surface sizing.
//!
//! These types avoid referencing platform-specific APIs. The web frontend
//! feeds window resizes into [`Viewport::resize`] and uses the resulting
//! camera matrices and surface size each frame.

use crate::constants::*;
use glam::{Mat4, Vec3};

/// Right-handed camera with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            eye: CAMERA_EYE,
            target: CAMERA_TARGET,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_Y_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl PerspectiveCamera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space right and up axes of the image plane, used to orient
    /// billboards toward the viewer.
    pub fn billboard_axes(&self) -> (Vec3, Vec3) {
        let view = self.view_matrix();
        let right = Vec3::new(view.x_axis.x, view.y_axis.x, view.z_axis.x);
        let up = Vec3::new(view.x_axis.y, view.y_axis.y, view.z_axis.y);
        (right, up)
    }

    /// World-space quad extent that covers `size * (surface_height / 2) / depth`
    /// pixels at any depth, matching a screen-attenuated point sprite.
    pub fn attenuated_point_extent(&self, size: f32) -> f32 {
        size * (self.fovy_radians * 0.5).tan()
    }

    /// Distance from the eye along the viewing direction.
    pub fn view_depth(&self, world: Vec3) -> f32 {
        -self.view_matrix().transform_point3(world).z
    }
}

/// Output surface size in physical pixels, plus the camera whose aspect
/// tracks it.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    pub camera: PerspectiveCamera,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        let mut viewport = Self {
            width: 1,
            height: 1,
            camera: PerspectiveCamera::default(),
        };
        viewport.resize(width, height);
        viewport
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.camera.aspect
    }

    /// Apply a reported surface size. Returns `true` if anything changed.
    ///
    /// Zero-area sizes are ignored so a minimised window keeps its last
    /// projection.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        let aspect = width as f32 / height as f32;
        let changed = width != self.width || height != self.height || aspect != self.camera.aspect;
        self.width = width;
        self.height = height;
        self.camera.aspect = aspect;
        changed
    }
}

/// Backing-store size for a CSS box at the given device pixel ratio.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> (u32, u32) {
    let w = (css_width * device_pixel_ratio) as u32;
    let h = (css_height * device_pixel_ratio) as u32;
    (w.max(1), h.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_looks_down_negative_z_from_above_origin() {
        let cam = PerspectiveCamera::default();
        let (right, up) = cam.billboard_axes();
        assert!(right.abs_diff_eq(Vec3::X, 1e-6));
        assert!(up.abs_diff_eq(Vec3::Y, 1e-6));
        assert!((cam.view_depth(Vec3::new(0.0, 3.0, 0.0)) - 10.0).abs() < 1e-5);
        assert!(cam.view_depth(Vec3::new(0.0, 0.0, 2.0)) < cam.view_depth(Vec3::ZERO));
    }

    #[test]
    fn particle_extent_projects_like_attenuated_point() {
        let cam = PerspectiveCamera::default();
        let extent = cam.attenuated_point_extent(PARTICLE_SIZE);
        let surface_height = 960.0;
        let proj = cam.projection_matrix();
        for depth in [2.0_f32, 7.5, 10.0, 20.0] {
            let top = proj.project_point3(Vec3::new(0.0, extent * 0.5, -depth));
            let bottom = proj.project_point3(Vec3::new(0.0, -extent * 0.5, -depth));
            let pixels = (top.y - bottom.y) * surface_height * 0.5;
            let expected = PARTICLE_SIZE * (surface_height * 0.5) / depth;
            assert!(
                (pixels - expected).abs() < expected * 1e-4,
                "depth {depth}: {pixels} vs {expected}"
            );
        }
        // 60 degree field of view shrinks the extent below the nominal size
        assert!(extent < PARTICLE_SIZE * 0.6);
    }

    #[test]
    fn zero_area_resize_is_ignored() {
        let mut vp = Viewport::new(800, 400);
        assert!(!vp.resize(0, 300));
        assert_eq!(vp.size(), (800, 400));
        assert!((vp.aspect() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn backing_size_scales_and_clamps() {
        assert_eq!(backing_size(400.0, 300.0, 2.0), (800, 600));
        assert_eq!(backing_size(0.0, 0.0, 2.0), (1, 1));
    }
}
