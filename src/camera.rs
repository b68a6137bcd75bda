//! Pinhole camera: world <-> camera transform, pixel-plane projection and
//! unprojection, and primary-ray generation.

use crate::mat3::Mat3;
use crate::vec3::{Vec3f, Vec3i};

#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub center: Vec3f,
    /// World-to-camera rotation.
    pub rot: Mat3,
    pub focal_length: f32,
    pub plane_width: i32,
    pub plane_height: i32,
}

impl Camera {
    /// `fovx_deg`/`fovy_deg` determine the image-plane extent:
    /// `plane_dim = 2*f*tan(|fov|/2)`, truncated to an integer and used as
    /// both the world-space plane size and the rendered pixel resolution
    /// (Open Question 1 in SPEC_FULL.md: intentionally coupled).
    pub fn new(focal_length: f32, fovx_deg: f32, fovy_deg: f32, center: Vec3f, rot: Mat3) -> Self {
        let plane_width = (2.0 * focal_length * (fovx_deg.to_radians().abs() / 2.0).tan()) as i32;
        let plane_height = (2.0 * focal_length * (fovy_deg.to_radians().abs() / 2.0).tan()) as i32;
        Self {
            center,
            rot,
            focal_length,
            plane_width,
            plane_height,
        }
    }

    fn world_to_cam(&self, p: Vec3f) -> Vec3f {
        self.rot * (p - self.center)
    }

    /// Perspective projection of a world point onto the image plane;
    /// returns the truncated pixel coordinate and whether it lands within
    /// the visible frustum.
    pub fn project(&self, p_world: Vec3f) -> (Vec3i, bool) {
        let p_c = self.world_to_cam(p_world);
        if p_c.z <= 0.0 {
            return (Vec3i::new(0, 0, 0), false);
        }

        let u = (self.focal_length * p_c.x / p_c.z) as i32;
        let v = (self.focal_length * p_c.y / p_c.z) as i32;

        let visible = u >= -self.plane_width / 2
            && u < self.plane_width / 2
            && v >= -self.plane_height / 2
            && v < self.plane_height / 2;

        (Vec3i::new(u, v, 0), visible)
    }

    /// Maps a point on the image plane back to world space; the returned
    /// point lies on the plane `z = focal_length` in camera space.
    pub fn unproject(&self, plane_x: f32, plane_y: f32) -> Vec3f {
        let p_cam = Vec3f::new(plane_x, plane_y, self.focal_length);
        self.center + self.rot.transpose() * p_cam
    }

    /// The four corners of the image plane in world space, supplemental to
    /// spec.md (kept from the original source's `CornersWorld`).
    pub fn corners_world(&self) -> [Vec3f; 4] {
        let hw = self.plane_width as f32 / 2.0;
        let hh = self.plane_height as f32 / 2.0;
        [
            self.unproject(-hw, -hh),
            self.unproject(hw, -hh),
            self.unproject(-hw, hh),
            self.unproject(hw, hh),
        ]
    }

    /// Axis-aligned bounding box of the image plane corners in world space.
    pub fn aabb_world(&self) -> (Vec3f, Vec3f) {
        let corners = self.corners_world();
        let mut lo = corners[0];
        let mut hi = corners[0];
        for c in &corners[1..] {
            lo.x = lo.x.min(c.x);
            lo.y = lo.y.min(c.y);
            lo.z = lo.z.min(c.z);
            hi.x = hi.x.max(c.x);
            hi.y = hi.y.max(c.y);
            hi.z = hi.z.max(c.z);
        }
        (lo, hi)
    }

    pub fn translate(&mut self, delta: Vec3f) {
        self.center = self.center + delta;
    }

    pub fn rotate(&mut self, angle_x: f32, angle_y: f32, angle_z: f32) {
        self.rot = Mat3::from_euler(angle_x, angle_y, angle_z) * self.rot;
    }
}
