//! 3x3 rotation matrices built from Euler angles, stored as three row
//! vectors (mirrors `examples/original_source/src/math/mat3x3.hpp`).

use crate::vec3::Vec3f;
use std::ops::Mul;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3 {
    rows: [Vec3f; 3],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat3 {
    pub fn identity() -> Self {
        Self {
            rows: [
                Vec3f::new(1.0, 0.0, 0.0),
                Vec3f::new(0.0, 1.0, 0.0),
                Vec3f::new(0.0, 0.0, 1.0),
            ],
        }
    }

    pub fn from_rows(r0: Vec3f, r1: Vec3f, r2: Vec3f) -> Self {
        Self { rows: [r0, r1, r2] }
    }

    pub fn row(&self, i: usize) -> Vec3f {
        self.rows[i]
    }

    fn rotate_x(angle_rad: f32) -> Self {
        let (s, c) = angle_rad.sin_cos();
        Self::from_rows(
            Vec3f::new(1.0, 0.0, 0.0),
            Vec3f::new(0.0, c, -s),
            Vec3f::new(0.0, s, c),
        )
    }

    fn rotate_y(angle_rad: f32) -> Self {
        let (s, c) = angle_rad.sin_cos();
        Self::from_rows(
            Vec3f::new(c, 0.0, s),
            Vec3f::new(0.0, 1.0, 0.0),
            Vec3f::new(-s, 0.0, c),
        )
    }

    fn rotate_z(angle_rad: f32) -> Self {
        let (s, c) = angle_rad.sin_cos();
        Self::from_rows(
            Vec3f::new(c, -s, 0.0),
            Vec3f::new(s, c, 0.0),
            Vec3f::new(0.0, 0.0, 1.0),
        )
    }

    /// Builds a rotation matrix from Euler angles (radians), composing
    /// `Rx·Ry·Rz` by successively left-multiplying identity with `RotateZ`,
    /// then `RotateY`, then `RotateX` — the same order as the source this
    /// spec was distilled from.
    pub fn from_euler(angle_x: f32, angle_y: f32, angle_z: f32) -> Self {
        let m = Self::rotate_z(angle_z) * Self::identity();
        let m = Self::rotate_y(angle_y) * m;
        Self::rotate_x(angle_x) * m
    }

    pub fn transpose(&self) -> Self {
        Self::from_rows(
            Vec3f::new(self.rows[0].x, self.rows[1].x, self.rows[2].x),
            Vec3f::new(self.rows[0].y, self.rows[1].y, self.rows[2].y),
            Vec3f::new(self.rows[0].z, self.rows[1].z, self.rows[2].z),
        )
    }
}

impl Mul<Vec3f> for Mat3 {
    type Output = Vec3f;

    fn mul(self, v: Vec3f) -> Vec3f {
        Vec3f::new(self.rows[0].dot(&v), self.rows[1].dot(&v), self.rows[2].dot(&v))
    }
}

impl Mul<Mat3> for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Mat3 {
        let rhs_t = rhs.transpose();
        Mat3::from_rows(
            Vec3f::new(
                self.rows[0].dot(&rhs_t.rows[0]),
                self.rows[0].dot(&rhs_t.rows[1]),
                self.rows[0].dot(&rhs_t.rows[2]),
            ),
            Vec3f::new(
                self.rows[1].dot(&rhs_t.rows[0]),
                self.rows[1].dot(&rhs_t.rows[1]),
                self.rows[1].dot(&rhs_t.rows[2]),
            ),
            Vec3f::new(
                self.rows[2].dot(&rhs_t.rows[0]),
                self.rows[2].dot(&rhs_t.rows[1]),
                self.rows[2].dot(&rhs_t.rows[2]),
            ),
        )
    }
}
