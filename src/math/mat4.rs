//! 4x4 transformation matrix using column-vector convention.
//!
//! # Convention
//! - Points are **column vectors** on the right: `Mat4 * point`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - Rotations are right-handed and take radians
//!
//! # Example
//! ```ignore
//! let local = Mat4::translation(10.0, 0.0, 0.0) * Mat4::rotation_z(angle);
//! let world = local * vertex; // rotate about the local origin, then move
//! ```

use std::ops::Mul;

use super::vec3::Vec3;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f64; 4]; 4],
}

impl Mat4 {
    pub fn new(data: [[f64; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis.
    pub fn rotation_x(angle: f64) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis.
    pub fn rotation_y(angle: f64) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis.
    pub fn rotation_z(angle: f64) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Hermite basis. Multiplied into `[p0, p1, r0, r1]` it yields the
    /// coefficients `[a, b, c, d]` of `a·t³ + b·t² + c·t + d`.
    pub fn hermite() -> Self {
        Mat4::new([
            [2.0, -2.0, 1.0, 1.0],
            [-3.0, 3.0, -2.0, -1.0],
            [0.0, 0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
        ])
    }

    /// Bezier basis. Multiplied into `[p0, p1, p2, p3]` it yields the
    /// cubic coefficients `[a, b, c, d]`.
    pub fn bezier() -> Self {
        Mat4::new([
            [-1.0, 3.0, -3.0, 1.0],
            [3.0, -6.0, 3.0, 0.0],
            [-3.0, 3.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
        ])
    }

    /// Multiply a single homogeneous column: `self * column`.
    #[inline]
    pub fn apply(&self, column: [f64; 4]) -> [f64; 4] {
        let m = &self.data;
        let mut out = [0.0; 4];
        for (row, value) in out.iter_mut().enumerate() {
            *value = m[row][0] * column[0]
                + m[row][1] * column[1]
                + m[row][2] * column[2]
                + m[row][3] * column[3];
        }
        out
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row][col] = value;
    }

    /// Overwrite this matrix with the contents of `src`.
    pub fn copy_from(&mut self, src: &Mat4) {
        self.data = src.data;
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f64; 4]; 4];

        for (row, result_row) in result.iter_mut().enumerate() {
            for (col, value) in result_row.iter_mut().enumerate() {
                *value = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a point: Mat4 * Vec3 (treats Vec3 as column vector with w=1).
///
/// Only affine maps are built here, so no perspective divide is applied.
impl Mul<Vec3> for Mat4 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        let [x, y, z, _] = self.apply(v.to_homogeneous());
        Vec3::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn assert_mat_eq(a: &Mat4, b: &Mat4) {
        for row in 0..4 {
            for col in 0..4 {
                assert_relative_eq!(a.get(row, col), b.get(row, col), epsilon = 1e-9);
            }
        }
    }

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-9);
    }

    #[test]
    fn identity_is_neutral() {
        let m = Mat4::translation(1.0, -2.0, 3.0)
            * Mat4::rotation_y(0.7)
            * Mat4::scaling(2.0, 3.0, 4.0);
        assert_mat_eq(&(Mat4::identity() * m), &m);
        assert_mat_eq(&(m * Mat4::identity()), &m);
    }

    #[test]
    fn rotation_then_inverse_rotation_restores_point() {
        let p = Vec3::new(3.0, -1.5, 7.25);
        for theta in [0.0, FRAC_PI_4, FRAC_PI_2, PI] {
            let back_x = Mat4::rotation_x(-theta) * (Mat4::rotation_x(theta) * p);
            let back_y = Mat4::rotation_y(-theta) * (Mat4::rotation_y(theta) * p);
            let back_z = Mat4::rotation_z(-theta) * (Mat4::rotation_z(theta) * p);
            assert_vec_eq(back_x, p);
            assert_vec_eq(back_y, p);
            assert_vec_eq(back_z, p);
        }
    }

    #[test]
    fn rotations_are_right_handed() {
        assert_vec_eq(
            Mat4::rotation_z(FRAC_PI_2) * Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert_vec_eq(
            Mat4::rotation_x(FRAC_PI_2) * Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        assert_vec_eq(
            Mat4::rotation_y(FRAC_PI_2) * Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
        );
    }

    #[test]
    fn translation_moves_points_but_scaling_keeps_origin() {
        assert_vec_eq(
            Mat4::translation(1.0, 2.0, 3.0) * Vec3::ZERO,
            Vec3::new(1.0, 2.0, 3.0),
        );
        assert_vec_eq(Mat4::scaling(5.0, 5.0, 5.0) * Vec3::ZERO, Vec3::ZERO);
        assert_vec_eq(
            Mat4::scaling(2.0, 3.0, 4.0) * Vec3::ONE,
            Vec3::new(2.0, 3.0, 4.0),
        );
    }

    #[test]
    fn bezier_basis_reproduces_endpoints() {
        let coefs = Mat4::bezier().apply([0.0, 1.0, 2.0, 3.0]);
        // Evenly spaced control points give a straight ramp: 3t
        assert_relative_eq!(coefs[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(coefs[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(coefs[2], 3.0, epsilon = 1e-12);
        assert_relative_eq!(coefs[3], 0.0, epsilon = 1e-12);
    }
}
