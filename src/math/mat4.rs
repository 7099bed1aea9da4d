//! 4x4 homogeneous transformation matrix using column-vector convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - Rotations are counter-clockwise about the axis when looking down it toward
//!   the origin (right-handed)
//!
//! [`Mat4::compose`] is the named form of the product: `compose(m, n) == m * n`,
//! so `n` is applied first. Scene-graph traversal uses it as `ctm' = compose(ctm, local)`.
//!
//! # Example
//! ```
//! use wirepipe::math::{Mat4, Vec3};
//!
//! let spin_then_move = Mat4::compose(&Mat4::translation(0.0, 0.0, -5.0), &Mat4::rotation_y(0.3));
//! let p = spin_then_move * Vec3::ZERO;
//! assert_eq!(p, Vec3::new(0.0, 0.0, -5.0));
//! ```

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]` with column-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about the X axis, angle in radians.
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about the Y axis, angle in radians.
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about the Z axis, angle in radians.
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation of `angle` radians about an arbitrary axis through the origin
    /// (Rodrigues' formula). A zero axis yields the identity.
    pub fn rotation(angle: f32, axis: Vec3) -> Self {
        if axis.magnitude() <= f32::EPSILON {
            return Mat4::identity();
        }
        let Vec3 { x, y, z } = axis.normalize();
        let (s, c) = angle.sin_cos();
        let k = 1.0 - c;
        Mat4::new([
            [x * x * k + c, x * y * k - z * s, x * z * k + y * s, 0.0],
            [y * x * k + z * s, y * y * k + c, y * z * k - x * s, 0.0],
            [z * x * k - y * s, z * y * k + x * s, z * z * k + c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Perspective normalization for the view frustum whose near rectangle is
    /// `[left, right] x [bottom, top]` at `z = -near`, with the eye looking down -z.
    ///
    /// Maps the frustum onto the canonical cube after the divide by `w = -z`:
    /// `z = -near` goes to -1 and `z = -far` to +1.
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let w = right - left;
        let h = top - bottom;
        let d = far - near;
        Mat4::new([
            [2.0 * near / w, 0.0, (right + left) / w, 0.0],
            [0.0, 2.0 * near / h, (top + bottom) / h, 0.0],
            [0.0, 0.0, -(far + near) / d, -2.0 * far * near / d],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Orthographic normalization for the box `[left, right] x [bottom, top] x [-far, -near]`.
    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let w = right - left;
        let h = top - bottom;
        let d = far - near;
        Mat4::new([
            [2.0 / w, 0.0, 0.0, -(right + left) / w],
            [0.0, 2.0 / h, 0.0, -(top + bottom) / h],
            [0.0, 0.0, -2.0 / d, -(far + near) / d],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a right-handed view matrix.
    ///
    /// # Arguments
    ///
    /// * `eye` - The position of the camera.
    /// * `target` - The point the camera is looking at; it ends up on the -z axis.
    /// * `up` - The approximate up direction of the camera.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let back = (eye - target).normalize();
        let right = up.cross(back).normalize();
        let up = back.cross(right);

        // Rows are the camera basis, last column moves the eye to the origin.
        Self::new([
            [right.x, right.y, right.z, -right.dot(eye)],
            [up.x, up.y, up.z, -up.dot(eye)],
            [back.x, back.y, back.z, -back.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// `m * n`: the transform that applies `n` first, then `m`.
    pub fn compose(m: &Mat4, n: &Mat4) -> Mat4 {
        *m * *n
    }

    /// Returns `self * Mat4::translation(x, y, z)`.
    pub fn translate(&self, x: f32, y: f32, z: f32) -> Self {
        *self * Mat4::translation(x, y, z)
    }

    /// Returns `self * Mat4::scaling(x, y, z)`.
    pub fn scale(&self, x: f32, y: f32, z: f32) -> Self {
        *self * Mat4::scaling(x, y, z)
    }

    /// Returns `self * Mat4::rotation(angle, axis)`.
    pub fn rotate(&self, angle: f32, axis: Vec3) -> Self {
        *self * Mat4::rotation(angle, axis)
    }

    pub fn transpose(&self) -> Self {
        let mut data = [[0.0f32; 4]; 4];
        for (row, values) in data.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[col][row];
            }
        }
        Mat4::new(data)
    }

    /// Applies the matrix to a point (w = 1) and drops the resulting w.
    ///
    /// Only meaningful for affine matrices; projective matrices go through
    /// `Mat4 * Vec4` and an explicit divide.
    pub fn transform_point(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::from(v)).to_vec3()
    }

    /// Largest absolute element-wise difference between two matrices.
    pub fn max_abs_diff(&self, other: &Mat4) -> f32 {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row][col] = value;
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = (0..4).map(|k| self.data[row][k] * rhs.data[k][col]).sum();
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: usize| Vec4::new(self.data[r][0], self.data[r][1], self.data[r][2], self.data[r][3]);
        Vec4::new(row(0).dot(v), row(1).dot(v), row(2).dot(v), row(3).dot(v))
    }
}

/// Transform a point: Mat4 * Vec3 (treats Vec3 as column vector with w=1).
///
/// Applies perspective division if w != 1.
impl Mul<Vec3> for Mat4 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        let h = self * Vec4::from(v);
        if h.w != 0.0 && h.w != 1.0 {
            h.to_vec3() * (1.0 / h.w)
        } else {
            h.to_vec3()
        }
    }
}
