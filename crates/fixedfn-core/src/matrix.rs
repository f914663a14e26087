// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the row-major `Mat3` and `Mat4` types and the inversion engine.

use super::{Vec3, Vec4, EPSILON};
use std::ops::{Add, Index, IndexMut, Mul};

// --- Mat3 ---

/// A 3x3 row-major matrix.
///
/// Its primary role is as the minor (cofactor submatrix) type of the 4x4
/// inversion engine; element `(r, c)` is accessed as `m[r][c]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// The rows of the matrix. `rows[0]` is the first row, and so on.
    pub rows: [Vec3; 3],
}

impl Mat3 {
    /// The 3x3 identity matrix.
    pub const IDENTITY: Self = Self {
        rows: [Vec3::X, Vec3::Y, Vec3::Z],
    };

    /// A 3x3 matrix with all elements set to 0.
    pub const ZERO: Self = Self {
        rows: [Vec3::ZERO; 3],
    };

    /// Creates a new matrix from three row vectors.
    #[inline]
    pub fn from_rows(r0: Vec3, r1: Vec3, r2: Vec3) -> Self {
        Self { rows: [r0, r1, r2] }
    }

    /// Computes the determinant by cofactor expansion along the first row,
    /// in single precision.
    ///
    /// See [`determinant_f64`](Self::determinant_f64) for the
    /// double-precision accumulation variant.
    #[inline]
    pub fn determinant(&self) -> f32 {
        let [r0, r1, r2] = self.rows;
        r0.x * (r1.y * r2.z - r1.z * r2.y) - r0.y * (r1.x * r2.z - r1.z * r2.x)
            + r0.z * (r1.x * r2.y - r1.y * r2.x)
    }

    /// Computes the determinant with double-precision intermediates.
    ///
    /// Intended as a test oracle; the pipeline itself stays in single
    /// precision.
    pub fn determinant_f64(&self) -> f64 {
        let a = self.rows[0].x as f64;
        let b = self.rows[0].y as f64;
        let c = self.rows[0].z as f64;
        let d = self.rows[1].x as f64;
        let e = self.rows[1].y as f64;
        let f = self.rows[1].z as f64;
        let g = self.rows[2].x as f64;
        let h = self.rows[2].y as f64;
        let i = self.rows[2].z as f64;

        a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
    }
}

impl Default for Mat3 {
    /// Returns the 3x3 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<usize> for Mat3 {
    type Output = Vec3;
    /// Allows accessing a matrix row by index.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}

impl IndexMut<usize> for Mat3 {
    /// Allows mutably accessing a matrix row by index.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.rows[index]
    }
}

// --- Mat4 ---

/// A 4x4 row-major matrix.
///
/// Element `(r, c)` is accessed as `m[r][c]`; the translation of an affine
/// transform occupies row 3, columns 0..2. Vectors are row vectors and
/// multiply on the left (`v * M`), so composed transforms apply left to
/// right: `v * (A * B)` applies `A` first.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat4 {
    /// The rows of the matrix. `rows[0]` is the first row, and so on.
    pub rows: [Vec4; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        rows: [
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        ],
    };

    /// A 4x4 matrix with all elements set to 0.
    pub const ZERO: Self = Self {
        rows: [Vec4::new(0.0, 0.0, 0.0, 0.0); 4],
    };

    /// Creates a new matrix from four row vectors.
    #[inline]
    pub fn from_rows(r0: Vec4, r1: Vec4, r2: Vec4, r3: Vec4) -> Self {
        Self {
            rows: [r0, r1, r2, r3],
        }
    }

    /// Returns a row of the matrix as a `Vec4`.
    #[inline]
    pub fn row(&self, index: usize) -> Vec4 {
        self.rows[index]
    }

    /// Returns a column of the matrix as a `Vec4`.
    #[inline]
    pub fn col(&self, index: usize) -> Vec4 {
        Vec4 {
            x: self.rows[0][index],
            y: self.rows[1][index],
            z: self.rows[2][index],
            w: self.rows[3][index],
        }
    }

    /// Creates a translation matrix. The translation occupies row 3.
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        let mut ret = Self::IDENTITY;
        ret.rows[3].x = v.x;
        ret.rows[3].y = v.y;
        ret.rows[3].z = v.z;
        ret
    }

    /// Creates a non-uniform scaling matrix.
    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        let mut ret = Self::IDENTITY;
        ret.rows[0].x = scale.x;
        ret.rows[1].y = scale.y;
        ret.rows[2].z = scale.z;
        ret
    }

    /// Returns `self` composed with a translation (applied after `self`).
    #[inline]
    pub fn translate(&self, translation: Vec3) -> Self {
        *self * Self::from_translation(translation)
    }

    /// Returns `self` composed with a non-uniform scale (applied after `self`).
    #[inline]
    pub fn scale(&self, scale: Vec3) -> Self {
        *self * Self::from_scale(scale)
    }

    /// Returns `self` composed with an Euler rotation.
    ///
    /// The rotation angles are in radians and are applied in the legacy
    /// fixed-function order: Z, then Y, then X.
    pub fn rotate(&self, rotation: Vec3) -> Self {
        let (sin_rz, cos_rz) = rotation.z.sin_cos();
        let mut rz = Self::IDENTITY;
        rz.rows[0].x = cos_rz;
        rz.rows[0].y = sin_rz;
        rz.rows[1].x = -sin_rz;
        rz.rows[1].y = cos_rz;
        let mut ret = *self * rz;

        let (sin_ry, cos_ry) = rotation.y.sin_cos();
        let mut ry = Self::IDENTITY;
        ry.rows[0].x = cos_ry;
        ry.rows[0].z = -sin_ry;
        ry.rows[2].x = sin_ry;
        ry.rows[2].z = cos_ry;
        ret = ret * ry;

        let (sin_rx, cos_rx) = rotation.x.sin_cos();
        let mut rx = Self::IDENTITY;
        rx.rows[1].y = cos_rx;
        rx.rows[1].z = sin_rx;
        rx.rows[2].y = -sin_rx;
        rx.rows[2].z = cos_rx;
        ret * rx
    }

    /// Returns the transpose of the matrix, where rows and columns are swapped.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_rows(self.col(0), self.col(1), self.col(2), self.col(3))
    }

    /// Computes the determinant by cofactor expansion along the first row,
    /// in single precision.
    ///
    /// See [`determinant_f64`](Self::determinant_f64) for the
    /// double-precision accumulation variant.
    pub fn determinant(&self) -> f32 {
        let [r0, r1, r2, r3] = self.rows;
        let (a, b, c, d) = (r0.x, r0.y, r0.z, r0.w);
        let (e, f, g, h) = (r1.x, r1.y, r1.z, r1.w);
        let (i, j, k, l) = (r2.x, r2.y, r2.z, r2.w);
        let (m, n, o, p) = (r3.x, r3.y, r3.z, r3.w);

        let kp_lo = k * p - l * o;
        let jp_ln = j * p - l * n;
        let jo_kn = j * o - k * n;
        let ip_lm = i * p - l * m;
        let io_km = i * o - k * m;
        let in_jm = i * n - j * m;

        a * (f * kp_lo - g * jp_ln + h * jo_kn) - b * (e * kp_lo - g * ip_lm + h * io_km)
            + c * (e * jp_ln - f * ip_lm + h * in_jm)
            - d * (e * jo_kn - f * io_km + g * in_jm)
    }

    /// Computes the determinant with double-precision intermediates.
    ///
    /// Intended as a test oracle; the pipeline itself stays in single
    /// precision.
    pub fn determinant_f64(&self) -> f64 {
        let a = self.rows[0].x as f64;
        let b = self.rows[0].y as f64;
        let c = self.rows[0].z as f64;
        let d = self.rows[0].w as f64;
        let e = self.rows[1].x as f64;
        let f = self.rows[1].y as f64;
        let g = self.rows[1].z as f64;
        let h = self.rows[1].w as f64;
        let i = self.rows[2].x as f64;
        let j = self.rows[2].y as f64;
        let k = self.rows[2].z as f64;
        let l = self.rows[2].w as f64;
        let m = self.rows[3].x as f64;
        let n = self.rows[3].y as f64;
        let o = self.rows[3].z as f64;
        let p = self.rows[3].w as f64;

        let kp_lo = k * p - l * o;
        let jp_ln = j * p - l * n;
        let jo_kn = j * o - k * n;
        let ip_lm = i * p - l * m;
        let io_km = i * o - k * m;
        let in_jm = i * n - j * m;

        a * (f * kp_lo - g * jp_ln + h * jo_kn) - b * (e * kp_lo - g * ip_lm + h * io_km)
            + c * (e * jp_ln - f * ip_lm + h * in_jm)
            - d * (e * jo_kn - f * io_km + g * in_jm)
    }

    /// Returns the 3x3 minor formed by deleting the given row and column.
    pub fn submatrix(&self, row: usize, column: usize) -> Mat3 {
        let mut ret = Mat3::ZERO;
        let mut out_row = 0;
        for r in 0..4 {
            if r == row {
                continue;
            }
            let mut out_col = 0;
            for c in 0..4 {
                if c == column {
                    continue;
                }
                match out_col {
                    0 => ret.rows[out_row].x = self.rows[r][c],
                    1 => ret.rows[out_row].y = self.rows[r][c],
                    _ => ret.rows[out_row].z = self.rows[r][c],
                }
                out_col += 1;
            }
            out_row += 1;
        }
        ret
    }

    /// Computes the adjoint (the transpose of the cofactor matrix).
    ///
    /// Output cell `(c, r)` receives the signed determinant of the minor at
    /// `(r, c)`, with the checkerboard sign starting positive at `(0, 0)`.
    pub fn adjoint(&self) -> Self {
        let mut ret = Self::ZERO;
        let mut sign = 1.0f32;
        for r in 0..4 {
            for c in 0..4 {
                ret.rows[c][r] = sign * self.submatrix(r, c).determinant();
                sign = -sign;
            }
            sign = -sign;
        }
        ret
    }

    /// Computes the inverse as `adjoint / determinant`.
    ///
    /// Returns `None` when the determinant's magnitude is below the default
    /// [`EPSILON`](crate::EPSILON); use
    /// [`inverse_with_epsilon`](Self::inverse_with_epsilon) to choose the
    /// threshold.
    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        self.inverse_with_epsilon(EPSILON)
    }

    /// Computes the inverse, treating any determinant with magnitude below
    /// `epsilon` as singular.
    pub fn inverse_with_epsilon(&self, epsilon: f32) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < epsilon {
            return None;
        }
        Some(self.adjoint() * (1.0 / det))
    }
}

// --- Operator Overloads ---

impl Default for Mat4 {
    /// Returns the 4x4 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Add for Mat4 {
    type Output = Self;
    /// Adds two matrices element-wise.
    fn add(self, rhs: Self) -> Self::Output {
        let mut ret = Self::ZERO;
        for r in 0..4 {
            for c in 0..4 {
                ret.rows[r][c] = self.rows[r][c] + rhs.rows[r][c];
            }
        }
        ret
    }
}

impl Mul<f32> for Mat4 {
    type Output = Self;
    /// Multiplies every element of the matrix by a scalar.
    fn mul(self, rhs: f32) -> Self::Output {
        let mut ret = Self::ZERO;
        for r in 0..4 {
            for c in 0..4 {
                ret.rows[r][c] = self.rows[r][c] * rhs;
            }
        }
        ret
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Self;
    /// Multiplies this matrix by another `Mat4`. Note that matrix multiplication is not commutative.
    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut ret = Self::ZERO;
        for r in 0..4 {
            for c in 0..4 {
                ret.rows[r][c] = self.rows[r][0] * rhs.rows[0][c]
                    + self.rows[r][1] * rhs.rows[1][c]
                    + self.rows[r][2] * rhs.rows[2][c]
                    + self.rows[r][3] * rhs.rows[3][c];
            }
        }
        ret
    }
}

impl Mul<Mat4> for Vec4 {
    type Output = Vec4;
    /// Transforms a row vector by a matrix (`v * M`), using all four
    /// components.
    #[inline]
    fn mul(self, m: Mat4) -> Self::Output {
        Vec4 {
            x: m.rows[0].x * self.x
                + m.rows[1].x * self.y
                + m.rows[2].x * self.z
                + m.rows[3].x * self.w,
            y: m.rows[0].y * self.x
                + m.rows[1].y * self.y
                + m.rows[2].y * self.z
                + m.rows[3].y * self.w,
            z: m.rows[0].z * self.x
                + m.rows[1].z * self.y
                + m.rows[2].z * self.z
                + m.rows[3].z * self.w,
            w: m.rows[0].w * self.x
                + m.rows[1].w * self.y
                + m.rows[2].w * self.z
                + m.rows[3].w * self.w,
        }
    }
}

impl Index<usize> for Mat4 {
    type Output = Vec4;
    /// Allows accessing a matrix row by index.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}

impl IndexMut<usize> for Mat4 {
    /// Allows mutably accessing a matrix row by index.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.rows[index]
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{approx_eq, PI};

    fn vec4_approx_eq(a: Vec4, b: Vec4) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z) && approx_eq(a.w, b.w)
    }

    fn mat4_approx_eq(a: Mat4, b: Mat4) -> bool {
        vec4_approx_eq(a.rows[0], b.rows[0])
            && vec4_approx_eq(a.rows[1], b.rows[1])
            && vec4_approx_eq(a.rows[2], b.rows[2])
            && vec4_approx_eq(a.rows[3], b.rows[3])
    }

    fn sample_matrix() -> Mat4 {
        Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
            .rotate(Vec3::new(0.0, PI / 4.0, PI / 6.0))
            .scale(Vec3::new(1.0, 2.0, 0.5))
    }

    #[test]
    fn test_identity() {
        assert_eq!(Mat4::default(), Mat4::IDENTITY);
        let m = sample_matrix();
        assert!(mat4_approx_eq(m * Mat4::IDENTITY, m));
        assert!(mat4_approx_eq(Mat4::IDENTITY * m, m));
    }

    #[test]
    fn test_translation_applies_in_bottom_row() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.rows[3], Vec4::new(1.0, 2.0, 3.0, 1.0));

        let p = Vec4::point(1.0, 1.0, 1.0);
        assert!(vec4_approx_eq(p * m, Vec4::point(2.0, 3.0, 4.0)));
    }

    #[test]
    fn test_scale() {
        let m = Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0));
        let p = Vec4::point(1.0, 1.0, 1.0);
        assert!(vec4_approx_eq(p * m, Vec4::point(2.0, 3.0, 4.0)));
    }

    #[test]
    fn test_rotate_z_quarter_turn() {
        let m = Mat4::IDENTITY.rotate(Vec3::new(0.0, 0.0, PI / 2.0));
        let p = Vec4::point(1.0, 0.0, 0.0);
        assert!(vec4_approx_eq(p * m, Vec4::point(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_rotation_preserves_length() {
        let m = Mat4::IDENTITY.rotate(Vec3::new(0.3, -1.1, 2.0));
        let p = Vec4::point(1.0, 2.0, -3.0);
        assert!(approx_eq((p * m).length(), p.length()));
        assert!(approx_eq(m.determinant(), 1.0));
    }

    #[test]
    fn test_mul_order_row_vector_convention() {
        let t = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let r = Mat4::IDENTITY.rotate(Vec3::new(0.0, 0.0, PI / 2.0));
        let p = Vec4::point(1.0, 0.0, 0.0);

        // v * (T * R): translate first, then rotate.
        assert!(vec4_approx_eq(p * (t * r), Vec4::point(0.0, 2.0, 0.0)));
        // v * (R * T): rotate first, then translate.
        assert!(vec4_approx_eq(p * (r * t), Vec4::point(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_transpose() {
        let m = Mat4::from_rows(
            Vec4::new(1.0, 2.0, 3.0, 4.0),
            Vec4::new(5.0, 6.0, 7.0, 8.0),
            Vec4::new(9.0, 10.0, 11.0, 12.0),
            Vec4::new(13.0, 14.0, 15.0, 16.0),
        );
        let mt = m.transpose();
        assert_eq!(mt.rows[0], Vec4::new(1.0, 5.0, 9.0, 13.0));
        assert_eq!(mt.rows[3], Vec4::new(4.0, 8.0, 12.0, 16.0));
        assert_eq!(mt.transpose(), m);
    }

    #[test]
    fn test_add_and_scalar_mul() {
        let m = Mat4::IDENTITY + Mat4::IDENTITY;
        assert_eq!(m, Mat4::IDENTITY * 2.0);
        assert!(approx_eq(m.rows[2].z, 2.0));
        assert!(approx_eq(m.rows[2].y, 0.0));
    }

    #[test]
    fn test_determinant() {
        assert!(approx_eq(Mat4::IDENTITY.determinant(), 1.0));
        assert!(approx_eq(Mat4::ZERO.determinant(), 0.0));
        assert!(approx_eq(
            Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0)).determinant(),
            24.0
        ));

        // A translation does not change volume.
        assert!(approx_eq(
            Mat4::from_translation(Vec3::new(7.0, -2.0, 9.0)).determinant(),
            1.0
        ));
    }

    #[test]
    fn test_determinant_f64_agrees() {
        let m = sample_matrix();
        let d32 = m.determinant() as f64;
        let d64 = m.determinant_f64();
        assert!((d32 - d64).abs() < 1e-4 * d64.abs().max(1.0));
    }

    #[test]
    fn test_mat3_determinant() {
        assert!(approx_eq(Mat3::IDENTITY.determinant(), 1.0));
        let m = Mat3::from_rows(
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
        );
        assert!(approx_eq(m.determinant(), 24.0));
        assert!((m.determinant_f64() - 24.0).abs() < 1e-9);

        let singular = Mat3::from_rows(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(2.0, 4.0, 6.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert!(approx_eq(singular.determinant(), 0.0));
    }

    #[test]
    fn test_submatrix() {
        let m = Mat4::from_rows(
            Vec4::new(1.0, 2.0, 3.0, 4.0),
            Vec4::new(5.0, 6.0, 7.0, 8.0),
            Vec4::new(9.0, 10.0, 11.0, 12.0),
            Vec4::new(13.0, 14.0, 15.0, 16.0),
        );
        let s = m.submatrix(1, 2);
        assert_eq!(s.rows[0], Vec3::new(1.0, 2.0, 4.0));
        assert_eq!(s.rows[1], Vec3::new(9.0, 10.0, 12.0));
        assert_eq!(s.rows[2], Vec3::new(13.0, 14.0, 16.0));
    }

    #[test]
    fn test_adjoint_identity_relation() {
        // M * adj(M) == det(M) * I for any square matrix.
        let m = sample_matrix();
        let expected = Mat4::IDENTITY * m.determinant();
        assert!(mat4_approx_eq(m * m.adjoint(), expected));

        assert_eq!(Mat4::IDENTITY.adjoint(), Mat4::IDENTITY);
    }

    #[test]
    fn test_inverse() {
        assert!(mat4_approx_eq(
            Mat4::IDENTITY.inverse().unwrap(),
            Mat4::IDENTITY
        ));

        let m = sample_matrix();
        let inv = m.inverse().expect("matrix should be invertible");
        assert!(mat4_approx_eq(m * inv, Mat4::IDENTITY));
        assert!(mat4_approx_eq(inv * m, Mat4::IDENTITY));

        let singular = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert!(singular.inverse().is_none());
    }

    #[test]
    fn test_inverse_with_epsilon() {
        let tiny = Mat4::from_scale(Vec3::new(0.01, 0.01, 0.01));
        // det == 1e-6, below the default threshold but valid with a tighter one.
        assert!(tiny.inverse().is_none());
        let inv = tiny
            .inverse_with_epsilon(1e-9)
            .expect("matrix should be invertible with a tighter epsilon");
        assert!(mat4_approx_eq(tiny * inv, Mat4::IDENTITY));
    }

    #[test]
    fn test_row_col_accessors() {
        let m = Mat4::from_rows(
            Vec4::new(1.0, 2.0, 3.0, 4.0),
            Vec4::new(5.0, 6.0, 7.0, 8.0),
            Vec4::new(9.0, 10.0, 11.0, 12.0),
            Vec4::new(13.0, 14.0, 15.0, 16.0),
        );
        assert_eq!(m.row(1), Vec4::new(5.0, 6.0, 7.0, 8.0));
        assert_eq!(m.col(1), Vec4::new(2.0, 6.0, 10.0, 14.0));
        assert_eq!(m[2][3], 12.0);
    }
}
