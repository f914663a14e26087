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

//! Provides the 3D and homogeneous 4D vector types and their operations.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::EPSILON;
use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

// --- Vec3 ---

/// A 3-dimensional vector with `f32` components.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Vec3 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
    /// The z component of the vector.
    pub z: f32,
}

impl Vec3 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    /// The unit vector pointing along the positive X-axis.
    pub const X: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    /// The unit vector pointing along the positive Y-axis.
    pub const Y: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// The unit vector pointing along the positive Z-axis.
    pub const Z: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Creates a new `Vec3` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Calculates the squared length (magnitude) of the vector.
    /// This is faster than `length()` as it avoids a square root.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Calculates the length (magnitude) of the vector.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns a normalized version of the vector with a length of 1.
    /// If the vector's length is near zero, it returns `Vec3::ZERO`.
    #[inline]
    pub fn normalize(&self) -> Self {
        let len_sq = self.length_squared();
        if len_sq > EPSILON * EPSILON {
            *self * (1.0 / len_sq.sqrt())
        } else {
            Self::ZERO
        }
    }

    /// Calculates the dot product of this vector and another.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Computes the cross product of this vector and another.
    #[inline]
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Extends this vector into a homogeneous [`Vec4`] with the given `w`.
    #[inline]
    pub fn extend(&self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }
}

// --- Operator Overloads ---

impl Add for Vec3 {
    type Output = Self;
    /// Adds two vectors component-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;
    /// Subtracts two vectors component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    /// Multiplies the vector by a scalar.
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;
    /// Multiplies a scalar by a vector.
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        rhs * self
    }
}

impl Neg for Vec3 {
    type Output = Self;
    /// Negates the vector.
    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

// --- Vec4 ---

/// A homogeneous 4-component vector with `f32` components.
///
/// This is the working type of the transform pipeline. By the legacy vertex
/// convention, points carry `w == 1`, and the elementary operations
/// ([`dot`](Self::dot), [`cross`](Self::cross), [`length`](Self::length),
/// [`normalize`](Self::normalize), `+`, `-`, scalar `*`) act on the xyz part
/// only. The full 4-component product only appears when a vector is
/// multiplied against a [`Mat4`](crate::Mat4).
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Vec4 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
    /// The z component of the vector.
    pub z: f32,
    /// The homogeneous w component. `1.0` for points.
    pub w: f32,
}

impl Vec4 {
    /// The homogeneous origin `(0, 0, 0, 1)`.
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Creates a new `Vec4` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a homogeneous point from three coordinates, with `w == 1`.
    #[inline]
    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    /// Creates a `Vec4` from a [`Vec3`] and an explicit `w`.
    #[inline]
    pub fn from_vec3(v: Vec3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Returns the xyz part as a [`Vec3`], discarding `w`.
    #[inline]
    pub fn truncate(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Calculates the dot product of the xyz parts of two vectors.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Computes the cross product of the xyz parts. The result has `w == 1`.
    #[inline]
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
            w: 1.0,
        }
    }

    /// Calculates the squared length of the xyz part.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Calculates the length of the xyz part.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns a copy with the xyz part normalized to length 1; `w` is kept.
    /// If the xyz length is near zero, returns [`Vec4::ORIGIN`].
    #[inline]
    pub fn normalize(&self) -> Self {
        let len_sq = self.length_squared();
        if len_sq > EPSILON * EPSILON {
            let inv_len = 1.0 / len_sq.sqrt();
            Self {
                x: self.x * inv_len,
                y: self.y * inv_len,
                z: self.z * inv_len,
                w: self.w,
            }
        } else {
            Self::ORIGIN
        }
    }

    /// Performs the homogeneous (perspective) divide, recovering a Euclidean
    /// point with `w == 1`.
    ///
    /// An input with `w == INFINITY` maps to an all-infinite point, matching
    /// the legacy kernel's special case. An input with `w == 0` produces
    /// infinities; fallible callers should use the
    /// [`pipeline`](crate::pipeline) surface instead.
    #[inline]
    pub fn euclidean(&self) -> Self {
        if self.w == f32::INFINITY {
            Self {
                x: f32::INFINITY,
                y: f32::INFINITY,
                z: f32::INFINITY,
                w: 1.0,
            }
        } else {
            Self {
                x: self.x / self.w,
                y: self.y / self.w,
                z: self.z / self.w,
                w: 1.0,
            }
        }
    }
}

// --- Operator Overloads ---

impl Default for Vec4 {
    /// Returns the homogeneous origin `(0, 0, 0, 1)`.
    #[inline]
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add for Vec4 {
    type Output = Self;
    /// Adds the xyz parts; the result has `w == 1`.
    ///
    /// Both operands are expected to carry `w == 1` (legacy vertex
    /// convention, checked in debug builds only).
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.w, 1.0);
        debug_assert_eq!(rhs.w, 1.0);
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
            w: 1.0,
        }
    }
}

impl Sub for Vec4 {
    type Output = Self;
    /// Subtracts the xyz parts; the result has `w == 1`.
    ///
    /// Both operands are expected to carry `w == 1` (legacy vertex
    /// convention, checked in debug builds only).
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.w, 1.0);
        debug_assert_eq!(rhs.w, 1.0);
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
            w: 1.0,
        }
    }
}

impl Mul<f32> for Vec4 {
    type Output = Self;
    /// Scales the xyz part by a scalar; `w` is kept unchanged.
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
            w: self.w,
        }
    }
}

impl Index<usize> for Vec4 {
    type Output = f32;
    /// Allows accessing a vector component by index (`v[0]` .. `v[3]`).
    ///
    /// # Panics
    /// Panics if `index` is not in `0..4`.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Index out of bounds for Vec4"),
        }
    }
}

impl IndexMut<usize> for Vec4 {
    /// Allows mutably accessing a vector component by index (`v[0] = ...`).
    ///
    /// # Panics
    /// Panics if `index` is not in `0..4`.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Index out of bounds for Vec4"),
        }
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approx_eq;

    fn vec4_approx_eq(a: Vec4, b: Vec4) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z) && approx_eq(a.w, b.w)
    }

    #[test]
    fn test_vec3_dot_cross() {
        assert_eq!(Vec3::X.dot(Vec3::Y), 0.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(Vec3::X), -Vec3::Z);

        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-4.0, 5.0, 6.0);
        assert!(approx_eq(a.dot(b), -4.0 + 10.0 + 18.0));
    }

    #[test]
    fn test_vec3_normalize() {
        let v = Vec3::new(3.0, 0.0, 4.0).normalize();
        assert!(approx_eq(v.length(), 1.0));
        assert!(approx_eq(v.x, 0.6));
        assert!(approx_eq(v.z, 0.8));

        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    }

    #[test]
    fn test_vec4_add_sub_keeps_homogeneous_w() {
        let a = Vec4::point(1.0, 2.0, 3.0);
        let b = Vec4::point(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec4::point(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec4::point(3.0, 3.0, 3.0));
    }

    #[test]
    fn test_vec4_dot_ignores_w() {
        let a = Vec4::new(1.0, 2.0, 3.0, 100.0);
        let b = Vec4::new(4.0, 5.0, 6.0, -100.0);
        assert!(approx_eq(a.dot(b), 32.0));
    }

    #[test]
    fn test_vec4_cross() {
        let x = Vec4::point(1.0, 0.0, 0.0);
        let y = Vec4::point(0.0, 1.0, 0.0);
        assert!(vec4_approx_eq(x.cross(y), Vec4::point(0.0, 0.0, 1.0)));
        assert!(vec4_approx_eq(y.cross(x), Vec4::point(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_vec4_normalize() {
        let v = Vec4::point(0.0, 3.0, 4.0).normalize();
        assert!(approx_eq(v.length(), 1.0));
        assert!(approx_eq(v.y, 0.6));
        assert!(approx_eq(v.z, 0.8));
        assert_eq!(v.w, 1.0);

        // Degenerate input collapses to the homogeneous origin.
        assert_eq!(Vec4::new(0.0, 0.0, 0.0, 5.0).normalize(), Vec4::ORIGIN);
    }

    #[test]
    fn test_vec4_euclidean() {
        let v = Vec4::new(2.0, 4.0, 6.0, 2.0).euclidean();
        assert!(vec4_approx_eq(v, Vec4::point(1.0, 2.0, 3.0)));

        let inf = Vec4::new(1.0, 1.0, 1.0, f32::INFINITY).euclidean();
        assert_eq!(inf.x, f32::INFINITY);
        assert_eq!(inf.y, f32::INFINITY);
        assert_eq!(inf.z, f32::INFINITY);
        assert_eq!(inf.w, 1.0);
    }

    #[test]
    fn test_vec4_scalar_mul_keeps_w() {
        let v = Vec4::new(1.0, -2.0, 3.0, 1.0) * 2.0;
        assert_eq!(v, Vec4::new(2.0, -4.0, 6.0, 1.0));
    }

    #[test]
    fn test_vec4_index() {
        let mut v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[3], 4.0);
        v[2] = 9.0;
        assert_eq!(v.z, 9.0);
    }

    #[test]
    #[should_panic]
    fn test_vec4_index_out_of_bounds() {
        let v = Vec4::ORIGIN;
        let _ = v[4]; // Should panic
    }
}
