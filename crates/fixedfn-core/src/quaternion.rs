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

//! Provides a Quaternion type for representing 3D rotations.

use serde::{Deserialize, Serialize};

use super::{Mat4, Vec3, Vec4, EPSILON};
use std::ops::{Add, Mul, Neg, Sub};

/// Represents a quaternion for efficient 3D rotations.
///
/// A quaternion is stored as `(x, y, z, w)`, where `[x, y, z]` is the "vector"
/// part and `w` is the "scalar" part. For representing rotations it should be
/// a unit quaternion where `x² + y² + z² + w² = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Quaternion {
    /// The x component of the vector part.
    pub x: f32,
    /// The y component of the vector part.
    pub y: f32,
    /// The z component of the vector part.
    pub z: f32,
    /// The scalar (real) part.
    pub w: f32,
}

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Creates a new quaternion from its raw components.
    ///
    /// Note: This does not guarantee a unit quaternion. For creating rotations,
    /// prefer `from_axis_angle` or `from_euler`.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a quaternion representing a rotation around a given axis by a given angle.
    ///
    /// # Arguments
    ///
    /// * `axis`: The axis of rotation. It is recommended to pass a normalized vector.
    /// * `angle_radians`: The angle of rotation in radians.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle_radians: f32) -> Self {
        let normalized_axis = axis.normalize();
        let half_angle = angle_radians * 0.5;
        let s = half_angle.sin();
        let c = half_angle.cos();
        Self {
            x: normalized_axis.x * s,
            y: normalized_axis.y * s,
            z: normalized_axis.z * s,
            w: c,
        }
    }

    /// Creates a quaternion from Euler angles (radians), combining the
    /// yaw, pitch, and roll half-angle products.
    pub fn from_euler(yaw: f32, pitch: f32, roll: f32) -> Self {
        let (sin_y, cos_y) = (yaw * 0.5).sin_cos();
        let (sin_p, cos_p) = (pitch * 0.5).sin_cos();
        let (sin_r, cos_r) = (roll * 0.5).sin_cos();

        Self {
            x: cos_r * sin_p * cos_y + sin_r * cos_p * sin_y,
            y: cos_r * cos_p * sin_y - sin_r * sin_p * cos_y,
            z: sin_r * cos_p * cos_y - cos_r * sin_p * sin_y,
            w: cos_r * cos_p * cos_y + sin_r * sin_p * sin_y,
        }
    }

    /// Calculates the squared length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Calculates the length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a normalized version of the quaternion with a length of 1.
    /// If the quaternion has a near-zero magnitude, it returns the identity quaternion.
    pub fn normalize(&self) -> Self {
        let mag_sq = self.magnitude_squared();
        if mag_sq > EPSILON {
            let inv_mag = 1.0 / mag_sq.sqrt();
            Self {
                x: self.x * inv_mag,
                y: self.y * inv_mag,
                z: self.z * inv_mag,
                w: self.w * inv_mag,
            }
        } else {
            Self::IDENTITY
        }
    }

    /// Computes the dot product of two quaternions.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Rotates a 3D vector by this quaternion.
    pub fn rotate_vec3(&self, v: Vec3) -> Vec3 {
        let u = Vec3::new(self.x, self.y, self.z);
        let s: f32 = self.w;
        2.0 * u.dot(v) * u + (s * s - u.dot(u)) * v + 2.0 * s * u.cross(v)
    }

    /// Converts the rotation into a row-major [`Mat4`].
    ///
    /// The rotation occupies rows 0..2, suitable for the `v * M` row-vector
    /// convention used throughout the pipeline.
    pub fn to_mat4(&self) -> Mat4 {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        Mat4::from_rows(
            Vec4::new(
                1.0 - 2.0 * (y * y) - 2.0 * (z * z),
                2.0 * (x * y + w * z),
                2.0 * (x * z - w * y),
                0.0,
            ),
            Vec4::new(
                2.0 * (x * y - w * z),
                1.0 - 2.0 * (x * x) - 2.0 * (z * z),
                2.0 * (y * z + w * x),
                0.0,
            ),
            Vec4::new(
                2.0 * (x * z + w * y),
                2.0 * (y * z - w * x),
                1.0 - 2.0 * (x * x) - 2.0 * (y * y),
                0.0,
            ),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    /// Performs a Spherical Linear Interpolation (Slerp) between two quaternions.
    ///
    /// Slerp provides a smooth, constant-speed interpolation between two rotations,
    /// following the shortest path on the surface of a 4D sphere.
    ///
    /// *   `t` - The interpolation factor, clamped to the `[0.0, 1.0]` range.
    pub fn slerp(start: Self, end: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut cos_theta = start.dot(end);
        let mut end_adjusted = end;

        // If the dot product is negative, the quaternions are more than 90 degrees
        // apart; negate one to take the shortest path.
        if cos_theta < 0.0 {
            cos_theta = -cos_theta;
            end_adjusted = -end;
        }

        if cos_theta > 1.0 - EPSILON {
            // Nearly parallel: fall back to a normalized linear interpolation.
            let result = (start * (1.0 - t)) + (end_adjusted * t);
            result.normalize()
        } else {
            let angle = cos_theta.acos();
            let sin_theta_inv = 1.0 / angle.sin();
            let scale_start = ((1.0 - t) * angle).sin() * sin_theta_inv;
            let scale_end = (t * angle).sin() * sin_theta_inv;
            (start * scale_start) + (end_adjusted * scale_end)
        }
    }
}

// --- Operator Overloads ---

impl Default for Quaternion {
    /// Returns the identity quaternion, representing no rotation.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Quaternion> for Quaternion {
    type Output = Self;
    /// Combines two rotations using the Hamilton product.
    /// Note that quaternion multiplication is not commutative.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y + self.y * rhs.w + self.z * rhs.x - self.x * rhs.z,
            z: self.w * rhs.z + self.z * rhs.w + self.x * rhs.y - self.y * rhs.x,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;
    /// Scales every component of the quaternion.
    #[inline]
    fn mul(self, s: f32) -> Self::Output {
        Self {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
            w: self.w * s,
        }
    }
}

impl Add for Quaternion {
    type Output = Self;
    /// Adds two quaternions component-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
            w: self.w + rhs.w,
        }
    }
}

impl Sub for Quaternion {
    type Output = Self;
    /// Subtracts two quaternions component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
            w: self.w - rhs.w,
        }
    }
}

impl Neg for Quaternion {
    type Output = Self;
    /// Negates every component. The negation represents the same rotation.
    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w,
        }
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{approx_eq, PI};
    use approx::assert_relative_eq;

    fn vec3_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    #[test]
    fn test_identity_matrix() {
        assert_eq!(Quaternion::default(), Quaternion::IDENTITY);
        assert_eq!(Quaternion::IDENTITY.to_mat4(), Mat4::IDENTITY);
    }

    #[test]
    fn test_from_axis_angle_quarter_turn() {
        let q = Quaternion::from_axis_angle(Vec3::Z, PI / 2.0);
        let rotated = q.rotate_vec3(Vec3::X);
        assert!(vec3_approx_eq(rotated, Vec3::Y));
        assert_relative_eq!(q.magnitude(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_to_mat4_matches_rotate_vec3() {
        let q = Quaternion::from_axis_angle(Vec3::new(1.0, -2.0, 3.0), PI / 7.0);
        let m = q.to_mat4();

        let v = Vec3::new(0.5, 1.0, -0.2);
        let rotated_q = q.rotate_vec3(v);
        let rotated_m = (v.extend(1.0) * m).truncate();

        assert!(vec3_approx_eq(rotated_q, rotated_m));
    }

    #[test]
    fn test_mul_composes_rotations() {
        let eighth = Quaternion::from_axis_angle(Vec3::Z, PI / 4.0);
        let quarter = Quaternion::from_axis_angle(Vec3::Z, PI / 2.0);
        let composed = eighth * eighth;

        assert_relative_eq!(composed.dot(quarter).abs(), 1.0, epsilon = EPSILON * 10.0);
        assert!(vec3_approx_eq(
            composed.rotate_vec3(Vec3::X),
            quarter.rotate_vec3(Vec3::X)
        ));
    }

    #[test]
    fn test_from_euler_matches_axis_rotations() {
        // Pure roll is a rotation around Z.
        let roll = Quaternion::from_euler(0.0, 0.0, PI / 3.0);
        let around_z = Quaternion::from_axis_angle(Vec3::Z, PI / 3.0);
        assert!(vec3_approx_eq(
            roll.rotate_vec3(Vec3::X),
            around_z.rotate_vec3(Vec3::X)
        ));
    }

    #[test]
    fn test_normalize() {
        let q = Quaternion::new(0.0, 0.0, 3.0, 4.0).normalize();
        assert_relative_eq!(q.magnitude(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(q.z, 0.6, epsilon = EPSILON);
        assert_relative_eq!(q.w, 0.8, epsilon = EPSILON);

        assert_eq!(
            Quaternion::new(0.0, 0.0, 0.0, 0.0).normalize(),
            Quaternion::IDENTITY
        );
    }

    #[test]
    fn test_slerp_endpoints_and_midpoint() {
        let a = Quaternion::from_axis_angle(Vec3::Y, 0.0);
        let b = Quaternion::from_axis_angle(Vec3::Y, PI / 2.0);

        let at_start = Quaternion::slerp(a, b, 0.0);
        let at_end = Quaternion::slerp(a, b, 1.0);
        assert_relative_eq!(at_start.dot(a).abs(), 1.0, epsilon = EPSILON * 10.0);
        assert_relative_eq!(at_end.dot(b).abs(), 1.0, epsilon = EPSILON * 10.0);

        let mid = Quaternion::slerp(a, b, 0.5);
        let expected = Quaternion::from_axis_angle(Vec3::Y, PI / 4.0);
        assert_relative_eq!(mid.dot(expected).abs(), 1.0, epsilon = EPSILON * 10.0);
    }
}
