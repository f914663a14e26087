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

//! View, projection, and viewport constructors matching the legacy
//! fixed-function API's left-handed conventions and depth-buffer scaling.

use super::{Mat4, Vec4};

/// Maximum representable value of a 16-bit integer depth buffer.
pub const MAX_DEPTH_16_BIT: f32 = 65535.0;

/// Maximum representable value of a 16-bit floating-point depth buffer.
///
/// Reinterpreted from the exact bit pattern the hardware uses (`0x43FFF800`,
/// i.e. 511.9375); a decimal approximation would not round-trip.
pub const MAX_DEPTH_16_BIT_FLOAT: f32 = f32::from_bits(0x43FF_F800);

/// Maximum representable value of a 24-bit integer depth buffer.
pub const MAX_DEPTH_24_BIT: f32 = 16777215.0;

/// Maximum representable value of a 24-bit floating-point depth buffer.
///
/// Reinterpreted from the exact bit pattern the hardware uses (`0x7149F2CA`,
/// roughly 1e30); a decimal approximation would not round-trip.
pub const MAX_DEPTH_24_BIT_FLOAT: f32 = f32::from_bits(0x7149_F2CA);

impl Mat4 {
    /// Creates a left-handed view matrix for a camera at `eye` looking at `at`.
    ///
    /// The basis is `z = normalize(at - eye)`, `x = normalize(up × z)`,
    /// `y = normalize(z × x)`; rows 0..2 carry the basis vectors as columns
    /// (the inverse of the orthonormal basis), and row 3 holds the negated
    /// eye projection `(-x·eye, -y·eye, -z·eye, 1)`.
    ///
    /// # Returns
    ///
    /// `None` if `eye` and `at` coincide or `up` is parallel to the view
    /// direction; the legacy formula produces NaN in those cases.
    pub fn look_at_lh(eye: Vec4, at: Vec4, up: Vec4) -> Option<Self> {
        let z_axis = at - eye;
        if z_axis.length_squared() < crate::EPSILON * crate::EPSILON {
            return None;
        }
        let z_axis = z_axis.normalize();

        let x_axis = up.cross(z_axis);
        if x_axis.length_squared() < crate::EPSILON * crate::EPSILON {
            return None;
        }
        let x_axis = x_axis.normalize();
        let y_axis = z_axis.cross(x_axis).normalize();

        Some(Self::from_rows(
            Vec4::new(x_axis.x, y_axis.x, z_axis.x, 0.0),
            Vec4::new(x_axis.y, y_axis.y, z_axis.y, 0.0),
            Vec4::new(x_axis.z, y_axis.z, z_axis.z, 0.0),
            Vec4::new(
                -x_axis.dot(eye),
                -y_axis.dot(eye),
                -z_axis.dot(eye),
                1.0,
            ),
        ))
    }

    /// Creates a left-handed perspective projection matrix from a vertical
    /// field of view.
    ///
    /// # Arguments
    ///
    /// * `fov_y`: Vertical field of view in radians.
    /// * `aspect`: Width divided by height of the viewport.
    /// * `z_near`: Distance to the near clipping plane.
    /// * `z_far`: Distance to the far clipping plane. Must differ from
    ///   `z_near`.
    pub fn perspective_fov_lh(fov_y: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        assert!(z_far != z_near, "z_far must differ from z_near");
        let y_scale = 1.0 / (fov_y * 0.5).tan();
        let x_scale = y_scale / aspect;
        let z_adjustment = z_far / (z_far - z_near);

        let mut ret = Self::IDENTITY;
        ret.rows[0].x = x_scale;
        ret.rows[1].y = y_scale;
        ret.rows[2].z = z_adjustment;
        ret.rows[2].w = 1.0;
        ret.rows[3].z = -1.0 * z_near * z_adjustment;
        ret.rows[3].w = 0.0;
        ret
    }

    /// Creates a viewport matrix mapping clip space to screen space.
    ///
    /// X spans `[0, width]`, Y spans `[0, height]` top-down (hence the
    /// negated Y scale), and depth maps into
    /// `[max_depth_value * z_min, max_depth_value * z_max]`.
    pub fn viewport(width: f32, height: f32, max_depth_value: f32, z_min: f32, z_max: f32) -> Self {
        let mut ret = Self::IDENTITY;
        ret.rows[0].x = width * 0.5;
        ret.rows[3].x = ret.rows[0].x;
        ret.rows[3].y = height * 0.5;
        ret.rows[1].y = -1.0 * ret.rows[3].y;
        ret.rows[2].z = max_depth_value * (z_max - z_min);
        ret.rows[3].z = max_depth_value * z_min;
        ret
    }

    /// Creates the standard viewport for a 16-bit integer depth buffer.
    #[inline]
    pub fn viewport_16_bit(width: f32, height: f32) -> Self {
        Self::viewport(width, height, MAX_DEPTH_16_BIT, 0.0, 1.0)
    }

    /// Creates the standard viewport for a 16-bit float depth buffer.
    #[inline]
    pub fn viewport_16_bit_float(width: f32, height: f32) -> Self {
        Self::viewport(width, height, MAX_DEPTH_16_BIT_FLOAT, 0.0, 1.0)
    }

    /// Creates the standard viewport for a 24-bit integer depth buffer.
    #[inline]
    pub fn viewport_24_bit(width: f32, height: f32) -> Self {
        Self::viewport(width, height, MAX_DEPTH_24_BIT, 0.0, 1.0)
    }

    /// Creates the standard viewport for a 24-bit float depth buffer.
    #[inline]
    pub fn viewport_24_bit_float(width: f32, height: f32) -> Self {
        Self::viewport(width, height, MAX_DEPTH_24_BIT_FLOAT, 0.0, 1.0)
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approx_eq;
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-5;

    fn assert_mat4_eq(m: Mat4, expected: [[f32; 4]; 4]) {
        for r in 0..4 {
            for c in 0..4 {
                assert_relative_eq!(
                    m[r][c],
                    expected[r][c],
                    epsilon = TOLERANCE,
                    max_relative = TOLERANCE
                );
            }
        }
    }

    fn fixture_eye() -> (Vec4, Vec4, Vec4) {
        (
            Vec4::point(-0.3, 1.25, -5.0),
            Vec4::point(0.0, 0.0, 0.0),
            Vec4::point(0.242_535_62, 0.970_142_5, 0.0),
        )
    }

    #[test]
    fn test_look_at_lh() {
        let (eye, at, up) = fixture_eye();
        let m = Mat4::look_at_lh(eye, at, up).expect("camera basis should be valid");

        assert_mat4_eq(
            m,
            [
                [0.96336329, 0.26182887, 0.0581101887, 0.0],
                [-0.240840822, 0.939878166, -0.242125779, 0.0],
                [-0.118012004, 0.219259813, 0.968503118, 0.0],
                [-2.23517418e-08, 1.49011612e-08, 5.16260576, 1.0],
            ],
        );
    }

    #[test]
    fn test_look_at_lh_rotation_block_is_orthonormal() {
        let (eye, at, up) = fixture_eye();
        let m = Mat4::look_at_lh(eye, at, up).unwrap();

        let rows = [
            m.rows[0].truncate(),
            m.rows[1].truncate(),
            m.rows[2].truncate(),
        ];
        for (i, row) in rows.iter().enumerate() {
            assert_relative_eq!(row.length(), 1.0, epsilon = TOLERANCE);
            for other in rows.iter().skip(i + 1) {
                assert_relative_eq!(row.dot(*other), 0.0, epsilon = TOLERANCE);
            }
        }
    }

    #[test]
    fn test_look_at_lh_degenerate_inputs() {
        let eye = Vec4::point(0.0, 0.0, 5.0);
        let up = Vec4::point(0.0, 1.0, 0.0);

        // Eye and target coincide.
        assert!(Mat4::look_at_lh(eye, eye, up).is_none());

        // Up parallel to the view direction.
        let at = Vec4::point(0.0, 10.0, 5.0);
        assert!(Mat4::look_at_lh(eye, at, up).is_none());
    }

    #[test]
    fn test_perspective_fov_lh() {
        // The legacy fixture: the caller hands the raw value 65.0 straight
        // through, so the oracle matrix encodes tan(32.5).
        let m = Mat4::perspective_fov_lh(65.0, 640.0 / 480.0, 1.4, 183.25);

        assert_mat4_eq(
            m,
            [
                [0.396889448, 0.0, 0.0, 0.0],
                [0.0, 0.529185951, 0.0, 0.0],
                [0.0, 0.0, 1.00769866, 1.0],
                [0.0, 0.0, -1.41077805, 0.0],
            ],
        );
    }

    #[test]
    #[should_panic]
    fn test_perspective_fov_lh_equal_planes_panics() {
        let _ = Mat4::perspective_fov_lh(1.0, 1.0, 5.0, 5.0);
    }

    #[test]
    fn test_viewport() {
        let m = Mat4::viewport(640.0, 480.0, 65536.0, 1.4, 183.25);

        assert_mat4_eq(
            m,
            [
                [320.0, 0.0, 0.0, 0.0],
                [0.0, -240.0, 0.0, 0.0],
                [0.0, 0.0, 11917722.0, 0.0],
                [320.0, 240.0, 91750.3984, 1.0],
            ],
        );
    }

    #[test]
    fn test_viewport_16_bit() {
        let m = Mat4::viewport_16_bit(640.0, 480.0);
        assert_eq!(m[0][0], 320.0);
        assert_eq!(m[1][1], -240.0);
        assert_eq!(m[2][2], 65535.0);
        assert_eq!(m[3][0], 320.0);
        assert_eq!(m[3][1], 240.0);
        assert_eq!(m[3][2], 0.0);
    }

    #[test]
    fn test_viewport_16_bit_float() {
        let m = Mat4::viewport_16_bit_float(640.0, 480.0);
        assert_eq!(m[2][2], 511.9375);
        assert_eq!(MAX_DEPTH_16_BIT_FLOAT.to_bits(), 0x43FF_F800);
    }

    #[test]
    fn test_viewport_24_bit() {
        let m = Mat4::viewport_24_bit(640.0, 480.0);
        assert_eq!(m[2][2], 16777215.0);
        assert_eq!(m[3][2], 0.0);
    }

    #[test]
    fn test_viewport_24_bit_float() {
        let m = Mat4::viewport_24_bit_float(640.0, 480.0);
        assert!(approx_eq(m[2][2] / 1.0e30, 1.0));
        assert_eq!(MAX_DEPTH_24_BIT_FLOAT.to_bits(), 0x7149_F2CA);
    }
}
