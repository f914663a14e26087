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

//! View-frustum representation with plane derivation and point/sphere culling.

use super::{
    degrees_to_radians,
    geometry::{plane_normal, BoundingSphere},
    Mat4, Vec4, EPSILON,
};

/// The truncated-pyramid volume visible to a perspective camera.
///
/// A `Frustum` carries its eight corner vertices, the derived plane normals
/// and distances used by the culling tests, and the clip matrix equivalent to
/// the perspective it was built from. The plane data is derived from the
/// corners: it is recomputed whenever the corners change
/// ([`apply_matrix`](Self::apply_matrix)) and is never edited directly.
///
/// Construction happens once per camera configuration via
/// [`for_perspective`](Self::for_perspective); subsequent camera motion is
/// tracked by applying the camera's transform to the whole frustum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    upper_left_near: Vec4,
    lower_right_far: Vec4,

    upper_right_near: Vec4,
    lower_right_near: Vec4,
    lower_left_near: Vec4,

    upper_right_far: Vec4,
    upper_left_far: Vec4,
    lower_left_far: Vec4,

    near_normal: Vec4,
    top_normal: Vec4,
    left_normal: Vec4,
    bottom_normal: Vec4,
    right_normal: Vec4,

    // Distance from the origin to each plane, against its stored normal. The
    // far plane has no normal of its own: its distance is measured against
    // the near plane's normal.
    dist_near: f32,
    dist_far: f32,
    dist_left: f32,
    dist_right: f32,
    dist_top: f32,
    dist_bottom: f32,

    clip_matrix: Mat4,
}

impl Frustum {
    /// Builds the frustum of a symmetric perspective view.
    ///
    /// # Arguments
    ///
    /// * `fov_y_degrees`: Vertical field of view in **degrees** (the legacy
    ///   call surface; note that [`Mat4::perspective_fov_lh`] takes radians).
    /// * `aspect`: Width divided by height of the viewport.
    /// * `z_near`: Distance to the near plane.
    /// * `z_far`: Distance to the far plane.
    ///
    /// The camera looks down negative Z in the frustum's local space; corner
    /// positions are mirrored from the upper-left-near and lower-right-far
    /// extents.
    pub fn for_perspective(fov_y_degrees: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        let tan_half_fov = degrees_to_radians(fov_y_degrees / 2.0).tan();

        // Half-height/half-width of the near and far rects.
        let h_near = tan_half_fov * z_near;
        let w_near = h_near * aspect;
        let h_far = tan_half_fov * z_far;
        let w_far = h_far * aspect;

        let upper_left_near = Vec4::point(-w_near, h_near, -z_near);
        let lower_right_far = Vec4::point(w_far, -h_far, -z_far);

        let mut frustum = Self {
            upper_left_near,
            lower_right_far,

            upper_right_near: Vec4::point(
                -upper_left_near.x,
                upper_left_near.y,
                upper_left_near.z,
            ),
            lower_right_near: Vec4::point(
                -upper_left_near.x,
                -upper_left_near.y,
                upper_left_near.z,
            ),
            lower_left_near: Vec4::point(
                upper_left_near.x,
                -upper_left_near.y,
                upper_left_near.z,
            ),

            upper_right_far: Vec4::point(
                lower_right_far.x,
                -lower_right_far.y,
                lower_right_far.z,
            ),
            upper_left_far: Vec4::point(
                -lower_right_far.x,
                -lower_right_far.y,
                lower_right_far.z,
            ),
            lower_left_far: Vec4::point(
                -lower_right_far.x,
                lower_right_far.y,
                lower_right_far.z,
            ),

            near_normal: Vec4::ORIGIN,
            top_normal: Vec4::ORIGIN,
            left_normal: Vec4::ORIGIN,
            bottom_normal: Vec4::ORIGIN,
            right_normal: Vec4::ORIGIN,

            dist_near: 0.0,
            dist_far: 0.0,
            dist_left: 0.0,
            dist_right: 0.0,
            dist_top: 0.0,
            dist_bottom: 0.0,

            clip_matrix: Mat4::IDENTITY,
        };

        frustum.calculate_plane_normals();
        frustum.clip_matrix = frustum.perspective_clip_matrix();
        frustum
    }

    /// Returns the clip matrix equivalent to the perspective this frustum was
    /// built from, composed with every matrix applied since.
    #[inline]
    pub fn clip_matrix(&self) -> Mat4 {
        self.clip_matrix
    }

    /// Composes a matrix with this frustum's clip matrix (`m * clip`).
    #[inline]
    pub fn apply_frustum(&self, m: Mat4) -> Mat4 {
        m * self.clip_matrix
    }

    /// Transforms the whole frustum by a matrix.
    ///
    /// All eight corners and the clip matrix are multiplied by `m`, and the
    /// plane normals and distances are recomputed from the transformed
    /// corners, keeping the culling tests valid. This is how a frustum tracks
    /// a moving camera.
    pub fn apply_matrix(&mut self, m: Mat4) {
        self.clip_matrix = self.clip_matrix * m;

        self.upper_left_near = self.upper_left_near * m;
        self.lower_right_far = self.lower_right_far * m;

        self.upper_right_near = self.upper_right_near * m;
        self.lower_right_near = self.lower_right_near * m;
        self.lower_left_near = self.lower_left_near * m;

        self.upper_right_far = self.upper_right_far * m;
        self.upper_left_far = self.upper_left_far * m;
        self.lower_left_far = self.lower_left_far * m;

        self.calculate_plane_normals();
    }

    /// Tests whether a point lies inside the frustum.
    ///
    /// The point must be on the inner half-space of all six planes; the first
    /// failing plane rejects it.
    pub fn point_in_frustum(&self, pt: Vec4) -> bool {
        // Check against left and right planes
        if pt.dot(self.left_normal) - self.dist_left < 0.0 {
            return false;
        }
        if pt.dot(self.right_normal) - self.dist_right < 0.0 {
            return false;
        }

        // Check against near and far planes
        if pt.dot(self.near_normal) - self.dist_near < 0.0 {
            return false;
        }
        if pt.dot(self.near_normal) - self.dist_far > 0.0 {
            return false;
        }

        // Check against top and bottom planes
        if pt.dot(self.top_normal) - self.dist_top > 0.0 {
            return false;
        }
        if pt.dot(self.bottom_normal) - self.dist_bottom > 0.0 {
            return false;
        }

        true
    }

    /// Tests whether a sphere overlaps the frustum.
    ///
    /// Each plane test requires the signed distance of the center to clear
    /// the radius. This treats the sphere as a point plus radius per plane,
    /// which is conservative: a sphere straddling an edge or corner of the
    /// frustum can be accepted even though the volumes do not intersect.
    pub fn sphere_in_frustum(&self, sphere: &BoundingSphere) -> bool {
        // Check against left and right planes
        if sphere.center.dot(self.left_normal) - self.dist_left < sphere.radius {
            return false;
        }
        if sphere.center.dot(self.right_normal) - self.dist_right < sphere.radius {
            return false;
        }

        // Check against near and far planes
        if sphere.center.dot(self.near_normal) - self.dist_near < sphere.radius {
            return false;
        }
        if sphere.center.dot(self.near_normal) - self.dist_far > -sphere.radius {
            return false;
        }

        // Check against top and bottom planes
        if sphere.center.dot(self.top_normal) - self.dist_top > -sphere.radius {
            return false;
        }
        if sphere.center.dot(self.bottom_normal) - self.dist_bottom > -sphere.radius {
            return false;
        }

        true
    }

    /// Rederives the five stored plane normals and the six plane distances
    /// from the current corner positions.
    fn calculate_plane_normals(&mut self) {
        self.left_normal = Self::derived_normal(
            self.upper_left_far,
            self.upper_left_near,
            self.lower_left_far,
            "left",
        );
        self.right_normal = Self::derived_normal(
            self.lower_right_far,
            self.upper_right_near,
            self.upper_right_far,
            "right",
        );
        self.top_normal = Self::derived_normal(
            self.upper_left_far,
            self.upper_left_near,
            self.upper_right_far,
            "top",
        );

        // The bottom plane is the one derivation that does not chain three
        // corners: its second edge reuses the near-to-far left edge.
        let bottom = (self.lower_right_far - self.lower_left_near)
            .cross(self.upper_left_near - self.lower_left_far);
        if bottom.length_squared() <= EPSILON * EPSILON {
            log::warn!("degenerate bottom frustum plane; culling against it will accept everything");
        }
        self.bottom_normal = bottom.normalize();

        self.near_normal = Self::derived_normal(
            self.upper_left_near,
            self.upper_right_near,
            self.lower_right_near,
            "near",
        );

        // Distance to each plane is the dot product of its normal with a
        // point known to lie on it. The far distance is measured against the
        // near plane's normal.
        self.dist_near = self.near_normal.dot(self.upper_left_near);
        self.dist_far = self.near_normal.dot(self.upper_left_far);

        self.dist_left = self.left_normal.dot(self.upper_left_far);
        self.dist_right = self.right_normal.dot(self.upper_right_far);

        self.dist_top = self.top_normal.dot(self.upper_left_far);
        self.dist_bottom = self.bottom_normal.dot(self.lower_left_far);
    }

    /// Unit normal of the plane through three corners, warning when the
    /// corners have degenerated to a zero-area triangle.
    fn derived_normal(a: Vec4, b: Vec4, c: Vec4, which: &str) -> Vec4 {
        let n = plane_normal(a, b, c);
        if n.length_squared() <= EPSILON * EPSILON {
            log::warn!("degenerate {which} frustum plane; culling against it will accept everything");
        }
        n.normalize()
    }

    /// Rebuilds the perspective clip matrix from the near and far corner
    /// extents (symmetric-frustum form).
    fn perspective_clip_matrix(&self) -> Mat4 {
        // Corner z is negative in front of the camera; flip to plane distances.
        let near = -self.upper_left_near.z;
        let far = -self.lower_right_far.z;

        let two_n = near * 2.0;
        let two_fn = two_n * far;
        let far_minus_near = far - near;
        let far_plus_near = far + near;

        let right_minus_left = -self.upper_left_near.x - self.upper_left_near.x;
        let top_minus_bottom = self.upper_left_near.y - (-self.upper_left_near.y);
        let right_plus_left = -self.upper_left_near.x + self.upper_left_near.x;
        let top_plus_bottom = self.upper_left_near.y + (-self.upper_left_near.y);

        Mat4::from_rows(
            Vec4::new(
                two_n / right_minus_left,
                0.0,
                right_plus_left / right_minus_left,
                0.0,
            ),
            Vec4::new(
                0.0,
                two_n / top_minus_bottom,
                top_plus_bottom / top_minus_bottom,
                0.0,
            ),
            Vec4::new(
                0.0,
                0.0,
                -far_plus_near / far_minus_near,
                -two_fn / far_minus_near,
            ),
            Vec4::new(0.0, 0.0, -1.0, 0.0),
        )
    }
}

// --- Tests ---
