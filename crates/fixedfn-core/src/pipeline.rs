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

//! Composite-matrix utilities: building the combined model-view/projection
//! matrix, inverting it, and moving points between world and screen space.

use super::{error::PipelineError, Mat4, Vec4};

/// The default far-reference screen depth used by
/// [`unproject_point_at_depth`].
///
/// The two-sample unprojection needs a second screen-space depth well past
/// the near plane; the legacy kernel hardcodes this value, which is coupled
/// to the 16-bit depth range and expected scene scale. Callers working with
/// other depth ranges should pass their own reference.
pub const DEFAULT_FAR_REFERENCE: f32 = 64000.0;

/// Builds the composite matrix mapping world space to screen space.
///
/// With the row-vector convention the model-view transform applies first:
/// `v * (model_view * projection)`.
#[inline]
pub fn build_composite(model_view: Mat4, projection: Mat4) -> Mat4 {
    model_view * projection
}

/// Inverts a composite matrix for unprojection.
///
/// # Errors
///
/// [`PipelineError::SingularComposite`] if the matrix has a numerically zero
/// determinant.
#[inline]
pub fn build_inverse_composite(composite: Mat4) -> Result<Mat4, PipelineError> {
    composite
        .inverse()
        .ok_or(PipelineError::SingularComposite)
}

/// Projects a world-space point into screen space.
///
/// The point is transformed by the composite matrix and then divided by the
/// resulting `w`; the output has `w == 1`.
///
/// # Errors
///
/// [`PipelineError::DegenerateW`] if the transformed `w` is zero (the point
/// lies on the camera's plane through the eye).
pub fn project_point(world_point: Vec4, composite: Mat4) -> Result<Vec4, PipelineError> {
    let screen_point = world_point * composite;
    if screen_point.w == 0.0 {
        return Err(PipelineError::DegenerateW);
    }
    Ok(Vec4::new(
        screen_point.x / screen_point.w,
        screen_point.y / screen_point.w,
        screen_point.z / screen_point.w,
        1.0,
    ))
}

/// Unprojects a screen-space point back into world space.
///
/// The inverse of [`project_point`]: the point is transformed by the inverse
/// composite matrix and divided by the resulting `w`.
///
/// # Errors
///
/// [`PipelineError::DegenerateW`] if the transformed `w` is zero.
pub fn unproject_point(screen_point: Vec4, inverse_composite: Mat4) -> Result<Vec4, PipelineError> {
    let world_point = screen_point * inverse_composite;
    if world_point.w == 0.0 {
        return Err(PipelineError::DegenerateW);
    }
    Ok(Vec4::new(
        world_point.x / world_point.w,
        world_point.y / world_point.w,
        world_point.z / world_point.w,
        1.0,
    ))
}

/// Unprojects a screen-space XY position to the world-space point at a known
/// world depth.
///
/// Two reference samples are taken along the screen ray, at screen depth 0
/// and at `far_reference` (see [`DEFAULT_FAR_REFERENCE`]), each normalized by
/// the homogeneous divide. The world XY is then linearly interpolated between
/// the samples with `t = (world_z - near.z) / (far.z - near.z)`.
///
/// This is a linear approximation: it is exact only where the projection's
/// world-Z-to-screen-Z relationship is linear over the sampled range, and
/// should be validated against [`unproject_point`] for the depth range in
/// use.
///
/// # Errors
///
/// [`PipelineError::DegenerateW`] if either reference sample lands on a zero
/// `w`.
pub fn unproject_point_at_depth(
    screen_point: Vec4,
    inverse_composite: Mat4,
    world_z: f32,
    far_reference: f32,
) -> Result<Vec4, PipelineError> {
    let near_sample =
        Vec4::new(screen_point.x, screen_point.y, 0.0, screen_point.w) * inverse_composite;
    if near_sample.w == 0.0 {
        return Err(PipelineError::DegenerateW);
    }
    let near_plane = near_sample.euclidean();

    let far_sample =
        Vec4::new(screen_point.x, screen_point.y, far_reference, screen_point.w) * inverse_composite;
    if far_sample.w == 0.0 {
        return Err(PipelineError::DegenerateW);
    }
    let far_plane = far_sample.euclidean();

    let t = (world_z - near_plane.z) / (far_plane.z - near_plane.z);
    Ok(Vec4::new(
        near_plane.x + (far_plane.x - near_plane.x) * t,
        near_plane.y + (far_plane.y - near_plane.y) * t,
        world_z,
        1.0,
    ))
}

// --- Tests ---
