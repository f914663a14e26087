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

//! Provides geometric primitives for spatial calculations and culling.

use super::Vec4;

/// A sphere used as a cheap bounding volume for visibility culling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct BoundingSphere {
    /// The center point of the sphere, with homogeneous `w == 1`.
    pub center: Vec4,
    /// The radius of the sphere. Non-negative by convention.
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new `BoundingSphere` from a center point and radius.
    #[inline]
    pub fn new(center: Vec4, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Calculates the Euclidean distance between the xyz parts of two points.
#[inline]
pub fn point_distance(a: Vec4, b: Vec4) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dz = b.z - a.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Computes the (unnormalized) normal of the plane through three points,
/// as `(a - b) × (b - c)`. The result has `w == 1`.
#[inline]
pub fn plane_normal(a: Vec4, b: Vec4, c: Vec4) -> Vec4 {
    (a - b).cross(b - c)
}

/// Computes the unit normal of the plane through three points.
///
/// Collinear inputs have a zero-length unnormalized normal and collapse to
/// [`Vec4::ORIGIN`]; callers that need to distinguish that case should check
/// [`plane_normal`] first.
#[inline]
pub fn plane_normal_normalized(a: Vec4, b: Vec4, c: Vec4) -> Vec4 {
    plane_normal(a, b, c).normalize()
}

// --- Tests ---
