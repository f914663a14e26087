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

//! Defines the error types for the fallible pipeline operations.

use std::fmt;

/// An error produced by the composite-matrix pipeline.
///
/// The legacy formulas silently divide in these situations and propagate
/// `Inf`/`NaN` through the caller's data; here they are surfaced as explicit
/// failures. Numerical output for valid inputs is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineError {
    /// The composite matrix has a (numerically) zero determinant and cannot
    /// be inverted.
    SingularComposite,
    /// A projective divide was attempted on a point whose transformed `w` is
    /// zero, i.e. the point lies on the camera plane through the eye.
    DegenerateW,
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::SingularComposite => {
                write!(f, "composite matrix is singular and cannot be inverted")
            }
            PipelineError::DegenerateW => {
                write!(
                    f,
                    "projected point has zero w (point lies on the plane through the eye)"
                )
            }
        }
    }
}

impl std::error::Error for PipelineError {}
