// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![doc = r"Geometry primitives for Echo built on `echo-units`.

This crate provides:
- Axis-aligned bounding boxes (`Aabb`) whose corners stay sorted.
- Placement transforms with non-uniform scale (`Transform`).
- A right-handed perspective `Camera`.
- `MatrixExt`, which rebuilds a `Matrix4x4` from the types above.

Shared instances are edited through `echo_units::Mutable` and the
`AabbCell`, `TransformCell` and `CameraCell` traits.
"]

/// Perspective camera.
pub mod camera;
/// Matrix rebuilding from geometry types.
pub mod matrix;
/// Foundational geometric types.
pub mod types;

pub use camera::{Camera, CameraCell};
pub use matrix::MatrixExt;
pub use types::aabb::{Aabb, AabbCell};
pub use types::transform::{Transform, TransformCell};
