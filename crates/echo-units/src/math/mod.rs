// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rotation and projective math in `f64`.
//!
//! [`Quaternion`] rotates the exact vector types by converting to `f64`,
//! rotating, and rounding back to the nearest tick. [`Matrix4x4`] is the
//! column-major hand-off format for renderers and the HUD.

mod mat4;
mod quat;

pub use mat4::Matrix4x4;
pub use quat::Quaternion;
