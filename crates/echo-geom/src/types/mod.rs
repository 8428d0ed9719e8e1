// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core spatial types: bounding boxes and TRS transforms.
//!
//! - Overlap is inclusive on faces so touching boxes pair up.
//! - Box corners are exact [`echo_units::Point3`] values; only rotation
//!   passes through `f64`, rounding back to the nearest nanometre.

#[doc = "Axis-aligned bounding boxes with sorted corners."]
pub mod aabb;
#[doc = "Placement transforms with non-uniform scale."]
pub mod transform;
