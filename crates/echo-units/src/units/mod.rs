// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixed-point scalar quantities.
//!
//! Every dimensioned kind is a [`Quantity`] over an `i64` count of its
//! smallest unit. Units are exact integer multiples of that tick, so unit
//! conversion never rounds; only the `f64` constructors and the cross-kind
//! products round, and they round to nearest with ties away from zero.

mod acceleration;
mod angle;
mod area;
pub(crate) mod fixed;
mod format;
mod length;
mod literal;
mod optics;
mod proportion;
mod quantity;
mod speed;

pub use acceleration::{Acceleration, AccelerationKind, AccelerationUnit};
pub use angle::{Angle, AngleKind, AngleUnit};
pub use area::{Area, AreaKind, AreaUnit};
pub use format::{SignMode, MAX_DECIMALS};
pub(crate) use length::NM2_PER_MM2;
pub use length::{Length, LengthKind, LengthUnit};
pub use literal::{QuantityLiteral, RadiansLiteral};
pub use optics::{Fov, NearFar};
pub use proportion::{Proportion, ProportionUnit};
pub use quantity::{checked_sum, Kind, Quantity, Unit};
pub use speed::{Speed, SpeedKind, SpeedUnit};
