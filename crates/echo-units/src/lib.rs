// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! echo-units: unit-safe fixed-point quantities and spatial math.
//!
//! Scalars ([`Length`], [`Area`], [`Angle`], [`Speed`], [`Acceleration`],
//! [`Proportion`]) are exact `i64` counts of their smallest unit, so unit
//! conversion never rounds and arithmetic overflow is reported instead of
//! wrapping. Vector composites pair three scalars of one kind; rotation and
//! projection ([`Quaternion`], [`Matrix4x4`]) work in `f64` and round back to
//! ticks at the boundary.
//!
//! Values are immutable `Copy` types. [`Mutable`] wraps any of them in a
//! lock-guarded cell with scoped atomic updates and weak dirty tracking via
//! [`Observable::observe`].
//!
//! ```
//! use echo_units::{Length, LengthUnit, Mutable, Observable};
//! let len = Length::new(1500, LengthUnit::Millimeter).unwrap();
//! assert_eq!(len.in_whole_meters(), 1);
//! assert_eq!(len.to_string(), "1.5m");
//!
//! let cell = Mutable::new(len);
//! let mut ticket = cell.observe();
//! cell.set(Length::ZERO);
//! assert!(ticket.fetch_and_reset());
//! assert!(!ticket.is_dirty());
//! ```
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod math;
pub mod observe;
pub mod units;
pub mod vector;

pub use config::FormatPrefs;
pub use error::{MathError, MathErrorKind, MathResult};
pub use math::{Matrix4x4, Quaternion};
pub use observe::{
    build, copy_of, copy_with, GenerationSource, Mutable, Observable, ObserveTicket, Snapshot,
};
pub use units::{
    checked_sum, Acceleration, AccelerationKind, AccelerationUnit, Angle, AngleKind, AngleUnit,
    Area, AreaKind, AreaUnit, Fov, Kind, Length, LengthKind, LengthUnit, NearFar, Proportion,
    ProportionUnit, Quantity, QuantityLiteral, RadiansLiteral, SignMode, Speed, SpeedKind,
    SpeedUnit, Unit, MAX_DECIMALS,
};
pub use vector::{
    Acceleration3, Area3, Color, Direction3, Distance3d, Length3, Point3, Point3d, Scale3,
    Velocity3,
};
