// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Unit-length direction.

use core::fmt;

use tracing::debug;

use super::{stable, Distance3d};
use crate::error::{ensure_finite, MathError, MathResult};
use crate::observe::Mutable;
use crate::units::Angle;

/// Unit vector, `ux² + uy² + uz² = 1` to within rounding.
///
/// Every construction and mutation path normalises the full proposed vector
/// and rejects zero or non-finite input, so a `Direction3` is never
/// degenerate. Equality tolerates [`Direction3::TOLERANCE`] per component;
/// there is no `Hash`.
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Direction3 {
    ux: f64,
    uy: f64,
    uz: f64,
}

impl Direction3 {
    /// Per-component equality tolerance.
    pub const TOLERANCE: f64 = 1e-12;

    /// +X.
    pub const PLUS_X: Self = Self::raw(1.0, 0.0, 0.0);
    /// −X.
    pub const MINUS_X: Self = Self::raw(-1.0, 0.0, 0.0);
    /// +Y.
    pub const PLUS_Y: Self = Self::raw(0.0, 1.0, 0.0);
    /// −Y.
    pub const MINUS_Y: Self = Self::raw(0.0, -1.0, 0.0);
    /// +Z.
    pub const PLUS_Z: Self = Self::raw(0.0, 0.0, 1.0);
    /// −Z.
    pub const MINUS_Z: Self = Self::raw(0.0, 0.0, -1.0);

    const fn raw(ux: f64, uy: f64, uz: f64) -> Self {
        Self { ux, uy, uz }
    }

    /// Normalises `(x, y, z)`.
    ///
    /// Non-finite components are an `InvalidArgument`; the zero vector is an
    /// `InvalidState`.
    pub fn new(x: f64, y: f64, z: f64) -> MathResult<Self> {
        Self::normalize("Direction3::new", [x, y, z])
    }

    fn normalize(op: &'static str, c: [f64; 3]) -> MathResult<Self> {
        for v in c {
            ensure_finite(op, "direction component", v)?;
        }
        match stable::normalize(c) {
            Some([ux, uy, uz]) => Ok(Self { ux, uy, uz }),
            None => {
                debug!(op, x = c[0], y = c[1], z = c[2], "rejected zero-length direction");
                Err(MathError::invalid_state(
                    op,
                    format!("cannot normalize zero vector ({}, {}, {})", c[0], c[1], c[2]),
                ))
            }
        }
    }

    /// X component.
    pub const fn ux(self) -> f64 {
        self.ux
    }

    /// Y component.
    pub const fn uy(self) -> f64 {
        self.uy
    }

    /// Z component.
    pub const fn uz(self) -> f64 {
        self.uz
    }

    /// Components as an array.
    pub const fn to_array(self) -> [f64; 3] {
        [self.ux, self.uy, self.uz]
    }

    /// Replaces `ux` and renormalises against the current `uy`, `uz`, so the
    /// other components change too.
    pub fn with_ux(self, ux: f64) -> MathResult<Self> {
        Self::normalize("Direction3::with_ux", [ux, self.uy, self.uz])
    }

    /// Replaces `uy` and renormalises.
    pub fn with_uy(self, uy: f64) -> MathResult<Self> {
        Self::normalize("Direction3::with_uy", [self.ux, uy, self.uz])
    }

    /// Replaces `uz` and renormalises.
    pub fn with_uz(self, uz: f64) -> MathResult<Self> {
        Self::normalize("Direction3::with_uz", [self.ux, self.uy, uz])
    }

    /// Applies `f` to the components and renormalises the result.
    pub fn map(self, f: impl FnOnce([f64; 3]) -> [f64; 3]) -> MathResult<Self> {
        Self::normalize("Direction3::map", f(self.to_array()))
    }

    /// Opposite direction.
    pub fn negated(self) -> Self {
        Self::raw(
            stable::canonical(-self.ux),
            stable::canonical(-self.uy),
            stable::canonical(-self.uz),
        )
    }

    /// Cosine of the angle between the two directions.
    pub fn dot(self, rhs: Self) -> f64 {
        stable::dot(self.to_array(), rhs.to_array())
    }

    /// Right-handed cross product, normalised. Parallel inputs are an
    /// `InvalidState`.
    pub fn cross(self, rhs: Self) -> MathResult<Self> {
        Self::normalize("Direction3::cross", stable::cross(self.to_array(), rhs.to_array()))
    }

    /// Left-handed cross product: the negation of [`Direction3::cross`].
    pub fn cross_lh(self, rhs: Self) -> MathResult<Self> {
        self.cross(rhs).map(Self::negated)
    }

    /// Unsigned angle to `rhs`, in `[0, π]`.
    pub fn angle_to(self, rhs: Self) -> MathResult<Angle> {
        // atan2(|a×b|, a·b) stays accurate near 0 and π where acos does not.
        let sin = stable::magnitude(stable::cross(self.to_array(), rhs.to_array()));
        Angle::from_radians(libm::atan2(sin, self.dot(rhs)))
    }

    /// Unit displacement of one metre along this direction.
    pub fn to_distance3d(self) -> Distance3d {
        Distance3d::from_finite(self.to_array())
    }

    /// Scales to a displacement of `meters`; `meters` must be finite.
    pub fn times(self, meters: f64) -> MathResult<Distance3d> {
        self.to_distance3d().scaled_by(meters)
    }
}

impl PartialEq for Direction3 {
    fn eq(&self, other: &Self) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array())
            .all(|(a, b)| (a - b).abs() <= Self::TOLERANCE)
    }
}

impl fmt::Display for Direction3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.ux, self.uy, self.uz)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Direction3 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            ux: f64,
            uy: f64,
            uz: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.ux, raw.uy, raw.uz).map_err(serde::de::Error::custom)
    }
}

impl Mutable<Direction3> {
    /// Current `ux`.
    pub fn ux(&self) -> f64 {
        self.read(|d| d.ux)
    }

    /// Current `uy`.
    pub fn uy(&self) -> f64 {
        self.read(|d| d.uy)
    }

    /// Current `uz`.
    pub fn uz(&self) -> f64 {
        self.read(|d| d.uz)
    }

    /// Replaces `ux` and renormalises all three components atomically.
    pub fn set_ux(&self, ux: f64) -> MathResult<()> {
        self.mutate(|d| {
            *d = d.with_ux(ux)?;
            Ok(())
        })
    }

    /// Replaces `uy` and renormalises.
    pub fn set_uy(&self, uy: f64) -> MathResult<()> {
        self.mutate(|d| {
            *d = d.with_uy(uy)?;
            Ok(())
        })
    }

    /// Replaces `uz` and renormalises.
    pub fn set_uz(&self, uz: f64) -> MathResult<()> {
        self.mutate(|d| {
            *d = d.with_uz(uz)?;
            Ok(())
        })
    }

    /// Replaces all components with the normalised `(x, y, z)`.
    pub fn set_components(&self, x: f64, y: f64, z: f64) -> MathResult<()> {
        let next = Direction3::new(x, y, z)?;
        self.set(next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathErrorKind;

    #[test]
    fn normalizes_on_construction() {
        let d = Direction3::new(3.0, 0.0, 4.0).unwrap();
        assert_eq!(d, Direction3::new(0.6, 0.0, 0.8).unwrap());
        let len = stable::magnitude(d.to_array());
        assert!((len - 1.0).abs() < 1e-15);
    }

    #[test]
    fn rejects_degenerate_input() {
        assert_eq!(
            Direction3::new(0.0, 0.0, 0.0).unwrap_err().kind(),
            MathErrorKind::InvalidState
        );
        assert_eq!(
            Direction3::new(f64::NAN, 1.0, 0.0).unwrap_err().kind(),
            MathErrorKind::InvalidArgument
        );
    }

    #[test]
    fn setting_one_component_renormalizes_all() {
        let cell = Mutable::new(Direction3::PLUS_Y);
        cell.set_ux(1.0).unwrap();
        let inv_sqrt2 = core::f64::consts::FRAC_1_SQRT_2;
        assert!((cell.ux() - inv_sqrt2).abs() < 1e-15);
        assert!((cell.uy() - inv_sqrt2).abs() < 1e-15);
        assert!(Mutable::new(Direction3::PLUS_X).set_ux(0.0).is_err());
    }

    #[test]
    fn failed_set_leaves_value() {
        let cell = Mutable::new(Direction3::PLUS_X);
        assert!(cell.set_ux(0.0).is_err());
        assert_eq!(cell.get(), Direction3::PLUS_X);
        assert_eq!(cell.generation(), 0);
    }

    #[test]
    fn cross_handedness() {
        assert_eq!(Direction3::PLUS_X.cross(Direction3::PLUS_Y).unwrap(), Direction3::PLUS_Z);
        assert_eq!(Direction3::PLUS_X.cross_lh(Direction3::PLUS_Y).unwrap(), Direction3::MINUS_Z);
        assert!(Direction3::PLUS_X.cross(Direction3::MINUS_X).is_err());
    }

    #[test]
    fn angles() {
        let right = Direction3::PLUS_X.angle_to(Direction3::PLUS_Z).unwrap();
        assert_eq!(right, Angle::RIGHT);
        assert_eq!(Direction3::PLUS_X.angle_to(Direction3::MINUS_X).unwrap(), Angle::HALF_TURN);
        assert_eq!(Direction3::PLUS_Z.negated(), Direction3::MINUS_Z);
    }
}
