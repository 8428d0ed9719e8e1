// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::Neg;

use super::{stable, Direction3};
use crate::error::{ensure_finite, MathError, MathResult};

/// Displacement in metres as `f64`.
///
/// Every component is finite. Components are canonicalised on construction
/// (`-0.0 → 0.0`), so equality and hashing are exact on the bit pattern.
#[derive(Debug, Copy, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[f64; 3]", into = "[f64; 3]"))]
pub struct Distance3d {
    dx: f64,
    dy: f64,
    dz: f64,
}

impl Distance3d {
    /// Zero displacement.
    pub const ZERO: Self = Self {
        dx: 0.0,
        dy: 0.0,
        dz: 0.0,
    };

    /// Builds from metre components; NaN or ±∞ is an `InvalidArgument`.
    pub fn new(dx: f64, dy: f64, dz: f64) -> MathResult<Self> {
        Ok(Self::from_finite([
            ensure_finite("Distance3d::new", "dx", dx)?,
            ensure_finite("Distance3d::new", "dy", dy)?,
            ensure_finite("Distance3d::new", "dz", dz)?,
        ]))
    }

    /// Wraps components the caller already knows to be finite.
    pub(crate) fn from_finite([dx, dy, dz]: [f64; 3]) -> Self {
        debug_assert!(dx.is_finite() && dy.is_finite() && dz.is_finite());
        Self {
            dx: stable::canonical(dx),
            dy: stable::canonical(dy),
            dz: stable::canonical(dz),
        }
    }

    /// Result of an arithmetic step; a non-finite component means the step
    /// left the `f64` range.
    pub(crate) fn from_computed(op: &'static str, c: [f64; 3]) -> MathResult<Self> {
        if c.iter().all(|v| v.is_finite()) {
            Ok(Self::from_finite(c))
        } else {
            Err(MathError::overflow(
                op,
                format!("result ({}, {}, {}) is not finite", c[0], c[1], c[2]),
            ))
        }
    }

    /// X in metres.
    pub const fn dx(self) -> f64 {
        self.dx
    }

    /// Y in metres.
    pub const fn dy(self) -> f64 {
        self.dy
    }

    /// Z in metres.
    pub const fn dz(self) -> f64 {
        self.dz
    }

    /// Components as an array.
    pub const fn to_array(self) -> [f64; 3] {
        [self.dx, self.dy, self.dz]
    }

    /// Euclidean length in metres, computed without intermediate overflow.
    pub fn magnitude(self) -> f64 {
        stable::magnitude(self.to_array())
    }

    /// Unit direction; `InvalidState` for the zero vector.
    pub fn normalized(self) -> MathResult<Direction3> {
        Direction3::new(self.dx, self.dy, self.dz)
    }

    /// Dot product.
    pub fn dot(self, rhs: Self) -> f64 {
        stable::dot(self.to_array(), rhs.to_array())
    }

    /// Component-wise sum.
    pub fn checked_add(self, rhs: Self) -> MathResult<Self> {
        Self::from_computed(
            "Distance3d::checked_add",
            [self.dx + rhs.dx, self.dy + rhs.dy, self.dz + rhs.dz],
        )
    }

    /// Component-wise difference.
    pub fn checked_sub(self, rhs: Self) -> MathResult<Self> {
        Self::from_computed(
            "Distance3d::checked_sub",
            [self.dx - rhs.dx, self.dy - rhs.dy, self.dz - rhs.dz],
        )
    }

    /// Multiplies every component by a finite `factor`.
    pub fn scaled_by(self, factor: f64) -> MathResult<Self> {
        let factor = ensure_finite("Distance3d::scaled_by", "factor", factor)?;
        Self::from_computed(
            "Distance3d::scaled_by",
            [self.dx * factor, self.dy * factor, self.dz * factor],
        )
    }

    /// Right-handed cross product.
    pub fn cross(self, rhs: Self) -> MathResult<Self> {
        Self::from_computed("Distance3d::cross", stable::cross(self.to_array(), rhs.to_array()))
    }

    /// Linear interpolation toward `rhs`.
    pub fn lerp(self, rhs: Self, t: f64) -> MathResult<Self> {
        self.checked_add(rhs.checked_sub(self)?.scaled_by(t)?)
    }
}

impl TryFrom<[f64; 3]> for Distance3d {
    type Error = MathError;

    fn try_from([dx, dy, dz]: [f64; 3]) -> MathResult<Self> {
        Self::new(dx, dy, dz)
    }
}

impl From<Distance3d> for [f64; 3] {
    fn from(d: Distance3d) -> Self {
        d.to_array()
    }
}

impl PartialEq for Distance3d {
    fn eq(&self, other: &Self) -> bool {
        self.to_array().map(stable::bits) == other.to_array().map(stable::bits)
    }
}

impl Eq for Distance3d {}

impl Hash for Distance3d {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_array().map(stable::bits).hash(state);
    }
}

impl Neg for Distance3d {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_finite([-self.dx, -self.dy, -self.dz])
    }
}

impl fmt::Display for Distance3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}m, {}m, {}m)", self.dx, self.dy, self.dz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathErrorKind;
    use std::collections::HashSet;

    fn d(x: f64, y: f64, z: f64) -> Distance3d {
        Distance3d::new(x, y, z).unwrap()
    }

    #[test]
    fn signed_zero_is_canonical() {
        let a = d(-0.0, 0.0, 0.0);
        assert_eq!(a, Distance3d::ZERO);
        let set: HashSet<_> = [a, Distance3d::ZERO].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn rejects_non_finite_components() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Distance3d::new(1.0, bad, 0.0).unwrap_err();
            assert_eq!(err.kind(), MathErrorKind::InvalidArgument);
            assert!(Distance3d::try_from([bad, 0.0, 0.0]).is_err());
            assert!(d(1.0, 0.0, 0.0).scaled_by(bad).is_err());
        }
    }

    #[test]
    fn arithmetic_reports_leaving_f64_range() {
        let huge = d(f64::MAX, 0.0, 0.0);
        assert_eq!(huge.checked_add(huge).unwrap_err().kind(), MathErrorKind::Overflow);
        assert_eq!(huge.scaled_by(2.0).unwrap_err().kind(), MathErrorKind::Overflow);
        assert_eq!((-huge).checked_sub(huge).unwrap_err().kind(), MathErrorKind::Overflow);
    }

    #[test]
    fn arithmetic() {
        let a = d(1.0, 2.0, 3.0);
        let b = d(4.0, 5.0, 6.0);
        assert_eq!(a.checked_add(b).unwrap(), d(5.0, 7.0, 9.0));
        assert_eq!(b.checked_sub(a).unwrap(), d(3.0, 3.0, 3.0));
        assert_eq!(-a, d(-1.0, -2.0, -3.0));
        assert_eq!(a.scaled_by(2.0).unwrap(), d(2.0, 4.0, 6.0));
        assert_eq!(a.lerp(b, 0.5).unwrap(), d(2.5, 3.5, 4.5));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(d(1.0, 0.0, 0.0).cross(d(0.0, 1.0, 0.0)).unwrap(), d(0.0, 0.0, 1.0));
        assert_eq!(d(0.0, 3.0, 4.0).magnitude(), 5.0);
    }

    #[test]
    fn normalizing_zero_fails() {
        assert!(Distance3d::ZERO.normalized().is_err());
    }
}
