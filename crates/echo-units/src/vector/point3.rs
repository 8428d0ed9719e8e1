// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Positions: exact [`Point3`] and approximate [`Point3d`].

use core::fmt;

use super::{stable, Distance3d, Length3};
use crate::error::{ensure_finite, MathResult};
use crate::units::{Length, LengthUnit};

quantity_triple! {
    /// Exact position with nanometre resolution per axis.
    ///
    /// Points and displacements are distinct types: a point plus a
    /// [`Length3`] is a point, and the difference of two points is a
    /// [`Length3`]. Adding two points is not defined.
    Point3(Length, LengthUnit) {
        x / set_x / with_x,
        y / set_y / with_y,
        z / set_z / with_z,
    }
}

impl Point3 {
    /// The origin.
    pub const ORIGIN: Self = Self::ZERO;

    /// Point at whole metres per axis.
    pub fn from_meters(x: i64, y: i64, z: i64) -> MathResult<Self> {
        Self::from_units(x, y, z, LengthUnit::Meter)
    }

    /// `self + offset`.
    pub fn checked_add(self, offset: Length3) -> MathResult<Self> {
        Ok(Self::new(
            self.x.checked_add(offset.dx())?,
            self.y.checked_add(offset.dy())?,
            self.z.checked_add(offset.dz())?,
        ))
    }

    /// `self - offset`.
    pub fn checked_sub(self, offset: Length3) -> MathResult<Self> {
        Ok(Self::new(
            self.x.checked_sub(offset.dx())?,
            self.y.checked_sub(offset.dy())?,
            self.z.checked_sub(offset.dz())?,
        ))
    }

    /// Displacement from `self` to `to`.
    pub fn vector_to(self, to: Self) -> MathResult<Length3> {
        Ok(Length3::new(
            to.x.checked_sub(self.x)?,
            to.y.checked_sub(self.y)?,
            to.z.checked_sub(self.z)?,
        ))
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Self) -> MathResult<Length> {
        self.vector_to(other)?.magnitude()
    }

    /// Linear interpolation toward `other`.
    pub fn lerp(self, other: Self, t: f64) -> MathResult<Self> {
        Ok(Self::new(
            self.x.lerp(other.x, t)?,
            self.y.lerp(other.y, t)?,
            self.z.lerp(other.z, t)?,
        ))
    }

    /// Displacement from the origin.
    pub const fn to_length3(self) -> Length3 {
        Length3::new(self.x, self.y, self.z)
    }

    /// Point at `offset` from the origin.
    pub const fn from_length3(offset: Length3) -> Self {
        Self::new(offset.dx(), offset.dy(), offset.dz())
    }

    /// Position in metres as `f64`.
    pub fn to_point3d(self) -> Point3d {
        let [x, y, z] = self.to_f64_array(LengthUnit::Meter);
        Point3d::new(x, y, z)
    }

    /// Rounds a metre position to the nearest nanometre per axis.
    pub fn from_point3d(p: Point3d) -> MathResult<Self> {
        Ok(Self::new(
            Length::from_meters_f64(p.x)?,
            Length::from_meters_f64(p.y)?,
            Length::from_meters_f64(p.z)?,
        ))
    }
}

impl crate::observe::Mutable<Point3> {
    /// Moves the point by `offset`; nothing changes on overflow.
    pub fn translate(&self, offset: Length3) -> MathResult<()> {
        self.mutate(|p| {
            *p = p.checked_add(offset)?;
            Ok(())
        })
    }
}

/// Position in metres as `f64`, compared with a tolerance.
///
/// Two points are equal when every component differs by at most
/// [`Point3d::EPSILON`], or both components are NaN. There is no `Eq` or
/// `Hash` since tolerance equality is not transitive.
#[derive(Debug, Copy, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3d {
    /// X in metres.
    pub x: f64,
    /// Y in metres.
    pub y: f64,
    /// Z in metres.
    pub z: f64,
}

impl Point3d {
    /// Per-component equality tolerance, one nanometre.
    pub const EPSILON: f64 = 1e-9;

    /// The origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Builds from metre components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Components as an array.
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// `true` when every component is within [`Self::EPSILON`] of zero.
    /// NaN components are never zero.
    pub fn is_zero(self) -> bool {
        self.to_array().iter().all(|c| c.abs() <= Self::EPSILON)
    }

    /// `self + offset`.
    pub fn offset_by(self, offset: Distance3d) -> Self {
        Self::new(self.x + offset.dx(), self.y + offset.dy(), self.z + offset.dz())
    }

    /// Displacement from `self` to `to`. Both points must be finite.
    pub fn vector_to(self, to: Self) -> MathResult<Distance3d> {
        for c in self.to_array().into_iter().chain(to.to_array()) {
            ensure_finite("Point3d::vector_to", "point component", c)?;
        }
        Distance3d::from_computed(
            "Point3d::vector_to",
            [to.x - self.x, to.y - self.y, to.z - self.z],
        )
    }

    /// Euclidean distance in metres.
    pub fn distance_to(self, other: Self) -> f64 {
        stable::magnitude([other.x - self.x, other.y - self.y, other.z - self.z])
    }

    /// Linear interpolation toward `other`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || (a - b).abs() <= Point3d::EPSILON || a == b
}

impl PartialEq for Point3d {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y) && approx_eq(self.z, other.z)
    }
}

impl fmt::Display for Point3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}m, {}m, {}m)", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_vector_algebra() {
        let a = Point3::from_meters(1, 2, 3).unwrap();
        let b = Point3::from_meters(4, 6, 3).unwrap();
        let d = a.vector_to(b).unwrap();
        assert_eq!(d, Length3::from_meters(3, 4, 0).unwrap());
        assert_eq!(a.checked_add(d).unwrap(), b);
        assert_eq!(b.checked_sub(d).unwrap(), a);
        assert_eq!(a.distance_to(b).unwrap(), Length::from_meters(5).unwrap());
        assert_eq!(a.lerp(b, 0.5).unwrap().y(), Length::from_meters(4).unwrap());
    }

    #[test]
    fn point3d_tolerant_equality() {
        let a = Point3d::new(1.0, 2.0, 3.0);
        assert_eq!(a, Point3d::new(1.0 + 1e-10, 2.0, 3.0));
        assert_ne!(a, Point3d::new(1.0 + 1e-6, 2.0, 3.0));
        let n = Point3d::new(f64::NAN, 0.0, 0.0);
        assert_eq!(n, n);
        assert!(!n.is_zero());
        assert!(Point3d::new(1e-12, -1e-12, 0.0).is_zero());
        assert_eq!(Point3d::new(f64::INFINITY, 0.0, 0.0), Point3d::new(f64::INFINITY, 0.0, 0.0));
    }

    #[test]
    fn point3d_vector_to_requires_finite_points() {
        let a = Point3d::new(1.0, 2.0, 3.0);
        let b = Point3d::new(4.0, 6.0, 3.0);
        assert_eq!(a.vector_to(b).unwrap(), Distance3d::new(3.0, 4.0, 0.0).unwrap());
        assert_eq!(a.distance_to(b), 5.0);
        let nan = Point3d::new(f64::NAN, 0.0, 0.0);
        let err = a.vector_to(nan).unwrap_err();
        assert_eq!(err.kind(), crate::error::MathErrorKind::InvalidArgument);
        let far = Point3d::new(f64::MAX, 0.0, 0.0);
        let err = Point3d::new(-f64::MAX, 0.0, 0.0).vector_to(far).unwrap_err();
        assert_eq!(err.kind(), crate::error::MathErrorKind::Overflow);
    }

    #[test]
    fn translate_in_place() {
        let cell = crate::observe::Mutable::new(Point3::ORIGIN);
        cell.translate(Length3::from_meters(0, 0, 2).unwrap()).unwrap();
        assert_eq!(cell.z(), Length::from_meters(2).unwrap());
        assert_eq!(cell.get().to_point3d(), Point3d::new(0.0, 0.0, 2.0));
    }
}
