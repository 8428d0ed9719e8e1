// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Axis-aligned bounding boxes over exact points.

use core::fmt;

use echo_units::{Length, Length3, MathError, MathResult, Mutable, Point3};

use super::transform::Transform;

/// Axis-aligned bounding box with exact corners.
///
/// Invariant: every component of `min` is less than or equal to its
/// counterpart in `max`. Constructors and setters sort the corners
/// component-wise rather than rejecting swapped input, so
/// `Aabb::new(a, b) == Aabb::new(b, a)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Aabb {
    min: Point3,
    max: Point3,
}

impl Aabb {
    /// Box spanning corners `a` and `b` in any order.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: a.min_components(b),
            max: a.max_components(b),
        }
    }

    /// Degenerate box containing exactly `p`.
    pub const fn from_point(p: Point3) -> Self {
        Self { min: p, max: p }
    }

    /// Box centred on `center` extending `half_extents` along each axis.
    /// Negative extents are mirrored.
    pub fn from_center_half_extents(center: Point3, half_extents: Length3) -> MathResult<Self> {
        Ok(Self::new(
            center.checked_sub(half_extents)?,
            center.checked_add(half_extents)?,
        ))
    }

    /// Smallest box containing every point; empty input is an
    /// `InvalidArgument`.
    pub fn from_points(points: &[Point3]) -> MathResult<Self> {
        let Some((first, rest)) = points.split_first() else {
            return Err(MathError::invalid_argument(
                "Aabb::from_points",
                "at least one point is required",
            ));
        };
        Ok(rest
            .iter()
            .fold(Self::from_point(*first), |acc, p| acc.including(*p)))
    }

    /// Minimum corner.
    pub const fn min(&self) -> Point3 {
        self.min
    }

    /// Maximum corner.
    pub const fn max(&self) -> Point3 {
        self.max
    }

    /// Replaces the minimum corner and re-sorts.
    pub fn with_min(self, min: Point3) -> Self {
        Self::new(min, self.max)
    }

    /// Replaces the maximum corner and re-sorts.
    pub fn with_max(self, max: Point3) -> Self {
        Self::new(self.min, max)
    }

    /// Smallest box containing `self` and `p`.
    pub fn including(self, p: Point3) -> Self {
        Self {
            min: self.min.min_components(p),
            max: self.max.max_components(p),
        }
    }

    /// `true` when the boxes overlap; touching faces, edges and corners
    /// count.
    pub fn intersects(&self, other: &Self) -> bool {
        let (a_min, a_max) = (self.min.to_array(), self.max.to_array());
        let (b_min, b_max) = (other.min.to_array(), other.max.to_array());
        (0..3).all(|i| a_max[i] >= b_min[i] && a_min[i] <= b_max[i])
    }

    /// `true` when `p` lies inside or on the boundary.
    pub fn contains(&self, p: Point3) -> bool {
        let (lo, hi, v) = (self.min.to_array(), self.max.to_array(), p.to_array());
        (0..3).all(|i| lo[i] <= v[i] && v[i] <= hi[i])
    }

    /// `true` when `other` lies entirely inside `self`.
    pub fn contains_aabb(&self, other: &Self) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min_components(other.min),
            max: self.max.max_components(other.max),
        }
    }

    /// Grows every face outward by `margin`. A negative margin shrinks the
    /// box; if it crosses over, the corners are re-sorted.
    pub fn inflate(&self, margin: Length) -> MathResult<Self> {
        let delta = Length3::splat(margin);
        Ok(Self::new(
            self.min.checked_sub(delta)?,
            self.max.checked_add(delta)?,
        ))
    }

    /// Midpoint, rounded toward negative infinity per axis. Never
    /// overflows.
    pub fn center(&self) -> Point3 {
        let mid = |a: Length, b: Length| {
            let sum = i128::from(a.raw()) + i128::from(b.raw());
            Length::from_raw(sum.div_euclid(2) as i64)
        };
        Point3::new(
            mid(self.min.x(), self.max.x()),
            mid(self.min.y(), self.max.y()),
            mid(self.min.z(), self.max.z()),
        )
    }

    /// Extent along each axis.
    pub fn size(&self) -> MathResult<Length3> {
        self.min.vector_to(self.max)
    }

    /// The eight corners, `min` first and `max` last.
    pub fn corners(&self) -> [Point3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x(), lo.y(), lo.z()),
            Point3::new(lo.x(), lo.y(), hi.z()),
            Point3::new(lo.x(), hi.y(), lo.z()),
            Point3::new(lo.x(), hi.y(), hi.z()),
            Point3::new(hi.x(), lo.y(), lo.z()),
            Point3::new(hi.x(), lo.y(), hi.z()),
            Point3::new(hi.x(), hi.y(), lo.z()),
            Point3::new(hi.x(), hi.y(), hi.z()),
        ]
    }

    /// Box bounding the eight corners after `transform`.
    pub fn transformed(&self, transform: &Transform) -> MathResult<Self> {
        let corners = self.corners();
        let mut out = Self::from_point(transform.transform_point(corners[0])?);
        for c in &corners[1..] {
            out = out.including(transform.transform_point(*c)?);
        }
        Ok(out)
    }
}

impl fmt::Display for Aabb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.min, self.max)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Aabb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            min: Point3,
            max: Point3,
        }
        let raw = Raw::deserialize(deserializer)?;
        Ok(Self::new(raw.min, raw.max))
    }
}

/// In-place editing of a shared box; every write keeps the corners sorted.
pub trait AabbCell {
    /// Current minimum corner.
    fn min(&self) -> Point3;
    /// Current maximum corner.
    fn max(&self) -> Point3;
    /// Replaces the minimum corner and re-sorts.
    fn set_min(&self, min: Point3);
    /// Replaces the maximum corner and re-sorts.
    fn set_max(&self, max: Point3);
    /// Grows the box to include `p`.
    fn include(&self, p: Point3);
}

impl AabbCell for Mutable<Aabb> {
    fn min(&self) -> Point3 {
        self.read(|b| b.min)
    }

    fn max(&self) -> Point3 {
        self.read(|b| b.max)
    }

    fn set_min(&self, min: Point3) {
        self.update(|b| *b = b.with_min(min));
    }

    fn set_max(&self, max: Point3) {
        self.update(|b| *b = b.with_max(max));
    }

    fn include(&self, p: Point3) {
        self.update(|b| *b = b.including(p));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use echo_units::{Angle, Direction3, MathErrorKind, Quaternion, Scale3};

    fn pt(x: i64, y: i64, z: i64) -> Point3 {
        Point3::from_meters(x, y, z).unwrap()
    }

    #[test]
    fn swapped_corners_are_sorted() {
        let b = Aabb::new(pt(0, 0, 10), pt(0, 0, 0));
        assert_eq!(b.min().z(), Length::ZERO);
        assert_eq!(b.max().z(), Length::from_meters(10).unwrap());
        assert_eq!(b, Aabb::new(pt(0, 0, 0), pt(0, 0, 10)));
    }

    #[test]
    fn touching_boxes_intersect() {
        let a = Aabb::new(pt(0, 0, 0), pt(1, 1, 1));
        let b = Aabb::new(pt(1, 1, 1), pt(2, 2, 2));
        let c = Aabb::new(pt(2, 0, 0), pt(3, 1, 1));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(a.contains(pt(1, 0, 1)));
        assert!(!a.contains(pt(2, 0, 0)));
    }

    #[test]
    fn from_points_and_union() {
        let b = Aabb::from_points(&[pt(3, -1, 0), pt(-2, 4, 1), pt(0, 0, -5)]).unwrap();
        assert_eq!(b.min(), pt(-2, -1, -5));
        assert_eq!(b.max(), pt(3, 4, 1));
        assert_eq!(Aabb::from_points(&[]).unwrap_err().kind(), MathErrorKind::InvalidArgument);
        let u = b.union(&Aabb::from_point(pt(10, 0, 0)));
        assert_eq!(u.max().x(), Length::from_meters(10).unwrap());
        assert!(u.contains_aabb(&b));
    }

    #[test]
    fn inflate_center_size() {
        let b = Aabb::new(pt(0, 0, 0), pt(2, 4, 6));
        assert_eq!(b.center(), pt(1, 2, 3));
        assert_eq!(b.size().unwrap(), Length3::from_meters(2, 4, 6).unwrap());
        let grown = b.inflate(Length::from_meters(1).unwrap()).unwrap();
        assert_eq!(grown.min(), pt(-1, -1, -1));
        let shrunk = b.inflate(Length::from_meters(-2).unwrap()).unwrap();
        assert_eq!(shrunk.min(), pt(0, 2, 2));
        assert_eq!(shrunk.max(), pt(2, 2, 4));
        let huge = Aabb::from_point(Point3::new(Length::MAX, Length::MAX, Length::MAX));
        assert_eq!(huge.center(), huge.min());
        assert!(huge.inflate(Length::from_nanometers(1)).is_err());
    }

    #[test]
    fn transformed_bounds_rotated_box() {
        let b = Aabb::new(pt(0, 0, 0), pt(2, 1, 1));
        let t = Transform::new(
            Length3::from_meters(10, 0, 0).unwrap(),
            Quaternion::from_axis_angle(Direction3::PLUS_Z, Angle::RIGHT),
            Scale3::IDENTITY,
        );
        let out = b.transformed(&t).unwrap();
        assert_eq!(out.min(), pt(9, 0, 0));
        assert_eq!(out.max(), pt(10, 2, 1));
    }

    #[test]
    fn cell_writes_resort() {
        let cell = Mutable::new(Aabb::new(pt(0, 0, 0), pt(1, 1, 1)));
        cell.set_min(pt(5, 0, 0));
        assert_eq!(AabbCell::min(&cell), pt(1, 0, 0));
        assert_eq!(AabbCell::max(&cell), pt(5, 1, 1));
        cell.include(pt(-1, -1, -1));
        assert_eq!(AabbCell::min(&cell), pt(-1, -1, -1));
    }
}
