// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-axis scale factors.

use core::fmt;
use core::hash::{Hash, Hasher};

use super::{stable, Area3, Distance3d, Length3};
use crate::error::{ensure_finite, MathError, MathResult};
use crate::observe::Mutable;

/// Per-axis scale factors. Every factor is finite; zero is allowed but
/// makes the scale non-invertible.
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Scale3 {
    sx: f64,
    sy: f64,
    sz: f64,
}

impl Scale3 {
    /// No scaling.
    pub const IDENTITY: Self = Self {
        sx: 1.0,
        sy: 1.0,
        sz: 1.0,
    };

    /// Builds from finite factors.
    pub fn new(sx: f64, sy: f64, sz: f64) -> MathResult<Self> {
        Ok(Self {
            sx: stable::canonical(ensure_finite("Scale3::new", "sx", sx)?),
            sy: stable::canonical(ensure_finite("Scale3::new", "sy", sy)?),
            sz: stable::canonical(ensure_finite("Scale3::new", "sz", sz)?),
        })
    }

    /// The same factor on every axis.
    pub fn uniform(s: f64) -> MathResult<Self> {
        Self::new(s, s, s)
    }

    /// X factor.
    pub const fn sx(self) -> f64 {
        self.sx
    }

    /// Y factor.
    pub const fn sy(self) -> f64 {
        self.sy
    }

    /// Z factor.
    pub const fn sz(self) -> f64 {
        self.sz
    }

    /// Factors as an array.
    pub const fn to_array(self) -> [f64; 3] {
        [self.sx, self.sy, self.sz]
    }

    /// `true` when all three factors are equal.
    pub fn is_uniform(self) -> bool {
        self.sx == self.sy && self.sy == self.sz
    }

    /// `true` when any factor is zero.
    pub fn has_zero(self) -> bool {
        self.to_array().contains(&0.0)
    }

    /// Component-wise product: scaling by `self` then by `rhs`.
    pub fn product(self, rhs: Self) -> MathResult<Self> {
        Self::new(self.sx * rhs.sx, self.sy * rhs.sy, self.sz * rhs.sz).map_err(|_| {
            MathError::overflow("Scale3::product", format!("{self} * {rhs} is not finite"))
        })
    }

    /// Reciprocal factors. A zero factor is an `InvalidState`.
    pub fn inverse(self) -> MathResult<Self> {
        if self.has_zero() {
            return Err(MathError::invalid_state(
                "Scale3::inverse",
                format!("cannot invert scale {self} with a zero factor"),
            ));
        }
        Self::new(1.0 / self.sx, 1.0 / self.sy, 1.0 / self.sz)
    }

    /// Scales each axis of a displacement.
    pub fn scale_length3(self, v: Length3) -> MathResult<Length3> {
        Ok(Length3::new(
            v.dx().scaled_by(self.sx)?,
            v.dy().scaled_by(self.sy)?,
            v.dz().scaled_by(self.sz)?,
        ))
    }

    /// Scales an oriented area. The x component lies in the y–z plane, so
    /// it scales by `sy·sz`; likewise for the others.
    pub fn scale_area3(self, a: Area3) -> MathResult<Area3> {
        Ok(Area3::new(
            a.dx().scaled_by(self.sy * self.sz)?,
            a.dy().scaled_by(self.sz * self.sx)?,
            a.dz().scaled_by(self.sx * self.sy)?,
        ))
    }

    /// Scales each axis of a metre displacement.
    pub fn scale_distance(self, d: Distance3d) -> MathResult<Distance3d> {
        Distance3d::from_computed(
            "Scale3::scale_distance",
            [d.dx() * self.sx, d.dy() * self.sy, d.dz() * self.sz],
        )
    }
}

impl Default for Scale3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Scale3 {
    fn eq(&self, other: &Self) -> bool {
        self.to_array().map(stable::bits) == other.to_array().map(stable::bits)
    }
}

impl Eq for Scale3 {}

impl Hash for Scale3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_array().map(stable::bits).hash(state);
    }
}

impl fmt::Display for Scale3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}×, {}×, {}×)", self.sx, self.sy, self.sz)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Scale3 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            sx: f64,
            sy: f64,
            sz: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.sx, raw.sy, raw.sz).map_err(serde::de::Error::custom)
    }
}

impl Mutable<Scale3> {
    /// Current X factor.
    pub fn sx(&self) -> f64 {
        self.read(|s| s.sx)
    }

    /// Current Y factor.
    pub fn sy(&self) -> f64 {
        self.read(|s| s.sy)
    }

    /// Current Z factor.
    pub fn sz(&self) -> f64 {
        self.read(|s| s.sz)
    }

    /// Replaces the X factor; rejects non-finite values.
    pub fn set_sx(&self, sx: f64) -> MathResult<()> {
        self.mutate(|s| {
            *s = Scale3::new(sx, s.sy, s.sz)?;
            Ok(())
        })
    }

    /// Replaces the Y factor.
    pub fn set_sy(&self, sy: f64) -> MathResult<()> {
        self.mutate(|s| {
            *s = Scale3::new(s.sx, sy, s.sz)?;
            Ok(())
        })
    }

    /// Replaces the Z factor.
    pub fn set_sz(&self, sz: f64) -> MathResult<()> {
        self.mutate(|s| {
            *s = Scale3::new(s.sx, s.sy, sz)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathErrorKind;
    use crate::units::{Area, Length};

    #[test]
    fn inverse_and_zero() {
        let s = Scale3::new(2.0, 4.0, 0.5).unwrap();
        assert_eq!(s.inverse().unwrap(), Scale3::new(0.5, 0.25, 2.0).unwrap());
        assert_eq!(s.product(s.inverse().unwrap()).unwrap(), Scale3::IDENTITY);
        let flat = Scale3::new(1.0, 0.0, 1.0).unwrap();
        assert_eq!(flat.inverse().unwrap_err().kind(), MathErrorKind::InvalidState);
        assert!(Scale3::new(f64::NAN, 1.0, 1.0).is_err());
    }

    #[test]
    fn scales_lengths_and_areas() {
        let s = Scale3::new(2.0, 3.0, 4.0).unwrap();
        let v = Length3::from_meters(1, 1, 1).unwrap();
        assert_eq!(s.scale_length3(v).unwrap(), Length3::from_meters(2, 3, 4).unwrap());
        let a = Area3::splat(Area::from_square_meters(1).unwrap());
        let scaled = s.scale_area3(a).unwrap();
        assert_eq!(scaled.dx(), Area::from_square_meters(12).unwrap());
        assert_eq!(scaled.dz(), Area::from_square_meters(6).unwrap());
        assert_eq!(s.scale_length3(v).unwrap().dx(), Length::from_meters(2).unwrap());
        let d = Distance3d::new(1.0, 1.0, f64::MAX).unwrap();
        assert_eq!(s.scale_distance(d).unwrap_err().kind(), MathErrorKind::Overflow);
        let unit = Distance3d::new(1.0, 1.0, 1.0).unwrap();
        assert_eq!(s.scale_distance(unit).unwrap(), Distance3d::new(2.0, 3.0, 4.0).unwrap());
    }

    #[test]
    fn uniformity() {
        assert!(Scale3::uniform(3.0).unwrap().is_uniform());
        assert!(!Scale3::new(1.0, 2.0, 1.0).unwrap().is_uniform());
        assert_eq!(Scale3::new(-0.0, 1.0, 1.0).unwrap(), Scale3::new(0.0, 1.0, 1.0).unwrap());
    }
}
