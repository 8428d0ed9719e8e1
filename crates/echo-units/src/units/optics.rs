// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Camera lens parameters: field of view and clip distances.

use core::fmt;

use super::angle::Angle;
use super::length::Length;
use crate::error::{MathError, MathResult};

/// Vertical field of view, strictly between zero and half a turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Fov {
    angle: Angle,
}

impl Fov {
    /// Wraps `angle` after checking it lies in `(0, π)`.
    pub fn new(angle: Angle) -> MathResult<Self> {
        if angle.is_positive() && angle < Angle::HALF_TURN {
            Ok(Self { angle })
        } else {
            Err(MathError::invalid_state(
                "Fov::new",
                format!("field of view must lie in (0°, 180°), got {angle}"),
            ))
        }
    }

    /// Field of view of `degrees` whole degrees.
    pub fn from_degrees(degrees: i64) -> MathResult<Self> {
        Self::new(Angle::from_degrees(degrees)?)
    }

    /// The vertical angle.
    pub const fn angle(self) -> Angle {
        self.angle
    }

    /// Horizontal field of view for a viewport of the given `aspect`
    /// (width / height).
    pub fn horizontal_for(self, aspect: f64) -> MathResult<Self> {
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(MathError::invalid_argument(
                "Fov::horizontal_for",
                format!("aspect must be finite and > 0, got {aspect}"),
            ));
        }
        let half = libm::tan(self.angle.to_radians() * 0.5);
        Self::new(Angle::from_radians(2.0 * libm::atan(half * aspect))?)
    }

    /// `1 / tan(fov / 2)`, the focal scale used by perspective projection.
    pub fn focal_scale(self) -> f64 {
        1.0 / libm::tan(self.angle.to_radians() * 0.5)
    }
}

impl fmt::Display for Fov {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.angle, f)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Fov {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            angle: Angle,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.angle).map_err(serde::de::Error::custom)
    }
}

/// Near and far clip distances. `far == None` is an infinite far plane.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NearFar {
    near: Length,
    far: Option<Length>,
}

impl NearFar {
    /// Finite clip range; requires `0 < near < far`.
    pub fn new(near: Length, far: Length) -> MathResult<Self> {
        Self::check_near("NearFar::new", near)?;
        if far <= near {
            return Err(MathError::invalid_state(
                "NearFar::new",
                format!("far ({far}) must be greater than near ({near})"),
            ));
        }
        Ok(Self {
            near,
            far: Some(far),
        })
    }

    /// Clip range with the far plane at infinity.
    pub fn infinite(near: Length) -> MathResult<Self> {
        Self::check_near("NearFar::infinite", near)?;
        Ok(Self { near, far: None })
    }

    fn check_near(op: &'static str, near: Length) -> MathResult<()> {
        if near.is_positive() {
            Ok(())
        } else {
            Err(MathError::invalid_state(
                op,
                format!("near must be > 0, got {near}"),
            ))
        }
    }

    /// Near clip distance.
    pub const fn near(self) -> Length {
        self.near
    }

    /// Far clip distance, `None` when infinite.
    pub const fn far(self) -> Option<Length> {
        self.far
    }

    /// `true` when the far plane is at infinity.
    pub const fn is_infinite(self) -> bool {
        self.far.is_none()
    }

    /// Near distance in metres.
    pub fn near_meters(self) -> f64 {
        self.near.in_meters()
    }

    /// Far distance in metres; `f64::INFINITY` for an infinite far plane.
    pub fn far_meters(self) -> f64 {
        self.far.map_or(f64::INFINITY, Length::in_meters)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for NearFar {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            near: Length,
            far: Option<Length>,
        }
        let raw = Raw::deserialize(deserializer)?;
        match raw.far {
            Some(far) => Self::new(raw.near, far),
            None => Self::infinite(raw.near),
        }
        .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathErrorKind;

    #[test]
    fn fov_range_is_open() {
        assert!(Fov::from_degrees(60).is_ok());
        assert_eq!(
            Fov::from_degrees(0).unwrap_err().kind(),
            MathErrorKind::InvalidState
        );
        assert!(Fov::from_degrees(180).is_err());
        assert!(Fov::new(Angle::from_raw(-1)).is_err());
    }

    #[test]
    fn square_viewport_keeps_fov() {
        let fov = Fov::from_degrees(90).unwrap();
        let h = fov.horizontal_for(1.0).unwrap();
        assert!((h.angle().in_degrees() - 90.0).abs() < 1e-6);
        let wide = fov.horizontal_for(2.0).unwrap();
        assert!(wide.angle() > fov.angle());
    }

    #[test]
    fn near_far_ordering() {
        let near = Length::from_millimeters(100).unwrap();
        let far = Length::from_meters(1000).unwrap();
        let nf = NearFar::new(near, far).unwrap();
        assert_eq!(nf.far(), Some(far));
        assert!(NearFar::new(far, near).is_err());
        assert!(NearFar::new(Length::ZERO, far).is_err());
        let inf = NearFar::infinite(near).unwrap();
        assert!(inf.is_infinite());
        assert_eq!(inf.far_meters(), f64::INFINITY);
    }
}
