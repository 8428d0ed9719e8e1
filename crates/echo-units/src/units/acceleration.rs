// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Acceleration stored as an integer number of nanometres per second squared.

use core::time::Duration;

use super::fixed;
use super::quantity::{Kind, Quantity, Unit};
use super::speed::Speed;
use crate::config::FormatPrefs;
use crate::error::{MathError, MathResult};

/// Units of acceleration. The smallest unit is nm/s².
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AccelerationUnit {
    /// 1 nm/s².
    NanometerPerSecondSquared,
    /// 1 mm/s².
    MillimeterPerSecondSquared,
    /// 1 m/s².
    MeterPerSecondSquared,
    /// Standard gravity, 9.80665 m/s².
    StandardGravity,
}

impl Unit for AccelerationUnit {
    fn ticks(self) -> i64 {
        match self {
            Self::NanometerPerSecondSquared => 1,
            Self::MillimeterPerSecondSquared => 1_000_000,
            Self::MeterPerSecondSquared => 1_000_000_000,
            Self::StandardGravity => 9_806_650_000,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::NanometerPerSecondSquared => "nm/s²",
            Self::MillimeterPerSecondSquared => "mm/s²",
            Self::MeterPerSecondSquared => "m/s²",
            Self::StandardGravity => "g",
        }
    }
}

/// Marker for the acceleration dimension.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccelerationKind {}

impl Kind for AccelerationKind {
    type Unit = AccelerationUnit;
    const NAME: &'static str = "Acceleration";
    const BASE_UNIT: AccelerationUnit = AccelerationUnit::NanometerPerSecondSquared;
    const DISPLAY_UNITS: &'static [AccelerationUnit] = &[
        AccelerationUnit::MeterPerSecondSquared,
        AccelerationUnit::MillimeterPerSecondSquared,
        AccelerationUnit::NanometerPerSecondSquared,
    ];
    const ZERO_UNIT: AccelerationUnit = AccelerationUnit::MeterPerSecondSquared;

    fn preferred_unit(prefs: &FormatPrefs) -> Option<AccelerationUnit> {
        prefs.acceleration_unit
    }
}

/// Signed acceleration with nm/s² resolution.
pub type Acceleration = Quantity<AccelerationKind>;

impl Quantity<AccelerationKind> {
    /// Standard gravity.
    pub const STANDARD_GRAVITY: Self = Self::from_raw(9_806_650_000);

    /// Acceleration of `value` m/s².
    pub fn from_meters_per_second_squared(value: i64) -> MathResult<Self> {
        Self::new(value, AccelerationUnit::MeterPerSecondSquared)
    }

    /// Speed gained from rest after accelerating for `elapsed`.
    pub fn times(self, elapsed: Duration) -> MathResult<Speed> {
        let nanos = fixed::duration_nanos("Acceleration::times", elapsed)?;
        // nm/s² * s = nm/s; * 3600 = nm/h
        let factor = nanos.checked_mul(3_600).ok_or_else(|| {
            MathError::invalid_argument(
                "Acceleration::times",
                format!("duration {elapsed:?} is too long"),
            )
        })?;
        fixed::mul_div_round(i128::from(self.raw()), factor, 1_000_000_000)
            .map(Speed::from_raw)
            .ok_or_else(|| {
                MathError::overflow(
                    "Acceleration::times",
                    format!("{self} over {elapsed:?} does not fit a Speed"),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_displays_in_si() {
        assert_eq!(Acceleration::STANDARD_GRAVITY.to_string(), "9.80665m/s²");
        assert_eq!(
            Acceleration::new(1, AccelerationUnit::StandardGravity).unwrap(),
            Acceleration::STANDARD_GRAVITY
        );
    }

    #[test]
    fn times_duration_is_speed() {
        let a = Acceleration::from_meters_per_second_squared(2).unwrap();
        let v = a.times(Duration::from_secs(5)).unwrap();
        assert_eq!(v, Speed::from_meters_per_second(10).unwrap());
    }
}
