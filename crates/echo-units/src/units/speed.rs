// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Speed stored as an integer number of nanometres per hour.
//!
//! Nanometres per hour is the largest common divisor of the metric, nautical,
//! and imperial speed units, so all of them convert exactly.

use core::time::Duration;

use super::acceleration::Acceleration;
use super::fixed;
use super::length::Length;
use super::quantity::{Kind, Quantity, Unit};
use crate::config::FormatPrefs;
use crate::error::{MathError, MathResult};

/// Nanoseconds in one hour.
pub(crate) const NANOS_PER_HOUR: i128 = 3_600_000_000_000;

/// Units of speed. The smallest unit is the nanometre per hour.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpeedUnit {
    /// 1 nm/h.
    NanometerPerHour,
    /// 1 mm/s = 3.6·10⁹ nm/h.
    MillimeterPerSecond,
    /// 1 m/s.
    MeterPerSecond,
    /// 1 km/h.
    KilometerPerHour,
    /// 1 km/s.
    KilometerPerSecond,
    /// One nautical mile (1 852 m) per hour.
    Knot,
    /// One international mile per hour.
    MilePerHour,
}

impl Unit for SpeedUnit {
    fn ticks(self) -> i64 {
        match self {
            Self::NanometerPerHour => 1,
            Self::MillimeterPerSecond => 3_600_000_000,
            Self::MeterPerSecond => 3_600_000_000_000,
            Self::KilometerPerHour => 1_000_000_000_000,
            Self::KilometerPerSecond => 3_600_000_000_000_000,
            Self::Knot => 1_852_000_000_000,
            Self::MilePerHour => 1_609_344_000_000,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::NanometerPerHour => "nm/h",
            Self::MillimeterPerSecond => "mm/s",
            Self::MeterPerSecond => "m/s",
            Self::KilometerPerHour => "km/h",
            Self::KilometerPerSecond => "km/s",
            Self::Knot => "kn",
            Self::MilePerHour => "mph",
        }
    }
}

/// Marker for the speed dimension.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpeedKind {}

impl Kind for SpeedKind {
    type Unit = SpeedUnit;
    const NAME: &'static str = "Speed";
    const BASE_UNIT: SpeedUnit = SpeedUnit::NanometerPerHour;
    const DISPLAY_UNITS: &'static [SpeedUnit] = &[
        SpeedUnit::KilometerPerSecond,
        SpeedUnit::MeterPerSecond,
        SpeedUnit::MillimeterPerSecond,
        SpeedUnit::NanometerPerHour,
    ];
    const ZERO_UNIT: SpeedUnit = SpeedUnit::MeterPerSecond;

    fn preferred_unit(prefs: &FormatPrefs) -> Option<SpeedUnit> {
        prefs.speed_unit
    }
}

/// Signed speed with nanometre-per-hour resolution.
pub type Speed = Quantity<SpeedKind>;

impl Quantity<SpeedKind> {
    /// Speed of `value` metres per second.
    pub fn from_meters_per_second(value: i64) -> MathResult<Self> {
        Self::new(value, SpeedUnit::MeterPerSecond)
    }

    /// Speed of `value` kilometres per hour.
    pub fn from_kilometers_per_hour(value: i64) -> MathResult<Self> {
        Self::new(value, SpeedUnit::KilometerPerHour)
    }

    /// Fractional metres per second.
    pub fn in_meters_per_second(self) -> f64 {
        self.to_f64(SpeedUnit::MeterPerSecond)
    }

    /// Distance covered at this speed over `elapsed`, rounded to the nearest
    /// nanometre.
    pub fn times(self, elapsed: Duration) -> MathResult<Length> {
        let nanos = fixed::duration_nanos("Speed::times", elapsed)?;
        fixed::mul_div_round(i128::from(self.raw()), nanos, NANOS_PER_HOUR)
            .map(Length::from_raw)
            .ok_or_else(|| {
                MathError::overflow(
                    "Speed::times",
                    format!("{self} over {elapsed:?} does not fit a Length"),
                )
            })
    }

    /// Constant acceleration that reaches this speed from rest in `elapsed`.
    pub fn per(self, elapsed: Duration) -> MathResult<Acceleration> {
        let nanos = fixed::nonzero_duration_nanos("Speed::per", elapsed)?;
        // nm/h → nm/s is ÷3600; ÷(nanos/1e9) seconds
        let divisor = nanos.checked_mul(3_600).ok_or_else(|| {
            MathError::invalid_argument("Speed::per", format!("duration {elapsed:?} is too long"))
        })?;
        fixed::mul_div_round(i128::from(self.raw()), 1_000_000_000, divisor)
            .map(Acceleration::from_raw)
            .ok_or_else(|| {
                MathError::overflow(
                    "Speed::per",
                    format!("{self} per {elapsed:?} does not fit an Acceleration"),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::AccelerationUnit;

    #[test]
    fn kilometers_per_hour_to_meters_per_second() {
        let s = Speed::from_kilometers_per_hour(36).unwrap();
        assert_eq!(s.in_meters_per_second(), 10.0);
        assert_eq!(s.to_string(), "10m/s");
    }

    #[test]
    fn knots_are_exact() {
        let kn = Speed::new(1, SpeedUnit::Knot).unwrap();
        assert_eq!(kn.to_long(SpeedUnit::NanometerPerHour), 1_852_000_000_000);
    }

    #[test]
    fn times_duration_is_distance() {
        let s = Speed::from_meters_per_second(3).unwrap();
        let l = s.times(Duration::from_millis(1500)).unwrap();
        assert_eq!(l, Length::from_millimeters(4500).unwrap());
    }

    #[test]
    fn per_duration_is_acceleration() {
        let s = Speed::from_meters_per_second(10).unwrap();
        let a = s.per(Duration::from_secs(4)).unwrap();
        assert_eq!(a.to_f64(AccelerationUnit::MeterPerSecondSquared), 2.5);
        assert!(s.per(Duration::ZERO).is_err());
    }
}
