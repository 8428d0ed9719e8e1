// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Unit suffix methods on numeric literals: `1500_i64.millimeters()`,
//! `90.0.degrees()`.

use super::acceleration::{Acceleration, AccelerationUnit};
use super::angle::{Angle, AngleUnit};
use super::area::{Area, AreaUnit};
use super::length::{Length, LengthUnit};
use super::proportion::{Proportion, ProportionUnit};
use super::quantity::{Kind, Quantity};
use super::speed::{Speed, SpeedUnit};
use crate::error::MathResult;

/// Numeric types that can be tagged with a unit.
///
/// Implemented for `i64` (exact) and `f64` (rounded to the nearest tick).
pub trait QuantityLiteral: Copy {
    /// Builds a quantity of this many `unit`.
    fn of<K: Kind>(self, unit: K::Unit) -> MathResult<Quantity<K>>;

    /// Builds a proportion of this many `unit`.
    fn proportion(self, unit: ProportionUnit) -> MathResult<Proportion>;

    /// Nanometres.
    fn nanometers(self) -> MathResult<Length> {
        self.of(LengthUnit::Nanometer)
    }

    /// Millimetres.
    fn millimeters(self) -> MathResult<Length> {
        self.of(LengthUnit::Millimeter)
    }

    /// Centimetres.
    fn centimeters(self) -> MathResult<Length> {
        self.of(LengthUnit::Centimeter)
    }

    /// Metres.
    fn meters(self) -> MathResult<Length> {
        self.of(LengthUnit::Meter)
    }

    /// Kilometres.
    fn kilometers(self) -> MathResult<Length> {
        self.of(LengthUnit::Kilometer)
    }

    /// Square metres.
    fn square_meters(self) -> MathResult<Area> {
        self.of(AreaUnit::SquareMeter)
    }

    /// Degrees.
    fn degrees(self) -> MathResult<Angle> {
        self.of(AngleUnit::Degree)
    }

    /// Metres per second.
    fn meters_per_second(self) -> MathResult<Speed> {
        self.of(SpeedUnit::MeterPerSecond)
    }

    /// Kilometres per hour.
    fn kilometers_per_hour(self) -> MathResult<Speed> {
        self.of(SpeedUnit::KilometerPerHour)
    }

    /// Metres per second squared.
    fn meters_per_second_squared(self) -> MathResult<Acceleration> {
        self.of(AccelerationUnit::MeterPerSecondSquared)
    }

    /// Percent, clamped into `[0, 100]`.
    fn percent(self) -> MathResult<Proportion> {
        self.proportion(ProportionUnit::Percent)
    }
}

impl QuantityLiteral for i64 {
    fn of<K: Kind>(self, unit: K::Unit) -> MathResult<Quantity<K>> {
        Quantity::new(self, unit)
    }

    fn proportion(self, unit: ProportionUnit) -> MathResult<Proportion> {
        Ok(Proportion::new(self, unit))
    }
}

impl QuantityLiteral for f64 {
    fn of<K: Kind>(self, unit: K::Unit) -> MathResult<Quantity<K>> {
        Quantity::from_f64(self, unit)
    }

    fn proportion(self, unit: ProportionUnit) -> MathResult<Proportion> {
        Proportion::from_f64(self, unit)
    }
}

/// Radians have no integer unit; only floats get this suffix.
pub trait RadiansLiteral {
    /// Radians, rounded to the nearest micro-arcsecond.
    fn radians(self) -> MathResult<Angle>;
}

impl RadiansLiteral for f64 {
    fn radians(self) -> MathResult<Angle> {
        Angle::from_radians(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_literals_are_exact() {
        assert_eq!(1500_i64.millimeters().unwrap().to_string(), "1.5m");
        assert_eq!(90_i64.degrees().unwrap(), Angle::RIGHT);
        assert_eq!(50_i64.percent().unwrap(), Proportion::HALF);
    }

    #[test]
    fn float_literals_round() {
        assert_eq!(1.5_f64.meters().unwrap(), 1500_i64.millimeters().unwrap());
        assert!(f64::NAN.meters().is_err());
        assert_eq!(core::f64::consts::FRAC_PI_2.radians().unwrap(), Angle::RIGHT);
    }

    #[test]
    fn overflow_is_reported() {
        assert!(i64::MAX.kilometers().is_err());
    }
}
