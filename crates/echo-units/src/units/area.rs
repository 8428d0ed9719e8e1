// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Area stored as an integer number of square millimetres.

use super::fixed;
use super::length::{Length, NM2_PER_MM2};
use super::quantity::{Kind, Quantity, Unit};
use crate::config::FormatPrefs;
use crate::error::{MathError, MathResult};

/// Units of area. The smallest unit is the square millimetre.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AreaUnit {
    /// 1 mm².
    SquareMillimeter,
    /// 1 cm² = 100 mm².
    SquareCentimeter,
    /// 1 m² = 10⁶ mm².
    SquareMeter,
    /// 1 ha = 10⁴ m².
    Hectare,
    /// 1 km² = 10⁶ m².
    SquareKilometer,
}

impl Unit for AreaUnit {
    fn ticks(self) -> i64 {
        match self {
            Self::SquareMillimeter => 1,
            Self::SquareCentimeter => 100,
            Self::SquareMeter => 1_000_000,
            Self::Hectare => 10_000_000_000,
            Self::SquareKilometer => 1_000_000_000_000,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::SquareMillimeter => "mm²",
            Self::SquareCentimeter => "cm²",
            Self::SquareMeter => "m²",
            Self::Hectare => "ha",
            Self::SquareKilometer => "km²",
        }
    }
}

/// Marker for the area dimension.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AreaKind {}

impl Kind for AreaKind {
    type Unit = AreaUnit;
    const NAME: &'static str = "Area";
    const BASE_UNIT: AreaUnit = AreaUnit::SquareMillimeter;
    const DISPLAY_UNITS: &'static [AreaUnit] = &[
        AreaUnit::SquareKilometer,
        AreaUnit::SquareMeter,
        AreaUnit::SquareMillimeter,
    ];
    const ZERO_UNIT: AreaUnit = AreaUnit::SquareMeter;

    fn preferred_unit(prefs: &FormatPrefs) -> Option<AreaUnit> {
        prefs.area_unit
    }
}

/// Signed area with square-millimetre resolution.
pub type Area = Quantity<AreaKind>;

impl Quantity<AreaKind> {
    /// Area of `value` square metres.
    pub fn from_square_meters(value: i64) -> MathResult<Self> {
        Self::new(value, AreaUnit::SquareMeter)
    }

    /// Fractional square metres.
    pub fn in_square_meters(self) -> f64 {
        self.to_f64(AreaUnit::SquareMeter)
    }

    /// Width of the rectangle with this area and the given `height`.
    pub fn div_length(self, height: Length) -> MathResult<Length> {
        if height.is_zero() {
            return Err(MathError::invalid_argument(
                "Area::div_length",
                "cannot divide an Area by a zero Length",
            ));
        }
        fixed::mul_div_round(i128::from(self.raw()), NM2_PER_MM2, i128::from(height.raw()))
            .map(Length::from_raw)
            .ok_or_else(|| {
                MathError::overflow(
                    "Area::div_length",
                    format!("{self} / {height} does not fit a Length"),
                )
            })
    }

    /// Side of the square with this area. Negative areas are rejected.
    pub fn sqrt(self) -> MathResult<Length> {
        if self.is_negative() {
            return Err(MathError::invalid_argument(
                "Area::sqrt",
                format!("cannot take the square root of negative area {self}"),
            ));
        }
        // mm² → nm: sqrt(a) mm = sqrt(a) * 1e6 nm
        let side_nm = (self.raw() as f64).sqrt() * 1_000_000.0;
        fixed::round_to_ticks("Area::sqrt", side_nm).map(Length::from_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_meters_round_trip() {
        let a = Area::from_square_meters(12).unwrap();
        assert_eq!(a.to_long(AreaUnit::SquareMeter), 12);
        assert_eq!(a.to_string(), "12m²");
    }

    #[test]
    fn div_length_inverts_times() {
        let w = Length::from_meters(3).unwrap();
        let h = Length::from_meters(4).unwrap();
        let a = w.times(h).unwrap();
        assert_eq!(a.div_length(h).unwrap(), w);
        assert!(a.div_length(Length::ZERO).is_err());
    }

    #[test]
    fn sqrt_of_square() {
        let a = Area::from_square_meters(9).unwrap();
        assert_eq!(a.sqrt().unwrap(), Length::from_meters(3).unwrap());
        assert!(Area::from_raw(-1).sqrt().is_err());
    }
}
