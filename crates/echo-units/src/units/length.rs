// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Length stored as an integer number of nanometres.

use core::time::Duration;

use super::area::Area;
use super::fixed;
use super::quantity::{Kind, Quantity, Unit};
use super::speed::Speed;
use crate::config::FormatPrefs;
use crate::error::{MathError, MathResult};

/// Units of length. The smallest unit is the nanometre.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LengthUnit {
    /// 1 nm.
    Nanometer,
    /// 1 µm = 1 000 nm.
    Micrometer,
    /// 1 mm = 10⁶ nm.
    Millimeter,
    /// 1 cm = 10⁷ nm.
    Centimeter,
    /// 1 m = 10⁹ nm.
    Meter,
    /// 1 km = 10¹² nm.
    Kilometer,
    /// International inch, 25.4 mm.
    Inch,
    /// International foot, 304.8 mm.
    Foot,
    /// International mile, 1 609.344 m.
    Mile,
}

impl Unit for LengthUnit {
    fn ticks(self) -> i64 {
        match self {
            Self::Nanometer => 1,
            Self::Micrometer => 1_000,
            Self::Millimeter => 1_000_000,
            Self::Centimeter => 10_000_000,
            Self::Meter => 1_000_000_000,
            Self::Kilometer => 1_000_000_000_000,
            Self::Inch => 25_400_000,
            Self::Foot => 304_800_000,
            Self::Mile => 1_609_344_000_000,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Nanometer => "nm",
            Self::Micrometer => "µm",
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Meter => "m",
            Self::Kilometer => "km",
            Self::Inch => "in",
            Self::Foot => "ft",
            Self::Mile => "mi",
        }
    }
}

/// Marker for the length dimension.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LengthKind {}

impl Kind for LengthKind {
    type Unit = LengthUnit;
    const NAME: &'static str = "Length";
    const BASE_UNIT: LengthUnit = LengthUnit::Nanometer;
    const DISPLAY_UNITS: &'static [LengthUnit] = &[
        LengthUnit::Kilometer,
        LengthUnit::Meter,
        LengthUnit::Millimeter,
        LengthUnit::Micrometer,
        LengthUnit::Nanometer,
    ];
    const ZERO_UNIT: LengthUnit = LengthUnit::Meter;

    fn preferred_unit(prefs: &FormatPrefs) -> Option<LengthUnit> {
        prefs.length_unit
    }
}

/// Signed length with nanometre resolution (±9.2 million km range).
pub type Length = Quantity<LengthKind>;

/// Square nanometres per square millimetre.
pub(crate) const NM2_PER_MM2: i128 = 1_000_000_000_000;

impl Quantity<LengthKind> {
    /// Length of exactly `value` nanometres.
    pub const fn from_nanometers(value: i64) -> Self {
        Self::from_raw(value)
    }

    /// Length of `value` millimetres.
    pub fn from_millimeters(value: i64) -> MathResult<Self> {
        Self::new(value, LengthUnit::Millimeter)
    }

    /// Length of `value` metres.
    pub fn from_meters(value: i64) -> MathResult<Self> {
        Self::new(value, LengthUnit::Meter)
    }

    /// Length of `value` kilometres.
    pub fn from_kilometers(value: i64) -> MathResult<Self> {
        Self::new(value, LengthUnit::Kilometer)
    }

    /// Length of `value` fractional metres, rounded to the nearest nanometre.
    pub fn from_meters_f64(value: f64) -> MathResult<Self> {
        Self::from_f64(value, LengthUnit::Meter)
    }

    /// Whole nanometres.
    pub const fn in_nanometers(self) -> i64 {
        self.raw()
    }

    /// Whole millimetres, truncated toward zero.
    pub fn in_whole_millimeters(self) -> i64 {
        self.to_long(LengthUnit::Millimeter)
    }

    /// Whole metres, truncated toward zero.
    pub fn in_whole_meters(self) -> i64 {
        self.to_long(LengthUnit::Meter)
    }

    /// Whole kilometres, truncated toward zero.
    pub fn in_whole_kilometers(self) -> i64 {
        self.to_long(LengthUnit::Kilometer)
    }

    /// Fractional metres.
    pub fn in_meters(self) -> f64 {
        self.to_f64(LengthUnit::Meter)
    }

    /// Area of the rectangle spanned by `self` and `rhs`, rounded to the
    /// nearest square millimetre.
    pub fn times(self, rhs: Self) -> MathResult<Area> {
        fixed::mul_div_round(i128::from(self.raw()), i128::from(rhs.raw()), NM2_PER_MM2)
            .map(Area::from_raw)
            .ok_or_else(|| {
                MathError::overflow("Length::times", format!("{self} * {rhs} does not fit an Area"))
            })
    }

    /// Average speed needed to cover this length in `elapsed`.
    pub fn per(self, elapsed: Duration) -> MathResult<Speed> {
        let nanos = fixed::nonzero_duration_nanos("Length::per", elapsed)?;
        // nm / ns * (ns per hour) = nm per hour
        fixed::mul_div_round(i128::from(self.raw()), super::speed::NANOS_PER_HOUR, nanos)
            .map(Speed::from_raw)
            .ok_or_else(|| {
                MathError::overflow(
                    "Length::per",
                    format!("{self} per {elapsed:?} does not fit a Speed"),
                )
            })
    }
}
