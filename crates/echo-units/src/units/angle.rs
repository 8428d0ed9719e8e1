// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Angle stored as an integer number of micro-arcseconds.
//!
//! Micro-arcseconds make every sexagesimal unit (degree, arcminute,
//! arcsecond, turn) an exact integer ratio. Radians are irrational in this
//! basis and are reached through the rounding float constructors.

use core::f64::consts::PI;

use super::fixed;
use super::quantity::{Kind, Quantity, Unit};
use crate::config::FormatPrefs;
use crate::error::MathResult;

/// Units of angle. The smallest unit is the micro-arcsecond.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AngleUnit {
    /// 1 µas.
    Microarcsecond,
    /// 1 mas = 1 000 µas.
    Milliarcsecond,
    /// 1″ = 10⁶ µas.
    Arcsecond,
    /// 1′ = 60″.
    Arcminute,
    /// 1° = 60′.
    Degree,
    /// One full revolution, 360°.
    Turn,
}

impl Unit for AngleUnit {
    fn ticks(self) -> i64 {
        match self {
            Self::Microarcsecond => 1,
            Self::Milliarcsecond => 1_000,
            Self::Arcsecond => 1_000_000,
            Self::Arcminute => 60_000_000,
            Self::Degree => 3_600_000_000,
            Self::Turn => 1_296_000_000_000,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Microarcsecond => "µas",
            Self::Milliarcsecond => "mas",
            Self::Arcsecond => "″",
            Self::Arcminute => "′",
            Self::Degree => "°",
            Self::Turn => "tr",
        }
    }
}

/// Marker for the plane-angle dimension.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AngleKind {}

impl Kind for AngleKind {
    type Unit = AngleUnit;
    const NAME: &'static str = "Angle";
    const BASE_UNIT: AngleUnit = AngleUnit::Microarcsecond;
    const DISPLAY_UNITS: &'static [AngleUnit] = &[
        AngleUnit::Degree,
        AngleUnit::Arcminute,
        AngleUnit::Arcsecond,
        AngleUnit::Milliarcsecond,
        AngleUnit::Microarcsecond,
    ];
    const ZERO_UNIT: AngleUnit = AngleUnit::Degree;

    fn preferred_unit(prefs: &FormatPrefs) -> Option<AngleUnit> {
        prefs.angle_unit
    }
}

/// Signed plane angle with micro-arcsecond resolution.
pub type Angle = Quantity<AngleKind>;

/// Micro-arcseconds in half a turn (π radians).
const HALF_TURN_TICKS: i64 = 648_000_000_000;

impl Quantity<AngleKind> {
    /// Half a revolution (π rad).
    pub const HALF_TURN: Self = Self::from_raw(HALF_TURN_TICKS);

    /// A full revolution (2π rad).
    pub const FULL_TURN: Self = Self::from_raw(2 * HALF_TURN_TICKS);

    /// A right angle (π/2 rad).
    pub const RIGHT: Self = Self::from_raw(HALF_TURN_TICKS / 2);

    /// Angle of `value` whole degrees.
    pub fn from_degrees(value: i64) -> MathResult<Self> {
        Self::new(value, AngleUnit::Degree)
    }

    /// Angle of `value` fractional degrees.
    pub fn from_degrees_f64(value: f64) -> MathResult<Self> {
        Self::from_f64(value, AngleUnit::Degree)
    }

    /// Angle of `value` radians, rounded to the nearest micro-arcsecond.
    pub fn from_radians(value: f64) -> MathResult<Self> {
        if !value.is_finite() {
            return Err(crate::error::MathError::invalid_argument(
                "Angle::from_radians",
                format!("radians must be finite, got {value}"),
            ));
        }
        fixed::round_to_ticks("Angle::from_radians", value * (HALF_TURN_TICKS as f64 / PI))
            .map(Self::from_raw)
    }

    /// Value in radians.
    pub fn to_radians(self) -> f64 {
        fixed::ticks_to_f64(self.raw(), HALF_TURN_TICKS) * PI
    }

    /// Fractional degrees.
    pub fn in_degrees(self) -> f64 {
        self.to_f64(AngleUnit::Degree)
    }

    /// Sine, evaluated through `libm` for cross-platform stability.
    pub fn sin(self) -> f64 {
        libm::sin(self.signed_normalized().to_radians())
    }

    /// Cosine, evaluated through `libm` for cross-platform stability.
    pub fn cos(self) -> f64 {
        libm::cos(self.signed_normalized().to_radians())
    }

    /// Tangent, evaluated through `libm` for cross-platform stability.
    pub fn tan(self) -> f64 {
        libm::tan(self.signed_normalized().to_radians())
    }

    /// Wraps into `[0, FULL_TURN)`.
    pub fn normalized(self) -> Self {
        Self::from_raw(self.raw().rem_euclid(Self::FULL_TURN.raw()))
    }

    /// Wraps into `(-HALF_TURN, HALF_TURN]`.
    pub fn signed_normalized(self) -> Self {
        let wrapped = self.normalized().raw();
        if wrapped > HALF_TURN_TICKS {
            Self::from_raw(wrapped - Self::FULL_TURN.raw())
        } else {
            Self::from_raw(wrapped)
        }
    }
}
