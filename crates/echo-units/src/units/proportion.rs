// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Dimensionless fraction in `[0, 1]`, stored in parts per billion.
//!
//! Unlike the dimensioned quantities, proportions saturate: finite input
//! outside the unit interval is clamped rather than rejected.

use core::fmt;

use super::fixed;
use super::format::{self, SignMode};
use super::quantity::{Kind, Quantity, Unit};
use crate::config::FormatPrefs;
use crate::error::{MathError, MathResult};

const PPB_PER_WHOLE: i64 = 1_000_000_000;

/// Units of proportion.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProportionUnit {
    /// Parts per billion.
    PartsPerBillion,
    /// Parts per million.
    PartsPerMillion,
    /// Parts per thousand (‰).
    PerMille,
    /// Parts per hundred (%).
    Percent,
    /// The whole, `1.0`.
    Whole,
}

impl Unit for ProportionUnit {
    fn ticks(self) -> i64 {
        match self {
            Self::PartsPerBillion => 1,
            Self::PartsPerMillion => 1_000,
            Self::PerMille => 1_000_000,
            Self::Percent => 10_000_000,
            Self::Whole => PPB_PER_WHOLE,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::PartsPerBillion => "ppb",
            Self::PartsPerMillion => "ppm",
            Self::PerMille => "‰",
            Self::Percent => "%",
            Self::Whole => "",
        }
    }
}

const DISPLAY_UNITS: &[ProportionUnit] = &[
    ProportionUnit::Percent,
    ProportionUnit::PartsPerMillion,
    ProportionUnit::PartsPerBillion,
];

/// A fraction of a whole, clamped to `[0, 1]`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "i64", into = "i64"))]
pub struct Proportion {
    ppb: i64,
}

impl Proportion {
    /// Nothing.
    pub const ZERO: Self = Self { ppb: 0 };

    /// One half.
    pub const HALF: Self = Self {
        ppb: PPB_PER_WHOLE / 2,
    };

    /// Everything.
    pub const ONE: Self = Self { ppb: PPB_PER_WHOLE };

    /// Clamps `ppb` into `[0, 10⁹]`.
    pub const fn from_ppb(ppb: i64) -> Self {
        let ppb = if ppb < 0 {
            0
        } else if ppb > PPB_PER_WHOLE {
            PPB_PER_WHOLE
        } else {
            ppb
        };
        Self { ppb }
    }

    /// Integer count of `unit`, clamped into the unit interval.
    pub fn new(value: i64, unit: ProportionUnit) -> Self {
        Self::from_ppb(value.saturating_mul(unit.ticks()))
    }

    /// Fractional count of `unit`, clamped into the unit interval.
    ///
    /// Only NaN and infinities are rejected.
    pub fn from_f64(value: f64, unit: ProportionUnit) -> MathResult<Self> {
        if !value.is_finite() {
            return Err(MathError::invalid_argument(
                "Proportion::from_f64",
                format!("proportion must be finite, got {value}"),
            ));
        }
        let ppb = (value * unit.ticks() as f64).clamp(0.0, PPB_PER_WHOLE as f64);
        fixed::round_to_ticks("Proportion::from_f64", ppb).map(Self::from_ppb)
    }

    /// Fraction of the whole, `0.0 ..= 1.0`.
    pub fn from_fraction(value: f64) -> MathResult<Self> {
        Self::from_f64(value, ProportionUnit::Whole)
    }

    /// Percentage, `0.0 ..= 100.0`.
    pub fn from_percent(value: f64) -> MathResult<Self> {
        Self::from_f64(value, ProportionUnit::Percent)
    }

    /// Raw parts per billion.
    pub const fn ppb(self) -> i64 {
        self.ppb
    }

    /// Whole number of `unit`, truncated.
    pub fn to_long(self, unit: ProportionUnit) -> i64 {
        self.ppb / unit.ticks()
    }

    /// Fractional number of `unit`.
    pub fn to_f64(self, unit: ProportionUnit) -> f64 {
        fixed::ticks_to_f64(self.ppb, unit.ticks())
    }

    /// Fraction of the whole.
    pub fn to_fraction(self) -> f64 {
        self.to_f64(ProportionUnit::Whole)
    }

    /// Percentage.
    pub fn to_percent(self) -> f64 {
        self.to_f64(ProportionUnit::Percent)
    }

    /// `1 - self`.
    pub const fn complement(self) -> Self {
        Self {
            ppb: PPB_PER_WHOLE - self.ppb,
        }
    }

    /// `self * rhs`, rounded to the nearest part per billion.
    pub fn product(self, rhs: Self) -> Self {
        // Both factors are ≤ 10⁹, so the quotient always fits.
        let ppb = fixed::mul_div_round(
            i128::from(self.ppb),
            i128::from(rhs.ppb),
            i128::from(PPB_PER_WHOLE),
        )
        .unwrap_or(PPB_PER_WHOLE);
        Self::from_ppb(ppb)
    }

    /// Linear interpolation between `self` and `rhs`.
    pub fn lerp(self, rhs: Self, t: f64) -> MathResult<Self> {
        if !t.is_finite() {
            return Err(MathError::invalid_argument(
                "Proportion::lerp",
                format!("interpolation factor must be finite, got {t}"),
            ));
        }
        let span = (rhs.ppb - self.ppb) as f64 * t;
        let ppb = (self.ppb as f64 + span).clamp(0.0, PPB_PER_WHOLE as f64);
        fixed::round_to_ticks("Proportion::lerp", ppb).map(Self::from_ppb)
    }

    /// Applies this fraction to any quantity, rounding to the nearest tick.
    ///
    /// The result magnitude never exceeds the input, so it cannot overflow.
    pub fn scale<K: Kind>(self, quantity: Quantity<K>) -> Quantity<K> {
        let raw = fixed::mul_div_round(
            i128::from(quantity.raw()),
            i128::from(self.ppb),
            i128::from(PPB_PER_WHOLE),
        )
        .unwrap_or_else(|| quantity.raw());
        Quantity::from_raw(raw)
    }

    /// Formats in `unit` (auto-selected when `None`).
    pub fn format(
        self,
        unit: Option<ProportionUnit>,
        decimals: Option<u8>,
        sign: SignMode,
    ) -> String {
        let unit = unit.unwrap_or_else(|| {
            format::auto_unit(self.ppb, DISPLAY_UNITS, ProportionUnit::Percent)
        });
        format::render(self.ppb, unit, decimals, sign)
    }

    /// Formats using user [`FormatPrefs`].
    pub fn format_with(self, prefs: &FormatPrefs) -> String {
        self.format(prefs.proportion_unit, prefs.decimals, prefs.sign)
    }
}

impl From<i64> for Proportion {
    fn from(ppb: i64) -> Self {
        Self::from_ppb(ppb)
    }
}

impl From<Proportion> for i64 {
    fn from(p: Proportion) -> Self {
        p.ppb
    }
}

impl fmt::Debug for Proportion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Proportion({self})")
    }
}

impl fmt::Display for Proportion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if f.sign_plus() {
            SignMode::Always
        } else {
            SignMode::NegativeOnly
        };
        let decimals = f.precision().map(|p| u8::try_from(p).unwrap_or(format::MAX_DECIMALS));
        let text = self.format(None, decimals, sign);
        match f.width() {
            Some(width) => write!(f, "{text:>width$}"),
            None => f.write_str(&text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Length;

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(Proportion::from_percent(150.0).unwrap(), Proportion::ONE);
        assert_eq!(Proportion::from_fraction(-0.5).unwrap(), Proportion::ZERO);
        assert_eq!(Proportion::new(3, ProportionUnit::Whole), Proportion::ONE);
        assert!(Proportion::from_fraction(f64::NAN).is_err());
    }

    #[test]
    fn complement_and_product() {
        let quarter = Proportion::from_fraction(0.25).unwrap();
        assert_eq!(quarter.complement().to_fraction(), 0.75);
        assert_eq!(Proportion::HALF.product(Proportion::HALF), quarter);
    }

    #[test]
    fn scales_quantities() {
        let l = Length::from_meters(10).unwrap();
        assert_eq!(Proportion::HALF.scale(l), Length::from_meters(5).unwrap());
        assert_eq!(Proportion::ZERO.scale(Length::MAX), Length::ZERO);
        assert_eq!(Proportion::ONE.scale(Length::MIN), Length::MIN);
    }

    #[test]
    fn display() {
        assert_eq!(Proportion::HALF.to_string(), "50%");
        assert_eq!(Proportion::from_ppb(2_500).to_string(), "2.5ppm");
        assert_eq!(Proportion::ZERO.to_string(), "0%");
        assert_eq!(format!("{:.1}", Proportion::from_percent(12.34).unwrap()), "12.3%");
    }
}
