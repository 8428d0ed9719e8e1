// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Generic fixed-point quantity shared by every scalar kind.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use super::fixed;
use super::format::{self, SignMode};
use crate::config::FormatPrefs;
use crate::error::{MathError, MathResult};

/// A unit of measure for one quantity kind.
///
/// Every unit is an exact integer multiple of the kind's smallest unit, so
/// conversions between units never accumulate rounding error.
pub trait Unit: Copy + fmt::Debug + Eq + Hash + Send + Sync + 'static {
    /// Number of smallest-unit ticks in one of this unit.
    fn ticks(self) -> i64;

    /// Short symbol appended by the formatter (`"m"`, `"km/h"`, `"°"`).
    fn symbol(self) -> &'static str;
}

/// Marker describing one physical dimension (length, area, angle, …).
///
/// Implemented by uninhabited enums; it only carries associated items.
pub trait Kind: Copy + fmt::Debug + Eq + Ord + Hash + Send + Sync + 'static {
    /// Unit enumeration accepted by [`Quantity::new`] and friends.
    type Unit: Unit;

    /// Human-readable kind name used in error messages.
    const NAME: &'static str;

    /// Smallest unit; one tick of the raw representation.
    const BASE_UNIT: Self::Unit;

    /// Candidate units for automatic display, largest first.
    const DISPLAY_UNITS: &'static [Self::Unit];

    /// Unit used to display zero.
    const ZERO_UNIT: Self::Unit;

    /// Preferred display unit from user formatting preferences, if any.
    fn preferred_unit(prefs: &FormatPrefs) -> Option<Self::Unit>;
}

/// Fixed-point physical quantity of kind `K`.
///
/// The value is an `i64` count of the kind's smallest unit (for example
/// nanometres for length). Equality, ordering, and hashing are defined on that
/// integer. Arithmetic is checked: any result outside the `i64` range is an
/// [`MathError::Overflow`] and never wraps.
pub struct Quantity<K: Kind> {
    raw: i64,
    kind: PhantomData<K>,
}

impl<K: Kind> Clone for Quantity<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Kind> Copy for Quantity<K> {}

impl<K: Kind> PartialEq for Quantity<K> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K: Kind> Eq for Quantity<K> {}

impl<K: Kind> PartialOrd for Quantity<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Kind> Ord for Quantity<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<K: Kind> Hash for Quantity<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<K: Kind> Default for Quantity<K> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<K: Kind> fmt::Debug for Quantity<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", K::NAME, self)
    }
}

/// Auto-selects the display unit.
///
/// Honours `{:.N}` precision and the `{:+}` flag; a width right-aligns the
/// rendered text.
impl<K: Kind> fmt::Display for Quantity<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if f.sign_plus() {
            SignMode::Always
        } else {
            SignMode::NegativeOnly
        };
        let decimals = f.precision().map(|p| u8::try_from(p).unwrap_or(format::MAX_DECIMALS));
        // `pad` would treat the precision as a maximum width and truncate.
        let text = self.format(None, decimals, sign);
        match f.width() {
            Some(width) => write!(f, "{text:>width$}"),
            None => f.write_str(&text),
        }
    }
}

impl<K: Kind> Quantity<K> {
    /// Zero in any unit.
    pub const ZERO: Self = Self::from_raw(0);

    /// Largest representable value.
    pub const MAX: Self = Self::from_raw(i64::MAX);

    /// Smallest representable value.
    pub const MIN: Self = Self::from_raw(i64::MIN);

    /// Wraps a raw tick count.
    pub const fn from_raw(raw: i64) -> Self {
        Self {
            raw,
            kind: PhantomData,
        }
    }

    /// Raw tick count (smallest unit).
    pub const fn raw(self) -> i64 {
        self.raw
    }

    /// Builds a quantity from an integer count of `unit`.
    ///
    /// Fails with `Overflow` when `value * unit.ticks()` leaves `i64`.
    pub fn new(value: i64, unit: K::Unit) -> MathResult<Self> {
        value
            .checked_mul(unit.ticks())
            .map(Self::from_raw)
            .ok_or_else(|| {
                MathError::overflow(
                    "Quantity::new",
                    format!("{value}{} does not fit a {}", unit.symbol(), K::NAME),
                )
            })
    }

    /// Builds a quantity from a fractional count of `unit`, rounding to the
    /// nearest tick. Rejects NaN and infinities.
    pub fn from_f64(value: f64, unit: K::Unit) -> MathResult<Self> {
        if !value.is_finite() {
            return Err(MathError::invalid_argument(
                "Quantity::from_f64",
                format!("{} must be finite, got {value}{}", K::NAME, unit.symbol()),
            ));
        }
        fixed::round_to_ticks("Quantity::from_f64", value * unit.ticks() as f64).map(Self::from_raw)
    }

    /// Whole number of `unit`, truncated toward zero.
    pub fn to_long(self, unit: K::Unit) -> i64 {
        self.raw / unit.ticks()
    }

    /// Fractional number of `unit`.
    pub fn to_f64(self, unit: K::Unit) -> f64 {
        fixed::ticks_to_f64(self.raw, unit.ticks())
    }

    /// Returns `true` for exactly zero.
    pub const fn is_zero(self) -> bool {
        self.raw == 0
    }

    /// Returns `true` for strictly negative values.
    pub const fn is_negative(self) -> bool {
        self.raw < 0
    }

    /// Returns `true` for strictly positive values.
    pub const fn is_positive(self) -> bool {
        self.raw > 0
    }

    /// `-1`, `0`, or `1`.
    pub const fn signum(self) -> i64 {
        self.raw.signum()
    }

    /// Checked sum.
    pub fn checked_add(self, rhs: Self) -> MathResult<Self> {
        self.raw
            .checked_add(rhs.raw)
            .map(Self::from_raw)
            .ok_or_else(|| Self::binary_overflow("Quantity::checked_add", self, "+", rhs))
    }

    /// Checked difference.
    pub fn checked_sub(self, rhs: Self) -> MathResult<Self> {
        self.raw
            .checked_sub(rhs.raw)
            .map(Self::from_raw)
            .ok_or_else(|| Self::binary_overflow("Quantity::checked_sub", self, "-", rhs))
    }

    /// Checked negation (fails only for [`Quantity::MIN`]).
    pub fn checked_neg(self) -> MathResult<Self> {
        fixed::neg("Quantity::checked_neg", self.raw).map(Self::from_raw)
    }

    /// Checked absolute value (fails only for [`Quantity::MIN`]).
    pub fn checked_abs(self) -> MathResult<Self> {
        if self.raw < 0 {
            self.checked_neg()
        } else {
            Ok(self)
        }
    }

    /// Checked multiplication by an integer factor.
    pub fn checked_mul(self, factor: i64) -> MathResult<Self> {
        fixed::mul("Quantity::checked_mul", self.raw, factor).map(Self::from_raw)
    }

    /// Checked integer division, truncating toward zero.
    pub fn checked_div(self, divisor: i64) -> MathResult<Self> {
        if divisor == 0 {
            return Err(MathError::invalid_argument(
                "Quantity::checked_div",
                format!("cannot divide a {} by zero", K::NAME),
            ));
        }
        self.raw
            .checked_div(divisor)
            .map(Self::from_raw)
            .ok_or_else(|| {
                MathError::overflow(
                    "Quantity::checked_div",
                    format!("{self} / {divisor} does not fit a {}", K::NAME),
                )
            })
    }

    /// Multiplies by a finite floating-point factor, rounding to the nearest
    /// tick.
    pub fn scaled_by(self, factor: f64) -> MathResult<Self> {
        fixed::scale("Quantity::scaled_by", self.raw, factor).map(Self::from_raw)
    }

    /// Divides by a finite, non-zero floating-point divisor.
    pub fn div_f64(self, divisor: f64) -> MathResult<Self> {
        if divisor == 0.0 {
            return Err(MathError::invalid_argument(
                "Quantity::div_f64",
                format!("cannot divide a {} by zero", K::NAME),
            ));
        }
        if !divisor.is_finite() {
            return Err(MathError::invalid_argument(
                "Quantity::div_f64",
                format!("divisor must be finite, got {divisor}"),
            ));
        }
        fixed::round_to_ticks("Quantity::div_f64", self.raw as f64 / divisor).map(Self::from_raw)
    }

    /// Dimensionless ratio `self / rhs`.
    pub fn ratio_to(self, rhs: Self) -> MathResult<f64> {
        if rhs.raw == 0 {
            return Err(MathError::invalid_argument(
                "Quantity::ratio_to",
                format!("cannot divide a {} by zero", K::NAME),
            ));
        }
        Ok(self.raw as f64 / rhs.raw as f64)
    }

    /// Linear interpolation `self + (rhs - self) * t`.
    pub fn lerp(self, rhs: Self, t: f64) -> MathResult<Self> {
        let span = rhs.checked_sub(self)?;
        self.checked_add(span.scaled_by(t)?)
    }

    /// Formats in `unit` (auto-selected when `None`) with optional fixed
    /// `decimals` and the given sign policy.
    pub fn format(self, unit: Option<K::Unit>, decimals: Option<u8>, sign: SignMode) -> String {
        let unit = unit.unwrap_or_else(|| self.display_unit());
        format::render(self.raw, unit, decimals, sign)
    }

    /// Formats using user [`FormatPrefs`].
    pub fn format_with(self, prefs: &FormatPrefs) -> String {
        self.format(K::preferred_unit(prefs), prefs.decimals, prefs.sign)
    }

    /// Largest display unit in which the magnitude is at least one.
    pub fn display_unit(self) -> K::Unit {
        format::auto_unit(self.raw, K::DISPLAY_UNITS, K::ZERO_UNIT)
    }

    fn binary_overflow(op: &'static str, lhs: Self, sym: &str, rhs: Self) -> MathError {
        let base = K::BASE_UNIT.symbol();
        MathError::overflow(
            op,
            format!(
                "{}{base} {sym} {}{base} exceeds the {} range",
                lhs.raw,
                rhs.raw,
                K::NAME
            ),
        )
    }
}

/// Sum of an iterator of quantities, failing on the first overflow.
pub fn checked_sum<K: Kind>(
    items: impl IntoIterator<Item = Quantity<K>>,
) -> MathResult<Quantity<K>> {
    items.into_iter().try_fold(Quantity::ZERO, Quantity::checked_add)
}

#[cfg(feature = "serde")]
impl<K: Kind> serde::Serialize for Quantity<K> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.raw)
    }
}

#[cfg(feature = "serde")]
impl<'de, K: Kind> serde::Deserialize<'de> for Quantity<K> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <i64 as serde::Deserialize>::deserialize(deserializer).map(Self::from_raw)
    }
}
