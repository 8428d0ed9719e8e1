// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Locale-free rendering of fixed-point tick counts.
//!
//! Output is always `<sign><digits>[.<digits>]<symbol>` with a `.` decimal
//! separator and no grouping, so strings are stable across hosts.

use super::quantity::Unit;

/// Largest number of fractional digits the renderer accepts.
pub const MAX_DECIMALS: u8 = 18;

/// Fractional digits used when a unit is not a power of ten and no explicit
/// precision was requested.
const IRRATIONAL_DECIMALS: u8 = 6;

/// How the sign of a formatted quantity is displayed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SignMode {
    /// `+1.5m`, `-1.5m`.
    Always,
    /// ` 1.5m`, `-1.5m`; keeps columns aligned.
    Pad,
    /// `1.5m`, `-1.5m`.
    #[default]
    NegativeOnly,
}

impl SignMode {
    fn prefix(self, negative: bool) -> &'static str {
        match (negative, self) {
            (true, _) => "-",
            (false, Self::Always) => "+",
            (false, Self::Pad) => " ",
            (false, Self::NegativeOnly) => "",
        }
    }
}

/// Picks the largest unit from `candidates` (ordered largest first) whose
/// magnitude is at least one; falls back to the smallest candidate, or to
/// `zero_unit` when `raw == 0`.
pub(crate) fn auto_unit<U: Unit>(raw: i64, candidates: &[U], zero_unit: U) -> U {
    if raw == 0 {
        return zero_unit;
    }
    let abs = raw.unsigned_abs();
    candidates
        .iter()
        .copied()
        .find(|u| abs >= u.ticks().unsigned_abs())
        .or_else(|| candidates.last().copied())
        .unwrap_or(zero_unit)
}

fn power_of_ten_digits(ticks: u128) -> Option<u8> {
    let mut n = ticks;
    let mut digits = 0_u8;
    while n > 1 {
        if n % 10 != 0 {
            return None;
        }
        n /= 10;
        digits += 1;
    }
    Some(digits)
}

/// Renders `raw` ticks in `unit`.
///
/// * `decimals = Some(d)` rounds half away from zero to exactly `d` digits.
/// * `decimals = None` prints the exact value for power-of-ten units and six
///   rounded digits otherwise, then trims trailing zeros.
pub(crate) fn render<U: Unit>(raw: i64, unit: U, decimals: Option<u8>, sign: SignMode) -> String {
    let ticks = u128::from(unit.ticks().unsigned_abs());
    let abs = u128::from(raw.unsigned_abs());
    let (digits, trim) = match decimals {
        Some(d) => (d.min(MAX_DECIMALS), false),
        None => (
            power_of_ten_digits(ticks).unwrap_or(IRRATIONAL_DECIMALS),
            true,
        ),
    };
    let scale = 10_u128.pow(u32::from(digits));
    let mut whole = abs / ticks;
    let rem = abs % ticks;
    let scaled = rem * scale;
    let mut frac = scaled / ticks;
    if (scaled % ticks) * 2 >= ticks {
        frac += 1;
        if frac == scale {
            frac = 0;
            whole += 1;
        }
    }

    let mut frac_text = if digits == 0 {
        String::new()
    } else {
        format!("{frac:0width$}", width = usize::from(digits))
    };
    if trim {
        while frac_text.ends_with('0') {
            frac_text.pop();
        }
    }

    let negative = raw < 0 && (whole != 0 || frac != 0);
    let mut out = String::with_capacity(24);
    out.push_str(sign.prefix(negative));
    out.push_str(&whole.to_string());
    if !frac_text.is_empty() {
        out.push('.');
        out.push_str(&frac_text);
    }
    out.push_str(unit.symbol());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::LengthUnit;

    #[test]
    fn exact_rendering_trims_zeros() {
        assert_eq!(
            render(1_500_000_000, LengthUnit::Meter, None, SignMode::NegativeOnly),
            "1.5m"
        );
        assert_eq!(
            render(2_000_000_000, LengthUnit::Meter, None, SignMode::NegativeOnly),
            "2m"
        );
    }

    #[test]
    fn fixed_decimals_round_half_away() {
        assert_eq!(
            render(1_005_000_000, LengthUnit::Meter, Some(2), SignMode::NegativeOnly),
            "1.01m"
        );
        assert_eq!(
            render(-1_005_000_000, LengthUnit::Meter, Some(2), SignMode::NegativeOnly),
            "-1.01m"
        );
        assert_eq!(
            render(999_600_000, LengthUnit::Meter, Some(3), SignMode::NegativeOnly),
            "1.000m"
        );
    }

    #[test]
    fn sign_modes() {
        assert_eq!(
            render(1_000_000, LengthUnit::Millimeter, None, SignMode::Always),
            "+1mm"
        );
        assert_eq!(
            render(1_000_000, LengthUnit::Millimeter, None, SignMode::Pad),
            " 1mm"
        );
        assert_eq!(
            render(-1_000_000, LengthUnit::Millimeter, None, SignMode::Pad),
            "-1mm"
        );
    }

    #[test]
    fn rounding_to_zero_drops_negative_sign() {
        assert_eq!(
            render(-400_000_000, LengthUnit::Meter, Some(0), SignMode::NegativeOnly),
            "0m"
        );
    }
}
