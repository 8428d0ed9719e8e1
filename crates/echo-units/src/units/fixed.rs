// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Checked helpers for the `i64` fixed-point encoding used by every quantity.
//!
//! A quantity stores an integer count of its smallest unit ("ticks"). These
//! helpers perform the integer and float crossings with explicit overflow and
//! finiteness checks so no operation ever wraps or produces a partial result.

use core::time::Duration;

use crate::error::{MathError, MathResult};

/// Smallest `f64` that no longer fits in `i64` (`2^63`).
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Rounds a finite `f64` tick count to the nearest `i64` (ties away from zero).
///
/// Rejects NaN/∞ with `InvalidArgument` and values outside the `i64` range
/// with `Overflow`, both before any rounding takes effect.
pub(crate) fn round_to_ticks(op: &'static str, value: f64) -> MathResult<i64> {
    if !value.is_finite() {
        return Err(MathError::invalid_argument(
            op,
            format!("value must be finite, got {value}"),
        ));
    }
    let rounded = value.round();
    if !(-I64_LIMIT..I64_LIMIT).contains(&rounded) {
        return Err(MathError::overflow(
            op,
            format!("{value} ticks exceeds the 64-bit range"),
        ));
    }
    Ok(rounded as i64)
}

/// Exact-as-possible conversion of a tick count into a fractional unit count.
///
/// Splits into whole and remainder parts first so values beyond `2^53` ticks
/// keep their integral part exact.
pub(crate) fn ticks_to_f64(raw: i64, ticks_per_unit: i64) -> f64 {
    let whole = raw / ticks_per_unit;
    let rem = raw % ticks_per_unit;
    whole as f64 + rem as f64 / ticks_per_unit as f64
}

/// Computes `round(a * b / d)` in 128-bit space, ties away from zero.
///
/// Returns `None` when `d == 0` or the result leaves the `i64` range.
pub(crate) fn mul_div_round(a: i128, b: i128, d: i128) -> Option<i64> {
    if d == 0 {
        return None;
    }
    let num = a.checked_mul(b)?;
    let q = num / d;
    let r = num % d;
    let bump = if r.unsigned_abs() * 2 >= d.unsigned_abs() {
        if (num < 0) == (d < 0) {
            1
        } else {
            -1
        }
    } else {
        0
    };
    i64::try_from(q + bump).ok()
}

/// Nanoseconds in `elapsed` as a signed 128-bit count.
pub(crate) fn duration_nanos(op: &'static str, elapsed: Duration) -> MathResult<i128> {
    i128::try_from(elapsed.as_nanos())
        .map_err(|_| MathError::invalid_argument(op, format!("duration {elapsed:?} is too long")))
}

/// Like [`duration_nanos`] but rejects a zero duration, for use as a divisor.
pub(crate) fn nonzero_duration_nanos(op: &'static str, elapsed: Duration) -> MathResult<i128> {
    match duration_nanos(op, elapsed)? {
        0 => Err(MathError::invalid_argument(op, "cannot divide by a zero duration")),
        nanos => Ok(nanos),
    }
}

/// Checked `a * b` with a descriptive overflow error.
pub(crate) fn mul(op: &'static str, a: i64, b: i64) -> MathResult<i64> {
    a.checked_mul(b)
        .ok_or_else(|| MathError::overflow(op, format!("{a} * {b} ticks")))
}

/// Checked `-a` (fails only for `i64::MIN`).
pub(crate) fn neg(op: &'static str, a: i64) -> MathResult<i64> {
    a.checked_neg()
        .ok_or_else(|| MathError::overflow(op, format!("-({a}) ticks")))
}

/// Scales a tick count by a finite factor, rounding to nearest.
pub(crate) fn scale(op: &'static str, raw: i64, factor: f64) -> MathResult<i64> {
    if !factor.is_finite() {
        return Err(MathError::invalid_argument(
            op,
            format!("scale factor must be finite, got {factor}"),
        ));
    }
    // Integral factors stay in integer space so large tick counts remain exact.
    if factor.fract() == 0.0 && factor.abs() < I64_LIMIT {
        return mul(op, raw, factor as i64);
    }
    let scaled = raw as f64 * factor;
    round_to_ticks(op, scaled)
}
