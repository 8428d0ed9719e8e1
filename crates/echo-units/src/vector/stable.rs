// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Overflow- and underflow-safe Euclidean norms for three-component vectors.

use tracing::trace;

/// Below this the squares of the scaled components start to underflow.
const SMALL: f64 = 1e-154;

/// Above this the squares of the raw components overflow to infinity.
const LARGE: f64 = 1e154;

/// Largest absolute component; NaN propagates.
fn max_abs(c: [f64; 3]) -> f64 {
    c.iter().fold(0.0_f64, |m, v| {
        if v.is_nan() || m.is_nan() {
            f64::NAN
        } else {
            m.max(v.abs())
        }
    })
}

/// Euclidean length of `c`.
///
/// Components are divided by the largest magnitude before squaring. When
/// that magnitude is outside `[1e-154, 1e154]`, or not finite, a chained
/// `hypot` is used instead.
pub(crate) fn magnitude(c: [f64; 3]) -> f64 {
    let max = max_abs(c);
    if max == 0.0 {
        return 0.0;
    }
    if !(SMALL..=LARGE).contains(&max) {
        trace!(max, "magnitude: hypot fallback");
        return libm::hypot(libm::hypot(c[0], c[1]), c[2]);
    }
    let [x, y, z] = c.map(|v| v / max);
    max * libm::sqrt(x * x + y * y + z * z)
}

/// Unit vector along `c`, or `None` when `c` is zero or not finite.
pub(crate) fn normalize(c: [f64; 3]) -> Option<[f64; 3]> {
    let max = max_abs(c);
    if max == 0.0 || !max.is_finite() {
        return None;
    }
    // |scaled| lies in [1, √3].
    let scaled = c.map(|v| v / max);
    let len = magnitude(scaled);
    Some(scaled.map(|v| canonical(v / len)))
}

/// Right-handed cross product.
pub(crate) fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Dot product.
pub(crate) fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Maps `-0.0` to `+0.0` and every NaN to the canonical quiet NaN, so the
/// bit pattern can back `Eq` and `Hash`.
pub(crate) fn canonical(v: f64) -> f64 {
    if v.is_nan() {
        f64::NAN
    } else {
        v + 0.0
    }
}

/// Bit pattern of a canonicalised value.
pub(crate) fn bits(v: f64) -> u64 {
    canonical(v).to_bits()
}
