// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rotation quaternions and their action on exact and metre vectors.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Mul, MulAssign};

use crate::error::{ensure_finite, MathError, MathResult};
use crate::observe::Mutable;
use crate::units::{fixed, Angle};
use crate::vector::{stable, Area3, Direction3, Distance3d, Length3};

/// Largest tick magnitude rotated in the smallest unit; beyond this the raw
/// counts no longer convert to `f64` exactly.
const EXACT_TICKS: u64 = 1 << 53;

/// Ticks per coarse unit used when a rotated vector exceeds [`EXACT_TICKS`]
/// (kilometres for lengths).
const COARSE_TICKS: f64 = 1e12;

/// Rotation quaternion stored as `(x, y, z, w)`, `w` being the scalar part.
///
/// * Arithmetic does not renormalise; call [`Quaternion::normalized`] after
///   long product chains. The rotation methods normalise internally.
/// * Components are canonicalised (`-0.0 → 0.0`), so `Eq` and `Hash` compare
///   bit patterns. `q` and `-q` encode the same rotation but are not equal;
///   use [`Quaternion::same_rotation`] for that.
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Quaternion {
    x: f64,
    y: f64,
    z: f64,
    w: f64,
}

impl Quaternion {
    /// The identity rotation.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Creates a quaternion from finite components.
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> MathResult<Self> {
        Ok(Self::canonical(
            ensure_finite("Quaternion::new", "x", x)?,
            ensure_finite("Quaternion::new", "y", y)?,
            ensure_finite("Quaternion::new", "z", z)?,
            ensure_finite("Quaternion::new", "w", w)?,
        ))
    }

    fn canonical(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self {
            x: stable::canonical(x),
            y: stable::canonical(y),
            z: stable::canonical(z),
            w: stable::canonical(w),
        }
    }

    /// Rotation of `angle` about `axis` (right-hand rule).
    ///
    /// # Examples
    /// ```
    /// use echo_units::{Angle, Direction3, Quaternion};
    /// let q = Quaternion::from_axis_angle(Direction3::PLUS_Z, Angle::RIGHT);
    /// let v = q.rotate_direction(Direction3::PLUS_X).unwrap();
    /// assert_eq!(v, Direction3::PLUS_Y);
    /// ```
    pub fn from_axis_angle(axis: Direction3, angle: Angle) -> Self {
        let half = angle.to_radians() * 0.5;
        let (s, c) = (libm::sin(half), libm::cos(half));
        Self::canonical(axis.ux() * s, axis.uy() * s, axis.uz() * s, c)
    }

    /// X (vector part).
    pub const fn x(self) -> f64 {
        self.x
    }

    /// Y (vector part).
    pub const fn y(self) -> f64 {
        self.y
    }

    /// Z (vector part).
    pub const fn z(self) -> f64 {
        self.z
    }

    /// W (scalar part).
    pub const fn w(self) -> f64 {
        self.w
    }

    /// Components as `[x, y, z, w]`.
    pub const fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Hamilton product `self * rhs`.
    ///
    /// Applied to a vector, the product rotates by `rhs` first and then by
    /// `self`; `a *= b` therefore means "apply `b`, then the old `a`".
    ///
    /// # Panics
    /// If a component of the product is not finite, which only happens when
    /// the inputs are far from unit length.
    pub fn multiply(self, rhs: Self) -> Self {
        let (ax, ay, az, aw) = (self.x, self.y, self.z, self.w);
        let (bx, by, bz, bw) = (rhs.x, rhs.y, rhs.z, rhs.w);
        let out = [
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        ];
        assert!(
            out.iter().all(|c| c.is_finite()),
            "quaternion product is not finite: {self} * {rhs}"
        );
        Self::canonical(out[0], out[1], out[2], out[3])
    }

    /// Four-component dot product.
    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    /// Euclidean norm, scaled by the largest component before squaring.
    pub fn norm(self) -> f64 {
        let c = self.to_array();
        let max = c.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        if max == 0.0 || !max.is_finite() {
            return max;
        }
        let s = c.map(|v| v / max);
        max * libm::sqrt(s[0] * s[0] + s[1] * s[1] + s[2] * s[2] + s[3] * s[3])
    }

    /// Unit quaternion; `InvalidState` for zero or non-finite norms.
    pub fn normalized(self) -> MathResult<Self> {
        let n = self.norm();
        if n == 0.0 || !n.is_finite() {
            return Err(MathError::invalid_state(
                "Quaternion::normalized",
                format!("cannot normalize {self} (norm {n})"),
            ));
        }
        Ok(Self::canonical(self.x / n, self.y / n, self.z / n, self.w / n))
    }

    /// `(-x, -y, -z, w)`; the inverse of a unit quaternion.
    pub fn conjugate(self) -> Self {
        Self::canonical(-self.x, -self.y, -self.z, self.w)
    }

    /// Multiplicative inverse; `InvalidState` for the zero quaternion.
    pub fn inverse(self) -> MathResult<Self> {
        let n2 = self.dot(self);
        if n2 == 0.0 || !n2.is_finite() {
            return Err(MathError::invalid_state(
                "Quaternion::inverse",
                format!("cannot invert {self}"),
            ));
        }
        let c = self.conjugate();
        Ok(Self::canonical(c.x / n2, c.y / n2, c.z / n2, c.w / n2))
    }

    /// `true` when both encode the same rotation within `eps`, treating `q`
    /// and `-q` as equal.
    pub fn same_rotation(self, rhs: Self, eps: f64) -> bool {
        let (Ok(a), Ok(b)) = (self.normalized(), rhs.normalized()) else {
            return false;
        };
        (1.0 - a.dot(b).abs()) <= eps
    }

    /// Rotation angle in `[0, 2π)` of the normalised quaternion.
    pub fn angle(self) -> MathResult<Angle> {
        let q = self.normalized()?;
        let v = stable::magnitude([q.x, q.y, q.z]);
        Angle::from_radians(2.0 * libm::atan2(v, q.w))
    }

    /// Rotation axis; `InvalidState` for the identity rotation.
    pub fn axis(self) -> MathResult<Direction3> {
        let q = self.normalized()?;
        Direction3::new(q.x, q.y, q.z)
    }

    /// Spherical interpolation along the shortest arc.
    pub fn slerp(self, rhs: Self, t: f64) -> MathResult<Self> {
        ensure_finite("Quaternion::slerp", "t", t)?;
        let a = self.normalized()?;
        let mut b = rhs.normalized()?;
        let mut cos = a.dot(b);
        if cos < 0.0 {
            b = Self::canonical(-b.x, -b.y, -b.z, -b.w);
            cos = -cos;
        }
        let (wa, wb) = if cos > 0.9995 {
            (1.0 - t, t)
        } else {
            let theta = libm::acos(cos.min(1.0));
            let sin = libm::sin(theta);
            (libm::sin((1.0 - t) * theta) / sin, libm::sin(t * theta) / sin)
        };
        Self::canonical(
            a.x * wa + b.x * wb,
            a.y * wa + b.y * wb,
            a.z * wa + b.z * wb,
            a.w * wa + b.w * wb,
        )
        .normalized()
    }

    /// Rotates raw `f64` components of an already normalised quaternion.
    ///
    /// `t = 2 (u × v)`, `v' = v + w t + u × t`.
    fn rotate_raw(self, v: [f64; 3]) -> [f64; 3] {
        let u = [self.x, self.y, self.z];
        let t = stable::cross(u, v).map(|c| 2.0 * c);
        let ut = stable::cross(u, t);
        let out = [
            v[0] + self.w * t[0] + ut[0],
            v[1] + self.w * t[1] + ut[1],
            v[2] + self.w * t[2] + ut[2],
        ];
        assert!(
            out.iter().all(|c| c.is_finite()),
            "quaternion rotation produced a non-finite vector from {v:?}"
        );
        out
    }

    /// Rotates raw tick counts, working in ticks when they convert exactly
    /// and in a coarser unit otherwise.
    fn rotate_ticks(self, op: &'static str, raw: [i64; 3]) -> MathResult<[i64; 3]> {
        let q = self.normalized()?;
        let max = raw.iter().map(|r| r.unsigned_abs()).max().unwrap_or(0);
        let per_unit = if max <= EXACT_TICKS { 1.0 } else { COARSE_TICKS };
        let rotated = q.rotate_raw(raw.map(|r| r as f64 / per_unit));
        Ok([
            fixed::round_to_ticks(op, rotated[0] * per_unit)?,
            fixed::round_to_ticks(op, rotated[1] * per_unit)?,
            fixed::round_to_ticks(op, rotated[2] * per_unit)?,
        ])
    }

    /// Rotates an exact displacement, rounding to the nearest nanometre.
    pub fn rotate_length3(self, v: Length3) -> MathResult<Length3> {
        let [x, y, z] = self.rotate_ticks("Quaternion::rotate_length3", v.raw())?;
        Ok(Length3::new(
            crate::units::Length::from_raw(x),
            crate::units::Length::from_raw(y),
            crate::units::Length::from_raw(z),
        ))
    }

    /// Rotates an oriented area, rounding to the nearest square millimetre.
    pub fn rotate_area3(self, a: Area3) -> MathResult<Area3> {
        let [x, y, z] = self.rotate_ticks("Quaternion::rotate_area3", a.raw())?;
        Ok(Area3::new(
            crate::units::Area::from_raw(x),
            crate::units::Area::from_raw(y),
            crate::units::Area::from_raw(z),
        ))
    }

    /// Rotates a metre displacement.
    pub fn rotate_distance(self, d: Distance3d) -> MathResult<Distance3d> {
        Ok(Distance3d::from_finite(self.normalized()?.rotate_raw(d.to_array())))
    }

    /// Rotates a direction; the result is renormalised.
    pub fn rotate_direction(self, d: Direction3) -> MathResult<Direction3> {
        let [x, y, z] = self.normalized()?.rotate_raw(d.to_array());
        Direction3::new(x, y, z)
    }

    /// Orientation whose local −Z axis points along `dir` with local +Y as
    /// close to `up` as possible.
    ///
    /// Builds the right-handed basis `right = dir × up`,
    /// `up' = right × dir`, `back = −dir`, and converts the basis matrix
    /// with the trace-based four-branch method. Parallel `dir` and `up` are
    /// an `InvalidState`.
    pub fn look_along(dir: Direction3, up: Direction3) -> MathResult<Self> {
        let right = dir.cross(up).map_err(|_| {
            MathError::invalid_state(
                "Quaternion::look_along",
                format!("direction {dir} is parallel to up {up}"),
            )
        })?;
        let true_up = dir.cross_lh(right)?;
        let back = dir.negated();
        // Columns are right, up', back.
        let m = [
            [right.ux(), true_up.ux(), back.ux()],
            [right.uy(), true_up.uy(), back.uy()],
            [right.uz(), true_up.uz(), back.uz()],
        ];
        let q = Self::from_rotation_matrix(m).normalized()?;
        assert!(
            q.to_array().iter().all(|c| c.is_finite()),
            "look_along produced a non-finite quaternion"
        );
        Ok(q)
    }

    /// Quaternion of a row-major 3×3 rotation matrix (`m[row][col]`).
    pub fn from_rotation_matrix(m: [[f64; 3]; 3]) -> Self {
        let trace = m[0][0] + m[1][1] + m[2][2];
        if trace > 0.0 {
            let s = 0.5 / libm::sqrt(trace + 1.0);
            Self::canonical(
                (m[2][1] - m[1][2]) * s,
                (m[0][2] - m[2][0]) * s,
                (m[1][0] - m[0][1]) * s,
                0.25 / s,
            )
        } else if m[0][0] > m[1][1] && m[0][0] > m[2][2] {
            let s = 2.0 * libm::sqrt(1.0 + m[0][0] - m[1][1] - m[2][2]);
            Self::canonical(
                0.25 * s,
                (m[0][1] + m[1][0]) / s,
                (m[0][2] + m[2][0]) / s,
                (m[2][1] - m[1][2]) / s,
            )
        } else if m[1][1] > m[2][2] {
            let s = 2.0 * libm::sqrt(1.0 + m[1][1] - m[0][0] - m[2][2]);
            Self::canonical(
                (m[0][1] + m[1][0]) / s,
                0.25 * s,
                (m[1][2] + m[2][1]) / s,
                (m[0][2] - m[2][0]) / s,
            )
        } else {
            let s = 2.0 * libm::sqrt(1.0 + m[2][2] - m[0][0] - m[1][1]);
            Self::canonical(
                (m[0][2] + m[2][0]) / s,
                (m[1][2] + m[2][1]) / s,
                0.25 * s,
                (m[1][0] - m[0][1]) / s,
            )
        }
    }

    /// Row-major 3×3 rotation matrix (`m[row][col]`) of the normalised
    /// quaternion.
    pub fn to_rotation_matrix(self) -> MathResult<[[f64; 3]; 3]> {
        let q = self.normalized()?;
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        Ok([
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy)],
            [2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx)],
            [2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy)],
        ])
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        self.to_array().map(stable::bits) == other.to_array().map(stable::bits)
    }
}

impl Eq for Quaternion {}

impl Hash for Quaternion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_array().map(stable::bits).hash(state);
    }
}

impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(rhs)
    }
}

impl MulAssign for Quaternion {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(rhs);
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}; {})", self.x, self.y, self.z, self.w)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Quaternion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            x: f64,
            y: f64,
            z: f64,
            w: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.x, raw.y, raw.z, raw.w).map_err(serde::de::Error::custom)
    }
}

impl Mutable<Quaternion> {
    /// Current components as `[x, y, z, w]`.
    pub fn to_array(&self) -> [f64; 4] {
        self.read(|q| q.to_array())
    }

    /// Replaces all four components; rejects non-finite input.
    pub fn set_components(&self, x: f64, y: f64, z: f64, w: f64) -> MathResult<()> {
        let next = Quaternion::new(x, y, z, w)?;
        self.set(next);
        Ok(())
    }

    /// Applies `rotation` after the current orientation (`self = rotation * self`).
    pub fn rotate_by(&self, rotation: Quaternion) {
        self.update(|q| *q = rotation * *q);
    }

    /// Renormalises in place; nothing changes on error.
    pub fn normalize(&self) -> MathResult<()> {
        self.mutate(|q| {
            *q = q.normalized()?;
            Ok(())
        })
    }
}
