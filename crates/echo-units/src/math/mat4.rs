// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Column-major 4×4 matrices for TRS placement and perspective projection.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Mul, MulAssign};

use tracing::{debug, instrument};

use super::Quaternion;
use crate::error::{MathError, MathResult};
use crate::units::{Fov, NearFar};
use crate::vector::{stable, Distance3d, Point3d, Scale3};

/// Column-major 4×4 matrix of `f64` (`v' = M·v`).
///
/// Element `(row, col)` lives at `data[col * 4 + row]`, so the translation of
/// an affine transform occupies indices 12–14, the layout GPU uploads expect.
///
/// # Examples
/// ```
/// use echo_units::{Distance3d, Matrix4x4, Point3d, Quaternion, Scale3};
/// let mut m = Matrix4x4::IDENTITY;
/// let offset = Distance3d::new(5.0, -3.0, 2.0).unwrap();
/// m.set_trs(offset, Quaternion::IDENTITY, Scale3::IDENTITY).unwrap();
/// let p = m.transform_point(Point3d::new(2.0, 4.0, -1.0));
/// assert_eq!(p, Point3d::new(7.0, 1.0, 1.0));
/// ```
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Matrix4x4 {
    data: [f64; 16],
}

impl Matrix4x4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, 0.0, // col 0
            0.0, 1.0, 0.0, 0.0, // col 1
            0.0, 0.0, 1.0, 0.0, // col 2
            0.0, 0.0, 0.0, 1.0, // col 3
        ],
    };

    /// All elements zero.
    pub const ZERO: Self = Self { data: [0.0; 16] };

    /// Builds from column-major `f64` data; every element must be finite.
    pub fn from_f64_array(data: [f64; 16]) -> MathResult<Self> {
        if let Some(i) = data.iter().position(|v| !v.is_finite()) {
            return Err(MathError::invalid_argument(
                "Matrix4x4::from_f64_array",
                format!("element {i} is not finite ({})", data[i]),
            ));
        }
        Ok(Self::canonical(data))
    }

    /// Builds from column-major `f32` data; every element must be finite.
    pub fn from_f32_array(data: [f32; 16]) -> MathResult<Self> {
        Self::from_f64_array(data.map(f64::from))
    }

    fn canonical(data: [f64; 16]) -> Self {
        Self {
            data: data.map(stable::canonical),
        }
    }

    /// Column-major elements.
    pub const fn to_f64_array(&self) -> [f64; 16] {
        self.data
    }

    /// Column-major elements narrowed to `f32` for GPU upload.
    pub fn to_f32_array(&self) -> [f32; 16] {
        self.data.map(|v| v as f32)
    }

    fn index(op: &'static str, row: usize, col: usize) -> MathResult<usize> {
        if row < 4 && col < 4 {
            Ok(col * 4 + row)
        } else {
            Err(MathError::invalid_argument(
                op,
                format!("index ({row}, {col}) outside 4×4"),
            ))
        }
    }

    const fn at(&self, row: usize, col: usize) -> f64 {
        self.data[col * 4 + row]
    }

    /// Element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> MathResult<f64> {
        Ok(self.data[Self::index("Matrix4x4::get", row, col)?])
    }

    /// Replaces the element at `(row, col)` with a finite value.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> MathResult<()> {
        let i = Self::index("Matrix4x4::set", row, col)?;
        if !value.is_finite() {
            return Err(MathError::invalid_argument(
                "Matrix4x4::set",
                format!("value for ({row}, {col}) is not finite ({value})"),
            ));
        }
        self.data[i] = stable::canonical(value);
        Ok(())
    }

    /// Matrix product `self * rhs`: applies `rhs` first, then `self`.
    pub fn multiplied_by(&self, rhs: &Self) -> Self {
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += self.at(row, k) * rhs.at(k, col);
                }
                out[col * 4 + row] = acc;
            }
        }
        Self::canonical(out)
    }

    /// Swaps rows and columns.
    pub fn transpose(&self) -> Self {
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                out[row * 4 + col] = self.at(row, col);
            }
        }
        Self { data: out }
    }

    /// Cofactor expansion shared by `determinant` and `inverse`; returns the
    /// adjugate (column-major) and the determinant.
    fn adjugate(&self) -> ([f64; 16], f64) {
        let m = &self.data;
        let mut inv = [0.0; 16];
        inv[0] = m[5] * m[10] * m[15] - m[5] * m[11] * m[14] - m[9] * m[6] * m[15]
            + m[9] * m[7] * m[14]
            + m[13] * m[6] * m[11]
            - m[13] * m[7] * m[10];
        inv[4] = -m[4] * m[10] * m[15] + m[4] * m[11] * m[14] + m[8] * m[6] * m[15]
            - m[8] * m[7] * m[14]
            - m[12] * m[6] * m[11]
            + m[12] * m[7] * m[10];
        inv[8] = m[4] * m[9] * m[15] - m[4] * m[11] * m[13] - m[8] * m[5] * m[15]
            + m[8] * m[7] * m[13]
            + m[12] * m[5] * m[11]
            - m[12] * m[7] * m[9];
        inv[12] = -m[4] * m[9] * m[14] + m[4] * m[10] * m[13] + m[8] * m[5] * m[14]
            - m[8] * m[6] * m[13]
            - m[12] * m[5] * m[10]
            + m[12] * m[6] * m[9];
        inv[1] = -m[1] * m[10] * m[15] + m[1] * m[11] * m[14] + m[9] * m[2] * m[15]
            - m[9] * m[3] * m[14]
            - m[13] * m[2] * m[11]
            + m[13] * m[3] * m[10];
        inv[5] = m[0] * m[10] * m[15] - m[0] * m[11] * m[14] - m[8] * m[2] * m[15]
            + m[8] * m[3] * m[14]
            + m[12] * m[2] * m[11]
            - m[12] * m[3] * m[10];
        inv[9] = -m[0] * m[9] * m[15] + m[0] * m[11] * m[13] + m[8] * m[1] * m[15]
            - m[8] * m[3] * m[13]
            - m[12] * m[1] * m[11]
            + m[12] * m[3] * m[9];
        inv[13] = m[0] * m[9] * m[14] - m[0] * m[10] * m[13] - m[8] * m[1] * m[14]
            + m[8] * m[2] * m[13]
            + m[12] * m[1] * m[10]
            - m[12] * m[2] * m[9];
        inv[2] = m[1] * m[6] * m[15] - m[1] * m[7] * m[14] - m[5] * m[2] * m[15]
            + m[5] * m[3] * m[14]
            + m[13] * m[2] * m[7]
            - m[13] * m[3] * m[6];
        inv[6] = -m[0] * m[6] * m[15] + m[0] * m[7] * m[14] + m[4] * m[2] * m[15]
            - m[4] * m[3] * m[14]
            - m[12] * m[2] * m[7]
            + m[12] * m[3] * m[6];
        inv[10] = m[0] * m[5] * m[15] - m[0] * m[7] * m[13] - m[4] * m[1] * m[15]
            + m[4] * m[3] * m[13]
            + m[12] * m[1] * m[7]
            - m[12] * m[3] * m[5];
        inv[14] = -m[0] * m[5] * m[14] + m[0] * m[6] * m[13] + m[4] * m[1] * m[14]
            - m[4] * m[2] * m[13]
            - m[12] * m[1] * m[6]
            + m[12] * m[2] * m[5];
        inv[3] = -m[1] * m[6] * m[11] + m[1] * m[7] * m[10] + m[5] * m[2] * m[11]
            - m[5] * m[3] * m[10]
            - m[9] * m[2] * m[7]
            + m[9] * m[3] * m[6];
        inv[7] = m[0] * m[6] * m[11] - m[0] * m[7] * m[10] - m[4] * m[2] * m[11]
            + m[4] * m[3] * m[10]
            + m[8] * m[2] * m[7]
            - m[8] * m[3] * m[6];
        inv[11] = -m[0] * m[5] * m[11] + m[0] * m[7] * m[9] + m[4] * m[1] * m[11]
            - m[4] * m[3] * m[9]
            - m[8] * m[1] * m[7]
            + m[8] * m[3] * m[5];
        inv[15] = m[0] * m[5] * m[10] - m[0] * m[6] * m[9] - m[4] * m[1] * m[10]
            + m[4] * m[2] * m[9]
            + m[8] * m[1] * m[6]
            - m[8] * m[2] * m[5];
        let det = m[0] * inv[0] + m[1] * inv[4] + m[2] * inv[8] + m[3] * inv[12];
        (inv, det)
    }

    /// Determinant.
    pub fn determinant(&self) -> f64 {
        self.adjugate().1
    }

    /// Inverse matrix; `InvalidState` when singular.
    pub fn inverse(&self) -> MathResult<Self> {
        let (adj, det) = self.adjugate();
        if det == 0.0 || !det.is_finite() {
            return Err(MathError::invalid_state(
                "Matrix4x4::inverse",
                format!("matrix is singular (determinant {det})"),
            ));
        }
        let inv = adj.map(|v| v / det);
        if inv.iter().any(|v| !v.is_finite()) {
            return Err(MathError::invalid_state(
                "Matrix4x4::inverse",
                format!("inverse overflows (determinant {det})"),
            ));
        }
        Ok(Self::canonical(inv))
    }

    /// Transforms a point (`w = 1`), dividing by the resulting `w` when it is
    /// neither zero nor one.
    pub fn transform_point(&self, p: Point3d) -> Point3d {
        let v = [p.x, p.y, p.z, 1.0];
        let out = self.apply(v);
        let w = out[3];
        if w == 0.0 || w == 1.0 {
            Point3d::new(out[0], out[1], out[2])
        } else {
            Point3d::new(out[0] / w, out[1] / w, out[2] / w)
        }
    }

    /// Transforms a displacement (`w = 0`); translation is ignored.
    /// Fails with `Overflow` when a component leaves the `f64` range.
    pub fn transform_direction(&self, d: Distance3d) -> MathResult<Distance3d> {
        let out = self.apply([d.dx(), d.dy(), d.dz(), 0.0]);
        Distance3d::from_computed("Matrix4x4::transform_direction", [out[0], out[1], out[2]])
    }

    fn apply(&self, v: [f64; 4]) -> [f64; 4] {
        let mut out = [0.0; 4];
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = (0..4).map(|k| self.at(row, k) * v[k]).sum();
        }
        out
    }

    /// Overwrites `self` with `translation · rotation · scale`.
    /// The rotation is normalised first; a zero quaternion is an
    /// `InvalidState` and leaves `self` untouched.
    pub fn set_trs(
        &mut self,
        translation_m: Distance3d,
        rotation: Quaternion,
        scale: Scale3,
    ) -> MathResult<()> {
        let r = rotation.to_rotation_matrix()?;
        let s = scale.to_array();
        let mut data = [0.0; 16];
        for col in 0..3 {
            for row in 0..3 {
                data[col * 4 + row] = r[row][col] * s[col];
            }
        }
        data[12] = translation_m.dx();
        data[13] = translation_m.dy();
        data[14] = translation_m.dz();
        data[15] = 1.0;
        assert!(
            data.iter().all(|v| v.is_finite()),
            "TRS matrix has non-finite elements for {translation_m}, {rotation}, {scale}"
        );
        *self = Self::canonical(data);
        Ok(())
    }

    /// Overwrites `self` with the inverse of `translation · rotation · scale`,
    /// i.e. `scale⁻¹ · rotation⁻¹ · translation⁻¹`. A zero scale factor is an
    /// `InvalidState`; `self` is untouched on error.
    pub fn set_inverse_trs(
        &mut self,
        translation_m: Distance3d,
        rotation: Quaternion,
        scale: Scale3,
    ) -> MathResult<()> {
        let inv_scale = scale.inverse()?;
        let inv_rot = rotation.normalized()?.conjugate();
        let mut rs = Self::IDENTITY;
        rs.set_trs(Distance3d::ZERO, Quaternion::IDENTITY, inv_scale)?;
        let mut r = Self::IDENTITY;
        r.set_trs(Distance3d::ZERO, inv_rot, Scale3::IDENTITY)?;
        let mut t = Self::IDENTITY;
        t.set_trs(-translation_m, Quaternion::IDENTITY, Scale3::IDENTITY)?;
        *self = rs.multiplied_by(&r).multiplied_by(&t);
        Ok(())
    }

    /// Overwrites `self` with a right-handed perspective projection that
    /// maps view-space depth `[-near, -far]` onto `[0, 1]`. An infinite far
    /// plane uses the limit of the finite form.
    pub fn set_perspective_rh(
        &mut self,
        fov: Fov,
        aspect: f64,
        near_far: NearFar,
    ) -> MathResult<()> {
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(MathError::invalid_argument(
                "Matrix4x4::set_perspective_rh",
                format!("aspect must be finite and > 0, got {aspect}"),
            ));
        }
        let f = fov.focal_scale();
        let near = near_far.near_meters();
        let mut data = [0.0; 16];
        data[0] = f / aspect;
        data[5] = f;
        data[11] = -1.0;
        if near_far.is_infinite() {
            data[10] = -1.0;
            data[14] = -near;
        } else {
            let far = near_far.far_meters();
            data[10] = far / (near - far);
            data[14] = near * far / (near - far);
        }
        *self = Self::canonical(data);
        Ok(())
    }

    /// Overwrites `self` with `projection · view`, where `view` is the
    /// inverse of the camera's TRS placement and `projection` is
    /// [`Matrix4x4::set_perspective_rh`]. `self` is untouched on error.
    #[instrument(level = "debug", skip_all, fields(aspect = aspect))]
    pub fn set_view_proj_rh(
        &mut self,
        translation_m: Distance3d,
        rotation: Quaternion,
        scale: Scale3,
        fov: Fov,
        aspect: f64,
        near_far: NearFar,
    ) -> MathResult<()> {
        let mut view = Self::IDENTITY;
        view.set_inverse_trs(translation_m, rotation, scale)?;
        let mut proj = Self::IDENTITY;
        proj.set_perspective_rh(fov, aspect, near_far)?;
        *self = proj.multiplied_by(&view);
        debug!(
            near = near_far.near_meters(),
            far = near_far.far_meters(),
            "rebuilt view-projection matrix"
        );
        Ok(())
    }

    /// `true` when every element differs by at most `eps`.
    pub fn abs_diff_eq(&self, rhs: &Self, eps: f64) -> bool {
        self.data
            .iter()
            .zip(rhs.data.iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Matrix4x4 {
    fn eq(&self, other: &Self) -> bool {
        self.data.map(stable::bits) == other.data.map(stable::bits)
    }
}

impl Eq for Matrix4x4 {}

impl Hash for Matrix4x4 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.map(stable::bits).hash(state);
    }
}

impl Mul for Matrix4x4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiplied_by(&rhs)
    }
}

impl Mul<&Matrix4x4> for &Matrix4x4 {
    type Output = Matrix4x4;

    fn mul(self, rhs: &Matrix4x4) -> Matrix4x4 {
        self.multiplied_by(rhs)
    }
}

impl MulAssign for Matrix4x4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiplied_by(&rhs);
    }
}

impl fmt::Display for Matrix4x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            if row > 0 {
                f.write_str("\n")?;
            }
            write!(
                f,
                "[{}, {}, {}, {}]",
                self.at(row, 0),
                self.at(row, 1),
                self.at(row, 2),
                self.at(row, 3)
            )?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Matrix4x4 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            data: [f64; 16],
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::from_f64_array(raw.data).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathErrorKind;
    use crate::units::{Angle, Length};
    use crate::vector::Direction3;

    fn d(x: f64, y: f64, z: f64) -> Distance3d {
        Distance3d::new(x, y, z).unwrap()
    }

    fn meters(value: i64) -> Length {
        Length::from_meters(value).unwrap()
    }

    fn tilted() -> Quaternion {
        let axis = Direction3::new(1.0, 2.0, 3.0).unwrap();
        Quaternion::from_axis_angle(axis, Angle::from_degrees(40).unwrap())
    }

    fn trs(t: Distance3d, q: Quaternion, s: Scale3) -> Matrix4x4 {
        let mut out = Matrix4x4::IDENTITY;
        out.set_trs(t, q, s).unwrap();
        out
    }

    fn sample() -> Matrix4x4 {
        trs(d(1.0, -2.0, 3.0), tilted(), Scale3::new(2.0, 3.0, 0.5).unwrap())
    }

    #[test]
    fn column_major_layout() {
        let mut m = trs(d(5.0, 6.0, 7.0), Quaternion::IDENTITY, Scale3::IDENTITY);
        assert_eq!(&m.to_f64_array()[12..15], &[5.0, 6.0, 7.0]);
        assert_eq!(m.get(0, 3).unwrap(), 5.0);
        assert_eq!(m.get(4, 0).unwrap_err().kind(), MathErrorKind::InvalidArgument);
        assert!(m.set(0, 4, 1.0).is_err());
        assert!(m.set(0, 0, f64::INFINITY).is_err());
        assert_eq!(m.to_f32_array()[13], 6.0_f32);
    }

    #[test]
    fn product_order() {
        let t = trs(d(1.0, 0.0, 0.0), Quaternion::IDENTITY, Scale3::IDENTITY);
        let s = trs(Distance3d::ZERO, Quaternion::IDENTITY, Scale3::uniform(2.0).unwrap());
        let p = Point3d::new(1.0, 0.0, 0.0);
        // scale first, then translate
        assert_eq!((t * s).transform_point(p), Point3d::new(3.0, 0.0, 0.0));
        assert_eq!((&s * &t).transform_point(p), Point3d::new(4.0, 0.0, 0.0));
        let mut acc = t;
        acc *= s;
        assert_eq!(acc, t * s);
    }

    #[test]
    fn inverse_and_determinant() {
        let m = sample();
        assert!((m.determinant() - 3.0).abs() < 1e-12);
        let id = m * m.inverse().unwrap();
        assert!(id.abs_diff_eq(&Matrix4x4::IDENTITY, 1e-12));
        assert_eq!(Matrix4x4::ZERO.inverse().unwrap_err().kind(), MathErrorKind::InvalidState);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn inverse_trs_matches_general_inverse() {
        let mut inv = Matrix4x4::IDENTITY;
        inv.set_inverse_trs(d(1.0, -2.0, 3.0), tilted(), Scale3::new(2.0, 3.0, 0.5).unwrap())
            .unwrap();
        assert!(inv.abs_diff_eq(&sample().inverse().unwrap(), 1e-12));
        let before = inv;
        let flat = Scale3::new(1.0, 0.0, 1.0).unwrap();
        assert!(inv.set_inverse_trs(Distance3d::ZERO, tilted(), flat).is_err());
        assert_eq!(inv, before);
    }

    #[test]
    fn directions_ignore_translation() {
        let mut m = trs(d(9.0, 9.0, 9.0), Quaternion::IDENTITY, Scale3::uniform(2.0).unwrap());
        let zero = Quaternion::new(0.0, 0.0, 0.0, 0.0).unwrap();
        let before = m;
        assert!(m.set_trs(Distance3d::ZERO, zero, Scale3::IDENTITY).is_err());
        assert_eq!(m, before);
        assert_eq!(m.transform_direction(d(1.0, 0.0, 0.0)).unwrap(), d(2.0, 0.0, 0.0));
    }

    #[test]
    fn direction_leaving_f64_range_is_overflow() {
        let mut big = Matrix4x4::IDENTITY;
        big.set(0, 0, f64::MAX).unwrap();
        let err = big.transform_direction(d(2.0, 0.0, 0.0)).unwrap_err();
        assert_eq!(err.kind(), MathErrorKind::Overflow);
    }

    #[test]
    fn perspective_depth_range() {
        let fov = Fov::from_degrees(90).unwrap();
        let nf = NearFar::new(meters(1), meters(100)).unwrap();
        let mut p = Matrix4x4::IDENTITY;
        p.set_perspective_rh(fov, 1.0, nf).unwrap();
        let near = p.transform_point(Point3d::new(0.0, 0.0, -1.0));
        let far = p.transform_point(Point3d::new(0.0, 0.0, -100.0));
        assert!(near.z.abs() < 1e-12);
        assert!((far.z - 1.0).abs() < 1e-12);
        assert!(p.set_perspective_rh(fov, 0.0, nf).is_err());

        let inf = NearFar::infinite(meters(1)).unwrap();
        p.set_perspective_rh(fov, 2.0, inf).unwrap();
        let near = p.transform_point(Point3d::new(0.0, 0.0, -1.0));
        assert!(near.z.abs() < 1e-12);
        assert!((p.get(0, 0).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn view_proj_places_target_on_axis() {
        let fov = Fov::from_degrees(60).unwrap();
        let nf = NearFar::new(meters(1), meters(50)).unwrap();
        let mut vp = Matrix4x4::IDENTITY;
        let eye = d(0.0, 0.0, 10.0);
        vp.set_view_proj_rh(eye, Quaternion::IDENTITY, Scale3::IDENTITY, fov, 1.5, nf)
            .unwrap();
        let ndc = vp.transform_point(Point3d::ORIGIN);
        assert!(ndc.x.abs() < 1e-12 && ndc.y.abs() < 1e-12);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
