// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scale, rotate, then translate placement.

use core::fmt;

use echo_units::{Length3, MathResult, Matrix4x4, Mutable, Point3, Quaternion, Scale3};

/// Placement with non-uniform scale: scale first, then rotate, then
/// translate (`M = T · R · S`).
///
/// Conventions:
/// - `translation` is exact ([`Length3`], nanometre ticks).
/// - `rotation` need not be unit length; every consumer normalises it.
/// - `scale` factors are finite; zero is allowed but not invertible.
///
/// Composition ([`Transform::then`]) keeps the TRS form, which cannot
/// represent shear. It is exact only when scale is uniform or the scale
/// axes stay aligned with the rotation axes; otherwise the shear component
/// is dropped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    translation: Length3,
    rotation: Quaternion,
    scale: Scale3,
}

impl Transform {
    /// No translation, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: Length3::ZERO,
        rotation: Quaternion::IDENTITY,
        scale: Scale3::IDENTITY,
    };

    /// Creates a transform from components.
    pub const fn new(translation: Length3, rotation: Quaternion, scale: Scale3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Pure translation.
    pub const fn from_translation(translation: Length3) -> Self {
        Self::new(translation, Quaternion::IDENTITY, Scale3::IDENTITY)
    }

    /// Pure rotation.
    pub const fn from_rotation(rotation: Quaternion) -> Self {
        Self::new(Length3::ZERO, rotation, Scale3::IDENTITY)
    }

    /// Translation component.
    pub const fn translation(&self) -> Length3 {
        self.translation
    }

    /// Rotation component.
    pub const fn rotation(&self) -> Quaternion {
        self.rotation
    }

    /// Scale component.
    pub const fn scale(&self) -> Scale3 {
        self.scale
    }

    /// Copy with another translation.
    pub const fn with_translation(self, translation: Length3) -> Self {
        Self {
            translation,
            ..self
        }
    }

    /// Copy with another rotation.
    pub const fn with_rotation(self, rotation: Quaternion) -> Self {
        Self { rotation, ..self }
    }

    /// Copy with another scale.
    pub const fn with_scale(self, scale: Scale3) -> Self {
        Self { scale, ..self }
    }

    /// Applies `self`, then `next`.
    ///
    /// ```
    /// use echo_geom::Transform;
    /// assert_eq!(Transform::IDENTITY.then(&Transform::IDENTITY).unwrap(), Transform::IDENTITY);
    /// ```
    pub fn then(&self, next: &Self) -> MathResult<Self> {
        let moved = next
            .rotation
            .rotate_length3(next.scale.scale_length3(self.translation)?)?;
        Ok(Self {
            translation: next.translation.checked_add(moved)?,
            rotation: next.rotation * self.rotation,
            scale: next.scale.product(self.scale)?,
        })
    }

    /// Applies `prev`, then `self`.
    pub fn prepend(&self, prev: &Self) -> MathResult<Self> {
        prev.then(self)
    }

    /// Approximate inverse in TRS form; exact under the same conditions as
    /// [`Transform::then`]. A zero scale factor is an `InvalidState`.
    pub fn inverse(&self) -> MathResult<Self> {
        let scale = self.scale.inverse()?;
        let rotation = self.rotation.normalized()?.conjugate();
        let back = scale.scale_length3(rotation.rotate_length3(self.translation)?)?;
        Ok(Self {
            translation: back.checked_neg()?,
            rotation,
            scale,
        })
    }

    /// Maps a point from local to parent space.
    pub fn transform_point(&self, p: Point3) -> MathResult<Point3> {
        let local = self.scale.scale_length3(p.to_length3())?;
        let rotated = self.rotation.rotate_length3(local)?;
        Point3::from_length3(rotated).checked_add(self.translation)
    }

    /// Maps a displacement; translation does not apply.
    pub fn transform_vector(&self, v: Length3) -> MathResult<Length3> {
        self.rotation.rotate_length3(self.scale.scale_length3(v)?)
    }

    /// Column-major matrix `T · R · S` in metres.
    pub fn to_matrix(&self) -> MathResult<Matrix4x4> {
        let mut m = Matrix4x4::IDENTITY;
        m.set_trs(self.translation.to_distance3d(), self.rotation, self.scale)?;
        Ok(m)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T{} R{} S{}",
            self.translation, self.rotation, self.scale
        )
    }
}

/// In-place editing of a shared transform.
pub trait TransformCell {
    /// Current translation.
    fn translation(&self) -> Length3;
    /// Current rotation.
    fn rotation(&self) -> Quaternion;
    /// Current scale.
    fn scale(&self) -> Scale3;
    /// Replaces the translation.
    fn set_translation(&self, translation: Length3);
    /// Replaces the rotation.
    fn set_rotation(&self, rotation: Quaternion);
    /// Replaces the scale.
    fn set_scale(&self, scale: Scale3);
    /// Moves by `offset`; nothing changes on overflow.
    fn translate_by(&self, offset: Length3) -> MathResult<()>;
    /// Composes `next` after the current transform atomically.
    fn then_in_place(&self, next: &Transform) -> MathResult<()>;
}

impl TransformCell for Mutable<Transform> {
    fn translation(&self) -> Length3 {
        self.read(|t| t.translation)
    }

    fn rotation(&self) -> Quaternion {
        self.read(|t| t.rotation)
    }

    fn scale(&self) -> Scale3 {
        self.read(|t| t.scale)
    }

    fn set_translation(&self, translation: Length3) {
        self.update(|t| t.translation = translation);
    }

    fn set_rotation(&self, rotation: Quaternion) {
        self.update(|t| t.rotation = rotation);
    }

    fn set_scale(&self, scale: Scale3) {
        self.update(|t| t.scale = scale);
    }

    fn translate_by(&self, offset: Length3) -> MathResult<()> {
        self.mutate(|t| {
            t.translation = t.translation.checked_add(offset)?;
            Ok(())
        })
    }

    fn then_in_place(&self, next: &Transform) -> MathResult<()> {
        self.mutate(|t| {
            *t = t.then(next)?;
            Ok(())
        })
    }
}
