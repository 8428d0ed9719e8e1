// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Right-handed perspective camera.
//!
//! The camera looks down its local −Z axis with +Y up. Projection maps
//! view-space depth onto `[0, 1]`.

use core::fmt;

use echo_units::{
    Direction3, Fov, MathError, MathResult, Matrix4x4, Mutable, NearFar, Point3, Quaternion,
};
use tracing::debug;

use crate::types::transform::Transform;

/// Placement plus lens of a perspective camera.
///
/// `aspect` (viewport width / height) is finite and positive at every
/// assignment; [`Fov`] and [`NearFar`] validate their own ranges.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Camera {
    transform: Transform,
    fov: Fov,
    near_far: NearFar,
    aspect: f64,
}

fn check_aspect(op: &'static str, aspect: f64) -> MathResult<f64> {
    if aspect.is_finite() && aspect > 0.0 {
        Ok(aspect)
    } else {
        Err(MathError::invalid_state(
            op,
            format!("aspect must be finite and > 0, got {aspect}"),
        ))
    }
}

impl Camera {
    /// Builds a camera; a non-positive or non-finite aspect is an
    /// `InvalidState`.
    pub fn new(transform: Transform, fov: Fov, near_far: NearFar, aspect: f64) -> MathResult<Self> {
        Ok(Self {
            transform,
            fov,
            near_far,
            aspect: check_aspect("Camera::new", aspect)?,
        })
    }

    /// Placement in world space.
    pub const fn transform(&self) -> Transform {
        self.transform
    }

    /// Vertical field of view.
    pub const fn fov(&self) -> Fov {
        self.fov
    }

    /// Clip distances.
    pub const fn near_far(&self) -> NearFar {
        self.near_far
    }

    /// Viewport width / height.
    pub const fn aspect(&self) -> f64 {
        self.aspect
    }

    /// Copy with another placement.
    pub const fn with_transform(self, transform: Transform) -> Self {
        Self { transform, ..self }
    }

    /// Copy with another field of view.
    pub const fn with_fov(self, fov: Fov) -> Self {
        Self { fov, ..self }
    }

    /// Copy with other clip distances.
    pub const fn with_near_far(self, near_far: NearFar) -> Self {
        Self { near_far, ..self }
    }

    /// Copy with another aspect ratio.
    pub fn with_aspect(self, aspect: f64) -> MathResult<Self> {
        Ok(Self {
            aspect: check_aspect("Camera::with_aspect", aspect)?,
            ..self
        })
    }

    /// Horizontal field of view implied by the aspect ratio.
    pub fn horizontal_fov(&self) -> MathResult<Fov> {
        self.fov.horizontal_for(self.aspect)
    }

    /// World-space viewing direction (local −Z).
    pub fn forward(&self) -> MathResult<Direction3> {
        self.transform.rotation().rotate_direction(Direction3::MINUS_Z)
    }

    /// Copy rotated to face `target` with `up` as the vertical hint. Looking
    /// at the camera's own position, or straight along `up`, is an
    /// `InvalidState`.
    pub fn looking_at(self, target: Point3, up: Direction3) -> MathResult<Self> {
        let eye = Point3::from_length3(self.transform.translation());
        let dir = eye.vector_to(target)?.normalized()?;
        let rotation = Quaternion::look_along(dir, up)?;
        Ok(self.with_transform(self.transform.with_rotation(rotation)))
    }

    /// World-to-view matrix: the inverse of the camera placement. Zero
    /// scale factors are an `InvalidState`.
    pub fn view_matrix(&self) -> MathResult<Matrix4x4> {
        let mut m = Matrix4x4::IDENTITY;
        m.set_inverse_trs(
            self.transform.translation().to_distance3d(),
            self.transform.rotation(),
            self.transform.scale(),
        )?;
        debug!(camera = %self, "rebuilt view matrix");
        Ok(m)
    }

    /// View-to-clip matrix.
    pub fn projection_matrix(&self) -> MathResult<Matrix4x4> {
        let mut m = Matrix4x4::IDENTITY;
        m.set_perspective_rh(self.fov, self.aspect, self.near_far)?;
        debug!(fov = %self.fov, aspect = self.aspect, "rebuilt projection matrix");
        Ok(m)
    }

    /// `projection · view`.
    pub fn view_proj_matrix(&self) -> MathResult<Matrix4x4> {
        let mut m = Matrix4x4::IDENTITY;
        m.set_view_proj_rh(
            self.transform.translation().to_distance3d(),
            self.transform.rotation(),
            self.transform.scale(),
            self.fov,
            self.aspect,
            self.near_far,
        )?;
        Ok(m)
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "camera at {} fov {} aspect {}",
            self.transform.translation(),
            self.fov,
            self.aspect
        )
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Camera {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            transform: Transform,
            fov: Fov,
            near_far: NearFar,
            aspect: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.transform, raw.fov, raw.near_far, raw.aspect)
            .map_err(serde::de::Error::custom)
    }
}

/// In-place editing of a shared camera.
pub trait CameraCell {
    /// Current aspect ratio.
    fn aspect(&self) -> f64;
    /// Replaces the aspect ratio; rejected values leave the camera untouched.
    fn set_aspect(&self, aspect: f64) -> MathResult<()>;
    /// Replaces the field of view.
    fn set_fov(&self, fov: Fov);
    /// Replaces the clip distances.
    fn set_near_far(&self, near_far: NearFar);
    /// Replaces the placement.
    fn set_transform(&self, transform: Transform);
    /// Turns the camera to face `target`.
    fn look_at(&self, target: Point3, up: Direction3) -> MathResult<()>;
}

impl CameraCell for Mutable<Camera> {
    fn aspect(&self) -> f64 {
        self.read(|c| c.aspect)
    }

    fn set_aspect(&self, aspect: f64) -> MathResult<()> {
        self.mutate(|c| {
            *c = c.with_aspect(aspect)?;
            Ok(())
        })
    }

    fn set_fov(&self, fov: Fov) {
        self.update(|c| c.fov = fov);
    }

    fn set_near_far(&self, near_far: NearFar) {
        self.update(|c| c.near_far = near_far);
    }

    fn set_transform(&self, transform: Transform) {
        self.update(|c| c.transform = transform);
    }

    fn look_at(&self, target: Point3, up: Direction3) -> MathResult<()> {
        self.mutate(|c| {
            *c = c.looking_at(target, up)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use echo_units::{Length, Length3, MathErrorKind, Observable, Point3d};

    fn camera() -> Camera {
        Camera::new(
            Transform::from_translation(Length3::from_meters(0, 0, 10).unwrap()),
            Fov::from_degrees(60).unwrap(),
            NearFar::new(
                Length::from_meters(1).unwrap(),
                Length::from_meters(100).unwrap(),
            )
            .unwrap(),
            16.0 / 9.0,
        )
        .unwrap()
    }

    #[test]
    fn aspect_must_be_positive() {
        let c = camera();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(c.with_aspect(bad).unwrap_err().kind(), MathErrorKind::InvalidState);
        }
        let cell = Mutable::new(c);
        assert!(cell.set_aspect(0.0).is_err());
        assert_eq!(CameraCell::aspect(&cell), 16.0 / 9.0);
        assert_eq!(cell.generation(), 0);
    }

    #[test]
    fn view_matrix_moves_eye_to_origin() {
        let view = camera().view_matrix().unwrap();
        let eye = view.transform_point(Point3d::new(0.0, 0.0, 10.0));
        assert!(eye.is_zero());
        let ahead = view.transform_point(Point3d::ORIGIN);
        assert_eq!(ahead, Point3d::new(0.0, 0.0, -10.0));
    }

    #[test]
    fn view_proj_is_projection_times_view() {
        let c = camera();
        let expected = c.projection_matrix().unwrap() * c.view_matrix().unwrap();
        assert!(c.view_proj_matrix().unwrap().abs_diff_eq(&expected, 1e-12));
    }

    #[test]
    fn looking_at_target() {
        let c = camera()
            .looking_at(Point3::from_meters(10, 0, 10).unwrap(), Direction3::PLUS_Y)
            .unwrap();
        assert_eq!(c.forward().unwrap(), Direction3::PLUS_X);
        let same_spot = Point3::from_meters(0, 0, 10).unwrap();
        assert!(c.looking_at(same_spot, Direction3::PLUS_Y).is_err());
    }

    #[test]
    fn cell_updates() {
        let cell = Mutable::new(camera());
        let mut ticket = cell.observe();
        cell.set_aspect(1.0).unwrap();
        assert!(ticket.fetch_and_reset());
        cell.look_at(Point3::from_meters(0, 0, 0).unwrap(), Direction3::PLUS_Y).unwrap();
        // already facing the origin down −Z
        assert_eq!(cell.get().forward().unwrap(), Direction3::MINUS_Z);
    }
}
