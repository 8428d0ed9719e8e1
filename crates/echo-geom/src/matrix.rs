// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rebuilding matrices from geometry types.

use echo_units::{MathResult, Matrix4x4};

use crate::camera::Camera;
use crate::types::transform::Transform;

/// Rebuilds a [`Matrix4x4`] in place from geometry types.
pub trait MatrixExt {
    /// Overwrites with the TRS matrix of `transform`.
    fn set_transform(&mut self, transform: &Transform) -> MathResult<()>;

    /// Overwrites with `projection · view` of `camera`.
    fn set_view_proj(&mut self, camera: &Camera) -> MathResult<()>;
}

impl MatrixExt for Matrix4x4 {
    fn set_transform(&mut self, transform: &Transform) -> MathResult<()> {
        self.set_trs(
            transform.translation().to_distance3d(),
            transform.rotation(),
            transform.scale(),
        )
    }

    fn set_view_proj(&mut self, camera: &Camera) -> MathResult<()> {
        let t = camera.transform();
        self.set_view_proj_rh(
            t.translation().to_distance3d(),
            t.rotation(),
            t.scale(),
            camera.fov(),
            camera.aspect(),
            camera.near_far(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use echo_units::{Length3, Quaternion, Scale3};

    #[test]
    fn set_transform_matches_to_matrix() {
        let t = Transform::new(
            Length3::from_meters(1, 2, 3).unwrap(),
            Quaternion::IDENTITY,
            Scale3::uniform(3.0).unwrap(),
        );
        let mut m = Matrix4x4::IDENTITY;
        m.set_transform(&t).unwrap();
        assert_eq!(m, t.to_matrix().unwrap());
        assert_eq!(m.get(0, 0).unwrap(), 3.0);
        assert_eq!(m.get(2, 3).unwrap(), 3.0);
    }
}
