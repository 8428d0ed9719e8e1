// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::units::{Area, AreaUnit};

quantity_triple! {
    /// Oriented area: the magnitude is the area and the direction is the
    /// surface normal, as produced by [`Length3::cross`](super::Length3::cross).
    Area3(Area, AreaUnit) {
        dx / set_dx / with_dx,
        dy / set_dy / with_dy,
        dz / set_dz / with_dz,
    }
}

quantity_vector_ops!(Area3(Area) { dx, dy, dz });

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Direction3;

    #[test]
    fn magnitude_and_normal() {
        let a = Area3::from_units(0, 3, 4, AreaUnit::SquareMeter).unwrap();
        assert_eq!(a.magnitude().unwrap(), Area::from_square_meters(5).unwrap());
        assert_eq!(a.normalized().unwrap(), Direction3::new(0.0, 0.6, 0.8).unwrap());
    }

    #[test]
    fn checked_ops() {
        let a = Area3::splat(Area::from_square_meters(2).unwrap());
        let b = a.checked_mul(3).unwrap();
        assert_eq!(b.dx(), Area::from_square_meters(6).unwrap());
        assert_eq!(b.checked_sub(a).unwrap().checked_div(2).unwrap(), a);
        assert!(a.checked_div(0).is_err());
    }
}
