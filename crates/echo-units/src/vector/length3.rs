// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use super::{Area3, Distance3d};
use crate::error::{MathError, MathResult};
use crate::units::{fixed, Area, Length, LengthUnit, NM2_PER_MM2};

quantity_triple! {
    /// Displacement with one exact [`Length`] per axis.
    Length3(Length, LengthUnit) {
        dx / set_dx / with_dx,
        dy / set_dy / with_dy,
        dz / set_dz / with_dz,
    }
}

quantity_vector_ops!(Length3(Length) { dx, dy, dz });

/// Exact `Σ a·b` in nm², or `None` if it leaves `i128`.
fn sum_of_products(pairs: [(i64, i64); 3]) -> Option<i128> {
    pairs.iter().try_fold(0_i128, |acc, &(a, b)| {
        acc.checked_add(i128::from(a).checked_mul(i128::from(b))?)
    })
}

fn nm2_to_area(op: &'static str, nm2: Option<i128>) -> MathResult<Area> {
    nm2.and_then(|v| fixed::mul_div_round(v, 1, NM2_PER_MM2))
        .map(Area::from_raw)
        .ok_or_else(|| MathError::overflow(op, "result does not fit an Area"))
}

impl Length3 {
    /// Displacement of whole metres per axis.
    pub fn from_meters(dx: i64, dy: i64, dz: i64) -> MathResult<Self> {
        Self::from_units(dx, dy, dz, LengthUnit::Meter)
    }

    /// Dot product, rounded once to the nearest square millimetre.
    pub fn dot(self, rhs: Self) -> MathResult<Area> {
        let [ax, ay, az] = self.raw();
        let [bx, by, bz] = rhs.raw();
        nm2_to_area("Length3::dot", sum_of_products([(ax, bx), (ay, by), (az, bz)]))
    }

    /// Right-handed cross product; each component is an oriented area.
    pub fn cross(self, rhs: Self) -> MathResult<Area3> {
        let [ax, ay, az] = self.raw();
        let [bx, by, bz] = rhs.raw();
        let component = |p: (i64, i64), q: (i64, i64)| {
            let l = i128::from(p.0).checked_mul(i128::from(p.1))?;
            let r = i128::from(q.0).checked_mul(i128::from(q.1))?;
            l.checked_sub(r)
        };
        Ok(Area3::new(
            nm2_to_area("Length3::cross", component((ay, bz), (az, by)))?,
            nm2_to_area("Length3::cross", component((az, bx), (ax, bz)))?,
            nm2_to_area("Length3::cross", component((ax, by), (ay, bx)))?,
        ))
    }

    /// Components in metres as an `f64` vector.
    pub fn to_distance3d(self) -> Distance3d {
        Distance3d::from_finite(self.to_f64_array(LengthUnit::Meter))
    }

    /// Rounds a metre vector to the nearest nanometre per axis.
    pub fn from_distance3d(d: Distance3d) -> MathResult<Self> {
        Ok(Self::new(
            Length::from_meters_f64(d.dx())?,
            Length::from_meters_f64(d.dy())?,
            Length::from_meters_f64(d.dz())?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::Mutable;
    use crate::units::AreaUnit;

    fn m(v: i64) -> Length {
        Length::from_meters(v).unwrap()
    }

    #[test]
    fn dot_and_cross() {
        let a = Length3::new(m(1), m(2), m(3));
        let b = Length3::new(m(4), m(5), m(6));
        assert_eq!(a.dot(b).unwrap().to_f64(AreaUnit::SquareMeter), 32.0);
        let c = Length3::new(m(1), Length::ZERO, Length::ZERO)
            .cross(Length3::new(Length::ZERO, m(1), Length::ZERO))
            .unwrap();
        assert_eq!(c.dz().to_f64(AreaUnit::SquareMeter), 1.0);
        assert!(c.dx().is_zero() && c.dy().is_zero());
    }

    #[test]
    fn magnitude_of_3_4_triangle() {
        let v = Length3::new(m(3), Length::ZERO, m(4));
        assert_eq!(v.magnitude().unwrap(), m(5));
        assert!(Length3::ZERO.normalized().is_err());
    }

    #[test]
    fn overflow_aborts_without_partial_result() {
        let big = Length3::splat(Length::MAX);
        assert!(big.checked_add(Length3::splat(Length::from_nanometers(1))).is_err());
        let cell = Mutable::new(big);
        let one_nm = Length3::new(Length::ZERO, Length::ZERO, Length::from_nanometers(1));
        assert!(cell.checked_add_assign(one_nm).is_err());
        assert_eq!(cell.get(), big);
        assert_eq!(cell.generation(), 0);
    }

    #[test]
    fn accessors_and_edit() {
        let v = Length3::ZERO
            .edited(|cell| {
                cell.set_dx(m(2));
                cell.set_dz(m(-1));
                Ok(())
            })
            .unwrap();
        assert_eq!(v, Length3::new(m(2), Length::ZERO, m(-1)));
        assert_eq!(v.to_string(), "(2m, 0m, -1m)");
        let cell = Mutable::new(v);
        assert_eq!(cell.dx(), m(2));
        cell.set_dy(m(7));
        assert_eq!(cell.dy(), m(7));
        assert_eq!(cell.generation(), 1);
    }

    #[test]
    fn distance3d_round_trip() {
        let v = Length3::from_meters(1, -2, 3).unwrap();
        assert_eq!(Length3::from_distance3d(v.to_distance3d()).unwrap(), v);
    }
}
