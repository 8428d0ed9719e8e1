// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::time::Duration;

use super::Velocity3;
use crate::error::MathResult;
use crate::units::{Acceleration, AccelerationUnit};

quantity_triple! {
    /// Acceleration with one exact [`Acceleration`] per axis.
    Acceleration3(Acceleration, AccelerationUnit) {
        dx / set_dx / with_dx,
        dy / set_dy / with_dy,
        dz / set_dz / with_dz,
    }
}

quantity_vector_ops!(Acceleration3(Acceleration) { dx, dy, dz });

impl Acceleration3 {
    /// Standard gravity pointing down the Y axis.
    pub const GRAVITY: Self = Self::new(
        Acceleration::ZERO,
        Acceleration::from_raw(-Acceleration::STANDARD_GRAVITY.raw()),
        Acceleration::ZERO,
    );

    /// Velocity gained from rest after `elapsed`.
    pub fn times(self, elapsed: Duration) -> MathResult<Velocity3> {
        Ok(Velocity3::new(
            self.dx.times(elapsed)?,
            self.dy.times(elapsed)?,
            self.dz.times(elapsed)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Speed, SpeedUnit};

    #[test]
    fn gravity_for_one_second() {
        let v = Acceleration3::GRAVITY.times(Duration::from_secs(1)).unwrap();
        assert!(v.dx().is_zero());
        let dy = v.dy().to_f64(SpeedUnit::MeterPerSecond);
        assert!((dy + 9.80665).abs() < 1e-9);
    }

    #[test]
    fn components_scale() {
        let a =
            Acceleration3::from_units(1, 2, 3, AccelerationUnit::MeterPerSecondSquared).unwrap();
        let v = a.times(Duration::from_secs(2)).unwrap();
        assert_eq!(v.dz(), Speed::from_meters_per_second(6).unwrap());
    }
}
