// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::time::Duration;

use super::Length3;
use crate::error::MathResult;
use crate::units::{Speed, SpeedUnit};

quantity_triple! {
    /// Velocity with one exact [`Speed`] per axis.
    Velocity3(Speed, SpeedUnit) {
        dx / set_dx / with_dx,
        dy / set_dy / with_dy,
        dz / set_dz / with_dz,
    }
}

quantity_vector_ops!(Velocity3(Speed) { dx, dy, dz });

impl Velocity3 {
    /// Displacement after travelling at this velocity for `elapsed`.
    pub fn times(self, elapsed: Duration) -> MathResult<Length3> {
        Ok(Length3::new(
            self.dx.times(elapsed)?,
            self.dy.times(elapsed)?,
            self.dz.times(elapsed)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Length;

    #[test]
    fn integrates_over_duration() {
        let v = Velocity3::from_units(2, 0, -4, SpeedUnit::MeterPerSecond).unwrap();
        let d = v.times(Duration::from_millis(500)).unwrap();
        assert_eq!(d, Length3::from_meters(1, 0, -2).unwrap());
        assert_eq!(d.dx(), Length::from_meters(1).unwrap());
    }

    #[test]
    fn speed_is_magnitude() {
        let v = Velocity3::from_units(3, 4, 0, SpeedUnit::MeterPerSecond).unwrap();
        assert_eq!(v.magnitude().unwrap(), Speed::from_meters_per_second(5).unwrap());
    }
}
