// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
//! End-to-end behaviour across scalars, vectors, rotation and formatting.

use echo_units::{
    Angle, Area, Direction3, FormatPrefs, Length, Length3, LengthUnit, MathErrorKind, Mutable,
    Proportion, Quaternion, QuantityLiteral, SignMode, SpeedUnit, Velocity3,
};
use std::time::Duration;

#[test]
fn millimeters_display_in_meters() {
    let len = Length::new(1500, LengthUnit::Millimeter).unwrap();
    assert_eq!(len.in_whole_meters(), 1);
    assert_eq!(len.to_string(), "1.5m");
}

#[test]
fn smallest_unit_overflow_is_reported() {
    let max = Length::new(i64::MAX, LengthUnit::Nanometer).unwrap();
    let one = Length::new(1, LengthUnit::Nanometer).unwrap();
    let err = max.checked_add(one).unwrap_err();
    assert_eq!(err.kind(), MathErrorKind::Overflow);
    assert!(err.to_string().contains("Length"));
}

#[test]
fn direction_is_normalized() {
    let d = Direction3::new(3.0, 0.0, 4.0).unwrap();
    assert_eq!(d, Direction3::new(0.6, 0.0, 0.8).unwrap());
    let mag = d.to_distance3d().magnitude();
    assert!((mag - 1.0).abs() < 1e-15);
}

#[test]
fn identity_rotation_leaves_vector() {
    let v = Length3::new(Length::from_meters(1).unwrap(), Length::ZERO, Length::ZERO);
    assert_eq!(Quaternion::IDENTITY.rotate_length3(v).unwrap(), v);
}

#[test]
fn literals_and_cross_kind_products() {
    let width = 1500_i64.millimeters().unwrap();
    let depth = 2_i64.meters().unwrap();
    let area: Area = width.times(depth).unwrap();
    assert_eq!(area, Area::from_square_meters(3).unwrap());
    assert_eq!(area.div_length(depth).unwrap(), width);
    assert_eq!(90_i64.degrees().unwrap(), Angle::RIGHT);

    let v = Velocity3::from_units(3, 0, -4, SpeedUnit::MeterPerSecond).unwrap();
    let travelled = v.times(Duration::from_secs(2)).unwrap();
    assert_eq!(travelled, Length3::from_meters(6, 0, -8).unwrap());
    assert_eq!(travelled.magnitude().unwrap(), Length::from_meters(10).unwrap());
}

#[test]
fn proportion_scales_quantities() {
    let half = Proportion::HALF;
    let scaled = half.scale(Length::from_meters(3).unwrap());
    assert_eq!(scaled, Length::from_millimeters(1500).unwrap());
    assert_eq!(Proportion::from_fraction(1.7).unwrap(), Proportion::ONE);
    assert_eq!(Proportion::from_fraction(-0.2).unwrap(), Proportion::ZERO);
}

#[test]
fn prefs_override_display() {
    let prefs = FormatPrefs {
        length_unit: Some(LengthUnit::Centimeter),
        ..FormatPrefs::default()
    }
    .with_decimals(1)
    .unwrap()
    .with_sign(SignMode::Always);
    let len = Length::from_millimeters(1234).unwrap();
    assert_eq!(len.format_with(&prefs), "+123.4cm");
    assert_eq!(len.format_with(&FormatPrefs::default()), len.to_string());
}

#[test]
fn mutable_direction_renormalizes_atomically() {
    let cell = Mutable::new(Direction3::PLUS_Z);
    cell.set_ux(1.0).unwrap();
    let [x, y, z] = cell.get().to_array();
    assert!((x - z).abs() < 1e-15);
    assert_eq!(y, 0.0);
    assert!(cell.set_components(0.0, 0.0, 0.0).is_err());
}
