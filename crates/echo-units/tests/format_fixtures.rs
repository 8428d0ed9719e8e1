// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use once_cell::sync::Lazy;
use serde::Deserialize;

use echo_units::{Angle, AngleUnit, Area, AreaUnit, Length, LengthUnit, SignMode};

static RAW: &str = include_str!("fixtures/format-fixtures.json");

#[derive(Debug, Deserialize)]
struct FormatCase {
    label: String,
    kind: String,
    raw: i64,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    decimals: Option<u8>,
    #[serde(default)]
    sign: Option<String>,
    expected: String,
}

#[derive(Debug, Deserialize)]
struct FormatFixtures {
    cases: Vec<FormatCase>,
}

static FIXTURES: Lazy<FormatFixtures> =
    Lazy::new(|| serde_json::from_str(RAW).expect("parse format fixtures"));

fn sign_mode(name: Option<&str>) -> SignMode {
    match name {
        None | Some("negative_only") => SignMode::NegativeOnly,
        Some("always") => SignMode::Always,
        Some("pad") => SignMode::Pad,
        Some(other) => panic!("unknown sign mode {other:?}"),
    }
}

fn length_unit(name: &str) -> LengthUnit {
    match name {
        "nanometer" => LengthUnit::Nanometer,
        "millimeter" => LengthUnit::Millimeter,
        "meter" => LengthUnit::Meter,
        "kilometer" => LengthUnit::Kilometer,
        "foot" => LengthUnit::Foot,
        other => panic!("unknown length unit {other:?}"),
    }
}

fn angle_unit(name: &str) -> AngleUnit {
    match name {
        "degree" => AngleUnit::Degree,
        "arcminute" => AngleUnit::Arcminute,
        "turn" => AngleUnit::Turn,
        other => panic!("unknown angle unit {other:?}"),
    }
}

fn area_unit(name: &str) -> AreaUnit {
    match name {
        "square_millimeter" => AreaUnit::SquareMillimeter,
        "square_meter" => AreaUnit::SquareMeter,
        other => panic!("unknown area unit {other:?}"),
    }
}

fn render(case: &FormatCase) -> String {
    let unit = case.unit.as_deref();
    let sign = sign_mode(case.sign.as_deref());
    match case.kind.as_str() {
        "length" => Length::from_raw(case.raw).format(unit.map(length_unit), case.decimals, sign),
        "angle" => Angle::from_raw(case.raw).format(unit.map(angle_unit), case.decimals, sign),
        "area" => Area::from_raw(case.raw).format(unit.map(area_unit), case.decimals, sign),
        other => panic!("[{}] unknown kind {other:?}", case.label),
    }
}

#[test]
fn format_fixtures_render_as_expected() {
    assert!(!FIXTURES.cases.is_empty());
    for case in &FIXTURES.cases {
        assert_eq!(render(case), case.expected, "[{}] rendered differently", case.label);
    }
}

#[test]
fn default_display_matches_auto_format() {
    for case in FIXTURES
        .cases
        .iter()
        .filter(|c| c.unit.is_none() && c.decimals.is_none() && c.sign.is_none())
    {
        let shown = match case.kind.as_str() {
            "length" => Length::from_raw(case.raw).to_string(),
            "angle" => Angle::from_raw(case.raw).to_string(),
            "area" => Area::from_raw(case.raw).to_string(),
            _ => continue,
        };
        assert_eq!(shown, case.expected, "[{}] Display differs from format", case.label);
    }
}
