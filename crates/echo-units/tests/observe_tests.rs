// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
//! Dirty tracking and locking behaviour of `Mutable` cells.

use echo_units::{
    copy_of, copy_with, Direction3, Length, Length3, MathErrorKind, Mutable, Observable, Point3d,
    Snapshot,
};

fn one_meter_x() -> Length3 {
    Length3::from_meters(1, 0, 0).unwrap()
}

#[test]
fn fresh_ticket_is_clean() {
    let cell = Mutable::new(Length3::ZERO);
    let ticket = cell.observe();
    assert!(ticket.is_active());
    assert!(!ticket.is_dirty());
}

#[test]
fn mutation_dirties_and_reset_cleans() {
    let cell = Mutable::new(Length3::ZERO);
    let mut ticket = cell.observe();
    cell.set_dx(Length::from_meters(3).unwrap());
    assert!(ticket.is_dirty());
    ticket.reset();
    assert!(!ticket.is_dirty());
    cell.checked_add_assign(one_meter_x()).unwrap();
    assert!(ticket.fetch_and_reset());
    assert!(!ticket.fetch_and_reset());
}

#[test]
fn setting_the_same_value_still_dirties() {
    let cell = Mutable::new(Length3::ZERO);
    let mut ticket = cell.observe();
    cell.set(Length3::ZERO);
    assert!(ticket.fetch_and_reset());
    cell.update(|_| {});
    assert!(ticket.is_dirty());
    assert_eq!(cell.generation(), 2);
}

#[test]
fn steps_below_point_tolerance_accumulate() {
    let cell = Mutable::new(Point3d::ORIGIN);
    let ticket = cell.observe();
    for _ in 0..1000 {
        cell.update(|p| p.x += 5e-10);
    }
    assert!((cell.get().x - 5e-7).abs() < 1e-15);
    assert_eq!(cell.generation(), 1000);
    assert!(ticket.is_dirty());
}

#[test]
fn direction_nudges_below_tolerance_are_kept() {
    let cell = Mutable::new(Direction3::PLUS_X);
    for _ in 0..1000 {
        cell.mutate(|d| {
            *d = d.map(|[x, y, z]| [x, y + 1e-13, z])?;
            Ok(())
        })
        .unwrap();
    }
    assert!((cell.uy() - 1e-10).abs() < 1e-14);
    assert_eq!(cell.generation(), 1000);
}

#[test]
fn tickets_are_independent() {
    let cell = Mutable::new(Length3::ZERO);
    let mut a = cell.observe();
    let b = cell.observe();
    cell.set_dy(Length::from_meters(1).unwrap());
    a.reset();
    assert!(!a.is_dirty());
    assert!(b.is_dirty());
}

#[test]
fn ticket_goes_inert_after_drop() {
    let cell = Mutable::new(Length3::ZERO);
    let mut ticket = cell.observe();
    cell.set_dz(Length::from_meters(1).unwrap());
    drop(cell);
    assert!(!ticket.is_active());
    assert!(!ticket.is_dirty());
    assert!(!ticket.fetch_and_reset());
    ticket.reset();
    assert!(!ticket.is_dirty());
}

#[test]
fn failed_mutation_leaves_value_and_generation() {
    let cell = Mutable::new(Length3::new(Length::MAX, Length::ZERO, Length::ZERO));
    let ticket = cell.observe();
    let err = cell
        .mutate(|v| {
            *v = v.with_dy(Length::from_meters(5)?);
            let one_nm = Length3::new(Length::from_nanometers(1), Length::ZERO, Length::ZERO);
            *v = v.checked_add(one_nm)?;
            Ok(())
        })
        .unwrap_err();
    assert_eq!(err.kind(), MathErrorKind::Overflow);
    assert_eq!(cell.dy(), Length::ZERO);
    assert!(!ticket.is_dirty());
}

#[test]
fn concurrent_mutations_are_atomic() {
    let cell = Mutable::new(Length3::ZERO);
    let step = Length::from_meters(1).unwrap();
    std::thread::scope(|s| {
        for _ in 0..2 {
            s.spawn(|| {
                for _ in 0..1000 {
                    cell.mutate(|v| {
                        *v = v.with_dx(v.dx().checked_add(step)?);
                        Ok(())
                    })
                    .unwrap();
                }
            });
        }
    });
    assert_eq!(cell.dx(), Length::from_meters(2000).unwrap());
    assert_eq!(cell.generation(), 2000);
}

#[test]
fn snapshots_copy_out() {
    let cell = Mutable::new(one_meter_x());
    let frozen: Length3 = copy_of(&cell);
    cell.set_dx(Length::ZERO);
    assert_eq!(frozen, one_meter_x());
    assert_eq!(cell.snapshot(), Length3::ZERO);

    let doubled: Length3 = copy_with(&frozen, |m| m.scale_assign(2.0)).unwrap();
    assert_eq!(doubled, Length3::from_meters(2, 0, 0).unwrap());
    assert_eq!(frozen, one_meter_x());
}
