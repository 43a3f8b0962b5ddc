// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]
//! Overlap of wrap-aware pipe boxes against a box spanning 200°..40°.

use ndt_geom::{BoxId, PipeRegion, PlainRegion};

fn pipe(a: f64, w: f64) -> PipeRegion {
    PipeRegion::new(BoxId(1), 20.0, 100.0, a, w).expect("valid box")
}

fn plain(a: f64, w: f64) -> PlainRegion {
    PlainRegion::new(20.0, 100.0, a, w).expect("valid region")
}

/// Box wrapping across the seam: `[200, 360) ∪ [0, 40)`.
fn wrapping() -> PipeRegion {
    pipe(200.0, 200.0)
}

fn assert_symmetric_overlap(other: &PipeRegion, expected: &[PlainRegion]) {
    let forward = wrapping().overlap(other);
    assert_eq!(forward, expected);
    assert_eq!(other.overlap(&wrapping()), forward, "overlap must be symmetric");
}

#[test]
fn box_in_the_gap_has_no_overlap() {
    assert_symmetric_overlap(&pipe(70.0, 70.0), &[]);
}

#[test]
fn one_region_on_the_upper_side() {
    assert_symmetric_overlap(&pipe(120.0, 180.0), &[plain(200.0, 100.0)]);
}

#[test]
fn one_region_fully_inside_the_upper_side() {
    assert_symmetric_overlap(&pipe(220.0, 130.0), &[plain(220.0, 130.0)]);
}

#[test]
fn one_region_on_the_lower_side() {
    assert_symmetric_overlap(&pipe(10.0, 180.0), &[plain(10.0, 30.0)]);
}

#[test]
fn one_region_fully_inside_the_lower_side() {
    assert_symmetric_overlap(&pipe(10.0, 30.0), &[plain(10.0, 30.0)]);
}

#[test]
fn two_regions_when_both_wrap() {
    assert_symmetric_overlap(&pipe(220.0, 160.0), &[plain(0.0, 20.0), plain(220.0, 140.0)]);
}

#[test]
fn two_regions_spanning_the_gap() {
    assert_symmetric_overlap(&pipe(30.0, 180.0), &[plain(30.0, 10.0), plain(200.0, 10.0)]);
}

#[test]
fn three_regions_reaching_down() {
    assert_symmetric_overlap(
        &pipe(30.0, 340.0),
        &[plain(0.0, 10.0), plain(30.0, 10.0), plain(200.0, 160.0)],
    );
}

#[test]
fn three_regions_reaching_up() {
    assert_symmetric_overlap(
        &pipe(270.0, 340.0),
        &[plain(0.0, 40.0), plain(200.0, 50.0), plain(270.0, 90.0)],
    );
}

#[test]
fn merged_overlap_joins_pieces_across_the_seam() {
    let merged = wrapping().overlap_merged(&pipe(220.0, 160.0));
    let expected = PipeRegion::anonymous(20.0, 100.0, 220.0, 160.0).expect("valid box");
    assert_eq!(merged, vec![expected]);
    assert!(merged[0].wraps());
}

#[test]
fn merged_overlap_without_pieces_is_empty() {
    assert!(wrapping().overlap_merged(&pipe(70.0, 70.0)).is_empty());
}

#[test]
fn longitudinal_miss_beats_circumferential_hit() {
    let near = wrapping();
    let far = PipeRegion::new(BoxId(2), 120.0, 10.0, 200.0, 200.0).expect("valid box");
    assert!(near.overlap(&far).is_empty());
    assert!(far.overlap(&near).is_empty());
}
