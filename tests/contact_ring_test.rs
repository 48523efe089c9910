use std::time::Duration;

use cgmath::Vector3;
use rigid_ngin::physics::{
    PhysicsWorld,
    contacts::{ContactRing, DEFAULT_CAPACITY, HitTarget, nearest_target},
};

mod common;
use common::test_utils::{dropped_ball, floor_desc};

fn v(x: f32, y: f32, z: f32) -> Vector3<f32> {
    Vector3::new(x, y, z)
}

const DIR: Vector3<f32> = Vector3::new(0.0, 0.0, -1.0);

#[test]
fn rejects_contacts_at_or_below_the_floor_cutoff() {
    let mut ring = ContactRing::new(8);
    assert!(!ring.record(v(0.0, -0.9, 0.0), DIR));
    assert!(!ring.record(v(0.0, -0.8, 0.0), DIR));
    assert!(ring.record(v(0.0, -0.79, 0.0), DIR));
    assert_eq!(ring.len(), 1);
}

#[test]
fn floor_cutoff_is_configurable() {
    let mut ring = ContactRing::new(8);
    ring.floor_cutoff = 2.0;
    assert!(!ring.record(v(0.0, 1.5, 0.0), DIR));
    assert!(ring.record(v(0.0, 2.5, 0.0), DIR));
}

#[test]
fn dedups_consecutive_identical_points() {
    let mut ring = ContactRing::new(8);
    let p = v(1.0, 2.0, 3.0);
    let q = v(1.0, 2.5, 3.0);

    assert!(ring.record(p, DIR));
    assert!(!ring.record(p, DIR));
    assert_eq!(ring.len(), 1);

    // A point sharing two of three components with the previous one is a
    // different hit and must be kept.
    assert!(ring.record(q, DIR));
    // Non-consecutive repeats are legitimate re-hits.
    assert!(ring.record(p, DIR));
    assert_eq!(ring.len(), 3);
}

#[test]
fn stores_the_hit_direction_with_the_point() {
    let mut ring = ContactRing::new(8);
    let dir = v(0.5, -0.5, 0.0);
    ring.record(v(0.0, 1.0, 0.0), dir);
    let sample = ring.latest().expect("one sample stored");
    assert_eq!(sample.direction, dir);
    assert_eq!(sample.point, v(0.0, 1.0, 0.0));
}

#[test]
fn wraps_around_at_capacity_overwriting_the_oldest() {
    let mut ring = ContactRing::new(4);
    for i in 0..6 {
        assert!(ring.record(v(i as f32, 1.0, 0.0), DIR));
    }
    assert_eq!(ring.len(), 4);
    assert_eq!(ring.capacity(), 4);
    assert_eq!(ring.latest().unwrap().point, v(5.0, 1.0, 0.0));

    let xs: Vec<f32> = ring.iter().map(|s| s.point.x).collect();
    assert_eq!(xs, vec![2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn iterates_oldest_to_newest_before_wrapping() {
    let mut ring = ContactRing::new(4);
    ring.record(v(0.0, 1.0, 0.0), DIR);
    ring.record(v(1.0, 1.0, 0.0), DIR);
    let xs: Vec<f32> = ring.iter().map(|s| s.point.x).collect();
    assert_eq!(xs, vec![0.0, 1.0]);
}

#[test]
fn latest_is_none_while_empty_and_clear_resets() {
    let mut ring = ContactRing::default();
    assert!(ring.latest().is_none());
    assert!(ring.is_empty());
    assert_eq!(ring.capacity(), DEFAULT_CAPACITY);

    ring.record(v(0.0, 1.0, 0.0), DIR);
    assert!(!ring.is_empty());
    ring.clear();
    assert!(ring.is_empty());
    assert!(ring.latest().is_none());
}

#[test]
fn absorbs_contacts_from_a_simulated_impact() {
    let mut world = PhysicsWorld::new();
    world.add_body(&floor_desc(0.0));
    world.add_body(&dropped_ball(2.0));

    let mut ring = ContactRing::default();
    let mut hit = None;
    for _ in 0..300 {
        world.step(Duration::from_millis(16));
        if let Some(point) = ring.absorb(&world, DIR) {
            hit = Some(point);
            break;
        }
    }

    let hit = hit.expect("the falling ball should touch the floor within 300 frames");
    assert!(hit.y > ring.floor_cutoff);
    // The impact happens where the ball meets the slab's top face.
    assert!(hit.y < 1.0, "impact reported at y = {}", hit.y);
    assert!(!ring.is_empty());
}

#[test]
fn nearest_target_matches_within_mean_extent_plus_margin() {
    // Mean extent 2 plus margin 5: hits within 7 units belong to the target.
    let targets = [HitTarget {
        position: v(0.0, 0.0, 0.0),
        size: v(2.0, 2.0, 2.0),
    }];
    assert_eq!(nearest_target(v(6.9, 0.0, 0.0), &targets), Some(0));
    assert_eq!(nearest_target(v(7.1, 0.0, 0.0), &targets), None);
}

#[test]
fn nearest_target_prefers_the_closest_match() {
    let targets = [
        HitTarget {
            position: v(0.0, 0.0, 0.0),
            size: v(2.0, 2.0, 2.0),
        },
        HitTarget {
            position: v(3.0, 0.0, 0.0),
            size: v(2.0, 2.0, 2.0),
        },
    ];
    assert_eq!(nearest_target(v(2.9, 0.0, 0.0), &targets), Some(1));
    assert_eq!(nearest_target(v(0.1, 0.0, 0.0), &targets), Some(0));
}

#[test]
fn nearest_target_with_no_targets_is_none() {
    assert_eq!(nearest_target(v(0.0, 0.0, 0.0), &[]), None);
}
