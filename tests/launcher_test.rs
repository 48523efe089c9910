use std::time::Duration;

use cgmath::{InnerSpace, Vector3, Zero};
use rigid_ngin::physics::{PhysicsWorld, launcher::Launcher};

mod common;
use common::test_utils::floor_desc;

#[test]
fn launches_when_ready_and_then_cools_down() {
    let mut world = PhysicsWorld::new();
    world.add_body(&floor_desc(0.0));
    let mut launcher = Launcher::new(30.0, Duration::from_millis(250));

    assert!(launcher.ready());
    let origin = Vector3::new(0.0, 5.0, 0.0);
    let dir = Vector3::new(0.0, 0.0, -1.0);

    let first = launcher.try_launch(&mut world, origin, dir);
    assert!(first.is_some());
    assert_eq!(world.body_count(), 2);

    // Immediately after a launch the cooldown blocks the next shot.
    assert!(!launcher.ready());
    assert!(launcher.try_launch(&mut world, origin, dir).is_none());
    assert_eq!(world.body_count(), 2);

    launcher.tick(Duration::from_millis(100));
    assert!(launcher.try_launch(&mut world, origin, dir).is_none());
    launcher.tick(Duration::from_millis(100));
    launcher.tick(Duration::from_millis(100));
    assert!(launcher.ready());
    assert!(launcher.try_launch(&mut world, origin, dir).is_some());
    assert_eq!(world.body_count(), 3);
}

#[test]
fn the_projectile_leaves_with_the_configured_speed() {
    let mut world = PhysicsWorld::new();
    let mut launcher = Launcher::new(30.0, Duration::from_millis(250));
    launcher.mass = 1.0;

    let dir = Vector3::new(3.0, 0.0, 4.0);
    let handle = launcher
        .try_launch(&mut world, Vector3::new(0.0, 2.0, 0.0), dir)
        .expect("launcher starts ready");

    // Impulse over unit mass: speed equals the impulse magnitude, along the
    // normalized direction.
    let vel = world.linvel(handle).unwrap();
    assert!((vel.magnitude() - 30.0).abs() < 1e-2);
    assert!((vel.normalize() - dir.normalize()).magnitude() < 1e-3);
}

#[test]
fn a_degenerate_direction_is_refused() {
    let mut world = PhysicsWorld::new();
    let mut launcher = Launcher::default();

    let result = launcher.try_launch(&mut world, Vector3::new(0.0, 2.0, 0.0), Vector3::zero());
    assert!(result.is_none());
    assert_eq!(world.body_count(), 0);
    // A refused launch must not burn the cooldown.
    assert!(launcher.ready());
}

#[test]
fn default_launcher_matches_the_demo_tuning() {
    let launcher = Launcher::default();
    assert_eq!(launcher.speed, 30.0);
    assert_eq!(launcher.cooldown, Duration::from_millis(250));
}

#[test]
fn launched_projectiles_fly_then_fall() {
    let mut world = PhysicsWorld::new();
    world.add_body(&floor_desc(0.0));
    let mut launcher = Launcher::default();

    let origin = Vector3::new(0.0, 3.0, 0.0);
    let handle = launcher
        .try_launch(&mut world, origin, Vector3::new(1.0, 0.0, 0.0))
        .unwrap();

    for _ in 0..30 {
        world.step(Duration::from_millis(16));
    }
    let pos = world.translation(handle).unwrap();
    assert!(pos.x > 3.0, "projectile should have flown forward, x = {}", pos.x);
    assert!(pos.y < origin.y, "gravity should pull the projectile down");
}
