use std::time::Duration;

use cgmath::{InnerSpace, Vector3, Zero};
use rigid_ngin::physics::{BodyDesc, PhysicsWorld, Shape};

mod common;
use common::test_utils::{dropped_ball, floor_desc};

const STEP: Duration = Duration::from_millis(16);

#[test]
fn zero_mass_marks_a_body_static() {
    assert!(floor_desc(0.0).is_static());
    assert!(!dropped_ball(2.0).is_static());
}

#[test]
fn static_bodies_never_move() {
    let mut world = PhysicsWorld::new();
    let floor = world.add_body(&floor_desc(0.0));
    world.add_body(&dropped_ball(3.0));

    let before = world.translation(floor).unwrap();
    for _ in 0..240 {
        world.step(STEP);
    }
    let after = world.translation(floor).unwrap();
    assert_eq!(before, after);
}

#[test]
fn a_dropped_ball_falls_and_comes_to_rest_on_the_floor() {
    let mut world = PhysicsWorld::new();
    world.add_body(&floor_desc(0.0));
    let ball = world.add_body(&dropped_ball(3.0));

    let start_y = world.translation(ball).unwrap().y;
    for _ in 0..30 {
        world.step(STEP);
    }
    let falling_y = world.translation(ball).unwrap().y;
    assert!(falling_y < start_y, "gravity should pull the ball down");

    for _ in 0..600 {
        world.step(STEP);
    }
    let rest = world.translation(ball).unwrap();
    // Ball radius is 0.5, the slab's top face sits at 0.
    assert!(
        rest.y > 0.2 && rest.y < 0.8,
        "ball should rest on the floor, got y = {}",
        rest.y
    );
    let speed = world.linvel(ball).unwrap().magnitude();
    assert!(speed < 0.5, "ball should have settled, speed = {}", speed);
}

#[test]
fn contact_points_appear_on_impact() {
    let mut world = PhysicsWorld::new();
    world.add_body(&floor_desc(0.0));
    world.add_body(&dropped_ball(2.0));

    let mut contacts = Vec::new();
    for _ in 0..300 {
        world.step(STEP);
        contacts = world.contact_points();
        if !contacts.is_empty() {
            break;
        }
    }
    assert!(
        !contacts.is_empty(),
        "the ball should touch the floor within 300 frames"
    );
    // Contact points lie where ball and slab meet, near the top face.
    for contact in &contacts {
        assert!(
            contact.point.y.abs() < 0.5,
            "contact at unexpected height {}",
            contact.point.y
        );
        assert!(contact.normal.magnitude() > 0.1);
    }
}

#[test]
fn an_impulse_sets_a_body_in_motion() {
    let mut world = PhysicsWorld::new();
    world.gravity = Vector3::zero();
    let ball = world.add_body(&dropped_ball(0.0));

    world.apply_impulse(ball, Vector3::new(3.0, 0.0, 0.0));
    // Mass is 1, so the velocity change equals the impulse.
    let vel = world.linvel(ball).unwrap();
    assert!((vel - Vector3::new(3.0, 0.0, 0.0)).magnitude() < 1e-3);

    for _ in 0..60 {
        world.step(STEP);
    }
    let moved = world.translation(ball).unwrap();
    assert!(moved.x > 1.0, "ball should have drifted, x = {}", moved.x);
}

#[test]
fn a_huge_frame_delta_is_clamped() {
    let mut world = PhysicsWorld::new();
    let ball = world.add_body(&dropped_ball(5.0));

    world.step(Duration::from_secs(10));
    let y = world.translation(ball).unwrap().y;
    // Ten unclamped seconds of free fall would put the ball hundreds of
    // units down; the clamp keeps one step below a tenth of a second.
    assert!(y > 4.0, "step was not clamped, ball fell to y = {}", y);
}

#[test]
fn rotation_read_back_stays_normalized() {
    let mut world = PhysicsWorld::new();
    world.add_body(&floor_desc(0.0));
    let ball = world.add_body(&BodyDesc {
        mass: 2.0,
        ..BodyDesc::ball(Vector3::new(0.3, 3.0, 0.0), 0.5)
    });

    for _ in 0..120 {
        world.step(STEP);
    }
    let (_, rotation) = world.pose(ball).unwrap();
    let norm = (rotation.s * rotation.s + rotation.v.magnitude2()).sqrt();
    assert!((norm - 1.0).abs() < 1e-3, "quaternion norm drifted to {norm}");
}

#[test]
fn shapes_expose_their_render_scale() {
    let half_extents = Vector3::new(1.0, 2.0, 3.0);
    assert_eq!(
        Shape::Cuboid { half_extents }.render_scale(),
        half_extents
    );
    assert_eq!(
        Shape::Ball { radius: 0.5 }.render_scale(),
        Vector3::new(0.5, 0.5, 0.5)
    );
}

#[test]
fn removing_a_body_drops_its_pose() {
    let mut world = PhysicsWorld::new();
    let ball = world.add_body(&dropped_ball(2.0));
    assert!(world.pose(ball).is_some());

    world.remove_body(ball);
    assert!(world.pose(ball).is_none());
    assert_eq!(world.body_count(), 0);
}

#[test]
fn clear_leaves_a_reusable_world() {
    let mut world = PhysicsWorld::new();
    world.add_body(&floor_desc(0.0));
    world.add_body(&dropped_ball(2.0));
    assert_eq!(world.body_count(), 2);

    world.clear();
    assert_eq!(world.body_count(), 0);
    assert!(world.contact_points().is_empty());

    // The world keeps working after a clear.
    let ball = world.add_body(&dropped_ball(2.0));
    world.step(STEP);
    assert!(world.translation(ball).unwrap().y < 2.0);
}
