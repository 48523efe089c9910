use std::time::Duration;

use cgmath::{Quaternion, Vector3};
use rigid_ngin::data_structures::instance::Instance;
use rigid_ngin::physics::PhysicsWorld;

mod common;
use common::test_utils::dropped_ball;

#[test]
fn from_pose_keeps_the_scale_separate() {
    let pose = (Vector3::new(1.0, 2.0, 3.0), Quaternion::new(1.0, 0.0, 0.0, 0.0));
    let instance = Instance::from_pose(pose, Vector3::new(0.5, 0.5, 0.5));
    assert_eq!(instance.position, pose.0);
    assert_eq!(instance.scale, Vector3::new(0.5, 0.5, 0.5));
}

#[test]
fn set_pose_overwrites_transform_but_not_scale() {
    let mut instance = Instance::from_pose(
        (Vector3::new(0.0, 0.0, 0.0), Quaternion::new(1.0, 0.0, 0.0, 0.0)),
        Vector3::new(2.0, 2.0, 2.0),
    );
    instance.set_pose((Vector3::new(4.0, 5.0, 6.0), Quaternion::new(1.0, 0.0, 0.0, 0.0)));
    assert_eq!(instance.position, Vector3::new(4.0, 5.0, 6.0));
    assert_eq!(instance.scale, Vector3::new(2.0, 2.0, 2.0));
}

#[test]
fn the_model_matrix_carries_the_position_in_its_last_column() {
    let instance = Instance::from_pose(
        (Vector3::new(7.0, 8.0, 9.0), Quaternion::new(1.0, 0.0, 0.0, 0.0)),
        Vector3::new(1.0, 1.0, 1.0),
    );
    let matrix = instance.to_matrix();
    assert_eq!(matrix.w.x, 7.0);
    assert_eq!(matrix.w.y, 8.0);
    assert_eq!(matrix.w.z, 9.0);
    assert_eq!(matrix.w.w, 1.0);
}

#[test]
fn instances_track_a_simulated_body_across_frames() {
    let mut world = PhysicsWorld::new();
    let ball = world.add_body(&dropped_ball(5.0));
    let mut instance = Instance::from_pose(world.pose(ball).unwrap(), Vector3::new(0.5, 0.5, 0.5));
    assert_eq!(instance.position.y, 5.0);

    for _ in 0..30 {
        world.step(Duration::from_millis(16));
    }
    instance.set_pose(world.pose(ball).unwrap());
    assert!(instance.position.y < 5.0, "instance should follow the falling body");
    assert_eq!(instance.scale, Vector3::new(0.5, 0.5, 0.5));
}
