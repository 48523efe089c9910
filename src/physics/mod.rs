//! Rigid-body simulation for physics-driven demo scenes.
//!
//! This module wraps the rapier3d pipeline behind a small, engine-flavoured
//! surface. Bodies are described with [`BodyDesc`] (a shape plus the usual
//! mass/friction/restitution knobs), inserted into a [`PhysicsWorld`] and read
//! back each frame as position/rotation pairs for instanced rendering.
//!
//! # Key types
//!
//! - [`PhysicsWorld`] owns the simulation state and is stepped once per frame
//! - [`BodyDesc`] and [`Shape`] describe a body before insertion
//! - [`contacts::ContactRing`] buffers this frame's contact points
//! - [`launcher::Launcher`] spawns cooldown-gated projectiles

pub mod contacts;
pub mod launcher;

use std::time::Duration;

use cgmath::{One, Quaternion, Vector3};
use rapier3d::na;
use rapier3d::prelude::*;

use crate::physics::contacts::ContactPoint;

/// Collision shape of a body. Sizes are half-extents so a unit model
/// (spanning -1..1 on each axis) can be rendered with the same values as its
/// instance scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Cuboid { half_extents: Vector3<f32> },
    Ball { radius: f32 },
}

impl Shape {
    /// Instance scale that makes a unit model match the collider.
    pub fn render_scale(&self) -> Vector3<f32> {
        match self {
            Shape::Cuboid { half_extents } => *half_extents,
            Shape::Ball { radius } => Vector3::new(*radius, *radius, *radius),
        }
    }
}

/// Everything needed to insert a body into the world.
///
/// A mass of `0.0` marks the body as static (immovable); any other mass makes
/// it dynamic. Construct via [`cuboid`](Self::cuboid) or [`ball`](Self::ball)
/// and override the remaining fields with struct-update syntax.
#[derive(Clone, Debug)]
pub struct BodyDesc {
    pub shape: Shape,
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub mass: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl BodyDesc {
    pub fn cuboid(position: Vector3<f32>, half_extents: Vector3<f32>) -> Self {
        Self {
            shape: Shape::Cuboid { half_extents },
            position,
            rotation: Quaternion::one(),
            mass: 0.0,
            friction: 0.5,
            restitution: 0.2,
        }
    }

    pub fn ball(position: Vector3<f32>, radius: f32) -> Self {
        Self {
            shape: Shape::Ball { radius },
            position,
            rotation: Quaternion::one(),
            mass: 1.0,
            friction: 0.5,
            restitution: 0.2,
        }
    }

    pub fn is_static(&self) -> bool {
        self.mass == 0.0
    }
}

// Rolling balls in bullet-era demos carried extra rolling friction; rapier
// does not model it, angular damping is the closest stand-in.
const BALL_ANGULAR_DAMPING: f32 = 0.3;

// Upper bound for a single integration step. A stalled frame must not make
// the integrator explode.
const MAX_STEP_SECS: f32 = 0.1;

/// The simulation world: rapier sets plus pipeline scratch state.
///
/// One `PhysicsWorld` lives per scene. Gravity defaults to the demo-standard
/// `(0, -9.82, 0)` and can be changed freely between steps.
pub struct PhysicsWorld {
    pub gravity: Vector3<f32>,
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    max_step: f32,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self {
            gravity: Vector3::new(0.0, -9.82, 0.0),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            max_step: MAX_STEP_SECS,
        }
    }

    /// Insert a body plus its collider and return the handle used for all
    /// further interaction with it.
    pub fn add_body(&mut self, desc: &BodyDesc) -> RigidBodyHandle {
        let position = na::Isometry3::from_parts(
            na::Translation3::new(desc.position.x, desc.position.y, desc.position.z),
            na::UnitQuaternion::from_quaternion(na::Quaternion::new(
                desc.rotation.s,
                desc.rotation.v.x,
                desc.rotation.v.y,
                desc.rotation.v.z,
            )),
        );

        let mut builder = if desc.is_static() {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
        };
        builder = builder.position(position);
        if let Shape::Ball { .. } = desc.shape {
            builder = builder.angular_damping(BALL_ANGULAR_DAMPING);
        }
        let handle = self.bodies.insert(builder);

        let mut collider = match desc.shape {
            Shape::Cuboid { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            Shape::Ball { radius } => ColliderBuilder::ball(radius),
        }
        .friction(desc.friction)
        .restitution(desc.restitution);
        if !desc.is_static() {
            collider = collider.mass(desc.mass);
        }
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        handle
    }

    /// Advance the simulation by `dt`, clamped to the max step.
    pub fn step(&mut self, dt: Duration) {
        self.integration_parameters.dt = dt.as_secs_f32().min(self.max_step);
        self.pipeline.step(
            &vector![self.gravity.x, self.gravity.y, self.gravity.z],
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    /// Read a body's transform back for rendering.
    pub fn pose(&self, handle: RigidBodyHandle) -> Option<(Vector3<f32>, Quaternion<f32>)> {
        let body = self.bodies.get(handle)?;
        let translation = body.translation();
        let rotation = body.rotation().into_inner().coords;
        Some((
            Vector3::new(translation.x, translation.y, translation.z),
            Quaternion::new(rotation.w, rotation.x, rotation.y, rotation.z),
        ))
    }

    pub fn translation(&self, handle: RigidBodyHandle) -> Option<Vector3<f32>> {
        self.pose(handle).map(|(position, _)| position)
    }

    pub fn linvel(&self, handle: RigidBodyHandle) -> Option<Vector3<f32>> {
        let body = self.bodies.get(handle)?;
        let v = body.linvel();
        Some(Vector3::new(v.x, v.y, v.z))
    }

    /// Apply an impulse through the body's centre of mass, waking it up.
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vector3<f32>) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.apply_impulse(vector![impulse.x, impulse.y, impulse.z], true);
        } else {
            log::warn!("apply_impulse on a removed body");
        }
    }

    /// World-space contact points reported by the narrow phase for the most
    /// recent step, across all touching pairs.
    pub fn contact_points(&self) -> Vec<ContactPoint> {
        let mut points = Vec::new();
        for pair in self.narrow_phase.contact_pairs() {
            let Some(collider) = self.colliders.get(pair.collider1) else {
                continue;
            };
            for manifold in &pair.manifolds {
                let normal = manifold.data.normal;
                for contact in &manifold.points {
                    let world = collider.position() * contact.local_p1;
                    points.push(ContactPoint {
                        point: Vector3::new(world.x, world.y, world.z),
                        normal: Vector3::new(normal.x, normal.y, normal.z),
                        dist: contact.dist,
                    });
                }
            }
        }
        points
    }

    /// Remove a body and everything attached to it.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Drop all bodies, colliders and joints. Gravity and parameters survive,
    /// so the world can be reused for the next scene.
    pub fn clear(&mut self) {
        self.bodies = RigidBodySet::new();
        self.colliders = ColliderSet::new();
        self.islands = IslandManager::new();
        self.broad_phase = DefaultBroadPhase::new();
        self.narrow_phase = NarrowPhase::new();
        self.impulse_joints = ImpulseJointSet::new();
        self.multibody_joints = MultibodyJointSet::new();
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
