//! Cooldown-gated projectile spawning.

use std::time::Duration;

use cgmath::{InnerSpace, Vector3, Zero};
use rapier3d::prelude::RigidBodyHandle;

use crate::physics::{BodyDesc, PhysicsWorld};

/// Spawns ball projectiles into the world, rate-limited by a cooldown.
///
/// The launcher owns no bodies; every successful launch returns the new
/// body's handle so the caller can track it (bind it to an instance, despawn
/// it later, ...). Call [`tick`](Self::tick) once per frame with the frame
/// delta so the cooldown counts down.
pub struct Launcher {
    /// Impulse magnitude applied along the launch direction.
    pub speed: f32,
    pub radius: f32,
    pub mass: f32,
    pub cooldown: Duration,
    cooldown_left: Duration,
}

impl Launcher {
    pub fn new(speed: f32, cooldown: Duration) -> Self {
        Self {
            speed,
            radius: 0.2,
            mass: 1.0,
            cooldown,
            cooldown_left: Duration::ZERO,
        }
    }

    /// Count the cooldown down by one frame.
    pub fn tick(&mut self, dt: Duration) {
        self.cooldown_left = self.cooldown_left.saturating_sub(dt);
    }

    pub fn ready(&self) -> bool {
        self.cooldown_left.is_zero()
    }

    /// Spawn a projectile at `origin` and punch it along `direction`.
    ///
    /// Returns `None` while the cooldown is still running or when the
    /// direction is degenerate (zero-length).
    pub fn try_launch(
        &mut self,
        world: &mut PhysicsWorld,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
    ) -> Option<RigidBodyHandle> {
        if !self.ready() || direction.is_zero() {
            return None;
        }

        let desc = BodyDesc {
            mass: self.mass,
            friction: 0.3,
            restitution: 0.3,
            ..BodyDesc::ball(origin, self.radius)
        };
        let handle = world.add_body(&desc);
        world.apply_impulse(handle, direction.normalize() * self.speed);

        self.cooldown_left = self.cooldown;
        Some(handle)
    }
}

impl Default for Launcher {
    /// The demo-standard launcher: impulse 30, four shots per second.
    fn default() -> Self {
        Self::new(30.0, Duration::from_millis(250))
    }
}
