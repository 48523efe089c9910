//! Contact-point buffering for hit effects.
//!
//! Demos sample where things hit each other and feed those locations into
//! deformation or particle effects. The narrow phase reports the same touching
//! pair every frame though, so raw contact points would flood whatever
//! consumes them. [`ContactRing`] buffers samples in a fixed-size ring,
//! filters out floor contacts and drops immediate repeats.

use cgmath::Vector3;

use crate::physics::PhysicsWorld;

/// Default ring capacity, sized for the deformation buffers the demos upload.
pub const DEFAULT_CAPACITY: usize = 600;

/// Contacts at or below this height are resting-on-the-ground noise.
pub const DEFAULT_FLOOR_CUTOFF: f32 = -0.8;

/// A world-space contact reported by the narrow phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactPoint {
    pub point: Vector3<f32>,
    pub normal: Vector3<f32>,
    /// Signed distance between the two shapes; negative when penetrating.
    pub dist: f32,
}

/// A buffered hit: where it landed and the direction it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactSample {
    pub point: Vector3<f32>,
    pub direction: Vector3<f32>,
}

/// Fixed-capacity ring of contact samples.
///
/// Recording never allocates past the configured capacity: once full, the
/// oldest sample is overwritten. A sample is rejected when it sits at or below
/// the floor cutoff, or when it is identical to the one recorded just before
/// it (the narrow phase keeps reporting a persistent contact every frame).
pub struct ContactRing {
    samples: Vec<ContactSample>,
    head: usize,
    capacity: usize,
    pub floor_cutoff: f32,
}

impl ContactRing {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "contact ring needs room for at least one sample");
        Self {
            samples: Vec::with_capacity(capacity),
            head: 0,
            capacity,
            floor_cutoff: DEFAULT_FLOOR_CUTOFF,
        }
    }

    /// Try to buffer one contact. Returns whether the sample was stored.
    pub fn record(&mut self, point: Vector3<f32>, direction: Vector3<f32>) -> bool {
        if point.y <= self.floor_cutoff {
            return false;
        }
        if let Some(last) = self.latest() {
            if last.point == point {
                return false;
            }
        }

        let sample = ContactSample { point, direction };
        if self.samples.len() < self.capacity {
            self.samples.push(sample);
            self.head = self.samples.len() % self.capacity;
        } else {
            self.samples[self.head] = sample;
            self.head = (self.head + 1) % self.capacity;
        }
        true
    }

    /// Pull this frame's contact points out of the world and buffer them,
    /// tagging each with `direction` (typically the camera front at the time
    /// of the hit). Returns the newest accepted hit point, if any.
    pub fn absorb(
        &mut self,
        world: &PhysicsWorld,
        direction: Vector3<f32>,
    ) -> Option<Vector3<f32>> {
        let mut hit = None;
        for contact in world.contact_points() {
            if self.record(contact.point, direction) {
                hit = Some(contact.point);
            }
        }
        hit
    }

    /// The most recently stored sample.
    pub fn latest(&self) -> Option<&ContactSample> {
        if self.samples.is_empty() {
            return None;
        }
        let idx = if self.samples.len() < self.capacity {
            self.samples.len() - 1
        } else {
            (self.head + self.capacity - 1) % self.capacity
        };
        self.samples.get(idx)
    }

    /// Iterate stored samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &ContactSample> {
        // Before the first wrap the buffer is already in order; afterwards
        // `head` points at the oldest sample.
        let (newer, older) = if self.samples.len() < self.capacity {
            (&self.samples[0..0], &self.samples[..])
        } else {
            self.samples.split_at(self.head)
        };
        older.iter().chain(newer.iter())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.head = 0;
    }
}

impl Default for ContactRing {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Something a hit can be attributed to: a centre and a rough size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitTarget {
    pub position: Vector3<f32>,
    pub size: Vector3<f32>,
}

// Slack added to each target's mean extent when matching hits against it.
const HIT_MARGIN: f32 = 5.0;

/// Find the target a hit point belongs to.
///
/// A target matches when the point lies within its mean extent plus a margin;
/// of all matches the closest one wins. `None` means the hit belongs to no
/// registered target (e.g. a projectile striking the ground plane).
pub fn nearest_target(point: Vector3<f32>, targets: &[HitTarget]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, target) in targets.iter().enumerate() {
        let delta = point - target.position;
        let distance =
            (delta.x * delta.x + delta.y * delta.y + delta.z * delta.z).sqrt();
        let threshold = (target.size.x + target.size.y + target.size.z) / 3.0 + HIT_MARGIN;
        if distance < threshold && best.map_or(true, |(_, d)| distance < d) {
            best = Some((idx, distance));
        }
    }
    best.map(|(idx, _)| idx)
}
