use cgmath::Vector3;
use rapier3d::prelude::RigidBodyHandle;
use wgpu::util::DeviceExt;

use crate::{
    context::InitContext,
    data_structures::{instance::Instance, model},
    physics::{BodyDesc, PhysicsWorld, contacts::HitTarget},
    resources,
};

/**
 * `RigidBlocks` is an instanced set of one model where every instance is
 * driven by a rigid body.
 *
 * The body set and the instance list stay index-aligned: instance `i` renders
 * wherever body `i` currently is. Call `sync` after stepping the world and
 * `write_to_buffer` before rendering.
 */
pub struct RigidBlocks {
    pub obj_model: model::Model,
    pub instances: Vec<Instance>,
    pub bodies: Vec<RigidBodyHandle>,
    pub instance_buffer: wgpu::Buffer,
    scales: Vec<Vector3<f32>>,
    buffer_capacity: usize,
}

impl RigidBlocks {
    /// Load `obj_file` and insert one body per descriptor. Instances start at
    /// the bodies' initial poses, scaled to match their collider shapes.
    pub async fn new(
        ctx: &InitContext,
        world: &mut PhysicsWorld,
        descs: &[BodyDesc],
        obj_file: &str,
    ) -> anyhow::Result<Self> {
        let obj_model = resources::load_model_obj(obj_file, &ctx.device, &ctx.queue).await?;

        let mut bodies = Vec::with_capacity(descs.len());
        let mut instances = Vec::with_capacity(descs.len());
        let mut scales = Vec::with_capacity(descs.len());
        for desc in descs {
            let handle = world.add_body(desc);
            let scale = desc.shape.render_scale();
            let pose = world
                .pose(handle)
                .expect("a freshly inserted body has a pose");
            bodies.push(handle);
            instances.push(Instance::from_pose(pose, scale));
            scales.push(scale);
        }

        let instance_data = instances.iter().map(Instance::to_raw).collect::<Vec<_>>();
        let instance_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Instance Buffer"),
                contents: bytemuck::cast_slice(&instance_data),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });

        let buffer_capacity = instances.len();
        Ok(Self {
            obj_model,
            instances,
            bodies,
            instance_buffer,
            scales,
            buffer_capacity,
        })
    }

    /// Bind one more body to this block set (e.g. a freshly launched
    /// projectile that shares the model).
    pub fn bind(&mut self, world: &PhysicsWorld, handle: RigidBodyHandle, scale: Vector3<f32>) {
        let pose = world.pose(handle).expect("bound body has a pose");
        self.bodies.push(handle);
        self.instances.push(Instance::from_pose(pose, scale));
        self.scales.push(scale);
    }

    /// Copy every body's current pose into its instance.
    pub fn sync(&mut self, world: &PhysicsWorld) {
        for (instance, handle) in self.instances.iter_mut().zip(self.bodies.iter()) {
            match world.pose(*handle) {
                Some(pose) => instance.set_pose(pose),
                None => log::warn!("rigid block instance bound to a removed body"),
            }
        }
    }

    /// Upload the instance data. The buffer is recreated when `bind` grew the
    /// set past the allocation, otherwise it is updated in place.
    pub fn write_to_buffer(&mut self, ctx: &InitContext) {
        let instance_data = self.instances.iter().map(Instance::to_raw).collect::<Vec<_>>();
        if self.instances.len() > self.buffer_capacity {
            self.instance_buffer =
                ctx.device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Instance Buffer"),
                        contents: bytemuck::cast_slice(&instance_data),
                        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                    });
            self.buffer_capacity = self.instances.len();
        } else {
            ctx.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instance_data));
        }
    }

    /// The blocks as hit targets, index-aligned with the instances.
    pub fn hit_targets(&self) -> Vec<HitTarget> {
        self.instances
            .iter()
            .zip(self.scales.iter())
            .map(|(instance, scale)| HitTarget {
                position: instance.position,
                // Size spans the full extent, twice the half-extent scale.
                size: scale * 2.0,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
