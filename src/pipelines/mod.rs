//! Render pipeline definitions.
//!
//! - `basic` renders textured, normal-mapped, instanced models
//! - `light` renders the light source model itself
//! - the wireframe variant of `basic` backs the demos' wireframe toggle

pub mod basic;
pub mod light;

/// All pipelines the engine renders with, owned by the context.
pub struct Pipelines {
    pub basic: wgpu::RenderPipeline,
    pub wireframe: wgpu::RenderPipeline,
    pub light: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        light_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        Self {
            basic: basic::mk_basic_pipeline(
                device,
                config,
                light_bind_group_layout,
                camera_bind_group_layout,
                wgpu::PolygonMode::Fill,
            ),
            wireframe: basic::mk_basic_pipeline(
                device,
                config,
                light_bind_group_layout,
                camera_bind_group_layout,
                wgpu::PolygonMode::Line,
            ),
            light: light::mk_light_pipeline(device, config, camera_bind_group_layout),
        }
    }
}
