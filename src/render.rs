//! Render composition and pipeline batching.
//!
//! This module defines the [`Render`] enum, which is used by scenes to specify
//! how they should be rendered. The engine uses `Render` to batch objects for
//! the shared basic pipeline (or its wireframe variant) and to support custom
//! per-object render passes.
//!
//! # Key types
//!
//! - [`Render<'a, 'pass>`] is the primary enum describing render operations
//! - [`Instanced<'a>`] contains data for instanced rendering (model + instance buffer)

use wgpu::RenderPass;

use crate::{
    context::Context,
    data_structures::{block::RigidBlocks, model::Model},
};

/// Data for instanced object rendering: a model and its instance buffer.
///
/// Used for 3D objects rendered with GPU instancing. The instance buffer contains
/// per-instance transformation data and other per-instance attributes.
#[derive(Clone)]
pub struct Instanced<'a> {
    pub instance: &'a wgpu::Buffer,
    pub model: &'a Model,
    pub amount: usize,
}

/// Specifies how a scene object should be rendered.
///
/// `Render` is an enum that allows flexible composition of render operations.
/// It can represent a single instanced object, a batch of objects, a composite
/// of multiple renders, or a custom render closure for special effects.
///
/// # Variants
///
/// - `None` renders nothing
/// - `Default(Instanced)` renders a single instanced object
/// - `Defaults(Vec<Instanced>)` renders a batch of instanced objects
/// - `Composed(Vec<Render>)` recursively renders composition of multiple renders
/// - `Custom(...)` invokes a user-defined closure for custom rendering
///
pub enum Render<'a, 'pass>
where
    'pass: 'a,
{
    None,
    Default(Instanced<'a>),
    Defaults(Vec<Instanced<'a>>),
    Composed(Vec<Render<'a, 'pass>>),
    Custom(Box<dyn 'a + FnOnce(&Context, &mut wgpu::RenderPass<'pass>) -> ()>),
}

impl<'a, 'pass> Render<'a, 'pass> {
    /// Flatten this render into the frame's batch of instanced draws.
    /// Custom closures run immediately against the current pass.
    pub(crate) fn set_pipelines(
        self,
        ctx: &Context,
        render_pass: &mut RenderPass<'pass>,
        basics: &mut Vec<Instanced<'a>>,
    ) {
        match self {
            Render::Default(instanced) => {
                basics.push(instanced);
            }
            Render::Defaults(mut vec) => basics.append(&mut vec),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.set_pipelines(ctx, render_pass, basics)),
            Render::Custom(f) => f(ctx, render_pass),
            Render::None => (),
        }
    }
}

impl<'a, 'pass> From<&'a RigidBlocks> for Render<'a, 'pass> {
    fn from(blocks: &'a RigidBlocks) -> Self {
        Render::Default(Instanced {
            instance: &blocks.instance_buffer,
            model: &blocks.obj_model,
            amount: blocks.instances.len(),
        })
    }
}
