//! rigid-ngin
//!
//! A lightweight, instancing-oriented demo engine built around a rigid-body
//! physics world. This crate exposes a small surface for constructing GPU
//! resources, rendering pipelines and physics-driven scene data. The design
//! emphasizes reuse of pipelines, efficient instancing of simulated bodies
//! and a minimal runtime surface suitable for short demo programs.
//!
//! High-level modules
//! - `camera`: camera types, controller and uniforms for view/projection
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: engine data models (meshes, instances, textures, blocks)
//! - `flow`: high level flow control (scenes / update loops)
//! - `physics`: rigid-body world, contact-point ring buffer and projectiles
//! - `pipelines`: definitions for the render pipelines (basic, light, wireframe)
//! - `resources`: helpers to load textures/models and create GPU resources
//! - `render`: render composition for efficient pipeline reuse
//!

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod physics;
pub mod pipelines;
pub mod resources;
pub mod render;

// Re-exports commonly used types for convenience in downstream code.
pub use winit::dpi::PhysicalPosition;
pub use cgmath::*;
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;
pub use winit::keyboard::{KeyCode, PhysicalKey};
pub use wgpu::*;
