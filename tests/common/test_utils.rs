#[cfg(feature = "integration-tests")]
use rigid_ngin::flow::ImageTestResult;
#[cfg(feature = "integration-tests")]
use rigid_ngin::{
    context::Context,
    flow::{GraphicsFlow, Out},
    render::Render,
};

use cgmath::Vector3;
use rigid_ngin::physics::BodyDesc;

/// A wide static slab whose top face sits at `top`.
#[allow(dead_code)]
pub(crate) fn floor_desc(top: f32) -> BodyDesc {
    BodyDesc::cuboid(
        Vector3::new(0.0, top - 1.0, 0.0),
        Vector3::new(20.0, 1.0, 20.0),
    )
}

/// A dynamic unit-ish ball hovering above the floor.
#[allow(dead_code)]
pub(crate) fn dropped_ball(height: f32) -> BodyDesc {
    BodyDesc {
        mass: 1.0,
        ..BodyDesc::ball(Vector3::new(0.0, height, 0.0), 0.5)
    }
}

#[allow(dead_code)]
pub(crate) struct State {
    frame_counter: u32,
    init_invocations: u32,
    update_invocations: u32,
    pub dummy_state: String,
}

#[allow(dead_code)]
impl State {
    pub fn new() -> Self {
        Self {
            frame_counter: 0,
            init_invocations: 0,
            update_invocations: 0,
            dummy_state: String::new(),
        }
    }

    pub fn frame(&mut self) {
        self.frame_counter += 1;
    }

    pub fn init(&mut self) {
        self.init_invocations += 1;
    }

    pub fn update(&mut self) {
        self.update_invocations += 1;
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn init_invocations(&self) -> u32 {
        self.init_invocations
    }

    pub fn update_invocations(&self) -> u32 {
        self.update_invocations
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
pub(crate) struct FrameCounter(pub(crate) u32);
impl Default for FrameCounter {
    fn default() -> Self {
        Self(0)
    }
}
#[allow(dead_code)]
impl FrameCounter {
    pub(crate) fn frame(&self) -> u32 {
        self.0
    }

    pub(crate) fn progress(&mut self) {
        self.0 += 1;
    }
}

/// A minimal flow for image tests: a setup closure, a fixed render and a
/// validation closure run against the captured frame.
#[cfg(feature = "integration-tests")]
pub(crate) struct TestRender<'a, 'pass> {
    pub(crate) setup: &'a dyn Fn(&mut Context, &mut FrameCounter),
    pub(crate) render: Render<'a, 'pass>,
    pub(crate) validate: &'a dyn Fn(
        &Context,
        &mut FrameCounter,
        &mut image::ImageBuffer<image::Rgba<u8>, wgpu::BufferView>,
    ) -> Result<ImageTestResult, anyhow::Error>,
}

#[cfg(feature = "integration-tests")]
impl<'a, 'b> GraphicsFlow<FrameCounter, ()> for TestRender<'a, 'b>
where
    'b: 'a,
{
    fn on_init(&mut self, ctx: &mut Context, s: &mut FrameCounter) -> Out<FrameCounter, ()> {
        (self.setup)(ctx, s);
        Out::Empty
    }

    fn on_update(
        &mut self,
        _: &Context,
        state: &mut FrameCounter,
        _: std::time::Duration,
    ) -> Out<FrameCounter, ()> {
        state.progress();
        Out::Empty
    }

    fn on_tick(&mut self, _: &Context, _: &mut FrameCounter) -> Out<FrameCounter, ()> {
        Out::Empty
    }

    fn on_device_events(
        &mut self,
        _: &Context,
        _: &mut FrameCounter,
        _: &rigid_ngin::DeviceEvent,
    ) -> Out<FrameCounter, ()> {
        Out::Empty
    }

    fn on_window_events(
        &mut self,
        _: &Context,
        _: &mut FrameCounter,
        _: &rigid_ngin::WindowEvent,
    ) -> Out<FrameCounter, ()> {
        Out::Empty
    }

    fn on_custom_events(&mut self, _: &Context, _: &mut FrameCounter, event: ()) -> Option<()> {
        Some(event)
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        match &self.render {
            Render::None => Render::None,
            Render::Default(instanced) => Render::Default(instanced.clone()),
            Render::Defaults(instanceds) => Render::Defaults(instanceds.clone()),
            Render::Composed(_) => panic!("Composed not supported in Integration Tests"),
            Render::Custom(_) => panic!("Custom not supported in Integration Tests"),
        }
    }

    fn render_to_texture(
        &self,
        ctx: &Context,
        s: &mut FrameCounter,
        texture: &mut image::ImageBuffer<image::Rgba<u8>, wgpu::BufferView>,
    ) -> Result<ImageTestResult, anyhow::Error> {
        (self.validate)(ctx, s, texture)
    }
}

#[macro_export]
macro_rules! golden_image_test {
    ($graphics_elem:expr) => {{
        use crate::common::test_utils::FrameCounter;
        use rigid_ngin::flow::FlowConstructor;
        use rigid_ngin::flow::GraphicsFlow;
        let model_constructor: FlowConstructor<FrameCounter, ()> = Box::new(|_| {
            Box::pin(async move {
                let g_flow: Box<dyn GraphicsFlow<FrameCounter, ()>> = Box::new($graphics_elem);
                g_flow
            })
        });

        rigid_ngin::flow::run(vec![model_constructor])
            .expect("Failed to run flow for integration test.");
    }};
}
