#[cfg(feature = "integration-tests")]
use wgpu::Color;

#[cfg(feature = "integration-tests")]
mod common;

#[test]
#[cfg(feature = "integration-tests")]
fn should_render_clear_colour() {
    use crate::common::test_utils::{FrameCounter, TestRender};
    use rigid_ngin::{context::Context, render::Render};

    golden_image_test!(TestRender {
        setup: &|ctx: &mut Context, _: &mut FrameCounter| {
            ctx.clear_colour = Color::WHITE;
            ctx.camera.camera.position = [0.0, 5.0, 2.0].into();
        },
        render: Render::None,
        validate: &|_, state: &mut FrameCounter, texture| {
            if state.frame() > 0 {
                let colour = Color::WHITE;
                let f_to_u8 = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
                let desired_pixel = image::Rgba([
                    f_to_u8(colour.r),
                    f_to_u8(colour.g),
                    f_to_u8(colour.b),
                    f_to_u8(colour.a),
                ]);
                let pixels = texture.pixels();

                for pixel in pixels {
                    assert_eq!(*pixel, desired_pixel);
                }
                Ok(rigid_ngin::flow::ImageTestResult::Passed)
            } else {
                Ok(rigid_ngin::flow::ImageTestResult::Waiting)
            }
        },
    });
}
