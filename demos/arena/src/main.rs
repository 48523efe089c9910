//! The arena demo: a green slab, a wall of crates and a projectile launcher.
//!
//! Hold the left mouse button to shoot balls along the view direction, hold
//! the right button and move the mouse to look around, WASD to fly. `L`
//! toggles wireframe rendering. Every impact above the floor is buffered in
//! the contact ring and attributed to the nearest crate.

use rigid_ngin::{
    Deg, Quaternion, Rotation3, Vector3, WindowEvent,
    context::{Context, InitContext, MouseButtonState},
    data_structures::block::RigidBlocks,
    flow::{FlowConstructor, GraphicsFlow, Out},
    physics::{
        BodyDesc, PhysicsWorld,
        contacts::{ContactRing, nearest_target},
        launcher::Launcher,
    },
    render::Render,
};

#[derive(Default)]
struct HitStats {
    hits: u32,
}

enum Event {}

struct Arena {
    world: PhysicsWorld,
    ground: RigidBlocks,
    crates: RigidBlocks,
    bullets: RigidBlocks,
    ring: ContactRing,
    launcher: Launcher,
}

impl Arena {
    async fn new(ctx: InitContext) -> anyhow::Result<Arena> {
        let mut world = PhysicsWorld::new();

        let ground_desc = BodyDesc {
            friction: 0.3,
            restitution: 0.3,
            ..BodyDesc::cuboid(Vector3::new(0.0, -2.0, 0.0), Vector3::new(25.0, 1.0, 25.0))
        };
        let ground = RigidBlocks::new(&ctx, &mut world, &[ground_desc], "plane.obj").await?;

        // A three-high wall of crates, slightly tilted so the stack topples
        // organically once something hits it.
        let mut crate_descs = Vec::new();
        for row in 0..3 {
            for col in 0..4 {
                crate_descs.push(BodyDesc {
                    mass: 2.0,
                    friction: 0.8,
                    restitution: 0.1,
                    rotation: Quaternion::from_angle_y(Deg(row as f32 * 3.0)),
                    ..BodyDesc::cuboid(
                        Vector3::new(col as f32 * 2.2 - 3.3, row as f32 * 2.2 + 0.2, -6.0),
                        Vector3::new(1.0, 1.0, 1.0),
                    )
                });
            }
        }
        let crates = RigidBlocks::new(&ctx, &mut world, &crate_descs, "cube.obj").await?;

        // Projectiles share one model and start with no instances.
        let bullets = RigidBlocks::new(&ctx, &mut world, &[], "ball.obj").await?;

        Ok(Self {
            world,
            ground,
            crates,
            bullets,
            ring: ContactRing::default(),
            launcher: Launcher::default(),
        })
    }
}

impl GraphicsFlow<HitStats, Event> for Arena {
    fn on_init(&mut self, ctx: &mut Context, _: &mut HitStats) -> Out<HitStats, Event> {
        ctx.camera.camera.position = [0.0, 6.0, 14.0].into();
        ctx.light.uniform.position = [5.0, 10.0, 10.0];
        // Contacts below the slab's top face are resting noise.
        self.ring.floor_cutoff = -0.8;
        Out::Empty
    }

    fn on_update(
        &mut self,
        ctx: &Context,
        state: &mut HitStats,
        dt: std::time::Duration,
    ) -> Out<HitStats, Event> {
        self.launcher.tick(dt);

        if let MouseButtonState::Left = ctx.mouse.pressed {
            let front = ctx.camera.camera.front();
            let origin = {
                let p = ctx.camera.camera.position;
                Vector3::new(p.x, p.y, p.z) + front * 1.5
            };
            if let Some(handle) = self.launcher.try_launch(&mut self.world, origin, front) {
                let scale = Vector3::new(1.0, 1.0, 1.0) * self.launcher.radius;
                self.bullets.bind(&self.world, handle, scale);
            }
        }

        self.world.step(dt);

        if let Some(hit) = self.ring.absorb(&self.world, ctx.camera.camera.front()) {
            state.hits += 1;
            match nearest_target(hit, &self.crates.hit_targets()) {
                Some(idx) => log::debug!("hit crate {idx} at {hit:?}"),
                None => log::debug!("hit the arena at {hit:?}"),
            }
        }

        self.ground.sync(&self.world);
        self.crates.sync(&self.world);
        self.bullets.sync(&self.world);
        let init: InitContext = ctx.into();
        self.ground.write_to_buffer(&init);
        self.crates.write_to_buffer(&init);
        self.bullets.write_to_buffer(&init);
        Out::Empty
    }

    fn on_tick(&mut self, _: &Context, state: &mut HitStats) -> Out<HitStats, Event> {
        if state.hits > 0 {
            log::info!("{} impacts buffered ({})", self.ring.len(), state.hits);
        }
        Out::Empty
    }

    fn on_device_events(
        &mut self,
        _: &Context,
        _: &mut HitStats,
        _: &rigid_ngin::DeviceEvent,
    ) -> Out<HitStats, Event> {
        Out::Empty
    }

    fn on_window_events(
        &mut self,
        _: &Context,
        _: &mut HitStats,
        event: &WindowEvent,
    ) -> Out<HitStats, Event> {
        use rigid_ngin::{KeyCode, PhysicalKey};

        if let WindowEvent::KeyboardInput { event, .. } = event {
            if event.state.is_pressed() && !event.repeat {
                if let PhysicalKey::Code(KeyCode::KeyL) = event.physical_key {
                    return Out::Configure(Box::new(|ctx: &mut Context| {
                        ctx.wireframe = !ctx.wireframe;
                    }));
                }
            }
        }
        Out::Empty
    }

    fn on_custom_events(&mut self, _: &Context, _: &mut HitStats, event: Event) -> Option<Event> {
        Some(event)
    }

    fn on_render<'pass>(&self) -> Render<'_, 'pass> {
        let mut parts: Vec<Render> = vec![(&self.ground).into(), (&self.crates).into()];
        // No bullets fired yet means nothing to draw for them.
        if !self.bullets.is_empty() {
            parts.push((&self.bullets).into());
        }
        Render::Composed(parts)
    }
}

fn main() -> anyhow::Result<()> {
    let constructor: FlowConstructor<HitStats, Event> = Box::new(|ctx| {
        Box::pin(async move {
            let arena = Arena::new(ctx)
                .await
                .expect("Failed to load the arena scene");
            Box::new(arena) as Box<dyn GraphicsFlow<HitStats, Event>>
        })
    });

    rigid_ngin::flow::run(vec![constructor])
}
