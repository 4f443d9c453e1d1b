//! Two small game states used by `simulate`: a title screen that hands over
//! to a level after a fixed number of frames.

use glam::Vec3;
use volition_kernel::{Entity, EntityHandle, GameState, LightType, World};

/// Moves in a straight line.
pub struct Drifter {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Entity for Drifter {
    fn update(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    fn destroy(&mut self) {
        tracing::trace!(position = ?self.position, "drifter destroyed");
    }
}

pub struct TitleState {
    frames: u32,
    frames_until_level: u32,
}

impl TitleState {
    pub fn new(frames_until_level: u32) -> Self {
        Self {
            frames: 0,
            frames_until_level,
        }
    }
}

impl GameState for TitleState {
    fn name(&self) -> &str {
        "title"
    }

    fn start_up(&mut self, world: &mut World) {
        if let Err(e) = world.set_environment_2d("Assets/Textures/Environment/Title.png") {
            tracing::error!("failed to set environment: {e}");
        }
        world.spawn_light(LightType::Ambient);
        for i in 0..4 {
            world.spawn_entity(Box::new(Drifter {
                position: Vec3::new(i as f32 * 100.0, 0.0, 0.0),
                velocity: Vec3::new(0.0, 0.01, 0.0),
            }));
        }
    }

    fn shut_down(&mut self, _world: &mut World) {
        tracing::info!(frames = self.frames, "leaving title");
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        self.frames += 1;
        if self.frames == self.frames_until_level {
            world.set_next_game_state(Box::new(LevelState::default()));
        }
    }

    fn fixed_update(&mut self, _world: &mut World, _fixed_dt: f32) {}
}

#[derive(Default)]
pub struct LevelState {
    spawned: Vec<EntityHandle>,
    ticks: u64,
}

impl GameState for LevelState {
    fn name(&self) -> &str {
        "level"
    }

    fn start_up(&mut self, world: &mut World) {
        if let Err(e) = world.set_environment_2d("Assets/Textures/Environment/Level.png") {
            tracing::error!("failed to set environment: {e}");
        }
        let sun = world.spawn_light(LightType::Infinite);
        world.spawn_light(LightType::Point);
        world.set_shadow_making_light(Some(sun));

        world.add_material();
        let glass = world.add_material();
        if let Some(m) = world.material_mut(glass) {
            m.name = "glass".into();
            m.alpha = 0x60;
        }

        for i in 0..16 {
            let handle = world.spawn_entity(Box::new(Drifter {
                position: Vec3::new(0.0, 0.0, i as f32 * -50.0),
                velocity: Vec3::new(0.05, 0.0, 0.0),
            }));
            self.spawned.push(handle);
        }

        if let Some(camera) = world.camera_mut() {
            camera.velocity = Vec3::new(0.0, 0.0, -0.5);
            camera.angular_velocity = Vec3::new(0.0, 0.01, 0.0);
        }
    }

    fn shut_down(&mut self, _world: &mut World) {
        tracing::info!(ticks = self.ticks, "leaving level");
    }

    fn update(&mut self, _world: &mut World, _dt: f32) {}

    /// Every 60 fixed ticks one drifter leaves the level.
    fn fixed_update(&mut self, world: &mut World, _fixed_dt: f32) {
        self.ticks += 1;
        if self.ticks % 60 == 0 {
            if let Some(handle) = self.spawned.pop() {
                world.destroy_entity(handle);
            }
        }
    }
}
