use volition_common::ColorArgb;
use volition_kernel::World;

/// Produces the debug overlay text for a frame.
///
/// The text is plain lines; `color` is the configured debug text color the
/// overlay should be drawn with.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn color(&self, world: &World) -> ColorArgb {
        world.config().render.debug_text_color
    }

    pub fn render(&self, world: &World) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame {} (fixed steps {}) ===\n",
            world.frame(),
            world.fixed_steps()
        ));
        out.push_str(&format!(
            "State: {} [{:?}]\n",
            world.game_state_name().unwrap_or("<none>"),
            world.phase()
        ));
        out.push_str(&format!(
            "Entities: {}  Lights: {}  Materials: {}\n",
            world.entity_count(),
            world.lights().len(),
            world.materials().len()
        ));
        match world.camera() {
            Some(camera) => {
                let p = camera.position;
                out.push_str(&format!(
                    "Camera: pos=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
                    p.x, p.y, p.z, camera.fov_degrees
                ));
            }
            None => out.push_str("Camera: <none>\n"),
        }
        out.push_str(&format!("Environment: angle={:.3}\n", world.environment_angle()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use volition_kernel::{GameState, LightType};

    struct Menu;

    impl GameState for Menu {
        fn name(&self) -> &str {
            "menu"
        }
        fn start_up(&mut self, world: &mut World) {
            world.spawn_light(LightType::Ambient);
        }
        fn shut_down(&mut self, _world: &mut World) {}
        fn update(&mut self, _world: &mut World, _dt: f32) {}
        fn fixed_update(&mut self, _world: &mut World, _fixed_dt: f32) {}
    }

    #[test]
    fn uninitialized_world() {
        let world = World::new();
        let text = DebugTextRenderer::new().render(&world);
        assert!(text.contains("State: <none>"));
        assert!(text.contains("Camera: <none>"));
        assert_eq!(text.lines().count(), 5);
        assert!(text.ends_with("angle=0.000\n"));
    }

    #[test]
    fn running_world_summary() {
        let mut world = World::new();
        world.start_up(Box::new(Menu)).unwrap();
        let renderer = DebugTextRenderer::new();
        let text = renderer.render(&world);
        assert!(text.contains("State: menu [Running]"));
        assert!(text.contains("Lights: 1"));
        assert!(text.contains("fov=80"));
        assert_eq!(renderer.color(&world), ColorArgb::from_xrgb(0xDD, 0xCC, 0xDD));
    }
}
