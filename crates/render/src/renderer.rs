use std::ops::Range;

use crate::context::{InterpolationContext, LIT_COLOR_SAMPLES};
use crate::interpolator::{Interpolator, shade_span};
use volition_common::ColorArgb;
use volition_kernel::{EngineConfig, RenderSpec, TerrainSlot, World};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RenderError {
    #[error("frame buffer size must be non-zero, got {width}x{height}")]
    InvalidSize { width: usize, height: usize },
    #[error("frame buffer {width}x{height} exceeds {max} pixels per edge")]
    TooLarge { width: usize, height: usize, max: usize },
    #[error("render scale must be positive and finite, got {0}")]
    InvalidScale(f32),
}

/// Software renderer: an XRGB frame buffer plus the renderer's terrain slot.
///
/// Triangle setup and clipping happen upstream; this type receives finished
/// spans and runs them through an interpolator.
#[derive(Debug)]
pub struct Renderer {
    width: usize,
    height: usize,
    pitch: usize,
    buffer: Vec<ColorArgb>,
    terrain_attached: bool,
    terrain_removals: u32,
}

impl Renderer {
    pub const MAX_DIMENSION: usize = RenderSpec::MAX_FRAME_DIMENSION as usize;

    pub fn new(width: usize, height: usize) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize { width, height });
        }
        let too_large = RenderError::TooLarge { width, height, max: Self::MAX_DIMENSION };
        if width > Self::MAX_DIMENSION || height > Self::MAX_DIMENSION {
            return Err(too_large);
        }
        let len = width.checked_mul(height).ok_or(too_large)?;
        tracing::debug!(width, height, "frame buffer allocated");
        Ok(Self {
            width,
            height,
            pitch: width,
            buffer: vec![ColorArgb::BLACK; len],
            terrain_attached: false,
            terrain_removals: 0,
        })
    }

    /// Size the frame buffer from the window and render scale.
    pub fn from_config(config: &EngineConfig) -> Result<Self, RenderError> {
        let scale = config.render.render_scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RenderError::InvalidScale(scale));
        }
        let width = (config.window.desired_size.x.max(0) as f32 * scale) as usize;
        let height = (config.window.desired_size.y.max(0) as f32 * scale) as usize;
        Self::new(width, height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pitch(&self) -> usize {
        self.pitch
    }

    pub fn clear(&mut self, color: ColorArgb) {
        self.buffer.fill(color);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<ColorArgb> {
        if x >= self.width {
            return None;
        }
        self.buffer.get(y * self.pitch + x).copied()
    }

    pub fn buffer(&self) -> &[ColorArgb] {
        &self.buffer
    }

    /// Raw `u32` view for handing the frame to a presenter.
    pub fn as_raw(&self) -> &[u32] {
        bytemuck::cast_slice(&self.buffer)
    }

    /// Shade one span of row `y`. Returns the number of pixels written.
    pub fn draw_span<I: Interpolator>(
        &mut self,
        interpolator: &mut I,
        lit_color: [ColorArgb; LIT_COLOR_SAMPLES],
        y: usize,
        xs: Range<usize>,
    ) -> usize {
        let mut ctx = InterpolationContext::new(&mut self.buffer, self.pitch);
        ctx.lit_color = lit_color;
        shade_span(interpolator, &mut ctx, y, xs)
    }

    pub fn attach_terrain(&mut self) {
        self.terrain_attached = true;
    }

    /// Attach the world's terrain if it has one this renderer isn't holding.
    /// Call after `World::update`, which may have rebuilt the terrain during a
    /// game state switch.
    pub fn sync_terrain(&mut self, world: &World) {
        if world.terrain_mesh().is_some() && !self.terrain_attached {
            tracing::debug!("terrain attached to renderer");
            self.terrain_attached = true;
        }
    }

    pub fn has_terrain(&self) -> bool {
        self.terrain_attached
    }

    /// How many times the world has detached terrain from this renderer.
    pub fn terrain_removals(&self) -> u32 {
        self.terrain_removals
    }
}

impl TerrainSlot for Renderer {
    fn remove_terrain(&mut self) {
        self.terrain_attached = false;
        self.terrain_removals += 1;
        tracing::debug!("terrain detached from renderer");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolator::{AlphaInterpolator, FlatInterpolator};
    use volition_kernel::{GameState, ShutDownReason};

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(
            Renderer::new(0, 10).unwrap_err(),
            RenderError::InvalidSize { width: 0, height: 10 }
        );
    }

    #[test]
    fn oversized_buffer_is_rejected_without_overflow() {
        assert!(matches!(
            Renderer::new(usize::MAX, 2),
            Err(RenderError::TooLarge { width: usize::MAX, height: 2, .. })
        ));
        assert!(matches!(
            Renderer::new(Renderer::MAX_DIMENSION + 1, 1),
            Err(RenderError::TooLarge { .. })
        ));
    }

    #[test]
    fn unvalidated_config_scale_is_rejected() {
        let mut config = EngineConfig::default();
        config.render.render_scale = f32::INFINITY;
        assert_eq!(
            Renderer::from_config(&config).unwrap_err(),
            RenderError::InvalidScale(f32::INFINITY)
        );

        // Finite but huge: the cast saturates and the size cap catches it.
        config.render.render_scale = 1e30;
        assert!(matches!(
            Renderer::from_config(&config),
            Err(RenderError::TooLarge { .. })
        ));
    }

    #[test]
    fn from_config_applies_scale() {
        let mut config = EngineConfig::default();
        config.render.render_scale = 0.5;
        let r = Renderer::from_config(&config).unwrap();
        assert_eq!((r.width(), r.height()), (320, 240));
        assert_eq!(r.as_raw().len(), 320 * 240);
    }

    #[test]
    fn draw_flat_then_blend() {
        let mut r = Renderer::new(4, 2).unwrap();
        r.clear(ColorArgb::from_xrgb(0, 0, 200));
        let red = ColorArgb::from_argb(128, 200, 0, 0);

        r.draw_span(&mut FlatInterpolator::new(), [red; 3], 0, 0..2);
        r.draw_span(&mut AlphaInterpolator::new(), [red; 3], 1, 0..4);

        assert_eq!(r.pixel(0, 0), Some(ColorArgb::from_xrgb(200, 0, 0)));
        assert_eq!(r.pixel(2, 0), Some(ColorArgb::from_xrgb(0, 0, 200)));
        assert_eq!(r.pixel(3, 1), Some(ColorArgb::from_xrgb(100, 0, 99)));
        assert_eq!(r.pixel(4, 1), None);
    }

    #[test]
    fn world_detaches_terrain_once_per_destruction() {
        struct Idle;
        impl GameState for Idle {
            fn start_up(&mut self, _world: &mut World) {}
            fn shut_down(&mut self, _world: &mut World) {}
            fn update(&mut self, _world: &mut World, _dt: f32) {}
            fn fixed_update(&mut self, _world: &mut World, _fixed_dt: f32) {}
        }

        let mut r = Renderer::new(8, 8).unwrap();
        let mut world = World::new();
        world.start_up(Box::new(Idle)).unwrap();
        r.attach_terrain();

        world.shut_down(ShutDownReason::Reset, &mut r).unwrap();
        assert!(!r.has_terrain());
        world.shut_down(ShutDownReason::Final, &mut r).unwrap();
        assert_eq!(r.terrain_removals(), 1);
    }

    #[test]
    fn terrain_reattaches_after_state_switch() {
        struct Idle;
        impl GameState for Idle {
            fn start_up(&mut self, _world: &mut World) {}
            fn shut_down(&mut self, _world: &mut World) {}
            fn update(&mut self, _world: &mut World, _dt: f32) {}
            fn fixed_update(&mut self, _world: &mut World, _fixed_dt: f32) {}
        }

        struct Hop;
        impl GameState for Hop {
            fn start_up(&mut self, _world: &mut World) {}
            fn shut_down(&mut self, _world: &mut World) {}
            fn update(&mut self, world: &mut World, _dt: f32) {
                world.set_next_game_state(Box::new(Idle));
            }
            fn fixed_update(&mut self, _world: &mut World, _fixed_dt: f32) {}
        }

        let mut r = Renderer::new(8, 8).unwrap();
        let mut world = World::new();
        world.start_up(Box::new(Hop)).unwrap();
        r.sync_terrain(&world);
        assert!(r.has_terrain());

        // Frame 1 queues the switch; frame 2 performs it and rebuilds terrain.
        world.update(16.0, &mut r).unwrap();
        r.sync_terrain(&world);
        world.update(16.0, &mut r).unwrap();
        assert_eq!(r.terrain_removals(), 1);
        assert!(!r.has_terrain());
        r.sync_terrain(&world);
        assert!(r.has_terrain());

        world.shut_down(ShutDownReason::Final, &mut r).unwrap();
        assert_eq!(r.terrain_removals(), 2);
        r.sync_terrain(&world);
        assert!(!r.has_terrain());
    }
}
