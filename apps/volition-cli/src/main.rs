mod demo;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use volition_common::ColorArgb;
use volition_kernel::{EngineConfig, FixedStepClock, ShutDownReason, World};
use volition_render::{
    AlphaInterpolator, DebugTextRenderer, Renderer, SpanInterpolator, blend_alpha,
};

#[derive(Parser)]
#[command(name = "volition-cli", about = "Headless host for the volition engine")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Run the demo game states through the frame loop
    Simulate {
        /// Number of rendered frames
        #[arg(short, long, default_value = "120")]
        frames: u32,
        /// Wall time per rendered frame in milliseconds
        #[arg(long, default_value = "16.6")]
        frame_ms: f32,
        /// Frame at which the title hands over to the level
        #[arg(long, default_value = "30")]
        switch_at: u32,
        /// JSON engine config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Blend one source pixel over one destination pixel
    Blend {
        /// Source alpha, 0-255
        #[arg(short, long)]
        alpha: u8,
        /// Source color as RRGGBB
        #[arg(short, long)]
        src: String,
        /// Destination color as RRGGBB
        #[arg(short, long)]
        dst: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("volition-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: phase={:?}", World::new().phase());
            println!("render: {}", volition_render::crate_info());
        }
        Commands::Simulate {
            frames,
            frame_ms,
            switch_at,
            config,
        } => {
            let config = match config {
                Some(path) => EngineConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => EngineConfig::default(),
            };
            simulate(config, frames, frame_ms, switch_at)?;
        }
        Commands::Blend { alpha, src, dst } => {
            let src = parse_rgb(&src)?;
            let dst = parse_rgb(&dst)?;
            let lit = ColorArgb::from_argb(alpha, src.r(), src.g(), src.b());

            let mut renderer = Renderer::new(1, 1)?;
            renderer.clear(dst);
            renderer.draw_span(&mut AlphaInterpolator::new(), [lit; 3], 0, 0..1);
            let out = renderer.pixel(0, 0).context("blend pixel missing")?;
            debug_assert_eq!(out, blend_alpha(alpha as i32, lit, dst));
            println!("{src} over {dst} at alpha {alpha} -> {out}");
        }
    }

    Ok(())
}

fn simulate(config: EngineConfig, frames: u32, frame_ms: f32, switch_at: u32) -> anyhow::Result<()> {
    let mut renderer = Renderer::from_config(&config)?;
    let mut clock = FixedStepClock::new(config.render.fixed_delta_time());
    let mut world = World::with_config(config);

    world.start_up(Box::new(demo::TitleState::new(switch_at)))?;
    renderer.sync_terrain(&world);

    for _ in 0..frames {
        for _ in 0..clock.advance(frame_ms) {
            world.fixed_update(clock.fixed_dt())?;
        }
        world.update(frame_ms, &mut renderer)?;
        renderer.sync_terrain(&world);
        draw_materials(&world, &mut renderer);
    }

    let debug_text = DebugTextRenderer::new();
    print!("{}", debug_text.render(&world));
    println!("Terrain detaches: {}", renderer.terrain_removals());

    world.shut_down(ShutDownReason::Final, &mut renderer)?;
    Ok(())
}

/// One band per material, shaded with the interpolator the material calls for.
fn draw_materials(world: &World, renderer: &mut Renderer) {
    renderer.clear(ColorArgb::from_xrgb(0x20, 0x30, 0x40));
    let materials = world.materials();
    if materials.is_empty() {
        return;
    }
    let band = renderer.height() / materials.len();
    let width = renderer.width();
    for (i, material) in materials.iter().enumerate() {
        let c = material.color;
        let lit = ColorArgb::from_argb(material.alpha, c.r(), c.g(), c.b());
        let mut interpolator = SpanInterpolator::for_material(material);
        for y in i * band..(i + 1) * band {
            renderer.draw_span(&mut interpolator, [lit; 3], y, 0..width);
        }
    }
}

fn parse_rgb(hex: &str) -> anyhow::Result<ColorArgb> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        anyhow::bail!("expected RRGGBB, got {hex:?}");
    }
    let value = u32::from_str_radix(hex, 16).with_context(|| format!("parsing color {hex:?}"))?;
    Ok(ColorArgb(0xFF00_0000 | value))
}
