//! Rendering: the per-pixel shading boundary of the software rasterizer.
//!
//! # Invariants
//! - Interpolators only touch the [`InterpolationContext`] they are handed.
//! - `process_pixel` does arithmetic and one buffer read; no allocation.
//! - The renderer never owns terrain; it is told when the world drops it.

mod context;
mod debug_text;
mod interpolator;
mod renderer;

pub use context::{InterpolationContext, LIT_COLOR_SAMPLES};
pub use debug_text::DebugTextRenderer;
pub use interpolator::{
    AlphaInterpolator, FlatInterpolator, Interpolator, SpanInterpolator, blend_alpha, shade_span,
};
pub use renderer::{RenderError, Renderer};

pub fn crate_info() -> &'static str {
    "volition-render v0.1.0"
}
